//! Shared helpers between the `run`, `check` and `tokens` subcommands.

use std::io::{Cursor, Read as _};

use squeak_lex::Scanner;
use squeak_par::{Parser, Stmt};
use squeak_sem::{Resolution, Resolver};

use crate::error::{DriverError, Result};

/// Reads the whole source: `-` means stdin, anything else is a file path.
pub fn read_source(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|source| DriverError::Read { path: path.to_string(), source })?;
        Ok(buf)
    } else {
        std::fs::read(path).map_err(|source| DriverError::Read { path: path.to_string(), source })
    }
}

/// Exit codes shared by every subcommand, per the driver's documented
/// contract: 0 success, 1 a reported syntax/resolution error, 2 an
/// uncaught runtime fault, 3 a command-line usage error.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_REPORTED_ERROR: i32 = 1;
pub const EXIT_RUNTIME_FAULT: i32 = 2;
pub const EXIT_USAGE_ERROR: i32 = 3;

/// Parses and resolves `source`, printing any syntax or resolution errors
/// to stderr. Returns `None` (with `1` as the implied exit code) if any
/// were found, so callers don't execute a program that failed to resolve.
pub fn parse_and_resolve(source: &[u8], buffer_size: usize) -> Result<Option<(Vec<Stmt>, Resolution)>> {
    let scanner = Scanner::with_buffer_size(Cursor::new(source.to_vec()), buffer_size)
        .map_err(|e| DriverError::Usage(e.to_string()))?;
    let parser = Parser::new(scanner).map_err(|e| DriverError::Usage(e.to_string()))?;
    let (program, parse_errors) = parser.parse_program();
    if !parse_errors.is_empty() {
        for err in &parse_errors {
            eprintln!("syntax error: {err}");
        }
        return Ok(None);
    }

    let (resolution, resolve_errors) = Resolver::resolve(&program);
    if !resolve_errors.is_empty() {
        for err in &resolve_errors {
            eprintln!("resolution error: {err}");
        }
        return Ok(None);
    }

    Ok(Some((program, resolution)))
}
