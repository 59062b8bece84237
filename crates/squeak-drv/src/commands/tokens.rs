use std::io::Cursor;

use squeak_lex::Lexer;

use super::common::{self, EXIT_REPORTED_ERROR, EXIT_SUCCESS};
use crate::error::Result;

pub struct TokensArgs {
    pub path: String,
    pub buffer_size: usize,
}

/// Runs the scanner alone and prints one token per line, for debugging the
/// lexer without involving the parser.
pub fn run(args: TokensArgs) -> Result<i32> {
    let source = common::read_source(&args.path)?;
    let mut lexer = match Lexer::with_buffer_size(Cursor::new(source), args.buffer_size) {
        Ok(lexer) => lexer,
        Err(err) => {
            eprintln!("lexical error: {err}");
            return Ok(EXIT_REPORTED_ERROR);
        }
    };

    loop {
        match lexer.next_token() {
            Ok(token) => {
                let is_eof = token.is_eof();
                println!("{}: {:?}", token.line, token.kind);
                if is_eof {
                    break;
                }
            }
            Err(err) => {
                eprintln!("lexical error: {err}");
                return Ok(EXIT_REPORTED_ERROR);
            }
        }
    }

    Ok(EXIT_SUCCESS)
}
