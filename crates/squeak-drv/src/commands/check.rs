use super::common::{self, EXIT_REPORTED_ERROR, EXIT_SUCCESS};
use crate::error::Result;

pub struct CheckArgs {
    pub path: String,
    pub buffer_size: usize,
}

/// Parses and resolves without executing; reports syntax/resolution errors
/// and exits non-zero if any were found.
pub fn run(args: CheckArgs) -> Result<i32> {
    let source = common::read_source(&args.path)?;
    match common::parse_and_resolve(&source, args.buffer_size)? {
        Some(_) => Ok(EXIT_SUCCESS),
        None => Ok(EXIT_REPORTED_ERROR),
    }
}
