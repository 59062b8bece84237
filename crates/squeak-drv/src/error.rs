//! Driver-level errors — everything that can go wrong before the language
//! pipeline itself even starts, or while shuttling bytes in and out of it.
//! Parse/resolve/runtime failures are reported and mapped to an exit code
//! directly by the command that produced them; they never become a
//! `DriverError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, DriverError>;
