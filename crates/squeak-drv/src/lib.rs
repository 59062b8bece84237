//! squeak-drv - the reference `squeak` command-line driver.
//!
//! A thin example embedding of the language core (`squeak-lex` /
//! `squeak-par` / `squeak-sem` / `squeak-eval`): it reads a source file or
//! stdin, runs it through the pipeline, and reports results the way a host
//! embedding the language would, minus anything HTTP-specific.

pub mod commands;
pub mod error;

pub use error::{DriverError, Result};
