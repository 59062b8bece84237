//! squeak-lex - the Squeak scanner.
//!
//! Turns a byte stream into Squeak tokens. `Lexer` does the classification
//! work; `Scanner` wraps it with the one-token lookahead the parser needs.
//! The buffer size is caller-configurable (default 512 bytes) specifically
//! so the scanner never needs the whole source resident at once.

mod cursor;
mod error;
mod lexer;
mod token;

pub use error::{LexError, Result};
pub use lexer::{Lexer, Scanner, DEFAULT_BUFFER_SIZE};
pub use token::{Token, TokenKind};
