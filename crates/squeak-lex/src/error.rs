use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("io error while reading source: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: u32 },

    #[error("line {line}: source is not valid utf-8")]
    InvalidUtf8 { line: u32 },

    #[error("configured scanner buffer size must be at least 1, got {0}")]
    BufferTooSmall(usize),

    #[error("line {line}: invalid numeric literal {text:?}")]
    InvalidNumberLiteral { line: u32, text: String },
}

pub type Result<T> = std::result::Result<T, LexError>;
