use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Syntax { line: u32, message: String },

    #[error(transparent)]
    Lex(#[from] squeak_lex::LexError),
}

pub type Result<T> = std::result::Result<T, ParseError>;
