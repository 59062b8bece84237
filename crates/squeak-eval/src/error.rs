use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("line {line}: '{name}' is not declared")]
    NotDeclared { name: String, line: u32 },

    #[error("line {line}: value is not callable")]
    NotCallable { line: u32 },

    #[error("line {line}: expected {expected} argument(s), got {got}")]
    ArityMismatch { expected: usize, got: usize, line: u32 },

    #[error("line {line}: unrecognized operand type for '{op}'")]
    UnrecognizedOperandType { op: String, line: u32 },

    #[error("line {line}: illegal argument: {message}")]
    IllegalArgument { message: String, line: u32 },

    #[error("line {line}: unexpected '{kind}' outside of its matching construct")]
    UnexpectedUnwind { kind: &'static str, line: u32 },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
