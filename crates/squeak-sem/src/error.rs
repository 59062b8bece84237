use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("line {line}: '{name}' is already declared in this scope")]
    Redeclaration { name: String, line: u32 },

    /// Reserved for a resolver encountering an AST shape it does not know
    /// how to walk. The visitor below is exhaustive over every `Stmt`/
    /// `Expr` variant, so this should never actually be constructed; it
    /// exists so the error taxonomy has a slot for that kind of internal
    /// bug rather than a panic.
    #[error("internal error: resolver does not support this node kind: {description}")]
    UnsupportedNode { description: String },
}

pub type Result<T> = std::result::Result<T, ResolveError>;
