//! squeak-par - the Squeak parser.
//!
//! Recursive-descent with precedence climbing for binary operators.
//! `Parser::parse_program` never stops at the first syntax error: a failing
//! statement is recorded and the parser resynchronizes at the next `;`,
//! `}`, or `EOF` so later statements still get a chance to parse and
//! report their own problems.

mod ast;
mod error;
mod expr;
mod stmt;

use std::io::Read;

pub use ast::{CallOp, Expr, InfixOp, LogicalOp, PrefixOp, Stmt};
pub use error::{ParseError, Result};

use squeak_lex::{Scanner, Token, TokenKind};
use squeak_util::RefIdGenerator;

pub struct Parser<R: Read> {
    scanner: Scanner<R>,
    current: Token,
    refs: RefIdGenerator,
    errors: Vec<ParseError>,
}

impl<R: Read> Parser<R> {
    pub fn new(mut scanner: Scanner<R>) -> Result<Self> {
        let current = scanner.next()?;
        Ok(Self {
            scanner,
            current,
            refs: RefIdGenerator::new(),
            errors: Vec::new(),
        })
    }

    /// Parses every statement in the source, collecting rather than
    /// aborting on syntax errors. Returns the statements that did parse
    /// successfully alongside every error encountered along the way.
    pub fn parse_program(mut self) -> (Vec<Stmt>, Vec<ParseError>) {
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::Eof) {
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize();
                }
            }
        }
        (stmts, self.errors)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current.kind == kind
    }

    fn advance(&mut self) -> Result<Token> {
        let prev = self.current;
        self.current = self.scanner.next()?;
        Ok(prev)
    }

    fn expect(&mut self, kind: &TokenKind, message: &str) -> Result<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.error(self.current.line, message))
        }
    }

    fn expect_identifier(&mut self, message: &str) -> Result<String> {
        if let TokenKind::Identifier(sym) = self.current.kind {
            self.advance()?;
            Ok(sym.as_str().to_string())
        } else {
            Err(self.error(self.current.line, message))
        }
    }

    fn error(&self, line: u32, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Skips tokens until (and including) the next `;`, `}`, or `EOF`.
    fn synchronize(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::Semicolon => {
                    let _ = self.advance();
                    return;
                }
                TokenKind::RBrace => {
                    let _ = self.advance();
                    return;
                }
                _ => {
                    if self.advance().is_err() {
                        return;
                    }
                }
            }
        }
    }
}

fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    use TokenKind::*;
    Some(match kind {
        Eq | NotEq => (7, 8),
        Lt | LtEq | Gt | GtEq => (9, 10),
        Plus | Minus => (11, 12),
        Star | Slash => (13, 14),
        _ => return None,
    })
}

fn token_to_infix_op(kind: &TokenKind) -> InfixOp {
    match kind {
        TokenKind::Plus => InfixOp::Add,
        TokenKind::Minus => InfixOp::Sub,
        TokenKind::Star => InfixOp::Mul,
        TokenKind::Slash => InfixOp::Div,
        TokenKind::Eq => InfixOp::Eq,
        TokenKind::NotEq => InfixOp::NotEq,
        TokenKind::Lt => InfixOp::Lt,
        TokenKind::LtEq => InfixOp::LtEq,
        TokenKind::Gt => InfixOp::Gt,
        TokenKind::GtEq => InfixOp::GtEq,
        other => unreachable!("{other:?} is not a binary operator"),
    }
}
