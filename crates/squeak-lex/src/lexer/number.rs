use std::io::Read;

use super::Lexer;
use crate::error::{LexError, Result};
use crate::token::{Token, TokenKind};

impl<R: Read> Lexer<R> {
    /// Lexes an integer or float literal. A `.` after the integer part
    /// starts a float only if another digit follows, or if the byte after
    /// the `.` is a terminator rather than the start of an identifier —
    /// `50.` is a valid `Float(50.0)`, but `50.foo` lexes as `Integer(50)`,
    /// `Dot`, `Identifier(foo)`, leaving the `.` for the parser.
    pub(super) fn lex_number(&mut self, line: u32) -> Result<Token> {
        let mut text = String::new();

        while let Some(b) = self.cursor.current_byte() {
            if b.is_ascii_digit() {
                text.push(b as char);
                self.cursor.advance()?;
            } else {
                break;
            }
        }

        let mut is_float = false;
        if self.cursor.current_byte() == Some(b'.') {
            let starts_identifier = matches!(
                self.cursor.peek_byte(),
                Some(b) if b.is_ascii_alphabetic() || b == b'_'
            );
            if !starts_identifier {
                is_float = true;
                text.push('.');
                self.cursor.advance()?;
                while let Some(b) = self.cursor.current_byte() {
                    if b.is_ascii_digit() {
                        text.push(b as char);
                        self.cursor.advance()?;
                    } else {
                        break;
                    }
                }
            }
        }

        if is_float {
            let value: f64 = text
                .parse()
                .map_err(|_| LexError::InvalidNumberLiteral { line, text: text.clone() })?;
            Ok(Token::new(TokenKind::Float(value), line))
        } else {
            let value: i64 = text
                .parse()
                .map_err(|_| LexError::InvalidNumberLiteral { line, text: text.clone() })?;
            Ok(Token::new(TokenKind::Integer(value), line))
        }
    }
}
