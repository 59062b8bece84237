use std::io::Read;

use squeak_util::Symbol;

use super::Lexer;
use crate::error::{LexError, Result};
use crate::token::{Token, TokenKind};

impl<R: Read> Lexer<R> {
    /// Lexes a string literal. No escape sequences are processed: the
    /// content between the quotes is taken verbatim, so a literal backslash
    /// in source is a literal backslash in the value.
    pub(super) fn lex_string(&mut self, line: u32) -> Result<Token> {
        self.cursor.advance()?; // opening quote

        let mut bytes = Vec::new();
        loop {
            match self.cursor.current_byte() {
                None => return Err(LexError::UnterminatedString { line }),
                Some(b'"') => {
                    self.cursor.advance()?;
                    break;
                }
                Some(b'\n') => return Err(LexError::UnterminatedString { line }),
                Some(b) => {
                    bytes.push(b);
                    self.cursor.advance()?;
                }
            }
        }

        let text = String::from_utf8(bytes).map_err(|_| LexError::InvalidUtf8 { line })?;
        Ok(Token::new(TokenKind::String(Symbol::intern(&text)), line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor as IoCursor;

    fn lex_one(src: &str) -> Result<TokenKind> {
        let mut lexer = Lexer::new(IoCursor::new(src.as_bytes().to_vec())).unwrap();
        Ok(lexer.next_token()?.kind)
    }

    #[test]
    fn simple_string() {
        assert_eq!(lex_one("\"hello\"").unwrap(), TokenKind::String(Symbol::intern("hello")));
    }

    #[test]
    fn backslash_is_taken_literally() {
        assert_eq!(
            lex_one("\"a\\nb\"").unwrap(),
            TokenKind::String(Symbol::intern("a\\nb"))
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(matches!(
            lex_one("\"oops"),
            Err(LexError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn newline_inside_string_is_an_error() {
        assert!(matches!(
            lex_one("\"oops\nstill going\""),
            Err(LexError::UnterminatedString { .. })
        ));
    }
}
