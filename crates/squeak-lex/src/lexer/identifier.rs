use std::io::Read;

use squeak_util::Symbol;

use super::{is_ident_continue, Lexer};
use crate::error::Result;
use crate::token::{Token, TokenKind};

impl<R: Read> Lexer<R> {
    /// Lexes an identifier or keyword starting at the cursor's current byte.
    pub(super) fn lex_identifier(&mut self, line: u32) -> Result<Token> {
        let mut text = String::new();
        while let Some(b) = self.cursor.current_byte() {
            if is_ident_continue(b) {
                text.push(b as char);
                self.cursor.advance()?;
            } else {
                break;
            }
        }

        let kind = TokenKind::keyword(&text).unwrap_or_else(|| TokenKind::Identifier(Symbol::intern(&text)));
        Ok(Token::new(kind, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor as IoCursor;

    fn lex_one(src: &str) -> TokenKind {
        let mut lexer = Lexer::new(IoCursor::new(src.as_bytes().to_vec())).unwrap();
        lexer.next_token().unwrap().kind
    }

    #[test]
    fn plain_identifier() {
        assert_eq!(lex_one("foo_bar1"), TokenKind::Identifier(Symbol::intern("foo_bar1")));
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(lex_one("while"), TokenKind::While);
        assert_eq!(lex_one("function"), TokenKind::Function);
    }

    #[test]
    fn true_false_nil_are_literals_not_identifiers() {
        assert_eq!(lex_one("true"), TokenKind::Boolean(true));
        assert_eq!(lex_one("false"), TokenKind::Boolean(false));
        assert_eq!(lex_one("nil"), TokenKind::Nil);
    }
}
