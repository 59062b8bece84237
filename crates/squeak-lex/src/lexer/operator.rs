use std::io::Read;

use super::Lexer;
use crate::error::Result;
use crate::token::{Token, TokenKind};

impl<R: Read> Lexer<R> {
    /// Lexes punctuation and operators. Two-character operators (`==`,
    /// `!=`, `<=`, `>=`) are matched greedily before falling back to their
    /// single-character counterpart.
    pub(super) fn lex_operator(&mut self, line: u32) -> Result<Token> {
        let c = self.cursor.current_byte().expect("checked by caller");
        self.cursor.advance()?;

        let kind = match c {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'.' => TokenKind::Dot,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'=' => self.two_char(b'=', TokenKind::Eq, TokenKind::Assign)?,
            b'!' => self.two_char(b'=', TokenKind::NotEq, TokenKind::Bang)?,
            b'<' => self.two_char(b'=', TokenKind::LtEq, TokenKind::Lt)?,
            b'>' => self.two_char(b'=', TokenKind::GtEq, TokenKind::Gt)?,
            other => TokenKind::Illegal(other as char),
        };

        Ok(Token::new(kind, line))
    }

    fn two_char(&mut self, expect: u8, two: TokenKind, one: TokenKind) -> Result<TokenKind> {
        if self.cursor.current_byte() == Some(expect) {
            self.cursor.advance()?;
            Ok(two)
        } else {
            Ok(one)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor as IoCursor;

    fn tokens(src: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(IoCursor::new(src.as_bytes().to_vec())).unwrap();
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            let done = tok.is_eof();
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn two_char_operators_take_priority() {
        assert_eq!(tokens("=="), vec![TokenKind::Eq, TokenKind::Eof]);
        assert_eq!(tokens("!="), vec![TokenKind::NotEq, TokenKind::Eof]);
        assert_eq!(tokens("<="), vec![TokenKind::LtEq, TokenKind::Eof]);
        assert_eq!(tokens(">="), vec![TokenKind::GtEq, TokenKind::Eof]);
    }

    #[test]
    fn lone_single_char_operators() {
        assert_eq!(tokens("="), vec![TokenKind::Assign, TokenKind::Eof]);
        assert_eq!(tokens("!"), vec![TokenKind::Bang, TokenKind::Eof]);
        assert_eq!(tokens("<"), vec![TokenKind::Lt, TokenKind::Eof]);
        assert_eq!(tokens(">"), vec![TokenKind::Gt, TokenKind::Eof]);
    }

    #[test]
    fn no_whitespace_still_splits_tokens() {
        assert_eq!(
            tokens("a+b"),
            vec![
                TokenKind::Identifier(squeak_util::Symbol::intern("a")),
                TokenKind::Plus,
                TokenKind::Identifier(squeak_util::Symbol::intern("b")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unknown_character_is_illegal() {
        assert_eq!(tokens("@"), vec![TokenKind::Illegal('@'), TokenKind::Eof]);
    }
}
