mod identifier;
mod number;
mod operator;
mod string;

use std::io::Read;

use squeak_util::Symbol;

use crate::cursor::Cursor;
use crate::error::Result;
use crate::token::{Token, TokenKind};

pub const DEFAULT_BUFFER_SIZE: usize = 512;

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Turns a byte reader into a single Squeak token per call to `next_token`.
/// Whitespace and `#`-comments are skipped between tokens; the scanner never
/// buffers more than one lexical unit ahead of the cursor itself.
pub struct Lexer<R: Read> {
    cursor: Cursor<R>,
    line: u32,
}

impl<R: Read> Lexer<R> {
    pub fn new(reader: R) -> Result<Self> {
        Self::with_buffer_size(reader, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_buffer_size(reader: R, buf_size: usize) -> Result<Self> {
        Ok(Self {
            cursor: Cursor::new(reader, buf_size)?,
            line: 1,
        })
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_trivia()?;
        let line = self.line;

        let Some(c) = self.cursor.current_byte() else {
            return Ok(Token::new(TokenKind::Eof, line));
        };

        match c {
            b'"' => self.lex_string(line),
            b'0'..=b'9' => self.lex_number(line),
            c if is_ident_start(c) => self.lex_identifier(line),
            _ => self.lex_operator(line),
        }
    }

    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.cursor.current_byte() {
                Some(b'\n') => {
                    self.line += 1;
                    self.cursor.advance()?;
                }
                Some(b) if b.is_ascii_whitespace() => {
                    self.cursor.advance()?;
                }
                Some(b'#') => {
                    while let Some(b) = self.cursor.current_byte() {
                        if b == b'\n' {
                            break;
                        }
                        self.cursor.advance()?;
                    }
                }
                _ => return Ok(()),
            }
        }
    }
}

/// A one-token-lookahead wrapper around `Lexer`. The parser only ever needs
/// to know what the next token is before deciding how to consume it, so this
/// is the only interface it talks to.
pub struct Scanner<R: Read> {
    lexer: Lexer<R>,
    lookahead: Option<Token>,
}

impl<R: Read> Scanner<R> {
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            lexer: Lexer::new(reader)?,
            lookahead: None,
        })
    }

    pub fn with_buffer_size(reader: R, buf_size: usize) -> Result<Self> {
        Ok(Self {
            lexer: Lexer::with_buffer_size(reader, buf_size)?,
            lookahead: None,
        })
    }

    pub fn peek(&mut self) -> Result<&Token> {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.lexer.next_token()?);
        }
        Ok(self.lookahead.as_ref().expect("just populated"))
    }

    /// Consumes the current token without returning it, fetching one from
    /// the underlying lexer first if nothing was peeked yet.
    pub fn discard(&mut self) -> Result<()> {
        if self.lookahead.take().is_none() {
            self.lexer.next_token()?;
        }
        Ok(())
    }

    pub fn next(&mut self) -> Result<Token> {
        match self.lookahead.take() {
            Some(tok) => Ok(tok),
            None => self.lexer.next_token(),
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
    fn skips_comments_and_whitespace() {
        let kinds = tokens("  # a comment\n  var # trailing\n  x;");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Var,
                TokenKind::Identifier(Symbol::intern("x")),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tracks_line_numbers_across_newlines() {
        let mut lexer = Lexer::new(IoCursor::new(b"a\nb\nc".to_vec())).unwrap();
        assert_eq!(lexer.next_token().unwrap().line, 1);
        assert_eq!(lexer.next_token().unwrap().line, 2);
        assert_eq!(lexer.next_token().unwrap().line, 3);
    }

    #[test]
    fn eof_is_idempotent() {
        let mut lexer = Lexer::new(IoCursor::new(b"".to_vec())).unwrap();
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn scanner_peek_does_not_consume() {
        let mut scanner = Scanner::new(IoCursor::new(b"var x;".to_vec())).unwrap();
        assert_eq!(scanner.peek().unwrap().kind, TokenKind::Var);
        assert_eq!(scanner.peek().unwrap().kind, TokenKind::Var);
        assert_eq!(scanner.next().unwrap().kind, TokenKind::Var);
        assert_eq!(
            scanner.next().unwrap().kind,
            TokenKind::Identifier(Symbol::intern("x"))
        );
    }

    #[test]
    fn scanner_discard_drops_a_peeked_token() {
        let mut scanner = Scanner::new(IoCursor::new(b"var x;".to_vec())).unwrap();
        scanner.peek().unwrap();
        scanner.discard().unwrap();
        assert_eq!(
            scanner.next().unwrap().kind,
            TokenKind::Identifier(Symbol::intern("x"))
        );
    }
}
