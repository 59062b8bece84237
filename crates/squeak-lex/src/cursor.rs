//! A one-byte-lookahead cursor over a buffered, refillable byte reader.
//!
//! Unlike an in-memory `&str` cursor, this one never assumes the whole
//! source is available up front: it pulls from an arbitrary `Read` in
//! chunks of a caller-chosen size (default 512 bytes, minimum 1) and refills
//! on demand as the lexer consumes bytes.

use std::io::Read;

use crate::error::{LexError, Result};

pub struct Cursor<R: Read> {
    reader: R,
    buffer: Vec<u8>,
    buf_pos: usize,
    buf_len: usize,
    reader_eof: bool,
    current: Option<u8>,
    peeked: Option<u8>,
}

impl<R: Read> Cursor<R> {
    pub fn new(reader: R, buf_size: usize) -> Result<Self> {
        if buf_size == 0 {
            return Err(LexError::BufferTooSmall(buf_size));
        }

        let mut cursor = Self {
            reader,
            buffer: vec![0u8; buf_size],
            buf_pos: 0,
            buf_len: 0,
            reader_eof: false,
            current: None,
            peeked: None,
        };

        cursor.current = cursor.pull()?;
        cursor.peeked = cursor.pull()?;
        Ok(cursor)
    }

    fn pull(&mut self) -> Result<Option<u8>> {
        if self.buf_pos >= self.buf_len {
            if self.reader_eof {
                return Ok(None);
            }
            self.buf_len = self.reader.read(&mut self.buffer)?;
            self.buf_pos = 0;
            if self.buf_len == 0 {
                self.reader_eof = true;
                return Ok(None);
            }
        }

        let byte = self.buffer[self.buf_pos];
        self.buf_pos += 1;
        Ok(Some(byte))
    }

    pub fn current_byte(&self) -> Option<u8> {
        self.current
    }

    pub fn peek_byte(&self) -> Option<u8> {
        self.peeked
    }

    pub fn advance(&mut self) -> Result<()> {
        self.current = self.peeked;
        self.peeked = self.pull()?;
        Ok(())
    }

    pub fn is_at_end(&self) -> bool {
        self.current.is_none()
    }
}
