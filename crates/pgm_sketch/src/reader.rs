//! Bounds-checked cursor over a sketch stream.

use crate::opcode::Token;

/// Sequential reader over a byte slice.
///
/// `peek` and `next` return `None` once the stream is exhausted instead of
/// reading past the end; callers turn that into the error kind that fits
/// the sequence they were reading.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next unread byte.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    #[inline]
    pub fn peek_token(&self) -> Option<Token> {
        self.peek().map(Token::classify)
    }

    #[inline]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    #[inline]
    pub fn next_token(&mut self) -> Option<Token> {
        self.next_byte().map(Token::classify)
    }
}
