//! Byte cursor for bounds-checked input navigation

use crate::error::Pos;

/// Cursor over UTF-8 text with position tracking.
///
/// Every advance is clamped to the end of the input, and slices are taken
/// with checked access, so a scan over malformed input can only stop early.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    col: u32,
    base: usize,
}

impl<'a> Cursor<'a> {
    /// Create cursor at the start of a document
    pub const fn new(input: &'a str) -> Self {
        Self::with_origin(input, Pos::start())
    }

    /// Create cursor over a region whose first byte sits at `origin` in the document
    pub const fn with_origin(input: &'a str, origin: Pos) -> Self {
        Self {
            input,
            pos: 0,
            line: origin.line,
            col: origin.col,
            base: origin.offset,
        }
    }

    /// Get current byte without consuming
    pub fn current(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Peek at byte ahead without consuming
    pub fn peek(&self, ahead: usize) -> Option<u8> {
        self.input
            .as_bytes()
            .get(self.pos.saturating_add(ahead))
            .copied()
    }

    /// Byte immediately before the given index
    pub fn byte_before(&self, index: usize) -> Option<u8> {
        index
            .checked_sub(1)
            .and_then(|i| self.input.as_bytes().get(i))
            .copied()
    }

    /// Advance cursor by one byte
    pub fn advance(&mut self) {
        if let Some(b) = self.current() {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    /// Advance by up to `count` bytes, stopping at end of input
    pub fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            if self.is_eof() {
                break;
            }
            self.advance();
        }
    }

    /// Skip whitespace
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.current() {
            if b.is_ascii_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Advance to the next occurrence of `pattern`, leaving the cursor after it.
    /// Returns false (cursor at end of input) when the pattern never occurs.
    pub fn skip_past(&mut self, pattern: &[u8]) -> bool {
        while !self.is_eof() {
            if self.starts_with(pattern) {
                self.advance_by(pattern.len());
                return true;
            }
            self.advance();
        }
        false
    }

    /// Whether the remaining input starts with `pattern`
    pub fn starts_with(&self, pattern: &[u8]) -> bool {
        self.remaining().starts_with(pattern)
    }

    /// Get current position (absolute within the document)
    pub fn position(&self) -> Pos {
        Pos::new(self.base + self.pos, self.line, self.col)
    }

    /// Check if at end of input
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get remaining bytes
    pub fn remaining(&self) -> &'a [u8] {
        self.input.as_bytes().get(self.pos..).unwrap_or_default()
    }

    /// Get current position index
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Get text from start to current position
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Get text between two indices; empty when the range is not valid
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.input.get(start..end).unwrap_or_default()
    }
}

/// Position of byte `offset` of `text`, where `text` itself starts at `origin`.
pub fn locate(text: &str, origin: Pos, offset: usize) -> Pos {
    let mut cursor = Cursor::with_origin(text, origin);
    cursor.advance_by(offset);
    cursor.position()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_basic() {
        let mut cursor = Cursor::new("hello");
        assert_eq!(cursor.current(), Some(b'h'));
        assert_eq!(cursor.peek(1), Some(b'e'));
        cursor.advance();
        assert_eq!(cursor.current(), Some(b'e'));
        assert_eq!(cursor.byte_before(cursor.pos()), Some(b'h'));
    }

    #[test]
    fn test_cursor_whitespace() {
        let mut cursor = Cursor::new("  \t\nhello");
        cursor.skip_whitespace();
        assert_eq!(cursor.current(), Some(b'h'));
        assert_eq!(cursor.position().line, 2);
    }

    #[test]
    fn test_advance_is_clamped() {
        let mut cursor = Cursor::new("ab");
        cursor.advance_by(10);
        assert!(cursor.is_eof());
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.peek(usize::MAX), None);
    }

    #[test]
    fn test_skip_past() {
        let mut cursor = Cursor::new("<!-- x -->tail");
        assert!(cursor.skip_past(b"-->"));
        assert_eq!(cursor.remaining(), b"tail");
        assert!(!cursor.skip_past(b"-->"));
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_slice_rejects_bad_ranges() {
        let cursor = Cursor::new("héllo");
        assert_eq!(cursor.slice(0, 1), "h");
        assert_eq!(cursor.slice(0, 2), "");
        assert_eq!(cursor.slice(4, 99), "");
    }

    #[test]
    fn test_locate_tracks_lines() {
        let origin = Pos::new(10, 3, 4);
        let pos = locate("ab\ncd", origin, 4);
        assert_eq!(pos, Pos::new(14, 4, 2));
    }
}
