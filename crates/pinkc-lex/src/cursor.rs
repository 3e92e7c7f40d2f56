//! Character cursor for traversing source text.
//!
//! Tracks byte position plus 1-indexed line/column so the lexer never has
//! to recompute them from scratch when it stamps a token's [`Span`].

use pinkc_util::Span;

pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the current character, or `'\0'` at end of input.
    pub fn current_char(&self) -> char {
        self.peek_char(0)
    }

    pub fn peek_char(&self, offset: usize) -> char {
        self.source[self.position..].chars().nth(offset).unwrap_or('\0')
    }

    pub fn advance(&mut self) {
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    /// Build a span from `start` (byte offset, line, column) to the
    /// cursor's current position.
    pub fn span_from(&self, start: usize, start_line: u32, start_column: u32) -> Span {
        Span {
            start,
            end: self.position,
            start_line,
            start_column,
            end_line: self.line,
            end_column: self.column,
            file_id: Default::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_newlines() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance();
        cursor.advance();
        assert_eq!((cursor.line(), cursor.column()), (1, 3));
        cursor.advance();
        assert_eq!((cursor.line(), cursor.column()), (2, 1));
    }

    #[test]
    fn current_char_is_nul_at_end() {
        let mut cursor = Cursor::new("a");
        cursor.advance();
        assert_eq!(cursor.current_char(), '\0');
        assert!(cursor.is_at_end());
    }

    #[test]
    fn slice_from_returns_consumed_text() {
        let mut cursor = Cursor::new("hello world");
        let start = cursor.position();
        for _ in 0..5 {
            cursor.advance();
        }
        assert_eq!(cursor.slice_from(start), "hello");
    }
}
