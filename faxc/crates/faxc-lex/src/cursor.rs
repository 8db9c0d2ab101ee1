//! Character cursor for traversing source code.
//!
//! Maintains byte position, line/column and the absolute/per-line character
//! offsets a [`faxc_util::Position`] needs, and handles UTF-8 correctly.

/// A cursor for traversing source code character by character.
pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
    char_offset: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
            char_offset: 0,
        }
    }

    pub fn current_char(&self) -> char {
        self.char_at(0)
    }

    #[inline]
    pub fn char_at(&self, offset: usize) -> char {
        let pos = self.position + offset;
        if pos >= self.source.len() {
            return '\0';
        }
        let b = self.source.as_bytes()[pos];
        if b < 128 {
            return b as char;
        }
        self.source[pos..].chars().next().unwrap_or('\0')
    }

    #[inline]
    pub fn peek_char(&self, offset: usize) -> char {
        self.char_at(offset)
    }

    #[inline]
    pub fn advance(&mut self) {
        if self.position >= self.source.len() {
            return;
        }
        let b = self.source.as_bytes()[self.position];
        let ch = if b < 128 {
            self.position += 1;
            b as char
        } else {
            let c = self.source[self.position..].chars().next().unwrap();
            self.position += c.len_utf8();
            c
        };
        self.char_offset += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// Character index from the start of the current line, 0-based
    /// (`Position::line_offset`).
    pub fn line_offset(&self) -> u32 {
        self.column - 1
    }

    /// Absolute character index from the start of the source
    /// (`Position::char_offset`).
    pub fn char_offset(&self) -> u32 {
        self.char_offset
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            column: self.column,
            char_offset: self.char_offset,
        }
    }

    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
        self.char_offset = snapshot.char_offset;
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CursorSnapshot {
    pub position: usize,
    pub line: u32,
    pub column: u32,
    pub char_offset: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cursor_starts_at_one_one() {
        let cursor = Cursor::new("x <- 1");
        assert_eq!(cursor.current_char(), 'x');
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.column(), 1);
        assert_eq!(cursor.char_offset(), 0);
    }

    #[test]
    fn advance_tracks_char_offset_and_column() {
        let mut cursor = Cursor::new("abc");
        cursor.advance();
        assert_eq!(cursor.current_char(), 'b');
        assert_eq!(cursor.char_offset(), 1);
        assert_eq!(cursor.column(), 2);
    }

    #[test]
    fn advance_over_utf8_counts_one_char() {
        let mut cursor = Cursor::new("αβγ");
        cursor.advance();
        assert_eq!(cursor.current_char(), 'β');
        assert_eq!(cursor.char_offset(), 1);
    }

    #[test]
    fn newline_resets_column_and_bumps_line() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.column(), 1);
        assert_eq!(cursor.line_offset(), 0);
        assert_eq!(cursor.char_offset(), 3);
    }

    #[test]
    fn is_at_end_true_past_source() {
        let mut cursor = Cursor::new("a");
        assert!(!cursor.is_at_end());
        cursor.advance();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn match_char_consumes_on_match_only() {
        let mut cursor = Cursor::new("<-x");
        assert!(cursor.match_char('<'));
        assert!(!cursor.match_char('<'));
        assert!(cursor.match_char('-'));
    }

    #[test]
    fn slice_from_returns_consumed_text() {
        let mut cursor = Cursor::new("loop x");
        let start = cursor.position();
        for _ in 0..4 {
            cursor.advance();
        }
        assert_eq!(cursor.slice_from(start), "loop");
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let mut cursor = Cursor::new("abc");
        let snapshot = cursor.snapshot();
        cursor.advance();
        cursor.advance();
        cursor.restore(snapshot);
        assert_eq!(cursor.current_char(), 'a');
        assert_eq!(cursor.char_offset(), 0);
    }

    #[test]
    fn remaining_and_source() {
        let mut cursor = Cursor::new("x <- 1");
        cursor.advance();
        assert_eq!(cursor.remaining(), " <- 1");
        assert_eq!(cursor.source(), "x <- 1");
    }
}
