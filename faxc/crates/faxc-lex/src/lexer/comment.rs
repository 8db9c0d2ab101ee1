//! Whitespace and comment skipping.
//!
//! Newlines are *not* skipped here — the parser's `block` production needs
//! `Newline` tokens as statement separators (spec §4.1/§4.2), so only
//! horizontal whitespace and `#`-comments are consumed before a token.

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips spaces, tabs, carriage returns and `#` line comments. Stops at
    /// a newline, end of input, or the start of the next token.
    pub fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' => self.cursor.advance(),
                '#' => self.skip_line_comment(),
                _ => return,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }
}
