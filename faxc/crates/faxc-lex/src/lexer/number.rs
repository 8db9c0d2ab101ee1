//! Number literal lexing.
//!
//! `Integer`: `[0-9]+`. `Float`: an integer part, `.`, then one or more
//! digits — no exponent syntax (spec §4.1; the original C lexer only
//! recognizes a dot-extension, so none is added here either).

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub fn lex_number(&mut self) -> Token {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut kind = TokenKind::Integer;
        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            kind = TokenKind::Float;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let text = self.cursor.slice_from(self.token_start).to_string();
        Token::new(kind, text, self.token_start_position())
    }
}
