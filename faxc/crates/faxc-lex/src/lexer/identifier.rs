//! Identifier and reserved-word lexing.

use crate::token::{keyword_kind, Token, TokenKind};
use crate::unicode::is_ident_continue;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier, returning a reserved-word kind when the text
    /// matches one (spec §4.1: `true false null return if else loop
    /// include` map to their own kind rather than `Symbol`).
    pub fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(self.token_start).to_string();
        let kind = keyword_kind(&text).unwrap_or(TokenKind::Symbol);
        Token::new(kind, text, self.token_start_position())
    }
}
