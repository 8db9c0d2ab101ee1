//! String literal lexing.
//!
//! Double-quoted, no escape sequences (spec §4.1: "no escape sequences
//! beyond the minimum"). An unterminated string — EOF or a bare newline
//! before the closing quote — is a fatal `LexError` at the opening quote's
//! position (spec §8 scenario S6).

use crate::error::LexError;
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub fn lex_string(&mut self) -> Result<Token, LexError> {
        self.cursor.advance();
        let mut content = String::new();

        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                return Err(self.error_at_token_start("unterminated string literal"));
            }
            let c = self.cursor.current_char();
            if c == '"' {
                self.cursor.advance();
                break;
            }
            content.push(c);
            self.cursor.advance();
        }

        Ok(Token::new(TokenKind::String, content, self.token_start_position()))
    }
}
