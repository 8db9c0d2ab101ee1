//! Operator lexing.
//!
//! Multi-character operator patterns (`<-`, `<=`, `>=`, `==`, `!=`, `&&`,
//! `||`) are tried via one-character lookahead before falling back to
//! single-character classification (spec §4.1).

use crate::error::LexError;
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    fn op(&mut self, lexeme: &str) -> Token {
        Token::new(TokenKind::Operator, lexeme, self.token_start_position())
    }

    pub fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        self.op("+")
    }

    pub fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        self.op("-")
    }

    pub fn lex_star(&mut self) -> Token {
        self.cursor.advance();
        self.op("*")
    }

    pub fn lex_slash(&mut self) -> Token {
        self.cursor.advance();
        self.op("/")
    }

    pub fn lex_percent(&mut self) -> Token {
        self.cursor.advance();
        self.op("%")
    }

    pub fn lex_caret(&mut self) -> Token {
        self.cursor.advance();
        self.op("^")
    }

    pub fn lex_tilde(&mut self) -> Token {
        self.cursor.advance();
        self.op("~")
    }

    /// `=` only appears as half of `==`; a bare `=` is not a valid token
    /// (assignment is `<-`, spec §6).
    pub fn lex_equals(&mut self) -> Result<Token, LexError> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Ok(self.op("=="))
        } else {
            Err(self.error_at_token_start("unexpected character '='"))
        }
    }

    pub fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.op("!=")
        } else {
            self.op("!")
        }
    }

    /// `<-` (Assign), `<=` or plain `<`.
    pub fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('-') {
            Token::new(TokenKind::Assign, "<-", self.token_start_position())
        } else if self.cursor.match_char('=') {
            self.op("<=")
        } else {
            self.op("<")
        }
    }

    pub fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.op(">=")
        } else {
            self.op(">")
        }
    }

    pub fn lex_ampersand(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            self.op("&&")
        } else {
            self.op("&")
        }
    }

    pub fn lex_pipe(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            self.op("||")
        } else {
            self.op("|")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(source: &str) -> Token {
        let mut lexer = crate::Lexer::new(source, "op_test.fax");
        lexer.next_token().unwrap()
    }

    #[test]
    fn assign_arrow() {
        let token = lex_one("<-");
        assert_eq!(token.kind, TokenKind::Assign);
        assert_eq!(token.lexeme, "<-");
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(lex_one("<=").lexeme, "<=");
        assert_eq!(lex_one(">=").lexeme, ">=");
        assert_eq!(lex_one("<").lexeme, "<");
        assert_eq!(lex_one(">").lexeme, ">");
        assert_eq!(lex_one("==").lexeme, "==");
        assert_eq!(lex_one("!=").lexeme, "!=");
    }

    #[test]
    fn logical_operators() {
        assert_eq!(lex_one("&&").lexeme, "&&");
        assert_eq!(lex_one("||").lexeme, "||");
        assert_eq!(lex_one("&").lexeme, "&");
        assert_eq!(lex_one("|").lexeme, "|");
    }

    #[test]
    fn arithmetic_operators_are_single_char() {
        assert_eq!(lex_one("+").lexeme, "+");
        assert_eq!(lex_one("-").lexeme, "-");
        assert_eq!(lex_one("*").lexeme, "*");
        assert_eq!(lex_one("/").lexeme, "/");
        assert_eq!(lex_one("%").lexeme, "%");
    }

    #[test]
    fn unary_only_operators() {
        assert_eq!(lex_one("!").lexeme, "!");
        assert_eq!(lex_one("~").lexeme, "~");
    }

    #[test]
    fn bare_equals_is_a_lex_error() {
        let mut lexer = crate::Lexer::new("= x", "op_test.fax");
        assert!(lexer.next_token().is_err());
    }
}
