//! Core lexer dispatch.

use faxc_util::{Position, Symbol};

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};
use crate::unicode::is_ident_start;

/// Converts fax source text into a token stream (spec §4.1).
///
/// Single forward cursor with one-character lookahead; whitespace and
/// `#`-comments are discarded, newlines are emitted (the parser needs them
/// as statement separators). A `LexError` is fatal — lexing stops at the
/// first one (spec §7).
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    origin: Symbol,

    pub(crate) token_start: usize,
    token_start_line: u32,
    token_start_column: u32,
    token_start_char_offset: u32,
    token_start_line_offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, origin: impl AsRef<str>) -> Self {
        Self {
            cursor: Cursor::new(source),
            origin: Symbol::intern(origin.as_ref()),
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
            token_start_char_offset: 0,
            token_start_line_offset: 0,
        }
    }

    /// Returns the next token, or `Eof` once the source is exhausted.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();
        self.mark_token_start();

        if self.cursor.is_at_end() {
            return Ok(Token::new(TokenKind::Eof, "", self.token_start_position()));
        }

        let token = match self.cursor.current_char() {
            '\n' => {
                self.cursor.advance();
                Token::new(TokenKind::Newline, "\n", self.token_start_position())
            }
            '(' => self.punct(TokenKind::LeftParen, "("),
            ')' => self.punct(TokenKind::RightParen, ")"),
            '{' => self.punct(TokenKind::LeftBrace, "{"),
            '}' => self.punct(TokenKind::RightBrace, "}"),
            '[' => self.punct(TokenKind::LeftSquare, "["),
            ']' => self.punct(TokenKind::RightSquare, "]"),
            ',' => self.punct(TokenKind::Separator, ","),
            ':' => self.punct(TokenKind::Colon, ":"),
            '.' => self.punct(TokenKind::Dot, "."),
            '@' => self.punct(TokenKind::Call, "@"),
            '$' => self.punct(TokenKind::Function, "$"),
            '+' => self.lex_plus(),
            '-' => self.lex_minus(),
            '*' => self.lex_star(),
            '/' => self.lex_slash(),
            '%' => self.lex_percent(),
            '=' => return self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),
            '^' => self.lex_caret(),
            '~' => self.lex_tilde(),
            '"' => return self.lex_string(),
            c if is_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            c => return Err(self.error_at_token_start(format!("unexpected character '{c}'"))),
        };
        Ok(token)
    }

    /// Lexes the whole source to a token vector, always ending in `Eof`.
    /// Stops and returns `Err` at the first `LexError` — no partial token
    /// stream is returned on failure (spec §7).
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    fn punct(&mut self, kind: TokenKind, lexeme: &str) -> Token {
        self.cursor.advance();
        Token::new(kind, lexeme, self.token_start_position())
    }

    fn mark_token_start(&mut self) {
        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();
        self.token_start_char_offset = self.cursor.char_offset();
        self.token_start_line_offset = self.cursor.line_offset();
    }

    pub(crate) fn token_start_position(&self) -> Position {
        Position::new(
            self.token_start_line,
            self.token_start_column,
            self.token_start_char_offset,
            self.token_start_line_offset,
            self.origin,
        )
    }

    pub(crate) fn error_at_token_start(&self, message: impl Into<String>) -> LexError {
        LexError::new(self.token_start_position(), message)
    }
}
