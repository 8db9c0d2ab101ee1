//! Token kinds and the `Token` record the lexer emits.

use faxc_util::Position;

/// The closed set of token kinds (spec grammar §6).
///
/// `Comment` and `Whitespace` are never emitted by [`crate::Lexer`] — both are
/// consumed during `skip_whitespace_and_comments` — but are kept as variants
/// since the closed set names them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Symbol,
    Integer,
    Float,
    Bool,
    String,
    Null,
    Operator,
    Assign,
    /// `@`
    Call,
    /// `$`
    Function,
    Return,
    If,
    Else,
    Loop,
    Include,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftSquare,
    RightSquare,
    Dot,
    Colon,
    /// `,`
    Separator,
    Newline,
    Eof,
    Comment,
    Whitespace,
}

/// `{kind, lexeme, position}` (spec §3). `lexeme` is the exact source text
/// the token was lexed from — for `Bool` it is `"true"`/`"false"`, for
/// `Operator` the operator symbol itself.
#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Maps an identifier's exact text to a reserved-word kind, or `None` for a
/// plain `Symbol`. Reserved words map to their own kind rather than
/// `Symbol` (spec §4.1) so the parser never needs to string-compare an
/// identifier against a keyword list.
pub fn keyword_kind(text: &str) -> Option<TokenKind> {
    Some(match text {
        "true" | "false" => TokenKind::Bool,
        "null" => TokenKind::Null,
        "return" => TokenKind::Return,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "loop" => TokenKind::Loop,
        "include" => TokenKind::Include,
        _ => return None,
    })
}
