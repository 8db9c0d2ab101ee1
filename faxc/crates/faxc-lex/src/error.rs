//! Lexer error type (spec §7).

use faxc_util::Position;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct LexError {
    pub position: Position,
    pub message: String,
}

impl LexError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}
