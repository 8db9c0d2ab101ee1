//! `ParseError`: missing expected token or empty input where a primary is
//! required. Fatal — parsing stops at the first one (spec §4.2/§7).

use faxc_util::Position;

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub position: Position,
    pub message: String,
}

impl ParseError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}
