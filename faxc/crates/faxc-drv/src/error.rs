//! Driver-level error: wraps every error a pipeline stage can raise, plus
//! the file I/O that happens before lexing even starts.

use std::io;
use std::path::PathBuf;

use faxc_compile::ResolveError;
use faxc_lex::LexError;
use faxc_par::ParseError;
use faxc_util::{Diagnostic, Position};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Compile(#[from] ResolveError),
}

impl DriverError {
    /// Process exit code (spec §6 / SPEC_FULL §10): `1` lex, `2` parse,
    /// `3` resolve, `4` import. A file that can't even be read never
    /// reaches a pipeline stage, so it falls outside that taxonomy; it
    /// gets its own code rather than colliding with the lex stage's `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            DriverError::Io { .. } => 5,
            DriverError::Lex(_) => 1,
            DriverError::Parse(_) => 2,
            DriverError::Compile(ResolveError::Import(_)) => 4,
            DriverError::Compile(_) => 3,
        }
    }

    /// Renders the error as a [`Diagnostic`] anchored at the position the
    /// underlying stage reported. An I/O failure has no source position
    /// to anchor on, so it uses [`Position::dummy`].
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DriverError::Io { path, source } => Diagnostic::error(
                format!("could not read {}: {source}", path.display()),
                Position::dummy(),
            ),
            DriverError::Lex(e) => Diagnostic::error(e.message.clone(), e.position),
            DriverError::Parse(e) => Diagnostic::error(e.message.clone(), e.position),
            DriverError::Compile(e) => Diagnostic::error(e.to_string(), e.position()),
        }
    }
}
