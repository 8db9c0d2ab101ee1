//! Compiler error types (spec §7).

use faxc_util::Position;
use thiserror::Error;

/// Everything the compiler itself can reject. Unlike [`LexError`](faxc_lex::LexError)
/// and [`ParseError`](faxc_par::ParseError), no partial [`faxc_bc::Program`]
/// is ever returned alongside one of these — compilation stops at the first
/// error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    /// Two parameters (or two locals declared in the same program) share a
    /// name. `register_unique_variable_local` is the only place this is
    /// raised — the grammar has no other construct that requires a fresh
    /// binding.
    #[error("{position}: duplicate parameter or local '{name}'")]
    DuplicateInScope { name: String, position: Position },

    /// A jump's displacement doesn't fit in `i16` — the block between a
    /// branch site and its target is larger than the format allows.
    #[error("{position}: jump target out of range (displacement {displacement} doesn't fit in i16)")]
    JumpOverflow {
        position: Position,
        displacement: i64,
    },

    /// A call site invokes a program whose declared `argc` doesn't match
    /// the number of arguments given, where the callee is statically known
    /// to be a native function (spec §9 Open Question: "specify as
    /// `CallError` and test").
    #[error("{position}: native call to '{name}' expects {expected} argument(s), got {got}")]
    CallError {
        name: String,
        expected: u8,
        got: usize,
        position: Position,
    },

    /// An `include` statement's resolver failed, or the included source
    /// itself failed to lex, parse, or compile.
    #[error(transparent)]
    Import(#[from] Box<ImportError>),
}

/// Failure resolving or compiling an `include`d source (spec §4.4).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImportError {
    #[error("{position}: include path '{path}' could not be resolved")]
    NotFound { path: String, position: Position },

    #[error(transparent)]
    Lex(#[from] faxc_lex::LexError),

    #[error(transparent)]
    Parse(#[from] faxc_par::ParseError),

    #[error(transparent)]
    Resolve(#[from] Box<ResolveError>),
}

impl ResolveError {
    /// The position to anchor a rendered diagnostic at — the driver needs
    /// this uniformly across every variant, including nested import
    /// failures.
    pub fn position(&self) -> Position {
        match self {
            ResolveError::DuplicateInScope { position, .. } => *position,
            ResolveError::JumpOverflow { position, .. } => *position,
            ResolveError::CallError { position, .. } => *position,
            ResolveError::Import(inner) => inner.position(),
        }
    }
}

impl ImportError {
    pub fn position(&self) -> Position {
        match self {
            ImportError::NotFound { position, .. } => *position,
            ImportError::Lex(e) => e.position,
            ImportError::Parse(e) => e.position,
            ImportError::Resolve(inner) => inner.position(),
        }
    }
}
