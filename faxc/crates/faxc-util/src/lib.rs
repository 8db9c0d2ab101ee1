//! Shared foundation for the `faxc` pipeline: source positions, interned
//! symbols, diagnostic rendering and typed index vectors.
//!
//! No crate in this workspace depends on the rest of the pipeline from here
//! — `faxc-util` sits underneath `faxc-lex`, `faxc-par`, `faxc-bc` and
//! `faxc-compile`, never the other way around.

pub mod diagnostic;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{ColorConfig, Diagnostic, DiagnosticBuilder, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{Position, SourceFile, SourceMap};
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
