//! Pipeline orchestration: wires lexer, parser and compiler together
//! behind one entry point, and maps whatever they reject onto a process
//! exit code (spec §6 / SPEC_FULL §10).
//!
//! `faxc-drv` is a library only — `faxt` is the one binary in this
//! workspace that owns a `main`.

mod error;
mod pipeline;

pub use error::DriverError;
pub use pipeline::{compile_file, compile_source, render_stage, EmitStage, PipelineOutput};
