//! Diagnostic types and rendering.
//!
//! A [`Diagnostic`] carries a [`Level`], a message and the [`Position`] it
//! was raised at. [`Handler`] collects diagnostics as a pipeline stage runs;
//! `render` turns one into the three-line `header / source line / caret`
//! text the driver prints.

mod builder;
mod level;

pub use builder::{DiagnosticBuilder, SourceSnippet};
pub use level::{ColorConfig, LabelStyle, Level};

use crate::span::{Position, SourceMap};
use std::cell::RefCell;

/// A single diagnostic message anchored at a source [`Position`].
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub position: Position,
    pub notes: Vec<String>,
    pub helps: Vec<String>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, position: Position) -> Self {
        Self {
            level,
            message: message.into(),
            position,
            notes: Vec::new(),
            helps: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, position: Position) -> Self {
        Self::new(Level::Error, message, position)
    }

    pub fn warning(message: impl Into<String>, position: Position) -> Self {
        Self::new(Level::Warning, message, position)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    /// Render the three-line diagnostic: a header (`origin:line:column:
    /// level: message`), the offending source line (when `source_map` has
    /// an entry for `position.origin`), and a caret underline at `column`.
    /// Colors follow `Level::color_code` when `color.use_color(is_tty)`.
    pub fn render(&self, source_map: &SourceMap, color: ColorConfig, is_tty: bool) -> String {
        let use_color = color.use_color(is_tty);
        let mut out = String::new();

        let header = format!("{}: {}: {}", self.position, self.level, self.message);
        if use_color {
            if let Some(code) = self.level.color_code() {
                out.push_str(&format!(
                    "\x1b[{};{}m{}\x1b[0m",
                    self.level.intensity(),
                    code,
                    header
                ));
            } else {
                out.push_str(&header);
            }
        } else {
            out.push_str(&header);
        }
        out.push('\n');

        if let Some(file) = source_map.get(self.position.origin) {
            if let Some(line) = file.line_at(self.position.line as usize) {
                let snippet = SourceSnippet::new(line, self.position.line, self.position.column);
                out.push_str(&snippet.format());
                out.push('\n');
            }
        }

        for note in &self.notes {
            out.push_str(&format!("note: {note}\n"));
        }
        for help in &self.helps {
            out.push_str(&format!("help: {help}\n"));
        }

        out
    }
}

/// Collects diagnostics raised while running a pipeline stage.
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn error(&self, message: impl Into<String>, position: Position) {
        self.emit_diagnostic(Diagnostic::error(message, position));
    }

    pub fn warning(&self, message: impl Into<String>, position: Position) {
        self.emit_diagnostic(Diagnostic::warning(message, position));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level.is_warning())
            .count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    fn pos(origin: &str) -> Position {
        Position::new(1, 1, 0, 0, Symbol::intern(origin))
    }

    #[test]
    fn diagnostic_error_sets_level() {
        let diag = Diagnostic::error("bad token", pos("mod_test_a.fax"));
        assert_eq!(diag.level, Level::Error);
    }

    #[test]
    fn diagnostic_with_note_and_help() {
        let diag = Diagnostic::error("bad token", pos("mod_test_b.fax"))
            .with_note("seen here")
            .with_help("try this");
        assert_eq!(diag.notes, vec!["seen here"]);
        assert_eq!(diag.helps, vec!["try this"]);
    }

    #[test]
    fn handler_tracks_error_and_warning_counts() {
        let handler = Handler::new();
        handler.error("bad", pos("mod_test_c.fax"));
        handler.warning("hmm", pos("mod_test_c.fax"));
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
        assert_eq!(handler.warning_count(), 1);
        assert_eq!(handler.diagnostics().len(), 2);
    }

    #[test]
    fn handler_clear_empties_diagnostics() {
        let handler = Handler::new();
        handler.error("bad", pos("mod_test_d.fax"));
        handler.clear();
        assert!(!handler.has_errors());
        assert_eq!(handler.diagnostics().len(), 0);
    }

    #[test]
    fn render_includes_header_and_source_line() {
        let origin = Symbol::intern("mod_test_render.fax");
        let mut source_map = SourceMap::new();
        source_map.add(origin, "x <- 1\ny <- 2");
        let position = Position::new(1, 1, 0, 0, origin);
        let diag = Diagnostic::error("unexpected token", position);
        let rendered = diag.render(&source_map, ColorConfig::Never, false);
        assert!(rendered.contains("unexpected token"));
        assert!(rendered.contains("x <- 1"));
        assert!(rendered.contains('^'));
    }

    #[test]
    fn render_without_source_entry_still_has_header() {
        let source_map = SourceMap::new();
        let diag = Diagnostic::error("oops", pos("mod_test_missing.fax"));
        let rendered = diag.render(&source_map, ColorConfig::Never, false);
        assert!(rendered.contains("oops"));
    }

    #[test]
    fn render_with_color_wraps_ansi_codes() {
        let origin = Symbol::intern("mod_test_color.fax");
        let mut source_map = SourceMap::new();
        source_map.add(origin, "x <- 1");
        let position = Position::new(1, 1, 0, 0, origin);
        let diag = Diagnostic::error("bad", position);
        let rendered = diag.render(&source_map, ColorConfig::Always, true);
        assert!(rendered.contains("\x1b["));
    }
}
