//! Diagnostic builder for fluent diagnostic construction.

use super::{Diagnostic, Level};
use crate::span::Position;

/// A source line plus a caret underline, the unit `Diagnostic::render`
/// stacks under the header line.
#[derive(Clone, Debug)]
pub struct SourceSnippet {
    pub line: String,
    pub line_number: u32,
    pub column: u32,
}

impl SourceSnippet {
    pub fn new(line: impl Into<String>, line_number: u32, column: u32) -> Self {
        Self {
            line: line.into(),
            line_number,
            column,
        }
    }

    /// Render as `{line_num} | {source}\n{pad} | {spaces}^`.
    pub fn format(&self) -> String {
        let width = self.line_number.to_string().len().max(3);
        let mut out = String::new();
        out.push_str(&format!(
            "{:>width$} | {}\n",
            self.line_number,
            self.line,
            width = width
        ));
        out.push_str(&format!("{:>width$} | ", "", width = width));
        for _ in 0..self.column.saturating_sub(1) {
            out.push(' ');
        }
        out.push('^');
        out
    }
}

/// Fluent constructor for [`Diagnostic`].
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    position: Position,
    notes: Vec<String>,
    helps: Vec<String>,
}

impl DiagnosticBuilder {
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

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            position: self.position,
            notes: self.notes,
            helps: self.helps,
        }
    }

    pub fn emit(self, handler: &super::Handler) {
        handler.emit_diagnostic(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    fn pos() -> Position {
        Position::new(1, 5, 4, 4, Symbol::intern("builder_test.fax"))
    }

    #[test]
    fn snippet_format_has_caret_under_column() {
        let snippet = SourceSnippet::new("x <- 1", 1, 5);
        let rendered = snippet.format();
        assert!(rendered.contains("x <- 1"));
        let caret_line = rendered.lines().nth(1).unwrap();
        assert_eq!(caret_line.chars().last(), Some('^'));
    }

    #[test]
    fn builder_error_sets_level() {
        let diag = DiagnosticBuilder::error("unexpected token", pos()).build();
        assert_eq!(diag.level, Level::Error);
        assert_eq!(diag.message, "unexpected token");
    }

    #[test]
    fn builder_collects_notes_and_helps() {
        let diag = DiagnosticBuilder::error("bad", pos())
            .note("note one")
            .help("help one")
            .build();
        assert_eq!(diag.notes, vec!["note one"]);
        assert_eq!(diag.helps, vec!["help one"]);
    }

    #[test]
    fn builder_emit_reaches_handler() {
        let handler = super::super::Handler::new();
        DiagnosticBuilder::error("bad", pos()).emit(&handler);
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
    }
}
