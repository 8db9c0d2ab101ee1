//! Source map: one [`SourceFile`] per distinct `origin` seen during a
//! compilation (the top-level file plus each `include`d source), so a
//! diagnostic raised inside spliced-in text still renders its own line.

use std::sync::Arc;

use crate::symbol::Symbol;

/// A source file's content plus precomputed line-start offsets, keyed by its
/// interned `origin` tag rather than a sequential file id — `include`d
/// sources are added the same way as the top-level file.
#[derive(Clone)]
pub struct SourceFile {
    origin: Symbol,
    content: Arc<str>,
    line_starts: Arc<[usize]>,
}

impl SourceFile {
    pub fn new(origin: Symbol, content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let line_starts = Self::compute_line_starts(&content);
        Self {
            origin,
            content,
            line_starts,
        }
    }

    fn compute_line_starts(content: &str) -> Arc<[usize]> {
        let mut line_starts = vec![0];
        for (i, ch) in content.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        line_starts.into()
    }

    #[inline]
    pub fn origin(&self) -> Symbol {
        self.origin
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    #[inline]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Byte offset to 1-indexed `(line, column)`.
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => (line + 1, 1),
            Err(insert_point) => {
                let line = insert_point - 1;
                let line_start = self.line_starts.get(line).copied().unwrap_or(0);
                (line + 1, offset - line_start + 1)
            }
        }
    }

    /// Get a specific source line (1-indexed), trimmed of its trailing
    /// newline.
    pub fn line_at(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }
        let start = self.line_start(line - 1)?;
        let end = self.line_start(line).unwrap_or(self.content.len());
        Some(self.content[start..end].trim_end_matches(['\n', '\r']))
    }

    pub fn extract(&self, range: std::ops::Range<usize>) -> &str {
        &self.content[range]
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("origin", &self.origin)
            .field("line_count", &self.line_count())
            .finish()
    }
}

/// Accumulates one [`SourceFile`] per distinct origin across a compilation.
#[derive(Default)]
pub struct SourceMap {
    files: Vec<Arc<SourceFile>>,
}

impl SourceMap {
    #[inline]
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Register a source's content under `origin`. Re-adding the same
    /// origin replaces the previous entry (used when the driver re-reads a
    /// file after a diagnostic).
    pub fn add(&mut self, origin: Symbol, content: impl Into<Arc<str>>) {
        let file = Arc::new(SourceFile::new(origin, content));
        if let Some(slot) = self.files.iter_mut().find(|f| f.origin() == origin) {
            *slot = file;
        } else {
            self.files.push(file);
        }
    }

    pub fn get(&self, origin: Symbol) -> Option<Arc<SourceFile>> {
        self.files.iter().find(|f| f.origin() == origin).cloned()
    }

    #[inline]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_file_line_count() {
        let file = SourceFile::new(Symbol::intern("a.fax"), "line1\nline2\nline3");
        assert_eq!(file.line_count(), 3);
    }

    #[test]
    fn source_file_line_start() {
        let file = SourceFile::new(Symbol::intern("b.fax"), "line1\nline2\nline3");
        assert_eq!(file.line_start(0), Some(0));
        assert_eq!(file.line_start(1), Some(6));
        assert_eq!(file.line_start(2), Some(12));
        assert_eq!(file.line_start(3), None);
    }

    #[test]
    fn source_file_offset_to_line_col() {
        let file = SourceFile::new(Symbol::intern("c.fax"), "x <- 1\ny <- 2");
        assert_eq!(file.offset_to_line_col(0), (1, 1));
        assert_eq!(file.offset_to_line_col(7), (2, 1));
    }

    #[test]
    fn source_file_line_at() {
        let file = SourceFile::new(Symbol::intern("d.fax"), "line1\nline2\nline3");
        assert_eq!(file.line_at(1), Some("line1"));
        assert_eq!(file.line_at(2), Some("line2"));
        assert_eq!(file.line_at(4), None);
    }

    #[test]
    fn source_file_extract() {
        let file = SourceFile::new(Symbol::intern("e.fax"), "x <- 1");
        assert_eq!(file.extract(0..1), "x");
    }

    #[test]
    fn empty_file_has_one_line() {
        let file = SourceFile::new(Symbol::intern("empty.fax"), "");
        assert_eq!(file.line_count(), 1);
        assert_eq!(file.offset_to_line_col(0), (1, 1));
    }

    #[test]
    fn source_map_add_and_get() {
        let mut map = SourceMap::new();
        let origin = Symbol::intern("main.fax");
        map.add(origin, "x <- 1");
        let file = map.get(origin).unwrap();
        assert_eq!(file.content(), "x <- 1");
        assert_eq!(map.file_count(), 1);
    }

    #[test]
    fn source_map_re_add_replaces() {
        let mut map = SourceMap::new();
        let origin = Symbol::intern("reused_origin.fax");
        map.add(origin, "first");
        map.add(origin, "second");
        assert_eq!(map.file_count(), 1);
        assert_eq!(map.get(origin).unwrap().content(), "second");
    }

    #[test]
    fn source_map_get_missing() {
        let map = SourceMap::new();
        assert!(map.get(Symbol::intern("missing_origin.fax")).is_none());
    }
}
