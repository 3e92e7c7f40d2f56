//! Source map - tracks loaded files and formats spans for diagnostics.

use std::sync::Arc;

use super::{FileId, Span};
use crate::error::{SourceMapError, SourceMapResult};

/// A single loaded source file, with a precomputed line-start table so that
/// byte-offset -> (line, column) lookups don't re-scan the whole file.
#[derive(Debug)]
pub struct SourceFile {
    id: FileId,
    name: String,
    content: Arc<str>,
    /// Byte offset of the first character of each line.
    line_starts: Vec<usize>,
}

impl SourceFile {
    fn new(id: FileId, name: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        let content: Arc<str> = content.into();
        let mut line_starts = vec![0];
        for (offset, ch) in content.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            id,
            name: name.into(),
            content,
            line_starts,
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a 1-indexed (line, column) pair.
    pub fn offset_to_line_col(&self, offset: usize) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        let column = self.content[line_start..offset.min(self.content.len())]
            .chars()
            .count()
            + 1;
        (line_idx as u32 + 1, column as u32)
    }

    /// Return the text of a single 1-indexed line, without its newline.
    pub fn line_at(&self, line: usize) -> SourceMapResult<&str> {
        if line == 0 || line > self.line_starts.len() {
            return Err(SourceMapError::InvalidLineNumber {
                line,
                max_lines: self.line_starts.len(),
            });
        }
        let start = self.line_starts[line - 1];
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.content.len());
        Ok(self.content[start..end].trim_end_matches(['\n', '\r']))
    }
}

/// Owns every source file seen during a compilation session.
#[derive(Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<Arc<str>>) -> FileId {
        let id = FileId(self.files.len());
        self.files.push(SourceFile::new(id, name, content));
        id
    }

    pub fn get(&self, id: FileId) -> SourceMapResult<&SourceFile> {
        self.files
            .get(id.0)
            .ok_or_else(|| SourceMapError::FileNotFound(format!("{id:?}")))
    }

    /// Format `file:line:column` for a span, the way rustc-style diagnostics do.
    pub fn format_span(&self, span: Span) -> Option<String> {
        let file = self.get(span.file_id).ok()?;
        Some(format!(
            "{}:{}:{}",
            file.name(),
            span.start_line,
            span.start_column
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_to_line_col_tracks_newlines() {
        let mut map = SourceMap::new();
        let id = map.add_file("test.pinky", "ab\ncd\nef");
        let file = map.get(id).unwrap();
        assert_eq!(file.offset_to_line_col(0), (1, 1));
        assert_eq!(file.offset_to_line_col(3), (2, 1));
        assert_eq!(file.offset_to_line_col(6), (3, 1));
    }

    #[test]
    fn line_at_strips_trailing_newline() {
        let mut map = SourceMap::new();
        let id = map.add_file("test.pinky", "first\nsecond\n");
        let file = map.get(id).unwrap();
        assert_eq!(file.line_at(1).unwrap(), "first");
        assert_eq!(file.line_at(2).unwrap(), "second");
        assert!(file.line_at(3).is_err());
    }
}
