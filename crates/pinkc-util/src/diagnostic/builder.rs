//! Fluent construction of [`Diagnostic`]s, plus source snippet rendering.

use super::{Diagnostic, DiagnosticCode, Level};
use crate::Span;

/// A single source line with an optional highlighted range, ready to render
/// under a diagnostic message the way rustc does.
#[derive(Clone, Debug)]
pub struct SourceSnippet {
    pub line: String,
    pub line_number: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub label: Option<String>,
}

impl SourceSnippet {
    pub fn new(
        line: impl Into<String>,
        line_number: usize,
        start_column: usize,
        end_column: usize,
        label: Option<impl Into<String>>,
    ) -> Self {
        Self {
            line: line.into(),
            line_number,
            start_column,
            end_column,
            label: label.map(Into::into),
        }
    }

    pub fn point(line: impl Into<String>, line_number: usize, column: usize) -> Self {
        Self {
            line: line.into(),
            line_number,
            start_column: column,
            end_column: column,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Render `  N | <line>` followed by a caret line pointing at the
    /// highlighted range.
    pub fn format(&self) -> String {
        let gutter = self.line_number.to_string().len().max(3);
        let mut out = format!("{:>gutter$} | {}\n", self.line_number, self.line);
        out.push_str(&format!("{:>gutter$} | ", ""));
        let start = self.start_column.saturating_sub(1);
        let len = (self.end_column - self.start_column).max(1);
        out.push_str(&" ".repeat(start));
        out.push_str(&"^".repeat(len));
        if let Some(label) = &self.label {
            out.push(' ');
            out.push_str(label);
        }
        out
    }
}

/// Fluent builder for a [`Diagnostic`].
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
    code: Option<DiagnosticCode>,
    notes: Vec<String>,
    helps: Vec<String>,
    snippets: Vec<SourceSnippet>,
}

impl DiagnosticBuilder {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: Span::DUMMY,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    pub fn snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippets.push(snippet);
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            span: self.span,
            code: self.code,
            notes: self.notes,
            helps: self.helps,
            snippets: self.snippets,
        }
    }

    /// Build and hand the diagnostic to `handler` in one step.
    pub fn emit(self, handler: &super::Handler) {
        handler.emit_diagnostic(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_draws_caret_under_highlighted_range() {
        let snippet = SourceSnippet::new("local x := 1", 3, 7, 8, Some("here"));
        let rendered = snippet.format();
        assert!(rendered.contains("local x := 1"));
        assert!(rendered.contains('^'));
        assert!(rendered.contains("here"));
    }

    #[test]
    fn builder_accumulates_notes_and_helps_in_order() {
        let diag = DiagnosticBuilder::error("bad thing")
            .note("first")
            .note("second")
            .help("try this")
            .span(Span::DUMMY)
            .build();
        assert_eq!(diag.notes, vec!["first", "second"]);
        assert_eq!(diag.helps, vec!["try this"]);
    }

    #[test]
    fn emit_routes_through_handler() {
        use super::super::Handler;

        let handler = Handler::new();
        DiagnosticBuilder::error("boom")
            .code(DiagnosticCode::E_PARSE_UNEXPECTED_EOF)
            .span(Span::DUMMY)
            .emit(&handler);

        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics()[0].code, Some(DiagnosticCode::E_PARSE_UNEXPECTED_EOF));
    }
}
