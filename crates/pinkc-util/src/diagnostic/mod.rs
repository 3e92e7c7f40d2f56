//! Diagnostic reporting: levels, codes, and a [`Handler`] that accumulates
//! them over the course of a compilation session.
//!
//! ```
//! use pinkc_util::diagnostic::{DiagnosticBuilder, Handler, DiagnosticCode};
//! use pinkc_util::Span;
//!
//! let handler = Handler::new();
//! DiagnosticBuilder::error("undefined variable `x`")
//!     .code(DiagnosticCode::E_SEM_UNDEFINED_VAR)
//!     .span(Span::DUMMY)
//!     .emit(&handler);
//!
//! assert!(handler.has_errors());
//! ```

mod builder;
mod codes;

pub use builder::{DiagnosticBuilder, SourceSnippet};
pub use codes::DiagnosticCode;

use crate::Span;
use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
            Level::Help => write!(f, "help"),
        }
    }
}

/// A single diagnostic message, carrying its severity, location, and any
/// supporting notes, help text, or source snippets.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub code: Option<DiagnosticCode>,
    pub notes: Vec<String>,
    pub helps: Vec<String>,
    pub snippets: Vec<SourceSnippet>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Render this diagnostic the way `pinkc-drv` prints to stderr:
    /// `error[E2003]: message` followed by a `--> file:line:col` locator.
    pub fn render(&self, source_map: &crate::SourceMap) -> String {
        let mut out = match &self.code {
            Some(code) => format!("{}[{}]: {}\n", self.level, code, self.message),
            None => format!("{}: {}\n", self.level, self.message),
        };
        if let Some(loc) = source_map.format_span(self.span) {
            out.push_str(&format!("  --> {loc}\n"));
        }
        for snippet in &self.snippets {
            out.push_str(&snippet.format());
            out.push('\n');
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

/// Accumulates diagnostics over a compilation session and answers whether
/// the session has failed.
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

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
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

    #[test]
    fn level_display_is_lowercase() {
        assert_eq!(Level::Error.to_string(), "error");
        assert_eq!(Level::Warning.to_string(), "warning");
    }

    #[test]
    fn handler_tracks_error_count_separately_from_warnings() {
        let handler = Handler::new();
        handler.emit_diagnostic(Diagnostic::error("bad", Span::DUMMY));
        handler.emit_diagnostic(Diagnostic::warning("meh", Span::DUMMY));
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
        assert_eq!(handler.diagnostics().len(), 2);
    }

    #[test]
    fn render_includes_code_and_location() {
        let mut map = crate::SourceMap::new();
        let file_id = map.add_file("main.pinky", "local x := 1\n");
        let span = Span::new(6, 7, 1, 7).with_file(file_id);
        let diag = Diagnostic::error("undefined variable `x`", span)
            .with_code(DiagnosticCode::E_SEM_UNDEFINED_VAR);
        let rendered = diag.render(&map);
        assert!(rendered.starts_with("error[E3001]:"));
        assert!(rendered.contains("main.pinky:1:7"));
    }
}
