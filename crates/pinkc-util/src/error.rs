//! Core error types for the pinkc-util crate.

use thiserror::Error;

/// Error type for source map operations.
#[derive(Debug, Error)]
pub enum SourceMapError {
    /// File not found in the source map.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// Requested line number exceeds the file's line count.
    #[error("invalid line number: {line} (file has {max_lines} lines)")]
    InvalidLineNumber { line: usize, max_lines: usize },
}

/// Result type alias for source map operations.
pub type SourceMapResult<T> = std::result::Result<T, SourceMapError>;
