//! pinkc-util - Core Utilities and Foundation Types
//!
//! Shared foundation for every other crate in the pinkc workspace: source
//! location tracking (`span`), string interning (`symbol`), diagnostic
//! reporting (`diagnostic`), typed index vectors (`index_vec`), and the
//! crate-level error types (`error`).
//!
//! None of these types know anything about the Pinky language itself; they
//! are the same kind of plumbing every compiler needs regardless of what it
//! compiles.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;
