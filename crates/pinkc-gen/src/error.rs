use thiserror::Error;

/// Internal code-generator invariant violations. `pinkc-sem` is expected to
/// reject every user-facing mistake before a [`pinkc_sem::ResolvedProgram`]
/// ever reaches this crate, so these should never surface from a program
/// that passed semantic resolution without errors.
#[derive(Debug, Error)]
pub enum CodeGenError {
    #[error("internal code generator error: {0}")]
    Internal(String),
}
