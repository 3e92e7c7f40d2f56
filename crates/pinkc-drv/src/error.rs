//! Driver-level errors. Lex/parse/semantic errors are reported as
//! [`pinkc_util::Diagnostic`]s on the session's `Handler`, not here — this
//! enum only covers things a diagnostic can't express: I/O failures and an
//! internal codegen bug.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DrvError {
    #[error("could not read input file `{path}`: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write output file `{path}`: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("code generation failed: {0}")]
    CodeGen(#[from] pinkc_gen::CodeGenError),

    #[error("compilation failed with {0} error(s)")]
    Diagnosed(usize),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, DrvError>;
