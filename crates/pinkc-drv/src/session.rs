//! Orchestrates a single compilation: lex -> parse -> resolve -> codegen ->
//! emit, printing accumulated diagnostics between phases the way a batch
//! compiler (rather than one that tries to recover and keep going) does.

use std::fs;

use pinkc_util::{Handler, SourceMap};

use crate::cli::EmitType;
use crate::config::Config;
use crate::error::{DrvError, Result};

pub struct Session {
    pub config: Config,
    pub source_map: SourceMap,
    pub handler: Handler,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            source_map: SourceMap::new(),
            handler: Handler::new(),
        }
    }

    /// Run the pipeline to completion. On success, a `.wasm` file (or a
    /// `--emit tokens`/`--emit ast` dump) has been written; on failure, every
    /// diagnostic has already been printed to stderr and the returned error
    /// is just a summary for the process exit code.
    pub fn compile(&mut self) -> Result<()> {
        let source = fs::read_to_string(&self.config.input).map_err(|source| DrvError::ReadInput {
            path: self.config.input.clone(),
            source,
        })?;
        let file_name = self.config.input.display().to_string();
        let file_id = self.source_map.add_file(file_name, source.clone());

        tracing::debug!(phase = "lex", file = %self.config.input.display(), "tokenizing");
        let tokens = pinkc_lex::tokenize(&source, file_id, &self.handler);
        let errors = self.report_and_clear();
        if errors > 0 {
            return Err(DrvError::Diagnosed(errors));
        }
        if self.config.emit == EmitType::Tokens {
            for token in &tokens {
                println!("{token:?}");
            }
            return Ok(());
        }

        tracing::debug!(phase = "parse", "parsing token stream");
        let program = pinkc_par::parse(tokens, &self.handler);
        let errors = self.report_and_clear();
        if errors > 0 {
            return Err(DrvError::Diagnosed(errors));
        }
        if self.config.emit == EmitType::Ast {
            println!("{program:#?}");
            return Ok(());
        }

        tracing::debug!(phase = "resolve", "resolving names and local slots");
        let resolved = pinkc_sem::resolve(&program, &self.handler);
        let errors = self.report_and_clear();
        if errors > 0 {
            return Err(DrvError::Diagnosed(errors));
        }
        let resolved = resolved.expect("resolve() returned None without reporting an error");

        tracing::debug!(phase = "codegen", "assembling wasm module");
        let (bytes, _strings) = pinkc_gen::compile(&resolved)?;

        tracing::info!(output = %self.config.output.display(), bytes = bytes.len(), "writing module");
        fs::write(&self.config.output, &bytes).map_err(|source| DrvError::WriteOutput {
            path: self.config.output.clone(),
            source,
        })?;

        Ok(())
    }

    /// Print every diagnostic accumulated since the last call and clear the
    /// handler, returning how many of them were errors (the caller stops the
    /// pipeline here if this is nonzero).
    fn report_and_clear(&self) -> usize {
        let errors = self.handler.error_count();
        for diagnostic in self.handler.diagnostics() {
            eprint!("{}", diagnostic.render(&self.source_map));
        }
        self.handler.clear();
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::EmitType;
    use std::io::Write;

    fn write_source(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn compiles_hello_world_to_a_wasm_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = write_source(&dir, "hello.pinky", "println \"hello world\"");
        let output = dir.path().join("hello.wasm");

        let config = Config {
            input,
            output: output.clone(),
            emit: EmitType::Wasm,
            verbose: false,
        };
        let mut session = Session::new(config);
        session.compile().expect("hello world should compile");

        let bytes = std::fs::read(&output).unwrap();
        wasmparser::validate(&bytes).expect("driver must emit a structurally valid module");
    }

    #[test]
    fn reports_undefined_variable_and_does_not_write_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = write_source(&dir, "bad.pinky", "println x");
        let output = dir.path().join("bad.wasm");

        let config = Config {
            input,
            output: output.clone(),
            emit: EmitType::Wasm,
            verbose: false,
        };
        let mut session = Session::new(config);
        let result = session.compile();

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn emit_tokens_does_not_write_a_wasm_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = write_source(&dir, "hello.pinky", "print 1");
        let output = dir.path().join("hello.wasm");

        let config = Config {
            input,
            output: output.clone(),
            emit: EmitType::Tokens,
            verbose: false,
        };
        let mut session = Session::new(config);
        session.compile().expect("tokenization should succeed");
        assert!(!output.exists());
    }

    #[test]
    fn emit_ast_does_not_write_a_wasm_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = write_source(&dir, "hello.pinky", "print 1");
        let output = dir.path().join("hello.wasm");

        let config = Config {
            input,
            output: output.clone(),
            emit: EmitType::Ast,
            verbose: false,
        };
        let mut session = Session::new(config);
        session.compile().expect("parsing should succeed");
        assert!(!output.exists());
    }
}
