//! Command-line surface, parsed with `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Compiles a Pinky source file into a self-contained WebAssembly 1.0 module.
#[derive(Parser, Debug)]
#[command(name = "pinkc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pinky source file to compile
    pub input: PathBuf,

    /// Where to write the compiled module (default: input file stem + .wasm)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// What to emit instead of a finished module
    #[arg(long, value_enum, default_value = "wasm")]
    pub emit: EmitType,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true, env = "PINKC_VERBOSE")]
    pub verbose: bool,
}

/// What the driver should produce, mirroring the teacher's `EmitType` but
/// trimmed to the stages this pipeline actually has.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmitType {
    /// Dump the raw token stream and stop.
    Tokens,
    /// Dump the parsed AST and stop.
    Ast,
    /// Run the full pipeline and write a `.wasm` module (default).
    #[default]
    Wasm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_wasm_emit() {
        let cli = Cli::parse_from(["pinkc", "input.pinky"]);
        assert_eq!(cli.emit, EmitType::Wasm);
        assert!(!cli.verbose);
        assert!(cli.output.is_none());
    }

    #[test]
    fn parses_emit_tokens() {
        let cli = Cli::parse_from(["pinkc", "input.pinky", "--emit", "tokens"]);
        assert_eq!(cli.emit, EmitType::Tokens);
    }

    #[test]
    fn parses_emit_ast() {
        let cli = Cli::parse_from(["pinkc", "input.pinky", "--emit", "ast"]);
        assert_eq!(cli.emit, EmitType::Ast);
    }

    #[test]
    fn parses_output_and_verbose() {
        let cli = Cli::parse_from(["pinkc", "-v", "-o", "out.wasm", "input.pinky"]);
        assert!(cli.verbose);
        assert_eq!(cli.output, Some(PathBuf::from("out.wasm")));
    }
}
