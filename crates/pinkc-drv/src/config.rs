//! Resolved compilation configuration, built from [`crate::cli::Cli`].

use std::path::PathBuf;

use crate::cli::{Cli, EmitType};

#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub emit: EmitType,
    pub verbose: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let output = cli.output.unwrap_or_else(|| default_output_path(&cli.input));
        Self {
            input: cli.input,
            output,
            emit: cli.emit,
            verbose: cli.verbose,
        }
    }
}

fn default_output_path(input: &std::path::Path) -> PathBuf {
    input.with_extension("wasm")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_cli(input: &str) -> Cli {
        Cli {
            input: PathBuf::from(input),
            output: None,
            emit: EmitType::Wasm,
            verbose: false,
        }
    }

    #[test]
    fn default_output_replaces_extension_with_wasm() {
        let cli = fixture_cli("program.pinky");
        let config = Config::from_cli(cli);
        assert_eq!(config.output, PathBuf::from("program.wasm"));
    }

    #[test]
    fn explicit_output_is_kept_verbatim() {
        let mut cli = fixture_cli("program.pinky");
        cli.output = Some(PathBuf::from("built/out.wasm"));
        let config = Config::from_cli(cli);
        assert_eq!(config.output, PathBuf::from("built/out.wasm"));
    }
}
