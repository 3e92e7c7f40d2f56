//! pinkc-drv - Compiler Driver
//!
//! Wires the pipeline crates (`pinkc-lex`, `pinkc-par`, `pinkc-sem`,
//! `pinkc-gen`) together behind a `clap`-based CLI: read a `.pinky` source
//! file, run lex -> parse -> resolve -> codegen, and write the resulting
//! `.wasm` module (or, with `--emit`, a debug dump of an earlier stage).

pub mod cli;
pub mod config;
pub mod error;
pub mod session;

pub use cli::{Cli, EmitType};
pub use config::Config;
pub use error::DrvError;
pub use session::Session;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Entry point called by `main.rs`. Parses arguments, initializes logging,
/// and runs the compilation.
pub fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = Config::from_cli(cli);
    let mut session = Session::new(config);
    session.compile()
}

/// Initialize `tracing-subscriber` with an `EnvFilter`: `RUST_LOG` takes
/// priority when set, otherwise `-v` selects `debug` over `info`.
fn init_logging(verbose: bool) -> error::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| DrvError::Logging(e.to_string()))?;

    Ok(())
}
