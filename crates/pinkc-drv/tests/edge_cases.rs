//! Driver edge cases: config defaults, diagnostic reporting, and failure
//! paths that shouldn't leave a `.wasm` file behind.

use std::fs;
use std::io::Write;

use pinkc_drv::{Cli, Config, EmitType, Session};

fn write_source(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn cli_for(input: std::path::PathBuf) -> Cli {
    Cli {
        input,
        output: None,
        emit: EmitType::Wasm,
        verbose: false,
    }
}

/// EDGE CASE: missing input file surfaces as a driver error, not a panic.
#[test]
fn edge_missing_input_file_is_an_error() {
    let config = Config {
        input: std::path::PathBuf::from("/nonexistent/does-not-exist.pinky"),
        output: std::path::PathBuf::from("/tmp/does-not-exist.wasm"),
        emit: EmitType::Wasm,
        verbose: false,
    };
    let mut session = Session::new(config);
    assert!(session.compile().is_err());
}

/// EDGE CASE: a lex error (unterminated string) stops before parsing and
/// writes nothing.
#[test]
fn edge_lex_error_stops_the_pipeline() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_source(&dir, "bad.pinky", "println \"unterminated");
    let output = dir.path().join("bad.wasm");

    let config = Config {
        input,
        output: output.clone(),
        emit: EmitType::Wasm,
        verbose: false,
    };
    let mut session = Session::new(config);
    assert!(session.compile().is_err());
    assert!(!output.exists());
}

/// EDGE CASE: a parse error (dangling operator) stops before resolution.
#[test]
fn edge_parse_error_stops_the_pipeline() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_source(&dir, "bad.pinky", "print 1 +");
    let output = dir.path().join("bad.wasm");

    let config = Config {
        input,
        output: output.clone(),
        emit: EmitType::Wasm,
        verbose: false,
    };
    let mut session = Session::new(config);
    assert!(session.compile().is_err());
    assert!(!output.exists());
}

/// EDGE CASE: an arity mismatch is caught by resolution, not codegen.
#[test]
fn edge_arity_mismatch_stops_before_codegen() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_source(&dir, "bad.pinky", "func add(a, b) ret a + b end\nprintln add(1)");
    let output = dir.path().join("bad.wasm");

    let config = Config {
        input,
        output: output.clone(),
        emit: EmitType::Wasm,
        verbose: false,
    };
    let mut session = Session::new(config);
    assert!(session.compile().is_err());
    assert!(!output.exists());
}

/// EDGE CASE: default config.
#[test]
fn edge_config_defaults_output_to_input_stem_with_wasm_extension() {
    let config = Config::from_cli(cli_for(std::path::PathBuf::from("sub/dir/script.pinky")));
    assert_eq!(config.output, std::path::PathBuf::from("sub/dir/script.wasm"));
    assert_eq!(config.emit, EmitType::Wasm);
    assert!(!config.verbose);
}

/// EDGE CASE: explicit `--output` overrides the derived default.
#[test]
fn edge_explicit_output_overrides_default() {
    let mut cli = cli_for(std::path::PathBuf::from("script.pinky"));
    cli.output = Some(std::path::PathBuf::from("out/module.wasm"));
    let config = Config::from_cli(cli);
    assert_eq!(config.output, std::path::PathBuf::from("out/module.wasm"));
}

/// EDGE CASE: an empty program still compiles to a valid, exporting module.
#[test]
fn edge_empty_program_still_compiles() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_source(&dir, "empty.pinky", "");
    let output = dir.path().join("empty.wasm");

    let config = Config {
        input,
        output: output.clone(),
        emit: EmitType::Wasm,
        verbose: false,
    };
    let mut session = Session::new(config);
    session.compile().expect("an empty program is a valid (trivial) program");

    let bytes = fs::read(&output).unwrap();
    wasmparser::validate(&bytes).expect("valid module");
}

/// EDGE CASE: duplicate function declarations are reported and stop codegen.
#[test]
fn edge_duplicate_function_declaration_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_source(&dir, "bad.pinky", "func f() ret 1 end\nfunc f() ret 2 end");
    let output = dir.path().join("bad.wasm");

    let config = Config {
        input,
        output: output.clone(),
        emit: EmitType::Wasm,
        verbose: false,
    };
    let mut session = Session::new(config);
    assert!(session.compile().is_err());
    assert!(!output.exists());
}
