//! End-to-end driver tests covering the scenarios in spec.md's testable
//! properties: drive a `Session` over whole source snippets the way a user
//! invoking the `pinkc` binary would, and check the emitted module's
//! structure with `wasmparser` (there's no linked executable here, only a
//! `.wasm` module, so this stands in for `faxc-drv`'s `assert_cmd` tests).

use std::fs;
use std::io::Write;

use pinkc_drv::{Config, EmitType, Session};
use wasmparser::{Parser as WasmParser, Payload};

fn write_source(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn compile_to_wasm(source: &str) -> Vec<u8> {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_source(&dir, "program.pinky", source);
    let output = dir.path().join("program.wasm");

    let config = Config {
        input,
        output: output.clone(),
        emit: EmitType::Wasm,
        verbose: false,
    };
    let mut session = Session::new(config);
    session.compile().expect("program should compile cleanly");
    fs::read(&output).unwrap()
}

fn exported_function_names(bytes: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    for payload in WasmParser::new(0).parse_all(bytes) {
        if let Payload::ExportSection(reader) = payload.expect("parseable module") {
            for export in reader {
                names.push(export.expect("parseable export").name.to_string());
            }
        }
    }
    names
}

#[test]
fn scenario_hello_world_emits_a_valid_module() {
    // spec.md §8 scenario 1.
    let bytes = compile_to_wasm(r#"println "hello world""#);
    wasmparser::validate(&bytes).expect("valid module");
    let exports = exported_function_names(&bytes);
    assert!(exports.contains(&"main".to_string()));
    assert!(exports.contains(&"memory".to_string()));
}

#[test]
fn scenario_arithmetic_emits_a_valid_module() {
    // spec.md §8 scenario 2.
    let bytes = compile_to_wasm("print 5 + 3\nprintln 10 - 2");
    wasmparser::validate(&bytes).expect("valid module");
}

#[test]
fn scenario_number_plus_string_concat_emits_a_valid_module() {
    // spec.md §8 scenario 3.
    let bytes = compile_to_wasm("x := 5\ny := \"hi\"\nprintln x + y");
    wasmparser::validate(&bytes).expect("valid module");
}

#[test]
fn scenario_for_loop_with_shadowing_emits_a_valid_module() {
    // spec.md §8 scenario 4.
    let bytes = compile_to_wasm("i := 2\nfor i := 1, 3 do print i end\nprintln i");
    wasmparser::validate(&bytes).expect("valid module");
}

#[test]
fn scenario_recursive_factorial_emits_a_valid_module() {
    // spec.md §8 scenario 5.
    let source = "func fact(n) if n <= 1 then ret 1 else ret n * fact(n-1) end end\nprintln fact(5)";
    let bytes = compile_to_wasm(source);
    wasmparser::validate(&bytes).expect("valid module");
}

#[test]
fn scenario_boolean_short_circuit_values_emits_a_valid_module() {
    // spec.md §8 scenario 6.
    let bytes = compile_to_wasm("print true and 7\nprint false or \"hello\"\nprint 1 or 2");
    wasmparser::validate(&bytes).expect("valid module");
}

#[test]
fn scenario_zero_step_for_loop_still_compiles() {
    // spec.md §8 scenario 7: traps at runtime, but is not a compile error.
    let bytes = compile_to_wasm("for i := 1, 5, 0 do print i end");
    wasmparser::validate(&bytes).expect("valid module");
}

#[test]
fn scenario_modulo_by_zero_still_compiles() {
    // spec.md §8 scenario 8: NaN at runtime, not a compile error.
    let bytes = compile_to_wasm("print 5 % 0");
    wasmparser::validate(&bytes).expect("valid module");
}

#[test]
fn emit_tokens_dumps_without_producing_a_module() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_source(&dir, "program.pinky", "println 1");
    let output = dir.path().join("program.wasm");

    let config = Config {
        input,
        output: output.clone(),
        emit: EmitType::Tokens,
        verbose: false,
    };
    let mut session = Session::new(config);
    session.compile().expect("tokenizing should succeed");
    assert!(!output.exists());
}

#[test]
fn emit_ast_dumps_without_producing_a_module() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_source(&dir, "program.pinky", "println 1");
    let output = dir.path().join("program.wasm");

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

#[test]
fn default_output_path_is_derived_from_the_input_stem() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = write_source(&dir, "greeting.pinky", "println \"hi\"");

    let config = Config::from_cli(pinkc_drv::Cli {
        input: input.clone(),
        output: None,
        emit: EmitType::Wasm,
        verbose: false,
    });
    assert_eq!(config.output, dir.path().join("greeting.wasm"));

    let mut session = Session::new(config);
    session.compile().expect("program should compile");
    assert!(dir.path().join("greeting.wasm").exists());
}
