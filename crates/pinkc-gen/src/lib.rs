//! pinkc-gen - WebAssembly module assembly
//!
//! Takes a [`pinkc_sem::ResolvedProgram`] and emits a self-contained
//! WebAssembly 1.0 binary module: tagged-box runtime helpers, a bump
//! allocator, an interned string table, and one wasm function per Pinky
//! function, wired together with `wasm-encoder` in spec.md §4.3's exact
//! section order.

mod codegen;
mod error;
pub mod layout;
mod runtime;
mod strings;

pub use error::CodeGenError;
pub use strings::StringTable;

use pinkc_sem::ResolvedProgram;
use wasm_encoder::{
    CodeSection, ConstExpr, DataSection, EntityType, ExportKind, ExportSection, Function, FunctionSection,
    GlobalSection, GlobalType, ImportSection, MemorySection, MemoryType, Module, TypeSection, ValType,
};

use layout::{func_index, HEAP_PTR_GLOBAL};

/// Compiles `program` into a finished wasm module. Returns the module bytes;
/// the string table's raw byte payload is also returned for callers that
/// want to inspect it (tests, `pinkc-drv --emit` diagnostics).
pub fn compile(program: &ResolvedProgram) -> Result<(Vec<u8>, Vec<u8>), CodeGenError> {
    let mut strings = StringTable::new();
    strings.collect(program);

    let mut module = Module::new();

    let mut types = TypeSection::new();
    // Imports: print, println — both (i32) -> ().
    types.function([ValType::I32], []); // 0
    // Runtime helpers, in func_index order.
    types.function([ValType::F64], [ValType::I32]); // 1: box_number
    types.function([ValType::I32], [ValType::F64]); // 2: unbox_number
    types.function([ValType::I32], [ValType::I32]); // 3: box_bool
    types.function([ValType::I32, ValType::I32], [ValType::I32]); // 4: box_string
    types.function([], [ValType::I32]); // 5: box_nil
    types.function([ValType::I32], [ValType::I32]); // 6: is_truthy (reuses shape 3)
    types.function([ValType::I32], [ValType::F64]); // 7: to_number (reuses shape 2)
    types.function([ValType::F64, ValType::F64], [ValType::F64]); // 8: mod/pow
    types.function([ValType::I32], []); // 9: ensure_space (reuses shape 0)
    types.function([ValType::I32, ValType::I32], [ValType::I32]); // 10: write_uint/write_int/concat/write_value_string/add_values (reuses shape 4)
    types.function([ValType::F64, ValType::I32], [ValType::I32]); // 11: stringify_number
    types.function([], []); // 12: main
    const T_IMPORT: u32 = 0;
    const T_BOX_NUMBER: u32 = 1;
    const T_UNBOX_NUMBER: u32 = 2;
    const T_BOX_BOOL: u32 = 3;
    const T_BOX_STRING: u32 = 4;
    const T_BOX_NIL: u32 = 5;
    const T_IS_TRUTHY: u32 = 6;
    const T_TO_NUMBER: u32 = 7;
    const T_F64_F64_F64: u32 = 8;
    const T_ENSURE_SPACE: u32 = 9;
    const T_I32_I32_I32: u32 = 10;
    const T_STRINGIFY_NUMBER: u32 = 11;
    const T_MAIN: u32 = 12;

    let mut imports = ImportSection::new();
    imports.import("env", "print", EntityType::Function(T_IMPORT));
    imports.import("env", "println", EntityType::Function(T_IMPORT));

    let mut functions = FunctionSection::new();
    functions.function(T_BOX_NUMBER);
    functions.function(T_UNBOX_NUMBER);
    functions.function(T_BOX_BOOL);
    functions.function(T_BOX_STRING);
    functions.function(T_BOX_NIL);
    functions.function(T_IS_TRUTHY);
    functions.function(T_TO_NUMBER);
    functions.function(T_F64_F64_F64); // mod
    functions.function(T_F64_F64_F64); // pow
    functions.function(T_ENSURE_SPACE);
    functions.function(T_I32_I32_I32); // write_uint
    functions.function(T_I32_I32_I32); // write_int
    functions.function(T_STRINGIFY_NUMBER);
    functions.function(T_I32_I32_I32); // concat
    functions.function(T_I32_I32_I32); // write_value_string
    functions.function(T_I32_I32_I32); // add_values
    functions.function(T_MAIN);

    // User-declared functions: one type per distinct arity, appended after
    // the fixed set above. Parameters and results are always i32 (every
    // local is a boxed-value slot).
    let mut user_type_indices = Vec::with_capacity(program.functions.len());
    let mut next_type = 13u32;
    for func in program.functions.iter() {
        let params = vec![ValType::I32; func.params.len()];
        let results = if func.has_return { vec![ValType::I32] } else { vec![] };
        types.function(params, results);
        user_type_indices.push(next_type);
        next_type += 1;
        functions.function(*user_type_indices.last().unwrap());
    }

    let mut code = CodeSection::new();
    code.function(&runtime::build_box_number());
    code.function(&runtime::build_unbox_number());
    code.function(&runtime::build_box_bool());
    code.function(&runtime::build_box_string());
    code.function(&runtime::build_box_nil());
    code.function(&runtime::build_is_truthy());
    code.function(&runtime::build_to_number());
    code.function(&runtime::build_mod_helper());
    code.function(&runtime::build_pow_helper());
    code.function(&runtime::build_ensure_space());
    code.function(&runtime::build_write_uint());
    code.function(&runtime::build_write_int());
    code.function(&runtime::build_stringify_number());
    code.function(&runtime::build_concat());
    code.function(&runtime::build_write_value_string());
    code.function(&runtime::build_add_values());
    code.function(&codegen::compile_main(&program.main, &strings));
    for func in program.functions.iter() {
        code.function(&codegen::compile_function(func, &strings));
    }

    debug_assert_eq!(func_index::MAIN, 18, "func_index table drifted out of sync with module assembly");
    debug_assert_eq!(func_index::FIRST_USER_FUNC, 19, "func_index table drifted out of sync with module assembly");

    let mut memory = MemorySection::new();
    memory.memory(MemoryType {
        minimum: 1,
        maximum: None,
        memory64: false,
        shared: false,
    });

    let mut globals = GlobalSection::new();
    globals.global(
        GlobalType {
            val_type: ValType::I32,
            mutable: true,
        },
        &ConstExpr::i32_const(strings.heap_start() as i32),
    );
    debug_assert_eq!(HEAP_PTR_GLOBAL, 0);

    let mut exports = ExportSection::new();
    exports.export("main", ExportKind::Func, func_index::MAIN);
    exports.export("memory", ExportKind::Memory, 0);

    let mut data = DataSection::new();
    data.active(0, &ConstExpr::i32_const(0), strings.data_segment().iter().copied());

    module.section(&types);
    module.section(&imports);
    module.section(&functions);
    module.section(&memory);
    module.section(&globals);
    module.section(&exports);
    module.section(&code);
    module.section(&data);

    Ok((module.finish(), strings.data_segment().to_vec()))
}
