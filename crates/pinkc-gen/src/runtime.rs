//! Hand-emitted bodies for the fixed set of runtime helpers every module
//! carries (spec.md §4.3's runtime-helpers table, plus [`func_index::WRITE_VALUE_STRING`]
//! which `concat` needs internally). Each `build_*` function returns a
//! finished [`wasm_encoder::Function`]; [`crate::module`] is responsible for
//! assigning these to the indices fixed in [`crate::layout::func_index`] and
//! appending them to the code section in that order.

use wasm_encoder::{BlockType, Function, Instruction, MemArg, ValType};

use crate::layout::{
    func_index, HEAP_PTR_GLOBAL, OFFSET_A, OFFSET_B, OFFSET_TAG, TAG_BOOL, TAG_NIL, TAG_NUMBER, TAG_STRING,
};

fn mem_i32(offset: u64) -> MemArg {
    MemArg {
        offset,
        align: 2,
        memory_index: 0,
    }
}

fn mem_f64(offset: u64) -> MemArg {
    MemArg {
        offset,
        align: 3,
        memory_index: 0,
    }
}

fn mem_i8(offset: u64) -> MemArg {
    MemArg {
        offset,
        align: 0,
        memory_index: 0,
    }
}

fn emit(f: &mut Function, ops: &[Instruction]) {
    for op in ops {
        f.instruction(op);
    }
}

/// `ensure_space(n: i32)`: grows linear memory in whole 64KiB pages until
/// `heap_ptr + n` fits, per spec.md §3's bump-heap description.
pub fn build_ensure_space() -> Function {
    // locals: 1 = end, 2 = cur_bytes
    let mut f = Function::new([(2, ValType::I32)]);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(0),
            Instruction::GlobalGet(HEAP_PTR_GLOBAL),
            Instruction::I32Add,
            Instruction::LocalSet(1), // end = heap_ptr + n
            Instruction::MemorySize(0),
            Instruction::I32Const(65536),
            Instruction::I32Mul,
            Instruction::LocalSet(2), // cur_bytes = memory.size * 65536
            Instruction::LocalGet(1),
            Instruction::LocalGet(2),
            Instruction::I32LeS,
            Instruction::If(BlockType::Empty),
            Instruction::Return,
            Instruction::End,
            // pages = ceil((end - cur_bytes) / 65536)
            Instruction::LocalGet(1),
            Instruction::LocalGet(2),
            Instruction::I32Sub,
            Instruction::I32Const(65535),
            Instruction::I32Add,
            Instruction::I32Const(65536),
            Instruction::I32DivU,
            Instruction::MemoryGrow(0),
            Instruction::Drop,
            Instruction::End,
        ],
    );
    f
}

/// Bumps `heap_ptr` by `BOX_SIZE`, leaving the pre-bump address as the new
/// box's pointer on the stack (callers still need `ensure_space` first).
fn alloc_box_into_local(f: &mut Function, ptr_local: u32) {
    emit(
        f,
        &[
            Instruction::GlobalGet(HEAP_PTR_GLOBAL),
            Instruction::LocalSet(ptr_local),
            Instruction::LocalGet(ptr_local),
            Instruction::I32Const(crate::layout::BOX_SIZE as i32),
            Instruction::I32Add,
            Instruction::GlobalSet(HEAP_PTR_GLOBAL),
        ],
    );
}

/// `box_number(value: f64) -> i32`
pub fn build_box_number() -> Function {
    // locals: 1 = ptr
    let mut f = Function::new([(1, ValType::I32)]);
    emit(
        &mut f,
        &[
            Instruction::I32Const(crate::layout::BOX_SIZE as i32),
            Instruction::Call(func_index::ENSURE_SPACE),
        ],
    );
    alloc_box_into_local(&mut f, 1);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(1),
            Instruction::I32Const(TAG_NUMBER),
            Instruction::I32Store(mem_i32(OFFSET_TAG)),
            Instruction::LocalGet(1),
            Instruction::LocalGet(0),
            Instruction::F64Store(mem_f64(OFFSET_B)),
            Instruction::LocalGet(1),
            Instruction::End,
        ],
    );
    f
}

/// `unbox_number(ptr: i32) -> f64`. Fast path only: UB if `ptr` isn't a
/// number box. Used where codegen already knows the static type.
pub fn build_unbox_number() -> Function {
    let mut f = Function::new([]);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(0),
            Instruction::F64Load(mem_f64(OFFSET_B)),
            Instruction::End,
        ],
    );
    f
}

/// `box_bool(value: i32) -> i32`
pub fn build_box_bool() -> Function {
    let mut f = Function::new([(1, ValType::I32)]);
    emit(
        &mut f,
        &[
            Instruction::I32Const(crate::layout::BOX_SIZE as i32),
            Instruction::Call(func_index::ENSURE_SPACE),
        ],
    );
    alloc_box_into_local(&mut f, 1);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(1),
            Instruction::I32Const(TAG_BOOL),
            Instruction::I32Store(mem_i32(OFFSET_TAG)),
            Instruction::LocalGet(1),
            Instruction::LocalGet(0),
            Instruction::I32Store(mem_i32(OFFSET_A)),
            Instruction::LocalGet(1),
            Instruction::End,
        ],
    );
    f
}

/// `box_string(offset: i32, length: i32) -> i32`
pub fn build_box_string() -> Function {
    let mut f = Function::new([(1, ValType::I32)]);
    emit(
        &mut f,
        &[
            Instruction::I32Const(crate::layout::BOX_SIZE as i32),
            Instruction::Call(func_index::ENSURE_SPACE),
        ],
    );
    alloc_box_into_local(&mut f, 2);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(2),
            Instruction::I32Const(TAG_STRING),
            Instruction::I32Store(mem_i32(OFFSET_TAG)),
            Instruction::LocalGet(2),
            Instruction::LocalGet(0),
            Instruction::I32Store(mem_i32(OFFSET_A)),
            Instruction::LocalGet(2),
            Instruction::LocalGet(1),
            Instruction::I32Store(mem_i32(OFFSET_B)),
            Instruction::LocalGet(2),
            Instruction::End,
        ],
    );
    f
}

/// `box_nil() -> i32`
pub fn build_box_nil() -> Function {
    let mut f = Function::new([(1, ValType::I32)]);
    emit(
        &mut f,
        &[
            Instruction::I32Const(crate::layout::BOX_SIZE as i32),
            Instruction::Call(func_index::ENSURE_SPACE),
        ],
    );
    alloc_box_into_local(&mut f, 0);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(0),
            Instruction::I32Const(TAG_NIL),
            Instruction::I32Store(mem_i32(OFFSET_TAG)),
            Instruction::LocalGet(0),
            Instruction::End,
        ],
    );
    f
}

/// `is_truthy(ptr: i32) -> i32`, per spec.md §4.3's table: `nil -> 0`,
/// `bool -> its value`, `number -> 1 iff != 0`, `string -> 1 iff length > 0`.
pub fn build_is_truthy() -> Function {
    // locals: 1 = tag
    let mut f = Function::new([(1, ValType::I32)]);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(0),
            Instruction::I32Load(mem_i32(OFFSET_TAG)),
            Instruction::LocalTee(1),
            Instruction::I32Const(TAG_NIL),
            Instruction::I32Eq,
            Instruction::If(BlockType::Result(ValType::I32)),
            Instruction::I32Const(0),
            Instruction::Else,
            Instruction::LocalGet(1),
            Instruction::I32Const(TAG_BOOL),
            Instruction::I32Eq,
            Instruction::If(BlockType::Result(ValType::I32)),
            Instruction::LocalGet(0),
            Instruction::I32Load(mem_i32(OFFSET_A)),
            Instruction::Else,
            Instruction::LocalGet(1),
            Instruction::I32Const(TAG_NUMBER),
            Instruction::I32Eq,
            Instruction::If(BlockType::Result(ValType::I32)),
            Instruction::LocalGet(0),
            Instruction::F64Load(mem_f64(OFFSET_B)),
            Instruction::F64Const(0.0),
            Instruction::F64Ne,
            Instruction::Else,
            // string: truthy iff length (stored at OFFSET_B) > 0
            Instruction::LocalGet(0),
            Instruction::I32Load(mem_i32(OFFSET_B)),
            Instruction::I32Const(0),
            Instruction::I32GtS,
            Instruction::End,
            Instruction::End,
            Instruction::End,
        ],
    );
    f
}

/// `to_number(ptr: i32) -> f64`: the general-coercion unboxing used for all
/// arithmetic/comparison operands (spec.md §9's "boolean arithmetic" note).
/// Numbers load directly; booleans convert `0`/`1`; strings and nil coerce
/// to `0.0`.
pub fn build_to_number() -> Function {
    // locals: 1 = tag
    let mut f = Function::new([(1, ValType::I32)]);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(0),
            Instruction::I32Load(mem_i32(OFFSET_TAG)),
            Instruction::LocalTee(1),
            Instruction::I32Const(TAG_NUMBER),
            Instruction::I32Eq,
            Instruction::If(BlockType::Result(ValType::F64)),
            Instruction::LocalGet(0),
            Instruction::F64Load(mem_f64(OFFSET_B)),
            Instruction::Else,
            Instruction::LocalGet(1),
            Instruction::I32Const(TAG_BOOL),
            Instruction::I32Eq,
            Instruction::If(BlockType::Result(ValType::F64)),
            Instruction::LocalGet(0),
            Instruction::I32Load(mem_i32(OFFSET_A)),
            Instruction::F64ConvertI32S,
            Instruction::Else,
            Instruction::F64Const(0.0),
            Instruction::End,
            Instruction::End,
            Instruction::End,
        ],
    );
    f
}

/// `mod(a: f64, b: f64) -> f64`: `a - trunc(a / b) * b`. Division by zero
/// naturally yields `NaN` through IEEE f64 semantics, matching spec.md §8's
/// `5 % 0` scenario.
pub fn build_mod_helper() -> Function {
    let mut f = Function::new([]);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(0),
            Instruction::LocalGet(0),
            Instruction::LocalGet(1),
            Instruction::F64Div,
            Instruction::F64Trunc,
            Instruction::LocalGet(1),
            Instruction::F64Mul,
            Instruction::F64Sub,
            Instruction::End,
        ],
    );
    f
}

/// `pow(base: f64, exponent: f64) -> f64`: the exponent is truncated to an
/// `i32` and applied by repeated squaring (no host `math_pow` import, per
/// the fractional-exponent open question's in-module resolution). Negative
/// exponents invert the base first.
pub fn build_pow_helper() -> Function {
    // locals: 2 = exp_i, 3 = neg, 4 = result, 5 = b
    let mut f = Function::new([(1, ValType::I32), (1, ValType::I32), (1, ValType::F64), (1, ValType::F64)]);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(1),
            Instruction::I32TruncF64S,
            Instruction::LocalSet(2),
            Instruction::LocalGet(2),
            Instruction::I32Const(0),
            Instruction::I32LtS,
            Instruction::LocalSet(3),
            Instruction::LocalGet(3),
            Instruction::If(BlockType::Empty),
            Instruction::I32Const(0),
            Instruction::LocalGet(2),
            Instruction::I32Sub,
            Instruction::LocalSet(2),
            Instruction::LocalGet(0),
            Instruction::F64Const(1.0),
            Instruction::F64Div,
            Instruction::LocalSet(5),
            Instruction::Else,
            Instruction::LocalGet(0),
            Instruction::LocalSet(5),
            Instruction::End,
            Instruction::F64Const(1.0),
            Instruction::LocalSet(4),
            Instruction::Block(BlockType::Empty),
            Instruction::Loop(BlockType::Empty),
            Instruction::LocalGet(2),
            Instruction::I32Eqz,
            Instruction::BrIf(1),
            Instruction::LocalGet(2),
            Instruction::I32Const(1),
            Instruction::I32And,
            Instruction::If(BlockType::Empty),
            Instruction::LocalGet(4),
            Instruction::LocalGet(5),
            Instruction::F64Mul,
            Instruction::LocalSet(4),
            Instruction::End,
            Instruction::LocalGet(5),
            Instruction::LocalGet(5),
            Instruction::F64Mul,
            Instruction::LocalSet(5),
            Instruction::LocalGet(2),
            Instruction::I32Const(1),
            Instruction::I32ShrU,
            Instruction::LocalSet(2),
            Instruction::Br(0),
            Instruction::End,
            Instruction::End,
            Instruction::LocalGet(4),
            Instruction::End,
        ],
    );
    f
}

/// `write_uint(value: i32, ptr: i32) -> i32`: writes unsigned decimal digits
/// at `ptr`, returns the digit count. No sign handling — see [`build_write_int`].
pub fn build_write_uint() -> Function {
    // locals: 2 = v, 3 = len, 4 = lo, 5 = hi, 6 = tmp
    let mut f = Function::new([(5, ValType::I32)]);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(0),
            Instruction::I32Eqz,
            Instruction::If(BlockType::Result(ValType::I32)),
            Instruction::LocalGet(1),
            Instruction::I32Const(48),
            Instruction::I32Store8(mem_i8(0)),
            Instruction::I32Const(1),
            Instruction::Else,
            Instruction::LocalGet(0),
            Instruction::LocalSet(2),
            Instruction::I32Const(0),
            Instruction::LocalSet(3),
            Instruction::Block(BlockType::Empty),
            Instruction::Loop(BlockType::Empty),
            Instruction::LocalGet(2),
            Instruction::I32Eqz,
            Instruction::BrIf(1),
            Instruction::LocalGet(1),
            Instruction::LocalGet(3),
            Instruction::I32Add,
            Instruction::LocalGet(2),
            Instruction::I32Const(10),
            Instruction::I32RemU,
            Instruction::I32Const(48),
            Instruction::I32Add,
            Instruction::I32Store8(mem_i8(0)),
            Instruction::LocalGet(2),
            Instruction::I32Const(10),
            Instruction::I32DivU,
            Instruction::LocalSet(2),
            Instruction::LocalGet(3),
            Instruction::I32Const(1),
            Instruction::I32Add,
            Instruction::LocalSet(3),
            Instruction::Br(0),
            Instruction::End,
            Instruction::End,
            // reverse digits[0..len)
            Instruction::I32Const(0),
            Instruction::LocalSet(4),
            Instruction::LocalGet(3),
            Instruction::I32Const(1),
            Instruction::I32Sub,
            Instruction::LocalSet(5),
            Instruction::Block(BlockType::Empty),
            Instruction::Loop(BlockType::Empty),
            Instruction::LocalGet(4),
            Instruction::LocalGet(5),
            Instruction::I32GeS,
            Instruction::BrIf(1),
            Instruction::LocalGet(1),
            Instruction::LocalGet(4),
            Instruction::I32Add,
            Instruction::I32Load8U(mem_i8(0)),
            Instruction::LocalSet(6),
            Instruction::LocalGet(1),
            Instruction::LocalGet(4),
            Instruction::I32Add,
            Instruction::LocalGet(1),
            Instruction::LocalGet(5),
            Instruction::I32Add,
            Instruction::I32Load8U(mem_i8(0)),
            Instruction::I32Store8(mem_i8(0)),
            Instruction::LocalGet(1),
            Instruction::LocalGet(5),
            Instruction::I32Add,
            Instruction::LocalGet(6),
            Instruction::I32Store8(mem_i8(0)),
            Instruction::LocalGet(4),
            Instruction::I32Const(1),
            Instruction::I32Add,
            Instruction::LocalSet(4),
            Instruction::LocalGet(5),
            Instruction::I32Const(1),
            Instruction::I32Sub,
            Instruction::LocalSet(5),
            Instruction::Br(0),
            Instruction::End,
            Instruction::End,
            Instruction::LocalGet(3),
            Instruction::End,
            Instruction::End,
        ],
    );
    f
}

/// `write_int(value: i32, ptr: i32) -> i32`: a sign-handling wrapper around
/// [`build_write_uint`].
pub fn build_write_int() -> Function {
    let mut f = Function::new([]);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(0),
            Instruction::I32Const(0),
            Instruction::I32LtS,
            Instruction::If(BlockType::Result(ValType::I32)),
            Instruction::LocalGet(1),
            Instruction::I32Const(45), // '-'
            Instruction::I32Store8(mem_i8(0)),
            Instruction::I32Const(0),
            Instruction::LocalGet(0),
            Instruction::I32Sub,
            Instruction::LocalGet(1),
            Instruction::I32Const(1),
            Instruction::I32Add,
            Instruction::Call(func_index::WRITE_UINT),
            Instruction::I32Const(1),
            Instruction::I32Add,
            Instruction::Else,
            Instruction::LocalGet(0),
            Instruction::LocalGet(1),
            Instruction::Call(func_index::WRITE_UINT),
            Instruction::End,
            Instruction::End,
        ],
    );
    f
}

/// `stringify_number(value: f64, buf_ptr: i32) -> i32`. Exact-integer values
/// take a clean integer path through [`build_write_int`]. Non-integral
/// values fall back to a fixed-point `int.frac6` rendering — this is a
/// documented approximation, not full shortest-round-trip formatting.
pub fn build_stringify_number() -> Function {
    // locals: 2 = len, 3 = fraclen
    let mut f = Function::new([(2, ValType::I32)]);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(0),
            Instruction::LocalGet(0),
            Instruction::F64Trunc,
            Instruction::F64Eq,
            Instruction::If(BlockType::Result(ValType::I32)),
            Instruction::LocalGet(0),
            Instruction::I32TruncF64S,
            Instruction::LocalGet(1),
            Instruction::Call(func_index::WRITE_INT),
            Instruction::Else,
            Instruction::LocalGet(0),
            Instruction::F64Trunc,
            Instruction::I32TruncF64S,
            Instruction::LocalGet(1),
            Instruction::Call(func_index::WRITE_INT),
            Instruction::LocalSet(2),
            Instruction::LocalGet(1),
            Instruction::LocalGet(2),
            Instruction::I32Add,
            Instruction::I32Const(46), // '.'
            Instruction::I32Store8(mem_i8(0)),
            Instruction::LocalGet(0),
            Instruction::LocalGet(0),
            Instruction::F64Trunc,
            Instruction::F64Sub,
            Instruction::F64Abs,
            Instruction::F64Const(1_000_000.0),
            Instruction::F64Mul,
            Instruction::I32TruncF64S,
            Instruction::LocalGet(1),
            Instruction::LocalGet(2),
            Instruction::I32Const(1),
            Instruction::I32Add,
            Instruction::I32Add,
            Instruction::Call(func_index::WRITE_UINT),
            Instruction::LocalSet(3),
            Instruction::LocalGet(2),
            Instruction::I32Const(1),
            Instruction::I32Add,
            Instruction::LocalGet(3),
            Instruction::I32Add,
            Instruction::End,
            Instruction::End,
        ],
    );
    f
}

/// `write_value_string(ptr: i32, dst: i32) -> i32`: writes the string
/// representation of the boxed value at `ptr` into `dst` (copying bytes for
/// an already-string value, stringifying numbers/bools, writing nothing for
/// nil) and returns the byte count written. Internal to [`build_concat`].
pub fn build_write_value_string() -> Function {
    // locals: 2 = tag, 3 = src, 4 = len, 5 = bval, 6 = i
    let mut f = Function::new([(5, ValType::I32)]);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(0),
            Instruction::I32Load(mem_i32(OFFSET_TAG)),
            Instruction::LocalSet(2),
            Instruction::LocalGet(2),
            Instruction::I32Const(TAG_STRING),
            Instruction::I32Eq,
            Instruction::If(BlockType::Result(ValType::I32)),
            Instruction::LocalGet(0),
            Instruction::I32Load(mem_i32(OFFSET_A)),
            Instruction::LocalSet(3),
            Instruction::LocalGet(0),
            Instruction::I32Load(mem_i32(OFFSET_B)),
            Instruction::LocalSet(4),
            Instruction::I32Const(0),
            Instruction::LocalSet(6),
            Instruction::Block(BlockType::Empty),
            Instruction::Loop(BlockType::Empty),
            Instruction::LocalGet(6),
            Instruction::LocalGet(4),
            Instruction::I32GeS,
            Instruction::BrIf(1),
            Instruction::LocalGet(1),
            Instruction::LocalGet(6),
            Instruction::I32Add,
            Instruction::LocalGet(3),
            Instruction::LocalGet(6),
            Instruction::I32Add,
            Instruction::I32Load8U(mem_i8(0)),
            Instruction::I32Store8(mem_i8(0)),
            Instruction::LocalGet(6),
            Instruction::I32Const(1),
            Instruction::I32Add,
            Instruction::LocalSet(6),
            Instruction::Br(0),
            Instruction::End,
            Instruction::End,
            Instruction::LocalGet(4),
            Instruction::Else,
            Instruction::LocalGet(2),
            Instruction::I32Const(TAG_NUMBER),
            Instruction::I32Eq,
            Instruction::If(BlockType::Result(ValType::I32)),
            Instruction::LocalGet(0),
            Instruction::F64Load(mem_f64(OFFSET_B)),
            Instruction::LocalGet(1),
            Instruction::Call(func_index::STRINGIFY_NUMBER),
            Instruction::Else,
            Instruction::LocalGet(2),
            Instruction::I32Const(TAG_BOOL),
            Instruction::I32Eq,
            Instruction::If(BlockType::Result(ValType::I32)),
            Instruction::LocalGet(0),
            Instruction::I32Load(mem_i32(OFFSET_A)),
            Instruction::LocalSet(5),
            Instruction::LocalGet(5),
            Instruction::I32Eqz,
            Instruction::If(BlockType::Result(ValType::I32)),
            Instruction::LocalGet(1),
            Instruction::I32Const(102), // 'f'
            Instruction::I32Store8(mem_i8(0)),
            Instruction::LocalGet(1),
            Instruction::I32Const(97), // 'a'
            Instruction::I32Store8(mem_i8(1)),
            Instruction::LocalGet(1),
            Instruction::I32Const(108), // 'l'
            Instruction::I32Store8(mem_i8(2)),
            Instruction::LocalGet(1),
            Instruction::I32Const(115), // 's'
            Instruction::I32Store8(mem_i8(3)),
            Instruction::LocalGet(1),
            Instruction::I32Const(101), // 'e'
            Instruction::I32Store8(mem_i8(4)),
            Instruction::I32Const(5),
            Instruction::Else,
            Instruction::LocalGet(1),
            Instruction::I32Const(116), // 't'
            Instruction::I32Store8(mem_i8(0)),
            Instruction::LocalGet(1),
            Instruction::I32Const(114), // 'r'
            Instruction::I32Store8(mem_i8(1)),
            Instruction::LocalGet(1),
            Instruction::I32Const(117), // 'u'
            Instruction::I32Store8(mem_i8(2)),
            Instruction::LocalGet(1),
            Instruction::I32Const(101), // 'e'
            Instruction::I32Store8(mem_i8(3)),
            Instruction::I32Const(4),
            Instruction::End,
            Instruction::Else,
            Instruction::I32Const(0),
            Instruction::End,
            Instruction::End,
            Instruction::End,
            Instruction::End,
        ],
    );
    f
}

/// `concat(left: i32, right: i32) -> i32`: realizes `+`'s string-concatenation
/// semantics (spec.md §4.3). Reserves a generous fixed scratch window off
/// the bump heap, stringifies both operands into it back to back, then
/// shrinks `heap_ptr` back down to the bytes actually used before boxing
/// the result — the bump allocator never reclaims memory, so the unused
/// tail of the scratch window is simply abandoned, not reused.
pub fn build_concat() -> Function {
    // locals: 2 = dst, 3 = llen, 4 = rlen
    const SCRATCH_BUDGET: i32 = 4096;
    let mut f = Function::new([(3, ValType::I32)]);
    emit(
        &mut f,
        &[
            Instruction::I32Const(SCRATCH_BUDGET),
            Instruction::Call(func_index::ENSURE_SPACE),
            Instruction::GlobalGet(HEAP_PTR_GLOBAL),
            Instruction::LocalSet(2),
            Instruction::LocalGet(0),
            Instruction::LocalGet(2),
            Instruction::Call(func_index::WRITE_VALUE_STRING),
            Instruction::LocalSet(3),
            Instruction::LocalGet(1),
            Instruction::LocalGet(2),
            Instruction::LocalGet(3),
            Instruction::I32Add,
            Instruction::Call(func_index::WRITE_VALUE_STRING),
            Instruction::LocalSet(4),
            Instruction::LocalGet(2),
            Instruction::LocalGet(3),
            Instruction::I32Add,
            Instruction::LocalGet(4),
            Instruction::I32Add,
            Instruction::GlobalSet(HEAP_PTR_GLOBAL),
            Instruction::LocalGet(2),
            Instruction::LocalGet(3),
            Instruction::LocalGet(4),
            Instruction::I32Add,
            Instruction::Call(func_index::BOX_STRING),
            Instruction::End,
        ],
    );
    f
}

/// `add_values(left: i32, right: i32) -> i32`: `+`'s full runtime dispatch —
/// numeric addition when both operands are numbers, string concatenation
/// otherwise (spec.md §4.3: "`+` additionally has string concatenation
/// semantics").
pub fn build_add_values() -> Function {
    // locals: 2 = tag_l, 3 = tag_r
    let mut f = Function::new([(2, ValType::I32)]);
    emit(
        &mut f,
        &[
            Instruction::LocalGet(0),
            Instruction::I32Load(mem_i32(OFFSET_TAG)),
            Instruction::LocalSet(2),
            Instruction::LocalGet(1),
            Instruction::I32Load(mem_i32(OFFSET_TAG)),
            Instruction::LocalSet(3),
            Instruction::LocalGet(2),
            Instruction::I32Const(TAG_NUMBER),
            Instruction::I32Eq,
            Instruction::LocalGet(3),
            Instruction::I32Const(TAG_NUMBER),
            Instruction::I32Eq,
            Instruction::I32And,
            Instruction::If(BlockType::Result(ValType::I32)),
            Instruction::LocalGet(0),
            Instruction::F64Load(mem_f64(OFFSET_B)),
            Instruction::LocalGet(1),
            Instruction::F64Load(mem_f64(OFFSET_B)),
            Instruction::F64Add,
            Instruction::Call(func_index::BOX_NUMBER),
            Instruction::Else,
            Instruction::LocalGet(0),
            Instruction::LocalGet(1),
            Instruction::Call(func_index::CONCAT),
            Instruction::End,
            Instruction::End,
        ],
    );
    f
}
