//! Constants for the 16-byte boxed-value layout and the fixed set of wasm
//! function indices every module gets, regardless of user code (spec.md §3,
//! §4.3).

pub const BOX_SIZE: u64 = 16;

pub const TAG_NIL: i32 = 0;
pub const TAG_NUMBER: i32 = 1;
pub const TAG_STRING: i32 = 2;
pub const TAG_BOOL: i32 = 3;

pub const OFFSET_TAG: u64 = 0;
pub const OFFSET_A: u64 = 4;
pub const OFFSET_B: u64 = 8;

/// There is exactly one mutable global in an emitted module, so its index is
/// always this.
pub const HEAP_PTR_GLOBAL: u32 = 0;

/// The fixed imports and runtime helpers every module carries, in the exact
/// order their wasm function indices are assigned (imports first, so their
/// indices are stable regardless of which helpers a given program ends up
/// needing — all of them are always emitted, since the helper set is
/// closed per spec.md §4.3).
pub mod func_index {
    pub const PRINT: u32 = 0;
    pub const PRINTLN: u32 = 1;
    pub const BOX_NUMBER: u32 = 2;
    pub const UNBOX_NUMBER: u32 = 3;
    pub const BOX_BOOL: u32 = 4;
    pub const BOX_STRING: u32 = 5;
    pub const BOX_NIL: u32 = 6;
    pub const IS_TRUTHY: u32 = 7;
    pub const TO_NUMBER: u32 = 8;
    pub const MOD_HELPER: u32 = 9;
    pub const POW_HELPER: u32 = 10;
    pub const ENSURE_SPACE: u32 = 11;
    pub const WRITE_UINT: u32 = 12;
    pub const WRITE_INT: u32 = 13;
    pub const STRINGIFY_NUMBER: u32 = 14;
    pub const CONCAT: u32 = 15;
    /// Internal to `concat`: writes a boxed value's string representation
    /// into a caller-provided buffer and returns the byte count written.
    /// Not part of spec.md's helper table by name, but needed to implement
    /// `concat` without a second return value (wasm 1.0 has no multi-value).
    pub const WRITE_VALUE_STRING: u32 = 16;
    /// `+`'s runtime dispatch: numeric add if both operands are numbers,
    /// otherwise [`CONCAT`]. Keeping the tag check in its own helper means
    /// codegen never needs scratch locals to hold `+`'s operands across a
    /// runtime branch.
    pub const ADD_VALUES: u32 = 17;

    /// `main`, exported under that name. Compiled and appended right after
    /// the fixed helper set, right before any user-declared functions.
    pub const MAIN: u32 = 18;

    /// User functions are appended starting at this index.
    pub const FIRST_USER_FUNC: u32 = 19;
}
