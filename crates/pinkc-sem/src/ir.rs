//! The resolved intermediate form `pinkc-gen` consumes: the same shape as
//! [`pinkc_par::ast`] but with every identifier replaced by a local-slot
//! index and every call replaced by a function-table index, so codegen never
//! has to do name lookups of its own.

use pinkc_par::{BinOp, UnOp};
use pinkc_util::{define_idx, Symbol};

define_idx!(LocalIdx);
define_idx!(FuncIdx);

pub struct ResolvedProgram {
    pub main: ResolvedFunction,
    /// User-declared functions, in first-encounter order. `main` is not
    /// included here; its own `FuncIdx`-keyed calls resolve into this table.
    pub functions: pinkc_util::IndexVec<FuncIdx, ResolvedFunction>,
}

pub struct ResolvedFunction {
    pub name: Option<Symbol>,
    pub params: Vec<LocalIdx>,
    /// Total locals this function's prologue must declare (params + every
    /// slot allocated by `local`, plain assignment, `for`, or a
    /// short-circuit/scratch use).
    pub local_count: u32,
    /// Whether any `ret` is reachable in the body; determines whether this
    /// function's wasm signature returns `i32` or nothing.
    pub has_return: bool,
    pub body: Vec<RStmt>,
}

pub enum RStmt {
    Print(RExpr),
    Println(RExpr),
    SetLocal { slot: LocalIdx, value: RExpr },
    If {
        condition: RExpr,
        then_branch: Vec<RStmt>,
        elif_branches: Vec<(RExpr, Vec<RStmt>)>,
        else_branch: Option<Vec<RStmt>>,
    },
    While {
        condition: RExpr,
        body: Vec<RStmt>,
    },
    For {
        var: LocalIdx,
        start: RExpr,
        end: RExpr,
        step: Option<RExpr>,
        body: Vec<RStmt>,
        direction_scratch: LocalIdx,
    },
    Return(RExpr),
    ExpressionStmt(RExpr),
}

pub enum RExpr {
    NumberLiteral(f64),
    StringLiteral(Symbol),
    BooleanLiteral(bool),
    Local(LocalIdx),
    Unary(UnOp, Box<RExpr>),
    Binary(BinOp, Box<RExpr>, Box<RExpr>),
    /// `and`/`or`; `is_and` picks which truthiness branch short-circuits.
    ShortCircuit {
        is_and: bool,
        left: Box<RExpr>,
        right: Box<RExpr>,
        scratch: LocalIdx,
    },
    Call { func: FuncIdx, args: Vec<RExpr> },
}
