//! The compile-time string table: deduplicates literal string content and
//! assigns each distinct literal a byte offset into the module's single
//! data segment (spec.md §3, §4.3, §6).

use rustc_hash::FxHashMap;

use pinkc_sem::{RExpr, RStmt, ResolvedProgram};
use pinkc_util::Symbol;

pub struct StringTable {
    offsets: FxHashMap<Symbol, u32>,
    /// The concatenated, zero-terminated literal bytes, in first-encounter
    /// order — this becomes the module's data segment verbatim.
    data: Vec<u8>,
}

impl StringTable {
    pub fn new() -> Self {
        Self {
            offsets: FxHashMap::default(),
            data: Vec::new(),
        }
    }

    /// Walks every string literal reachable from `program` (main, then each
    /// user function in declaration order) and interns it. Call this before
    /// generating any code, since `box_string` call sites need the offset.
    pub fn collect(&mut self, program: &ResolvedProgram) {
        collect_block(self, &program.main.body);
        for func in program.functions.iter() {
            collect_block(self, &func.body);
        }
    }

    /// `(offset, length)` for `sym`'s interned bytes, allocating a new slot
    /// on first sight.
    pub fn intern(&mut self, sym: Symbol) -> (u32, u32) {
        if let Some(&offset) = self.offsets.get(&sym) {
            let len = sym.as_str().len() as u32;
            return (offset, len);
        }
        let offset = self.data.len() as u32;
        let bytes = sym.as_str().as_bytes();
        self.data.extend_from_slice(bytes);
        self.data.push(0);
        self.offsets.insert(sym, offset);
        (offset, bytes.len() as u32)
    }

    /// `(offset, length)` for an already-interned symbol. Returns `None` if
    /// `collect` was never run over a program containing this literal.
    pub fn offset_of(&self, sym: Symbol) -> Option<(u32, u32)> {
        self.offsets.get(&sym).map(|&offset| (offset, sym.as_str().len() as u32))
    }

    /// The initial `heap_ptr` value: one byte past the end of the string
    /// data region (spec.md §3: `string_data_length + 1`).
    pub fn heap_start(&self) -> u32 {
        self.data.len() as u32 + 1
    }

    pub fn data_segment(&self) -> &[u8] {
        &self.data
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_block(table: &mut StringTable, stmts: &[RStmt]) {
    for stmt in stmts {
        match stmt {
            RStmt::Print(e) | RStmt::Println(e) | RStmt::Return(e) | RStmt::ExpressionStmt(e) => {
                collect_expr(table, e)
            }
            RStmt::SetLocal { value, .. } => collect_expr(table, value),
            RStmt::If {
                condition,
                then_branch,
                elif_branches,
                else_branch,
            } => {
                collect_expr(table, condition);
                collect_block(table, then_branch);
                for (cond, body) in elif_branches {
                    collect_expr(table, cond);
                    collect_block(table, body);
                }
                if let Some(body) = else_branch {
                    collect_block(table, body);
                }
            }
            RStmt::While { condition, body } => {
                collect_expr(table, condition);
                collect_block(table, body);
            }
            RStmt::For {
                start, end, step, body, ..
            } => {
                collect_expr(table, start);
                collect_expr(table, end);
                if let Some(step) = step {
                    collect_expr(table, step);
                }
                collect_block(table, body);
            }
        }
    }
}

fn collect_expr(table: &mut StringTable, expr: &RExpr) {
    match expr {
        RExpr::StringLiteral(sym) => {
            table.intern(*sym);
        }
        RExpr::NumberLiteral(_) | RExpr::BooleanLiteral(_) | RExpr::Local(_) => {}
        RExpr::Unary(_, inner) => collect_expr(table, inner),
        RExpr::Binary(_, left, right) => {
            collect_expr(table, left);
            collect_expr(table, right);
        }
        RExpr::ShortCircuit { left, right, .. } => {
            collect_expr(table, left);
            collect_expr(table, right);
        }
        RExpr::Call { args, .. } => {
            for arg in args {
                collect_expr(table, arg);
            }
        }
    }
}
