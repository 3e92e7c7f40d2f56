//! The function-table pre-pass.
//!
//! Pinky has no forward-declaration syntax, but `fact`-style self-recursion
//! and mutual recursion between two `func`s both need every declaration
//! visible before any call site is resolved. This pass walks the whole
//! statement tree once, registers every `func` by name (including ones
//! nested inside an `if`/`while`/`for` body — Pinky has no closures, so a
//! nested `func` is just sugar for a top-level one; it still compiles to a
//! single flat wasm function and is a no-op where it's written), and flags
//! duplicate names before any body is resolved.

use pinkc_par::{FunctionDecl, Program, Stmt, StmtKind};
use pinkc_util::diagnostic::{DiagnosticBuilder, DiagnosticCode};
use pinkc_util::{Handler, Symbol};
use rustc_hash::FxHashMap;

pub(crate) struct FunctionSignature<'p> {
    pub(crate) decl: &'p FunctionDecl,
    pub(crate) has_return: bool,
}

pub(crate) struct FunctionTable<'p> {
    pub(crate) by_name: FxHashMap<Symbol, usize>,
    pub(crate) in_order: Vec<FunctionSignature<'p>>,
}

impl<'p> FunctionTable<'p> {
    pub(crate) fn get(&self, name: Symbol) -> Option<&FunctionSignature<'p>> {
        self.by_name.get(&name).map(|&i| &self.in_order[i])
    }
}

pub(crate) fn collect_functions<'p>(program: &'p Program, handler: &Handler) -> FunctionTable<'p> {
    let mut table = FunctionTable {
        by_name: FxHashMap::default(),
        in_order: Vec::new(),
    };
    collect_in_block(&program.statements, &mut table, handler);
    table
}

fn collect_in_block<'p>(stmts: &'p [Stmt], table: &mut FunctionTable<'p>, handler: &Handler) {
    for stmt in stmts {
        match &stmt.kind {
            StmtKind::FunctionDecl(decl) => {
                if table.by_name.contains_key(&decl.name) {
                    DiagnosticBuilder::error(format!(
                        "Function '{}' is already declared",
                        decl.name.as_str()
                    ))
                    .code(DiagnosticCode::E_SEM_DUPLICATE_FN)
                    .span(stmt.span)
                    .emit(handler);
                } else {
                    let has_return = block_has_return(&decl.body);
                    table.by_name.insert(decl.name, table.in_order.len());
                    table.in_order.push(FunctionSignature { decl, has_return });
                }
                // A function's own body is resolved later, as its own
                // top-level compilation unit, not inline here.
            }
            StmtKind::If(if_stmt) => {
                collect_in_block(&if_stmt.then_branch, table, handler);
                for (_, body) in &if_stmt.elif_branches {
                    collect_in_block(body, table, handler);
                }
                if let Some(else_branch) = &if_stmt.else_branch {
                    collect_in_block(else_branch, table, handler);
                }
            }
            StmtKind::While { body, .. } => collect_in_block(body, table, handler),
            StmtKind::For(for_stmt) => collect_in_block(&for_stmt.body, table, handler),
            _ => {}
        }
    }
}

/// True if a `ret` is reachable anywhere in `stmts`, not descending into a
/// nested `func`'s own body (that's a different function's return).
fn block_has_return(stmts: &[Stmt]) -> bool {
    stmts.iter().any(|stmt| match &stmt.kind {
        StmtKind::Return(_) => true,
        StmtKind::If(if_stmt) => {
            block_has_return(&if_stmt.then_branch)
                || if_stmt
                    .elif_branches
                    .iter()
                    .any(|(_, body)| block_has_return(body))
                || if_stmt
                    .else_branch
                    .as_ref()
                    .is_some_and(|body| block_has_return(body))
        }
        StmtKind::While { body, .. } => block_has_return(body),
        StmtKind::For(for_stmt) => block_has_return(&for_stmt.body),
        _ => false,
    })
}
