//! Resolves a single function body (or the implicit top-level `main` body)
//! against an already-built [`FunctionTable`], producing [`RStmt`]/[`RExpr`]
//! trees with every name replaced by a slot or function index.

use rustc_hash::FxHashMap;

use pinkc_par::{BinOp, Expr, ExprKind, FunctionDecl, Stmt, StmtKind};
use pinkc_util::diagnostic::{DiagnosticBuilder, DiagnosticCode};
use pinkc_util::{Handler, Symbol};

use crate::functions::FunctionTable;
use crate::ir::{FuncIdx, RExpr, RStmt, ResolvedFunction};
use crate::scope::Scope;

pub(crate) struct BodyResolver<'a, 'p> {
    handler: &'a Handler,
    functions: &'a FunctionTable<'p>,
    func_indices: &'a FxHashMap<Symbol, FuncIdx>,
    scope: Scope,
    scratch: Option<crate::ir::LocalIdx>,
}

impl<'a, 'p> BodyResolver<'a, 'p> {
    fn new(
        handler: &'a Handler,
        functions: &'a FunctionTable<'p>,
        func_indices: &'a FxHashMap<Symbol, FuncIdx>,
    ) -> Self {
        Self {
            handler,
            functions,
            func_indices,
            scope: Scope::new(),
            scratch: None,
        }
    }

    fn scratch_slot(&mut self) -> crate::ir::LocalIdx {
        match self.scratch {
            Some(slot) => slot,
            None => {
                let slot = self.scope.fresh_slot();
                self.scratch = Some(slot);
                slot
            }
        }
    }

    fn resolve_block(&mut self, stmts: &[Stmt]) -> Vec<RStmt> {
        stmts.iter().filter_map(|s| self.resolve_stmt(s)).collect()
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) -> Option<RStmt> {
        match &stmt.kind {
            StmtKind::Print(e) => Some(RStmt::Print(self.resolve_expr(e))),
            StmtKind::Println(e) => Some(RStmt::Println(self.resolve_expr(e))),
            StmtKind::LocalAssign { name, value } => {
                let value = self.resolve_expr(value);
                if self.scope.declared_in_current_frame(*name) {
                    DiagnosticBuilder::error(format!(
                        "'{}' is already declared as a local in this scope",
                        name.as_str()
                    ))
                    .code(DiagnosticCode::E_SEM_DUPLICATE_LOCAL)
                    .span(stmt.span)
                    .emit(self.handler);
                }
                let slot = self.scope.declare(*name);
                Some(RStmt::SetLocal { slot, value })
            }
            StmtKind::Assign { name, value } => {
                let value = self.resolve_expr(value);
                let slot = self.scope.assign_or_declare(*name);
                Some(RStmt::SetLocal { slot, value })
            }
            StmtKind::If(if_stmt) => {
                let condition = self.resolve_expr(&if_stmt.condition);
                let then_branch = self.resolve_block(&if_stmt.then_branch);
                let elif_branches = if_stmt
                    .elif_branches
                    .iter()
                    .map(|(cond, body)| (self.resolve_expr(cond), self.resolve_block(body)))
                    .collect();
                let else_branch = if_stmt.else_branch.as_ref().map(|body| self.resolve_block(body));
                Some(RStmt::If {
                    condition,
                    then_branch,
                    elif_branches,
                    else_branch,
                })
            }
            StmtKind::While { condition, body } => {
                let condition = self.resolve_expr(condition);
                let body = self.resolve_block(body);
                Some(RStmt::While { condition, body })
            }
            StmtKind::For(for_stmt) => {
                let start = self.resolve_expr(&for_stmt.start);
                let end = self.resolve_expr(&for_stmt.end);
                let step = for_stmt.step.as_ref().map(|e| self.resolve_expr(e));
                self.scope.push_frame();
                let var = self.scope.declare(for_stmt.var);
                // A dedicated slot, not the memoized short-circuit `scratch`:
                // the direction flag stays live for the whole loop, so it
                // can't share a slot that an `and`/`or` in the body also
                // writes to mid-iteration. Each `for` gets its own fresh
                // slot (nested loops are simultaneously live too).
                let direction_scratch = self.scope.fresh_slot();
                let body = self.resolve_block(&for_stmt.body);
                self.scope.pop_frame();
                Some(RStmt::For {
                    var,
                    start,
                    end,
                    step,
                    body,
                    direction_scratch,
                })
            }
            // Already hoisted into the flat function table; nothing to
            // emit at the point it's written.
            StmtKind::FunctionDecl(_) => None,
            StmtKind::Return(e) => Some(RStmt::Return(self.resolve_expr(e))),
            StmtKind::ExpressionStmt(e) => Some(RStmt::ExpressionStmt(self.resolve_expr(e))),
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) -> RExpr {
        match &expr.kind {
            ExprKind::NumberLiteral(n) => RExpr::NumberLiteral(*n),
            ExprKind::StringLiteral(s) => RExpr::StringLiteral(*s),
            ExprKind::BooleanLiteral(b) => RExpr::BooleanLiteral(*b),
            ExprKind::Grouping(inner) => self.resolve_expr(inner),
            ExprKind::Identifier(name) => match self.scope.lookup(*name) {
                Some(slot) => RExpr::Local(slot),
                None => {
                    DiagnosticBuilder::error(format!("Undefined variable '{}'", name.as_str()))
                        .code(DiagnosticCode::E_SEM_UNDEFINED_VAR)
                        .span(expr.span)
                        .emit(self.handler);
                    RExpr::NumberLiteral(0.0)
                }
            },
            ExprKind::Unary(op, operand) => RExpr::Unary(*op, Box::new(self.resolve_expr(operand))),
            ExprKind::Binary(BinOp::And, left, right) => self.resolve_short_circuit(true, left, right),
            ExprKind::Binary(BinOp::Or, left, right) => self.resolve_short_circuit(false, left, right),
            ExprKind::Binary(op, left, right) => {
                RExpr::Binary(*op, Box::new(self.resolve_expr(left)), Box::new(self.resolve_expr(right)))
            }
            ExprKind::FunctionCall { name, args } => self.resolve_call(*name, args, expr.span),
        }
    }

    fn resolve_short_circuit(&mut self, is_and: bool, left: &Expr, right: &Expr) -> RExpr {
        let left = self.resolve_expr(left);
        let right = self.resolve_expr(right);
        let scratch = self.scratch_slot();
        RExpr::ShortCircuit {
            is_and,
            left: Box::new(left),
            right: Box::new(right),
            scratch,
        }
    }

    fn resolve_call(&mut self, name: Symbol, args: &[Expr], span: pinkc_util::Span) -> RExpr {
        let resolved_args: Vec<RExpr> = args.iter().map(|a| self.resolve_expr(a)).collect();
        match self.functions.get(name) {
            None => {
                DiagnosticBuilder::error(format!("Undefined function '{}'", name.as_str()))
                    .code(DiagnosticCode::E_SEM_UNDEFINED_FN)
                    .span(span)
                    .emit(self.handler);
                RExpr::NumberLiteral(0.0)
            }
            Some(sig) => {
                if sig.decl.params.len() != resolved_args.len() {
                    DiagnosticBuilder::error(format!(
                        "Function '{}' expects {} argument(s), found {}",
                        name.as_str(),
                        sig.decl.params.len(),
                        resolved_args.len()
                    ))
                    .code(DiagnosticCode::E_SEM_ARITY_MISMATCH)
                    .span(span)
                    .emit(self.handler);
                }
                let func = *self
                    .func_indices
                    .get(&name)
                    .expect("every registered function has an assigned FuncIdx");
                RExpr::Call {
                    func,
                    args: resolved_args,
                }
            }
        }
    }
}

/// Resolves the implicit top-level program body as the `main` function.
pub(crate) fn resolve_main(
    program: &pinkc_par::Program,
    functions: &FunctionTable<'_>,
    func_indices: &FxHashMap<Symbol, FuncIdx>,
    handler: &Handler,
) -> ResolvedFunction {
    let mut resolver = BodyResolver::new(handler, functions, func_indices);
    let body = resolver.resolve_block(&program.statements);
    ResolvedFunction {
        name: None,
        params: Vec::new(),
        local_count: resolver.scope.local_count(),
        has_return: false,
        body,
    }
}

/// Resolves one user-declared `func`'s body in a fresh scope seeded with its
/// parameters — it never sees the caller's locals.
pub(crate) fn resolve_function(
    decl: &FunctionDecl,
    has_return: bool,
    functions: &FunctionTable<'_>,
    func_indices: &FxHashMap<Symbol, FuncIdx>,
    handler: &Handler,
) -> ResolvedFunction {
    let mut resolver = BodyResolver::new(handler, functions, func_indices);
    let params = decl.params.iter().map(|&p| resolver.scope.declare(p)).collect();
    let body = resolver.resolve_block(&decl.body);
    ResolvedFunction {
        name: Some(decl.name),
        params,
        local_count: resolver.scope.local_count(),
        has_return,
        body,
    }
}
