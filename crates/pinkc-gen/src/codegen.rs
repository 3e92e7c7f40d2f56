//! Walks a [`pinkc_sem::ResolvedProgram`] and emits one [`wasm_encoder::Function`]
//! per Pinky function (plus `main`), implementing spec.md §4.3's statement
//! and expression compilation rules.

use pinkc_par::{BinOp, UnOp};
use pinkc_sem::{LocalIdx, RExpr, RStmt, ResolvedFunction};
use wasm_encoder::{BlockType, Function, Instruction, ValType};

use crate::layout::func_index;
use crate::strings::StringTable;

/// Every `for` loop needs four private `f64` locals (start/end/step/current)
/// that live alongside the `i32` locals pinkc-sem already allocated. Nested
/// loops can be simultaneously live (the outer loop's counter must survive
/// while an inner loop runs), so each `for` site gets its own block of four
/// rather than sharing one — assigned by a counting pre-pass that visits the
/// tree in the same order codegen does.
fn plan_for_loops(stmts: &[RStmt]) -> u32 {
    let mut count = 0;
    plan_block(stmts, &mut count);
    count
}

fn plan_block(stmts: &[RStmt], count: &mut u32) {
    for stmt in stmts {
        match stmt {
            RStmt::For { body, .. } => {
                *count += 1;
                plan_block(body, count);
            }
            RStmt::If {
                then_branch,
                elif_branches,
                else_branch,
                ..
            } => {
                plan_block(then_branch, count);
                for (_, body) in elif_branches {
                    plan_block(body, count);
                }
                if let Some(body) = else_branch {
                    plan_block(body, count);
                }
            }
            RStmt::While { body, .. } => plan_block(body, count),
            _ => {}
        }
    }
}

struct Codegen<'a> {
    strings: &'a StringTable,
    is_main: bool,
    /// wasm local index where this function's `for`-loop `f64` scratch
    /// region begins (after every `i32` local pinkc-sem allocated).
    f64_base: u32,
    next_for_slot: u32,
}

fn local_idx(idx: LocalIdx) -> u32 {
    idx.0
}

impl<'a> Codegen<'a> {
    fn compile_block(&mut self, f: &mut Function, stmts: &[RStmt]) {
        for stmt in stmts {
            self.compile_stmt(f, stmt);
        }
    }

    fn compile_stmt(&mut self, f: &mut Function, stmt: &RStmt) {
        match stmt {
            RStmt::Print(e) => {
                self.compile_expr(f, e);
                f.instruction(&Instruction::Call(func_index::PRINT));
            }
            RStmt::Println(e) => {
                self.compile_expr(f, e);
                f.instruction(&Instruction::Call(func_index::PRINTLN));
            }
            RStmt::SetLocal { slot, value } => {
                self.compile_expr(f, value);
                f.instruction(&Instruction::LocalSet(local_idx(*slot)));
            }
            RStmt::If {
                condition,
                then_branch,
                elif_branches,
                else_branch,
            } => {
                self.compile_expr(f, condition);
                f.instruction(&Instruction::Call(func_index::IS_TRUTHY));
                f.instruction(&Instruction::If(BlockType::Empty));
                self.compile_block(f, then_branch);
                f.instruction(&Instruction::Else);
                self.compile_elif_chain(f, elif_branches, else_branch);
                f.instruction(&Instruction::End);
            }
            RStmt::While { condition, body } => {
                f.instruction(&Instruction::Block(BlockType::Empty));
                f.instruction(&Instruction::Loop(BlockType::Empty));
                self.compile_expr(f, condition);
                f.instruction(&Instruction::Call(func_index::IS_TRUTHY));
                f.instruction(&Instruction::I32Eqz);
                f.instruction(&Instruction::BrIf(1));
                self.compile_block(f, body);
                f.instruction(&Instruction::Br(0));
                f.instruction(&Instruction::End);
                f.instruction(&Instruction::End);
            }
            RStmt::For {
                var,
                start,
                end,
                step,
                body,
                direction_scratch,
            } => self.compile_for(f, *var, start, end, step.as_ref(), body, *direction_scratch),
            RStmt::Return(e) => {
                self.compile_expr(f, e);
                if self.is_main {
                    // main's wasm signature never returns a value (spec.md's
                    // Open Question: a top-level `ret` traps instead).
                    f.instruction(&Instruction::Unreachable);
                } else {
                    f.instruction(&Instruction::Return);
                }
            }
            RStmt::ExpressionStmt(e) => {
                self.compile_expr(f, e);
                f.instruction(&Instruction::Drop);
            }
        }
    }

    fn compile_elif_chain(&mut self, f: &mut Function, elifs: &[(RExpr, Vec<RStmt>)], else_branch: &Option<Vec<RStmt>>) {
        match elifs.split_first() {
            Some(((cond, body), rest)) => {
                self.compile_expr(f, cond);
                f.instruction(&Instruction::Call(func_index::IS_TRUTHY));
                f.instruction(&Instruction::If(BlockType::Empty));
                self.compile_block(f, body);
                f.instruction(&Instruction::Else);
                self.compile_elif_chain(f, rest, else_branch);
                f.instruction(&Instruction::End);
            }
            None => {
                if let Some(body) = else_branch {
                    self.compile_block(f, body);
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn compile_for(
        &mut self,
        f: &mut Function,
        var: LocalIdx,
        start: &RExpr,
        end: &RExpr,
        step: Option<&RExpr>,
        body: &[RStmt],
        direction_scratch: LocalIdx,
    ) {
        let base = self.f64_base + self.next_for_slot * 4;
        self.next_for_slot += 1;
        let (start_l, end_l, step_l, cur_l) = (base, base + 1, base + 2, base + 3);

        self.compile_expr(f, start);
        f.instruction(&Instruction::Call(func_index::TO_NUMBER));
        f.instruction(&Instruction::LocalSet(start_l));

        self.compile_expr(f, end);
        f.instruction(&Instruction::Call(func_index::TO_NUMBER));
        f.instruction(&Instruction::LocalSet(end_l));

        match step {
            Some(step_expr) => {
                self.compile_expr(f, step_expr);
                f.instruction(&Instruction::Call(func_index::TO_NUMBER));
                f.instruction(&Instruction::LocalSet(step_l));
            }
            None => {
                f.instruction(&Instruction::F64Const(1.0));
                f.instruction(&Instruction::LocalSet(step_l));
            }
        }

        // direction_scratch = step < 0 ? -1 : 1, computed once. A step of
        // exactly 0 is ascending (per spec.md §9: not statically rejected,
        // and the ascending test `cur <= end` is what makes it loop forever
        // instead of exiting immediately).
        f.instruction(&Instruction::LocalGet(step_l));
        f.instruction(&Instruction::F64Const(0.0));
        f.instruction(&Instruction::F64Lt);
        f.instruction(&Instruction::If(BlockType::Result(ValType::I32)));
        f.instruction(&Instruction::I32Const(-1));
        f.instruction(&Instruction::Else);
        f.instruction(&Instruction::I32Const(1));
        f.instruction(&Instruction::End);
        f.instruction(&Instruction::LocalSet(local_idx(direction_scratch)));

        f.instruction(&Instruction::LocalGet(start_l));
        f.instruction(&Instruction::LocalSet(cur_l));

        f.instruction(&Instruction::Block(BlockType::Empty));
        f.instruction(&Instruction::Loop(BlockType::Empty));

        f.instruction(&Instruction::LocalGet(local_idx(direction_scratch)));
        f.instruction(&Instruction::I32Const(1));
        f.instruction(&Instruction::I32Eq);
        f.instruction(&Instruction::If(BlockType::Result(ValType::I32)));
        f.instruction(&Instruction::LocalGet(cur_l));
        f.instruction(&Instruction::LocalGet(end_l));
        f.instruction(&Instruction::F64Le);
        f.instruction(&Instruction::Else);
        f.instruction(&Instruction::LocalGet(cur_l));
        f.instruction(&Instruction::LocalGet(end_l));
        f.instruction(&Instruction::F64Ge);
        f.instruction(&Instruction::End);
        f.instruction(&Instruction::I32Eqz);
        f.instruction(&Instruction::BrIf(1));

        f.instruction(&Instruction::LocalGet(cur_l));
        f.instruction(&Instruction::Call(func_index::BOX_NUMBER));
        f.instruction(&Instruction::LocalSet(local_idx(var)));

        self.compile_block(f, body);

        f.instruction(&Instruction::LocalGet(cur_l));
        f.instruction(&Instruction::LocalGet(step_l));
        f.instruction(&Instruction::F64Add);
        f.instruction(&Instruction::LocalSet(cur_l));

        f.instruction(&Instruction::Br(0));
        f.instruction(&Instruction::End);
        f.instruction(&Instruction::End);
    }

    fn compile_expr(&mut self, f: &mut Function, expr: &RExpr) {
        match expr {
            RExpr::NumberLiteral(n) => {
                f.instruction(&Instruction::F64Const(*n));
                f.instruction(&Instruction::Call(func_index::BOX_NUMBER));
            }
            RExpr::StringLiteral(sym) => {
                let (offset, len) = self
                    .strings
                    .offset_of(*sym)
                    .expect("every string literal was collected before codegen ran");
                f.instruction(&Instruction::I32Const(offset as i32));
                f.instruction(&Instruction::I32Const(len as i32));
                f.instruction(&Instruction::Call(func_index::BOX_STRING));
            }
            RExpr::BooleanLiteral(b) => {
                f.instruction(&Instruction::I32Const(if *b { 1 } else { 0 }));
                f.instruction(&Instruction::Call(func_index::BOX_BOOL));
            }
            RExpr::Local(slot) => {
                f.instruction(&Instruction::LocalGet(local_idx(*slot)));
            }
            RExpr::Unary(op, operand) => self.compile_unary(f, *op, operand),
            RExpr::Binary(op, left, right) => self.compile_binary(f, *op, left, right),
            RExpr::ShortCircuit {
                is_and,
                left,
                right,
                scratch,
            } => self.compile_short_circuit(f, *is_and, left, right, *scratch),
            RExpr::Call { func, args } => {
                for arg in args {
                    self.compile_expr(f, arg);
                }
                f.instruction(&Instruction::Call(func_index::FIRST_USER_FUNC + func.0));
            }
        }
    }

    fn compile_unary(&mut self, f: &mut Function, op: UnOp, operand: &RExpr) {
        match op {
            UnOp::Plus => self.compile_expr(f, operand),
            UnOp::Neg => {
                // Constant-fold a literal negation into a single boxed
                // store instead of unbox-negate-rebox.
                if let RExpr::NumberLiteral(n) = operand {
                    f.instruction(&Instruction::F64Const(-n));
                    f.instruction(&Instruction::Call(func_index::BOX_NUMBER));
                } else {
                    self.compile_expr(f, operand);
                    f.instruction(&Instruction::Call(func_index::TO_NUMBER));
                    f.instruction(&Instruction::F64Neg);
                    f.instruction(&Instruction::Call(func_index::BOX_NUMBER));
                }
            }
            UnOp::Not => {
                self.compile_expr(f, operand);
                f.instruction(&Instruction::Call(func_index::IS_TRUTHY));
                f.instruction(&Instruction::I32Eqz);
                f.instruction(&Instruction::Call(func_index::BOX_BOOL));
            }
        }
    }

    fn compile_binary(&mut self, f: &mut Function, op: BinOp, left: &RExpr, right: &RExpr) {
        match op {
            BinOp::Add => {
                self.compile_expr(f, left);
                self.compile_expr(f, right);
                f.instruction(&Instruction::Call(func_index::ADD_VALUES));
            }
            BinOp::Mod => self.numeric_binary(f, left, right, &[Instruction::Call(func_index::MOD_HELPER)]),
            BinOp::Pow => self.numeric_binary(f, left, right, &[Instruction::Call(func_index::POW_HELPER)]),
            BinOp::Sub => self.numeric_binary(f, left, right, &[Instruction::F64Sub]),
            BinOp::Mul => self.numeric_binary(f, left, right, &[Instruction::F64Mul]),
            BinOp::Div => self.numeric_binary(f, left, right, &[Instruction::F64Div]),
            BinOp::Eq => self.comparison(f, left, right, Instruction::F64Eq),
            BinOp::NotEq => self.comparison(f, left, right, Instruction::F64Ne),
            BinOp::Lt => self.comparison(f, left, right, Instruction::F64Lt),
            BinOp::Gt => self.comparison(f, left, right, Instruction::F64Gt),
            BinOp::Le => self.comparison(f, left, right, Instruction::F64Le),
            BinOp::Ge => self.comparison(f, left, right, Instruction::F64Ge),
            // Lowered to RExpr::ShortCircuit by pinkc-sem; never reach here.
            BinOp::And | BinOp::Or => unreachable!("and/or are lowered to ShortCircuit before codegen"),
        }
    }

    /// Unboxes both operands, applies `ops` (producing an `f64`), boxes as a
    /// number.
    fn numeric_binary(&mut self, f: &mut Function, left: &RExpr, right: &RExpr, ops: &[Instruction]) {
        self.compile_expr(f, left);
        f.instruction(&Instruction::Call(func_index::TO_NUMBER));
        self.compile_expr(f, right);
        f.instruction(&Instruction::Call(func_index::TO_NUMBER));
        for op in ops {
            f.instruction(op);
        }
        f.instruction(&Instruction::Call(func_index::BOX_NUMBER));
    }

    /// Unboxes both operands, compares as `f64` with `op`, boxes as a bool.
    fn comparison(&mut self, f: &mut Function, left: &RExpr, right: &RExpr, op: Instruction) {
        self.compile_expr(f, left);
        f.instruction(&Instruction::Call(func_index::TO_NUMBER));
        self.compile_expr(f, right);
        f.instruction(&Instruction::Call(func_index::TO_NUMBER));
        f.instruction(&op);
        f.instruction(&Instruction::Call(func_index::BOX_BOOL));
    }

    fn compile_short_circuit(&mut self, f: &mut Function, is_and: bool, left: &RExpr, right: &RExpr, scratch: LocalIdx) {
        self.compile_expr(f, left);
        f.instruction(&Instruction::LocalTee(local_idx(scratch)));
        f.instruction(&Instruction::Call(func_index::IS_TRUTHY));
        if is_and {
            f.instruction(&Instruction::I32Eqz);
        }
        f.instruction(&Instruction::If(BlockType::Result(ValType::I32)));
        f.instruction(&Instruction::LocalGet(local_idx(scratch)));
        f.instruction(&Instruction::Else);
        self.compile_expr(f, right);
        f.instruction(&Instruction::End);
    }
}

/// Compiles `main`'s body. `main` never formally returns a value even if it
/// contains `ret` statements — a top-level `ret` traps (unreachable)
/// instead, per the fractional-`ret`-outside-function open question.
pub fn compile_main(main: &ResolvedFunction, strings: &StringTable) -> Function {
    compile_function_body(main, strings, true, 0)
}

/// Compiles one user-declared function's body.
pub fn compile_function(func: &ResolvedFunction, strings: &StringTable) -> Function {
    compile_function_body(func, strings, false, func.params.len() as u32)
}

fn compile_function_body(func: &ResolvedFunction, strings: &StringTable, is_main: bool, param_count: u32) -> Function {
    let extra_i32_locals = func.local_count.saturating_sub(param_count);
    let for_loop_count = plan_for_loops(&func.body);

    let mut locals = Vec::new();
    if extra_i32_locals > 0 {
        locals.push((extra_i32_locals, ValType::I32));
    }
    if for_loop_count > 0 {
        locals.push((for_loop_count * 4, ValType::F64));
    }

    let f64_base = param_count + extra_i32_locals;
    let mut f = Function::new(locals);
    let mut ctx = Codegen {
        strings,
        is_main,
        f64_base,
        next_for_slot: 0,
    };
    ctx.compile_block(&mut f, &func.body);

    // main's body may fall through without an explicit `ret`; user
    // functions with `has_return` must trap if control reaches the end
    // without one, since every path in a value-returning function is
    // assumed (by pinkc-sem's arity/return contract) to hit a `ret`.
    if !is_main && func.has_return {
        f.instruction(&Instruction::Unreachable);
    }
    f.instruction(&Instruction::End);
    f
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinkc_util::{FileId, Handler};

    fn compile_source(source: &str) -> (Function, Vec<Function>, StringTable) {
        let handler = Handler::new();
        let tokens = pinkc_lex::tokenize(source, FileId::DUMMY, &handler);
        let program = pinkc_par::parse(tokens, &handler);
        let resolved = pinkc_sem::resolve(&program, &handler).expect("fixture should resolve cleanly");

        let mut strings = StringTable::new();
        strings.collect(&resolved);

        let main = compile_main(&resolved.main, &strings);
        let functions = resolved.functions.iter().map(|f| compile_function(f, &strings)).collect();
        (main, functions, strings)
    }

    #[test]
    fn simple_arithmetic_program_compiles() {
        let (_main, funcs, _strings) = compile_source("print 5 + 3\nprintln 10 - 2");
        assert!(funcs.is_empty());
    }

    #[test]
    fn string_concat_program_compiles_and_interns_once() {
        let (_main, _funcs, strings) = compile_source("println \"hi\" + \"hi\"");
        // Both occurrences of "hi" should share one data-segment slot.
        assert_eq!(strings.data_segment(), b"hi\0");
    }

    #[test]
    fn function_with_recursive_call_compiles() {
        let (_main, funcs, _strings) = compile_source(
            "func fact(n) if n <= 1 then ret 1 else ret n * fact(n - 1) end end\nprintln fact(5)",
        );
        assert_eq!(funcs.len(), 1);
    }

    #[test]
    fn nested_for_loops_compile() {
        let (_main, _funcs, _strings) =
            compile_source("for i := 1, 3 do\n  for j := 1, 2 do\n    print i\n  end\nend");
    }

    #[test]
    fn for_loop_with_short_circuit_in_body_compiles() {
        // The direction flag must survive an `and`/`or` in the body writing
        // to its own scratch slot every iteration (pinkc-sem gives the two
        // distinct slots; this just checks codegen still produces a
        // function for it).
        let (_main, _funcs, _strings) = compile_source("for i := 1, 3 do print true and i end");
    }
}
