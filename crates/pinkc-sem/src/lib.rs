//! pinkc-sem - Name Resolution
//!
//! Sits between parsing and code generation: walks a [`pinkc_par::Program`],
//! builds the flat function table (with forward-reference and mutual
//! recursion support), assigns every local variable a slot, and checks the
//! semantic invariants spec.md §7 calls "compile errors" — undefined
//! variable, undefined function, arity mismatch, duplicate local, duplicate
//! function. The output is a [`ir::ResolvedProgram`] that `pinkc-gen` can
//! walk without doing any name lookups of its own.

mod functions;
mod ir;
mod resolve;
mod scope;

pub use ir::{FuncIdx, LocalIdx, RExpr, RStmt, ResolvedFunction, ResolvedProgram};

use pinkc_par::Program;
use pinkc_util::{Handler, IndexVec, Symbol};
use rustc_hash::FxHashMap;

/// Resolve `program` against `handler`. Returns `None` if any semantic error
/// was reported — callers should not hand a `None` result to `pinkc-gen`.
pub fn resolve(program: &Program, handler: &Handler) -> Option<ResolvedProgram> {
    let functions = functions::collect_functions(program, handler);

    let mut func_indices: FxHashMap<Symbol, FuncIdx> = FxHashMap::default();
    for (i, sig) in functions.in_order.iter().enumerate() {
        func_indices.insert(sig.decl.name, FuncIdx(i as u32));
    }

    let main = resolve::resolve_main(program, &functions, &func_indices, handler);

    let mut resolved_functions = IndexVec::new();
    for sig in &functions.in_order {
        let resolved = resolve::resolve_function(sig.decl, sig.has_return, &functions, &func_indices, handler);
        resolved_functions.push(resolved);
    }

    if handler.has_errors() {
        return None;
    }

    Some(ResolvedProgram {
        main,
        functions: resolved_functions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinkc_lex::tokenize;
    use pinkc_util::FileId;

    fn resolve_source(source: &str) -> (Option<ResolvedProgram>, bool) {
        let handler = Handler::new();
        let tokens = tokenize(source, FileId::DUMMY, &handler);
        let program = pinkc_par::parse(tokens, &handler);
        let resolved = resolve(&program, &handler);
        (resolved, handler.has_errors())
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let (resolved, errored) = resolve_source("println x");
        assert!(errored);
        assert!(resolved.is_none());
    }

    #[test]
    fn local_then_read_resolves() {
        let (resolved, errored) = resolve_source("local x := 1\nprintln x");
        assert!(!errored);
        assert!(resolved.unwrap().main.local_count >= 1);
    }

    #[test]
    fn duplicate_local_in_same_frame_is_an_error() {
        let (_, errored) = resolve_source("local x := 1\nlocal x := 2");
        assert!(errored);
    }

    #[test]
    fn mutually_recursive_functions_resolve() {
        let source = "func is_even(n) if n == 0 then ret true else ret is_odd(n - 1) end end\n\
                       func is_odd(n) if n == 0 then ret false else ret is_even(n - 1) end end\n\
                       println is_even(4)";
        let (resolved, errored) = resolve_source(source);
        assert!(!errored);
        assert_eq!(resolved.unwrap().functions.len(), 2);
    }

    #[test]
    fn arity_mismatch_is_an_error() {
        let (_, errored) = resolve_source("func add(a, b) ret a + b end\nprintln add(1)");
        assert!(errored);
    }

    #[test]
    fn undefined_function_is_an_error() {
        let (_, errored) = resolve_source("println nope(1)");
        assert!(errored);
    }

    #[test]
    fn duplicate_function_name_is_an_error() {
        let (_, errored) = resolve_source("func f() ret 1 end\nfunc f() ret 2 end");
        assert!(errored);
    }

    #[test]
    fn for_loop_variable_shadows_and_is_restored() {
        let source = "local i := 99\nfor i := 1, 3 do print i end\nprintln i";
        let (resolved, errored) = resolve_source(source);
        assert!(!errored);
        assert!(resolved.is_some());
    }

    #[test]
    fn function_sees_no_caller_locals() {
        let (_, errored) = resolve_source("local x := 1\nfunc f() ret x end\nprintln f()");
        assert!(errored);
    }

    #[test]
    fn for_loop_direction_scratch_is_not_the_short_circuit_scratch() {
        // A short-circuit in the loop body writes to its scratch slot on
        // every iteration; if it aliased the loop's direction slot, the
        // second iteration's direction test would read garbage.
        let source = "for i := 1, 3 do print true and i end";
        let (resolved, errored) = resolve_source(source);
        assert!(!errored);
        let main = resolved.unwrap().main;
        let RStmt::For {
            direction_scratch,
            body,
            ..
        } = &main.body[0]
        else {
            panic!("expected a for loop");
        };
        let RStmt::Print(RExpr::ShortCircuit { scratch, .. }) = &body[0] else {
            panic!("expected a short-circuit print");
        };
        assert_ne!(direction_scratch, scratch, "for-loop direction must not alias the short-circuit scratch");
    }
}
