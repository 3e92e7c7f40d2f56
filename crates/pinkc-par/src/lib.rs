//! pinkc-par - Recursive-Descent Parser
//!
//! Turns a [`pinkc_lex`] token stream into a [`ast::Program`]. The grammar is
//! written as one function per precedence level (see [`expr`]) rather than a
//! binding-power table, and statement parsing (see [`stmt`]) never attempts
//! error recovery beyond guaranteeing forward progress: the first diagnostic
//! reported stops the parse after the enclosing statement, and the caller
//! gets back whatever prefix of the program was already built.

pub mod ast;
mod expr;
mod parser;
mod stmt;

pub use ast::{BinOp, Expr, ExprKind, ForStmt, FunctionDecl, IfStmt, Program, Stmt, StmtKind, UnOp};
pub use parser::Parser;

use pinkc_lex::Token;
use pinkc_util::Handler;

/// Parse a complete token stream into a [`Program`]. Errors are recorded on
/// `handler`; on the first one, `Program.statements` holds everything parsed
/// up to and including the statement that failed.
pub fn parse(tokens: Vec<Token>, handler: &Handler) -> Program {
    Parser::new(tokens, handler).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinkc_lex::tokenize;
    use pinkc_util::FileId;

    #[test]
    fn end_to_end_factorial_parses_without_errors() {
        let source = "func fact(n) if n <= 1 then ret 1 else ret n * fact(n-1) end end\nprintln fact(5)";
        let handler = Handler::new();
        let tokens = tokenize(source, FileId::DUMMY, &handler);
        let program = parse(tokens, &handler);
        assert!(!handler.has_errors());
        assert_eq!(program.statements.len(), 2);
    }
}
