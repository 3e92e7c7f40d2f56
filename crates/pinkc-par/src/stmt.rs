//! Statement parsing.
//!
//! ```text
//! statement ::= 'print' expr
//!             | 'println' expr
//!             | 'if' expr 'then' block ('elif' expr 'then' block)* ('else' block)? 'end'
//!             | 'while' expr 'do' block 'end'
//!             | 'for' ident ':=' expr ',' expr (',' expr)? 'do' block 'end'
//!             | 'func' ident '(' (ident (',' ident)*)? ')' block 'end'
//!             | 'ret' expr
//!             | 'local' ident ':=' expr
//!             | ident ':=' expr
//!             | expr
//! ```
//!
//! Comment tokens are skipped between statements, never inside one.

use pinkc_lex::TokenKind;
use pinkc_util::diagnostic::DiagnosticCode;

use crate::ast::{ForStmt, FunctionDecl, IfStmt, Program, Stmt, StmtKind};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        loop {
            self.skip_comments();
            if self.is_at_end() {
                break;
            }
            let stmt = self.parse_statement();
            statements.push(stmt);
            if self.handler.has_errors() {
                break;
            }
        }
        Program { statements }
    }

    pub(crate) fn parse_statement(&mut self) -> Stmt {
        match self.current().kind {
            TokenKind::Print => self.parse_print(false),
            TokenKind::Println => self.parse_print(true),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Func => self.parse_func_decl(),
            TokenKind::Ret => self.parse_return(),
            TokenKind::Local => self.parse_local_assign(),
            TokenKind::Ident(_) if self.peek_is(1, &TokenKind::Assign) => self.parse_assign(),
            _ => {
                let expr = self.parse_expr();
                Stmt {
                    span: expr.span,
                    kind: StmtKind::ExpressionStmt(expr),
                }
            }
        }
    }

    /// Parses statements up to (not including) a token matching one of
    /// `terminators`, recovering from a ragged EOF by reporting it once and
    /// stopping rather than looping forever.
    fn parse_block_until(&mut self, terminators: &[TokenKind]) -> Vec<Stmt> {
        let mut statements = Vec::new();
        loop {
            self.skip_comments();
            if self.is_at_end() {
                let tok = self.current();
                self.error(
                    DiagnosticCode::E_PARSE_UNEXPECTED_EOF,
                    "Unexpected end of input inside a block",
                    tok.span,
                );
                break;
            }
            if terminators.iter().any(|t| self.check(t)) {
                break;
            }
            statements.push(self.parse_statement());
            if self.handler.has_errors() {
                break;
            }
        }
        statements
    }

    fn parse_print(&mut self, is_println: bool) -> Stmt {
        let kw = self.advance();
        let value = self.parse_expr();
        let span = kw.span.to(value.span);
        let kind = if is_println {
            StmtKind::Println(value)
        } else {
            StmtKind::Print(value)
        };
        Stmt { kind, span }
    }

    fn parse_if(&mut self) -> Stmt {
        let if_kw = self.advance();
        let condition = self.parse_expr();
        self.expect(TokenKind::Then, "'then'");
        let then_branch = self.parse_block_until(&[TokenKind::Elif, TokenKind::Else, TokenKind::End]);

        let mut elif_branches = Vec::new();
        while self.check(&TokenKind::Elif) {
            self.advance();
            let elif_cond = self.parse_expr();
            self.expect(TokenKind::Then, "'then'");
            let elif_body = self.parse_block_until(&[TokenKind::Elif, TokenKind::Else, TokenKind::End]);
            elif_branches.push((elif_cond, elif_body));
        }

        let else_branch = if self.check(&TokenKind::Else) {
            self.advance();
            Some(self.parse_block_until(&[TokenKind::End]))
        } else {
            None
        };

        let end_kw = self.expect(TokenKind::End, "'end'");
        Stmt {
            span: if_kw.span.to(end_kw.span),
            kind: StmtKind::If(IfStmt {
                condition,
                then_branch,
                elif_branches,
                else_branch,
            }),
        }
    }

    fn parse_while(&mut self) -> Stmt {
        let while_kw = self.advance();
        let condition = self.parse_expr();
        self.expect(TokenKind::Do, "'do'");
        let body = self.parse_block_until(&[TokenKind::End]);
        let end_kw = self.expect(TokenKind::End, "'end'");
        Stmt {
            span: while_kw.span.to(end_kw.span),
            kind: StmtKind::While { condition, body },
        }
    }

    fn parse_for(&mut self) -> Stmt {
        let for_kw = self.advance();
        let var = self.expect_ident("after 'for'");
        self.expect(TokenKind::Assign, "':='");
        let start = self.parse_expr();
        self.expect(TokenKind::Comma, "','");
        let end = self.parse_expr();
        let step = if self.check(&TokenKind::Comma) {
            self.advance();
            Some(self.parse_expr())
        } else {
            None
        };
        self.expect(TokenKind::Do, "'do'");
        let body = self.parse_block_until(&[TokenKind::End]);
        let end_kw = self.expect(TokenKind::End, "'end'");
        Stmt {
            span: for_kw.span.to(end_kw.span),
            kind: StmtKind::For(ForStmt {
                var,
                start,
                end,
                step,
                body,
            }),
        }
    }

    fn parse_func_decl(&mut self) -> Stmt {
        let func_kw = self.advance();
        let name = self.expect_ident("after 'func'");
        self.expect(TokenKind::LParen, "'('");
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            params.push(self.expect_ident("as a parameter name"));
            while self.check(&TokenKind::Comma) {
                self.advance();
                params.push(self.expect_ident("as a parameter name"));
            }
        }
        self.expect(TokenKind::RParen, "')'");
        let body = self.parse_block_until(&[TokenKind::End]);
        let end_kw = self.expect(TokenKind::End, "'end'");
        Stmt {
            span: func_kw.span.to(end_kw.span),
            kind: StmtKind::FunctionDecl(FunctionDecl { name, params, body }),
        }
    }

    fn parse_return(&mut self) -> Stmt {
        let ret_kw = self.advance();
        let value = self.parse_expr();
        let span = ret_kw.span.to(value.span);
        Stmt {
            span,
            kind: StmtKind::Return(value),
        }
    }

    fn parse_local_assign(&mut self) -> Stmt {
        let local_kw = self.advance();
        let name = self.expect_ident("after 'local'");
        self.expect(TokenKind::Assign, "':='");
        let value = self.parse_expr();
        let span = local_kw.span.to(value.span);
        Stmt {
            span,
            kind: StmtKind::LocalAssign { name, value },
        }
    }

    /// Only reached when the caller already confirmed `ident ':='` is ahead.
    fn parse_assign(&mut self) -> Stmt {
        let name_tok = self.advance();
        let name = match name_tok.kind {
            TokenKind::Ident(sym) => sym,
            _ => unreachable!("parse_assign is only called after peeking an Ident"),
        };
        self.expect(TokenKind::Assign, "':='");
        let value = self.parse_expr();
        let span = name_tok.span.to(value.span);
        Stmt {
            span,
            kind: StmtKind::Assign { name, value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinkc_lex::tokenize;
    use pinkc_util::{FileId, Handler};

    fn parse(source: &str) -> (Program, bool) {
        let handler = Handler::new();
        let tokens = tokenize(source, FileId::DUMMY, &handler);
        let mut parser = Parser::new(tokens, &handler);
        let program = parser.parse_program();
        (program, handler.has_errors())
    }

    #[test]
    fn print_and_println() {
        let (program, errored) = parse("print 1\nprintln 2");
        assert!(!errored);
        assert_eq!(program.statements.len(), 2);
        assert!(matches!(program.statements[0].kind, StmtKind::Print(_)));
        assert!(matches!(program.statements[1].kind, StmtKind::Println(_)));
    }

    #[test]
    fn if_elif_else_end() {
        let (program, errored) = parse("if x then print 1 elif y then print 2 else print 3 end");
        assert!(!errored);
        match &program.statements[0].kind {
            StmtKind::If(if_stmt) => {
                assert_eq!(if_stmt.elif_branches.len(), 1);
                assert!(if_stmt.else_branch.is_some());
            }
            _ => panic!("expected an if statement"),
        }
    }

    #[test]
    fn for_loop_with_optional_step() {
        let (program, errored) = parse("for i := 1, 10, 2 do print i end");
        assert!(!errored);
        match &program.statements[0].kind {
            StmtKind::For(for_stmt) => assert!(for_stmt.step.is_some()),
            _ => panic!("expected a for statement"),
        }
    }

    #[test]
    fn function_decl_with_params_and_return() {
        let (program, errored) = parse("func add(a, b) ret a + b end");
        assert!(!errored);
        match &program.statements[0].kind {
            StmtKind::FunctionDecl(decl) => assert_eq!(decl.params.len(), 2),
            _ => panic!("expected a function declaration"),
        }
    }

    #[test]
    fn local_then_reassign() {
        let (program, errored) = parse("local x := 1\nx := 2");
        assert!(!errored);
        assert!(matches!(program.statements[0].kind, StmtKind::LocalAssign { .. }));
        assert!(matches!(program.statements[1].kind, StmtKind::Assign { .. }));
    }

    #[test]
    fn comments_between_statements_are_skipped() {
        let (program, errored) = parse("print 1 -- a note\nprint 2");
        assert!(!errored);
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn unterminated_block_reports_unexpected_eof() {
        let (_, errored) = parse("if x then print 1");
        assert!(errored);
    }

    #[test]
    fn partial_program_is_retained_after_an_error() {
        let (program, errored) = parse("print 1\nif\n");
        assert!(errored);
        assert_eq!(program.statements.len(), 2);
        assert!(matches!(program.statements[0].kind, StmtKind::Print(_)));
    }
}
