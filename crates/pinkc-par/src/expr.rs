//! Expression parsing.
//!
//! Pinky's grammar spells out one function per precedence level rather than
//! a generic binding-power table, because two levels don't fit a uniform
//! table: `%` is non-associative (a bare single application; `a % b % c` is
//! a syntax error, not a parse-time choice between left- and
//! right-associativity) and `^` takes a `primary`, not a `unary`, on its
//! right-hand side.
//!
//! ```text
//! or_expr   ::= and_expr ('or' and_expr)*
//! and_expr  ::= eq_expr ('and' eq_expr)*
//! eq_expr   ::= cmp_expr (('==' | '~=') cmp_expr)*
//! cmp_expr  ::= add_expr (('<' | '>' | '<=' | '>=') add_expr)*
//! add_expr  ::= mul_expr (('+' | '-') mul_expr)*
//! mul_expr  ::= mod_expr (('*' | '/') mod_expr)*
//! mod_expr  ::= unary ('%' unary)?
//! unary     ::= ('+' | '-' | '~') unary | pow_expr
//! pow_expr  ::= primary ('^' primary)*
//! ```

use pinkc_lex::TokenKind;

use crate::ast::{BinOp, Expr, ExprKind, UnOp};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub fn parse_expr(&mut self) -> Expr {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Expr {
        let mut left = self.parse_and();
        while self.check(&TokenKind::Or) {
            self.advance();
            let right = self.parse_and();
            left = binary(BinOp::Or, left, right);
        }
        left
    }

    fn parse_and(&mut self) -> Expr {
        let mut left = self.parse_eq();
        while self.check(&TokenKind::And) {
            self.advance();
            let right = self.parse_eq();
            left = binary(BinOp::And, left, right);
        }
        left
    }

    fn parse_eq(&mut self) -> Expr {
        let mut left = self.parse_cmp();
        loop {
            let op = if self.check(&TokenKind::EqEq) {
                BinOp::Eq
            } else if self.check(&TokenKind::TildeEq) {
                BinOp::NotEq
            } else {
                break;
            };
            self.advance();
            let right = self.parse_cmp();
            left = binary(op, left, right);
        }
        left
    }

    fn parse_cmp(&mut self) -> Expr {
        let mut left = self.parse_add();
        loop {
            let op = if self.check(&TokenKind::Lt) {
                BinOp::Lt
            } else if self.check(&TokenKind::Gt) {
                BinOp::Gt
            } else if self.check(&TokenKind::Le) {
                BinOp::Le
            } else if self.check(&TokenKind::Ge) {
                BinOp::Ge
            } else {
                break;
            };
            self.advance();
            let right = self.parse_add();
            left = binary(op, left, right);
        }
        left
    }

    fn parse_add(&mut self) -> Expr {
        let mut left = self.parse_mul();
        loop {
            let op = if self.check(&TokenKind::Plus) {
                BinOp::Add
            } else if self.check(&TokenKind::Minus) {
                BinOp::Sub
            } else {
                break;
            };
            self.advance();
            let right = self.parse_mul();
            left = binary(op, left, right);
        }
        left
    }

    fn parse_mul(&mut self) -> Expr {
        let mut left = self.parse_mod();
        loop {
            let op = if self.check(&TokenKind::Star) {
                BinOp::Mul
            } else if self.check(&TokenKind::Slash) {
                BinOp::Div
            } else {
                break;
            };
            self.advance();
            let right = self.parse_mod();
            left = binary(op, left, right);
        }
        left
    }

    /// `%` binds a single pair; a following `%` is left for the caller to
    /// trip over as an unexpected token rather than chained here.
    fn parse_mod(&mut self) -> Expr {
        let left = self.parse_unary();
        if self.check(&TokenKind::Percent) {
            self.advance();
            let right = self.parse_unary();
            binary(BinOp::Mod, left, right)
        } else {
            left
        }
    }

    fn parse_unary(&mut self) -> Expr {
        let op = if self.check(&TokenKind::Plus) {
            Some(UnOp::Plus)
        } else if self.check(&TokenKind::Minus) {
            Some(UnOp::Neg)
        } else if self.check(&TokenKind::Tilde) {
            Some(UnOp::Not)
        } else {
            None
        };

        match op {
            Some(op) => {
                let op_tok = self.advance();
                let operand = self.parse_unary();
                let span = op_tok.span.to(operand.span);
                Expr {
                    kind: ExprKind::Unary(op, Box::new(operand)),
                    span,
                }
            }
            None => self.parse_pow(),
        }
    }

    /// Left-associative, but the right-hand side is a `primary`: `2 ^ -1` is
    /// not valid Pinky (the `-` would have to be parenthesized).
    fn parse_pow(&mut self) -> Expr {
        let mut left = self.parse_primary();
        while self.check(&TokenKind::Caret) {
            self.advance();
            let right = self.parse_primary();
            left = binary(BinOp::Pow, left, right);
        }
        left
    }

    fn parse_primary(&mut self) -> Expr {
        let tok = self.current();
        match tok.kind {
            TokenKind::Number(n) => {
                self.advance();
                Expr {
                    kind: ExprKind::NumberLiteral(n),
                    span: tok.span,
                }
            }
            TokenKind::String(sym) => {
                self.advance();
                Expr {
                    kind: ExprKind::StringLiteral(sym),
                    span: tok.span,
                }
            }
            TokenKind::True => {
                self.advance();
                Expr {
                    kind: ExprKind::BooleanLiteral(true),
                    span: tok.span,
                }
            }
            TokenKind::False => {
                self.advance();
                Expr {
                    kind: ExprKind::BooleanLiteral(false),
                    span: tok.span,
                }
            }
            TokenKind::Ident(sym) => {
                self.advance();
                if self.check(&TokenKind::LParen) {
                    self.advance();
                    let mut args = Vec::new();
                    if !self.check(&TokenKind::RParen) {
                        args.push(self.parse_expr());
                        while self.check(&TokenKind::Comma) {
                            self.advance();
                            args.push(self.parse_expr());
                        }
                    }
                    let rparen = self.expect(TokenKind::RParen, "')'");
                    Expr {
                        kind: ExprKind::FunctionCall { name: sym, args },
                        span: tok.span.to(rparen.span),
                    }
                } else {
                    Expr {
                        kind: ExprKind::Identifier(sym),
                        span: tok.span,
                    }
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr();
                let rparen = self.expect(TokenKind::RParen, "')'");
                Expr {
                    kind: ExprKind::Grouping(Box::new(inner)),
                    span: tok.span.to(rparen.span),
                }
            }
            _ => {
                use crate::parser::describe;
                use pinkc_util::diagnostic::DiagnosticCode;
                self.error(
                    DiagnosticCode::E_PARSE_UNEXPECTED_TOKEN,
                    format!("Expected an expression, found {}", describe(&tok.kind, &tok)),
                    tok.span,
                );
                if !self.is_at_end() {
                    self.advance();
                }
                Expr {
                    kind: ExprKind::NumberLiteral(0.0),
                    span: tok.span,
                }
            }
        }
    }
}

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.to(right.span);
    Expr {
        kind: ExprKind::Binary(op, Box::new(left), Box::new(right)),
        span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use pinkc_lex::tokenize;
    use pinkc_util::{FileId, Handler};

    fn parse_expr_source(source: &str) -> (Expr, bool) {
        let handler = Handler::new();
        let tokens = tokenize(source, FileId::DUMMY, &handler);
        let mut parser = Parser::new(tokens, &handler);
        let expr = parser.parse_expr();
        (expr, handler.has_errors())
    }

    #[test]
    fn precedence_climbs_from_or_down_to_primary() {
        let (expr, errored) = parse_expr_source("1 + 2 * 3");
        assert!(!errored);
        match expr.kind {
            ExprKind::Binary(BinOp::Add, _, right) => {
                assert!(matches!(right.kind, ExprKind::Binary(BinOp::Mul, _, _)));
            }
            _ => panic!("expected top-level Add"),
        }
    }

    #[test]
    fn pow_is_left_associative_over_primary() {
        let (expr, errored) = parse_expr_source("2 ^ 3 ^ 2");
        assert!(!errored);
        match expr.kind {
            ExprKind::Binary(BinOp::Pow, left, right) => {
                assert!(matches!(left.kind, ExprKind::Binary(BinOp::Pow, _, _)));
                match right.kind {
                    ExprKind::NumberLiteral(n) => assert_eq!(n, 2.0),
                    _ => panic!("expected a number literal"),
                }
            }
            _ => panic!("expected top-level Pow"),
        }
    }

    #[test]
    fn chained_mod_is_a_syntax_error() {
        let (_, errored) = parse_expr_source("1 % 2 % 3");
        assert!(errored);
    }

    #[test]
    fn unary_minus_is_right_associative() {
        let (expr, errored) = parse_expr_source("- -1");
        assert!(!errored);
        match expr.kind {
            ExprKind::Unary(UnOp::Neg, inner) => {
                assert!(matches!(inner.kind, ExprKind::Unary(UnOp::Neg, _)));
            }
            _ => panic!("expected nested unary"),
        }
    }

    #[test]
    fn function_call_collects_comma_separated_args() {
        let (expr, errored) = parse_expr_source("fact(n - 1)");
        assert!(!errored);
        match expr.kind {
            ExprKind::FunctionCall { args, .. } => assert_eq!(args.len(), 1),
            _ => panic!("expected a call"),
        }
    }

    #[test]
    fn grouping_span_includes_parens() {
        let (expr, _) = parse_expr_source("(1)");
        assert_eq!(expr.span.start, 0);
        assert_eq!(expr.span.end, 3);
    }
}
