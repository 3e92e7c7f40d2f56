//! The Pinky abstract syntax tree.
//!
//! Every statement and expression node carries a [`Span`] covering its full
//! extent, built up via [`Span::to`] as larger constructs are assembled from
//! smaller ones.

use pinkc_util::{Span, Symbol};

/// A parsed program: a flat list of top-level statements.
#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Print(Expr),
    Println(Expr),
    /// `name := value` assigning an existing binding (or creating one in the
    /// innermost scope if `name` isn't already bound there).
    Assign { name: Symbol, value: Expr },
    /// `local name := value`, always binding in the current scope.
    LocalAssign { name: Symbol, value: Expr },
    If(IfStmt),
    While { condition: Expr, body: Vec<Stmt> },
    For(ForStmt),
    FunctionDecl(FunctionDecl),
    Return(Expr),
    ExpressionStmt(Expr),
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Vec<Stmt>,
    pub elif_branches: Vec<(Expr, Vec<Stmt>)>,
    pub else_branch: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone)]
pub struct ForStmt {
    pub var: Symbol,
    pub start: Expr,
    pub end: Expr,
    /// Missing step defaults to a boxed `1` at codegen time.
    pub step: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: Symbol,
    pub params: Vec<Symbol>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    NumberLiteral(f64),
    StringLiteral(Symbol),
    BooleanLiteral(bool),
    Identifier(Symbol),
    /// A parenthesized sub-expression; kept distinct from its inner node so
    /// the span includes the parens.
    Grouping(Box<Expr>),
    Unary(UnOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    FunctionCall { name: Symbol, args: Vec<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus,
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}
