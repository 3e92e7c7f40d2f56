//! Token kinds produced by the lexer.

use pinkc_util::span::Span;
use pinkc_util::symbol::{
    Symbol, KW_AND, KW_DO, KW_ELIF, KW_ELSE, KW_END, KW_FALSE, KW_FOR, KW_FUNC, KW_IF, KW_LOCAL,
    KW_OR, KW_PRINT, KW_PRINTLN, KW_RET, KW_THEN, KW_TRUE, KW_WHILE,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    Number(f64),
    String(Symbol),
    Ident(Symbol),

    If,
    Elif,
    Then,
    Else,
    End,
    True,
    False,
    And,
    Or,
    While,
    Do,
    For,
    Func,
    Ret,
    Local,
    Print,
    Println,

    LParen,
    RParen,
    Comma,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Tilde,
    TildeEq,
    EqEq,
    Assign,
    Lt,
    Gt,
    Le,
    Ge,

    /// A `-- ...` line comment; carried through tokenization but skipped by
    /// the parser between statements.
    Comment,

    Eof,
}

impl TokenKind {
    /// `None` if `sym` doesn't name one of Pinky's reserved words.
    pub fn keyword_for(sym: Symbol) -> Option<TokenKind> {
        match sym {
            s if s == KW_IF => Some(TokenKind::If),
            s if s == KW_ELIF => Some(TokenKind::Elif),
            s if s == KW_THEN => Some(TokenKind::Then),
            s if s == KW_ELSE => Some(TokenKind::Else),
            s if s == KW_END => Some(TokenKind::End),
            s if s == KW_TRUE => Some(TokenKind::True),
            s if s == KW_FALSE => Some(TokenKind::False),
            s if s == KW_AND => Some(TokenKind::And),
            s if s == KW_OR => Some(TokenKind::Or),
            s if s == KW_WHILE => Some(TokenKind::While),
            s if s == KW_DO => Some(TokenKind::Do),
            s if s == KW_FOR => Some(TokenKind::For),
            s if s == KW_FUNC => Some(TokenKind::Func),
            s if s == KW_RET => Some(TokenKind::Ret),
            s if s == KW_LOCAL => Some(TokenKind::Local),
            s if s == KW_PRINT => Some(TokenKind::Print),
            s if s == KW_PRINTLN => Some(TokenKind::Println),
            _ => None,
        }
    }
}

/// A single lexical unit: its kind, source text, and location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Symbol,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: Symbol, span: Span) -> Self {
        Self { kind, text, span }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
