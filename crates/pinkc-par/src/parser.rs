//! Token-stream plumbing shared by statement and expression parsing.

use pinkc_lex::{Token, TokenKind};
use pinkc_util::diagnostic::{DiagnosticBuilder, DiagnosticCode};
use pinkc_util::{Handler, Span, Symbol};

pub struct Parser<'a> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) handler: &'a Handler,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a Handler) -> Self {
        Self {
            tokens,
            position: 0,
            handler,
        }
    }

    pub(crate) fn current(&self) -> Token {
        *self
            .tokens
            .get(self.position)
            .unwrap_or_else(|| self.tokens.last().expect("token stream always ends in Eof"))
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.current();
        if !self.is_at_end() {
            self.position += 1;
        }
        tok
    }

    /// Compares only the discriminant, ignoring any payload (number value,
    /// interned text) the current token's kind might carry.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn peek_is(&self, offset: usize, kind: &TokenKind) -> bool {
        let tok = self
            .tokens
            .get(self.position + offset)
            .copied()
            .unwrap_or_else(|| self.tokens.last().copied().expect("non-empty token stream"));
        std::mem::discriminant(&tok.kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn skip_comments(&mut self) {
        while self.check(&TokenKind::Comment) {
            self.advance();
        }
    }

    /// Consumes the current token if it matches `kind`, reporting an error
    /// (and consuming the unexpected token anyway, to guarantee forward
    /// progress) otherwise.
    pub(crate) fn expect(&mut self, kind: TokenKind, description: &str) -> Token {
        let tok = self.current();
        if self.check(&kind) {
            self.advance();
            tok
        } else {
            self.error(
                DiagnosticCode::E_PARSE_EXPECTED_TOKEN,
                format!("Expected {}, found {}", description, describe(&tok.kind, &tok)),
                tok.span,
            );
            if !self.is_at_end() {
                self.advance();
            }
            tok
        }
    }

    pub(crate) fn expect_ident(&mut self, context: &str) -> Symbol {
        let tok = self.current();
        if let TokenKind::Ident(sym) = tok.kind {
            self.advance();
            sym
        } else {
            self.error(
                DiagnosticCode::E_PARSE_EXPECTED_TOKEN,
                format!("Expected identifier {}, found {}", context, describe(&tok.kind, &tok)),
                tok.span,
            );
            if !self.is_at_end() {
                self.advance();
            }
            Symbol::intern("<error>")
        }
    }

    pub(crate) fn error(&self, code: DiagnosticCode, message: impl Into<String>, span: Span) {
        DiagnosticBuilder::error(message)
            .code(code)
            .span(span)
            .emit(self.handler);
    }
}

/// A short human-readable name for a token, used in "expected X, found Y"
/// diagnostics.
pub(crate) fn describe(kind: &TokenKind, tok: &Token) -> String {
    match kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::Comment => "a comment".to_string(),
        _ => format!("'{}'", tok.text.as_str()),
    }
}
