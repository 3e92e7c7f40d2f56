//! Core lexer: the main dispatch loop over [`Cursor`].

use pinkc_util::diagnostic::{DiagnosticBuilder, DiagnosticCode};
use pinkc_util::{FileId, Handler, Symbol};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,
    pub(crate) file_id: FileId,
    pub(crate) token_start: usize,
    pub(crate) token_start_line: u32,
    pub(crate) token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file_id: FileId, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            file_id,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Produces the next token, or `Token::Eof` at end of input. A lexical
    /// error is recorded on `self.handler`; the returned token in that case
    /// is meaningless and the caller (see [`crate::tokenize`]) stops after
    /// seeing it.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return self.make(TokenKind::Eof);
        }

        match self.cursor.current_char() {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            ',' => self.single(TokenKind::Comma),
            '+' => self.single(TokenKind::Plus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '^' => self.single(TokenKind::Caret),
            '%' => self.single(TokenKind::Percent),
            '-' => self.lex_minus(),
            '=' => self.lex_equals(),
            '~' => self.lex_tilde(),
            ':' => self.lex_colon(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '"' | '\'' => self.lex_string(),
            c if c.is_ascii_digit() => self.lex_number(),
            c if is_ident_start(c) => self.lex_identifier(),
            c => {
                self.report_error(
                    DiagnosticCode::E_LEX_UNEXPECTED_CHAR,
                    format!("Unexpected character '{c}'"),
                );
                self.cursor.advance();
                self.make(TokenKind::Eof)
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.make(kind)
    }

    pub(crate) fn make(&self, kind: TokenKind) -> Token {
        let span = self.cursor.span_from(
            self.token_start,
            self.token_start_line,
            self.token_start_column,
        );
        let text = Symbol::intern(self.cursor.slice_from(self.token_start));
        Token::new(kind, text, span.with_file(self.file_id))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.cursor.current_char(), ' ' | '\t' | '\r' | '\n') {
            self.cursor.advance();
        }
    }

    pub(crate) fn report_error(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        let span = self
            .cursor
            .span_from(
                self.token_start,
                self.token_start_line,
                self.token_start_column,
            )
            .with_file(self.file_id);
        DiagnosticBuilder::error(message).code(code).span(span).emit(self.handler);
    }
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinkc_util::Handler;

    fn lex_all(source: &str) -> (Vec<TokenKind>, bool) {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, FileId::DUMMY, &handler);
        let mut kinds = Vec::new();
        loop {
            let tok = lexer.next_token();
            let is_eof = tok.is_eof();
            kinds.push(tok.kind);
            if is_eof || handler.has_errors() {
                break;
            }
        }
        (kinds, handler.has_errors())
    }

    #[test]
    fn single_char_punctuation() {
        let (kinds, errored) = lex_all("(),+*/^%");
        assert!(!errored);
        assert_eq!(
            kinds,
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Comma,
                TokenKind::Plus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Caret,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn bare_equals_is_an_error() {
        let (_, errored) = lex_all("=");
        assert!(errored);
    }
}
