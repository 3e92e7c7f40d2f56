//! Operator and two-character punctuation lexing.

use pinkc_util::diagnostic::DiagnosticCode;

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// `-` starts either subtraction/unary-minus or, doubled, a `--` line
    /// comment running to end-of-line.
    pub(crate) fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '-' {
            self.cursor.advance();
            return self.lex_comment_body();
        }
        self.make(TokenKind::Minus)
    }

    /// `=` is only valid doubled as `==`; alone it's a lex error.
    pub(crate) fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '=' {
            self.cursor.advance();
            return self.make(TokenKind::EqEq);
        }
        self.report_error(
            DiagnosticCode::E_LEX_UNEXPECTED_CHAR,
            "Unexpected character '='",
        );
        self.make(TokenKind::Eof)
    }

    /// `~` is logical "not"; `~=` is inequality.
    pub(crate) fn lex_tilde(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '=' {
            self.cursor.advance();
            return self.make(TokenKind::TildeEq);
        }
        self.make(TokenKind::Tilde)
    }

    /// `:` only appears as part of `:=`.
    pub(crate) fn lex_colon(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '=' {
            self.cursor.advance();
            return self.make(TokenKind::Assign);
        }
        self.report_error(
            DiagnosticCode::E_LEX_UNEXPECTED_CHAR,
            "Unexpected character ':'",
        );
        self.make(TokenKind::Eof)
    }

    pub(crate) fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '=' {
            self.cursor.advance();
            return self.make(TokenKind::Le);
        }
        self.make(TokenKind::Lt)
    }

    pub(crate) fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '=' {
            self.cursor.advance();
            return self.make(TokenKind::Ge);
        }
        self.make(TokenKind::Gt)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Lexer;
    use crate::token::TokenKind;
    use pinkc_util::{FileId, Handler};

    fn kind_of(source: &str) -> TokenKind {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, FileId::DUMMY, &handler);
        lexer.next_token().kind
    }

    #[test]
    fn two_char_operators() {
        assert_eq!(kind_of("=="), TokenKind::EqEq);
        assert_eq!(kind_of("~="), TokenKind::TildeEq);
        assert_eq!(kind_of(":="), TokenKind::Assign);
        assert_eq!(kind_of("<="), TokenKind::Le);
        assert_eq!(kind_of(">="), TokenKind::Ge);
    }

    #[test]
    fn single_char_fallbacks() {
        assert_eq!(kind_of("~ "), TokenKind::Tilde);
        assert_eq!(kind_of("< "), TokenKind::Lt);
        assert_eq!(kind_of("> "), TokenKind::Gt);
        assert_eq!(kind_of("- "), TokenKind::Minus);
    }
}
