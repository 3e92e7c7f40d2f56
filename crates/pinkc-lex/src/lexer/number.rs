//! Number literal lexing: greedy digits, optional single `.digit+`.

use pinkc_util::diagnostic::DiagnosticCode;

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_number(&mut self) -> Token {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.' {
            if self.cursor.peek_char(1).is_ascii_digit() {
                self.cursor.advance();
                while self.cursor.current_char().is_ascii_digit() {
                    self.cursor.advance();
                }
            } else {
                self.cursor.advance();
                self.report_error(
                    DiagnosticCode::E_LEX_INVALID_NUMBER,
                    "Unexpected character '.' in number",
                );
                return self.make(TokenKind::Eof);
            }
        }

        let text = self.cursor.slice_from(self.token_start);
        let value = text.parse::<f64>().expect("digit-only text always parses as f64");
        self.make(TokenKind::Number(value))
    }
}

#[cfg(test)]
mod tests {
    use super::super::Lexer;
    use crate::token::TokenKind;
    use pinkc_util::{FileId, Handler};

    fn lex_number(source: &str) -> (TokenKind, bool) {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, FileId::DUMMY, &handler);
        let tok = lexer.next_token();
        (tok.kind, handler.has_errors())
    }

    #[test]
    fn integer_and_decimal() {
        assert_eq!(lex_number("42"), (TokenKind::Number(42.0), false));
        assert_eq!(lex_number("3.14"), (TokenKind::Number(3.14), false));
    }

    #[test]
    fn trailing_dot_with_no_digits_is_an_error() {
        let (_, errored) = lex_number("3.");
        assert!(errored);
    }
}
