//! String literal lexing: opened by `'` or `"`, closed by the same quote.
//!
//! The only recognized escapes are `\n`, `\t`, and `\"`; anything else
//! after a backslash is carried through literally.

use pinkc_util::diagnostic::DiagnosticCode;
use pinkc_util::Symbol;

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_string(&mut self) -> Token {
        let quote = self.cursor.current_char();
        self.cursor.advance();

        let mut content = String::new();
        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                self.report_error(
                    DiagnosticCode::E_LEX_UNTERMINATED_STRING,
                    "Unterminated string literal",
                );
                return self.make(TokenKind::Eof);
            }

            let c = self.cursor.current_char();
            if c == quote {
                self.cursor.advance();
                break;
            }

            if c == '\\' {
                self.cursor.advance();
                match self.cursor.current_char() {
                    'n' => content.push('\n'),
                    't' => content.push('\t'),
                    '"' => content.push('"'),
                    other => content.push(other),
                }
                self.cursor.advance();
            } else {
                content.push(c);
                self.cursor.advance();
            }
        }

        self.make(TokenKind::String(Symbol::intern(&content)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::Lexer;
    use crate::token::TokenKind;
    use pinkc_util::symbol::Symbol;
    use pinkc_util::{FileId, Handler};

    fn lex(source: &str) -> (TokenKind, bool) {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, FileId::DUMMY, &handler);
        let tok = lexer.next_token();
        (tok.kind, handler.has_errors())
    }

    #[test]
    fn plain_string() {
        assert_eq!(
            lex("\"hello world\""),
            (TokenKind::String(Symbol::intern("hello world")), false)
        );
    }

    #[test]
    fn single_quote_is_also_a_delimiter() {
        assert_eq!(
            lex("'hi'"),
            (TokenKind::String(Symbol::intern("hi")), false)
        );
    }

    #[test]
    fn escapes_expand_to_their_characters() {
        assert_eq!(
            lex("\"a\\nb\\tc\\\"d\""),
            (TokenKind::String(Symbol::intern("a\nb\tc\"d")), false)
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let (_, errored) = lex("\"never closes");
        assert!(errored);
    }

    #[test]
    fn newline_inside_string_is_an_error() {
        let (_, errored) = lex("\"one\ntwo\"");
        assert!(errored);
    }
}
