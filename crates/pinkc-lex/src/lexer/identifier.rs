//! Identifier and keyword lexing.

use pinkc_util::Symbol;

use super::core::{is_ident_continue, Lexer};
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(self.token_start);
        let sym = Symbol::intern(text);
        let kind = TokenKind::keyword_for(sym).unwrap_or(TokenKind::Ident(sym));
        self.make(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Lexer;
    use crate::token::TokenKind;
    use pinkc_util::symbol::Symbol;
    use pinkc_util::{FileId, Handler};

    fn kind_of(source: &str) -> TokenKind {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, FileId::DUMMY, &handler);
        lexer.next_token().kind
    }

    #[test]
    fn reserved_words_become_keyword_tokens() {
        assert_eq!(kind_of("if"), TokenKind::If);
        assert_eq!(kind_of("println"), TokenKind::Println);
        assert_eq!(kind_of("local"), TokenKind::Local);
    }

    #[test]
    fn non_keyword_becomes_ident() {
        assert_eq!(kind_of("counter"), TokenKind::Ident(Symbol::intern("counter")));
    }

    #[test]
    fn underscores_and_digits_continue_an_identifier() {
        assert_eq!(
            kind_of("my_var_2"),
            TokenKind::Ident(Symbol::intern("my_var_2"))
        );
    }
}
