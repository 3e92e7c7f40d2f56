//! Line comment lexing: `-- ...` up to (not including) the newline.

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Called right after the second `-` of a `--` has been consumed.
    pub(crate) fn lex_comment_body(&mut self) -> Token {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
        self.make(TokenKind::Comment)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Lexer;
    use crate::token::TokenKind;
    use pinkc_util::{FileId, Handler};

    #[test]
    fn comment_stops_before_newline() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("-- a comment\nprint 1", FileId::DUMMY, &handler);
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Comment);
        assert_eq!(tok.text.as_str(), "-- a comment");
        let next = lexer.next_token();
        assert_eq!(next.kind, TokenKind::Print);
    }
}
