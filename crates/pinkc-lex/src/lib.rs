//! pinkc-lex - Lexical Analyzer
//!
//! Converts Pinky source text into a flat token stream. The lexer never
//! recovers from an error: the first unterminated string, malformed
//! number, or unexpected character stops tokenization and the token
//! stream is truncated (with a trailing `Eof`).

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

use pinkc_util::{FileId, Handler};

/// Tokenize `source` in full. Errors are recorded on `handler`; on the
/// first one, the returned vector is truncated at that point (the
/// triggering token is dropped) and ends with a single `Eof`.
pub fn tokenize(source: &str, file_id: FileId, handler: &Handler) -> Vec<Token> {
    let mut lexer = Lexer::new(source, file_id, handler);
    let mut tokens = Vec::new();
    loop {
        let errors_before = handler.error_count();
        let token = lexer.next_token();
        if handler.error_count() > errors_before {
            tokens.push(Token::new(TokenKind::Eof, token.text, token.span));
            break;
        }
        let is_eof = token.is_eof();
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinkc_util::symbol::Symbol;

    #[test]
    fn tokenizes_a_print_statement() {
        let handler = Handler::new();
        let tokens = tokenize("println \"hello world\"", FileId::DUMMY, &handler);
        assert!(!handler.has_errors());
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Println,
                TokenKind::String(Symbol::intern("hello world")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn stops_at_first_error_with_trailing_eof() {
        let handler = Handler::new();
        let tokens = tokenize("print 1 = 2", FileId::DUMMY, &handler);
        assert!(handler.has_errors());
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(
            tokens[..2].iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Print, TokenKind::Number(1.0)]
        );
    }

    #[test]
    fn comments_are_tokenized_but_distinct_from_other_kinds() {
        let handler = Handler::new();
        let tokens = tokenize("print 1 -- trailing comment", FileId::DUMMY, &handler);
        assert!(!handler.has_errors());
        assert!(matches!(tokens[2].kind, TokenKind::Comment));
    }
}
