//! Token-level checks shared by the statement and program parsers
//!
//! Each helper looks at the front token, consumes it when it has the required category and
//! reports the mismatch otherwise. Nothing is consumed on failure.

use super::error::{ParseError, ParseResult};
use crate::bl::token::{Keyword, Token, TokenKind, TokenStream};

/// Consume `keyword` or fail naming it as the expected token.
pub(crate) fn expect_keyword(tokens: &mut TokenStream, keyword: Keyword) -> ParseResult<Token> {
    if tokens.front().is_keyword(keyword) {
        return dequeue_front(tokens, keyword.as_str());
    }
    Err(ParseError::unexpected(tokens, keyword.as_str()))
}

/// Consume an identifier. `role` names its place in the grammar, e.g. "naming the program".
pub(crate) fn expect_identifier(tokens: &mut TokenStream, role: &'static str) -> ParseResult<Token> {
    match tokens.front_kind() {
        TokenKind::Identifier => dequeue_front(tokens, "an identifier"),
        TokenKind::EndOfInput => Err(ParseError::UnexpectedEndOfInput {
            expected: format!("an identifier {role}"),
            at: tokens.location(),
        }),
        _ => Err(ParseError::ExpectedIdentifier {
            role,
            found: tokens.front().text.clone(),
            at: tokens.location(),
        }),
    }
}

/// Consume any keyword; used for the closer after `END` when closers are not checked.
pub(crate) fn expect_any_keyword(tokens: &mut TokenStream) -> ParseResult<Keyword> {
    match tokens.front_kind() {
        TokenKind::Keyword(keyword) => {
            dequeue_front(tokens, "a keyword")?;
            Ok(keyword)
        }
        _ => Err(ParseError::unexpected(tokens, "a keyword")),
    }
}

/// Require that only the sentinel is left.
pub(crate) fn expect_end_of_input(tokens: &TokenStream) -> ParseResult<()> {
    if tokens.is_at_end() && tokens.len() == 1 {
        Ok(())
    } else {
        Err(ParseError::TrailingInput {
            found: tokens.front().text.clone(),
            at: tokens.location(),
        })
    }
}

pub(crate) fn dequeue_front(tokens: &mut TokenStream, expected: &str) -> ParseResult<Token> {
    // Callers have checked the front token is not the sentinel
    tokens
        .dequeue()
        .ok_or_else(|| ParseError::unexpected(tokens, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bl::token::END_OF_INPUT;

    #[test]
    fn test_expect_keyword_consumes_on_match_only() {
        let mut tokens = TokenStream::from_lexemes(["IS", "BEGIN"]);
        assert!(expect_keyword(&mut tokens, Keyword::Begin).is_err());
        assert_eq!(tokens.position(), 0);
        assert_eq!(expect_keyword(&mut tokens, Keyword::Is).map(|t| t.text), Ok("IS".into()));
        assert_eq!(tokens.position(), 1);
    }

    #[test]
    fn test_expect_identifier_rejects_keywords_and_conditions() {
        let mut tokens = TokenStream::from_lexemes(["BEGIN"]);
        assert!(matches!(
            expect_identifier(&mut tokens, "naming the program"),
            Err(ParseError::ExpectedIdentifier { role: "naming the program", .. })
        ));

        let mut tokens = TokenStream::from_lexemes(["random"]);
        assert!(matches!(
            expect_identifier(&mut tokens, "to call"),
            Err(ParseError::ExpectedIdentifier { .. })
        ));

        let mut tokens = TokenStream::from_lexemes(Vec::<String>::new());
        assert!(matches!(
            expect_identifier(&mut tokens, "to call"),
            Err(ParseError::UnexpectedEndOfInput { .. })
        ));
    }

    #[test]
    fn test_expect_end_of_input() {
        assert!(expect_end_of_input(&TokenStream::from_lexemes(Vec::<String>::new())).is_ok());
        assert!(matches!(
            expect_end_of_input(&TokenStream::from_lexemes(["move"])),
            Err(ParseError::TrailingInput { .. })
        ));
    }

    #[test]
    fn test_input_after_sentinel_is_not_left_over() {
        let tokens = TokenStream::from_lexemes(["move", END_OF_INPUT, "garbage"]);
        assert!(matches!(
            expect_end_of_input(&tokens),
            Err(ParseError::TrailingInput { ref found, .. }) if found == "move"
        ));

        let mut tokens = tokens;
        tokens.dequeue();
        assert!(expect_end_of_input(&tokens).is_ok());
        assert_eq!(tokens.remaining().len(), 1);
    }
}
