//! Token stream consumed by the parsers
//!
//! A cursor over an owned token vector. Tokens are consumed strictly from the front with one
//! token of lookahead. The last token is always the end-of-input sentinel; it can be peeked but
//! never dequeued, so every parser that runs past the grammar sees the sentinel rather than an
//! out-of-bounds read.

use super::core::{Token, TokenKind};
use std::fmt;
use std::ops::Range;

/// Position of a token inside a stream: its index and its byte range in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub index: usize,
    pub span: Range<usize>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token {}", self.index)
    }
}

#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    /// Wrap a token vector, appending the sentinel when it is missing.
    ///
    /// The first sentinel ends the input: anything after it is dropped, so the sentinel is
    /// always the last token.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        match tokens.iter().position(Token::is_end_of_input) {
            Some(end) => tokens.truncate(end + 1),
            None => {
                let offset = tokens.last().map_or(0, |t| t.span.end);
                tokens.push(Token::end_of_input(offset));
            }
        }
        TokenStream { tokens, cursor: 0 }
    }

    /// Build a stream from bare lexemes. Spans are empty since there is no source text.
    pub fn from_lexemes<I, S>(lexemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lexemes.into_iter().map(|l| Token::new(l, 0..0)).collect())
    }

    /// Peek at the next token without consuming it.
    pub fn front(&self) -> &Token {
        // The sentinel is never dequeued, so the cursor never passes the last token
        &self.tokens[self.cursor]
    }

    pub fn front_kind(&self) -> TokenKind {
        self.front().kind
    }

    /// Remove and return the next token. Returns `None` at the sentinel, which stays in place.
    pub fn dequeue(&mut self) -> Option<Token> {
        if self.is_at_end() {
            return None;
        }
        let token = self.tokens[self.cursor].clone();
        self.cursor += 1;
        Some(token)
    }

    /// Number of tokens left, sentinel included.
    pub fn len(&self) -> usize {
        self.tokens.len() - self.cursor
    }

    /// A stream always holds the sentinel, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_at_end(&self) -> bool {
        self.front().is_end_of_input()
    }

    /// Number of tokens consumed so far
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Location of the front token
    pub fn location(&self) -> Location {
        Location {
            index: self.cursor,
            span: self.front().span.clone(),
        }
    }

    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.cursor..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bl::token::core::{Keyword, END_OF_INPUT};

    #[test]
    fn test_sentinel_is_appended() {
        let stream = TokenStream::from_lexemes(["PROGRAM", "p"]);
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.remaining()[2].text, END_OF_INPUT);
    }

    #[test]
    fn test_sentinel_is_not_duplicated() {
        let stream = TokenStream::from_lexemes(["move", END_OF_INPUT]);
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_tokens_after_sentinel_are_dropped() {
        let mut stream = TokenStream::from_lexemes(["move", END_OF_INPUT, "skip", END_OF_INPUT]);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.dequeue().map(|t| t.text), Some("move".to_string()));
        assert!(stream.is_at_end());
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_front_and_dequeue() {
        let mut stream = TokenStream::from_lexemes(["IF", "true"]);
        assert!(stream.front().is_keyword(Keyword::If));
        assert_eq!(stream.dequeue().map(|t| t.text), Some("IF".to_string()));
        assert_eq!(stream.position(), 1);
        assert_eq!(stream.front().text, "true");
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_sentinel_is_never_dequeued() {
        let mut stream = TokenStream::from_lexemes(Vec::<String>::new());
        assert!(stream.is_at_end());
        assert_eq!(stream.dequeue(), None);
        assert_eq!(stream.dequeue(), None);
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_location_tracks_cursor() {
        let mut stream = TokenStream::new(vec![Token::new("move", 0..4), Token::new("skip", 5..9)]);
        stream.dequeue();
        assert_eq!(stream.location(), Location { index: 1, span: 5..9 });
        stream.dequeue();
        // sentinel sits right after the last token
        assert_eq!(stream.location(), Location { index: 2, span: 9..9 });
    }
}
