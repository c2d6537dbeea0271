//! Base tokenization for BL source text
//!
//! This module provides the raw tokenization using the logos lexer library. Whitespace
//! separates lexemes and is otherwise discarded. A lexeme is either a maximal run of word
//! characters (letters, digits, `-`) or a maximal run of anything else that is not whitespace;
//! the latter can never form a valid token and is classified as an error token, which the
//! parser reports when it reaches it.
//!
//! Every produced sequence ends with the end-of-input sentinel.

use crate::bl::token::{Token, TokenStream};
use logos::Logos;

/// Raw lexeme shapes recognised by logos, before classification
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Lexeme {
    #[regex(r"[a-zA-Z0-9-]+")]
    Word,

    #[regex(r"[^a-zA-Z0-9\- \t\r\n\f]+")]
    Symbols,
}

/// Tokenize source text into classified tokens with byte spans.
///
/// The end-of-input sentinel is appended with an empty span at the end of the source.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexeme::lexer(source);
    let mut tokens = Vec::new();

    // Word and Symbols together cover every non-whitespace character, so an Err here only
    // means an unusual character; keep it and let classification mark it as an error token.
    while lexer.next().is_some() {
        tokens.push(Token::new(lexer.slice(), lexer.span()));
    }

    tokens.push(Token::end_of_input(source.len()));
    tokens
}

/// Tokenize source text straight into a stream ready for parsing.
pub fn token_stream(source: &str) -> TokenStream {
    TokenStream::new(tokenize(source))
}
