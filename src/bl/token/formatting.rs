//! Detokenizer for BL token streams
//!
//! Converts tokens back into source text. Whitespace is not preserved by the tokenizer, so
//! tokens are joined with single spaces and the sentinel is dropped. Mostly useful for
//! debugging and for round-trip tests (source -> tokens -> source -> tokens).

use super::core::{Token, TokenKind};

/// Trait for converting a token to its string representation
pub trait ToBlString {
    fn to_bl_string(&self) -> String;
}

impl ToBlString for Token {
    fn to_bl_string(&self) -> String {
        match self.kind {
            // The sentinel is synthetic and has no source text
            TokenKind::EndOfInput => String::new(),
            _ => self.text.clone(),
        }
    }
}

/// Detokenize a sequence of tokens into a single line of source
pub fn detokenize(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToBlString::to_bl_string)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
