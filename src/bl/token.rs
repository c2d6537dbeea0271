//! Core token types shared by the tokenizer, the parsers and tooling.
//!
//!     The parsers consume a [`TokenStream`]: an ordered sequence of classified tokens ending
//!     in the end-of-input sentinel. Classification happens once, when a token is created, and
//!     yields a closed [`TokenKind`]. See [core] for the vocabulary and [stream] for the cursor.

pub mod core;
pub mod formatting;
pub mod stream;

pub use self::core::{
    classify, is_condition, is_identifier, is_keyword, is_primitive_instruction, Condition,
    Keyword, Token, TokenKind, UnknownCondition, END_OF_INPUT, PRIMITIVE_INSTRUCTIONS,
};
pub use formatting::{detokenize, ToBlString};
pub use stream::{Location, TokenStream};
