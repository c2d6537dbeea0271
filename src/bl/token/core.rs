//! BL token vocabulary and classification
//!
//!     Every lexeme produced by the tokenizer falls into exactly one category: a reserved
//!     keyword, a condition name, an identifier, the end-of-input sentinel, or an error token
//!     (anything else). The parser never compares raw strings to pick a grammar production; it
//!     matches on [`TokenKind`], so adding a keyword forces every dispatch site to be revisited.
//!
//!     Keywords are upper case, conditions are lower case and dash separated. Identifiers are
//!     a letter followed by letters, digits or dashes, and must not spell a keyword or a
//!     condition.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Reserved sentinel terminating every token stream.
pub const END_OF_INPUT: &str = "### END OF INPUT ###";

/// Instructions with built-in meaning. They are identifiers, but cannot be redefined.
pub const PRIMITIVE_INSTRUCTIONS: [&str; 5] = ["move", "turnleft", "turnright", "infect", "skip"];

static IDENTIFIER_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9-]*$").unwrap());

/// Reserved words of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Keyword {
    Program,
    Is,
    Begin,
    End,
    Instruction,
    If,
    Then,
    Else,
    While,
    Do,
}

impl Keyword {
    pub const ALL: [Keyword; 10] = [
        Keyword::Program,
        Keyword::Is,
        Keyword::Begin,
        Keyword::End,
        Keyword::Instruction,
        Keyword::If,
        Keyword::Then,
        Keyword::Else,
        Keyword::While,
        Keyword::Do,
    ];

    /// Source spelling of the keyword
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Program => "PROGRAM",
            Keyword::Is => "IS",
            Keyword::Begin => "BEGIN",
            Keyword::End => "END",
            Keyword::Instruction => "INSTRUCTION",
            Keyword::If => "IF",
            Keyword::Then => "THEN",
            Keyword::Else => "ELSE",
            Keyword::While => "WHILE",
            Keyword::Do => "DO",
        }
    }

    /// Exact-spelling lookup; keywords are case sensitive.
    pub fn from_lexeme(lexeme: &str) -> Option<Keyword> {
        Self::ALL.into_iter().find(|kw| kw.as_str() == lexeme)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive predicates tested by `IF` and `WHILE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    NextIsEmpty,
    NextIsNotEmpty,
    NextIsWall,
    NextIsNotWall,
    NextIsFriend,
    NextIsNotFriend,
    NextIsEnemy,
    NextIsNotEnemy,
    Random,
    True,
}

impl Condition {
    pub const ALL: [Condition; 10] = [
        Condition::NextIsEmpty,
        Condition::NextIsNotEmpty,
        Condition::NextIsWall,
        Condition::NextIsNotWall,
        Condition::NextIsFriend,
        Condition::NextIsNotFriend,
        Condition::NextIsEnemy,
        Condition::NextIsNotEnemy,
        Condition::Random,
        Condition::True,
    ];

    /// Source spelling, e.g. `next-is-empty`
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::NextIsEmpty => "next-is-empty",
            Condition::NextIsNotEmpty => "next-is-not-empty",
            Condition::NextIsWall => "next-is-wall",
            Condition::NextIsNotWall => "next-is-not-wall",
            Condition::NextIsFriend => "next-is-friend",
            Condition::NextIsNotFriend => "next-is-not-friend",
            Condition::NextIsEnemy => "next-is-enemy",
            Condition::NextIsNotEnemy => "next-is-not-enemy",
            Condition::Random => "random",
            Condition::True => "true",
        }
    }

    /// Enumerant name, e.g. `NEXT_IS_EMPTY`
    pub fn name(self) -> &'static str {
        match self {
            Condition::NextIsEmpty => "NEXT_IS_EMPTY",
            Condition::NextIsNotEmpty => "NEXT_IS_NOT_EMPTY",
            Condition::NextIsWall => "NEXT_IS_WALL",
            Condition::NextIsNotWall => "NEXT_IS_NOT_WALL",
            Condition::NextIsFriend => "NEXT_IS_FRIEND",
            Condition::NextIsNotFriend => "NEXT_IS_NOT_FRIEND",
            Condition::NextIsEnemy => "NEXT_IS_ENEMY",
            Condition::NextIsNotEnemy => "NEXT_IS_NOT_ENEMY",
            Condition::Random => "RANDOM",
            Condition::True => "TRUE",
        }
    }

    /// Exact-spelling lookup used by the classifier.
    pub fn from_lexeme(lexeme: &str) -> Option<Condition> {
        Self::ALL.into_iter().find(|c| c.as_str() == lexeme)
    }

    /// Lenient lookup: separators (`-`/`_`) and case are normalised before matching the
    /// enumerant name, so `next-is-wall`, `NEXT_IS_WALL` and `Next-Is-Wall` all resolve.
    pub fn from_name(name: &str) -> Option<Condition> {
        let normalized = name.replace('-', "_").to_uppercase();
        Self::ALL.into_iter().find(|c| c.name() == normalized)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no condition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown condition \"{0}\"")]
pub struct UnknownCondition(pub String);

impl FromStr for Condition {
    type Err = UnknownCondition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::from_name(s).ok_or_else(|| UnknownCondition(s.to_string()))
    }
}

/// Category of a token, assigned once at classification time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "category", content = "value", rename_all = "snake_case")]
pub enum TokenKind {
    Keyword(Keyword),
    Condition(Condition),
    Identifier,
    EndOfInput,
    Error,
}

/// A classified lexeme with its byte range in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
}

impl Token {
    /// Classify `text` and build a token covering `span`.
    pub fn new(text: impl Into<String>, span: Range<usize>) -> Self {
        let text = text.into();
        Token {
            kind: classify(&text),
            text,
            span,
        }
    }

    /// The sentinel, positioned at byte `offset` with an empty span.
    pub fn end_of_input(offset: usize) -> Self {
        Token {
            kind: TokenKind::EndOfInput,
            text: END_OF_INPUT.to_string(),
            span: offset..offset,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

/// Assign a category to a raw lexeme.
pub fn classify(lexeme: &str) -> TokenKind {
    if lexeme == END_OF_INPUT {
        TokenKind::EndOfInput
    } else if let Some(keyword) = Keyword::from_lexeme(lexeme) {
        TokenKind::Keyword(keyword)
    } else if let Some(condition) = Condition::from_lexeme(lexeme) {
        TokenKind::Condition(condition)
    } else if IDENTIFIER_SHAPE.is_match(lexeme) {
        TokenKind::Identifier
    } else {
        TokenKind::Error
    }
}

pub fn is_keyword(lexeme: &str) -> bool {
    Keyword::from_lexeme(lexeme).is_some()
}

pub fn is_condition(lexeme: &str) -> bool {
    Condition::from_lexeme(lexeme).is_some()
}

pub fn is_identifier(lexeme: &str) -> bool {
    classify(lexeme) == TokenKind::Identifier
}

pub fn is_primitive_instruction(name: &str) -> bool {
    PRIMITIVE_INSTRUCTIONS.contains(&name)
}
