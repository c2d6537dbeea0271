//! Statement and block parser
//!
//! Grammar handled here:
//!
//! ```text
//! block     ::= statement*
//! statement ::= ifstmt | whilestmt | call
//! ifstmt    ::= "IF" COND "THEN" block ("ELSE" block)? "END" KEYWORD
//! whilestmt ::= "WHILE" COND "DO" block "END" KEYWORD
//! call      ::= ID
//! ```
//!
//! With `strict_closers` the closing keyword must repeat the opener (`END IF`, `END WHILE`).
//!
//! The choice of production is an exhaustive match on the category of the front token. A
//! block keeps parsing statements while the front token is in the FIRST set of `statement`
//! (an identifier, `IF` or `WHILE`) and stops, without error, on anything else. Nested
//! `IF`/`WHILE` levels are counted and bounded by `max_nesting_depth`.

use super::error::{ParseError, ParseResult};
use super::expect::{dequeue_front, expect_any_keyword, expect_identifier, expect_keyword};
use crate::bl::ast::{Block, Statement};
use crate::bl::config::ParserConfig;
use crate::bl::token::{Condition, Keyword, TokenKind, TokenStream};
use tracing::trace;

/// Consume a condition token and convert it to its enumerant.
///
/// Only tokens classified as conditions qualify; their lexeme is normalised with
/// [`Condition::from_name`]. Anything else is a condition-shape violation and is not consumed.
pub fn parse_condition(tokens: &mut TokenStream) -> ParseResult<Condition> {
    let front = tokens.front();
    let condition = match front.kind {
        TokenKind::Condition(_) => Condition::from_name(&front.text),
        TokenKind::EndOfInput => {
            return Err(ParseError::UnexpectedEndOfInput {
                expected: "a condition".to_string(),
                at: tokens.location(),
            });
        }
        _ => None,
    };
    let Some(condition) = condition else {
        return Err(ParseError::ExpectedCondition {
            found: tokens.front().text.clone(),
            at: tokens.location(),
        });
    };
    dequeue_front(tokens, "a condition")?;
    Ok(condition)
}

/// Whether a token of this kind can begin a statement
pub fn in_first_set(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier | TokenKind::Keyword(Keyword::If) | TokenKind::Keyword(Keyword::While)
    )
}

/// Recursive-descent parser for statements and blocks.
///
/// The parser only carries its settings and the current nesting depth; the rest of the state
/// is the remaining token stream.
#[derive(Debug, Clone)]
pub struct StatementParser {
    max_depth: usize,
    strict_closers: bool,
    depth: usize,
}

impl StatementParser {
    pub fn new(config: &ParserConfig) -> Self {
        StatementParser {
            max_depth: config.max_nesting_depth,
            strict_closers: config.strict_closers,
            depth: 0,
        }
    }

    /// Parse exactly one statement, choosing the production from the front token.
    pub fn parse(&mut self, tokens: &mut TokenStream) -> ParseResult<Statement> {
        match tokens.front_kind() {
            TokenKind::Keyword(Keyword::While) => self.parse_while(tokens),
            TokenKind::Keyword(Keyword::If) => self.parse_if(tokens),
            TokenKind::Identifier => self.parse_call(tokens),
            TokenKind::EndOfInput => Err(ParseError::unexpected(tokens, "a statement")),
            TokenKind::Keyword(_) | TokenKind::Condition(_) | TokenKind::Error => {
                Err(ParseError::UnexpectedToken {
                    expected: "a statement (IF, WHILE or an instruction name)".to_string(),
                    found: tokens.front().text.clone(),
                    at: tokens.location(),
                })
            }
        }
    }

    /// Parse the longest run of statements at the front of the stream.
    ///
    /// Stops on the first token outside the FIRST set; an empty block is valid and consumes
    /// nothing.
    pub fn parse_block(&mut self, tokens: &mut TokenStream) -> ParseResult<Block> {
        let mut block = Block::new();
        while in_first_set(tokens.front_kind()) {
            block.push(self.parse(tokens)?);
        }
        trace!(statements = block.len(), depth = self.depth, "parsed block");
        Ok(block)
    }

    /// `IF <condition> THEN <block> [ELSE <block>] END IF`
    pub fn parse_if(&mut self, tokens: &mut TokenStream) -> ParseResult<Statement> {
        self.nested(tokens, |parser, tokens| {
            expect_keyword(tokens, Keyword::If)?;
            let condition = parse_condition(tokens)?;
            expect_keyword(tokens, Keyword::Then)?;
            let then_branch = parser.parse_block(tokens)?;

            let statement = if tokens.front().is_keyword(Keyword::Else) {
                expect_keyword(tokens, Keyword::Else)?;
                let else_branch = parser.parse_block(tokens)?;
                Statement::if_else(condition, then_branch, else_branch)
            } else {
                Statement::if_then(condition, then_branch)
            };

            expect_keyword(tokens, Keyword::End)?;
            parser.expect_closer(tokens, Keyword::If)?;
            trace!(%condition, "parsed IF");
            Ok(statement)
        })
    }

    /// `WHILE <condition> DO <block> END WHILE`
    pub fn parse_while(&mut self, tokens: &mut TokenStream) -> ParseResult<Statement> {
        self.nested(tokens, |parser, tokens| {
            expect_keyword(tokens, Keyword::While)?;
            let condition = parse_condition(tokens)?;
            expect_keyword(tokens, Keyword::Do)?;
            let body = parser.parse_block(tokens)?;
            expect_keyword(tokens, Keyword::End)?;
            parser.expect_closer(tokens, Keyword::While)?;
            trace!(%condition, "parsed WHILE");
            Ok(Statement::while_do(condition, body))
        })
    }

    /// A bare identifier naming the instruction to call. The name is not resolved.
    pub fn parse_call(&mut self, tokens: &mut TokenStream) -> ParseResult<Statement> {
        let name = expect_identifier(tokens, "naming the instruction to call")?;
        trace!(instruction = %name.text, "parsed call");
        Ok(Statement::call(name.text))
    }

    fn expect_closer(&self, tokens: &mut TokenStream, opener: Keyword) -> ParseResult<()> {
        if self.strict_closers {
            expect_keyword(tokens, opener).map(|_| ())
        } else {
            expect_any_keyword(tokens).map(|_| ())
        }
    }

    fn nested<F>(&mut self, tokens: &mut TokenStream, parse: F) -> ParseResult<Statement>
    where
        F: FnOnce(&mut Self, &mut TokenStream) -> ParseResult<Statement>,
    {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                at: tokens.location(),
            });
        }
        self.depth += 1;
        let result = parse(self, tokens);
        self.depth -= 1;
        result
    }
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}
