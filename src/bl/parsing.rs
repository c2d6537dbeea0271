//! Parsing module for BL
//!
//! Two recursive-descent parsers over a [`TokenStream`]:
//!
//! - [`StatementParser`]: one statement (`IF`, `IF`/`ELSE`, `WHILE`, call) or a maximal block
//!   of statements. Recurses into itself for nested bodies.
//! - [`ProgramParser`]: header, instruction definitions, main body and footer. Delegates every
//!   body to the statement parser.
//!
//! Both consume tokens left to right with one token of lookahead and stop at the first
//! violation with a [`ParseError`]. No partial result is returned.
//!
//! The free functions below run the whole pipeline (tokenize, then parse) with the default
//! [`ParserConfig`]. Use [`crate::bl::loader::ProgramLoader`] to read files or to pick a
//! configuration.

pub mod error;
mod expect;
pub mod program;
pub mod statement;

pub use error::{format_source_context, Construct, ParseError, ParseResult};
pub use program::ProgramParser;
pub use statement::{in_first_set, parse_condition, StatementParser};

use crate::bl::ast::{Block, Program, Statement};
use crate::bl::config::ParserConfig;
use crate::bl::lexing::token_stream;
use expect::expect_end_of_input;

/// Parse a complete program from source text.
pub fn parse_program(source: &str) -> ParseResult<Program> {
    ProgramParser::new(&ParserConfig::default()).parse(&mut token_stream(source))
}

/// Parse a single statement; nothing but the sentinel may follow it.
pub fn parse_statement(source: &str) -> ParseResult<Statement> {
    parse_statement_with(source, &ParserConfig::default())
}

/// Parse a block; nothing but the sentinel may follow it.
pub fn parse_block(source: &str) -> ParseResult<Block> {
    parse_block_with(source, &ParserConfig::default())
}

pub(crate) fn parse_statement_with(source: &str, config: &ParserConfig) -> ParseResult<Statement> {
    let mut tokens = token_stream(source);
    let statement = StatementParser::new(config).parse(&mut tokens)?;
    expect_end_of_input(&tokens)?;
    Ok(statement)
}

pub(crate) fn parse_block_with(source: &str, config: &ParserConfig) -> ParseResult<Block> {
    let mut tokens = token_stream(source);
    let block = StatementParser::new(config).parse_block(&mut tokens)?;
    expect_end_of_input(&tokens)?;
    Ok(block)
}
