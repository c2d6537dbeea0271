//! Program parser
//!
//! ```text
//! program     ::= "PROGRAM" ID "IS" instruction* "BEGIN" block "END" ID EOI
//! instruction ::= "INSTRUCTION" ID "IS" block "END" ID
//! ```
//!
//! Bodies are handed to [`StatementParser`]. The whole stream must be consumed: after the
//! closing program name only the end-of-input sentinel may remain.

use super::error::{Construct, ParseError, ParseResult};
use super::expect::{expect_end_of_input, expect_identifier, expect_keyword};
use super::statement::StatementParser;
use crate::bl::ast::{Block, Context, Program};
use crate::bl::config::ParserConfig;
use crate::bl::token::{is_primitive_instruction, Keyword, TokenStream};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ProgramParser {
    statements: StatementParser,
    allow_primitive_redefinition: bool,
}

impl ProgramParser {
    pub fn new(config: &ParserConfig) -> Self {
        ProgramParser {
            statements: StatementParser::new(config),
            allow_primitive_redefinition: config.allow_primitive_redefinition,
        }
    }

    /// Parse a complete program, consuming the stream up to the sentinel.
    pub fn parse(&mut self, tokens: &mut TokenStream) -> ParseResult<Program> {
        expect_keyword(tokens, Keyword::Program)?;
        let name = expect_identifier(tokens, "naming the program")?.text;
        expect_keyword(tokens, Keyword::Is)?;

        let mut context = Context::new();
        while tokens.front().is_keyword(Keyword::Instruction) {
            self.parse_instruction(tokens, &mut context)?;
        }

        expect_keyword(tokens, Keyword::Begin)?;
        let body = self.statements.parse_block(tokens)?;
        expect_keyword(tokens, Keyword::End)?;

        let at = tokens.location();
        let end_name = expect_identifier(tokens, "closing the program")?.text;
        if end_name != name {
            return Err(ParseError::NameMismatch {
                construct: Construct::Program,
                start: name,
                end: end_name,
                at,
            });
        }
        expect_end_of_input(tokens)?;

        debug!(
            program = %name,
            instructions = context.len(),
            statements = body.len(),
            "parsed program"
        );
        Ok(Program::new(name, context, body))
    }

    /// `INSTRUCTION <id> IS <block> END <id>`, inserted into `context` on success.
    pub fn parse_instruction(
        &mut self,
        tokens: &mut TokenStream,
        context: &mut Context,
    ) -> ParseResult<()> {
        expect_keyword(tokens, Keyword::Instruction)?;
        let start_at = tokens.location();
        let name = expect_identifier(tokens, "naming the instruction")?.text;
        if !self.allow_primitive_redefinition && is_primitive_instruction(&name) {
            return Err(ParseError::PrimitiveRedefinition { name, at: start_at });
        }
        expect_keyword(tokens, Keyword::Is)?;
        let body: Block = self.statements.parse_block(tokens)?;
        expect_keyword(tokens, Keyword::End)?;

        let end_at = tokens.location();
        let end_name = expect_identifier(tokens, "closing the instruction")?.text;
        if end_name != name {
            return Err(ParseError::NameMismatch {
                construct: Construct::Instruction,
                start: name,
                end: end_name,
                at: end_at,
            });
        }
        if context.contains(&name) {
            return Err(ParseError::DuplicateInstruction { name, at: start_at });
        }

        debug!(instruction = %name, statements = body.len(), "parsed instruction");
        let inserted = context.insert(name, body);
        debug_assert!(inserted);
        Ok(())
    }
}

impl Default for ProgramParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

impl Program {
    /// Parse `tokens` and replace this program with the result.
    ///
    /// On error `self` is left untouched.
    pub fn parse_from(&mut self, tokens: &mut TokenStream, config: &ParserConfig) -> ParseResult<()> {
        let parsed = ProgramParser::new(config).parse(tokens)?;
        self.replace_with(parsed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bl::ast::Statement;
    use crate::bl::lexing::token_stream;

    fn parse(source: &str) -> ParseResult<Program> {
        ProgramParser::default().parse(&mut token_stream(source))
    }

    #[test]
    fn test_minimal_program() {
        let program = parse("PROGRAM p IS BEGIN END p").unwrap();
        assert_eq!(program.name, "p");
        assert!(program.context.is_empty());
        assert!(program.body.is_empty());
    }

    #[test]
    fn test_program_with_instruction() {
        let program = parse("PROGRAM p IS INSTRUCTION foo IS x END foo BEGIN foo END p").unwrap();
        assert_eq!(program.context.len(), 1);
        assert_eq!(
            program.context.get("foo"),
            Some(&Block::from_statements(vec![Statement::call("x")]))
        );
        assert_eq!(program.body, Block::from_statements(vec![Statement::call("foo")]));
    }

    #[test]
    fn test_instruction_order_is_kept() {
        let program = parse(
            "PROGRAM p IS INSTRUCTION b IS move END b INSTRUCTION a IS skip END a BEGIN END p",
        )
        .unwrap();
        assert_eq!(program.context.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_instruction() {
        let err = parse(
            "PROGRAM p IS INSTRUCTION foo IS x END foo INSTRUCTION foo IS y END foo BEGIN END p",
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::DuplicateInstruction { ref name, .. } if name == "foo"));
        assert_eq!(err.location().index, 10);
    }

    #[test]
    fn test_program_name_mismatch() {
        let err = parse("PROGRAM p IS BEGIN END q").unwrap_err();
        assert_eq!(
            err,
            ParseError::NameMismatch {
                construct: Construct::Program,
                start: "p".to_string(),
                end: "q".to_string(),
                at: crate::bl::token::Location { index: 5, span: 23..24 },
            }
        );
    }

    #[test]
    fn test_instruction_name_mismatch_is_reported_before_duplicates() {
        let err = parse(
            "PROGRAM p IS INSTRUCTION foo IS x END foo INSTRUCTION foo IS y END bar BEGIN END p",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::NameMismatch { construct: Construct::Instruction, .. }
        ));
    }

    #[test]
    fn test_trailing_input() {
        assert!(matches!(
            parse("PROGRAM p IS BEGIN END p move"),
            Err(ParseError::TrailingInput { ref found, .. }) if found == "move"
        ));
    }

    #[test]
    fn test_sentinel_is_the_only_leftover() {
        let mut tokens = TokenStream::from_lexemes([
            "PROGRAM",
            "p",
            "IS",
            "BEGIN",
            "END",
            "p",
            crate::bl::token::END_OF_INPUT,
            "garbage",
        ]);
        let program = ProgramParser::default().parse(&mut tokens).unwrap();
        assert_eq!(program.name, "p");
        assert_eq!(tokens.len(), 1);
        assert!(tokens.is_at_end());
    }

    #[test]
    fn test_missing_begin() {
        assert!(matches!(
            parse("PROGRAM p IS move END p"),
            Err(ParseError::UnexpectedToken { ref expected, .. }) if expected == "BEGIN"
        ));
    }

    #[test]
    fn test_premature_end_of_input() {
        assert!(matches!(
            parse("PROGRAM p IS BEGIN move"),
            Err(ParseError::UnexpectedEndOfInput { .. })
        ));
    }

    #[test]
    fn test_program_name_must_be_identifier() {
        assert!(matches!(
            parse("PROGRAM WHILE IS BEGIN END WHILE"),
            Err(ParseError::ExpectedIdentifier { .. })
        ));
    }

    #[test]
    fn test_primitive_redefinition() {
        let source = "PROGRAM p IS INSTRUCTION move IS skip END move BEGIN END p";
        assert!(matches!(
            parse(source),
            Err(ParseError::PrimitiveRedefinition { ref name, .. }) if name == "move"
        ));

        let config = ParserConfig {
            allow_primitive_redefinition: true,
            ..ParserConfig::default()
        };
        let program = ProgramParser::new(&config)
            .parse(&mut token_stream(source))
            .unwrap();
        assert!(program.context.contains("move"));
    }

    #[test]
    fn test_parse_from_replaces_only_on_success() {
        let mut program = Program::default();
        let config = ParserConfig::default();

        let failed = program.parse_from(&mut token_stream("PROGRAM p IS BEGIN END q"), &config);
        assert!(failed.is_err());
        assert_eq!(program, Program::default());

        program
            .parse_from(&mut token_stream("PROGRAM p IS BEGIN move END p"), &config)
            .unwrap();
        assert_eq!(program.name, "p");
        assert_eq!(program.body.len(), 1);
    }
}
