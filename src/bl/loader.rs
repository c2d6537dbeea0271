//! Program loading utilities
//!
//! This module provides `ProgramLoader` - a utility for loading BL source from files or
//! strings and running the tokenizer and parsers on it. It is used by the CLI and by tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use bl_parser::bl::loader::ProgramLoader;
//!
//! // From file
//! let program = ProgramLoader::from_path("samples/program-01-minimal.bl")?.parse()?;
//!
//! // From string, with a custom configuration
//! let block = ProgramLoader::from_string("move skip")
//!     .with_config(config.parser.clone())
//!     .parse_block()?;
//! ```

use crate::bl::ast::{Block, Program, Statement};
use crate::bl::config::ParserConfig;
use crate::bl::lexing::tokenize;
use crate::bl::parsing::{
    format_source_context, parse_block_with, parse_statement_with, ParseError, ProgramParser,
};
use crate::bl::token::{Token, TokenStream};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Error that can occur when loading programs
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// IO error when reading file
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Parsing error
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Program loader with parse shortcuts
pub struct ProgramLoader {
    source: String,
    config: ParserConfig,
}

impl ProgramLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = source.len(), "loaded source");
        Ok(Self::from_string(source))
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        ProgramLoader {
            source: source.into(),
            config: ParserConfig::default(),
        }
    }

    /// Use `config` instead of the default parser settings
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Tokens of the source, sentinel included
    pub fn tokenize(&self) -> Vec<Token> {
        tokenize(&self.source)
    }

    /// Parse the source as a complete program
    pub fn parse(&self) -> Result<Program, LoaderError> {
        let mut tokens = TokenStream::new(self.tokenize());
        debug!(tokens = tokens.len(), "parsing program");
        Ok(ProgramParser::new(&self.config).parse(&mut tokens)?)
    }

    /// Parse the source as exactly one statement
    pub fn parse_statement(&self) -> Result<Statement, LoaderError> {
        debug!("parsing statement");
        Ok(parse_statement_with(&self.source, &self.config)?)
    }

    /// Parse the source as a block of statements
    pub fn parse_block(&self) -> Result<Block, LoaderError> {
        debug!("parsing block");
        Ok(parse_block_with(&self.source, &self.config)?)
    }

    /// Numbered source lines around the location of `error`
    pub fn error_context(&self, error: &ParseError) -> String {
        format_source_context(&self.source, error.location())
    }

    /// Get the raw source string
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_string_parse() {
        let program = ProgramLoader::from_string("PROGRAM p IS BEGIN move END p")
            .parse()
            .unwrap();
        assert_eq!(program.name, "p");
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "PROGRAM p IS\nBEGIN\n  turnleft\nEND p\n").unwrap();

        let loader = ProgramLoader::from_path(file.path()).unwrap();
        assert!(loader.source().contains("turnleft"));
        assert_eq!(loader.parse().unwrap().body.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let result = ProgramLoader::from_path("/nonexistent/program.bl");
        assert!(matches!(result, Err(LoaderError::Io { .. })));
    }

    #[test]
    fn test_with_config() {
        let config = ParserConfig {
            max_nesting_depth: 0,
            ..ParserConfig::default()
        };
        let loader = ProgramLoader::from_string("WHILE true DO move END WHILE");
        assert!(loader.parse_statement().is_ok());

        let loader = loader.with_config(config);
        assert!(matches!(
            loader.parse_statement(),
            Err(LoaderError::Parse(ParseError::NestingTooDeep { .. }))
        ));
    }

    #[test]
    fn test_error_context_points_at_line() {
        let loader = ProgramLoader::from_string("PROGRAM p IS\nBEGIN\n  move\nEND q\n");
        let LoaderError::Parse(error) = loader.parse().unwrap_err() else {
            panic!("expected a parse error");
        };
        let context = loader.error_context(&error);
        assert!(context.contains(">>   4 | END q"));
    }

    #[test]
    fn test_tokenize_ends_with_sentinel() {
        let tokens = ProgramLoader::from_string("move").tokenize();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[1].is_end_of_input());
    }
}
