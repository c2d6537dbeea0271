//! Format registry for AST serialization
//!
//! This module provides a pluggable registry system for program serialization formats.
//! Each format implements the `Formatter` trait and can be registered with `FormatRegistry`.

use crate::bl::ast::{Block, Program};
use crate::bl::config::FormattingConfig;
use std::collections::HashMap;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for program formatters
///
/// Implementors provide a way to serialize a Program, or a bare Block, to a string.
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "bl", "treeviz")
    fn name(&self) -> &str;

    /// Serialize a program to this format
    fn serialize_program(&self, program: &Program) -> Result<String, FormatError>;

    /// Serialize a block (e.g. the result of a statement-only parse)
    fn serialize_block(&self, block: &Block) -> Result<String, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of program formatters
///
/// Formats can be registered and retrieved by name.
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    /// Get a formatter by name
    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a program using the specified format
    pub fn serialize(&self, program: &Program, format: &str) -> Result<String, FormatError> {
        self.lookup(format)?.serialize_program(program)
    }

    pub fn serialize_block(&self, block: &Block, format: &str) -> Result<String, FormatError> {
        self.lookup(format)?.serialize_block(block)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with default formatters
    pub fn with_defaults() -> Self {
        Self::with_config(&FormattingConfig::default())
    }

    /// Create a registry with the built-in formatters, honouring formatting settings
    pub fn with_config(config: &FormattingConfig) -> Self {
        let mut registry = Self::new();

        registry.register(super::BlFormatter::new(config.indent_width));
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);

        registry
    }

    fn lookup(&self, format: &str) -> Result<&dyn Formatter, FormatError> {
        self.get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bl::ast::Statement;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize_program(&self, _program: &Program) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
        fn serialize_block(&self, block: &Block) -> Result<String, FormatError> {
            Ok(format!("{} statements", block.len()))
        }
        fn description(&self) -> &str {
            "Test formatter"
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.formatters.len(), 0);
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert!(registry.has("test"));
        assert!(!registry.has("nonexistent"));
        assert_eq!(registry.get("test").map(|f| f.description()), Some("Test formatter"));
        assert_eq!(registry.list_formats(), vec!["test"]);
    }

    #[test]
    fn test_registry_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert_eq!(
            registry.serialize(&Program::default(), "test"),
            Ok("test output".to_string())
        );
        let block = Block::from_statements(vec![Statement::call("move")]);
        assert_eq!(
            registry.serialize_block(&block, "test"),
            Ok("1 statements".to_string())
        );
    }

    #[test]
    fn test_registry_serialize_not_found() {
        let registry = FormatRegistry::new();
        match registry.serialize(&Program::default(), "nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            other => panic!("Expected FormatNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_registry_defaults() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["bl", "json", "treeviz", "yaml"]);
    }

    #[test]
    fn test_registry_replace_existing() {
        let mut registry = FormatRegistry::with_defaults();
        struct Replacement;
        impl Formatter for Replacement {
            fn name(&self) -> &str {
                "bl"
            }
            fn serialize_program(&self, _program: &Program) -> Result<String, FormatError> {
                Ok("replaced".to_string())
            }
            fn serialize_block(&self, _block: &Block) -> Result<String, FormatError> {
                Ok("replaced".to_string())
            }
        }
        registry.register(Replacement);
        assert_eq!(
            registry.serialize(&Program::default(), "bl"),
            Ok("replaced".to_string())
        );
        assert_eq!(registry.list_formats().len(), 4);
    }
}
