//! Configuration loading for the BL parser and tools.
//!
//! `defaults/bl.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files on top of those defaults via
//! [`Loader`] before deserializing into [`BlConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/bl.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlConfig {
    pub parser: ParserConfig,
    pub formatting: FormattingConfig,
}

/// Knobs of the statement and program parsers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    /// Nested `IF`/`WHILE` levels allowed before `NestingTooDeep`
    pub max_nesting_depth: usize,
    /// Any keyword after `END` closes a statement unless set; then `END IF` must close an `IF`
    /// and `END WHILE` a `WHILE`
    pub strict_closers: bool,
    pub allow_primitive_redefinition: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_nesting_depth: 64,
            strict_closers: false,
            allow_primitive_redefinition: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormattingConfig {
    pub indent_width: usize,
    pub default_format: String,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        FormattingConfig {
            indent_width: 4,
            default_format: "bl".to_string(),
        }
    }
}

/// Parser knobs set from the command line; `None` keeps the layered value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOverrides {
    pub max_nesting_depth: Option<usize>,
    pub strict_closers: Option<bool>,
    pub allow_primitive_redefinition: Option<bool>,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Layer the parser knobs that are set in `overrides`.
    pub fn with_parser_overrides(self, overrides: &ParserOverrides) -> Result<Self, ConfigError> {
        let mut loader = self;
        if let Some(depth) = overrides.max_nesting_depth {
            let depth = i64::try_from(depth).unwrap_or(i64::MAX);
            loader = loader.set_override("parser.max_nesting_depth", depth)?;
        }
        if let Some(strict) = overrides.strict_closers {
            loader = loader.set_override("parser.strict_closers", strict)?;
        }
        if let Some(allow) = overrides.allow_primitive_redefinition {
            loader = loader.set_override("parser.allow_primitive_redefinition", allow)?;
        }
        Ok(loader)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<BlConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.parser.max_nesting_depth, 64);
        assert!(!config.parser.strict_closers);
        assert_eq!(config.formatting.indent_width, 4);
    }

    #[test]
    fn embedded_defaults_match_default_impl() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config, BlConfig::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parser.max_nesting_depth", 3_i64)
            .expect("override to apply")
            .set_override("formatting.default_format", "treeviz")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.max_nesting_depth, 3);
        assert_eq!(config.formatting.default_format, "treeviz");
        assert!(!config.parser.strict_closers);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[parser]\nstrict_closers = true").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert!(config.parser.strict_closers);
        assert_eq!(config.parser.max_nesting_depth, 64);
    }

    #[test]
    fn parser_overrides_win_over_files() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[parser]\nmax_nesting_depth = 8\nstrict_closers = true").expect("write config");

        let overrides = ParserOverrides {
            strict_closers: Some(false),
            allow_primitive_redefinition: Some(true),
            ..ParserOverrides::default()
        };
        let config = Loader::new()
            .with_file(file.path())
            .with_parser_overrides(&overrides)
            .expect("overrides to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.max_nesting_depth, 8);
        assert!(!config.parser.strict_closers);
        assert!(config.parser.allow_primitive_redefinition);
    }

    #[test]
    fn empty_parser_overrides_change_nothing() {
        let config = Loader::new()
            .with_parser_overrides(&ParserOverrides::default())
            .expect("overrides to apply")
            .build()
            .expect("config to build");
        assert_eq!(config, BlConfig::default());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/bl.toml")
            .build()
            .expect("config to build");
        assert_eq!(config, BlConfig::default());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        assert!(Loader::new().with_file("/nonexistent/bl.toml").build().is_err());
    }
}
