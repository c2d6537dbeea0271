//! YAML formatter, same data model as the JSON one

use super::registry::{FormatError, Formatter};
use crate::bl::ast::{Block, Program};
use serde::Serialize;

fn to_yaml<T: Serialize>(value: &T) -> Result<String, FormatError> {
    serde_yaml::to_string(value).map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize_program(&self, program: &Program) -> Result<String, FormatError> {
        to_yaml(program)
    }

    fn serialize_block(&self, block: &Block) -> Result<String, FormatError> {
        to_yaml(block)
    }

    fn description(&self) -> &str {
        "YAML serialization of the AST"
    }
}
