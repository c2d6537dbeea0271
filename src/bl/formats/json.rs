//! JSON formatter
//!
//! Serializes the AST types directly with serde. Statements are tagged by `kind`, conditions
//! use their enumerant names and the instruction table is a list in definition order.

use super::registry::{FormatError, Formatter};
use crate::bl::ast::{Block, Program};
use serde::Serialize;

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, FormatError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize_program(&self, program: &Program) -> Result<String, FormatError> {
        to_pretty_json(program)
    }

    fn serialize_block(&self, block: &Block) -> Result<String, FormatError> {
        to_pretty_json(block)
    }

    fn description(&self) -> &str {
        "JSON serialization of the AST"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bl::parsing::parse_program;
    use serde_json::{json, Value};

    #[test]
    fn test_program_json() {
        let program = parse_program(
            "PROGRAM p IS INSTRUCTION foo IS x END foo BEGIN WHILE true DO foo END WHILE END p",
        )
        .unwrap();
        let text = JsonFormatter.serialize_program(&program).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "p",
                "context": [
                    { "name": "foo", "body": [ { "kind": "call", "instruction": "x" } ] }
                ],
                "body": [
                    {
                        "kind": "while",
                        "condition": "TRUE",
                        "body": [ { "kind": "call", "instruction": "foo" } ]
                    }
                ]
            })
        );
    }
}
