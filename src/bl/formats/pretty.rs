//! Canonical BL pretty-printer
//!
//! Prints a program back as BL source, one statement per line, nested bodies indented by a
//! fixed number of spaces per level:
//!
//! ```text
//! PROGRAM p IS
//!
//!     INSTRUCTION foo IS
//!         move
//!     END foo
//!
//! BEGIN
//!     WHILE true DO
//!         foo
//!     END WHILE
//! END p
//! ```
//!
//! Instructions are printed in definition order. Parsing the output yields the same program.
//! A nested `Statement::Block` has no surface syntax of its own; its statements are printed
//! inline at the current level.

use super::registry::{FormatError, Formatter};
use crate::bl::ast::{Block, Program, Statement};

pub struct BlFormatter {
    indent_width: usize,
}

impl BlFormatter {
    pub fn new(indent_width: usize) -> Self {
        BlFormatter { indent_width }
    }
}

impl Default for BlFormatter {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Formatter for BlFormatter {
    fn name(&self) -> &str {
        "bl"
    }

    fn serialize_program(&self, program: &Program) -> Result<String, FormatError> {
        Ok(to_bl_string(program, self.indent_width))
    }

    fn serialize_block(&self, block: &Block) -> Result<String, FormatError> {
        let mut printer = Printer::new(self.indent_width);
        printer.block(block, 0);
        Ok(printer.output)
    }

    fn description(&self) -> &str {
        "Canonical BL source"
    }
}

/// Print `program` as BL source with `indent_width` spaces per level.
pub fn to_bl_string(program: &Program, indent_width: usize) -> String {
    let mut printer = Printer::new(indent_width);
    printer.line(0, &format!("PROGRAM {} IS", program.name));
    printer.blank();
    for instruction in &program.context {
        printer.line(1, &format!("INSTRUCTION {} IS", instruction.name));
        printer.block(&instruction.body, 2);
        printer.line(1, &format!("END {}", instruction.name));
        printer.blank();
    }
    printer.line(0, "BEGIN");
    printer.block(&program.body, 1);
    printer.line(0, &format!("END {}", program.name));
    printer.output
}

struct Printer {
    indent_width: usize,
    output: String,
}

impl Printer {
    fn new(indent_width: usize) -> Self {
        Printer {
            indent_width,
            output: String::new(),
        }
    }

    fn line(&mut self, level: usize, text: &str) {
        self.output.push_str(&" ".repeat(level * self.indent_width));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn blank(&mut self) {
        self.output.push('\n');
    }

    fn block(&mut self, block: &Block, level: usize) {
        for statement in block {
            self.statement(statement, level);
        }
    }

    fn statement(&mut self, statement: &Statement, level: usize) {
        match statement {
            Statement::Block { statements } => self.block(statements, level),
            Statement::If {
                condition,
                then_branch,
            } => {
                self.line(level, &format!("IF {condition} THEN"));
                self.block(then_branch, level + 1);
                self.line(level, "END IF");
            }
            Statement::IfElse {
                condition,
                then_branch,
                else_branch,
            } => {
                self.line(level, &format!("IF {condition} THEN"));
                self.block(then_branch, level + 1);
                self.line(level, "ELSE");
                self.block(else_branch, level + 1);
                self.line(level, "END IF");
            }
            Statement::While { condition, body } => {
                self.line(level, &format!("WHILE {condition} DO"));
                self.block(body, level + 1);
                self.line(level, "END WHILE");
            }
            Statement::Call { instruction } => self.line(level, instruction),
        }
    }
}
