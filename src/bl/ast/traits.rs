//! AST traits - Common interfaces for uniform node access

use super::program::{Instruction, Program};
use super::statement::{Block, Statement};

/// Uniform node information used by snapshots and tree views
pub trait AstNode {
    /// Node type name (e.g. "Program", "While")
    fn node_type(&self) -> &'static str;

    /// Short human-readable label for the node
    fn display_label(&self) -> String;
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

impl AstNode for Program {
    fn node_type(&self) -> &'static str {
        "Program"
    }

    fn display_label(&self) -> String {
        format!(
            "{} ({}, {})",
            self.name,
            plural(self.context.len(), "instruction"),
            plural(self.body.len(), "statement")
        )
    }
}

impl AstNode for Instruction {
    fn node_type(&self) -> &'static str {
        "Instruction"
    }

    fn display_label(&self) -> String {
        self.name.clone()
    }
}

impl AstNode for Block {
    fn node_type(&self) -> &'static str {
        "Block"
    }

    fn display_label(&self) -> String {
        plural(self.len(), "statement")
    }
}

impl AstNode for Statement {
    fn node_type(&self) -> &'static str {
        match self {
            Statement::Block { .. } => "Block",
            Statement::If { .. } => "If",
            Statement::IfElse { .. } => "IfElse",
            Statement::While { .. } => "While",
            Statement::Call { .. } => "Call",
        }
    }

    fn display_label(&self) -> String {
        match self {
            Statement::Block { statements } => statements.display_label(),
            Statement::If { condition, .. } => format!("IF {condition}"),
            Statement::IfElse { condition, .. } => format!("IF {condition} ELSE"),
            Statement::While { condition, .. } => format!("WHILE {condition}"),
            Statement::Call { instruction } => instruction.clone(),
        }
    }
}
