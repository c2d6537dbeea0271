//! AST Snapshot - a normalized intermediate representation of the AST tree
//!
//! This module provides a canonical, format-agnostic representation of a parsed program
//! suitable for serialization to any output format (treeviz, JSON, etc.)
//!
//! The snapshot captures the complete tree structure with node types, labels, attributes,
//! and children, so each serializer only deals with presentation and never re-implements
//! the traversal.

use super::traits::AstNode;
use super::{Block, Program, Statement};
use serde::Serialize;
use std::collections::BTreeMap;

/// A snapshot of an AST node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Program", "While", "Call")
    pub node_type: String,

    /// The primary label of the node
    pub label: String,

    /// Additional attributes specific to the node type
    pub attributes: BTreeMap<String, String>,

    /// Child nodes in the tree
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: AstSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of nodes in this snapshot, itself included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AstSnapshot::node_count).sum::<usize>()
    }
}

// ============================================================================
// Snapshot Building Functions
// ============================================================================

/// Snapshot of a whole program: instructions in definition order, then the main body
pub fn snapshot_from_program(program: &Program) -> AstSnapshot {
    let instructions = program.context.iter().map(|instruction| {
        AstSnapshot::new(instruction.node_type(), instruction.display_label())
            .with_child(snapshot_from_block(&instruction.body, "body"))
    });

    AstSnapshot::new(program.node_type(), program.display_label())
        .with_children(instructions.collect())
        .with_child(snapshot_from_block(&program.body, "main"))
}

/// Snapshot of a block; `role` says what the block is to its parent (body, then, else...)
pub fn snapshot_from_block(block: &Block, role: &str) -> AstSnapshot {
    AstSnapshot::new(block.node_type(), block.display_label())
        .with_attribute("role", role)
        .with_children(block.iter().map(snapshot_from_statement).collect())
}

pub fn snapshot_from_statement(statement: &Statement) -> AstSnapshot {
    let snapshot = AstSnapshot::new(statement.node_type(), statement.display_label());
    let snapshot = match statement.condition() {
        Some(condition) => snapshot.with_attribute("condition", condition.as_str()),
        None => snapshot,
    };

    match statement {
        Statement::Block { statements } => {
            snapshot.with_children(statements.iter().map(snapshot_from_statement).collect())
        }
        Statement::If { then_branch, .. } => {
            snapshot.with_child(snapshot_from_block(then_branch, "then"))
        }
        Statement::IfElse {
            then_branch,
            else_branch,
            ..
        } => snapshot
            .with_child(snapshot_from_block(then_branch, "then"))
            .with_child(snapshot_from_block(else_branch, "else")),
        Statement::While { body, .. } => snapshot.with_child(snapshot_from_block(body, "body")),
        Statement::Call { instruction } => snapshot.with_attribute("instruction", instruction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bl::ast::Context;
    use crate::bl::token::Condition;

    #[test]
    fn test_program_snapshot_shape() {
        let mut context = Context::new();
        assert!(context.insert("foo", vec![Statement::call("x")].into()));
        let body = vec![Statement::if_else(
            Condition::Random,
            vec![Statement::call("foo")].into(),
            Block::new(),
        )];
        let program = Program::new("p", context, body.into());

        let snapshot = snapshot_from_program(&program);
        assert_eq!(snapshot.node_type, "Program");
        assert_eq!(snapshot.children.len(), 2);
        assert_eq!(snapshot.children[0].label, "foo");
        assert_eq!(snapshot.children[1].attributes["role"], "main");

        let if_else = &snapshot.children[1].children[0];
        assert_eq!(if_else.node_type, "IfElse");
        assert_eq!(if_else.attributes["condition"], "random");
        assert_eq!(if_else.children[1].attributes["role"], "else");
        // Program, foo, foo body, x, main, if-else, then, call foo, else
        assert_eq!(snapshot.node_count(), 9);
    }
}
