//! Statement trees
//!
//!     A statement is one of the three BL forms (`IF`/`IF-ELSE`, `WHILE`, instruction call) or
//!     a block: an ordered, possibly empty sequence of statements executed in order. Branches
//!     and loop bodies are always blocks, and each node owns its children exclusively, so a
//!     statement value is a finite tree with no shared sub-trees.

use crate::bl::token::Condition;
use serde::Serialize;

/// An ordered sequence of statements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Block {
    statements: Vec<Statement>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_statements(statements: Vec<Statement>) -> Self {
        Block { statements }
    }

    /// Append a statement at the end of the block
    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }
}

impl From<Vec<Statement>> for Block {
    fn from(statements: Vec<Statement>) -> Self {
        Block::from_statements(statements)
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// A node of a statement tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Block {
        statements: Block,
    },
    If {
        condition: Condition,
        then_branch: Block,
    },
    IfElse {
        condition: Condition,
        then_branch: Block,
        else_branch: Block,
    },
    While {
        condition: Condition,
        body: Block,
    },
    Call {
        instruction: String,
    },
}

impl Statement {
    pub fn call(instruction: impl Into<String>) -> Self {
        Statement::Call {
            instruction: instruction.into(),
        }
    }

    pub fn if_then(condition: Condition, then_branch: Block) -> Self {
        Statement::If {
            condition,
            then_branch,
        }
    }

    pub fn if_else(condition: Condition, then_branch: Block, else_branch: Block) -> Self {
        Statement::IfElse {
            condition,
            then_branch,
            else_branch,
        }
    }

    pub fn while_do(condition: Condition, body: Block) -> Self {
        Statement::While { condition, body }
    }

    pub fn block(statements: Block) -> Self {
        Statement::Block { statements }
    }

    /// Condition tested by an `If`, `IfElse` or `While` node
    pub fn condition(&self) -> Option<Condition> {
        match self {
            Statement::If { condition, .. }
            | Statement::IfElse { condition, .. }
            | Statement::While { condition, .. } => Some(*condition),
            Statement::Block { .. } | Statement::Call { .. } => None,
        }
    }

    /// Child blocks in source order
    pub fn child_blocks(&self) -> Vec<&Block> {
        match self {
            Statement::Block { statements } => vec![statements],
            Statement::If { then_branch, .. } => vec![then_branch],
            Statement::IfElse {
                then_branch,
                else_branch,
                ..
            } => vec![then_branch, else_branch],
            Statement::While { body, .. } => vec![body],
            Statement::Call { .. } => vec![],
        }
    }

    /// Deepest chain of nested `If`/`IfElse`/`While` nodes, this one included
    pub fn nesting_depth(&self) -> usize {
        let inner = self
            .child_blocks()
            .into_iter()
            .flat_map(Block::iter)
            .map(Statement::nesting_depth)
            .max()
            .unwrap_or(0);
        match self {
            Statement::Block { .. } | Statement::Call { .. } => inner,
            _ => inner + 1,
        }
    }
}

impl From<Block> for Statement {
    fn from(block: Block) -> Self {
        Statement::block(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_preserves_order() {
        let mut block = Block::new();
        block.push(Statement::call("move"));
        block.push(Statement::call("skip"));
        let names: Vec<_> = block
            .iter()
            .map(|s| match s {
                Statement::Call { instruction } => instruction.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(names, vec!["move", "skip"]);
        assert_eq!(block.len(), 2);
    }

    #[test]
    fn test_condition_accessor() {
        let s = Statement::while_do(Condition::True, Block::new());
        assert_eq!(s.condition(), Some(Condition::True));
        assert_eq!(Statement::call("x").condition(), None);
    }

    #[test]
    fn test_nesting_depth() {
        let inner = Statement::if_then(Condition::Random, vec![Statement::call("x")].into());
        let outer = Statement::while_do(Condition::True, vec![Statement::call("y"), inner].into());
        assert_eq!(outer.nesting_depth(), 2);
        assert_eq!(Statement::call("x").nesting_depth(), 0);
        assert_eq!(Statement::block(vec![outer].into()).nesting_depth(), 2);
    }
}
