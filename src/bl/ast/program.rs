//! Programs and their instruction tables

use super::statement::Block;
use serde::Serialize;

/// A user-defined instruction: a name and its body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub name: String,
    pub body: Block,
}

/// The instruction table of a program.
///
/// Names are unique. Definition order is kept so that printing a program reproduces the
/// instructions in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Context {
    instructions: Vec<Instruction>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.instructions.iter().any(|i| i.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Block> {
        self.instructions
            .iter()
            .find(|i| i.name == name)
            .map(|i| &i.body)
    }

    /// Add a definition. Returns `false`, leaving the table untouched, when the name is taken.
    #[must_use]
    pub fn insert(&mut self, name: impl Into<String>, body: Block) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.instructions.push(Instruction { name, body });
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<Block> {
        let index = self.instructions.iter().position(|i| i.name == name)?;
        Some(self.instructions.remove(index).body)
    }

    /// Instruction names in definition order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().map(|i| i.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

/// A complete BL program: name, instruction table and main body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub name: String,
    pub context: Context,
    pub body: Block,
}

impl Program {
    pub fn new(name: impl Into<String>, context: Context, body: Block) -> Self {
        Program {
            name: name.into(),
            context,
            body,
        }
    }

    /// Replace name, context and body at once with those of `other`
    pub fn replace_with(&mut self, other: Program) {
        *self = other;
    }
}

impl Default for Program {
    fn default() -> Self {
        Program::new("Unnamed", Context::new(), Block::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bl::ast::Statement;

    #[test]
    fn test_context_rejects_duplicates() {
        let mut context = Context::new();
        assert!(context.insert("foo", Block::new()));
        assert!(!context.insert("foo", vec![Statement::call("x")].into()));
        assert_eq!(context.len(), 1);
        assert_eq!(context.get("foo"), Some(&Block::new()));
    }

    #[test]
    fn test_context_keeps_definition_order() {
        let mut context = Context::new();
        for name in ["zeta", "alpha", "mid"] {
            assert!(context.insert(name, Block::new()));
        }
        assert_eq!(context.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(context.remove("alpha"), Some(Block::new()));
        assert_eq!(context.names().collect::<Vec<_>>(), vec!["zeta", "mid"]);
        assert_eq!(context.remove("alpha"), None);
    }

    #[test]
    fn test_default_program() {
        let program = Program::default();
        assert_eq!(program.name, "Unnamed");
        assert!(program.context.is_empty());
        assert!(program.body.is_empty());
    }
}
