//! Fluent assertion API for AST nodes
//!
//! Each assertion carries a context string (e.g. `body[1].then[0]`) that prefixes every
//! failure message, so a failing check in a deep tree says where it looked.

use crate::bl::ast::{AstNode, Block, Program, Statement};
use crate::bl::token::Condition;

/// Create an assertion builder for a program
pub fn assert_program(program: &Program) -> ProgramAssertion<'_> {
    ProgramAssertion { program }
}

/// Create an assertion builder for a block
pub fn assert_block(block: &Block) -> BlockAssertion<'_> {
    BlockAssertion {
        block,
        context: "block".to_string(),
    }
}

pub fn assert_statement(statement: &Statement) -> StatementAssertion<'_> {
    StatementAssertion {
        statement,
        context: "statement".to_string(),
    }
}

fn summarize(block: &Block) -> String {
    block
        .iter()
        .map(|s| s.display_label())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Program
// ============================================================================

pub struct ProgramAssertion<'a> {
    program: &'a Program,
}

impl<'a> ProgramAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.program.name, expected,
            "Expected program name {:?}, found {:?}",
            expected, self.program.name
        );
        self
    }

    pub fn instruction_count(self, expected: usize) -> Self {
        let actual = self.program.context.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} instructions, found {}: [{}]",
            expected,
            actual,
            self.program.context.names().collect::<Vec<_>>().join(", ")
        );
        self
    }

    /// Assert the instruction names, in definition order
    pub fn instruction_names(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.program.context.names().collect();
        assert_eq!(actual, expected, "Instruction names differ");
        self
    }

    /// Assert on the body of a named instruction
    pub fn instruction<F>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        let Some(body) = self.program.context.get(name) else {
            panic!(
                "Instruction {:?} not defined (defined: [{}])",
                name,
                self.program.context.names().collect::<Vec<_>>().join(", ")
            );
        };
        assertion(BlockAssertion {
            block: body,
            context: format!("instruction {name}"),
        });
        self
    }

    /// Assert on the main body
    pub fn body<F>(self, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        assertion(BlockAssertion {
            block: &self.program.body,
            context: "body".to_string(),
        });
        self
    }
}

// ============================================================================
// Block
// ============================================================================

pub struct BlockAssertion<'a> {
    pub(crate) block: &'a Block,
    pub(crate) context: String,
}

impl<'a> BlockAssertion<'a> {
    pub fn count(self, expected: usize) -> Self {
        let actual = self.block.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} statements, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(self.block)
        );
        self
    }

    pub fn empty(self) -> Self {
        self.count(0)
    }

    /// Assert the block is a sequence of calls to exactly these instructions
    pub fn calls(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .block
            .iter()
            .map(|statement| match statement {
                Statement::Call { instruction } => instruction.as_str(),
                other => panic!(
                    "{}: Expected only calls, found {}",
                    self.context,
                    other.node_type()
                ),
            })
            .collect();
        assert_eq!(actual, expected, "{}: Calls differ", self.context);
        self
    }

    pub fn statement<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(StatementAssertion<'a>),
    {
        let Some(statement) = self.block.get(index) else {
            panic!(
                "{}: Statement index {} out of bounds ({} statements)",
                self.context,
                index,
                self.block.len()
            );
        };
        assertion(StatementAssertion {
            statement,
            context: format!("{}[{}]", self.context, index),
        });
        self
    }
}

// ============================================================================
// Statement
// ============================================================================

pub struct StatementAssertion<'a> {
    pub(crate) statement: &'a Statement,
    pub(crate) context: String,
}

impl<'a> StatementAssertion<'a> {
    /// Assert this is a call to `expected`
    pub fn call(self, expected: &str) -> Self {
        match self.statement {
            Statement::Call { instruction } => assert_eq!(
                instruction, expected,
                "{}: Expected call to {:?}, found call to {:?}",
                self.context, expected, instruction
            ),
            other => panic!("{}: Expected Call, found {}", self.context, other.node_type()),
        }
        self
    }

    /// Assert this is an `IF` without `ELSE`
    pub fn if_then<F>(self, condition: Condition, then_branch: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        match self.statement {
            Statement::If {
                condition: actual,
                then_branch: block,
            } => {
                self.check_condition(condition, *actual);
                then_branch(self.child(block, "then"));
            }
            other => panic!("{}: Expected If, found {}", self.context, other.node_type()),
        }
        self
    }

    pub fn if_else<F, G>(self, condition: Condition, then_branch: F, else_branch: G) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
        G: FnOnce(BlockAssertion<'a>),
    {
        match self.statement {
            Statement::IfElse {
                condition: actual,
                then_branch: then_block,
                else_branch: else_block,
            } => {
                self.check_condition(condition, *actual);
                then_branch(self.child(then_block, "then"));
                else_branch(self.child(else_block, "else"));
            }
            other => panic!("{}: Expected IfElse, found {}", self.context, other.node_type()),
        }
        self
    }

    pub fn while_do<F>(self, condition: Condition, body: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        match self.statement {
            Statement::While {
                condition: actual,
                body: block,
            } => {
                self.check_condition(condition, *actual);
                body(self.child(block, "body"));
            }
            other => panic!("{}: Expected While, found {}", self.context, other.node_type()),
        }
        self
    }

    fn check_condition(&self, expected: Condition, actual: Condition) {
        assert_eq!(
            actual, expected,
            "{}: Expected condition {}, found {}",
            self.context, expected, actual
        );
    }

    fn child(&self, block: &'a Block, role: &str) -> BlockAssertion<'a> {
        BlockAssertion {
            block,
            context: format!("{}.{}", self.context, role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bl::parsing::parse_program;

    #[test]
    fn test_fluent_assertions_pass() {
        let program = parse_program(
            "PROGRAM p IS INSTRUCTION foo IS move skip END foo \
             BEGIN WHILE true DO IF random THEN foo ELSE turnleft END IF END WHILE END p",
        )
        .unwrap();

        assert_program(&program)
            .name("p")
            .instruction_count(1)
            .instruction_names(&["foo"])
            .instruction("foo", |body| {
                body.calls(&["move", "skip"]);
            })
            .body(|body| {
                body.count(1).statement(0, |s| {
                    s.while_do(Condition::True, |inner| {
                        inner.count(1).statement(0, |s| {
                            s.if_else(
                                Condition::Random,
                                |then| {
                                    then.calls(&["foo"]);
                                },
                                |otherwise| {
                                    otherwise.calls(&["turnleft"]);
                                },
                            );
                        });
                    });
                });
            });
    }

    #[test]
    #[should_panic(expected = "body[0]: Expected While, found Call")]
    fn test_failure_names_location() {
        let program = parse_program("PROGRAM p IS BEGIN move END p").unwrap();
        assert_program(&program).body(|body| {
            body.statement(0, |s| {
                s.while_do(Condition::True, |_| {});
            });
        });
    }

    #[test]
    #[should_panic(expected = "Expected 2 statements, found 1")]
    fn test_count_mismatch() {
        let block = Block::from_statements(vec![Statement::call("move")]);
        assert_block(&block).count(2);
    }
}
