//! In-memory representation of parsed BL code
//!
//!     A [`Program`] has a name, a [`Context`] (the table of user-defined instructions) and a
//!     main body. Bodies are [`Block`]s: ordered sequences of [`Statement`] trees. Everything
//!     here is built once by the parsers and handed out by value; nothing in the tree refers
//!     back to a parent or to the token stream it came from.

pub mod program;
pub mod snapshot;
pub mod statement;
pub mod traits;

pub use crate::bl::token::Condition;
pub use program::{Context, Instruction, Program};
pub use snapshot::{snapshot_from_block, snapshot_from_program, snapshot_from_statement, AstSnapshot};
pub use statement::{Block, Statement};
pub use traits::AstNode;
