//! Treeviz formatter for AST nodes
//!
//! Treeviz is a one line per node view of the tree, handy for eyeballing the shape of a parse.
//! Nesting is encoded as indentation, with 2 characters per level of nesting:
//!
//! <indentation>(per level) <connector> <icon><space><label> (truncated to 30 characters)
//!
//! Example:
//!
//! ⧉ walk (1 instruction, 2 stateme...
//! ├─ ≔ step
//! │ └─ ☰ body: 1 statement
//! │   └─ ↻ WHILE next-is-empty
//! │     └─ ☰ body: 1 statement
//! │       └─ ƒ move
//! └─ ☰ main: 2 statements
//!   ├─ ƒ step
//!   └─ ⑂ IF next-is-wall
//!     └─ ☰ then: 1 statement
//!       └─ ƒ turnright
//!
//! Icons
//!     Program: ⧉
//!     Instruction: ≔
//!     Block: ☰
//!     If: ⑂
//!     IfElse: ⑃
//!     While: ↻
//!     Call: ƒ

use super::registry::{FormatError, Formatter};
use crate::bl::ast::{snapshot_from_block, snapshot_from_program, AstSnapshot, Block, Program};

const MAX_LABEL_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Get the icon for a node type
fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Program" => "⧉",
        "Instruction" => "≔",
        "Block" => "☰",
        "If" => "⑂",
        "IfElse" => "⑃",
        "While" => "↻",
        "Call" => "ƒ",
        _ => "○",
    }
}

/// Blocks are shown with the role they play for their parent
fn node_label(snapshot: &AstSnapshot) -> String {
    let label = match snapshot.attributes.get("role") {
        Some(role) => format!("{role}: {}", snapshot.label),
        None => snapshot.label.clone(),
    };
    truncate(&label, MAX_LABEL_CHARS)
}

fn format_snapshot(
    snapshot: &AstSnapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(&snapshot.node_type);

    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        icon,
        node_label(snapshot)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, &child_prefix, i, child_count));
    }

    output
}

fn format_root_snapshot(snapshot: &AstSnapshot) -> String {
    let icon = get_icon(&snapshot.node_type);
    let mut output = format!("{} {}\n", icon, node_label(snapshot));

    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count));
    }

    output
}

pub fn to_treeviz_str(program: &Program) -> String {
    format_root_snapshot(&snapshot_from_program(program))
}

pub fn block_to_treeviz_str(block: &Block) -> String {
    format_root_snapshot(&snapshot_from_block(block, "block"))
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize_program(&self, program: &Program) -> Result<String, FormatError> {
        Ok(to_treeviz_str(program))
    }

    fn serialize_block(&self, block: &Block) -> Result<String, FormatError> {
        Ok(block_to_treeviz_str(block))
    }

    fn description(&self) -> &str {
        "Tree visualization with one node per line"
    }
}
