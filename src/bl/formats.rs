//! Output formats for parsed programs
//!
//! - `bl`: canonical BL source (pretty-printer)
//! - `treeviz`: one line per node tree view
//! - `json` / `yaml`: serde serialization of the AST
//!
//! All of them are reachable through [`FormatRegistry`].

pub mod json;
pub mod pretty;
pub mod registry;
pub mod treeviz;
pub mod yaml;

pub use json::JsonFormatter;
pub use pretty::{to_bl_string, BlFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{block_to_treeviz_str, to_treeviz_str, TreevizFormatter};
pub use yaml::YamlFormatter;
