//! # bl-parser
//!
//! A recursive-descent parser for BL, a small block-structured language: a named program with
//! a table of user-defined instructions and a main body of `IF`/`WHILE`/call statements.
//!
//! File Layout
//!
//! src/bl
//!   ├── token      Token vocabulary, classification and the token stream
//!   ├── lexing     Source text to tokens
//!   ├── parsing    Statement and program parsers, parse errors
//!   ├── ast        Program, Context, Block and Statement
//!   ├── formats    Pretty-printer, treeviz, JSON and YAML output
//!   ├── config     Layered configuration
//!   ├── loader     File/string loading shortcuts
//!   └── testing    Fluent assertions and the sample corpus
//!
//! For testing guidelines, see the [testing module](bl::testing).

pub mod bl;
