//! BL: a small block-structured language for programming grid creatures
//!
//! Pipeline: source text -> [`lexing`] -> [`token::TokenStream`] -> [`parsing`] ->
//! [`ast::Program`] -> [`formats`].

pub mod ast;
pub mod config;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod testing;
pub mod token;
