//! Parser for EBNF grammar text

pub mod ast;
mod grammar;

pub use ast::*;
pub use grammar::{parse, parse_statement};
