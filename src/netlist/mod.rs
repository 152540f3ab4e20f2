//! Parser for netlist files.
//!
//! A netlist is line-oriented: one two-terminal component per line.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist     = { line }
//! line        = comment | component | empty
//! comment     = ('#' | ';') { any_char }
//! component   = identifier node node value
//!
//! identifier  = ('V' | 'R') { non_separator }
//! node        = digit+ | "GND"
//! value       = number [unit_suffix]
//!
//! number      = ['-'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! Node `0` (or `GND`) is the ground reference. The first node is the
//! branch's source terminal, the second its destination.
//!
//! # Component Types
//!
//! | Type | Description | Syntax |
//! |------|-------------|--------|
//! | V | Voltage Source | `V<name> <n+> <n-> <volts>` |
//! | R | Resistor | `R<name> <n+> <n-> <ohms>` |
//!
//! # Example
//!
//! ```text
//! # Voltage divider
//! V1 1 0 10
//! R1 1 2 2
//! R2 2 0 3
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, TableauError};

/// Parse a netlist string into an AST.
pub fn parse(input: &str) -> Result<NetlistAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    let ast = parser.parse()?;
    debug!(components = ast.components.len(), "parsed netlist");
    Ok(ast)
}

/// Parse a netlist file.
pub fn parse_file(path: &Path) -> Result<NetlistAst> {
    let content = fs::read_to_string(path).map_err(|e| TableauError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
