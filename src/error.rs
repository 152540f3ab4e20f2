//! Error types for the sparse tableau solver.
//!
//! This module provides a unified error type [`TableauError`] that covers
//! all error conditions that can occur during netlist parsing, netlist
//! validation, solving, and the interactive session.

use std::fmt;

use thiserror::Error;

/// Result type alias using [`TableauError`].
pub type Result<T> = std::result::Result<T, TableauError>;

/// How a singular tableau fails to have a unique solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingularKind {
    /// Zero pivot with a non-zero right-hand side: no solution exists.
    Inconsistent,
    /// Zero pivot with a zero right-hand side: infinitely many solutions.
    UnderDetermined,
}

impl fmt::Display for SingularKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SingularKind::Inconsistent => write!(f, "inconsistent system"),
            SingularKind::UnderDetermined => write!(f, "under-determined system"),
        }
    }
}

/// Unified error type for all tableau operations.
#[derive(Error, Debug)]
pub enum TableauError {
    // ============ Netlist Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid component definition
    #[error("Invalid component '{name}' at line {line}: {message}")]
    InvalidComponent {
        name: String,
        line: usize,
        message: String,
    },

    /// Unknown component type
    #[error("Unknown component type '{component_type}' at line {line}")]
    UnknownComponentType { component_type: String, line: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{param}' for component '{component}': {message}")]
    InvalidParameter {
        component: String,
        param: String,
        message: String,
    },

    // ============ Netlist Validation Errors ============
    /// Structurally malformed netlist
    #[error("Malformed netlist: {message}")]
    MalformedNetlist { message: String },

    // ============ Solver Errors ============
    /// The tableau has no unique solution
    #[error("Singular matrix at row {row}: {kind}")]
    SingularSystem { row: usize, kind: SingularKind },

    /// Matrix and model dimensions disagree
    #[error("Invalid matrix dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    // ============ Session Errors ============
    /// A query was made before any netlist was loaded
    #[error("No netlist loaded")]
    NoNetlistLoaded,

    // ============ I/O Errors ============
    /// Error reading netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error reading from or writing to the console
    #[error("Console I/O error: {source}")]
    ConsoleIo {
        #[from]
        source: std::io::Error,
    },
}

impl TableauError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(
        name: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidComponent {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a malformed netlist error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedNetlist {
            message: message.into(),
        }
    }

    /// Whether this error describes a netlist the user has to fix.
    pub fn is_netlist_error(&self) -> bool {
        matches!(
            self,
            Self::LexerError { .. }
                | Self::ParseError { .. }
                | Self::InvalidComponent { .. }
                | Self::UnknownComponentType { .. }
                | Self::InvalidParameter { .. }
                | Self::MalformedNetlist { .. }
        )
    }
}
