//! # Sparse Tableau
//!
//! A DC operating point solver for resistive circuits.
//!
//! This library provides:
//! - A line-oriented netlist format for voltage sources and resistors
//! - Sparse tableau assembly (KCL, KVL and element equations in one system)
//! - Gaussian elimination with partial pivoting and singularity detection
//! - A session that holds one loaded netlist and serves its results
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`netlist`] - Lexer and parser for netlist text
//! - [`circuit`] - Netlist model, node/branch identifiers and validation
//! - [`components`] - Element models and their constitutive coefficients
//! - [`solver`] - Incidence matrix, tableau assembly and the linear solver
//! - [`session`] - Load/query/clear lifecycle around one netlist
//! - [`report`] - Text rendering of currents and voltages
//! - [`console`] - Interactive menu (CLI only)
//!
//! ## Usage
//!
//! ```
//! use sparse_tableau::{CircuitSession, SolveStatus};
//!
//! let mut session = CircuitSession::new();
//! let status = session.load_str("V1 1 0 10\nR1 1 2 2\nR2 2 0 3").unwrap();
//! assert!(matches!(status, SolveStatus::Solved(_)));
//!
//! let e2 = session.node_voltages().unwrap()[1];
//! assert!((e2 - 6.0).abs() < 1e-9);
//! ```
//!
//! ## Tableau Method
//!
//! For a netlist with N non-ground nodes and B branches the solver builds a
//! square system of size N + 2B over node voltages, branch voltages and
//! branch currents:
//!
//! 1. Build the N x B incidence matrix A
//! 2. Stamp KCL (A·i = 0), KVL (v - Aᵀ·e = 0) and one element equation per
//!    branch into the tableau, with source values on the right-hand side
//! 3. Reduce with partial pivoting; a zero pivot marks the netlist singular
//! 4. Back-substitute for every unknown

pub mod circuit;
pub mod components;
pub mod error;
pub mod netlist;
pub mod report;
pub mod session;
pub mod solver;

#[cfg(feature = "cli")]
pub mod console;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use error::{Result, SingularKind, TableauError};
pub use session::{CircuitSession, SolveStatus, SolverConfig};
pub use solver::Solution;
