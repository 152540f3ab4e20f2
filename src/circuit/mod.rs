//! Circuit representation and validation.
//!
//! This module provides the in-memory netlist model after parsing.
//! The [`Circuit`] struct holds all components in netlist order together
//! with the topology counts the tableau is sized from.

mod model;
mod types;
mod validate;

pub use model::Circuit;
pub use types::*;
pub use validate::{validate_circuit, MAX_TABLEAU_SIZE};
