//! Linear passive components.

use crate::circuit::{BranchId, NodeId};

/// A resistor component.
///
/// Its constitutive relation is Ohm's law written in tableau form:
///   v - R * i = 0
#[derive(Debug, Clone, PartialEq)]
pub struct Resistor {
    pub branch: BranchId,
    pub name: String,
    pub nodes: [NodeId; 2], // [source, destination]
    pub resistance: f64,
}

impl Resistor {
    /// Create a new resistor.
    pub fn new(branch: BranchId, name: String, nodes: [NodeId; 2], resistance: f64) -> Self {
        Self {
            branch,
            name,
            nodes,
            resistance,
        }
    }

    /// Coefficient of the branch current in the constitutive row.
    pub fn current_coefficient(&self) -> f64 {
        -self.resistance
    }
}
