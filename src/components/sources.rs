//! Independent sources.

use crate::circuit::{BranchId, NodeId};

/// An ideal DC voltage source.
///
/// The source enforces v = E on its own branch; its current is whatever the
/// rest of the network demands, so the current coefficient is zero and the
/// source value lands in the right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageSource {
    pub branch: BranchId,
    pub name: String,
    pub nodes: [NodeId; 2], // [positive, negative]
    pub voltage: f64,
}

impl VoltageSource {
    /// Create a new voltage source.
    pub fn new(branch: BranchId, name: String, nodes: [NodeId; 2], voltage: f64) -> Self {
        Self {
            branch,
            name,
            nodes,
            voltage,
        }
    }
}
