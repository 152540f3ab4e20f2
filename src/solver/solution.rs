//! Solved tableau unknowns.

use crate::circuit::{BranchId, NodeId, VarIndex};

/// The solution vector of a non-singular tableau.
///
/// Layout: `[0, N)` node voltages, `[N, N+B)` branch voltages,
/// `[N+B, N+2B)` branch currents. A `Solution` only exists for a system that
/// reduced without a zero pivot, so holding one means the values are valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    values: Vec<f64>,
    num_nodes: usize,
    num_branches: usize,
}

impl Solution {
    pub(crate) fn new(values: Vec<f64>, num_nodes: usize, num_branches: usize) -> Self {
        debug_assert_eq!(values.len(), num_nodes + 2 * num_branches);
        Self {
            values,
            num_nodes,
            num_branches,
        }
    }

    /// Number of unknowns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the circuit had no unknowns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of non-ground nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of branches.
    pub fn num_branches(&self) -> usize {
        self.num_branches
    }

    /// The whole unknown vector.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Voltages of nodes 1..=N; index `i` is node `i + 1`.
    pub fn node_voltages(&self) -> &[f64] {
        &self.values[..self.branch_voltage_offset()]
    }

    /// Voltages across branches; index `i` is branch `i + 1` as printed.
    pub fn branch_voltages(&self) -> &[f64] {
        &self.values[self.branch_voltage_offset()..self.branch_current_offset()]
    }

    /// Currents through branches, source terminal to destination terminal.
    pub fn branch_currents(&self) -> &[f64] {
        &self.values[self.branch_current_offset()..]
    }

    fn branch_voltage_offset(&self) -> usize {
        VarIndex::branch_voltage_offset(self.num_nodes)
    }

    fn branch_current_offset(&self) -> usize {
        VarIndex::branch_current_offset(self.num_nodes, self.num_branches)
    }

    /// Voltage of a node; ground is 0 V. `None` past the highest node.
    pub fn node_voltage(&self, node: NodeId) -> Option<f64> {
        if node.is_ground() {
            return Some(0.0);
        }
        if node.0 > self.num_nodes {
            return None;
        }
        self.get(VarIndex::NodeVoltage(node))
    }

    /// Voltage across a branch.
    pub fn branch_voltage(&self, branch: BranchId) -> Option<f64> {
        if branch.0 >= self.num_branches {
            return None;
        }
        self.get(VarIndex::BranchVoltage(branch))
    }

    /// Current through a branch.
    pub fn branch_current(&self, branch: BranchId) -> Option<f64> {
        if branch.0 >= self.num_branches {
            return None;
        }
        self.get(VarIndex::BranchCurrent(branch))
    }

    fn get(&self, var: VarIndex) -> Option<f64> {
        let idx = var.to_index(self.num_nodes, self.num_branches)?;
        self.values.get(idx).copied()
    }
}
