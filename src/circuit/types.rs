//! Core types for circuit representation.

use std::fmt;

/// A node in the circuit, numbered as in the netlist.
/// Node 0 is always ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The ground node (always index 0).
    pub const GROUND: NodeId = NodeId(0);

    /// Check if this is the ground node.
    pub fn is_ground(&self) -> bool {
        self.0 == 0
    }

    /// Zero-based matrix row of this node, or `None` for ground.
    ///
    /// Ground has no incidence row and no voltage unknown. Every place that
    /// maps a netlist node onto a matrix index (incidence rows, node-voltage
    /// unknowns, solution lookup) goes through here.
    pub fn matrix_row(&self) -> Option<usize> {
        if self.is_ground() {
            None
        } else {
            Some(self.0 - 1)
        }
    }

    /// Inverse of [`NodeId::matrix_row`].
    pub fn from_matrix_row(row: usize) -> Self {
        NodeId(row + 1)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A branch of the circuit. One per component, indexed by netlist position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchId(pub usize);

impl BranchId {
    /// One-based branch number as printed in reports.
    pub fn number(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.number())
    }
}

/// Variable index in the tableau solution vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarIndex {
    /// Node voltage variable
    NodeVoltage(NodeId),
    /// Branch voltage variable
    BranchVoltage(BranchId),
    /// Branch current variable
    BranchCurrent(BranchId),
}

impl VarIndex {
    /// Index of the first branch voltage. KVL rows start here too.
    pub fn branch_voltage_offset(num_nodes: usize) -> usize {
        num_nodes
    }

    /// Index of the first branch current. Constitutive rows start here too.
    pub fn branch_current_offset(num_nodes: usize, num_branches: usize) -> usize {
        num_nodes + num_branches
    }

    /// Get the raw index into the solution vector.
    ///
    /// Node voltages come first (excluding ground), then branch voltages,
    /// then branch currents. Returns `None` for the ground node voltage.
    pub fn to_index(&self, num_nodes: usize, num_branches: usize) -> Option<usize> {
        match self {
            VarIndex::NodeVoltage(node) => node.matrix_row(),
            VarIndex::BranchVoltage(BranchId(b)) => {
                Some(Self::branch_voltage_offset(num_nodes) + b)
            }
            VarIndex::BranchCurrent(BranchId(b)) => {
                Some(Self::branch_current_offset(num_nodes, num_branches) + b)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_has_no_row() {
        assert_eq!(NodeId::GROUND.matrix_row(), None);
        assert_eq!(NodeId(1).matrix_row(), Some(0));
        assert_eq!(NodeId(4).matrix_row(), Some(3));
        assert_eq!(NodeId::from_matrix_row(3), NodeId(4));
    }

    #[test]
    fn test_var_index_layout() {
        // 3 nodes, 2 branches: [e1 e2 e3 | v1 v2 | i1 i2]
        assert_eq!(VarIndex::NodeVoltage(NodeId(2)).to_index(3, 2), Some(1));
        assert_eq!(VarIndex::NodeVoltage(NodeId::GROUND).to_index(3, 2), None);
        assert_eq!(VarIndex::BranchVoltage(BranchId(1)).to_index(3, 2), Some(4));
        assert_eq!(VarIndex::BranchCurrent(BranchId(0)).to_index(3, 2), Some(5));
        assert_eq!(VarIndex::branch_voltage_offset(3), 3);
        assert_eq!(VarIndex::branch_current_offset(3, 2), 5);
    }
}
