//! Netlist model: components plus topology counts.

use tracing::debug;

use super::types::{BranchId, VarIndex};
use super::validate::validate_circuit;
use crate::components::Component;
use crate::error::Result;
use crate::netlist::NetlistAst;

/// A complete netlist ready for tableau assembly.
///
/// A `Circuit` is never edited after construction; loading a new netlist
/// builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    /// All components, indexed by branch
    pub components: Vec<Component>,

    /// Highest node index referenced (ground excluded from the count)
    pub num_nodes: usize,

    /// Number of branches (one per component)
    pub num_branches: usize,
}

impl Circuit {
    /// Build a circuit from a parsed AST.
    pub fn from_ast(ast: NetlistAst) -> Result<Self> {
        let components = ast
            .components
            .iter()
            .enumerate()
            .map(|(idx, def)| Component::from_def(BranchId(idx), def))
            .collect::<Result<Vec<_>>>()?;

        Self::from_components(components)
    }

    /// Build a circuit from components already placed in branch order.
    pub fn from_components(components: Vec<Component>) -> Result<Self> {
        let num_nodes = components
            .iter()
            .map(|c| c.max_node().0)
            .max()
            .unwrap_or(0);
        let num_branches = components.len();

        let circuit = Circuit {
            components,
            num_nodes,
            num_branches,
        };
        validate_circuit(&circuit)?;

        debug!(
            nodes = circuit.num_nodes,
            branches = circuit.num_branches,
            size = circuit.matrix_size(),
            "built circuit"
        );

        Ok(circuit)
    }

    /// Get the dimension of the tableau: N node voltages, B branch voltages,
    /// B branch currents.
    ///
    /// Construction rejects circuits whose size does not fit, see
    /// [`Circuit::checked_matrix_size`].
    pub fn matrix_size(&self) -> usize {
        self.num_nodes + 2 * self.num_branches
    }

    /// Tableau dimension, or `None` if it overflows `usize`.
    pub fn checked_matrix_size(&self) -> Option<usize> {
        self.num_branches
            .checked_mul(2)
            .and_then(|b| b.checked_add(self.num_nodes))
    }

    /// Get the solution index for a branch voltage. Also the KVL row of the
    /// branch.
    pub fn branch_voltage_index(&self, branch: BranchId) -> usize {
        VarIndex::branch_voltage_offset(self.num_nodes) + branch.0
    }

    /// Get the solution index for a branch current.
    pub fn branch_current_index(&self, branch: BranchId) -> usize {
        VarIndex::branch_current_offset(self.num_nodes, self.num_branches) + branch.0
    }

    /// Get the constitutive row of a branch.
    pub fn constitutive_row(&self, branch: BranchId) -> usize {
        VarIndex::branch_current_offset(self.num_nodes, self.num_branches) + branch.0
    }
}
