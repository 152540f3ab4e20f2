//! Circuit validation.

use tracing::warn;

use crate::error::{Result, TableauError};

use super::Circuit;

/// Largest tableau dimension (N + 2B) a circuit may need.
///
/// The tableau is stored dense, so this caps memory at roughly
/// `MAX_TABLEAU_SIZE² * 8` bytes (about 134 MB).
pub const MAX_TABLEAU_SIZE: usize = 4096;

/// Validate a circuit before assembling its tableau.
///
/// Checks:
/// - The circuit has at least one component
/// - The tableau dimension is at most [`MAX_TABLEAU_SIZE`]
/// - Every terminal lies in `[0, N]`
///
/// Floating nodes and contradictory sources are left for the solver to
/// classify as singular.
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    if circuit.components.is_empty() {
        return Err(TableauError::malformed("netlist has no components"));
    }

    match circuit.checked_matrix_size() {
        Some(size) if size <= MAX_TABLEAU_SIZE => {}
        _ => {
            return Err(TableauError::malformed(format!(
                "{} nodes and {} branches exceed the tableau limit of {} unknowns",
                circuit.num_nodes, circuit.num_branches, MAX_TABLEAU_SIZE
            )));
        }
    }

    for component in &circuit.components {
        for node in component.nodes() {
            if node.0 > circuit.num_nodes {
                return Err(TableauError::malformed(format!(
                    "component '{}' references node {} outside [0, {}]",
                    component.name(),
                    node.0,
                    circuit.num_nodes
                )));
            }
        }

        if component.is_self_loop() {
            warn!(
                component = component.name(),
                node = component.nodes()[0].0,
                "branch connects a node to itself"
            );
        }
    }

    Ok(())
}
