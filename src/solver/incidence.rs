//! Node–branch incidence matrix.

use tracing::trace;

use super::matrix::DenseMatrix;
use crate::circuit::Circuit;

/// The N x B incidence matrix of a circuit.
///
/// Entry `(n, b)` is +1 when branch `b` leaves node `n + 1`, -1 when it
/// enters it, and 0 otherwise. Ground has no row.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidenceMatrix {
    matrix: DenseMatrix,
}

impl IncidenceMatrix {
    /// Build the incidence matrix from circuit topology.
    ///
    /// A branch whose terminals coincide gets +1 and -1 on the same entry,
    /// which leaves its column empty.
    pub fn build(circuit: &Circuit) -> Self {
        let mut matrix = DenseMatrix::zeros(circuit.num_nodes, circuit.num_branches);

        for component in &circuit.components {
            let branch = component.branch().0;
            let [source, dest] = component.nodes();
            if let Some(row) = source.matrix_row() {
                matrix.add(row, branch, 1.0);
            }
            if let Some(row) = dest.matrix_row() {
                matrix.add(row, branch, -1.0);
            }
        }

        trace!(rows = matrix.rows(), cols = matrix.cols(), "built incidence matrix");
        Self { matrix }
    }

    /// Number of non-ground nodes (rows).
    pub fn num_nodes(&self) -> usize {
        self.matrix.rows()
    }

    /// Number of branches (columns).
    pub fn num_branches(&self) -> usize {
        self.matrix.cols()
    }

    /// Get the entry for matrix row `row` and branch `branch`.
    pub fn get(&self, row: usize, branch: usize) -> f64 {
        self.matrix.get(row, branch)
    }

    /// Net current leaving each node for the given branch currents (A * i).
    pub fn kcl_residual(&self, currents: &[f64]) -> Vec<f64> {
        (0..self.num_nodes())
            .map(|row| {
                self.matrix
                    .row(row)
                    .iter()
                    .zip(currents)
                    .map(|(a, i)| a * i)
                    .sum()
            })
            .collect()
    }
}
