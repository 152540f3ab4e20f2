//! Sparse tableau assembly.

use tracing::debug;

use super::incidence::IncidenceMatrix;
use super::matrix::DenseMatrix;
use crate::circuit::{Circuit, MAX_TABLEAU_SIZE};
use crate::error::{Result, TableauError};

/// The augmented tableau `[T | s]` for a circuit.
///
/// `T` is `size x size` with `size = N + 2B` and the extra last column holds
/// the source vector `s`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    matrix: DenseMatrix,
    num_nodes: usize,
    num_branches: usize,
}

impl Tableau {
    /// Assemble the tableau from a circuit and its incidence matrix.
    pub fn assemble(circuit: &Circuit, incidence: &IncidenceMatrix) -> Result<Self> {
        let size = circuit
            .checked_matrix_size()
            .filter(|size| *size <= MAX_TABLEAU_SIZE)
            .ok_or_else(|| {
                TableauError::malformed(format!(
                    "tableau for {} nodes and {} branches exceeds {} unknowns",
                    circuit.num_nodes, circuit.num_branches, MAX_TABLEAU_SIZE
                ))
            })?;

        if incidence.num_nodes() != circuit.num_nodes {
            return Err(TableauError::DimensionMismatch {
                expected: circuit.num_nodes,
                actual: incidence.num_nodes(),
            });
        }
        if incidence.num_branches() != circuit.num_branches {
            return Err(TableauError::DimensionMismatch {
                expected: circuit.num_branches,
                actual: incidence.num_branches(),
            });
        }

        let mut tableau = Self {
            matrix: DenseMatrix::zeros(size, size + 1),
            num_nodes: circuit.num_nodes,
            num_branches: circuit.num_branches,
        };

        tableau.stamp_kcl(circuit, incidence);
        tableau.stamp_kvl(circuit, incidence);
        tableau.stamp_branch_identity(circuit);
        tableau.stamp_constitutive(circuit);
        tableau.stamp_sources(circuit);

        debug!(size, "assembled tableau");
        Ok(tableau)
    }

    /// Number of unknowns.
    pub fn size(&self) -> usize {
        self.matrix.rows()
    }

    /// Number of node-voltage unknowns.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of branches.
    pub fn num_branches(&self) -> usize {
        self.num_branches
    }

    /// Borrow the augmented matrix.
    pub fn matrix(&self) -> &DenseMatrix {
        &self.matrix
    }

    /// Give up the augmented matrix for in-place reduction.
    pub fn into_matrix(self) -> DenseMatrix {
        self.matrix
    }

    /// `T * x - s` for a candidate solution.
    pub fn residual(&self, x: &[f64]) -> Vec<f64> {
        let size = self.size();
        (0..size)
            .map(|r| {
                let row = self.matrix.row(r);
                let lhs: f64 = row[..size].iter().zip(x).map(|(a, v)| a * v).sum();
                lhs - row[size]
            })
            .collect()
    }

    /// KCL: rows [0, N), branch-current columns get A.
    fn stamp_kcl(&mut self, circuit: &Circuit, incidence: &IncidenceMatrix) {
        for component in &circuit.components {
            let branch = component.branch();
            let col = circuit.branch_current_index(branch);
            for row in 0..self.num_nodes {
                let a = incidence.get(row, branch.0);
                if a != 0.0 {
                    self.matrix.set(row, col, a);
                }
            }
        }
    }

    /// KVL: rows [N, N+B), node-voltage columns get -A^T.
    ///
    /// Incidence row `n` and node-voltage column `n` are the same node.
    fn stamp_kvl(&mut self, circuit: &Circuit, incidence: &IncidenceMatrix) {
        for component in &circuit.components {
            let branch = component.branch();
            let row = circuit.branch_voltage_index(branch);
            for col in 0..self.num_nodes {
                let a = incidence.get(col, branch.0);
                if a != 0.0 {
                    self.matrix.set(row, col, -a);
                }
            }
        }
    }

    /// Ties each KVL row to its own branch-voltage unknown.
    fn stamp_branch_identity(&mut self, circuit: &Circuit) {
        for component in &circuit.components {
            let idx = circuit.branch_voltage_index(component.branch());
            self.matrix.set(idx, idx, 1.0);
        }
    }

    /// Element equations: rows [N+B, size).
    fn stamp_constitutive(&mut self, circuit: &Circuit) {
        for component in &circuit.components {
            let branch = component.branch();
            let row = circuit.constitutive_row(branch);
            self.matrix.set(
                row,
                circuit.branch_voltage_index(branch),
                component.voltage_coefficient(),
            );
            self.matrix.set(
                row,
                circuit.branch_current_index(branch),
                component.current_coefficient(),
            );
        }
    }

    /// Right-hand side: source values on constitutive rows, zero elsewhere.
    fn stamp_sources(&mut self, circuit: &Circuit) {
        let rhs = self.size();
        for component in &circuit.components {
            let row = circuit.constitutive_row(component.branch());
            self.matrix.set(row, rhs, component.source_value());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist;

    fn tableau(src: &str) -> Tableau {
        let circuit = Circuit::from_ast(netlist::parse(src).unwrap()).unwrap();
        Tableau::assemble(&circuit, &IncidenceMatrix::build(&circuit)).unwrap()
    }

    #[test]
    fn test_single_source_single_resistor() {
        // Unknowns: [e1 | v1 v2 | i1 i2]
        let t = tableau("V1 1 0 5\nR1 1 0 1");
        assert_eq!(t.size(), 5);
        assert_eq!(t.matrix().cols(), 6);

        let expected: [[f64; 6]; 5] = [
            [0.0, 0.0, 0.0, 1.0, 1.0, 0.0],   // KCL node 1
            [-1.0, 1.0, 0.0, 0.0, 0.0, 0.0],  // KVL V1
            [-1.0, 0.0, 1.0, 0.0, 0.0, 0.0],  // KVL R1
            [0.0, 1.0, 0.0, 0.0, 0.0, 5.0],   // V1: v = 5
            [0.0, 0.0, 1.0, 0.0, -1.0, 0.0],  // R1: v - 1*i = 0
        ];
        for (r, row) in expected.iter().enumerate() {
            assert_eq!(t.matrix().row(r), row, "row {r}");
        }
    }

    #[test]
    fn test_block_row_counts() {
        let t = tableau("V1 1 0 10\nR1 1 2 2\nR2 2 0 3");
        let (n, b) = (t.num_nodes(), t.num_branches());
        assert_eq!(t.size(), n + 2 * b);

        // Only constitutive rows of voltage sources carry a source value
        let rhs = t.size();
        let sources: Vec<f64> = (0..t.size()).map(|r| t.matrix().get(r, rhs)).collect();
        assert_eq!(sources, vec![0.0, 0.0, 0.0, 0.0, 0.0, 10.0, 0.0, 0.0]);

        // Resistor current coefficients
        assert_eq!(t.matrix().get(n + b + 1, n + b + 1), -2.0);
        assert_eq!(t.matrix().get(n + b + 2, n + b + 2), -3.0);
    }

    #[test]
    fn test_kvl_is_negative_transpose() {
        let ast = netlist::parse("V1 1 0 10\nR1 1 2 2\nR2 2 0 3").unwrap();
        let circuit = Circuit::from_ast(ast).unwrap();
        let a = IncidenceMatrix::build(&circuit);
        let t = Tableau::assemble(&circuit, &a).unwrap();
        for b in 0..3 {
            for n in 0..2 {
                assert_eq!(t.matrix().get(2 + b, n), -a.get(n, b));
                assert_eq!(t.matrix().get(n, 2 + 3 + b), a.get(n, b));
            }
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let small = Circuit::from_ast(netlist::parse("V1 1 0 1").unwrap()).unwrap();
        let big = Circuit::from_ast(netlist::parse("V1 1 0 1\nR1 1 2 1").unwrap()).unwrap();
        let a = IncidenceMatrix::build(&small);
        let err = Tableau::assemble(&big, &a).unwrap_err();
        assert!(matches!(err, TableauError::DimensionMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_oversized_circuit_not_assembled() {
        let mut circuit = Circuit::from_ast(netlist::parse("V1 1 0 1").unwrap()).unwrap();
        let incidence = IncidenceMatrix::build(&circuit);
        circuit.num_branches = usize::MAX;
        let err = Tableau::assemble(&circuit, &incidence).unwrap_err();
        assert!(matches!(err, TableauError::MalformedNetlist { .. }));
    }

    #[test]
    fn test_residual_of_known_solution() {
        let t = tableau("V1 1 0 5\nR1 1 0 1");
        let r = t.residual(&[5.0, 5.0, 5.0, -5.0, 5.0]);
        assert!(r.iter().all(|v| v.abs() < 1e-12));
    }
}
