//! Sparse tableau solver.
//!
//! This module provides the numerical engine: incidence-matrix
//! construction, tableau assembly, and Gaussian elimination.
//!
//! ## Sparse Tableau Analysis
//!
//! The tableau collects every circuit law into one linear system over
//! node voltages `e`, branch voltages `v` and branch currents `i`:
//!
//! ```text
//! [  0    0    A  ] [ e ]   [ 0 ]
//! [ -Aᵀ   1    0  ] [ v ] = [ 0 ]
//! [  0    M    N  ] [ i ]   [ s ]
//! ```
//!
//! where:
//! - A is the N x B node–branch incidence matrix (KCL: A·i = 0)
//! - -Aᵀ·e + v = 0 is KVL, each branch voltage is its terminal difference
//! - M, N are diagonal element coefficients (M = 1; N = -R for resistors,
//!   0 for voltage sources)
//! - s holds voltage source values on the source rows
//!
//! The system is dense-stored and solved by elimination with partial
//! pivoting followed by back substitution.

mod gauss;
mod incidence;
mod matrix;
mod solution;
mod tableau;

pub use gauss::{GaussianSolver, Singularity};
pub use incidence::IncidenceMatrix;
pub use matrix::DenseMatrix;
pub use solution::Solution;
pub use tableau::Tableau;

use crate::circuit::Circuit;
use crate::error::Result;

/// Relative pivot tolerance, see [`GaussianSolver`].
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-14;

/// Run the full pipeline on a circuit: incidence matrix, tableau, solve.
pub fn solve_circuit(circuit: &Circuit, solver: &GaussianSolver) -> Result<Solution> {
    let incidence = IncidenceMatrix::build(circuit);
    let tableau = Tableau::assemble(circuit, &incidence)?;
    solver.solve(tableau)
}
