//! Gaussian elimination with partial pivoting.

use std::fmt;

use tracing::{debug, trace, warn};

use super::matrix::DenseMatrix;
use super::solution::Solution;
use super::tableau::Tableau;
use super::DEFAULT_PIVOT_TOLERANCE;
use crate::error::{Result, SingularKind, TableauError};

/// Where and how elimination stopped on a zero pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Singularity {
    /// Row (and pivot column) at which no usable pivot was found
    pub row: usize,
    /// Classification from the residual right-hand side of that row
    pub kind: SingularKind,
}

impl fmt::Display for Singularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at row {}", self.kind, self.row)
    }
}

impl From<Singularity> for TableauError {
    fn from(s: Singularity) -> Self {
        TableauError::SingularSystem {
            row: s.row,
            kind: s.kind,
        }
    }
}

/// Dense Gaussian elimination solver for augmented systems `[A | b]`.
///
/// Zero tests are relative. A pivot in column `j` counts as zero when
/// `|p| <= tolerance * max_i |a_ij|`, taken over column `j` of the matrix as
/// it was before elimination. The right-hand side of a singular row is
/// compared against `tolerance * max_i |b_i|` the same way. A tiny but
/// genuine entry (a 1 pΩ resistor next to unit incidence entries) therefore
/// stays a valid pivot, while cancellation noise does not.
#[derive(Debug, Clone)]
pub struct GaussianSolver {
    /// Relative magnitude at or below which a value is treated as zero
    pub tolerance: f64,
}

impl Default for GaussianSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GaussianSolver {
    /// Create a solver with the default pivot tolerance.
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }

    /// Create a solver with a custom pivot tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    /// Solve a tableau, consuming it.
    ///
    /// Returns [`TableauError::SingularSystem`] when the system has no unique
    /// solution.
    pub fn solve(&self, tableau: Tableau) -> Result<Solution> {
        let num_nodes = tableau.num_nodes();
        let num_branches = tableau.num_branches();
        let mut matrix = tableau.into_matrix();

        self.eliminate(&mut matrix)?;
        let values = self.back_substitute(&matrix)?;

        debug!(unknowns = values.len(), "solved tableau");
        Ok(Solution::new(values, num_nodes, num_branches))
    }

    /// Reduce `[A | b]` to row-echelon form with a unit diagonal.
    ///
    /// For each column the first row holding the largest magnitude at or
    /// below the diagonal becomes the pivot. Stops at the first column with
    /// no pivot above the scaled tolerance and reports it as
    /// [`TableauError::SingularSystem`].
    pub fn eliminate(&self, matrix: &mut DenseMatrix) -> Result<()> {
        let n = matrix.rows();
        if matrix.cols() != n + 1 {
            return Err(TableauError::DimensionMismatch {
                expected: n + 1,
                actual: matrix.cols(),
            });
        }

        let mut col_scale = vec![0.0_f64; n];
        let mut rhs_scale = 0.0_f64;
        for r in 0..n {
            let row = matrix.row(r);
            for (scale, a) in col_scale.iter_mut().zip(&row[..n]) {
                *scale = (*scale).max(a.abs());
            }
            rhs_scale = rhs_scale.max(row[n].abs());
        }

        for i in 0..n {
            // Find pivot
            let mut max_val = matrix.get(i, i).abs();
            let mut max_row = i;
            for k in (i + 1)..n {
                let val = matrix.get(k, i).abs();
                if val > max_val {
                    max_val = val;
                    max_row = k;
                }
            }

            if max_val <= self.tolerance * col_scale[i] {
                let rhs = matrix.get(i, n);
                let kind = if rhs.abs() > self.tolerance * rhs_scale {
                    SingularKind::Inconsistent
                } else {
                    SingularKind::UnderDetermined
                };
                warn!(row = i, rhs, %kind, "zero pivot, tableau is singular");
                return Err(Singularity { row: i, kind }.into());
            }

            if max_row != i {
                trace!(column = i, from = max_row, "pivot row swap");
                matrix.swap_rows(i, max_row);
            }

            // Normalize the pivot row to a leading 1
            let pivot = matrix.get(i, i);
            for v in &mut matrix.row_mut(i)[i..] {
                *v /= pivot;
            }

            // Eliminate column i below the pivot
            let (pivot_row, below) = matrix.split_below(i);
            for row in below {
                let factor = row[i];
                if factor == 0.0 {
                    continue;
                }
                for (v, p) in row[i..].iter_mut().zip(&pivot_row[i..]) {
                    *v -= factor * p;
                }
            }
        }

        Ok(())
    }

    /// Back-substitute a reduced system into the unknown vector.
    ///
    /// Expects the unit diagonal left by [`GaussianSolver::eliminate`], so
    /// the diagonal is checked against the bare tolerance.
    pub fn back_substitute(&self, matrix: &DenseMatrix) -> Result<Vec<f64>> {
        let n = matrix.rows();
        if matrix.cols() != n + 1 {
            return Err(TableauError::DimensionMismatch {
                expected: n + 1,
                actual: matrix.cols(),
            });
        }

        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let row = matrix.row(i);
            let sum: f64 = row[i + 1..n].iter().zip(&x[i + 1..]).map(|(a, v)| a * v).sum();
            let diag = row[i];
            if diag.abs() <= self.tolerance {
                return Err(TableauError::SingularSystem {
                    row: i,
                    kind: if (row[n] - sum).abs() > self.tolerance {
                        SingularKind::Inconsistent
                    } else {
                        SingularKind::UnderDetermined
                    },
                });
            }
            x[i] = (row[n] - sum) / diag;
        }

        Ok(x)
    }
}
