//! Plain-text rendering of solved circuits.
//!
//! Quantities are numbered from 1 as in the netlist: `E<k>` is the voltage
//! of node `k`, `V<k>` the voltage across branch `k`, `I<k>` the current
//! through branch `k`.

use std::fmt;

use crate::circuit::{BranchId, NodeId};
use crate::solver::Solution;

/// Branch currents, one `I<k> = <value>A` line per branch.
pub struct CurrentReport<'a>(pub &'a Solution);

impl fmt::Display for CurrentReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (b, current) in self.0.branch_currents().iter().enumerate() {
            writeln!(f, "I{} = {}A", BranchId(b).number(), current)?;
        }
        Ok(())
    }
}

/// Node voltages (ground first) followed by branch voltages.
pub struct VoltageReport<'a>(pub &'a Solution);

impl fmt::Display for VoltageReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} = 0V", NodeId::GROUND)?;
        for (row, voltage) in self.0.node_voltages().iter().enumerate() {
            writeln!(f, "{} = {}V", NodeId::from_matrix_row(row), voltage)?;
        }
        for (b, voltage) in self.0.branch_voltages().iter().enumerate() {
            writeln!(f, "V{} = {}V", BranchId(b).number(), voltage)?;
        }
        Ok(())
    }
}
