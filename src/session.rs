//! Netlist session: the loaded circuit and its solve status.

use std::path::Path;

use tracing::{info, warn};

use crate::circuit::Circuit;
use crate::error::{Result, TableauError};
use crate::netlist;
use crate::solver::{self, GaussianSolver, Singularity, Solution, DEFAULT_PIVOT_TOLERANCE};

/// Configuration for the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Pivot magnitudes at or below this fraction of their column's
    /// largest entry count as zero.
    pub pivot_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pivot tolerance.
    ///
    /// 0.0 only rejects pivots that are exactly zero.
    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }
}

/// Outcome of the last load.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    /// Nothing loaded yet, or the session was cleared
    Empty,
    /// The tableau reduced and was back-substituted
    Solved(Solution),
    /// Elimination hit a zero pivot
    Singular(Singularity),
}

/// One loaded netlist and everything derived from it.
///
/// Loading replaces the circuit and all results wholesale; nothing carries
/// over from a previous netlist.
#[derive(Debug, Clone)]
pub struct CircuitSession {
    config: SolverConfig,
    circuit: Option<Circuit>,
    status: SolveStatus,
}

impl Default for CircuitSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CircuitSession {
    /// Create an empty session with default configuration.
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Create an empty session with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            circuit: None,
            status: SolveStatus::Empty,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Load a circuit and solve it.
    ///
    /// A singular tableau is not an error here; it shows up in the returned
    /// status and blocks result queries until the next load.
    pub fn load(&mut self, circuit: Circuit) -> Result<&SolveStatus> {
        self.clear();
        let status = self.run(&circuit)?;
        self.circuit = Some(circuit);
        self.status = status;
        Ok(&self.status)
    }

    /// Parse netlist text and load it.
    pub fn load_str(&mut self, input: &str) -> Result<&SolveStatus> {
        self.clear();
        let circuit = Circuit::from_ast(netlist::parse(input)?)?;
        self.load(circuit)
    }

    /// Read a netlist file and load it.
    pub fn load_file(&mut self, path: &Path) -> Result<&SolveStatus> {
        self.clear();
        let circuit = Circuit::from_ast(netlist::parse_file(path)?)?;
        info!(path = %path.display(), "loaded netlist file");
        self.load(circuit)
    }

    /// Solve the current circuit again from scratch.
    pub fn resolve(&mut self) -> Result<&SolveStatus> {
        let circuit = self.circuit.take().ok_or(TableauError::NoNetlistLoaded)?;
        self.load(circuit)
    }

    /// Discard the circuit and all results.
    pub fn clear(&mut self) {
        *self = Self::with_config(self.config.clone());
    }

    fn run(&self, circuit: &Circuit) -> Result<SolveStatus> {
        let solver = GaussianSolver::with_tolerance(self.config.pivot_tolerance);
        match solver::solve_circuit(circuit, &solver) {
            Ok(solution) => {
                info!(
                    nodes = circuit.num_nodes,
                    branches = circuit.num_branches,
                    "netlist solved"
                );
                Ok(SolveStatus::Solved(solution))
            }
            Err(TableauError::SingularSystem { row, kind }) => {
                warn!(row, %kind, "netlist is singular");
                Ok(SolveStatus::Singular(Singularity { row, kind }))
            }
            Err(e) => Err(e),
        }
    }

    /// Get the current status.
    pub fn status(&self) -> &SolveStatus {
        &self.status
    }

    /// Get the loaded circuit.
    pub fn circuit(&self) -> Option<&Circuit> {
        self.circuit.as_ref()
    }

    /// Check whether the last load ended on a zero pivot.
    pub fn is_singular(&self) -> bool {
        matches!(self.status, SolveStatus::Singular(_))
    }

    /// Get the solution, refusing when there is none to serve.
    pub fn solution(&self) -> Result<&Solution> {
        match &self.status {
            SolveStatus::Solved(solution) => Ok(solution),
            SolveStatus::Singular(s) => Err((*s).into()),
            SolveStatus::Empty => Err(TableauError::NoNetlistLoaded),
        }
    }

    /// Branch currents, branch `k` at index `k - 1`.
    pub fn branch_currents(&self) -> Result<&[f64]> {
        Ok(self.solution()?.branch_currents())
    }

    /// Node voltages, node `k` at index `k - 1`; ground is implicit 0 V.
    pub fn node_voltages(&self) -> Result<&[f64]> {
        Ok(self.solution()?.node_voltages())
    }

    /// Branch voltages, branch `k` at index `k - 1`.
    pub fn branch_voltages(&self) -> Result<&[f64]> {
        Ok(self.solution()?.branch_voltages())
    }
}
