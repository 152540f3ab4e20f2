//! End-to-end tests: parse netlist, assemble tableau, solve, check circuit laws.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use sparse_tableau::circuit::{BranchId, Circuit, NodeId};
use sparse_tableau::components::Component;
use sparse_tableau::netlist;
use sparse_tableau::solver::{solve_circuit, GaussianSolver, IncidenceMatrix, Solution, Tableau};
use sparse_tableau::{CircuitSession, SingularKind, SolveStatus, TableauError};

const TOL: f64 = 1e-9;

fn circuit(src: &str) -> Circuit {
    Circuit::from_ast(netlist::parse(src).expect("parse should succeed")).expect("valid netlist")
}

fn solve(src: &str) -> (Circuit, Solution) {
    let c = circuit(src);
    let s = solve_circuit(&c, &GaussianSolver::new()).expect("solve should succeed");
    (c, s)
}

/// KCL, KVL and Ohm's law all hold on a solved circuit.
fn assert_circuit_laws(circuit: &Circuit, solution: &Solution) {
    assert_eq!(solution.len(), circuit.num_nodes + 2 * circuit.num_branches);

    let incidence = IncidenceMatrix::build(circuit);
    for residual in incidence.kcl_residual(solution.branch_currents()) {
        assert_abs_diff_eq!(residual, 0.0, epsilon = TOL);
    }

    for component in &circuit.components {
        let b = component.branch();
        let [src, dst] = component.nodes();
        let e_src = solution.node_voltage(src).unwrap();
        let e_dst = solution.node_voltage(dst).unwrap();
        let v = solution.branch_voltage(b).unwrap();
        let i = solution.branch_current(b).unwrap();

        assert_abs_diff_eq!(v, e_src - e_dst, epsilon = TOL);
        match component {
            Component::Resistor(r) => assert_abs_diff_eq!(v, i * r.resistance, epsilon = TOL),
            Component::VoltageSource(s) => assert_abs_diff_eq!(v, s.voltage, epsilon = TOL),
        }
    }
}

/// 5V source and a 1 ohm resistor across it.
#[test]
fn test_source_across_single_resistor() {
    let (c, s) = solve("V1 1 0 5\nR1 1 0 1\n");
    assert_abs_diff_eq!(s.node_voltage(NodeId(1)).unwrap(), 5.0, epsilon = TOL);
    assert_abs_diff_eq!(s.branch_current(BranchId(1)).unwrap(), 5.0, epsilon = TOL);
    // The source supplies the current, so it flows against its orientation
    assert_abs_diff_eq!(s.branch_current(BranchId(0)).unwrap(), -5.0, epsilon = TOL);
    assert_circuit_laws(&c, &s);
}

/// 10V across 2 ohm + 3 ohm in series.
#[test]
fn test_series_divider() {
    let (c, s) = solve("V1 1 0 10\nR1 1 2 2\nR2 2 0 3\n");
    assert_abs_diff_eq!(s.node_voltage(NodeId(1)).unwrap(), 10.0, epsilon = TOL);
    assert_abs_diff_eq!(s.node_voltage(NodeId(2)).unwrap(), 6.0, epsilon = TOL);
    assert_abs_diff_eq!(s.branch_current(BranchId(1)).unwrap(), 2.0, epsilon = TOL);
    assert_abs_diff_eq!(s.branch_current(BranchId(2)).unwrap(), 2.0, epsilon = TOL);
    assert_abs_diff_eq!(s.branch_voltage(BranchId(1)).unwrap(), 4.0, epsilon = TOL);
    assert_circuit_laws(&c, &s);
}

/// Two sources feeding a shared node through resistors.
#[test]
fn test_two_source_network() {
    let src = "\
# superposition check
V1 1 0 12
V2 3 0 6
R1 1 2 4
R2 2 3 4
R3 2 0 2
";
    let (c, s) = solve(src);
    // Node 2: (12 - e)/4 + (6 - e)/4 = e/2  ->  e = 4.5
    assert_abs_diff_eq!(s.node_voltage(NodeId(2)).unwrap(), 4.5, epsilon = TOL);
    assert_abs_diff_eq!(s.branch_current(BranchId(4)).unwrap(), 2.25, epsilon = TOL);
    assert_circuit_laws(&c, &s);
}

/// Source between two non-ground nodes, reversed orientation and unit suffixes.
#[test]
fn test_floating_source_and_suffixes() {
    let src = "V1 0 1 5\nR1 1 2 1k\nV2 2 3 1\nR2 3 0 4k\n";
    let (c, s) = solve(src);
    // e1 = -5; loop current through 5k total with 1V opposing
    assert_abs_diff_eq!(s.node_voltage(NodeId(1)).unwrap(), -5.0, epsilon = TOL);
    assert_abs_diff_eq!(s.branch_current(BranchId(1)).unwrap(), -6.0 / 5000.0, epsilon = TOL);
    assert_circuit_laws(&c, &s);
}

/// Wheatstone bridge, balanced: no current through the middle resistor.
#[test]
fn test_balanced_bridge() {
    let src = "V1 1 0 9\nR1 1 2 100\nR2 2 0 200\nR3 1 3 50\nR4 3 0 100\nR5 2 3 1000\n";
    let (c, s) = solve(src);
    assert_abs_diff_eq!(s.branch_current(BranchId(5)).unwrap(), 0.0, epsilon = TOL);
    assert_abs_diff_eq!(s.node_voltage(NodeId(2)).unwrap(), 6.0, epsilon = TOL);
    assert_abs_diff_eq!(s.node_voltage(NodeId(3)).unwrap(), 6.0, epsilon = TOL);
    assert_circuit_laws(&c, &s);
}

/// Sub-picoohm resistors across a source are well-posed, just stiff.
#[test]
fn test_tiny_resistance_across_source() {
    for (value, ohms) in [("1p", 1e-12), ("0.1p", 1e-13)] {
        let (c, s) = solve(&format!("V1 1 0 1\nR1 1 0 {}\n", value));
        let current = 1.0 / ohms;
        assert_relative_eq!(s.branch_current(BranchId(1)).unwrap(), current, max_relative = 1e-9);
        assert_relative_eq!(s.branch_current(BranchId(0)).unwrap(), -current, max_relative = 1e-9);
        assert_abs_diff_eq!(s.node_voltage(NodeId(1)).unwrap(), 1.0, epsilon = TOL);
        assert_circuit_laws(&c, &s);
    }

    let mut session = CircuitSession::new();
    let status = session.load_str("V1 1 0 1\nR1 1 0 1e-13").unwrap();
    assert!(matches!(status, SolveStatus::Solved(_)));
    assert_relative_eq!(session.branch_currents().unwrap()[1], 1e13, max_relative = 1e-9);
}

/// Very large resistances still solve at the other end of the scale.
#[test]
fn test_huge_resistance_divider() {
    let (c, s) = solve("V1 1 0 10\nR1 1 2 1G\nR2 2 0 1G\nR3 2 0 1e16\n");
    assert_relative_eq!(s.node_voltage(NodeId(2)).unwrap(), 5.0, max_relative = 1e-6);
    assert_circuit_laws(&c, &s);
}

/// Netlists whose tokens parse but whose tableau would not fit are refused.
#[test]
fn test_oversized_netlist_rejected() {
    let mut session = CircuitSession::new();
    let err = session.load_str("V1 1 0 5\nR1 4294967296 0 1").unwrap_err();
    assert!(matches!(err, TableauError::MalformedNetlist { .. }));
    assert_eq!(session.status(), &SolveStatus::Empty);
}

/// A node index that no branch touches leaves a free unknown.
#[test]
fn test_isolated_node_is_under_determined() {
    let c = circuit("V1 1 0 5\nR1 1 0 1\nR2 3 0 2\n");
    let err = solve_circuit(&c, &GaussianSolver::new()).unwrap_err();
    assert!(matches!(
        err,
        TableauError::SingularSystem { kind: SingularKind::UnderDetermined, .. }
    ));
}

/// Parallel sources that disagree have no solution.
#[test]
fn test_contradictory_sources_are_inconsistent() {
    let c = circuit("V1 1 0 5\nV2 1 0 3\n");
    let err = solve_circuit(&c, &GaussianSolver::new()).unwrap_err();
    assert!(matches!(
        err,
        TableauError::SingularSystem { kind: SingularKind::Inconsistent, .. }
    ));
}

/// A resistor hanging off a source with nothing to return through is fine;
/// it just carries no current.
#[test]
fn test_dangling_resistor_carries_no_current() {
    let (c, s) = solve("V1 1 0 5\nR1 1 0 1\nR2 1 2 10\n");
    assert_abs_diff_eq!(s.branch_current(BranchId(2)).unwrap(), 0.0, epsilon = TOL);
    assert_abs_diff_eq!(s.node_voltage(NodeId(2)).unwrap(), 5.0, epsilon = TOL);
    assert_circuit_laws(&c, &s);
}

/// A node joined to the rest only through resistors with no source path
/// still has a definite voltage: zero.
#[test]
fn test_unpowered_loop() {
    let (c, s) = solve("R1 1 2 5\nR2 2 0 5\nR3 1 0 5\n");
    assert!(s.as_slice().iter().all(|v| v.abs() < TOL));
    assert_circuit_laws(&c, &s);
}

#[test]
fn test_solve_twice_is_bitwise_identical() {
    let c = circuit("V1 1 0 7\nR1 1 2 3.3\nR2 2 0 4.7\nR3 2 3 1.1\nR4 3 0 2.2\n");
    let solver = GaussianSolver::new();
    let a = solve_circuit(&c, &solver).unwrap();
    let b = solve_circuit(&c, &solver).unwrap();
    let bits = |s: &Solution| s.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn test_tableau_residual_of_solution() {
    let c = circuit("V1 1 0 10\nR1 1 2 2\nR2 2 0 3\nR3 2 0 6\n");
    let tableau = Tableau::assemble(&c, &IncidenceMatrix::build(&c)).unwrap();
    let solution = GaussianSolver::new().solve(tableau.clone()).unwrap();
    for r in tableau.residual(solution.as_slice()) {
        assert_abs_diff_eq!(r, 0.0, epsilon = TOL);
    }
}

#[test]
fn test_session_lifecycle() {
    let mut session = CircuitSession::new();

    let status = session.load_str("V1 1 0 5\nV2 1 0 3\n").unwrap();
    assert!(matches!(status, SolveStatus::Singular(_)));
    assert!(session.branch_currents().is_err());
    assert!(session.node_voltages().is_err());

    session.load_str("V1 1 0 10\nR1 1 2 2\nR2 2 0 3\n").unwrap();
    let currents = session.branch_currents().unwrap();
    assert_abs_diff_eq!(currents[1], 2.0, epsilon = TOL);

    session.clear();
    assert!(matches!(session.branch_currents(), Err(TableauError::NoNetlistLoaded)));
}

#[test]
fn test_malformed_netlists() {
    let mut session = CircuitSession::new();
    for bad in ["R1 1 x 5", "R1 1 0", "Q1 1 2 3", "V1 1 0 1 2", "R1 1 0 abc", ""] {
        let err = session.load_str(bad).unwrap_err();
        assert!(err.is_netlist_error(), "{bad:?} gave {err:?}");
        assert_eq!(session.status(), &SolveStatus::Empty);
    }
}
