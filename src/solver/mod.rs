//! Steady-state MNA solving.
//!
//! This module provides the numerical engine of the crate.
//!
//! ## Modified Nodal Analysis
//!
//! MNA assembles a system of equations Ax = z where:
//! - x contains node voltages and voltage-source branch currents
//! - A is the augmented admittance/incidence matrix
//! - z is the source vector
//!
//! The matrix structure is:
//! ```text
//! [ G   Bᵀ ] [ v ]   [ 0 ]
//! [ B   0  ] [ j ] = [ E ]
//! ```
//!
//! where:
//! - G is the n×n admittance matrix stamped by passive components
//! - B is the m×n voltage-source incidence matrix
//! - v is the vector of non-ground node voltages
//! - j is the vector of voltage-source branch currents
//! - E is the vector of source set-points
//!
//! Everything is computed over [`num_complex::Complex64`]; a DC solve is the
//! degenerate case with zero imaginary parts throughout.

mod extract;
mod mna;

pub use extract::{Branch, Solution};
pub use mna::{MnaSolution, MnaSystem};

use crate::circuit::{validate_circuit, Circuit};
use crate::error::Result;
use crate::topology::NodeMap;

/// Solve one circuit description end to end.
///
/// Runs the full pipeline: validation, terminal-to-node topology building,
/// MNA assembly, the complex LU solve, and branch extraction. The pipeline
/// is a pure function of its input; no state survives between invocations,
/// and failures are all-or-nothing — no partial results accompany an error.
pub fn solve_circuit(circuit: &Circuit) -> Result<Solution> {
    validate_circuit(circuit)?;
    let node_map = NodeMap::build(circuit);
    let system = MnaSystem::assemble(circuit, &node_map)?;
    let solved = system.solve()?;
    Ok(extract::extract(circuit, &node_map, &solved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Component, TerminalKey, Wire};
    use crate::error::PhasorError;
    use crate::SHORT_CIRCUIT_CONDUCTANCE;
    use approx::assert_relative_eq;

    fn component(id: &str, kind: &str, value: f64) -> Component {
        Component::new(id, kind, Some(value), None).unwrap()
    }

    fn ground_pin(id: &str) -> Component {
        Component::new(id, "ground", None, Some(vec![0])).unwrap()
    }

    fn wire(a: &str, ta: u32, b: &str, tb: u32) -> Wire {
        Wire::new(TerminalKey::new(a, ta), TerminalKey::new(b, tb))
    }

    /// 10V source, R1 = R2 = 1kΩ divider: node A at 10V, node B at 5V.
    fn voltage_divider() -> Circuit {
        Circuit::new(
            vec![
                component("V1", "voltage_source", 10.0),
                component("R1", "resistor", 1000.0),
                component("R2", "resistor", 1000.0),
                ground_pin("G1"),
            ],
            vec![
                wire("V1", 0, "R1", 0),
                wire("R1", 1, "R2", 0),
                wire("R2", 1, "V1", 1),
                wire("V1", 1, "G1", 0),
            ],
        )
        .with_ground("G1")
    }

    #[test]
    fn test_voltage_divider() {
        let solution = solve_circuit(&voltage_divider()).unwrap();

        let mut voltages: Vec<f64> = solution.node_voltages.iter().map(|v| v.re).collect();
        voltages.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(voltages.len(), 3);
        assert_relative_eq!(voltages[0], 0.0);
        assert_relative_eq!(voltages[1], 5.0, max_relative = 1e-9);
        assert_relative_eq!(voltages[2], 10.0, max_relative = 1e-9);

        let r1 = solution.branch("R1").unwrap();
        let r2 = solution.branch("R2").unwrap();
        assert_relative_eq!(r1.voltage.re, 5.0, max_relative = 1e-9);
        assert_relative_eq!(r2.voltage.re, 5.0, max_relative = 1e-9);
        assert_relative_eq!(r1.current.re, 0.005, max_relative = 1e-9);
        assert_relative_eq!(r2.current.re, 0.005, max_relative = 1e-9);
    }

    #[test]
    fn test_ground_node_is_zero() {
        let solution = solve_circuit(&voltage_divider()).unwrap();
        assert_eq!(solution.node_voltages[0].re, 0.0);
        assert_eq!(solution.node_voltages[0].im, 0.0);
    }

    #[test]
    fn test_voltage_source_fidelity() {
        let solution = solve_circuit(&voltage_divider()).unwrap();
        let v1 = solution.branch("V1").unwrap();
        assert_relative_eq!(v1.voltage.re, 10.0, max_relative = 1e-9);
        // Positive current flows into the positive terminal: the source
        // drives 5mA out of it, so the unknown solves to -5mA.
        assert_relative_eq!(v1.current.re, -0.005, max_relative = 1e-9);
    }

    #[test]
    fn test_kirchhoff_balance_parallel_resistors() {
        let circuit = Circuit::new(
            vec![
                component("V1", "voltage_source", 10.0),
                component("Ra", "resistor", 1000.0),
                component("Rb", "resistor", 2000.0),
                ground_pin("G1"),
            ],
            vec![
                wire("V1", 0, "Ra", 0),
                wire("Ra", 0, "Rb", 0),
                wire("Ra", 1, "V1", 1),
                wire("Rb", 1, "V1", 1),
                wire("V1", 1, "G1", 0),
            ],
        )
        .with_ground("G1");

        let solution = solve_circuit(&circuit).unwrap();
        let i_a = solution.branch("Ra").unwrap().current.re;
        let i_b = solution.branch("Rb").unwrap().current.re;
        let i_v = solution.branch("V1").unwrap().current.re;
        assert_relative_eq!(i_a, 0.010, max_relative = 1e-9);
        assert_relative_eq!(i_b, 0.005, max_relative = 1e-9);
        // The source current balances the resistor currents at the top node.
        assert_relative_eq!(i_v + i_a + i_b, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_capacitor_open_at_dc() {
        // 5V source, series 1kΩ, capacitor to ground: no current flows, so
        // the resistor drops nothing and the capacitor sees the full 5V.
        let circuit = Circuit::new(
            vec![
                component("V1", "voltage_source", 5.0),
                component("R1", "resistor", 1000.0),
                component("C1", "capacitor", 1e-6),
                ground_pin("G1"),
            ],
            vec![
                wire("V1", 0, "R1", 0),
                wire("R1", 1, "C1", 0),
                wire("C1", 1, "V1", 1),
                wire("V1", 1, "G1", 0),
            ],
        )
        .with_ground("G1");

        let solution = solve_circuit(&circuit).unwrap();
        let c1 = solution.branch("C1").unwrap();
        let r1 = solution.branch("R1").unwrap();
        assert_eq!(c1.current.norm(), 0.0);
        assert_relative_eq!(r1.voltage.re, 0.0, epsilon = 1e-9);
        assert_relative_eq!(c1.voltage.re, 5.0, max_relative = 1e-9);
    }

    #[test]
    fn test_inductor_short_at_dc() {
        // 5V source, series 1kΩ, inductor to ground: the inductor behaves
        // as a near-ideal short, carrying the full 5mA loop current.
        let circuit = Circuit::new(
            vec![
                component("V1", "voltage_source", 5.0),
                component("R1", "resistor", 1000.0),
                component("L1", "inductor", 0.1),
                ground_pin("G1"),
            ],
            vec![
                wire("V1", 0, "R1", 0),
                wire("R1", 1, "L1", 0),
                wire("L1", 1, "V1", 1),
                wire("V1", 1, "G1", 0),
            ],
        )
        .with_ground("G1");

        let solution = solve_circuit(&circuit).unwrap();
        let l1 = solution.branch("L1").unwrap();
        assert_relative_eq!(l1.current.re, 0.005, max_relative = 1e-6);
        // Consistent with the short-circuit stamp, not an exact 0/0.
        assert_relative_eq!(
            l1.current.re,
            l1.voltage.re * SHORT_CIRCUIT_CONDUCTANCE,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_rc_lowpass_at_ac() {
        // 1V source, 1kΩ into 1µF at ω = 1000 rad/s: |Zc| = 1kΩ, so the
        // output sits at the -3dB point, V_out = (1 - j)/2.
        let frequency = 1000.0 / (2.0 * std::f64::consts::PI);
        let circuit = Circuit::new(
            vec![
                component("V1", "voltage_source", 1.0),
                component("R1", "resistor", 1000.0),
                component("C1", "capacitor", 1e-6),
                ground_pin("G1"),
            ],
            vec![
                wire("V1", 0, "R1", 0),
                wire("R1", 1, "C1", 0),
                wire("C1", 1, "V1", 1),
                wire("V1", 1, "G1", 0),
            ],
        )
        .with_ground("G1")
        .with_frequency(frequency);

        let solution = solve_circuit(&circuit).unwrap();
        let c1 = solution.branch("C1").unwrap();
        assert_relative_eq!(c1.voltage.re, 0.5, max_relative = 1e-9);
        assert_relative_eq!(c1.voltage.im, -0.5, max_relative = 1e-9);
        assert_relative_eq!(
            c1.voltage.norm(),
            std::f64::consts::FRAC_1_SQRT_2,
            max_relative = 1e-9
        );
        assert_relative_eq!(c1.current.norm(), 7.0710678e-4, max_relative = 1e-6);
    }

    #[test]
    fn test_floating_resistor_is_singular() {
        // A lone resistor with no ground reference: both node equations are
        // linearly dependent, so the system has no unique solution.
        let circuit = Circuit::new(vec![component("R1", "resistor", 1000.0)], vec![]);
        let err = solve_circuit(&circuit).unwrap_err();
        assert!(matches!(err, PhasorError::SingularSystem { .. }));
    }

    #[test]
    fn test_disconnected_component_is_singular() {
        let mut circuit = voltage_divider();
        circuit
            .components
            .push(component("R3", "resistor", 470.0));
        let err = solve_circuit(&circuit).unwrap_err();
        assert!(matches!(err, PhasorError::SingularSystem { .. }));
    }

    #[test]
    fn test_degenerate_system() {
        // Only the ground pin: every terminal collapses into node 0.
        let circuit = Circuit::new(vec![ground_pin("G1")], vec![]).with_ground("G1");
        let err = solve_circuit(&circuit).unwrap_err();
        assert!(matches!(err, PhasorError::DegenerateSystem));
    }

    #[test]
    fn test_empty_circuit() {
        let circuit = Circuit::new(vec![], vec![]);
        let err = solve_circuit(&circuit).unwrap_err();
        assert!(matches!(err, PhasorError::EmptyCircuit));
    }

    #[test]
    fn test_unknown_kind_is_benign() {
        let mut circuit = voltage_divider();
        circuit
            .components
            .push(Component::new("D1", "diode", Some(0.7), None).unwrap());
        // Tie the stray component into the circuit so it does not float.
        circuit.wires.push(wire("D1", 0, "R1", 1));
        circuit.wires.push(wire("D1", 1, "V1", 1));

        let solution = solve_circuit(&circuit).unwrap();
        let d1 = solution.branch("D1").unwrap();
        assert_eq!(d1.current.norm(), 0.0);
        // The divider is unaffected.
        let r2 = solution.branch("R2").unwrap();
        assert_relative_eq!(r2.voltage.re, 5.0, max_relative = 1e-9);
    }

    #[test]
    fn test_empty_terminal_list_behaves_like_default() {
        // An explicitly empty terminal list is filled with the [0, 1]
        // default at the model boundary, so the divider solves unchanged.
        let mut circuit = voltage_divider();
        circuit.components[2] =
            Component::new("R2", "resistor", Some(1000.0), Some(vec![])).unwrap();
        let solution = solve_circuit(&circuit).unwrap();
        let r2 = solution.branch("R2").unwrap();
        assert_relative_eq!(r2.voltage.re, 5.0, max_relative = 1e-9);
        assert_relative_eq!(r2.current.re, 0.005, max_relative = 1e-9);
    }

    #[test]
    fn test_unwired_empty_terminal_component_is_singular() {
        // Defaulted terminals on an unwired component leave it floating:
        // the solve reports a singular system instead of panicking.
        let mut circuit = voltage_divider();
        circuit
            .components
            .push(Component::new("X1", "resistor", Some(1000.0), Some(vec![])).unwrap());
        let err = solve_circuit(&circuit).unwrap_err();
        assert!(matches!(err, PhasorError::SingularSystem { .. }));
    }

    #[test]
    fn test_solve_is_idempotent() {
        let circuit = voltage_divider();
        let a = solve_circuit(&circuit).unwrap();
        let b = solve_circuit(&circuit).unwrap();
        assert_eq!(a.node_voltages, b.node_voltages);
        for (x, y) in a.branches.iter().zip(&b.branches) {
            assert_eq!(x.voltage, y.voltage);
            assert_eq!(x.current, y.current);
        }
    }

    #[test]
    fn test_zero_valued_resistor_shorts_nodes() {
        // R1 = 0 clamps to the short-circuit conductance; both divider
        // nodes end up at (nearly) the source voltage.
        let mut circuit = voltage_divider();
        circuit.components[1] = component("R1", "resistor", 0.0);
        let solution = solve_circuit(&circuit).unwrap();
        let r2 = solution.branch("R2").unwrap();
        assert_relative_eq!(r2.voltage.re, 10.0, max_relative = 1e-6);
    }
}
