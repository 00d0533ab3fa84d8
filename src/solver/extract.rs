//! Result extraction: from a solved linear system to labeled records.

use num_complex::Complex64;

use crate::circuit::{Circuit, ComponentKind, NodeId};
use crate::topology::NodeMap;

use super::mna::{passive_admittance, MnaSolution};

/// Voltage and current across one component.
#[derive(Debug, Clone)]
pub struct Branch {
    /// Identifier of the component
    pub component_id: String,
    /// Kind string as supplied by the caller
    pub label: String,
    /// Branch voltage Va - Vb (terminal 0 positive)
    pub voltage: Complex64,
    /// Branch current flowing from terminal 0 to terminal 1
    pub current: Complex64,
}

/// The full output of one solve.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Analysis frequency in Hz (0 for DC)
    pub frequency: f64,
    /// Complex node voltages indexed by node id; entry 0 is always zero
    pub node_voltages: Vec<Complex64>,
    /// Per-component branch records, in input order
    pub branches: Vec<Branch>,
}

/// Reconstruct full node voltages and per-component branch quantities.
///
/// This is a single-pass, stateless transform: node voltages come straight
/// from the solution vector (ground prepended as zero), branch currents are
/// derived per kind. Passive branch currents use the same admittance as the
/// matrix stamp, so the DC inductor reports the near-ideal-short current
/// `Vab * SHORT_CIRCUIT_CONDUCTANCE` rather than an exact 0/0 indeterminate,
/// and a capacitor at DC reports exactly zero. Voltage sources report their
/// solved current unknown.
pub(crate) fn extract(circuit: &Circuit, node_map: &NodeMap, solved: &MnaSolution) -> Solution {
    let omega = circuit.omega();
    let zero = Complex64::new(0.0, 0.0);

    let node_voltages: Vec<Complex64> = (0..node_map.node_count())
        .map(|i| solved.node_voltage(NodeId(i)))
        .collect();

    let branches = circuit
        .components
        .iter()
        .map(|component| {
            let (node_a, node_b) = node_map.component_nodes(component);
            let voltage = solved.node_voltage(node_a) - solved.node_voltage(node_b);

            let current = match component.kind {
                ComponentKind::VoltageSource => {
                    solved.source_current(&component.id).unwrap_or(zero)
                }
                kind => passive_admittance(kind, component.value, omega)
                    .map(|y| y * voltage)
                    .unwrap_or(zero),
            };

            Branch {
                component_id: component.id.clone(),
                label: component.label.clone(),
                voltage,
                current,
            }
        })
        .collect();

    Solution {
        frequency: circuit.frequency,
        node_voltages,
        branches,
    }
}

impl Solution {
    /// Look up a branch record by component id.
    pub fn branch(&self, component_id: &str) -> Option<&Branch> {
        self.branches
            .iter()
            .find(|b| b.component_id == component_id)
    }
}
