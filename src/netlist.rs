//! SPICE-style netlist rendering.
//!
//! An alternate consumer of the topology builder: instead of solving, the
//! same terminal-to-node map is rendered as a line-oriented netlist, one
//! line per two-terminal component of the form
//!
//! ```text
//! <Prefix><counter> <node1> <node2> <value>
//! ```
//!
//! with an independent running counter per kind (R, C, L, V). Nothing here
//! solves anything; this is a pure topology-to-text transform.
//!
//! Designators come from the resolved [`ComponentKind`], so every kind
//! alias the solver accepts (e.g. `"r"`, `"Vsrc"`) renders under the same
//! letter as its canonical name.

use crate::circuit::{Circuit, ComponentKind};
use crate::topology::NodeMap;

/// Render the netlist lines for a circuit over its resolved node map.
///
/// Components with fewer than two declared terminals (ground pins, probes)
/// and unrecognized kinds are skipped.
pub fn render_netlist(circuit: &Circuit, node_map: &NodeMap) -> Vec<String> {
    let mut lines = Vec::new();
    let mut counters = KindCounters::default();

    for component in &circuit.components {
        if component.terminals.len() < 2 {
            continue;
        }
        let Some(prefix) = component.kind.netlist_prefix() else {
            log::debug!(
                "component '{}' of kind '{}' has no netlist designator, skipping",
                component.id,
                component.label
            );
            continue;
        };

        let (node_a, node_b) = node_map.component_nodes(component);
        let ordinal = counters.next(component.kind);
        lines.push(format!(
            "{prefix}{ordinal} {node_a} {node_b} {}",
            component.value
        ));
    }

    lines
}

/// One running designator counter per component kind.
#[derive(Default)]
struct KindCounters {
    resistors: usize,
    capacitors: usize,
    inductors: usize,
    sources: usize,
}

impl KindCounters {
    fn next(&mut self, kind: ComponentKind) -> usize {
        let counter = match kind {
            ComponentKind::Resistor => &mut self.resistors,
            ComponentKind::Capacitor => &mut self.capacitors,
            ComponentKind::Inductor => &mut self.inductors,
            ComponentKind::VoltageSource => &mut self.sources,
            ComponentKind::Unknown => unreachable!("unknown kinds are skipped"),
        };
        *counter += 1;
        *counter
    }
}
