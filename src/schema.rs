//! JSON request/response boundary.
//!
//! The transport itself (HTTP, CORS, ports) is out of scope for this crate;
//! this module defines the schema both the CLI and any embedding server
//! share, and the conversion into the typed [`Circuit`] model.
//!
//! Display convention for complex results: a value whose imaginary part is
//! below [`REAL_EPSILON`] in magnitude reports its signed real part (so DC
//! results keep their sign), anything else reports its magnitude. Either
//! way the number is rounded to [`DISPLAY_DECIMALS`] decimal places.

use std::collections::BTreeMap;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::circuit::{Circuit, Component, TerminalKey, Wire};
use crate::error::{PhasorError, Result};
use crate::solver::Solution;

/// Imaginary magnitude below which a phasor is displayed as a signed real.
pub const REAL_EPSILON: f64 = 1e-9;

/// Decimal places kept in displayed values.
pub const DISPLAY_DECIMALS: i32 = 12;

// ============ Request ============

/// One terminal declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct TerminalSpec {
    pub id: u32,
}

/// One endpoint of a wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEnd {
    pub component_id: String,
    pub terminal_id: u32,
}

/// A wire between two terminals; endpoints may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct WireSpec {
    #[serde(default)]
    pub start: Option<WireEnd>,
    #[serde(default)]
    pub end: Option<WireEnd>,
}

/// A component as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub terminals: Option<Vec<TerminalSpec>>,
}

/// The full solve/export request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitRequest {
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
    #[serde(default)]
    pub wires: Vec<WireSpec>,
    #[serde(default)]
    pub ground_node_id: Option<String>,
    #[serde(default)]
    pub frequency: Option<f64>,
}

impl From<WireEnd> for TerminalKey {
    fn from(end: WireEnd) -> Self {
        TerminalKey::new(end.component_id, end.terminal_id)
    }
}

impl CircuitRequest {
    /// Convert the request into the typed circuit model, performing the
    /// boundary validation (kind resolution, value checks, terminal
    /// defaults).
    pub fn into_circuit(self) -> Result<Circuit> {
        let components = self
            .components
            .into_iter()
            .map(|spec| {
                let terminals = spec
                    .terminals
                    .map(|terms| terms.into_iter().map(|t| t.id).collect());
                Component::new(spec.id, spec.kind, spec.value, terminals)
            })
            .collect::<Result<Vec<_>>>()?;

        let wires = self
            .wires
            .into_iter()
            .map(|spec| Wire {
                start: spec.start.map(Into::into),
                end: spec.end.map(Into::into),
            })
            .collect();

        let mut circuit = Circuit::new(components, wires)
            .with_frequency(self.frequency.unwrap_or(0.0));
        if let Some(ground) = self.ground_node_id {
            circuit = circuit.with_ground(ground);
        }
        Ok(circuit)
    }
}

// ============ Response ============

/// One branch record in the response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchReport {
    pub component_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub voltage: f64,
    pub current: f64,
}

/// Response to a solve request: all or nothing, never partial.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SimulateResponse {
    Success {
        /// Node index (as string) to displayed voltage
        nodes: BTreeMap<String, f64>,
        branches: Vec<BranchReport>,
    },
    Error {
        error: String,
    },
}

impl SimulateResponse {
    /// Build the success response from a solution.
    pub fn from_solution(solution: &Solution) -> Self {
        let nodes = solution
            .node_voltages
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), display_value(*v)))
            .collect();

        let branches = solution
            .branches
            .iter()
            .map(|b| BranchReport {
                component_id: b.component_id.clone(),
                kind: b.label.clone(),
                voltage: display_value(b.voltage),
                current: display_value(b.current),
            })
            .collect();

        Self::Success { nodes, branches }
    }

    /// Build the error response from a pipeline failure.
    pub fn from_error(error: &PhasorError) -> Self {
        Self::Error {
            error: error.to_string(),
        }
    }
}

/// Response to a netlist export request. Unlike the solve response this
/// keeps snake_case field names, matching the established export contract.
#[derive(Debug, Clone, Serialize)]
pub struct NetlistResponse {
    pub status: String,
    pub netlist_path: String,
    pub line_count: usize,
}

/// Collapse a phasor to its displayed scalar: signed real part when the
/// imaginary part is negligible, magnitude otherwise, rounded either way.
pub fn display_value(value: Complex64) -> f64 {
    let scalar = if value.im.abs() < REAL_EPSILON {
        value.re
    } else {
        value.norm()
    };
    round_places(scalar, DISPLAY_DECIMALS)
}

fn round_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
