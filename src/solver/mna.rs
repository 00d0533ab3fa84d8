//! MNA matrix assembly and complex linear solving.

use std::collections::HashMap;

use num_complex::Complex64;

use crate::circuit::{Circuit, ComponentKind, NodeId};
use crate::error::{PhasorError, Result};
use crate::topology::NodeMap;
use crate::{SHORT_CIRCUIT_CONDUCTANCE, SINGULARITY_THRESHOLD};

/// Admittance a passive component stamps at angular frequency ω.
///
/// Returns `None` for kinds that contribute no four-term stamp (voltage
/// sources, unrecognized kinds, capacitors at DC). The same value drives
/// both matrix assembly and branch-current extraction, so the reported
/// currents are always consistent with the stamped model — including the
/// near-ideal-short approximations.
pub(crate) fn passive_admittance(
    kind: ComponentKind,
    value: f64,
    omega: f64,
) -> Option<Complex64> {
    match kind {
        ComponentKind::Resistor => {
            let g = if value == 0.0 {
                SHORT_CIRCUIT_CONDUCTANCE
            } else {
                1.0 / value
            };
            Some(Complex64::new(g, 0.0))
        }
        ComponentKind::Capacitor => {
            if omega == 0.0 {
                // DC: open circuit, no stamp
                None
            } else {
                Some(Complex64::new(0.0, omega * value))
            }
        }
        ComponentKind::Inductor => {
            if omega == 0.0 {
                // DC: near-ideal short
                Some(Complex64::new(SHORT_CIRCUIT_CONDUCTANCE, 0.0))
            } else if value == 0.0 {
                Some(Complex64::new(0.0, 0.0))
            } else {
                Some(Complex64::new(0.0, omega * value).inv())
            }
        }
        ComponentKind::VoltageSource | ComponentKind::Unknown => None,
    }
}

/// The assembled augmented MNA system `Ax = z`.
///
/// For `n` non-ground nodes and `m` voltage sources, `A` is the dense
/// `(n+m)²` complex matrix with the admittance block `G` in the top-left,
/// the incidence rows `B` below it, and `Bᵀ` to its right; `z` carries the
/// source set-points in its last `m` entries.
#[derive(Debug)]
pub struct MnaSystem {
    /// System matrix A (row-major)
    a: Vec<Complex64>,
    /// Source vector z
    z: Vec<Complex64>,
    /// Matrix dimension n + m
    size: usize,
    /// Number of non-ground nodes n
    nodes: usize,
    /// Voltage source ordinal per component id
    source_rows: HashMap<String, usize>,
}

impl MnaSystem {
    /// Assemble the system for a circuit over a resolved node map.
    ///
    /// Fails with [`PhasorError::DegenerateSystem`] when the circuit has no
    /// non-ground nodes and no voltage sources.
    pub fn assemble(circuit: &Circuit, node_map: &NodeMap) -> Result<Self> {
        let omega = circuit.omega();
        let nodes = node_map.node_count() - 1;

        let mut source_rows = HashMap::new();
        for component in &circuit.components {
            if component.kind == ComponentKind::VoltageSource {
                let ordinal = source_rows.len();
                source_rows.insert(component.id.clone(), ordinal);
            }
        }
        let sources = source_rows.len();

        if nodes == 0 && sources == 0 {
            return Err(PhasorError::DegenerateSystem);
        }

        let size = nodes + sources;
        let mut system = Self {
            a: vec![Complex64::new(0.0, 0.0); size * size],
            z: vec![Complex64::new(0.0, 0.0); size],
            size,
            nodes,
            source_rows,
        };

        for component in &circuit.components {
            let (node_a, node_b) = node_map.component_nodes(component);
            match component.kind {
                ComponentKind::VoltageSource => {
                    let row = nodes + system.source_rows[&component.id];
                    system.stamp_voltage_source(
                        node_a.reduced(),
                        node_b.reduced(),
                        row,
                        Complex64::new(component.value, 0.0),
                    );
                }
                kind => {
                    if let Some(y) = passive_admittance(kind, component.value, omega) {
                        system.stamp_admittance(node_a.reduced(), node_b.reduced(), y);
                    } else if kind == ComponentKind::Unknown {
                        log::debug!(
                            "component '{}' has unrecognized kind '{}', ignoring",
                            component.id,
                            component.label
                        );
                    }
                }
            }
        }

        Ok(system)
    }

    /// Add to matrix element at (row, col).
    fn add(&mut self, row: usize, col: usize, value: Complex64) {
        self.a[row * self.size + col] += value;
    }

    /// Stamp an admittance between two reduced node indices.
    /// For an admittance Y between nodes n1 and n2:
    ///   A[n1,n1] += Y
    ///   A[n2,n2] += Y
    ///   A[n1,n2] -= Y
    ///   A[n2,n1] -= Y
    /// Terms touching ground (`None`) are omitted.
    fn stamp_admittance(&mut self, n1: Option<usize>, n2: Option<usize>, y: Complex64) {
        if let Some(i) = n1 {
            self.add(i, i, y);
        }
        if let Some(j) = n2 {
            self.add(j, j, y);
        }
        if let (Some(i), Some(j)) = (n1, n2) {
            self.add(i, j, -y);
            self.add(j, i, -y);
        }
    }

    /// Stamp a voltage source constraint V[n+] - V[n-] = E on row `row`,
    /// mirrored into the Bᵀ column so the branch current enters the node
    /// equations.
    fn stamp_voltage_source(
        &mut self,
        n_pos: Option<usize>,
        n_neg: Option<usize>,
        row: usize,
        voltage: Complex64,
    ) {
        let one = Complex64::new(1.0, 0.0);
        if let Some(i) = n_pos {
            self.add(row, i, one);
            self.add(i, row, one);
        }
        if let Some(j) = n_neg {
            self.add(row, j, -one);
            self.add(j, row, -one);
        }
        self.z[row] = voltage;
    }

    /// Solve the system by dense LU factorization with partial pivoting,
    /// consuming the assembled matrix.
    ///
    /// Fails with [`PhasorError::SingularSystem`] when a pivot vanishes —
    /// typically a floating node (all-zero row) or redundant/contradictory
    /// voltage-source constraints. No approximate fallback is attempted.
    pub fn solve(mut self) -> Result<MnaSolution> {
        let n = self.size;
        let mut pivots: Vec<usize> = (0..n).collect();

        for k in 0..n {
            // Find pivot
            let mut max_val = self.a[k * n + k].norm();
            let mut max_row = k;

            for i in (k + 1)..n {
                let val = self.a[i * n + k].norm();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if max_val < SINGULARITY_THRESHOLD {
                return Err(PhasorError::singular(format!(
                    "pivot vanished at row {k} of {n}; the circuit likely has a \
                     floating node or conflicting voltage sources"
                )));
            }

            // Swap rows if needed
            if max_row != k {
                pivots.swap(k, max_row);
                for j in 0..n {
                    self.a.swap(k * n + j, max_row * n + j);
                }
            }

            // Eliminate
            let pivot = self.a[k * n + k];
            for i in (k + 1)..n {
                let factor = self.a[i * n + k] / pivot;
                self.a[i * n + k] = factor;
                for j in (k + 1)..n {
                    let upper = self.a[k * n + j];
                    self.a[i * n + j] -= factor * upper;
                }
            }
        }

        // Apply the pivot permutation to z
        let mut x: Vec<Complex64> = pivots.iter().map(|&p| self.z[p]).collect();

        // Forward substitution (L * y = Pz)
        for i in 0..n {
            for j in 0..i {
                let l = self.a[i * n + j];
                let y = x[j];
                x[i] -= l * y;
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let u = self.a[i * n + j];
                let y = x[j];
                x[i] -= u * y;
            }
            let diag = self.a[i * n + i];
            if diag.norm() < SINGULARITY_THRESHOLD {
                return Err(PhasorError::singular(format!(
                    "zero diagonal at row {i} during back substitution"
                )));
            }
            x[i] /= diag;
        }

        Ok(MnaSolution {
            values: x,
            nodes: self.nodes,
            source_rows: self.source_rows,
        })
    }
}

/// The raw solution vector with the node/source split preserved.
#[derive(Debug)]
pub struct MnaSolution {
    values: Vec<Complex64>,
    nodes: usize,
    source_rows: HashMap<String, usize>,
}

impl MnaSolution {
    /// Voltage at a node. Ground is exactly zero, as is the reserved slot 0
    /// of a circuit with no designated ground.
    pub fn node_voltage(&self, node: NodeId) -> Complex64 {
        match node.reduced() {
            Some(i) if i < self.nodes => self.values[i],
            _ => Complex64::new(0.0, 0.0),
        }
    }

    /// Solved branch current of a voltage source, by component id.
    /// Sign convention: positive current flows into the positive terminal.
    pub fn source_current(&self, component_id: &str) -> Option<Complex64> {
        let ordinal = *self.source_rows.get(component_id)?;
        Some(self.values[self.nodes + ordinal])
    }
}
