//! # Phasor Core
//!
//! A steady-state solver for linear circuits described as a graph of typed
//! components and wires.
//!
//! This library provides:
//! - A disjoint-set topology builder that collapses wire-connected terminals
//!   into electrical nodes
//! - Modified Nodal Analysis (MNA) matrix assembly over complex admittances
//! - A dense complex LU solver for the augmented system
//! - Per-component branch voltage/current extraction
//! - A SPICE-style netlist renderer for the same topology
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Typed circuit model (components, wires, terminals)
//! - [`topology`] - Disjoint-set terminal-to-node mapping
//! - [`solver`] - MNA assembly, linear solve, and result extraction
//! - [`netlist`] - Topology-to-text netlist rendering
//! - [`schema`] - JSON request/response boundary
//!
//! ## Solution Method
//!
//! The solver uses Modified Nodal Analysis (MNA). For a circuit with `n`
//! non-ground nodes and `m` voltage sources it assembles the augmented
//! system
//!
//! ```text
//! [ G   Bᵀ ] [ v ]   [ 0 ]
//! [ B   0  ] [ j ] = [ E ]
//! ```
//!
//! where `G` holds the passive admittance stamps, `B` the voltage-source
//! incidence rows, and `E` the source set-points. At `frequency = 0` the
//! system degenerates to a DC solve with zero imaginary parts; at
//! `frequency > 0` capacitors and inductors stamp their phasor admittances
//! at ω = 2πf. One call solves one immutable circuit description; nothing
//! persists between calls.

pub mod circuit;
pub mod error;
pub mod netlist;
pub mod schema;
pub mod solver;
pub mod topology;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use error::{PhasorError, Result};
pub use solver::{solve_circuit, Solution};

/// Conductance used to approximate an ideal short (DC inductor, zero-valued
/// resistor). A deliberate numerical-stability compromise: large enough to
/// pin the two nodes together, small enough to keep the matrix conditioned.
pub const SHORT_CIRCUIT_CONDUCTANCE: f64 = 1e12;

/// Pivot magnitude below which the LU factorization reports a singular system.
pub const SINGULARITY_THRESHOLD: f64 = 1e-15;
