//! Typed circuit model.
//!
//! This module provides the internal representation of a circuit after the
//! JSON boundary has been crossed: typed components, wires between terminal
//! keys, and the optional ground designation. The model is immutable for the
//! duration of one solve.

mod model;
mod types;
mod validate;

pub use model::{Circuit, Component, Wire};
pub use types::{ComponentKind, NodeId, TerminalKey};
pub use validate::validate_circuit;
