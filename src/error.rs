//! Error types for the Phasor circuit solver.
//!
//! This module provides a unified error type [`PhasorError`] that covers
//! all error conditions that can occur during request parsing, circuit
//! validation, and solving.

use thiserror::Error;

/// Result type alias using [`PhasorError`].
pub type Result<T> = std::result::Result<T, PhasorError>;

/// Unified error type for all Phasor operations.
#[derive(Error, Debug)]
pub enum PhasorError {
    // ============ Circuit Model Errors ============
    /// No components were supplied at all
    #[error("No components provided")]
    EmptyCircuit,

    /// Invalid component definition
    #[error("Invalid component '{id}': {message}")]
    InvalidComponent { id: String, message: String },

    /// Duplicate component identifier
    #[error("Duplicate component id '{id}'")]
    DuplicateComponent { id: String },

    /// Invalid solve parameter (e.g. negative frequency)
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    // ============ Solver Errors ============
    /// Nothing to solve: no non-ground nodes and no voltage sources
    #[error("Degenerate system: no nodes found beyond ground and no voltage sources")]
    DegenerateSystem,

    /// The assembled matrix has no unique solution
    #[error("Singular system: {message}")]
    SingularSystem { message: String },

    // ============ I/O Errors (CLI) ============
    /// Error reading a circuit description file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a netlist file
    #[error("Failed to write netlist file '{path}': {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON in a request or circuit file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PhasorError {
    /// Create an invalid component error.
    pub fn invalid_component(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a singular system error.
    pub fn singular(message: impl Into<String>) -> Self {
        Self::SingularSystem {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}
