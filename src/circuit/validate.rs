//! Circuit validation.

use std::collections::HashSet;

use crate::error::{PhasorError, Result};

use super::Circuit;

/// Validate a circuit before solving.
///
/// Checks:
/// - At least one component is present
/// - Component identifiers are unique
/// - The frequency is finite and non-negative
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    if circuit.components.is_empty() {
        return Err(PhasorError::EmptyCircuit);
    }

    let mut seen = HashSet::new();
    for component in &circuit.components {
        if !seen.insert(component.id.as_str()) {
            return Err(PhasorError::DuplicateComponent {
                id: component.id.clone(),
            });
        }
    }

    if !circuit.frequency.is_finite() || circuit.frequency < 0.0 {
        return Err(PhasorError::invalid_parameter(format!(
            "frequency must be a non-negative number, got {}",
            circuit.frequency
        )));
    }

    Ok(())
}
