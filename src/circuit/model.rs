//! Circuit model: components, wires, and the full circuit description.

use crate::error::{PhasorError, Result};

use super::types::{ComponentKind, TerminalKey};

/// Terminal identifiers assumed when a component declares none.
/// Terminal 0 is the positive reference for the sign convention.
const DEFAULT_TERMINALS: [u32; 2] = [0, 1];

/// A single circuit component.
///
/// Terminal order is significant: `terminals[0]` is the positive reference
/// for the branch voltage/current sign convention. A component declaring a
/// single terminal has its second terminal treated as ground downstream.
#[derive(Debug, Clone)]
pub struct Component {
    /// Caller-supplied unique identifier
    pub id: String,
    /// Resolved kind
    pub kind: ComponentKind,
    /// Original kind string, echoed back in results
    pub label: String,
    /// Component value in SI units (Ω, F, H, or V)
    pub value: f64,
    /// Ordered terminal identifiers
    pub terminals: Vec<u32>,
}

impl Component {
    /// Create a component, validating at the model boundary.
    ///
    /// A stamped kind (R, C, L, V) without a finite value is rejected as
    /// [`PhasorError::InvalidComponent`] instead of defaulting deep inside
    /// the assembler. An absent or empty terminal list is filled with the
    /// documented default `[0, 1]`; a non-empty declared list is kept
    /// verbatim.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        value: Option<f64>,
        terminals: Option<Vec<u32>>,
    ) -> Result<Self> {
        let id = id.into();
        let label = label.into();
        let kind = ComponentKind::parse(&label);

        let value = match value {
            Some(v) if v.is_finite() => v,
            Some(v) => {
                return Err(PhasorError::invalid_component(
                    &id,
                    format!("value {v} is not finite"),
                ))
            }
            None if kind.is_stamped() => {
                return Err(PhasorError::invalid_component(
                    &id,
                    format!("missing value for kind '{label}'"),
                ))
            }
            None => 0.0,
        };

        let terminals = match terminals {
            Some(terms) if !terms.is_empty() => terms,
            _ => DEFAULT_TERMINALS.to_vec(),
        };

        Ok(Self {
            id,
            kind,
            label,
            value,
            terminals,
        })
    }

    /// Terminal key of the positive (first) terminal.
    pub fn positive_terminal(&self) -> TerminalKey {
        TerminalKey::new(self.id.clone(), self.terminals[0])
    }

    /// Terminal key of the negative (second) terminal, if declared.
    pub fn negative_terminal(&self) -> Option<TerminalKey> {
        self.terminals
            .get(1)
            .map(|&t| TerminalKey::new(self.id.clone(), t))
    }

    /// Iterate over all terminal keys of this component.
    pub fn terminal_keys(&self) -> impl Iterator<Item = TerminalKey> + '_ {
        self.terminals
            .iter()
            .map(|&t| TerminalKey::new(self.id.clone(), t))
    }
}

/// A zero-impedance connection between two terminals.
///
/// Either endpoint may be absent (the frontend drops dangling wires into the
/// payload); such wires are skipped by the topology builder, not rejected.
#[derive(Debug, Clone)]
pub struct Wire {
    pub start: Option<TerminalKey>,
    pub end: Option<TerminalKey>,
}

impl Wire {
    /// Create a wire between two terminals.
    pub fn new(start: TerminalKey, end: TerminalKey) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both endpoints, if the wire is complete.
    pub fn endpoints(&self) -> Option<(&TerminalKey, &TerminalKey)> {
        match (&self.start, &self.end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }
}

/// The full input to one solve: components, wires, the optional ground
/// designation, and the analysis frequency (0 means DC).
#[derive(Debug, Clone)]
pub struct Circuit {
    pub components: Vec<Component>,
    pub wires: Vec<Wire>,
    /// Identifier of the component whose terminals define the ground class
    pub ground: Option<String>,
    /// Analysis frequency in Hz; 0 selects DC
    pub frequency: f64,
}

impl Circuit {
    /// Create a circuit for a DC solve with no ground designation.
    pub fn new(components: Vec<Component>, wires: Vec<Wire>) -> Self {
        Self {
            components,
            wires,
            ground: None,
            frequency: 0.0,
        }
    }

    /// Designate the ground component.
    pub fn with_ground(mut self, id: impl Into<String>) -> Self {
        self.ground = Some(id.into());
        self
    }

    /// Set the analysis frequency in Hz.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Angular frequency ω = 2πf.
    pub fn omega(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.frequency
    }

    /// Look up the designated ground component.
    pub fn ground_component(&self) -> Option<&Component> {
        let id = self.ground.as_deref()?;
        self.components.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_terminals_filled() {
        let c = Component::new("R1", "resistor", Some(1000.0), None).unwrap();
        assert_eq!(c.terminals, vec![0, 1]);
        assert_eq!(c.kind, ComponentKind::Resistor);
    }

    #[test]
    fn test_empty_terminal_list_gets_default() {
        let c = Component::new("R1", "resistor", Some(1000.0), Some(vec![])).unwrap();
        assert_eq!(c.terminals, vec![0, 1]);
    }

    #[test]
    fn test_declared_terminals_kept() {
        let c = Component::new("G1", "ground", None, Some(vec![0])).unwrap();
        assert_eq!(c.terminals, vec![0]);
        assert!(c.negative_terminal().is_none());
    }

    #[test]
    fn test_missing_value_rejected() {
        let err = Component::new("R1", "resistor", None, None).unwrap_err();
        assert!(matches!(err, PhasorError::InvalidComponent { .. }));
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let err = Component::new("C1", "capacitor", Some(f64::NAN), None).unwrap_err();
        assert!(matches!(err, PhasorError::InvalidComponent { .. }));
    }

    #[test]
    fn test_unknown_kind_without_value() {
        let c = Component::new("G1", "ground", None, None).unwrap();
        assert_eq!(c.kind, ComponentKind::Unknown);
        assert_eq!(c.value, 0.0);
    }
}
