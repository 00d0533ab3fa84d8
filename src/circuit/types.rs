//! Core types for circuit representation.

use std::fmt;

/// A unique identifier for an electrical node.
/// Node 0 is always ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The ground node (always index 0).
    pub const GROUND: NodeId = NodeId(0);

    /// Check if this is the ground node.
    pub fn is_ground(&self) -> bool {
        self.0 == 0
    }

    /// Reduced index into the MNA node block, or `None` for ground.
    pub fn reduced(&self) -> Option<usize> {
        if self.is_ground() {
            None
        } else {
            Some(self.0 - 1)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The globally unique key for one terminal of one component: the atomic
/// unit the disjoint-set operates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TerminalKey {
    /// Identifier of the owning component
    pub component: String,
    /// Terminal identifier within that component
    pub terminal: u32,
}

impl TerminalKey {
    /// Create a terminal key.
    pub fn new(component: impl Into<String>, terminal: u32) -> Self {
        Self {
            component: component.into(),
            terminal,
        }
    }
}

impl fmt::Display for TerminalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.component, self.terminal)
    }
}

/// The closed set of component kinds the solver understands.
///
/// Kind strings are resolved once at the input boundary; anything the
/// dispatch below does not recognize becomes [`ComponentKind::Unknown`],
/// which contributes nothing to the system and is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Resistor,
    Capacitor,
    Inductor,
    VoltageSource,
    Unknown,
}

impl ComponentKind {
    /// Resolve a kind from its wire-format string.
    ///
    /// Accepts the long names and their single-letter SPICE abbreviations,
    /// case-insensitively. Any other string starting with `v` is treated as
    /// a voltage source (`"voltage_source"`, `"vsource"`, `"V1"`, ...).
    pub fn parse(s: &str) -> Self {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "resistor" | "r" => Self::Resistor,
            "capacitor" | "c" => Self::Capacitor,
            "inductor" | "l" => Self::Inductor,
            _ if lower.starts_with('v') => Self::VoltageSource,
            _ => Self::Unknown,
        }
    }

    /// Whether this kind contributes a stamp to the MNA system and
    /// therefore requires a value.
    pub fn is_stamped(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// SPICE designator letter for netlist output, `None` for kinds the
    /// netlist format does not carry.
    pub fn netlist_prefix(&self) -> Option<char> {
        match self {
            Self::Resistor => Some('R'),
            Self::Capacitor => Some('C'),
            Self::Inductor => Some('L'),
            Self::VoltageSource => Some('V'),
            Self::Unknown => None,
        }
    }
}
