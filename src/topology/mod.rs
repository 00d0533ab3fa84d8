//! Terminal-to-node topology building.
//!
//! Wires are zero-impedance connections, so every set of wire-connected
//! terminals is a single electrical node. This module collapses terminals
//! into nodes with a disjoint-set (union-find) structure and assigns each
//! equivalence class a node index, with index 0 reserved for the ground
//! class.
//!
//! The structure is built fresh for each call; nothing is shared between
//! solves.

use std::collections::HashMap;
use std::hash::Hash;

use crate::circuit::{Circuit, Component, NodeId, TerminalKey};

/// A disjoint-set (union-find) over an opaque key type, with path
/// compression and union by rank.
#[derive(Debug, Default)]
pub struct DisjointSet<K> {
    parent: Vec<usize>,
    rank: Vec<u8>,
    index: HashMap<K, usize>,
    keys: Vec<K>,
}

impl<K: Eq + Hash + Clone> DisjointSet<K> {
    /// Create an empty disjoint-set.
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            rank: Vec::new(),
            index: HashMap::new(),
            keys: Vec::new(),
        }
    }

    /// Register a key as a singleton set if unseen; returns its slot.
    pub fn insert(&mut self, key: K) -> usize {
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.parent.len();
        self.parent.push(id);
        self.rank.push(0);
        self.index.insert(key.clone(), id);
        self.keys.push(key);
        id
    }

    /// Find the representative of a slot, compressing the path.
    pub fn find(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = slot;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets containing the two keys, registering them as needed.
    pub fn union(&mut self, a: K, b: K) {
        let ia = self.insert(a);
        let ib = self.insert(b);
        let ra = self.find(ia);
        let rb = self.find(ib);
        if ra == rb {
            return;
        }
        // Union by rank: attach the shallower tree under the deeper one.
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no keys have been registered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in first-discovery order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }
}

/// The resolved topology: every terminal key mapped to its node index.
///
/// Node indices form the contiguous range `[0, node_count)`. Index 0 is the
/// ground slot; it is reserved even when no ground component is designated,
/// in which case no terminal maps to it and the circuit has no true
/// reference (the solver will reject it as singular unless voltage sources
/// pin it down).
#[derive(Debug)]
pub struct NodeMap {
    terminal_to_node: HashMap<TerminalKey, NodeId>,
    node_count: usize,
}

impl NodeMap {
    /// Build the node mapping for a circuit.
    ///
    /// Wires with both endpoints present are unioned; dangling wires are
    /// skipped. Every terminal of every component is registered so that
    /// unwired terminals still resolve to a (singleton) node. Roots are
    /// numbered in first-discovery order, ground-class roots first as 0.
    pub fn build(circuit: &Circuit) -> Self {
        let mut sets = DisjointSet::new();

        for wire in &circuit.wires {
            match wire.endpoints() {
                Some((start, end)) => sets.union(start.clone(), end.clone()),
                None => log::debug!("skipping wire with missing endpoint"),
            }
        }

        for component in &circuit.components {
            for key in component.terminal_keys() {
                sets.insert(key);
            }
        }

        // Every root reachable from a terminal of the ground component
        // belongs to the ground class.
        let mut ground_roots = Vec::new();
        if let Some(ground) = circuit.ground_component() {
            for key in ground.terminal_keys() {
                let slot = sets.insert(key);
                let root = sets.find(slot);
                if !ground_roots.contains(&root) {
                    ground_roots.push(root);
                }
            }
        }

        let mut root_to_node: HashMap<usize, NodeId> = HashMap::new();
        let mut next_node = 1usize;
        for slot in 0..sets.len() {
            let root = sets.find(slot);
            if root_to_node.contains_key(&root) {
                continue;
            }
            let node = if ground_roots.contains(&root) {
                NodeId::GROUND
            } else {
                let node = NodeId(next_node);
                next_node += 1;
                node
            };
            root_to_node.insert(root, node);
        }

        let mut terminal_to_node = HashMap::with_capacity(sets.len());
        for slot in 0..sets.len() {
            let root = sets.find(slot);
            let key = sets.keys()[slot].clone();
            terminal_to_node.insert(key, root_to_node[&root]);
        }

        Self {
            terminal_to_node,
            node_count: next_node,
        }
    }

    /// Total number of nodes, ground included.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Resolve a terminal key to its node. Unregistered keys resolve to
    /// ground, matching the permissive lookup of the original frontend
    /// contract.
    pub fn node_of(&self, key: &TerminalKey) -> NodeId {
        self.terminal_to_node
            .get(key)
            .copied()
            .unwrap_or(NodeId::GROUND)
    }

    /// The (positive, negative) node pair of a two-terminal component.
    /// A missing second terminal is treated as ground.
    pub fn component_nodes(&self, component: &Component) -> (NodeId, NodeId) {
        let positive = self.node_of(&component.positive_terminal());
        let negative = component
            .negative_terminal()
            .map(|key| self.node_of(&key))
            .unwrap_or(NodeId::GROUND);
        (positive, negative)
    }
}
