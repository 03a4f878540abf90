//! Point charges and configurations.

use glam::DVec3;

/// A point charge.
///
/// The charge is fixed at construction; only the position moves during a run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    position: DVec3,
    charge: f64,
}

impl Node {
    pub fn new(position: DVec3, charge: f64) -> Self {
        Self { position, charge }
    }

    /// Current position.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Charge in coulombs.
    pub fn charge(&self) -> f64 {
        self.charge
    }
}

/// An ordered set of nodes.
///
/// Indices are stable for the lifetime of a run, so "node `i`" always refers
/// to the same charge. Candidate moves are evaluated on a copy made with
/// [`Configuration::with_position`]; the live configuration is only touched
/// when a move is committed.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    nodes: Vec<Node>,
}

impl Configuration {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node at `index`. Panics if out of range.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Snapshot of all positions, in node order.
    pub fn positions(&self) -> Vec<DVec3> {
        self.nodes.iter().map(Node::position).collect()
    }

    /// Returns a copy where only node `index` has moved to `position`.
    pub fn with_position(&self, index: usize, position: DVec3) -> Self {
        let mut moved = self.clone();
        moved.set_position(index, position);
        moved
    }

    pub(crate) fn set_position(&mut self, index: usize, position: DVec3) {
        self.nodes[index].position = position;
    }
}
