//! Edge type.
//!
//! Edges (links) connect two nodes by id. The force model treats every edge as
//! an undirected spring; the direction only fixes the sign convention of the
//! spring vector.

use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// A link between two nodes.
///
/// `strength` is carried through the data model but does not affect the
/// spring force.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    source: NodeId,
    destination: NodeId,
    strength: f64,
}

impl Edge {
    /// Create an edge from `source` to `destination`.
    pub fn new(source: NodeId, destination: NodeId, strength: f64) -> Self {
        Self {
            source,
            destination,
            strength,
        }
    }

    #[inline]
    pub fn source(&self) -> NodeId {
        self.source
    }

    #[inline]
    pub fn destination(&self) -> NodeId {
        self.destination
    }

    #[inline]
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Both endpoints, source first.
    #[inline]
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.source, self.destination)
    }
}

impl From<(u32, u32)> for Edge {
    /// Unit-strength edge from a `(source, destination)` pair.
    fn from((source, destination): (u32, u32)) -> Self {
        Self::new(NodeId(source), NodeId(destination), 1.0)
    }
}
