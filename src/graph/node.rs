//! Node type and related structures.
//!
//! Nodes are the vertices in the graph. Each node has:
//! - A dense identifier equal to its index in the node sequence
//! - Position in layout space
//! - Velocity, which the simulation overwrites with the net force each step
//! - Weight (carried for callers, not used by the force model)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Vector2;

/// Dense node identifier.
///
/// Ids run from `0` to `node_count - 1` and double as indices into the node
/// sequence. It wraps a u32 for efficient storage and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Get the id as an index into the node sequence.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A graph vertex with its simulation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    position: Vector2,
    velocity: Vector2,
    weight: f64,
}

impl Node {
    /// Create a node at `position` with zero velocity and weight 1.
    pub fn new(id: NodeId, position: Vector2) -> Self {
        Self {
            id,
            position,
            velocity: Vector2::ZERO,
            weight: 1.0,
        }
    }

    /// Set the initial velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[inline]
    pub(crate) fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    #[inline]
    pub(crate) fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }
}
