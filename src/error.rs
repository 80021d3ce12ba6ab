//! Error types for layout operations.
//!
//! Only construction can fail: either the topology is malformed or the
//! simulation parameters are out of range. Numeric degeneracies during a run
//! (coincident nodes, zero-length vectors) are handled by the force model and
//! never surface as errors, and running out of iterations is a regular
//! [`RunState`](crate::layout::RunState), not a failure.

use thiserror::Error;

use crate::graph::NodeId;

/// The main error type for layout operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid topology: {0}")]
    InvalidTopology(#[from] TopologyError),

    #[error("invalid simulation parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl LayoutError {
    /// Create a new `InvalidParameter` error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Reasons a node/edge sequence cannot form a topology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("edge {edge} references {node_id}, but the graph only has {node_count} nodes")]
    EdgeEndpointOutOfRange {
        edge: usize,
        node_id: NodeId,
        node_count: usize,
    },

    #[error("node at index {index} carries id {id}; ids must match their position")]
    NodeIdMismatch { index: usize, id: NodeId },
}
