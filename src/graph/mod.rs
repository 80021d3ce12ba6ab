//! Graph data structures.
//!
//! This module provides the topology store: nodes with dense ids, edges that
//! reference them, and the adjacency views derived from the edge list. A
//! petgraph StableGraph mirror backs the neighbour queries.

mod adjacency;
mod edge;
mod node;
mod topology;

pub use adjacency::AdjacencyMatrix;
pub use edge::Edge;
pub use node::{Node, NodeId};
pub use topology::Topology;
