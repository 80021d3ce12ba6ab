//! Topology - the node and edge store.
//!
//! The Topology owns the node and edge sequences, validates that they form a
//! graph with dense ids, and derives two read-only views:
//! - a symmetric [`AdjacencyMatrix`] for O(1) "are these linked" lookups
//! - a petgraph StableGraph mirror for neighbour and degree queries

use log::debug;
use petgraph::Undirected;
use petgraph::stable_graph::{NodeIndex, StableGraph};

use super::adjacency::AdjacencyMatrix;
use super::edge::Edge;
use super::node::{Node, NodeId};
use crate::error::{LayoutError, TopologyError};
use crate::geometry::Vector2;

/// The graph being laid out.
///
/// Node identity and the edge list are fixed at construction. Only node
/// positions and velocities change afterwards, and only the simulation
/// driver writes them.
#[derive(Debug, Clone)]
pub struct Topology {
    /// Node sequence; `nodes[i].id() == NodeId(i)`.
    nodes: Vec<Node>,

    /// Edge sequence in insertion order.
    edges: Vec<Edge>,

    /// Symmetric link matrix derived from `edges`.
    adjacency: AdjacencyMatrix,

    /// Undirected mirror of the topology.
    /// Node weights are the NodeIds, edge weights the edge strengths.
    graph: StableGraph<NodeId, f64, Undirected>,
}

impl Topology {
    /// Build a topology from nodes and edges.
    ///
    /// Fails with [`LayoutError::InvalidTopology`] if a node's id differs from
    /// its index or an edge endpoint is outside `0..nodes.len()`. Validation
    /// runs before anything is built.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, LayoutError> {
        validate(&nodes, &edges)?;

        let adjacency = AdjacencyMatrix::from_edges(nodes.len(), &edges);

        let mut graph = StableGraph::with_capacity(nodes.len(), edges.len());
        for node in &nodes {
            graph.add_node(node.id());
        }
        for edge in &edges {
            graph.add_edge(
                NodeIndex::new(edge.source().index()),
                NodeIndex::new(edge.destination().index()),
                edge.strength(),
            );
        }

        let node_count = nodes.len();
        let edge_count = edges.len();
        debug!(node_count, edge_count; "Built topology");

        Ok(Self {
            nodes,
            edges,
            adjacency,
            graph,
        })
    }

    /// Build a topology from initial positions, assigning ids in order.
    ///
    /// Every node starts with zero velocity and weight 1.
    pub fn from_positions(
        positions: impl IntoIterator<Item = Vector2>,
        edges: Vec<Edge>,
    ) -> Result<Self, LayoutError> {
        let nodes = positions
            .into_iter()
            .enumerate()
            .map(|(index, position)| Node::new(NodeId(index as u32), position))
            .collect();
        Self::new(nodes, edges)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn adjacency(&self) -> &AdjacencyMatrix {
        &self.adjacency
    }

    /// Whether an edge links `a` and `b`, in either direction.
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency.get(a.index(), b.index())
    }

    /// Current position of every node, indexed by id.
    pub fn positions(&self) -> Vec<Vector2> {
        self.nodes.iter().map(Node::position).collect()
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    // =========================================================================
    // Graph Queries
    // =========================================================================

    /// Distinct neighbours of a node, sorted by id.
    ///
    /// Unknown ids have no neighbours.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        if id.index() >= self.nodes.len() {
            return Vec::new();
        }

        let mut neighbors: Vec<NodeId> = self
            .graph
            .neighbors(NodeIndex::new(id.index()))
            .filter_map(|n| self.graph.node_weight(n).copied())
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Number of edges incident to a node (parallel edges counted separately).
    pub fn degree(&self, id: NodeId) -> usize {
        if id.index() >= self.nodes.len() {
            return 0;
        }
        self.graph.edges(NodeIndex::new(id.index())).count()
    }
}

fn validate(nodes: &[Node], edges: &[Edge]) -> Result<(), TopologyError> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id().index() != index {
            return Err(TopologyError::NodeIdMismatch {
                index,
                id: node.id(),
            });
        }
    }

    let node_count = nodes.len();
    for (edge_index, edge) in edges.iter().enumerate() {
        let (source, destination) = edge.endpoints();
        for node_id in [source, destination] {
            if node_id.index() >= node_count {
                return Err(TopologyError::EdgeEndpointOutOfRange {
                    edge: edge_index,
                    node_id,
                    node_count,
                });
            }
        }
    }

    Ok(())
}
