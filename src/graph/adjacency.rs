//! Dense symmetric adjacency matrix.

use super::edge::Edge;

/// Square boolean matrix with `true` at `[i][j]` and `[j][i]` iff an edge
/// connects nodes `i` and `j`.
///
/// Stored row-major in a single buffer. Built once from the edge list and
/// read-only afterwards, so symmetry holds for the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    /// Build the matrix for `size` nodes.
    ///
    /// Every edge endpoint must be below `size`; the topology validates this
    /// before calling.
    pub(crate) fn from_edges(size: usize, edges: &[Edge]) -> Self {
        let mut cells = vec![false; size * size];
        for edge in edges {
            let (a, b) = (edge.source().index(), edge.destination().index());
            cells[a * size + b] = true;
            cells[b * size + a] = true;
        }
        Self { size, cells }
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `i` and `j` are linked. Out-of-range indices are never linked.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> bool {
        if i >= self.size || j >= self.size {
            return false;
        }
        self.cells[i * self.size + j]
    }

    /// One row of the matrix.
    pub fn row(&self, i: usize) -> Option<&[bool]> {
        (i < self.size).then(|| &self.cells[i * self.size..(i + 1) * self.size])
    }
}
