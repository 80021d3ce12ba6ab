//! Spring attraction and pairwise repulsion.
//!
//! Both force laws roughly follow Fruchterman and Reingold (1991):
//!
//! - **Attraction**: every edge is a spring. For edge (u, v) with
//!   `r = pos[v] - pos[u]`, the force `r̂ * |r| / spring_length` is added to u
//!   and subtracted from v. The law is linear and signed through `r`; it does
//!   not push apart endpoints that are closer than the spring length.
//! - **Repulsion**: every ordered pair (u, v), u ≠ v, pushes u away from v
//!   with `r̂ * repulsion_constant * spring_length² / |r|²`. Visiting both
//!   (u, v) and (v, u) gives each node exactly one contribution from every
//!   other node, so the pair forces cancel without explicit negation.
//!
//! Repulsion is O(N²) per step and dominates the cost of a run.
//!
//! # Coincident nodes
//!
//! Two nodes at exactly the same position have no direction between them.
//! `unit()` returns the zero vector, so their spring contribution is zero,
//! and the repulsion for the pair is skipped instead of evaluating `0 / 0`.
//! Such nodes exert no force on each other and stay stacked unless a third
//! node separates them.
//!
//! The same skip applies when the nodes are so close that `|r|²` underflows
//! and the repulsion magnitude is infinite. Pairs that are merely very close
//! still get a finite, possibly enormous, push.

use crate::geometry::Vector2;
use crate::graph::Topology;

use super::params::SimulationParameters;

/// Per-node force accumulators from one evaluation, indexed by node id.
///
/// Attraction and repulsion are kept apart so an integrator can weight them
/// differently; [`net`](Self::net) sums them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forces {
    attraction: Vec<Vector2>,
    repulsion: Vec<Vector2>,
}

impl Forces {
    pub fn attraction(&self) -> &[Vector2] {
        &self.attraction
    }

    pub fn repulsion(&self) -> &[Vector2] {
        &self.repulsion
    }

    /// Number of nodes covered.
    pub fn len(&self) -> usize {
        self.attraction.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attraction.is_empty()
    }

    /// Attraction plus repulsion on node `index`.
    pub fn net(&self, index: usize) -> Option<Vector2> {
        Some(*self.attraction.get(index)? + *self.repulsion.get(index)?)
    }
}

/// Evaluates the force laws against a topology's current positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    repulsion_constant: f64,
    spring_length: f64,
}

impl ForceModel {
    pub fn new(params: &SimulationParameters) -> Self {
        Self {
            repulsion_constant: params.repulsion_constant,
            spring_length: params.spring_length,
        }
    }

    /// Compute both force mappings from a single snapshot of positions.
    pub fn compute(&self, topology: &Topology) -> Forces {
        Forces {
            attraction: self.spring_forces(topology),
            repulsion: self.repulsive_forces(topology),
        }
    }

    /// Net spring force per node. One contribution per edge, so parallel
    /// edges pull proportionally harder.
    pub fn spring_forces(&self, topology: &Topology) -> Vec<Vector2> {
        let nodes = topology.nodes();
        let mut forces = vec![Vector2::ZERO; nodes.len()];

        for edge in topology.edges() {
            let (source, destination) = (edge.source().index(), edge.destination().index());

            let r = nodes[destination].position() - nodes[source].position();
            let attraction = r.unit() * (r.length() / self.spring_length);

            forces[source] += attraction;
            forces[destination] -= attraction;
        }

        forces
    }

    /// Net repulsive force per node from every other node.
    pub fn repulsive_forces(&self, topology: &Topology) -> Vec<Vector2> {
        let nodes = topology.nodes();
        let mut forces = vec![Vector2::ZERO; nodes.len()];
        let scale = self.repulsion_constant * self.spring_length * self.spring_length;

        for (u, node_u) in nodes.iter().enumerate() {
            for (v, node_v) in nodes.iter().enumerate() {
                if u == v {
                    continue;
                }

                let r = node_v.position() - node_u.position();
                let magnitude = scale / r.length_squared();
                if !magnitude.is_finite() {
                    continue;
                }

                forces[u] -= r.unit() * magnitude;
            }
        }

        forces
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::graph::Edge;

    fn model() -> ForceModel {
        ForceModel::new(&SimulationParameters::default())
    }

    fn topology(positions: &[(f64, f64)], edges: &[(u32, u32)]) -> Topology {
        Topology::from_positions(
            positions.iter().copied().map(Vector2::from),
            edges.iter().copied().map(Edge::from).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_spring_pulls_endpoints_together() {
        let topology = topology(&[(0.0, 0.0), (200.0, 0.0)], &[(0, 1)]);
        let forces = model().spring_forces(&topology);

        // |r| / spring_length = 200 / 100
        assert_eq!(forces[0], Vector2::new(2.0, 0.0));
        assert_eq!(forces[1], Vector2::new(-2.0, 0.0));
    }

    #[test]
    fn test_spring_is_not_clamped_below_rest_length() {
        // Closer than the spring length still attracts.
        let topology = topology(&[(0.0, 0.0), (50.0, 0.0)], &[(0, 1)]);
        let forces = model().spring_forces(&topology);

        assert_eq!(forces[0], Vector2::new(0.5, 0.0));
        assert_eq!(forces[1], Vector2::new(-0.5, 0.0));
    }

    #[test]
    fn test_spring_accumulates_per_edge() {
        let topology = topology(
            &[(0.0, 0.0), (100.0, 0.0), (0.0, 100.0)],
            &[(0, 1), (0, 2), (0, 1)],
        );
        let forces = model().spring_forces(&topology);

        assert_eq!(forces[0], Vector2::new(2.0, 1.0));
        assert_eq!(forces[1], Vector2::new(-2.0, 0.0));
        assert_eq!(forces[2], Vector2::new(0.0, -1.0));
    }

    #[test]
    fn test_repulsion_magnitude() {
        let topology = topology(&[(0.0, 0.0), (100.0, 0.0)], &[]);
        let forces = model().repulsive_forces(&topology);

        // 0.5 * 100² / 100² = 0.5, pointing away from the other node
        assert_approx_eq!(f64, forces[0].x(), -0.5);
        assert_approx_eq!(f64, forces[0].y(), 0.0);
        assert_approx_eq!(f64, forces[1].x(), 0.5);
    }

    #[test]
    fn test_repulsion_is_antisymmetric_for_two_nodes() {
        let topology = topology(&[(13.0, -7.5), (-41.25, 96.0)], &[]);
        let forces = model().repulsive_forces(&topology);

        assert_eq!(forces[0], -forces[1]);
        assert!(!forces[0].is_zero());
    }

    #[test]
    fn test_repulsion_sums_to_zero() {
        let topology = topology(&[(0.0, 0.0), (30.0, 10.0), (-20.0, 45.0), (5.0, -60.0)], &[]);
        let forces = model().repulsive_forces(&topology);

        let total = forces.iter().fold(Vector2::ZERO, |acc, &f| acc + f);
        assert_approx_eq!(f64, total.x(), 0.0, epsilon = 1e-9);
        assert_approx_eq!(f64, total.y(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_coincident_nodes_exert_no_force() {
        let topology = topology(&[(5.0, 5.0), (5.0, 5.0)], &[(0, 1)]);
        let forces = model().compute(&topology);

        assert_eq!(forces.attraction(), &[Vector2::ZERO, Vector2::ZERO]);
        assert_eq!(forces.repulsion(), &[Vector2::ZERO, Vector2::ZERO]);
        assert!(forces.net(0).is_some_and(|f| f.x().is_finite() && f.y().is_finite()));
    }

    #[test]
    fn test_near_coincident_nodes_do_not_produce_infinite_repulsion() {
        // 1e-160² underflows to a subnormal, so the raw magnitude is infinite.
        let topology = topology(&[(0.0, 0.0), (1e-160, 0.0), (100.0, 0.0)], &[]);
        let forces = model().repulsive_forces(&topology);

        assert!(forces.iter().all(|f| f.x().is_finite() && f.y().is_finite()));
        // Only the third node contributes: 0.5 * 100² / 100²
        assert_approx_eq!(f64, forces[0].x(), -0.5, epsilon = 1e-12);
        assert_approx_eq!(f64, forces[1].x(), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_accumulators_are_independent() {
        // A single edge must not leak into unrelated nodes' accumulators.
        let topology = topology(&[(0.0, 0.0), (100.0, 0.0), (500.0, 500.0)], &[(0, 1)]);
        let forces = model().spring_forces(&topology);

        assert_eq!(forces[2], Vector2::ZERO);
        assert_ne!(forces[0], forces[1]);
    }

    #[test]
    fn test_net_force() {
        let topology = topology(&[(0.0, 0.0), (100.0, 0.0)], &[(0, 1)]);
        let forces = model().compute(&topology);

        assert_eq!(forces.len(), 2);
        let net = forces.net(0).unwrap();
        assert_approx_eq!(f64, net.x(), 0.5);
        assert!(forces.net(2).is_none());
    }
}
