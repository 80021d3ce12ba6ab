//! Force-directed layout.
//!
//! This module turns a [`Topology`](crate::graph::Topology) into a 2D layout
//! by physical analogy: edges are springs, every node pair repels, and the
//! positions are stepped with a cooling schedule until the total energy drops
//! below a threshold or the iteration budget runs out.
//!
//! - [`SimulationParameters`] - constants and budget for a run
//! - [`ForceModel`] - spring attraction and pairwise repulsion
//! - [`Simulation`] - the step/evaluate loop and its state machine

pub mod forces;
pub mod params;
pub mod simulation;

pub use forces::{ForceModel, Forces};
pub use params::SimulationParameters;
pub use simulation::{
    Frame, FrameObserver, NoopObserver, RunReport, RunState, Simulation, SimulationState,
};
