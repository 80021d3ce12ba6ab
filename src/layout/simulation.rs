//! Simulation driver.
//!
//! The driver owns the topology, the parameters and the mutable loop state,
//! and runs the step/evaluate loop:
//!
//! ```text
//!   Idle ──converge()──► Running ──evaluate()──► Converged
//!                          ▲   │              └► IterationLimitReached
//!                          └───┘ step()
//! ```
//!
//! Each step reads a frozen snapshot of positions, asks the [`ForceModel`]
//! for attraction and repulsion, then writes positions and velocities in a
//! single pass. Velocity is defined as the instantaneous net force, not
//! integrated from an acceleration.
//!
//! Callers who need to stop early can drive the loop themselves with
//! [`Simulation::begin_run`], [`Simulation::step`] and
//! [`Simulation::evaluate`], checking their own condition between steps.

use log::{debug, trace};
use serde::Serialize;

use crate::error::LayoutError;
use crate::geometry::Vector2;
use crate::graph::Topology;

use super::forces::{ForceModel, Forces};
use super::params::SimulationParameters;

/// Where the driver is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RunState {
    /// No run has started yet.
    Idle,
    /// A run is in progress.
    Running,
    /// Total energy fell below the threshold.
    Converged,
    /// The iteration budget was used up.
    IterationLimitReached,
}

impl RunState {
    /// Whether the run has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converged | Self::IterationLimitReached)
    }
}

/// Outcome of a convergence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub terminal_state: RunState,
    pub iterations: usize,
}

/// Node positions after one step, indexed by node id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub iteration: usize,
    pub positions: Vec<Vector2>,
}

/// Receives a [`Frame`] after every step.
///
/// The driver blocks on the observer, so implementations should consume the
/// frame and return quickly.
pub trait FrameObserver {
    fn on_frame(&mut self, frame: &Frame);
}

impl<F> FrameObserver for F
where
    F: FnMut(&Frame),
{
    fn on_frame(&mut self, frame: &Frame) {
        self(frame)
    }
}

/// Observer that discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl FrameObserver for NoopObserver {
    fn on_frame(&mut self, _frame: &Frame) {}
}

/// Mutable loop state, owned by one [`Simulation`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    iteration: usize,
    step_size: f64,
    last_frame_forces: Forces,
}

impl SimulationState {
    fn new(step_size: f64) -> Self {
        Self {
            iteration: 0,
            step_size,
            last_frame_forces: Forces::default(),
        }
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Current (cooled) step size.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Forces computed by the most recent step; empty before the first step
    /// of a run.
    pub fn last_frame_forces(&self) -> &Forces {
        &self.last_frame_forces
    }
}

/// A force-directed layout simulation over one topology.
///
/// # Examples
///
/// ```
/// # use force_layout_wasm::geometry::Vector2;
/// # use force_layout_wasm::graph::{Edge, Topology};
/// # use force_layout_wasm::layout::{NoopObserver, RunState, Simulation, SimulationParameters};
/// let topology = Topology::from_positions(
///     [Vector2::new(-400.0, 0.0), Vector2::new(400.0, 0.0)],
///     vec![Edge::from((0, 1))],
/// )?;
/// let mut simulation = Simulation::new(topology, SimulationParameters::default())?;
///
/// let report = simulation.run(&mut NoopObserver);
/// assert_eq!(report.terminal_state, RunState::Converged);
/// # Ok::<(), force_layout_wasm::LayoutError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    topology: Topology,
    params: SimulationParameters,
    model: ForceModel,
    state: SimulationState,
    run_state: RunState,
    iteration_limit: usize,
}

impl Simulation {
    /// Create a simulation. Fails if the parameters are out of range.
    pub fn new(topology: Topology, params: SimulationParameters) -> Result<Self, LayoutError> {
        params.validate()?;

        Ok(Self {
            model: ForceModel::new(&params),
            state: SimulationState::new(params.step_size),
            run_state: RunState::Idle,
            iteration_limit: params.max_iterations,
            topology,
            params,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Where the driver is: `Idle` before the first run, the terminal state
    /// after a run has finished.
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn iteration(&self) -> usize {
        self.state.iteration
    }

    pub fn step_size(&self) -> f64 {
        self.state.step_size
    }

    /// Iteration budget of the current (or last) run.
    pub fn iteration_limit(&self) -> usize {
        self.iteration_limit
    }

    pub fn last_forces(&self) -> &Forces {
        &self.state.last_frame_forces
    }

    /// Current position of every node, indexed by id.
    pub fn positions(&self) -> Vec<Vector2> {
        self.topology.positions()
    }

    /// Sum over nodes of the squared velocity.
    pub fn energy(&self) -> f64 {
        self.topology
            .nodes()
            .iter()
            .map(|node| node.velocity().length_squared())
            .sum()
    }

    // =========================================================================
    // Loop
    // =========================================================================

    /// Start a new run with the given iteration budget.
    ///
    /// Resets the iteration counter and the last forces. The step size is
    /// left as is, so a second run keeps cooling from where the first ended;
    /// call [`reheat`](Self::reheat) to start hot again.
    pub fn begin_run(&mut self, iteration_limit: usize) {
        self.iteration_limit = iteration_limit;
        self.state.iteration = 0;
        self.state.last_frame_forces = Forces::default();
        self.run_state = RunState::Running;
    }

    /// Restore the step size to its configured initial value.
    pub fn reheat(&mut self) {
        self.state.step_size = self.params.step_size;
    }

    /// Advance the layout by one iteration and emit the new frame.
    pub fn step<O>(&mut self, observer: &mut O)
    where
        O: FrameObserver + ?Sized,
    {
        let forces = self.model.compute(&self.topology);
        let step_size = self.state.step_size;

        let pairs = forces.attraction().iter().zip(forces.repulsion());
        for (node, (&attraction, &repulsion)) in self.topology.nodes_mut().iter_mut().zip(pairs) {
            let net = attraction + repulsion;
            node.set_position(node.position() + net * step_size);
            node.set_velocity(net);
        }

        self.state.step_size *= self.params.cooling;
        self.state.iteration += 1;
        self.state.last_frame_forces = forces;
        self.run_state = RunState::Running;

        trace!(
            iteration = self.state.iteration,
            energy = self.energy(),
            step_size = self.state.step_size;
            "Completed layout step"
        );

        observer.on_frame(&Frame {
            iteration: self.state.iteration,
            positions: self.topology.positions(),
        });
    }

    /// Check the termination conditions without changing anything.
    ///
    /// The iteration limit is checked first, so a run that reaches stability
    /// on its last allowed step reports `IterationLimitReached`.
    pub fn evaluate(&self) -> RunState {
        if self.state.iteration >= self.iteration_limit {
            RunState::IterationLimitReached
        } else if self.state.iteration > 0 && self.energy() < self.params.energy_threshold {
            RunState::Converged
        } else {
            RunState::Running
        }
    }

    /// Run until converged or `iteration_limit` steps have been taken.
    ///
    /// `iteration_limit` overrides the configured `max_iterations` for this
    /// run only.
    pub fn converge<O>(&mut self, iteration_limit: usize, observer: &mut O) -> RunReport
    where
        O: FrameObserver + ?Sized,
    {
        self.begin_run(iteration_limit);

        let node_count = self.topology.node_count();
        let step_size = self.state.step_size;
        debug!(node_count, iteration_limit, step_size; "Starting convergence run");

        let terminal_state = loop {
            match self.evaluate() {
                RunState::Running => self.step(observer),
                terminal => break terminal,
            }
        };
        self.run_state = terminal_state;

        let report = RunReport {
            terminal_state,
            iterations: self.state.iteration,
        };
        debug!(
            terminal_state:? = report.terminal_state,
            iterations = report.iterations,
            energy = self.energy();
            "Convergence run finished"
        );
        report
    }

    /// Run with the configured `max_iterations`.
    pub fn run<O>(&mut self, observer: &mut O) -> RunReport
    where
        O: FrameObserver + ?Sized,
    {
        self.converge(self.params.max_iterations, observer)
    }
}
