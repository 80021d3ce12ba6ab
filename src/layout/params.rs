//! Simulation parameters.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Configuration for a force-directed layout run.
///
/// All fields are optional when deserialised; missing ones take their
/// defaults, so a JavaScript caller can pass `{ springLength: 60 }` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationParameters {
    /// Ratio of repulsion to attraction (default: 0.5).
    pub repulsion_constant: f64,
    /// Rest length of an edge spring (default: 100.0).
    pub spring_length: f64,
    /// Initial displacement scale per unit of force, a.k.a. delta (default: 20.0).
    pub step_size: f64,
    /// Multiplicative decay of the step size per iteration, in (0, 1] (default: 0.99).
    pub cooling: f64,
    /// The run converges once the summed squared velocity drops below this
    /// (default: 0.01).
    pub energy_threshold: f64,
    /// Iteration budget for [`Simulation::run`](super::Simulation::run) (default: 1000).
    pub max_iterations: usize,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            repulsion_constant: 0.5,
            spring_length: 100.0,
            step_size: 20.0,
            cooling: 0.99,
            energy_threshold: 0.01,
            max_iterations: 1000,
        }
    }
}

impl SimulationParameters {
    /// Check that every parameter is usable.
    ///
    /// `energy_threshold` may be negative (the run then never converges and
    /// always ends on the iteration limit) but not NaN.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.repulsion_constant.is_finite() {
            return Err(LayoutError::invalid_parameter(
                "repulsion_constant",
                format!("must be finite, got {}", self.repulsion_constant),
            ));
        }
        if !(self.spring_length.is_finite() && self.spring_length > 0.0) {
            return Err(LayoutError::invalid_parameter(
                "spring_length",
                format!("must be a positive finite length, got {}", self.spring_length),
            ));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(LayoutError::invalid_parameter(
                "step_size",
                format!("must be positive and finite, got {}", self.step_size),
            ));
        }
        if !(self.cooling > 0.0 && self.cooling <= 1.0) {
            return Err(LayoutError::invalid_parameter(
                "cooling",
                format!("must lie in (0, 1], got {}", self.cooling),
            ));
        }
        if self.energy_threshold.is_nan() {
            return Err(LayoutError::invalid_parameter(
                "energy_threshold",
                "must not be NaN",
            ));
        }
        Ok(())
    }
}
