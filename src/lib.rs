//! Force Layout - WASM Module
//!
//! This module computes 2D layouts for graphs by force-directed simulation
//! (Fruchterman–Reingold style). It is usable as a plain Rust library and is
//! also compiled to WebAssembly with a JavaScript-friendly API via
//! wasm-bindgen.
//!
//! # Architecture
//!
//! - `geometry`: `Vector2` value type
//! - `graph`: Topology store (nodes, edges, adjacency) backed by petgraph
//! - `layout`: Force model, simulation parameters and the simulation driver
//! - `error`: Construction-time error taxonomy
//!
//! Rendering is left to the caller: the driver pushes one frame of positions
//! per step to a [`layout::FrameObserver`] (a JS callback on the WASM side).

use std::fmt::Write as _;

use js_sys::{Float64Array, Function};
use log::{Level, LevelFilter, Log, Metadata, Record, kv, warn};
use wasm_bindgen::prelude::*;
use web_sys::console;

pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;

pub use error::{LayoutError, TopologyError};

use geometry::Vector2;
use graph::{Edge, NodeId, Topology};
use layout::{Frame, NoopObserver, RunReport, Simulation, SimulationParameters};

// =========================================================================
// Logging
// =========================================================================

/// `log` backend that forwards records to the browser console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Collects structured key-values as ` key=value` pairs.
struct KeyValues(String);

impl<'kvs> kv::VisitSource<'kvs> for KeyValues {
    fn visit_pair(&mut self, key: kv::Key<'kvs>, value: kv::Value<'kvs>) -> Result<(), kv::Error> {
        let _ = write!(self.0, " {key}={value}");
        Ok(())
    }
}

fn format_record(record: &Record<'_>) -> String {
    let mut key_values = KeyValues(String::new());
    let _ = record.key_values().visit(&mut key_values);
    format!("[{}] {}{}", record.target(), record.args(), key_values.0)
}

/// Initialize the WASM module.
///
/// Installs the panic hook and the console logger at `info` level.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Change the console log level ("off", "error", "warn", "info", "debug", "trace").
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    let filter: LevelFilter = level.parse()?;
    log::set_max_level(filter);
    Ok(())
}

// =========================================================================
// Layout API
// =========================================================================

/// Main entry point for the layout engine.
///
/// This struct wraps a [`Simulation`] and provides the public API exposed to
/// JavaScript.
#[wasm_bindgen]
pub struct ForceLayoutWasm {
    simulation: Simulation,
}

#[wasm_bindgen]
impl ForceLayoutWasm {
    /// Create a layout from initial positions and edges.
    ///
    /// # Arguments
    ///
    /// * `positions` - Flat array [x0, y0, x1, y1, ...]; node ids follow the order
    /// * `edges` - Flat array of pairs [src0, dst0, src1, dst1, ...]; all edges get strength 1.0
    /// * `params` - Optional partial parameter object, e.g. `{ springLength: 60 }`
    ///
    /// A trailing odd element in either array is ignored.
    #[wasm_bindgen(constructor)]
    pub fn new(
        positions: &[f64],
        edges: &[u32],
        params: JsValue,
    ) -> Result<ForceLayoutWasm, JsError> {
        let params: SimulationParameters = if params.is_undefined() || params.is_null() {
            SimulationParameters::default()
        } else {
            serde_wasm_bindgen::from_value(params)?
        };

        let topology =
            Topology::from_positions(positions_from_flat(positions), edges_from_pairs(edges))?;

        Ok(Self {
            simulation: Simulation::new(topology, params)?,
        })
    }

    /// Advance the layout by one iteration.
    ///
    /// Returns the iteration count after the step, saturating at `u32::MAX`.
    pub fn step(&mut self) -> u32 {
        self.simulation.step(&mut NoopObserver);
        count_to_u32(self.simulation.iteration())
    }

    /// Run until converged or `iteration_limit` steps have been taken.
    ///
    /// `on_frame(iteration, positions)` is called after every step with a
    /// Float64Array [x0, y0, x1, y1, ...]. Returns `{ terminalState, iterations }`.
    pub fn converge(
        &mut self,
        iteration_limit: u32,
        on_frame: Option<Function>,
    ) -> Result<JsValue, JsError> {
        let report = self.converge_with(iteration_limit as usize, on_frame.as_ref());
        Ok(serde_wasm_bindgen::to_value(&report)?)
    }

    /// Run with the configured `maxIterations`.
    pub fn run(&mut self, on_frame: Option<Function>) -> Result<JsValue, JsError> {
        let limit = self.simulation.params().max_iterations;
        let report = self.converge_with(limit, on_frame.as_ref());
        Ok(serde_wasm_bindgen::to_value(&report)?)
    }

    /// Restore the step size to its configured initial value.
    pub fn reheat(&mut self) {
        self.simulation.reheat();
    }

    /// Current positions as [x0, y0, x1, y1, ...].
    pub fn positions(&self) -> Float64Array {
        Float64Array::from(&flatten_positions(&self.simulation.positions())[..])
    }

    /// Sum of squared node velocities.
    pub fn energy(&self) -> f64 {
        self.simulation.energy()
    }

    /// Iterations taken in the current run, saturating at `u32::MAX`.
    pub fn iteration(&self) -> u32 {
        count_to_u32(self.simulation.iteration())
    }

    /// Current (cooled) step size.
    #[wasm_bindgen(js_name = stepSize)]
    pub fn step_size(&self) -> f64 {
        self.simulation.step_size()
    }

    /// "idle", "running", "converged" or "iterationLimitReached".
    #[wasm_bindgen(js_name = runState)]
    pub fn run_state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.simulation.run_state())?)
    }

    /// Get the number of nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        count_to_u32(self.simulation.topology().node_count())
    }

    /// Get the number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        count_to_u32(self.simulation.topology().edge_count())
    }

    /// Get neighbors of a node.
    ///
    /// Returns a Uint32Array of neighbor node IDs.
    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn get_neighbors(&self, node_id: u32) -> Vec<u32> {
        self.simulation
            .topology()
            .neighbors(NodeId(node_id))
            .into_iter()
            .map(NodeId::raw)
            .collect()
    }
}

impl ForceLayoutWasm {
    fn converge_with(&mut self, iteration_limit: usize, on_frame: Option<&Function>) -> RunReport {
        let Some(callback) = on_frame else {
            return self.simulation.converge(iteration_limit, &mut NoopObserver);
        };

        let mut observer = |frame: &Frame| {
            let positions = Float64Array::from(&flatten_positions(&frame.positions)[..]);
            let iteration = JsValue::from(count_to_u32(frame.iteration));
            if let Err(err) = callback.call2(&JsValue::NULL, &iteration, &positions) {
                warn!(iteration = frame.iteration; "Frame callback threw: {err:?}");
            }
        };
        self.simulation.converge(iteration_limit, &mut observer)
    }
}

fn count_to_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn positions_from_flat(flat: &[f64]) -> Vec<Vector2> {
    flat.chunks_exact(2)
        .map(|pair| Vector2::new(pair[0], pair[1]))
        .collect()
}

fn edges_from_pairs(pairs: &[u32]) -> Vec<Edge> {
    pairs
        .chunks_exact(2)
        .map(|pair| Edge::from((pair[0], pair[1])))
        .collect()
}

fn flatten_positions(positions: &[Vector2]) -> Vec<f64> {
    positions.iter().flat_map(|p| [p.x(), p.y()]).collect()
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::layout::RunState;

    /// The 14-node tree the engine was first exercised with.
    const TREE_EDGES: [u32; 26] = [
        0, 1, 0, 2, 0, 3, 1, 4, 1, 5, 1, 6, 2, 7, 2, 8, 3, 9, 3, 10, 10, 11, 10, 12, 10, 13,
    ];

    /// Deterministic scatter in [-500, 500)².
    fn scattered_positions(count: usize) -> Vec<f64> {
        (0..count)
            .flat_map(|i| {
                let x = ((i * 137) % 1000) as f64 - 500.0;
                let y = ((i * 389 + 211) % 1000) as f64 - 500.0;
                [x, y]
            })
            .collect()
    }

    #[test]
    fn test_flat_buffers_round_trip_through_topology() {
        let flat = scattered_positions(14);
        let topology =
            Topology::from_positions(positions_from_flat(&flat), edges_from_pairs(&TREE_EDGES))
                .unwrap();

        assert_eq!(topology.node_count(), 14);
        assert_eq!(topology.edge_count(), 13);
        assert_eq!(flatten_positions(&topology.positions()), flat);
        assert_eq!(
            topology.neighbors(NodeId(10)),
            vec![NodeId(3), NodeId(11), NodeId(12), NodeId(13)]
        );
    }

    #[test]
    fn test_trailing_odd_elements_are_ignored() {
        assert_eq!(positions_from_flat(&[1.0, 2.0, 3.0]).len(), 1);
        assert_eq!(edges_from_pairs(&[0, 1, 2]).len(), 1);
    }

    #[test]
    fn test_counts_saturate_instead_of_wrapping() {
        assert_eq!(count_to_u32(0), 0);
        assert_eq!(count_to_u32(1000), 1000);
        assert_eq!(count_to_u32(u32::MAX as usize), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(count_to_u32(u32::MAX as usize + 1), u32::MAX);
    }

    #[test]
    fn test_bad_edge_buffer_fails_construction() {
        let flat = scattered_positions(3);
        let result = Topology::from_positions(positions_from_flat(&flat), edges_from_pairs(&[0, 3]));
        assert!(matches!(result, Err(LayoutError::InvalidTopology(_))));
    }

    #[test]
    fn test_tree_layout_runs_to_a_terminal_state() {
        let flat = scattered_positions(14);
        let topology =
            Topology::from_positions(positions_from_flat(&flat), edges_from_pairs(&TREE_EDGES))
                .unwrap();
        let mut simulation = Simulation::new(topology, SimulationParameters::default()).unwrap();

        let mut frames = 0usize;
        let report = simulation.converge(1000, &mut |frame: &Frame| {
            assert_eq!(frame.positions.len(), 14);
            frames += 1;
        });

        assert!(report.terminal_state.is_terminal());
        assert!(report.iterations <= 1000);
        assert_eq!(frames, report.iterations);
        assert!(
            simulation
                .positions()
                .iter()
                .all(|p| p.x().is_finite() && p.y().is_finite())
        );
        if report.terminal_state == RunState::Converged {
            assert!(simulation.energy() < simulation.params().energy_threshold);
        }
    }

    #[test]
    fn test_console_line_includes_key_values() {
        let key_values: &[(&str, usize)] = &[("iterations", 5)];
        let line = format_record(
            &Record::builder()
                .args(format_args!("Convergence run finished"))
                .level(Level::Debug)
                .target("force_layout_wasm::layout")
                .key_values(&key_values)
                .build(),
        );

        assert_eq!(
            line,
            "[force_layout_wasm::layout] Convergence run finished iterations=5"
        );
    }
}
