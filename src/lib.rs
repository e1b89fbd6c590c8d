//! Conway's Game of Life engine with a bounded, scrubbable step history.
//!
//! The [`SimulationEngine`] owns an immutable working [`Grid`] and a ring of
//! committed generations. Stepping over existing history is pure replay;
//! new generations are computed only at the frontier or after an edit, which
//! discards the stale future. [`TimelineIndex`] projects live-cell counts
//! for charting, and [`RunRecord`]/[`RunStore`] persist whole runs as JSON.
//!
//! ```
//! use lifeline::{BoundaryPolicy, SimulationEngine};
//!
//! let mut engine = SimulationEngine::new(16, 16, BoundaryPolicy::Wrap, 128);
//! engine.stamp_pattern("glider", 8, 8)?;
//! engine.step_forward(); // records the seed as generation 0
//! engine.step_forward(); // computes generation 1
//! engine.step_backward(); // scrub back, nothing is discarded
//! # Ok::<(), lifeline::EngineError>(())
//! ```

mod engine;
mod error;
mod grid;
mod noise;
mod pattern;
mod persist;
mod timeline;

pub use engine::{EngineObserver, HistoryEntry, SimulationEngine};
pub use error::EngineError;
pub use grid::{BoundaryPolicy, Grid};
pub use noise::ValueNoise;
pub use pattern::{lookup as lookup_pattern, NAMES as PATTERN_NAMES};
pub use persist::{RunRecord, RunStore};
pub use timeline::TimelineIndex;
