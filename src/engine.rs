use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::grid::{BoundaryPolicy, Grid};
use crate::noise::ValueNoise;
use crate::pattern;
use crate::timeline::TimelineIndex;

/// One committed generation: a grid snapshot plus its derived live-cell
/// count. Entries are created once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Absolute generation number. Stays stable across eviction, so the
    /// oldest retained entry still knows which generation it is.
    pub generation: u64,
    pub grid: Grid,
    pub live_count: usize,
}

/// Synchronous notification contract for UI/persistence collaborators.
///
/// Callbacks fire at the end of each successful mutating call, never
/// mid-call and never on a failed call. Rendering, chart updates, and
/// persistence all hang off these two hooks.
pub trait EngineObserver {
    fn on_grid_changed(&mut self, _grid: &Grid) {}
    fn on_history_changed(&mut self, _length: usize, _cursor: Option<usize>) {}
}

/// The simulation core: owns the working grid, the bounded generation
/// history, and the cursor over it.
///
/// Stepping backward/forward over existing history is pure replay. A new
/// generation is only computed at the frontier, or after the working grid
/// has been edited while rewound — in which case the stale future is
/// discarded first and cannot be recovered.
///
/// The engine is plain synchronous single-writer state: an external
/// scheduler (a timer owned by the collaborator) calls `step_forward`
/// repeatedly, and no operation ever suspends or blocks.
pub struct SimulationEngine {
    working: Grid,
    policy: BoundaryPolicy,
    max_history: usize,
    history: Vec<HistoryEntry>,
    /// `None` until the first generation is committed.
    cursor: Option<usize>,
    /// Set when the working grid no longer matches the entry under the
    /// cursor (seeding, stamping, or manual edits). The next forward step
    /// then recomputes instead of replaying.
    diverged: bool,
    /// Mirrors the collaborator's run loop; edits are rejected while set.
    running: bool,
    observers: Vec<Box<dyn EngineObserver>>,
}

impl SimulationEngine {
    /// Create an engine with an all-dead working grid and empty history.
    /// Panics on a zero dimension or a zero history bound (constructor
    /// misuse, not a recoverable condition).
    pub fn new(rows: usize, cols: usize, policy: BoundaryPolicy, max_history: usize) -> Self {
        assert!(max_history > 0, "history bound must be positive");
        Self {
            working: Grid::new(rows, cols),
            policy,
            max_history,
            history: Vec::new(),
            cursor: None,
            diverged: false,
            running: false,
            observers: Vec::new(),
        }
    }

    /// Rebuild an engine from previously persisted history. The cursor is
    /// restored to the last entry, matching how saved runs are reloaded.
    pub(crate) fn from_history(
        rows: usize,
        cols: usize,
        policy: BoundaryPolicy,
        max_history: usize,
        history: Vec<HistoryEntry>,
    ) -> Self {
        let mut engine = Self::new(rows, cols, policy, max_history);
        if let Some(last) = history.last() {
            engine.working = last.grid.clone();
            engine.cursor = Some(history.len() - 1);
        }
        engine.history = history;
        engine
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn dimensions(&self) -> (usize, usize) {
        (self.working.rows(), self.working.cols())
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<bool, EngineError> {
        self.working.get(row, col)
    }

    pub fn live_count_now(&self) -> usize {
        self.working.live_count()
    }

    pub fn history_length(&self) -> usize {
        self.history.len()
    }

    /// Current cursor position, or `None` before the first commit.
    pub fn cursor_position(&self) -> Option<usize> {
        self.cursor
    }

    pub fn boundary_policy(&self) -> BoundaryPolicy {
        self.policy
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// The current working grid.
    pub fn grid(&self) -> &Grid {
        &self.working
    }

    /// Read access to the committed history, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Read-only live-count projection of the history for charting.
    pub fn timeline(&self) -> TimelineIndex<'_> {
        TimelineIndex::new(&self.history)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Mirror the collaborator's run-loop state into the engine so edits
    /// can be rejected while generations are being advanced.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    // ── Observers ───────────────────────────────────────────────────────────

    /// Subscribe an observer; it is retained for the engine's lifetime.
    pub fn subscribe(&mut self, observer: Box<dyn EngineObserver>) {
        self.observers.push(observer);
    }

    fn notify_grid(&mut self) {
        for obs in &mut self.observers {
            obs.on_grid_changed(&self.working);
        }
    }

    fn notify_history(&mut self) {
        let length = self.history.len();
        let cursor = self.cursor;
        for obs in &mut self.observers {
            obs.on_history_changed(length, cursor);
        }
    }

    // ── Mutations ───────────────────────────────────────────────────────────

    /// Clear all history, reset the cursor, and install an all-dead working
    /// grid of the given size. Policy and history bound are kept.
    pub fn reset(&mut self, rows: usize, cols: usize) {
        self.working = Grid::new(rows, cols);
        self.history.clear();
        self.cursor = None;
        self.diverged = false;
        log::info!("engine reset to {rows}x{cols}, history cleared");
        self.notify_grid();
        self.notify_history();
    }

    /// Replace the editable working grid without touching history.
    pub fn set_live_grid(&mut self, grid: Grid) -> Result<(), EngineError> {
        if (grid.rows(), grid.cols()) != self.dimensions() {
            return Err(EngineError::InvalidState(
                "replacement grid dimensions do not match the engine",
            ));
        }
        self.working = grid;
        self.diverged = true;
        self.notify_grid();
        Ok(())
    }

    /// Advance one step.
    ///
    /// The very first call records the pre-step configuration as
    /// generation 0 and does nothing else; the second call computes
    /// generation 1. Stepping forward through existing history after a
    /// rewind replays stored entries without recomputation; a new
    /// generation is computed only at the frontier or after a divergent
    /// edit, and in the latter case the stale future is discarded first.
    pub fn step_forward(&mut self) {
        match self.cursor {
            None => {
                // Capture the initial condition as generation 0.
                let initial = self.working.clone();
                self.commit(initial);
            }
            Some(c) if !self.diverged && c + 1 < self.history.len() => {
                // Pure replay.
                self.cursor = Some(c + 1);
                self.working = self.history[c + 1].grid.clone();
            }
            Some(c) => {
                if c + 1 < self.history.len() {
                    let dropped = self.history.len() - (c + 1);
                    self.history.truncate(c + 1);
                    log::debug!("discarded {dropped} stale future generation(s)");
                }
                let next = self.working.next_generation(self.policy);
                self.commit(next);
            }
        }
        self.notify_grid();
        self.notify_history();
    }

    /// Move the cursor back one entry and restore that grid. No-op at the
    /// start of history or before the first commit.
    pub fn step_backward(&mut self) {
        let Some(c) = self.cursor else { return };
        if c == 0 {
            return;
        }
        self.cursor = Some(c - 1);
        self.working = self.history[c - 1].grid.clone();
        self.diverged = false;
        self.notify_grid();
        self.notify_history();
    }

    /// Jump the cursor to an arbitrary history entry (timeline scrubbing).
    pub fn jump_to(&mut self, index: usize) -> Result<(), EngineError> {
        if index >= self.history.len() {
            return Err(EngineError::IndexOutOfRange {
                index,
                length: self.history.len(),
            });
        }
        self.cursor = Some(index);
        self.working = self.history[index].grid.clone();
        self.diverged = false;
        self.notify_grid();
        self.notify_history();
        Ok(())
    }

    /// Randomize the working grid: each cell independently alive with
    /// probability `density`. History and cursor are untouched; callers
    /// that want a fresh run call `reset` first.
    pub fn randomize(&mut self, density: f64) {
        let (rows, cols) = self.dimensions();
        self.working = Grid::randomize(rows, cols, density);
        self.diverged = true;
        self.notify_grid();
    }

    /// Seed the working grid from a deterministic noise field: cell (r, c)
    /// becomes alive iff `sample2d(r / scale, c / scale) > threshold`.
    pub fn randomize_by_noise(&mut self, seed: i32, scale: f32, threshold: f32) {
        let (rows, cols) = self.dimensions();
        let noise = ValueNoise::with_seed(seed);
        self.working = Grid::from_noise(rows, cols, &noise, scale, threshold);
        self.diverged = true;
        self.notify_grid();
    }

    /// Stamp a named pattern onto the working grid around a center point.
    /// Offsets landing outside the grid are skipped, never an error.
    pub fn stamp_pattern(
        &mut self,
        name: &str,
        center_r: usize,
        center_c: usize,
    ) -> Result<(), EngineError> {
        let stamped = pattern::stamp(&self.working, name, center_r, center_c)?;
        self.working = stamped;
        self.diverged = true;
        self.notify_grid();
        Ok(())
    }

    /// Flip a single cell of the working grid. Rejected while the run loop
    /// is active, matching the rule that editing is blocked while running.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        if self.running {
            return Err(EngineError::InvalidState(
                "cannot edit cells while the simulation is running",
            ));
        }
        let current = self.working.get(row, col)?;
        self.working = self.working.with_cell(row, col, !current)?;
        self.diverged = true;
        self.notify_grid();
        Ok(())
    }

    /// Append `grid` as the next committed generation, evicting the oldest
    /// entry when the bound is exceeded.
    fn commit(&mut self, grid: Grid) {
        let generation = self.history.last().map_or(0, |e| e.generation + 1);
        let live_count = grid.live_count();
        log::debug!("committed generation {generation} (population {live_count})");

        self.history.push(HistoryEntry {
            generation,
            grid: grid.clone(),
            live_count,
        });
        self.working = grid;
        self.diverged = false;

        if self.history.len() > self.max_history {
            self.history.remove(0);
            log::debug!("evicted oldest entry (bound {})", self.max_history);
        }
        // Commit always lands the cursor on the frontier; eviction above
        // already shifted everything down by one.
        self.cursor = Some(self.history.len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine_with_blinker() -> SimulationEngine {
        let mut engine = SimulationEngine::new(10, 10, BoundaryPolicy::Wrap, 100);
        engine.stamp_pattern("blinker", 5, 5).unwrap();
        engine
    }

    #[test]
    fn first_step_records_initial_as_generation_zero() {
        let mut engine = engine_with_blinker();
        let initial = engine.grid().clone();

        engine.step_forward();
        assert_eq!(engine.history_length(), 1);
        assert_eq!(engine.cursor_position(), Some(0));
        // First call records the pre-step configuration and nothing more.
        assert_eq!(engine.grid(), &initial);
        assert_eq!(engine.history()[0].generation, 0);

        // Second call computes generation 1.
        engine.step_forward();
        assert_eq!(engine.history_length(), 2);
        assert_eq!(engine.cursor_position(), Some(1));
        assert_ne!(engine.grid(), &initial);
        assert_eq!(engine.history()[1].generation, 1);
    }

    #[test]
    fn rewind_then_forward_replays_without_discarding() {
        let mut engine = engine_with_blinker();
        for _ in 0..3 {
            engine.step_forward();
        }
        assert_eq!(engine.history_length(), 3);
        let gen2 = engine.history()[2].grid.clone();

        engine.step_backward();
        assert_eq!(engine.cursor_position(), Some(1));
        assert_eq!(engine.grid(), &engine.history()[1].grid.clone());

        engine.step_forward();
        // Pure replay: same length, same stored frontier content.
        assert_eq!(engine.history_length(), 3);
        assert_eq!(engine.cursor_position(), Some(2));
        assert_eq!(engine.grid(), &gen2);
    }

    #[test]
    fn edit_after_rewind_truncates_stale_future() {
        let mut engine = engine_with_blinker();
        for _ in 0..3 {
            engine.step_forward();
        }
        let old_gen2 = engine.history()[2].grid.clone();

        engine.step_backward();
        // Knock a cell out of the blinker so the recomputed future differs.
        engine.toggle_cell(4, 5).unwrap();
        engine.step_forward();

        // Old generation 2 is gone; a divergent 2' was computed from the
        // edited grid.
        assert_eq!(engine.history_length(), 3);
        assert_eq!(engine.cursor_position(), Some(2));
        assert_ne!(engine.history()[2].grid, old_gen2);
        assert_eq!(engine.history()[2].generation, 2);
    }

    #[test]
    fn bounded_history_evicts_oldest_and_keeps_cursor_at_frontier() {
        let mut engine = SimulationEngine::new(8, 8, BoundaryPolicy::Wrap, 5);
        engine.stamp_pattern("glider", 4, 4).unwrap();
        for _ in 0..10 {
            engine.step_forward();
        }
        // 10 advances commit generations 0..=9; the bound keeps the last 5.
        assert_eq!(engine.history_length(), 5);
        assert_eq!(engine.cursor_position(), Some(4));
        assert_eq!(engine.history()[0].generation, 5);
        assert_eq!(engine.history()[4].generation, 9);
    }

    #[test]
    fn step_backward_is_noop_at_start() {
        let mut engine = engine_with_blinker();
        engine.step_backward();
        assert_eq!(engine.cursor_position(), None);

        engine.step_forward();
        engine.step_backward();
        assert_eq!(engine.cursor_position(), Some(0));
        engine.step_backward();
        assert_eq!(engine.cursor_position(), Some(0));
    }

    #[test]
    fn jump_to_validates_index() {
        let mut engine = engine_with_blinker();
        assert_eq!(
            engine.jump_to(0),
            Err(EngineError::IndexOutOfRange {
                index: 0,
                length: 0
            })
        );

        for _ in 0..4 {
            engine.step_forward();
        }
        engine.jump_to(1).unwrap();
        assert_eq!(engine.cursor_position(), Some(1));
        assert_eq!(engine.grid(), &engine.history()[1].grid.clone());
        assert!(engine.jump_to(4).is_err());
        // Failed jump leaves the cursor alone.
        assert_eq!(engine.cursor_position(), Some(1));
    }

    #[test]
    fn toggle_blocked_while_running() {
        let mut engine = engine_with_blinker();
        engine.set_running(true);
        let before = engine.grid().clone();
        assert!(matches!(
            engine.toggle_cell(0, 0),
            Err(EngineError::InvalidState(_))
        ));
        // No partial mutation on failure.
        assert_eq!(engine.grid(), &before);

        engine.set_running(false);
        engine.toggle_cell(0, 0).unwrap();
        assert!(engine.cell_at(0, 0).unwrap());
    }

    #[test]
    fn toggle_out_of_range() {
        let mut engine = SimulationEngine::new(5, 5, BoundaryPolicy::Clamp, 10);
        assert!(matches!(
            engine.toggle_cell(5, 0),
            Err(EngineError::OutOfRange { .. })
        ));
    }

    #[test]
    fn stamp_unknown_pattern_is_reported() {
        let mut engine = SimulationEngine::new(10, 10, BoundaryPolicy::Wrap, 10);
        assert_eq!(
            engine.stamp_pattern("nope", 5, 5),
            Err(EngineError::PatternNotFound("nope".into()))
        );
        assert_eq!(engine.live_count_now(), 0);
    }

    #[test]
    fn randomize_leaves_history_alone() {
        let mut engine = engine_with_blinker();
        engine.step_forward();
        engine.step_forward();
        let len = engine.history_length();

        engine.randomize(0.5);
        assert_eq!(engine.history_length(), len);
        assert_eq!(engine.cursor_position(), Some(1));
    }

    #[test]
    fn noise_seeding_is_deterministic() {
        let mut a = SimulationEngine::new(16, 16, BoundaryPolicy::Wrap, 10);
        let mut b = SimulationEngine::new(16, 16, BoundaryPolicy::Wrap, 10);
        a.randomize_by_noise(99, 4.0, 0.2);
        b.randomize_by_noise(99, 4.0, 0.2);
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn reset_clears_everything() {
        let mut engine = engine_with_blinker();
        for _ in 0..3 {
            engine.step_forward();
        }
        engine.reset(12, 12);
        assert_eq!(engine.history_length(), 0);
        assert_eq!(engine.cursor_position(), None);
        assert_eq!(engine.dimensions(), (12, 12));
        assert_eq!(engine.live_count_now(), 0);
    }

    #[test]
    fn set_live_grid_checks_dimensions() {
        let mut engine = SimulationEngine::new(10, 10, BoundaryPolicy::Wrap, 10);
        assert!(engine.set_live_grid(Grid::new(5, 5)).is_err());
        assert!(engine.set_live_grid(Grid::new(10, 10)).is_ok());
    }

    // ── Observer contract ──

    #[derive(Default)]
    struct Recorded {
        grid_events: usize,
        history_events: Vec<(usize, Option<usize>)>,
    }

    struct Recorder(Rc<RefCell<Recorded>>);

    impl EngineObserver for Recorder {
        fn on_grid_changed(&mut self, _grid: &Grid) {
            self.0.borrow_mut().grid_events += 1;
        }
        fn on_history_changed(&mut self, length: usize, cursor: Option<usize>) {
            self.0.borrow_mut().history_events.push((length, cursor));
        }
    }

    #[test]
    fn observers_fire_after_mutations() {
        let log = Rc::new(RefCell::new(Recorded::default()));
        let mut engine = SimulationEngine::new(10, 10, BoundaryPolicy::Wrap, 10);
        engine.subscribe(Box::new(Recorder(log.clone())));

        engine.stamp_pattern("glider", 5, 5).unwrap();
        engine.step_forward();
        engine.step_forward();

        let recorded = log.borrow();
        // stamp + 2 steps changed the grid three times.
        assert_eq!(recorded.grid_events, 3);
        assert_eq!(recorded.history_events, vec![(1, Some(0)), (2, Some(1))]);
    }

    #[test]
    fn observers_do_not_fire_on_failed_calls() {
        let log = Rc::new(RefCell::new(Recorded::default()));
        let mut engine = SimulationEngine::new(10, 10, BoundaryPolicy::Wrap, 10);
        engine.subscribe(Box::new(Recorder(log.clone())));

        let _ = engine.stamp_pattern("nope", 5, 5);
        let _ = engine.toggle_cell(99, 99);
        let _ = engine.jump_to(3);

        assert_eq!(log.borrow().grid_events, 0);
        assert!(log.borrow().history_events.is_empty());
    }
}
