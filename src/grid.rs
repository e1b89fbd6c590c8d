use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::noise::ValueNoise;

/// How neighbor coordinates behave at the grid edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Toroidal: edges connect to the opposite edge (coordinates taken
    /// modulo rows/cols).
    Wrap,
    /// Bounded: offsets landing outside the grid contribute zero live
    /// neighbors.
    Clamp,
}

/// A fixed-size rectangular boolean matrix, stored row-major.
///
/// Grids are immutable values: every transition (`with_cell`,
/// `next_generation`, ...) produces a fresh `Grid`. The cells vector always
/// has length exactly `rows * cols`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid. Panics if either dimension is zero; a
    /// zero-sized grid is a caller programming bug, not a recoverable
    /// condition.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), EngineError> {
        if row >= self.rows || col >= self.cols {
            return Err(EngineError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Read a single cell.
    pub fn get(&self, row: usize, col: usize) -> Result<bool, EngineError> {
        self.check_bounds(row, col)?;
        Ok(self.cells[self.index(row, col)])
    }

    /// Return a new grid identical except for cell (row, col).
    pub fn with_cell(&self, row: usize, col: usize, alive: bool) -> Result<Grid, EngineError> {
        self.check_bounds(row, col)?;
        let mut next = self.clone();
        let idx = next.index(row, col);
        next.cells[idx] = alive;
        Ok(next)
    }

    /// Count live cells in the 8-cell Moore neighborhood of (row, col),
    /// excluding the cell itself. Result is in [0, 8].
    pub fn count_live_neighbors(&self, row: usize, col: usize, policy: BoundaryPolicy) -> u8 {
        let rows = self.rows as i64;
        let cols = self.cols as i64;
        let mut count = 0u8;

        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let (nr, nc) = match policy {
                    BoundaryPolicy::Wrap => (
                        (row as i64 + dr).rem_euclid(rows),
                        (col as i64 + dc).rem_euclid(cols),
                    ),
                    BoundaryPolicy::Clamp => {
                        let nr = row as i64 + dr;
                        let nc = col as i64 + dc;
                        if nr < 0 || nr >= rows || nc < 0 || nc >= cols {
                            continue;
                        }
                        (nr, nc)
                    }
                };
                if self.cells[(nr * cols + nc) as usize] {
                    count += 1;
                }
            }
        }

        count
    }

    /// Compute the next generation under the canonical B3/S23 rule.
    ///
    /// The update is simultaneous: every cell of the result is derived from
    /// this grid's frozen snapshot, never from partially-updated cells. A
    /// live cell survives with 2 or 3 live neighbors; a dead cell is born
    /// with exactly 3; everything else is dead.
    pub fn next_generation(&self, policy: BoundaryPolicy) -> Grid {
        let mut next = vec![false; self.cells.len()];

        for row in 0..self.rows {
            for col in 0..self.cols {
                let neighbors = self.count_live_neighbors(row, col, policy);
                let alive = self.cells[self.index(row, col)];
                next[self.index(row, col)] = if alive {
                    neighbors == 2 || neighbors == 3
                } else {
                    neighbors == 3
                };
            }
        }

        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: next,
        }
    }

    /// Count live cells across the whole grid.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Return a new grid with every listed in-bounds coordinate set alive.
    /// Used by pattern stamping; callers have already range-filtered.
    pub(crate) fn with_cells_alive(&self, coords: &[(usize, usize)]) -> Grid {
        let mut next = self.clone();
        for &(row, col) in coords {
            if row < next.rows && col < next.cols {
                let idx = next.index(row, col);
                next.cells[idx] = true;
            }
        }
        next
    }

    // ── Constructors for the seeding operations ─────────────────────────────

    /// Build a grid where each cell is independently alive with probability
    /// `density` (0.0 = empty, 1.0 = full).
    pub fn randomize(rows: usize, cols: usize, density: f64) -> Grid {
        let mut grid = Grid::new(rows, cols);
        let mut rng = rand::thread_rng();
        for cell in &mut grid.cells {
            *cell = rng.gen_range(0.0..1.0) < density;
        }
        grid
    }

    /// Build a grid from a noise field: cell (r, c) is alive iff
    /// `noise.sample2d(r / scale, c / scale) > threshold`. Deterministic for
    /// a given noise seed.
    pub fn from_noise(
        rows: usize,
        cols: usize,
        noise: &ValueNoise,
        scale: f32,
        threshold: f32,
    ) -> Grid {
        let mut grid = Grid::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                let value = noise.sample2d(row as f32 / scale, col as f32 / scale);
                let idx = grid.index(row, col);
                grid.cells[idx] = value > threshold;
            }
        }
        grid
    }
}
