//! Named cell patterns stamped onto a grid around a center point.
//!
//! Offsets are `(dr, dc)` pairs relative to the stamp center. Stamping near
//! an edge truncates the pattern: out-of-range offsets are skipped silently
//! and never wrap.

use crate::error::EngineError;
use crate::grid::Grid;

/// Glider: small diagonal-moving pattern.
const GLIDER: &[(i32, i32)] = &[(-1, 0), (0, 1), (1, -1), (1, 0), (1, 1)];

/// Blinker: the smallest oscillator (period 2).
const BLINKER: &[(i32, i32)] = &[(0, -1), (0, 0), (0, 1)];

/// Block: 2x2 still life.
const BLOCK: &[(i32, i32)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];

/// R-pentomino: a methuselah that runs for 1103 generations.
const R_PENTOMINO: &[(i32, i32)] = &[(-1, 0), (-1, 1), (0, -1), (0, 0), (1, 0)];

/// Acorn: a methuselah that takes 5206 generations to stabilize.
const ACORN: &[(i32, i32)] = &[(0, -3), (0, -2), (-2, -2), (-1, 0), (0, 1), (0, 2), (0, 3)];

/// Lightweight spaceship (LWSS).
const LWSS: &[(i32, i32)] = &[
    (-1, -2),
    (-2, -1),
    (-2, 0),
    (-2, 1),
    (-2, 2),
    (-1, 2),
    (0, 2),
    (1, 1),
    (0, -2),
];

/// Pulsar: period-3 oscillator with fourfold symmetry (48 cells).
const PULSAR: &[(i32, i32)] = &[
    // Horizontal bar segments.
    (-6, -4), (-6, -3), (-6, -2), (-6, 2), (-6, 3), (-6, 4),
    (-1, -4), (-1, -3), (-1, -2), (-1, 2), (-1, 3), (-1, 4),
    (1, -4), (1, -3), (1, -2), (1, 2), (1, 3), (1, 4),
    (6, -4), (6, -3), (6, -2), (6, 2), (6, 3), (6, 4),
    // Vertical bar segments.
    (-4, -6), (-3, -6), (-2, -6), (2, -6), (3, -6), (4, -6),
    (-4, -1), (-3, -1), (-2, -1), (2, -1), (3, -1), (4, -1),
    (-4, 1), (-3, 1), (-2, 1), (2, 1), (3, 1), (4, 1),
    (-4, 6), (-3, 6), (-2, 6), (2, 6), (3, 6), (4, 6),
];

/// Gosper glider gun: infinite growth pattern.
const GOSPER_GUN: &[(i32, i32)] = &[
    // Left block.
    (0, -18), (1, -18), (0, -17), (1, -17),
    // Left ship.
    (0, -8), (1, -8), (2, -8), (-1, -7), (3, -7), (-2, -6), (4, -6),
    (-2, -5), (4, -5), (1, -4), (-1, -3), (3, -3), (0, -2), (1, -2),
    (2, -2), (1, -1),
    // Right ship.
    (0, 2), (-1, 2), (-2, 2), (0, 3), (-1, 3), (-2, 3), (-3, 4),
    (1, 4), (-4, 6), (-3, 6), (1, 6), (2, 6),
    // Right block.
    (-1, 16), (-2, 16), (-1, 17), (-2, 17),
];

/// Pattern names recognized by `lookup`, in presentation order.
pub const NAMES: &[&str] = &[
    "glider",
    "blinker",
    "block",
    "pulsar",
    "r-pentomino",
    "acorn",
    "lwss",
    "gosper-gun",
];

/// Look up a pattern's offset list by name. Returns `None` for unknown
/// names.
pub fn lookup(name: &str) -> Option<&'static [(i32, i32)]> {
    match name {
        "glider" => Some(GLIDER),
        "blinker" => Some(BLINKER),
        "block" => Some(BLOCK),
        "pulsar" => Some(PULSAR),
        "r-pentomino" => Some(R_PENTOMINO),
        "acorn" => Some(ACORN),
        "lwss" => Some(LWSS),
        "gosper-gun" => Some(GOSPER_GUN),
        _ => None,
    }
}

/// Stamp a named pattern onto `grid` around `(center_r, center_c)`,
/// returning the new grid. Offsets falling outside the grid are skipped;
/// only an unknown name is an error.
pub fn stamp(
    grid: &Grid,
    name: &str,
    center_r: usize,
    center_c: usize,
) -> Result<Grid, EngineError> {
    let offsets = lookup(name).ok_or_else(|| EngineError::PatternNotFound(name.to_string()))?;

    let coords: Vec<(usize, usize)> = offsets
        .iter()
        .filter_map(|&(dr, dc)| {
            let r = center_r as i64 + dr as i64;
            let c = center_c as i64 + dc as i64;
            if r >= 0 && (r as usize) < grid.rows() && c >= 0 && (c as usize) < grid.cols() {
                Some((r as usize, c as usize))
            } else {
                None
            }
        })
        .collect();

    Ok(grid.with_cells_alive(&coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BoundaryPolicy;

    #[test]
    fn lookup_known_names() {
        for &name in NAMES {
            assert!(lookup(name).is_some(), "missing pattern {name}");
        }
    }

    #[test]
    fn lookup_unknown_name() {
        assert!(lookup("spaghetti").is_none());
    }

    #[test]
    fn stamp_glider_in_interior() {
        let grid = Grid::new(20, 20);
        let stamped = stamp(&grid, "glider", 10, 10).unwrap();
        assert_eq!(stamped.live_count(), 5);
        // Original stays untouched.
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn stamp_unknown_pattern_fails() {
        let grid = Grid::new(10, 10);
        let err = stamp(&grid, "nonsense", 5, 5).unwrap_err();
        assert_eq!(err, EngineError::PatternNotFound("nonsense".into()));
    }

    #[test]
    fn stamp_at_corner_truncates_without_error() {
        // Glider centered at (0,0): only in-range offsets land; nothing
        // wraps to the far edges.
        let grid = Grid::new(10, 10);
        let stamped = stamp(&grid, "glider", 0, 0).unwrap();
        // In-range offsets of the glider at (0,0): (0,1), (1,0), (1,1).
        assert_eq!(stamped.live_count(), 3);
        assert!(stamped.get(0, 1).unwrap());
        assert!(stamped.get(1, 0).unwrap());
        assert!(stamped.get(1, 1).unwrap());
        for c in 0..10 {
            assert!(!stamped.get(9, c).unwrap(), "wrapped placement at (9,{c})");
        }
    }

    #[test]
    fn stamped_blinker_oscillates() {
        let grid = Grid::new(9, 9);
        let stamped = stamp(&grid, "blinker", 4, 4).unwrap();
        let two = stamped
            .next_generation(BoundaryPolicy::Wrap)
            .next_generation(BoundaryPolicy::Wrap);
        assert_eq!(two, stamped);
    }

    #[test]
    fn stamped_pulsar_has_period_three() {
        let grid = Grid::new(17, 17);
        let stamped = stamp(&grid, "pulsar", 8, 8).unwrap();
        assert_eq!(stamped.live_count(), 48);
        let mut g = stamped.clone();
        for _ in 0..3 {
            g = g.next_generation(BoundaryPolicy::Wrap);
        }
        assert_eq!(g, stamped);
    }

    #[test]
    fn stamped_block_is_stable() {
        let grid = Grid::new(6, 6);
        let stamped = stamp(&grid, "block", 2, 2).unwrap();
        assert_eq!(stamped.live_count(), 4);
        assert_eq!(stamped.next_generation(BoundaryPolicy::Clamp), stamped);
    }
}
