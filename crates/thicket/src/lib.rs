//! # Thicket
//!
//! Static obstacle grid and pathfinding substrate for Triad's gathering phase.
//!
//! Thicket represents the catching field as a fixed-size boolean occupancy grid
//! generated once per match from a seed. It provides:
//!
//! - **Deterministic generation**: Same seed, same obstacles, on every platform
//! - **A\* pathfinding**: 4-connected, unit cost, Manhattan heuristic
//! - **Fingerprinting**: Stable hashes of grid state for replay checks
//! - **Walkers**: Waypoint followers that replan when their path runs out
//!
//! ## Quick Start
//!
//! ```
//! use glam::IVec2;
//! use thicket::{find_path, Grid, GridConfig};
//!
//! let grid = Grid::generate(&GridConfig::default()).unwrap();
//!
//! // Border cells are never blocked, so a path along the edge always exists
//! let path = find_path(&grid, IVec2::new(0, 0), IVec2::new(23, 0));
//! assert_eq!(path.first(), Some(&IVec2::new(0, 0)));
//! assert_eq!(path.last(), Some(&IVec2::new(23, 0)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod grid;
pub mod hash;
pub mod path;
pub mod walker;

// Re-exports for convenience
pub use grid::{Grid, GridConfig, GridError};
pub use hash::hash_grid;
pub use path::find_path;
pub use walker::Walker;

/// A grid cell coordinate (`x` = column, `y` = row).
pub type Cell = glam::IVec2;

/// The four movement directions, in the order neighbours are expanded.
pub const DIRECTIONS: [Cell; 4] = [
    Cell::new(1, 0),
    Cell::new(-1, 0),
    Cell::new(0, 1),
    Cell::new(0, -1),
];

/// Manhattan distance between two cells.
///
/// Admissible and consistent for 4-connected unit-cost movement.
#[must_use]
pub fn manhattan(a: Cell, b: Cell) -> u32 {
    (a - b).abs().element_sum().unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_is_symmetric() {
        let a = Cell::new(1, 7);
        let b = Cell::new(4, 2);
        assert_eq!(manhattan(a, b), 8);
        assert_eq!(manhattan(b, a), 8);
    }

    #[test]
    fn test_manhattan_same_cell() {
        assert_eq!(manhattan(Cell::new(3, 3), Cell::new(3, 3)), 0);
    }

    #[test]
    fn test_directions_are_unit_steps() {
        for dir in DIRECTIONS {
            assert_eq!(manhattan(Cell::ZERO, dir), 1);
        }
    }
}
