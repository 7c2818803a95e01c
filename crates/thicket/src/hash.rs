//! Grid fingerprinting for replay verification.
//!
//! Two grids generated from the same [`GridConfig`](crate::GridConfig) must
//! produce identical hashes. Match reports carry this fingerprint so a replay
//! can confirm it walked the same field before comparing outcomes.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::Grid;

/// Compute a deterministic hash of grid state.
///
/// This hash includes:
/// - Dimensions
/// - Generation seed (if present)
/// - The blocked flag of every cell, in row-major order
#[must_use]
pub fn hash_grid(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();

    grid.width().hash(&mut hasher);
    grid.height().hash(&mut hasher);
    grid.seed().hash(&mut hasher);

    // Pack cells into words so the hash is independent of Vec<bool> layout
    let mut word = 0u64;
    let mut bits = 0u32;
    for cell in grid.cells() {
        word = (word << 1) | u64::from(grid.is_blocked(cell));
        bits += 1;
        if bits == 64 {
            word.hash(&mut hasher);
            word = 0;
            bits = 0;
        }
    }
    if bits > 0 {
        word.hash(&mut hasher);
        bits.hash(&mut hasher);
    }

    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, GridConfig};

    #[test]
    fn test_hash_same_config() {
        let config = GridConfig::default();
        let g1 = Grid::generate(&config).unwrap();
        let g2 = Grid::generate(&config).unwrap();

        assert_eq!(hash_grid(&g1), hash_grid(&g2));
    }

    #[test]
    fn test_hash_different_seeds() {
        let g1 = Grid::generate(&GridConfig::default()).unwrap();
        let g2 = Grid::generate(&GridConfig {
            seed: 43,
            ..GridConfig::default()
        })
        .unwrap();

        assert_ne!(hash_grid(&g1), hash_grid(&g2));
    }

    #[test]
    fn test_hash_changes_with_obstacle() {
        let mut grid = Grid::open(8, 8).unwrap();
        let before = hash_grid(&grid);
        grid.set_blocked(Cell::new(3, 3), true);

        assert_ne!(before, hash_grid(&grid));
    }

    #[test]
    fn test_hash_distinguishes_dimensions() {
        let wide = Grid::open(8, 2).unwrap();
        let tall = Grid::open(2, 8).unwrap();

        assert_ne!(hash_grid(&wide), hash_grid(&tall));
    }
}
