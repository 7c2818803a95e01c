//! Grid: the static obstacle field trainers move across.
//!
//! A [`Grid`] is a fixed-size, row-major boolean occupancy map. Cells are either
//! blocked or free. Grids are generated once per match from a [`GridConfig`]
//! and never change afterwards.
//!
//! # Generation
//!
//! Obstacles are rolled cell by cell in row-major order from a
//! `ChaCha8Rng` seeded with [`GridConfig::seed`]. Every cell consumes exactly
//! one roll, reserved cells included, so the obstacle layout depends only on
//! the seed, the dimensions and the density. The outer border and the ring just
//! inside it are reserved and never blocked: together they form a free corridor
//! around the field, and trainer start cells sit on the inner ring.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Cell, DIRECTIONS};

/// Errors raised while building a grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Width or height was zero.
    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    EmptyGrid {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Obstacle density outside `[0, 1)`.
    #[error("obstacle density must be within [0, 1), got {0}")]
    InvalidDensity(f64),

    /// A row in an ASCII layout had a different width than the first row.
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRows {
        /// Zero-based row index
        row: usize,
        /// Width of the first row
        expected: usize,
        /// Width of the offending row
        found: usize,
    },

    /// An ASCII layout contained something other than `.` or `#`.
    #[error("unrecognised grid character {0:?}")]
    InvalidCharacter(char),
}

/// Configuration for grid generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of columns
    pub width: u32,
    /// Number of rows
    pub height: u32,
    /// Probability that an unreserved cell is blocked
    pub obstacle_density: f64,
    /// Seed for the obstacle roll
    pub seed: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 24,
            height: 11,
            obstacle_density: 0.08,
            seed: 42,
        }
    }
}

impl GridConfig {
    /// Checks dimensions and density without generating anything.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyGrid`] or [`GridError::InvalidDensity`].
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width == 0 || self.height == 0 {
            return Err(GridError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..1.0).contains(&self.obstacle_density) {
            return Err(GridError::InvalidDensity(self.obstacle_density));
        }
        Ok(())
    }
}

/// Fixed-size occupancy grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    /// Row-major blocked flags (`y * width + x`).
    blocked: Vec<bool>,
    /// Seed the obstacles were rolled from, if generated.
    seed: Option<u64>,
}

impl Grid {
    /// Creates a grid with no obstacles.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyGrid`] if either dimension is zero.
    pub fn open(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        Ok(Self {
            width,
            height,
            blocked: vec![false; width as usize * height as usize],
            seed: None,
        })
    }

    /// Generates a grid from a seeded obstacle roll.
    ///
    /// # Errors
    ///
    /// Returns an error if the config fails [`GridConfig::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use thicket::{Grid, GridConfig};
    ///
    /// let a = Grid::generate(&GridConfig::default()).unwrap();
    /// let b = Grid::generate(&GridConfig::default()).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn generate(config: &GridConfig) -> Result<Self, GridError> {
        config.validate()?;

        let mut grid = Self::open(config.width, config.height)?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        for y in 0..grid.height_i32() {
            for x in 0..grid.width_i32() {
                let roll: f64 = rng.gen();
                let cell = Cell::new(x, y);
                if roll < config.obstacle_density && !grid.is_reserved(cell) {
                    grid.set_blocked(cell, true);
                }
            }
        }

        grid.seed = Some(config.seed);
        tracing::debug!(
            width = config.width,
            height = config.height,
            seed = config.seed,
            obstacles = grid.blocked_count(),
            "generated grid"
        );
        Ok(grid)
    }

    /// Parses a grid from rows of `.` (free) and `#` (blocked).
    ///
    /// Leading/trailing whitespace on each line is ignored, as are blank lines.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, ragged rows or unknown characters.
    pub fn from_ascii(layout: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let expected = rows.first().map_or(0, |row| row.chars().count());
        #[allow(clippy::cast_possible_truncation)]
        let mut grid = Self::open(expected as u32, rows.len() as u32)?;

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != expected {
                return Err(GridError::RaggedRows {
                    row: y,
                    expected,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let cell = Cell::new(x as i32, y as i32);
                match ch {
                    '.' => {}
                    '#' => {
                        grid.set_blocked(cell, true);
                    }
                    other => return Err(GridError::InvalidCharacter(other)),
                }
            }
        }
        Ok(grid)
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Seed the obstacles were generated from (`None` for hand-built grids).
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[allow(clippy::cast_possible_wrap)]
    fn width_i32(&self) -> i32 {
        self.width as i32
    }

    #[allow(clippy::cast_possible_wrap)]
    fn height_i32(&self) -> i32 {
        self.height as i32
    }

    /// Row-major index of a cell, or `None` if it lies outside the grid.
    #[must_use]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if self.in_bounds(cell) {
            #[allow(clippy::cast_sign_loss)]
            Some(cell.y as usize * self.width as usize + cell.x as usize)
        } else {
            None
        }
    }

    /// Returns true if the cell lies inside the grid.
    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width_i32() && cell.y < self.height_i32()
    }

    /// Returns true if the cell is on the outer ring.
    #[must_use]
    pub fn is_border(&self, cell: Cell) -> bool {
        self.in_bounds(cell)
            && (cell.x == 0
                || cell.y == 0
                || cell.x == self.width_i32() - 1
                || cell.y == self.height_i32() - 1)
    }

    /// Returns true if the cell is on the outer ring or the ring just inside it.
    ///
    /// Generation never blocks reserved cells.
    #[must_use]
    pub fn is_reserved(&self, cell: Cell) -> bool {
        self.in_bounds(cell)
            && (cell.x <= 1
                || cell.y <= 1
                || cell.x >= self.width_i32() - 2
                || cell.y >= self.height_i32() - 2)
    }

    /// Returns true if the cell is blocked. Out-of-bounds cells count as blocked.
    #[must_use]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.index(cell).map_or(true, |i| self.blocked[i])
    }

    /// Returns true if the cell is inside the grid and not blocked.
    #[must_use]
    pub fn is_free(&self, cell: Cell) -> bool {
        !self.is_blocked(cell)
    }

    /// Sets the blocked flag of a cell.
    ///
    /// Returns false (and does nothing) if the cell is out of bounds.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.blocked[i] = blocked;
                true
            }
            None => false,
        }
    }

    /// Free 4-connected neighbours of a cell, in [`DIRECTIONS`] order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        DIRECTIONS
            .iter()
            .map(move |dir| cell + *dir)
            .filter(|next| self.is_free(*next))
    }

    /// Number of blocked cells.
    #[must_use]
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|b| **b).count()
    }

    /// Centre cell (integer division).
    #[must_use]
    pub fn center(&self) -> Cell {
        Cell::new(self.width_i32() / 2, self.height_i32() / 2)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width_i32();
        (0..self.height_i32()).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}
