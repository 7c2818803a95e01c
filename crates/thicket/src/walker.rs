//! Waypoint follower for agents moving across the grid.
//!
//! A [`Walker`] holds a continuous position and the A* path it is currently
//! following. Each call to [`Walker::advance`] moves it toward the next
//! waypoint by at most `speed * dt` cells, replanning from its rounded cell
//! whenever the current path is exhausted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{find_path, Cell, Grid};

/// Distance below which a walker snaps onto its waypoint.
pub const SNAP_DISTANCE: f32 = 0.1;

/// Continuous-position agent following A* waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Walker {
    position: Vec2,
    path: Vec<Cell>,
    path_index: usize,
}

impl Walker {
    /// Creates a walker standing on a cell, with no path.
    #[must_use]
    pub fn new(cell: Cell) -> Self {
        Self {
            position: cell.as_vec2(),
            path: Vec::new(),
            path_index: 0,
        }
    }

    /// Continuous position in cell units.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// The cell the walker currently occupies (position rounded, ties to even).
    #[must_use]
    pub fn cell(&self) -> Cell {
        #[allow(clippy::cast_possible_truncation)]
        Cell::new(
            self.position.x.round_ties_even() as i32,
            self.position.y.round_ties_even() as i32,
        )
    }

    /// The path currently being followed.
    #[must_use]
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    /// Returns true if there are waypoints left on the current path.
    #[must_use]
    pub fn has_waypoints(&self) -> bool {
        !self.path.is_empty() && self.path_index + 1 < self.path.len()
    }

    /// Drops the current path so the next [`advance`](Self::advance) replans.
    pub fn clear_path(&mut self) {
        self.path.clear();
        self.path_index = 0;
    }

    /// Moves toward `goal` for one frame.
    ///
    /// Replans when the path is exhausted. An unreachable goal leaves the
    /// walker in place. Returns true if the position changed.
    pub fn advance(&mut self, grid: &Grid, goal: Cell, speed: f32, dt: f32) -> bool {
        if !self.has_waypoints() {
            let path = find_path(grid, self.cell(), goal);
            if path.len() > 1 {
                self.path = path;
                self.path_index = 0;
            }
        }

        if !self.has_waypoints() {
            return false;
        }

        let next_index = self.path_index + 1;
        let target = self.path[next_index].as_vec2();
        let delta = target - self.position;
        let dist = delta.length();
        let step = speed * dt;

        if dist < SNAP_DISTANCE || step > dist {
            self.position = target;
            self.path_index = next_index;
        } else {
            self.position += delta / dist * step;
        }
        true
    }
}
