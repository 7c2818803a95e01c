//! Gathering phase: trainers walk the grid to catch their creatures.
//!
//! Each side's three roster creatures spawn on free interior cells. Trainers
//! start in opposite corners and walk to their creatures in roster order
//! using [`thicket::Walker`]. Reaching a creature's cell catches it if the
//! trainer still has enough fuel. The phase ends once both sides caught all
//! three or the time budget runs out.
//!
//! # Determinism
//!
//! Spawn cells are drawn from the injected RNG (A's three, then B's three);
//! movement itself is deterministic. Frames advance a fixed `dt`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thicket::{Cell, Grid, Walker};

use crate::entity::{Side, SideId, ROSTER_SIZE};
use crate::error::ConfigError;

/// Margin between the grid edge and the spawn area.
const SPAWN_MARGIN: i32 = 2;

// =============================================================================
// Configuration
// =============================================================================

/// Gathering-phase settings.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatheringConfig {
    /// Phase length in seconds
    pub time_budget: f64,
    /// Simulated frame length in seconds
    pub frame_dt: f64,
    /// Trainer speed in cells per second
    pub move_speed: f64,
    /// Fuel spent per catch
    pub fuel_per_catch: u32,
    /// Random draws before a spawn falls back to the grid centre
    pub spawn_attempts: u32,
}

impl Default for GatheringConfig {
    fn default() -> Self {
        Self {
            time_budget: 30.0,
            frame_dt: 1.0 / 60.0,
            move_speed: 4.0,
            fuel_per_catch: 15,
            spawn_attempts: 100,
        }
    }
}

impl GatheringConfig {
    /// Checks durations and speed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTiming`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("gathering.time_budget", self.time_budget),
            ("gathering.frame_dt", self.frame_dt),
            ("gathering.move_speed", self.move_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTiming { name, value });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Placement
// =============================================================================

/// Starting cell of a side's trainer: A bottom-left, B top-right.
///
/// Both lie on the reserved inner ring, so generated grids never block them.
#[must_use]
pub fn start_cell(grid: &Grid, side: SideId) -> Cell {
    #[allow(clippy::cast_possible_wrap)]
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    match side {
        SideId::A => Cell::new(1, h - 2),
        SideId::B => Cell::new(w - 2, 1),
    }
}

/// Draws a free spawn cell in `[2, W-2) x [2, H-2)`.
///
/// Falls back to the grid centre after `attempts` blocked draws, or at once if
/// the grid is too small to have a spawn area.
pub fn spawn_cell<R: Rng + ?Sized>(grid: &Grid, attempts: u32, rng: &mut R) -> Cell {
    #[allow(clippy::cast_possible_wrap)]
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    if w - SPAWN_MARGIN <= SPAWN_MARGIN || h - SPAWN_MARGIN <= SPAWN_MARGIN {
        return grid.center();
    }
    for _ in 0..attempts {
        let x = rng.gen_range(SPAWN_MARGIN..w - SPAWN_MARGIN);
        let y = rng.gen_range(SPAWN_MARGIN..h - SPAWN_MARGIN);
        let cell = Cell::new(x, y);
        if grid.is_free(cell) {
            return cell;
        }
    }
    grid.center()
}

// =============================================================================
// Report
// =============================================================================

/// One successful catch.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchRecord {
    /// Catching side
    pub side: SideId,
    /// Roster slot of the caught creature
    pub slot: usize,
    /// Cell it was caught on
    pub cell: Cell,
    /// Simulated time of the catch
    pub time: f64,
}

/// Summary of the gathering phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatheringReport {
    /// Spawn cell per side and roster slot
    pub spawns: [[Cell; ROSTER_SIZE]; 2],
    /// Catches in the order they happened
    pub catches: Vec<CatchRecord>,
    /// Creatures caught per side
    pub caught: [usize; 2],
    /// Fuel left per side
    pub fuel_left: [u32; 2],
    /// Simulated time the phase took
    pub elapsed: f64,
    /// Whether both sides caught their whole roster
    pub completed: bool,
}

// =============================================================================
// Gathering
// =============================================================================

#[derive(Debug, Clone)]
struct Trainer {
    walker: Walker,
    spawns: [Cell; ROSTER_SIZE],
    caught: [bool; ROSTER_SIZE],
    next: usize,
}

impl Trainer {
    fn done(&self) -> bool {
        self.next >= ROSTER_SIZE
    }

    fn caught_count(&self) -> usize {
        self.caught.iter().filter(|c| **c).count()
    }
}

/// The gathering phase of a match.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use thicket::{Grid, GridConfig};
/// use triad_core::{Gathering, GatheringConfig, RosterConfig, Wallet};
///
/// let grid = Grid::generate(&GridConfig::default()).unwrap();
/// let rosters = RosterConfig::default();
/// let mut sides = [
///     rosters.a.build().with_wallet(Wallet::new(0, 45)),
///     rosters.b.build().with_wallet(Wallet::new(0, 45)),
/// ];
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let mut gathering = Gathering::new(&grid, GatheringConfig::default(), &mut rng);
/// let report = gathering.run(&mut sides);
/// assert!(report.elapsed < 30.1);
/// ```
#[derive(Debug, Clone)]
pub struct Gathering<'g> {
    grid: &'g Grid,
    config: GatheringConfig,
    trainers: [Trainer; 2],
    catches: Vec<CatchRecord>,
    frame: u32,
}

impl<'g> Gathering<'g> {
    /// Places trainers and draws spawn cells (A's three, then B's three).
    pub fn new<R: Rng + ?Sized>(grid: &'g Grid, config: GatheringConfig, rng: &mut R) -> Self {
        let trainers = SideId::BOTH.map(|side| {
            let spawns =
                [(); ROSTER_SIZE].map(|()| spawn_cell(grid, config.spawn_attempts, &mut *rng));
            Trainer {
                walker: Walker::new(start_cell(grid, side)),
                spawns,
                caught: [false; ROSTER_SIZE],
                next: 0,
            }
        });
        tracing::debug!(
            spawns_a = ?trainers[0].spawns,
            spawns_b = ?trainers[1].spawns,
            "gathering spawns placed"
        );
        Self {
            grid,
            config,
            trainers,
            catches: Vec::new(),
            frame: 0,
        }
    }

    /// Simulated time elapsed.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        f64::from(self.frame) * self.config.frame_dt
    }

    /// Current cell of a side's trainer.
    #[must_use]
    pub fn trainer_cell(&self, side: SideId) -> Cell {
        self.trainers[side.index()].walker.cell()
    }

    /// Spawn cells of a side, in roster order.
    #[must_use]
    pub fn spawns(&self, side: SideId) -> [Cell; ROSTER_SIZE] {
        self.trainers[side.index()].spawns
    }

    /// Returns true once both sides caught everything or time ran out.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed() >= self.config.time_budget || self.trainers.iter().all(Trainer::done)
    }

    /// Advances one frame. Fuel is drawn from each side's wallet.
    ///
    /// Returns false (and does nothing) once finished.
    pub fn step(&mut self, sides: &mut [Side; 2]) -> bool {
        if self.is_finished() {
            return false;
        }
        let now = self.elapsed();
        for side in SideId::BOTH {
            self.move_trainer(side, &mut sides[side.index()], now);
        }
        self.frame += 1;
        true
    }

    /// Steps until finished and returns the report.
    pub fn run(&mut self, sides: &mut [Side; 2]) -> GatheringReport {
        while self.step(sides) {}
        let report = GatheringReport {
            spawns: SideId::BOTH.map(|side| self.spawns(side)),
            catches: self.catches.clone(),
            caught: self.trainers.each_ref().map(Trainer::caught_count),
            fuel_left: SideId::BOTH.map(|side| sides[side.index()].wallet().fuel()),
            elapsed: self.elapsed(),
            completed: self.trainers.iter().all(Trainer::done),
        };
        tracing::info!(
            caught_a = report.caught[0],
            caught_b = report.caught[1],
            elapsed = report.elapsed,
            "gathering finished"
        );
        report
    }

    fn move_trainer(&mut self, side: SideId, owner: &mut Side, now: f64) {
        let trainer = &mut self.trainers[side.index()];
        if trainer.done() {
            return;
        }

        let slot = trainer.next;
        let goal = trainer.spawns[slot];

        if trainer.walker.cell() == goal {
            if owner.wallet_mut().spend_fuel(self.config.fuel_per_catch) {
                trainer.caught[slot] = true;
                trainer.next += 1;
                trainer.walker.clear_path();
                tracing::debug!(%side, slot, time = now, "caught");
                self.catches.push(CatchRecord {
                    side,
                    slot,
                    cell: goal,
                    time: now,
                });
            }
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        let (speed, dt) = (self.config.move_speed as f32, self.config.frame_dt as f32);
        trainer.walker.advance(self.grid, goal, speed, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterConfig;
    use crate::entity::Wallet;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use thicket::GridConfig;

    fn sides(fuel: u32) -> [Side; 2] {
        let rosters = RosterConfig::default();
        [
            rosters.a.build().with_wallet(Wallet::new(0, fuel)),
            rosters.b.build().with_wallet(Wallet::new(0, fuel)),
        ]
    }

    #[test]
    fn start_cells_are_opposite_corners() {
        let grid = Grid::open(24, 11).unwrap();
        assert_eq!(start_cell(&grid, SideId::A), Cell::new(1, 9));
        assert_eq!(start_cell(&grid, SideId::B), Cell::new(22, 1));
    }

    #[test]
    fn spawns_land_inside_margin_on_free_cells() {
        let grid = Grid::generate(&GridConfig::default()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..200 {
            let cell = spawn_cell(&grid, 100, &mut rng);
            assert!(grid.is_free(cell));
            assert!((2..22).contains(&cell.x));
            assert!((2..9).contains(&cell.y));
        }
    }

    #[test]
    fn tiny_grid_spawns_at_center() {
        let grid = Grid::open(4, 4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(spawn_cell(&grid, 100, &mut rng), grid.center());
    }

    #[test]
    fn fully_blocked_spawn_area_falls_back_to_center() {
        let mut grid = Grid::open(7, 7).unwrap();
        for cell in grid.cells().collect::<Vec<_>>() {
            if !grid.is_border(cell) {
                grid.set_blocked(cell, true);
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(spawn_cell(&grid, 100, &mut rng), Cell::new(3, 3));
    }

    #[test]
    fn open_field_catches_everything() {
        let grid = Grid::open(24, 11).unwrap();
        let mut s = sides(45);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut gathering = Gathering::new(&grid, GatheringConfig::default(), &mut rng);

        let report = gathering.run(&mut s);

        assert!(report.completed);
        assert_eq!(report.caught, [3, 3]);
        assert_eq!(report.fuel_left, [0, 0]);
        assert_eq!(report.catches.len(), 6);
        assert!(report.elapsed < 30.0);
    }

    #[test]
    fn catches_follow_roster_order() {
        let grid = Grid::open(24, 11).unwrap();
        let mut s = sides(45);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let report = Gathering::new(&grid, GatheringConfig::default(), &mut rng).run(&mut s);

        for side in SideId::BOTH {
            let slots: Vec<usize> = report
                .catches
                .iter()
                .filter(|c| c.side == side)
                .map(|c| c.slot)
                .collect();
            assert_eq!(slots, vec![0, 1, 2]);
        }
    }

    #[test]
    fn no_fuel_no_catch() {
        let grid = Grid::open(24, 11).unwrap();
        let mut s = sides(20);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let report = Gathering::new(&grid, GatheringConfig::default(), &mut rng).run(&mut s);

        assert_eq!(report.caught, [1, 1]);
        assert!(!report.completed);
        assert!((report.elapsed - 30.0).abs() < 0.05);
    }

    #[test]
    fn same_seed_same_report() {
        let grid = Grid::generate(&GridConfig::default()).unwrap();
        let r1 = Gathering::new(&grid, GatheringConfig::default(), &mut ChaCha8Rng::seed_from_u64(3))
            .run(&mut sides(45));
        let r2 = Gathering::new(&grid, GatheringConfig::default(), &mut ChaCha8Rng::seed_from_u64(3))
            .run(&mut sides(45));
        assert_eq!(r1, r2);
    }

    #[test]
    fn start_cells_free_on_dense_grid() {
        let config = GridConfig {
            obstacle_density: 0.9,
            seed: 5,
            ..GridConfig::default()
        };
        let grid = Grid::generate(&config).unwrap();
        for side in SideId::BOTH {
            assert!(grid.is_free(start_cell(&grid, side)));
        }
    }
}
