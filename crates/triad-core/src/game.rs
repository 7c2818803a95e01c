//! Match orchestration: gathering, shop and duel on one seed.
//!
//! # Architecture
//!
//! ```text
//! MatchConfig + seed
//!        │
//!        ▼
//!   Match::new ── validate, pick field, build grid
//!        │
//!        ▼
//!   Gathering ── trainers catch their rosters (spends fuel)
//!        │
//!        ▼
//!   Shop ──────── coins become potions
//!        │
//!        ▼
//!   Duel ──────── search-driven battle until knockout or timeout
//!        │
//!        ▼
//!   MatchReport
//! ```
//!
//! # Determinism
//!
//! A match draws from one `ChaCha8Rng` seeded with the match seed: first the
//! field element, then the spawn cells, then the duel seed. The grid itself
//! comes from [`GridConfig::seed`], so every match of a series shares the same
//! field layout. The duel always fields full rosters; the gathering result is
//! reported but does not gate who fights.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thicket::{hash_grid, Grid, GridConfig};

use crate::battle::Battle;
use crate::config::{RosterConfig, Ruleset};
use crate::duel::{Duel, DuelConfig, DuelReport, TurnRecord};
use crate::entity::{Side, SideId, Wallet};
use crate::error::ConfigError;
use crate::gathering::{Gathering, GatheringConfig, GatheringReport};
use crate::search::Policy;
use crate::shop::{stock_side, Economy, Purchase};
use crate::Element;

/// Smallest grid side length that leaves room for a spawn area.
pub const MIN_GRID_SIDE: u32 = 5;

// =============================================================================
// Configuration
// =============================================================================

/// Everything needed to play a match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Catching field
    pub grid: GridConfig,
    /// Damage model and potion table
    pub rules: Ruleset,
    /// Search policy shared by both sides
    pub policy: Policy,
    /// Duel timing
    pub duel: DuelConfig,
    /// Gathering timing
    pub gathering: GatheringConfig,
    /// Starting coins and fuel
    pub economy: Economy,
    /// The two rosters
    pub rosters: RosterConfig,
}

impl MatchConfig {
    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if self.grid.width < MIN_GRID_SIDE || self.grid.height < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall {
                width: self.grid.width,
                height: self.grid.height,
                min: MIN_GRID_SIDE,
            });
        }
        self.rules.validate()?;
        self.policy.validate()?;
        self.duel.validate()?;
        self.gathering.validate()?;
        self.rosters.validate()
    }
}

// =============================================================================
// Report
// =============================================================================

/// Everything that happened in one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Match seed
    pub seed: u64,
    /// Field element of the duel
    pub field: Element,
    /// Fingerprint of the catching grid
    pub grid_hash: u64,
    /// Gathering phase summary
    pub gathering: GatheringReport,
    /// Shop purchases, indexed by [`SideId::index`]
    pub purchases: [Purchase; 2],
    /// Duel summary
    pub duel: DuelReport,
}

impl MatchReport {
    /// Winning side, if any.
    #[must_use]
    pub fn winner(&self) -> Option<SideId> {
        self.duel.outcome.winner()
    }
}

// =============================================================================
// Match
// =============================================================================

/// One seeded match.
///
/// # Example
///
/// ```
/// use triad_core::{Match, MatchConfig};
///
/// let report = Match::new(MatchConfig::default(), 7).unwrap().play();
/// let again = Match::new(MatchConfig::default(), 7).unwrap().play();
/// assert_eq!(report, again);
/// ```
#[derive(Debug, Clone)]
pub struct Match {
    config: MatchConfig,
    seed: u64,
    grid: Grid,
    field: Element,
    rng: ChaCha8Rng,
}

impl Match {
    /// Validates the config, picks the field and builds the grid.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the config is invalid.
    pub fn new(config: MatchConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let field = Element::random(&mut rng);
        let grid = Grid::generate(&config.grid)?;
        Ok(Self {
            config,
            seed,
            grid,
            field,
            rng,
        })
    }

    /// The match seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Field element of the duel.
    #[must_use]
    pub const fn field(&self) -> Element {
        self.field
    }

    /// The catching grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The match configuration.
    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Plays all phases and returns the report.
    #[must_use]
    pub fn play(self) -> MatchReport {
        self.play_recorded().0
    }

    /// Plays all phases and also returns the duel's turn history.
    #[must_use]
    pub fn play_recorded(mut self) -> (MatchReport, Vec<TurnRecord>) {
        tracing::info!(seed = self.seed, field = %self.field, "match started");

        let mut sides = self.build_sides();

        let gathering = {
            let mut phase = Gathering::new(&self.grid, self.config.gathering, &mut self.rng);
            phase.run(&mut sides)
        };

        let purchases = sides
            .each_mut()
            .map(|side| stock_side(side, &self.config.economy, &self.config.rules));

        let [a, b] = sides;
        let battle = Battle::new(self.field, a, b, self.config.rules);
        let duel_seed = self.rng.gen::<u64>();
        let mut duel = Duel::new(battle, self.config.policy, self.config.duel, duel_seed);
        let duel_report = duel.run();

        let report = MatchReport {
            seed: self.seed,
            field: self.field,
            grid_hash: hash_grid(&self.grid),
            gathering,
            purchases,
            duel: duel_report,
        };
        tracing::info!(
            seed = self.seed,
            winner = ?report.winner(),
            turns = report.duel.turns,
            "match finished"
        );
        (report, duel.history().to_vec())
    }

    fn build_sides(&self) -> [Side; 2] {
        let fuel = self.config.economy.start_fuel;
        [&self.config.rosters.a, &self.config.rosters.b]
            .map(|spec| spec.build().with_wallet(Wallet::new(0, fuel)))
    }
}
