//! Duel loop: the battle phase on a simulated clock.
//!
//! A [`Duel`] owns a live [`Battle`], a shared search [`Policy`] and a seeded
//! RNG. Every decision interval both sides search the same pre-turn state with
//! the same policy, then exactly one live [`apply_turn`] is performed.
//!
//! # Timing
//!
//! The clock starts at zero. The first decision happens at
//! [`DuelConfig::first_decision`], later ones every
//! [`DuelConfig::decision_interval`]. The duel ends by knockout as soon as one
//! side has no living creature, or by timeout once the next decision would
//! fall after [`DuelConfig::time_budget`]. On timeout the side with more total
//! HP wins; equal totals are a draw.
//!
//! # Determinism
//!
//! The duel draws all randomness from a `ChaCha8Rng` seeded at construction.
//! Same battle, policy, config and seed give the same history.
//!
//! # Example
//!
//! ```
//! use triad_core::{Battle, Duel, DuelConfig, Element, Policy, RosterConfig, Ruleset};
//!
//! let rosters = RosterConfig::default();
//! let battle = Battle::new(Element::Water, rosters.a.build(), rosters.b.build(), Ruleset::default());
//! let mut duel = Duel::new(battle, Policy::default(), DuelConfig::default(), 42);
//!
//! let report = duel.run();
//! assert!(report.turns > 0);
//! assert_eq!(duel.history().len(), report.turns as usize);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::battle::Battle;
use crate::entity::SideId;
use crate::error::ConfigError;
use crate::resolver::{apply_turn, BattleEvent, EventLog};
use crate::search::{decide, Policy};

// =============================================================================
// Configuration
// =============================================================================

/// Battle-phase timing, in seconds of simulated time.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Time of the first decision
    pub first_decision: f64,
    /// Time between decisions
    pub decision_interval: f64,
    /// Phase length; no decision happens after this
    pub time_budget: f64,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            first_decision: 1.0,
            decision_interval: 0.7,
            time_budget: 130.0,
        }
    }
}

impl DuelConfig {
    /// Checks that all durations are finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTiming`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("first_decision", self.first_decision),
            ("decision_interval", self.decision_interval),
            ("time_budget", self.time_budget),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTiming { name, value });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// Result of a duel or match.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// One side won
    Winner(SideId),
    /// Neither side won
    Draw,
}

impl Outcome {
    /// The winning side, if any.
    #[must_use]
    pub const fn winner(self) -> Option<SideId> {
        match self {
            Self::Winner(side) => Some(side),
            Self::Draw => None,
        }
    }

    /// Decides by total HP; equal totals are a draw.
    #[must_use]
    pub fn by_total_hp(battle: &Battle) -> Self {
        let a = battle.total_hp(SideId::A);
        let b = battle.total_hp(SideId::B);
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => Self::Winner(SideId::A),
            std::cmp::Ordering::Less => Self::Winner(SideId::B),
            std::cmp::Ordering::Equal => Self::Draw,
        }
    }
}

/// How a duel ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// A side ran out of living creatures
    Knockout,
    /// The time budget ran out
    Timeout,
}

// =============================================================================
// Records
// =============================================================================

/// One played turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Zero-based turn number
    pub turn: u32,
    /// Simulated time of the decision
    pub time: f64,
    /// Actions chosen, indexed by [`SideId::index`]
    pub actions: [Action; 2],
    /// Events produced by the turn
    pub events: Vec<BattleEvent>,
}

/// Summary of a finished duel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelReport {
    /// Who won
    pub outcome: Outcome,
    /// Why the duel stopped
    pub reason: FinishReason,
    /// Turns played
    pub turns: u32,
    /// Simulated time at the end
    pub elapsed: f64,
    /// Total HP per side
    pub final_hp: [i64; 2],
    /// Living creatures per side
    pub alive: [usize; 2],
    /// Potions left per side
    pub potions_left: [u32; 2],
}

// =============================================================================
// Duel
// =============================================================================

/// The battle phase of a match.
#[derive(Debug, Clone)]
pub struct Duel {
    battle: Battle,
    policy: Policy,
    config: DuelConfig,
    rng: ChaCha8Rng,
    seed: u64,
    turn: u32,
    history: Vec<TurnRecord>,
    log: EventLog,
    report: Option<DuelReport>,
}

impl Duel {
    /// Creates a duel. Both sides search with `policy`.
    #[must_use]
    pub fn new(battle: Battle, policy: Policy, config: DuelConfig, seed: u64) -> Self {
        Self {
            battle,
            policy,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            turn: 0,
            history: Vec::new(),
            log: EventLog::new(),
            report: None,
        }
    }

    /// The live battle.
    #[must_use]
    pub const fn battle(&self) -> &Battle {
        &self.battle
    }

    /// The shared search policy.
    #[must_use]
    pub const fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Seed the duel RNG was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Turns played so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Every turn played so far.
    #[must_use]
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Simulated time of the next decision.
    #[must_use]
    pub fn next_decision_time(&self) -> f64 {
        self.config.first_decision + f64::from(self.turn) * self.config.decision_interval
    }

    /// Returns true once the duel has ended.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.report.is_some()
    }

    /// Final report, once finished.
    #[must_use]
    pub const fn report(&self) -> Option<&DuelReport> {
        self.report.as_ref()
    }

    /// Advances the clock to the next decision.
    ///
    /// Plays one turn and returns true, or ends the duel (knockout or
    /// timeout) and returns false.
    pub fn step(&mut self) -> bool {
        if self.report.is_some() {
            return false;
        }

        if self.battle.is_over() {
            let outcome = self
                .battle
                .knockout_winner()
                .map_or(Outcome::Draw, Outcome::Winner);
            let elapsed = if self.turn == 0 {
                0.0
            } else {
                self.next_decision_time() - self.config.decision_interval
            };
            self.finish(outcome, FinishReason::Knockout, elapsed);
            return false;
        }

        let now = self.next_decision_time();
        if now > self.config.time_budget {
            let outcome = Outcome::by_total_hp(&self.battle);
            self.finish(outcome, FinishReason::Timeout, self.config.time_budget);
            return false;
        }

        let action_a = decide(&self.battle, SideId::A, &self.policy, &mut self.rng);
        let action_b = decide(&self.battle, SideId::B, &self.policy, &mut self.rng);
        let actions = [action_a, action_b];

        apply_turn(&mut self.battle, actions, &mut self.rng, &mut self.log);

        tracing::debug!(
            turn = self.turn,
            time = now,
            a = %action_a,
            b = %action_b,
            hp_a = self.battle.total_hp(SideId::A),
            hp_b = self.battle.total_hp(SideId::B),
            "turn"
        );

        self.history.push(TurnRecord {
            turn: self.turn,
            time: now,
            actions,
            events: self.log.take_events(),
        });
        self.turn += 1;
        true
    }

    /// Steps until the duel ends and returns the report.
    pub fn run(&mut self) -> DuelReport {
        loop {
            self.step();
            if let Some(report) = &self.report {
                return report.clone();
            }
        }
    }

    fn finish(&mut self, outcome: Outcome, reason: FinishReason, elapsed: f64) {
        tracing::info!(
            ?outcome,
            ?reason,
            turns = self.turn,
            hp_a = self.battle.total_hp(SideId::A),
            hp_b = self.battle.total_hp(SideId::B),
            "duel finished"
        );
        self.report = Some(self.snapshot(outcome, reason, elapsed));
    }

    fn snapshot(&self, outcome: Outcome, reason: FinishReason, elapsed: f64) -> DuelReport {
        DuelReport {
            outcome,
            reason,
            turns: self.turn,
            elapsed,
            final_hp: [
                self.battle.total_hp(SideId::A),
                self.battle.total_hp(SideId::B),
            ],
            alive: [
                self.battle.alive_count(SideId::A),
                self.battle.alive_count(SideId::B),
            ],
            potions_left: SideId::BOTH.map(|side| self.battle.side(side).wallet().total_potions()),
        }
    }
}
