//! # Triad Core
//!
//! Turn-based creature combat with an adversarial search AI.
//!
//! Two sides each field three creatures of the elements Fire, Electric and
//! Water. Every turn both sides pick one action (attack, defend, swap or heal)
//! and the turn resolves simultaneously. Each side decides with a depth-limited
//! alpha-beta search over the legal actions, which are pre-filtered by a small
//! fuzzy evaluator.
//!
//! ## Architecture
//!
//! - **Entities**: [`Creature`], [`Side`], [`Wallet`]
//! - **Rules**: [`Ruleset`] (damage model, potions), [`RosterConfig`]
//! - **Decision**: [`fuzzy`] eligibility, [`legal_actions`], [`decide`]
//! - **Resolution**: [`resolver::apply_turn`] mutates a [`Battle`] and emits
//!   [`BattleEvent`]s
//! - **Phases**: [`Gathering`] (grid catching, built on `thicket`), [`shop`],
//!   [`Duel`], tied together by [`Match`] and run in bulk by [`run_series`]
//!
//! ## Determinism
//!
//! Every randomized function takes an injected RNG. Phases that own their
//! randomness seed a `ChaCha8Rng` explicitly, so a match is reproducible from
//! its config and seed.
//!
//! ## Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use triad_core::{decide, Battle, Element, Policy, RosterConfig, Ruleset, SideId};
//!
//! let rosters = RosterConfig::default();
//! let battle = Battle::new(Element::Fire, rosters.a.build(), rosters.b.build(), Ruleset::default());
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let action = decide(&battle, SideId::A, &Policy::default(), &mut rng);
//! assert!(triad_core::legal_actions(&battle, SideId::A).contains(action));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export thicket for grid access
pub use thicket;

pub mod action;
pub mod battle;
pub mod config;
pub mod duel;
pub mod element;
pub mod entity;
pub mod error;
pub mod fuzzy;
pub mod game;
pub mod gathering;
pub mod legal;
pub mod resolver;
pub mod search;
pub mod series;
pub mod shop;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use action::{Action, ActionSet};
pub use battle::{Battle, BattleState};
pub use config::{CreatureSpec, PotionSpec, RosterConfig, Ruleset, SideSpec, Variance};
pub use duel::{Duel, DuelConfig, DuelReport, FinishReason, Outcome, TurnRecord};
pub use element::Element;
pub use entity::{Creature, PotionTier, Side, SideId, Wallet, ROSTER_SIZE};
pub use error::ConfigError;
pub use game::{Match, MatchConfig, MatchReport};
pub use gathering::{CatchRecord, Gathering, GatheringConfig, GatheringReport};
pub use legal::legal_actions;
pub use resolver::{apply_turn, simulate_turn, BattleEvent, EventLog, TurnObserver};
pub use search::{decide, evaluate, search, search_value, MoveOrdering, Policy, SearchOutcome, SearchStats};
pub use series::{play_series, run_series, SeriesSummary};
pub use shop::{Economy, Purchase};
