//! Adversarial search engine.
//!
//! Depth-bounded minimax with alpha-beta pruning. Both sides search with the
//! same [`Policy`] and the same evaluation, so neither has an informational or
//! computational edge.
//!
//! # Architecture
//!
//! At each ply the mover tries every candidate from
//! [`legal_actions`](crate::legal::legal_actions), pairs it with a default
//! `Attack` for the other side, replays the turn on a private clone through
//! [`simulate_turn`](crate::resolver::simulate_turn) and recurses with the
//! other side moving. Plies where the searching side moves maximize; the
//! others minimize.
//!
//! # Determinism
//!
//! All randomness (candidate shuffling and damage variance inside simulated
//! turns) comes from the injected RNG, so a search is reproducible from the
//! RNG state. Pruning and pure minimax agree on the root value whenever the
//! RNG stream they see is the same, i.e. with [`MoveOrdering::Fixed`] and a
//! fixed variance factor.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use triad_core::{decide, Battle, Element, Policy, RosterConfig, Ruleset, SideId};
//!
//! let rosters = RosterConfig::default();
//! let battle = Battle::new(Element::Fire, rosters.a.build(), rosters.b.build(), Ruleset::default());
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//!
//! let action = decide(&battle, SideId::A, &Policy::default(), &mut rng);
//! assert!(triad_core::legal_actions(&battle, SideId::A).contains(action));
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::battle::Battle;
use crate::entity::SideId;
use crate::error::ConfigError;
use crate::legal::legal_actions;
use crate::resolver::simulate_turn;

/// Weight of one living creature in the evaluation, in HP.
pub const ALIVE_WEIGHT: i64 = 30;

// =============================================================================
// Policy
// =============================================================================

/// Candidate ordering at each node.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOrdering {
    /// Shuffle candidates with the injected RNG
    #[default]
    Shuffled,
    /// Keep generator order
    Fixed,
}

/// Search configuration shared by both sides.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Plies to look ahead (at least 1)
    pub depth: u32,
    /// Candidate ordering
    pub ordering: MoveOrdering,
    /// Alpha-beta cut-offs; disabling gives pure minimax
    pub pruning: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            depth: 3,
            ordering: MoveOrdering::Shuffled,
            pruning: true,
        }
    }
}

impl Policy {
    /// Policy with fixed ordering, for reproducible comparisons.
    #[must_use]
    pub const fn fixed(depth: u32) -> Self {
        Self {
            depth,
            ordering: MoveOrdering::Fixed,
            pruning: true,
        }
    }

    /// Same policy without alpha-beta cut-offs.
    #[must_use]
    pub const fn without_pruning(self) -> Self {
        Self {
            pruning: false,
            ..self
        }
    }

    /// Checks the search depth.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDepth`] for depth 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::InvalidDepth(self.depth));
        }
        Ok(())
    }
}

// =============================================================================
// Evaluation
// =============================================================================

/// Static evaluation from `me`'s perspective.
///
/// `(hp(me) - hp(opp)) + (alive(me) - alive(opp)) * 30`
#[must_use]
pub fn evaluate(battle: &Battle, me: SideId) -> i64 {
    let opp = me.other();
    let hp = battle.total_hp(me) - battle.total_hp(opp);
    let alive = count(battle.alive_count(me)) - count(battle.alive_count(opp));
    hp + alive * ALIVE_WEIGHT
}

#[allow(clippy::cast_possible_wrap)]
fn count(n: usize) -> i64 {
    n as i64
}

// =============================================================================
// Search
// =============================================================================

/// Counters collected during one search.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes visited, root included
    pub nodes: u64,
    /// Nodes scored by [`evaluate`]
    pub leaves: u64,
    /// Alpha-beta cut-offs taken
    pub cutoffs: u64,
}

/// Result of a search.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Chosen action
    pub action: Action,
    /// Root value from the searching side's perspective
    pub value: i64,
    /// Search counters
    pub stats: SearchStats,
}

/// Runs a full search for `me` and returns action, value and counters.
pub fn search<R: Rng + ?Sized>(
    battle: &Battle,
    me: SideId,
    policy: &Policy,
    rng: &mut R,
) -> SearchOutcome {
    let mut searcher = Searcher {
        me,
        policy,
        rng,
        stats: SearchStats::default(),
    };
    let (value, action) = searcher.node(battle, me, policy.depth, i64::MIN, i64::MAX);
    let action = action.unwrap_or(Action::Attack);

    tracing::trace!(
        side = %me,
        %action,
        value,
        nodes = searcher.stats.nodes,
        cutoffs = searcher.stats.cutoffs,
        "search finished"
    );

    SearchOutcome {
        action,
        value,
        stats: searcher.stats,
    }
}

/// Chooses an action for `me`.
///
/// Falls back to `Attack` if the root has nothing to choose from.
pub fn decide<R: Rng + ?Sized>(battle: &Battle, me: SideId, policy: &Policy, rng: &mut R) -> Action {
    search(battle, me, policy, rng).action
}

/// Root value of a search for `me`.
pub fn search_value<R: Rng + ?Sized>(battle: &Battle, me: SideId, policy: &Policy, rng: &mut R) -> i64 {
    search(battle, me, policy, rng).value
}

struct Searcher<'a, R: ?Sized> {
    me: SideId,
    policy: &'a Policy,
    rng: &'a mut R,
    stats: SearchStats,
}

impl<R: Rng + ?Sized> Searcher<'_, R> {
    fn node(
        &mut self,
        battle: &Battle,
        mover: SideId,
        depth: u32,
        mut alpha: i64,
        mut beta: i64,
    ) -> (i64, Option<Action>) {
        self.stats.nodes += 1;

        if depth == 0 || battle.is_over() {
            self.stats.leaves += 1;
            return (evaluate(battle, self.me), None);
        }

        let maximizing = mover == self.me;
        let mut candidates = legal_actions(battle, mover);
        debug_assert!(!candidates.is_empty(), "legal actions always include Attack");
        if self.policy.ordering == MoveOrdering::Shuffled {
            candidates.shuffle(&mut *self.rng);
        }

        let mut best_value = if maximizing { i64::MIN } else { i64::MAX };
        let mut best_action = None;

        for action in &candidates {
            let mut child = battle.clone();
            let mut pair = [Action::Attack; 2];
            pair[mover.index()] = action;
            simulate_turn(&mut child, pair, &mut *self.rng);

            let (value, _) = self.node(&child, mover.other(), depth - 1, alpha, beta);

            if maximizing {
                if value > best_value {
                    best_value = value;
                    best_action = Some(action);
                }
                alpha = alpha.max(best_value);
            } else {
                if value < best_value {
                    best_value = value;
                    best_action = Some(action);
                }
                beta = beta.min(best_value);
            }

            if self.policy.pruning && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        (best_value, best_action)
    }
}
