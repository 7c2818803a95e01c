//! Battle actions and the candidate sets the search explores.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::PotionTier;

/// What a side does on one turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Strike the opposing active creature
    Attack,
    /// Halve incoming damage this turn
    Defend,
    /// Bring the creature in a roster slot to the front
    Swap(usize),
    /// Drink a potion of a tier on the active creature
    Heal(PotionTier),
}

impl Action {
    /// Short lowercase label, used in logs and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Defend => "defend",
            Self::Swap(_) => "swap",
            Self::Heal(_) => "heal",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => write!(f, "Attack"),
            Self::Defend => write!(f, "Defend"),
            Self::Swap(slot) => write!(f, "Swap({slot})"),
            Self::Heal(tier) => write!(f, "Heal({tier})"),
        }
    }
}

/// Maximum number of candidates a side can have on one turn.
pub const MAX_ACTIONS: usize = 4;

/// Small inline set of candidate actions.
///
/// Holds at most [`MAX_ACTIONS`] entries without allocating, so the search
/// can build one per node cheaply.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ActionSet {
    actions: [Action; MAX_ACTIONS],
    len: usize,
}

impl Default for ActionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actions: [Action::Attack; MAX_ACTIONS],
            len: 0,
        }
    }

    /// Appends an action. Returns false if the set is full.
    pub fn push(&mut self, action: Action) -> bool {
        if self.len == MAX_ACTIONS {
            return false;
        }
        self.actions[self.len] = action;
        self.len += 1;
        true
    }

    /// Number of actions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there are no actions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The actions as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Action] {
        &self.actions[..self.len]
    }

    /// Returns true if the action is in the set.
    #[must_use]
    pub fn contains(&self, action: Action) -> bool {
        self.as_slice().contains(&action)
    }

    /// First swap candidate, if any.
    #[must_use]
    pub fn swap_target(&self) -> Option<usize> {
        self.iter().find_map(|a| match a {
            Action::Swap(slot) => Some(slot),
            _ => None,
        })
    }

    /// First heal candidate, if any.
    #[must_use]
    pub fn heal_tier(&self) -> Option<PotionTier> {
        self.iter().find_map(|a| match a {
            Action::Heal(tier) => Some(tier),
            _ => None,
        })
    }

    /// Iterates the actions in order.
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.as_slice().iter().copied()
    }

    /// Shuffles the actions in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.actions[..self.len].shuffle(rng);
    }
}

impl<'a> IntoIterator for &'a ActionSet {
    type Item = Action;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Action>>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter().copied()
    }
}
