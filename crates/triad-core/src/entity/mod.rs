//! Combat entities: creatures, sides and their resources.
//!
//! - [`Creature`]: A single combatant with element, HP and stats
//! - [`Side`]: A trainer with a fixed roster of three creatures and a wallet
//! - [`SideId`]: Identifies one of the two sides in a battle
//! - [`Wallet`]: Coins, fuel and potion inventory
//!
//! # Example
//!
//! ```
//! use triad_core::entity::{Creature, Side};
//! use triad_core::Element;
//!
//! let side = Side::new(
//!     "Ash",
//!     [
//!         Creature::new("Pikachu", Element::Electric),
//!         Creature::new("Charmander", Element::Fire),
//!         Creature::new("Squirtle", Element::Water),
//!     ],
//! );
//!
//! assert_eq!(side.alive_count(), 3);
//! assert_eq!(side.total_hp(), 300);
//! ```

pub mod creature;
pub mod wallet;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use creature::Creature;
pub use wallet::{PotionTier, Wallet};

/// Number of creatures on every roster.
pub const ROSTER_SIZE: usize = 3;

/// Identifies one of the two sides of a battle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SideId {
    /// First side (moves first in random draw order)
    A,
    /// Second side
    B,
}

impl SideId {
    /// Both sides, A first.
    pub const BOTH: [Self; 2] = [Self::A, Self::B];

    /// Index into per-side arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }

    /// The opposing side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for SideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// A trainer: name, roster and wallet.
///
/// Which roster slot is active is battle state, not side state; see
/// [`BattleState`](crate::BattleState).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Side {
    name: String,
    roster: [Creature; ROSTER_SIZE],
    wallet: Wallet,
}

impl Side {
    /// Creates a side with an empty wallet.
    #[must_use]
    pub fn new(name: impl Into<String>, roster: [Creature; ROSTER_SIZE]) -> Self {
        Self {
            name: name.into(),
            roster,
            wallet: Wallet::default(),
        }
    }

    /// Builder-style wallet override.
    #[must_use]
    pub fn with_wallet(mut self, wallet: Wallet) -> Self {
        self.wallet = wallet;
        self
    }

    /// Trainer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full roster in slot order.
    #[must_use]
    pub const fn roster(&self) -> &[Creature; ROSTER_SIZE] {
        &self.roster
    }

    /// Creature in a roster slot, if the slot exists.
    #[must_use]
    pub fn creature(&self, slot: usize) -> Option<&Creature> {
        self.roster.get(slot)
    }

    /// Mutable creature in a roster slot.
    pub fn creature_mut(&mut self, slot: usize) -> Option<&mut Creature> {
        self.roster.get_mut(slot)
    }

    /// Resource wallet.
    #[must_use]
    pub const fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// Mutable resource wallet.
    pub fn wallet_mut(&mut self) -> &mut Wallet {
        &mut self.wallet
    }

    /// Number of living creatures.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.roster.iter().filter(|c| c.is_alive()).count()
    }

    /// Sum of current HP across the roster.
    ///
    /// Widened to `i64` so three `i32` HP values cannot overflow.
    #[must_use]
    pub fn total_hp(&self) -> i64 {
        self.roster.iter().map(|c| i64::from(c.hp())).sum()
    }

    /// Returns true if every creature has fainted.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.roster.iter().all(|c| !c.is_alive())
    }

    /// First living creature in roster order.
    #[must_use]
    pub fn first_alive(&self) -> Option<usize> {
        self.roster.iter().position(Creature::is_alive)
    }
}
