//! Per-side resources: coins, fuel and healing potions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Ruleset;

/// Size class of a healing potion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PotionTier {
    /// Cheapest, weakest potion
    Small,
    /// Mid-range potion
    Medium,
    /// Strongest, most expensive potion
    Large,
}

impl PotionTier {
    /// All tiers, smallest first.
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Position of this tier in [`PotionTier::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Small => 0,
            Self::Medium => 1,
            Self::Large => 2,
        }
    }
}

impl fmt::Display for PotionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Small => write!(f, "Small"),
            Self::Medium => write!(f, "Medium"),
            Self::Large => write!(f, "Large"),
        }
    }
}

/// Coins, catching fuel and potion inventory of one side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wallet {
    coins: u32,
    fuel: u32,
    potions: [u32; 3],
}

impl Wallet {
    /// Creates a wallet with the given coins and fuel and no potions.
    #[must_use]
    pub const fn new(coins: u32, fuel: u32) -> Self {
        Self {
            coins,
            fuel,
            potions: [0; 3],
        }
    }

    /// Coins on hand.
    #[must_use]
    pub const fn coins(&self) -> u32 {
        self.coins
    }

    /// Catching fuel on hand.
    #[must_use]
    pub const fn fuel(&self) -> u32 {
        self.fuel
    }

    /// Number of potions of a tier.
    #[must_use]
    pub const fn potions(&self, tier: PotionTier) -> u32 {
        self.potions[tier.index()]
    }

    /// Total potions across all tiers.
    #[must_use]
    pub fn total_potions(&self) -> u32 {
        self.potions.iter().sum()
    }

    /// Returns true if at least one potion of any tier is owned.
    #[must_use]
    pub fn has_potion(&self) -> bool {
        self.potions.iter().any(|n| *n > 0)
    }

    /// The owned tier with the largest heal amount under `rules`.
    ///
    /// Ties keep the smaller tier.
    #[must_use]
    pub fn best_potion(&self, rules: &Ruleset) -> Option<PotionTier> {
        PotionTier::ALL
            .into_iter()
            .filter(|tier| self.potions(*tier) > 0)
            .fold(None, |best: Option<PotionTier>, tier| match best {
                Some(b) if rules.potion(b).heal >= rules.potion(tier).heal => Some(b),
                _ => Some(tier),
            })
    }

    /// Sets the coin balance.
    pub fn set_coins(&mut self, coins: u32) {
        self.coins = coins;
    }

    /// Sets the fuel balance.
    pub fn set_fuel(&mut self, fuel: u32) {
        self.fuel = fuel;
    }

    /// Deducts coins if affordable. Returns false (and changes nothing) otherwise.
    pub fn spend_coins(&mut self, amount: u32) -> bool {
        match self.coins.checked_sub(amount) {
            Some(rest) => {
                self.coins = rest;
                true
            }
            None => false,
        }
    }

    /// Deducts fuel if available. Returns false (and changes nothing) otherwise.
    pub fn spend_fuel(&mut self, amount: u32) -> bool {
        match self.fuel.checked_sub(amount) {
            Some(rest) => {
                self.fuel = rest;
                true
            }
            None => false,
        }
    }

    /// Adds potions of a tier.
    pub fn add_potions(&mut self, tier: PotionTier, count: u32) {
        let slot = &mut self.potions[tier.index()];
        *slot = slot.saturating_add(count);
    }

    /// Removes one potion of a tier. Returns false if none was owned.
    pub fn take_potion(&mut self, tier: PotionTier) -> bool {
        let slot = &mut self.potions[tier.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Empties the potion inventory.
    pub fn clear_potions(&mut self) {
        self.potions = [0; 3];
    }
}
