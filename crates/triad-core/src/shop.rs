//! Pre-duel shop: each side turns its coins into potions.
//!
//! Tiers are ranked by heal-per-coin, best first, and bought greedily: as many
//! of the best tier as the coins allow, then the next, and so on. Ratios are
//! compared exactly by cross-multiplying, and ties keep the smaller tier
//! first.

use serde::{Deserialize, Serialize};

use crate::config::{PotionSpec, Ruleset};
use crate::entity::{PotionTier, Side};

/// Starting resources handed to each side before a match.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Economy {
    /// Coins each side may spend in the shop
    pub coins_per_side: u32,
    /// Catching fuel each side starts the gathering phase with
    pub start_fuel: u32,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            coins_per_side: 100,
            start_fuel: 45,
        }
    }
}

/// What one side bought.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    /// Potions bought per tier, indexed by [`PotionTier::index`]
    pub bought: [u32; 3],
    /// Coins spent
    pub spent: u32,
    /// Coins left over
    pub remaining: u32,
}

impl Purchase {
    /// Total potions bought.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.bought.iter().sum()
    }
}

/// Tiers ordered best heal-per-coin first. Equal ratios keep table order.
#[must_use]
pub fn rank_tiers(rules: &Ruleset) -> [PotionTier; 3] {
    let mut tiers = PotionTier::ALL;
    // Stable sort, descending by heal/price via heal_a * price_b vs heal_b * price_a
    tiers.sort_by(|a, b| {
        let (pa, pb) = (rules.potion(*a), rules.potion(*b));
        ratio_key(pb, pa).cmp(&ratio_key(pa, pb))
    });
    tiers
}

fn ratio_key(numerator: PotionSpec, other: PotionSpec) -> i64 {
    i64::from(numerator.heal) * i64::from(other.price)
}

/// Plans purchases for `coins` without touching any wallet.
#[must_use]
pub fn plan_purchase(coins: u32, rules: &Ruleset) -> Purchase {
    let mut purchase = Purchase {
        remaining: coins,
        ..Purchase::default()
    };
    for tier in rank_tiers(rules) {
        let price = rules.potion(tier).price;
        if price == 0 {
            continue;
        }
        let count = purchase.remaining / price;
        purchase.bought[tier.index()] += count;
        purchase.remaining -= count * price;
    }
    purchase.spent = coins - purchase.remaining;
    purchase
}

/// Resets the side's potions, grants `economy.coins_per_side` and buys.
///
/// Leftover coins stay in the wallet.
pub fn stock_side(side: &mut Side, economy: &Economy, rules: &Ruleset) -> Purchase {
    let purchase = plan_purchase(economy.coins_per_side, rules);
    let wallet = side.wallet_mut();
    wallet.clear_potions();
    wallet.set_coins(purchase.remaining);
    for tier in PotionTier::ALL {
        wallet.add_potions(tier, purchase.bought[tier.index()]);
    }
    tracing::debug!(
        side = side.name(),
        small = purchase.bought[0],
        medium = purchase.bought[1],
        large = purchase.bought[2],
        remaining = purchase.remaining,
        "shop purchase"
    );
    purchase
}
