//! Fuzzy action-eligibility evaluator.
//!
//! Maps continuous battle readings (HP percentages, potion ownership, bench
//! advantage) to a confidence in `[0, 1]` that Heal or Swap is worth
//! considering. The legal-action generator admits an action only when its
//! confidence exceeds the matching threshold.
//!
//! # Membership functions
//!
//! All percentages are in `0..=100`; inputs outside a function's breakpoints
//! clamp to the nearest plateau.
//!
//! ```text
//! low(x, a, b)       high(x, a, b)      medium(x, a, m, b)
//! 1 ──┐               ┌── 1                 /\
//!     │\             /│                    /  \
//! 0   └─\──       ──/─┘ 0              ───/    \───
//!       a  b        a  b                  a  m  b
//! ```
//!
//! # Rules
//!
//! Each rule output is `min` of its antecedents times a fixed weight; the
//! confidence is the `max` over rules.

// =============================================================================
// Breakpoints and weights
// =============================================================================

/// Heal is a candidate only above this confidence.
pub const HEAL_THRESHOLD: f64 = 0.4;
/// Swap is a candidate only above this confidence.
pub const SWAP_THRESHOLD: f64 = 0.5;

const OWN_LOW: (f64, f64) = (20.0, 50.0);
const OWN_MEDIUM: (f64, f64, f64) = (30.0, 50.0, 70.0);
const OWN_HIGH: (f64, f64) = (60.0, 80.0);
const ENEMY_LOW: (f64, f64) = (20.0, 50.0);
const ENEMY_HIGH: (f64, f64) = (50.0, 80.0);

const HEAL_DESPERATE_WEIGHT: f64 = 0.9;
const HEAL_TRADE_WEIGHT: f64 = 0.6;
const HEAL_HEALTHY_WEIGHT: f64 = 0.0;
const HEAL_RACE_WEIGHT: f64 = 0.4;

const SWAP_CRITICAL: (f64, f64) = (10.0, 30.0);
const SWAP_LOW: (f64, f64) = (20.0, 50.0);
const SWAP_HIGH: (f64, f64) = (50.0, 80.0);

const SWAP_CRITICAL_WEIGHT: f64 = 0.95;
const SWAP_LOW_WEIGHT: f64 = 0.75;
const SWAP_BASE_WEIGHT: f64 = 0.5;
const SWAP_HEALTHY_WEIGHT: f64 = 0.0;

// =============================================================================
// Membership functions
// =============================================================================

/// Descending ramp: 1 at or below `floor`, 0 at or above `ceiling`.
#[must_use]
pub fn low(x: f64, floor: f64, ceiling: f64) -> f64 {
    if x <= floor {
        1.0
    } else if x >= ceiling {
        0.0
    } else {
        (ceiling - x) / (ceiling - floor)
    }
}

/// Ascending ramp: 0 at or below `floor`, 1 at or above `ceiling`.
#[must_use]
pub fn high(x: f64, floor: f64, ceiling: f64) -> f64 {
    if x >= ceiling {
        1.0
    } else if x <= floor {
        0.0
    } else {
        (x - floor) / (ceiling - floor)
    }
}

/// Triangle peaking at `mid`, 0 at or beyond `lo` and `hi`.
#[must_use]
pub fn medium(x: f64, lo: f64, mid: f64, hi: f64) -> f64 {
    if x <= lo || x >= hi {
        0.0
    } else if x <= mid {
        (x - lo) / (mid - lo)
    } else {
        (hi - x) / (hi - mid)
    }
}

// =============================================================================
// Rule bases
// =============================================================================

/// Confidence that healing the active creature is worthwhile.
///
/// Zero without a potion. Otherwise the strongest of:
/// - own HP low and enemy not low (0.9)
/// - own HP medium and enemy high (0.6)
/// - own HP high (0.0)
/// - both low (0.4)
///
/// # Example
///
/// ```
/// use triad_core::fuzzy::heal_confidence;
///
/// // Badly hurt against a healthy opponent: heal
/// assert!(heal_confidence(15.0, true, 90.0) > 0.4);
/// // Healthy: no heal
/// assert!(heal_confidence(90.0, true, 90.0) <= 0.4);
/// // No potion, no heal
/// assert_eq!(heal_confidence(15.0, false, 90.0), 0.0);
/// ```
#[must_use]
pub fn heal_confidence(own_hp_pct: f64, has_potion: bool, enemy_hp_pct: f64) -> f64 {
    if !has_potion {
        return 0.0;
    }

    let own_low = low(own_hp_pct, OWN_LOW.0, OWN_LOW.1);
    let own_medium = medium(own_hp_pct, OWN_MEDIUM.0, OWN_MEDIUM.1, OWN_MEDIUM.2);
    let own_high = high(own_hp_pct, OWN_HIGH.0, OWN_HIGH.1);
    let enemy_low = low(enemy_hp_pct, ENEMY_LOW.0, ENEMY_LOW.1);
    let enemy_high = high(enemy_hp_pct, ENEMY_HIGH.0, ENEMY_HIGH.1);

    let rules = [
        own_low.min(1.0 - enemy_low) * HEAL_DESPERATE_WEIGHT,
        own_medium.min(enemy_high) * HEAL_TRADE_WEIGHT,
        own_high * HEAL_HEALTHY_WEIGHT,
        own_low.min(enemy_low) * HEAL_RACE_WEIGHT,
    ];
    rules.into_iter().fold(0.0, f64::max)
}

/// Confidence that swapping to an advantaged bench creature is worthwhile.
///
/// Zero without a bench advantage. Otherwise the strongest of:
/// - own HP critical (0.95)
/// - own HP low (0.75)
/// - flat bench-advantage rule (0.5)
/// - healthy with no advantage (0.0, never fires)
///
/// The flat rule alone sits exactly on [`SWAP_THRESHOLD`], so a swap becomes a
/// candidate only once own HP drops into the low band.
#[must_use]
pub fn swap_confidence(bench_advantage: bool, own_hp_pct: f64) -> f64 {
    if !bench_advantage {
        return 0.0;
    }
    let advantage = 1.0;

    let critical = low(own_hp_pct, SWAP_CRITICAL.0, SWAP_CRITICAL.1);
    let hp_low = low(own_hp_pct, SWAP_LOW.0, SWAP_LOW.1);
    let hp_high = high(own_hp_pct, SWAP_HIGH.0, SWAP_HIGH.1);

    let rules = [
        critical.min(advantage) * SWAP_CRITICAL_WEIGHT,
        hp_low.min(advantage) * SWAP_LOW_WEIGHT,
        advantage * SWAP_BASE_WEIGHT,
        hp_high.min(1.0 - advantage) * SWAP_HEALTHY_WEIGHT,
    ];
    rules.into_iter().fold(0.0, f64::max)
}

/// Returns true if heal confidence clears [`HEAL_THRESHOLD`].
#[must_use]
pub fn heal_eligible(own_hp_pct: f64, has_potion: bool, enemy_hp_pct: f64) -> bool {
    heal_confidence(own_hp_pct, has_potion, enemy_hp_pct) > HEAL_THRESHOLD
}

/// Returns true if swap confidence clears [`SWAP_THRESHOLD`].
#[must_use]
pub fn swap_eligible(bench_advantage: bool, own_hp_pct: f64) -> bool {
    swap_confidence(bench_advantage, own_hp_pct) > SWAP_THRESHOLD
}
