//! Damage formula.
//!
//! ```text
//! base   = max(min_damage, atk - def / 2)
//! mult   = [type_advantage] * [field_boost] * variance
//! damage = round_ties_even(base * mult)
//! ```
//!
//! A defending target then takes half of `damage`, rounded down.

use rand::Rng;

use crate::config::Ruleset;
use crate::entity::Creature;
use crate::Element;

/// Base damage before multipliers.
#[must_use]
pub fn base_damage(attacker: &Creature, defender: &Creature, rules: &Ruleset) -> i32 {
    (attacker.atk() - defender.def().div_euclid(2)).max(rules.min_damage)
}

/// Deterministic part of the multiplier: type advantage and field boost.
#[must_use]
pub fn element_multiplier(attacker: Element, defender: Element, field: Element, rules: &Ruleset) -> f64 {
    let mut mult = 1.0;
    if attacker.has_advantage_over(defender) {
        mult *= rules.type_advantage;
    }
    if attacker == field {
        mult *= rules.field_boost;
    }
    mult
}

/// Damage for a given variance factor, before any Defend reduction.
#[must_use]
pub fn compute_damage(
    attacker: &Creature,
    defender: &Creature,
    field: Element,
    rules: &Ruleset,
    variance: f64,
) -> i32 {
    let base = base_damage(attacker, defender, rules);
    let mult = element_multiplier(attacker.element(), defender.element(), field, rules) * variance;
    #[allow(clippy::cast_possible_truncation)]
    let damage = (f64::from(base) * mult).round_ties_even() as i32;
    damage.max(0)
}

/// Damage with the variance factor drawn from the ruleset.
///
/// Consumes exactly one draw for uniform variance and none for a fixed factor.
pub fn roll_damage<R: Rng + ?Sized>(
    attacker: &Creature,
    defender: &Creature,
    field: Element,
    rules: &Ruleset,
    rng: &mut R,
) -> i32 {
    let variance = rules.variance.sample(rng);
    compute_damage(attacker, defender, field, rules, variance)
}

/// Damage taken by a defending creature.
#[must_use]
pub const fn defended(damage: i32) -> i32 {
    damage / 2
}
