//! Factories and invariant checks shared by the crate-level tests.

use crate::battle::Battle;
use crate::config::{RosterConfig, Ruleset};
use crate::duel::DuelConfig;
use crate::entity::{PotionTier, SideId};
use crate::game::MatchConfig;
use crate::search::Policy;
use crate::Element;

// =============================================================================
// Battles
// =============================================================================

/// Default rosters on the given field with the default (random) variance.
pub fn default_battle(field: Element) -> Battle {
    let rosters = RosterConfig::default();
    Battle::new(field, rosters.a.build(), rosters.b.build(), Ruleset::default())
}

/// Default rosters with a constant damage factor of 1.0.
pub fn fixed_battle(field: Element) -> Battle {
    let rosters = RosterConfig::default();
    Battle::new(
        field,
        rosters.a.build(),
        rosters.b.build(),
        Ruleset::with_fixed_variance(1.0),
    )
}

/// Gives both sides `count` small potions.
pub fn give_potions(battle: &mut Battle, count: u32) {
    for side in SideId::BOTH {
        battle
            .side_mut(side)
            .wallet_mut()
            .add_potions(PotionTier::Small, count);
    }
}

/// Damages a creature down to exactly `hp`.
pub fn set_hp(battle: &mut Battle, side: SideId, slot: usize, hp: i32) {
    let creature = battle
        .side_mut(side)
        .creature_mut(slot)
        .expect("slot in range");
    let excess = creature.hp() - hp;
    assert!(excess >= 0, "set_hp only lowers HP");
    creature.take_damage(excess);
}

// =============================================================================
// Matches
// =============================================================================

/// A match config that plays quickly: depth-2 search and a short duel.
pub fn quick_match_config() -> MatchConfig {
    MatchConfig {
        policy: Policy {
            depth: 2,
            ..Policy::default()
        },
        duel: DuelConfig {
            time_budget: 25.0,
            ..DuelConfig::default()
        },
        ..MatchConfig::default()
    }
}

// =============================================================================
// Invariants
// =============================================================================

/// Asserts HP bounds, liveness and active-slot invariants on every creature.
pub fn assert_battle_invariants(battle: &Battle) {
    for side in SideId::BOTH {
        for creature in battle.side(side).roster() {
            assert!(
                (0..=creature.max_hp()).contains(&creature.hp()),
                "{} has hp {} outside [0, {}]",
                creature.name(),
                creature.hp(),
                creature.max_hp()
            );
            assert_eq!(creature.is_alive(), creature.hp() > 0, "{}", creature.name());
        }
        if !battle.side(side).is_defeated() {
            assert!(
                battle.active(side).is_alive(),
                "{side} has a fainted active creature while others live"
            );
        }
    }
}
