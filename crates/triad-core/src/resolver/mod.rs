//! Battle transition function.
//!
//! [`apply_turn`] advances a [`Battle`] by one turn given both sides' actions.
//! It is the only code path that mutates a battle during play, and the search
//! engine replays hypothetical turns through the very same function via
//! [`simulate_turn`], so predicted and live outcomes can never diverge.
//!
//! # Turn order
//!
//! 1. Support actions for A then B: `Swap` changes the active slot, `Heal`
//!    drinks a potion on the active creature.
//! 2. Defend flags are recorded for this turn only.
//! 3. Attacks resolve simultaneously: liveness of both active creatures is
//!    read once, both damages are computed from the pre-attack state (random
//!    draws in A, B order) and then both are applied.
//! 4. Each side whose active creature fainted brings in its first living
//!    creature in roster order.
//!
//! Illegal actions do nothing and are reported as
//! [`BattleEvent::ActionIgnored`].
//!
//! # Determinism
//!
//! Given the same battle, actions and RNG state, the result is identical.
//! The only randomness is the variance draw, taken from the injected RNG.

mod damage;
mod event;

pub use damage::{base_damage, compute_damage, defended, element_multiplier, roll_damage};
pub use event::{BattleEvent, EventLog, IgnoreReason};

use rand::Rng;

use crate::action::Action;
use crate::battle::Battle;
use crate::entity::{PotionTier, SideId, ROSTER_SIZE};

/// Receives the events produced while a turn is applied.
///
/// # Example
///
/// ```
/// use triad_core::resolver::{BattleEvent, TurnObserver};
///
/// #[derive(Default)]
/// struct KnockoutCounter(usize);
///
/// impl TurnObserver for KnockoutCounter {
///     fn record(&mut self, event: BattleEvent) {
///         if matches!(event, BattleEvent::Attacked { fainted: true, .. }) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait TurnObserver {
    /// Called once per event, in the order events happen.
    fn record(&mut self, event: BattleEvent);
}

/// Observer that discards everything.
#[derive(Debug, Copy, Clone, Default)]
pub struct NullObserver;

impl TurnObserver for NullObserver {
    fn record(&mut self, _event: BattleEvent) {}
}

/// Applies one turn in place, reporting events to `observer`.
///
/// `actions` is indexed by [`SideId::index`].
pub fn apply_turn<R, O>(battle: &mut Battle, actions: [Action; 2], rng: &mut R, observer: &mut O)
where
    R: Rng + ?Sized,
    O: TurnObserver + ?Sized,
{
    // Support actions
    for side in SideId::BOTH {
        match actions[side.index()] {
            Action::Swap(slot) => apply_swap(battle, side, slot, observer),
            Action::Heal(tier) => apply_heal(battle, side, tier, observer),
            Action::Attack | Action::Defend => {}
        }
    }

    // Defend flags
    let defending = actions.map(|a| a == Action::Defend);
    for side in SideId::BOTH {
        if defending[side.index()] {
            observer.record(BattleEvent::Defended { side });
        }
    }

    // Attacks: read liveness once, compute both, then apply both
    let alive = SideId::BOTH.map(|side| battle.active(side).is_alive());
    let mut pending: [Option<i32>; 2] = [None, None];
    for side in SideId::BOTH {
        if actions[side.index()] != Action::Attack {
            continue;
        }
        let target = side.other();
        if !alive[side.index()] {
            ignore(observer, side, Action::Attack, IgnoreReason::ActiveFainted);
            continue;
        }
        if !alive[target.index()] {
            ignore(observer, side, Action::Attack, IgnoreReason::OpponentFainted);
            continue;
        }
        let raw = roll_damage(
            battle.active(side),
            battle.active(target),
            battle.field(),
            battle.rules(),
            rng,
        );
        pending[side.index()] = Some(if defending[target.index()] {
            defended(raw)
        } else {
            raw
        });
    }

    for side in SideId::BOTH {
        let Some(damage) = pending[side.index()] else {
            continue;
        };
        let target = side.other();
        let target_slot = battle.active_index(target);
        let creature = battle.active_mut(target);
        let dealt = creature.take_damage(damage);
        let fainted = !creature.is_alive();
        observer.record(BattleEvent::Attacked {
            side,
            target_slot,
            damage,
            dealt,
            defended: defending[target.index()],
            fainted,
        });
    }

    // Replace fainted actives
    for side in SideId::BOTH {
        let from = battle.active_index(side);
        if let Some(to) = battle.advance_fainted(side) {
            observer.record(BattleEvent::Replaced { side, from, to });
        }
    }
}

/// Applies one turn with no observer. Used by search.
pub fn simulate_turn<R: Rng + ?Sized>(battle: &mut Battle, actions: [Action; 2], rng: &mut R) {
    apply_turn(battle, actions, rng, &mut NullObserver);
}

fn ignore<O: TurnObserver + ?Sized>(observer: &mut O, side: SideId, action: Action, reason: IgnoreReason) {
    observer.record(BattleEvent::ActionIgnored {
        side,
        action,
        reason,
    });
}

fn apply_swap<O: TurnObserver + ?Sized>(battle: &mut Battle, side: SideId, slot: usize, observer: &mut O) {
    let action = Action::Swap(slot);
    let from = battle.active_index(side);

    if slot >= ROSTER_SIZE {
        return ignore(observer, side, action, IgnoreReason::SlotOutOfRange);
    }
    if slot == from {
        return ignore(observer, side, action, IgnoreReason::AlreadyActive);
    }
    let target_alive = battle
        .side(side)
        .creature(slot)
        .is_some_and(crate::entity::Creature::is_alive);
    if !target_alive {
        return ignore(observer, side, action, IgnoreReason::TargetFainted);
    }

    battle.set_active(side, slot);
    observer.record(BattleEvent::Swapped { side, from, to: slot });
}

fn apply_heal<O: TurnObserver + ?Sized>(battle: &mut Battle, side: SideId, tier: PotionTier, observer: &mut O) {
    let action = Action::Heal(tier);

    if battle.side(side).wallet().potions(tier) == 0 {
        return ignore(observer, side, action, IgnoreReason::NoPotion);
    }
    if !battle.active(side).is_alive() {
        return ignore(observer, side, action, IgnoreReason::ActiveFainted);
    }

    let amount = battle.rules().potion(tier).heal;
    battle.side_mut(side).wallet_mut().take_potion(tier);
    let slot = battle.active_index(side);
    let restored = battle.active_mut(side).heal(amount);
    observer.record(BattleEvent::Healed {
        side,
        slot,
        tier,
        restored,
    });
}
