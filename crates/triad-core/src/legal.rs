//! Legal-action generator.
//!
//! Prunes the action space to a small, context-sensitive candidate set using
//! the [`fuzzy`](crate::fuzzy) evaluator. Live play and search call the same
//! function, so the search never considers an action the live side could not
//! take and vice versa.

use crate::action::{Action, ActionSet};
use crate::battle::Battle;
use crate::config::Ruleset;
use crate::entity::{Creature, Side, SideId};
use crate::fuzzy;

/// Candidate actions for `side` in the current battle.
///
/// See [`legal_actions_for`] for the rules.
#[must_use]
pub fn legal_actions(battle: &Battle, side: SideId) -> ActionSet {
    legal_actions_for(
        battle.side(side),
        battle.active_index(side),
        battle.active(side.other()),
        battle.rules(),
    )
}

/// Candidate actions for a side given its active slot and the opposing active
/// creature.
///
/// - `Attack` and `Defend` are always present.
/// - At most one `Swap`: the first living bench creature (roster order) whose
///   element beats the opponent's, admitted when swap confidence clears
///   [`fuzzy::SWAP_THRESHOLD`].
/// - At most one `Heal`: the owned tier with the largest heal, admitted when
///   the active creature is wounded and heal confidence clears
///   [`fuzzy::HEAL_THRESHOLD`].
///
/// Order is Attack, Defend, then Swap and Heal when present.
#[must_use]
pub fn legal_actions_for(
    side: &Side,
    active: usize,
    opponent: &Creature,
    rules: &Ruleset,
) -> ActionSet {
    let mut actions = ActionSet::new();
    actions.push(Action::Attack);
    actions.push(Action::Defend);

    let Some(current) = side.creature(active) else {
        return actions;
    };
    let own_pct = current.hp_percent();

    let swap_slot = side
        .roster()
        .iter()
        .enumerate()
        .find(|(slot, c)| {
            *slot != active && c.is_alive() && c.element().has_advantage_over(opponent.element())
        })
        .map(|(slot, _)| slot);

    if let Some(slot) = swap_slot {
        if fuzzy::swap_eligible(true, own_pct) {
            actions.push(Action::Swap(slot));
        }
    }

    let wallet = side.wallet();
    if wallet.has_potion() && current.is_wounded() {
        if let Some(tier) = wallet.best_potion(rules) {
            if fuzzy::heal_eligible(own_pct, true, opponent.hp_percent()) {
                actions.push(Action::Heal(tier));
            }
        }
    }

    actions
}
