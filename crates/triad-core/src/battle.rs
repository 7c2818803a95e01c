//! Battle: the complete mutable state of one duel.
//!
//! A [`Battle`] bundles the [`BattleState`] (field element and active slots),
//! both [`Side`]s and the [`Ruleset`]. It is a plain value: `Clone` yields a
//! fully independent copy with no shared or interior-mutable data, which is
//! what lets the search engine explore hypothetical turns on private copies.
//!
//! # Example
//!
//! ```
//! use triad_core::{Battle, Element, Ruleset, RosterConfig, SideId};
//!
//! let rosters = RosterConfig::default();
//! let battle = Battle::new(
//!     Element::Water,
//!     rosters.a.build(),
//!     rosters.b.build(),
//!     Ruleset::default(),
//! );
//!
//! assert_eq!(battle.active(SideId::A).name(), "Pikachu");
//! assert_eq!(battle.active(SideId::B).name(), "Meowth");
//! assert!(!battle.is_over());
//! ```

use serde::{Deserialize, Serialize};

use crate::config::Ruleset;
use crate::entity::{Creature, Side, SideId, ROSTER_SIZE};
use crate::Element;

/// Field element and active roster slots.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleState {
    /// Element of the battlefield, fixed for the whole battle
    pub field: Element,
    /// Active roster slot per side, indexed by [`SideId::index`]
    pub active: [usize; 2],
}

impl BattleState {
    /// Active slot of a side.
    #[must_use]
    pub const fn active(&self, side: SideId) -> usize {
        self.active[side.index()]
    }
}

/// The full state of a duel between two sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    state: BattleState,
    sides: [Side; 2],
    rules: Ruleset,
}

impl Battle {
    /// Starts a battle with each side's first living creature active.
    #[must_use]
    pub fn new(field: Element, a: Side, b: Side, rules: Ruleset) -> Self {
        let active = [a.first_alive().unwrap_or(0), b.first_alive().unwrap_or(0)];
        Self {
            state: BattleState { field, active },
            sides: [a, b],
            rules,
        }
    }

    /// Field element and active slots.
    #[must_use]
    pub const fn state(&self) -> &BattleState {
        &self.state
    }

    /// Field element.
    #[must_use]
    pub const fn field(&self) -> Element {
        self.state.field
    }

    /// Damage model and potion table.
    #[must_use]
    pub const fn rules(&self) -> &Ruleset {
        &self.rules
    }

    /// One side.
    #[must_use]
    pub const fn side(&self, id: SideId) -> &Side {
        &self.sides[id.index()]
    }

    /// One side, mutably.
    pub fn side_mut(&mut self, id: SideId) -> &mut Side {
        &mut self.sides[id.index()]
    }

    /// Both sides, A first.
    #[must_use]
    pub const fn sides(&self) -> &[Side; 2] {
        &self.sides
    }

    /// Active roster slot of a side.
    #[must_use]
    pub const fn active_index(&self, id: SideId) -> usize {
        self.state.active(id)
    }

    /// Active creature of a side.
    #[must_use]
    pub fn active(&self, id: SideId) -> &Creature {
        &self.side(id).roster()[self.active_index(id)]
    }

    /// Active creature of a side, mutably.
    pub fn active_mut(&mut self, id: SideId) -> &mut Creature {
        let slot = self.active_index(id);
        // Slot is always < ROSTER_SIZE, see set_active
        let side = &mut self.sides[id.index()];
        side.creature_mut(slot)
            .unwrap_or_else(|| unreachable!("active slot {slot} out of range"))
    }

    /// Sets the active slot of a side. Returns false if the slot is out of range.
    ///
    /// Liveness is not checked here; swap legality is decided by the resolver.
    pub fn set_active(&mut self, id: SideId, slot: usize) -> bool {
        if slot >= ROSTER_SIZE {
            return false;
        }
        self.state.active[id.index()] = slot;
        true
    }

    /// If the active creature of a side has fainted, activates the first living
    /// creature in roster order.
    ///
    /// Returns the new slot when the active slot changed.
    pub fn advance_fainted(&mut self, id: SideId) -> Option<usize> {
        if self.active(id).is_alive() {
            return None;
        }
        let next = self.side(id).first_alive()?;
        self.state.active[id.index()] = next;
        Some(next)
    }

    /// Returns true once either side has no living creature.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.sides.iter().any(Side::is_defeated)
    }

    /// The side that won by knockout, if exactly one side is defeated.
    #[must_use]
    pub fn knockout_winner(&self) -> Option<SideId> {
        match (self.side(SideId::A).is_defeated(), self.side(SideId::B).is_defeated()) {
            (false, true) => Some(SideId::A),
            (true, false) => Some(SideId::B),
            _ => None,
        }
    }

    /// Total HP of a side.
    #[must_use]
    pub fn total_hp(&self, id: SideId) -> i64 {
        self.side(id).total_hp()
    }

    /// Living creatures of a side.
    #[must_use]
    pub fn alive_count(&self, id: SideId) -> usize {
        self.side(id).alive_count()
    }
}
