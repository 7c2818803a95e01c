//! A single combatant.

use serde::{Deserialize, Serialize};

use crate::Element;

/// Default maximum HP for a creature.
pub const DEFAULT_MAX_HP: i32 = 100;
/// Default attack stat.
pub const DEFAULT_ATK: i32 = 22;
/// Default defense stat.
pub const DEFAULT_DEF: i32 = 10;

/// A combatant with an element, HP and stats.
///
/// HP can only change through [`take_damage`](Self::take_damage) and
/// [`heal`](Self::heal). Once HP reaches zero the creature is fainted and
/// stays fainted: healing a fainted creature does nothing.
///
/// # Example
///
/// ```
/// use triad_core::{Creature, Element};
///
/// let mut pika = Creature::new("Pikachu", Element::Electric);
/// pika.take_damage(30);
/// assert_eq!(pika.hp(), 70);
///
/// pika.heal(50);
/// assert_eq!(pika.hp(), 100);
///
/// pika.take_damage(500);
/// assert!(!pika.is_alive());
/// pika.heal(50);
/// assert_eq!(pika.hp(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Creature {
    name: String,
    element: Element,
    max_hp: i32,
    hp: i32,
    atk: i32,
    def: i32,
    alive: bool,
}

impl Creature {
    /// Creates a creature at full HP with the default stats.
    #[must_use]
    pub fn new(name: impl Into<String>, element: Element) -> Self {
        Self::with_stats(name, element, DEFAULT_MAX_HP, DEFAULT_ATK, DEFAULT_DEF)
    }

    /// Creates a creature at full HP with explicit stats.
    ///
    /// A non-positive `max_hp` yields a creature that starts fainted.
    #[must_use]
    pub fn with_stats(
        name: impl Into<String>,
        element: Element,
        max_hp: i32,
        atk: i32,
        def: i32,
    ) -> Self {
        let max_hp = max_hp.max(0);
        Self {
            name: name.into(),
            element,
            max_hp,
            hp: max_hp,
            atk,
            def,
            alive: max_hp > 0,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Elemental type.
    #[must_use]
    pub const fn element(&self) -> Element {
        self.element
    }

    /// Maximum HP.
    #[must_use]
    pub const fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Current HP, always within `0..=max_hp`.
    #[must_use]
    pub const fn hp(&self) -> i32 {
        self.hp
    }

    /// Attack stat.
    #[must_use]
    pub const fn atk(&self) -> i32 {
        self.atk
    }

    /// Defense stat.
    #[must_use]
    pub const fn def(&self) -> i32 {
        self.def
    }

    /// Returns true while HP is above zero.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Returns true if HP is below maximum.
    #[must_use]
    pub const fn is_wounded(&self) -> bool {
        self.hp < self.max_hp
    }

    /// Current HP as a percentage of max HP (`0.0..=100.0`).
    #[must_use]
    pub fn hp_percent(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        f64::from(self.hp) / f64::from(self.max_hp) * 100.0
    }

    /// Applies damage. Returns the HP actually removed.
    ///
    /// No-op on a fainted creature or a non-positive amount.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if !self.alive || amount <= 0 {
            return 0;
        }
        let before = self.hp;
        self.hp = (self.hp - amount).max(0);
        if self.hp == 0 {
            self.alive = false;
        }
        before - self.hp
    }

    /// Restores HP, capped at max HP. Returns the HP actually restored.
    ///
    /// No-op on a fainted creature or a non-positive amount.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.alive || amount <= 0 {
            return 0;
        }
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_uses_default_stats() {
        let c = Creature::new("Charmander", Element::Fire);
        assert_eq!(c.name(), "Charmander");
        assert_eq!(c.element(), Element::Fire);
        assert_eq!(c.max_hp(), 100);
        assert_eq!(c.hp(), 100);
        assert_eq!(c.atk(), 22);
        assert_eq!(c.def(), 10);
        assert!(c.is_alive());
        assert!(!c.is_wounded());
    }

    #[test]
    fn damage_clamps_at_zero_and_faints() {
        let mut c = Creature::new("Squirtle", Element::Water);
        assert_eq!(c.take_damage(150), 100);
        assert_eq!(c.hp(), 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn exact_lethal_damage_faints() {
        let mut c = Creature::new("Squirtle", Element::Water);
        c.take_damage(100);
        assert!(!c.is_alive());
    }

    #[test]
    fn non_positive_amounts_are_ignored() {
        let mut c = Creature::new("Meowth", Element::Electric);
        c.take_damage(40);
        assert_eq!(c.take_damage(0), 0);
        assert_eq!(c.take_damage(-5), 0);
        assert_eq!(c.heal(0), 0);
        assert_eq!(c.heal(-20), 0);
        assert_eq!(c.hp(), 60);
    }

    #[test]
    fn heal_caps_at_max() {
        let mut c = Creature::new("Weezing", Element::Fire);
        c.take_damage(10);
        assert_eq!(c.heal(80), 10);
        assert_eq!(c.hp(), 100);
    }

    #[test]
    fn fainted_creature_is_never_revived() {
        let mut c = Creature::new("Wobbuffet", Element::Water);
        c.take_damage(100);
        assert_eq!(c.heal(80), 0);
        assert_eq!(c.take_damage(10), 0);
        assert_eq!(c.hp(), 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn hp_percent() {
        let mut c = Creature::with_stats("Test", Element::Fire, 80, 10, 10);
        c.take_damage(20);
        assert!((c.hp_percent() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn zero_max_hp_starts_fainted() {
        let c = Creature::with_stats("Husk", Element::Fire, 0, 10, 10);
        assert!(!c.is_alive());
        assert!((c.hp_percent()).abs() < f64::EPSILON);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Damage(i32),
        Heal(i32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-20i32..200).prop_map(Op::Damage),
            (-20i32..200).prop_map(Op::Heal),
        ]
    }

    proptest! {
        #[test]
        fn hp_stays_in_bounds_and_faint_is_permanent(ops in proptest::collection::vec(op(), 0..40)) {
            let mut c = Creature::new("Prop", Element::Electric);
            let mut fainted = false;
            for op in ops {
                match op {
                    Op::Damage(n) => { c.take_damage(n); }
                    Op::Heal(n) => { c.heal(n); }
                }
                prop_assert!(c.hp() >= 0 && c.hp() <= c.max_hp());
                prop_assert_eq!(c.is_alive(), c.hp() > 0);
                if fainted {
                    prop_assert!(!c.is_alive());
                }
                fainted |= !c.is_alive();
            }
        }
    }
}
