//! Battle events and the event log.
//!
//! Every state change made by [`apply_turn`](super::apply_turn) is reported
//! to a [`TurnObserver`](super::TurnObserver) as a [`BattleEvent`]. The
//! [`EventLog`] observer records them for replays, reports and debugging.
//! Search uses a no-op observer so hypothetical turns leave no trace.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::Action;
use crate::entity::{PotionTier, SideId};

use super::TurnObserver;

/// Why an action had no effect.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Swap slot outside the roster
    SlotOutOfRange,
    /// Swap target has fainted
    TargetFainted,
    /// Swap target is already active
    AlreadyActive,
    /// No potion of the requested tier
    NoPotion,
    /// The acting side's active creature has fainted
    ActiveFainted,
    /// The opposing active creature has fainted
    OpponentFainted,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::SlotOutOfRange => "slot out of range",
            Self::TargetFainted => "target fainted",
            Self::AlreadyActive => "already active",
            Self::NoPotion => "no potion",
            Self::ActiveFainted => "active creature fainted",
            Self::OpponentFainted => "opponent fainted",
        };
        f.write_str(text)
    }
}

/// Something that happened during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// A side brought a bench creature forward.
    Swapped {
        /// Acting side
        side: SideId,
        /// Previous active slot
        from: usize,
        /// New active slot
        to: usize,
    },
    /// A side used a potion.
    Healed {
        /// Acting side
        side: SideId,
        /// Slot of the healed creature
        slot: usize,
        /// Potion used
        tier: PotionTier,
        /// HP actually restored
        restored: i32,
    },
    /// A side braced this turn.
    Defended {
        /// Acting side
        side: SideId,
    },
    /// A side hit the opposing active creature.
    Attacked {
        /// Attacking side
        side: SideId,
        /// Slot of the creature that was hit
        target_slot: usize,
        /// Damage after any Defend reduction
        damage: i32,
        /// HP actually removed
        dealt: i32,
        /// Whether the target was defending
        defended: bool,
        /// Whether the hit knocked the target out
        fainted: bool,
    },
    /// A side's fainted active creature was replaced.
    Replaced {
        /// Affected side
        side: SideId,
        /// Fainted slot
        from: usize,
        /// New active slot
        to: usize,
    },
    /// An action was illegal or stale and did nothing.
    ActionIgnored {
        /// Acting side
        side: SideId,
        /// The ignored action
        action: Action,
        /// Why it was ignored
        reason: IgnoreReason,
    },
}

impl BattleEvent {
    /// The side this event concerns.
    #[must_use]
    pub const fn side(&self) -> SideId {
        match self {
            Self::Swapped { side, .. }
            | Self::Healed { side, .. }
            | Self::Defended { side }
            | Self::Attacked { side, .. }
            | Self::Replaced { side, .. }
            | Self::ActionIgnored { side, .. } => *side,
        }
    }

    /// Returns true for [`BattleEvent::ActionIgnored`].
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self, Self::ActionIgnored { .. })
    }
}

/// Observer that records every event in order.
///
/// # Example
///
/// ```
/// use triad_core::resolver::{apply_turn, EventLog};
/// use triad_core::{Action, Battle, Element, RosterConfig, Ruleset};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let rosters = RosterConfig::default();
/// let mut battle = Battle::new(
///     Element::Fire,
///     rosters.a.build(),
///     rosters.b.build(),
///     Ruleset::with_fixed_variance(1.0),
/// );
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let mut log = EventLog::new();
///
/// apply_turn(&mut battle, [Action::Attack, Action::Defend], &mut rng, &mut log);
///
/// let events = log.take_events();
/// assert_eq!(events.len(), 2);
/// assert!(log.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<BattleEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Drains and returns all recorded events in order.
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recorded events.
    #[must_use]
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TurnObserver for EventLog {
    fn record(&mut self, event: BattleEvent) {
        match &event {
            BattleEvent::ActionIgnored {
                side,
                action,
                reason,
            } => {
                tracing::debug!(%side, %action, %reason, "action ignored");
            }
            BattleEvent::Attacked {
                side,
                damage,
                fainted: true,
                ..
            } => {
                tracing::debug!(%side, damage, "knockout");
            }
            _ => {}
        }
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_records_in_order_and_drains() {
        let mut log = EventLog::new();
        log.record(BattleEvent::Defended { side: SideId::A });
        log.record(BattleEvent::ActionIgnored {
            side: SideId::B,
            action: Action::Swap(7),
            reason: IgnoreReason::SlotOutOfRange,
        });

        assert_eq!(log.event_count(), 2);
        assert_eq!(log.events()[0].side(), SideId::A);
        assert!(log.events()[1].is_ignored());

        let drained = log.take_events();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn clear_discards_events() {
        let mut log = EventLog::new();
        log.record(BattleEvent::Defended { side: SideId::B });
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn events_serialize() {
        let event = BattleEvent::Healed {
            side: SideId::A,
            slot: 0,
            tier: PotionTier::Large,
            restored: 42,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: BattleEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn reasons_display() {
        assert_eq!(IgnoreReason::NoPotion.to_string(), "no potion");
    }
}
