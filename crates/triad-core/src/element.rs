//! Elemental types and the advantage cycle.
//!
//! Every creature and every battlefield has one [`Element`]. The three
//! elements form a directed cycle where each beats exactly one other:
//!
//! ```text
//! Fire ──beats──▶ Electric ──beats──▶ Water ──beats──▶ Fire
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Elemental type of a creature or battlefield.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    /// Beats Electric
    Fire,
    /// Beats Water
    Electric,
    /// Beats Fire
    Water,
}

impl Element {
    /// All elements in declaration order.
    pub const ALL: [Self; 3] = [Self::Fire, Self::Electric, Self::Water];

    /// The element this one has an advantage over.
    ///
    /// # Example
    ///
    /// ```
    /// use triad_core::Element;
    ///
    /// assert_eq!(Element::Fire.beats(), Element::Electric);
    /// assert_eq!(Element::Water.beats(), Element::Fire);
    /// ```
    #[must_use]
    pub const fn beats(self) -> Self {
        match self {
            Self::Fire => Self::Electric,
            Self::Electric => Self::Water,
            Self::Water => Self::Fire,
        }
    }

    /// Returns true if `self` has the type advantage over `other`.
    #[must_use]
    pub fn has_advantage_over(self, other: Self) -> bool {
        self.beats() == other
    }

    /// Picks an element uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fire => write!(f, "Fire"),
            Self::Electric => write!(f, "Electric"),
            Self::Water => write!(f, "Water"),
        }
    }
}
