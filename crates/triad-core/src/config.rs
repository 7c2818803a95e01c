//! Battle rules and roster configuration.
//!
//! All tunable constants of the combat model live here as plain `serde`
//! structs with `Default` impls. Match-level settings that belong to a single
//! phase live next to that phase ([`DuelConfig`](crate::DuelConfig),
//! [`GatheringConfig`](crate::GatheringConfig), [`Economy`](crate::Economy))
//! and are bundled by [`MatchConfig`](crate::MatchConfig).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entity::{Creature, PotionTier, Side, ROSTER_SIZE};
use crate::error::ConfigError;
use crate::Element;

// =============================================================================
// Potions
// =============================================================================

/// Heal amount and shop price of one potion tier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PotionSpec {
    /// HP restored
    pub heal: i32,
    /// Price in coins
    pub price: u32,
}

impl PotionSpec {
    /// Creates a potion spec.
    #[must_use]
    pub const fn new(heal: i32, price: u32) -> Self {
        Self { heal, price }
    }
}

// =============================================================================
// Variance
// =============================================================================

/// Random damage factor applied to every attack.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Variance {
    /// Uniform factor in `[low, high)`, one draw per attack.
    Uniform {
        /// Lower bound
        low: f64,
        /// Upper bound
        high: f64,
    },
    /// Constant factor; consumes no randomness.
    Fixed {
        /// Factor applied to every attack
        factor: f64,
    },
}

impl Default for Variance {
    fn default() -> Self {
        Self::Uniform {
            low: 0.8,
            high: 1.2,
        }
    }
}

impl Variance {
    /// No variance at all.
    pub const NONE: Self = Self::Fixed { factor: 1.0 };

    /// Draws a factor.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Uniform { low, high } => low + (high - low) * rng.gen::<f64>(),
            Self::Fixed { factor } => factor,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Uniform { low, high } => {
                if low.is_finite() && high.is_finite() && low > 0.0 && low <= high {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidVariance { low, high })
                }
            }
            Self::Fixed { factor } => {
                if factor.is_finite() && factor > 0.0 {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidVariance {
                        low: factor,
                        high: factor,
                    })
                }
            }
        }
    }
}

// =============================================================================
// Ruleset
// =============================================================================

/// Damage model and potion table shared by both sides.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ruleset {
    /// Multiplier when the attacker's element beats the defender's
    pub type_advantage: f64,
    /// Multiplier when the attacker's element matches the field
    pub field_boost: f64,
    /// Floor on base damage before multipliers
    pub min_damage: i32,
    /// Random damage factor
    pub variance: Variance,
    /// Potion table indexed by [`PotionTier::index`]
    pub potions: [PotionSpec; 3],
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            type_advantage: 1.3,
            field_boost: 1.2,
            min_damage: 5,
            variance: Variance::default(),
            potions: [
                PotionSpec::new(25, 15),
                PotionSpec::new(50, 30),
                PotionSpec::new(80, 50),
            ],
        }
    }
}

impl Ruleset {
    /// Default rules with a constant variance factor, for reproducible tests.
    #[must_use]
    pub fn with_fixed_variance(factor: f64) -> Self {
        Self {
            variance: Variance::Fixed { factor },
            ..Self::default()
        }
    }

    /// Heal amount and price of a tier.
    #[must_use]
    pub const fn potion(&self, tier: PotionTier) -> PotionSpec {
        self.potions[tier.index()]
    }

    /// Checks multipliers, variance and the potion table.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("type_advantage", self.type_advantage),
            ("field_boost", self.field_boost),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidMultiplier { name, value });
            }
        }
        self.variance.validate()?;
        for tier in PotionTier::ALL {
            let spec = self.potion(tier);
            if spec.heal <= 0 || spec.price == 0 {
                return Err(ConfigError::InvalidPotion {
                    tier: tier.to_string(),
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Rosters
// =============================================================================

/// Blueprint for one creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureSpec {
    /// Display name
    pub name: String,
    /// Elemental type
    pub element: Element,
    /// Maximum HP
    #[serde(default = "default_max_hp")]
    pub max_hp: i32,
    /// Attack stat
    #[serde(default = "default_atk")]
    pub atk: i32,
    /// Defense stat
    #[serde(default = "default_def")]
    pub def: i32,
}

fn default_max_hp() -> i32 {
    crate::entity::creature::DEFAULT_MAX_HP
}

fn default_atk() -> i32 {
    crate::entity::creature::DEFAULT_ATK
}

fn default_def() -> i32 {
    crate::entity::creature::DEFAULT_DEF
}

impl CreatureSpec {
    /// Spec with default stats.
    #[must_use]
    pub fn new(name: impl Into<String>, element: Element) -> Self {
        Self {
            name: name.into(),
            element,
            max_hp: default_max_hp(),
            atk: default_atk(),
            def: default_def(),
        }
    }

    /// Builds a full-HP creature.
    #[must_use]
    pub fn build(&self) -> Creature {
        Creature::with_stats(&self.name, self.element, self.max_hp, self.atk, self.def)
    }
}

/// Blueprint for one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideSpec {
    /// Trainer name
    pub name: String,
    /// Exactly three creatures, in roster order
    pub creatures: [CreatureSpec; ROSTER_SIZE],
}

impl SideSpec {
    /// Builds a side with an empty wallet.
    #[must_use]
    pub fn build(&self) -> Side {
        Side::new(
            &self.name,
            [
                self.creatures[0].build(),
                self.creatures[1].build(),
                self.creatures[2].build(),
            ],
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let reject = |reason: String| ConfigError::InvalidRoster {
            side: self.name.clone(),
            reason,
        };
        if self.name.trim().is_empty() {
            return Err(reject("trainer name is empty".into()));
        }
        for spec in &self.creatures {
            if spec.max_hp <= 0 {
                return Err(reject(format!("{} has non-positive max_hp", spec.name)));
            }
            if spec.atk < 0 || spec.def < 0 {
                return Err(reject(format!("{} has negative stats", spec.name)));
            }
        }
        Ok(())
    }
}

/// The two rosters of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Side A
    pub a: SideSpec,
    /// Side B
    pub b: SideSpec,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            a: SideSpec {
                name: "Ash".into(),
                creatures: [
                    CreatureSpec::new("Pikachu", Element::Electric),
                    CreatureSpec::new("Charmander", Element::Fire),
                    CreatureSpec::new("Squirtle", Element::Water),
                ],
            },
            b: SideSpec {
                name: "Team Rocket".into(),
                creatures: [
                    CreatureSpec::new("Meowth", Element::Electric),
                    CreatureSpec::new("Weezing", Element::Fire),
                    CreatureSpec::new("Wobbuffet", Element::Water),
                ],
            },
        }
    }
}

impl RosterConfig {
    /// Checks both rosters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRoster`] for empty names or bad stats.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.a.validate()?;
        self.b.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    mod variance_tests {
        use super::*;

        #[test]
        fn fixed_returns_factor() {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            assert!((Variance::Fixed { factor: 0.9 }.sample(&mut rng) - 0.9).abs() < f64::EPSILON);
        }

        #[test]
        fn uniform_stays_in_range() {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let v = Variance::default();
            for _ in 0..1_000 {
                let f = v.sample(&mut rng);
                assert!(f >= 0.8 && f <= 1.2 + 1e-12, "factor {f} out of range");
            }
        }

        #[test]
        fn inverted_range_is_rejected() {
            let v = Variance::Uniform {
                low: 1.2,
                high: 0.8,
            };
            assert!(v.validate().is_err());
        }
    }

    mod ruleset_tests {
        use super::*;

        #[test]
        fn defaults_match_potion_table() {
            let rules = Ruleset::default();
            assert_eq!(rules.potion(PotionTier::Small), PotionSpec::new(25, 15));
            assert_eq!(rules.potion(PotionTier::Medium), PotionSpec::new(50, 30));
            assert_eq!(rules.potion(PotionTier::Large), PotionSpec::new(80, 50));
            assert!(rules.validate().is_ok());
        }

        #[test]
        fn zero_price_potion_is_rejected() {
            let mut rules = Ruleset::default();
            rules.potions[1].price = 0;
            assert_eq!(
                rules.validate(),
                Err(ConfigError::InvalidPotion {
                    tier: "Medium".into()
                })
            );
        }

        #[test]
        fn negative_multiplier_is_rejected() {
            let rules = Ruleset {
                field_boost: -1.0,
                ..Ruleset::default()
            };
            assert!(matches!(
                rules.validate(),
                Err(ConfigError::InvalidMultiplier {
                    name: "field_boost",
                    ..
                })
            ));
        }

        #[test]
        fn partial_json_uses_defaults() {
            let rules: Ruleset =
                serde_json::from_str(r#"{"variance": {"kind": "fixed", "factor": 1.0}}"#).unwrap();
            assert_eq!(rules.variance, Variance::NONE);
            assert!((rules.type_advantage - 1.3).abs() < f64::EPSILON);
        }
    }

    mod roster_tests {
        use super::*;

        #[test]
        fn default_rosters_cover_every_element() {
            let rosters = RosterConfig::default();
            for spec in [&rosters.a, &rosters.b] {
                for element in Element::ALL {
                    assert!(spec.creatures.iter().any(|c| c.element == element));
                }
            }
            assert!(rosters.validate().is_ok());
        }

        #[test]
        fn build_produces_full_hp_side() {
            let side = RosterConfig::default().a.build();
            assert_eq!(side.name(), "Ash");
            assert_eq!(side.total_hp(), 300);
            assert_eq!(side.creature(0).unwrap().name(), "Pikachu");
        }

        #[test]
        fn stats_default_when_omitted() {
            let spec: CreatureSpec =
                serde_json::from_str(r#"{"name": "Eevee", "element": "Water"}"#).unwrap();
            assert_eq!(spec, CreatureSpec::new("Eevee", Element::Water));
        }

        #[test]
        fn non_positive_hp_is_rejected() {
            let mut rosters = RosterConfig::default();
            rosters.b.creatures[2].max_hp = 0;
            assert!(matches!(
                rosters.validate(),
                Err(ConfigError::InvalidRoster { .. })
            ));
        }
    }
}
