//! Data-driven game balance
//!
//! Everything a designer might tweak lives in [`Tuning`]: the tier table,
//! scoring bounds, star thresholds, player and world dimensions, and per-tier
//! item density. `Tuning::default()` is the reference balance; a JSON document
//! can override any section.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while loading or validating a tuning document.
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    /// The JSON document could not be parsed.
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// The tier table is empty.
    #[error("tier table is empty")]
    NoTiers,

    /// Tiers must be numbered 1, 2, 3, ... in order.
    #[error("tier at position {index} is numbered {found}, expected {expected}")]
    NonContiguousTier {
        index: usize,
        expected: u32,
        found: u32,
    },

    /// A tier quota of zero would advance without eating anything.
    #[error("tier {tier} has a zero quota")]
    ZeroQuota { tier: u32 },

    /// Scales must be positive and finite.
    #[error("tier {tier} has non-positive scale {scale}")]
    NonPositiveScale { tier: u32, scale: f32 },

    /// Point bounds must satisfy `1 <= min <= max`.
    #[error("invalid point bounds: min {min}, max {max}")]
    PointBounds { min: u32, max: u32 },

    /// Star thresholds must not decrease from one star to three.
    #[error("star thresholds must be non-decreasing: {one}/{two}/{three}")]
    StarThresholds { one: i64, two: i64, three: i64 },
}

/// One size tier of the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDefinition {
    /// Tier number (1-based, contiguous)
    pub tier: u32,
    /// Items to eat in this tier before advancing
    pub quota: u32,
    /// Multiplier applied to the base player size
    pub scale: f32,
    /// Display name
    pub name: String,
    /// Display color (0xRRGGBB)
    pub color: u32,
}

impl TierDefinition {
    fn new(tier: u32, quota: u32, scale: f32, name: &str, color: u32) -> Self {
        Self {
            tier,
            quota,
            scale,
            name: name.to_string(),
            color,
        }
    }
}

/// Points per item and the hazard penalty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    pub max_points: u32,
    pub min_points: u32,
    pub hazard_penalty: u32,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            max_points: 80,
            min_points: 1,
            hazard_penalty: 80,
        }
    }
}

/// Minimum final score for each star count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarThresholds {
    pub one: i64,
    pub two: i64,
    pub three: i64,
}

impl Default for StarThresholds {
    fn default() -> Self {
        Self {
            one: 500,
            two: 1500,
            three: 3000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Radius at scale 1.0
    pub initial_size: f32,
    /// Movement speed per axis (units/s)
    pub speed: f32,
    /// Mouth distance from center as a fraction of current size
    pub mouth_offset: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            initial_size: PLAYER_INITIAL_SIZE,
            speed: PLAYER_SPEED,
            mouth_offset: MOUTH_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

/// Complete balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub tiers: Vec<TierDefinition>,
    pub scoring: ScoringTuning,
    pub stars: StarThresholds,
    pub player: PlayerTuning,
    pub world: WorldTuning,
    /// Items spawned per tier; also normalizes score decay for that tier
    pub item_density: BTreeMap<u32, u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tiers: vec![
                TierDefinition::new(1, 10, 1.0, "Micro", 0x4CAF50),
                TierDefinition::new(2, 15, 1.5, "Tiny", 0x2196F3),
                TierDefinition::new(3, 20, 2.0, "Small", 0xFF9800),
                TierDefinition::new(4, 25, 2.5, "Medium", 0xF44336),
                TierDefinition::new(5, 30, 3.0, "Large", 0x9C27B0),
            ],
            scoring: ScoringTuning::default(),
            stars: StarThresholds::default(),
            player: PlayerTuning::default(),
            world: WorldTuning::default(),
            item_density: BTreeMap::from([(1, 30), (2, 25), (3, 20), (4, 15), (5, 10)]),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        if let Err(err) = tuning.validate() {
            log::warn!("Rejected tuning: {}", err);
            return Err(err);
        }
        Ok(tuning)
    }

    /// Check the configuration-time contract the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.tiers.is_empty() {
            return Err(TuningError::NoTiers);
        }

        for (index, def) in self.tiers.iter().enumerate() {
            let expected = index as u32 + 1;
            if def.tier != expected {
                return Err(TuningError::NonContiguousTier {
                    index,
                    expected,
                    found: def.tier,
                });
            }
            if def.quota == 0 {
                return Err(TuningError::ZeroQuota { tier: def.tier });
            }
            if !(def.scale.is_finite() && def.scale > 0.0) {
                return Err(TuningError::NonPositiveScale {
                    tier: def.tier,
                    scale: def.scale,
                });
            }
        }

        let ScoringTuning {
            max_points,
            min_points,
            ..
        } = self.scoring;
        if min_points == 0 || min_points > max_points {
            return Err(TuningError::PointBounds {
                min: min_points,
                max: max_points,
            });
        }

        let StarThresholds { one, two, three } = self.stars;
        if one > two || two > three {
            return Err(TuningError::StarThresholds { one, two, three });
        }

        Ok(())
    }

    /// Highest tier (N)
    pub fn max_tier(&self) -> u32 {
        self.tiers.len() as u32
    }

    /// Look up a tier definition (1-based)
    pub fn tier(&self, tier: u32) -> Option<&TierDefinition> {
        let index = tier.checked_sub(1)?;
        self.tiers.get(index as usize)
    }

    /// Quota of a tier. Out-of-range tiers clamp to the nearest configured one.
    pub fn quota(&self, tier: u32) -> u32 {
        self.clamped_tier(tier).map(|t| t.quota).unwrap_or(1)
    }

    /// Scale of a tier. Out-of-range tiers clamp to the nearest configured one.
    pub fn scale(&self, tier: u32) -> f32 {
        self.clamped_tier(tier).map(|t| t.scale).unwrap_or(1.0)
    }

    /// Item density for a tier, falling back to the default for unknown tiers
    pub fn density(&self, tier: u32) -> u32 {
        self.item_density
            .get(&tier)
            .copied()
            .unwrap_or(DEFAULT_TIER_DENSITY)
    }

    /// Player radius at a tier
    pub fn player_size(&self, tier: u32) -> f32 {
        self.player.initial_size * self.scale(tier)
    }

    fn clamped_tier(&self, tier: u32) -> Option<&TierDefinition> {
        let last = self.tiers.len().checked_sub(1)?;
        let index = (tier.max(1) as usize - 1).min(last);
        self.tiers.get(index)
    }
}
