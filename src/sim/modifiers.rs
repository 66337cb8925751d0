//! Externally granted session modifiers
//!
//! Purchases and rewarded-ad grants reach the core only as a `RewardModifier`
//! value applied once when a session starts.

use serde::{Deserialize, Serialize};

use super::basket::BasketSkin;
use super::state::GameState;

/// Cosmetic unlock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cosmetic {
    RainbowBasket,
    GoldenBasket,
    SparkleTrail,
}

/// Permanent purchase, identified by its store id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purchase {
    DoubleScore,
    RainbowBasket,
    SparkleTrail,
}

impl Purchase {
    /// Map a persisted purchase id (legacy aliases included)
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "powerup_double" | "powerup" => Some(Purchase::DoubleScore),
            "skin_rainbow" | "skin1" => Some(Purchase::RainbowBasket),
            "skin_sparkle" | "skin2" => Some(Purchase::SparkleTrail),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Purchase::DoubleScore => "powerup_double",
            Purchase::RainbowBasket => "skin_rainbow",
            Purchase::SparkleTrail => "skin_sparkle",
        }
    }
}

/// Session modifier from purchases and rewards
///
/// Missing fields default to neutral values (x1, no bonus lives, no cosmetics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardModifier {
    /// Score multiplier for non-bomb catches (0 is treated as 1)
    pub multiplier: u32,
    pub bonus_lives: u32,
    pub cosmetics: Vec<Cosmetic>,
    /// Unix time (ms) the grant was made, if it came from a reward
    pub granted_at_ms: Option<f64>,
}

impl Default for RewardModifier {
    fn default() -> Self {
        Self::neutral()
    }
}

impl RewardModifier {
    /// Bonus lives granted by a rewarded ad
    pub const REWARD_BONUS_LIVES: u32 = 3;
    /// Multiplier granted by double-score purchases and rewards
    pub const DOUBLE_SCORE: u32 = 2;

    pub fn neutral() -> Self {
        Self {
            multiplier: 1,
            bonus_lives: 0,
            cosmetics: Vec::new(),
            granted_at_ms: None,
        }
    }

    /// Grant from a completed rewarded ad
    pub fn rewarded_ad(granted_at_ms: f64) -> Self {
        Self {
            multiplier: Self::DOUBLE_SCORE,
            bonus_lives: Self::REWARD_BONUS_LIVES,
            cosmetics: vec![Cosmetic::GoldenBasket],
            granted_at_ms: Some(granted_at_ms),
        }
    }

    /// Modifier from permanent purchases
    pub fn from_purchases<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut modifier = Self::neutral();
        for id in ids {
            match Purchase::from_id(id) {
                Some(Purchase::DoubleScore) => modifier.multiplier = Self::DOUBLE_SCORE,
                Some(Purchase::RainbowBasket) => modifier.push_cosmetic(Cosmetic::RainbowBasket),
                Some(Purchase::SparkleTrail) => modifier.push_cosmetic(Cosmetic::SparkleTrail),
                None => log::debug!("Ignoring unknown purchase id '{}'", id),
            }
        }
        modifier
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Parse a modifier, treating malformed input as neutral
    pub fn from_json_or_neutral(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Invalid reward modifier ({}), using neutral", e);
                Self::neutral()
            }
        }
    }

    pub fn sanitized(mut self) -> Self {
        if self.multiplier == 0 {
            self.multiplier = 1;
        }
        self
    }

    /// Combine two modifiers: highest multiplier, summed lives, union of cosmetics
    pub fn merge(mut self, other: &RewardModifier) -> Self {
        self.multiplier = self.multiplier.max(other.multiplier);
        self.bonus_lives = self.bonus_lives.saturating_add(other.bonus_lives);
        for &c in &other.cosmetics {
            self.push_cosmetic(c);
        }
        self.granted_at_ms = match (self.granted_at_ms, other.granted_at_ms) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self
    }

    pub fn is_neutral(&self) -> bool {
        self.multiplier <= 1 && self.bonus_lives == 0 && self.cosmetics.is_empty()
    }

    fn push_cosmetic(&mut self, cosmetic: Cosmetic) {
        if !self.cosmetics.contains(&cosmetic) {
            self.cosmetics.push(cosmetic);
        }
    }
}

/// Apply a modifier to a freshly initialized state
///
/// Golden outranks rainbow when both skins are unlocked.
pub fn apply_modifiers(mut base: GameState, modifiers: &RewardModifier) -> GameState {
    let modifiers = modifiers.clone().sanitized();

    base.multiplier = base.multiplier.max(modifiers.multiplier);
    base.lives = base.lives.saturating_add(modifiers.bonus_lives);

    for cosmetic in &modifiers.cosmetics {
        match cosmetic {
            Cosmetic::GoldenBasket => base.basket.skin = BasketSkin::Golden,
            Cosmetic::RainbowBasket => {
                if base.basket.skin != BasketSkin::Golden {
                    base.basket.skin = BasketSkin::Rainbow;
                }
            }
            Cosmetic::SparkleTrail => base.cosmetics.sparkle_trail = true,
        }
    }

    base
}
