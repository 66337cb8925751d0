//! Game tuning configuration
//!
//! Every field falls back to the defaults in [`crate::consts`] when missing,
//! so a partial JSON document is a valid config.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::CanvasBounds;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Basket ===
    pub basket_width: f32,
    pub basket_height: f32,
    /// Distance from the canvas bottom to the basket top
    pub basket_bottom_offset: f32,
    /// Pixels per frame for directional input
    pub basket_speed: f32,

    // === Session start ===
    pub start_lives: u32,
    pub start_speed: f32,
    pub start_drop_interval_ms: f64,

    // === Difficulty ===
    pub min_drop_interval_ms: f64,
    pub drop_interval_step_ms: f64,
    pub speed_step: f32,
    pub speed_jitter: f32,
    pub points_per_level: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            basket_width: BASKET_WIDTH,
            basket_height: BASKET_HEIGHT,
            basket_bottom_offset: BASKET_BOTTOM_OFFSET,
            basket_speed: BASKET_SPEED,

            start_lives: START_LIVES,
            start_speed: START_SPEED,
            start_drop_interval_ms: START_DROP_INTERVAL_MS,

            min_drop_interval_ms: MIN_DROP_INTERVAL_MS,
            drop_interval_step_ms: DROP_INTERVAL_STEP_MS,
            speed_step: SPEED_STEP,
            speed_jitter: SPEED_JITTER,
            points_per_level: POINTS_PER_LEVEL,
        }
    }
}

impl GameConfig {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "star_catcher_config";

    /// Canvas bounds used by the collision step
    pub fn bounds(&self) -> CanvasBounds {
        CanvasBounds::new(self.canvas_width, self.canvas_height)
    }

    /// Parse a config from JSON, then sanitize it
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Parse a config from JSON, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid game config ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.canvas_width > 0.0) || !(self.canvas_height > 0.0) {
            self.canvas_width = defaults.canvas_width;
            self.canvas_height = defaults.canvas_height;
        }
        if !(self.basket_width > 0.0) || self.basket_width > self.canvas_width {
            self.basket_width = defaults.basket_width.min(self.canvas_width);
        }
        if !(self.basket_height > 0.0) {
            self.basket_height = defaults.basket_height;
        }
        if !(self.basket_speed >= 0.0) {
            self.basket_speed = defaults.basket_speed;
        }
        if !(self.start_speed >= 0.0) {
            self.start_speed = defaults.start_speed;
        }
        if !(self.speed_jitter >= 0.0) {
            self.speed_jitter = defaults.speed_jitter;
        }
        if !(self.speed_step >= 0.0) {
            self.speed_step = defaults.speed_step;
        }
        if !(self.drop_interval_step_ms >= 0.0) {
            self.drop_interval_step_ms = defaults.drop_interval_step_ms;
        }
        if self.points_per_level <= 0 {
            self.points_per_level = defaults.points_per_level;
        }
        if self.start_lives == 0 {
            self.start_lives = defaults.start_lives;
        }
        // Floor must sit at or below the starting interval
        if !(self.min_drop_interval_ms > 0.0) {
            self.min_drop_interval_ms = defaults.min_drop_interval_ms;
        }
        if !(self.start_drop_interval_ms >= self.min_drop_interval_ms) {
            self.start_drop_interval_ms = self.min_drop_interval_ms.max(defaults.start_drop_interval_ms);
        }

        self
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        use crate::platform::{KeyValueStore, LocalStore};

        match LocalStore.get(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded game config from LocalStorage");
                Self::from_json_or_default(&json)
            }
            None => {
                log::info!("Using default game config");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
