//! Star Catcher - a falling-object catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, scoring, game loop)
//! - `config`: Data-driven game tuning
//! - `rewards`: Purchase and rewarded-ad grants feeding session modifiers
//! - `ads`: Simulated ad pacing and statistics
//! - `platform`: Browser/native platform abstraction

pub mod ads;
pub mod config;
pub mod platform;
pub mod rewards;
pub mod sim;

pub use ads::{AdKind, AdManager};
pub use config::GameConfig;
pub use rewards::RewardLedger;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Basket defaults - sits near the bottom edge
    pub const BASKET_WIDTH: f32 = 100.0;
    pub const BASKET_HEIGHT: f32 = 20.0;
    /// Distance from the bottom of the canvas to the top of the basket
    pub const BASKET_BOTTOM_OFFSET: f32 = 40.0;
    /// Horizontal pixels per frame while a direction is held
    pub const BASKET_SPEED: f32 = 8.0;

    /// Session start values
    pub const START_LIVES: u32 = 3;
    pub const START_SPEED: f32 = 2.0;
    pub const START_DROP_INTERVAL_MS: f64 = 1000.0;

    /// Drop interval never goes below this
    pub const MIN_DROP_INTERVAL_MS: f64 = 300.0;
    /// Drop interval reduction per level
    pub const DROP_INTERVAL_STEP_MS: f64 = 100.0;
    /// Fall speed gained on each level-up
    pub const SPEED_STEP: f32 = 0.5;
    /// Maximum extra per-object speed added at spawn
    pub const SPEED_JITTER: f32 = 1.0;

    /// Score needed per level
    pub const POINTS_PER_LEVEL: i64 = 100;
    /// Score delta for catching a bomb (multiplier never applies)
    pub const BOMB_PENALTY: i64 = -1;
}
