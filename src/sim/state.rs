//! Game state and core simulation types
//!
//! One `GameState` per session, owned by the loop controller.

use serde::{Deserialize, Serialize};

use super::basket::Basket;
use super::collision::CanvasBounds;
use super::object::FallingObject;
use super::scoring::{Difficulty, level_for_score};
use crate::config::GameConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Frozen; ticks are ignored
    Paused,
    /// Out of lives; ticks are ignored until start or reset
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Cosmetic unlocks active this session (no gameplay effect)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosmetics {
    /// Sparkle trail behind falling objects
    pub sparkle_trail: bool,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// May go negative from repeated bomb catches
    pub score: i64,
    pub lives: u32,
    /// Global fall speed for new spawns
    pub speed: f32,
    pub drop_interval_ms: f64,
    /// Timestamp of the last spawn (or of start/resume)
    pub last_spawn_ms: f64,
    /// Timestamp the session entered Running
    pub started_at_ms: f64,
    /// Timestamp of the last accepted tick (or of start/resume)
    pub last_tick_ms: f64,
    /// Ticks processed while Running
    pub frame: u64,
    /// Live objects, in spawn order
    pub objects: Vec<FallingObject>,
    /// Catch score multiplier (non-bomb)
    pub multiplier: u32,
    pub basket: Basket,
    pub cosmetics: Cosmetics,
    pub bounds: CanvasBounds,
    pub difficulty: Difficulty,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh session state in the Idle phase
    pub fn new(config: &GameConfig) -> Self {
        let difficulty = Difficulty::from_config(config);
        Self {
            phase: GamePhase::Idle,
            score: 0,
            lives: config.start_lives,
            speed: config.start_speed,
            drop_interval_ms: difficulty.start_drop_interval_ms,
            last_spawn_ms: 0.0,
            started_at_ms: 0.0,
            last_tick_ms: 0.0,
            frame: 0,
            objects: Vec::new(),
            multiplier: 1,
            basket: Basket::new(config),
            cosmetics: Cosmetics::default(),
            bounds: config.bounds(),
            difficulty,
            next_id: 1,
        }
    }

    /// Current level, derived from score
    pub fn level(&self) -> i64 {
        level_for_score(self.score, self.difficulty.points_per_level)
    }

    /// ID the next allocation will return
    pub fn peek_entity_id(&self) -> u32 {
        self.next_id
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }
}
