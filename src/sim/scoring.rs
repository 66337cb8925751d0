//! Scoring, lives, and level progression
//!
//! Level is always derived from score. A catch that raises the level over
//! its value just before the catch speeds up the game and shortens the drop
//! interval; only objects spawned afterwards see the change.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::object::{FallingObject, ObjectCategory};
use super::state::GameState;
use crate::config::GameConfig;
use crate::consts::BOMB_PENALTY;

/// Difficulty tuning copied into each session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub points_per_level: i64,
    pub start_drop_interval_ms: f64,
    pub min_drop_interval_ms: f64,
    pub drop_interval_step_ms: f64,
    pub speed_step: f32,
    pub speed_jitter: f32,
}

impl Difficulty {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            points_per_level: config.points_per_level,
            start_drop_interval_ms: config.start_drop_interval_ms,
            min_drop_interval_ms: config.min_drop_interval_ms,
            drop_interval_step_ms: config.drop_interval_step_ms,
            speed_step: config.speed_step,
            speed_jitter: config.speed_jitter,
        }
    }

    /// Drop interval for a level, never below the floor
    pub fn drop_interval_for_level(&self, level: i64) -> f64 {
        let steps = (level - 1).max(0) as f64;
        (self.start_drop_interval_ms - steps * self.drop_interval_step_ms).max(self.min_drop_interval_ms)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// `floor(score / points_per_level) + 1`, flooring toward negative infinity
pub fn level_for_score(score: i64, points_per_level: i64) -> i64 {
    score.div_euclid(points_per_level) + 1
}

/// What happened to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreEventKind {
    /// Star or gem caught
    Catch,
    /// Bomb caught
    BombHit,
    /// Star or gem fell off-screen
    Miss,
    /// A catch raised the level
    LevelUp,
}

/// Visual feedback for the shell; carries no gameplay effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub kind: ScoreEventKind,
    pub object_id: u32,
    pub category: ObjectCategory,
    /// Score change applied
    pub delta: i64,
    /// Lives change applied (0 or -1)
    pub lives_delta: i32,
    /// Where the effect should appear
    pub pos: Vec2,
    /// Floating text to draw
    pub text: String,
    /// New level if this catch raised the level
    pub level_up: Option<i64>,
}

/// Score delta for catching an object
pub fn catch_delta(category: ObjectCategory, multiplier: u32) -> i64 {
    match category {
        ObjectCategory::Bomb => BOMB_PENALTY,
        ObjectCategory::Star | ObjectCategory::Gem => category.base_score() * multiplier as i64,
    }
}

/// Apply a caught object to the state
pub fn resolve_catch(obj: &FallingObject, state: &mut GameState) -> ScoreEvent {
    let delta = catch_delta(obj.category, state.multiplier);
    let previous_level = state.level();
    state.score += delta;

    let (kind, lives_delta, text) = match obj.category {
        ObjectCategory::Bomb => {
            state.lives = state.lives.saturating_sub(1);
            (ScoreEventKind::BombHit, -1, "💥".to_string())
        }
        ObjectCategory::Star | ObjectCategory::Gem => {
            (ScoreEventKind::Catch, 0, format!("+{}", delta))
        }
    };

    let level_up = apply_progression(state, previous_level);

    ScoreEvent {
        kind,
        object_id: obj.id,
        category: obj.category,
        delta,
        lives_delta,
        pos: obj.pos,
        text,
        level_up,
    }
}

/// Banner event for a level-up, centred on the canvas
///
/// Carries the id and category of the catch that triggered it.
pub fn level_up_event(trigger: &ScoreEvent, level: i64, center: Vec2) -> ScoreEvent {
    ScoreEvent {
        kind: ScoreEventKind::LevelUp,
        object_id: trigger.object_id,
        category: trigger.category,
        delta: 0,
        lives_delta: 0,
        pos: center,
        text: format!("Level {}!", level),
        level_up: Some(level),
    }
}

/// Apply an object that fell off-screen. Bombs are free to miss.
pub fn resolve_miss(obj: &FallingObject, state: &mut GameState) -> Option<ScoreEvent> {
    match obj.category {
        ObjectCategory::Bomb => None,
        ObjectCategory::Star | ObjectCategory::Gem => {
            state.lives = state.lives.saturating_sub(1);
            Some(ScoreEvent {
                kind: ScoreEventKind::Miss,
                object_id: obj.id,
                category: obj.category,
                delta: 0,
                lives_delta: -1,
                pos: obj.pos,
                text: "💔".to_string(),
                level_up: None,
            })
        }
    }
}

/// Raise difficulty if the level went up from `previous_level`
///
/// A level lost to a bomb and then regained levels up again.
fn apply_progression(state: &mut GameState, previous_level: i64) -> Option<i64> {
    let level = state.level();
    if level <= previous_level {
        return None;
    }

    state.speed += state.difficulty.speed_step;
    state.drop_interval_ms = state.difficulty.drop_interval_for_level(level);
    log::info!(
        "Level {}! speed={:.1} drop_interval={}ms",
        level,
        state.speed,
        state.drop_interval_ms
    );
    Some(level)
}
