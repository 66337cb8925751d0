//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timestamps are passed in, never read
//! - Random draws come from an injected `UnitSource`
//! - Stable iteration order (spawn order, by entity ID)
//! - No rendering, storage or ad dependencies

pub mod autopilot;
pub mod basket;
pub mod collision;
pub mod modifiers;
pub mod object;
pub mod rng;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use basket::{Basket, BasketSkin, Direction};
pub use collision::{CanvasBounds, Classification, StepOutcome, advance, classify};
pub use modifiers::{Cosmetic, Purchase, RewardModifier, apply_modifiers};
pub use object::{CategoryInfo, FallingObject, ObjectCategory};
pub use rng::{ScriptedDraws, UnitSource, seeded};
pub use scoring::{
    Difficulty, ScoreEvent, ScoreEventKind, level_for_score, level_up_event, resolve_catch,
    resolve_miss,
};
pub use spawner::{SpawnParams, SpawnTable, Spawner};
pub use state::{Cosmetics, GamePhase, GameState};
pub use tick::{FinalResult, Game, TickInput, TickReport, tick};
