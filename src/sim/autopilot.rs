//! Demo/attract-mode player
//!
//! Chases the lowest star or gem. With nothing worth catching, it steps away
//! from any bomb about to land in the basket.

use std::cmp::Ordering;

use super::object::FallingObject;
use super::state::GameState;
use super::tick::TickInput;

/// How far above the basket a bomb counts as a threat
const BOMB_THREAT_RANGE: f32 = 150.0;

/// Input the autopilot would give this frame
pub fn autopilot_input(state: &GameState) -> TickInput {
    let lowest = |a: &&FallingObject, b: &&FallingObject| {
        a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal)
    };

    let target = state
        .objects
        .iter()
        .filter(|o| !o.category.is_hazard())
        .filter(|o| o.top() < state.basket.bottom())
        .max_by(lowest);

    if let Some(target) = target {
        return TickInput::pointer(target.pos.x);
    }

    let basket = &state.basket;
    let threat = state
        .objects
        .iter()
        .filter(|o| o.category.is_hazard())
        .filter(|o| o.bottom() > basket.y - BOMB_THREAT_RANGE && o.top() < basket.bottom())
        .filter(|o| o.right() > basket.x && o.left() < basket.right())
        .max_by(lowest);

    match threat {
        Some(bomb) if bomb.pos.x < basket.center_x() => TickInput::right(),
        Some(_) => TickInput::left(),
        None => TickInput::default(),
    }
}
