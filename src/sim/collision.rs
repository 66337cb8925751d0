//! Per-frame physics and catch/miss classification
//!
//! Objects are tested as axis-aligned boxes using their radius as half-extent,
//! not as exact circles. Classification is per-object, so the order of the
//! input collection never changes which objects are caught or missed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::basket::Basket;
use super::object::FallingObject;

/// Playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f32,
    pub height: f32,
}

impl CanvasBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Outcome of one physics step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    pub caught: Vec<FallingObject>,
    pub missed: Vec<FallingObject>,
    pub still_falling: Vec<FallingObject>,
}

/// How a single object ended the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Caught,
    Missed,
    Falling,
}

/// Box overlap between an object and the basket (strict, touching edges don't count)
pub fn overlaps_basket(obj: &FallingObject, basket: &Basket) -> bool {
    obj.bottom() > basket.y
        && obj.top() < basket.bottom()
        && obj.right() > basket.x
        && obj.left() < basket.right()
}

/// True once the object's top edge is below the canvas
pub fn is_out_of_bounds(obj: &FallingObject, bounds: &CanvasBounds) -> bool {
    obj.top() > bounds.height
}

/// Classify an already-moved object. Catch wins over miss.
pub fn classify(obj: &FallingObject, basket: &Basket, bounds: &CanvasBounds) -> Classification {
    if overlaps_basket(obj, basket) {
        Classification::Caught
    } else if is_out_of_bounds(obj, bounds) {
        Classification::Missed
    } else {
        Classification::Falling
    }
}

/// Move every object one frame and partition them by outcome
///
/// Takes ownership of the live collection; surviving objects come back in
/// `still_falling` in their original order.
pub fn advance(objects: Vec<FallingObject>, basket: &Basket, bounds: &CanvasBounds) -> StepOutcome {
    let mut outcome = StepOutcome {
        still_falling: Vec::with_capacity(objects.len()),
        ..Default::default()
    };

    for mut obj in objects {
        obj.fall();
        match classify(&obj, basket, bounds) {
            Classification::Caught => outcome.caught.push(obj),
            Classification::Missed => outcome.missed.push(obj),
            Classification::Falling => outcome.still_falling.push(obj),
        }
    }

    outcome
}
