//! The player's basket

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Cosmetic basket appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BasketSkin {
    #[default]
    Default,
    Rainbow,
    Golden,
}

impl BasketSkin {
    pub fn as_str(&self) -> &'static str {
        match self {
            BasketSkin::Default => "default",
            BasketSkin::Rainbow => "rainbow",
            BasketSkin::Golden => "golden",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(BasketSkin::Default),
            "rainbow" => Some(BasketSkin::Rainbow),
            "golden" | "gold" => Some(BasketSkin::Golden),
            _ => None,
        }
    }
}

/// Horizontal movement request for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
}

/// Player basket (axis-aligned rectangle, y fixed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per frame for directional input
    pub speed: f32,
    pub skin: BasketSkin,
}

impl Basket {
    /// Centered basket near the canvas bottom
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.canvas_width / 2.0 - config.basket_width / 2.0,
            y: config.canvas_height - config.basket_bottom_offset,
            width: config.basket_width,
            height: config.basket_height,
            speed: config.basket_speed,
            skin: BasketSkin::Default,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Step one frame in a direction, clamped to the canvas
    pub fn step(&mut self, direction: Direction, canvas_width: f32) {
        match direction {
            Direction::None => {}
            Direction::Left => self.x = (self.x - self.speed).max(0.0),
            Direction::Right => self.x = (self.x + self.speed).min(canvas_width - self.width),
        }
    }

    /// Center the basket on a pointer x, clamped to the canvas
    pub fn follow_pointer(&mut self, pointer_x: f32, canvas_width: f32) {
        let max_x = (canvas_width - self.width).max(0.0);
        self.x = (pointer_x - self.width / 2.0).clamp(0.0, max_x);
    }
}
