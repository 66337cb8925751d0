//! Falling object categories and entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Kind of falling object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectCategory {
    Star,
    Gem,
    Bomb,
}

/// Static per-category attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryInfo {
    /// Spawn probability (all categories sum to 1.0)
    pub spawn_weight: f32,
    /// Score awarded on catch before the multiplier
    pub base_score: i64,
    pub radius: f32,
    /// Display tag for the shell
    pub tag: &'static str,
    /// Fill color for the shell
    pub color: &'static str,
}

const STAR: CategoryInfo = CategoryInfo {
    spawn_weight: 0.6,
    base_score: 10,
    radius: 12.0,
    tag: "⭐",
    color: "#FFD700",
};

const GEM: CategoryInfo = CategoryInfo {
    spawn_weight: 0.3,
    base_score: 25,
    radius: 10.0,
    tag: "💎",
    color: "#4169E1",
};

const BOMB: CategoryInfo = CategoryInfo {
    spawn_weight: 0.1,
    base_score: -1,
    radius: 14.0,
    tag: "💣",
    color: "#FF4444",
};

impl ObjectCategory {
    /// All categories in spawn-table order
    pub const ALL: [ObjectCategory; 3] = [ObjectCategory::Star, ObjectCategory::Gem, ObjectCategory::Bomb];

    pub fn info(self) -> &'static CategoryInfo {
        match self {
            ObjectCategory::Star => &STAR,
            ObjectCategory::Gem => &GEM,
            ObjectCategory::Bomb => &BOMB,
        }
    }

    pub fn radius(self) -> f32 {
        self.info().radius
    }

    pub fn base_score(self) -> i64 {
        self.info().base_score
    }

    /// Bombs are punished when caught, never when missed
    pub fn is_hazard(self) -> bool {
        matches!(self, ObjectCategory::Bomb)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectCategory::Star => "Star",
            ObjectCategory::Gem => "Gem",
            ObjectCategory::Bomb => "Bomb",
        }
    }
}

/// A falling object entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub category: ObjectCategory,
    /// Center position (canvas pixels, y grows downward)
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels fallen per frame (constant for the object's lifetime)
    pub speed: f32,
}

impl FallingObject {
    pub fn new(id: u32, category: ObjectCategory, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            category,
            pos,
            radius: category.radius(),
            speed,
        }
    }

    pub fn base_score(&self) -> i64 {
        self.category.base_score()
    }

    /// Top edge of the bounding box
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    /// Bottom edge of the bounding box
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    /// Linear fall by one frame
    pub fn fall(&mut self) {
        self.pos.y += self.speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_weights_sum_to_one() {
        let total: f32 = ObjectCategory::ALL.iter().map(|c| c.info().spawn_weight).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_category_table() {
        assert_eq!(ObjectCategory::Star.base_score(), 10);
        assert_eq!(ObjectCategory::Gem.base_score(), 25);
        assert_eq!(ObjectCategory::Bomb.radius(), 14.0);
        assert!(ObjectCategory::Bomb.is_hazard());
        assert!(!ObjectCategory::Gem.is_hazard());
    }

    #[test]
    fn test_fall_is_linear() {
        let mut obj = FallingObject::new(1, ObjectCategory::Gem, Vec2::new(50.0, -10.0), 2.5);
        obj.fall();
        obj.fall();
        assert_eq!(obj.pos.y, -5.0);
        assert_eq!(obj.pos.x, 50.0);
        assert_eq!(obj.top(), -15.0);
        assert_eq!(obj.bottom(), 5.0);
    }
}
