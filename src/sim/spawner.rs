//! Stochastic object spawner
//!
//! Emits at most one object per drop interval. Draw order is fixed
//! (category, x, speed jitter) so a scripted draw sequence replays exactly.

use glam::Vec2;

use super::object::{FallingObject, ObjectCategory};
use super::rng::UnitSource;

/// Weighted category table, scanned in order
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTable {
    entries: Vec<(ObjectCategory, f32)>,
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self {
            entries: ObjectCategory::ALL
                .iter()
                .map(|&c| (c, c.info().spawn_weight))
                .collect(),
        }
    }
}

impl SpawnTable {
    /// Build a custom table. Weights are used as given; callers keep them summing to 1.0.
    pub fn new(entries: Vec<(ObjectCategory, f32)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(ObjectCategory, f32)] {
        &self.entries
    }

    /// Pick a category from a uniform draw in `[0, 1)`
    ///
    /// The first entry whose cumulative weight exceeds the draw wins. A draw at
    /// or past the total (float rounding) lands on the last entry.
    pub fn pick(&self, draw: f32) -> ObjectCategory {
        let mut cumulative = 0.0;
        for &(category, weight) in &self.entries {
            cumulative += weight;
            if draw < cumulative {
                return category;
            }
        }
        self.entries
            .last()
            .map(|&(c, _)| c)
            .unwrap_or(ObjectCategory::Star)
    }
}

/// Spawn parameters that change with difficulty
#[derive(Debug, Clone, Copy)]
pub struct SpawnParams {
    pub drop_interval_ms: f64,
    /// Current global fall speed
    pub speed: f32,
    /// Maximum extra speed added per object
    pub speed_jitter: f32,
    pub canvas_width: f32,
}

/// Object spawner
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    table: SpawnTable,
}

impl Spawner {
    pub fn new(table: SpawnTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SpawnTable {
        &self.table
    }

    /// Emit an object if more than one drop interval has elapsed
    ///
    /// On `Some`, the caller resets its spawn timer.
    pub fn maybe_spawn<R: UnitSource>(
        &self,
        elapsed_ms: f64,
        params: &SpawnParams,
        rng: &mut R,
        id: u32,
    ) -> Option<FallingObject> {
        if elapsed_ms <= params.drop_interval_ms {
            return None;
        }
        Some(self.spawn(params, rng, id))
    }

    /// Create one object unconditionally
    pub fn spawn<R: UnitSource>(&self, params: &SpawnParams, rng: &mut R, id: u32) -> FallingObject {
        let category = self.table.pick(rng.next_unit());
        let radius = category.radius();

        // x uniform over [radius, width - radius]
        let span = (params.canvas_width - radius * 2.0).max(0.0);
        let x = radius + rng.next_unit() * span;
        let speed = params.speed + rng.next_unit() * params.speed_jitter;

        log::debug!("Spawned {} #{} at x={:.1} speed={:.2}", category.as_str(), id, x, speed);

        // Starts fully above the canvas
        FallingObject::new(id, category, Vec2::new(x, -radius), speed)
    }
}
