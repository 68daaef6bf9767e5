//! Flowers and the proximity capability shared with the beehive.

use std::collections::HashMap;

use crate::entities::{
    Bloom, Flower, FlowerId, FLOWER_START_NECTAR, FLOWER_START_POLLEN, TILE_SIZE,
};
use crate::platform::{Frame, SpriteKey};

/// Anything the bee can fly up to and interact with.
pub trait Reachable {
    /// Centre of the target in world pixels.
    fn world_center(&self) -> (f32, f32);

    /// Maximum centre-to-centre distance for an interaction.
    fn collection_radius(&self) -> f32;
}

impl Flower {
    pub fn new(id: FlowerId, x: i32, y: i32) -> Self {
        Flower {
            id,
            x,
            y,
            pollen: FLOWER_START_POLLEN,
            nectar: FLOWER_START_NECTAR,
            foreign_pollen: HashMap::new(),
        }
    }

    /// Withdraw up to `amount` pollen; returns what was actually taken.
    pub fn collect_pollen(&mut self, amount: u32) -> u32 {
        let collected = self.pollen.min(amount);
        self.pollen -= collected;
        collected
    }

    /// Withdraw up to `amount` nectar; returns what was actually taken.
    pub fn collect_nectar(&mut self, amount: u32) -> u32 {
        let collected = self.nectar.min(amount);
        self.nectar -= collected;
        collected
    }

    pub fn add_foreign_pollen(&mut self, source: FlowerId, amount: u32) {
        let entry = self.foreign_pollen.entry(source).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// True once any other flower's pollen has reached this one.
    pub fn is_pollinated(&self) -> bool {
        self.foreign_pollen.values().any(|&n| n > 0)
    }

    pub fn bloom(&self) -> Bloom {
        match self.pollen {
            p if p > FLOWER_START_POLLEN * 2 / 3 => Bloom::Full,
            p if p > FLOWER_START_POLLEN / 3 => Bloom::Wilting,
            _ => Bloom::Bare,
        }
    }

    pub fn render(&self, frame: &mut Frame, camera_x: f32) {
        let size = TILE_SIZE as f32;
        frame.sprite(
            (self.x * TILE_SIZE) as f32 - camera_x,
            (self.y * TILE_SIZE) as f32,
            size,
            size,
            SpriteKey::Flower(self.bloom()),
        );
    }
}

impl Reachable for Flower {
    fn world_center(&self) -> (f32, f32) {
        let half = TILE_SIZE as f32 / 2.0;
        (
            (self.x * TILE_SIZE) as f32 + half,
            (self.y * TILE_SIZE) as f32 + half,
        )
    }

    fn collection_radius(&self) -> f32 {
        TILE_SIZE as f32 / 2.0
    }
}
