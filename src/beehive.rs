use crate::entities::{Beehive, GoalKind, HIVE_SIZE};
use crate::flower::Reachable;
use crate::platform::{Frame, SpriteKey};

/// Grid cell the hive sits on at every world reset.
pub const HIVE_COLUMN: i32 = 2;
pub const HIVE_ROW: i32 = 1;

impl Beehive {
    pub fn new(x: i32, y: i32) -> Self {
        Beehive {
            x,
            y,
            width: HIVE_SIZE,
            height: HIVE_SIZE,
            pollen: 0,
            nectar: 0,
        }
    }

    /// Stored amount of the resource a goal is measured in.
    pub fn total(&self, kind: GoalKind) -> u32 {
        match kind {
            GoalKind::Pollen => self.pollen,
            GoalKind::Nectar => self.nectar,
        }
    }

    pub fn render(&self, frame: &mut Frame, camera_x: f32) {
        frame.sprite(
            (self.x * self.width) as f32 - camera_x,
            (self.y * self.height) as f32,
            self.width as f32,
            self.height as f32,
            SpriteKey::Beehive,
        );
    }
}

impl Default for Beehive {
    fn default() -> Self {
        Beehive::new(HIVE_COLUMN, HIVE_ROW)
    }
}

impl Reachable for Beehive {
    fn world_center(&self) -> (f32, f32) {
        (
            (self.x * self.width) as f32 + self.width as f32 / 2.0,
            (self.y * self.height) as f32 + self.height as f32 / 2.0,
        )
    }

    fn collection_radius(&self) -> f32 {
        self.width as f32 / 2.0
    }
}
