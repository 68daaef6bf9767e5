//! The player bee: flight, tilt, animation, and its interactions with
//! flowers and the hive.

use rand::Rng;

use crate::config::PhysicsConfig;
use crate::entities::{Bee, Beehive, Particle, World, BEE_SIZE, BEE_START_X, BEE_START_Y, SCREEN_SIZE};
use crate::flower::Reachable;
use crate::particles::spawn_nectar_particles;
use crate::platform::{Frame, SpriteKey};
use crate::world::max_camera_x;

/// Pollen taken from each flower in range, every tick.
pub const POLLEN_PER_TICK: u32 = 1;
/// Nectar taken from each flower in range, per collect action.
pub const NECTAR_PER_SIP: u32 = 5;
/// Most of each resource moved into the hive per tick.
pub const DEPOSIT_PER_TICK: u32 = 1;

/// Distance from either screen edge at which the camera takes over.
pub const SCROLL_MARGIN: f32 = 8.0;
const MAX_TILT: f32 = 90.0;
const TILT_RETAIN: f32 = 0.8;
const ANIMATION_INTERVAL: u64 = 10;
const ANIMATION_FRAMES: u8 = 2;

impl Default for Bee {
    fn default() -> Self {
        Bee {
            x: BEE_START_X,
            y: BEE_START_Y,
            velocity_y: 0.0,
            pollen: 0,
            nectar: 0,
            last_dx: 0,
            tilt_angle: 0.0,
            animation_frame: 0,
            last_frame_change: 0,
            pollen_source: None,
        }
    }
}

impl Bee {
    pub fn new() -> Self {
        Self::default()
    }

    /// Centre of the sprite in screen pixels.
    pub fn center(&self) -> (f32, f32) {
        (self.x + BEE_SIZE / 2.0, self.y + BEE_SIZE / 2.0)
    }

    // ── Movement ─────────────────────────────────────────────────────────────

    pub fn move_left(&mut self, camera_x: &mut f32, physics: &PhysicsConfig) {
        self.move_horizontal(-1, camera_x, physics.x_speed);
    }

    pub fn move_right(&mut self, camera_x: &mut f32, physics: &PhysicsConfig) {
        self.move_horizontal(1, camera_x, physics.x_speed);
    }

    pub fn move_up(&mut self, physics: &PhysicsConfig) {
        self.y = (self.y + 1.0).min(ceiling());
        self.velocity_y = physics.jump_speed;
    }

    pub fn move_down(&mut self, physics: &PhysicsConfig) {
        self.y = (self.y - 1.0).max(0.0);
        self.velocity_y = -physics.jump_speed;
    }

    /// No horizontal input this tick.
    pub fn stop(&mut self) {
        self.last_dx = 0;
    }

    /// Move `speed` pixels in `direction`.  Inside the scroll margins the
    /// sprite moves; at a margin the camera scrolls instead, until the
    /// camera hits a world edge and the sprite takes over again.
    fn move_horizontal(&mut self, direction: i8, camera_x: &mut f32, speed: f32) {
        self.last_dx = direction;
        let step = speed * direction as f32;
        let right_margin = SCREEN_SIZE - BEE_SIZE - SCROLL_MARGIN;

        if direction < 0 {
            if self.x <= SCROLL_MARGIN && *camera_x > 0.0 {
                *camera_x = (*camera_x + step).max(0.0);
            } else {
                self.x = (self.x + step).max(0.0);
            }
        } else if direction > 0 {
            if self.x >= right_margin && *camera_x < max_camera_x() {
                *camera_x = (*camera_x + step).min(max_camera_x());
            } else {
                self.x = (self.x + step).min(SCREEN_SIZE - BEE_SIZE);
            }
        }
    }

    // ── Per-tick physics ─────────────────────────────────────────────────────

    pub fn apply_gravity(&mut self, gravity: f32) {
        self.velocity_y -= gravity;
        self.y += self.velocity_y;
        if self.y <= 0.0 {
            self.y = 0.0;
            self.velocity_y = 0.0;
        } else if self.y > ceiling() {
            self.y = ceiling();
            self.velocity_y = 0.0;
        }
    }

    /// Ease the tilt toward the last horizontal direction.  Cosmetic only.
    pub fn update_tilt(&mut self) {
        let target = self.last_dx as f32 * MAX_TILT;
        self.tilt_angle = self.tilt_angle * TILT_RETAIN + target * (1.0 - TILT_RETAIN);
    }

    pub fn advance_animation(&mut self, tick: u64) {
        if tick.saturating_sub(self.last_frame_change) >= ANIMATION_INTERVAL {
            self.animation_frame = (self.animation_frame + 1) % ANIMATION_FRAMES;
            self.last_frame_change = tick;
        }
    }

    /// Gravity, tilt and passive pollen gathering for one active tick.
    pub fn update(&mut self, world: &mut World, camera_x: f32, physics: &PhysicsConfig) {
        self.apply_gravity(physics.gravity);
        self.update_tilt();
        self.collect_pollen_from_flowers(world, camera_x);
    }

    // ── Interactions ─────────────────────────────────────────────────────────

    /// Euclidean check between the bee's centre and the target's centre,
    /// both in screen space.
    pub fn in_range(&self, target: &impl Reachable, camera_x: f32) -> bool {
        let (tx, ty) = target.world_center();
        let (bx, by) = self.center();
        let dx = tx - camera_x - bx;
        let dy = ty - by;
        (dx * dx + dy * dy).sqrt() <= target.collection_radius()
    }

    /// Take a little pollen from every flower in range.  Carried pollen
    /// from a different flower is credited to the one being visited.
    pub fn collect_pollen_from_flowers(&mut self, world: &mut World, camera_x: f32) -> u32 {
        let mut total = 0;
        for flower in world.flowers.iter_mut() {
            if !self.in_range(&*flower, camera_x) {
                continue;
            }
            if let Some(source) = self.pollen_source {
                if source != flower.id && self.pollen > 0 {
                    flower.add_foreign_pollen(source, 1);
                }
            }
            let collected = flower.collect_pollen(POLLEN_PER_TICK);
            if collected > 0 {
                self.pollen = self.pollen.saturating_add(collected);
                self.pollen_source = Some(flower.id);
                total += collected;
            }
        }
        total
    }

    /// Sip nectar from every flower in range and throw off sparkles.
    pub fn collect_nectar_from_flowers(
        &mut self,
        world: &mut World,
        particles: &mut Vec<Particle>,
        camera_x: f32,
        rng: &mut impl Rng,
    ) -> u32 {
        let mut total = 0;
        let (bx, by) = self.center();
        for flower in world.flowers.iter_mut() {
            if !self.in_range(&*flower, camera_x) {
                continue;
            }
            let collected = flower.collect_nectar(NECTAR_PER_SIP);
            if collected > 0 {
                self.nectar = self.nectar.saturating_add(collected);
                spawn_nectar_particles(particles, bx + camera_x, by, collected, rng);
                total += collected;
            }
        }
        if total > 0 {
            tracing::debug!(nectar = total, carried = self.nectar, "sipped nectar");
        }
        total
    }

    /// Move one unit of each carried resource into the hive, if in range.
    /// Returns `(pollen, nectar)` moved.
    pub fn deposit_to_beehive(&mut self, hive: &mut Beehive, camera_x: f32) -> (u32, u32) {
        if !self.in_range(&*hive, camera_x) {
            return (0, 0);
        }
        let pollen = self.pollen.min(DEPOSIT_PER_TICK);
        let nectar = self.nectar.min(DEPOSIT_PER_TICK);
        self.pollen -= pollen;
        self.nectar -= nectar;
        hive.pollen = hive.pollen.saturating_add(pollen);
        hive.nectar = hive.nectar.saturating_add(nectar);
        if self.pollen == 0 {
            self.pollen_source = None;
        }
        (pollen, nectar)
    }

    pub fn render(&self, frame: &mut Frame) {
        frame.rotated_sprite(
            self.x,
            self.y,
            BEE_SIZE,
            BEE_SIZE,
            SpriteKey::Bee(self.animation_frame),
            -self.tilt_angle,
        );
    }
}

fn ceiling() -> f32 {
    SCREEN_SIZE - BEE_SIZE
}
