//! All game entity types.  Pure data; behaviour lives in the sibling modules.

use std::collections::{HashMap, VecDeque};

use serde::Deserialize;

use crate::config::GameConfig;
use crate::platform::SpriteKey;

// ── Canvas & world geometry ──────────────────────────────────────────────────

/// Width and height of the logical canvas in pixels.
pub const SCREEN_SIZE: f32 = 64.0;
pub const TILE_SIZE: i32 = 8;
/// World width in pixels (5 screens).
pub const WORLD_WIDTH: i32 = 320;
pub const WORLD_COLUMNS: usize = (WORLD_WIDTH / TILE_SIZE) as usize;
pub const WORLD_ROWS: usize = (64 / TILE_SIZE) as usize;
pub const GROUND_ROWS: usize = 3;

pub const BEE_SIZE: f32 = 8.0;
pub const BEE_START_X: f32 = 16.0;
pub const BEE_START_Y: f32 = 32.0;

pub const FLOWER_START_POLLEN: u32 = 100;
pub const FLOWER_START_NECTAR: u32 = 100;

pub const HIVE_SIZE: i32 = 16;

// ── Enums ────────────────────────────────────────────────────────────────────

/// Top-level mode of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Controls,
    Game,
}

/// Which beehive counter a level goal is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    Pollen,
    Nectar,
}

/// Result of checking a level against the hive and the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelStatus {
    InProgress,
    Completed,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Sky,
    Grass,
    TallGrass,
}

// ── Bee ──────────────────────────────────────────────────────────────────────

/// The player.  `x` is in screen pixels (the camera carries the world
/// offset), `y` is in world pixels measured up from the ground.
#[derive(Clone, Debug)]
pub struct Bee {
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
    pub pollen: u32,
    pub nectar: u32,
    /// Last horizontal input: -1, 0 or 1.
    pub last_dx: i8,
    /// Smoothed visual tilt in degrees.
    pub tilt_angle: f32,
    pub animation_frame: u8,
    pub last_frame_change: u64,
    /// Flower the carried pollen was last taken from.
    pub pollen_source: Option<FlowerId>,
}

// ── Flowers & hive ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlowerId(pub u32);

/// Bloom stage shown for a flower, derived from its remaining pollen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bloom {
    Full,
    Wilting,
    Bare,
}

/// A pollen/nectar source anchored to a tile.
#[derive(Clone, Debug)]
pub struct Flower {
    pub id: FlowerId,
    /// Tile column.
    pub x: i32,
    /// Tile row, counted from the ground up.
    pub y: i32,
    pub pollen: u32,
    pub nectar: u32,
    /// Pollen received from other flowers, keyed by source.
    pub foreign_pollen: HashMap<FlowerId, u32>,
}

/// Deposit target.  Its counters are what level goals measure.
#[derive(Clone, Debug)]
pub struct Beehive {
    /// Column on the hive's own 16-pixel grid.
    pub x: i32,
    /// Row on the hive's own 16-pixel grid.
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub pollen: u32,
    pub nectar: u32,
}

// ── Particles ────────────────────────────────────────────────────────────────

/// A nectar sparkle, positioned in world pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    /// Updates left before the particle is dropped.
    pub lifetime: u32,
}

// ── World ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ParallaxElement {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub sprite: SpriteKey,
}

#[derive(Clone, Debug)]
pub struct ParallaxLayer {
    /// Fraction of camera movement applied to this layer (< 1).
    pub speed: f32,
    pub elements: Vec<ParallaxElement>,
}

#[derive(Clone, Debug)]
pub struct World {
    /// `tiles[row][column]`, row 0 at the bottom.
    pub tiles: Vec<Vec<Tile>>,
    pub flowers: Vec<Flower>,
    /// Back-to-front.
    pub parallax_layers: Vec<ParallaxLayer>,
}

// ── Levels ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub number: u32,
    /// One or more lines separated by `\n`.
    pub description: String,
    pub goal: GoalKind,
    pub goal_amount: u32,
    /// Seconds allowed, if the level is timed.
    pub time_limit: Option<f32>,
    pub popup_visible: bool,
}

// ── Menus ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HomeMenu {
    pub selected: usize,
}

// ── Master game state ────────────────────────────────────────────────────────

/// The whole session.  One instance is threaded through every tick.
#[derive(Clone, Debug)]
pub struct Game {
    pub screen: Screen,
    pub menu: HomeMenu,
    pub bee: Bee,
    pub world: World,
    pub beehive: Beehive,
    pub particles: Vec<Particle>,
    /// Horizontal world offset of the visible window, in pixels.
    pub camera_x: f32,
    pub current_level: Option<Level>,
    pub level_queue: VecDeque<Level>,
    /// Tick on which the current level's popup was dismissed.
    pub level_start_tick: u64,
    pub music_playing: bool,
    pub config: GameConfig,
}
