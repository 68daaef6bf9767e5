//! Procedural world: ground tiles, flowers, and the parallax backdrop.

use std::ops::{Range, RangeInclusive};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{
    Flower, FlowerId, ParallaxElement, ParallaxLayer, Tile, World, GROUND_ROWS, SCREEN_SIZE,
    TILE_SIZE, WORLD_COLUMNS, WORLD_ROWS, WORLD_WIDTH,
};
use crate::platform::{Frame, SpriteKey};

/// Most flowers a world can hold; at most one per column.
pub const MAX_FLOWERS: usize = 20;
/// Highest tile row a flower can be planted on.
const FLOWER_TOP_ROW: i32 = 3;
/// Flowers land somewhere in the `FLOWER_BAND` rows ending at `FLOWER_TOP_ROW`.
const FLOWER_BAND: i32 = 4;

// ── Parallax tables ──────────────────────────────────────────────────────────

struct LayerSpec {
    speed: f32,
    count: usize,
    sprites: &'static [SpriteKey],
    w: f32,
    h: f32,
    rows: RangeInclusive<i32>,
}

const LAYERS: [LayerSpec; 3] = [
    LayerSpec {
        speed: 0.1,
        count: 1,
        sprites: &[SpriteKey::Sun],
        w: 16.0,
        h: 16.0,
        rows: 4..=8,
    },
    LayerSpec {
        speed: 0.3,
        count: 10,
        sprites: &[SpriteKey::Cloud],
        w: 32.0,
        h: 12.0,
        rows: 4..=8,
    },
    LayerSpec {
        speed: 0.7,
        count: 15,
        sprites: &[SpriteKey::Tree(0), SpriteKey::Tree(1)],
        w: 16.0,
        h: 32.0,
        rows: 3..=3,
    },
];

// ── Generation ───────────────────────────────────────────────────────────────

impl World {
    /// Build a new world.  All randomness comes through `rng`.
    pub fn generate(rng: &mut impl Rng) -> World {
        let tiles = (0..WORLD_ROWS)
            .map(|row| {
                (0..WORLD_COLUMNS)
                    .map(|_| {
                        if row < GROUND_ROWS {
                            if rng.gen_bool(0.5) {
                                Tile::Grass
                            } else {
                                Tile::TallGrass
                            }
                        } else {
                            Tile::Sky
                        }
                    })
                    .collect()
            })
            .collect();

        let mut columns: Vec<i32> = (0..WORLD_COLUMNS as i32).collect();
        columns.shuffle(rng);
        let flowers = columns
            .into_iter()
            .take(MAX_FLOWERS)
            .enumerate()
            .map(|(i, column)| {
                let row = FLOWER_TOP_ROW - rng.gen_range(0..FLOWER_BAND);
                Flower::new(FlowerId(i as u32), column, row)
            })
            .collect();

        let parallax_layers = LAYERS
            .iter()
            .map(|layer| ParallaxLayer {
                speed: layer.speed,
                elements: (0..layer.count)
                    .map(|_| ParallaxElement {
                        x: rng.gen_range(0..WORLD_WIDTH) as f32,
                        y: (rng.gen_range(layer.rows.clone()) * TILE_SIZE) as f32,
                        w: layer.w,
                        h: layer.h,
                        sprite: layer.sprites[rng.gen_range(0..layer.sprites.len())],
                    })
                    .collect(),
            })
            .collect();

        World {
            tiles,
            flowers,
            parallax_layers,
        }
    }

    pub fn tile_at(&self, column: usize, row: usize) -> Option<Tile> {
        self.tiles.get(row).and_then(|r| r.get(column)).copied()
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    pub fn render_parallax(&self, frame: &mut Frame, camera_x: f32) {
        for layer in &self.parallax_layers {
            for element in &layer.elements {
                let x = parallax_x(element.x, layer.speed, camera_x);
                frame.sprite(x, element.y, element.w, element.h, element.sprite);
                // Straddles the seam: draw the wrapped copy too.
                if x > WORLD_WIDTH as f32 - element.w {
                    frame.sprite(
                        x - WORLD_WIDTH as f32,
                        element.y,
                        element.w,
                        element.h,
                        element.sprite,
                    );
                }
            }
        }
    }

    /// Ground tiles in the visible window.  Sky is left to the backdrop.
    pub fn render_tiles(&self, frame: &mut Frame, camera_x: f32) {
        let size = TILE_SIZE as f32;
        for row in 0..self.tiles.len() {
            for column in visible_columns(camera_x) {
                let sprite = match self.tile_at(column, row) {
                    Some(Tile::Grass) => SpriteKey::Grass,
                    Some(Tile::TallGrass) => SpriteKey::TallGrass,
                    Some(Tile::Sky) | None => continue,
                };
                frame.sprite(
                    column as f32 * size - camera_x,
                    row as f32 * size,
                    size,
                    size,
                    sprite,
                );
            }
        }
    }

    pub fn render_flowers(&self, frame: &mut Frame, camera_x: f32) {
        let visible = visible_columns(camera_x);
        for flower in &self.flowers {
            if visible.contains(&(flower.x as usize)) {
                flower.render(frame, camera_x);
            }
        }
    }
}

/// Screen x of a backdrop element, wrapped into `[0, WORLD_WIDTH)`.
pub fn parallax_x(element_x: f32, speed: f32, camera_x: f32) -> f32 {
    (element_x - camera_x * speed).rem_euclid(WORLD_WIDTH as f32)
}

/// Tile columns that intersect the 64-pixel window at `camera_x`.
pub fn visible_columns(camera_x: f32) -> Range<usize> {
    let start = (camera_x.max(0.0) / TILE_SIZE as f32).floor() as usize;
    let end = (start + SCREEN_SIZE as usize / TILE_SIZE as usize + 1).min(WORLD_COLUMNS);
    start.min(WORLD_COLUMNS)..end
}

/// Largest camera offset that still keeps the window inside the world.
pub fn max_camera_x() -> f32 {
    WORLD_WIDTH as f32 - SCREEN_SIZE
}
