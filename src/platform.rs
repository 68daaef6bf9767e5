//! Host interface: the input snapshot the core reads and the draw/audio
//! commands it emits.  Nothing here touches a terminal, window or speaker.

use crate::entities::Bloom;

// ── Input ────────────────────────────────────────────────────────────────────

/// One tick's worth of input, rebuilt by the host every frame.
///
/// Directional fields and `deposit` are *held* state; the rest are
/// edge-triggered and true only on the tick the key went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub menu_up: bool,
    pub menu_down: bool,
    pub confirm: bool,
    pub collect: bool,
    pub deposit: bool,
    pub home: bool,
}

// ── Colours & fonts ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

pub const SKY_BLUE: Rgb = Rgb(135, 206, 235);
pub const BLACK: Rgba = Rgba(0, 0, 0, 255);
pub const WHITE: Rgba = Rgba(255, 255, 255, 255);
pub const YELLOW: Rgba = Rgba(255, 255, 0, 255);
pub const NECTAR_GOLD: Rgb = Rgb(255, 196, 40);

pub const FONT_PATH: &str = "fonts/lowrez.ttf";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Medium,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

// ── Sprites ──────────────────────────────────────────────────────────────────

/// Every image the game can ask the host to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Bee(u8),
    Sky,
    Grass,
    TallGrass,
    Flower(Bloom),
    Beehive,
    Sun,
    Cloud,
    Tree(u8),
}

impl SpriteKey {
    /// Opaque asset path resolved by the host.
    pub fn asset_path(self) -> &'static str {
        match self {
            SpriteKey::Bee(0) => "sprites/bee_1.png",
            SpriteKey::Bee(_) => "sprites/bee_2.png",
            SpriteKey::Sky => "sprites/sky.png",
            SpriteKey::Grass => "sprites/grass_1.png",
            SpriteKey::TallGrass => "sprites/grass_2.png",
            SpriteKey::Flower(Bloom::Full) => "sprites/flower_1.png",
            SpriteKey::Flower(Bloom::Wilting) => "sprites/flower_2.png",
            SpriteKey::Flower(Bloom::Bare) => "sprites/flower_3.png",
            SpriteKey::Beehive => "sprites/beehive.png",
            SpriteKey::Sun => "sprites/sun.png",
            SpriteKey::Cloud => "sprites/cloud_1.png",
            SpriteKey::Tree(0) => "sprites/tree_1.png",
            SpriteKey::Tree(_) => "sprites/tree_2.png",
        }
    }
}

// ── Output ───────────────────────────────────────────────────────────────────

/// Positions are canvas pixels with the origin at the bottom-left.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Solid {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgb,
    },
    Sprite {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        sprite: SpriteKey,
        /// Degrees, counter-clockwise.
        angle: f32,
    },
    /// `y` is the top edge of the text.
    Label {
        x: f32,
        y: f32,
        text: String,
        size: FontSize,
        align: Align,
        color: Rgba,
        font: &'static str,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Track {
    Theme,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCommand {
    PlayLoop(Track),
    Stop(Track),
}

/// Everything the core asks the host to do for one tick, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub draws: Vec<DrawCommand>,
    pub audio: Vec<AudioCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solid(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.draws.push(DrawCommand::Solid { x, y, w, h, color });
    }

    pub fn sprite(&mut self, x: f32, y: f32, w: f32, h: f32, sprite: SpriteKey) {
        self.rotated_sprite(x, y, w, h, sprite, 0.0);
    }

    pub fn rotated_sprite(&mut self, x: f32, y: f32, w: f32, h: f32, sprite: SpriteKey, angle: f32) {
        self.draws.push(DrawCommand::Sprite { x, y, w, h, sprite, angle });
    }

    /// Small-font label in the game's only typeface.
    pub fn label(&mut self, x: f32, y: f32, text: impl Into<String>, align: Align, color: Rgba) {
        self.draws.push(DrawCommand::Label {
            x,
            y,
            text: text.into(),
            size: FontSize::Small,
            align,
            color,
            font: FONT_PATH,
        });
    }

    pub fn play(&mut self, command: AudioCommand) {
        self.audio.push(command);
    }

    /// Sprites drawn this tick, in draw order.
    pub fn sprites(&self) -> impl Iterator<Item = (f32, f32, SpriteKey)> + '_ {
        self.draws.iter().filter_map(|d| match d {
            DrawCommand::Sprite { x, y, sprite, .. } => Some((*x, *y, *sprite)),
            _ => None,
        })
    }

    /// Text of every label drawn this tick, in draw order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.draws.iter().filter_map(|d| match d {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
