//! Terminal renderer for the game core.
//!
//! The core hands over a `Frame` of declarative draw commands on a 64×64
//! y-up canvas.  This module rasterises them into a pixel buffer, standing
//! in for sprite assets with small procedural pictures, and prints the
//! buffer with half-block characters (two canvas rows per terminal row).

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use bee_pollination::entities::Bloom;
use bee_pollination::platform::{Align, DrawCommand, FontSize, Frame, Rgb, Rgba, SpriteKey};

pub const CANVAS: usize = 64;

const C_HINT: Color = Color::DarkGrey;
const CLEAR: Rgb = Rgb(0, 0, 0);

// ── Sprite palette ────────────────────────────────────────────────────────────

const BEE_BODY: Rgb = Rgb(245, 200, 40);
const BEE_STRIPE: Rgb = Rgb(30, 25, 20);
const BEE_WING: Rgb = Rgb(235, 245, 255);
const SKY: Rgb = Rgb(135, 206, 235);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const GRASS_DARK: Rgb = Rgb(60, 130, 40);
const STEM: Rgb = Rgb(50, 140, 50);
const PETAL_FULL: Rgb = Rgb(240, 90, 160);
const PETAL_WILT: Rgb = Rgb(200, 150, 190);
const FLOWER_HEART: Rgb = Rgb(255, 220, 60);
const FLOWER_SEED: Rgb = Rgb(130, 90, 40);
const HIVE: Rgb = Rgb(230, 160, 40);
const HIVE_BAND: Rgb = Rgb(170, 100, 20);
const HIVE_DOOR: Rgb = Rgb(60, 35, 10);
const SUN: Rgb = Rgb(255, 230, 80);
const CLOUD: Rgb = Rgb(250, 250, 250);
const TRUNK: Rgb = Rgb(110, 70, 35);
const LEAVES: [Rgb; 2] = [Rgb(40, 120, 50), Rgb(70, 150, 60)];

// ── Pixel buffer ──────────────────────────────────────────────────────────────

pub struct PixelBuf {
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new() -> Self {
        Self {
            px: vec![CLEAR; CANVAS * CANVAS],
        }
    }

    pub fn clear(&mut self) {
        self.px.fill(CLEAR);
    }

    /// Set a pixel addressed with the canvas origin at the bottom-left.
    pub fn set(&mut self, x: i32, y_up: i32, c: Rgb) {
        let size = CANVAS as i32;
        if x >= 0 && y_up >= 0 && x < size && y_up < size {
            let row = (size - 1 - y_up) as usize;
            self.px[row * CANVAS + x as usize] = c;
        }
    }

    /// Pixel at (`x`, `row`) with row 0 at the top.
    pub fn get(&self, x: usize, row: usize) -> Rgb {
        self.px[row * CANVAS + x]
    }

    fn blend(&mut self, x: i32, y_up: i32, c: Rgba) {
        if c.3 == 255 {
            self.set(x, y_up, Rgb(c.0, c.1, c.2));
            return;
        }
        let size = CANVAS as i32;
        if x < 0 || y_up < 0 || x >= size || y_up >= size {
            return;
        }
        let under = self.get(x as usize, (size - 1 - y_up) as usize);
        let a = c.3 as u16;
        let mix = |top: u8, bottom: u8| ((top as u16 * a + bottom as u16 * (255 - a)) / 255) as u8;
        self.set(x, y_up, Rgb(mix(c.0, under.0), mix(c.1, under.1), mix(c.2, under.2)));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, c: Rgb) {
        let (x0, y0) = (x.floor() as i32, y.floor() as i32);
        let (x1, y1) = ((x + w).ceil() as i32, (y + h).ceil() as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.set(px, py, c);
            }
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Rasterise one frame and print it.
pub fn render<W: Write>(out: &mut W, buf: &mut PixelBuf, frame: &Frame) -> std::io::Result<()> {
    buf.clear();
    for command in &frame.draws {
        draw_command(buf, command);
    }
    present(out, buf)?;
    draw_controls_hint(out)?;
    out.flush()
}

fn draw_command(buf: &mut PixelBuf, command: &DrawCommand) {
    match command {
        DrawCommand::Solid { x, y, w, h, color } => buf.fill_rect(*x, *y, *w, *h, *color),
        DrawCommand::Sprite {
            x,
            y,
            w,
            h,
            sprite,
            angle,
        } => draw_sprite(buf, *x, *y, *w, *h, *sprite, *angle),
        DrawCommand::Label {
            x,
            y,
            text,
            size,
            align,
            color,
            ..
        } => draw_text(buf, *x, *y, text, *size, *align, *color),
    }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Sprites rotate about their centre; the scan covers the rotated bounds.
fn draw_sprite(buf: &mut PixelBuf, x: f32, y: f32, w: f32, h: f32, sprite: SpriteKey, angle: f32) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    let (cx, cy) = (x + w / 2.0, y + h / 2.0);
    let reach = if angle == 0.0 {
        (w / 2.0, h / 2.0)
    } else {
        let r = (w * w + h * h).sqrt() / 2.0;
        (r, r)
    };
    let (x0, y0) = ((cx - reach.0).floor() as i32, (cy - reach.1).floor() as i32);
    let (x1, y1) = ((cx + reach.0).ceil() as i32, (cy + reach.1).ceil() as i32);
    for py in y0.max(0)..y1.min(CANVAS as i32) {
        for px in x0.max(0)..x1.min(CANVAS as i32) {
            let Some((u, v)) = sample_uv(cx, cy, w, h, angle, px, py) else {
                continue;
            };
            if let Some(c) = sprite_pixel(sprite, u, v) {
                buf.set(px, py, c);
            }
        }
    }
}

/// Normalised sprite coordinates (`v` from the top) seen at canvas pixel
/// (`px`, `py`) for a sprite centred on (`cx`, `cy`) and turned `angle`
/// degrees counter-clockwise.  `None` outside the sprite.
fn sample_uv(cx: f32, cy: f32, w: f32, h: f32, angle: f32, px: i32, py: i32) -> Option<(f32, f32)> {
    let dx = px as f32 + 0.5 - cx;
    let dy = py as f32 + 0.5 - cy;
    let (sin, cos) = (-angle.to_radians()).sin_cos();
    let sx = dx * cos - dy * sin;
    let sy = dx * sin + dy * cos;
    let u = (sx + w / 2.0) / w;
    let v = 1.0 - (sy + h / 2.0) / h;
    if (0.0..1.0).contains(&u) && (0.0..1.0).contains(&v) {
        Some((u, v))
    } else {
        None
    }
}

fn in_ellipse(u: f32, v: f32, cu: f32, cv: f32, ru: f32, rv: f32) -> bool {
    let du = (u - cu) / ru;
    let dv = (v - cv) / rv;
    du * du + dv * dv <= 1.0
}

/// Colour of a sprite at normalised (`u`, `v`), `v` measured from the top.
/// `None` is transparent.
fn sprite_pixel(sprite: SpriteKey, u: f32, v: f32) -> Option<Rgb> {
    match sprite {
        SpriteKey::Bee(frame) => {
            let wing_v = if frame == 0 { 0.25 } else { 0.38 };
            if in_ellipse(u, v, 0.5, 0.6, 0.45, 0.3) {
                let eye = u > 0.8 && v < 0.6;
                if eye || ((u * 8.0) as i32) % 3 == 1 {
                    Some(BEE_STRIPE)
                } else {
                    Some(BEE_BODY)
                }
            } else if in_ellipse(u, v, 0.4, wing_v, 0.22, 0.16) {
                Some(BEE_WING)
            } else {
                None
            }
        }
        SpriteKey::Sky => Some(SKY),
        SpriteKey::Grass => Some(if v < 0.25 { GRASS_LIGHT } else { GRASS }),
        SpriteKey::TallGrass => {
            if v < 0.3 && ((u * 8.0) as i32) % 2 == 1 {
                Some(GRASS_LIGHT)
            } else {
                Some(GRASS_DARK)
            }
        }
        SpriteKey::Flower(bloom) => {
            let head = in_ellipse(u, v, 0.5, 0.35, 0.3, 0.3);
            let heart = in_ellipse(u, v, 0.5, 0.35, 0.13, 0.13);
            match bloom {
                _ if heart => Some(if bloom == Bloom::Bare { FLOWER_SEED } else { FLOWER_HEART }),
                Bloom::Full if head => Some(PETAL_FULL),
                Bloom::Wilting if head && v > 0.3 => Some(PETAL_WILT),
                _ if v > 0.5 && (0.4..0.6).contains(&u) => Some(STEM),
                _ => None,
            }
        }
        SpriteKey::Beehive => {
            if in_ellipse(u, v, 0.5, 0.82, 0.12, 0.1) {
                Some(HIVE_DOOR)
            } else if in_ellipse(u, v, 0.5, 0.55, 0.45, 0.45) {
                Some(if ((v * 6.0) as i32) % 2 == 0 { HIVE } else { HIVE_BAND })
            } else {
                None
            }
        }
        SpriteKey::Sun => in_ellipse(u, v, 0.5, 0.5, 0.5, 0.5).then_some(SUN),
        SpriteKey::Cloud => (in_ellipse(u, v, 0.35, 0.6, 0.3, 0.4)
            || in_ellipse(u, v, 0.65, 0.55, 0.3, 0.45))
        .then_some(CLOUD),
        SpriteKey::Tree(variant) => {
            if in_ellipse(u, v, 0.5, 0.35, 0.5, 0.35) {
                Some(LEAVES[variant as usize % LEAVES.len()])
            } else if v > 0.6 && (0.4..0.6).contains(&u) {
                Some(TRUNK)
            } else {
                None
            }
        }
    }
}

// ── Text ──────────────────────────────────────────────────────────────────────

const GLYPH_W: i32 = 3;
const ADVANCE: i32 = 4;

/// 3×5 bitmap; each row uses the low three bits, MSB on the left.
#[rustfmt::skip]
fn glyph(ch: char) -> [u8; 5] {
    match ch.to_ascii_uppercase() {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b110],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b110, 0b001, 0b010, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        _ => [0; 5],
    }
}

pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        0
    } else {
        (n * ADVANCE - 1) * scale
    }
}

fn draw_text(buf: &mut PixelBuf, x: f32, y: f32, text: &str, size: FontSize, align: Align, color: Rgba) {
    let scale = match size {
        FontSize::Small => 1,
        FontSize::Medium => 2,
    };
    let width = text_width(text, scale);
    let left = match align {
        Align::Left => x.round() as i32,
        Align::Center => x.round() as i32 - width / 2,
        Align::Right => x.round() as i32 - width,
    };
    let top = y.round() as i32;

    for (i, ch) in text.chars().enumerate() {
        let origin = left + i as i32 * ADVANCE * scale;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_W {
                if (bits >> (GLYPH_W - 1 - col)) & 1 == 1 {
                    for sy in 0..scale {
                        for sx in 0..scale {
                            let py = top - 1 - row as i32 * scale - sy;
                            buf.blend(origin + col * scale + sx, py, color);
                        }
                    }
                }
            }
        }
    }
}

// ── Terminal output ───────────────────────────────────────────────────────────

fn term_color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// Print the buffer as `CANVAS / 2` rows of `▀`, top pixel in the
/// foreground colour and bottom pixel in the background colour.
fn present<W: Write>(out: &mut W, buf: &PixelBuf) -> std::io::Result<()> {
    for row in 0..CANVAS / 2 {
        out.queue(cursor::MoveTo(0, row as u16))?;
        let mut prev: Option<(Rgb, Rgb)> = None;
        for col in 0..CANVAS {
            let top = buf.get(col, row * 2);
            let bottom = buf.get(col, row * 2 + 1);
            if prev != Some((top, bottom)) {
                out.queue(style::SetForegroundColor(term_color(top)))?;
                out.queue(style::SetBackgroundColor(term_color(bottom)))?;
                prev = Some((top, bottom));
            }
            out.queue(Print('\u{2580}'))?;
        }
        out.queue(style::ResetColor)?;
    }
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, (CANVAS / 2) as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑→↓ fly  C nectar  X deposit  H home  Q quit"))?;
    out.queue(style::ResetColor)?;
    Ok(())
}
