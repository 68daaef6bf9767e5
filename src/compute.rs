//! Game state machine and the per-tick pipeline.
//!
//! `tick` is the only entry point a host needs: it takes the session by
//! `&mut`, the tick's input, the host's tick counter and an RNG handle, and
//! returns everything to draw and play.  All randomness comes through the
//! injected RNG so callers control determinism.

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{
    Bee, Beehive, Game, HomeMenu, LevelStatus, Screen, World, SCREEN_SIZE,
};
use crate::particles;
use crate::platform::{Align, AudioCommand, Frame, Input, Track, BLACK, SKY_BLUE, WHITE, YELLOW};

pub const MENU_ITEMS: [&str; 2] = ["Start Game", "Controls"];

const CONTROLS_TEXT: [&str; 6] = [
    "Arrows: fly",
    "C: nectar",
    "X: deposit",
    "H: home",
    "Q: quit",
    "Enter: back",
];

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a session on the home screen.
pub fn new_game(config: GameConfig, rng: &mut impl Rng) -> Game {
    let level_queue = config.level_queue();
    Game {
        screen: Screen::Home,
        menu: HomeMenu::default(),
        bee: Bee::new(),
        world: World::generate(rng),
        beehive: Beehive::default(),
        particles: Vec::new(),
        camera_x: 0.0,
        current_level: None,
        level_queue,
        level_start_tick: 0,
        music_playing: false,
        config,
    }
}

/// Fresh bee, world, hive, particles and camera.  Levels are untouched.
pub fn reset_world(game: &mut Game, rng: &mut impl Rng) {
    game.bee = Bee::new();
    game.world = World::generate(rng);
    game.beehive = Beehive::default();
    game.particles.clear();
    game.camera_x = 0.0;
}

/// Everything back to a new session, level queue included.
pub fn reset_game(game: &mut Game, rng: &mut impl Rng) {
    reset_world(game, rng);
    game.current_level = None;
    game.level_queue = game.config.level_queue();
    game.level_start_tick = 0;
    game.menu = HomeMenu::default();
}

/// Seconds since the current level's popup was dismissed.
pub fn elapsed_seconds(game: &Game, tick: u64) -> f32 {
    tick.saturating_sub(game.level_start_tick) as f32 / game.config.tick_rate
}

// ── Per-tick entry point ─────────────────────────────────────────────────────

pub fn tick(game: &mut Game, input: &Input, tick: u64, rng: &mut impl Rng) -> Frame {
    let mut frame = Frame::new();
    match game.screen {
        Screen::Home => tick_home(game, input, &mut frame),
        Screen::Controls => tick_controls(game, input, &mut frame),
        Screen::Game => tick_game(game, input, tick, rng, &mut frame),
    }
    frame
}

// ── Home & controls ──────────────────────────────────────────────────────────

fn tick_home(game: &mut Game, input: &Input, frame: &mut Frame) {
    let count = MENU_ITEMS.len();
    if input.menu_up {
        game.menu.selected = (game.menu.selected + count - 1) % count;
    } else if input.menu_down {
        game.menu.selected = (game.menu.selected + 1) % count;
    } else if input.confirm {
        game.screen = if game.menu.selected == 0 {
            Screen::Game
        } else {
            Screen::Controls
        };
        info!(screen = ?game.screen, "leaving home screen");
    }
    render_home(game, frame);
}

fn tick_controls(game: &mut Game, input: &Input, frame: &mut Frame) {
    if input.confirm {
        game.screen = Screen::Home;
        render_home(game, frame);
        return;
    }
    render_controls(frame);
}

// ── Gameplay ─────────────────────────────────────────────────────────────────

fn tick_game(game: &mut Game, input: &Input, tick: u64, rng: &mut impl Rng, frame: &mut Frame) {
    if game.current_level.is_none() && !start_next_level(game, rng, frame) {
        return;
    }
    if !game.music_playing {
        game.music_playing = true;
        frame.play(AudioCommand::PlayLoop(Track::Theme));
    }

    let popup = game
        .current_level
        .as_ref()
        .is_some_and(|level| level.show_popup());
    if popup {
        if input.confirm {
            if let Some(level) = game.current_level.as_mut() {
                level.hide_popup();
                info!(level = level.number, tick, "level started");
            }
            game.level_start_tick = tick;
        }
        render_scene(game, frame);
        if let Some(level) = &game.current_level {
            if level.show_popup() {
                level.render_popup(frame);
            }
        }
        return;
    }

    if input.home {
        return_home(game, rng, frame);
        return;
    }

    apply_movement(game, input);
    game.bee.update(&mut game.world, game.camera_x, &game.config.physics);
    game.bee.advance_animation(tick);

    if input.collect {
        game.bee.collect_nectar_from_flowers(
            &mut game.world,
            &mut game.particles,
            game.camera_x,
            rng,
        );
    }
    if input.deposit {
        let (pollen, nectar) = game.bee.deposit_to_beehive(&mut game.beehive, game.camera_x);
        if pollen + nectar > 0 {
            debug!(
                pollen,
                nectar,
                hive_pollen = game.beehive.pollen,
                hive_nectar = game.beehive.nectar,
                "deposited"
            );
        }
    }

    particles::advance(&mut game.particles);
    check_goal(game, tick, rng, frame);
    if game.screen != Screen::Game {
        return;
    }

    render_scene(game, frame);
    match &game.current_level {
        Some(level) if level.show_popup() => level.render_popup(frame),
        Some(level) => {
            render_carried(game, frame);
            level.render_hud(frame, &game.beehive, elapsed_seconds(game, tick));
        }
        None => {}
    }
}

fn apply_movement(game: &mut Game, input: &Input) {
    let physics = &game.config.physics;
    if input.left {
        game.bee.move_left(&mut game.camera_x, physics);
    } else if input.right {
        game.bee.move_right(&mut game.camera_x, physics);
    } else {
        game.bee.stop();
    }

    if input.up {
        game.bee.move_up(physics);
    } else if input.down {
        game.bee.move_down(physics);
    }
}

fn check_goal(game: &mut Game, tick: u64, rng: &mut impl Rng, frame: &mut Frame) {
    let elapsed = elapsed_seconds(game, tick);
    let status = match &game.current_level {
        Some(level) => level.evaluate(&game.beehive, elapsed),
        None => return,
    };

    match status {
        LevelStatus::InProgress => {}
        LevelStatus::Completed => {
            if let Some(level) = &game.current_level {
                info!(level = level.number, elapsed, "level complete");
            }
            reset_world(game, rng);
            game.current_level = None;
            start_next_level(game, rng, frame);
        }
        LevelStatus::Failed => {
            reset_world(game, rng);
            if let Some(level) = game.current_level.as_mut() {
                info!(level = level.number, elapsed, "level failed, retrying");
                level.reset();
            }
        }
    }
}

/// Pull the next level off the queue.  With none left the session goes
/// back home fully reset and `false` is returned.
fn start_next_level(game: &mut Game, rng: &mut impl Rng, frame: &mut Frame) -> bool {
    match game.level_queue.pop_front() {
        Some(mut level) => {
            level.reset();
            info!(level = level.number, remaining = game.level_queue.len(), "next level");
            game.current_level = Some(level);
            true
        }
        None => {
            info!("all levels complete");
            return_home(game, rng, frame);
            false
        }
    }
}

fn return_home(game: &mut Game, rng: &mut impl Rng, frame: &mut Frame) {
    reset_game(game, rng);
    game.screen = Screen::Home;
    if game.music_playing {
        game.music_playing = false;
        frame.play(AudioCommand::Stop(Track::Theme));
    }
    info!("returned to home screen");
    render_home(game, frame);
}

// ── Rendering ────────────────────────────────────────────────────────────────

fn render_backdrop(frame: &mut Frame) {
    frame.solid(0.0, 0.0, SCREEN_SIZE, SCREEN_SIZE, SKY_BLUE);
}

/// World in back-to-front order: sky, parallax, tiles, flowers, hive,
/// particles, bee.
fn render_scene(game: &Game, frame: &mut Frame) {
    let camera_x = game.camera_x;
    render_backdrop(frame);
    game.world.render_parallax(frame, camera_x);
    game.world.render_tiles(frame, camera_x);
    game.world.render_flowers(frame, camera_x);
    game.beehive.render(frame, camera_x);
    particles::render(&game.particles, frame, camera_x);
    game.bee.render(frame);
}

fn render_carried(game: &Game, frame: &mut Frame) {
    frame.label(
        1.0,
        SCREEN_SIZE - 1.0,
        format!("p{} n{}", game.bee.pollen, game.bee.nectar),
        Align::Left,
        BLACK,
    );
}

fn render_home(game: &Game, frame: &mut Frame) {
    render_backdrop(frame);
    let center = SCREEN_SIZE / 2.0;
    frame.label(center, 55.0, "Bee Pollination", Align::Center, BLACK);
    frame.label(center, 48.0, "Adventure", Align::Center, BLACK);
    for (i, item) in MENU_ITEMS.iter().enumerate() {
        let color = if i == game.menu.selected { YELLOW } else { WHITE };
        frame.label(center, 30.0 - i as f32 * 10.0, *item, Align::Center, color);
    }
}

fn render_controls(frame: &mut Frame) {
    render_backdrop(frame);
    frame.label(SCREEN_SIZE / 2.0, 62.0, "Controls", Align::Center, BLACK);
    for (i, line) in CONTROLS_TEXT.iter().enumerate() {
        frame.label(2.0, 53.0 - i as f32 * 8.0, *line, Align::Left, WHITE);
    }
}
