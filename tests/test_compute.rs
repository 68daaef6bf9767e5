use bee_pollination::compute::*;
use bee_pollination::config::{GameConfig, LevelConfig};
use bee_pollination::entities::*;
use bee_pollination::platform::{AudioCommand, DrawCommand, Input, SpriteKey, Track, SKY_BLUE};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> Input {
    Input::default()
}

fn confirm() -> Input {
    Input {
        confirm: true,
        ..Input::default()
    }
}

fn single_level(goal: GoalKind, amount: u32, time_limit: Option<f32>) -> GameConfig {
    GameConfig {
        levels: vec![LevelConfig {
            description: "Test".to_string(),
            goal,
            amount,
            time_limit,
        }],
        ..GameConfig::default()
    }
}

/// Session past the level-1 popup: popup shown on tick 1, dismissed on
/// tick 2.
fn in_play(config: GameConfig, rng: &mut StdRng) -> Game {
    let mut game = new_game(config, rng);
    game.screen = Screen::Game;
    tick(&mut game, &idle(), 1, rng);
    tick(&mut game, &confirm(), 2, rng);
    game
}

fn level_number(game: &Game) -> Option<u32> {
    game.current_level.as_ref().map(|l| l.number)
}

fn popup_visible(game: &Game) -> bool {
    game.current_level.as_ref().is_some_and(|l| l.show_popup())
}

// ── new_game ──────────────────────────────────────────────────────────────────

#[test]
fn new_game_starts_home_with_full_queue() {
    let game = new_game(GameConfig::default(), &mut seeded_rng());
    assert_eq!(game.screen, Screen::Home);
    assert_eq!(game.menu.selected, 0);
    assert_eq!(game.level_queue.len(), 5);
    assert!(game.current_level.is_none());
    assert_eq!(game.camera_x, 0.0);
    assert!(!game.music_playing);
}

#[test]
fn elapsed_seconds_uses_tick_rate() {
    let mut game = new_game(GameConfig::default(), &mut seeded_rng());
    game.level_start_tick = 30;
    assert_eq!(elapsed_seconds(&game, 150), 2.0);
    assert_eq!(elapsed_seconds(&game, 10), 0.0);
}

// ── Home & controls ───────────────────────────────────────────────────────────

#[test]
fn home_menu_wraps_both_ways() {
    let mut rng = seeded_rng();
    let mut game = new_game(GameConfig::default(), &mut rng);
    let up = Input {
        menu_up: true,
        ..Input::default()
    };
    let down = Input {
        menu_down: true,
        ..Input::default()
    };
    tick(&mut game, &up, 1, &mut rng);
    assert_eq!(game.menu.selected, 1);
    tick(&mut game, &down, 2, &mut rng);
    assert_eq!(game.menu.selected, 0);
    tick(&mut game, &down, 3, &mut rng);
    tick(&mut game, &down, 4, &mut rng);
    assert_eq!(game.menu.selected, 0);
}

#[test]
fn home_screen_lists_menu_items() {
    let mut rng = seeded_rng();
    let mut game = new_game(GameConfig::default(), &mut rng);
    let frame = tick(&mut game, &idle(), 1, &mut rng);
    let labels: Vec<&str> = frame.labels().collect();
    assert!(labels.contains(&"Start Game"));
    assert!(labels.contains(&"Controls"));
}

#[test]
fn confirm_on_first_item_starts_game() {
    let mut rng = seeded_rng();
    let mut game = new_game(GameConfig::default(), &mut rng);
    tick(&mut game, &confirm(), 1, &mut rng);
    assert_eq!(game.screen, Screen::Game);
}

#[test]
fn controls_screen_round_trip() {
    let mut rng = seeded_rng();
    let mut game = new_game(GameConfig::default(), &mut rng);
    game.menu.selected = 1;
    tick(&mut game, &confirm(), 1, &mut rng);
    assert_eq!(game.screen, Screen::Controls);

    let frame = tick(&mut game, &idle(), 2, &mut rng);
    assert_eq!(game.screen, Screen::Controls);
    assert!(frame.labels().any(|l| l == "Controls"));

    tick(&mut game, &confirm(), 3, &mut rng);
    assert_eq!(game.screen, Screen::Home);
}

// ── Level popup ───────────────────────────────────────────────────────────────

#[test]
fn first_game_tick_dequeues_level_with_popup_and_music() {
    let mut rng = seeded_rng();
    let mut game = new_game(GameConfig::default(), &mut rng);
    game.screen = Screen::Game;
    let frame = tick(&mut game, &idle(), 1, &mut rng);
    assert_eq!(level_number(&game), Some(1));
    assert!(popup_visible(&game));
    assert_eq!(game.level_queue.len(), 4);
    assert_eq!(frame.audio, vec![AudioCommand::PlayLoop(Track::Theme)]);
    assert!(frame.labels().any(|l| l == "Level 1"));
    assert!(frame.labels().any(|l| l == "Goal 50 pollen"));

    let frame = tick(&mut game, &idle(), 2, &mut rng);
    assert!(frame.audio.is_empty());
}

#[test]
fn popup_freezes_simulation() {
    let mut rng = seeded_rng();
    let mut game = new_game(GameConfig::default(), &mut rng);
    game.screen = Screen::Game;
    let held = Input {
        right: true,
        ..Input::default()
    };
    for t in 1..=100 {
        tick(&mut game, &held, t, &mut rng);
    }
    assert_eq!(game.bee.x, BEE_START_X);
    assert_eq!(game.bee.y, BEE_START_Y);
    assert_eq!(game.camera_x, 0.0);
    assert!(popup_visible(&game));
}

#[test]
fn confirm_dismisses_popup_and_starts_clock() {
    let mut rng = seeded_rng();
    let game = in_play(GameConfig::default(), &mut rng);
    assert!(!popup_visible(&game));
    assert_eq!(game.level_start_tick, 2);
}

#[test]
fn active_frame_draws_scene_back_to_front_with_hud() {
    let mut rng = seeded_rng();
    let mut game = in_play(GameConfig::default(), &mut rng);
    let frame = tick(&mut game, &idle(), 3, &mut rng);

    match frame.draws.first() {
        Some(DrawCommand::Solid { color, .. }) => assert_eq!(*color, SKY_BLUE),
        other => panic!("expected sky backdrop first, got {:?}", other),
    }
    let sprites: Vec<SpriteKey> = frame.sprites().map(|(_, _, s)| s).collect();
    let hive = sprites.iter().position(|s| *s == SpriteKey::Beehive);
    let bee = sprites.iter().position(|s| matches!(s, SpriteKey::Bee(_)));
    assert!(hive.is_some() && bee.is_some());
    assert!(hive < bee);
    assert_eq!(bee, Some(sprites.len() - 1));
    assert!(frame.labels().any(|l| l == "P0/50 N0"));
}

// ── Goal evaluation ───────────────────────────────────────────────────────────

#[test]
fn completed_level_advances_and_resets_world() {
    let mut rng = seeded_rng();
    let mut game = in_play(GameConfig::default(), &mut rng);
    game.beehive.pollen = 50;
    game.bee.x = 40.0;
    game.camera_x = 100.0;

    let frame = tick(&mut game, &idle(), 3, &mut rng);
    assert_eq!(level_number(&game), Some(2));
    assert!(popup_visible(&game));
    assert_eq!(game.level_queue.len(), 3);
    assert_eq!(game.beehive.pollen, 0);
    assert_eq!(game.bee.x, BEE_START_X);
    assert_eq!(game.camera_x, 0.0);
    assert!(frame.labels().any(|l| l == "Level 2"));
}

#[test]
fn timed_out_level_retries_with_popup() {
    let mut rng = seeded_rng();
    let mut game = in_play(single_level(GoalKind::Pollen, 10, Some(1.0)), &mut rng);
    game.bee.x = 40.0;
    game.beehive.pollen = 5;

    tick(&mut game, &idle(), 61, &mut rng);
    assert!(!popup_visible(&game));

    tick(&mut game, &idle(), 62, &mut rng);
    assert_eq!(level_number(&game), Some(1));
    assert!(popup_visible(&game));
    assert_eq!(game.bee.x, BEE_START_X);
    assert_eq!(game.beehive.pollen, 0);
    assert_eq!(game.screen, Screen::Game);
}

#[test]
fn clearing_last_level_returns_home() {
    let mut rng = seeded_rng();
    let mut game = in_play(single_level(GoalKind::Nectar, 3, None), &mut rng);
    game.beehive.nectar = 3;

    let frame = tick(&mut game, &idle(), 3, &mut rng);
    assert_eq!(game.screen, Screen::Home);
    assert!(game.current_level.is_none());
    assert_eq!(game.level_queue.len(), 1);
    assert!(!game.music_playing);
    assert_eq!(frame.audio, vec![AudioCommand::Stop(Track::Theme)]);
    assert!(frame.labels().any(|l| l == "Start Game"));
    assert!(frame.sprites().next().is_none());
}

#[test]
fn empty_queue_goes_home() {
    let mut rng = seeded_rng();
    let mut game = new_game(GameConfig::default(), &mut rng);
    game.screen = Screen::Game;
    game.level_queue.clear();
    tick(&mut game, &idle(), 1, &mut rng);
    assert_eq!(game.screen, Screen::Home);
    assert_eq!(game.level_queue.len(), 5);
}

#[test]
fn home_key_abandons_session() {
    let mut rng = seeded_rng();
    let mut game = in_play(GameConfig::default(), &mut rng);
    game.beehive.pollen = 20;
    let home = Input {
        home: true,
        ..Input::default()
    };
    let frame = tick(&mut game, &home, 3, &mut rng);
    assert_eq!(game.screen, Screen::Home);
    assert!(game.current_level.is_none());
    assert_eq!(game.level_queue.len(), 5);
    assert_eq!(game.beehive.pollen, 0);
    assert_eq!(frame.audio, vec![AudioCommand::Stop(Track::Theme)]);
}

// ── Invariants under play ─────────────────────────────────────────────────────

#[test]
fn camera_and_bee_stay_in_bounds_while_flying_right() {
    let mut rng = seeded_rng();
    let mut game = in_play(GameConfig::default(), &mut rng);
    let held = Input {
        right: true,
        ..Input::default()
    };
    for t in 3..2_000 {
        tick(&mut game, &held, t, &mut rng);
        assert!(game.camera_x >= 0.0 && game.camera_x <= 256.0);
        assert!(game.bee.x >= 0.0 && game.bee.x <= SCREEN_SIZE - BEE_SIZE);
    }
    assert_eq!(game.camera_x, 256.0);
    assert_eq!(game.bee.x, SCREEN_SIZE - BEE_SIZE);
}

#[test]
fn resources_are_conserved_while_wandering() {
    let mut rng = seeded_rng();
    let mut game = in_play(GameConfig::default(), &mut rng);
    let mut input_rng = StdRng::seed_from_u64(7);
    let pollen_total = |g: &Game| g.bee.pollen + g.world.flowers.iter().map(|f| f.pollen).sum::<u32>();
    let nectar_total = |g: &Game| g.bee.nectar + g.world.flowers.iter().map(|f| f.nectar).sum::<u32>();
    let start = (pollen_total(&game), nectar_total(&game));

    for t in 3..1_500 {
        let input = Input {
            left: input_rng.gen_bool(0.3),
            right: input_rng.gen_bool(0.4),
            up: input_rng.gen_bool(0.2),
            down: input_rng.gen_bool(0.3),
            collect: input_rng.gen_bool(0.1),
            ..Input::default()
        };
        let before: Vec<(u32, u32)> = game.world.flowers.iter().map(|f| (f.pollen, f.nectar)).collect();
        tick(&mut game, &input, t, &mut rng);
        for (f, (pollen, nectar)) in game.world.flowers.iter().zip(before) {
            assert!(f.pollen <= pollen && f.nectar <= nectar);
        }
        for p in &game.particles {
            assert!(p.lifetime < 60);
        }
    }
    assert_eq!((pollen_total(&game), nectar_total(&game)), start);
}

#[test]
fn hive_gains_at_most_one_of_each_per_tick() {
    let mut rng = seeded_rng();
    let mut game = in_play(GameConfig::default(), &mut rng);
    game.bee.x = 36.0;
    game.bee.y = 20.0;
    game.bee.pollen = 10;
    game.bee.nectar = 10;
    let deposit = Input {
        deposit: true,
        ..Input::default()
    };
    for t in 3..6 {
        let before = (game.beehive.pollen, game.beehive.nectar);
        tick(&mut game, &deposit, t, &mut rng);
        assert!(game.beehive.pollen - before.0 <= 1);
        assert!(game.beehive.nectar - before.1 <= 1);
    }
    assert_eq!(game.beehive.pollen, 3);
    assert_eq!(game.beehive.nectar, 3);
    assert_eq!(game.bee.pollen, 7);
    assert_eq!(game.bee.nectar, 7);
}

#[test]
fn same_seed_same_session() {
    let run = || {
        let mut rng = seeded_rng();
        let mut game = in_play(GameConfig::default(), &mut rng);
        let input = Input {
            right: true,
            collect: true,
            ..Input::default()
        };
        (3..200).map(|t| tick(&mut game, &input, t, &mut rng)).last()
    };
    assert_eq!(run(), run());
}
