mod display;

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bee_pollination::platform::{AudioCommand, Input};
use bee_pollination::{new_game, tick, Game, GameConfig};

use display::PixelBuf;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at
/// 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser)]
#[command(name = "bee_pollination")]
#[command(about = "Fly a bee over a scrolling meadow, gather pollen and nectar, fill the hive")]
struct Args {
    /// TOML file overriding physics and the level list
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for world generation (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log; the terminal is taken over by the game
    #[arg(long, default_value = "bee_pollination.log")]
    log_file: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn any_pressed(pressed: &HashSet<KeyCode>, keys: &[KeyCode]) -> bool {
    keys.iter().any(|k| pressed.contains(k))
}

const LEFT: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const UP: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const CONFIRM: [KeyCode; 2] = [KeyCode::Enter, KeyCode::Char(' ')];
const COLLECT: [KeyCode; 2] = [KeyCode::Char('c'), KeyCode::Char('C')];
const DEPOSIT: [KeyCode; 2] = [KeyCode::Char('x'), KeyCode::Char('X')];
const HOME: [KeyCode; 3] = [KeyCode::Char('h'), KeyCode::Char('H'), KeyCode::Esc];

/// Build this frame's input snapshot from held keys and fresh presses.
fn poll_input(key_frame: &HashMap<KeyCode, u64>, pressed: &HashSet<KeyCode>, frame: u64) -> Input {
    Input {
        left: any_held(key_frame, &LEFT, frame),
        right: any_held(key_frame, &RIGHT, frame),
        up: any_held(key_frame, &UP, frame),
        down: any_held(key_frame, &DOWN, frame),
        menu_up: any_pressed(pressed, &UP),
        menu_down: any_pressed(pressed, &DOWN),
        confirm: any_pressed(pressed, &CONFIRM),
        collect: any_pressed(pressed, &COLLECT),
        deposit: any_held(key_frame, &DEPOSIT, frame),
        home: any_pressed(pressed, &HOME),
    }
}

/// Drain every pending event without blocking, recording key state for
/// `frame`.  Non-key events are skipped.  Returns true when the player quit.
fn drain_events(
    rx: &mpsc::Receiver<Event>,
    key_frame: &mut HashMap<KeyCode, u64>,
    pressed: &mut HashSet<KeyCode>,
    frame: u64,
) -> bool {
    while let Ok(ev) = rx.try_recv() {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            continue;
        };
        match kind {
            KeyEventKind::Press => {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => return true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return true;
                    }
                    _ => {}
                }
                key_frame.insert(code.clone(), frame);
                pressed.insert(code);
            }
            KeyEventKind::Repeat => {
                key_frame.insert(code, frame);
            }
            KeyEventKind::Release => {
                key_frame.remove(&code);
            }
        }
    }
    false
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, so several keys can be held at once.
/// Fresh presses (not repeats) are collected separately for the
/// edge-triggered actions.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let frame_time = Duration::from_secs_f32(1.0 / game.config.tick_rate);
    let mut buf = PixelBuf::new();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut pressed: HashSet<KeyCode> = HashSet::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        pressed.clear();

        if drain_events(rx, &mut key_frame, &mut pressed, frame) {
            return Ok(());
        }

        let input = poll_input(&key_frame, &pressed, frame);
        let output = tick(game, &input, frame, rng);

        for command in &output.audio {
            match command {
                AudioCommand::PlayLoop(track) => info!(?track, "play loop"),
                AudioCommand::Stop(track) => info!(?track, "stop"),
            }
        }
        display::render(out, &mut buf, &output)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(args: &Args) -> Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("Failed to create log file {}", args.log_file.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    let config = load_config(&args)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?config.seed, levels = config.levels.len(), "starting");
    let mut game = new_game(config, &mut rng);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);
    let keyboard_enhanced = Cell::new(false);

    let result = with_terminal(
        &mut out,
        |out| {
            keyboard_enhanced.set(setup_terminal(out)?);
            Ok(())
        },
        |out| {
            // Dedicate a thread exclusively to blocking event reads, sending them
            // through a channel so the game loop never has to block on I/O.
            let (tx, rx) = mpsc::channel::<Event>();
            thread::spawn(move || {
                while let Ok(ev) = event::read() {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
            });
            game_loop(out, &mut game, &mut rng, &rx)
        },
        |out| restore_terminal(out, keyboard_enhanced.get()),
    );

    info!("exiting");
    result
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Runs `setup` then `body`, and always runs `restore` afterwards, even when
/// `setup` fails part-way through.
fn with_terminal<W, T>(
    out: &mut W,
    setup: impl FnOnce(&mut W) -> Result<()>,
    body: impl FnOnce(&mut W) -> Result<T>,
    restore: impl FnOnce(&mut W),
) -> Result<T> {
    let result = match setup(out) {
        Ok(()) => body(out),
        Err(e) => Err(e),
    };
    restore(out);
    result
}

/// Raw mode, alternate screen, hidden cursor.  Returns whether key-release
/// reporting was switched on.
fn setup_terminal<W: Write>(out: &mut W) -> Result<bool> {
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::Clear(terminal::ClearType::All))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    if terminal::supports_keyboard_enhancement().unwrap_or(false) {
        out.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
        Ok(true)
    } else {
        warn!("terminal does not report key releases; using hold window");
        Ok(false)
    }
}

fn restore_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}
