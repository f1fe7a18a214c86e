mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        MouseButton, MouseEvent, MouseEventKind, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sprite_collector::assets::{AssetLoader, Assets, LoadStatus};
use sprite_collector::compute::{handle_click, init_state, tick};
use sprite_collector::config::GameConfig;
use sprite_collector::entities::GameState;
use sprite_collector::frame::{compose, compose_loading, Frame, Viewport};
use sprite_collector::input::{InputTracker, Key};

#[derive(Parser)]
#[command(name = "sprite_collector")]
#[command(about = "Steer the sprite, collect every item, grow")]
struct Args {
    /// Directory holding player.txt, collectible.txt and background.txt
    #[arg(short, long, default_value = "assets")]
    assets: PathBuf,

    /// JSON file overriding game rules
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for item placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Where tracing output goes (the terminal is busy drawing)
    #[arg(long, default_value = "sprite_collector.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Input mapping ─────────────────────────────────────────────────────────────

fn map_key(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        _ => None,
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum Phase {
    Loading(AssetLoader),
    Running { assets: Assets, state: GameState },
}

/// Runs until the player quits.  Loading → Playing happens once every asset
/// resolved; a failed asset ends the loop with an error.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    assets_dir: &Path,
    releases_reported: bool,
    rng: &mut StdRng,
) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, config.canvas_width, config.canvas_height);
    let mut canvas = Frame::new(cols, rows);
    let mut input = InputTracker::new(releases_reported, config.hold_window_frames);
    let mut phase = Phase::Loading(AssetLoader::spawn(assets_dir));

    let frame_time = config.frame_duration();
    let mut last_tick = Instant::now();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        let dt = frame_start - last_tick;
        last_tick = frame_start;
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => {
                    if kind == KeyEventKind::Press && is_quit(&code, modifiers) {
                        return Ok(());
                    }
                    if let Some(key) = map_key(&code) {
                        match kind {
                            KeyEventKind::Press | KeyEventKind::Repeat => input.key_down(key, frame),
                            KeyEventKind::Release => input.key_up(key),
                        }
                    }
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if let Phase::Running { state, .. } = &mut phase {
                        let (x, y) = view.to_canvas(column, row);
                        *state = handle_click(state, x, y, rng);
                    }
                }
                Event::FocusLost => input.clear(),
                Event::Resize(c, r) => {
                    view = Viewport::new(c, r, config.canvas_width, config.canvas_height);
                    canvas.resize(c, r);
                }
                _ => {}
            }
        }

        // ── Loading gate ──────────────────────────────────────────────────────
        let ready = match &mut phase {
            Phase::Loading(loader) => match loader.poll() {
                LoadStatus::Pending { .. } => None,
                LoadStatus::Ready(assets) => Some(assets),
                LoadStatus::Failed(err) => {
                    return Err(err).context("game assets could not be loaded");
                }
            },
            Phase::Running { .. } => None,
        };
        if let Some(assets) = ready {
            let state = init_state(config, rng);
            info!(items = state.items.len(), "round started");
            phase = Phase::Running { assets, state };
        }

        // ── Update & draw ─────────────────────────────────────────────────────
        match &mut phase {
            Phase::Loading(loader) => compose_loading(&mut canvas, loader.pending()),
            Phase::Running { assets, state } => {
                *state = tick(state, input.movement(frame), dt);
                compose(&mut canvas, state, assets, &view);
            }
        }
        display::present(out, &canvas)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    init_logging(&args.log_file)?;
    info!(?config, "starting");

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;
    out.execute(EnableFocusChange)?;

    // Only terminals speaking the kitty protocol report key releases; the
    // rest fall back to the hold window.
    let releases_reported = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    info!(releases_reported, "terminal ready");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(
        &mut out,
        &rx,
        &config,
        &args.assets,
        releases_reported,
        &mut rng,
    );

    // Always restore the terminal
    if releases_reported {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableFocusChange);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        warn!(error = %format!("{err:#}"), "exiting with error");
    }
    result
}
