/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus, Item, Player, Rect};
use crate::fade::FadeMessage;
use crate::input::Movement;

pub const BUTTON_WIDTH: f32 = 150.0;
pub const BUTTON_HEIGHT: f32 = 50.0;
/// Vertical gap between the canvas middle and the top of the button.
pub const BUTTON_OFFSET_Y: f32 = 50.0;

// ── Constructors ─────────────────────────────────────────────────────────────

fn spawn_player(config: &GameConfig) -> Player {
    Player {
        x: config.canvas_width / 2.0,
        y: config.canvas_height / 2.0,
        width: config.player_width,
        height: config.player_height,
        scale: 1.0,
        flipped: false,
        speed: config.player_speed,
    }
}

/// A fresh batch of `item_count` items scattered uniformly over the canvas.
pub fn create_items(config: &GameConfig, rng: &mut impl Rng) -> Vec<Item> {
    (0..config.item_count)
        .map(|_| Item {
            x: rng.gen_range(0.0..config.canvas_width),
            y: rng.gen_range(0.0..config.canvas_height),
            radius: rng.gen_range(config.min_radius..config.max_radius),
        })
        .collect()
}

/// Build the state the game starts in once assets are ready.
pub fn init_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    GameState {
        player: spawn_player(config),
        items: create_items(config, rng),
        score: 0,
        message: None,
        status: GameStatus::Playing,
        frame: 0,
        config: config.clone(),
    }
}

/// Start a new round.  The facing direction and any fading message carry
/// over.
pub fn reset_game(state: &GameState, rng: &mut impl Rng) -> GameState {
    let home = spawn_player(&state.config);
    info!(final_score = state.score, "resetting round");
    GameState {
        player: Player {
            x: home.x,
            y: home.y,
            scale: 1.0,
            ..state.player.clone()
        },
        items: create_items(&state.config, rng),
        score: 0,
        status: GameStatus::Playing,
        ..state.clone()
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn apply_movement(state: &GameState, movement: Movement) -> GameState {
    let mut player = state.player.clone();
    if movement.up {
        player.y -= player.speed;
    }
    if movement.down {
        player.y += player.speed;
    }
    if movement.left {
        player.x -= player.speed;
        player.flipped = true;
    }
    if movement.right {
        player.x += player.speed;
        player.flipped = false;
    }
    GameState {
        player,
        ..state.clone()
    }
}

/// Where the "Play Again" button sits on the win screen.
pub fn play_again_button(config: &GameConfig) -> Rect {
    Rect {
        x: (config.canvas_width - BUTTON_WIDTH) / 2.0,
        y: config.canvas_height / 2.0 + BUTTON_OFFSET_Y,
        width: BUTTON_WIDTH,
        height: BUTTON_HEIGHT,
    }
}

/// A click only matters on the win screen, inside the button.
pub fn handle_click(state: &GameState, x: f32, y: f32, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::Won && play_again_button(&state.config).contains(x, y) {
        reset_game(state, rng)
    } else {
        state.clone()
    }
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Half-size box centered on the player.
pub fn collision_box(player: &Player) -> Rect {
    Rect {
        x: player.x - player.scaled_width() / 4.0,
        y: player.y - player.scaled_height() / 4.0,
        width: player.scaled_width() / 2.0,
        height: player.scaled_height() / 2.0,
    }
}

pub fn is_hit(player: &Player, item: &Item, hit_margin: f32) -> bool {
    let hitbox = collision_box(player);
    let (cx, cy) = hitbox.center();
    let dx = item.x - cx;
    let dy = item.y - cy;
    (dx * dx + dy * dy).sqrt() < hitbox.width / 2.0 + hit_margin
}

/// Collect every item the player touches this frame.
///
/// Items are tested in list order and the hitbox is rebuilt per item, so an
/// early pickup can widen the reach for later ones.  `retain` visits every
/// item exactly once even while removing.
pub fn check_collisions(state: &GameState) -> GameState {
    let mut next = state.clone();
    let GameState {
        player,
        items,
        score,
        message,
        config,
        ..
    } = &mut next;

    items.retain(|item| {
        if !is_hit(player, item, config.hit_margin) {
            return true;
        }
        player.scale += item.radius / config.growth_divisor;
        let gained = item.radius.floor() as u32;
        *score += gained;
        // Replacing the message drops the old fade sequence.
        *message = Some(FadeMessage::new(format!("+{gained}")));
        debug!(gained, score = *score, scale = player.scale, "item collected");
        false
    });

    if next.items.is_empty() && next.status != GameStatus::Won {
        next.status = GameStatus::Won;
        info!(score = next.score, frame = next.frame, "all items collected");
    }
    next
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame of `dt` wall time.
///
/// The pickup message fades in every status; collisions and movement only
/// run while playing.
pub fn tick(state: &GameState, movement: Movement, dt: Duration) -> GameState {
    let mut next = state.clone();
    next.frame += 1;
    next.message = next.message.take().and_then(|m| m.advance(dt));

    if next.status == GameStatus::Won {
        return next;
    }

    let next = check_collisions(&next);
    apply_movement(&next, movement)
}
