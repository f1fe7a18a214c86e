/// All game entity types — pure data, no logic.
use crate::config::GameConfig;
use crate::fade::FadeMessage;

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    Won,
}

/// Axis-aligned rectangle in canvas pixels.  `contains` is edge-inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

// ── Player & items ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Sprite center.
    pub x: f32,
    pub y: f32,
    /// Unscaled sprite size.
    pub width: f32,
    pub height: f32,
    /// Starts at 1 and grows with every pickup.
    pub scale: f32,
    /// Mirrored horizontally (last moved left).
    pub flipped: bool,
    pub speed: f32,
}

impl Player {
    pub fn scaled_width(&self) -> f32 {
        self.width * self.scale
    }

    pub fn scaled_height(&self) -> f32 {
        self.height * self.scale
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Remaining collectibles, in spawn order.
    pub items: Vec<Item>,
    pub score: u32,
    /// Latest "+N" pickup message, if it has not faded yet.
    pub message: Option<FadeMessage>,
    pub status: GameStatus,
    pub frame: u64,
    pub config: GameConfig,
}

impl GameState {
    pub fn width(&self) -> f32 {
        self.config.canvas_width
    }

    pub fn height(&self) -> f32 {
        self.config.canvas_height
    }
}
