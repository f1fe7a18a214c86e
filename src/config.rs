/// Tunable game rules.
///
/// Every field has a default matching the classic layout, so a config file
/// only needs to name the values it overrides.
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical canvas size in pixels.
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Items spawned per round.
    pub item_count: usize,
    /// Item radii are drawn from `min_radius..max_radius`.
    pub min_radius: f32,
    pub max_radius: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Pixels moved per frame while a direction is held.
    pub player_speed: f32,
    /// Items are always drawn as an `item_size` square, whatever their radius.
    pub item_size: f32,
    /// Slack added to the collision box half-width.
    pub hit_margin: f32,
    /// Scale gained per pickup is `radius / growth_divisor`.
    pub growth_divisor: f32,
    pub fps: u32,
    /// Fallback for terminals that never report key releases.
    pub hold_window_frames: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            item_count: 10,
            min_radius: 10.0,
            max_radius: 30.0,
            player_width: 50.0,
            player_height: 50.0,
            player_speed: 6.0,
            item_size: 30.0,
            hit_margin: 15.0,
            growth_divisor: 20.0,
            fps: 60,
            hold_window_frames: 8,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, f32); 7] = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("item_size", self.item_size),
            ("growth_divisor", self.growth_divisor),
            ("min_radius", self.min_radius),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }
        let non_negative: [(&'static str, f32); 3] = [
            ("max_radius", self.max_radius),
            ("player_speed", self.player_speed),
            ("hit_margin", self.hit_margin),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a finite, non-negative number, got {value}"),
                });
            }
        }
        if !(self.max_radius > self.min_radius) {
            return Err(ConfigError::Invalid {
                field: "max_radius",
                reason: format!(
                    "must exceed min_radius ({} <= {})",
                    self.max_radius, self.min_radius
                ),
            });
        }
        if self.item_count == 0 {
            return Err(ConfigError::Invalid {
                field: "item_count",
                reason: "at least one item is needed to win".to_string(),
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid {
                field: "fps",
                reason: "must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.fps.max(1) as u64)
    }
}
