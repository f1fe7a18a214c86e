/// Held-key tracking.
///
/// Terminals with keyboard enhancement report real key releases, so a key
/// stays pressed from `key_down` until `key_up`.  Classic terminals only send
/// presses (OS key-repeat shows up as repeated presses); there a key counts
/// as held while its last press arrived within the hold window.
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

/// Directions held during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Movement {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Copy, Debug)]
struct KeyState {
    pressed: bool,
    last_seen: u64,
}

#[derive(Clone, Debug)]
pub struct InputTracker {
    keys: HashMap<Key, KeyState>,
    releases_reported: bool,
    hold_window: u64,
}

impl InputTracker {
    pub fn new(releases_reported: bool, hold_window: u64) -> Self {
        Self {
            keys: HashMap::new(),
            releases_reported,
            hold_window,
        }
    }

    /// Record a press or auto-repeat seen on `frame`.
    pub fn key_down(&mut self, key: Key, frame: u64) {
        self.keys.insert(
            key,
            KeyState {
                pressed: true,
                last_seen: frame,
            },
        );
    }

    pub fn key_up(&mut self, key: Key) {
        if let Some(state) = self.keys.get_mut(&key) {
            state.pressed = false;
        }
    }

    pub fn is_pressed(&self, key: Key, frame: u64) -> bool {
        match self.keys.get(&key) {
            Some(state) if state.pressed => {
                self.releases_reported || frame.saturating_sub(state.last_seen) <= self.hold_window
            }
            _ => false,
        }
    }

    pub fn movement(&self, frame: u64) -> Movement {
        Movement {
            up: self.is_pressed(Key::Up, frame),
            down: self.is_pressed(Key::Down, frame),
            left: self.is_pressed(Key::Left, frame),
            right: self.is_pressed(Key::Right, frame),
        }
    }

    /// Forget every key.  Releases that happen while the terminal is
    /// unfocused never arrive, so the game loop calls this on focus loss.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
