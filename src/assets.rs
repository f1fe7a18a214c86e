/// Sprite assets and the loader that gates game start.
///
/// Each sprite is a text-art file; a space is a transparent pixel.  The
/// loader resolves every `AssetId` on its own thread and reports back over a
/// channel, so the game loop can keep drawing a loading screen meanwhile.
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, info, warn};

use crate::error::AssetError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetId {
    Player,
    Collectible,
    Background,
}

impl AssetId {
    pub const ALL: [AssetId; 3] = [AssetId::Player, AssetId::Collectible, AssetId::Background];

    pub fn file_name(self) -> &'static str {
        match self {
            AssetId::Player => "player.txt",
            AssetId::Collectible => "collectible.txt",
            AssetId::Background => "background.txt",
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Player => write!(f, "player"),
            AssetId::Collectible => write!(f, "collectible"),
            AssetId::Background => write!(f, "background"),
        }
    }
}

// ── Sprite ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Sprite {
    /// Parse text art.  Ragged rows are padded with transparent cells and
    /// trailing blank lines are dropped.
    pub fn parse(asset: AssetId, path: &Path, text: &str) -> Result<Sprite, AssetError> {
        let mut rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end_matches('\r').chars().collect())
            .collect();
        while rows.last().is_some_and(|r| r.iter().all(|c| *c == ' ')) {
            rows.pop();
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return Err(AssetError::Empty {
                asset,
                path: path.to_path_buf(),
            });
        }
        for row in &mut rows {
            row.resize(width, ' ');
        }
        Ok(Sprite { rows, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (`x`, `y`), `None` outside the sprite.
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Character seen at (`x`, `y`) when the sprite is drawn mirrored.
    /// Directional glyphs are swapped so the art still reads correctly.
    pub fn get_mirrored(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width {
            return None;
        }
        self.get(self.width - 1 - x, y).map(mirror_glyph)
    }
}

fn mirror_glyph(c: char) -> char {
    match c {
        '<' => '>',
        '>' => '<',
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '/' => '\\',
        '\\' => '/',
        '▌' => '▐',
        '▐' => '▌',
        '◀' => '▶',
        '▶' => '◀',
        other => other,
    }
}

// ── Loaded set ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Sprite,
    pub collectible: Sprite,
    pub background: Sprite,
}

pub fn load_sprite(dir: &Path, asset: AssetId) -> Result<Sprite, AssetError> {
    let path = dir.join(asset.file_name());
    let text = std::fs::read_to_string(&path).map_err(|e| AssetError::Io {
        asset,
        path: path.clone(),
        message: e.to_string(),
    })?;
    Sprite::parse(asset, &path, &text)
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum LoadStatus {
    Pending { remaining: usize },
    Ready(Assets),
    Failed(AssetError),
}

type Completion = (AssetId, Result<Sprite, AssetError>);

pub struct AssetLoader {
    rx: Receiver<Completion>,
    loaded: HashMap<AssetId, Sprite>,
    pending: Vec<AssetId>,
}

impl AssetLoader {
    /// Start loading every asset from `dir` in the background.
    pub fn spawn(dir: &Path) -> Self {
        let (tx, rx) = mpsc::channel::<Completion>();
        for asset in AssetId::ALL {
            let tx = tx.clone();
            let dir: PathBuf = dir.to_path_buf();
            thread::spawn(move || {
                let result = load_sprite(&dir, asset);
                // Receiver gone means the game already quit.
                let _ = tx.send((asset, result));
            });
        }
        info!(dir = %dir.display(), count = AssetId::ALL.len(), "loading assets");
        Self {
            rx,
            loaded: HashMap::new(),
            pending: AssetId::ALL.to_vec(),
        }
    }

    /// Assets not resolved yet, in declaration order.
    pub fn pending(&self) -> &[AssetId] {
        &self.pending
    }

    /// Drain finished loads without blocking.  The first failure fails the
    /// whole set.
    pub fn poll(&mut self) -> LoadStatus {
        loop {
            match self.rx.try_recv() {
                Ok(completion) => {
                    if let Some(err) = self.record(completion) {
                        return LoadStatus::Failed(err);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.pending.is_empty() {
                        break;
                    }
                    return LoadStatus::Failed(AssetError::Disconnected {
                        remaining: self.pending.len(),
                    });
                }
            }
        }
        self.status()
    }

    /// Block until every asset resolved or one failed.
    pub fn wait(mut self) -> Result<Assets, AssetError> {
        while !self.pending.is_empty() {
            let completion = self.rx.recv().map_err(|_| AssetError::Disconnected {
                remaining: self.pending.len(),
            })?;
            if let Some(err) = self.record(completion) {
                return Err(err);
            }
        }
        match self.status() {
            LoadStatus::Ready(assets) => Ok(assets),
            LoadStatus::Failed(err) => Err(err),
            LoadStatus::Pending { remaining } => Err(AssetError::Disconnected { remaining }),
        }
    }

    fn record(&mut self, (asset, result): Completion) -> Option<AssetError> {
        self.pending.retain(|a| *a != asset);
        match result {
            Ok(sprite) => {
                debug!(%asset, width = sprite.width(), height = sprite.height(), "asset ready");
                self.loaded.insert(asset, sprite);
                None
            }
            Err(err) => {
                warn!(%asset, error = %err, "asset failed");
                Some(err)
            }
        }
    }

    fn status(&mut self) -> LoadStatus {
        if !self.pending.is_empty() {
            return LoadStatus::Pending {
                remaining: self.pending.len(),
            };
        }
        match (
            self.loaded.remove(&AssetId::Player),
            self.loaded.remove(&AssetId::Collectible),
            self.loaded.remove(&AssetId::Background),
        ) {
            (Some(player), Some(collectible), Some(background)) => {
                info!("all assets ready");
                LoadStatus::Ready(Assets {
                    player,
                    collectible,
                    background,
                })
            }
            _ => LoadStatus::Failed(AssetError::Disconnected { remaining: 0 }),
        }
    }
}
