use std::fmt;
use std::path::PathBuf;

use crate::assets::AssetId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetError {
    Io {
        asset: AssetId,
        path: PathBuf,
        message: String,
    },
    Empty {
        asset: AssetId,
        path: PathBuf,
    },
    /// Every loader thread hung up before reporting.
    Disconnected { remaining: usize },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                asset,
                path,
                message,
            } => write!(
                f,
                "failed to load {asset} sprite from {}: {message}",
                path.display()
            ),
            Self::Empty { asset, path } => {
                write!(f, "{asset} sprite at {} is empty", path.display())
            }
            Self::Disconnected { remaining } => {
                write!(f, "asset loader stopped with {remaining} asset(s) outstanding")
            }
        }
    }
}

impl std::error::Error for AssetError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: PathBuf, message: String },
    Parse { message: String },
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "cannot read config {}: {message}", path.display())
            }
            Self::Parse { message } => write!(f, "malformed config: {message}"),
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}
