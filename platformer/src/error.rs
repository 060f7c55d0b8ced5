use std::path::PathBuf;

use platformer_engine::AssetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("first level not found at {path}")]
    MissingFirstLevel { path: PathBuf },
    #[error("level {level} has no '{layer}' layer")]
    MissingLayer { level: u32, layer: &'static str },
}

impl GameError {
    /// True when the failure comes from missing or unreadable game data.
    pub fn is_asset_failure(&self) -> bool {
        matches!(self, GameError::Asset(_) | GameError::MissingFirstLevel { .. })
    }
}
