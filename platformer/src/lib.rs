//! A small tile-map platformer built on `platformer-engine`.
//!
//! A start screen leads into numbered levels loaded from `assets/maps/level_{n}.json`.
//! Coins add to the score, hazards restart the level, and walking off the right edge
//! of the map moves on to the next one.

pub mod app;
pub mod config;
pub mod controls;
pub mod error;
pub mod levels;
pub mod logging;
pub mod session;
pub mod views;

use anyhow::Result;
use platformer_engine::AssetError;

pub use crate::app::PlatformerApp;
pub use crate::config::GameConfig;
pub use crate::error::GameError;
pub use crate::levels::LevelCatalog;

/// Exit status for missing or unreadable game data.
pub const EXIT_ASSET_FAILURE: u8 = 2;
/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Open the level catalog and run the game until the window closes.
pub fn run(config: GameConfig) -> Result<()> {
    let catalog = LevelCatalog::open(&config.asset_root, config.tile_scaling)?;
    let engine = config.engine();
    engine.run(PlatformerApp::new(config, catalog))
}

/// Map a fatal error to the process exit status.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    let asset_failure = err.chain().any(|cause| {
        cause.is::<AssetError>()
            || cause
                .downcast_ref::<GameError>()
                .is_some_and(GameError::is_asset_failure)
    });
    if asset_failure {
        EXIT_ASSET_FAILURE
    } else {
        EXIT_FAILURE
    }
}
