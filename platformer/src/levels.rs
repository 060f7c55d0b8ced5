//! Where level maps come from, and how a level becomes a playable session.

use std::path::{Path, PathBuf};

use platformer_engine::{TextureHandle, TileMap};

use crate::{
    config::GameConfig,
    error::GameError,
    session::{LevelSession, PlayerTemplate},
};

/// Asset key of a level's map, relative to the asset root.
pub fn level_key(level: u32) -> String {
    format!("maps/level_{level}.json")
}

/// A numbered sequence of level maps, starting at 1.
pub trait LevelSource {
    fn load(&self, level: u32) -> Result<TileMap, GameError>;
    fn has_level(&self, level: u32) -> bool;
}

/// Level maps stored as `maps/level_{n}.json` under an asset root.
#[derive(Clone, Debug)]
pub struct LevelCatalog {
    root: PathBuf,
    scaling: f32,
}

impl LevelCatalog {
    /// Open the catalog. Fails when the first level is missing, since nothing can be played.
    pub fn open(root: impl Into<PathBuf>, scaling: f32) -> Result<Self, GameError> {
        let catalog = Self {
            root: root.into(),
            scaling,
        };
        let first = catalog.path(1);
        if !first.is_file() {
            return Err(GameError::MissingFirstLevel { path: first });
        }
        log::info!(
            "level catalog at {} ({} levels)",
            catalog.root.display(),
            catalog.level_count()
        );
        Ok(catalog)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, level: u32) -> PathBuf {
        self.root.join(level_key(level))
    }

    /// Number of consecutive levels present, starting from level 1.
    pub fn level_count(&self) -> u32 {
        (1..).take_while(|&level| self.has_level(level)).count() as u32
    }
}

impl LevelSource for LevelCatalog {
    fn load(&self, level: u32) -> Result<TileMap, GameError> {
        let path = self.path(level);
        log::info!("loading level {} from {}", level, path.display());
        Ok(TileMap::load(&path, self.scaling)?)
    }

    fn has_level(&self, level: u32) -> bool {
        level >= 1 && self.path(level).is_file()
    }
}

/// Builds fresh level sessions. Everything a session needs besides level and score.
pub struct SessionFactory {
    source: Box<dyn LevelSource>,
    player: PlayerTemplate,
    tile_texture: TextureHandle,
    config: GameConfig,
}

impl SessionFactory {
    pub fn new(
        source: impl LevelSource + 'static,
        player: PlayerTemplate,
        tile_texture: TextureHandle,
        config: GameConfig,
    ) -> Self {
        Self {
            source: Box::new(source),
            player,
            tile_texture,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn has_level(&self, level: u32) -> bool {
        self.source.has_level(level)
    }

    pub fn session(&self, level: u32, score: u32) -> Result<LevelSession, GameError> {
        let map = self.source.load(level)?;
        LevelSession::new(level, score, &map, self.player, self.tile_texture, &self.config)
    }
}


#[cfg(test)]
mod tests {
    use std::fs;

    use super::testing::{self, coin_run, factory, MemoryLevels};
    use super::*;

    fn write_level(root: &Path, level: u32, json: &str) {
        let path = root.join(level_key(level));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, json).unwrap();
    }

    #[test]
    fn level_keys_follow_the_naming_convention() {
        assert_eq!(level_key(1), "maps/level_1.json");
        assert_eq!(level_key(12), "maps/level_12.json");
    }

    #[test]
    fn open_requires_the_first_level() {
        let dir = tempfile::tempdir().unwrap();
        match LevelCatalog::open(dir.path(), 0.5) {
            Err(GameError::MissingFirstLevel { path }) => {
                assert_eq!(path, dir.path().join("maps/level_1.json"));
            }
            other => panic!("expected MissingFirstLevel, got {:?}", other.map(|c| c.level_count())),
        }
    }

    #[test]
    fn catalog_counts_consecutive_levels() {
        let dir = tempfile::tempdir().unwrap();
        write_level(dir.path(), 1, &coin_run());
        write_level(dir.path(), 2, &coin_run());
        write_level(dir.path(), 4, &coin_run());

        let catalog = LevelCatalog::open(dir.path(), 0.5).unwrap();
        assert_eq!(catalog.level_count(), 2);
        assert!(catalog.has_level(2));
        assert!(!catalog.has_level(3));
        assert!(!catalog.has_level(0));
    }

    #[test]
    fn catalog_loads_and_scales_maps() {
        let dir = tempfile::tempdir().unwrap();
        write_level(dir.path(), 1, &coin_run());

        let catalog = LevelCatalog::open(dir.path(), 0.5).unwrap();
        let map = catalog.load(1).unwrap();
        assert_eq!(map.pixel_width(), 10.0 * 128.0 * 0.5);
    }

    #[test]
    fn malformed_level_is_an_asset_error() {
        let dir = tempfile::tempdir().unwrap();
        write_level(dir.path(), 1, "{ broken");

        let catalog = LevelCatalog::open(dir.path(), 0.5).unwrap();
        let err = catalog.load(1).unwrap_err();
        assert!(err.is_asset_failure());
        assert!(err.to_string().contains("level_1.json"));
    }

    #[test]
    fn bundled_levels_load_and_play() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets");
        let catalog = LevelCatalog::open(&root, 0.5).unwrap();
        assert!(catalog.level_count() >= 2);

        let factory = SessionFactory::new(
            catalog.clone(),
            testing::player(),
            TextureHandle::from_raw(1),
            GameConfig::default(),
        );
        for level in 1..=catalog.level_count() {
            let mut session = factory.session(level, 0).unwrap();
            assert!(session.coins_remaining() > 0, "level {level} has no coins");
            for _ in 0..60 {
                let report = session.tick(&Default::default());
                assert_eq!(report.outcome, crate::session::TickOutcome::Continue);
            }
        }
    }

    #[test]
    fn factory_builds_sessions_at_the_requested_level_and_score() {
        let factory = factory(MemoryLevels::new(0.5).with_level(3, coin_run()));
        let session = factory.session(3, 150).unwrap();
        assert_eq!(session.level(), 3);
        assert_eq!(session.score(), 150);
        assert!(factory.has_level(3));
        assert!(!factory.has_level(4));
        assert!(factory.session(4, 0).is_err());
    }
}
