//! Game tuning and presentation constants.
//!
//! Speeds and gravity are in pixels per fixed tick (1/60 s).

use std::{path::PathBuf, time::Duration};

use platformer_engine::{CameraFollow, Engine, Vec2};

pub const CORNFLOWER_BLUE: [f32; 4] = [0.392, 0.584, 0.929, 1.0];
pub const DARK_SLATE: [f32; 4] = [0.18, 0.21, 0.26, 1.0];

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub tick: Duration,
    pub asset_root: PathBuf,

    pub tile_scaling: f32,
    pub player_scaling: f32,
    pub player_start: Vec2,
    pub movement_speed: f32,
    pub gravity: f32,
    pub jump_speed: f32,
    pub coin_score: u32,
    /// A player whose center drops below this height is treated as dead.
    pub fall_limit: f32,

    pub play_background: [f32; 4],
    pub start_background: [f32; 4],
    pub text_color: [f32; 4],
    pub camera_dead_zone: Vec2,
    pub camera_smoothing: Option<f32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Platformer".into(),
            width: 1280,
            height: 720,
            vsync: true,
            tick: Duration::from_secs_f64(1.0 / 60.0),
            asset_root: PathBuf::from("assets"),

            tile_scaling: 0.5,
            player_scaling: 1.0,
            player_start: Vec2::new(128.0, 128.0),
            movement_speed: 9.0,
            gravity: 1.0,
            jump_speed: 22.0,
            coin_score: 75,
            fall_limit: -256.0,

            play_background: CORNFLOWER_BLUE,
            start_background: DARK_SLATE,
            text_color: [1.0, 1.0, 1.0, 1.0],
            camera_dead_zone: Vec2::ZERO,
            camera_smoothing: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    #[must_use]
    pub fn with_window(mut self, title: impl Into<String>, width: u32, height: u32) -> Self {
        self.title = title.into();
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    #[must_use]
    pub fn with_player_start(mut self, start: Vec2) -> Self {
        self.player_start = start;
        self
    }

    #[must_use]
    pub fn with_coin_score(mut self, score: u32) -> Self {
        self.coin_score = score;
        self
    }

    #[must_use]
    pub fn with_camera(mut self, dead_zone: Vec2, smoothing: Option<f32>) -> Self {
        self.camera_dead_zone = dead_zone;
        self.camera_smoothing = smoothing;
        self
    }

    /// Tint used for the tiles of a map layer.
    pub fn layer_tint(&self, layer: &str) -> [f32; 4] {
        match layer {
            "Platforms" => [0.36, 0.25, 0.16, 1.0],
            "Coins" => [1.0, 0.84, 0.0, 1.0],
            "Don't Touch" => [0.86, 0.08, 0.24, 1.0],
            "Foreground" => [0.13, 0.55, 0.13, 0.85],
            _ => [0.6, 0.6, 0.6, 1.0],
        }
    }

    pub fn camera_follow(&self) -> CameraFollow {
        let follow = CameraFollow::new().with_dead_zone(self.camera_dead_zone.x, self.camera_dead_zone.y);
        match self.camera_smoothing {
            Some(factor) => follow.with_smoothing(factor),
            None => follow,
        }
    }

    /// Engine builder carrying the window and timing settings.
    pub fn engine(&self) -> Engine {
        Engine::new()
            .with_title(self.title.clone())
            .with_size(self.width, self.height)
            .with_vsync(self.vsync)
            .with_fixed_timestep(self.tick)
            .with_asset_root(self.asset_root.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.title, "Platformer");
        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.tile_scaling, 0.5);
        assert_eq!(config.movement_speed, 9.0);
        assert_eq!(config.gravity, 1.0);
        assert_eq!(config.jump_speed, 22.0);
        assert_eq!(config.coin_score, 75);
        assert_eq!(config.player_start, Vec2::new(128.0, 128.0));
    }

    #[test]
    fn engine_builder_uses_window_settings() {
        let config = GameConfig::default()
            .with_window("Test", 800, 600)
            .with_vsync(false)
            .with_asset_root("/tmp/assets");
        let engine = config.engine();
        let engine_config = engine.config();
        assert_eq!(engine_config.title, "Test");
        assert_eq!((engine_config.width, engine_config.height), (800, 600));
        assert!(!engine_config.vsync);
        assert_eq!(engine_config.fixed_timestep, config.tick);
        assert_eq!(engine_config.asset_root, PathBuf::from("/tmp/assets"));
    }

    #[test]
    fn default_camera_locks_onto_the_player() {
        let follow = GameConfig::default().camera_follow();
        assert_eq!(follow.dead_zone, Vec2::ZERO);
        assert!(follow.smoothing.is_none());

        let smooth = GameConfig::default()
            .with_camera(Vec2::new(200.0, 120.0), Some(0.2))
            .camera_follow();
        assert_eq!(smooth.dead_zone, Vec2::new(200.0, 120.0));
        assert_eq!(smooth.smoothing, Some(0.2));
    }

    #[test]
    fn hazards_and_coins_get_distinct_tints() {
        let config = GameConfig::default();
        assert_ne!(config.layer_tint("Coins"), config.layer_tint("Don't Touch"));
    }
}
