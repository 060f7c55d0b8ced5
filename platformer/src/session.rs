//! One level being played: scene, player physics, score and the per-tick rules.

use platformer_engine::{PlatformerPhysics, Scene, SpriteId, TextureHandle, TileMap, Vec2};

use crate::{config::GameConfig, controls::Controls, error::GameError};

pub const PLATFORMS: &str = "Platforms";
pub const COINS: &str = "Coins";
pub const HAZARDS: &str = "Don't Touch";
pub const FOREGROUND: &str = "Foreground";
pub const PLAYER: &str = "Player";

/// How the player sprite looks before scaling.
#[derive(Clone, Copy, Debug)]
pub struct PlayerTemplate {
    pub texture: TextureHandle,
    pub size: Vec2,
}

/// A sound the session wants played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Coin,
    Jump,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Touched a hazard or fell out of the world.
    Died,
    /// Reached the right edge of the map.
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub cues: Vec<SoundCue>,
    pub outcome: TickOutcome,
}

pub struct LevelSession {
    level: u32,
    score: u32,
    end_of_map: f32,
    scene: Scene,
    player: SpriteId,
    physics: PlatformerPhysics,
    movement_speed: f32,
    jump_speed: f32,
    coin_score: u32,
    fall_limit: f32,
}

impl LevelSession {
    pub fn new(
        level: u32,
        score: u32,
        map: &TileMap,
        player: PlayerTemplate,
        tile_texture: TextureHandle,
        config: &GameConfig,
    ) -> Result<Self, GameError> {
        if map.layer(PLATFORMS).is_none() {
            return Err(GameError::MissingLayer {
                level,
                layer: PLATFORMS,
            });
        }

        let mut scene = Scene::from_tilemap(map, tile_texture, |layer| config.layer_tint(layer));
        scene.add_layer_after(PLAYER, FOREGROUND);

        let size = player.size * config.player_scaling;
        let start = config.player_start;
        let player_id = scene.add_sprite(PLAYER, start, size, player.texture, [1.0; 4]);

        let walls = map.solid_rects(PLATFORMS);
        let physics = PlatformerPhysics::new(&walls, start, size, config.gravity);
        let end_of_map = map.pixel_width();

        log::info!("level {} ready, score {}", level, score);
        log::debug!(
            "level {}: {} wall boxes, {} coins, end of map at x={}",
            level,
            walls.len(),
            scene.layer(COINS).map_or(0, |layer| layer.len()),
            end_of_map
        );

        Ok(Self {
            level,
            score,
            end_of_map,
            scene,
            player: player_id,
            physics,
            movement_speed: config.movement_speed,
            jump_speed: config.jump_speed,
            coin_score: config.coin_score,
            fall_limit: config.fall_limit,
        })
    }

    /// Advance one fixed tick.
    pub fn tick(&mut self, controls: &Controls) -> TickReport {
        let mut cues = Vec::new();

        self.physics
            .set_horizontal_velocity(controls.horizontal * self.movement_speed);
        if controls.jump && self.physics.can_jump() {
            self.physics.jump(self.jump_speed);
            cues.push(SoundCue::Jump);
        }

        self.physics.update();
        let position = self.physics.position();
        if let Some(sprite) = self.scene.sprite_mut(self.player) {
            sprite.position = position;
        }
        let player_rect = self.physics.player_rect();

        for coin in self.scene.overlapping(COINS, &player_rect) {
            if self.scene.remove_sprite(coin) {
                self.score += self.coin_score;
                cues.push(SoundCue::Coin);
                log::debug!("coin collected, score {}", self.score);
            }
        }

        let touched_hazard = !self.scene.overlapping(HAZARDS, &player_rect).is_empty();
        if touched_hazard || position.y < self.fall_limit {
            log::info!(
                "player died on level {} ({})",
                self.level,
                if touched_hazard { "hazard" } else { "fell" }
            );
            cues.push(SoundCue::GameOver);
            return TickReport {
                cues,
                outcome: TickOutcome::Died,
            };
        }

        let outcome = if position.x >= self.end_of_map {
            log::info!("level {} finished with score {}", self.level, self.score);
            TickOutcome::Finished
        } else {
            TickOutcome::Continue
        };
        TickReport { cues, outcome }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Right edge of the map in world units.
    pub fn end_of_map(&self) -> f32 {
        self.end_of_map
    }

    pub fn player_position(&self) -> Vec2 {
        self.physics.position()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn coins_remaining(&self) -> usize {
        self.scene.layer(COINS).map_or(0, |layer| layer.len())
    }
}

#[cfg(test)]
mod tests {
    use platformer_engine::TextureHandle;

    use super::*;
    use crate::levels::testing::{ascii_map, coin_run, flat, player};

    const RIGHT: Controls = Controls {
        horizontal: 1.0,
        jump: false,
        start: false,
        escape: false,
        restart: false,
    };

    fn session(json: &str, score: u32) -> LevelSession {
        let config = GameConfig::default();
        let map = TileMap::parse(json, config.tile_scaling).unwrap();
        LevelSession::new(1, score, &map, player(), TextureHandle::from_raw(1), &config).unwrap()
    }

    fn run_until_outcome(session: &mut LevelSession, controls: &Controls, max_ticks: usize) -> (TickOutcome, Vec<SoundCue>) {
        let mut cues = Vec::new();
        for _ in 0..max_ticks {
            let report = session.tick(controls);
            cues.extend(report.cues);
            if report.outcome != TickOutcome::Continue {
                return (report.outcome, cues);
            }
        }
        (TickOutcome::Continue, cues)
    }

    #[test]
    fn player_is_drawn_above_the_foreground() {
        let session = session(&coin_run(), 0);
        let names: Vec<_> = session.scene().layer_names().collect();
        assert_eq!(names, ["Platforms", "Coins", "Don't Touch", "Foreground", "Player"]);
        assert_eq!(session.player_position(), Vec2::new(128.0, 128.0));
    }

    #[test]
    fn end_of_map_is_map_width_in_world_units() {
        let session = session(&coin_run(), 0);
        assert_eq!(session.end_of_map(), 10.0 * 128.0 * 0.5);
    }

    #[test]
    fn each_coin_scores_75_exactly_once() {
        let mut session = session(&coin_run(), 0);
        assert_eq!(session.coins_remaining(), 3);

        let mut coin_cues = 0;
        for _ in 0..30 {
            let report = session.tick(&RIGHT);
            coin_cues += report.cues.iter().filter(|&&c| c == SoundCue::Coin).count();
        }

        assert_eq!(coin_cues, 2);
        assert_eq!(session.score(), 150);
        assert_eq!(session.coins_remaining(), 1);
        assert_eq!(session.score_text(), "Score: 150");
    }

    #[test]
    fn standing_still_collects_nothing() {
        let mut session = session(&coin_run(), 0);
        for _ in 0..60 {
            assert_eq!(session.tick(&Controls::default()).outcome, TickOutcome::Continue);
        }
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn hazard_contact_kills_with_game_over_cue() {
        let map = ascii_map(&[
            "......",
            "......",
            "...x..",
            "######",
        ]);
        let mut session = session(&map, 225);
        let (outcome, cues) = run_until_outcome(&mut session, &RIGHT, 60);
        assert_eq!(outcome, TickOutcome::Died);
        assert_eq!(cues.last(), Some(&SoundCue::GameOver));
        assert_eq!(session.score(), 225);
    }

    #[test]
    fn falling_out_of_the_world_kills() {
        let map = ascii_map(&["....", "....", "...."]);
        let mut session = session(&map, 0);
        let (outcome, _) = run_until_outcome(&mut session, &Controls::default(), 120);
        assert_eq!(outcome, TickOutcome::Died);
        assert!(session.player_position().y < GameConfig::default().fall_limit);
    }

    #[test]
    fn walking_past_the_right_edge_finishes() {
        let mut session = session(&flat(8), 0);
        let (outcome, _) = run_until_outcome(&mut session, &RIGHT, 200);
        assert_eq!(outcome, TickOutcome::Finished);
        assert!(session.player_position().x >= session.end_of_map());
    }

    #[test]
    fn jump_only_from_the_ground() {
        let mut session = session(&flat(8), 0);
        let jump = Controls {
            jump: true,
            ..Controls::default()
        };

        // Still falling from the spawn point.
        assert!(session.tick(&jump).cues.is_empty());

        for _ in 0..30 {
            session.tick(&Controls::default());
        }
        assert_eq!(session.tick(&jump).cues, vec![SoundCue::Jump]);
        assert!(session.tick(&jump).cues.is_empty());
    }

    #[test]
    fn platforms_layer_is_required() {
        let json = r#"{"width": 2, "height": 2, "tilewidth": 128, "tileheight": 128, "layers": [
            {"name": "Coins", "type": "tilelayer", "data": [0, 0, 0, 0]}
        ]}"#;
        let config = GameConfig::default();
        let map = TileMap::parse(json, config.tile_scaling).unwrap();
        let result = LevelSession::new(4, 0, &map, player(), TextureHandle::from_raw(1), &config);
        assert!(matches!(
            result,
            Err(GameError::MissingLayer { level: 4, layer: PLATFORMS })
        ));
    }
}
