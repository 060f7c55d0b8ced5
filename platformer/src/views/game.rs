use anyhow::Result;
use platformer_engine::{
    update_camera_follow, Camera2D, CameraFollow, FontHandle, Frame, HudAlign, HudLayer, HudText, Renderer, Vec2,
};

use super::{Signal, ViewUpdate};
use crate::{
    config::GameConfig,
    controls::Controls,
    session::{LevelSession, TickOutcome},
};

const HUD_SIZE: f32 = 20.0;
const HUD_MARGIN: f32 = 10.0;

/// One level in play, seen through a camera that follows the player.
pub struct GameView {
    session: LevelSession,
    camera: Camera2D,
    follow: CameraFollow,
    tick_seconds: f32,
    background: [f32; 4],
    text_color: [f32; 4],
}

impl GameView {
    pub fn new(session: LevelSession, config: &GameConfig) -> Self {
        let camera = Camera2D::new(session.player_position());
        Self {
            session,
            camera,
            follow: config.camera_follow(),
            tick_seconds: config.tick.as_secs_f32(),
            background: config.play_background,
            text_color: config.text_color,
        }
    }

    pub fn session(&self) -> &LevelSession {
        &self.session
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn level(&self) -> u32 {
        self.session.level()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    /// One fixed tick. Escape and restart win over gameplay input.
    pub fn update(&mut self, controls: &Controls) -> ViewUpdate {
        if controls.escape {
            return ViewUpdate::signal(Signal::EscapeRequested);
        }
        if controls.restart {
            return ViewUpdate::signal(Signal::RestartRequested);
        }

        let report = self.session.tick(controls);
        update_camera_follow(
            &mut self.camera,
            &self.follow,
            self.session.player_position(),
            self.tick_seconds,
        );

        let signal = match report.outcome {
            TickOutcome::Continue => None,
            TickOutcome::Died => Some(Signal::PlayerDied),
            TickOutcome::Finished => Some(Signal::LevelFinished),
        };
        ViewUpdate {
            cues: report.cues,
            signal,
        }
    }

    /// Score in the bottom-left corner, level number in the top-left.
    pub fn hud(&self, font: FontHandle, _width: u32, height: u32) -> HudLayer {
        let mut hud = HudLayer::new();
        hud.add_text(HudText {
            text: self.session.score_text(),
            font,
            size: HUD_SIZE,
            position: Vec2::new(HUD_MARGIN, HUD_MARGIN),
            color: self.text_color,
            align: HudAlign::Left,
        });
        hud.add_text(HudText {
            text: format!("Level {}", self.session.level()),
            font,
            size: HUD_SIZE,
            position: Vec2::new(HUD_MARGIN, height as f32 - HUD_MARGIN - HUD_SIZE),
            color: self.text_color,
            align: HudAlign::Left,
        });
        hud
    }

    pub fn draw(&self, renderer: &mut Renderer<'_>, frame: &mut Frame, font: FontHandle) -> Result<()> {
        renderer.clear(frame, self.background);
        self.session.scene().draw(renderer, frame, &self.camera)?;

        let (width, height) = renderer.surface_size();
        self.hud(font, width, height).draw(renderer, frame)
    }
}
