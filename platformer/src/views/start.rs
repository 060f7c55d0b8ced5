use anyhow::Result;
use platformer_engine::{FontHandle, Frame, HudAlign, HudLayer, HudText, Renderer, Vec2};

use super::Signal;
use crate::{config::GameConfig, controls::Controls};

const TITLE_SIZE: f32 = 48.0;
const LINE_SIZE: f32 = 24.0;
const LINE_SPACING: f32 = 40.0;

/// Title screen. Shows the result of the previous run, if any.
#[derive(Clone, Debug)]
pub struct StartView {
    title: String,
    last_score: Option<u32>,
    all_cleared: bool,
    background: [f32; 4],
    text_color: [f32; 4],
}

impl StartView {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            title: config.title.clone(),
            last_score: None,
            all_cleared: false,
            background: config.start_background,
            text_color: config.text_color,
        }
    }

    #[must_use]
    pub fn with_last_score(mut self, score: u32) -> Self {
        self.last_score = Some(score);
        self
    }

    /// Mark that the player made it through every level.
    #[must_use]
    pub fn cleared(mut self) -> Self {
        self.all_cleared = true;
        self
    }

    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    pub fn all_cleared(&self) -> bool {
        self.all_cleared
    }

    pub fn update(&mut self, controls: &Controls) -> Option<Signal> {
        if controls.start {
            Some(Signal::StartRequested)
        } else if controls.escape {
            Some(Signal::QuitRequested)
        } else {
            None
        }
    }

    /// Text shown below the title, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec!["Press Enter to start".to_string()];
        if self.all_cleared {
            lines.push("All levels cleared!".to_string());
        }
        if let Some(score) = self.last_score {
            lines.push(format!("Last score: {score}"));
        }
        lines
    }

    pub fn hud(&self, font: FontHandle, width: u32, height: u32) -> HudLayer {
        let center_x = width as f32 / 2.0;
        let mut y = height as f32 / 2.0 + LINE_SPACING * 1.5;

        let mut hud = HudLayer::new();
        hud.add_text(HudText {
            text: self.title.clone(),
            font,
            size: TITLE_SIZE,
            position: Vec2::new(center_x, y),
            color: self.text_color,
            align: HudAlign::Center,
        });
        y -= LINE_SPACING * 1.5;

        for line in self.lines() {
            hud.add_text(HudText {
                text: line,
                font,
                size: LINE_SIZE,
                position: Vec2::new(center_x, y),
                color: self.text_color,
                align: HudAlign::Center,
            });
            y -= LINE_SPACING;
        }
        hud
    }

    pub fn draw(&self, renderer: &mut Renderer<'_>, frame: &mut Frame, font: FontHandle) -> Result<()> {
        renderer.clear(frame, self.background);
        let (width, height) = renderer.surface_size();
        self.hud(font, width, height).draw(renderer, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_key_requests_a_new_game() {
        let mut view = StartView::new(&GameConfig::default());
        assert_eq!(view.update(&Controls::default()), None);

        let start = Controls {
            start: true,
            ..Controls::default()
        };
        assert_eq!(view.update(&start), Some(Signal::StartRequested));
    }

    #[test]
    fn escape_on_the_title_screen_quits() {
        let mut view = StartView::new(&GameConfig::default());
        let escape = Controls {
            escape: true,
            ..Controls::default()
        };
        assert_eq!(view.update(&escape), Some(Signal::QuitRequested));
    }

    #[test]
    fn fresh_screen_only_prompts() {
        let view = StartView::new(&GameConfig::default());
        assert_eq!(view.lines(), ["Press Enter to start"]);
    }

    #[test]
    fn finished_run_shows_banner_and_score() {
        let view = StartView::new(&GameConfig::default()).with_last_score(450).cleared();
        assert_eq!(
            view.lines(),
            ["Press Enter to start", "All levels cleared!", "Last score: 450"]
        );

        let hud = view.hud(FontHandle::from_raw(1), 1280, 720);
        assert_eq!(hud.texts().next(), Some("Platformer"));
        assert_eq!(hud.len(), 4);
    }
}
