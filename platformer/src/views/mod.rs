//! The two screens of the game and the transitions between them.

mod game;
mod start;

pub use game::GameView;
pub use start::StartView;

use anyhow::Result;
use platformer_engine::{FontHandle, Frame, Renderer};

use crate::{controls::Controls, error::GameError, levels::SessionFactory, session::SoundCue};

/// What a view asks the phase machine to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    StartRequested,
    QuitRequested,
    PlayerDied,
    LevelFinished,
    EscapeRequested,
    RestartRequested,
}

/// Result of one fixed tick of the active view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub cues: Vec<SoundCue>,
    pub signal: Option<Signal>,
}

impl ViewUpdate {
    pub fn signal(signal: Signal) -> Self {
        Self {
            cues: Vec::new(),
            signal: Some(signal),
        }
    }
}

pub enum Phase {
    Start(StartView),
    Playing(GameView),
}

impl Phase {
    /// Level in play, `None` on the start screen.
    pub fn level(&self) -> Option<u32> {
        match self {
            Phase::Start(_) => None,
            Phase::Playing(game) => Some(game.level()),
        }
    }

    pub fn score(&self) -> Option<u32> {
        match self {
            Phase::Start(start) => start.last_score(),
            Phase::Playing(game) => Some(game.score()),
        }
    }

    pub fn update(&mut self, controls: &Controls) -> ViewUpdate {
        match self {
            Phase::Start(start) => ViewUpdate {
                cues: Vec::new(),
                signal: start.update(controls),
            },
            Phase::Playing(game) => game.update(controls),
        }
    }

    /// Move to the next phase. Signals that do not apply to the current phase leave it unchanged.
    ///
    /// Fails only when a level cannot be loaded.
    pub fn apply(self, signal: Signal, factory: &SessionFactory) -> Result<Phase, GameError> {
        let config = factory.config();
        let next = match (self, signal) {
            (Phase::Start(_), Signal::StartRequested) => {
                log::info!("starting a new game");
                Phase::Playing(GameView::new(factory.session(1, 0)?, config))
            }
            (Phase::Playing(game), Signal::PlayerDied) => {
                let (level, score) = (game.level(), game.score());
                log::info!("restarting level {} with score {}", level, score);
                Phase::Playing(GameView::new(factory.session(level, score)?, config))
            }
            (Phase::Playing(game), Signal::LevelFinished) => {
                let (next, score) = (game.level() + 1, game.score());
                if factory.has_level(next) {
                    log::info!("advancing to level {} with score {}", next, score);
                    Phase::Playing(GameView::new(factory.session(next, score)?, config))
                } else {
                    log::info!("all levels cleared with score {}", score);
                    Phase::Start(StartView::new(config).with_last_score(score).cleared())
                }
            }
            (Phase::Playing(game), Signal::EscapeRequested) => {
                log::info!("back to the start screen from level {}", game.level());
                Phase::Start(StartView::new(config).with_last_score(game.score()))
            }
            (Phase::Playing(_), Signal::RestartRequested) => {
                log::info!("restart requested, score cleared");
                Phase::Start(StartView::new(config))
            }
            (phase, _) => phase,
        };
        Ok(next)
    }

    pub fn draw(&self, renderer: &mut Renderer<'_>, frame: &mut Frame, font: FontHandle) -> Result<()> {
        match self {
            Phase::Start(start) => start.draw(renderer, frame, font),
            Phase::Playing(game) => game.draw(renderer, frame, font),
        }
    }
}
