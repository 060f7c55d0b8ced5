//! Wires the phase machine into the engine's game loop.

use std::mem;

use anyhow::{anyhow, Context, Result};
use platformer_engine::{AudioSystem, EngineContext, FontHandle, Game, Sound, Vec2};

use crate::{
    config::GameConfig,
    controls::{ControlLatch, Controls},
    levels::{LevelCatalog, SessionFactory},
    session::{PlayerTemplate, SoundCue},
    views::{Phase, Signal, StartView},
};

pub const PLAYER_IMAGE: &str = "images/player.png";
pub const COIN_SOUND: &str = "sounds/coin.wav";
pub const JUMP_SOUND: &str = "sounds/jump.wav";
pub const GAME_OVER_SOUND: &str = "sounds/gameover.wav";
pub const HUD_FONT: &str = "fonts/DejaVuSans.ttf";

struct Sounds {
    coin: Sound,
    jump: Sound,
    game_over: Sound,
}

impl Sounds {
    fn get(&self, cue: SoundCue) -> &Sound {
        match cue {
            SoundCue::Coin => &self.coin,
            SoundCue::Jump => &self.jump,
            SoundCue::GameOver => &self.game_over,
        }
    }

    fn play(&self, audio: &AudioSystem, cue: SoundCue) {
        if let Err(err) = audio.play(self.get(cue)) {
            log::warn!("could not play {:?} sound: {err:#}", cue);
        }
    }
}

/// Everything that exists once assets are loaded.
struct Running {
    factory: SessionFactory,
    sounds: Sounds,
    font: FontHandle,
    phase: Phase,
}

pub struct PlatformerApp {
    config: GameConfig,
    catalog: LevelCatalog,
    latch: ControlLatch,
    running: Option<Running>,
}

impl PlatformerApp {
    pub fn new(config: GameConfig, catalog: LevelCatalog) -> Self {
        Self {
            config,
            catalog,
            latch: ControlLatch::new(),
            running: None,
        }
    }
}

impl Game for PlatformerApp {
    fn init(&mut self, ctx: &mut EngineContext<'_>) -> Result<()> {
        let texture = ctx
            .load_texture(PLAYER_IMAGE)
            .with_context(|| format!("loading {PLAYER_IMAGE}"))?;
        let (width, height) = ctx
            .renderer()
            .texture_size(texture)
            .ok_or_else(|| anyhow!("player texture vanished after loading"))?;
        let player = PlayerTemplate {
            texture,
            size: Vec2::new(width as f32, height as f32),
        };

        let sounds = Sounds {
            coin: ctx.load_sound(COIN_SOUND)?,
            jump: ctx.load_sound(JUMP_SOUND)?,
            game_over: ctx.load_sound(GAME_OVER_SOUND)?,
        };
        let font = ctx.load_font(HUD_FONT)?;
        let tile_texture = ctx.renderer().white_texture();

        let factory = SessionFactory::new(self.catalog.clone(), player, tile_texture, self.config.clone());
        log::info!("assets loaded, showing the start screen");

        self.running = Some(Running {
            factory,
            sounds,
            font,
            phase: Phase::Start(StartView::new(&self.config)),
        });
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext<'_>) -> Result<()> {
        let Some(running) = self.running.as_mut() else {
            return Ok(());
        };

        self.latch.latch(Controls::from_input(ctx.input()));

        while ctx.should_run_fixed_update() {
            let controls = self.latch.take();
            let update = running.phase.update(&controls);

            for cue in update.cues {
                running.sounds.play(ctx.audio(), cue);
            }

            match update.signal {
                None => {}
                Some(Signal::QuitRequested) => {
                    log::info!("quit requested");
                    ctx.request_exit();
                    return Ok(());
                }
                Some(signal) => {
                    let placeholder = Phase::Start(StartView::new(&self.config));
                    let phase = mem::replace(&mut running.phase, placeholder);
                    running.phase = phase.apply(signal, &running.factory)?;
                }
            }
        }

        Ok(())
    }

    fn draw(&mut self, ctx: &mut EngineContext<'_>) -> Result<()> {
        let Some(running) = self.running.as_ref() else {
            return Ok(());
        };

        let renderer = ctx.renderer();
        let mut frame = renderer.begin_frame()?;
        running.phase.draw(renderer, &mut frame, running.font)?;
        renderer.end_frame(frame)?;
        Ok(())
    }
}
