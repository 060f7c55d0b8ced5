use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

use crate::{
    assets::{AssetError, AssetManager},
    audio::{AudioSystem, Sound},
    input::InputState,
    render::{FontHandle, Renderer, TextureHandle},
};

/// Longest frame delta fed into the fixed-step accumulator.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Configuration values for the engine window and runtime behavior.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub fixed_timestep: Duration,
    pub asset_root: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Platformer".into(),
            width: 1280,
            height: 720,
            vsync: true,
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
            asset_root: PathBuf::from("assets"),
        }
    }
}

/// Main entrypoint for running a game.
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create a new engine instance with default configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Override the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Override the initial window size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Enable or disable vertical sync.
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    /// Length of one fixed update. Zero is ignored.
    #[must_use]
    pub fn with_fixed_timestep(mut self, step: Duration) -> Self {
        if !step.is_zero() {
            self.config.fixed_timestep = step;
        }
        self
    }

    /// Directory that asset keys are resolved against.
    #[must_use]
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.asset_root = root.into();
        self
    }

    /// Run the provided game until the window is closed or the game requests exit.
    ///
    /// An error from any game hook stops the loop and is returned here.
    #[allow(deprecated)]
    pub fn run<G: Game>(self, mut game: G) -> Result<()> {
        let config = self.config;

        let event_loop = EventLoop::new()?;
        let window_attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height));
        let window = event_loop.create_window(window_attributes)?;

        // Leak the window to get a 'static reference; it lives for the whole program.
        let window: &'static Window = Box::leak(Box::new(window));

        let mut ctx = EngineContext::new(window, &config)?;
        game.init(&mut ctx)?;
        log::info!("engine started: {} ({}x{})", config.title, config.width, config.height);

        let mut failure: Option<anyhow::Error> = None;
        let mut last_frame = Instant::now();
        event_loop.run(|event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);
            match event {
                Event::NewEvents(_) => {
                    ctx.begin_frame();
                }
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        log::info!("window close requested");
                        elwt.exit();
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        ctx.input.handle_key(&event);
                    }
                    WindowEvent::Resized(new_size) => {
                        ctx.resize_renderer(new_size);
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(err) = game.draw(&mut ctx) {
                            log::error!("error during draw: {err:?}");
                            failure = Some(err);
                            elwt.exit();
                            return;
                        }

                        if ctx.exit_requested {
                            elwt.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if failure.is_some() {
                        return;
                    }

                    let now = Instant::now();
                    ctx.update_time(now - last_frame);
                    last_frame = now;

                    if let Err(err) = game.update(&mut ctx) {
                        log::error!("error during update: {err:?}");
                        failure = Some(err);
                        elwt.exit();
                        return;
                    }

                    if ctx.exit_requested {
                        elwt.exit();
                        return;
                    }

                    ctx.window.request_redraw();
                }
                _ => {}
            }
        })?;

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-step accumulator. Frame deltas are clamped so one long stall cannot
/// demand an unbounded number of catch-up steps.
#[derive(Clone, Copy, Debug)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
}

impl FixedTimestep {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add a frame's worth of real time.
    pub fn advance(&mut self, delta: Duration) {
        self.accumulator += delta.min(MAX_FRAME_DELTA);
    }

    /// Consume one step if enough time has accumulated.
    pub fn consume(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }
}

/// Shared context provided to game code each frame.
pub struct EngineContext<'window> {
    window: &'window Window,
    delta_time: Duration,
    elapsed_time: Duration,
    fixed: FixedTimestep,
    exit_requested: bool,
    input: InputState,
    renderer: Renderer<'window>,
    assets: AssetManager,
    audio: AudioSystem,
}

impl<'window> EngineContext<'window> {
    fn new(window: &'window Window, config: &EngineConfig) -> Result<Self> {
        let renderer = Renderer::new(window, config.vsync)?;
        let audio = AudioSystem::new();

        Ok(Self {
            window,
            delta_time: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            fixed: FixedTimestep::new(config.fixed_timestep),
            exit_requested: false,
            input: InputState::new(),
            renderer,
            assets: AssetManager::new(config.asset_root.clone()),
            audio,
        })
    }

    fn begin_frame(&mut self) {
        self.input.begin_frame();
    }

    fn update_time(&mut self, delta: Duration) {
        self.delta_time = delta;
        self.elapsed_time += delta;
        self.fixed.advance(delta);
    }

    fn resize_renderer(&mut self, new_size: PhysicalSize<u32>) {
        self.renderer.resize(new_size);
    }

    /// Duration between the current and previous frames.
    pub fn delta_time(&self) -> Duration {
        self.delta_time
    }

    /// Total time elapsed since the engine started running.
    pub fn elapsed_time(&self) -> Duration {
        self.elapsed_time
    }

    /// Fixed timestep duration (1/60 second unless configured).
    pub fn fixed_delta_time(&self) -> Duration {
        self.fixed.step()
    }

    /// Check if a fixed timestep update should run and consume accumulated time.
    ///
    /// Call this in a loop until it returns `false` to handle multiple fixed updates per frame.
    pub fn should_run_fixed_update(&mut self) -> bool {
        self.fixed.consume()
    }

    /// Access the current input state.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Request that the engine exit after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Access the renderer for drawing operations.
    pub fn renderer(&mut self) -> &mut Renderer<'window> {
        &mut self.renderer
    }

    /// Load a texture through the asset manager.
    pub fn load_texture(&mut self, key: &str) -> Result<TextureHandle> {
        self.assets.load_texture(&mut self.renderer, key)
    }

    /// Load and validate a sound through the asset manager.
    pub fn load_sound(&mut self, key: &str) -> Result<Sound, AssetError> {
        self.assets.load_sound(key)
    }

    /// Load a font through the asset manager and register it with the renderer.
    pub fn load_font(&mut self, key: &str) -> Result<FontHandle, AssetError> {
        self.assets.load_font(&mut self.renderer, key)
    }

    /// Access the audio system for playing sounds.
    pub fn audio(&self) -> &AudioSystem {
        &self.audio
    }
}

/// Trait implemented by user code to hook into the engine lifecycle.
pub trait Game {
    /// Called once after the window is created but before the first frame.
    fn init(&mut self, _ctx: &mut EngineContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Update game state. Called once per frame before drawing.
    fn update(&mut self, ctx: &mut EngineContext<'_>) -> Result<()>;

    /// Draw the current frame. Called after update when a redraw is requested.
    fn draw(&mut self, ctx: &mut EngineContext<'_>) -> Result<()>;
}
