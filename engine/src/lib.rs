//! platformer-engine - the 2D engine layer under the platformer game.
//!
//! Window and event loop, fixed timestep, keyboard input, a wgpu sprite renderer with
//! text and HUD, rodio audio, an asset manager, Tiled maps, sprite-layer scenes,
//! rapier-backed platformer physics and a follow camera.

pub mod assets;
pub mod audio;
pub mod camera;
pub mod engine;
pub mod hud;
pub mod input;
pub mod math;
pub mod physics;
pub mod render;
pub mod scene;
pub mod tilemap;

pub use crate::assets::{AssetError, AssetManager};
pub use crate::audio::{AudioSystem, Sound};
pub use crate::camera::{update_camera_follow, CameraFollow};
pub use crate::engine::{Engine, EngineConfig, EngineContext, FixedTimestep, Game};
pub use crate::hud::{HudAlign, HudLayer, HudRect, HudText};
pub use crate::input::InputState;
pub use crate::math::{Camera2D, Rect, Transform2D, Vec2};
pub use crate::physics::PlatformerPhysics;
pub use crate::render::{FontHandle, Frame, Renderer, TextureHandle};
pub use crate::scene::{Scene, SceneSprite, SpriteId, SpriteLayer};
pub use crate::tilemap::{TileLayer, TileMap, TileMapError};
pub use winit::keyboard::KeyCode;
