mod sprite;
mod text;
mod wgpu_backend;

pub use sprite::TextureHandle;
pub use text::{FontHandle, GlyphCacheEntry, RasterizedGlyph, TextRenderer};
pub use wgpu_backend::{Frame, Renderer};
