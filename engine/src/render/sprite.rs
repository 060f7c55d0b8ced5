/// Opaque handle used to reference textures owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) u32);

impl TextureHandle {
    /// Wrap a raw id. Handles the renderer never issued fail to draw.
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }
}
