use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use ab_glyph::FontArc;
use thiserror::Error;

use crate::{
    audio::Sound,
    render::{FontHandle, Renderer, TextureHandle},
    tilemap::TileMapError,
};

/// Failure to load a file-backed asset. Every variant names the offending path.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("cannot decode sound {path}: {source}")]
    Sound {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("cannot load font {path}: {source}")]
    Font {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },
    #[error("invalid tile map {path}: {source}")]
    TileMap {
        path: PathBuf,
        #[source]
        source: TileMapError,
    },
}

impl AssetError {
    /// Path of the asset that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            AssetError::Io { path, .. }
            | AssetError::Image { path, .. }
            | AssetError::Sound { path, .. }
            | AssetError::Font { path, .. }
            | AssetError::TileMap { path, .. } => path,
        }
    }
}

/// Read a whole file, tagging failures with the path.
pub fn read_file(path: &Path) -> Result<Vec<u8>, AssetError> {
    fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads assets relative to a root directory and caches them by relative path.
pub struct AssetManager {
    root: PathBuf,
    textures: HashMap<String, TextureHandle>,
    sounds: HashMap<String, Sound>,
    fonts: HashMap<String, FontHandle>,
}

impl AssetManager {
    /// Create an asset manager rooted at `root` with no cached assets.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: HashMap::new(),
            sounds: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute (or root-relative) path for an asset key such as `sounds/coin.wav`.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Decode an image asset into RGBA8 pixels.
    pub fn load_image(&self, key: &str) -> Result<image::RgbaImage, AssetError> {
        let path = self.path(key);
        let bytes = read_file(&path)?;
        let image = image::load_from_memory(&bytes)
            .map_err(|source| AssetError::Image { path, source })?;
        Ok(image.to_rgba8())
    }

    /// Load a texture, returning the cached handle if it was loaded before.
    pub fn load_texture(
        &mut self,
        renderer: &mut Renderer<'_>,
        key: &str,
    ) -> anyhow::Result<TextureHandle> {
        if let Some(handle) = self.get_texture(key) {
            return Ok(handle);
        }

        let image = self.load_image(key)?;
        let (width, height) = image.dimensions();
        let handle = renderer.load_texture_from_rgba(&image, width, height)?;
        log::debug!("loaded texture {} ({}x{})", key, width, height);
        self.textures.insert(key.to_string(), handle);
        Ok(handle)
    }

    /// Get a cached texture handle by key, if it exists.
    pub fn get_texture(&self, key: &str) -> Option<TextureHandle> {
        self.textures.get(key).copied()
    }

    /// Load and validate a sound. Decoding errors surface here rather than at play time.
    pub fn load_sound(&mut self, key: &str) -> Result<Sound, AssetError> {
        if let Some(sound) = self.sounds.get(key) {
            return Ok(sound.clone());
        }

        let path = self.path(key);
        let bytes = read_file(&path)?;
        let sound = Sound::from_bytes(bytes).map_err(|source| AssetError::Sound { path, source })?;
        self.sounds.insert(key.to_string(), sound.clone());
        Ok(sound)
    }

    /// Load a TTF/OTF font and register it with the renderer.
    pub fn load_font(&mut self, renderer: &mut Renderer<'_>, key: &str) -> Result<FontHandle, AssetError> {
        if let Some(handle) = self.fonts.get(key) {
            return Ok(*handle);
        }

        let font = parse_font(&self.path(key))?;
        let handle = renderer.register_font(font);
        self.fonts.insert(key.to_string(), handle);
        Ok(handle)
    }
}

fn parse_font(path: &Path) -> Result<FontArc, AssetError> {
    let bytes = read_file(path)?;
    FontArc::try_from_vec(bytes).map_err(|source| AssetError::Font {
        path: path.to_path_buf(),
        source,
    })
}
