use std::collections::HashMap;

use ab_glyph::{Font, FontArc, Glyph, GlyphId, PxScale, ScaleFont};
use anyhow::{anyhow, Result};

use crate::render::TextureHandle;

/// A font loaded and ready for text rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontHandle(pub(crate) u32);

impl FontHandle {
    /// Wrap a raw id. Handles no renderer issued fail to draw.
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }
}

/// Cached glyph information. Whitespace has no texture, only an advance.
#[derive(Clone, Copy, Debug)]
pub struct GlyphCacheEntry {
    pub texture: Option<TextureHandle>,
    pub width: f32,
    pub height: f32,
    pub bearing_x: f32,
    pub bearing_y: f32,
    pub advance: f32,
}

/// CPU-side result of rasterizing one glyph.
pub struct RasterizedGlyph {
    /// RGBA8 coverage bitmap (white with alpha), or `None` for glyphs with no outline.
    pub pixels: Option<(Vec<u8>, u32, u32)>,
    /// Horizontal offset from the pen position to the bitmap's left edge.
    pub bearing_x: f32,
    /// Height of the bitmap's top edge above the baseline.
    pub bearing_y: f32,
    pub advance: f32,
}

/// Text renderer that manages fonts and glyph caching.
pub struct TextRenderer {
    fonts: HashMap<FontHandle, FontArc>,
    next_font_id: u32,
    glyph_cache: HashMap<(FontHandle, char, u32), GlyphCacheEntry>, // (font, char, size) -> entry
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            next_font_id: 1,
            glyph_cache: HashMap::new(),
        }
    }

    /// Register a parsed font and return its handle.
    pub fn register_font(&mut self, font: FontArc) -> FontHandle {
        let handle = FontHandle(self.next_font_id);
        self.next_font_id += 1;
        self.fonts.insert(handle, font);
        handle
    }

    /// Get a cached glyph or return None if not cached.
    pub fn get_glyph(&self, font: FontHandle, ch: char, size: f32) -> Option<&GlyphCacheEntry> {
        self.glyph_cache.get(&(font, ch, size as u32))
    }

    pub(crate) fn has_glyph(&self, font: FontHandle, ch: char, size: f32) -> bool {
        self.glyph_cache.contains_key(&(font, ch, size as u32))
    }

    pub(crate) fn cache_glyph(&mut self, font: FontHandle, ch: char, size: f32, entry: GlyphCacheEntry) {
        self.glyph_cache.insert((font, ch, size as u32), entry);
    }

    fn font(&self, handle: FontHandle) -> Result<&FontArc> {
        self.fonts
            .get(&handle)
            .ok_or_else(|| anyhow!("Font handle not found"))
    }

    /// Rasterize a glyph into an RGBA bitmap without touching the cache.
    pub fn rasterize(&self, font: FontHandle, ch: char, size: f32) -> Result<RasterizedGlyph> {
        let font = self.font(font)?;
        let scale = PxScale::from(size);
        let scaled_font = font.as_scaled(scale);
        let glyph_id = font.glyph_id(ch);
        let advance = scaled_font.h_advance(glyph_id);

        let glyph = Glyph {
            id: glyph_id,
            scale,
            position: ab_glyph::point(0.0, 0.0),
        };

        let Some(outlined) = scaled_font.outline_glyph(glyph) else {
            return Ok(RasterizedGlyph {
                pixels: None,
                bearing_x: 0.0,
                bearing_y: 0.0,
                advance,
            });
        };

        let bounds = outlined.px_bounds();
        let width = bounds.width().ceil() as u32;
        let height = bounds.height().ceil() as u32;
        if width == 0 || height == 0 {
            return Ok(RasterizedGlyph {
                pixels: None,
                bearing_x: 0.0,
                bearing_y: 0.0,
                advance,
            });
        }

        let mut image_data = vec![0u8; (width * height * 4) as usize];
        outlined.draw(|x, y, c| {
            if x < width && y < height {
                let idx = ((y * width + x) * 4) as usize;
                image_data[idx] = 255;
                image_data[idx + 1] = 255;
                image_data[idx + 2] = 255;
                image_data[idx + 3] = (c.clamp(0.0, 1.0) * 255.0) as u8;
            }
        });

        Ok(RasterizedGlyph {
            pixels: Some((image_data, width, height)),
            bearing_x: bounds.min.x,
            // ab_glyph bounds are y-down relative to the baseline.
            bearing_y: -bounds.min.y,
            advance,
        })
    }

    /// Width of a line of text, including kerning.
    pub fn measure_text(&self, font: FontHandle, text: &str, size: f32) -> Result<f32> {
        let font = self.font(font)?;
        let scaled_font = font.as_scaled(PxScale::from(size));

        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled_font.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled_font.kern(prev, id);
            }
            width += scaled_font.h_advance(id);
            previous = Some(id);
        }
        Ok(width)
    }

    /// Kerning adjustment between two characters.
    pub fn kern(&self, font: FontHandle, prev: char, next: char, size: f32) -> Result<f32> {
        let font = self.font(font)?;
        let scaled_font = font.as_scaled(PxScale::from(size));
        Ok(scaled_font.kern(scaled_font.glyph_id(prev), scaled_font.glyph_id(next)))
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer_with_font() -> (TextRenderer, FontHandle) {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../assets/fonts/DejaVuSans.ttf");
        let bytes = std::fs::read(path).unwrap();
        let mut text = TextRenderer::new();
        let handle = text.register_font(FontArc::try_from_vec(bytes).unwrap());
        (text, handle)
    }

    #[test]
    fn whitespace_has_advance_but_no_bitmap() {
        let (text, font) = renderer_with_font();
        let space = text.rasterize(font, ' ', 24.0).unwrap();
        assert!(space.pixels.is_none());
        assert!(space.advance > 0.0);
    }

    #[test]
    fn letters_rasterize_above_the_baseline() {
        let (text, font) = renderer_with_font();
        let glyph = text.rasterize(font, 'H', 32.0).unwrap();
        let (pixels, width, height) = glyph.pixels.unwrap();
        assert_eq!(pixels.len(), (width * height * 4) as usize);
        assert!(glyph.bearing_y > 0.0);
        assert!(pixels.chunks(4).any(|p| p[3] > 0));
    }

    #[test]
    fn measure_grows_with_text_and_size() {
        let (text, font) = renderer_with_font();
        let short = text.measure_text(font, "Score", 24.0).unwrap();
        let long = text.measure_text(font, "Score: 150", 24.0).unwrap();
        let big = text.measure_text(font, "Score", 48.0).unwrap();
        assert!(short > 0.0);
        assert!(long > short);
        assert!(big > short * 1.5);
        assert_eq!(text.measure_text(font, "", 24.0).unwrap(), 0.0);
    }

    #[test]
    fn unknown_font_is_an_error() {
        let text = TextRenderer::new();
        assert!(text.measure_text(FontHandle(7), "x", 12.0).is_err());
    }
}
