//! Tile maps in the Tiled JSON format.
//!
//! Only the subset the game needs is supported: orthogonal, finite maps whose tile
//! layers store their data as a plain array of global tile ids. Object, image and group
//! layers are skipped.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::{
    assets::{read_file, AssetError},
    math::{Rect, Vec2},
};

/// Tiled stores flip/rotation flags in the top bits of each global tile id.
const GID_MASK: u32 = 0x1FFF_FFFF;

#[derive(Debug, Error)]
pub enum TileMapError {
    #[error("malformed map JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("infinite maps are not supported")]
    Infinite,
    #[error("layer '{layer}' uses unsupported encoding '{encoding}'")]
    UnsupportedEncoding { layer: String, encoding: String },
    #[error("layer '{layer}' has {actual} tiles, expected {expected}")]
    LayerSize {
        layer: String,
        expected: usize,
        actual: usize,
    },
    #[error("invalid map dimensions {width}x{height} tiles of {tile_width}x{tile_height}px")]
    InvalidDimensions {
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
    },
}

#[derive(Deserialize)]
struct RawMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    infinite: bool,
    #[serde(default)]
    layers: Vec<RawLayer>,
}

#[derive(Deserialize)]
struct RawLayer {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Option<RawData>,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawData {
    Tiles(Vec<u32>),
    Encoded(String),
}

/// One grid of global tile ids, row 0 at the top of the map.
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayer {
    pub name: String,
    tiles: Vec<u32>,
}

impl TileLayer {
    /// Global tile id at `(col, row)` with flip flags removed. 0 means empty.
    pub fn gid(&self, width: u32, col: u32, row: u32) -> u32 {
        self.tiles
            .get((row * width + col) as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.tiles.iter().filter(|&&gid| gid != 0).count()
    }
}

/// A loaded tile map, scaled into world units.
#[derive(Clone, Debug)]
pub struct TileMap {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Tile width in source pixels.
    pub tile_width: u32,
    /// Tile height in source pixels.
    pub tile_height: u32,
    /// Factor applied to source pixels to get world units.
    pub scaling: f32,
    layers: Vec<TileLayer>,
}

impl TileMap {
    /// Parse a Tiled JSON document.
    pub fn parse(json: &str, scaling: f32) -> Result<Self, TileMapError> {
        let raw: RawMap = serde_json::from_str(json)?;

        if raw.infinite {
            return Err(TileMapError::Infinite);
        }

        let expected = raw
            .width
            .checked_mul(raw.height)
            .filter(|&cells| cells > 0 && raw.tilewidth > 0 && raw.tileheight > 0)
            .ok_or(TileMapError::InvalidDimensions {
                width: raw.width,
                height: raw.height,
                tile_width: raw.tilewidth,
                tile_height: raw.tileheight,
            })? as usize;

        let mut layers = Vec::new();
        for layer in raw.layers {
            if layer.kind != "tilelayer" {
                log::debug!("skipping {} layer '{}'", layer.kind, layer.name);
                continue;
            }
            if let Some(encoding) = layer.encoding.as_deref() {
                if encoding != "csv" {
                    return Err(TileMapError::UnsupportedEncoding {
                        layer: layer.name,
                        encoding: encoding.to_string(),
                    });
                }
            }

            let tiles = match layer.data {
                Some(RawData::Tiles(tiles)) => tiles,
                Some(RawData::Encoded(_)) => {
                    return Err(TileMapError::UnsupportedEncoding {
                        layer: layer.name,
                        encoding: layer.encoding.unwrap_or_else(|| "base64".to_string()),
                    });
                }
                None => Vec::new(),
            };
            if tiles.len() != expected {
                return Err(TileMapError::LayerSize {
                    layer: layer.name,
                    expected,
                    actual: tiles.len(),
                });
            }

            layers.push(TileLayer {
                name: layer.name,
                tiles: tiles.into_iter().map(|gid| gid & GID_MASK).collect(),
            });
        }

        Ok(Self {
            width: raw.width,
            height: raw.height,
            tile_width: raw.tilewidth,
            tile_height: raw.tileheight,
            scaling,
            layers,
        })
    }

    /// Read and parse a map file.
    pub fn load(path: &Path, scaling: f32) -> Result<Self, AssetError> {
        let bytes = read_file(path)?;
        let json = String::from_utf8_lossy(&bytes);
        let map = Self::parse(&json, scaling).map_err(|source| AssetError::TileMap {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            "parsed map {} ({}x{} tiles, {} layers)",
            path.display(),
            map.width,
            map.height,
            map.layers.len()
        );
        Ok(map)
    }

    /// Size of one tile in world units.
    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(
            self.tile_width as f32 * self.scaling,
            self.tile_height as f32 * self.scaling,
        )
    }

    /// Width of the whole map in world units.
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_width as f32 * self.scaling
    }

    /// Height of the whole map in world units.
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_height as f32 * self.scaling
    }

    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// World rectangle covered by the cell at `(col, row)`.
    pub fn cell_rect(&self, col: u32, row: u32) -> Rect {
        let size = self.tile_size();
        let min = Vec2::new(col as f32 * size.x, (self.height - row - 1) as f32 * size.y);
        Rect::new(min, min + size)
    }

    /// One rectangle per filled cell of the named layer. Empty if the layer does not exist.
    pub fn tile_rects(&self, layer: &str) -> Vec<Rect> {
        let Some(layer) = self.layer(layer) else {
            return Vec::new();
        };

        let mut rects = Vec::with_capacity(layer.filled_count());
        for row in 0..self.height {
            for col in 0..self.width {
                if layer.gid(self.width, col, row) != 0 {
                    rects.push(self.cell_rect(col, row));
                }
            }
        }
        rects
    }

    /// Filled cells of the named layer with horizontal runs merged into single rectangles.
    pub fn solid_rects(&self, layer: &str) -> Vec<Rect> {
        let Some(layer) = self.layer(layer) else {
            return Vec::new();
        };

        let mut rects = Vec::new();
        for row in 0..self.height {
            let mut run_start = None;
            for col in 0..=self.width {
                let filled = col < self.width && layer.gid(self.width, col, row) != 0;
                match (filled, run_start) {
                    (true, None) => run_start = Some(col),
                    (false, Some(start)) => {
                        let first = self.cell_rect(start, row);
                        let last = self.cell_rect(col - 1, row);
                        rects.push(Rect::new(first.min, last.max));
                        run_start = None;
                    }
                    _ => {}
                }
            }
        }
        rects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> String {
        // 4x3 map, 128px tiles. Row 0 is the top row.
        r#"{
            "width": 4, "height": 3, "tilewidth": 128, "tileheight": 128,
            "orientation": "orthogonal", "infinite": false,
            "layers": [
                {"name": "Platforms", "type": "tilelayer", "width": 4, "height": 3,
                 "data": [0,0,0,0, 0,0,0,3, 1,1,0,2147483650]},
                {"name": "Coins", "type": "tilelayer", "width": 4, "height": 3,
                 "data": [0,5,0,0, 0,0,0,0, 0,0,0,0]},
                {"name": "Spawns", "type": "objectgroup", "objects": []}
            ]
        }"#
        .to_string()
    }

    #[test]
    fn parses_tile_layers_and_skips_objects() {
        let map = TileMap::parse(&sample_map(), 0.5).unwrap();
        let names: Vec<_> = map.layers().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Platforms", "Coins"]);
        assert_eq!(map.tile_size(), Vec2::new(64.0, 64.0));
    }

    #[test]
    fn end_of_map_is_width_times_tile_width_times_scaling() {
        let map = TileMap::parse(&sample_map(), 0.5).unwrap();
        assert_eq!(map.pixel_width(), 4.0 * 128.0 * 0.5);
        assert_eq!(map.pixel_height(), 192.0);
    }

    #[test]
    fn flip_flags_are_masked() {
        let map = TileMap::parse(&sample_map(), 1.0).unwrap();
        let platforms = map.layer("Platforms").unwrap();
        assert_eq!(platforms.gid(map.width, 3, 2), 2);
    }

    #[test]
    fn rows_count_from_the_top() {
        let map = TileMap::parse(&sample_map(), 0.5).unwrap();
        let coins = map.tile_rects("Coins");
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].min, Vec2::new(64.0, 128.0));
        assert_eq!(coins[0].max, Vec2::new(128.0, 192.0));
    }

    #[test]
    fn solid_rects_merge_horizontal_runs() {
        let map = TileMap::parse(&sample_map(), 0.5).unwrap();
        let mut solids = map.solid_rects("Platforms");
        solids.sort_by(|a, b| a.min.x.total_cmp(&b.min.x).then(a.min.y.total_cmp(&b.min.y)));
        assert_eq!(
            solids,
            vec![
                Rect::new(Vec2::new(0.0, 0.0), Vec2::new(128.0, 64.0)),
                Rect::new(Vec2::new(192.0, 0.0), Vec2::new(256.0, 64.0)),
                Rect::new(Vec2::new(192.0, 64.0), Vec2::new(256.0, 128.0)),
            ]
        );
        assert_eq!(map.tile_rects("Platforms").len(), 4);
    }

    #[test]
    fn missing_layer_yields_nothing() {
        let map = TileMap::parse(&sample_map(), 0.5).unwrap();
        assert!(map.layer("Don't Touch").is_none());
        assert!(map.tile_rects("Don't Touch").is_empty());
    }

    #[test]
    fn rejects_infinite_maps() {
        let json = r#"{"width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
                       "infinite": true, "layers": []}"#;
        assert!(matches!(TileMap::parse(json, 1.0), Err(TileMapError::Infinite)));
    }

    #[test]
    fn rejects_base64_layers() {
        let json = r#"{"width": 1, "height": 1, "tilewidth": 8, "tileheight": 8, "layers": [
            {"name": "Platforms", "type": "tilelayer", "encoding": "base64", "data": "AQAAAA=="}
        ]}"#;
        assert!(matches!(
            TileMap::parse(json, 1.0),
            Err(TileMapError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn rejects_short_layers() {
        let json = r#"{"width": 2, "height": 2, "tilewidth": 8, "tileheight": 8, "layers": [
            {"name": "Platforms", "type": "tilelayer", "data": [1, 1, 1]}
        ]}"#;
        match TileMap::parse(json, 1.0) {
            Err(TileMapError::LayerSize { expected, actual, .. }) => {
                assert_eq!((expected, actual), (4, 3));
            }
            other => panic!("unexpected result: {:?}", other.map(|m| m.width)),
        }
    }

    #[test]
    fn rejects_zero_sized_maps() {
        let json = r#"{"width": 0, "height": 2, "tilewidth": 8, "tileheight": 8, "layers": []}"#;
        assert!(matches!(
            TileMap::parse(json, 1.0),
            Err(TileMapError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn rejects_maps_whose_cell_count_overflows() {
        let json = r#"{"width": 70000, "height": 70000, "tilewidth": 8, "tileheight": 8, "layers": []}"#;
        assert!(matches!(
            TileMap::parse(json, 1.0),
            Err(TileMapError::InvalidDimensions { width: 70000, height: 70000, .. })
        ));
    }

    #[test]
    fn load_wraps_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level_1.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = TileMap::load(&path, 0.5).unwrap_err();
        assert!(matches!(err, AssetError::TileMap { .. }));
        assert_eq!(err.path(), path);
    }
}
