//! Named, ordered sprite layers.
//!
//! Layers draw in order, first to last. Sprites are addressed by a [`SpriteId`] that
//! stays valid until the sprite is removed.

use anyhow::Result;

use crate::{
    math::{Camera2D, Rect, Vec2},
    render::{Frame, Renderer, TextureHandle},
    tilemap::TileMap,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteId(u64);

#[derive(Clone, Debug)]
pub struct SceneSprite {
    pub id: SpriteId,
    /// Center in world units.
    pub position: Vec2,
    pub size: Vec2,
    pub texture: TextureHandle,
    pub tint: [f32; 4],
}

impl SceneSprite {
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }
}

#[derive(Clone, Debug)]
pub struct SpriteLayer {
    pub name: String,
    sprites: Vec<SceneSprite>,
}

impl SpriteLayer {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sprites: Vec::new(),
        }
    }

    pub fn sprites(&self) -> &[SceneSprite] {
        &self.sprites
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    layers: Vec<SpriteLayer>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// One layer per tile layer of the map, one sprite per filled cell.
    pub fn from_tilemap(
        map: &TileMap,
        texture: TextureHandle,
        tint_for_layer: impl Fn(&str) -> [f32; 4],
    ) -> Self {
        let mut scene = Self::new();
        for layer in map.layers() {
            scene.add_layer(&layer.name);
            let tint = tint_for_layer(&layer.name);
            for rect in map.tile_rects(&layer.name) {
                scene.add_sprite(&layer.name, rect.center(), rect.size(), texture, tint);
            }
        }
        scene
    }

    /// Append an empty layer. Existing layers are left untouched.
    pub fn add_layer(&mut self, name: &str) {
        if self.layer_index(name).is_none() {
            self.layers.push(SpriteLayer::new(name));
        }
    }

    /// Insert an empty layer directly after `after`, or at the end if `after` does not exist.
    pub fn add_layer_after(&mut self, name: &str, after: &str) {
        if self.layer_index(name).is_some() {
            return;
        }
        match self.layer_index(after) {
            Some(index) => self.layers.insert(index + 1, SpriteLayer::new(name)),
            None => self.layers.push(SpriteLayer::new(name)),
        }
    }

    fn layer_index(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.name == name)
    }

    pub fn layer(&self, name: &str) -> Option<&SpriteLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|layer| layer.name.as_str())
    }

    /// Add a sprite to a layer, creating the layer at the end if needed.
    pub fn add_sprite(
        &mut self,
        layer: &str,
        position: Vec2,
        size: Vec2,
        texture: TextureHandle,
        tint: [f32; 4],
    ) -> SpriteId {
        let index = match self.layer_index(layer) {
            Some(index) => index,
            None => {
                self.layers.push(SpriteLayer::new(layer));
                self.layers.len() - 1
            }
        };

        let id = SpriteId(self.next_id);
        self.next_id += 1;
        self.layers[index].sprites.push(SceneSprite {
            id,
            position,
            size,
            texture,
            tint,
        });
        id
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&SceneSprite> {
        self.layers
            .iter()
            .flat_map(|layer| layer.sprites.iter())
            .find(|sprite| sprite.id == id)
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut SceneSprite> {
        self.layers
            .iter_mut()
            .flat_map(|layer| layer.sprites.iter_mut())
            .find(|sprite| sprite.id == id)
    }

    /// Remove a sprite. Returns true only for the call that actually removed it.
    pub fn remove_sprite(&mut self, id: SpriteId) -> bool {
        for layer in &mut self.layers {
            if let Some(index) = layer.sprites.iter().position(|sprite| sprite.id == id) {
                layer.sprites.remove(index);
                return true;
            }
        }
        false
    }

    /// Ids of the sprites in `layer` whose boxes overlap `rect`.
    pub fn overlapping(&self, layer: &str, rect: &Rect) -> Vec<SpriteId> {
        self.layer(layer)
            .map(|layer| {
                layer
                    .sprites
                    .iter()
                    .filter(|sprite| sprite.rect().overlaps(rect))
                    .map(|sprite| sprite.id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Draw every layer in order, skipping sprites outside the camera's view.
    pub fn draw(&self, renderer: &mut Renderer<'_>, frame: &mut Frame, camera: &Camera2D) -> Result<()> {
        let (width, height) = renderer.surface_size();
        let view = camera.visible_rect(width, height);

        for layer in &self.layers {
            for sprite in &layer.sprites {
                if !sprite.rect().overlaps(&view) {
                    continue;
                }
                renderer.draw_quad(
                    frame,
                    sprite.texture,
                    sprite.position,
                    sprite.size,
                    None,
                    sprite.tint,
                    camera,
                )?;
            }
        }
        Ok(())
    }
}
