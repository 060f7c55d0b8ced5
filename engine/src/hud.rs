use anyhow::Result;

use crate::{
    math::{Camera2D, Rect, Vec2},
    render::{FontHandle, Frame, Renderer},
};

/// Horizontal anchoring of a HUD text element relative to its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HudAlign {
    #[default]
    Left,
    Center,
}

/// Text element drawn in screen-space pixels (origin bottom-left, y up).
#[derive(Clone, Debug)]
pub struct HudText {
    pub text: String,
    pub font: FontHandle,
    pub size: f32,
    /// Baseline anchor point.
    pub position: Vec2,
    pub color: [f32; 4],
    pub align: HudAlign,
}

/// Simple rectangle element for panels/bars.
#[derive(Clone, Debug)]
pub struct HudRect {
    /// Bottom-left corner in screen-space pixels.
    pub position: Vec2,
    pub size: Vec2,
    pub color: [f32; 4],
}

#[derive(Clone, Debug)]
enum HudElement {
    Text(HudText),
    Rect(HudRect),
}

/// A layer of HUD elements rendered in screen space on top of the world.
#[derive(Clone, Debug, Default)]
pub struct HudLayer {
    elements: Vec<HudElement>,
}

impl HudLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all HUD elements.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn add_text(&mut self, text: HudText) {
        self.elements.push(HudElement::Text(text));
    }

    pub fn add_rect(&mut self, rect: HudRect) {
        self.elements.push(HudElement::Rect(rect));
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Text of every text element, in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|element| match element {
            HudElement::Text(text) => Some(text.text.as_str()),
            HudElement::Rect(_) => None,
        })
    }

    /// Draw all HUD elements with a camera that maps world units to window pixels.
    ///
    /// Call after the world has been drawn into the same frame.
    pub fn draw(&self, renderer: &mut Renderer<'_>, frame: &mut Frame) -> Result<()> {
        let (width, height) = renderer.surface_size();
        let hud_camera = Camera2D::screen(width, height);

        for element in &self.elements {
            match element {
                HudElement::Text(ht) => {
                    let text_width = match ht.align {
                        HudAlign::Left => 0.0,
                        HudAlign::Center => renderer.measure_text(&ht.text, ht.font, ht.size)?,
                    };
                    let origin = Vec2::new(aligned_x(ht.position.x, text_width, ht.align), ht.position.y);
                    renderer.draw_text(frame, &ht.text, ht.font, ht.size, origin, ht.color, &hud_camera)?;
                }
                HudElement::Rect(hr) => {
                    let rect = Rect::new(hr.position, hr.position + hr.size);
                    renderer.draw_rect(frame, rect, hr.color, &hud_camera)?;
                }
            }
        }

        Ok(())
    }
}

fn aligned_x(x: f32, text_width: f32, align: HudAlign) -> f32 {
    match align {
        HudAlign::Left => x,
        HudAlign::Center => x - text_width / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_text_starts_half_its_width_left() {
        assert_eq!(aligned_x(640.0, 200.0, HudAlign::Center), 540.0);
        assert_eq!(aligned_x(10.0, 200.0, HudAlign::Left), 10.0);
    }

    #[test]
    fn texts_lists_text_elements_in_order() {
        let mut hud = HudLayer::new();
        let font = FontHandle(1);
        hud.add_rect(HudRect {
            position: Vec2::ZERO,
            size: Vec2::new(10.0, 10.0),
            color: [0.0, 0.0, 0.0, 0.5],
        });
        for line in ["Score: 0", "Level 1"] {
            hud.add_text(HudText {
                text: line.to_string(),
                font,
                size: 20.0,
                position: Vec2::new(10.0, 10.0),
                color: [1.0; 4],
                align: HudAlign::Left,
            });
        }

        assert_eq!(hud.len(), 3);
        assert_eq!(hud.texts().collect::<Vec<_>>(), ["Score: 0", "Level 1"]);
        hud.clear();
        assert!(hud.is_empty());
    }
}
