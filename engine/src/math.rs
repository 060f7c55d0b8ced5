use glam::{Mat4, Vec3};

/// 2D vector in world units (pixels, y pointing up).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::ZERO
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    /// Component-wise product.
    pub fn scale(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from(value: (f32, f32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Div<f32> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle. `min` is the bottom-left corner, `max` the top-right.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Transform describing 2D position, scale, and rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    pub scale: Vec2,
    /// Rotation in radians around the Z axis.
    pub rotation: f32,
}

impl Transform2D {
    pub fn new(position: Vec2, scale: Vec2, rotation: f32) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }

    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }

    /// Model matrix for a unit quad stretched to `base_size * scale`.
    pub fn to_matrix(&self, base_size: Vec2) -> Mat4 {
        let translation = Mat4::from_translation(Vec3::new(self.position.x, self.position.y, 0.0));
        let rotation = Mat4::from_rotation_z(self.rotation);
        let scale = Mat4::from_scale(Vec3::new(
            self.scale.x * base_size.x,
            self.scale.y * base_size.y,
            1.0,
        ));

        translation * rotation * scale
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

/// Orthographic 2D camera. `position` is the world point shown at the center of the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera2D {
    pub position: Vec2,
    pub zoom: f32,
}

impl Camera2D {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            zoom: 1.0,
        }
    }

    /// Screen-space camera: world units map 1:1 to pixels with the origin at the
    /// bottom-left corner of the window.
    pub fn screen(width: u32, height: u32) -> Self {
        Self::new(Vec2::new(width as f32 / 2.0, height as f32 / 2.0))
    }

    fn half_extents(&self, width: u32, height: u32) -> Vec2 {
        Vec2::new(
            width as f32 / (2.0 * self.zoom),
            height as f32 / (2.0 * self.zoom),
        )
    }

    pub fn view_projection(&self, width: u32, height: u32) -> Mat4 {
        let half = self.half_extents(width, height);
        Mat4::orthographic_rh_gl(
            self.position.x - half.x,
            self.position.x + half.x,
            self.position.y - half.y,
            self.position.y + half.y,
            -1.0,
            1.0,
        )
    }

    /// World-space rectangle covered by a viewport of the given size.
    pub fn visible_rect(&self, width: u32, height: u32) -> Rect {
        let half = self.half_extents(width, height);
        Rect::new(self.position - half, self.position + half)
    }

    /// Converts world coordinates to pixel coordinates (origin bottom-left).
    pub fn world_to_screen(&self, world_pos: Vec2, width: u32, height: u32) -> Vec2 {
        let origin = self.visible_rect(width, height).min;
        (world_pos - origin) * self.zoom
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rects_sharing_an_edge_do_not_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let c = Rect::new(Vec2::new(9.0, 9.0), Vec2::new(12.0, 12.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn rect_from_center_round_trips_center_and_size() {
        let r = Rect::from_center(Vec2::new(5.0, -3.0), Vec2::new(4.0, 8.0));
        assert_eq!(r.min, Vec2::new(3.0, -7.0));
        assert_eq!(r.center(), Vec2::new(5.0, -3.0));
        assert_eq!(r.size(), Vec2::new(4.0, 8.0));
    }

    #[test]
    fn screen_camera_maps_pixels_directly() {
        let camera = Camera2D::screen(1280, 720);
        assert_eq!(
            camera.world_to_screen(Vec2::new(0.0, 5.0), 1280, 720),
            Vec2::new(0.0, 5.0)
        );
        let view = camera.visible_rect(1280, 720);
        assert_eq!(view.min, Vec2::ZERO);
        assert_eq!(view.max, Vec2::new(1280.0, 720.0));
    }

    #[test]
    fn camera_centers_its_position() {
        let camera = Camera2D::new(Vec2::new(1000.0, 300.0));
        let center = camera.world_to_screen(Vec2::new(1000.0, 300.0), 1280, 720);
        assert_eq!(center, Vec2::new(640.0, 360.0));

        let clip = camera.view_projection(1280, 720)
            * glam::Vec4::new(1000.0, 300.0, 0.0, 1.0);
        assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
    }

    #[test]
    fn zoom_shrinks_the_visible_area() {
        let mut camera = Camera2D::new(Vec2::ZERO);
        camera.zoom = 2.0;
        let view = camera.visible_rect(800, 600);
        assert_eq!(view.size(), Vec2::new(400.0, 300.0));
    }
}
