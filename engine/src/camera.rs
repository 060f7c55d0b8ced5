//! Camera follow behavior with dead-zone support.

use crate::math::{Camera2D, Vec2};

/// Camera follow behavior configuration.
#[derive(Clone, Copy, Debug)]
pub struct CameraFollow {
    /// Dead zone size. The camera won't move while the target stays inside it.
    pub dead_zone: Vec2,
    /// Maximum camera speed in units per second when smoothing.
    pub max_speed: f32,
    /// Smoothing factor (None = instant, 0.0..=1.0 fraction of the gap closed per update).
    pub smoothing: Option<f32>,
}

impl CameraFollow {
    /// Camera locked onto the target: no dead zone, no smoothing.
    pub fn new() -> Self {
        Self {
            dead_zone: Vec2::ZERO,
            max_speed: f32::INFINITY,
            smoothing: None,
        }
    }

    /// Set the dead zone size.
    pub fn with_dead_zone(mut self, width: f32, height: f32) -> Self {
        self.dead_zone = Vec2::new(width.max(0.0), height.max(0.0));
        self
    }

    /// Enable smooth following with the given factor.
    pub fn with_smoothing(mut self, factor: f32) -> Self {
        self.smoothing = Some(factor.clamp(0.0, 1.0));
        self
    }

    /// Set maximum camera speed for smooth following.
    pub fn with_max_speed(mut self, speed: f32) -> Self {
        self.max_speed = speed;
        self
    }
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self::new()
    }
}

/// Move `camera` toward `target` according to `follow`.
pub fn update_camera_follow(camera: &mut Camera2D, follow: &CameraFollow, target: Vec2, dt: f32) {
    let offset = target - camera.position;
    let half_dead_zone = follow.dead_zone / 2.0;

    let mut desired = camera.position;
    if offset.x.abs() > half_dead_zone.x {
        desired.x = target.x - offset.x.signum() * half_dead_zone.x;
    }
    if offset.y.abs() > half_dead_zone.y {
        desired.y = target.y - offset.y.signum() * half_dead_zone.y;
    }

    let Some(factor) = follow.smoothing else {
        camera.position = desired;
        return;
    };

    let diff = desired - camera.position;
    let distance = diff.length();
    if distance == 0.0 {
        return;
    }

    let step = diff * factor;
    let max_move = follow.max_speed * dt;
    camera.position = if follow.max_speed.is_finite() && step.length() > max_move {
        camera.position + diff.normalized() * max_move
    } else {
        camera.position + step
    };
}
