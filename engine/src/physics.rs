//! Platformer physics: a single kinematic player moving through static walls.
//!
//! Velocities are expressed per fixed update, matching the game's tuning constants
//! (`speed`, `gravity` and `jump` are all "pixels per tick").

use rapier2d::{
    control::{CharacterLength, KinematicCharacterController},
    prelude::*,
};

use crate::math::{Rect, Vec2};

/// Slack used when deciding whether a move was blocked.
const BLOCK_EPSILON: f32 = 1e-3;

pub struct PlatformerPhysics {
    // Rapier is a private detail of this module.
    bodies: RigidBodySet,
    colliders: ColliderSet,
    query_pipeline: QueryPipeline,
    controller: KinematicCharacterController,
    shape: Cuboid,

    position: Vec2,
    size: Vec2,
    velocity: Vec2,
    gravity: f32,
    grounded: bool,
}

impl PlatformerPhysics {
    /// Build the physics world from wall rectangles and the player's initial box.
    pub fn new(walls: &[Rect], position: Vec2, size: Vec2, gravity: f32) -> Self {
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        for wall in walls {
            let half = wall.size() / 2.0;
            let center = wall.center();
            let collider = ColliderBuilder::cuboid(half.x, half.y)
                .translation(vector![center.x, center.y])
                .build();
            colliders.insert(collider);
        }

        // One step over the static walls populates the query pipeline.
        let mut query_pipeline = QueryPipeline::new();
        let mut pipeline = PhysicsPipeline::new();
        pipeline.step(
            &vector![0.0, 0.0],
            &IntegrationParameters::default(),
            &mut IslandManager::new(),
            &mut DefaultBroadPhase::new(),
            &mut NarrowPhase::new(),
            &mut bodies,
            &mut colliders,
            &mut ImpulseJointSet::new(),
            &mut MultibodyJointSet::new(),
            &mut CCDSolver::new(),
            Some(&mut query_pipeline),
            &(),
            &(),
        );

        let controller = KinematicCharacterController {
            offset: CharacterLength::Absolute(1.0),
            slide: true,
            autostep: None,
            snap_to_ground: None,
            ..Default::default()
        };

        log::debug!("physics world built with {} walls", walls.len());

        Self {
            bodies,
            colliders,
            query_pipeline,
            controller,
            shape: Cuboid::new(vector![size.x / 2.0, size.y / 2.0]),
            position,
            size,
            velocity: Vec2::ZERO,
            gravity,
            grounded: false,
        }
    }

    /// Advance one tick: apply gravity, move the player against the walls.
    pub fn update(&mut self) {
        self.velocity.y -= self.gravity;
        let desired = self.velocity;

        let movement = self.controller.move_shape(
            1.0,
            &self.bodies,
            &self.colliders,
            &self.query_pipeline,
            &self.shape,
            &Isometry::translation(self.position.x, self.position.y),
            vector![desired.x, desired.y],
            QueryFilter::default().exclude_sensors(),
            |_| {},
        );

        let moved = Vec2::new(movement.translation.x, movement.translation.y);
        self.position += moved;
        self.grounded = movement.grounded;

        let blocked_below = desired.y < 0.0 && moved.y > desired.y + BLOCK_EPSILON;
        let blocked_above = desired.y > 0.0 && moved.y < desired.y - BLOCK_EPSILON;
        if blocked_below || blocked_above || (self.grounded && self.velocity.y < 0.0) {
            self.velocity.y = 0.0;
        }
    }

    /// True while the player stands on a wall.
    pub fn can_jump(&self) -> bool {
        self.grounded
    }

    /// Launch the player upward. The caller checks [`PlatformerPhysics::can_jump`].
    pub fn jump(&mut self, speed: f32) {
        self.velocity.y = speed;
        self.grounded = false;
    }

    pub fn set_horizontal_velocity(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleport the player and stop all motion.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.grounded = false;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Player bounding box in world units.
    pub fn player_rect(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Rect {
        Rect::new(Vec2::new(-1000.0, 0.0), Vec2::new(1000.0, 64.0))
    }

    fn settle(physics: &mut PlatformerPhysics, ticks: usize) {
        for _ in 0..ticks {
            physics.update();
        }
    }

    #[test]
    fn player_falls_onto_the_floor_and_grounds() {
        let mut physics =
            PlatformerPhysics::new(&[floor()], Vec2::new(0.0, 200.0), Vec2::new(32.0, 48.0), 1.0);
        assert!(!physics.can_jump());

        settle(&mut physics, 60);

        let bottom = physics.player_rect().min.y;
        assert!((bottom - 64.0).abs() <= 2.0, "bottom = {bottom}");
        assert!(physics.can_jump());
        assert_eq!(physics.velocity().y, 0.0);
    }

    #[test]
    fn wall_blocks_horizontal_movement() {
        let wall = Rect::new(Vec2::new(200.0, 64.0), Vec2::new(264.0, 400.0));
        let mut physics = PlatformerPhysics::new(
            &[floor(), wall],
            Vec2::new(100.0, 90.0),
            Vec2::new(32.0, 48.0),
            1.0,
        );

        physics.set_horizontal_velocity(9.0);
        settle(&mut physics, 40);

        let right = physics.player_rect().max.x;
        assert!(right <= 200.0 + 0.5, "right = {right}");
        assert!(right >= 195.0, "right = {right}");
    }

    #[test]
    fn jump_rises_then_lands_again() {
        let mut physics =
            PlatformerPhysics::new(&[floor()], Vec2::new(0.0, 90.0), Vec2::new(32.0, 48.0), 1.0);
        settle(&mut physics, 10);
        assert!(physics.can_jump());
        let ground_y = physics.position().y;

        physics.jump(22.0);
        assert!(!physics.can_jump());
        settle(&mut physics, 5);
        assert!(physics.position().y > ground_y + 50.0);

        settle(&mut physics, 60);
        assert!(physics.can_jump());
        assert!((physics.position().y - ground_y).abs() <= 2.0);
    }

    #[test]
    fn ceiling_stops_upward_velocity() {
        let ceiling = Rect::new(Vec2::new(-1000.0, 150.0), Vec2::new(1000.0, 200.0));
        let mut physics = PlatformerPhysics::new(
            &[floor(), ceiling],
            Vec2::new(0.0, 90.0),
            Vec2::new(32.0, 48.0),
            1.0,
        );
        settle(&mut physics, 5);
        physics.jump(22.0);
        settle(&mut physics, 4);

        assert!(physics.player_rect().max.y <= 150.0 + 0.5);
        assert!(physics.velocity().y <= 0.0);
    }

    #[test]
    fn set_position_teleports_and_stops() {
        let mut physics =
            PlatformerPhysics::new(&[floor()], Vec2::new(0.0, 300.0), Vec2::new(32.0, 48.0), 1.0);
        physics.set_horizontal_velocity(9.0);
        settle(&mut physics, 3);

        physics.set_position(Vec2::new(128.0, 128.0));
        assert_eq!(physics.position(), Vec2::new(128.0, 128.0));
        assert_eq!(physics.velocity(), Vec2::ZERO);
    }
}
