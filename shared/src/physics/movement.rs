//! Ground locomotion: camera-relative walking and running, jumping and
//! gravity for an actor standing on solid geometry.

use bevy::prelude::*;

use crate::{
    config::LocomotionConfig,
    constants::MIN_TURN_INPUT,
    messages::FrameInput,
    physics::PhysicsQuery,
    players::{ActorPose, CameraBasis},
    utils::{clamp_unit, look_rotation, slerp_toward},
};

/// Controller for an actor on foot.
///
/// Only runs while it holds control authority. The swim controller takes the
/// authority away on entering water and is expected to call
/// [`GroundLocomotion::zero_vertical_velocity`] so a fall in progress does
/// not leak into buoyancy.
#[derive(Debug, Clone)]
pub struct GroundLocomotion {
    config: LocomotionConfig,
    vertical_velocity: f32,
    grounded: bool,
    control_enabled: bool,
}

impl GroundLocomotion {
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            config,
            vertical_velocity: 0.0,
            grounded: false,
            control_enabled: true,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn control_enabled(&self) -> bool {
        self.control_enabled
    }

    pub fn set_control_enabled(&mut self, enabled: bool) {
        self.control_enabled = enabled;
    }

    pub fn zero_vertical_velocity(&mut self) {
        self.vertical_velocity = 0.0;
    }

    /// Launch speed that peaks at `jump_height` under `gravity`.
    pub fn jump_velocity(&self) -> f32 {
        (self.config.jump_height * 2.0 * self.config.gravity.abs()).sqrt()
    }

    /// Horizontal move vector from raw axes, clamped to unit length.
    pub fn move_direction(axes: Vec2, basis: CameraBasis) -> Vec3 {
        let flat = basis.flattened();
        clamp_unit(flat.forward * axes.y + flat.right * axes.x)
    }

    fn check_ground(&mut self, pose: &ActorPose, physics: &impl PhysicsQuery) {
        let center = pose.position
            - Vec3::Y * (pose.height / 2.0 - self.config.ground_check_offset);
        self.grounded = physics.check_sphere(center, self.config.ground_check_radius);
    }

    pub fn update(
        &mut self,
        pose: &mut ActorPose,
        input: &FrameInput,
        basis: CameraBasis,
        delta: f32,
        physics: &impl PhysicsQuery,
    ) {
        if !self.control_enabled {
            return;
        }

        let direction = Self::move_direction(input.clamped_axes(), basis);
        self.check_ground(pose, physics);

        let speed = if input.sprint_held {
            self.config.run_speed
        } else {
            self.config.walk_speed
        };

        if direction.length() > MIN_TURN_INPUT {
            if let Some(target) = look_rotation(direction) {
                pose.rotation =
                    slerp_toward(pose.rotation, target, self.config.rotation_speed, delta);
            }
        }

        if self.grounded && self.vertical_velocity <= 0.0 {
            self.vertical_velocity = self.config.grounded_bias;
        }

        if input.jump_pressed && self.grounded {
            self.vertical_velocity = self.jump_velocity();
            log::debug!("Jump with launch velocity {}", self.vertical_velocity);
        }

        self.vertical_velocity += self.config.gravity * delta;

        let motion = (direction * speed).with_y(self.vertical_velocity) * delta;
        pose.position = physics.move_character(pose.position, motion);
    }
}
