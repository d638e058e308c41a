//! Third-person chase camera with pitch limits and collision avoidance.

use bevy::prelude::*;

use crate::{
    config::{CameraCollision, CameraConfig},
    physics::PhysicsQuery,
    utils::{flatten, forward_of, look_rotation, right_of},
    water::PinholeProjection,
};

/// Camera-relative directions the body controllers move along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
        }
    }
}

impl CameraBasis {
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            forward: forward_of(rotation),
            right: right_of(rotation),
        }
    }

    /// Both axes projected onto the ground plane and renormalised.
    pub fn flattened(self) -> Self {
        Self {
            forward: flatten(self.forward),
            right: flatten(self.right),
        }
    }
}

/// Orientation and lens of the rendered camera, as seen by the body
/// controllers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub rotation: Quat,
    /// Vertical field of view in degrees.
    pub vertical_fov: f32,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            vertical_fov: 60.0,
        }
    }
}

impl CameraView {
    pub fn basis(&self) -> CameraBasis {
        CameraBasis::from_rotation(self.rotation)
    }

    pub fn projection(&self, viewport: Vec2) -> PinholeProjection {
        PinholeProjection {
            rotation: self.rotation,
            vertical_fov: self.vertical_fov,
            viewport,
        }
    }
}

/// Hard clamp that tolerates an inverted range instead of panicking.
fn clamp_pitch(config: &CameraConfig, pitch: f32) -> f32 {
    pitch.max(config.min_pitch).min(config.max_pitch)
}

/// Orbiting camera that trails a pivot above the actor.
///
/// Yaw and pitch are kept in degrees. Positive yaw turns right, positive
/// pitch looks down.
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    config: CameraConfig,
    yaw: f32,
    pitch: f32,
    pivot: Vec3,
    position: Vec3,
    rotation: Quat,
    obstructed: bool,
}

impl ChaseCamera {
    pub fn new(config: CameraConfig, yaw: f32) -> Self {
        let mut camera = Self {
            config,
            yaw: yaw.rem_euclid(360.0),
            pitch: clamp_pitch(&config, 0.0),
            pivot: Vec3::ZERO,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            obstructed: false,
        };
        camera.rotation = camera.orbit_rotation();
        camera
    }

    /// Camera starting behind an actor facing along `heading`.
    pub fn behind(config: CameraConfig, heading: Quat) -> Self {
        let forward = flatten(forward_of(heading));
        let yaw = if forward == Vec3::ZERO {
            0.0
        } else {
            forward.x.atan2(-forward.z).to_degrees()
        };
        Self::new(config, yaw)
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// True when the last update had to pull the camera in.
    pub fn is_obstructed(&self) -> bool {
        self.obstructed
    }

    pub fn basis(&self) -> CameraBasis {
        CameraBasis::from_rotation(self.rotation)
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            rotation: self.rotation,
            vertical_fov: self.config.vertical_fov,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation)
    }

    pub fn apply_look_delta(&mut self, delta: Vec2) {
        self.yaw = (self.yaw + delta.x * self.config.sensitivity).rem_euclid(360.0);
        self.pitch = clamp_pitch(&self.config, self.pitch + delta.y * self.config.sensitivity);
    }

    /// Rotation of the boom from yaw and pitch.
    pub fn orbit_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw.to_radians()) * Quat::from_rotation_x(-self.pitch.to_radians())
    }

    /// Late-phase update: must run after the actor moved this frame.
    pub fn update(&mut self, target: Vec3, look_delta: Vec2, physics: &impl PhysicsQuery) {
        self.apply_look_delta(look_delta);

        self.pivot = target + Vec3::Y * self.config.pivot_height;
        let orbit = self.orbit_rotation();
        let desired = self.pivot + orbit * Vec3::new(0.0, 0.0, self.config.distance);
        let direction = (desired - self.pivot).normalize_or_zero();

        self.position = desired;
        self.obstructed = false;
        if direction != Vec3::ZERO {
            match self.config.collision {
                CameraCollision::Sphere => {
                    let radius = self.config.collision_radius;
                    if let Some(hit) =
                        physics.sphere_cast(self.pivot, radius, direction, self.config.distance)
                    {
                        self.position = hit.point + hit.normal * radius;
                        self.obstructed = true;
                    }
                }
                CameraCollision::Ray { skin } => {
                    if let Some(hit) = physics.ray_cast(self.pivot, direction, self.config.distance)
                    {
                        self.position = self.pivot + direction * (hit.distance - skin).max(0.0);
                        self.obstructed = true;
                    }
                }
            }
        }

        self.rotation = look_rotation(self.pivot - self.position).unwrap_or(orbit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::StaticScene;
    use bevy::math::bounding::Aabb3d;

    fn open_scene() -> StaticScene {
        StaticScene::new(Vec3::splat(0.5))
    }

    fn walled_scene() -> StaticScene {
        // Wall behind the pivot, front face at z = 2.
        open_scene().with_solid(Aabb3d::new(
            Vec3::new(0.0, 1.5, 2.25),
            Vec3::new(5.0, 5.0, 0.25),
        ))
    }

    #[test]
    fn test_pitch_is_clamped() {
        let config = CameraConfig::default();
        let mut camera = ChaseCamera::new(config, 0.0);
        camera.apply_look_delta(Vec2::new(0.0, 10_000.0));
        assert_eq!(camera.pitch(), config.max_pitch);
        camera.apply_look_delta(Vec2::new(0.0, -10_000.0));
        assert_eq!(camera.pitch(), config.min_pitch);
    }

    #[test]
    fn test_unobstructed_camera_trails_pivot() {
        let mut camera = ChaseCamera::new(CameraConfig::default(), 0.0);
        camera.update(Vec3::ZERO, Vec2::ZERO, &open_scene());

        assert_eq!(camera.pivot(), Vec3::new(0.0, 1.5, 0.0));
        assert!(camera.position().distance(Vec3::new(0.0, 1.5, 4.0)) < 1e-5);
        assert!(!camera.is_obstructed());
        assert!(camera.basis().forward.distance(Vec3::NEG_Z) < 1e-5);
    }

    #[test]
    fn test_yaw_orbits_to_the_right() {
        let mut camera = ChaseCamera::new(CameraConfig::default(), 90.0);
        camera.update(Vec3::ZERO, Vec2::ZERO, &open_scene());
        assert!(camera.position().distance(Vec3::new(-4.0, 1.5, 0.0)) < 1e-4);
        assert!(camera.basis().forward.distance(Vec3::X) < 1e-4);
    }

    #[test]
    fn test_positive_pitch_raises_camera() {
        let mut camera = ChaseCamera::new(CameraConfig::default(), 0.0);
        camera.update(Vec3::ZERO, Vec2::new(0.0, 200.0), &open_scene());
        assert!((camera.pitch() - 30.0).abs() < 1e-3);
        assert!(camera.position().y > camera.pivot().y);
        assert!(camera.basis().forward.y < 0.0);
    }

    #[test]
    fn test_sphere_collision_keeps_radius_off_the_wall() {
        let config = CameraConfig::default();
        let mut camera = ChaseCamera::new(config, 0.0);
        camera.update(Vec3::ZERO, Vec2::ZERO, &walled_scene());

        assert!(camera.is_obstructed());
        let wall_point = Vec3::new(0.0, 1.5, 2.0);
        assert!(camera.position().distance(Vec3::new(0.0, 1.5, 1.7)) < 1e-4);
        assert!(camera.position().distance(wall_point) >= config.collision_radius - 1e-4);
        assert!(camera.position().z < 2.0);
        assert!(camera.basis().forward.distance(Vec3::NEG_Z) < 1e-4);
    }

    #[test]
    fn test_ray_collision_stops_short_by_skin() {
        let config = CameraConfig {
            collision: CameraCollision::Ray { skin: 0.2 },
            ..Default::default()
        };
        let mut camera = ChaseCamera::new(config, 0.0);
        camera.update(Vec3::ZERO, Vec2::ZERO, &walled_scene());
        assert!(camera.position().distance(Vec3::new(0.0, 1.5, 1.8)) < 1e-4);
    }

    #[test]
    fn test_behind_heading() {
        let heading = crate::utils::look_rotation(Vec3::X).unwrap();
        let camera = ChaseCamera::behind(CameraConfig::default(), heading);
        assert!((camera.yaw() - 90.0).abs() < 1e-3);
    }
}
