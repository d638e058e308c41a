//! Physics seam used by the movement controllers.
//!
//! The controllers never talk to a physics engine directly. They ask a
//! [`PhysicsQuery`] for overlaps, casts and the collide-and-slide move, which
//! keeps them testable against the in-memory [`StaticScene`] and lets the
//! client plug in Rapier through [`rapier::RapierPhysicsQuery`].

use bevy::math::Vec3;

pub mod movement;
pub mod rapier;
mod scene;

pub use movement::GroundLocomotion;
pub use scene::StaticScene;

/// Result of a sphere or ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastHit {
    /// Contact point on the surface that was hit.
    pub point: Vec3,
    /// Outward surface normal at the contact point.
    pub normal: Vec3,
    /// Distance travelled along the cast direction before contact.
    pub distance: f32,
}

pub trait PhysicsQuery {
    /// True when a sphere at `center` overlaps solid geometry.
    fn check_sphere(&self, center: Vec3, radius: f32) -> bool;

    /// Sweeps a sphere from `origin` along `direction` (unit length) for at
    /// most `max_distance`. Geometry the sphere starts inside is ignored.
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<CastHit>;

    fn ray_cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<CastHit> {
        self.sphere_cast(origin, 0.0, direction, max_distance)
    }

    /// Moves the character body from `position` by `displacement`, stopping
    /// at obstacles, and returns where it ended up.
    fn move_character(&self, position: Vec3, displacement: Vec3) -> Vec3;
}
