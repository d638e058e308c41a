use bevy::{math::bounding::Aabb3d, prelude::*};

pub mod camera;
pub mod simulation;

pub use camera::{CameraBasis, CameraView, ChaseCamera};
pub use simulation::ActorSimulation;

/// Where the actor's body is and which way it faces.
///
/// `position` is the centre of the body, which is what collision sweeps.
/// Water heights are measured from the feet up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub height: f32,
}

impl ActorPose {
    pub fn new(position: Vec3, height: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            height,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn feet_height(&self) -> f32 {
        self.position.y - self.height / 2.0
    }

    /// Height tested against the water surface to decide submersion.
    pub fn head_height(&self) -> f32 {
        self.feet_height() + self.height
    }

    /// Box around a body of `radius`, feet to head.
    pub fn bounds(&self, radius: f32) -> Aabb3d {
        Aabb3d::new(
            self.position,
            Vec3::new(radius, self.height / 2.0, radius).abs(),
        )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation)
    }
}
