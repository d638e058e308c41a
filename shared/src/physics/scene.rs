use bevy::math::{
    bounding::{Aabb3d, BoundingSphere, IntersectsVolume},
    Vec3, Vec3A,
};

use super::{CastHit, PhysicsQuery};

/// Bisection steps used to find the contact point of a blocked move.
const CONTACT_SEARCH_STEPS: usize = 10;

/// Static world made of axis-aligned boxes.
///
/// The character body is an axis-aligned box of `body_half_extents` centred
/// on the actor position.
#[derive(Debug, Clone)]
pub struct StaticScene {
    solids: Vec<Aabb3d>,
    body_half_extents: Vec3,
}

impl StaticScene {
    pub fn new(body_half_extents: Vec3) -> Self {
        Self {
            solids: Vec::new(),
            body_half_extents,
        }
    }

    pub fn with_solid(mut self, solid: Aabb3d) -> Self {
        self.add_solid(solid);
        self
    }

    pub fn add_solid(&mut self, solid: Aabb3d) {
        self.solids.push(solid);
    }

    fn body_at(&self, position: Vec3) -> Aabb3d {
        Aabb3d::new(position, self.body_half_extents)
    }

    /// Strict overlap: boxes that only touch do not block each other.
    fn blocked(&self, position: Vec3) -> bool {
        let body = self.body_at(position);
        self.solids
            .iter()
            .any(|solid| body.min.cmplt(solid.max).all() && body.max.cmpgt(solid.min).all())
    }

    fn advance_axis(&self, position: Vec3, step: Vec3) -> Vec3 {
        if step == Vec3::ZERO {
            return position;
        }
        let candidate = position + step;
        if !self.blocked(candidate) {
            return candidate;
        }
        // Find the furthest free fraction of the step.
        let (mut free, mut hit) = (0.0f32, 1.0f32);
        for _ in 0..CONTACT_SEARCH_STEPS {
            let mid = (free + hit) * 0.5;
            if self.blocked(position + step * mid) {
                hit = mid;
            } else {
                free = mid;
            }
        }
        position + step * free
    }
}

/// Slab test of a ray against a box. Returns the entry distance and the
/// normal of the entered face, or `None` if the ray misses or starts inside.
fn ray_box(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            normal = Vec3::ZERO;
            normal[axis] = -d.signum();
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    (t_enter >= 0.0).then_some((t_enter, normal))
}

impl PhysicsQuery for StaticScene {
    fn check_sphere(&self, center: Vec3, radius: f32) -> bool {
        let sphere = BoundingSphere::new(center, radius);
        self.solids.iter().any(|solid| sphere.intersects(solid))
    }

    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<CastHit> {
        let direction = direction.try_normalize()?;
        let grow = Vec3A::splat(radius.max(0.0));

        self.solids
            .iter()
            .filter_map(|solid| {
                // Sweeping a sphere against a box is a ray against the box
                // grown by the radius; corners are treated as square.
                let min = Vec3::from(solid.min - grow);
                let max = Vec3::from(solid.max + grow);
                let (distance, normal) = ray_box(origin, direction, min, max)?;
                (distance <= max_distance).then(|| CastHit {
                    point: origin + direction * distance - normal * radius,
                    normal,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn move_character(&self, position: Vec3, displacement: Vec3) -> Vec3 {
        let mut position = position;
        position = self.advance_axis(position, Vec3::new(displacement.x, 0.0, 0.0));
        position = self.advance_axis(position, Vec3::new(0.0, 0.0, displacement.z));
        self.advance_axis(position, Vec3::new(0.0, displacement.y, 0.0))
    }
}
