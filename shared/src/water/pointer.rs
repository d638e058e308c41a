//! On-screen swim pointer used to steer while submerged.
//!
//! Screen positions use the window convention: origin at the top-left
//! corner, y growing downward.

use bevy::prelude::*;

use crate::utils::flatten;

/// Clamps `position` into the viewport inset by `margin` (a fraction of the
/// viewport size) on every side.
pub fn clamp_to_viewport(position: Vec2, viewport: Vec2, margin: f32) -> Vec2 {
    let inset = viewport * margin;
    position.max(inset).min(viewport - inset)
}

/// Largest per-axis distance from the screen centre, normalised so the
/// viewport edges are at 1.
pub fn center_offset(position: Vec2, viewport: Vec2) -> f32 {
    let half = viewport * 0.5;
    if half.x <= 0.0 || half.y <= 0.0 {
        return 0.0;
    }
    let offset = (position - half).abs() / half;
    offset.x.max(offset.y)
}

/// Pinhole camera used to turn a screen point into a world direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeProjection {
    pub rotation: Quat,
    /// Vertical field of view in degrees.
    pub vertical_fov: f32,
    pub viewport: Vec2,
}

impl PinholeProjection {
    /// World-space direction of the ray through `screen`.
    pub fn ray_direction(&self, screen: Vec2) -> Option<Vec3> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }
        let ndc = Vec2::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.y * 2.0,
        );
        let tan_half = (self.vertical_fov.to_radians() * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;
        let local = Vec3::new(ndc.x * tan_half * aspect, ndc.y * tan_half, -1.0);
        (self.rotation * local).try_normalize()
    }

    /// Ray direction through `screen` projected onto the ground plane.
    pub fn flat_direction(&self, screen: Vec2) -> Option<Vec3> {
        let direction = flatten(self.ray_direction(screen)?);
        (direction != Vec3::ZERO).then_some(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(1000.0, 500.0);

    #[test]
    fn test_clamp_keeps_margin() {
        let clamped = clamp_to_viewport(Vec2::new(-20.0, 600.0), VIEWPORT, 0.05);
        assert_eq!(clamped, Vec2::new(50.0, 475.0));
        let inside = Vec2::new(300.0, 200.0);
        assert_eq!(clamp_to_viewport(inside, VIEWPORT, 0.05), inside);
    }

    #[test]
    fn test_center_offset_uses_largest_axis() {
        assert_eq!(center_offset(Vec2::new(500.0, 250.0), VIEWPORT), 0.0);
        // 200 px right of centre is 0.4 of the half width; 50 px down is 0.2.
        let offset = center_offset(Vec2::new(700.0, 300.0), VIEWPORT);
        assert!((offset - 0.4).abs() < 1e-5);
        assert_eq!(center_offset(Vec2::ZERO, Vec2::ZERO), 0.0);
    }

    #[test]
    fn test_center_ray_is_camera_forward() {
        let projection = PinholeProjection {
            rotation: Quat::IDENTITY,
            vertical_fov: 60.0,
            viewport: VIEWPORT,
        };
        let direction = projection.ray_direction(VIEWPORT * 0.5).unwrap();
        assert!(direction.distance(Vec3::NEG_Z) < 1e-5);
    }

    #[test]
    fn test_right_edge_ray_points_right() {
        let projection = PinholeProjection {
            rotation: Quat::IDENTITY,
            vertical_fov: 60.0,
            viewport: VIEWPORT,
        };
        let flat = projection
            .flat_direction(Vec2::new(950.0, 250.0))
            .unwrap();
        assert!(flat.x > 0.5);
        assert_eq!(flat.y, 0.0);

        let up = projection.ray_direction(Vec2::new(500.0, 0.0)).unwrap();
        assert!(up.y > 0.0, "top of the screen looks up");
    }
}
