use bevy::math::{Mat3, Quat, Vec3};

/// Rotation whose forward axis (-Z) points along `direction`, Y kept as up.
///
/// Returns `None` for a zero or non-finite direction.
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let forward = direction.try_normalize()?;
    let right = forward.cross(Vec3::Y);
    // Looking straight up or down: any horizontal right axis will do.
    let right = right.try_normalize().unwrap_or(Vec3::X);
    let up = right.cross(forward);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize())
}

/// Frame-rate scaled slerp step, `rate` is per second.
///
/// The interpolation factor is clamped to [0, 1] so large frame times snap to
/// the target instead of overshooting.
pub fn slerp_toward(current: Quat, target: Quat, rate: f32, delta: f32) -> Quat {
    let t = (rate * delta).clamp(0.0, 1.0);
    current.slerp(target, t).normalize()
}

/// Drops the vertical component and renormalises, zero if nothing is left.
pub fn flatten(v: Vec3) -> Vec3 {
    v.with_y(0.0).normalize_or_zero()
}

/// Forward direction (-Z) of a rotation.
pub fn forward_of(rotation: Quat) -> Vec3 {
    rotation * Vec3::NEG_Z
}

/// Right direction (+X) of a rotation.
pub fn right_of(rotation: Quat) -> Vec3 {
    rotation * Vec3::X
}

/// Limits `v` to unit length without scaling short vectors up.
pub fn clamp_unit(v: Vec3) -> Vec3 {
    if v.length_squared() > 1.0 {
        v.normalize()
    } else {
        v
    }
}
