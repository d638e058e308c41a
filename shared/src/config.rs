//! Movement tunables.
//!
//! All values are read once when the actor is spawned and never change
//! afterwards. They can be overridden from a RON file; any field missing from
//! the file keeps its default.

use std::{fs, path::Path};

use bevy::prelude::*;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::constants::POINTER_SCREEN_MARGIN;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access tunables file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tunables: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize tunables: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid tunable `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Walking, running and jumping on solid ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_height: f32,
    /// Signed acceleration on Y, negative pulls down.
    pub gravity: f32,
    /// Slerp rate (per second) used to face the movement heading.
    pub rotation_speed: f32,
    pub ground_check_radius: f32,
    /// How far above the bottom of the body the ground check sphere is centred.
    pub ground_check_offset: f32,
    /// Vertical velocity held while grounded so the body stays pinned.
    pub grounded_bias: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.5,
            run_speed: 6.0,
            jump_height: 1.5,
            gravity: -15.0,
            rotation_speed: 10.0,
            ground_check_radius: 0.2,
            ground_check_offset: 0.1,
            grounded_bias: -2.0,
        }
    }
}

/// How the chase camera avoids clipping into geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CameraCollision {
    /// Sphere cast; the camera is pushed off the hit surface by its radius.
    Sphere,
    /// Thin ray; the camera stops `skin` short of the hit.
    Ray { skin: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub pivot_height: f32,
    /// Length of the boom behind the pivot.
    pub distance: f32,
    /// Degrees of rotation per pointer count.
    pub sensitivity: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub collision_radius: f32,
    pub collision: CameraCollision,
    pub vertical_fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pivot_height: 1.5,
            distance: 4.0,
            sensitivity: 0.15,
            min_pitch: -30.0,
            max_pitch: 60.0,
            collision_radius: 0.3,
            collision: CameraCollision::Sphere,
            vertical_fov: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwimConfig {
    pub surface_swim_speed: f32,
    pub underwater_swim_speed: f32,
    pub fast_swim_speed: f32,
    pub dive_speed: f32,
    pub buoyancy_force: f32,
    pub surface_threshold: f32,
    /// Fraction of the body kept above the surface while floating.
    pub exposed_fraction: f32,
    pub hold_breath_sink_speed: f32,
    /// Depth of the hold-breath target, in body heights below the surface.
    pub submerged_depth_multiplier: f32,
    /// Pointer distance from screen centre (0..1) before the body turns to it.
    pub cursor_rotation_threshold: f32,
    pub cursor_rotation_speed: f32,
    pub turn_rate: f32,
    pub pointer_margin: f32,
}

impl Default for SwimConfig {
    fn default() -> Self {
        Self {
            surface_swim_speed: 3.0,
            underwater_swim_speed: 2.5,
            fast_swim_speed: 5.0,
            dive_speed: 4.0,
            buoyancy_force: 8.0,
            surface_threshold: 0.3,
            exposed_fraction: 0.3,
            hold_breath_sink_speed: 2.0,
            submerged_depth_multiplier: 1.0,
            cursor_rotation_threshold: 0.3,
            cursor_rotation_speed: 3.0,
            turn_rate: 10.0,
            pointer_margin: POINTER_SCREEN_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaConfig {
    pub max: f32,
    pub drain_rate: f32,
    pub recovery_rate: f32,
    pub min_for_dive: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            max: 100.0,
            drain_rate: 10.0,
            recovery_rate: 20.0,
            min_for_dive: 20.0,
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTunables {
    pub locomotion: LocomotionConfig,
    pub camera: CameraConfig,
    pub swim: SwimConfig,
    pub stamina: StaminaConfig,
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a finite value >= 0, got {value}")))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a finite value > 0, got {value}")))
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a finite value, got {value}")))
    }
}

fn unit_fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a value in [0, 1], got {value}")))
    }
}

impl MovementTunables {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.locomotion;
        non_negative("locomotion.walk_speed", l.walk_speed)?;
        non_negative("locomotion.run_speed", l.run_speed)?;
        non_negative("locomotion.jump_height", l.jump_height)?;
        non_negative("locomotion.rotation_speed", l.rotation_speed)?;
        positive("locomotion.ground_check_radius", l.ground_check_radius)?;
        non_negative("locomotion.ground_check_offset", l.ground_check_offset)?;
        finite("locomotion.gravity", l.gravity)?;
        if !(l.grounded_bias.is_finite() && l.grounded_bias <= 0.0) {
            return Err(invalid(
                "locomotion.grounded_bias",
                format!("expected a finite value <= 0, got {}", l.grounded_bias),
            ));
        }

        let c = &self.camera;
        positive("camera.distance", c.distance)?;
        non_negative("camera.pivot_height", c.pivot_height)?;
        non_negative("camera.collision_radius", c.collision_radius)?;
        // Negative inverts the look axes
        finite("camera.sensitivity", c.sensitivity)?;
        finite("camera.min_pitch", c.min_pitch)?;
        finite("camera.max_pitch", c.max_pitch)?;
        if c.min_pitch > c.max_pitch {
            return Err(invalid(
                "camera.min_pitch",
                format!("{} is above max_pitch {}", c.min_pitch, c.max_pitch),
            ));
        }
        if !(c.vertical_fov > 0.0 && c.vertical_fov < 180.0) {
            return Err(invalid("camera.vertical_fov", "expected (0, 180) degrees"));
        }
        if let CameraCollision::Ray { skin } = c.collision {
            non_negative("camera.collision.skin", skin)?;
        }

        let s = &self.swim;
        non_negative("swim.surface_swim_speed", s.surface_swim_speed)?;
        non_negative("swim.underwater_swim_speed", s.underwater_swim_speed)?;
        non_negative("swim.fast_swim_speed", s.fast_swim_speed)?;
        positive("swim.dive_speed", s.dive_speed)?;
        non_negative("swim.buoyancy_force", s.buoyancy_force)?;
        positive("swim.surface_threshold", s.surface_threshold)?;
        unit_fraction("swim.exposed_fraction", s.exposed_fraction)?;
        non_negative("swim.hold_breath_sink_speed", s.hold_breath_sink_speed)?;
        non_negative("swim.submerged_depth_multiplier", s.submerged_depth_multiplier)?;
        unit_fraction("swim.cursor_rotation_threshold", s.cursor_rotation_threshold)?;
        non_negative("swim.cursor_rotation_speed", s.cursor_rotation_speed)?;
        non_negative("swim.turn_rate", s.turn_rate)?;
        if !(0.0..0.5).contains(&s.pointer_margin) {
            return Err(invalid("swim.pointer_margin", "expected [0, 0.5)"));
        }

        let st = &self.stamina;
        positive("stamina.max", st.max)?;
        non_negative("stamina.drain_rate", st.drain_rate)?;
        non_negative("stamina.recovery_rate", st.recovery_rate)?;
        if !(0.0..=st.max).contains(&st.min_for_dive) {
            return Err(invalid(
                "stamina.min_for_dive",
                format!("{} is outside [0, {}]", st.min_for_dive, st.max),
            ));
        }
        Ok(())
    }
}

pub fn load_tunables(path: &Path) -> Result<MovementTunables, ConfigError> {
    let content = fs::read_to_string(path)?;
    let tunables: MovementTunables = ron::from_str(&content)?;
    tunables.validate()?;
    Ok(tunables)
}

pub fn write_tunables(tunables: &MovementTunables, path: &Path) -> Result<(), ConfigError> {
    let pretty = PrettyConfig::new().depth_limit(3);
    let serialized = ron::ser::to_string_pretty(tunables, pretty)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serialized)?;
    Ok(())
}

/// Loads the tunables at `path`, falling back to defaults.
///
/// A missing file is created with the defaults so players have something to
/// edit. A file that exists but fails to parse or validate is left alone.
pub fn load_or_create_tunables(path: &Path) -> MovementTunables {
    match load_tunables(path) {
        Ok(tunables) => {
            log::info!("Loaded movement tunables from {:?}", path);
            tunables
        }
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            let tunables = MovementTunables::default();
            if let Err(e) = write_tunables(&tunables, path) {
                log::error!("Failed to create default tunables at {:?}: {}", path, e);
            }
            tunables
        }
        Err(e) => {
            log::error!("Ignoring tunables at {:?}: {}", path, e);
            MovementTunables::default()
        }
    }
}
