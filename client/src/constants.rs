use bevy::math::Vec2;

pub const WINDOW_TITLE: &str = "Shoreline";
pub const BINDS_PATH: &str = "keybindings.ron";

/// Feet of the spawned player rest on the ground slab at y = 0.
pub const SPAWN_POSITION_XZ: Vec2 = Vec2::new(0.0, 0.0);
pub const SPAWN_CLEARANCE: f32 = 0.05;

pub const SWIM_POINTER_SIZE: f32 = 24.0;
pub const STAMINA_BAR_WIDTH: f32 = 220.0;
pub const STAMINA_BAR_HEIGHT: f32 = 14.0;
