use bevy::prelude::*;

pub const TEXT_COLOR: Color = Color::WHITE;
pub const HUD_FONT_SIZE: f32 = 16.0;

pub const STAMINA_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.6);
pub const STAMINA_READY: Color = Color::srgb(0.3, 0.8, 0.95);
/// Shown while stamina is too low to dive.
pub const STAMINA_LOW: Color = Color::srgb(0.95, 0.55, 0.15);

pub const SWIM_POINTER_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.85);
