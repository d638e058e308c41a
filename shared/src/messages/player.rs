use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Pointer position inside the window, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub position: Vec2,
    pub viewport: Vec2,
}

/// Everything the movement core reads from the player for one frame.
///
/// The host samples devices once per frame and passes this by value, so a
/// button is never observed in two different states within the same tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Raw strafe (x) and forward (y) axes, each in [-1, 1].
    pub move_axes: Vec2,
    /// Pointer motion since the last frame, y grows downward.
    pub look_delta: Vec2,
    /// Jump on land, dive/ascend in water. True only on the frame it went down.
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub sprint_held: bool,
    pub hold_breath_held: bool,
    pub ascend_held: bool,
    pub descend_held: bool,
    pub toggle_cursor_pressed: bool,
    /// `None` when no pointer widget is available; disables swim steering.
    pub pointer: Option<PointerSample>,
}

impl FrameInput {
    /// Move axes with each component limited to [-1, 1].
    pub fn clamped_axes(&self) -> Vec2 {
        self.move_axes.clamp(Vec2::NEG_ONE, Vec2::ONE)
    }
}
