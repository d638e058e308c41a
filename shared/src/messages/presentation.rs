use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::water::SwimState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorMode {
    /// Pointer locked and hidden, pointer motion drives the camera.
    #[default]
    Locked,
    /// Pointer free to move around the window.
    Free,
}

/// Requests from the movement core to whoever owns the cursor and HUD.
#[derive(Event, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PresentationEvent {
    CursorMode(CursorMode),
    SwimPointerVisible(bool),
    /// Clamped pointer position, same coordinate space as [`super::PointerSample`].
    SwimPointerMoved(Vec2),
}

/// Read-only snapshot for animation and HUD binding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresentationState {
    pub grounded: bool,
    pub in_water: bool,
    pub swim_state: SwimState,
    /// Stamina in [0, 1].
    pub stamina: f32,
    pub cursor_mode: CursorMode,
    pub swim_pointer_visible: bool,
}
