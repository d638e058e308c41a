use bevy::prelude::*;

/// Per-frame ordering of the movement pipeline.
///
/// The camera must read the body position after it moved this frame, so
/// `CameraFollow` is always configured to run after `PlayerPhysics`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameUpdateSet {
    PlayerInput,
    PlayerPhysics,
    CameraFollow,
    Ui,
}

/// Spawn order at startup: level geometry first, then the player and its
/// camera, then the HUD.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameStartupSet {
    Scene,
    Player,
    Ui,
}
