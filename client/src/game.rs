use bevy::prelude::*;
use shared::{
    messages::PresentationEvent,
    sets::{GameStartupSet, GameUpdateSet},
};

use crate::{
    camera::CameraPlugin, input::frame::CurrentFrameInput, player::PlayerPlugin,
    ui::PlayerUiPlugin, world::ScenePlugin,
};

/// Per frame: sample input, move the body, follow with the camera, then
/// present. Startup spawns in the same spirit.
pub fn game_plugin(app: &mut App) {
    app.configure_sets(
        Startup,
        (
            GameStartupSet::Scene,
            GameStartupSet::Player,
            GameStartupSet::Ui,
        )
            .chain(),
    )
    .configure_sets(
        Update,
        (
            GameUpdateSet::PlayerInput,
            GameUpdateSet::PlayerPhysics,
            GameUpdateSet::CameraFollow,
            GameUpdateSet::Ui,
        )
            .chain(),
    )
    .add_event::<PresentationEvent>()
    .init_resource::<CurrentFrameInput>()
    .add_plugins((ScenePlugin, PlayerPlugin, CameraPlugin, PlayerUiPlugin));
}
