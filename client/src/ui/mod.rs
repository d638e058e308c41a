pub mod hud;
pub mod style;

use bevy::prelude::*;
use shared::sets::{GameStartupSet, GameUpdateSet};

use crate::ui::hud::{
    cursor::{apply_presentation_events_system, CursorPresentation},
    setup_hud,
    stamina::update_stamina_bar_system,
    swim_pointer::update_swim_pointer_system,
};

pub struct PlayerUiPlugin;
impl Plugin for PlayerUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPresentation>()
            .add_systems(Startup, setup_hud.in_set(GameStartupSet::Ui))
            .add_systems(
                Update,
                (
                    apply_presentation_events_system,
                    update_swim_pointer_system,
                    update_stamina_bar_system,
                )
                    .chain()
                    .in_set(GameUpdateSet::Ui),
            );
    }
}
