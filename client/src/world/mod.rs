pub mod scene;

use bevy::prelude::*;
use shared::{sets::GameStartupSet, water::WaterRegions};

use crate::world::scene::setup_scene;

pub struct ScenePlugin;
impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaterRegions>()
            .add_systems(Startup, setup_scene.in_set(GameStartupSet::Scene));
    }
}
