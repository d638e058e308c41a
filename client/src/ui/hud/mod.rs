pub mod cursor;
pub mod stamina;
pub mod swim_pointer;

use bevy::prelude::*;

use crate::ui::hud::{stamina::spawn_stamina_bar, swim_pointer::spawn_swim_pointer};

pub fn setup_hud(mut commands: Commands) {
    spawn_stamina_bar(&mut commands);
    spawn_swim_pointer(&mut commands);
}
