mod camera;
mod constants;
mod game;
mod input;
mod player;
mod ui;
mod world;

use bevy::{prelude::*, window::PresentMode};
use clap::Parser;
use constants::WINDOW_TITLE;
use input::{data::GameAction, keyboard::get_bindings};
use serde::{Deserialize, Serialize};
use shared::{
    config::load_or_create_tunables, get_game_folder_paths, physics::rapier::ShorelinePhysicsPlugin,
    DEFAULT_PLAYER_HEIGHT,
};
use std::collections::BTreeMap;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    game_folder_path: Option<String>,

    #[arg(
        short,
        long,
        help = "Allows overriding of the config folder path, defaults to <game_folder_path>/config"
    )]
    config_folder_path: Option<String>,

    #[arg(long, help = "Body height of the player in metres")]
    player_height: Option<f32>,
}

#[derive(Resource, Serialize, Deserialize)]
pub struct KeyMap {
    #[serde(default = "input::keyboard::default_key_map")]
    pub map: BTreeMap<GameAction, Vec<KeyCode>>,
    #[serde(default = "input::keyboard::default_mouse_map")]
    pub mouse: BTreeMap<GameAction, Vec<MouseButton>>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            map: input::keyboard::default_key_map(),
            mouse: input::keyboard::default_mouse_map(),
        }
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerSettings {
    pub height: f32,
}

fn main() {
    let args = Args::parse();

    let game_folder_paths = get_game_folder_paths(args.game_folder_path, args.config_folder_path);

    println!(
        "Starting application with game folder: {}",
        game_folder_paths.game_folder_path.display()
    );

    let tunables = load_or_create_tunables(&game_folder_paths.tunables_path());
    let height = args
        .player_height
        .filter(|height| *height > 0.0)
        .unwrap_or(DEFAULT_PLAYER_HEIGHT);

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: WINDOW_TITLE.to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(ShorelinePhysicsPlugin);

    app.insert_resource(get_bindings(&game_folder_paths))
        .insert_resource(tunables)
        .insert_resource(PlayerSettings { height })
        .insert_resource(game_folder_paths)
        .add_plugins(game::game_plugin)
        .run();
}
