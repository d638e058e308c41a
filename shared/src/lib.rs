//! Movement core for Shoreline: ground locomotion, swimming, stamina and the
//! chase camera, plus the physics query seam they run against.
//!
//! Nothing in here touches windows, input devices or rendering. The client
//! samples a [`messages::FrameInput`] once per frame, hands it to an
//! [`players::ActorSimulation`] together with a [`physics::PhysicsQuery`]
//! implementation, and forwards the resulting
//! [`messages::PresentationEvent`]s to whatever owns the cursor and HUD.

pub mod config;
pub mod constants;
pub mod messages;
pub mod physics;
pub mod players;
pub mod sets;
pub mod utils;
pub mod water;

use std::path::PathBuf;

use bevy::prelude::Resource;

pub use config::{ConfigError, MovementTunables};
pub use constants::*;

#[derive(Resource, Debug, Clone)]
pub struct GameFolderPaths {
    pub game_folder_path: PathBuf,
    pub config_folder_path: PathBuf,
}

impl GameFolderPaths {
    pub fn tunables_path(&self) -> PathBuf {
        self.config_folder_path.join(TUNABLES_FILE_NAME)
    }
}

pub fn get_game_folder_paths(
    game_folder_path: Option<String>,
    config_folder_path: Option<String>,
) -> GameFolderPaths {
    let mut paths = default_game_folder_paths();

    if let Some(game_data) = game_folder_path {
        paths.game_folder_path = game_data.into();
        paths.config_folder_path = paths.game_folder_path.join("config");
    }
    if let Some(config) = config_folder_path {
        paths.config_folder_path = config.into();
    }

    paths
}

/// Platform data and config folders, e.g. `~/.local/share/shoreline` and
/// `~/.config/shoreline` on Linux, `%APPDATA%\shoreline` on Windows.
///
/// Falls back to `./shoreline` when the platform reports no such folder.
pub fn default_game_folder_paths() -> GameFolderPaths {
    let data = dirs::data_dir();
    let config = dirs::config_dir();
    if data.is_none() || config.is_none() {
        log::warn!("No platform data/config folder, using ./{}", APP_FOLDER_NAME);
    }
    let fallback = PathBuf::from(APP_FOLDER_NAME);
    GameFolderPaths {
        game_folder_path: data
            .map(|dir| dir.join(APP_FOLDER_NAME))
            .unwrap_or_else(|| fallback.clone()),
        config_folder_path: config
            .map(|dir| dir.join(APP_FOLDER_NAME))
            .unwrap_or_else(|| fallback.join("config")),
    }
}
