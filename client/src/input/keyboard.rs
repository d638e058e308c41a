use crate::{constants::BINDS_PATH, input::data::GameAction, KeyMap};
use bevy::prelude::*;
use ron::{from_str, ser::PrettyConfig};
use shared::GameFolderPaths;
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

fn write_keybindings_to_path(key_map: &KeyMap, binds_path: &Path) -> Result<(), std::io::Error> {
    let pretty_config = PrettyConfig::new()
        .depth_limit(3)
        .separate_tuple_members(true)
        .enumerate_arrays(true);

    let serialized = ron::ser::to_string_pretty(key_map, pretty_config)
        .map_err(|e| std::io::Error::other(format!("serialization failed: {e}")))?;
    if let Some(parent) = binds_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(binds_path)?;
    file.write_all(serialized.as_bytes())
}

/// Pressed state of every device a binding can live on.
#[derive(Clone, Copy)]
pub struct ActionInputs<'a> {
    pub keyboard: &'a ButtonInput<KeyCode>,
    pub mouse: &'a ButtonInput<MouseButton>,
    pub key_map: &'a KeyMap,
}

impl ActionInputs<'_> {
    fn any_bound(
        &self,
        action: GameAction,
        key_test: impl Fn(&ButtonInput<KeyCode>, KeyCode) -> bool,
        button_test: impl Fn(&ButtonInput<MouseButton>, MouseButton) -> bool,
    ) -> bool {
        let key_hit = self
            .key_map
            .map
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|key| key_test(self.keyboard, *key)));
        let button_hit = self
            .key_map
            .mouse
            .get(&action)
            .is_some_and(|buttons| buttons.iter().any(|b| button_test(self.mouse, *b)));
        key_hit || button_hit
    }

    pub fn pressed(&self, action: GameAction) -> bool {
        self.any_bound(action, |k, key| k.pressed(key), |m, b| m.pressed(b))
    }

    pub fn just_pressed(&self, action: GameAction) -> bool {
        self.any_bound(action, |k, key| k.just_pressed(key), |m, b| m.just_pressed(b))
    }
}

pub(crate) fn default_key_map() -> BTreeMap<GameAction, Vec<KeyCode>> {
    let mut map = BTreeMap::new();
    map.insert(GameAction::MoveForward, vec![KeyCode::KeyW, KeyCode::ArrowUp]);
    map.insert(
        GameAction::MoveBackward,
        vec![KeyCode::KeyS, KeyCode::ArrowDown],
    );
    map.insert(GameAction::MoveLeft, vec![KeyCode::KeyA, KeyCode::ArrowLeft]);
    map.insert(
        GameAction::MoveRight,
        vec![KeyCode::KeyD, KeyCode::ArrowRight],
    );
    map.insert(GameAction::Jump, vec![KeyCode::Space]);
    map.insert(GameAction::Sprint, vec![KeyCode::ShiftLeft]);
    map.insert(GameAction::SwimUp, vec![KeyCode::Space]);
    map.insert(
        GameAction::SwimDown,
        vec![KeyCode::ControlLeft, KeyCode::KeyC],
    );
    map.insert(GameAction::ToggleCursor, vec![KeyCode::Escape]);
    map
}

pub(crate) fn default_mouse_map() -> BTreeMap<GameAction, Vec<MouseButton>> {
    let mut map = BTreeMap::new();
    map.insert(GameAction::HoldBreath, vec![MouseButton::Right]);
    map
}

pub fn get_bindings(game_folder_paths: &GameFolderPaths) -> KeyMap {
    let binds_path: PathBuf = game_folder_paths.config_folder_path.join(BINDS_PATH);

    if let Ok(content) = fs::read_to_string(binds_path.as_path()) {
        match from_str::<KeyMap>(&content) {
            Ok(key_map) => return key_map,
            Err(e) => error!("Invalid keybindings file {:?}: {}", binds_path, e),
        }
    }

    let key_map = KeyMap::default();
    if let Err(e) = write_keybindings_to_path(&key_map, binds_path.as_path()) {
        error!(
            "Failed to create default keybindings file at {:?}: {}",
            binds_path, e
        );
    }
    key_map
}
