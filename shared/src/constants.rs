pub const DEFAULT_PLAYER_HEIGHT: f32 = 2.0;
pub const DEFAULT_PLAYER_RADIUS: f32 = 0.4;
pub const APP_FOLDER_NAME: &str = "shoreline";
pub const TUNABLES_FILE_NAME: &str = "tunables.ron";

/// Inputs with a smaller magnitude than this do not turn the body.
pub const MIN_TURN_INPUT: f32 = 0.1;
/// Fraction of the viewport kept clear of the swim pointer on every side.
pub const POINTER_SCREEN_MARGIN: f32 = 0.05;
