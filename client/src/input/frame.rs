use bevy::{input::mouse::AccumulatedMouseMotion, prelude::*, window::PrimaryWindow};
use shared::messages::{FrameInput, PointerSample};

use crate::{
    input::{data::GameAction, keyboard::ActionInputs},
    KeyMap,
};

/// Device snapshot for the current frame, read by every later set.
#[derive(Resource, Debug, Default)]
pub struct CurrentFrameInput(pub FrameInput);

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

pub fn build_frame_input(
    inputs: ActionInputs,
    look_delta: Vec2,
    pointer: Option<PointerSample>,
) -> FrameInput {
    FrameInput {
        move_axes: Vec2::new(
            axis(
                inputs.pressed(GameAction::MoveRight),
                inputs.pressed(GameAction::MoveLeft),
            ),
            axis(
                inputs.pressed(GameAction::MoveForward),
                inputs.pressed(GameAction::MoveBackward),
            ),
        ),
        look_delta,
        jump_pressed: inputs.just_pressed(GameAction::Jump),
        jump_held: inputs.pressed(GameAction::Jump),
        sprint_held: inputs.pressed(GameAction::Sprint),
        hold_breath_held: inputs.pressed(GameAction::HoldBreath),
        ascend_held: inputs.pressed(GameAction::SwimUp),
        descend_held: inputs.pressed(GameAction::SwimDown),
        toggle_cursor_pressed: inputs.just_pressed(GameAction::ToggleCursor),
        pointer,
    }
}

pub fn sample_frame_input_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    window: Query<&Window, With<PrimaryWindow>>,
    key_map: Res<KeyMap>,
    mut frame_input: ResMut<CurrentFrameInput>,
) {
    let pointer = window.single().ok().and_then(|window| {
        window.cursor_position().map(|position| PointerSample {
            position,
            viewport: Vec2::new(window.width(), window.height()),
        })
    });

    let inputs = ActionInputs {
        keyboard: &keyboard_input,
        mouse: &mouse_input,
        key_map: &key_map,
    };
    frame_input.0 = build_frame_input(inputs, mouse_motion.delta, pointer);
}
