use bevy::prelude::*;

use crate::{
    constants::SWIM_POINTER_SIZE, ui::hud::cursor::CursorPresentation,
    ui::style::SWIM_POINTER_COLOR,
};

/// On-screen marker that stands in for the cursor while steering underwater.
#[derive(Component)]
pub struct SwimPointer;

pub fn spawn_swim_pointer(commands: &mut Commands) {
    commands.spawn((
        SwimPointer,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(SWIM_POINTER_SIZE),
            height: Val::Px(SWIM_POINTER_SIZE),
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BorderColor(SWIM_POINTER_COLOR),
        BorderRadius::MAX,
        Visibility::Hidden,
    ));
}

/// Top-left corner that centres the marker on `position`.
pub fn pointer_corner(position: Vec2) -> Vec2 {
    position - Vec2::splat(SWIM_POINTER_SIZE / 2.0)
}

pub fn update_swim_pointer_system(
    presentation: Res<CursorPresentation>,
    mut pointer: Query<(&mut Node, &mut Visibility), With<SwimPointer>>,
) {
    if !presentation.is_changed() {
        return;
    }
    let Ok((mut node, mut visibility)) = pointer.single_mut() else {
        return;
    };

    *visibility = if presentation.swim_pointer_visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    if let Some(position) = presentation.swim_pointer_position {
        let corner = pointer_corner(position);
        node.left = Val::Px(corner.x);
        node.top = Val::Px(corner.y);
    }
}
