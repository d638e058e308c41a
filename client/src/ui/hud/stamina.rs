use bevy::prelude::*;
use shared::{players::ActorSimulation, water::SwimState};

use crate::{
    constants::{STAMINA_BAR_HEIGHT, STAMINA_BAR_WIDTH},
    player::CurrentPlayerMarker,
    ui::style::{
        HUD_FONT_SIZE, STAMINA_BACKGROUND, STAMINA_LOW, STAMINA_READY, TEXT_COLOR,
    },
};

#[derive(Component)]
pub struct StaminaFill;

#[derive(Component)]
pub struct SwimStateLabel;

pub fn spawn_stamina_bar(commands: &mut Commands) {
    commands
        .spawn((
            Name::new("StaminaHud"),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                bottom: Val::Px(20.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                SwimStateLabel,
                Text::new(""),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(TEXT_COLOR),
            ));
            parent
                .spawn((
                    Node {
                        width: Val::Px(STAMINA_BAR_WIDTH),
                        height: Val::Px(STAMINA_BAR_HEIGHT),
                        ..default()
                    },
                    BackgroundColor(STAMINA_BACKGROUND),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        StaminaFill,
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(STAMINA_READY),
                    ));
                });
        });
}

/// Label for the HUD, empty on land.
pub fn swim_state_label(state: SwimState) -> &'static str {
    match state {
        SwimState::Grounded => "",
        SwimState::SurfaceSwim => "Swimming",
        SwimState::Submerged => "Underwater",
        SwimState::Diving => "Diving",
        SwimState::HoldingBreath => "Holding breath",
    }
}

pub fn update_stamina_bar_system(
    player: Query<&ActorSimulation, With<CurrentPlayerMarker>>,
    mut fill: Query<(&mut Node, &mut BackgroundColor), With<StaminaFill>>,
    mut label: Query<&mut Text, With<SwimStateLabel>>,
) {
    let Ok(simulation) = player.single() else {
        return;
    };
    let state = simulation.presentation();

    if let Ok((mut node, mut color)) = fill.single_mut() {
        node.width = Val::Percent(state.stamina * 100.0);
        color.0 = if simulation.stamina().can_dive() {
            STAMINA_READY
        } else {
            STAMINA_LOW
        };
    }

    if let Ok(mut text) = label.single_mut() {
        let next = swim_state_label(state.swim_state);
        if text.0 != next {
            text.0 = next.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swim_state_labels() {
        assert_eq!(swim_state_label(SwimState::Grounded), "");
        assert_eq!(swim_state_label(SwimState::HoldingBreath), "Holding breath");
    }
}
