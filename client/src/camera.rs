use bevy::prelude::*;
use shared::{
    physics::rapier::{player_collider, RapierPhysicsQuery},
    players::ActorSimulation,
    sets::{GameStartupSet, GameUpdateSet},
    MovementTunables,
};

use crate::{
    input::frame::CurrentFrameInput,
    player::{CurrentPlayerMarker, RapierContextQuery},
};

/// The chase camera that renders the game.
#[derive(Component)]
pub struct FollowCamera;

pub struct CameraPlugin;
impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera.in_set(GameStartupSet::Player))
            .add_systems(
                Update,
                camera_follow_system.in_set(GameUpdateSet::CameraFollow),
            );
    }
}

pub fn spawn_camera(mut commands: Commands, tunables: Res<MovementTunables>) {
    commands.spawn((
        FollowCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: tunables.camera.vertical_fov.to_radians(),
            ..default()
        }),
        Transform::default(),
    ));
}

/// Late phase of the player tick: orbit, collide and place the camera.
pub fn camera_follow_system(
    frame_input: Res<CurrentFrameInput>,
    mut players: Query<(Entity, &mut ActorSimulation), With<CurrentPlayerMarker>>,
    mut cameras: Query<&mut Transform, (With<FollowCamera>, Without<CurrentPlayerMarker>)>,
    rapier_context: RapierContextQuery,
) {
    let Ok((colliders, rigidbody_set, query_pipeline)) = rapier_context.single() else {
        return;
    };
    let Ok((entity, mut simulation)) = players.single_mut() else {
        return;
    };
    let Ok(mut camera_transform) = cameras.single_mut() else {
        debug!("Follow camera not found");
        return;
    };

    let physics = RapierPhysicsQuery::new(
        colliders,
        rigidbody_set,
        query_pipeline,
        player_collider(simulation.body_radius(), simulation.pose().height),
    )
    .excluding(entity);

    simulation.step_camera(&frame_input.0, &physics);
    *camera_transform = simulation.camera().transform();
}
