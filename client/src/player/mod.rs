pub mod controller;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use shared::{
    physics::rapier::PlayerPhysicsBundle,
    players::{ActorPose, ActorSimulation},
    sets::{GameStartupSet, GameUpdateSet},
    utils::look_rotation,
    MovementTunables, DEFAULT_PLAYER_RADIUS,
};

use crate::{
    constants::{SPAWN_CLEARANCE, SPAWN_POSITION_XZ},
    input::frame::sample_frame_input_system,
    player::controller::player_movement_system,
    PlayerSettings,
};

#[derive(Component)]
pub struct CurrentPlayerMarker;

/// Rapier context components, queried once per system run.
pub type RapierContextQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static RapierContextColliders,
        &'static RapierRigidBodySet,
        &'static RapierQueryPipeline,
    ),
>;

pub struct PlayerPlugin;
impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player.in_set(GameStartupSet::Player))
            .add_systems(
                Update,
                (
                    sample_frame_input_system.in_set(GameUpdateSet::PlayerInput),
                    player_movement_system.in_set(GameUpdateSet::PlayerPhysics),
                ),
            );
    }
}

/// Where a body of `height` stands on flat ground at `xz`.
pub fn spawn_pose(xz: Vec2, height: f32) -> ActorPose {
    let position = Vec3::new(xz.x, height / 2.0 + SPAWN_CLEARANCE, xz.y);
    // Facing the pool
    let rotation = look_rotation(Vec3::X).unwrap_or(Quat::IDENTITY);
    ActorPose::new(position, height).with_rotation(rotation)
}

pub fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tunables: Res<MovementTunables>,
    settings: Res<PlayerSettings>,
) {
    let pose = spawn_pose(SPAWN_POSITION_XZ, settings.height);
    let radius = DEFAULT_PLAYER_RADIUS;
    let simulation = ActorSimulation::new(&tunables, pose).with_body_radius(radius);

    let segment = (settings.height - 2.0 * radius).max(0.0);
    commands.spawn((
        CurrentPlayerMarker,
        Name::new("Player"),
        simulation,
        pose.transform(),
        PlayerPhysicsBundle::new(radius, settings.height),
        Mesh3d(meshes.add(Capsule3d::new(radius, segment))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.45, 0.2),
            ..default()
        })),
    ));

    info!(
        "Spawned player at {:?} (height {})",
        pose.position, settings.height
    );
}
