use bevy::prelude::*;
use shared::{
    messages::PresentationEvent,
    physics::rapier::{player_collider, RapierPhysicsQuery},
    players::ActorSimulation,
    water::WaterRegions,
};

use super::{CurrentPlayerMarker, RapierContextQuery};
use crate::input::frame::CurrentFrameInput;

/// Body phase of the player tick. The camera follows later in
/// [`crate::camera::camera_follow_system`].
pub fn player_movement_system(
    time: Res<Time>,
    frame_input: Res<CurrentFrameInput>,
    regions: Res<WaterRegions>,
    mut players: Query<
        (Entity, &mut ActorSimulation, &mut Transform),
        (With<CurrentPlayerMarker>, Without<Camera>),
    >,
    rapier_context: RapierContextQuery,
    mut presentation: EventWriter<PresentationEvent>,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    let Ok((colliders, rigidbody_set, query_pipeline)) = rapier_context.single() else {
        debug!("Rapier context not ready");
        return;
    };

    for (entity, mut simulation, mut transform) in players.iter_mut() {
        let physics = RapierPhysicsQuery::new(
            colliders,
            rigidbody_set,
            query_pipeline,
            player_collider(simulation.body_radius(), simulation.pose().height),
        )
        .excluding(entity);

        simulation.step_body(&frame_input.0, delta, &physics, &regions);

        *transform = simulation.pose().transform();
        presentation.write_batch(simulation.drain_events());
    }
}
