//! Rapier backend for [`PhysicsQuery`].
//!
//! Level geometry is spawned as fixed colliders in the [`collision_groups::WORLD`]
//! group; the actor is a kinematic capsule in [`collision_groups::PLAYER`]
//! that is never simulated, only moved through shape casts.

use bevy::{
    math::bounding::{Aabb3d, BoundingVolume},
    prelude::*,
};
use bevy_rapier3d::prelude::*;

use super::{CastHit, PhysicsQuery};

/// Gap kept between the body and whatever it ran into.
const CONTACT_SKIN: f32 = 0.01;

pub mod collision_groups {
    use bevy_rapier3d::prelude::Group;

    /// The controlled actor
    pub const PLAYER: Group = Group::GROUP_1;
    /// Static level geometry
    pub const WORLD: Group = Group::GROUP_2;
}

/// Kinematic capsule for the controlled actor.
#[derive(Bundle)]
pub struct PlayerPhysicsBundle {
    pub body: RigidBody,
    pub collider: Collider,
    pub locked_axes: LockedAxes,
    pub collision_groups: CollisionGroups,
}

impl PlayerPhysicsBundle {
    /// * `radius` - Capsule radius
    /// * `height` - Total body height, caps included
    pub fn new(radius: f32, height: f32) -> Self {
        Self {
            // Moved by the movement core, never by the solver
            body: RigidBody::KinematicPositionBased,
            collider: player_collider(radius, height),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            collision_groups: CollisionGroups::new(
                collision_groups::PLAYER,
                collision_groups::WORLD,
            ),
        }
    }
}

/// Capsule standing on Y, centred on the body.
pub fn player_collider(radius: f32, height: f32) -> Collider {
    let radius = radius.max(0.01);
    let half_segment = (height / 2.0 - radius).max(0.0);
    Collider::capsule_y(half_segment, radius)
}

/// Marker for static level geometry.
#[derive(Component)]
pub struct SceneSolid;

#[derive(Bundle)]
pub struct SceneSolidBundle {
    pub body: RigidBody,
    pub collider: Collider,
    pub transform: Transform,
    pub marker: SceneSolid,
    pub collision_groups: CollisionGroups,
}

impl SceneSolidBundle {
    pub fn from_aabb(bounds: Aabb3d) -> Self {
        let center = Vec3::from(bounds.center());
        let half_size = Vec3::from(bounds.half_size());
        Self {
            body: RigidBody::Fixed,
            collider: Collider::cuboid(half_size.x, half_size.y, half_size.z),
            transform: Transform::from_translation(center),
            marker: SceneSolid,
            collision_groups: CollisionGroups::new(collision_groups::WORLD, Group::ALL),
        }
    }
}

/// Plugin that sets up Rapier for query-only use.
pub struct ShorelinePhysicsPlugin;

impl Plugin for ShorelinePhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            RapierPhysicsPlugin::<NoUserData>::default().with_default_system_setup(true),
        );

        app.add_systems(Startup, configure_rapier_context);

        #[cfg(debug_assertions)]
        {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

fn configure_rapier_context(mut query: Query<&mut RapierConfiguration>) {
    for mut config in query.iter_mut() {
        // Bodies are kinematic or fixed, gravity is owned by the movement core
        config.gravity = Vec3::ZERO;
        config.physics_pipeline_active = true;
        config.query_pipeline_active = true;
    }
}

/// [`PhysicsQuery`] over one Rapier context, borrowed for a single system run.
pub struct RapierPhysicsQuery<'a> {
    colliders: &'a RapierContextColliders,
    rigidbody_set: &'a RapierRigidBodySet,
    query_pipeline: &'a RapierQueryPipeline,
    body: Collider,
    exclude: Option<Entity>,
}

impl<'a> RapierPhysicsQuery<'a> {
    /// `body` is the shape swept by [`PhysicsQuery::move_character`].
    pub fn new(
        colliders: &'a RapierContextColliders,
        rigidbody_set: &'a RapierRigidBodySet,
        query_pipeline: &'a RapierQueryPipeline,
        body: Collider,
    ) -> Self {
        Self {
            colliders,
            rigidbody_set,
            query_pipeline,
            body,
            exclude: None,
        }
    }

    /// Ignore the actor's own collider.
    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }

    fn filter(&self) -> QueryFilter<'_> {
        let filter = QueryFilter::default()
            .exclude_sensors()
            .groups(CollisionGroups::new(
                collision_groups::PLAYER,
                collision_groups::WORLD,
            ));
        match self.exclude {
            Some(entity) => filter.exclude_collider(entity),
            None => filter,
        }
    }

    fn cast(
        &self,
        shape: &Collider,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<ShapeCastHit> {
        self.query_pipeline
            .cast_shape(
                self.colliders,
                self.rigidbody_set,
                origin,
                Quat::IDENTITY,
                direction,
                shape,
                ShapeCastOptions {
                    max_time_of_impact: max_distance,
                    stop_at_penetration: false,
                    ..default()
                },
                self.filter(),
            )
            .map(|(_, hit)| hit)
    }

    /// Largest step along one axis the body can take before touching.
    fn advance_axis(&self, position: Vec3, axis: Vec3, amount: f32) -> f32 {
        if amount == 0.0 {
            return 0.0;
        }
        let direction = axis * amount.signum();
        match self.cast(&self.body, position, direction, amount.abs()) {
            Some(hit) => (hit.time_of_impact - CONTACT_SKIN).max(0.0) * amount.signum(),
            None => amount,
        }
    }
}

impl PhysicsQuery for RapierPhysicsQuery<'_> {
    fn check_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.query_pipeline
            .intersection_with_shape(
                self.colliders,
                self.rigidbody_set,
                center,
                Quat::IDENTITY,
                &Collider::ball(radius),
                self.filter(),
            )
            .is_some()
    }

    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<CastHit> {
        let hit = self.cast(&Collider::ball(radius), origin, direction, max_distance)?;
        let distance = hit.time_of_impact;
        let (point, normal) = match hit.details {
            Some(details) => (details.witness1, details.normal1),
            None => (origin + direction * (distance + radius), -direction),
        };
        Some(CastHit {
            point,
            normal,
            distance,
        })
    }

    fn ray_cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<CastHit> {
        let (_, intersection) = self.query_pipeline.cast_ray_and_get_normal(
            self.colliders,
            self.rigidbody_set,
            origin,
            direction,
            max_distance,
            true,
            self.filter(),
        )?;
        Some(CastHit {
            point: intersection.point,
            normal: intersection.normal,
            distance: intersection.time_of_impact,
        })
    }

    fn move_character(&self, position: Vec3, displacement: Vec3) -> Vec3 {
        let mut position = position;
        for axis in [Vec3::X, Vec3::Z, Vec3::Y] {
            position += axis * self.advance_axis(position, axis, displacement.dot(axis));
        }
        position
    }
}
