use bevy::prelude::*;

use crate::{
    config::MovementTunables,
    constants::DEFAULT_PLAYER_RADIUS,
    messages::{CursorMode, FrameInput, PresentationEvent, PresentationState},
    physics::{GroundLocomotion, PhysicsQuery},
    players::{ActorPose, ChaseCamera},
    water::{Stamina, SwimController, WaterMembership, WaterRegions, WaterTransition},
};

/// One controllable actor: body, both body controllers, stamina and the
/// camera that follows it.
///
/// Exactly one body controller moves the pose per tick, chosen by water
/// membership. The camera always runs after the body.
#[derive(Component, Debug, Clone)]
pub struct ActorSimulation {
    pose: ActorPose,
    locomotion: GroundLocomotion,
    swim: SwimController,
    stamina: Stamina,
    camera: ChaseCamera,
    membership: WaterMembership,
    body_radius: f32,
    swim_direction: Vec3,
    events: Vec<PresentationEvent>,
    cursor_mode: CursorMode,
    swim_pointer_visible: bool,
}

impl ActorSimulation {
    /// Spawns an actor with the camera behind its heading and the cursor
    /// locked.
    pub fn new(tunables: &MovementTunables, pose: ActorPose) -> Self {
        let mut simulation = Self {
            pose,
            locomotion: GroundLocomotion::new(tunables.locomotion),
            swim: SwimController::new(tunables.swim),
            stamina: Stamina::new(tunables.stamina),
            camera: ChaseCamera::behind(tunables.camera, pose.rotation),
            membership: WaterMembership::default(),
            body_radius: DEFAULT_PLAYER_RADIUS,
            swim_direction: Vec3::ZERO,
            events: Vec::new(),
            cursor_mode: CursorMode::Locked,
            swim_pointer_visible: false,
        };
        simulation.push_event(PresentationEvent::CursorMode(CursorMode::Locked));
        simulation.push_event(PresentationEvent::SwimPointerVisible(false));
        simulation
    }

    /// Horizontal half extent of the body used for water overlap.
    pub fn with_body_radius(mut self, radius: f32) -> Self {
        self.body_radius = radius.abs();
        self
    }

    pub fn body_radius(&self) -> f32 {
        self.body_radius
    }

    pub fn pose(&self) -> &ActorPose {
        &self.pose
    }

    pub fn locomotion(&self) -> &GroundLocomotion {
        &self.locomotion
    }

    pub fn swim(&self) -> &SwimController {
        &self.swim
    }

    pub fn stamina(&self) -> &Stamina {
        &self.stamina
    }

    pub fn camera(&self) -> &ChaseCamera {
        &self.camera
    }

    /// Swim direction used by the last body step, zero on land.
    pub fn swim_direction(&self) -> Vec3 {
        self.swim_direction
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    fn push_event(&mut self, event: PresentationEvent) {
        self.events.push(event);
        self.apply_event(event);
    }

    fn apply_event(&mut self, event: PresentationEvent) {
        match event {
            PresentationEvent::CursorMode(mode) => self.cursor_mode = mode,
            PresentationEvent::SwimPointerVisible(visible) => self.swim_pointer_visible = visible,
            PresentationEvent::SwimPointerMoved(_) => {}
        }
    }

    fn toggle_cursor(&mut self) {
        let mode = match self.cursor_mode {
            CursorMode::Locked => CursorMode::Free,
            CursorMode::Free => CursorMode::Locked,
        };
        log::debug!("Cursor toggled to {mode:?}");
        self.push_event(PresentationEvent::CursorMode(mode));
    }

    /// Water edges, then whichever body controller owns the pose, then
    /// stamina.
    pub fn step_body(
        &mut self,
        input: &FrameInput,
        delta: f32,
        physics: &impl PhysicsQuery,
        regions: &WaterRegions,
    ) {
        let first_new_event = self.events.len();

        let body = self.pose.bounds(self.body_radius);
        match self.membership.update(regions, &body) {
            WaterTransition::Entered(volume) => {
                self.swim
                    .enter_water(&volume, &mut self.locomotion, &mut self.events)
            }
            WaterTransition::Exited => self.swim.exit_water(&mut self.locomotion, &mut self.events),
            WaterTransition::None => {}
        }

        if input.toggle_cursor_pressed && !self.swim.is_submerged() {
            self.toggle_cursor();
        }

        let view = self.camera.view();
        if self.swim.is_in_water() {
            self.swim_direction = self.swim.update(
                &mut self.pose,
                input,
                delta,
                view,
                &self.stamina,
                physics,
                &mut self.events,
            );
            let draining =
                Stamina::swim_drains(input, self.swim_direction, self.swim.is_at_surface());
            self.stamina.tick(draining, delta);
        } else {
            self.swim_direction = Vec3::ZERO;
            self.locomotion
                .update(&mut self.pose, input, view.basis(), delta, physics);
            self.stamina.tick(false, delta);
        }

        for index in first_new_event..self.events.len() {
            let event = self.events[index];
            self.apply_event(event);
        }
    }

    /// Late phase: follows the pose produced by [`Self::step_body`].
    pub fn step_camera(&mut self, input: &FrameInput, physics: &impl PhysicsQuery) {
        self.camera
            .update(self.pose.position, input.look_delta, physics);
    }

    pub fn tick(
        &mut self,
        input: &FrameInput,
        delta: f32,
        physics: &impl PhysicsQuery,
        regions: &WaterRegions,
    ) {
        self.step_body(input, delta, physics, regions);
        self.step_camera(input, physics);
    }

    /// Presentation requests raised since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn presentation(&self) -> PresentationState {
        PresentationState {
            grounded: self.locomotion.is_grounded(),
            in_water: self.swim.is_in_water(),
            swim_state: self.swim.state(),
            stamina: self.stamina.normalized(),
            cursor_mode: self.cursor_mode,
            swim_pointer_visible: self.swim_pointer_visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        physics::StaticScene,
        water::{SwimState, WaterVolume},
    };
    use bevy::math::bounding::Aabb3d;

    const DT: f32 = 0.1;

    fn tunables() -> MovementTunables {
        MovementTunables::default()
    }

    fn open_scene() -> StaticScene {
        StaticScene::new(Vec3::new(0.4, 1.0, 0.4))
    }

    fn ground_scene() -> StaticScene {
        open_scene().with_solid(Aabb3d::new(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(100.0, 0.5, 100.0),
        ))
    }

    fn lake() -> WaterRegions {
        let mut regions = WaterRegions::default();
        regions.register(WaterVolume::new(
            Vec3::new(-50.0, 0.0, -50.0),
            Vec3::new(50.0, 10.0, 50.0),
        ));
        regions
    }

    #[test]
    fn test_spawn_locks_cursor() {
        let mut actor = ActorSimulation::new(&tunables(), ActorPose::new(Vec3::ZERO, 2.0));
        assert_eq!(
            actor.drain_events(),
            vec![
                PresentationEvent::CursorMode(CursorMode::Locked),
                PresentationEvent::SwimPointerVisible(false),
            ]
        );
        assert!(actor.drain_events().is_empty());
        assert_eq!(actor.presentation().cursor_mode, CursorMode::Locked);
    }

    #[test]
    fn test_falling_into_water_hands_over_control() {
        let mut actor =
            ActorSimulation::new(&tunables(), ActorPose::new(Vec3::new(0.0, 12.0, 0.0), 2.0));
        actor.drain_events();
        let regions = lake();

        for _ in 0..20 {
            actor.tick(&FrameInput::default(), DT, &open_scene(), &regions);
            if actor.swim().is_in_water() {
                break;
            }
        }
        assert!(actor.swim().is_in_water());
        assert!(!actor.locomotion().control_enabled());
        assert_eq!(actor.locomotion().vertical_velocity(), 0.0);
        assert!(actor
            .drain_events()
            .starts_with(&[PresentationEvent::CursorMode(CursorMode::Locked)]));
        assert!(actor.presentation().in_water);
    }

    #[test]
    fn test_leaving_water_returns_to_ground_controller() {
        let mut actor =
            ActorSimulation::new(&tunables(), ActorPose::new(Vec3::new(0.0, 9.6, 0.0), 2.0));
        actor.tick(&FrameInput::default(), DT, &open_scene(), &lake());
        assert!(actor.swim().is_in_water());

        actor.tick(&FrameInput::default(), DT, &open_scene(), &WaterRegions::default());
        assert!(!actor.swim().is_in_water());
        assert!(actor.locomotion().control_enabled());
        assert_eq!(actor.presentation().swim_state, SwimState::Grounded);
    }

    #[test]
    fn test_sprint_swimming_drains_and_land_regenerates() {
        let mut actor =
            ActorSimulation::new(&tunables(), ActorPose::new(Vec3::new(0.0, 9.6, 0.0), 2.0));
        let sprint = FrameInput {
            move_axes: Vec2::Y,
            sprint_held: true,
            ..Default::default()
        };
        for _ in 0..10 {
            actor.tick(&sprint, DT, &open_scene(), &lake());
        }
        assert!(actor.swim_direction().length() > 0.1);
        assert!((actor.stamina().current() - 90.0).abs() < 1e-3);

        let mut walker =
            ActorSimulation::new(&tunables(), ActorPose::new(Vec3::new(0.0, 1.05, 0.0), 2.0));
        for _ in 0..50 {
            walker.tick(&sprint, DT, &ground_scene(), &WaterRegions::default());
            let stamina = walker.stamina().current();
            assert!((0.0..=walker.stamina().max()).contains(&stamina));
        }
        assert_eq!(walker.stamina().current(), walker.stamina().max());
        assert!(walker.presentation().grounded);
    }

    #[test]
    fn test_cursor_toggle_on_land_only() {
        let mut actor =
            ActorSimulation::new(&tunables(), ActorPose::new(Vec3::new(0.0, 1.05, 0.0), 2.0));
        actor.drain_events();
        let toggle = FrameInput {
            toggle_cursor_pressed: true,
            ..Default::default()
        };
        actor.tick(&toggle, DT, &ground_scene(), &WaterRegions::default());
        assert_eq!(
            actor.drain_events(),
            vec![PresentationEvent::CursorMode(CursorMode::Free)]
        );
        assert_eq!(actor.cursor_mode(), CursorMode::Free);

        actor.tick(&toggle, DT, &ground_scene(), &WaterRegions::default());
        assert_eq!(actor.cursor_mode(), CursorMode::Locked);
    }

    #[test]
    fn test_cursor_toggle_ignored_while_submerged() {
        let mut actor =
            ActorSimulation::new(&tunables(), ActorPose::new(Vec3::new(0.0, 5.0, 0.0), 2.0));
        actor.tick(&FrameInput::default(), DT, &open_scene(), &lake());
        assert!(actor.swim().is_submerged());
        let state = actor.presentation();
        assert_eq!(state.cursor_mode, CursorMode::Free);
        assert!(state.swim_pointer_visible);
        assert_eq!(state.swim_state, SwimState::Submerged);
        actor.drain_events();

        let toggle = FrameInput {
            toggle_cursor_pressed: true,
            ..Default::default()
        };
        actor.tick(&toggle, DT, &open_scene(), &lake());
        assert!(actor.drain_events().is_empty());
        assert_eq!(actor.cursor_mode(), CursorMode::Free);
    }

    #[test]
    fn test_camera_follows_after_body() {
        let mut actor =
            ActorSimulation::new(&tunables(), ActorPose::new(Vec3::new(0.0, 1.05, 0.0), 2.0));
        let forward = FrameInput {
            move_axes: Vec2::Y,
            ..Default::default()
        };
        actor.tick(&forward, DT, &ground_scene(), &WaterRegions::default());

        let pivot = actor.pose().position + Vec3::Y * tunables().camera.pivot_height;
        assert!(actor.camera().pivot().distance(pivot) < 1e-5);
        assert!(actor.pose().position.z < 0.0);
    }

    #[test]
    fn test_floating_high_in_the_water_stays_in_water() {
        let mut tunables = tunables();
        tunables.swim.exposed_fraction = 0.6;
        assert!(tunables.validate().is_ok());
        // Feet at 8.5, floating target 9.2 puts the centre above the surface
        let mut actor =
            ActorSimulation::new(&tunables, ActorPose::new(Vec3::new(0.0, 9.5, 0.0), 2.0));
        let regions = lake();

        for _ in 0..200 {
            actor.tick(&FrameInput::default(), 0.05, &open_scene(), &regions);
            assert!(actor.swim().is_in_water(), "body still overlaps the lake");
        }
        assert!((actor.pose().feet_height() - 9.2).abs() < 0.35);
        assert!(!actor.locomotion().control_enabled());
    }
}
