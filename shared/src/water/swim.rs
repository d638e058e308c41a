use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::SwimConfig,
    constants::MIN_TURN_INPUT,
    messages::{CursorMode, FrameInput, PointerSample, PresentationEvent},
    physics::{GroundLocomotion, PhysicsQuery},
    players::{ActorPose, CameraView},
    utils::{clamp_unit, flatten, look_rotation, slerp_toward},
    water::{
        pointer::{center_offset, clamp_to_viewport},
        Stamina, WaterVolume,
    },
};

const HOLD_BREATH_RISE_FACTOR: f32 = 0.3;
const FLOAT_SINK_FACTOR: f32 = 0.5;
const HOLD_BREATH_DAMPING: f32 = 0.85;
const FLOAT_DAMPING: f32 = 0.9;
const SETTLE_DAMPING: f32 = 0.95;

/// Coarse swim state for animation and HUD binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwimState {
    #[default]
    Grounded,
    SurfaceSwim,
    Submerged,
    Diving,
    HoldingBreath,
}

/// Buoyancy-driven swimming inside a water volume.
#[derive(Debug, Clone)]
pub struct SwimController {
    config: SwimConfig,
    in_water: bool,
    at_surface: bool,
    submerged: bool,
    diving: bool,
    /// A dive fired during the last update; `diving` itself never outlives it.
    dive_started: bool,
    holding_breath: bool,
    vertical_velocity: f32,
    surface_height: f32,
}

impl SwimController {
    pub fn new(config: SwimConfig) -> Self {
        Self {
            config,
            in_water: false,
            at_surface: false,
            submerged: false,
            diving: false,
            dive_started: false,
            holding_breath: false,
            vertical_velocity: 0.0,
            surface_height: 0.0,
        }
    }

    pub fn is_in_water(&self) -> bool {
        self.in_water
    }

    pub fn is_at_surface(&self) -> bool {
        self.at_surface
    }

    pub fn is_submerged(&self) -> bool {
        self.submerged
    }

    pub fn is_diving(&self) -> bool {
        self.diving
    }

    pub fn is_holding_breath(&self) -> bool {
        self.holding_breath
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn surface_height(&self) -> f32 {
        self.surface_height
    }

    pub fn state(&self) -> SwimState {
        if !self.in_water {
            SwimState::Grounded
        } else if self.diving || self.dive_started {
            SwimState::Diving
        } else if self.holding_breath {
            SwimState::HoldingBreath
        } else if self.submerged {
            SwimState::Submerged
        } else {
            SwimState::SurfaceSwim
        }
    }

    /// Resting height of the feet while floating.
    pub fn float_target(&self, height: f32) -> f32 {
        self.surface_height - height * (1.0 - self.config.exposed_fraction)
    }

    /// Resting height of the feet while holding breath.
    pub fn submerged_target(&self, height: f32) -> f32 {
        self.surface_height - height * self.config.submerged_depth_multiplier
    }

    fn reset_motion(&mut self) {
        self.vertical_velocity = 0.0;
        self.at_surface = false;
        self.diving = false;
        self.dive_started = false;
        self.holding_breath = false;
        self.submerged = false;
    }

    fn push_cursor_presentation(events: &mut Vec<PresentationEvent>, submerged: bool) {
        let mode = if submerged {
            CursorMode::Free
        } else {
            CursorMode::Locked
        };
        events.push(PresentationEvent::CursorMode(mode));
        events.push(PresentationEvent::SwimPointerVisible(submerged));
    }

    /// Takes control away from `locomotion` and starts floating in `volume`.
    pub fn enter_water(
        &mut self,
        volume: &WaterVolume,
        locomotion: &mut GroundLocomotion,
        events: &mut Vec<PresentationEvent>,
    ) {
        self.in_water = true;
        self.surface_height = volume.surface_height();
        locomotion.set_control_enabled(false);
        locomotion.zero_vertical_velocity();
        self.reset_motion();
        Self::push_cursor_presentation(events, false);
        log::info!("Entered water, surface at y = {}", self.surface_height);
    }

    /// Hands control back to `locomotion`. When already dry only the cursor
    /// presentation is reasserted.
    pub fn exit_water(
        &mut self,
        locomotion: &mut GroundLocomotion,
        events: &mut Vec<PresentationEvent>,
    ) {
        if self.in_water {
            self.in_water = false;
            locomotion.set_control_enabled(true);
            self.reset_motion();
            log::info!("Exited water");
        }
        Self::push_cursor_presentation(events, false);
    }

    /// Runs one swim tick and returns the swim direction it used.
    ///
    /// Does nothing outside water.
    pub fn update(
        &mut self,
        pose: &mut ActorPose,
        input: &FrameInput,
        delta: f32,
        view: CameraView,
        stamina: &Stamina,
        physics: &impl PhysicsQuery,
        events: &mut Vec<PresentationEvent>,
    ) -> Vec3 {
        if !self.in_water {
            return Vec3::ZERO;
        }
        self.dive_started = false;
        self.holding_breath = input.hold_breath_held;

        let float_target = self.float_target(pose.height);
        let submerged_target = self.submerged_target(pose.height);

        let submerged = pose.head_height() < self.surface_height;
        if submerged != self.submerged {
            self.submerged = submerged;
            log::debug!("Swimmer submerged: {submerged}");
            Self::push_cursor_presentation(events, submerged);
        }

        if self.submerged {
            if let Some(sample) = input.pointer {
                self.steer_toward_pointer(pose, sample, view, delta, events);
            }
        }

        self.at_surface = !self.holding_breath
            && (float_target - pose.feet_height()).abs() < self.config.surface_threshold;

        if input.jump_pressed {
            if !stamina.can_dive() {
                log::debug!("Dive refused, stamina at {:.1}", stamina.current());
            } else if self.at_surface && !self.holding_breath {
                self.diving = true;
                self.dive_started = true;
                self.vertical_velocity = -self.config.dive_speed;
                log::debug!("Dive");
            } else {
                self.diving = false;
                self.vertical_velocity = self.config.dive_speed;
                log::debug!("Ascend");
            }
        }

        let direction = self.swim_direction(input, view);

        let speed = if input.sprint_held && stamina.can_sprint() {
            self.config.fast_swim_speed
        } else if self.at_surface {
            self.config.surface_swim_speed
        } else {
            self.config.underwater_swim_speed
        };

        let target = if self.holding_breath {
            submerged_target
        } else {
            float_target
        };
        let distance = target - pose.feet_height();
        self.apply_buoyancy(distance, delta);

        if direction.length() > MIN_TURN_INPUT {
            let heading = if self.at_surface {
                flatten(direction)
            } else {
                direction
            };
            if let Some(rotation) = look_rotation(heading) {
                pose.rotation =
                    slerp_toward(pose.rotation, rotation, self.config.turn_rate, delta);
            }
        }

        let motion = direction * speed * delta + Vec3::Y * self.vertical_velocity * delta;
        pose.position = physics.move_character(pose.position, motion);

        self.diving = false;

        if distance.abs() < self.config.surface_threshold {
            self.vertical_velocity *= SETTLE_DAMPING;
        }

        direction
    }

    fn swim_direction(&self, input: &FrameInput, view: CameraView) -> Vec3 {
        let axes = input.clamped_axes();
        let basis = if self.at_surface {
            view.basis().flattened()
        } else {
            view.basis()
        };
        let mut direction = basis.forward * axes.y + basis.right * axes.x;

        if !self.at_surface && !self.diving && !self.holding_breath {
            if input.ascend_held {
                direction += Vec3::Y;
            }
            if input.descend_held {
                direction -= Vec3::Y;
            }
        }
        clamp_unit(direction)
    }

    fn apply_buoyancy(&mut self, distance: f32, delta: f32) {
        let threshold = self.config.surface_threshold;
        let buoyancy = self.config.buoyancy_force;

        if self.holding_breath {
            if distance > threshold {
                self.vertical_velocity += buoyancy * HOLD_BREATH_RISE_FACTOR * delta;
            } else if distance < -threshold {
                self.vertical_velocity -= self.config.hold_breath_sink_speed * delta;
            } else {
                self.vertical_velocity *= HOLD_BREATH_DAMPING;
            }
        } else if !self.diving {
            if distance > threshold {
                self.vertical_velocity += buoyancy * delta;
            } else if distance < -threshold {
                self.vertical_velocity -= buoyancy * FLOAT_SINK_FACTOR * delta;
            } else {
                self.vertical_velocity *= FLOAT_DAMPING;
            }
        }

        let limit = self.config.dive_speed.abs();
        self.vertical_velocity = self.vertical_velocity.max(-limit).min(limit);
    }

    fn steer_toward_pointer(
        &self,
        pose: &mut ActorPose,
        sample: PointerSample,
        view: CameraView,
        delta: f32,
        events: &mut Vec<PresentationEvent>,
    ) {
        if sample.viewport.x <= 0.0 || sample.viewport.y <= 0.0 {
            return;
        }
        let clamped = clamp_to_viewport(sample.position, sample.viewport, self.config.pointer_margin);
        events.push(PresentationEvent::SwimPointerMoved(clamped));

        if center_offset(clamped, sample.viewport) <= self.config.cursor_rotation_threshold {
            return;
        }
        let Some(heading) = view.projection(sample.viewport).flat_direction(clamped) else {
            return;
        };
        if heading.length() > MIN_TURN_INPUT {
            if let Some(rotation) = look_rotation(heading) {
                pose.rotation = slerp_toward(
                    pose.rotation,
                    rotation,
                    self.config.cursor_rotation_speed,
                    delta,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{LocomotionConfig, StaminaConfig},
        physics::StaticScene,
        utils::forward_of,
    };

    const DT: f32 = 0.1;
    const HEIGHT: f32 = 2.0;

    fn pool() -> WaterVolume {
        WaterVolume::new(Vec3::new(-20.0, 0.0, -20.0), Vec3::new(20.0, 10.0, 20.0))
    }

    fn open_water() -> StaticScene {
        StaticScene::new(Vec3::new(0.4, 1.0, 0.4))
    }

    /// Swimmer whose feet are at `feet`.
    fn swimmer_at(feet: f32) -> (SwimController, GroundLocomotion, ActorPose) {
        let mut swim = SwimController::new(SwimConfig::default());
        let mut locomotion = GroundLocomotion::new(LocomotionConfig::default());
        swim.enter_water(&pool(), &mut locomotion, &mut Vec::new());
        let centre = Vec3::new(0.0, feet + HEIGHT / 2.0, 0.0);
        (swim, locomotion, ActorPose::new(centre, HEIGHT))
    }

    fn tick(
        swim: &mut SwimController,
        pose: &mut ActorPose,
        input: &FrameInput,
        stamina: &Stamina,
    ) -> Vec<PresentationEvent> {
        let mut events = Vec::new();
        swim.update(
            pose,
            input,
            DT,
            CameraView::default(),
            stamina,
            &open_water(),
            &mut events,
        );
        events
    }

    fn full_stamina() -> Stamina {
        Stamina::new(StaminaConfig::default())
    }

    #[test]
    fn test_targets() {
        let (swim, _, _) = swimmer_at(8.6);
        assert_eq!(swim.surface_height(), 10.0);
        assert!((swim.float_target(HEIGHT) - 8.6).abs() < 1e-5);
        assert!((swim.submerged_target(HEIGHT) - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_enter_water_takes_control_and_resets() {
        let mut swim = SwimController::new(SwimConfig::default());
        let mut locomotion = GroundLocomotion::new(LocomotionConfig::default());
        let mut falling = ActorPose::new(Vec3::new(0.0, 30.0, 0.0), HEIGHT);
        locomotion.update(
            &mut falling,
            &FrameInput::default(),
            Default::default(),
            DT,
            &open_water(),
        );
        assert!(locomotion.vertical_velocity() < 0.0);

        let mut events = Vec::new();
        swim.enter_water(&pool(), &mut locomotion, &mut events);

        assert_eq!(locomotion.vertical_velocity(), 0.0);
        assert!(!locomotion.control_enabled());
        assert!(swim.is_in_water());
        assert!(!swim.is_diving() && !swim.is_holding_breath() && !swim.is_submerged());
        assert_eq!(swim.vertical_velocity(), 0.0);
        assert_eq!(
            events,
            vec![
                PresentationEvent::CursorMode(CursorMode::Locked),
                PresentationEvent::SwimPointerVisible(false),
            ]
        );
    }

    #[test]
    fn test_at_surface_within_threshold() {
        let (mut swim, _, mut pose) = swimmer_at(8.8);
        tick(&mut swim, &mut pose, &FrameInput::default(), &full_stamina());
        assert!(swim.is_at_surface());
        assert_eq!(swim.state(), SwimState::SurfaceSwim);

        let (mut swim, _, mut pose) = swimmer_at(9.1);
        tick(&mut swim, &mut pose, &FrameInput::default(), &full_stamina());
        assert!(!swim.is_at_surface());
    }

    #[test]
    fn test_floats_back_to_target() {
        let (mut swim, _, mut pose) = swimmer_at(5.0);
        for _ in 0..300 {
            tick(&mut swim, &mut pose, &FrameInput::default(), &full_stamina());
        }
        assert!((pose.feet_height() - 8.6).abs() < 0.3);
        assert!(swim.is_at_surface());
    }

    #[test]
    fn test_holding_breath_is_bounded_and_never_at_surface() {
        let (mut swim, _, mut pose) = swimmer_at(8.6);
        let hold = FrameInput {
            hold_breath_held: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut swim, &mut pose, &hold, &full_stamina());
            assert!(!swim.is_at_surface());
            assert!(swim.vertical_velocity().abs() <= 4.0);
        }
        assert!((pose.feet_height() - 8.0).abs() < 0.35);
        assert_eq!(swim.state(), SwimState::HoldingBreath);
    }

    #[test]
    fn test_dive_refused_without_stamina() {
        let (mut swim, _, mut pose) = swimmer_at(8.6);
        let dive = FrameInput {
            jump_pressed: true,
            ..Default::default()
        };
        let tired = full_stamina().with_current(15.0);
        tick(&mut swim, &mut pose, &dive, &tired);

        assert_eq!(swim.vertical_velocity(), 0.0);
        assert!(!swim.is_diving());
        assert_eq!(swim.state(), SwimState::SurfaceSwim);
        assert!((pose.feet_height() - 8.6).abs() < 1e-5);
    }

    #[test]
    fn test_dive_lasts_one_tick() {
        let (mut swim, _, mut pose) = swimmer_at(8.6);
        let dive = FrameInput {
            jump_pressed: true,
            ..Default::default()
        };
        tick(&mut swim, &mut pose, &dive, &full_stamina());

        // Moved at full dive speed, then the settle damping kicked in.
        assert!((pose.feet_height() - (8.6 - 4.0 * DT)).abs() < 1e-4);
        assert!((swim.vertical_velocity() + 4.0 * SETTLE_DAMPING).abs() < 1e-4);
        assert!(!swim.is_diving());
        assert_eq!(swim.state(), SwimState::Diving);

        tick(&mut swim, &mut pose, &FrameInput::default(), &full_stamina());
        assert_ne!(swim.state(), SwimState::Diving);
    }

    #[test]
    fn test_jump_below_surface_ascends() {
        let (mut swim, _, mut pose) = swimmer_at(6.0);
        let jump = FrameInput {
            jump_pressed: true,
            ..Default::default()
        };
        tick(&mut swim, &mut pose, &jump, &full_stamina());
        assert!(swim.vertical_velocity() > 0.0);
        assert!(pose.feet_height() > 6.0);
    }

    #[test]
    fn test_submerge_edges_emit_cursor_events() {
        let (mut swim, _, mut pose) = swimmer_at(7.0);
        let events = tick(&mut swim, &mut pose, &FrameInput::default(), &full_stamina());
        assert!(swim.is_submerged());
        assert_eq!(
            events,
            vec![
                PresentationEvent::CursorMode(CursorMode::Free),
                PresentationEvent::SwimPointerVisible(true),
            ]
        );

        let events = tick(&mut swim, &mut pose, &FrameInput::default(), &full_stamina());
        assert!(events.is_empty(), "no edge, no events");

        pose.position.y = 8.6 + HEIGHT / 2.0;
        let events = tick(&mut swim, &mut pose, &FrameInput::default(), &full_stamina());
        assert_eq!(
            events,
            vec![
                PresentationEvent::CursorMode(CursorMode::Locked),
                PresentationEvent::SwimPointerVisible(false),
            ]
        );
    }

    #[test]
    fn test_exit_water_when_dry_only_reasserts_cursor() {
        let mut swim = SwimController::new(SwimConfig::default());
        let mut locomotion = GroundLocomotion::new(LocomotionConfig::default());
        locomotion.set_control_enabled(false);
        let mut events = Vec::new();
        swim.exit_water(&mut locomotion, &mut events);

        assert!(!locomotion.control_enabled(), "authority untouched");
        assert!(!swim.is_in_water());
        assert_eq!(
            events,
            vec![
                PresentationEvent::CursorMode(CursorMode::Locked),
                PresentationEvent::SwimPointerVisible(false),
            ]
        );
    }

    #[test]
    fn test_exit_water_returns_control() {
        let (mut swim, mut locomotion, _) = swimmer_at(8.6);
        swim.exit_water(&mut locomotion, &mut Vec::new());
        assert!(locomotion.control_enabled());
        assert!(!swim.is_in_water());
        assert_eq!(swim.state(), SwimState::Grounded);
    }

    #[test]
    fn test_surface_swim_stays_horizontal() {
        let (mut swim, _, mut pose) = swimmer_at(8.6);
        let input = FrameInput {
            move_axes: Vec2::Y,
            ascend_held: true,
            ..Default::default()
        };
        let direction = swim.update(
            &mut pose,
            &input,
            DT,
            CameraView {
                rotation: Quat::from_rotation_x(-0.5),
                vertical_fov: 60.0,
            },
            &full_stamina(),
            &open_water(),
            &mut Vec::new(),
        );
        assert_eq!(direction.y, 0.0);
        assert!(direction.distance(Vec3::NEG_Z) < 1e-5);
        assert!((pose.position.z + 3.0 * DT).abs() < 1e-4);
    }

    #[test]
    fn test_sprint_swims_fast() {
        let (mut swim, _, mut pose) = swimmer_at(8.6);
        let input = FrameInput {
            move_axes: Vec2::Y,
            sprint_held: true,
            ..Default::default()
        };
        tick(&mut swim, &mut pose, &input, &full_stamina());
        assert!((pose.position.z + 5.0 * DT).abs() < 1e-4);

        let (mut swim, _, mut pose) = swimmer_at(8.6);
        tick(&mut swim, &mut pose, &input, &full_stamina().with_current(0.0));
        assert!((pose.position.z + 3.0 * DT).abs() < 1e-4);
    }

    #[test]
    fn test_underwater_ascend_key_adds_lift() {
        let (mut swim, _, mut pose) = swimmer_at(5.0);
        let input = FrameInput {
            ascend_held: true,
            ..Default::default()
        };
        let direction = swim.update(
            &mut pose,
            &input,
            DT,
            CameraView::default(),
            &full_stamina(),
            &open_water(),
            &mut Vec::new(),
        );
        assert_eq!(direction, Vec3::Y);
    }

    #[test]
    fn test_pointer_steering_turns_toward_pointer() {
        let (mut swim, _, mut pose) = swimmer_at(5.0);
        let input = FrameInput {
            pointer: Some(PointerSample {
                position: Vec2::new(2000.0, 250.0),
                viewport: Vec2::new(1000.0, 500.0),
            }),
            ..Default::default()
        };
        let events = tick(&mut swim, &mut pose, &input, &full_stamina());

        assert!(events.contains(&PresentationEvent::SwimPointerMoved(Vec2::new(950.0, 250.0))));
        assert!(forward_of(pose.rotation).x > 0.0, "turned right");
    }

    #[test]
    fn test_pointer_near_centre_does_not_steer() {
        let (mut swim, _, mut pose) = swimmer_at(5.0);
        let input = FrameInput {
            pointer: Some(PointerSample {
                position: Vec2::new(520.0, 260.0),
                viewport: Vec2::new(1000.0, 500.0),
            }),
            ..Default::default()
        };
        tick(&mut swim, &mut pose, &input, &full_stamina());
        assert_eq!(pose.rotation, Quat::IDENTITY);

        let zero_viewport = FrameInput {
            pointer: Some(PointerSample {
                position: Vec2::ZERO,
                viewport: Vec2::ZERO,
            }),
            ..Default::default()
        };
        let events = tick(&mut swim, &mut pose, &zero_viewport, &full_stamina());
        assert!(events.is_empty());
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    /// Buoyancy step from `velocity` with the target `distance` above the feet.
    fn buoyancy_step(holding_breath: bool, velocity: f32, distance: f32) -> f32 {
        let (mut swim, _, _) = swimmer_at(8.6);
        swim.holding_breath = holding_breath;
        swim.vertical_velocity = velocity;
        swim.apply_buoyancy(distance, DT);
        swim.vertical_velocity()
    }

    #[test]
    fn test_floating_buoyancy_branches() {
        // Below target: full buoyancy
        assert_close(buoyancy_step(false, 0.0, 1.0), 8.0 * DT);
        // Above target: half buoyancy pulls down
        assert_close(buoyancy_step(false, 0.0, -1.0), -8.0 * FLOAT_SINK_FACTOR * DT);
        assert_close(buoyancy_step(false, 0.0, -1.0), -0.4);
        // Inside the band: decay
        assert_close(buoyancy_step(false, 2.0, 0.1), 2.0 * FLOAT_DAMPING);
        assert_close(buoyancy_step(false, 2.0, 0.1), 1.8);
    }

    #[test]
    fn test_holding_breath_buoyancy_branches() {
        // Below target: weak rise
        assert_close(buoyancy_step(true, 0.0, 1.0), 8.0 * HOLD_BREATH_RISE_FACTOR * DT);
        assert_close(buoyancy_step(true, 0.0, 1.0), 0.24);
        // Above target: sink at the configured speed
        assert_close(buoyancy_step(true, 0.0, -1.0), -2.0 * DT);
        // Inside the band: stronger decay than floating
        assert_close(buoyancy_step(true, 2.0, -0.1), 2.0 * HOLD_BREATH_DAMPING);
        assert_close(buoyancy_step(true, 2.0, -0.1), 1.7);
    }

    #[test]
    fn test_buoyancy_clamps_to_dive_speed() {
        assert_close(buoyancy_step(false, 3.9, 1.0), 4.0);
        assert_close(buoyancy_step(true, -3.9, -1.0), -4.0);
        assert_close(buoyancy_step(false, -3.9, -1.0), -4.0);
    }

    #[test]
    fn test_dive_tick_skips_buoyancy() {
        let (mut swim, _, _) = swimmer_at(8.6);
        swim.diving = true;
        swim.vertical_velocity = -4.0;
        swim.apply_buoyancy(1.0, DT);
        assert_close(swim.vertical_velocity(), -4.0);
    }

    #[test]
    fn test_single_update_from_below_float_target() {
        let (mut swim, _, mut pose) = swimmer_at(7.6);
        tick(&mut swim, &mut pose, &FrameInput::default(), &full_stamina());
        // Full buoyancy for one tick, no settle damping outside the band
        assert_close(swim.vertical_velocity(), 0.8);
        assert_close(pose.feet_height(), 7.6 + 0.8 * DT);
    }
}
