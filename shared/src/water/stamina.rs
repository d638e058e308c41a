use bevy::prelude::*;

use crate::{config::StaminaConfig, constants::MIN_TURN_INPUT, messages::FrameInput};

/// Drain/regenerate accumulator gating sprint and dive.
#[derive(Debug, Clone)]
pub struct Stamina {
    config: StaminaConfig,
    current: f32,
}

impl Stamina {
    /// Starts full.
    pub fn new(config: StaminaConfig) -> Self {
        Self {
            current: config.max,
            config,
        }
    }

    pub fn with_current(mut self, current: f32) -> Self {
        self.current = current.clamp(0.0, self.config.max.max(0.0));
        self
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.config.max
    }

    /// Stamina as a fraction of the maximum, for HUD binding.
    pub fn normalized(&self) -> f32 {
        if self.config.max > 0.0 {
            (self.current / self.config.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn can_dive(&self) -> bool {
        self.current >= self.config.min_for_dive
    }

    pub fn can_sprint(&self) -> bool {
        self.current > 0.0
    }

    /// Whether the swimmer is spending stamina this tick.
    pub fn swim_drains(input: &FrameInput, swim_direction: Vec3, at_surface: bool) -> bool {
        let sprinting = input.sprint_held && swim_direction.length() > MIN_TURN_INPUT;
        sprinting || (input.jump_held && !at_surface)
    }

    pub fn tick(&mut self, draining: bool, delta: f32) {
        let rate = if draining {
            -self.config.drain_rate
        } else {
            self.config.recovery_rate
        };
        self.current = (self.current + rate * delta).clamp(0.0, self.config.max.max(0.0));
    }
}
