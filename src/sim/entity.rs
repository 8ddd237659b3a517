//! The player-controlled falling/jumping body

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::SimConfig;

/// The player entity
///
/// Owns its bounding rectangle outright; the horizontal position never
/// changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub(crate) rect: Rect,
    /// Vertical velocity (positive = downward)
    pub(crate) velocity: f32,
    pub(crate) jumps_left: u32,
    /// Set by the first impulse of a run, cleared only by `reset`
    pub(crate) rising: bool,
    pub(crate) descending: bool,
}

impl Entity {
    pub fn new(config: &SimConfig) -> Self {
        let mut entity = Self {
            rect: Rect::new(
                config.entity_center_x - config.entity_width / 2.0,
                0.0,
                config.entity_width,
                config.entity_height,
            ),
            velocity: 0.0,
            jumps_left: 0,
            rising: false,
            descending: false,
        };
        entity.reset(config);
        entity
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Top edge
    pub fn y(&self) -> f32 {
        self.rect.y
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn jumps_left(&self) -> u32 {
        self.jumps_left
    }

    pub fn is_rising(&self) -> bool {
        self.rising
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// Jump if budget remains; silently ignored otherwise
    pub fn apply_impulse(&mut self, config: &SimConfig) {
        if self.jumps_left > 0 {
            self.velocity = config.impulse;
            self.rising = true;
            self.jumps_left -= 1;
        }
    }

    pub fn begin_fast_descend(&mut self, config: &SimConfig) {
        self.descending = true;
        self.velocity = config.fast_descend_velocity;
    }

    pub fn end_fast_descend(&mut self, config: &SimConfig) {
        self.descending = false;
        if !self.rising {
            self.velocity = config.gravity;
        }
    }

    /// Apply gravity and move. Returns true if the entity touched the floor.
    ///
    /// Gravity accumulates without a terminal velocity.
    pub fn advance(&mut self, config: &SimConfig) -> bool {
        if self.descending {
            self.velocity = config.fast_descend_velocity;
        } else {
            self.velocity += config.gravity;
        }
        self.rect.y += self.velocity;

        if self.rect.bottom() >= config.field_height {
            self.rect.y = config.field_height - self.rect.h;
            self.velocity = 0.0;
            self.jumps_left = config.max_jumps;
            return true;
        }
        false
    }

    /// Back to the field midpoint with a full jump budget
    pub fn reset(&mut self, config: &SimConfig) {
        self.rect.y = config.field_height / 2.0 - self.rect.h / 2.0;
        self.velocity = config.start_velocity;
        self.jumps_left = config.max_jumps;
        self.rising = false;
        self.descending = false;
    }
}
