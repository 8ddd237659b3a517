//! Simulation configuration
//!
//! Every tuning constant is fixed at startup. Partial JSON files override
//! only the keys they name; everything else falls back to [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};
use crate::within;

/// How the gap placement RNG is seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GapSeeding {
    /// Reseed from the current score before every spawn (same score, same gap)
    #[default]
    PerScore,
    /// One stream seeded from `SimConfig::seed`, restarted on reset
    PerRun,
}

impl GapSeeding {
    pub fn as_str(&self) -> &'static str {
        match self {
            GapSeeding::PerScore => "per_score",
            GapSeeding::PerRun => "per_run",
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Entity ===
    pub entity_width: f32,
    pub entity_height: f32,
    /// Fixed horizontal center of the entity
    pub entity_center_x: f32,
    /// Velocity on start and after reset
    pub start_velocity: f32,
    pub gravity: f32,
    /// Upward velocity set by an impulse (must be negative)
    pub impulse: f32,
    pub fast_descend_velocity: f32,
    pub max_jumps: u32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_velocity: f32,
    pub gap_size: f32,
    /// Minimum barrier height above and below the gap
    pub gap_margin: f32,
    pub spawn_spacing: f32,

    // === Timing / RNG ===
    pub tick_rate: u32,
    pub gap_seeding: GapSeeding,
    /// Seed for `GapSeeding::PerRun`
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            entity_width: ENTITY_WIDTH,
            entity_height: ENTITY_HEIGHT,
            entity_center_x: ENTITY_CENTER_X,
            start_velocity: ENTITY_START_VELOCITY,
            gravity: GRAVITY,
            impulse: IMPULSE,
            fast_descend_velocity: FAST_DESCEND_VELOCITY,
            max_jumps: MAX_JUMPS,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_velocity: OBSTACLE_VELOCITY,
            gap_size: GAP_SIZE,
            gap_margin: GAP_MARGIN,
            spawn_spacing: SPAWN_SPACING,

            tick_rate: TICK_RATE,
            gap_seeding: GapSeeding::PerScore,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Seconds per tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Vertical range `[lo, hi]` the gap start is drawn from
    pub fn gap_start_range(&self) -> (f32, f32) {
        (
            self.gap_margin,
            self.field_height - self.gap_size - self.gap_margin,
        )
    }

    /// Reject configurations that would put the simulation in an undefined
    /// geometric state
    pub fn validate(&self) -> ConfigResult<()> {
        let floats = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("entity_width", self.entity_width),
            ("entity_height", self.entity_height),
            ("entity_center_x", self.entity_center_x),
            ("start_velocity", self.start_velocity),
            ("gravity", self.gravity),
            ("impulse", self.impulse),
            ("fast_descend_velocity", self.fast_descend_velocity),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_velocity", self.obstacle_velocity),
            ("gap_size", self.gap_size),
            ("gap_margin", self.gap_margin),
            ("spawn_spacing", self.spawn_spacing),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("entity_width", self.entity_width),
            ("entity_height", self.entity_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_velocity", self.obstacle_velocity),
            ("gap_size", self.gap_size),
            ("fast_descend_velocity", self.fast_descend_velocity),
            ("spawn_spacing", self.spawn_spacing),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive {
                    field,
                    value: value as f64,
                });
            }
        }
        if self.max_jumps == 0 {
            return Err(ConfigError::NonPositive {
                field: "max_jumps",
                value: 0.0,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::NonPositive {
                field: "tick_rate",
                value: 0.0,
            });
        }

        if self.gravity < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "gravity",
                value: self.gravity,
                min: 0.0,
                max: f32::MAX,
            });
        }
        if self.impulse >= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "impulse",
                value: self.impulse,
                min: f32::MIN,
                max: -f32::EPSILON,
            });
        }

        if self.gap_size >= self.field_height {
            return Err(ConfigError::GapTooLarge {
                gap_size: self.gap_size,
                field_height: self.field_height,
            });
        }
        if self.gap_margin < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "gap_margin",
                value: self.gap_margin,
                min: 0.0,
                max: self.field_height,
            });
        }
        if self.gap_size + 2.0 * self.gap_margin > self.field_height {
            return Err(ConfigError::NoRoomForGap {
                gap_size: self.gap_size,
                gap_margin: self.gap_margin,
                field_height: self.field_height,
            });
        }

        if !within(self.spawn_spacing, 0.0, self.field_width) {
            return Err(ConfigError::OutOfRange {
                field: "spawn_spacing",
                value: self.spawn_spacing,
                min: 0.0,
                max: self.field_width,
            });
        }
        let half_w = self.entity_width / 2.0;
        if !within(self.entity_center_x, half_w, self.field_width - half_w) {
            return Err(ConfigError::OutOfRange {
                field: "entity_center_x",
                value: self.entity_center_x,
                min: half_w,
                max: self.field_width - half_w,
            });
        }
        // Entity must fit between ceiling and floor at its start position
        if self.entity_height >= self.field_height {
            return Err(ConfigError::OutOfRange {
                field: "entity_height",
                value: self.entity_height,
                min: 0.0,
                max: self.field_height,
            });
        }

        Ok(())
    }
}
