//! Flappy Sim - A single-screen gap-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity physics, obstacles, scoring)
//! - `config`: Startup configuration with validation
//! - `input`: Key event to command mapping
//! - `renderer`: WebGPU rendering of simulation snapshots

pub mod config;
pub mod error;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::{GapSeeding, SimConfig};
pub use error::{ConfigError, ConfigResult};

/// Default tuning constants
pub mod consts {
    /// Play-field dimensions (pixels, y grows downward)
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Entity defaults
    pub const ENTITY_WIDTH: f32 = 20.0;
    pub const ENTITY_HEIGHT: f32 = 20.0;
    /// Horizontal center of the entity (fixed for the whole run)
    pub const ENTITY_CENTER_X: f32 = 100.0;
    /// Velocity the entity starts (and restarts) with
    pub const ENTITY_START_VELOCITY: f32 = 2.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const GAP_SIZE: f32 = 150.0;
    /// Minimum barrier height on either side of the gap
    pub const GAP_MARGIN: f32 = OBSTACLE_WIDTH;
    /// A new obstacle spawns once the newest one is left of `FIELD_WIDTH - SPAWN_SPACING`
    pub const SPAWN_SPACING: f32 = 300.0;
    pub const OBSTACLE_VELOCITY: f32 = 5.0;

    /// Velocity added every tick while not fast-descending
    pub const GRAVITY: f32 = 0.05;
    /// Velocity set by an impulse (negative = upward)
    pub const IMPULSE: f32 = -2.0;
    /// Velocity pinned while fast-descending
    pub const FAST_DESCEND_VELOCITY: f32 = 5.0;

    /// Impulses available before the entity must touch the floor
    pub const MAX_JUMPS: u32 = 1000;

    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 40;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
}

/// True if `value` lies in `[lo, hi]`
#[inline]
pub fn within(value: f32, lo: f32, hi: f32) -> bool {
    value >= lo && value <= hi
}
