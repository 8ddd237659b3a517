//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per `advance()` call
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod obstacle;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CrashCause, check_collisions};
pub use entity::Entity;
pub use obstacle::Obstacle;
pub use rect::Rect;
pub use state::{GamePhase, Simulation, Snapshot};
pub use tick::{SimEvent, TickInput, tick};
