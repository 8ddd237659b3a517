//! Demo/idle mode controller
//!
//! Reads the simulation and synthesizes the commands a player would send.
//! It plays reasonably, not perfectly: the default tuning can present gap
//! changes larger than the entity can climb in time.

use super::state::Simulation;
use super::tick::TickInput;

/// Distance above the target the entity may drift before fast-descending
const DESCEND_SLACK: f32 = 60.0;

/// Vertical point the entity should hover around
pub fn target_y(sim: &Simulation) -> f32 {
    let entity = sim.entity().rect();
    sim.obstacles()
        .iter()
        .find(|o| o.x() + o.width() > entity.left())
        .map(|o| o.gap_start() + o.gap_size() * 0.6)
        .unwrap_or(sim.config().field_height * 0.6)
}

/// Commands for this tick (also requests a reset once the run is over)
pub fn steer(sim: &Simulation) -> TickInput {
    let mut input = TickInput::default();
    if sim.is_over() {
        input.reset = true;
        return input;
    }

    let entity = sim.entity();
    let center = entity.rect().center().y;
    let target = target_y(sim);

    if entity.is_descending() {
        if center >= target - DESCEND_SLACK / 2.0 {
            input.end_descend = true;
        }
    } else if center < target - DESCEND_SLACK && entity.velocity() >= 0.0 {
        input.begin_descend = true;
    } else if center > target {
        input.impulse = true;
    }

    input
}
