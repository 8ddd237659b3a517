//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one discrete step.

use serde::{Deserialize, Serialize};

use super::autopilot;
use super::collision::{CrashCause, check_collisions};
use super::obstacle::Obstacle;
use super::state::{GamePhase, Simulation};

/// Commands for a single tick, applied before the simulation advances
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump
    pub impulse: bool,
    /// Start falling fast
    pub begin_descend: bool,
    /// Stop falling fast
    pub end_descend: bool,
    /// Start a new run
    pub reset: bool,
    /// Demo mode - the autopilot plays the game
    pub autopilot: bool,
}

impl TickInput {
    /// True if no command is set
    pub fn is_idle(&self) -> bool {
        !(self.impulse || self.begin_descend || self.end_descend || self.reset)
    }

    /// Merge another command set into this one
    pub fn merge(&mut self, other: &TickInput) {
        self.impulse |= other.impulse;
        self.begin_descend |= other.begin_descend;
        self.end_descend |= other.end_descend;
        self.reset |= other.reset;
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Entity touched the floor (jump budget recharged)
    Landed,
    /// A new obstacle entered at the right edge
    Spawned { x: f32, gap_start: f32 },
    /// An obstacle left the field; `score` is the new total
    Passed { score: u32 },
    /// The run ended
    Crashed(CrashCause),
}

impl Simulation {
    /// Advance the simulation by one tick (no-op once the run is over)
    pub fn advance(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.phase == GamePhase::GameOver {
            return events;
        }
        self.ticks += 1;

        // 1. Entity physics
        if self.entity.advance(&self.config) {
            events.push(SimEvent::Landed);
        }

        // 2. Spawn once the newest obstacle has scrolled far enough
        let spawn_threshold = self.config.field_width - self.config.spawn_spacing;
        let needs_spawn = self
            .obstacles
            .last()
            .is_none_or(|newest| newest.x() < spawn_threshold);
        if needs_spawn {
            self.reseed_for_spawn();
            let obstacle = Obstacle::create(self.config.field_width, &self.config, &mut self.rng);
            log::debug!(
                "Spawned obstacle gap {:.1}..{:.1} (score {})",
                obstacle.gap_start(),
                obstacle.gap_end(),
                self.score
            );
            events.push(SimEvent::Spawned {
                x: obstacle.x(),
                gap_start: obstacle.gap_start(),
            });
            self.obstacles.push(obstacle);
        }

        // 3. Scroll obstacles; each one leaving the field scores a point
        for obstacle in &mut self.obstacles {
            obstacle.advance(&self.config);
        }
        let live_before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_off_screen());
        for _ in self.obstacles.len()..live_before {
            self.score += 1;
            log::debug!("Obstacle passed, score {}", self.score);
            events.push(SimEvent::Passed { score: self.score });
        }

        // 4. Collisions
        if let Some(cause) = check_collisions(
            &self.entity.rect(),
            &self.obstacles,
            self.config.field_height,
        ) {
            self.phase = GamePhase::GameOver;
            self.crash = Some(cause);
            log::info!(
                "Game over ({:?}) after {} ticks, score {}",
                cause,
                self.ticks,
                self.score
            );
            events.push(SimEvent::Crashed(cause));
        }

        events
    }
}

/// Apply this tick's commands, then advance the simulation
pub fn tick(sim: &mut Simulation, input: &TickInput) -> Vec<SimEvent> {
    let mut input = input.clone();
    if input.autopilot {
        input.merge(&autopilot::steer(sim));
    }

    if input.reset {
        sim.reset();
    }
    if input.begin_descend {
        sim.begin_fast_descend();
    }
    if input.end_descend {
        sim.end_fast_descend();
    }
    if input.impulse {
        sim.apply_impulse();
    }

    sim.advance()
}
