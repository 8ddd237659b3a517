//! Simulation state and command/query surface
//!
//! The simulation exclusively owns the entity and every live obstacle.
//! Renderers only ever see a [`Snapshot`] taken between ticks.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CrashCause;
use super::entity::Entity;
use super::obstacle::Obstacle;
use super::rect::Rect;
use crate::config::{GapSeeding, SimConfig};
use crate::error::ConfigResult;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended by a collision; only a reset leaves this phase
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) config: SimConfig,
    pub(crate) entity: Entity,
    /// Live obstacles in spawn order (= left-to-right)
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) score: u32,
    pub(crate) phase: GamePhase,
    /// Ticks advanced since the last reset
    pub(crate) ticks: u64,
    /// What ended the current run, if it has ended
    pub(crate) crash: Option<CrashCause>,
    /// Gap stream for `GapSeeding::PerRun`
    pub(crate) rng: Pcg32,
}

impl Simulation {
    /// Validate the config and start a fresh run
    pub fn new(config: SimConfig) -> ConfigResult<Self> {
        config.validate()?;
        log::info!(
            "Simulation {}x{} gap={} seeding={}",
            config.field_width,
            config.field_height,
            config.gap_size,
            config.gap_seeding.as_str()
        );
        Ok(Self {
            entity: Entity::new(&config),
            obstacles: Vec::new(),
            score: 0,
            phase: GamePhase::Running,
            ticks: 0,
            crash: None,
            rng: Pcg32::seed_from_u64(config.seed),
            config,
        })
    }

    // === Commands ===

    /// Jump (no-op when the jump budget is spent or the run is over)
    pub fn apply_impulse(&mut self) {
        if self.phase == GamePhase::Running {
            self.entity.apply_impulse(&self.config);
        }
    }

    pub fn begin_fast_descend(&mut self) {
        if self.phase == GamePhase::Running {
            self.entity.begin_fast_descend(&self.config);
        }
    }

    pub fn end_fast_descend(&mut self) {
        if self.phase == GamePhase::Running {
            self.entity.end_fast_descend(&self.config);
        }
    }

    /// Start a new run
    pub fn reset(&mut self) {
        self.entity.reset(&self.config);
        self.obstacles.clear();
        self.score = 0;
        self.ticks = 0;
        self.crash = None;
        self.phase = GamePhase::Running;
        self.rng = Pcg32::seed_from_u64(self.config.seed);
        log::info!("Simulation reset");
    }

    // === Queries ===

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Top edge of the entity
    pub fn entity_y(&self) -> f32 {
        self.entity.y()
    }

    pub fn jumps_left(&self) -> u32 {
        self.entity.jumps_left()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn crash_cause(&self) -> Option<CrashCause> {
        self.crash
    }

    /// Immutable copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            field_width: self.config.field_width,
            field_height: self.config.field_height,
            entity: self.entity.rect(),
            velocity: self.entity.velocity(),
            rising: self.entity.is_rising(),
            jumps_left: self.entity.jumps_left(),
            max_jumps: self.config.max_jumps,
            obstacles: self.obstacles.clone(),
            score: self.score,
            phase: self.phase,
            ticks: self.ticks,
            crash: self.crash,
        }
    }

    /// Under `PerScore` seeding, restart the gap stream from the current score
    pub(crate) fn reseed_for_spawn(&mut self) {
        if self.config.gap_seeding == GapSeeding::PerScore {
            self.rng = Pcg32::seed_from_u64(self.score as u64);
        }
    }
}

/// Read-only view of the simulation between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub field_width: f32,
    pub field_height: f32,
    pub entity: Rect,
    pub velocity: f32,
    pub rising: bool,
    pub jumps_left: u32,
    pub max_jumps: u32,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub phase: GamePhase,
    pub ticks: u64,
    pub crash: Option<CrashCause>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_simulation_running() {
        let sim = Simulation::new(SimConfig::default()).expect("valid config");
        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(sim.score(), 0);
        assert!(sim.obstacles().is_empty());
        assert!((sim.entity_y() - 290.0).abs() < 1e-6);
        assert_eq!(sim.jumps_left(), sim.config().max_jumps);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = SimConfig {
            gap_size: 650.0,
            ..Default::default()
        };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_commands_ignored_when_over() {
        let mut sim = Simulation::new(SimConfig::default()).expect("valid config");
        sim.phase = GamePhase::GameOver;
        let before = sim.entity().clone();
        sim.apply_impulse();
        sim.begin_fast_descend();
        sim.end_fast_descend();
        assert_eq!(sim.entity(), &before);
    }

    #[test]
    fn test_reset_clears_everything() {
        let config = SimConfig::default();
        let mut sim = Simulation::new(config.clone()).expect("valid config");
        sim.obstacles.push(Obstacle::with_gap(200.0, 100.0, &config));
        sim.score = 4;
        sim.ticks = 99;
        sim.phase = GamePhase::GameOver;
        sim.crash = Some(CrashCause::Floor);
        sim.entity.rect.y = 580.0;

        sim.reset();
        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.ticks(), 0);
        assert!(sim.obstacles().is_empty());
        assert!(sim.crash_cause().is_none());
        assert_eq!(sim.entity(), &Entity::new(&config));
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let config = SimConfig::default();
        let mut sim = Simulation::new(config.clone()).expect("valid config");
        sim.obstacles.push(Obstacle::with_gap(300.0, 120.0, &config));
        sim.score = 2;
        let snap = sim.snapshot();
        assert_eq!(snap.entity, sim.entity().rect());
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.score, 2);
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.max_jumps, config.max_jumps);

        // Snapshot is detached from later mutation
        sim.score = 3;
        assert_eq!(snap.score, 2);
    }
}
