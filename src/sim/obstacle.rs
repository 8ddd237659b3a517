//! Gapped obstacles (a top and bottom barrier with a passable gap)

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::SimConfig;

/// One obstacle: two barriers sharing a horizontal position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge (decreases every tick)
    pub(crate) x: f32,
    pub(crate) gap_start: f32,
    pub(crate) gap_size: f32,
    pub(crate) top: Rect,
    pub(crate) bottom: Rect,
}

impl Obstacle {
    /// Create an obstacle at `spawn_x` with a gap drawn from `rng`
    pub fn create<R: Rng>(spawn_x: f32, config: &SimConfig, rng: &mut R) -> Self {
        let (lo, hi) = config.gap_start_range();
        let gap_start = if hi > lo {
            rng.random_range(lo..=hi)
        } else {
            lo
        };
        Self::with_gap(spawn_x, gap_start, config)
    }

    /// Create an obstacle with a known gap placement
    pub fn with_gap(spawn_x: f32, gap_start: f32, config: &SimConfig) -> Self {
        let gap_end = gap_start + config.gap_size;
        Self {
            x: spawn_x,
            gap_start,
            gap_size: config.gap_size,
            top: Rect::new(spawn_x, 0.0, config.obstacle_width, gap_start),
            bottom: Rect::new(
                spawn_x,
                gap_end,
                config.obstacle_width,
                config.field_height - gap_end,
            ),
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn width(&self) -> f32 {
        self.top.w
    }

    pub fn gap_start(&self) -> f32 {
        self.gap_start
    }

    pub fn gap_size(&self) -> f32 {
        self.gap_size
    }

    pub fn gap_end(&self) -> f32 {
        self.gap_start + self.gap_size
    }

    pub fn top(&self) -> Rect {
        self.top
    }

    pub fn bottom(&self) -> Rect {
        self.bottom
    }

    /// Scroll left by the obstacle velocity
    pub fn advance(&mut self, config: &SimConfig) {
        self.x -= config.obstacle_velocity;
        self.top.x = self.x;
        self.bottom.x = self.x;
    }

    /// True once the right edge has passed the left boundary
    pub fn is_off_screen(&self) -> bool {
        self.x < -self.width()
    }
}
