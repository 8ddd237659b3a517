//! Collision detection between the entity, the field bounds and obstacles

use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::rect::Rect;

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Top edge reached the top of the field
    Ceiling,
    /// Bottom edge reached the floor
    Floor,
    /// Overlapped the top barrier of an obstacle
    TopBarrier,
    /// Overlapped the bottom barrier of an obstacle
    BottomBarrier,
}

/// Check the entity against the field's top and bottom boundaries
pub fn boundary_collision(entity: &Rect, field_height: f32) -> Option<CrashCause> {
    if entity.top() <= 0.0 {
        Some(CrashCause::Ceiling)
    } else if entity.bottom() >= field_height {
        Some(CrashCause::Floor)
    } else {
        None
    }
}

/// Check the entity against one obstacle's barriers
pub fn obstacle_collision(entity: &Rect, obstacle: &Obstacle) -> Option<CrashCause> {
    if entity.intersects(&obstacle.top()) {
        Some(CrashCause::TopBarrier)
    } else if entity.intersects(&obstacle.bottom()) {
        Some(CrashCause::BottomBarrier)
    } else {
        None
    }
}

/// First collision found: bounds first, then obstacles in spawn order
pub fn check_collisions(
    entity: &Rect,
    obstacles: &[Obstacle],
    field_height: f32,
) -> Option<CrashCause> {
    boundary_collision(entity, field_height)
        .or_else(|| obstacles.iter().find_map(|o| obstacle_collision(entity, o)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn entity_at(y: f32) -> Rect {
        Rect::new(90.0, y, 20.0, 20.0)
    }

    #[test]
    fn test_ceiling_and_floor() {
        assert_eq!(boundary_collision(&entity_at(0.0), 600.0), Some(CrashCause::Ceiling));
        assert_eq!(boundary_collision(&entity_at(-3.0), 600.0), Some(CrashCause::Ceiling));
        assert_eq!(boundary_collision(&entity_at(580.0), 600.0), Some(CrashCause::Floor));
        assert_eq!(boundary_collision(&entity_at(290.0), 600.0), None);
    }

    #[test]
    fn test_barrier_hits() {
        let config = SimConfig::default();
        // Gap from 200 to 350, obstacle spanning x 80..140 (overlaps entity 90..110)
        let obstacle = Obstacle::with_gap(80.0, 200.0, &config);
        assert_eq!(
            obstacle_collision(&entity_at(190.0), &obstacle),
            Some(CrashCause::TopBarrier)
        );
        assert_eq!(
            obstacle_collision(&entity_at(340.0), &obstacle),
            Some(CrashCause::BottomBarrier)
        );
        assert_eq!(obstacle_collision(&entity_at(250.0), &obstacle), None);
        // Flush with the gap edges is not a hit
        assert_eq!(obstacle_collision(&entity_at(200.0), &obstacle), None);
        assert_eq!(obstacle_collision(&entity_at(330.0), &obstacle), None);
    }

    #[test]
    fn test_no_hit_when_not_horizontally_aligned() {
        let config = SimConfig::default();
        let obstacle = Obstacle::with_gap(200.0, 200.0, &config);
        assert_eq!(obstacle_collision(&entity_at(10.0), &obstacle), None);
    }

    #[test]
    fn test_check_collisions_prefers_bounds() {
        let config = SimConfig::default();
        let obstacles = vec![Obstacle::with_gap(80.0, 200.0, &config)];
        assert_eq!(
            check_collisions(&entity_at(0.0), &obstacles, 600.0),
            Some(CrashCause::Ceiling)
        );
        assert_eq!(
            check_collisions(&entity_at(100.0), &obstacles, 600.0),
            Some(CrashCause::TopBarrier)
        );
        assert_eq!(check_collisions(&entity_at(260.0), &obstacles, 600.0), None);
    }
}
