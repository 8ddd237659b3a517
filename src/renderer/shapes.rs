//! Shape generation for 2D primitives
//!
//! All coordinates are field coordinates (origin top-left, y down); the
//! pipeline maps them to clip space.

use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, Rect, Snapshot};

/// HUD digit scale (one segment thickness in field pixels)
const HUD_SCALE: f32 = 3.0;
/// Digit scale for the final score on the game-over screen
const BANNER_SCALE: f32 = 8.0;
/// Jumps-left readout turns red at or below this
const LOW_JUMPS: u32 = 3;
/// Size of the restart glyph under the final score
const PROMPT_SIZE: f32 = 40.0;

/// Generate vertices for a filled rectangle (two triangles)
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    if r.is_empty() {
        return Vec::new();
    }
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, b, color),
    ]
}

/// Segment mask per digit: A B C D E F G (bit 6..0)
fn segment_mask(digit: u8) -> u8 {
    match digit {
        0 => 0b1111110,
        1 => 0b0110000,
        2 => 0b1101101,
        3 => 0b1111001,
        4 => 0b0110011,
        5 => 0b1011011,
        6 => 0b1011111,
        7 => 0b1110000,
        8 => 0b1111111,
        9 => 0b1111011,
        _ => 0,
    }
}

/// Width of one digit cell including spacing
pub fn digit_advance(scale: f32) -> f32 {
    7.0 * scale
}

/// Generate vertices for a seven-segment digit with its top-left at (x, y)
///
/// ```text
///  A
/// F B
///  G
/// E C
///  D
/// ```
pub fn digit(x: f32, y: f32, value: u8, scale: f32, color: [f32; 4]) -> Vec<Vertex> {
    let s = scale;
    let len = 4.0 * s;
    let segments = [
        Rect::new(x + s, y, len, s),                 // A
        Rect::new(x + 5.0 * s, y + s, s, len),       // B
        Rect::new(x + 5.0 * s, y + 5.0 * s, s, len), // C
        Rect::new(x + s, y + 9.0 * s, len, s),       // D
        Rect::new(x, y + 5.0 * s, s, len),           // E
        Rect::new(x, y + s, s, len),                 // F
        Rect::new(x + s, y + 4.0 * s, len, s),       // G
    ];

    let mask = segment_mask(value);
    let mut vertices = Vec::with_capacity(7 * 6);
    for (i, seg) in segments.iter().enumerate() {
        if mask & (1 << (6 - i)) != 0 {
            vertices.extend(rect(seg, color));
        }
    }
    vertices
}

/// Generate vertices for a non-negative number, left-aligned at (x, y)
pub fn number(x: f32, y: f32, value: u32, scale: f32, color: [f32; 4]) -> Vec<Vertex> {
    let digits: Vec<u8> = value.to_string().bytes().map(|b| b - b'0').collect();

    let mut vertices = Vec::new();
    for (i, d) in digits.iter().enumerate() {
        vertices.extend(digit(x + i as f32 * digit_advance(scale), y, *d, scale, color));
    }
    vertices
}

/// Right-pointing "play" triangle centered on (cx, cy)
pub fn play_glyph(cx: f32, cy: f32, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = size / 2.0;
    vec![
        Vertex::new(cx - half, cy - half, color),
        Vertex::new(cx - half, cy + half, color),
        Vertex::new(cx + half, cy, color),
    ]
}

/// Width of a rendered number
pub fn number_width(value: u32, scale: f32) -> f32 {
    let count = value.to_string().len() as f32;
    count * digit_advance(scale) - scale
}

/// Generate the full frame for a snapshot
pub fn scene(snapshot: &Snapshot) -> Vec<Vertex> {
    let field = Rect::new(0.0, 0.0, snapshot.field_width, snapshot.field_height);
    let mut vertices = rect(&field, colors::BACKGROUND);

    for obstacle in &snapshot.obstacles {
        vertices.extend(rect(&obstacle.top(), colors::OBSTACLE));
        vertices.extend(rect(&obstacle.bottom(), colors::OBSTACLE));
    }

    vertices.extend(rect(&snapshot.entity, colors::ENTITY));

    // HUD: score top-left, jumps left top-right
    vertices.extend(number(10.0, 10.0, snapshot.score, HUD_SCALE, colors::HUD_TEXT));
    let jumps_color = if snapshot.jumps_left <= LOW_JUMPS {
        colors::HUD_WARNING
    } else {
        colors::HUD_TEXT
    };
    let jumps_x = snapshot.field_width - 10.0 - number_width(snapshot.jumps_left, HUD_SCALE);
    vertices.extend(number(jumps_x, 10.0, snapshot.jumps_left, HUD_SCALE, jumps_color));

    if snapshot.phase == GamePhase::GameOver {
        vertices.extend(rect(&field, colors::GAME_OVER_SHADE));
        let w = number_width(snapshot.score, BANNER_SCALE);
        let h = 10.0 * BANNER_SCALE;
        let top = (snapshot.field_height - h) / 2.0;
        vertices.extend(number(
            (snapshot.field_width - w) / 2.0,
            top,
            snapshot.score,
            BANNER_SCALE,
            colors::GAME_OVER_TEXT,
        ));
        // Restart prompt
        vertices.extend(play_glyph(
            snapshot.field_width / 2.0,
            top + h + PROMPT_SIZE,
            PROMPT_SIZE,
            colors::GAME_OVER_TEXT,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::Simulation;

    #[test]
    fn test_rect_vertices() {
        let v = rect(&Rect::new(1.0, 2.0, 3.0, 4.0), colors::ENTITY);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [1.0, 2.0]);
        assert_eq!(v[5].position, [4.0, 6.0]);
        assert!(rect(&Rect::new(0.0, 0.0, 5.0, 0.0), colors::ENTITY).is_empty());
    }

    #[test]
    fn test_digit_segment_counts() {
        assert_eq!(digit(0.0, 0.0, 8, 1.0, colors::HUD_TEXT).len(), 7 * 6);
        assert_eq!(digit(0.0, 0.0, 1, 1.0, colors::HUD_TEXT).len(), 2 * 6);
        assert_eq!(digit(0.0, 0.0, 7, 1.0, colors::HUD_TEXT).len(), 3 * 6);
    }

    #[test]
    fn test_number_layout() {
        let v = number(0.0, 0.0, 11, 1.0, colors::HUD_TEXT);
        assert_eq!(v.len(), 4 * 6);
        // Second digit starts one advance to the right
        assert!(v[12..].iter().all(|vert| vert.position[0] >= digit_advance(1.0)));
        assert!((number_width(100, 2.0) - (3.0 * 14.0 - 2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_scene_includes_obstacles_and_overlay() {
        let mut sim = Simulation::new(SimConfig::default()).expect("valid config");
        sim.advance();
        let running = scene(&sim.snapshot());

        while !sim.is_over() {
            sim.advance();
        }
        let over = scene(&sim.snapshot());
        assert!(over.len() > running.len());
        assert!(over.iter().any(|v| v.color == colors::GAME_OVER_SHADE));
        assert!(!running.iter().any(|v| v.color == colors::GAME_OVER_SHADE));
        assert!(!running.iter().any(|v| v.color == colors::GAME_OVER_TEXT));
    }

    #[test]
    fn test_game_over_shows_restart_prompt_below_score() {
        let mut sim = Simulation::new(SimConfig::default()).expect("valid config");
        while !sim.is_over() {
            sim.advance();
        }
        let over = scene(&sim.snapshot());
        let text: Vec<&Vertex> = over
            .iter()
            .filter(|v| v.color == colors::GAME_OVER_TEXT)
            .collect();

        // Banner digits plus the three glyph vertices at the end
        let (digits, glyph) = text.split_at(text.len() - 3);
        let score_bottom = digits
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!(glyph.iter().all(|v| v.position[1] > score_bottom));
        assert!((glyph[2].position[0] - 200.0).abs() < PROMPT_SIZE);
    }

    #[test]
    fn test_play_glyph_points_right() {
        let v = play_glyph(100.0, 50.0, 20.0, colors::GAME_OVER_TEXT);
        assert_eq!(v.len(), 3);
        assert_eq!(v[2].position, [110.0, 50.0]);
        assert!(v[0].position[0] < v[2].position[0]);
    }
}
