//! Keyboard to command mapping
//!
//! Key names follow `KeyboardEvent.key`. Up jumps, Down falls fast while
//! held, Space restarts after a crash, `a` toggles the autopilot.

use crate::sim::{GamePhase, TickInput};

/// A key the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Space,
    Autopilot,
}

impl Key {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowDown" | "Down" => Some(Key::Down),
            " " | "Space" | "Spacebar" => Some(Key::Space),
            "a" | "A" => Some(Key::Autopilot),
            _ => None,
        }
    }
}

/// Record a key press into the pending commands
///
/// Returns false if the key is not bound.
pub fn key_down(name: &str, phase: GamePhase, input: &mut TickInput) -> bool {
    let Some(key) = Key::from_name(name) else {
        return false;
    };
    match key {
        Key::Up => input.impulse = true,
        Key::Down => input.begin_descend = true,
        // Restart only from the game-over screen
        Key::Space => {
            if phase == GamePhase::GameOver {
                input.reset = true;
            }
        }
        Key::Autopilot => {
            input.autopilot = !input.autopilot;
            log::info!("Autopilot: {}", input.autopilot);
        }
    }
    true
}

/// Record a key release into the pending commands
pub fn key_up(name: &str, input: &mut TickInput) -> bool {
    match Key::from_name(name) {
        Some(Key::Down) => {
            input.end_descend = true;
            true
        }
        Some(_) => true,
        None => false,
    }
}

/// Clear one-shot commands after they were processed by a tick
pub fn clear_one_shots(input: &mut TickInput) {
    input.impulse = false;
    input.begin_descend = false;
    input.end_descend = false;
    input.reset = false;
}
