// src/input.rs
//! Keyboard state tracking
//!
//! Press/release events from the window loop are folded into a held-key
//! map so the camera controller can apply per-frame movement for every
//! key currently down.

use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Current held state of the keyboard
#[derive(Debug, Default)]
pub struct InputState {
    held: HashMap<KeyCode, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition; the latest event wins
    pub fn set(&mut self, code: KeyCode, pressed: bool) {
        self.held.insert(code, pressed);
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.get(&code).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_keys_are_not_held() {
        let input = InputState::new();
        assert!(!input.is_held(KeyCode::KeyA));
    }

    #[test]
    fn latest_transition_wins() {
        let mut input = InputState::new();
        input.set(KeyCode::KeyW, true);
        assert!(input.is_held(KeyCode::KeyW));
        input.set(KeyCode::KeyW, false);
        assert!(!input.is_held(KeyCode::KeyW));
        input.set(KeyCode::KeyW, true);
        input.set(KeyCode::KeyW, true);
        assert!(input.is_held(KeyCode::KeyW));
    }

    #[test]
    fn keys_track_independently() {
        let mut input = InputState::new();
        input.set(KeyCode::KeyA, true);
        input.set(KeyCode::KeyD, false);
        assert!(input.is_held(KeyCode::KeyA));
        assert!(!input.is_held(KeyCode::KeyD));
    }
}
