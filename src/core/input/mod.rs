//! Keyboard mapping from key codes to lane actions.

pub mod actions;
pub mod bindings;

use self::actions::LaneAction;
use self::bindings::KeyBindings;
use winit::keyboard::KeyCode;

/// Resolves key events to lane actions and tracks which lanes are held.
pub struct InputManager {
    pub bindings: KeyBindings,
    keys_held: Vec<bool>,
}

impl InputManager {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            keys_held: Vec::new(),
        }
    }

    /// Activates the key table for a lane count and clears held state.
    pub fn update_lane_count(&mut self, lane_count: usize) -> bool {
        if !self.bindings.apply_lane_bindings(lane_count) {
            return false;
        }
        self.keys_held = vec![false; lane_count];
        true
    }

    /// Returns the lane press for `code`, or `None` for unmapped keys and
    /// auto-repeat of a lane already held.
    pub fn key_down(&mut self, code: KeyCode) -> Option<LaneAction> {
        let lane = self.bindings.resolve(code)?;
        let held = self.keys_held.get_mut(lane)?;
        if *held {
            return None;
        }
        *held = true;
        Some(LaneAction::Press(lane))
    }

    pub fn key_up(&mut self, code: KeyCode) -> Option<LaneAction> {
        let lane = self.bindings.resolve(code)?;
        let held = self.keys_held.get_mut(lane)?;
        if !*held {
            return None;
        }
        *held = false;
        Some(LaneAction::Release(lane))
    }

    pub fn keys_held(&self) -> &[bool] {
        &self.keys_held
    }

    pub fn release_all(&mut self) {
        self.keys_held.iter_mut().for_each(|held| *held = false);
    }
}
