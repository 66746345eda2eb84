//! Boot-protocol style keyboard reports.

use crate::keymap::{Keycode, Modifiers};

/// Number of simultaneously reported non-modifier keys.
pub const MAX_PRESSED_KEYS: usize = 6;

/// Usage reported in every key slot when more than [`MAX_PRESSED_KEYS`] are held.
pub const ERROR_ROLL_OVER: u8 = 0x01;

/// One keyboard input report: the modifier byte plus up to six held keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardReport {
    pub modifiers: Modifiers,
    pub keys: [u8; MAX_PRESSED_KEYS],
}

impl KeyboardReport {
    /// Returns `true` when no key or modifier is held.
    pub fn is_empty(&self) -> bool {
        self.modifiers == Modifiers::NONE && self.keys.iter().all(|&k| k == 0)
    }

    /// Returns `true` when the report signals roll-over.
    pub fn is_roll_over(&self) -> bool {
        self.keys.iter().all(|&k| k == ERROR_ROLL_OVER)
    }
}

/// Tracks the held keys of the relayed keyboard.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    modifiers: u8,
    pressed: Vec<Keycode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as held.  Returns `false` if nothing changed (auto-repeat).
    pub fn press(&mut self, key: Keycode) -> bool {
        if let Some(bit) = key.modifier_bit() {
            let before = self.modifiers;
            self.modifiers |= bit;
            return before != self.modifiers;
        }
        if self.pressed.contains(&key) {
            return false;
        }
        self.pressed.push(key);
        true
    }

    /// Marks `key` as released.  Returns `false` if it was not held.
    pub fn release(&mut self, key: Keycode) -> bool {
        if let Some(bit) = key.modifier_bit() {
            let before = self.modifiers;
            self.modifiers &= !bit;
            return before != self.modifiers;
        }
        let before = self.pressed.len();
        self.pressed.retain(|&k| k != key);
        before != self.pressed.len()
    }

    /// Releases everything.
    pub fn clear(&mut self) {
        self.modifiers = 0;
        self.pressed.clear();
    }

    /// Builds the report for the current state.
    pub fn report(&self) -> KeyboardReport {
        let mut keys = [0u8; MAX_PRESSED_KEYS];
        if self.pressed.len() > MAX_PRESSED_KEYS {
            keys = [ERROR_ROLL_OVER; MAX_PRESSED_KEYS];
        } else {
            for (slot, key) in keys.iter_mut().zip(&self.pressed) {
                *slot = key.0;
            }
        }
        KeyboardReport {
            modifiers: Modifiers(self.modifiers),
            keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release_regular_key() {
        let mut state = KeyboardState::new();

        assert!(state.press(Keycode::A));
        assert_eq!(state.report().keys, [0x04, 0, 0, 0, 0, 0]);

        assert!(state.release(Keycode::A));
        assert!(state.report().is_empty());
    }

    #[test]
    fn test_modifiers_go_to_modifier_byte_not_key_slots() {
        let mut state = KeyboardState::new();
        state.press(Keycode::LEFT_SHIFT);
        state.press(Keycode::A);

        let report = state.report();
        assert!(report.modifiers.contains(Modifiers::LEFT_SHIFT));
        assert_eq!(report.keys, [0x04, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_repeat_press_reports_no_change() {
        let mut state = KeyboardState::new();
        assert!(state.press(Keycode::B));
        assert!(!state.press(Keycode::B));
        assert!(state.press(Keycode::LEFT_ALT));
        assert!(!state.press(Keycode::LEFT_ALT));
    }

    #[test]
    fn test_release_of_unheld_key_reports_no_change() {
        let mut state = KeyboardState::new();
        assert!(!state.release(Keycode::Q));
        assert!(!state.release(Keycode::RIGHT_META));
    }

    #[test]
    fn test_keys_keep_press_order() {
        let mut state = KeyboardState::new();
        state.press(Keycode::S);
        state.press(Keycode::D);
        state.press(Keycode::F);
        state.release(Keycode::D);

        assert_eq!(state.report().keys, [0x16, 0x09, 0, 0, 0, 0]);
    }

    #[test]
    fn test_seventh_key_triggers_roll_over() {
        let mut state = KeyboardState::new();
        for usage in 0x04..0x0A {
            state.press(Keycode(usage));
        }
        assert!(!state.report().is_roll_over());

        state.press(Keycode(0x0A));
        let report = state.report();
        assert!(report.is_roll_over());

        state.release(Keycode(0x0A));
        assert!(!state.report().is_roll_over());
    }

    #[test]
    fn test_high_usage_ids_are_reported_unchanged() {
        // Arrange
        let mut state = KeyboardState::new();
        state.press(Keycode(0xA4));

        // Act
        let report = state.report();

        // Assert
        assert_eq!(report.keys, [0xA4, 0, 0, 0, 0, 0]);
        assert_eq!(report.modifiers, Modifiers::NONE);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut state = KeyboardState::new();
        state.press(Keycode::LEFT_CTRL);
        state.press(Keycode::C);
        state.clear();
        assert!(state.report().is_empty());
    }
}
