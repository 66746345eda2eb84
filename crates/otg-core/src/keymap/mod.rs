//! Key codes for the relayed keyboard.
//!
//! The canonical representation is the USB HID Usage ID on the
//! Keyboard/Keypad page (0x07).  Host input backends translate their native
//! codes to a [`Keycode`] at the capture boundary, so everything downstream
//! (capture gestures, keyboard reports) speaks HID directly.
//!
//! Reference: USB HID Usage Tables 1.3, Section 10 (Keyboard/Keypad page 0x07).

mod names;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a key name cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeycodeError {
    #[error("unknown key name: {0:?}")]
    UnknownName(String),
    #[error("usage ID {0} is outside the keyboard page (0x00-0xFF)")]
    OutOfRange(String),
}

/// USB HID keyboard usage ID (page 0x07).
///
/// Keyboard page usages are one byte wide, which is also the width of a
/// report key slot.
///
/// Serialized by name (`"LeftAlt"`, `"A"`, ...) so config files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Keycode(pub u8);

impl Keycode {
    pub const A: Keycode = Keycode(0x04);
    pub const B: Keycode = Keycode(0x05);
    pub const C: Keycode = Keycode(0x06);
    pub const D: Keycode = Keycode(0x07);
    pub const E: Keycode = Keycode(0x08);
    pub const F: Keycode = Keycode(0x09);
    pub const Q: Keycode = Keycode(0x14);
    pub const S: Keycode = Keycode(0x16);
    pub const W: Keycode = Keycode(0x1A);
    pub const Z: Keycode = Keycode(0x1D);
    pub const DIGIT_1: Keycode = Keycode(0x1E);
    pub const DIGIT_0: Keycode = Keycode(0x27);
    pub const ENTER: Keycode = Keycode(0x28);
    pub const ESCAPE: Keycode = Keycode(0x29);
    pub const BACKSPACE: Keycode = Keycode(0x2A);
    pub const TAB: Keycode = Keycode(0x2B);
    pub const SPACE: Keycode = Keycode(0x2C);
    pub const F1: Keycode = Keycode(0x3A);
    pub const F12: Keycode = Keycode(0x45);
    pub const ARROW_RIGHT: Keycode = Keycode(0x4F);
    pub const ARROW_LEFT: Keycode = Keycode(0x50);
    pub const ARROW_DOWN: Keycode = Keycode(0x51);
    pub const ARROW_UP: Keycode = Keycode(0x52);

    pub const LEFT_CTRL: Keycode = Keycode(0xE0);
    pub const LEFT_SHIFT: Keycode = Keycode(0xE1);
    pub const LEFT_ALT: Keycode = Keycode(0xE2);
    pub const LEFT_META: Keycode = Keycode(0xE3);
    pub const RIGHT_CTRL: Keycode = Keycode(0xE4);
    pub const RIGHT_SHIFT: Keycode = Keycode(0xE5);
    pub const RIGHT_ALT: Keycode = Keycode(0xE6);
    pub const RIGHT_META: Keycode = Keycode(0xE7);

    /// Returns `true` for the eight modifier usages (0xE0–0xE7).
    pub fn is_modifier(self) -> bool {
        (0xE0..=0xE7).contains(&self.0)
    }

    /// Bit of this key in the HID modifier byte, or `None` for regular keys.
    pub fn modifier_bit(self) -> Option<u8> {
        self.is_modifier().then(|| 1u8 << (self.0 - 0xE0))
    }

    /// Resolves a human-readable key name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Keycode> {
        names::lookup(name)
    }

    /// Returns the canonical name of this key, if it has one.
    pub fn name(self) -> Option<&'static str> {
        names::name_of(self)
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:02X}", self.0),
        }
    }
}

impl FromStr for Keycode {
    type Err = KeycodeError;

    /// Accepts a key name or a raw usage ID written as `0x..`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return match u16::from_str_radix(hex, 16) {
                Ok(usage) => u8::try_from(usage)
                    .map(Keycode)
                    .map_err(|_| KeycodeError::OutOfRange(s.to_string())),
                Err(_) => Err(KeycodeError::UnknownName(s.to_string())),
            };
        }
        Keycode::from_name(s).ok_or_else(|| KeycodeError::UnknownName(s.to_string()))
    }
}

impl TryFrom<String> for Keycode {
    type Error = KeycodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Keycode> for String {
    fn from(key: Keycode) -> Self {
        key.to_string()
    }
}

/// HID modifier byte (bit 0 = left ctrl ... bit 7 = right meta).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const LEFT_CTRL: u8 = 0x01;
    pub const LEFT_SHIFT: u8 = 0x02;
    pub const LEFT_ALT: u8 = 0x04;
    pub const LEFT_META: u8 = 0x08;
    pub const RIGHT_CTRL: u8 = 0x10;
    pub const RIGHT_SHIFT: u8 = 0x20;
    pub const RIGHT_ALT: u8 = 0x40;
    pub const RIGHT_META: u8 = 0x80;

    pub fn contains(self, bits: u8) -> bool {
        self.0 & bits == bits
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_keys_are_recognised() {
        for key in [
            Keycode::LEFT_CTRL,
            Keycode::LEFT_SHIFT,
            Keycode::LEFT_ALT,
            Keycode::LEFT_META,
            Keycode::RIGHT_CTRL,
            Keycode::RIGHT_SHIFT,
            Keycode::RIGHT_ALT,
            Keycode::RIGHT_META,
        ] {
            assert!(key.is_modifier(), "{key} must be a modifier");
        }
        assert!(!Keycode::A.is_modifier());
        assert!(!Keycode::ESCAPE.is_modifier());
    }

    #[test]
    fn test_modifier_bits_match_hid_modifier_byte_layout() {
        assert_eq!(Keycode::LEFT_CTRL.modifier_bit(), Some(Modifiers::LEFT_CTRL));
        assert_eq!(Keycode::LEFT_ALT.modifier_bit(), Some(Modifiers::LEFT_ALT));
        assert_eq!(Keycode::LEFT_META.modifier_bit(), Some(Modifiers::LEFT_META));
        assert_eq!(Keycode::RIGHT_META.modifier_bit(), Some(Modifiers::RIGHT_META));
        assert_eq!(Keycode::A.modifier_bit(), None);
    }

    #[test]
    fn test_parse_accepts_names_case_insensitively() {
        assert_eq!("LeftAlt".parse::<Keycode>(), Ok(Keycode::LEFT_ALT));
        assert_eq!("leftalt".parse::<Keycode>(), Ok(Keycode::LEFT_ALT));
        assert_eq!("a".parse::<Keycode>(), Ok(Keycode::A));
        assert_eq!("Escape".parse::<Keycode>(), Ok(Keycode::ESCAPE));
    }

    #[test]
    fn test_parse_accepts_hex_usage_ids() {
        assert_eq!("0xE3".parse::<Keycode>(), Ok(Keycode::LEFT_META));
        assert_eq!("0x04".parse::<Keycode>(), Ok(Keycode::A));
    }

    #[test]
    fn test_parse_rejects_usages_wider_than_a_byte() {
        // Arrange – 0x1E2 would alias LeftAlt (0xE2) if truncated
        let input = "0x1E2";

        // Act
        let result = input.parse::<Keycode>();

        // Assert
        assert_eq!(result, Err(KeycodeError::OutOfRange("0x1E2".to_string())));
        assert_eq!("0xE2".parse::<Keycode>(), Ok(Keycode::LEFT_ALT));
        assert_eq!("0xFF".parse::<Keycode>(), Ok(Keycode(0xFF)));
    }

    #[test]
    fn test_parse_rejects_malformed_hex() {
        assert!(matches!("0xZZ".parse::<Keycode>(), Err(KeycodeError::UnknownName(_))));
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = "Hyper".parse::<Keycode>().unwrap_err();
        assert_eq!(err, KeycodeError::UnknownName("Hyper".to_string()));
    }

    #[test]
    fn test_display_uses_name_or_hex_fallback() {
        assert_eq!(Keycode::RIGHT_META.to_string(), "RightMeta");
        assert_eq!(Keycode(0x99).to_string(), "0x99");
    }

    #[test]
    fn test_modifiers_contains() {
        let m = Modifiers(Modifiers::LEFT_CTRL | Modifiers::RIGHT_ALT);
        assert!(m.contains(Modifiers::LEFT_CTRL));
        assert!(m.contains(Modifiers::RIGHT_ALT));
        assert!(!m.contains(Modifiers::LEFT_SHIFT));
    }
}
