//! Human-readable key names.
//!
//! The first entry for a usage ID is its canonical name; later entries are
//! aliases accepted on input only.

use super::Keycode;

const NAMES: &[(&str, u8)] = &[
    ("A", 0x04),
    ("B", 0x05),
    ("C", 0x06),
    ("D", 0x07),
    ("E", 0x08),
    ("F", 0x09),
    ("G", 0x0A),
    ("H", 0x0B),
    ("I", 0x0C),
    ("J", 0x0D),
    ("K", 0x0E),
    ("L", 0x0F),
    ("M", 0x10),
    ("N", 0x11),
    ("O", 0x12),
    ("P", 0x13),
    ("Q", 0x14),
    ("R", 0x15),
    ("S", 0x16),
    ("T", 0x17),
    ("U", 0x18),
    ("V", 0x19),
    ("W", 0x1A),
    ("X", 0x1B),
    ("Y", 0x1C),
    ("Z", 0x1D),
    ("Digit1", 0x1E),
    ("Digit2", 0x1F),
    ("Digit3", 0x20),
    ("Digit4", 0x21),
    ("Digit5", 0x22),
    ("Digit6", 0x23),
    ("Digit7", 0x24),
    ("Digit8", 0x25),
    ("Digit9", 0x26),
    ("Digit0", 0x27),
    ("Enter", 0x28),
    ("Return", 0x28),
    ("Escape", 0x29),
    ("Esc", 0x29),
    ("Backspace", 0x2A),
    ("Tab", 0x2B),
    ("Space", 0x2C),
    ("Minus", 0x2D),
    ("Equal", 0x2E),
    ("BracketLeft", 0x2F),
    ("BracketRight", 0x30),
    ("Backslash", 0x31),
    ("Semicolon", 0x33),
    ("Quote", 0x34),
    ("Backquote", 0x35),
    ("Comma", 0x36),
    ("Period", 0x37),
    ("Slash", 0x38),
    ("CapsLock", 0x39),
    ("F1", 0x3A),
    ("F2", 0x3B),
    ("F3", 0x3C),
    ("F4", 0x3D),
    ("F5", 0x3E),
    ("F6", 0x3F),
    ("F7", 0x40),
    ("F8", 0x41),
    ("F9", 0x42),
    ("F10", 0x43),
    ("F11", 0x44),
    ("F12", 0x45),
    ("PrintScreen", 0x46),
    ("ScrollLock", 0x47),
    ("Pause", 0x48),
    ("Insert", 0x49),
    ("Home", 0x4A),
    ("PageUp", 0x4B),
    ("Delete", 0x4C),
    ("End", 0x4D),
    ("PageDown", 0x4E),
    ("ArrowRight", 0x4F),
    ("Right", 0x4F),
    ("ArrowLeft", 0x50),
    ("Left", 0x50),
    ("ArrowDown", 0x51),
    ("Down", 0x51),
    ("ArrowUp", 0x52),
    ("Up", 0x52),
    ("NumLock", 0x53),
    ("ContextMenu", 0x65),
    ("LeftCtrl", 0xE0),
    ("LeftShift", 0xE1),
    ("LeftAlt", 0xE2),
    ("LeftMeta", 0xE3),
    ("LeftGui", 0xE3),
    ("LeftSuper", 0xE3),
    ("RightCtrl", 0xE4),
    ("RightShift", 0xE5),
    ("RightAlt", 0xE6),
    ("RightMeta", 0xE7),
    ("RightGui", 0xE7),
    ("RightSuper", 0xE7),
];

pub(super) fn lookup(name: &str) -> Option<Keycode> {
    NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, usage)| Keycode(usage))
}

pub(super) fn name_of(key: Keycode) -> Option<&'static str> {
    NAMES
        .iter()
        .find(|&&(_, usage)| usage == key.0)
        .map(|&(n, _)| n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve_to_same_usage() {
        assert_eq!(lookup("LeftGui"), lookup("LeftMeta"));
        assert_eq!(lookup("RightSuper"), lookup("RightMeta"));
        assert_eq!(lookup("Esc"), Some(Keycode::ESCAPE));
    }

    #[test]
    fn test_canonical_name_is_first_entry() {
        assert_eq!(name_of(Keycode::LEFT_META), Some("LeftMeta"));
        assert_eq!(name_of(Keycode::ENTER), Some("Enter"));
        assert_eq!(name_of(Keycode::ARROW_UP), Some("ArrowUp"));
    }

    #[test]
    fn test_every_canonical_name_round_trips() {
        for &(name, usage) in NAMES {
            let canonical = name_of(Keycode(usage)).expect("usage has a name");
            assert_eq!(lookup(canonical), Some(Keycode(usage)), "{name}");
        }
    }
}
