//! Relative mouse reports.

use crate::domain::events::{MouseButton, MouseMotionEvent, MouseWheelEvent};

/// One mouse input report.  Deltas are relative and saturate to `i8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseReport {
    /// Bit 0 = left, 1 = right, 2 = middle, 3 = X1, 4 = X2.
    pub buttons: u8,
    pub dx: i8,
    pub dy: i8,
    /// Vertical wheel, positive away from the user.
    pub wheel: i8,
    /// Horizontal wheel, positive to the right.
    pub pan: i8,
}

fn button_bit(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => 1 << 0,
        MouseButton::Right => 1 << 1,
        MouseButton::Middle => 1 << 2,
        MouseButton::X1 => 1 << 3,
        MouseButton::X2 => 1 << 4,
    }
}

fn saturate(value: i32) -> i8 {
    value.clamp(i8::MIN as i32, i8::MAX as i32) as i8
}

/// Tracks held mouse buttons; every report carries the current button mask.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    buttons: u8,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    pub fn motion(&self, event: &MouseMotionEvent) -> MouseReport {
        MouseReport {
            buttons: self.buttons,
            dx: saturate(event.dx),
            dy: saturate(event.dy),
            ..MouseReport::default()
        }
    }

    pub fn button(&mut self, button: MouseButton, pressed: bool) -> MouseReport {
        if pressed {
            self.buttons |= button_bit(button);
        } else {
            self.buttons &= !button_bit(button);
        }
        MouseReport {
            buttons: self.buttons,
            ..MouseReport::default()
        }
    }

    pub fn wheel(&self, event: &MouseWheelEvent) -> MouseReport {
        MouseReport {
            buttons: self.buttons,
            wheel: saturate(event.dy),
            pan: saturate(event.dx),
            ..MouseReport::default()
        }
    }
}
