//! Typed HID reports for the relayed keyboard and mouse.
//!
//! The HID sinks keep a [`KeyboardState`] / [`MouseState`] and hand the
//! resulting reports to the transport.  How a report is laid out in bytes
//! and registered with the device is the transport's business.

mod keyboard;
mod mouse;

pub use keyboard::{KeyboardReport, KeyboardState, ERROR_ROLL_OVER, MAX_PRESSED_KEYS};
pub use mouse::{MouseReport, MouseState};

/// The two virtual HID devices exposed to the attached device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HidDevice {
    Keyboard,
    Mouse,
}

impl HidDevice {
    /// Accessory-level identifier used when registering the device.
    pub fn accessory_id(self) -> u16 {
        match self {
            HidDevice::Keyboard => 1,
            HidDevice::Mouse => 2,
        }
    }
}

/// A report destined for one of the virtual HID devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HidReport {
    Keyboard(KeyboardReport),
    Mouse(MouseReport),
}

impl HidReport {
    pub fn device(&self) -> HidDevice {
        match self {
            HidReport::Keyboard(_) => HidDevice::Keyboard,
            HidReport::Mouse(_) => HidDevice::Mouse,
        }
    }
}
