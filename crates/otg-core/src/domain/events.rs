//! Host input events.
//!
//! Every producer (the presentation surface, the Ctrl-C handler, the
//! transport's disconnect monitor) posts [`HostEvent`] values into the one
//! event stream the relay consumes.

use crate::keymap::Keycode;

/// A keyboard key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// HID usage of the physical key.
    pub keycode: Keycode,
    /// `true` for host auto-repeat key-downs.
    pub repeat: bool,
}

impl KeyEvent {
    /// A key event from a physical press or release.
    pub fn new(keycode: Keycode) -> Self {
        Self {
            keycode,
            repeat: false,
        }
    }

    /// An auto-repeat key-down generated by the host.
    pub fn repeat(keycode: Keycode) -> Self {
        Self {
            keycode,
            repeat: true,
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

/// Relative pointer motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseMotionEvent {
    pub dx: i32,
    pub dy: i32,
}

/// A mouse button press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
}

/// Wheel scroll; positive `dy` scrolls away from the user, positive `dx` right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseWheelEvent {
    pub dx: i32,
    pub dy: i32,
}

/// Window notifications from the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The window content must be redrawn.
    Exposed,
    FocusGained,
    FocusLost,
    Resized { width: u32, height: u32 },
}

/// One event on the session's event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Window(WindowEvent),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    MouseMotion(MouseMotionEvent),
    MouseButtonDown(MouseButtonEvent),
    MouseButtonUp(MouseButtonEvent),
    MouseWheel(MouseWheelEvent),
    /// The user asked to quit (window closed, Ctrl-C, end of input script).
    Quit,
    /// Synthetic event posted by the transport monitor when the device is gone.
    DeviceDisconnected,
}

impl HostEvent {
    /// Returns `true` for events that end the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, HostEvent::Quit | HostEvent::DeviceDisconnected)
    }
}
