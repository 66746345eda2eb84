//! HID sinks: host input events in, HID reports out.
//!
//! A sink keeps the key/button state of one virtual device, turns each
//! relayed event into a report and writes it through the shared
//! [`Transport`](crate::infrastructure::transport::Transport).  Sinks are
//! created after the transport and destroyed before it is closed.

pub mod keyboard;
pub mod mouse;

use otg_core::{HidDevice, KeyEvent, MouseButtonEvent, MouseMotionEvent, MouseWheelEvent};
use thiserror::Error;

use crate::infrastructure::transport::TransportError;

pub use keyboard::HidKeyboard;
pub use mouse::HidMouse;

/// Error type for HID sink operations.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("could not register HID {device:?}: {source}")]
    Register {
        device: HidDevice,
        #[source]
        source: TransportError,
    },
    #[error("could not write HID {device:?} report: {source}")]
    Write {
        device: HidDevice,
        #[source]
        source: TransportError,
    },
}

/// Receives relayed keyboard events.
#[cfg_attr(test, mockall::automock)]
pub trait KeyboardSink {
    /// Handles a key press (`pressed == true`) or release.
    fn process_key(&mut self, event: &KeyEvent, pressed: bool) -> Result<(), SinkError>;
}

/// Receives relayed pointer events.
#[cfg_attr(test, mockall::automock)]
pub trait MouseSink {
    fn process_mouse_motion(&mut self, event: &MouseMotionEvent) -> Result<(), SinkError>;

    fn process_mouse_button(
        &mut self,
        event: &MouseButtonEvent,
        pressed: bool,
    ) -> Result<(), SinkError>;

    fn process_mouse_wheel(&mut self, event: &MouseWheelEvent) -> Result<(), SinkError>;
}
