//! # otg-core
//!
//! Shared library for OTG Relay containing the host input event model, the
//! mouse-capture toggle state machine, and the typed HID report model.
//!
//! This crate has zero dependencies on OS APIs, USB stacks, windowing
//! toolkits, or threads.  Everything here is plain data plus pure state
//! transitions, so it can be tested exhaustively without hardware.
//!
//! # Architecture overview
//!
//! OTG Relay turns the host computer into a USB keyboard and mouse for an
//! attached device.  Host input events are read on a single consumer thread,
//! filtered through the capture state machine, and written to the device as
//! HID reports over a USB accessory transport.
//!
//! - **`keymap`** – The [`Keycode`] type (USB HID keyboard usage IDs) and the
//!   human-readable key names used by the config file and event scripts.
//!
//! - **`domain`** – The [`HostEvent`] model and the [`CaptureToggle`] state
//!   machine that decides when pointer input is relayed.
//!
//! - **`hid`** – Typed keyboard/mouse reports and the key/button state
//!   trackers that build them.  The byte layout on the wire belongs to the
//!   transport and is not defined here.

pub mod domain;
pub mod hid;
pub mod keymap;

pub use domain::capture::{CaptureKeys, CaptureState, CaptureToggle, KeyRelease, Transition};
pub use domain::events::{
    HostEvent, KeyEvent, MouseButton, MouseButtonEvent, MouseMotionEvent, MouseWheelEvent,
    WindowEvent,
};
pub use hid::{HidDevice, HidReport, KeyboardReport, MouseReport};
pub use keymap::{Keycode, KeycodeError, Modifiers};
