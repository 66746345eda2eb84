//! otg-relay library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does otg-relay do?
//!
//! It makes the host behave like a USB keyboard and mouse for an attached
//! device.  A small window (the *presentation surface*) receives the host's
//! input; the relay forwards keystrokes always and pointer input only while
//! the mouse is *captured*; two HID sinks turn the events into reports that
//! the USB accessory transport writes to the device.  A monitor thread owned
//! by the transport notices when the cable is pulled and ends the session.

/// Application layer: the event relay and the session lifecycle.
pub mod application;

/// Infrastructure layer: event stream, transport, HID sinks, surface, config.
pub mod infrastructure;
