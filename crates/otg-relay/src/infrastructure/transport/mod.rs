//! USB accessory transport.
//!
//! The transport owns the connection to the attached device.  It registers
//! the virtual HID keyboard and mouse with the device, writes their reports,
//! and runs a monitor thread that watches the physical connection.
//!
//! The device handshake and USB transfer plumbing live behind the
//! [`Transport`] trait.  The application layer only needs:
//!
//! - `start` / `stop` / `join` for the monitor thread,
//! - `register_hid` / `unregister_hid` / `send_report` for the HID sinks,
//! - `close` to release the connection,
//! - a [`DisconnectListener`] the monitor thread calls when the device is gone.

pub mod dry_run;
pub mod mock;

use otg_core::{HidDevice, HidReport};
use thiserror::Error;

/// Error type for transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no accessory device found for serial {serial:?}")]
    DeviceNotFound { serial: String },
    #[error("transport monitor is already running")]
    AlreadyStarted,
    #[error("HID {0:?} is already registered")]
    AlreadyRegistered(HidDevice),
    #[error("HID {0:?} is not registered")]
    NotRegistered(HidDevice),
    #[error("failed to spawn monitor thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("USB transfer failed: {0}")]
    Transfer(String),
    #[error("transport is closed")]
    Closed,
}

/// Callbacks invoked by the transport's monitor thread.
///
/// Implementations must return promptly and must not block on the consumer.
pub trait DisconnectListener: Send + Sync {
    /// The physical connection to the device has been lost.
    fn on_disconnected(&self);
}

/// An open accessory connection.
///
/// Shared by reference (`Arc<dyn Transport>`) between the session and both
/// HID sinks.  All methods take `&self`; implementations synchronise
/// internally because the monitor thread runs concurrently.
pub trait Transport: Send + Sync {
    /// Starts the monitor thread.
    fn start(&self) -> Result<(), TransportError>;

    /// Asks the monitor thread to stop.  Does not wait.
    fn stop(&self);

    /// Waits for the monitor thread to exit.  No-op if it never started.
    fn join(&self);

    /// Registers a virtual HID device with the attached device.
    fn register_hid(&self, device: HidDevice) -> Result<(), TransportError>;

    /// Unregisters a virtual HID device.  Errors are logged, not returned.
    fn unregister_hid(&self, device: HidDevice);

    /// Writes one report for a registered device.
    fn send_report(&self, report: HidReport) -> Result<(), TransportError>;

    /// Releases the connection.  Further writes fail with [`TransportError::Closed`].
    fn close(&self);
}
