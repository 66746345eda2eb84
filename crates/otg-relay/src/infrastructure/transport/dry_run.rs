//! Transport that talks to no USB device at all.
//!
//! Reports are written to the log instead of the wire, which makes the whole
//! relay runnable on a machine without an accessory-capable device attached.
//!
//! The monitor thread can still observe a real device: when a `device_node`
//! path is given (for example `/dev/bus/usb/001/004`), the thread polls it
//! and reports a disconnect as soon as the node disappears.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use otg_core::{HidDevice, HidReport};
use tracing::{debug, error, info, trace, warn};

use super::{DisconnectListener, Transport, TransportError};

/// Default interval between two device-node presence checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A [`Transport`] that logs reports instead of sending them.
pub struct DryRunTransport {
    serial: String,
    device_node: Option<PathBuf>,
    poll_interval: Duration,
    listener: Arc<dyn DisconnectListener>,
    registered: Mutex<HashSet<HidDevice>>,
    running: Arc<AtomicBool>,
    monitor: Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl DryRunTransport {
    /// Opens the transport.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::DeviceNotFound`] if `device_node` is given
    /// but does not exist.
    pub fn open(
        serial: &str,
        device_node: Option<PathBuf>,
        listener: Arc<dyn DisconnectListener>,
    ) -> Result<Self, TransportError> {
        if let Some(node) = &device_node {
            if !node.exists() {
                return Err(TransportError::DeviceNotFound {
                    serial: serial.to_string(),
                });
            }
        }
        info!(serial, node = ?device_node, "dry-run transport opened");
        Ok(Self {
            serial: serial.to_string(),
            device_node,
            poll_interval: DEFAULT_POLL_INTERVAL,
            listener,
            registered: Mutex::new(HashSet::new()),
            running: Arc::new(AtomicBool::new(false)),
            monitor: Mutex::new(None),
            closed: AtomicBool::new(false),
        })
    }

    /// Overrides the device-node poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn is_registered(&self, device: HidDevice) -> bool {
        lock(&self.registered).contains(&device)
    }
}

impl Transport for DryRunTransport {
    fn start(&self) -> Result<(), TransportError> {
        let mut monitor = lock(&self.monitor);
        if monitor.is_some() {
            return Err(TransportError::AlreadyStarted);
        }
        self.running.store(true, Ordering::Release);

        let running = Arc::clone(&self.running);
        let listener = Arc::clone(&self.listener);
        let node = self.device_node.clone();
        let interval = self.poll_interval;
        let handle = thread::Builder::new()
            .name("otg-usb-monitor".to_string())
            .spawn(move || monitor_loop(node, interval, running, listener))
            .map_err(TransportError::Spawn)?;

        *monitor = Some(handle);
        debug!("transport monitor started");
        Ok(())
    }

    fn stop(&self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = lock(&self.monitor).as_ref() {
            handle.thread().unpark();
        }
    }

    fn join(&self) {
        let handle = lock(&self.monitor).take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                error!("transport monitor thread panicked");
            }
            debug!("transport monitor joined");
        }
    }

    fn register_hid(&self, device: HidDevice) -> Result<(), TransportError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(TransportError::Closed);
        }
        if !lock(&self.registered).insert(device) {
            return Err(TransportError::AlreadyRegistered(device));
        }
        debug!(?device, id = device.accessory_id(), "HID registered");
        Ok(())
    }

    fn unregister_hid(&self, device: HidDevice) {
        if !lock(&self.registered).remove(&device) {
            warn!(?device, "unregister of unknown HID device");
            return;
        }
        debug!(?device, "HID unregistered");
    }

    fn send_report(&self, report: HidReport) -> Result<(), TransportError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(TransportError::Closed);
        }
        let device = report.device();
        if !self.is_registered(device) {
            return Err(TransportError::NotRegistered(device));
        }
        trace!(?report, "HID report");
        Ok(())
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        lock(&self.registered).clear();
        info!(serial = %self.serial, "dry-run transport closed");
    }
}

/// Body of the monitor thread.
///
/// Wakes every `interval` (or when unparked by `stop`) and checks the device
/// node.  Without a node there is nothing to watch and the thread just waits
/// to be stopped.
fn monitor_loop(
    node: Option<PathBuf>,
    interval: Duration,
    running: Arc<AtomicBool>,
    listener: Arc<dyn DisconnectListener>,
) {
    while running.load(Ordering::Acquire) {
        if let Some(node) = &node {
            if !node.exists() {
                warn!(node = %node.display(), "USB device node disappeared");
                listener.on_disconnected();
                break;
            }
        }
        thread::park_timeout(interval);
    }
    debug!("transport monitor exiting");
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use otg_core::{hid::KeyboardState, MouseReport};
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;
    use uuid::Uuid;

    #[derive(Default)]
    struct CountingListener {
        calls: AtomicUsize,
    }

    impl DisconnectListener for CountingListener {
        fn on_disconnected(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn open(node: Option<PathBuf>) -> (DryRunTransport, Arc<CountingListener>) {
        let listener = Arc::new(CountingListener::default());
        let transport = DryRunTransport::open(
            "0123456789",
            node,
            Arc::clone(&listener) as Arc<dyn DisconnectListener>,
        )
        .expect("open")
        .with_poll_interval(Duration::from_millis(10));
        (transport, listener)
    }

    #[test]
    fn test_open_fails_for_missing_device_node() {
        let listener = Arc::new(CountingListener::default());
        let result = DryRunTransport::open(
            "abc",
            Some(PathBuf::from("/nonexistent/otg/device/node")),
            listener,
        );
        assert!(matches!(result, Err(TransportError::DeviceNotFound { .. })));
    }

    #[test]
    fn test_reports_require_registration() {
        // Arrange
        let (transport, _) = open(None);
        let report = HidReport::Keyboard(KeyboardState::new().report());

        // Act / Assert
        assert!(matches!(
            transport.send_report(report),
            Err(TransportError::NotRegistered(HidDevice::Keyboard))
        ));
        transport.register_hid(HidDevice::Keyboard).unwrap();
        assert!(transport.send_report(report).is_ok());
    }

    #[test]
    fn test_double_registration_is_rejected() {
        let (transport, _) = open(None);
        transport.register_hid(HidDevice::Mouse).unwrap();
        assert!(matches!(
            transport.register_hid(HidDevice::Mouse),
            Err(TransportError::AlreadyRegistered(HidDevice::Mouse))
        ));
    }

    #[test]
    fn test_close_rejects_further_writes() {
        let (transport, _) = open(None);
        transport.register_hid(HidDevice::Mouse).unwrap();
        transport.close();

        assert!(matches!(
            transport.send_report(HidReport::Mouse(MouseReport::default())),
            Err(TransportError::Closed)
        ));
        assert!(!transport.is_registered(HidDevice::Mouse));
    }

    #[test]
    fn test_start_twice_fails() {
        let (transport, _) = open(None);
        transport.start().unwrap();
        assert!(matches!(transport.start(), Err(TransportError::AlreadyStarted)));
        transport.stop();
        transport.join();
    }

    #[test]
    fn test_stop_and_join_without_node_does_not_notify() {
        let (transport, listener) = open(None);
        transport.start().unwrap();

        transport.stop();
        transport.join();

        assert_eq!(listener.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_join_without_start_is_a_no_op() {
        let (transport, _) = open(None);
        transport.join();
    }

    #[test]
    fn test_removed_device_node_triggers_disconnect_once() {
        // Arrange – a temp file stands in for the usbfs node
        let node = std::env::temp_dir().join(format!("otg_node_{}", Uuid::new_v4()));
        std::fs::write(&node, b"").unwrap();
        let (transport, listener) = open(Some(node.clone()));
        transport.start().unwrap();

        // Act
        std::fs::remove_file(&node).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while listener.calls.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        transport.stop();
        transport.join();

        // Assert
        assert_eq!(listener.calls.load(Ordering::SeqCst), 1);
    }
}
