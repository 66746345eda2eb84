//! In-memory transport for testing.
//!
//! Records every lifecycle call into a shared [`Journal`] so tests can
//! assert the exact acquire/release order across the transport, the HID
//! sinks and the surface.  The monitor thread is real: a disconnect
//! simulated with [`MockTransport::simulate_disconnect`] reaches the
//! listener from a thread other than the caller's, as it would in production.

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use otg_core::{HidDevice, HidReport};

use super::{DisconnectListener, Transport, TransportError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One observable step in a session's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStep {
    TransportOpened,
    HidRegistered(HidDevice),
    TransportStarted,
    SurfaceCreated,
    PointerCapture(bool),
    TransportStopped,
    TransportJoined,
    HidUnregistered(HidDevice),
    TransportClosed,
    SurfaceDestroyed,
}

/// Shared, ordered record of [`LifecycleStep`]s.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<LifecycleStep>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, step: LifecycleStep) {
        lock(&self.0).push(step);
    }

    /// Returns a snapshot of every step recorded so far.
    pub fn steps(&self) -> Vec<LifecycleStep> {
        lock(&self.0).clone()
    }

    pub fn contains(&self, step: LifecycleStep) -> bool {
        lock(&self.0).contains(&step)
    }
}

/// Acquisition steps a [`MockTransport`] should refuse.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportFaults {
    pub fail_register: Option<HidDevice>,
    pub fail_start: bool,
}

enum MonitorCommand {
    Disconnect,
    Stop,
}

/// A [`Transport`] that writes to a journal instead of a USB device.
pub struct MockTransport {
    journal: Journal,
    faults: TransportFaults,
    listener: Arc<dyn DisconnectListener>,
    commands: Mutex<Option<Sender<MonitorCommand>>>,
    monitor: Mutex<Option<JoinHandle<()>>>,
    reports: Mutex<Vec<HidReport>>,
}

impl MockTransport {
    /// Opens the mock transport and records [`LifecycleStep::TransportOpened`].
    pub fn open(
        journal: Journal,
        listener: Arc<dyn DisconnectListener>,
        faults: TransportFaults,
    ) -> Self {
        journal.record(LifecycleStep::TransportOpened);
        Self {
            journal,
            faults,
            listener,
            commands: Mutex::new(None),
            monitor: Mutex::new(None),
            reports: Mutex::new(Vec::new()),
        }
    }

    /// Makes the monitor thread report a lost device.
    ///
    /// Returns `false` if the monitor is not running.
    pub fn simulate_disconnect(&self) -> bool {
        match lock(&self.commands).as_ref() {
            Some(tx) => tx.send(MonitorCommand::Disconnect).is_ok(),
            None => false,
        }
    }

    /// Returns every report written so far.
    pub fn reports(&self) -> Vec<HidReport> {
        lock(&self.reports).clone()
    }
}

impl Transport for MockTransport {
    fn start(&self) -> Result<(), TransportError> {
        if self.faults.fail_start {
            return Err(TransportError::Transfer("injected start failure".to_string()));
        }
        let mut monitor = lock(&self.monitor);
        if monitor.is_some() {
            return Err(TransportError::AlreadyStarted);
        }

        let (tx, rx) = mpsc::channel();
        let listener = Arc::clone(&self.listener);
        let handle = thread::Builder::new()
            .name("otg-usb-monitor".to_string())
            .spawn(move || {
                // A dropped sender ends the thread like an explicit stop.
                while let Ok(MonitorCommand::Disconnect) = rx.recv() {
                    listener.on_disconnected();
                }
            })
            .map_err(TransportError::Spawn)?;

        *lock(&self.commands) = Some(tx);
        *monitor = Some(handle);
        self.journal.record(LifecycleStep::TransportStarted);
        Ok(())
    }

    fn stop(&self) {
        if let Some(tx) = lock(&self.commands).take() {
            let _ = tx.send(MonitorCommand::Stop);
        }
        self.journal.record(LifecycleStep::TransportStopped);
    }

    fn join(&self) {
        let handle = lock(&self.monitor).take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
        self.journal.record(LifecycleStep::TransportJoined);
    }

    fn register_hid(&self, device: HidDevice) -> Result<(), TransportError> {
        if self.faults.fail_register == Some(device) {
            return Err(TransportError::Transfer(format!(
                "injected {device:?} registration failure"
            )));
        }
        self.journal.record(LifecycleStep::HidRegistered(device));
        Ok(())
    }

    fn unregister_hid(&self, device: HidDevice) {
        self.journal.record(LifecycleStep::HidUnregistered(device));
    }

    fn send_report(&self, report: HidReport) -> Result<(), TransportError> {
        lock(&self.reports).push(report);
        Ok(())
    }

    fn close(&self) {
        self.journal.record(LifecycleStep::TransportClosed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::event_stream::{channel, DisconnectBridge, EventStream};
    use otg_core::HostEvent;

    fn open(faults: TransportFaults) -> (MockTransport, Journal, EventStream) {
        let journal = Journal::new();
        let (poster, stream) = channel();
        let bridge = Arc::new(DisconnectBridge::new(poster));
        (MockTransport::open(journal.clone(), bridge, faults), journal, stream)
    }

    #[test]
    fn test_simulated_disconnect_reaches_stream_from_monitor_thread() {
        // Arrange
        let (transport, _, mut stream) = open(TransportFaults::default());
        transport.start().unwrap();

        // Act
        assert!(transport.simulate_disconnect());

        // Assert
        assert_eq!(stream.wait_event(), Some(HostEvent::DeviceDisconnected));
        transport.stop();
        transport.join();
    }

    #[test]
    fn test_simulate_disconnect_before_start_is_refused() {
        let (transport, _, _stream) = open(TransportFaults::default());
        assert!(!transport.simulate_disconnect());
    }

    #[test]
    fn test_journal_records_calls_in_order() {
        let (transport, journal, _stream) = open(TransportFaults::default());

        transport.register_hid(HidDevice::Keyboard).unwrap();
        transport.start().unwrap();
        transport.stop();
        transport.join();
        transport.unregister_hid(HidDevice::Keyboard);
        transport.close();

        assert_eq!(
            journal.steps(),
            vec![
                LifecycleStep::TransportOpened,
                LifecycleStep::HidRegistered(HidDevice::Keyboard),
                LifecycleStep::TransportStarted,
                LifecycleStep::TransportStopped,
                LifecycleStep::TransportJoined,
                LifecycleStep::HidUnregistered(HidDevice::Keyboard),
                LifecycleStep::TransportClosed,
            ]
        );
    }

    #[test]
    fn test_injected_faults_fail_the_matching_step() {
        let (transport, journal, _stream) = open(TransportFaults {
            fail_register: Some(HidDevice::Mouse),
            fail_start: true,
        });

        assert!(transport.register_hid(HidDevice::Keyboard).is_ok());
        assert!(transport.register_hid(HidDevice::Mouse).is_err());
        assert!(transport.start().is_err());
        assert!(!journal.contains(LifecycleStep::TransportStarted));
    }
}
