//! In-memory backend for testing the session lifecycle.
//!
//! Builds a [`MockTransport`] and a [`MockSurface`] that share one
//! [`Journal`], so a test can assert the complete acquire/release order of a
//! session.  Any acquisition step can be made to fail.

use std::sync::{Arc, Mutex, PoisonError};

use otg_core::{HidDevice, HostEvent};

use super::SessionBackend;
use crate::infrastructure::event_stream::EventPoster;
use crate::infrastructure::surface::mock::MockSurface;
use crate::infrastructure::surface::{Surface, SurfaceError, WindowParams};
use crate::infrastructure::transport::mock::{Journal, MockTransport, TransportFaults};
use crate::infrastructure::transport::{DisconnectListener, Transport, TransportError};

#[derive(Default)]
pub struct MockBackend {
    journal: Journal,
    fail_open: bool,
    transport_faults: TransportFaults,
    fail_surface: bool,
    refuse_pointer_capture: bool,
    disconnect_when_surface_created: bool,
    script: Vec<HostEvent>,
    transport: Mutex<Option<Arc<MockTransport>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events the surface posts as soon as it is created.
    pub fn with_script(mut self, script: impl IntoIterator<Item = HostEvent>) -> Self {
        self.script = script.into_iter().collect();
        self
    }

    pub fn fail_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn fail_register(mut self, device: HidDevice) -> Self {
        self.transport_faults.fail_register = Some(device);
        self
    }

    pub fn fail_start(mut self) -> Self {
        self.transport_faults.fail_start = true;
        self
    }

    pub fn fail_surface(mut self) -> Self {
        self.fail_surface = true;
        self
    }

    pub fn refuse_pointer_capture(mut self) -> Self {
        self.refuse_pointer_capture = true;
        self
    }

    /// Has the transport's monitor thread report a lost device right after
    /// the surface is created.
    pub fn disconnect_when_surface_created(mut self) -> Self {
        self.disconnect_when_surface_created = true;
        self
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// The transport opened by the last session, if any.
    pub fn transport(&self) -> Option<Arc<MockTransport>> {
        self.transport
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionBackend for MockBackend {
    fn open_transport(
        &self,
        serial: &str,
        listener: Arc<dyn DisconnectListener>,
    ) -> Result<Arc<dyn Transport>, TransportError> {
        if self.fail_open {
            return Err(TransportError::DeviceNotFound {
                serial: serial.to_string(),
            });
        }
        let transport = Arc::new(MockTransport::open(
            self.journal.clone(),
            listener,
            self.transport_faults,
        ));
        *self.transport.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(Arc::clone(&transport));
        Ok(transport)
    }

    fn create_surface(
        &self,
        _params: &WindowParams,
        poster: EventPoster,
    ) -> Result<Box<dyn Surface>, SurfaceError> {
        if self.fail_surface {
            return Err(SurfaceError::Create("injected surface failure".to_string()));
        }
        let surface = MockSurface::create(
            self.journal.clone(),
            &poster,
            &self.script,
            self.refuse_pointer_capture,
        );
        if self.disconnect_when_surface_created {
            if let Some(transport) = self.transport() {
                transport.simulate_disconnect();
            }
        }
        Ok(Box::new(surface))
    }
}
