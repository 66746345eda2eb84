//! RunSessionUseCase: one relay session from device open to teardown.
//!
//! Resources are acquired in a fixed order:
//!
//! 1. transport (with a [`DisconnectBridge`] as its monitor listener)
//! 2. keyboard sink
//! 3. mouse sink
//! 4. transport monitor thread
//! 5. presentation surface
//!
//! and released in exactly the reverse order, whatever step failed.  Each
//! resource lives in an `Option` (the monitor in a `started` flag) inside a
//! [`Session`], whose `Drop` runs the teardown.  A failed acquisition simply
//! returns early with `?` and the partially built session cleans up after
//! itself.

use std::sync::Arc;

use otg_core::CaptureKeys;
use thiserror::Error;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

use super::relay_input::{Dispatch, RelayInputUseCase};
use crate::infrastructure::backend::SessionBackend;
use crate::infrastructure::event_stream::{DisconnectBridge, EventPoster, EventStream};
use crate::infrastructure::hid_sink::{HidKeyboard, HidMouse, SinkError};
use crate::infrastructure::surface::{Surface, SurfaceError, WindowParams};
use crate::infrastructure::transport::{Transport, TransportError};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    UserQuit,
    DeviceDisconnected,
    InitializationFailed,
}

impl ExitReason {
    /// Process exit code for this outcome.
    pub fn code(self) -> u8 {
        match self {
            ExitReason::UserQuit => 0,
            ExitReason::InitializationFailed => 1,
            ExitReason::DeviceDisconnected => 2,
        }
    }
}

/// Error type for session initialization.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    #[error("HID sink: {0}")]
    Sink(#[from] SinkError),
    #[error("surface: {0}")]
    Surface(#[from] SurfaceError),
}

/// Everything needed to start a session.
#[derive(Debug, Clone)]
pub struct SessionParams {
    /// Serial number of the device to relay to.
    pub serial: String,
    pub window: WindowParams,
    pub capture_keys: CaptureKeys,
}

/// The resources of one session, torn down on drop.
#[derive(Default)]
pub struct Session {
    transport: Option<Arc<dyn Transport>>,
    keyboard: Option<HidKeyboard>,
    mouse: Option<HidMouse>,
    transport_started: bool,
    surface: Option<Box<dyn Surface>>,
}

impl Session {
    /// Acquires every resource in order.
    ///
    /// # Errors
    ///
    /// Returns the first failure.  Everything acquired before it has already
    /// been released when this returns.
    pub fn open(
        backend: &dyn SessionBackend,
        params: &SessionParams,
        poster: EventPoster,
    ) -> Result<Self, SessionError> {
        let mut session = Session::default();

        let listener = Arc::new(DisconnectBridge::new(poster.clone()));
        let transport = backend.open_transport(&params.serial, listener)?;
        session.transport = Some(Arc::clone(&transport));

        session.keyboard = Some(HidKeyboard::init(Arc::clone(&transport))?);
        session.mouse = Some(HidMouse::init(Arc::clone(&transport))?);

        transport.start()?;
        session.transport_started = true;

        session.surface = Some(backend.create_surface(&params.window, poster)?);
        Ok(session)
    }

    /// Runs the event loop until the user quits or the device goes away.
    pub fn consume(&mut self, events: &mut EventStream, capture_keys: CaptureKeys) -> ExitReason {
        let (Some(keyboard), Some(mouse), Some(surface)) = (
            self.keyboard.as_mut(),
            self.mouse.as_mut(),
            self.surface.as_deref_mut(),
        ) else {
            error!("session is not fully initialized");
            return ExitReason::InitializationFailed;
        };

        let mut relay = RelayInputUseCase::new(capture_keys, keyboard, mouse, surface);
        let reason = loop {
            let Some(event) = events.wait_event() else {
                warn!("event stream closed");
                break ExitReason::DeviceDisconnected;
            };
            if let Dispatch::Exit(reason) = relay.handle_event(event) {
                break reason;
            }
        };

        let stats = relay.stats();
        info!(
            keys = stats.keys_forwarded,
            mouse = stats.mouse_forwarded,
            dropped = stats.dropped,
            toggles = stats.capture_toggles,
            "relay finished"
        );
        reason
    }

    /// Releases whatever was acquired, in reverse order.  Idempotent.
    pub fn teardown(&mut self) {
        if let Some(transport) = &self.transport {
            if std::mem::take(&mut self.transport_started) {
                transport.stop();
                transport.join();
            }
        }
        if let Some(mouse) = self.mouse.take() {
            mouse.destroy();
        }
        if let Some(keyboard) = self.keyboard.take() {
            keyboard.destroy();
        }
        if let Some(transport) = self.transport.take() {
            transport.close();
        }
        if let Some(surface) = self.surface.take() {
            surface.destroy();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Runs one complete session and reports how it ended.
///
/// Blocks the calling thread.  `poster` must belong to `events`; it is handed
/// to the disconnect bridge and to the surface.
pub fn run(
    backend: &dyn SessionBackend,
    params: &SessionParams,
    poster: EventPoster,
    mut events: EventStream,
) -> ExitReason {
    let span = info_span!("session", id = %Uuid::new_v4(), serial = %params.serial);
    let _enter = span.enter();

    let mut session = match Session::open(backend, params, poster) {
        Ok(session) => session,
        Err(e) => {
            error!("initialization failed: {e}");
            return ExitReason::InitializationFailed;
        }
    };
    info!("session started");

    let reason = session.consume(&mut events, params.capture_keys.clone());
    drop(session);
    info!(?reason, code = reason.code(), "session ended");
    reason
}

// ── Tests ─────────────────────────────────────────────────────────────────────
