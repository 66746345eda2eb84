//! Collaborator backends.
//!
//! A [`SessionBackend`] builds the two collaborators whose implementation
//! depends on the environment: the transport and the presentation surface.
//! The session manager only sees this trait, so the same lifecycle code runs
//! against a dry-run transport, a real device, or in-memory doubles.

pub mod mock;

use std::path::PathBuf;
use std::sync::Arc;

use crate::infrastructure::event_stream::EventPoster;
use crate::infrastructure::surface::{HeadlessSurface, Surface, SurfaceError, WindowParams};
use crate::infrastructure::transport::dry_run::DryRunTransport;
use crate::infrastructure::transport::{DisconnectListener, Transport, TransportError};

/// Factory for a session's transport and surface.
pub trait SessionBackend {
    /// Opens the accessory transport for the device identified by `serial`.
    ///
    /// `listener` must be handed to the transport's monitor thread.
    fn open_transport(
        &self,
        serial: &str,
        listener: Arc<dyn DisconnectListener>,
    ) -> Result<Arc<dyn Transport>, TransportError>;

    /// Creates the presentation surface.  Host input goes to `poster`.
    fn create_surface(
        &self,
        params: &WindowParams,
        poster: EventPoster,
    ) -> Result<Box<dyn Surface>, SurfaceError>;
}

/// Dry-run transport plus headless surface fed from stdin.
#[derive(Debug, Clone, Default)]
pub struct DryRunBackend {
    device_node: Option<PathBuf>,
}

impl DryRunBackend {
    /// `device_node`, when set, is watched for removal by the monitor thread.
    pub fn new(device_node: Option<PathBuf>) -> Self {
        Self { device_node }
    }
}

impl SessionBackend for DryRunBackend {
    fn open_transport(
        &self,
        serial: &str,
        listener: Arc<dyn DisconnectListener>,
    ) -> Result<Arc<dyn Transport>, TransportError> {
        let transport = DryRunTransport::open(serial, self.device_node.clone(), listener)?;
        Ok(Arc::new(transport))
    }

    fn create_surface(
        &self,
        params: &WindowParams,
        poster: EventPoster,
    ) -> Result<Box<dyn Surface>, SurfaceError> {
        Ok(Box::new(HeadlessSurface::create(params, poster)?))
    }
}
