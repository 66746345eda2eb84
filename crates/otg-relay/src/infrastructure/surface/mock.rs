//! In-memory surface for testing.

use otg_core::HostEvent;

use super::{Surface, SurfaceError};
use crate::infrastructure::event_stream::EventPoster;
use crate::infrastructure::transport::mock::{Journal, LifecycleStep};

/// A [`Surface`] that journals its lifecycle and pointer-capture changes.
pub struct MockSurface {
    journal: Journal,
    refuse_pointer_capture: bool,
}

impl MockSurface {
    /// Creates the surface and immediately posts `script`, in order.
    ///
    /// Records [`LifecycleStep::SurfaceCreated`].
    pub fn create(
        journal: Journal,
        poster: &EventPoster,
        script: &[HostEvent],
        refuse_pointer_capture: bool,
    ) -> Self {
        journal.record(LifecycleStep::SurfaceCreated);
        for event in script {
            // A closed stream means the session already ended.
            if poster.post(*event).is_err() {
                break;
            }
        }
        Self {
            journal,
            refuse_pointer_capture,
        }
    }
}

impl Surface for MockSurface {
    fn request_repaint(&mut self) {}

    fn set_pointer_capture(&mut self, captured: bool) -> Result<(), SurfaceError> {
        if self.refuse_pointer_capture {
            return Err(SurfaceError::PointerCapture(
                "pointer grab refused".to_string(),
            ));
        }
        self.journal.record(LifecycleStep::PointerCapture(captured));
        Ok(())
    }

    fn destroy(self: Box<Self>) {
        self.journal.record(LifecycleStep::SurfaceDestroyed);
    }
}
