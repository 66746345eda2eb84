//! Bridge from the transport's monitor thread into the event stream.
//!
//! The monitor thread has no access to the consumer's control flow.  When it
//! sees the device go away it calls [`DisconnectListener::on_disconnected`],
//! and the bridge posts a single [`HostEvent::DeviceDisconnected`] into the
//! stream the consumer is blocked on.
//!
//! Posting never blocks and is never retried.  A failed post is logged and
//! otherwise ignored: the transport's own read/write errors are the backstop
//! for noticing a dead device.

use std::sync::atomic::{AtomicBool, Ordering};

use otg_core::HostEvent;
use tracing::{debug, error};

use super::EventPoster;
use crate::infrastructure::transport::DisconnectListener;

/// Posts the synthetic disconnect event at most once per session.
#[derive(Debug)]
pub struct DisconnectBridge {
    poster: EventPoster,
    fired: AtomicBool,
}

impl DisconnectBridge {
    pub fn new(poster: EventPoster) -> Self {
        Self {
            poster,
            fired: AtomicBool::new(false),
        }
    }

    /// Returns `true` once the disconnect event has been posted (or attempted).
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

impl DisconnectListener for DisconnectBridge {
    fn on_disconnected(&self) {
        if self.fired.swap(true, Ordering::AcqRel) {
            debug!("duplicate disconnect notification ignored");
            return;
        }
        if let Err(e) = self.poster.post(HostEvent::DeviceDisconnected) {
            error!("could not post USB disconnection event: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
