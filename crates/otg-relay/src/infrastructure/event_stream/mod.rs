//! The session's single event stream.
//!
//! Host input (from the presentation surface), quit requests (window close,
//! Ctrl-C) and the synthetic disconnect event (from the transport monitor
//! thread) all travel through one multi-producer, single-consumer channel.
//! Exactly one thread drains it: the consumer thread running the session
//! loop.
//!
//! # Why an unbounded channel?
//!
//! Producers include the transport's monitor thread, which must never block
//! waiting for the consumer.  `tokio::sync::mpsc::UnboundedSender::send` is a
//! synchronous, non-blocking call that works from plain threads and from
//! async tasks alike, and `blocking_recv` parks the consumer thread until the
//! next event arrives.  Delivery is FIFO in arrival order.

pub mod disconnect;

use otg_core::HostEvent;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub use disconnect::DisconnectBridge;

/// Error returned when an event cannot be enqueued.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PostError {
    /// The consumer side has been dropped; the session is over.
    #[error("event stream closed, could not post {0:?}")]
    Closed(HostEvent),
}

/// Creates a connected poster/stream pair.
pub fn channel() -> (EventPoster, EventStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventPoster { tx }, EventStream { rx })
}

/// Producer handle.  Cheap to clone; usable from any thread.
#[derive(Debug, Clone)]
pub struct EventPoster {
    tx: UnboundedSender<HostEvent>,
}

impl EventPoster {
    /// Enqueues `event` without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::Closed`] if the stream has been dropped.
    pub fn post(&self, event: HostEvent) -> Result<(), PostError> {
        self.tx
            .send(event)
            .map_err(|e| PostError::Closed(e.0))
    }

    /// Returns `true` once the consumer side is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer handle.  Owned by the session loop.
#[derive(Debug)]
pub struct EventStream {
    rx: UnboundedReceiver<HostEvent>,
}

impl EventStream {
    /// Blocks the calling thread until the next event arrives.
    ///
    /// Returns `None` once every [`EventPoster`] has been dropped and the
    /// queue is empty.
    ///
    /// Must not be called from inside an async task; run the session on a
    /// plain thread or via `tokio::task::spawn_blocking`.
    pub fn wait_event(&mut self) -> Option<HostEvent> {
        self.rx.blocking_recv()
    }

    /// Returns the next queued event without blocking.
    pub fn poll_event(&mut self) -> Option<HostEvent> {
        self.rx.try_recv().ok()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
