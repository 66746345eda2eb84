//! Infrastructure layer.
//!
//! Adapters around everything that is not pure logic: the cross-thread
//! event stream, the USB accessory transport, the HID sinks that write to
//! it, the presentation surface, collaborator backends, and config storage.
//!
//! **Dependency rule**: this layer may depend on `otg_core`, but the
//! application layer only sees it through the traits defined here.

pub mod backend;
pub mod event_stream;
pub mod hid_sink;
pub mod storage;
pub mod surface;
pub mod transport;
