//! Domain layer: the host event model and the capture state machine.
//!
//! Pure logic only.  Nothing here performs I/O or knows which thread it
//! runs on; the relay in `otg-relay` owns the single consumer thread.

pub mod capture;
pub mod events;
