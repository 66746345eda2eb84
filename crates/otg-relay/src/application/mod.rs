//! Application layer use cases.
//!
//! - **`relay_input`** – Classifies each host event and either forwards it to
//!   a HID sink, toggles mouse capture, or drops it.  Runs once per event on
//!   the consumer thread.
//!
//! - **`run_session`** – Acquires the transport, the two HID sinks and the
//!   presentation surface in dependency order, runs the blocking event loop,
//!   and releases everything in reverse order on every exit path.
//!
//! Both depend on infrastructure only through traits, so the tests drive
//! them with in-memory doubles.

pub mod relay_input;
pub mod run_session;
