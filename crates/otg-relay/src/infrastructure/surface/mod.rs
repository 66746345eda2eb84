//! Presentation surface.
//!
//! The surface is the host-side window the user focuses to relay input.  It
//! renders nothing of the device; it only needs to be repainted when the
//! windowing system asks, and to grab or release the host pointer when
//! capture toggles.  Host input is posted by the surface into the session's
//! event stream via the [`EventPoster`](crate::infrastructure::event_stream::EventPoster)
//! it receives at creation.

pub mod headless;
pub mod mock;
pub mod script;

use thiserror::Error;

pub use headless::HeadlessSurface;

/// Width and height of the relay window, in logical pixels.
pub const WINDOW_SIZE: u32 = 256;

/// Default window title.
pub const DEFAULT_TITLE: &str = "otg-relay";

/// Error type for surface operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("could not create surface: {0}")]
    Create(String),
    #[error("failed to spawn surface input thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("could not change pointer capture: {0}")]
    PointerCapture(String),
}

/// Window creation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowParams {
    pub title: String,
    pub always_on_top: bool,
    /// Initial position; `None` lets the window manager decide.
    pub x: Option<i16>,
    pub y: Option<i16>,
    pub borderless: bool,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            always_on_top: false,
            x: None,
            y: None,
            borderless: false,
        }
    }
}

/// A created presentation surface.  Used from the consumer thread only.
pub trait Surface {
    /// Redraws the window contents.
    fn request_repaint(&mut self);

    /// Grabs (`true`) or releases (`false`) the host pointer.
    fn set_pointer_capture(&mut self, captured: bool) -> Result<(), SurfaceError>;

    /// Destroys the window.
    fn destroy(self: Box<Self>);
}
