//! Surface without a window.
//!
//! Host input comes from an event script (see [`script`](super::script))
//! read line by line on a background thread, by default from stdin.  End of
//! input is treated as the user closing the window.

use std::io::{self, BufRead, BufReader};
use std::thread::{self, JoinHandle};

use otg_core::HostEvent;
use tracing::{debug, info, trace, warn};

use super::script::parse_line;
use super::{Surface, SurfaceError, WindowParams, WINDOW_SIZE};
use crate::infrastructure::event_stream::EventPoster;

pub struct HeadlessSurface {
    title: String,
    pointer_captured: bool,
    repaints: u64,
    // Detached on destroy: a blocking read on stdin cannot be interrupted.
    _reader: JoinHandle<()>,
}

impl HeadlessSurface {
    /// Creates the surface and starts reading events from stdin.
    pub fn create(params: &WindowParams, poster: EventPoster) -> Result<Self, SurfaceError> {
        Self::with_reader(params, poster, BufReader::new(io::stdin()))
    }

    /// Creates the surface and starts reading events from `reader`.
    pub fn with_reader<R>(
        params: &WindowParams,
        poster: EventPoster,
        reader: R,
    ) -> Result<Self, SurfaceError>
    where
        R: BufRead + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("otg-script-reader".to_string())
            .spawn(move || read_script(reader, poster))
            .map_err(SurfaceError::Spawn)?;

        info!(
            title = %params.title,
            size = WINDOW_SIZE,
            always_on_top = params.always_on_top,
            borderless = params.borderless,
            x = ?params.x,
            y = ?params.y,
            "headless surface created"
        );
        Ok(Self {
            title: params.title.clone(),
            pointer_captured: false,
            repaints: 0,
            _reader: handle,
        })
    }

    pub fn is_pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    pub fn repaints(&self) -> u64 {
        self.repaints
    }
}

impl Surface for HeadlessSurface {
    fn request_repaint(&mut self) {
        self.repaints += 1;
        trace!(count = self.repaints, "repaint");
    }

    fn set_pointer_capture(&mut self, captured: bool) -> Result<(), SurfaceError> {
        self.pointer_captured = captured;
        info!(captured, "pointer capture changed");
        Ok(())
    }

    fn destroy(self: Box<Self>) {
        debug!(title = %self.title, "headless surface destroyed");
    }
}

/// Posts every scripted event, then `Quit` at end of input.
///
/// Stops early once the stream is closed.
fn read_script<R: BufRead>(reader: R, poster: EventPoster) {
    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("event script read failed: {e}");
                break;
            }
        };
        match parse_line(&line) {
            Ok(Some(event)) => {
                if poster.post(event).is_err() {
                    debug!("event stream closed, script reader exiting");
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => warn!(line = index + 1, "skipping script line: {e}"),
        }
    }
    if poster.post(HostEvent::Quit).is_err() {
        debug!("event stream closed before end of script");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::event_stream::channel;
    use otg_core::{KeyEvent, Keycode, MouseMotionEvent};
    use std::io::Cursor;

    #[test]
    fn test_script_events_are_posted_then_quit() {
        // Arrange
        let (poster, mut stream) = channel();
        let script = "key down A\n# comment\nbogus line\nmotion 1 2\n";

        // Act
        let _surface =
            HeadlessSurface::with_reader(&WindowParams::default(), poster, Cursor::new(script))
                .unwrap();

        // Assert
        assert_eq!(stream.wait_event(), Some(HostEvent::KeyDown(KeyEvent::new(Keycode::A))));
        assert_eq!(
            stream.wait_event(),
            Some(HostEvent::MouseMotion(MouseMotionEvent { dx: 1, dy: 2 }))
        );
        assert_eq!(stream.wait_event(), Some(HostEvent::Quit));
    }

    #[test]
    fn test_pointer_capture_and_repaint_are_tracked() {
        let (poster, _stream) = channel();
        let mut surface =
            HeadlessSurface::with_reader(&WindowParams::default(), poster, Cursor::new(""))
                .unwrap();

        surface.set_pointer_capture(true).unwrap();
        surface.request_repaint();
        surface.request_repaint();

        assert!(surface.is_pointer_captured());
        assert_eq!(surface.repaints(), 2);
        Box::new(surface).destroy();
    }
}
