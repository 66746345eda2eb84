//! RelayInputUseCase: decides what happens to each host input event.
//!
//! Keyboard events always reach the device.  Pointer events reach it only
//! while the mouse is captured; while released, a click captures the mouse
//! instead of being relayed.  Capture is toggled by pressing and releasing a
//! capture key on its own, and released when the window loses focus.
//!
//! # Architecture
//!
//! The use case depends only on the [`KeyboardSink`], [`MouseSink`] and
//! [`Surface`] traits and on the [`CaptureToggle`] domain state machine.  It
//! runs entirely on the consumer thread; one call to
//! [`RelayInputUseCase::handle_event`] processes one event to completion.

use otg_core::{CaptureKeys, CaptureToggle, HostEvent, KeyEvent, KeyRelease, Transition, WindowEvent};
use tracing::{debug, error, warn};

use super::run_session::ExitReason;
use crate::infrastructure::hid_sink::{KeyboardSink, MouseSink, SinkError};
use crate::infrastructure::surface::Surface;

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Exit(ExitReason),
}

/// Counters reported when the session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub keys_forwarded: u64,
    pub mouse_forwarded: u64,
    /// Pointer events dropped while the mouse was released.
    pub dropped: u64,
    pub capture_toggles: u64,
}

/// Routes host input to the HID sinks according to the capture state.
pub struct RelayInputUseCase<'a> {
    capture: CaptureToggle,
    keyboard: &'a mut dyn KeyboardSink,
    mouse: &'a mut dyn MouseSink,
    surface: &'a mut dyn Surface,
    stats: RelayStats,
}

impl<'a> RelayInputUseCase<'a> {
    /// Starts with the mouse released.
    pub fn new(
        capture_keys: CaptureKeys,
        keyboard: &'a mut dyn KeyboardSink,
        mouse: &'a mut dyn MouseSink,
        surface: &'a mut dyn Surface,
    ) -> Self {
        Self {
            capture: CaptureToggle::new(capture_keys),
            keyboard,
            mouse,
            surface,
            stats: RelayStats::default(),
        }
    }

    pub fn is_captured(&self) -> bool {
        self.capture.is_captured()
    }

    pub fn stats(&self) -> RelayStats {
        self.stats
    }

    /// Processes one event.
    pub fn handle_event(&mut self, event: HostEvent) -> Dispatch {
        match event {
            HostEvent::Window(WindowEvent::Exposed) => self.surface.request_repaint(),
            HostEvent::Window(WindowEvent::FocusLost) => {
                if let Some(transition) = self.capture.on_focus_lost() {
                    self.apply(transition);
                }
            }
            HostEvent::Window(_) => {}
            HostEvent::KeyDown(key) => {
                self.capture.on_key_down(key.keycode);
                self.forward_key(&key, true);
            }
            HostEvent::KeyUp(key) => match self.capture.on_key_up(key.keycode) {
                KeyRelease::Toggled(transition) => self.apply(transition),
                KeyRelease::Forward => self.forward_key(&key, false),
            },
            HostEvent::MouseMotion(motion) => {
                if self.capture.is_captured() {
                    let result = self.mouse.process_mouse_motion(&motion);
                    self.record_mouse(result);
                } else {
                    self.stats.dropped += 1;
                }
            }
            HostEvent::MouseWheel(wheel) => {
                if self.capture.is_captured() {
                    let result = self.mouse.process_mouse_wheel(&wheel);
                    self.record_mouse(result);
                } else {
                    self.stats.dropped += 1;
                }
            }
            HostEvent::MouseButtonDown(button) => {
                if self.capture.is_captured() {
                    let result = self.mouse.process_mouse_button(&button, true);
                    self.record_mouse(result);
                } else {
                    self.stats.dropped += 1;
                }
            }
            HostEvent::MouseButtonUp(button) => {
                if self.capture.is_captured() {
                    let result = self.mouse.process_mouse_button(&button, false);
                    self.record_mouse(result);
                } else {
                    // The click that captures the mouse is not relayed.
                    if let Some(transition) = self.capture.on_mouse_button_up() {
                        self.apply(transition);
                    }
                    self.stats.dropped += 1;
                }
            }
            HostEvent::Quit => {
                debug!("user requested to quit");
                return Dispatch::Exit(ExitReason::UserQuit);
            }
            HostEvent::DeviceDisconnected => {
                warn!("device disconnected");
                return Dispatch::Exit(ExitReason::DeviceDisconnected);
            }
        }
        Dispatch::Continue
    }

    /// Mirrors a capture change on the host pointer.
    ///
    /// If the surface refuses, the capture state is rolled back so that it
    /// always matches the host pointer mode.
    fn apply(&mut self, transition: Transition) {
        let captured = transition.to.is_captured();
        match self.surface.set_pointer_capture(captured) {
            Ok(()) => {
                self.stats.capture_toggles += 1;
                debug!(captured, "mouse capture toggled");
            }
            Err(e) => {
                error!("could not set pointer capture: {e}");
                self.capture.force(transition.from);
            }
        }
    }

    fn forward_key(&mut self, key: &KeyEvent, pressed: bool) {
        match self.keyboard.process_key(key, pressed) {
            Ok(()) => self.stats.keys_forwarded += 1,
            Err(e) => log_sink_error(&e),
        }
    }

    fn record_mouse(&mut self, result: Result<(), SinkError>) {
        match result {
            Ok(()) => self.stats.mouse_forwarded += 1,
            Err(e) => log_sink_error(&e),
        }
    }
}

fn log_sink_error(e: &SinkError) {
    warn!("HID sink write failed: {e}");
}

// ── Tests ─────────────────────────────────────────────────────────────────────
