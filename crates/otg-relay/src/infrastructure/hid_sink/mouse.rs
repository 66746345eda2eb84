//! Relayed HID mouse.

use std::sync::Arc;

use otg_core::hid::MouseState;
use otg_core::{
    HidDevice, HidReport, MouseButtonEvent, MouseMotionEvent, MouseReport, MouseWheelEvent,
};
use tracing::{debug, warn};

use super::{MouseSink, SinkError};
use crate::infrastructure::transport::Transport;

/// Most reports written for a single motion event.  Larger deltas are
/// clamped to what this many reports can carry.
pub const MAX_MOTION_REPORTS: i32 = 64;

/// Virtual relative mouse registered on the attached device.
pub struct HidMouse {
    transport: Arc<dyn Transport>,
    state: MouseState,
}

impl HidMouse {
    /// Registers the mouse with the device.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Register`] if the transport refuses the device.
    pub fn init(transport: Arc<dyn Transport>) -> Result<Self, SinkError> {
        transport
            .register_hid(HidDevice::Mouse)
            .map_err(|source| SinkError::Register {
                device: HidDevice::Mouse,
                source,
            })?;
        debug!("HID mouse initialized");
        Ok(Self {
            transport,
            state: MouseState::new(),
        })
    }

    /// Releases any held buttons on the device, then unregisters the mouse.
    pub fn destroy(self) {
        if self.state.buttons() != 0 {
            if let Err(e) = self.write(MouseReport::default()) {
                warn!("could not release held buttons: {e}");
            }
        }
        self.transport.unregister_hid(HidDevice::Mouse);
        debug!("HID mouse destroyed");
    }

    fn write(&self, report: MouseReport) -> Result<(), SinkError> {
        self.transport
            .send_report(HidReport::Mouse(report))
            .map_err(|source| SinkError::Write {
                device: HidDevice::Mouse,
                source,
            })
    }
}

/// Moves `remaining` toward zero by at most one report's worth.
fn take_step(remaining: &mut i32) -> i32 {
    let step = (*remaining).clamp(i8::MIN as i32, i8::MAX as i32);
    *remaining -= step;
    step
}

impl MouseSink for HidMouse {
    /// Writes one report per `i8` step so fast motion is not truncated, up to
    /// [`MAX_MOTION_REPORTS`] reports.
    fn process_mouse_motion(&mut self, event: &MouseMotionEvent) -> Result<(), SinkError> {
        let limit = i8::MAX as i32 * MAX_MOTION_REPORTS;
        let (mut dx, mut dy) = (event.dx.clamp(-limit, limit), event.dy.clamp(-limit, limit));
        if (dx, dy) != (event.dx, event.dy) {
            debug!(dx = event.dx, dy = event.dy, "motion clamped");
        }
        loop {
            let step = MouseMotionEvent {
                dx: take_step(&mut dx),
                dy: take_step(&mut dy),
            };
            self.write(self.state.motion(&step))?;
            if dx == 0 && dy == 0 {
                return Ok(());
            }
        }
    }

    fn process_mouse_button(
        &mut self,
        event: &MouseButtonEvent,
        pressed: bool,
    ) -> Result<(), SinkError> {
        let report = self.state.button(event.button, pressed);
        self.write(report)
    }

    fn process_mouse_wheel(&mut self, event: &MouseWheelEvent) -> Result<(), SinkError> {
        self.write(self.state.wheel(event))
    }
}
