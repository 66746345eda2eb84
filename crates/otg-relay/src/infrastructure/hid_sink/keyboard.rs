//! Relayed HID keyboard.

use std::sync::Arc;

use otg_core::hid::KeyboardState;
use otg_core::{HidDevice, HidReport, KeyEvent};
use tracing::{debug, trace, warn};

use super::{KeyboardSink, SinkError};
use crate::infrastructure::transport::Transport;

/// Virtual keyboard registered on the attached device.
pub struct HidKeyboard {
    transport: Arc<dyn Transport>,
    state: KeyboardState,
}

impl HidKeyboard {
    /// Registers the keyboard with the device.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Register`] if the transport refuses the device.
    pub fn init(transport: Arc<dyn Transport>) -> Result<Self, SinkError> {
        transport
            .register_hid(HidDevice::Keyboard)
            .map_err(|source| SinkError::Register {
                device: HidDevice::Keyboard,
                source,
            })?;
        debug!("HID keyboard initialized");
        Ok(Self {
            transport,
            state: KeyboardState::new(),
        })
    }

    /// Releases every held key on the device, then unregisters the keyboard.
    pub fn destroy(mut self) {
        let report = self.state.report();
        if !report.is_empty() {
            self.state.clear();
            if let Err(e) = self.write() {
                warn!("could not release held keys: {e}");
            }
        }
        self.transport.unregister_hid(HidDevice::Keyboard);
        debug!("HID keyboard destroyed");
    }

    fn write(&self) -> Result<(), SinkError> {
        self.transport
            .send_report(HidReport::Keyboard(self.state.report()))
            .map_err(|source| SinkError::Write {
                device: HidDevice::Keyboard,
                source,
            })
    }
}

impl KeyboardSink for HidKeyboard {
    fn process_key(&mut self, event: &KeyEvent, pressed: bool) -> Result<(), SinkError> {
        // The device repeats held keys itself.
        if pressed && event.repeat {
            trace!(key = %event.keycode, "auto-repeat ignored");
            return Ok(());
        }
        let changed = if pressed {
            self.state.press(event.keycode)
        } else {
            self.state.release(event.keycode)
        };
        // Auto-repeat and stray releases leave the report unchanged.
        if !changed {
            return Ok(());
        }
        self.write()
    }
}
