//! Mouse-capture toggle state machine.
//!
//! While the mouse is *captured*, pointer events are relayed to the device
//! and the host cursor is confined to the window.  While *released*, pointer
//! events stay with the host.
//!
//! # The toggle gesture
//!
//! Pressing and releasing a single capture key (by default left Alt, left
//! Meta or right Meta) toggles capture.  The gesture is deliberately narrow:
//!
//! ```text
//! LeftAlt down, LeftAlt up                -> toggle
//! LeftAlt down, Tab down, Tab up, ...     -> no toggle (Tab up clears pending)
//! LeftAlt down, RightMeta down, ...       -> no toggle (second candidate cancels)
//! ```
//!
//! Additionally, losing window focus always releases the mouse, and clicking
//! into the window while released captures it.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::keymap::Keycode;

/// Whether pointer input is currently relayed to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Released,
    Captured,
}

impl CaptureState {
    pub fn is_captured(self) -> bool {
        self == CaptureState::Captured
    }

    fn toggled(self) -> CaptureState {
        match self {
            CaptureState::Released => CaptureState::Captured,
            CaptureState::Captured => CaptureState::Released,
        }
    }
}

/// A change of [`CaptureState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: CaptureState,
    pub to: CaptureState,
}

/// Outcome of a key release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRelease {
    /// The release completed a toggle gesture; do not relay the key-up.
    Toggled(Transition),
    /// Not a gesture; relay the key-up normally.
    Forward,
}

/// The set of keys that can start a capture-toggle gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptureKeys(Vec<Keycode>);

impl CaptureKeys {
    pub fn new(keys: impl IntoIterator<Item = Keycode>) -> Self {
        let mut keys: Vec<Keycode> = keys.into_iter().collect();
        keys.sort();
        keys.dedup();
        Self(keys)
    }

    pub fn contains(&self, key: Keycode) -> bool {
        self.0.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Keycode> + '_ {
        self.0.iter().copied()
    }
}

impl Default for CaptureKeys {
    fn default() -> Self {
        Self::new([Keycode::LEFT_ALT, Keycode::LEFT_META, Keycode::RIGHT_META])
    }
}

/// Tracks [`CaptureState`] and the pending capture key.
#[derive(Debug, Clone)]
pub struct CaptureToggle {
    keys: CaptureKeys,
    state: CaptureState,
    pending: Option<Keycode>,
}

impl CaptureToggle {
    /// Starts released, with no pending key.
    pub fn new(keys: CaptureKeys) -> Self {
        Self {
            keys,
            state: CaptureState::Released,
            pending: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_captured(&self) -> bool {
        self.state.is_captured()
    }

    /// The capture key currently held as a gesture candidate.
    pub fn pending(&self) -> Option<Keycode> {
        self.pending
    }

    /// Records a key press.
    ///
    /// The first candidate pressed becomes pending.  A *different* candidate
    /// pressed while one is pending aborts the gesture.  Auto-repeat of the
    /// pending key leaves it pending.
    pub fn on_key_down(&mut self, key: Keycode) {
        if !self.keys.contains(key) {
            return;
        }
        match self.pending {
            None => {
                trace!("capture key {key} pending");
                self.pending = Some(key);
            }
            Some(held) if held == key => {}
            Some(held) => {
                trace!("capture gesture cancelled ({held} then {key})");
                self.pending = None;
            }
        }
    }

    /// Records a key release.
    ///
    /// Always clears the pending key.  If the released key is the one that
    /// was pending, capture is toggled.
    pub fn on_key_up(&mut self, key: Keycode) -> KeyRelease {
        match self.pending.take() {
            Some(held) if held == key => KeyRelease::Toggled(self.set(self.state.toggled())),
            _ => KeyRelease::Forward,
        }
    }

    /// Releases the mouse.  Returns `None` if it was already released.
    pub fn on_focus_lost(&mut self) -> Option<Transition> {
        self.change_to(CaptureState::Released)
    }

    /// Click-to-capture: while released, a button release captures the mouse.
    ///
    /// Returns `None` when already captured, meaning the click is relayed.
    pub fn on_mouse_button_up(&mut self) -> Option<Transition> {
        self.change_to(CaptureState::Captured)
    }

    /// Overwrites the state without touching the pending key.
    pub fn force(&mut self, state: CaptureState) {
        self.state = state;
    }

    fn change_to(&mut self, state: CaptureState) -> Option<Transition> {
        (self.state != state).then(|| self.set(state))
    }

    fn set(&mut self, to: CaptureState) -> Transition {
        let transition = Transition {
            from: self.state,
            to,
        };
        self.state = to;
        trace!("capture {:?} -> {:?}", transition.from, transition.to);
        transition
    }
}

impl Default for CaptureToggle {
    fn default() -> Self {
        Self::new(CaptureKeys::default())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
