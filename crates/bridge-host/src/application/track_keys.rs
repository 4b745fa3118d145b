//! KeyEventTracker: the keyboard interception and re-encoding pipeline.
//!
//! This use case is the heart of the host application.  It consumes
//! [`KeyEvent`]s fed in by the hosting front-end, maintains the six-slot set
//! of concurrently pressed keys, disambiguates modifier keys from regular
//! keys, detects the triple-Escape exit gesture, and forwards pressed-set
//! snapshots to the [`HidKeyTransmitter`].
//!
//! # Architecture
//!
//! The tracker depends only on traits (`HidKeyTransmitter`, `OverlayCloser`)
//! and domain types (`PressedKeySet`, `EscGesture`).  All infrastructure is
//! injected at construction time, making the tracker fully unit-testable.
//!
//! # Error philosophy
//!
//! The event path never raises: its caller is the front-end's event loop,
//! which has nowhere to put an error.  Transmitter failures are logged and
//! the pipeline keeps running; the next snapshot supersedes the lost one.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use bridge_core::domain::gesture::{EscGesture, GestureOutcome};
use bridge_core::{HidKey, ModifierFlags, PressedKeySet};

use crate::application::session::SessionFlags;
use crate::infrastructure::event_source::KeyEvent;

/// Hold time between the synthetic CapsLock press and its release, pacing
/// the downstream HID transport.
pub const CAPS_TAP_HOLD: Duration = Duration::from_millis(10);

/// Trait for pushing keyboard state snapshots to the bridge device.
///
/// Infrastructure implementations frame boot reports onto a serial link;
/// test implementations record calls.
#[async_trait]
pub trait HidKeyTransmitter: Send + Sync {
    /// Transmits the pressed-set snapshot with the given held modifiers.
    async fn press(&self, keys: PressedKeySet, modifiers: ModifierFlags) -> Result<(), String>;

    /// Transmits the post-release state: the keys still held, no modifiers.
    async fn release(&self, keys: PressedKeySet) -> Result<(), String>;
}

/// Trait for closing any open area-selection overlay windows.
///
/// The front-end implements this over its window list; returns the number of
/// overlays closed.
#[cfg_attr(test, mockall::automock)]
pub trait OverlayCloser: Send + Sync {
    fn close_selector_overlays(&self) -> usize;
}

/// Classification of a key for tracking purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// Shift/Control/Alt/Meta (either side) or CapsLock: travels in the
    /// modifier byte, never occupies a slot.
    Modifier,
    /// Everything else: tracked in the pressed-key set.
    NonModifier,
}

/// Classifies a key as modifier or non-modifier.
///
/// CapsLock counts as a modifier here even though it is a regular usage at
/// the HID level: it is toggled via a synthetic tap on its edge, never
/// tracked as a held key.
pub fn classify(key: HidKey) -> KeyClass {
    if key.is_modifier() || key == HidKey::CapsLock {
        KeyClass::Modifier
    } else {
        KeyClass::NonModifier
    }
}

/// The key-event tracking use case.
///
/// Mutated only from the single task draining the event channel; see the
/// event source module for the threading contract.
pub struct KeyEventTracker {
    pressed: PressedKeySet,
    /// Baseline modifier state from the last observed change while
    /// controlling; used for CapsLock edge detection.
    modifiers: ModifierFlags,
    gesture: EscGesture,
    session: Arc<SessionFlags>,
    transmitter: Arc<dyn HidKeyTransmitter>,
    overlays: Arc<dyn OverlayCloser>,
}

impl KeyEventTracker {
    /// Creates a tracker with its collaborators injected.
    pub fn new(
        session: Arc<SessionFlags>,
        transmitter: Arc<dyn HidKeyTransmitter>,
        overlays: Arc<dyn OverlayCloser>,
    ) -> Self {
        Self {
            pressed: PressedKeySet::new(),
            modifiers: ModifierFlags::empty(),
            gesture: EscGesture::new(),
            session,
            transmitter,
            overlays,
        }
    }

    /// The current pressed-set snapshot.
    pub fn pressed_keys(&self) -> PressedKeySet {
        self.pressed
    }

    pub(crate) fn session(&self) -> &Arc<SessionFlags> {
        &self.session
    }

    pub(crate) fn transmitter(&self) -> &Arc<dyn HidKeyTransmitter> {
        &self.transmitter
    }

    /// Handles one event from the front-end.
    ///
    /// Returns `true` if the event should be consumed (hidden from the host
    /// OS's default handling).
    pub async fn handle_event(&mut self, event: KeyEvent) -> bool {
        match event {
            KeyEvent::Down {
                key,
                modifiers,
                timestamp,
            } => self.on_key_down(key, modifiers, timestamp).await,
            KeyEvent::Up { key } => self.on_key_up(key).await,
            KeyEvent::ModifierChange { modifiers } => {
                self.on_modifier_change(modifiers).await;
                // Modifier events are observed, never withheld from the host.
                false
            }
        }
    }

    // ── Private event handlers ────────────────────────────────────────────────

    async fn on_modifier_change(&mut self, flags: ModifierFlags) {
        debug!(modifiers = %flags, "modifier flags changed");
        if !self.session.is_controlling() {
            return;
        }

        // Edge detection against the previously recorded baseline: CapsLock
        // is a toggle, so only the inactive-to-active transition matters.
        let caps_rising = flags.contains(ModifierFlags::CAPS_LOCK)
            && !self.modifiers.contains(ModifierFlags::CAPS_LOCK);
        self.modifiers = flags;

        // Modifier and regular key events arrive separately; re-emitting the
        // held keys under the new flags is what makes "hold a key, then press
        // Shift" produce a shifted keystroke downstream.
        if self.pressed.has_regular_keys() {
            if let Err(e) = self.transmitter.press(self.pressed, flags).await {
                warn!("failed to re-emit pressed keys: {e}");
            }
        }

        if caps_rising {
            self.tap_caps_lock().await;
        }
    }

    /// Sends the synthetic CapsLock press/release pair that toggles the
    /// target's lock state.
    async fn tap_caps_lock(&self) {
        let caps = PressedKeySet::single(HidKey::CapsLock);
        if let Err(e) = self.transmitter.press(caps, ModifierFlags::empty()).await {
            warn!("failed to press CapsLock: {e}");
            return;
        }
        tokio::time::sleep(CAPS_TAP_HOLD).await;
        if let Err(e) = self.transmitter.release(self.pressed).await {
            warn!("failed to release CapsLock: {e}");
        }
    }

    async fn on_key_down(&mut self, key: HidKey, modifiers: ModifierFlags, timestamp: f64) -> bool {
        debug!(key = ?key, modifiers = %modifiers, "key pressed");

        if key == HidKey::Escape {
            self.on_escape_down(timestamp);
            // Escape always passes through to the host, gesture or not.
            return false;
        }

        let consumed = self.session.is_capture();

        if !self.session.is_controlling() || classify(key) == KeyClass::Modifier {
            return consumed;
        }

        if self.pressed.clear_modifier_residue() {
            warn!("cleared modifier residue from pressed-key set");
        }

        if self.pressed.contains(key) {
            // OS auto-repeat: the set is unchanged, the snapshot is re-sent.
            self.emit_press(modifiers).await;
        } else if self.pressed.insert(key) {
            self.emit_press(modifiers).await;
        } else {
            // All six slots occupied: the key is dropped and nothing is
            // transmitted.  Its eventual release will be a no-op.
            debug!(key = ?key, "pressed-key set saturated; key dropped");
        }

        consumed
    }

    fn on_escape_down(&mut self, timestamp: f64) {
        let closed = self.overlays.close_selector_overlays();
        if closed > 0 {
            debug!(closed, "closed area-selector overlays");
            self.session.set_ocr_overlay_active(false);
        }

        match self.gesture.register_press(timestamp) {
            GestureOutcome::Completed => {
                info!("exit gesture detected; requesting session exit");
                self.session.request_exit();
            }
            GestureOutcome::Pending { presses } => {
                debug!(presses, "escape gesture pending");
            }
        }
    }

    async fn on_key_up(&mut self, key: HidKey) -> bool {
        let consumed = self.session.is_capture();

        if !self.session.is_controlling() || classify(key) == KeyClass::Modifier {
            return consumed;
        }

        if self.pressed.release(key) {
            if let Err(e) = self.transmitter.release(self.pressed).await {
                warn!("failed to transmit key release: {e}");
            }
        }
        // A key not in the set was dropped at saturation or pressed before
        // capture began; its release is silently ignored.

        consumed
    }

    async fn emit_press(&self, modifiers: ModifierFlags) {
        if let Err(e) = self.transmitter.press(self.pressed, modifiers).await {
            warn!("failed to transmit key press: {e}");
        }
    }
}

/// Drains `events` into the tracker until the channel closes or the exit
/// gesture fires.
///
/// The hosting front-end runs this on a dedicated task, feeding the sending
/// side from its event monitor.
pub async fn run_event_loop(mut events: UnboundedReceiver<KeyEvent>, tracker: &mut KeyEventTracker) {
    while let Some(event) = events.recv().await {
        tracker.handle_event(event).await;
        if tracker.session().exit_requested() {
            info!("exit requested; leaving event loop");
            break;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
