//! Text and special-key injection: paste-style typing on the target.
//!
//! Each character becomes a full press/release pair with fixed settle delays
//! pacing the serial HID transport.  The sequences run on whatever task calls
//! them; they await between taps, so a caller wanting a responsive event loop
//! dispatches them to their own task (and can cancel a long paste by aborting
//! it).

use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;
use tracing::debug;

use bridge_core::{HidKey, KeyMapper, ModifierFlags, PressedKeySet, SpecialKey};

use crate::application::track_keys::KeyEventTracker;

/// Hold time between a tap's press and its release.
pub const PRESS_SETTLE: Duration = Duration::from_millis(5);

/// Pause after a tap's release before the next tap begins.
pub const RELEASE_SETTLE: Duration = Duration::from_millis(10);

/// Error type for injection operations.
///
/// Unmapped characters and special keys are not errors — they are skipped
/// silently.  Only transport failures surface here.
#[derive(Debug, Error)]
pub enum InjectError {
    #[error("transmitter error: {0}")]
    Transmit(String),
}

impl KeyEventTracker {
    /// Types `text` on the target, one press/release pair per character.
    ///
    /// Characters with no key mapping are skipped; nothing is transmitted
    /// for them.  Shift is held for uppercase letters and shifted symbols.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::Transmit`] if the transmitter fails; the
    /// remaining characters are not sent.
    pub async fn send_text(&self, text: &str) -> Result<(), InjectError> {
        for c in text.chars() {
            let Some(key) = KeyMapper::key_for_char(c) else {
                debug!(character = ?c, "no key mapping; character skipped");
                continue;
            };
            let modifiers = if KeyMapper::needs_shift(c) {
                ModifierFlags::SHIFT
            } else {
                ModifierFlags::empty()
            };
            self.tap_key(key, modifiers).await?;
        }
        Ok(())
    }

    /// Injects a named special key or chord.
    ///
    /// A code with no key mapping is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::Transmit`] if the transmitter fails.
    pub async fn send_special_key(&self, code: SpecialKey) -> Result<(), InjectError> {
        let Some((key, modifiers)) = KeyMapper::chord_for_special(code) else {
            debug!(code = ?code, "no key mapping for special key");
            return Ok(());
        };
        self.tap_key(key, modifiers).await
    }

    /// One press/delay/release/delay tap.
    ///
    /// The release carries the tracker's live pressed set, so keys the user
    /// is physically holding survive an injection running alongside them.
    async fn tap_key(&self, key: HidKey, modifiers: ModifierFlags) -> Result<(), InjectError> {
        self.transmitter()
            .press(PressedKeySet::single(key), modifiers)
            .await
            .map_err(InjectError::Transmit)?;
        sleep(PRESS_SETTLE).await;
        self.transmitter()
            .release(self.pressed_keys())
            .await
            .map_err(InjectError::Transmit)?;
        sleep(RELEASE_SETTLE).await;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::application::session::SessionFlags;
    use crate::application::track_keys::{HidKeyTransmitter, OverlayCloser};

    // ── Test doubles ──────────────────────────────────────────────────────────

    /// A transmitter that records presses and releases in one interleaved log,
    /// so ordering across the two call types can be asserted.
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Press(PressedKeySet, ModifierFlags),
        Release(PressedKeySet),
    }

    #[derive(Default)]
    struct SequencedTransmitter {
        log: Mutex<Vec<Call>>,
    }

    #[async_trait]
    impl HidKeyTransmitter for SequencedTransmitter {
        async fn press(
            &self,
            keys: PressedKeySet,
            modifiers: ModifierFlags,
        ) -> Result<(), String> {
            self.log.lock().unwrap().push(Call::Press(keys, modifiers));
            Ok(())
        }

        async fn release(&self, keys: PressedKeySet) -> Result<(), String> {
            self.log.lock().unwrap().push(Call::Release(keys));
            Ok(())
        }
    }

    struct NoOverlays;

    impl OverlayCloser for NoOverlays {
        fn close_selector_overlays(&self) -> usize {
            0
        }
    }

    fn make_tracker() -> (KeyEventTracker, Arc<SequencedTransmitter>) {
        let transmitter = Arc::new(SequencedTransmitter::default());
        let tracker = KeyEventTracker::new(
            Arc::new(SessionFlags::default()),
            Arc::clone(&transmitter) as Arc<dyn HidKeyTransmitter>,
            Arc::new(NoOverlays),
        );
        (tracker, transmitter)
    }

    fn pressed_key(call: &Call) -> Option<(HidKey, ModifierFlags)> {
        match call {
            Call::Press(keys, modifiers) => {
                HidKey::from_u8(keys.slots()[0]).map(|key| (key, *modifiers))
            }
            Call::Release(_) => None,
        }
    }

    // ── send_text ─────────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_send_text_issues_press_release_pairs_in_order() {
        // Arrange
        let (tracker, tx) = make_tracker();

        // Act — 'H' shifted, 'i' plain, '!' shifted via the symbol table
        tracker.send_text("Hi!").await.unwrap();

        // Assert — three pairs, strictly alternating press/release
        let log = tx.log.lock().unwrap();
        assert_eq!(log.len(), 6);
        let expected = [
            (HidKey::KeyH, ModifierFlags::SHIFT),
            (HidKey::KeyI, ModifierFlags::empty()),
            (HidKey::Digit1, ModifierFlags::SHIFT),
        ];
        for (pair, expected) in log.chunks(2).zip(expected) {
            assert_eq!(pressed_key(&pair[0]), Some(expected));
            assert!(matches!(pair[1], Call::Release(_)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_text_release_carries_live_pressed_set() {
        // Arrange — the tracker's own set is empty, so each release is empty
        let (tracker, tx) = make_tracker();

        // Act
        tracker.send_text("a").await.unwrap();

        // Assert
        let log = tx.log.lock().unwrap();
        assert_eq!(log[1], Call::Release(PressedKeySet::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_text_skips_unmapped_characters() {
        // Arrange
        let (tracker, tx) = make_tracker();

        // Act — the euro sign has no key mapping
        tracker.send_text("a€b").await.unwrap();

        // Assert — exactly two taps, nothing partial for the skipped char
        let log = tx.log.lock().unwrap();
        assert_eq!(log.len(), 4);
        assert_eq!(pressed_key(&log[0]), Some((HidKey::KeyA, ModifierFlags::empty())));
        assert_eq!(pressed_key(&log[2]), Some((HidKey::KeyB, ModifierFlags::empty())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_text_empty_string_sends_nothing() {
        let (tracker, tx) = make_tracker();
        tracker.send_text("").await.unwrap();
        assert!(tx.log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_text_stops_on_transmit_failure() {
        // Arrange
        struct FailingTransmitter;

        #[async_trait]
        impl HidKeyTransmitter for FailingTransmitter {
            async fn press(&self, _: PressedKeySet, _: ModifierFlags) -> Result<(), String> {
                Err("bridge unplugged".to_string())
            }
            async fn release(&self, _: PressedKeySet) -> Result<(), String> {
                Err("bridge unplugged".to_string())
            }
        }

        let tracker = KeyEventTracker::new(
            Arc::new(SessionFlags::default()),
            Arc::new(FailingTransmitter) as Arc<dyn HidKeyTransmitter>,
            Arc::new(NoOverlays),
        );

        // Act / Assert
        let result = tracker.send_text("abc").await;
        assert!(matches!(result, Err(InjectError::Transmit(_))));
    }

    // ── send_special_key ──────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_send_special_key_ctrl_alt_delete() {
        // Arrange
        let (tracker, tx) = make_tracker();

        // Act
        tracker
            .send_special_key(SpecialKey::CtrlAltDelete)
            .await
            .unwrap();

        // Assert — Delete pressed under Ctrl+Alt, then released
        let log = tx.log.lock().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(
            pressed_key(&log[0]),
            Some((HidKey::Delete, ModifierFlags::CONTROL | ModifierFlags::ALT))
        );
        assert!(matches!(log[1], Call::Release(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_special_key_function_key_has_no_modifiers() {
        let (tracker, tx) = make_tracker();
        tracker.send_special_key(SpecialKey::F5).await.unwrap();
        let log = tx.log.lock().unwrap();
        assert_eq!(pressed_key(&log[0]), Some((HidKey::F5, ModifierFlags::empty())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_special_key_meta_resolves_to_gui_key() {
        let (tracker, tx) = make_tracker();
        tracker.send_special_key(SpecialKey::Meta).await.unwrap();
        let log = tx.log.lock().unwrap();
        assert_eq!(pressed_key(&log[0]), Some((HidKey::MetaLeft, ModifierFlags::empty())));
    }
}
