//! Mock event source for unit and integration testing.
//!
//! Allows tests to inject synthetic [`KeyEvent`]s without a windowing system
//! or a front-end event monitor.

use std::sync::Mutex;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::{CaptureError, EventSource, KeyEvent};

/// A mock implementation of [`EventSource`] that lets tests inject events.
pub struct MockEventSource {
    sender: Mutex<Option<UnboundedSender<KeyEvent>>>,
}

impl MockEventSource {
    /// Creates a new mock event source.
    pub fn new() -> Self {
        Self {
            sender: Mutex::new(None),
        }
    }

    /// Injects a synthetic event, as if delivered by the OS monitor.
    ///
    /// Panics if `start()` has not been called or `stop()` has been called.
    pub fn inject_event(&self, event: KeyEvent) {
        let guard = self.sender.lock().expect("lock poisoned");
        match guard.as_ref() {
            Some(sender) => sender
                .send(event)
                .expect("receiver has been dropped; call start() first"),
            None => panic!("MockEventSource::inject_event called before start()"),
        }
    }
}

impl Default for MockEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for MockEventSource {
    fn start(&self) -> Result<UnboundedReceiver<KeyEvent>, CaptureError> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.sender.lock().expect("lock poisoned") = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        // Drop the sender to close the channel
        *self.sender.lock().expect("lock poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::{HidKey, ModifierFlags};

    #[test]
    fn test_mock_event_source_starts_and_receives_events() {
        // Arrange
        let source = MockEventSource::new();
        let mut rx = source.start().expect("start should succeed");

        // Act
        source.inject_event(KeyEvent::Down {
            key: HidKey::KeyA,
            modifiers: ModifierFlags::empty(),
            timestamp: 0.0,
        });

        // Assert
        let event = rx.try_recv().expect("should receive event");
        assert!(matches!(event, KeyEvent::Down { key: HidKey::KeyA, .. }));
    }

    #[test]
    fn test_mock_event_source_stop_closes_channel() {
        // Arrange
        let source = MockEventSource::new();
        let mut rx = source.start().expect("start should succeed");

        // Act
        source.stop();

        // Assert — channel should be disconnected
        assert!(rx.try_recv().is_err(), "channel should be closed after stop()");
    }

    #[test]
    fn test_mock_event_source_preserves_event_order() {
        // Arrange
        let source = MockEventSource::new();
        let mut rx = source.start().expect("start should succeed");

        // Act
        source.inject_event(KeyEvent::ModifierChange {
            modifiers: ModifierFlags::SHIFT,
        });
        source.inject_event(KeyEvent::Down {
            key: HidKey::KeyB,
            modifiers: ModifierFlags::SHIFT,
            timestamp: 1.0,
        });
        source.inject_event(KeyEvent::Up { key: HidKey::KeyB });

        // Assert
        assert!(matches!(
            rx.try_recv().unwrap(),
            KeyEvent::ModifierChange { .. }
        ));
        assert!(matches!(rx.try_recv().unwrap(), KeyEvent::Down { .. }));
        assert!(matches!(rx.try_recv().unwrap(), KeyEvent::Up { .. }));
    }
}
