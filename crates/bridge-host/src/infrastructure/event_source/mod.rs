//! Key event sourcing infrastructure for the host application.
//!
//! The tracker does not install OS event monitors itself: the hosting
//! front-end owns the windowing system's local event monitor, translates
//! each callback into a [`KeyEvent`], and feeds it through the channel an
//! [`EventSource`] hands out.  This keeps the tracker host-framework-agnostic
//! and unit-testable without a live event loop.
//!
//! # Threading
//!
//! The OS delivers key and modifier callbacks serially on its UI dispatch
//! thread; the channel preserves that order, and the tracker consumes it from
//! a single task.  Nothing in the pipeline requires locking as long as that
//! single-consumer discipline holds.

use tokio::sync::mpsc::UnboundedReceiver;

use bridge_core::{HidKey, ModifierFlags};

pub mod mock;

/// A key event produced by the hosting front-end's event monitor.
///
/// `timestamp` is the windowing system's event timestamp in seconds; it is
/// only ever compared against other timestamps from the same source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyEvent {
    /// A key was pressed down.
    Down {
        key: HidKey,
        /// Live modifier flags at the moment of the event.
        modifiers: ModifierFlags,
        /// Event timestamp in seconds (monotonic).
        timestamp: f64,
    },
    /// A key was released.
    Up { key: HidKey },
    /// The live modifier-key state changed (including CapsLock toggles).
    ModifierChange { modifiers: ModifierFlags },
}

/// Error type for event source operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to install local event monitor: {0}")]
    MonitorInstallFailed(String),
    #[error("event source has already been stopped")]
    AlreadyStopped,
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// Trait abstracting key event production.
///
/// The production implementation wraps the front-end's event monitor; tests
/// use [`mock::MockEventSource`].
pub trait EventSource: Send {
    /// Starts the event source and returns the receiver for its events.
    fn start(&self) -> Result<UnboundedReceiver<KeyEvent>, CaptureError>;
    /// Stops the event source and releases its monitor registration.
    fn stop(&self);
}
