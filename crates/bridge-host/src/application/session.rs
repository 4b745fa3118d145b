//! Shared session flags read and written across the pipeline.
//!
//! All flags are plain atomics: they are written from the UI thread, the
//! event tracker, and observed by the shutdown loop, but none of them
//! participates in any ordering-sensitive protocol, so `Relaxed` loads and
//! stores are sufficient throughout.

use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide control-session state.
///
/// Shared as `Arc<SessionFlags>` between the tracker, the injection entry
/// points, and the application shell.
#[derive(Debug)]
pub struct SessionFlags {
    /// Whether the host currently owns the target's input focus.  All key
    /// forwarding is gated on this.
    controlling: AtomicBool,
    /// Whether non-Escape key events are consumed (hidden from the host OS)
    /// regardless of forwarding.
    capture: AtomicBool,
    /// Set by the triple-Escape gesture; observed by the application shell
    /// to end the control session.
    exit_requested: AtomicBool,
    /// Whether an area-selection OCR overlay is currently open.
    ocr_overlay_active: AtomicBool,
}

impl SessionFlags {
    /// Creates the flag set with the given initial control/capture state.
    pub fn new(controlling: bool, capture: bool) -> Self {
        Self {
            controlling: AtomicBool::new(controlling),
            capture: AtomicBool::new(capture),
            exit_requested: AtomicBool::new(false),
            ocr_overlay_active: AtomicBool::new(false),
        }
    }

    pub fn is_controlling(&self) -> bool {
        self.controlling.load(Ordering::Relaxed)
    }

    pub fn set_controlling(&self, value: bool) {
        self.controlling.store(value, Ordering::Relaxed);
    }

    pub fn is_capture(&self) -> bool {
        self.capture.load(Ordering::Relaxed)
    }

    pub fn set_capture(&self, value: bool) {
        self.capture.store(value, Ordering::Relaxed);
    }

    pub fn request_exit(&self) {
        self.exit_requested.store(true, Ordering::Relaxed);
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested.load(Ordering::Relaxed)
    }

    pub fn is_ocr_overlay_active(&self) -> bool {
        self.ocr_overlay_active.load(Ordering::Relaxed)
    }

    pub fn set_ocr_overlay_active(&self, value: bool) {
        self.ocr_overlay_active.store(value, Ordering::Relaxed);
    }
}

impl Default for SessionFlags {
    /// Controlling, not capturing — the state the session opens in.
    fn default() -> Self {
        Self::new(true, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_controlling_and_not_capturing() {
        let flags = SessionFlags::default();
        assert!(flags.is_controlling());
        assert!(!flags.is_capture());
        assert!(!flags.exit_requested());
        assert!(!flags.is_ocr_overlay_active());
    }

    #[test]
    fn test_exit_request_is_sticky() {
        let flags = SessionFlags::default();
        flags.request_exit();
        assert!(flags.exit_requested());
        assert!(flags.exit_requested(), "reading must not clear the flag");
    }

    #[test]
    fn test_flags_toggle_independently() {
        let flags = SessionFlags::new(false, true);
        assert!(!flags.is_controlling());
        assert!(flags.is_capture());

        flags.set_controlling(true);
        flags.set_capture(false);
        assert!(flags.is_controlling());
        assert!(!flags.is_capture());
    }
}
