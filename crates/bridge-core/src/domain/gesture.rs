//! Triple-Escape exit gesture detection.
//!
//! Three Escape presses landing within a rolling 2-second window request an
//! exit from the control session.  The window is measured from the *first*
//! press of the current run, not pairwise between presses: presses at
//! t = 0.0, 1.9 and 1.95 complete the gesture, presses at t = 0.0, 1.9 and
//! 2.1 do not.
//!
//! Timestamps are the windowing system's event timestamps in seconds (a
//! monotonic `f64`); only differences are ever computed, so the epoch does
//! not matter.

use tracing::debug;

/// Number of presses that completes the gesture.
pub const EXIT_PRESS_COUNT: u32 = 3;

/// Width of the rolling window in seconds, measured from the first press of
/// the current run.  A press with elapsed time strictly less than this is
/// inside the window; exactly equal is outside.
pub const PRESS_WINDOW_SECS: f64 = 2.0;

/// Result of registering one press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The run is still accumulating presses.
    Pending {
        /// Presses registered in the current run, including this one.
        presses: u32,
    },
    /// The gesture completed; the counter has been reset.
    Completed,
}

/// State of the rolling-window press counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscGesture {
    press_count: u32,
    window_start: f64,
}

impl EscGesture {
    /// Creates a detector with no presses registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a press at `timestamp` (seconds).
    ///
    /// A press arriving at or after the window boundary abandons the current
    /// run and starts a new one at count 1.
    pub fn register_press(&mut self, timestamp: f64) -> GestureOutcome {
        if self.press_count > 0 && timestamp - self.window_start >= PRESS_WINDOW_SECS {
            debug!(
                elapsed = timestamp - self.window_start,
                "press window elapsed; restarting run"
            );
            self.press_count = 0;
        }
        if self.press_count == 0 {
            self.window_start = timestamp;
        }
        self.press_count += 1;

        if self.press_count >= EXIT_PRESS_COUNT {
            self.press_count = 0;
            GestureOutcome::Completed
        } else {
            GestureOutcome::Pending {
                presses: self.press_count,
            }
        }
    }

    /// Presses registered in the current run.
    pub fn press_count(&self) -> u32 {
        self.press_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_presses_inside_window_complete_the_gesture() {
        // Arrange
        let mut gesture = EscGesture::new();

        // Act / Assert
        assert_eq!(
            gesture.register_press(0.0),
            GestureOutcome::Pending { presses: 1 }
        );
        assert_eq!(
            gesture.register_press(0.5),
            GestureOutcome::Pending { presses: 2 }
        );
        assert_eq!(gesture.register_press(1.9), GestureOutcome::Completed);

        // Counter resets after completion
        assert_eq!(gesture.press_count(), 0);
    }

    #[test]
    fn test_third_press_outside_window_starts_a_new_run() {
        // Arrange
        let mut gesture = EscGesture::new();
        gesture.register_press(0.0);
        gesture.register_press(0.5);

        // Act — 2.1 s after the first press of the run
        let outcome = gesture.register_press(2.1);

        // Assert — not completed; a fresh run begins at count 1
        assert_eq!(outcome, GestureOutcome::Pending { presses: 1 });
        assert_eq!(gesture.press_count(), 1);
    }

    #[test]
    fn test_press_at_exact_window_boundary_is_outside() {
        // Arrange — the window test is strictly less-than, so an elapsed time
        // of exactly 2.0 s restarts the run
        let mut gesture = EscGesture::new();
        gesture.register_press(0.0);
        gesture.register_press(0.5);

        // Act
        let outcome = gesture.register_press(2.0);

        // Assert
        assert_eq!(outcome, GestureOutcome::Pending { presses: 1 });
    }

    #[test]
    fn test_press_just_inside_boundary_counts() {
        let mut gesture = EscGesture::new();
        gesture.register_press(0.0);
        gesture.register_press(0.5);
        assert_eq!(
            gesture.register_press(1.9999999),
            GestureOutcome::Completed
        );
    }

    #[test]
    fn test_window_is_measured_from_first_press_not_pairwise() {
        // Arrange — consecutive presses are each < 2 s apart, but the third
        // lands 2.4 s after the run started
        let mut gesture = EscGesture::new();
        gesture.register_press(0.0);
        gesture.register_press(1.2);

        // Act
        let outcome = gesture.register_press(2.4);

        // Assert — pairwise gaps would allow it; the run window does not
        assert_eq!(outcome, GestureOutcome::Pending { presses: 1 });
    }

    #[test]
    fn test_restarted_run_can_complete() {
        // Arrange — a stale press long ago
        let mut gesture = EscGesture::new();
        gesture.register_press(0.0);

        // Act — a fresh burst well outside the first window
        gesture.register_press(10.0);
        gesture.register_press(10.1);
        let outcome = gesture.register_press(10.2);

        // Assert
        assert_eq!(outcome, GestureOutcome::Completed);
    }

    #[test]
    fn test_gesture_can_fire_repeatedly() {
        let mut gesture = EscGesture::new();
        for burst_start in [0.0, 100.0] {
            gesture.register_press(burst_start);
            gesture.register_press(burst_start + 0.1);
            assert_eq!(
                gesture.register_press(burst_start + 0.2),
                GestureOutcome::Completed
            );
        }
    }
}
