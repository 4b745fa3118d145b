//! Host modifier state and USB boot-protocol keyboard report encoding.
//!
//! # The boot-protocol report (for beginners)
//!
//! Every keyboard state change is ultimately transmitted as a fixed 8-byte
//! record defined by the USB HID boot protocol:
//!
//! ```text
//! Byte 0: modifier bitfield (bit 0 = Left Ctrl … bit 7 = Right GUI)
//! Byte 1: reserved, always 0x00
//! Bytes 2–7: up to 6 simultaneous key usages; 0x00 = "no event"
//! ```
//!
//! The report carries *state*, not edges: a key press is "a report that now
//! contains the key", a release is "a report that no longer does".  That is
//! why the tracker forwards whole pressed-set snapshots instead of individual
//! up/down events.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::domain::keyset::PressedKeySet;

/// Size of a boot-protocol keyboard report in bytes.
pub const REPORT_SIZE: usize = 8;

// ── Modifier flags ────────────────────────────────────────────────────────────

/// The host's live modifier-key state, as reported by the windowing system.
///
/// The low nibble mirrors the boot-report modifier byte (left-hand bits; the
/// host OS does not distinguish sides in its flag mask).  CapsLock is a host
/// *toggle* flag, not a HID modifier bit, and is masked out of the wire byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModifierFlags(pub u8);

impl ModifierFlags {
    /// Control key held.
    pub const CONTROL: ModifierFlags = ModifierFlags(0x01);
    /// Shift key held.
    pub const SHIFT: ModifierFlags = ModifierFlags(0x02);
    /// Option/Alt key held.
    pub const ALT: ModifierFlags = ModifierFlags(0x04);
    /// Command/GUI key held.
    pub const META: ModifierFlags = ModifierFlags(0x08);
    /// CapsLock toggle currently active (host-side only, never transmitted).
    pub const CAPS_LOCK: ModifierFlags = ModifierFlags(0x10);

    /// No modifiers active.
    pub fn empty() -> Self {
        ModifierFlags(0)
    }

    /// Returns `true` if every flag in `other` is set in `self`.
    pub fn contains(self, other: ModifierFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no flags are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The byte transmitted as byte 0 of the boot report.
    ///
    /// CapsLock is excluded: the target toggles its own lock state when it
    /// receives the synthetic CapsLock key tap.
    pub fn report_byte(self) -> u8 {
        self.0 & 0x0F
    }
}

impl BitOr for ModifierFlags {
    type Output = ModifierFlags;

    fn bitor(self, rhs: ModifierFlags) -> ModifierFlags {
        ModifierFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for ModifierFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(ModifierFlags::CONTROL) {
            names.push("Ctrl");
        }
        if self.contains(ModifierFlags::ALT) {
            names.push("Alt");
        }
        if self.contains(ModifierFlags::META) {
            names.push("Cmd");
        }
        if self.contains(ModifierFlags::SHIFT) {
            names.push("Shift");
        }
        if self.contains(ModifierFlags::CAPS_LOCK) {
            names.push("CapsLock");
        }
        if names.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", names.join(", "))
        }
    }
}

// ── Boot report ───────────────────────────────────────────────────────────────

/// A fully assembled boot-protocol keyboard report, ready for framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootKeyboardReport {
    /// Modifier bitfield (byte 0 of the wire format).
    pub modifier: u8,
    /// The six key slots; empty slots are 0x00 on the wire.
    pub keys: [u8; 6],
}

impl BootKeyboardReport {
    /// Builds a report from a pressed-set snapshot and the live modifier state.
    pub fn new(keys: &PressedKeySet, modifiers: ModifierFlags) -> Self {
        Self {
            modifier: modifiers.report_byte(),
            keys: keys.report_slots(),
        }
    }

    /// Serialises the report into its 8-byte wire form.
    pub fn as_bytes(&self) -> [u8; REPORT_SIZE] {
        let mut bytes = [0u8; REPORT_SIZE];
        bytes[0] = self.modifier;
        // bytes[1] is the reserved byte, always 0x00
        bytes[2..].copy_from_slice(&self.keys);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::hid::HidKey;

    // ── ModifierFlags ─────────────────────────────────────────────────────────

    #[test]
    fn test_modifier_flags_union_and_contains() {
        let flags = ModifierFlags::CONTROL | ModifierFlags::ALT;
        assert!(flags.contains(ModifierFlags::CONTROL));
        assert!(flags.contains(ModifierFlags::ALT));
        assert!(!flags.contains(ModifierFlags::SHIFT));
        assert!(!flags.contains(ModifierFlags::CONTROL | ModifierFlags::SHIFT));
    }

    #[test]
    fn test_caps_lock_is_masked_out_of_report_byte() {
        let flags = ModifierFlags::SHIFT | ModifierFlags::CAPS_LOCK;
        assert_eq!(flags.report_byte(), 0x02);
        assert_eq!(ModifierFlags::CAPS_LOCK.report_byte(), 0x00);
    }

    #[test]
    fn test_display_lists_active_modifiers() {
        let flags = ModifierFlags::CONTROL | ModifierFlags::SHIFT;
        assert_eq!(flags.to_string(), "Ctrl, Shift");
        assert_eq!(ModifierFlags::empty().to_string(), "None");
        assert_eq!(ModifierFlags::CAPS_LOCK.to_string(), "CapsLock");
    }

    // ── BootKeyboardReport ────────────────────────────────────────────────────

    #[test]
    fn test_report_from_single_key_with_shift() {
        // Arrange
        let keys = PressedKeySet::single(HidKey::KeyA);

        // Act
        let report = BootKeyboardReport::new(&keys, ModifierFlags::SHIFT);

        // Assert
        assert_eq!(report.modifier, 0x02);
        assert_eq!(report.keys, [0x04, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_set_encodes_all_zero_slots() {
        let report = BootKeyboardReport::new(&PressedKeySet::new(), ModifierFlags::empty());
        assert_eq!(report.as_bytes(), [0u8; REPORT_SIZE]);
    }

    #[test]
    fn test_as_bytes_layout() {
        // Arrange
        let mut keys = PressedKeySet::new();
        keys.insert(HidKey::KeyA);
        keys.insert(HidKey::KeyB);

        // Act
        let bytes = BootKeyboardReport::new(&keys, ModifierFlags::CONTROL).as_bytes();

        // Assert — modifier, reserved, then the six slots in insertion order
        assert_eq!(bytes, [0x01, 0x00, 0x04, 0x05, 0x00, 0x00, 0x00, 0x00]);
    }
}
