//! Key resolution tables for host-side input and injection.
//!
//! The canonical representation is USB HID Usage IDs (page 0x07,
//! Keyboard/Keypad).  Characters and named special keys are resolved to HID
//! usages at the injection boundary; captured events arrive already carrying
//! usages.

pub mod chars;
pub mod hid;
pub mod special;

pub use hid::HidKey;
pub use special::SpecialKey;

use crate::report::ModifierFlags;

/// Unified key mapper providing all resolution directions.
pub struct KeyMapper;

impl KeyMapper {
    /// Resolves a character to the physical key producing it on a US layout.
    ///
    /// Returns `None` if the character has no single-key representation.
    pub fn key_for_char(c: char) -> Option<HidKey> {
        chars::char_to_key(c)
    }

    /// Returns `true` if typing `c` requires Shift to be held.
    pub fn needs_shift(c: char) -> bool {
        chars::needs_shift(c)
    }

    /// Resolves a named special key to its physical key and held modifiers.
    ///
    /// Returns `None` if the code has no key mapping.
    pub fn chord_for_special(code: SpecialKey) -> Option<(HidKey, ModifierFlags)> {
        special::chord_for_special(code)
    }
}
