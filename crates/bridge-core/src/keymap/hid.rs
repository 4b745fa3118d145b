//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page).
//!
//! This is the canonical key representation used throughout the bridge host.
//! Host-side events and injected characters are resolved to HID usages before
//! anything touches the pressed-key set or the wire.
//!
//! Reference: USB HID Usage Tables 1.3, Section 10 (Keyboard/Keypad page 0x07).
//!
//! # Why `u8`? (for beginners)
//!
//! The bridge chip speaks the USB **boot protocol**: an 8-byte report with one
//! modifier byte and six single-byte key slots.  Every usage we can transmit
//! therefore fits in a `u8` (the keyboard page only assigns usages up to 0xE7),
//! so the enum is `#[repr(u8)]` and converts losslessly to the wire bytes.
//!
//! Usage 0x00 means "no event" in a report slot and is never a key, which is
//! why [`HidKey::from_u8`] returns an `Option` instead of a sentinel variant.

use serde::{Deserialize, Serialize};

/// First modifier usage on the keyboard page (Left Control).
const MODIFIER_USAGE_FIRST: u8 = 0xE0;
/// Last modifier usage on the keyboard page (Right GUI).
const MODIFIER_USAGE_LAST: u8 = 0xE7;

/// USB HID Usage ID for a keyboard key (page 0x07).
///
/// The numeric value of each variant is its usage on the keyboard/keypad page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HidKey {
    // Letters (HID 0x04–0x1D)
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // Digits (HID 0x1E–0x27)
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Control keys (HID 0x28–0x38)
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,

    // Lock keys
    CapsLock = 0x39,

    // Function keys (HID 0x3A–0x45)
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    // Navigation cluster (HID 0x46–0x52)
    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    ArrowRight = 0x4F,
    ArrowLeft = 0x50,
    ArrowDown = 0x51,
    ArrowUp = 0x52,

    // Modifier keys (HID 0xE0–0xE7)
    ControlLeft = 0xE0,
    ShiftLeft = 0xE1,
    AltLeft = 0xE2,
    MetaLeft = 0xE3,
    ControlRight = 0xE4,
    ShiftRight = 0xE5,
    AltRight = 0xE6,
    MetaRight = 0xE7,
}

impl HidKey {
    /// Converts a raw usage byte to a [`HidKey`].
    ///
    /// Returns `None` for usages this host cannot transmit, including 0x00
    /// ("no event") and the unassigned/vendor ranges.
    pub fn from_u8(value: u8) -> Option<Self> {
        let key = match value {
            0x04 => HidKey::KeyA,
            0x05 => HidKey::KeyB,
            0x06 => HidKey::KeyC,
            0x07 => HidKey::KeyD,
            0x08 => HidKey::KeyE,
            0x09 => HidKey::KeyF,
            0x0A => HidKey::KeyG,
            0x0B => HidKey::KeyH,
            0x0C => HidKey::KeyI,
            0x0D => HidKey::KeyJ,
            0x0E => HidKey::KeyK,
            0x0F => HidKey::KeyL,
            0x10 => HidKey::KeyM,
            0x11 => HidKey::KeyN,
            0x12 => HidKey::KeyO,
            0x13 => HidKey::KeyP,
            0x14 => HidKey::KeyQ,
            0x15 => HidKey::KeyR,
            0x16 => HidKey::KeyS,
            0x17 => HidKey::KeyT,
            0x18 => HidKey::KeyU,
            0x19 => HidKey::KeyV,
            0x1A => HidKey::KeyW,
            0x1B => HidKey::KeyX,
            0x1C => HidKey::KeyY,
            0x1D => HidKey::KeyZ,
            0x1E => HidKey::Digit1,
            0x1F => HidKey::Digit2,
            0x20 => HidKey::Digit3,
            0x21 => HidKey::Digit4,
            0x22 => HidKey::Digit5,
            0x23 => HidKey::Digit6,
            0x24 => HidKey::Digit7,
            0x25 => HidKey::Digit8,
            0x26 => HidKey::Digit9,
            0x27 => HidKey::Digit0,
            0x28 => HidKey::Enter,
            0x29 => HidKey::Escape,
            0x2A => HidKey::Backspace,
            0x2B => HidKey::Tab,
            0x2C => HidKey::Space,
            0x2D => HidKey::Minus,
            0x2E => HidKey::Equal,
            0x2F => HidKey::BracketLeft,
            0x30 => HidKey::BracketRight,
            0x31 => HidKey::Backslash,
            0x33 => HidKey::Semicolon,
            0x34 => HidKey::Quote,
            0x35 => HidKey::Backquote,
            0x36 => HidKey::Comma,
            0x37 => HidKey::Period,
            0x38 => HidKey::Slash,
            0x39 => HidKey::CapsLock,
            0x3A => HidKey::F1,
            0x3B => HidKey::F2,
            0x3C => HidKey::F3,
            0x3D => HidKey::F4,
            0x3E => HidKey::F5,
            0x3F => HidKey::F6,
            0x40 => HidKey::F7,
            0x41 => HidKey::F8,
            0x42 => HidKey::F9,
            0x43 => HidKey::F10,
            0x44 => HidKey::F11,
            0x45 => HidKey::F12,
            0x46 => HidKey::PrintScreen,
            0x47 => HidKey::ScrollLock,
            0x48 => HidKey::Pause,
            0x49 => HidKey::Insert,
            0x4A => HidKey::Home,
            0x4B => HidKey::PageUp,
            0x4C => HidKey::Delete,
            0x4D => HidKey::End,
            0x4E => HidKey::PageDown,
            0x4F => HidKey::ArrowRight,
            0x50 => HidKey::ArrowLeft,
            0x51 => HidKey::ArrowDown,
            0x52 => HidKey::ArrowUp,
            0xE0 => HidKey::ControlLeft,
            0xE1 => HidKey::ShiftLeft,
            0xE2 => HidKey::AltLeft,
            0xE3 => HidKey::MetaLeft,
            0xE4 => HidKey::ControlRight,
            0xE5 => HidKey::ShiftRight,
            0xE6 => HidKey::AltRight,
            0xE7 => HidKey::MetaRight,
            _ => return None,
        };
        Some(key)
    }

    /// Returns the raw usage byte for this key.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns `true` if this usage is one of the eight modifier keys
    /// (Left/Right Control, Shift, Alt, Meta).
    ///
    /// CapsLock is a regular usage at the HID level; whether it is *treated*
    /// as a modifier is a tracker-level decision.
    pub fn is_modifier(self) -> bool {
        (MODIFIER_USAGE_FIRST..=MODIFIER_USAGE_LAST).contains(&self.as_u8())
    }

    /// Returns this key's bit in the boot-report modifier byte, or `None`
    /// for non-modifier keys.
    ///
    /// Bit layout per the boot protocol: bit 0 = Left Ctrl through
    /// bit 7 = Right GUI, in usage order 0xE0–0xE7.
    pub fn modifier_bit(self) -> Option<u8> {
        if self.is_modifier() {
            Some(1 << (self.as_u8() - MODIFIER_USAGE_FIRST))
        } else {
            None
        }
    }
}
