//! ASCII character to HID usage resolution for text injection.
//!
//! Both cases of a letter and both faces of a punctuation key resolve to the
//! same physical usage; whether Shift must be held is a separate question
//! answered by [`needs_shift`].  Characters outside printable ASCII (plus
//! newline and tab) have no mapping and are skipped by the injection layer.

use super::hid::HidKey;

/// Symbols that live on the shifted face of a US-layout key.
pub const SHIFTED_SYMBOLS: &[char] = &[
    '~', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '{', '}', '|', ':', '"', '<',
    '>', '?',
];

/// Returns `true` if typing `c` on a US layout requires Shift to be held.
pub fn needs_shift(c: char) -> bool {
    c.is_ascii_uppercase() || SHIFTED_SYMBOLS.contains(&c)
}

/// Resolves a character to the physical key that produces it on a US layout.
///
/// Returns `None` for characters with no single-key representation.
pub fn char_to_key(c: char) -> Option<HidKey> {
    let key = match c {
        'a' | 'A' => HidKey::KeyA,
        'b' | 'B' => HidKey::KeyB,
        'c' | 'C' => HidKey::KeyC,
        'd' | 'D' => HidKey::KeyD,
        'e' | 'E' => HidKey::KeyE,
        'f' | 'F' => HidKey::KeyF,
        'g' | 'G' => HidKey::KeyG,
        'h' | 'H' => HidKey::KeyH,
        'i' | 'I' => HidKey::KeyI,
        'j' | 'J' => HidKey::KeyJ,
        'k' | 'K' => HidKey::KeyK,
        'l' | 'L' => HidKey::KeyL,
        'm' | 'M' => HidKey::KeyM,
        'n' | 'N' => HidKey::KeyN,
        'o' | 'O' => HidKey::KeyO,
        'p' | 'P' => HidKey::KeyP,
        'q' | 'Q' => HidKey::KeyQ,
        'r' | 'R' => HidKey::KeyR,
        's' | 'S' => HidKey::KeyS,
        't' | 'T' => HidKey::KeyT,
        'u' | 'U' => HidKey::KeyU,
        'v' | 'V' => HidKey::KeyV,
        'w' | 'W' => HidKey::KeyW,
        'x' | 'X' => HidKey::KeyX,
        'y' | 'Y' => HidKey::KeyY,
        'z' | 'Z' => HidKey::KeyZ,

        '1' | '!' => HidKey::Digit1,
        '2' | '@' => HidKey::Digit2,
        '3' | '#' => HidKey::Digit3,
        '4' | '$' => HidKey::Digit4,
        '5' | '%' => HidKey::Digit5,
        '6' | '^' => HidKey::Digit6,
        '7' | '&' => HidKey::Digit7,
        '8' | '*' => HidKey::Digit8,
        '9' | '(' => HidKey::Digit9,
        '0' | ')' => HidKey::Digit0,

        '\n' => HidKey::Enter,
        '\t' => HidKey::Tab,
        ' ' => HidKey::Space,

        '-' | '_' => HidKey::Minus,
        '=' | '+' => HidKey::Equal,
        '[' | '{' => HidKey::BracketLeft,
        ']' | '}' => HidKey::BracketRight,
        '\\' | '|' => HidKey::Backslash,
        ';' | ':' => HidKey::Semicolon,
        '\'' | '"' => HidKey::Quote,
        '`' | '~' => HidKey::Backquote,
        ',' | '<' => HidKey::Comma,
        '.' | '>' => HidKey::Period,
        '/' | '?' => HidKey::Slash,

        _ => return None,
    };
    Some(key)
}
