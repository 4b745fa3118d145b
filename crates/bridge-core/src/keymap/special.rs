//! Named special keys and chords offered by the host UI's key panel.

use serde::{Deserialize, Serialize};

use super::hid::HidKey;
use crate::report::ModifierFlags;

/// A named key or chord the host can inject without a physical press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    /// The OS/GUI key (Windows key on the target).
    Meta,
    /// Forward delete.
    Delete,
    /// The Ctrl+Alt+Delete chord.
    CtrlAltDelete,
    /// The Cmd+Space launcher chord.
    CmdSpace,
}

/// Resolves a special key to the physical key and held modifiers to inject.
///
/// Returns `None` if the code has no key mapping; callers treat that as a
/// silent no-op.
pub fn chord_for_special(code: SpecialKey) -> Option<(HidKey, ModifierFlags)> {
    let chord = match code {
        SpecialKey::F1 => (HidKey::F1, ModifierFlags::empty()),
        SpecialKey::F2 => (HidKey::F2, ModifierFlags::empty()),
        SpecialKey::F3 => (HidKey::F3, ModifierFlags::empty()),
        SpecialKey::F4 => (HidKey::F4, ModifierFlags::empty()),
        SpecialKey::F5 => (HidKey::F5, ModifierFlags::empty()),
        SpecialKey::F6 => (HidKey::F6, ModifierFlags::empty()),
        SpecialKey::F7 => (HidKey::F7, ModifierFlags::empty()),
        SpecialKey::F8 => (HidKey::F8, ModifierFlags::empty()),
        SpecialKey::F9 => (HidKey::F9, ModifierFlags::empty()),
        SpecialKey::F10 => (HidKey::F10, ModifierFlags::empty()),
        SpecialKey::F11 => (HidKey::F11, ModifierFlags::empty()),
        SpecialKey::F12 => (HidKey::F12, ModifierFlags::empty()),
        SpecialKey::Meta => (HidKey::MetaLeft, ModifierFlags::empty()),
        SpecialKey::Delete => (HidKey::Delete, ModifierFlags::empty()),
        SpecialKey::CtrlAltDelete => {
            (HidKey::Delete, ModifierFlags::CONTROL | ModifierFlags::ALT)
        }
        SpecialKey::CmdSpace => (HidKey::Space, ModifierFlags::ALT | ModifierFlags::META),
    };
    Some(chord)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_keys_resolve_without_modifiers() {
        let (key, mods) = chord_for_special(SpecialKey::F1).unwrap();
        assert_eq!(key, HidKey::F1);
        assert!(mods.is_empty());

        let (key, mods) = chord_for_special(SpecialKey::F12).unwrap();
        assert_eq!(key, HidKey::F12);
        assert!(mods.is_empty());
    }

    #[test]
    fn test_ctrl_alt_delete_carries_the_chord_modifiers() {
        let (key, mods) = chord_for_special(SpecialKey::CtrlAltDelete).unwrap();
        assert_eq!(key, HidKey::Delete);
        assert!(mods.contains(ModifierFlags::CONTROL));
        assert!(mods.contains(ModifierFlags::ALT));
        assert!(!mods.contains(ModifierFlags::META));
    }

    #[test]
    fn test_cmd_space_carries_the_launcher_modifiers() {
        let (key, mods) = chord_for_special(SpecialKey::CmdSpace).unwrap();
        assert_eq!(key, HidKey::Space);
        assert!(mods.contains(ModifierFlags::ALT));
        assert!(mods.contains(ModifierFlags::META));
    }

    #[test]
    fn test_every_special_key_resolves() {
        let all = [
            SpecialKey::F1,
            SpecialKey::F2,
            SpecialKey::F3,
            SpecialKey::F4,
            SpecialKey::F5,
            SpecialKey::F6,
            SpecialKey::F7,
            SpecialKey::F8,
            SpecialKey::F9,
            SpecialKey::F10,
            SpecialKey::F11,
            SpecialKey::F12,
            SpecialKey::Meta,
            SpecialKey::Delete,
            SpecialKey::CtrlAltDelete,
            SpecialKey::CmdSpace,
        ];
        for code in all {
            assert!(chord_for_special(code).is_some(), "{code:?} should resolve");
        }
    }
}
