//! The fixed six-slot set of concurrently pressed keys.
//!
//! Mirrors the slot layout of a USB boot-protocol keyboard report: six byte
//! slots filled in insertion order, not usage order.  A slot holds either a
//! HID usage or [`EMPTY_SLOT`].
//!
//! Invariants maintained by the mutating operations:
//!
//! - no two slots ever hold the same usage;
//! - modifier usages (and CapsLock) never occupy a slot — they travel in the
//!   report's modifier byte instead;
//! - the array is never reallocated; it lives for the tracker's lifetime.
//!
//! Saturation policy: when all six slots are occupied, a further insert is
//! refused and the key is dropped.  The boot protocol itself reports rollover
//! in this situation; this host simply stops forwarding the 7th key, and the
//! dropped key's later release is a no-op.

use crate::keymap::hid::HidKey;

/// Sentinel marking an unoccupied slot.
///
/// 0xFF is outside the keyboard page's assigned usages, so it can never
/// collide with a tracked key.  On the wire an empty slot becomes 0x00
/// ("no event"); the distinct in-memory sentinel keeps "empty" and the
/// reserved usage 0x00 from being conflated.
pub const EMPTY_SLOT: u8 = 0xFF;

/// Number of key slots in a boot-protocol report.
pub const SLOT_COUNT: usize = 6;

/// Ordered fixed-capacity set of currently pressed, non-modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressedKeySet {
    slots: [u8; SLOT_COUNT],
}

impl Default for PressedKeySet {
    fn default() -> Self {
        Self::new()
    }
}

impl PressedKeySet {
    /// Creates an all-empty set.
    pub fn new() -> Self {
        Self {
            slots: [EMPTY_SLOT; SLOT_COUNT],
        }
    }

    /// Creates a set holding just `key` in slot 0.
    ///
    /// Used for synthetic single-key taps (CapsLock edge, text injection)
    /// that bypass the tracked state.
    pub fn single(key: HidKey) -> Self {
        let mut set = Self::new();
        set.slots[0] = key.as_u8();
        set
    }

    /// Returns `true` if `key` currently occupies a slot.
    pub fn contains(&self, key: HidKey) -> bool {
        self.slots.contains(&key.as_u8())
    }

    /// Inserts `key` into the first empty slot.
    ///
    /// Returns `false` when all slots are occupied (the key is dropped) or
    /// when the key is already present (no duplicate is created).
    pub fn insert(&mut self, key: HidKey) -> bool {
        if self.contains(key) {
            return false;
        }
        match self.slots.iter_mut().find(|slot| **slot == EMPTY_SLOT) {
            Some(slot) => {
                *slot = key.as_u8();
                true
            }
            None => false,
        }
    }

    /// Clears the slot holding `key`.
    ///
    /// Returns `false` if the key was not present (stale release).
    pub fn release(&mut self, key: HidKey) -> bool {
        match self.slots.iter_mut().find(|slot| **slot == key.as_u8()) {
            Some(slot) => {
                *slot = EMPTY_SLOT;
                true
            }
            None => false,
        }
    }

    /// Clears any slot holding a modifier usage or CapsLock.
    ///
    /// Modifiers should never occupy a slot; this repairs a previously
    /// inconsistent state before a new key is inserted.  Returns `true` if
    /// anything was cleared.
    pub fn clear_modifier_residue(&mut self) -> bool {
        let mut cleared = false;
        for slot in &mut self.slots {
            let is_residue = HidKey::from_u8(*slot)
                .is_some_and(|key| key.is_modifier() || key == HidKey::CapsLock);
            if is_residue {
                *slot = EMPTY_SLOT;
                cleared = true;
            }
        }
        cleared
    }

    /// Returns `true` if any slot holds a non-modifier key.
    pub fn has_regular_keys(&self) -> bool {
        self.slots.iter().any(|&slot| {
            HidKey::from_u8(slot).is_some_and(|key| !key.is_modifier() && key != HidKey::CapsLock)
        })
    }

    /// Returns `true` if every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|&slot| slot == EMPTY_SLOT)
    }

    /// The raw slots, with the in-memory sentinel preserved.
    pub fn slots(&self) -> [u8; SLOT_COUNT] {
        self.slots
    }

    /// The slots as they appear in a boot report: empty slots become 0x00.
    pub fn report_slots(&self) -> [u8; SLOT_COUNT] {
        self.slots
            .map(|slot| if slot == EMPTY_SLOT { 0x00 } else { slot })
    }
}
