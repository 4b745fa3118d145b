//! # bridge-core
//!
//! Shared library for the KVM bridge host containing the pressed-key domain
//! state, boot-protocol report encoding, and key resolution tables.
//!
//! This crate is used by the host application and has zero dependencies on
//! OS APIs, UI frameworks, or serial ports.
//!
//! # Architecture overview (for beginners)
//!
//! A hardware KVM lets you drive a second computer ("target") with the
//! keyboard of the computer running this software ("host").  Key presses on
//! the host are not delivered to the target as OS events; they are re-encoded
//! as USB HID keyboard reports and pushed through a bridge device that the
//! target sees as a plain USB keyboard.
//!
//! This crate is the pure foundation of that pipeline:
//!
//! - **`domain`** – The pressed-key slot set (mirroring the six key slots of
//!   a boot-protocol report) and the triple-Escape exit gesture.
//!
//! - **`report`** – The host modifier state and the 8-byte boot-protocol
//!   report that actually crosses the wire.
//!
//! - **`keymap`** – Resolution tables from characters and named special keys
//!   to USB HID Usage IDs (page 0x07).

pub mod domain;
pub mod keymap;
pub mod report;

// Re-export the most-used types at the crate root so callers can write
// `bridge_core::PressedKeySet` instead of `bridge_core::domain::keyset::PressedKeySet`.
pub use domain::gesture::{EscGesture, GestureOutcome};
pub use domain::keyset::{PressedKeySet, EMPTY_SLOT, SLOT_COUNT};
pub use keymap::{HidKey, KeyMapper, SpecialKey};
pub use report::{BootKeyboardReport, ModifierFlags, REPORT_SIZE};
