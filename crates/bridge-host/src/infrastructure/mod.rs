//! Infrastructure layer for the host application.
//!
//! Contains the outward-facing adapters: the key event source contract the
//! front-end implements, the serial HID link, and config storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `bridge_core`, but MUST NOT be imported by the domain layer.

pub mod event_source;
pub mod hid_link;
pub mod storage;
