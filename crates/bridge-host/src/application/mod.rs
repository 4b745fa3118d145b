//! Application layer use cases for the host.
//!
//! Use cases in this layer orchestrate the domain types from `bridge-core`
//! behind injected traits, and contain no OS calls, no serial I/O, and no
//! file system access.
//!
//! # Sub-modules
//!
//! - **`track_keys`** – Consumes key events, maintains the pressed-key set,
//!   detects the exit gesture, and forwards snapshots to the transmitter.
//!   This is the most critical use case — it runs on every keystroke.
//!
//! - **`inject_text`** – Paste-style text and special-key injection as paced
//!   press/release sequences.
//!
//! - **`session`** – The shared control-session flags every handler reads.

pub mod inject_text;
pub mod session;
pub mod track_keys;
