//! Serial HID bridge link: frames boot reports for the bridge chip.
//!
//! The bridge device is a serial-attached chip that the target machine sees
//! as a plain USB keyboard.  The host drives it with a simple command
//! protocol:
//!
//! ```text
//! [0x57][0xAB][addr:1][cmd:1][len:1][payload:len][checksum:1]
//! ```
//!
//! The two fixed head bytes mark a frame start; `addr` selects the chip
//! (0x00 for the sole chip on this hardware); `cmd` 0x02 carries a general
//! keyboard report; the checksum is the additive sum of every preceding
//! byte, truncated to 8 bits.
//!
//! This module owns only the framing and the writer; the decision of *what*
//! to send lives in the application layer behind [`HidKeyTransmitter`].

use std::io::Write;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::trace;

use bridge_core::{BootKeyboardReport, ModifierFlags, PressedKeySet};

use crate::application::track_keys::HidKeyTransmitter;

/// Frame start marker.
pub const FRAME_HEAD: [u8; 2] = [0x57, 0xAB];

/// Chip address for the single bridge chip on this hardware.
pub const CHIP_ADDRESS: u8 = 0x00;

/// Command byte for a general keyboard report.
pub const CMD_KEYBOARD_REPORT: u8 = 0x02;

/// Error type for serial link operations.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("serial write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Encodes one boot report into a complete command frame.
pub fn encode_report_frame(report: &BootKeyboardReport) -> Vec<u8> {
    let payload = report.as_bytes();
    let mut frame = Vec::with_capacity(FRAME_HEAD.len() + 3 + payload.len() + 1);
    frame.extend_from_slice(&FRAME_HEAD);
    frame.push(CHIP_ADDRESS);
    frame.push(CMD_KEYBOARD_REPORT);
    frame.push(payload.len() as u8);
    frame.extend_from_slice(&payload);
    let checksum = frame.iter().fold(0u8, |sum, &b| sum.wrapping_add(b));
    frame.push(checksum);
    frame
}

/// [`HidKeyTransmitter`] implementation writing framed reports to a serial
/// port (or any other writer).
///
/// The writer is behind an async mutex so the event path and a concurrent
/// injection task serialise their frames instead of interleaving bytes.
pub struct SerialHidTransmitter<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> SerialHidTransmitter<W> {
    /// Wraps an open serial port writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    async fn send_report(&self, report: BootKeyboardReport) -> Result<(), LinkError> {
        let frame = encode_report_frame(&report);
        trace!(bytes = frame.len(), "writing report frame");
        let mut writer = self.writer.lock().await;
        writer.write_all(&frame)?;
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl<W: Write + Send> HidKeyTransmitter for SerialHidTransmitter<W> {
    async fn press(&self, keys: PressedKeySet, modifiers: ModifierFlags) -> Result<(), String> {
        self.send_report(BootKeyboardReport::new(&keys, modifiers))
            .await
            .map_err(|e| e.to_string())
    }

    async fn release(&self, keys: PressedKeySet) -> Result<(), String> {
        // A release frame is the post-release state with no modifiers held.
        self.send_report(BootKeyboardReport::new(&keys, ModifierFlags::empty()))
            .await
            .map_err(|e| e.to_string())
    }
}
