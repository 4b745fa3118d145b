//! KVM bridge host entry point.
//!
//! Wires together the serial HID link and the session state, then holds the
//! link open until shutdown.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()          -- TOML settings, defaults on first run
//!  └─ SerialHidTransmitter   -- framed boot reports over the bridge device
//!  └─ SessionFlags           -- controlling / capture / exit flags
//!  └─ shutdown loop          -- Ctrl-C or the triple-Escape exit flag
//! ```
//!
//! The desktop front-end owns the windowing system's event monitor; it feeds
//! a `KeyEventTracker` through `application::track_keys::run_event_loop` and
//! drives injection from its key panel.  This headless variant initialises
//! the link, clears any stuck keys on the target, and idles until stopped.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bridge_core::PressedKeySet;
use bridge_host::application::session::SessionFlags;
use bridge_host::application::track_keys::HidKeyTransmitter;
use bridge_host::infrastructure::hid_link::SerialHidTransmitter;
use bridge_host::infrastructure::storage::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the configured level can seed the
    // filter; `RUST_LOG` still overrides it.
    let cfg = config::load_config().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cfg.host.log_level.clone())),
        )
        .init();

    info!("KVM bridge host starting");

    let session = Arc::new(SessionFlags::new(
        cfg.host.start_controlling,
        cfg.host.capture_keyboard,
    ));

    // ── Serial HID link ───────────────────────────────────────────────────────
    let device = std::fs::OpenOptions::new()
        .write(true)
        .open(&cfg.bridge.device)
        .with_context(|| format!("opening HID bridge device {}", cfg.bridge.device))?;
    let transmitter: Arc<dyn HidKeyTransmitter> = Arc::new(SerialHidTransmitter::new(device));
    info!(
        device = %cfg.bridge.device,
        baud = cfg.bridge.baud_rate,
        "HID bridge link open"
    );

    // Put the target keyboard into a known state: no keys, no modifiers.
    if let Err(e) = transmitter.release(PressedKeySet::new()).await {
        warn!("failed to clear target key state: {e}");
    }

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    info!("KVM bridge host ready.  Press Ctrl-C to exit.");

    // The front-end build runs the tracker event loop here; the headless
    // variant blocks until the shutdown flag clears or the front-end's exit
    // gesture (relayed through the shared session flags) fires.
    loop {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        if !running.load(Ordering::Relaxed) || session.exit_requested() {
            break;
        }
    }

    info!("KVM bridge host stopped");
    Ok(())
}
