//! Core of the wxwatch temperature watcher.
//!
//! Holds the configuration model, the per-location reading history, the
//! temperature-rise detector and the notification seam. All I/O (HTTP
//! fetching, desktop notification dispatch, console rendering) lives in the
//! sibling crates and the binary.

pub mod config;
pub mod detector;
pub mod history;
pub mod notify;

pub use config::{Config, DetectorSettings, LocationConfig, ValidationResult};
pub use detector::{ChangeDetector, DetectorConfig, Rise};
pub use history::{HistoryEntry, HistoryStore, ReadingKind};
pub use notify::Notifier;

use anyhow::Result;

/// Initialize logging for the application.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::debug!("wxwatch core initialized");
    Ok(())
}
