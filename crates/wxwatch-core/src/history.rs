//! Per-location reading history.
//!
//! The watcher keeps one [`HistoryEntry`] per (location, reading kind) pair.
//! Entries are created empty on first access, mutated only by the change
//! detector, and live for the process lifetime; nothing is persisted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// Which feed a reading came from. Each location keeps independent history
/// per kind; the live and climate detectors never share state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingKind {
    /// Near-real-time ASOS sensor reading.
    Live,
    /// Daily NWS climate report value.
    Climate,
}

/// Last-known reading state for one (location, kind) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryEntry {
    /// Most recent valid reading.
    pub last_value: Option<f64>,
    /// When `last_value` was stored (UTC).
    pub last_observed_at: Option<DateTime<Utc>>,
    /// The value that last triggered a notification. Cleared once a lower
    /// reading comes in, which re-arms notification for that value.
    pub last_notified_value: Option<f64>,
}

impl HistoryEntry {
    /// True until the first valid reading is stored.
    pub fn is_empty(&self) -> bool {
        self.last_value.is_none()
    }
}

/// In-memory map of reading history, keyed by location name and kind.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: HashMap<(String, ReadingKind), HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to the entry for a location/kind, creating an empty
    /// one on first use.
    pub fn entry_mut(&mut self, location: &str, kind: ReadingKind) -> &mut HistoryEntry {
        self.entries
            .entry((location.to_string(), kind))
            .or_default()
    }

    /// Read-only view, if the pair has ever been accessed.
    pub fn get(&self, location: &str, kind: ReadingKind) -> Option<&HistoryEntry> {
        self.entries.get(&(location.to_string(), kind))
    }

    /// Number of tracked (location, kind) pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
