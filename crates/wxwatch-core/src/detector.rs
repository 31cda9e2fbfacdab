//! Temperature-rise detection.
//!
//! One parameterized [`ChangeDetector`] serves both reading kinds; the live
//! and climate instances differ only in their window/dedupe settings and in
//! the label woven into the notification text. All mutable state lives in
//! the [`HistoryEntry`] handed in each cycle.

use chrono::{DateTime, Duration, Utc};

use crate::history::HistoryEntry;
use crate::notify::Notifier;

/// Gates for one detector instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Maximum elapsed time since the previous reading for a rise to
    /// trigger a notification.
    pub notify_window: Duration,
    /// Maximum elapsed time for the console annotation. At least as wide as
    /// `notify_window` in any sensible configuration.
    pub annotate_window: Duration,
    /// Suppress a repeat notification at an already-notified value until a
    /// lower reading is observed in between.
    pub dedupe: bool,
}

impl DetectorConfig {
    /// Same window for both gates.
    pub fn with_window(window: Duration, dedupe: bool) -> Self {
        Self {
            notify_window: window,
            annotate_window: window,
            dedupe,
        }
    }
}

/// A recent strict increase, returned for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rise {
    /// Value the temperature rose from.
    pub from: f64,
    /// Whole minutes since the previous reading, truncated toward zero.
    /// Display-only; the gates compare the precise duration.
    pub elapsed_minutes: i64,
    /// Whether this invocation delivered a fresh notification.
    pub notified: bool,
}

/// Decides, for one location and one new reading, whether to alert, and
/// always refreshes history for a valid reading.
#[derive(Debug)]
pub struct ChangeDetector {
    label: String,
    config: DetectorConfig,
}

impl ChangeDetector {
    pub fn new(label: impl Into<String>, config: DetectorConfig) -> Self {
        Self {
            label: label.into(),
            config,
        }
    }

    pub fn config(&self) -> DetectorConfig {
        self.config
    }

    /// Evaluate one reading against the stored history.
    ///
    /// Returns a [`Rise`] when the reading is a recent strict increase.
    /// A valid reading always refreshes `last_value`/`last_observed_at`;
    /// an absent or non-finite reading leaves the entry untouched and
    /// returns nothing, however often it repeats.
    pub fn evaluate(
        &self,
        location: &str,
        reading: Option<f64>,
        entry: &mut HistoryEntry,
        notifier: &dyn Notifier,
        now: DateTime<Utc>,
    ) -> Option<Rise> {
        let value = reading.filter(|v| v.is_finite())?;

        let mut rise = None;

        if let (Some(previous), Some(observed_at)) = (entry.last_value, entry.last_observed_at) {
            if value > previous {
                // Clock skew can make this negative; anything at or below
                // the window counts as recent.
                let elapsed = now - observed_at;
                if elapsed <= self.config.annotate_window {
                    let mut notified = false;
                    if elapsed <= self.config.notify_window {
                        let suppressed =
                            self.config.dedupe && entry.last_notified_value == Some(value);
                        if suppressed {
                            tracing::debug!(
                                location,
                                value,
                                "rise already notified, suppressing repeat"
                            );
                        } else {
                            let title = format!("Temperature Alert: {location}");
                            let body = format!(
                                "{} temperature in {} increased to {}\u{b0}F (from {}\u{b0}F).",
                                self.label, location, value, previous
                            );
                            notifier.deliver(&title, &body);
                            entry.last_notified_value = Some(value);
                            notified = true;
                        }
                    }
                    rise = Some(Rise {
                        from: previous,
                        elapsed_minutes: elapsed.num_minutes(),
                        notified,
                    });
                }
            }
        }

        // A reading below the last-notified value re-arms notification for
        // that value: dedupe holds only until a lower value is observed.
        if let Some(notified_value) = entry.last_notified_value {
            if value < notified_value {
                entry.last_notified_value = None;
            }
        }

        entry.last_value = Some(value);
        entry.last_observed_at = Some(now);

        rise
    }
}
