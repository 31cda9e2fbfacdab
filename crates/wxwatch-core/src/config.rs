use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::detector::DetectorConfig;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between polling cycles
    #[serde(default = "default_poll_seconds")]
    pub poll_seconds: u64,

    /// Live readings strictly above this render highlighted in the console
    #[serde(default = "default_hot_threshold")]
    pub hot_threshold: f64,

    /// Live (ASOS) detector knobs
    #[serde(default = "DetectorSettings::standard")]
    pub live_detector: DetectorSettings,

    /// Climate-report detector knobs
    #[serde(default = "DetectorSettings::standard")]
    pub climate_detector: DetectorSettings,

    /// Watched stations
    #[serde(default = "default_locations")]
    pub locations: Vec<LocationConfig>,
}

fn default_poll_seconds() -> u64 {
    30
}

fn default_hot_threshold() -> f64 {
    80.0
}

/// Per-detector window and dedupe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorSettings {
    /// Annotation gate in minutes; also the notification gate unless
    /// `notify_window_minutes` narrows it
    pub window_minutes: i64,

    /// Optional stricter notification gate in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_window_minutes: Option<i64>,

    /// Suppress repeat notifications at an already-notified value
    pub dedupe: bool,
}

impl DetectorSettings {
    fn standard() -> Self {
        Self {
            window_minutes: 5,
            notify_window_minutes: None,
            dedupe: true,
        }
    }

    /// Resolve into detector gates. The notification window defaults to the
    /// annotation window when not set separately.
    pub fn detector_config(&self) -> DetectorConfig {
        let annotate = chrono::Duration::minutes(self.window_minutes);
        let notify = self
            .notify_window_minutes
            .map(chrono::Duration::minutes)
            .unwrap_or(annotate);
        DetectorConfig {
            notify_window: notify,
            annotate_window: annotate,
            dedupe: self.dedupe,
        }
    }
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self::standard()
    }
}

/// One watched city: its civil timezone plus the station identifiers the
/// data sources key on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Display name, e.g. "Austin, TX"
    pub name: String,

    /// IANA timezone, e.g. "America/Chicago"
    pub timezone: String,

    /// Mesonet network id, e.g. "TX_ASOS"
    pub network: String,

    /// Mesonet/ASOS station id, e.g. "AUS"
    pub station: String,

    /// NWS office issuing the CLI climate product, e.g. "EWX"
    pub nws_site: String,

    /// Station the climate product is issued for, e.g. "AUS"
    pub nws_issued_by: String,
}

impl LocationConfig {
    fn new(
        name: &str,
        timezone: &str,
        network: &str,
        station: &str,
        nws_site: &str,
        nws_issued_by: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            timezone: timezone.to_string(),
            network: network.to_string(),
            station: station.to_string(),
            nws_site: nws_site.to_string(),
            nws_issued_by: nws_issued_by.to_string(),
        }
    }

    /// Civil timezone for local-time display and "today" selection.
    ///
    /// Falls back to UTC on an unknown name; validation reports the bad
    /// name at startup, so the fallback is never hit in a running process.
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "unknown timezone {:?} for {}, falling back to UTC",
                self.timezone,
                self.name
            );
            Tz::UTC
        })
    }
}

fn default_locations() -> Vec<LocationConfig> {
    vec![
        LocationConfig::new("Austin, TX", "America/Chicago", "TX_ASOS", "AUS", "EWX", "AUS"),
        LocationConfig::new("Denver, CO", "America/Denver", "CO_ASOS", "DEN", "BOU", "DEN"),
        LocationConfig::new("Miami, FL", "America/New_York", "FL_ASOS", "MIA", "MFL", "MIA"),
        LocationConfig::new(
            "New York City, NY",
            "America/New_York",
            "NY_ASOS",
            "NYC",
            "OKX",
            "NYC",
        ),
        LocationConfig::new("Chicago, IL", "America/Chicago", "IL_ASOS", "MDW", "LOT", "MDW"),
        LocationConfig::new("Houston, TX", "America/Chicago", "TX_ASOS", "HOU", "HGX", "HOU"),
        LocationConfig::new(
            "Philadelphia, PA",
            "America/New_York",
            "PA_ASOS",
            "PHL",
            "PHI",
            "PHL",
        ),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_seconds: default_poll_seconds(),
            hot_threshold: default_hot_threshold(),
            live_detector: DetectorSettings::standard(),
            climate_detector: DetectorSettings::standard(),
            locations: default_locations(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.poll_seconds == 0 {
            result.add_error("poll_seconds", "Polling interval must be greater than 0");
        } else if self.poll_seconds > 3600 {
            result.add_warning("poll_seconds", "Polling less than once an hour");
        }

        if !self.hot_threshold.is_finite() {
            result.add_error("hot_threshold", "Threshold must be a finite number");
        }

        self.validate_detector(&self.live_detector, "live_detector", &mut result);
        self.validate_detector(&self.climate_detector, "climate_detector", &mut result);

        if self.locations.is_empty() {
            result.add_warning("locations", "No locations configured - nothing to watch");
        }

        let mut seen = std::collections::HashSet::new();
        for (i, location) in self.locations.iter().enumerate() {
            let field = format!("locations[{i}]");

            if location.name.trim().is_empty() {
                result.add_error(format!("{field}.name"), "Location name must not be empty");
            } else if !seen.insert(location.name.clone()) {
                result.add_warning(
                    format!("{field}.name"),
                    format!("Duplicate location name: {}", location.name),
                );
            }

            if location.timezone.parse::<Tz>().is_err() {
                result.add_error(
                    format!("{field}.timezone"),
                    format!("Unknown IANA timezone: {}", location.timezone),
                );
            }

            for (key, value) in [
                ("network", &location.network),
                ("station", &location.station),
                ("nws_site", &location.nws_site),
                ("nws_issued_by", &location.nws_issued_by),
            ] {
                if value.trim().is_empty() {
                    result.add_error(format!("{field}.{key}"), "Identifier must not be empty");
                }
            }
        }

        result
    }

    fn validate_detector(
        &self,
        settings: &DetectorSettings,
        field_name: &str,
        result: &mut ValidationResult,
    ) {
        if settings.window_minutes <= 0 {
            result.add_error(
                format!("{field_name}.window_minutes"),
                "Window must be greater than 0 minutes",
            );
        }

        if let Some(notify) = settings.notify_window_minutes {
            if notify <= 0 {
                result.add_error(
                    format!("{field_name}.notify_window_minutes"),
                    "Notification window must be greater than 0 minutes",
                );
            } else if notify > settings.window_minutes {
                result.add_warning(
                    format!("{field_name}.notify_window_minutes"),
                    "Notification window is wider than the annotation window",
                );
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("wxwatch");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
        assert_eq!(config.locations.len(), 7);
    }

    #[test]
    fn test_zero_poll_interval_is_error() {
        let mut config = Config::default();
        config.poll_seconds = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "poll_seconds"));
    }

    #[test]
    fn test_unknown_timezone_is_error() {
        let mut config = Config::default();
        config.locations[0].timezone = "America/Nowhere".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.message.contains("America/Nowhere")));
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        let mut location = default_locations().remove(0);
        location.timezone = "America/Nowhere".to_string();
        assert_eq!(location.tz(), Tz::UTC);
    }

    #[test]
    fn test_zero_window_is_error() {
        let mut config = Config::default();
        config.live_detector.window_minutes = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "live_detector.window_minutes"));
    }

    #[test]
    fn test_wide_notify_window_is_warning() {
        let mut config = Config::default();
        config.climate_detector.notify_window_minutes = Some(10);
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "climate_detector.notify_window_minutes"));
    }

    #[test]
    fn test_empty_locations_is_warning() {
        let mut config = Config::default();
        config.locations.clear();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "locations"));
    }

    #[test]
    fn test_duplicate_location_name_is_warning() {
        let mut config = Config::default();
        let duplicate = config.locations[0].clone();
        config.locations.push(duplicate);
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.message.contains("Duplicate")));
    }

    #[test]
    fn test_detector_config_resolution() {
        let settings = DetectorSettings {
            window_minutes: 5,
            notify_window_minutes: Some(1),
            dedupe: false,
        };
        let resolved = settings.detector_config();
        assert_eq!(resolved.notify_window, chrono::Duration::minutes(1));
        assert_eq!(resolved.annotate_window, chrono::Duration::minutes(5));
        assert!(!resolved.dedupe);
    }

    #[test]
    fn test_notify_window_defaults_to_annotation_window() {
        let settings = DetectorSettings::standard();
        let resolved = settings.detector_config();
        assert_eq!(resolved.notify_window, resolved.annotate_window);
        assert!(resolved.dedupe);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            poll_seconds = 60

            [[locations]]
            name = "Austin, TX"
            timezone = "America/Chicago"
            network = "TX_ASOS"
            station = "AUS"
            nws_site = "EWX"
            nws_issued_by = "AUS"
            "#,
        )
        .unwrap();

        assert_eq!(config.poll_seconds, 60);
        assert_eq!(config.locations.len(), 1);
        assert_eq!(config.live_detector.window_minutes, 5);
        assert!(config.climate_detector.dedupe);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.poll_seconds, config.poll_seconds);
        assert_eq!(parsed.locations.len(), config.locations.len());
        assert_eq!(
            parsed.climate_detector.notify_window_minutes,
            config.climate_detector.notify_window_minutes
        );
    }
}
