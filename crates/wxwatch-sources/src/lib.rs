//! Data-source adapters for wxwatch.
//!
//! Two upstream services feed the watcher: the Iowa State Mesonet ASOS
//! feeds (daily summaries plus real-time observations) and the NWS CLI
//! climate text products. Both adapters degrade to "absent" on any network
//! or parse failure; nothing here is fatal to the polling loop.

pub mod climate;
pub mod error;
pub mod mesonet;
pub mod report;

pub use climate::NwsClient;
pub use error::SourceError;
pub use mesonet::MesonetClient;
pub use report::{normalize_clock_time, parse_climate_report, ClimateReport};
