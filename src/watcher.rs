//! The polling loop: one cycle fetches every configured location, runs both
//! detectors against the shared history store and renders a line per city.
//!
//! Locations are polled sequentially, so detector invocations for a given
//! location are always ordered against each other and the history store
//! needs no locking.

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use wxwatch_core::{
    ChangeDetector, Config, HistoryStore, LocationConfig, Notifier, ReadingKind,
};
use wxwatch_sources::{MesonetClient, NwsClient};

use crate::display;

pub struct Watcher {
    config: Config,
    mesonet: MesonetClient,
    nws: NwsClient,
    live_detector: ChangeDetector,
    climate_detector: ChangeDetector,
    history: HistoryStore,
    notifier: Box<dyn Notifier>,
}

impl Watcher {
    pub fn new(config: Config, notifier: Box<dyn Notifier>) -> Result<Self> {
        let mesonet = MesonetClient::new()?;
        let nws = NwsClient::new()?;
        let live_detector = ChangeDetector::new("ASOS", config.live_detector.detector_config());
        let climate_detector = ChangeDetector::new(
            "Climate Report",
            config.climate_detector.detector_config(),
        );

        Ok(Self {
            config,
            mesonet,
            nws,
            live_detector,
            climate_detector,
            history: HistoryStore::new(),
            notifier,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.config.poll_seconds)
    }

    pub fn location_count(&self) -> usize {
        self.config.locations.len()
    }

    /// Fetch, evaluate and render every configured location once.
    pub async fn run_cycle(&mut self) {
        display::clear_screen();
        println!("{}", display::cycle_header(Utc::now()));

        let locations = self.config.locations.clone();
        for (index, location) in locations.iter().enumerate() {
            self.observe(index, location).await;
        }

        println!();
        println!("{}", display::cycle_footer(self.config.poll_seconds));
    }

    async fn observe(&mut self, index: usize, location: &LocationConfig) {
        let local_now = Utc::now().with_timezone(&location.tz());
        let local_time = local_now.format("%Y-%m-%d %I:%M %p").to_string();

        let live = self
            .mesonet
            .live_max(&location.network, &location.station, local_now.date_naive())
            .await;
        let report = self
            .nws
            .latest_max(&location.nws_site, &location.nws_issued_by)
            .await;
        let climate_value = report.as_ref().map(|r| f64::from(r.max_temp_f));

        let entry = self.history.entry_mut(&location.name, ReadingKind::Climate);
        let climate_rise = self.climate_detector.evaluate(
            &location.name,
            climate_value,
            entry,
            self.notifier.as_ref(),
            Utc::now(),
        );

        let entry = self.history.entry_mut(&location.name, ReadingKind::Live);
        let live_rise = self.live_detector.evaluate(
            &location.name,
            live,
            entry,
            self.notifier.as_ref(),
            Utc::now(),
        );

        println!(
            "{}",
            display::location_line(
                index,
                &location.name,
                &local_time,
                live,
                report.as_ref(),
                live_rise,
                climate_rise,
                self.config.hot_threshold,
            )
        );
    }
}
