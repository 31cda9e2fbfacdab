//! Iowa State Mesonet ASOS feeds.
//!
//! Two endpoints cover the live reading: the daily summary API (one record
//! per calendar day, keyed on the station's local date) and the real-time
//! current-observation feed, whose `last_ob` block carries the running max
//! for the day. The live reading is the greater of the two, so a lagging
//! summary cannot hide a fresh sensor max.

use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::SourceError;

const MESONET_BASE: &str = "https://mesonet.agron.iastate.edu";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "wxwatch/0.1.0";

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(default)]
    data: Vec<DailyRecord>,
}

#[derive(Debug, Deserialize)]
struct DailyRecord {
    date: Option<NaiveDate>,
    max_tmpf: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    last_ob: Option<LastObservation>,
}

#[derive(Debug, Deserialize)]
struct LastObservation {
    #[serde(rename = "max_dayairtemp[F]")]
    max_day_air_temp_f: Option<f64>,
}

/// Client for the Mesonet daily and current-observation feeds.
#[derive(Debug, Clone)]
pub struct MesonetClient {
    client: Client,
    base_url: String,
}

impl MesonetClient {
    pub fn new() -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: MESONET_BASE.to_string(),
        })
    }

    #[cfg(test)]
    fn new_with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Max temperature recorded for `local_date` in the daily summary feed.
    pub async fn daily_max(
        &self,
        network: &str,
        station: &str,
        local_date: NaiveDate,
    ) -> Result<Option<f64>, SourceError> {
        let url = format!(
            "{}/api/1/daily.json?network={}&station={}&year={}&month={}",
            self.base_url,
            network,
            station,
            local_date.year(),
            local_date.month()
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        let body: DailyResponse = response.json().await?;
        Ok(body
            .data
            .into_iter()
            .find(|record| record.date == Some(local_date))
            .and_then(|record| record.max_tmpf))
    }

    /// Running max for the current day from the real-time observation feed.
    pub async fn current_day_max(
        &self,
        network: &str,
        station: &str,
    ) -> Result<Option<f64>, SourceError> {
        let url = format!(
            "{}/json/current.py?network={}&station={}",
            self.base_url, network, station
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        let body: CurrentResponse = response.json().await?;
        Ok(body.last_ob.and_then(|ob| ob.max_day_air_temp_f))
    }

    /// Best available live max: the greater of the daily and current feeds.
    ///
    /// Absent only when both feeds fail or carry no value; either feed
    /// failing alone just narrows the candidates. Failures are logged and
    /// swallowed here - the polling cycle is the retry mechanism.
    pub async fn live_max(
        &self,
        network: &str,
        station: &str,
        local_date: NaiveDate,
    ) -> Option<f64> {
        let daily = match self.daily_max(network, station, local_date).await {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("daily feed unavailable for {station}: {e}");
                None
            }
        };

        let current = match self.current_day_max(network, station).await {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("current feed unavailable for {station}: {e}");
                None
            }
        };

        match (daily, current) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}
