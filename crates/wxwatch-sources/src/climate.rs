//! NWS CLI climate product retrieval.

use reqwest::Client;
use std::time::Duration;

use crate::error::SourceError;
use crate::report::{parse_climate_report, ClimateReport};

const FORECAST_BASE: &str = "https://forecast.weather.gov";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "wxwatch/0.1.0";

/// Client for the forecast.weather.gov product pages.
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
    base_url: String,
}

impl NwsClient {
    pub fn new() -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: FORECAST_BASE.to_string(),
        })
    }

    #[cfg(test)]
    fn new_with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Fetch and parse the CLI product for an office/station pair.
    ///
    /// `Ok(None)` means the product came back but carried no usable
    /// MAXIMUM line.
    pub async fn climate_report(
        &self,
        site: &str,
        issued_by: &str,
    ) -> Result<Option<ClimateReport>, SourceError> {
        let url = format!(
            "{}/product.php?site={}&product=CLI&issuedby={}",
            self.base_url, site, issued_by
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        let text = response.text().await?;
        Ok(parse_climate_report(&text))
    }

    /// Degrading variant for the polling loop: absent on any failure.
    pub async fn latest_max(&self, site: &str, issued_by: &str) -> Option<ClimateReport> {
        match self.climate_report(site, issued_by).await {
            Ok(report) => report,
            Err(e) => {
                tracing::debug!("climate product unavailable for {issued_by}: {e}");
                None
            }
        }
    }
}
