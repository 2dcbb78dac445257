//! Yahoo Finance chart endpoint client.

use std::time::Duration;

use chrono::DateTime;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config;
use crate::error::{Result, SphaeraError};
use crate::models::{PricePoint, PriceSeries};
use crate::provider::PriceProvider;

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

/// Parse a chart response body into a daily close series.
///
/// Sessions with a null close or an unrepresentable timestamp are skipped. Timestamps are shifted by the
/// exchange's GMT offset before taking the calendar date. A response with
/// no result or no timestamps is an empty series, not an error.
pub fn parse_chart(body: &str) -> Result<PriceSeries> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        return Err(SphaeraError::Upstream(format!(
            "{}: {}",
            error.code, error.description
        )));
    }

    let Some(data) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::empty());
    };
    let offset = data.meta.gmtoffset;
    let timestamps = data.timestamp.unwrap_or_default();
    let closes = data
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();
    if closes.len() != timestamps.len() {
        tracing::warn!(
            timestamps = timestamps.len(),
            closes = closes.len(),
            "chart arrays differ in length; extra entries dropped"
        );
    }

    Ok(timestamps
        .iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let date = ts
                .checked_add(offset)
                .and_then(|t| DateTime::from_timestamp(t, 0))?
                .date_naive();
            close.map(|c| PricePoint::new(date, c))
        })
        .collect())
}

// ---------------------------------------------------------------------------
// YahooProvider
// ---------------------------------------------------------------------------

/// Fetches daily closes from the Yahoo Finance chart API.
pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config::USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            base_url: config::YAHOO_CHART_BASE.to_string(),
        })
    }

    /// Point the provider at a different chart endpoint.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PriceProvider for YahooProvider {
    fn fetch(&self, ticker: &str, period: &str) -> Result<PriceSeries> {
        let url = format!("{}/{}", self.base_url, ticker);
        tracing::debug!(%url, period, "requesting chart");

        let resp = self
            .client
            .get(&url)
            .query(&[("range", period), ("interval", "1d")])
            .send()?;
        let status = resp.status();
        let body = resp.text()?;

        match parse_chart(&body) {
            Ok(series) => Ok(series),
            // Error payloads are JSON too; only fall back to the status for anything else.
            Err(SphaeraError::Json(_)) if !status.is_success() => Err(SphaeraError::Upstream(
                format!("HTTP {} for {}", status, ticker),
            )),
            Err(e) => Err(e),
        }
    }
}
