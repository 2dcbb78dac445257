//! Per-ticker metrics fetched through the [`MarketFeed`].

use chrono::NaiveDate;

use crate::config;
use crate::error::{Result, SphaeraError};
use crate::feed::MarketFeed;
use crate::metrics;
use crate::models::{DerivedMetrics, Metric, PriceSeries};

// ---------------------------------------------------------------------------
// MetricsQuery
// ---------------------------------------------------------------------------

/// Metrics for individual tickers. Never fails: fetch problems become
/// [`Metric::Unavailable`] values.
pub struct MetricsQuery<'a> {
    feed: &'a MarketFeed,
    reference: NaiveDate,
}

impl<'a> MetricsQuery<'a> {
    /// Create a new `MetricsQuery` bound to the given feed and reference date.
    pub fn new(feed: &'a MarketFeed, reference: NaiveDate) -> Self {
        Self { feed, reference }
    }

    /// Trailing returns, volatility, YTD and latest price for one ticker.
    ///
    /// A failed YTD fetch only affects the YTD field.
    pub fn derived(&self, ticker: &str) -> DerivedMetrics {
        let series = match self.feed.series(ticker, config::METRICS_PERIOD) {
            Ok(series) => series,
            Err(e) => return DerivedMetrics::unavailable(ticker, e.fallback()),
        };

        match self.feed.series(ticker, config::YTD_PERIOD) {
            Ok(ytd_series) => metrics::derive(ticker, &series, &ytd_series, self.reference),
            Err(e) => DerivedMetrics {
                ytd: Metric::Unavailable(e.fallback()),
                ..metrics::derive(ticker, &series, &PriceSeries::empty(), self.reference)
            },
        }
    }

    /// Percent change over the last `days` sessions.
    pub fn trailing_return(&self, ticker: &str, days: usize) -> Metric {
        match self.feed.series(ticker, period_for_window(days)) {
            Ok(series) => metrics::trailing_return(&series, days),
            Err(e) => Metric::Unavailable(e.fallback()),
        }
    }

    pub fn volatility(&self, ticker: &str) -> Metric {
        match self.feed.series(ticker, config::METRICS_PERIOD) {
            Ok(series) => metrics::annualized_volatility(&series),
            Err(e) => Metric::Unavailable(e.fallback()),
        }
    }

    pub fn year_to_date(&self, ticker: &str) -> Metric {
        match self.feed.series(ticker, config::YTD_PERIOD) {
            Ok(series) => metrics::year_to_date_return(&series, self.reference),
            Err(e) => Metric::Unavailable(e.fallback()),
        }
    }

    /// Latest close, or `None` when the ticker has no usable data.
    pub fn current_price(&self, ticker: &str) -> Option<f64> {
        self.feed
            .series(ticker, config::PRICE_PERIOD)
            .ok()
            .and_then(|s| s.last().map(|p| p.close))
    }

    /// History over `period`, rebased to 100 at its first close.
    ///
    /// Empty when the ticker has no data.
    pub fn normalized_history(&self, ticker: &str, period: &str) -> PriceSeries {
        self.feed
            .series(ticker, period)
            .map(|s| metrics::normalized(&s))
            .unwrap_or_default()
    }

    /// Rebased histories for several tickers over a display range such as
    /// `"3 Months"`. Tickers without data get an empty series.
    pub fn comparison(&self, tickers: &[&str], label: &str) -> Result<Vec<(String, PriceSeries)>> {
        let periods = config::history_periods();
        let period = periods.get(label).ok_or_else(|| {
            SphaeraError::InvalidArgument(format!("Unknown history range: {}", label))
        })?;
        Ok(tickers
            .iter()
            .map(|ticker| (ticker.to_string(), self.normalized_history(ticker, period)))
            .collect())
    }
}

/// Shortest standard range holding `days + 1` sessions.
fn period_for_window(days: usize) -> &'static str {
    match days {
        0..=90 => config::METRICS_PERIOD,
        91..=240 => config::YTD_PERIOD,
        _ => "max",
    }
}
