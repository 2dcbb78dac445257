//! Sphaera emerging-markets SDK for Rust.
//!
//! Computes the statistics behind the Sphaera EM dashboard: trailing index
//! and currency returns, annualized volatility, year-to-date performance,
//! term premia, yield changes and real policy rates for a configurable set
//! of countries. Prices come from a [`PriceProvider`] (Yahoo Finance by
//! default), are cached for a few minutes, and missing data degrades to
//! explicit [`Metric::Unavailable`](models::Metric) values instead of errors.
//!
//! # Quick start
//!
//! ```no_run
//! use sphaera_em_sdk::SphaeraSdk;
//!
//! let sdk = SphaeraSdk::builder().build().unwrap();
//!
//! // One row per market
//! for row in sdk.overview().rows() {
//!     println!("{} {}: {:.2}%", row.flag, row.country, row.return_1m.value());
//! }
//!
//! // Export the table
//! let path = sdk.export().write_csv(".").unwrap();
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod metrics;
pub mod models;
pub mod provider;
pub mod queries;

pub use cache::SeriesCache;
pub use error::{Result, SphaeraError};
pub use feed::MarketFeed;
pub use models::{DashboardRow, DerivedMetrics, Fallback, MarketTable, Metric, PriceSeries, Rounding};
pub use provider::{PriceProvider, StaticProvider, YahooProvider};

use std::fmt;
use std::time::Duration;

use chrono::{NaiveDate, Utc};

// ---------------------------------------------------------------------------
// SphaeraSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SphaeraSdk`] instance.
///
/// Use [`SphaeraSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SphaeraSdkBuilder::build) to create the SDK.
pub struct SphaeraSdkBuilder {
    provider: Option<Box<dyn PriceProvider>>,
    markets: MarketTable,
    cache_ttl: Duration,
    timeout: Duration,
    throttle: Duration,
    offline: bool,
    reference_date: Option<NaiveDate>,
    rounding: Rounding,
}

impl Default for SphaeraSdkBuilder {
    fn default() -> Self {
        Self {
            provider: None,
            markets: MarketTable::core(),
            cache_ttl: config::DEFAULT_CACHE_TTL,
            timeout: config::DEFAULT_TIMEOUT,
            throttle: config::DEFAULT_THROTTLE,
            offline: false,
            reference_date: None,
            rounding: Rounding::Full,
        }
    }
}

impl SphaeraSdkBuilder {
    /// Use a custom price provider instead of Yahoo Finance.
    pub fn provider<P: PriceProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Set the markets shown on the dashboard.
    ///
    /// Defaults to [`MarketTable::core()`].
    pub fn markets(mut self, markets: MarketTable) -> Self {
        self.markets = markets;
        self
    }

    /// Set how long fetched series stay fresh.
    ///
    /// Defaults to 5 minutes.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the HTTP request timeout for the default provider.
    ///
    /// Defaults to 30 seconds. Ignored when a custom provider is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pause after each upstream fetch.
    ///
    /// Defaults to 100 milliseconds.
    pub fn throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never calls the provider and only uses series
    /// already in the cache. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Pin the date YTD returns and export file names are computed for.
    ///
    /// When unset, every query uses the current UTC date.
    pub fn reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Set the rounding applied to exported values.
    ///
    /// Defaults to [`Rounding::Full`].
    pub fn rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Build the SDK.
    ///
    /// Creates the default HTTP provider when none was given; no data is
    /// fetched until the first query.
    pub fn build(self) -> Result<SphaeraSdk> {
        let provider = match self.provider {
            Some(provider) => provider,
            None => Box::new(YahooProvider::new(self.timeout)?),
        };
        let feed = MarketFeed::new(provider, self.cache_ttl, self.throttle, self.offline);
        Ok(SphaeraSdk {
            feed,
            markets: self.markets,
            reference_date: self.reference_date,
            rounding: self.rounding,
        })
    }
}

// ---------------------------------------------------------------------------
// SphaeraSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Sphaera SDK.
///
/// Owns the [`MarketFeed`] (provider plus series cache) and the market
/// table, and exposes query interfaces as lightweight borrowing wrappers.
///
/// Created via [`SphaeraSdk::builder()`].
pub struct SphaeraSdk {
    feed: MarketFeed,
    markets: MarketTable,
    /// Pinned reference date; `None` follows the clock.
    reference_date: Option<NaiveDate>,
    rounding: Rounding,
}

impl SphaeraSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> SphaeraSdkBuilder {
        SphaeraSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access per-ticker metrics.
    pub fn metrics(&self) -> queries::MetricsQuery<'_> {
        queries::MetricsQuery::new(&self.feed, self.reference_date())
    }

    /// Access the market overview (rows, snapshot, filters).
    pub fn overview(&self) -> queries::OverviewQuery<'_> {
        queries::OverviewQuery::new(&self.feed, &self.markets, self.reference_date())
    }

    /// Access the CSV export.
    pub fn export(&self) -> queries::ExportQuery<'_> {
        queries::ExportQuery::new(self.overview(), self.rounding, self.reference_date())
    }

    // -- Metadata and utility methods --------------------------------------

    pub fn markets(&self) -> &MarketTable {
        &self.markets
    }

    /// The pinned reference date, or today (UTC) when none was set.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(today)
    }

    /// Whether the reference date was pinned at build time.
    pub fn is_pinned(&self) -> bool {
        self.reference_date.is_some()
    }

    /// Clear every cached series so the next query refetches.
    pub fn refresh(&self) {
        self.feed.clear_cache();
    }

    /// Return a reference to the underlying [`MarketFeed`] for advanced usage.
    pub fn feed(&self) -> &MarketFeed {
        &self.feed
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SphaeraSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SphaeraSdk(markets={}, cached_series={}, reference_date={}, offline={})",
            self.markets.len(),
            self.feed.cached(),
            self.reference_date(),
            self.feed.offline
        )
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
