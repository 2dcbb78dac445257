//! Cached, throttled access to a price provider.
//!
//! All upstream traffic goes through [`MarketFeed::series`]: placeholder
//! tickers are rejected before any call, fresh cache entries are served
//! directly, and every real fetch is followed by a short pause so that a
//! full dashboard refresh does not trip upstream rate limits.

use std::cell::RefCell;
use std::thread;
use std::time::Duration;

use crate::cache::SeriesCache;
use crate::config;
use crate::error::{Result, SphaeraError};
use crate::models::PriceSeries;
use crate::provider::PriceProvider;

/// Wraps a [`PriceProvider`] with a [`SeriesCache`] and a fetch throttle.
pub struct MarketFeed {
    provider: Box<dyn PriceProvider>,
    /// The series cache, shared by all query wrappers.
    pub cache: RefCell<SeriesCache>,
    /// Pause after each upstream fetch.
    pub throttle: Duration,
    /// If true, never call the provider (serve cached series only).
    pub offline: bool,
}

impl MarketFeed {
    pub fn new(
        provider: Box<dyn PriceProvider>,
        cache_ttl: Duration,
        throttle: Duration,
        offline: bool,
    ) -> Self {
        Self {
            provider,
            cache: RefCell::new(SeriesCache::new(cache_ttl)),
            throttle,
            offline,
        }
    }

    /// Fetch a series for `ticker` covering `period`, through the cache.
    pub fn series(&self, ticker: &str, period: &str) -> Result<PriceSeries> {
        if config::is_placeholder_ticker(ticker) {
            return Err(SphaeraError::MissingTicker(ticker.to_string()));
        }

        if let Some(series) = self.cache.borrow_mut().get(ticker, period) {
            tracing::debug!(ticker, period, "series cache hit");
            return Ok(series);
        }

        if self.offline {
            return Err(SphaeraError::NotFound(format!(
                "Series {} ({}) not cached and offline mode is enabled",
                ticker, period
            )));
        }

        tracing::debug!(ticker, period, "fetching series");
        let result = self.provider.fetch(ticker, period);
        if !self.throttle.is_zero() {
            thread::sleep(self.throttle);
        }

        match result {
            Ok(series) => {
                self.cache
                    .borrow_mut()
                    .insert(ticker, period, series.clone());
                Ok(series)
            }
            Err(e) => {
                tracing::warn!(ticker, period, error = %e, "failed to fetch series");
                Err(e)
            }
        }
    }

    /// Drop every cached series.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.borrow_mut();
        let dropped = cache.len();
        cache.clear();
        tracing::info!(dropped, "series cache cleared");
    }

    /// Number of cached series.
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }
}
