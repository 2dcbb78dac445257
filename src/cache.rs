//! Time-bounded cache of fetched price series.
//!
//! Entries are keyed by `(ticker, period)` and expire after a fixed
//! freshness window. Invalidation is all-or-nothing via [`SeriesCache::clear`].

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::PriceSeries;

struct CachedSeries {
    series: PriceSeries,
    fetched_at: Instant,
}

/// Holds recently fetched series for a fixed time-to-live.
pub struct SeriesCache {
    /// How long an entry stays fresh.
    pub ttl: Duration,
    entries: HashMap<(String, String), CachedSeries>,
}

impl SeriesCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Return a fresh cached series, dropping the entry if it has expired.
    pub fn get(&mut self, ticker: &str, period: &str) -> Option<PriceSeries> {
        let key = (ticker.to_string(), period.to_string());
        let fresh = self
            .entries
            .get(&key)
            .map(|entry| entry.fetched_at.elapsed() < self.ttl)?;
        if fresh {
            self.entries.get(&key).map(|entry| entry.series.clone())
        } else {
            self.entries.remove(&key);
            None
        }
    }

    pub fn insert(&mut self, ticker: &str, period: &str, series: PriceSeries) {
        self.entries.insert(
            (ticker.to_string(), period.to_string()),
            CachedSeries {
                series,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Number of stored entries, including any not yet found to be stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
