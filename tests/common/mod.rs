//! Shared test fixtures for the Sphaera SDK integration tests.
//!
//! Provides `FixtureProvider`, an in-memory provider that records every
//! fetch, and helpers for building daily price series.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use sphaera_em_sdk::models::{MarketEntry, PricePoint};
use sphaera_em_sdk::{MarketTable, PriceProvider, PriceSeries, Result, SphaeraError, SphaeraSdk};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Reference date used throughout the integration tests.
pub fn reference() -> NaiveDate {
    date(2025, 3, 14)
}

/// One close per calendar day starting at `start`.
pub fn series_from(start: NaiveDate, closes: &[f64]) -> PriceSeries {
    closes
        .iter()
        .enumerate()
        .map(|(i, c)| PricePoint::new(start.checked_add_days(Days::new(i as u64)).unwrap(), *c))
        .collect()
}

/// Closes ending on `reference()`, growing by `daily` (e.g. 0.001 = +0.1%/day).
pub fn growing_series(len: usize, start_price: f64, daily: f64) -> PriceSeries {
    let start = reference()
        .checked_sub_days(Days::new(len as u64 - 1))
        .unwrap();
    let closes: Vec<f64> = (0..len)
        .map(|i| start_price * (1.0 + daily).powi(i as i32))
        .collect();
    series_from(start, &closes)
}

// ---------------------------------------------------------------------------
// FixtureProvider
// ---------------------------------------------------------------------------

/// Serves fixed series and records `(ticker, period)` for every fetch.
#[derive(Default)]
pub struct FixtureProvider {
    series: HashMap<String, PriceSeries>,
    failing: HashSet<String>,
    pub calls: RefCell<Vec<(String, String)>>,
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ticker: &str, series: PriceSeries) -> Self {
        self.series.insert(ticker.to_string(), series);
        self
    }

    pub fn failing(mut self, ticker: &str) -> Self {
        self.failing.insert(ticker.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls_for(&self, ticker: &str) -> usize {
        self.calls.borrow().iter().filter(|(t, _)| t == ticker).count()
    }
}

impl PriceProvider for FixtureProvider {
    fn fetch(&self, ticker: &str, period: &str) -> Result<PriceSeries> {
        self.calls
            .borrow_mut()
            .push((ticker.to_string(), period.to_string()));
        if self.failing.contains(ticker) {
            return Err(SphaeraError::Upstream(format!("simulated outage for {}", ticker)));
        }
        self.series
            .get(ticker)
            .cloned()
            .ok_or_else(|| SphaeraError::NotFound(ticker.to_string()))
    }
}

/// Three markets: one fully priced, one without an index ETF, one whose
/// index feed is down.
pub fn sample_markets() -> MarketTable {
    MarketTable::new(vec![
        MarketEntry::new("Brazil", "🇧🇷", "EWZ", "BRL=X", 12.5, 10.75)
            .with_inflation(4.5)
            .with_previous_yield(12.3),
        MarketEntry::new("Ghana", "🇬🇭", "N/A", "GHS=X", 28.0, 29.0)
            .with_inflation(23.2)
            .with_previous_yield(27.5),
        MarketEntry::new("Turkey", "🇹🇷", "TUR", "TRY=X", 24.5, 50.0),
    ])
    .unwrap()
}

/// Provider matching `sample_markets()`.
pub fn sample_provider() -> FixtureProvider {
    FixtureProvider::new()
        .with("EWZ", growing_series(120, 30.0, 0.002))
        .with("BRL=X", growing_series(120, 5.0, -0.001))
        .with("GHS=X", growing_series(120, 12.0, 0.0005))
        .with("TRY=X", growing_series(120, 30.0, 0.003))
        .failing("TUR")
}

/// SDK over `sample_markets()` with no throttle and a pinned reference date.
pub fn sample_sdk() -> (SphaeraSdk, Rc<FixtureProvider>) {
    let provider = Rc::new(sample_provider());
    let sdk = SphaeraSdk::builder()
        .provider(Rc::clone(&provider))
        .markets(sample_markets())
        .throttle(Duration::ZERO)
        .reference_date(reference())
        .build()
        .unwrap();
    (sdk, provider)
}
