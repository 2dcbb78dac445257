//! Price-series providers.
//!
//! A provider turns `(ticker, period)` into a [`PriceSeries`]. Periods use
//! the upstream range vocabulary (`"5d"`, `"1mo"`, `"6mo"`, `"1y"`, ...).
//! Providers report failures as errors; the SDK decides how to degrade.

pub mod memory;
pub mod yahoo;

pub use memory::StaticProvider;
pub use yahoo::YahooProvider;

use std::rc::Rc;

use crate::error::Result;
use crate::models::PriceSeries;

/// Source of daily closing prices.
pub trait PriceProvider {
    fn fetch(&self, ticker: &str, period: &str) -> Result<PriceSeries>;
}

impl<P: PriceProvider + ?Sized> PriceProvider for Box<P> {
    fn fetch(&self, ticker: &str, period: &str) -> Result<PriceSeries> {
        (**self).fetch(ticker, period)
    }
}

impl<P: PriceProvider + ?Sized> PriceProvider for Rc<P> {
    fn fetch(&self, ticker: &str, period: &str) -> Result<PriceSeries> {
        (**self).fetch(ticker, period)
    }
}
