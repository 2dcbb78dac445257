//! In-memory provider for offline use, fixtures and replaying saved prices.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Deserialize;

use crate::error::{Result, SphaeraError};
use crate::models::{PricePoint, PriceSeries};
use crate::provider::PriceProvider;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "date", alias = "DATE")]
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(alias = "close", alias = "CLOSE")]
    #[serde(rename = "Close")]
    close: f64,
}

/// Serves preloaded series, trimmed to the requested period.
///
/// The period window is measured back from the series' own last date, so
/// stored history behaves like a snapshot taken on that day.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    series: HashMap<String, PriceSeries>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ticker: &str, series: PriceSeries) {
        self.series.insert(ticker.to_string(), series);
    }

    pub fn with_series(mut self, ticker: &str, series: PriceSeries) -> Self {
        self.insert(ticker, series);
        self
    }

    /// Load `Date,Close` rows (ISO dates) for one ticker.
    pub fn load_csv<R: Read>(&mut self, ticker: &str, reader: R) -> Result<()> {
        let mut rdr = csv::Reader::from_reader(reader);
        let points = rdr
            .deserialize::<CsvRow>()
            .map(|row| row.map(|r| PricePoint::new(r.date, r.close)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.insert(ticker, PriceSeries::new(points));
        Ok(())
    }

    pub fn load_csv_path<P: AsRef<Path>>(&mut self, ticker: &str, path: P) -> Result<()> {
        let file = std::fs::File::open(path)?;
        self.load_csv(ticker, file)
    }

    pub fn tickers(&self) -> Vec<&str> {
        let mut tickers: Vec<&str> = self.series.keys().map(String::as_str).collect();
        tickers.sort_unstable();
        tickers
    }
}

impl PriceProvider for StaticProvider {
    fn fetch(&self, ticker: &str, period: &str) -> Result<PriceSeries> {
        let series = self
            .series
            .get(ticker)
            .ok_or_else(|| SphaeraError::NotFound(format!("No series for ticker: {}", ticker)))?;
        let Some(last) = series.last().map(|p| p.date) else {
            return Ok(PriceSeries::empty());
        };
        match period_start(last, period)? {
            Some(start) => Ok(series.iter().filter(|p| p.date >= start).copied().collect()),
            None => Ok(series.clone()),
        }
    }
}

/// First date covered by a range like `"5d"`, `"2wk"`, `"6mo"`, `"1y"`,
/// `"ytd"` or `"max"` ending on `last`. `None` means unbounded.
pub fn period_start(last: NaiveDate, period: &str) -> Result<Option<NaiveDate>> {
    let invalid = || SphaeraError::InvalidArgument(format!("Unknown period: {}", period));
    match period {
        "max" => return Ok(None),
        "ytd" => return Ok(NaiveDate::from_ymd_opt(last.year(), 1, 1)),
        _ => {}
    }

    let split = period
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (count, unit) = period.split_at(split);
    let n: u32 = count.parse().map_err(|_| invalid())?;

    let start = match unit {
        "d" => last.checked_sub_days(Days::new(u64::from(n))),
        "wk" => last.checked_sub_days(Days::new(u64::from(n) * 7)),
        "mo" => last.checked_sub_months(Months::new(n)),
        "y" => last.checked_sub_months(Months::new(n.saturating_mul(12))),
        _ => return Err(invalid()),
    };
    Ok(start)
}
