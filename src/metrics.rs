//! Pure metric computations over daily closing prices.
//!
//! Every function here is total: short, empty or degenerate input yields a
//! [`Metric::Unavailable`] carrying the reason, never a panic or an error.
//! Values are percentages at full precision; rounding is a presentation
//! concern (see [`Rounding`](crate::models::Rounding)).

use chrono::{Datelike, NaiveDate};

use crate::config::{MIN_VOLATILITY_OBSERVATIONS, RETURN_WINDOWS, TRADING_DAYS_PER_YEAR};
use crate::models::{DerivedMetrics, DerivedRates, Fallback, Metric, PricePoint, PriceSeries};

/// Percent change from the close `days` sessions ago to the latest close.
///
/// Needs at least `days + 1` observations.
pub fn trailing_return(series: &PriceSeries, days: usize) -> Metric {
    if series.len() < days.saturating_add(1) {
        return Metric::Unavailable(Fallback::InsufficientHistory);
    }
    let last = series.len() - 1;
    // Saturating keeps the lookback on the earliest close.
    let base = last.saturating_sub(days);
    match (series.close_at(last), series.close_at(base)) {
        (Some(current), Some(past)) => Metric::computed((current / past - 1.0) * 100.0),
        _ => Metric::Unavailable(Fallback::InsufficientHistory),
    }
}

/// Sample standard deviation of daily returns, annualized with √252, in percent.
///
/// Needs at least 31 observations (30 daily returns).
pub fn annualized_volatility(series: &PriceSeries) -> Metric {
    if series.len() < MIN_VOLATILITY_OBSERVATIONS {
        return Metric::Unavailable(Fallback::InsufficientHistory);
    }
    let returns = daily_returns(series);
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Metric::computed(variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt() * 100.0)
}

/// Percent change from the first close of `reference`'s calendar year to the
/// latest close on or before `reference`.
pub fn year_to_date_return(series: &PriceSeries, reference: NaiveDate) -> Metric {
    let mut in_year = series
        .iter()
        .filter(|p| p.date.year() == reference.year() && p.date <= reference);
    let Some(start) = in_year.next() else {
        return Metric::Unavailable(Fallback::InsufficientHistory);
    };
    let current = in_year.last().unwrap_or(start);
    Metric::computed((current.close / start.close - 1.0) * 100.0)
}

/// Term premium, yield change and real rate from configured rates.
///
/// A missing previous yield means no change; a missing inflation figure
/// leaves the real rate undefined.
pub fn derived_rates(
    yield_10y: f64,
    policy_rate: f64,
    previous_yield: Option<f64>,
    inflation: Option<f64>,
) -> DerivedRates {
    DerivedRates {
        term_premium: yield_10y - policy_rate,
        yield_delta: yield_10y - previous_yield.unwrap_or(yield_10y),
        real_rate: inflation.map(|i| policy_rate - i),
    }
}

/// All standard statistics for one ticker.
///
/// `series` drives trailing returns, volatility and the latest price;
/// `ytd_series` must reach back to the start of `reference`'s year.
pub fn derive(
    ticker: &str,
    series: &PriceSeries,
    ytd_series: &PriceSeries,
    reference: NaiveDate,
) -> DerivedMetrics {
    let [day, week, month, quarter] = RETURN_WINDOWS;
    DerivedMetrics {
        ticker: ticker.to_string(),
        return_1d: trailing_return(series, day),
        return_1w: trailing_return(series, week),
        return_1m: trailing_return(series, month),
        return_3m: trailing_return(series, quarter),
        volatility: annualized_volatility(series),
        ytd: year_to_date_return(ytd_series, reference),
        price: series.last().map(|p| p.close),
    }
}

/// Rebase a series so its first close reads 100.
pub fn normalized(series: &PriceSeries) -> PriceSeries {
    let Some(base) = series.first().map(|p| p.close) else {
        return PriceSeries::empty();
    };
    series
        .iter()
        .map(|p| PricePoint::new(p.date, p.close / base * 100.0))
        .collect()
}

/// Simple period-over-period changes; the undefined first return is omitted.
fn daily_returns(series: &PriceSeries) -> Vec<f64> {
    series
        .points()
        .windows(2)
        .map(|w| w[1].close / w[0].close - 1.0)
        .collect()
}
