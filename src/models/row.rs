use serde::{Serialize, Serializer};

use crate::config::NO_MARKET;
use crate::models::{DerivedMetrics, DerivedRates, MarketEntry, Metric, Rounding};

// ---------------------------------------------------------------------------
// DashboardRow — One country in the overview table
// ---------------------------------------------------------------------------

/// A market joined with its index and currency metrics and derived rates.
///
/// Field names serialize to the overview's column headers, which the CSV
/// export uses verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardRow {
    #[serde(rename = "Flag")]
    pub flag: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Index")]
    pub index: String,
    #[serde(rename = "Price", serialize_with = "price_or_sentinel")]
    pub price: Option<f64>,
    #[serde(rename = "1D %")]
    pub return_1d: Metric,
    #[serde(rename = "1W %")]
    pub return_1w: Metric,
    #[serde(rename = "1M %")]
    pub return_1m: Metric,
    #[serde(rename = "3M %")]
    pub return_3m: Metric,
    #[serde(rename = "YTD %")]
    pub ytd: Metric,
    #[serde(rename = "Vol")]
    pub volatility: Metric,
    #[serde(rename = "FX 1M %")]
    pub fx_1m: Metric,
    #[serde(rename = "10Y Yield")]
    pub yield_10y: f64,
    #[serde(rename = "Yield Δ")]
    pub yield_delta: f64,
    #[serde(rename = "Inflation")]
    pub inflation: Option<f64>,
    #[serde(rename = "Real Rate")]
    pub real_rate: Option<f64>,
    #[serde(rename = "Policy Rate")]
    pub policy_rate: f64,
    #[serde(rename = "Term Premium")]
    pub term_premium: f64,
}

impl DashboardRow {
    /// Column headers, in serialization order.
    pub const HEADERS: [&'static str; 17] = [
        "Flag",
        "Country",
        "Index",
        "Price",
        "1D %",
        "1W %",
        "1M %",
        "3M %",
        "YTD %",
        "Vol",
        "FX 1M %",
        "10Y Yield",
        "Yield Δ",
        "Inflation",
        "Real Rate",
        "Policy Rate",
        "Term Premium",
    ];

    pub fn new(
        entry: &MarketEntry,
        index: &DerivedMetrics,
        fx: &DerivedMetrics,
        rates: DerivedRates,
    ) -> Self {
        Self {
            flag: entry.flag.clone(),
            country: entry.country.clone(),
            index: entry.index.clone(),
            price: index.price,
            return_1d: index.return_1d,
            return_1w: index.return_1w,
            return_1m: index.return_1m,
            return_3m: index.return_3m,
            ytd: index.ytd,
            volatility: index.volatility,
            fx_1m: fx.return_1m,
            yield_10y: entry.yield_10y,
            yield_delta: rates.yield_delta,
            inflation: entry.inflation,
            real_rate: rates.real_rate,
            policy_rate: entry.policy_rate,
            term_premium: rates.term_premium,
        }
    }

    /// Copy with every numeric field rounded for presentation.
    pub fn rounded(&self, rounding: Rounding) -> Self {
        Self {
            flag: self.flag.clone(),
            country: self.country.clone(),
            index: self.index.clone(),
            price: self.price.map(|v| rounding.apply(v)),
            return_1d: self.return_1d.rounded(rounding),
            return_1w: self.return_1w.rounded(rounding),
            return_1m: self.return_1m.rounded(rounding),
            return_3m: self.return_3m.rounded(rounding),
            ytd: self.ytd.rounded(rounding),
            volatility: self.volatility.rounded(rounding),
            fx_1m: self.fx_1m.rounded(rounding),
            yield_10y: rounding.apply(self.yield_10y),
            yield_delta: rounding.apply(self.yield_delta),
            inflation: self.inflation.map(|v| rounding.apply(v)),
            real_rate: self.real_rate.map(|v| rounding.apply(v)),
            policy_rate: rounding.apply(self.policy_rate),
            term_premium: rounding.apply(self.term_premium),
        }
    }
}

fn price_or_sentinel<S: Serializer>(price: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match price {
        Some(p) => serializer.serialize_f64(*p),
        None => serializer.serialize_str(NO_MARKET),
    }
}

// ---------------------------------------------------------------------------
// Leader / MarketSnapshot — Headline figures above the table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Leader {
    pub flag: String,
    pub country: String,
    pub value: f64,
}

impl Leader {
    pub(crate) fn from_row(row: &DashboardRow, value: f64) -> Self {
        Self {
            flag: row.flag.clone(),
            country: row.country.clone(),
            value,
        }
    }
}

/// Headline statistics across all rows.
///
/// Return-based leaders consider only rows whose metric was actually
/// computed; a country with no data never wins "best" or "worst".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MarketSnapshot {
    pub best_1m: Option<Leader>,
    pub worst_1m: Option<Leader>,
    pub average_1m: Option<f64>,
    pub positive_1m: usize,
    pub reporting_1m: usize,
    pub best_ytd: Option<Leader>,
    pub highest_yield: Option<Leader>,
    pub strongest_currency: Option<Leader>,
}

impl MarketSnapshot {
    pub fn from_rows(rows: &[DashboardRow]) -> Self {
        let reporting: Vec<(&DashboardRow, f64)> = rows
            .iter()
            .filter_map(|r| r.return_1m.get().map(|v| (r, v)))
            .collect();
        let average_1m = if reporting.is_empty() {
            None
        } else {
            Some(reporting.iter().map(|(_, v)| v).sum::<f64>() / reporting.len() as f64)
        };

        Self {
            best_1m: leader(reporting.iter().copied(), |a, b| a > b),
            worst_1m: leader(reporting.iter().copied(), |a, b| a < b),
            average_1m,
            positive_1m: reporting.iter().filter(|(_, v)| *v > 0.0).count(),
            reporting_1m: reporting.len(),
            best_ytd: leader(
                rows.iter().filter_map(|r| r.ytd.get().map(|v| (r, v))),
                |a, b| a > b,
            ),
            highest_yield: leader(rows.iter().map(|r| (r, r.yield_10y)), |a, b| a > b),
            strongest_currency: leader(
                rows.iter().filter_map(|r| r.fx_1m.get().map(|v| (r, v))),
                |a, b| a > b,
            ),
        }
    }
}

/// Best candidate under `better`; ties keep the earliest row.
fn leader<'a, I, F>(candidates: I, better: F) -> Option<Leader>
where
    I: Iterator<Item = (&'a DashboardRow, f64)>,
    F: Fn(f64, f64) -> bool,
{
    candidates
        .reduce(|best, next| if better(next.1, best.1) { next } else { best })
        .map(|(row, value)| Leader::from_row(row, value))
}
