//! Dashboard rows and headline snapshot across every configured market.

use chrono::NaiveDate;

use crate::error::{Result, SphaeraError};
use crate::feed::MarketFeed;
use crate::metrics;
use crate::models::{DashboardRow, MarketEntry, MarketSnapshot, MarketTable};
use crate::queries::MetricsQuery;

// ---------------------------------------------------------------------------
// OverviewQuery
// ---------------------------------------------------------------------------

/// Query interface for the market overview table.
///
/// Rows are rebuilt on every call; only the underlying series are cached.
pub struct OverviewQuery<'a> {
    feed: &'a MarketFeed,
    markets: &'a MarketTable,
    reference: NaiveDate,
}

impl<'a> OverviewQuery<'a> {
    pub fn new(feed: &'a MarketFeed, markets: &'a MarketTable, reference: NaiveDate) -> Self {
        Self {
            feed,
            markets,
            reference,
        }
    }

    /// One row per market, in table order, fetched sequentially.
    pub fn rows(&self) -> Vec<DashboardRow> {
        let rows: Vec<DashboardRow> = self.markets.iter().map(|e| self.build_row(e)).collect();
        let reporting = rows.iter().filter(|r| r.return_1m.is_available()).count();
        tracing::info!(markets = rows.len(), reporting, "overview rebuilt");
        rows
    }

    /// The row for a single country.
    pub fn row(&self, country: &str) -> Result<DashboardRow> {
        let entry = self
            .markets
            .get(country)
            .ok_or_else(|| SphaeraError::NotFound(format!("Unknown market: {}", country)))?;
        Ok(self.build_row(entry))
    }

    /// Best and worst performers, averages and leaders across all rows.
    pub fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot::from_rows(&self.rows())
    }

    /// Rows whose 10-year yield is at least `threshold` percent.
    pub fn min_yield(&self, threshold: f64) -> Vec<DashboardRow> {
        self.rows()
            .into_iter()
            .filter(|r| r.yield_10y >= threshold)
            .collect()
    }

    fn build_row(&self, entry: &MarketEntry) -> DashboardRow {
        let query = MetricsQuery::new(self.feed, self.reference);
        let index = query.derived(&entry.index);
        let fx = query.derived(&entry.currency);
        let rates = metrics::derived_rates(
            entry.yield_10y,
            entry.policy_rate,
            entry.previous_yield,
            entry.inflation,
        );
        tracing::debug!(country = %entry.country, index = %entry.index, "row computed");
        DashboardRow::new(entry, &index, &fx, rates)
    }
}
