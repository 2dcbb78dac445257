//! Query modules for the Sphaera SDK.
//!
//! Each module provides a query struct that borrows from the SDK's
//! [`MarketFeed`](crate::feed::MarketFeed) and market table. Metric
//! lookups never fail; only export and argument checks report errors.

pub mod export;
pub mod metrics;
pub mod overview;

pub use export::ExportQuery;
pub use metrics::MetricsQuery;
pub use overview::OverviewQuery;
