use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

pub const YAHOO_CHART_BASE: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Ticker used in market tables for countries without a listed market.
pub const NO_MARKET: &str = "N/A";

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
pub const MIN_VOLATILITY_OBSERVATIONS: usize = 31;

/// Trailing-return windows, in sessions: 1D, 1W, 1M, 3M.
pub const RETURN_WINDOWS: [usize; 4] = [1, 7, 30, 90];

/// History fetched for trailing returns and volatility.
pub const METRICS_PERIOD: &str = "6mo";
/// History fetched for year-to-date performance.
pub const YTD_PERIOD: &str = "1y";
/// History fetched for the latest price alone.
pub const PRICE_PERIOD: &str = "5d";

pub const EXPORT_PREFIX: &str = "sphaera_em";

/// Display label -> provider range for the historical comparison view.
pub fn history_periods() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("1 Month", "1mo"),
        ("3 Months", "3mo"),
        ("6 Months", "6mo"),
        ("1 Year", "1y"),
    ])
}

pub fn is_placeholder_ticker(ticker: &str) -> bool {
    let ticker = ticker.trim();
    ticker.is_empty() || ticker.eq_ignore_ascii_case(NO_MARKET)
}

pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
