//! Provider tests: series construction, chart parsing, static provider and
//! market tables.

mod common;

use std::io::Write;

use common::{date, series_from};
use sphaera_em_sdk::models::{MarketEntry, PricePoint};
use sphaera_em_sdk::provider::memory::period_start;
use sphaera_em_sdk::provider::yahoo::parse_chart;
use sphaera_em_sdk::{MarketTable, PriceProvider, PriceSeries, SphaeraError, StaticProvider};
use tempfile::NamedTempFile;

// ---------------------------------------------------------------------------
// PriceSeries
// ---------------------------------------------------------------------------

#[test]
fn series_is_sorted_and_deduplicated() {
    let series = PriceSeries::new(vec![
        PricePoint::new(date(2025, 1, 3), 103.0),
        PricePoint::new(date(2025, 1, 1), 101.0),
        PricePoint::new(date(2025, 1, 2), 102.0),
        PricePoint::new(date(2025, 1, 2), 102.5),
    ]);
    let closes: Vec<f64> = series.closes().collect();
    assert_eq!(closes, vec![101.0, 102.5, 103.0]);
    assert_eq!(series.first().unwrap().date, date(2025, 1, 1));
    assert_eq!(series.last().unwrap().date, date(2025, 1, 3));
}

#[test]
fn series_drops_unusable_closes() {
    let series = PriceSeries::new(vec![
        PricePoint::new(date(2025, 1, 1), f64::NAN),
        PricePoint::new(date(2025, 1, 2), 0.0),
        PricePoint::new(date(2025, 1, 3), -4.0),
        PricePoint::new(date(2025, 1, 6), f64::INFINITY),
        PricePoint::new(date(2025, 1, 7), 12.0),
    ]);
    assert_eq!(series.len(), 1);
    assert_eq!(series.close_at(0), Some(12.0));
}

// ---------------------------------------------------------------------------
// parse_chart
// ---------------------------------------------------------------------------

const CHART_OK: &str = r#"{
  "chart": {
    "result": [{
      "meta": {"symbol": "EWZ", "gmtoffset": -18000},
      "timestamp": [1735828200, 1735914600, 1736173800],
      "indicators": {"quote": [{"close": [25.1, null, 25.9], "open": [25.0, 25.2, 25.5]}]}
    }],
    "error": null
  }
}"#;

#[test]
fn parse_chart_skips_null_closes() {
    let series = parse_chart(CHART_OK).unwrap();
    assert_eq!(series.len(), 2);
    // 2025-01-02 14:30 UTC and 2025-01-06 14:30 UTC, New York time.
    assert_eq!(series.first().unwrap().date, date(2025, 1, 2));
    assert_eq!(series.last().unwrap().date, date(2025, 1, 6));
    assert_eq!(series.last().unwrap().close, 25.9);
}

#[test]
fn parse_chart_error_payload_is_upstream_error() {
    let body = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
    let err = parse_chart(body).unwrap_err();
    match err {
        SphaeraError::Upstream(msg) => assert!(msg.contains("delisted")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parse_chart_without_timestamps_is_empty() {
    let body = r#"{"chart": {"result": [{"meta": {}, "indicators": {"quote": [{}]}}], "error": null}}"#;
    assert!(parse_chart(body).unwrap().is_empty());
}

#[test]
fn parse_chart_skips_timestamps_out_of_range() {
    let body = r#"{"chart": {"result": [{
        "meta": {"gmtoffset": 3600},
        "timestamp": [9223372036854775800, 1736173800],
        "indicators": {"quote": [{"close": [10.0, 25.9]}]}
    }], "error": null}}"#;
    let series = parse_chart(body).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series.first().unwrap().date, date(2025, 1, 6));
}

#[test]
fn parse_chart_rejects_malformed_body() {
    assert!(matches!(parse_chart("<html>"), Err(SphaeraError::Json(_))));
}

// ---------------------------------------------------------------------------
// StaticProvider
// ---------------------------------------------------------------------------

#[test]
fn static_provider_trims_to_period() {
    let closes: Vec<f64> = (0..400).map(|i| 10.0 + i as f64).collect();
    let provider = StaticProvider::new().with_series("EWZ", series_from(date(2024, 2, 1), &closes));

    let last = date(2024, 2, 1) + chrono::Days::new(399);
    let month = provider.fetch("EWZ", "1mo").unwrap();
    assert_eq!(month.last().unwrap().date, last);
    assert!(month.first().unwrap().date >= last - chrono::Months::new(1));

    let ytd = provider.fetch("EWZ", "ytd").unwrap();
    assert_eq!(ytd.first().unwrap().date, date(2025, 1, 1));

    assert_eq!(provider.fetch("EWZ", "max").unwrap().len(), 400);
}

#[test]
fn static_provider_unknown_ticker_and_period() {
    let provider = StaticProvider::new().with_series("EWZ", series_from(date(2025, 1, 1), &[1.0]));
    assert!(matches!(provider.fetch("EWW", "1mo"), Err(SphaeraError::NotFound(_))));
    assert!(matches!(
        provider.fetch("EWZ", "fortnight"),
        Err(SphaeraError::InvalidArgument(_))
    ));
}

#[test]
fn static_provider_loads_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Close").unwrap();
    writeln!(file, "2025-01-03,101.5").unwrap();
    writeln!(file, "2025-01-02,100.0").unwrap();
    file.flush().unwrap();

    let mut provider = StaticProvider::new();
    provider.load_csv_path("EPOL", file.path()).unwrap();
    let series = provider.fetch("EPOL", "5d").unwrap();
    assert_eq!(series.closes().collect::<Vec<_>>(), vec![100.0, 101.5]);
    assert_eq!(provider.tickers(), vec!["EPOL"]);
}

#[test]
fn static_provider_rejects_bad_csv() {
    let mut provider = StaticProvider::new();
    let err = provider
        .load_csv("EPOL", "Date,Close\nnot-a-date,1.0\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, SphaeraError::Csv(_)));
}

#[test]
fn period_start_units() {
    let last = date(2025, 3, 31);
    assert_eq!(period_start(last, "5d").unwrap(), Some(date(2025, 3, 26)));
    assert_eq!(period_start(last, "2wk").unwrap(), Some(date(2025, 3, 17)));
    assert_eq!(period_start(last, "1mo").unwrap(), Some(date(2025, 2, 28)));
    assert_eq!(period_start(last, "1y").unwrap(), Some(date(2024, 3, 31)));
    assert_eq!(period_start(last, "max").unwrap(), None);
    assert!(period_start(last, "6").is_err());
    assert!(period_start(last, "mo").is_err());
}

// ---------------------------------------------------------------------------
// MarketTable
// ---------------------------------------------------------------------------

#[test]
fn builtin_tables() {
    let core = MarketTable::core();
    assert_eq!(core.len(), 10);
    assert!(core.iter().all(|e| e.inflation.is_none()));

    let expanded = MarketTable::expanded();
    assert_eq!(expanded.len(), 26);
    assert_eq!(expanded.iter().filter(|e| e.index == "N/A").count(), 5);
    assert!(expanded.iter().all(|e| e.previous_yield.is_some()));
    assert_eq!(expanded.get("Brazil").unwrap().previous_yield, Some(12.3));
}

#[test]
fn market_table_from_json() {
    let json = r#"[
        {"country": "Chile", "flag": "🇨🇱", "index": "ECH", "currency": "CLP=X",
         "yield_10y": 5.8, "policy_rate": 5.75, "inflation": 4.2},
        {"country": "Kenya", "index": "N/A", "currency": "KES=X",
         "yield_10y": 16.5, "policy_rate": 12.75}
    ]"#;
    let table = MarketTable::from_json(json).unwrap();
    assert_eq!(table.countries(), vec!["Chile", "Kenya"]);
    assert_eq!(table.get("Chile").unwrap().inflation, Some(4.2));
    assert_eq!(table.get("Kenya").unwrap().flag, "");
    assert_eq!(table.get("Kenya").unwrap().previous_yield, None);
}

#[test]
fn market_table_rejects_duplicates() {
    let entry = MarketEntry::new("Chile", "🇨🇱", "ECH", "CLP=X", 5.8, 5.75);
    let err = MarketTable::new(vec![entry.clone(), entry]).unwrap_err();
    assert!(matches!(err, SphaeraError::InvalidArgument(_)));
}

#[test]
fn market_table_from_json_path() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "{}",
        serde_json::to_string(&MarketTable::core()).unwrap()
    )
    .unwrap();
    file.flush().unwrap();

    let table = MarketTable::from_json_path(file.path()).unwrap();
    assert_eq!(table, MarketTable::core());
}
