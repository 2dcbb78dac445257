use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SphaeraError};

// ---------------------------------------------------------------------------
// MarketEntry — Static per-country reference data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MarketEntry {
    pub country: String,
    #[serde(default)]
    pub flag: String,
    /// Equity index ticker, or [`NO_MARKET`](crate::config::NO_MARKET).
    pub index: String,
    /// Currency pair ticker against USD.
    pub currency: String,
    pub yield_10y: f64,
    pub policy_rate: f64,
    #[serde(default)]
    pub inflation: Option<f64>,
    /// Manually recorded prior-period 10-year yield.
    #[serde(default)]
    pub previous_yield: Option<f64>,
}

impl MarketEntry {
    pub fn new(
        country: &str,
        flag: &str,
        index: &str,
        currency: &str,
        yield_10y: f64,
        policy_rate: f64,
    ) -> Self {
        Self {
            country: country.to_string(),
            flag: flag.to_string(),
            index: index.to_string(),
            currency: currency.to_string(),
            yield_10y,
            policy_rate,
            inflation: None,
            previous_yield: None,
        }
    }

    pub fn with_inflation(mut self, inflation: f64) -> Self {
        self.inflation = Some(inflation);
        self
    }

    pub fn with_previous_yield(mut self, previous_yield: f64) -> Self {
        self.previous_yield = Some(previous_yield);
        self
    }
}

// ---------------------------------------------------------------------------
// MarketTable — Ordered, immutable market configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketTable {
    entries: Vec<MarketEntry>,
}

impl MarketTable {
    /// Build a table, rejecting duplicate country names and non-finite rates.
    pub fn new(entries: Vec<MarketEntry>) -> Result<Self> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.country == entry.country) {
                return Err(SphaeraError::InvalidArgument(format!(
                    "Duplicate market: {}",
                    entry.country
                )));
            }
            let rates = [
                Some(entry.yield_10y),
                Some(entry.policy_rate),
                entry.inflation,
                entry.previous_yield,
            ];
            if rates.iter().flatten().any(|r| !r.is_finite()) {
                return Err(SphaeraError::InvalidArgument(format!(
                    "Non-finite rate for market: {}",
                    entry.country
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a JSON array of market entries.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<MarketEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, country: &str) -> Option<&MarketEntry> {
        self.entries.iter().find(|e| e.country == country)
    }

    pub fn countries(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.country.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MarketEntry> {
        self.entries.iter()
    }

    /// The ten headline markets.
    pub fn core() -> Self {
        Self {
            entries: vec![
                MarketEntry::new("Brazil", "🇧🇷", "EWZ", "BRL=X", 12.5, 10.75),
                MarketEntry::new("Mexico", "🇲🇽", "EWW", "MXN=X", 9.8, 10.25),
                MarketEntry::new("South Africa", "🇿🇦", "EZA", "ZAR=X", 10.2, 8.25),
                MarketEntry::new("Turkey", "🇹🇷", "TUR", "TRY=X", 24.5, 50.00),
                MarketEntry::new("India", "🇮🇳", "EPI", "INR=X", 7.1, 6.50),
                MarketEntry::new("China", "🇨🇳", "FXI", "CNY=X", 2.3, 3.10),
                MarketEntry::new("Indonesia", "🇮🇩", "EIDO", "IDR=X", 6.8, 6.00),
                MarketEntry::new("Poland", "🇵🇱", "EPOL", "PLN=X", 5.9, 5.75),
                MarketEntry::new("Thailand", "🇹🇭", "THD", "THB=X", 2.8, 2.50),
                MarketEntry::new("Argentina", "🇦🇷", "ARGT", "ARS=X", 28.5, 40.00),
            ],
        }
    }

    /// Twenty-six markets across Latin America, Asia, EMEA and Africa, with
    /// inflation and last month's yields. African markets without an ETF
    /// carry the placeholder index ticker.
    pub fn expanded() -> Self {
        let rows: [(&str, &str, &str, &str, f64, f64, f64, f64); 26] = [
            // Latin America
            ("Brazil", "🇧🇷", "EWZ", "BRL=X", 12.5, 10.75, 4.5, 12.3),
            ("Mexico", "🇲🇽", "EWW", "MXN=X", 9.8, 10.25, 4.3, 9.9),
            ("Argentina", "🇦🇷", "ARGT", "ARS=X", 28.5, 40.00, 211.4, 27.8),
            ("Chile", "🇨🇱", "ECH", "CLP=X", 5.8, 5.75, 4.2, 5.9),
            ("Colombia", "🇨🇴", "GXG", "COP=X", 10.2, 10.75, 5.8, 10.0),
            // Asia
            ("China", "🇨🇳", "FXI", "CNY=X", 2.3, 3.10, 0.7, 2.2),
            ("India", "🇮🇳", "EPI", "INR=X", 7.1, 6.50, 5.2, 7.0),
            ("Indonesia", "🇮🇩", "EIDO", "IDR=X", 6.8, 6.00, 1.8, 6.9),
            ("Thailand", "🇹🇭", "THD", "THB=X", 2.8, 2.50, 0.4, 2.7),
            ("Vietnam", "🇻🇳", "VNM", "VND=X", 3.5, 4.50, 3.8, 3.4),
            ("Philippines", "🇵🇭", "EPHE", "PHP=X", 6.2, 6.00, 2.9, 6.3),
            ("Malaysia", "🇲🇾", "EWM", "MYR=X", 3.8, 3.00, 1.5, 3.9),
            ("Taiwan", "🇹🇼", "EWT", "TWD=X", 1.5, 2.00, 2.3, 1.4),
            ("Japan", "🇯🇵", "EWJ", "JPY=X", 1.2, 0.25, 2.8, 1.1),
            // EMEA
            ("South Africa", "🇿🇦", "EZA", "ZAR=X", 10.2, 8.25, 5.3, 10.0),
            ("Turkey", "🇹🇷", "TUR", "TRY=X", 24.5, 50.00, 64.8, 25.2),
            ("Poland", "🇵🇱", "EPOL", "PLN=X", 5.9, 5.75, 4.7, 6.0),
            ("UAE", "🇦🇪", "UAE", "AED=X", 4.2, 5.40, 3.5, 4.1),
            ("Saudi Arabia", "🇸🇦", "KSA", "SAR=X", 4.8, 5.50, 1.6, 4.7),
            // Africa
            ("Ghana", "🇬🇭", "N/A", "GHS=X", 28.0, 29.00, 23.2, 27.5),
            ("Zambia", "🇿🇲", "N/A", "ZMW=X", 22.5, 13.50, 13.8, 22.0),
            ("Morocco", "🇲🇦", "N/A", "MAD=X", 3.5, 3.00, 1.9, 3.4),
            ("Cote d'Ivoire", "🇨🇮", "N/A", "XOF=X", 6.8, 3.50, 4.1, 6.7),
            ("Nigeria", "🇳🇬", "NGE", "NGN=X", 18.5, 27.25, 34.6, 18.0),
            ("Egypt", "🇪🇬", "EGPT", "EGP=X", 24.8, 27.25, 25.5, 24.5),
            ("Kenya", "🇰🇪", "N/A", "KES=X", 16.5, 12.75, 2.8, 16.2),
        ];

        Self {
            entries: rows
                .iter()
                .map(|&(country, flag, index, currency, y, policy, inflation, prev)| {
                    MarketEntry::new(country, flag, index, currency, y, policy)
                        .with_inflation(inflation)
                        .with_previous_yield(prev)
                })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MarketTable {
    type Item = &'a MarketEntry;
    type IntoIter = std::slice::Iter<'a, MarketEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
