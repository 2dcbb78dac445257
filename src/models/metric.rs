use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Fallback — Why a metric could not be computed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// The market has no listed ticker.
    MissingTicker,
    /// The provider failed or returned unusable data.
    FetchFailure,
    /// The series is too short for the requested window.
    InsufficientHistory,
}

// ---------------------------------------------------------------------------
// Metric — Computed value or documented fallback
// ---------------------------------------------------------------------------

/// A derived statistic, in percent.
///
/// Unavailable metrics read as `0.0` through [`Metric::value`] and serialize
/// as `0.0`, so sorting and averaging across markets stay well defined.
/// Use [`Metric::is_available`] or [`Metric::get`] to tell a flat market
/// from missing data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Value(f64),
    Unavailable(Fallback),
}

impl Metric {
    /// Wrap a computed number; non-finite results degrade to a fetch failure.
    pub fn computed(value: f64) -> Self {
        if value.is_finite() {
            Metric::Value(value)
        } else {
            Metric::Unavailable(Fallback::FetchFailure)
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Metric::Value(v) => *v,
            Metric::Unavailable(_) => 0.0,
        }
    }

    pub fn get(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            Metric::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Value(_))
    }

    pub fn fallback(&self) -> Option<Fallback> {
        match self {
            Metric::Value(_) => None,
            Metric::Unavailable(reason) => Some(*reason),
        }
    }

    pub fn rounded(&self, rounding: Rounding) -> Self {
        match self {
            Metric::Value(v) => Metric::Value(rounding.apply(*v)),
            unavailable => *unavailable,
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

// ---------------------------------------------------------------------------
// Rounding — Presentation precision
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Keep full floating-point precision.
    #[default]
    Full,
    /// Round half away from zero to this many decimal places.
    Decimals(u32),
}

impl Rounding {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Rounding::Full => value,
            Rounding::Decimals(places) => {
                let factor = 10f64.powi(i32::try_from(*places).unwrap_or(i32::MAX));
                let scaled = value * factor;
                // Past f64 precision there is nothing left to round.
                if scaled.is_finite() {
                    scaled.round() / factor
                } else {
                    value
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// DerivedMetrics — Per-ticker statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DerivedMetrics {
    pub ticker: String,
    pub return_1d: Metric,
    pub return_1w: Metric,
    pub return_1m: Metric,
    pub return_3m: Metric,
    pub volatility: Metric,
    pub ytd: Metric,
    /// Latest close, `None` when no price is available.
    pub price: Option<f64>,
}

impl DerivedMetrics {
    /// Every field set to the same fallback.
    pub fn unavailable(ticker: &str, reason: Fallback) -> Self {
        let metric = Metric::Unavailable(reason);
        Self {
            ticker: ticker.to_string(),
            return_1d: metric,
            return_1w: metric,
            return_1m: metric,
            return_3m: metric,
            volatility: metric,
            ytd: metric,
            price: None,
        }
    }

    pub fn rounded(&self, rounding: Rounding) -> Self {
        Self {
            ticker: self.ticker.clone(),
            return_1d: self.return_1d.rounded(rounding),
            return_1w: self.return_1w.rounded(rounding),
            return_1m: self.return_1m.rounded(rounding),
            return_3m: self.return_3m.rounded(rounding),
            volatility: self.volatility.rounded(rounding),
            ytd: self.ytd.rounded(rounding),
            price: self.price.map(|p| rounding.apply(p)),
        }
    }
}

// ---------------------------------------------------------------------------
// DerivedRates — Yield and policy-rate arithmetic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DerivedRates {
    pub term_premium: f64,
    pub yield_delta: f64,
    /// Policy rate minus inflation; `None` when inflation is not recorded.
    pub real_rate: Option<f64>,
}
