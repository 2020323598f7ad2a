//! Trend analysis over a historical AQI series
//!
//! Fits an ordinary least-squares line of AQI against sample position to
//! label the direction of change, and projects a single step ahead from the
//! most recent five samples.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped AQI observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqiSample {
    pub timestamp: DateTime<Utc>,
    pub aqi: u32,
}

impl AqiSample {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, aqi: u32) -> Self {
        Self { timestamp, aqi }
    }
}

/// Direction of change of an AQI series
///
/// Classified from the least-squares slope per sample step:
/// `> 0.5` rapidly increasing, `> 0.1` increasing, `< -0.5` rapidly
/// decreasing, `< -0.1` decreasing, otherwise stable. A slope of exactly
/// 0.5 is `Increasing` and exactly 0.1 is `Stable` (strict inequalities).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    RapidlyIncreasing,
    Increasing,
    Stable,
    Decreasing,
    RapidlyDecreasing,
    /// Fewer than 3 samples
    Unknown,
    /// Analysis failed; see [`TrendResult::error`]
    Error,
}

impl Trend {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RapidlyIncreasing => "rapidly_increasing",
            Self::Increasing => "increasing",
            Self::Stable => "stable",
            Self::Decreasing => "decreasing",
            Self::RapidlyDecreasing => "rapidly_decreasing",
            Self::Unknown => "unknown",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary statistics and trend label for an AQI series
///
/// Statistics are absent for an empty series; `forecast` is absent when the
/// series has fewer than 5 samples. A failed analysis leaves neutral
/// defaults and attaches a message to `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendResult {
    /// Mean AQI, rounded to one decimal
    pub average: Option<f64>,
    pub max: Option<u32>,
    pub min: Option<u32>,
    pub trend: Trend,
    /// One-step projection from the last 5 samples, floored at 0
    pub forecast: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrendResult {
    fn empty() -> Self {
        Self {
            average: None,
            max: None,
            min: None,
            trend: Trend::Unknown,
            forecast: None,
            error: None,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            average: None,
            max: None,
            min: None,
            trend: Trend::Error,
            forecast: None,
            error: Some(message),
        }
    }
}

/// Analyze a time-ordered AQI series
///
/// The series is sorted by timestamp defensively before computing, so
/// callers may pass samples in any order. An empty series yields a result
/// with all statistics absent and trend [`Trend::Unknown`]. This function
/// never panics; an internal numeric failure is reported through the
/// result's `error` field with trend [`Trend::Error`].
#[must_use]
pub fn analyze_trend(samples: &[AqiSample]) -> TrendResult {
    if samples.is_empty() {
        return TrendResult::empty();
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by_key(|s| s.timestamp);
    let values: Vec<f64> = sorted.iter().map(|s| f64::from(s.aqi)).collect();

    let sum: f64 = values.iter().sum();
    let average = round1(sum / values.len() as f64);
    let max = sorted.iter().map(|s| s.aqi).max();
    let min = sorted.iter().map(|s| s.aqi).min();

    let trend = if values.len() >= 3 {
        match ols(&values) {
            Some((slope, _)) => classify_slope(slope),
            None => return TrendResult::failure("degenerate trend regression".to_string()),
        }
    } else {
        Trend::Unknown
    };

    let forecast = if values.len() >= 5 {
        let recent = &values[values.len() - 5..];
        match ols(recent) {
            Some((slope, intercept)) => {
                let next = slope * recent.len() as f64 + intercept;
                Some(next.max(0.0).round() as u32)
            }
            None => return TrendResult::failure("degenerate forecast regression".to_string()),
        }
    } else {
        None
    };

    TrendResult {
        average: Some(average),
        max,
        min,
        trend,
        forecast,
        error: None,
    }
}

/// Least-squares fit of `values` against their 0-based index
///
/// Returns `(slope, intercept)`, or `None` when the fit is degenerate
/// (fewer than 2 values or a non-finite result).
fn ols(values: &[f64]) -> Option<(f64, f64)> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    let slope = numerator / denominator;
    let intercept = y_mean - slope * x_mean;
    if slope.is_finite() && intercept.is_finite() {
        Some((slope, intercept))
    } else {
        None
    }
}

fn classify_slope(slope: f64) -> Trend {
    if slope > 0.5 {
        Trend::RapidlyIncreasing
    } else if slope > 0.1 {
        Trend::Increasing
    } else if slope < -0.5 {
        Trend::RapidlyDecreasing
    } else if slope < -0.1 {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
