//! Air Quality Index computation and time-series analysis
//!
//! This crate converts raw pollutant concentrations into a standardized AQI
//! via EPA piecewise-linear breakpoint interpolation, classifies AQI values
//! into health-risk categories with advisory recommendations, and derives
//! trend, forecast, and exposure estimates from historical AQI series:
//!
//! - [`calculate_aqi`] / [`calculate_aqi_for`] - concentration → AQI
//! - [`get_aqi_category`] / [`get_recommendations`] - AQI → category/advice
//! - [`analyze_aqi_trend`] - series → statistics, trend label, 1-step forecast
//! - [`predict_aqi`] / [`predict_with_rng`] - series → hourly forecast
//! - [`calculate_exposure_score`] - exposure history → rolling-window scores
//! - [`compare_locations`] - (name, AQI) pairs → best/worst/average
//!
//! Every component is a pure function over its inputs: no I/O, no shared
//! state, safe to call concurrently. The single source of non-determinism
//! is the noise draw in the hourly forecast, which accepts an injectable
//! random source for reproducible runs. Fetching measurements, station
//! lookup, and configuration belong to the calling layer; this crate only
//! consumes already-materialized readings and series.
//!
//! # Example
//!
//! ```rust
//! use aqi_engine::{calculate_aqi, get_aqi_category, get_recommendations};
//!
//! let aqi = calculate_aqi(15.4, "PM2.5").unwrap();
//! assert_eq!(aqi, 57);
//!
//! let category = get_aqi_category(aqi);
//! assert_eq!(category.name, "Moderate");
//!
//! for advice in get_recommendations(aqi) {
//!     println!("- {advice}");
//! }
//! ```

pub mod category;
pub mod compare;
pub mod error;
pub mod exposure;
pub mod forecast;
pub mod pollutant;
pub mod trend;

pub use category::{AQI_CATEGORIES, AqiCategory, EXTREME_HAZARDOUS};
pub use compare::{ComparisonResult, LocationComparison, LocationReading, LocationSummary};
pub use error::{AqiError, Result};
pub use exposure::{ExposureEvent, ExposureResult, RiskLevel};
pub use forecast::{ForecastPoint, MIN_SAMPLES, predict_with_rng};
pub use pollutant::{Breakpoint, Pollutant, calculate_aqi_for};
pub use trend::{AqiSample, Trend, TrendResult};

/// Calculate the AQI for a pollutant identified by name
///
/// Accepts the canonical identifiers `PM2.5`, `PM10`, `O3`, `CO`, `SO2`,
/// and `NO2` (case-insensitive). Use [`calculate_aqi_for`] when the
/// pollutant is already typed.
///
/// # Errors
///
/// * [`AqiError::UnknownPollutant`] - Unrecognized pollutant identifier
/// * [`AqiError::InvalidConcentration`] - Negative or non-finite concentration
///
/// # Example
///
/// ```rust
/// use aqi_engine::{AqiError, calculate_aqi};
///
/// assert_eq!(calculate_aqi(55.4, "pm2.5").unwrap(), 150);
/// assert!(matches!(
///     calculate_aqi(10.0, "PM0.1"),
///     Err(AqiError::UnknownPollutant(_))
/// ));
/// ```
pub fn calculate_aqi(concentration: f64, pollutant: &str) -> Result<u32> {
    let pollutant: Pollutant = pollutant.parse()?;
    calculate_aqi_for(concentration, pollutant)
}

/// Look up the health-risk category covering an AQI value
///
/// See [`category::classify`].
#[must_use]
pub fn get_aqi_category(aqi: u32) -> &'static AqiCategory {
    category::classify(aqi)
}

/// Health recommendations for an AQI value
///
/// See [`category::recommendations`].
#[must_use]
pub fn get_recommendations(aqi: u32) -> &'static [&'static str] {
    category::recommendations(aqi)
}

/// Analyze trend and statistics of a historical AQI series
///
/// See [`trend::analyze_trend`].
#[must_use]
pub fn analyze_aqi_trend(samples: &[AqiSample]) -> TrendResult {
    trend::analyze_trend(samples)
}

/// Predict future hourly AQI values from a historical series
///
/// Stochastic: uses the thread-local RNG, so repeated calls differ. For
/// reproducible forecasts inject a seeded RNG through [`predict_with_rng`].
#[must_use]
pub fn predict_aqi(samples: &[AqiSample], hours_ahead: u32) -> Vec<ForecastPoint> {
    predict_with_rng(samples, hours_ahead, &mut rand::rng())
}

/// Score an AQI exposure history over rolling 1/7/30-day windows
///
/// Windows are measured back from the current instant; see
/// [`exposure::score_exposure_at`] for the deterministic variant.
#[must_use]
pub fn calculate_exposure_score(history: &[ExposureEvent]) -> ExposureResult {
    exposure::score_exposure(history)
}

/// Compare air quality between locations
///
/// See [`compare::compare_locations`].
#[must_use]
pub fn compare_locations(locations: &[LocationReading]) -> ComparisonResult {
    compare::compare_locations(locations)
}
