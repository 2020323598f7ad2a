//! Error types for AQI computations

use thiserror::Error;

/// Result type alias for AQI engine operations
pub type Result<T> = std::result::Result<T, AqiError>;

/// Errors that can occur while computing an Air Quality Index
///
/// Only invalid inputs are surfaced as errors. A series that is too short
/// for trend analysis or forecasting is not an error; those operations
/// return defined empty/absent results instead (see [`crate::trend`] and
/// [`crate::forecast`]). Unexpected numeric failures inside the analysis
/// components are caught at the component boundary and reported through an
/// `error` field on the result record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AqiError {
    /// Pollutant identifier is not one of the supported pollutants
    #[error("Unknown pollutant: {0}")]
    UnknownPollutant(String),

    /// Concentration is negative or not a finite number
    #[error("Invalid concentration: {0}")]
    InvalidConcentration(f64),
}
