//! Pollutant identifiers and EPA breakpoint tables
//!
//! This module implements the concentration → AQI conversion using the EPA
//! piecewise-linear breakpoint method:
//! <https://www.airnow.gov/sites/default/files/2020-05/aqi-technical-assistance-document-sept2018.pdf>

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AqiError, Result};

/// Pollutants with a tabulated AQI breakpoint scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    /// Fine particulate matter, 24-hour average, μg/m³
    #[serde(rename = "PM2.5")]
    Pm25,
    /// Coarse particulate matter, 24-hour average, μg/m³
    #[serde(rename = "PM10")]
    Pm10,
    /// Ozone, 8-hour average, ppm
    #[serde(rename = "O3")]
    O3,
    /// Carbon monoxide, 8-hour average, ppm
    #[serde(rename = "CO")]
    Co,
    /// Sulfur dioxide, 1-hour average, ppb
    #[serde(rename = "SO2")]
    So2,
    /// Nitrogen dioxide, 1-hour average, ppb
    #[serde(rename = "NO2")]
    No2,
}

/// One segment of a pollutant's breakpoint scale
///
/// `bp_hi` is the upper concentration bound of the segment (inclusive); the
/// lower bound is the previous segment's `bp_hi`, or 0 for the first
/// segment. `i_lo..i_hi` is the AQI sub-range the segment maps onto. The
/// sub-ranges are contiguous so that a concentration sitting exactly on a
/// tabulated bound maps to the tabulated AQI bound from either side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub bp_hi: f64,
    pub i_lo: u32,
    pub i_hi: u32,
}

const fn bp(bp_hi: f64, i_lo: u32, i_hi: u32) -> Breakpoint {
    Breakpoint { bp_hi, i_lo, i_hi }
}

const PM25_BREAKPOINTS: [Breakpoint; 7] = [
    bp(12.0, 0, 50),
    bp(35.4, 50, 100),
    bp(55.4, 100, 150),
    bp(150.4, 150, 200),
    bp(250.4, 200, 300),
    bp(350.4, 300, 400),
    bp(500.4, 400, 500),
];

const PM10_BREAKPOINTS: [Breakpoint; 7] = [
    bp(54.0, 0, 50),
    bp(154.0, 50, 100),
    bp(254.0, 100, 150),
    bp(354.0, 150, 200),
    bp(424.0, 200, 300),
    bp(504.0, 300, 400),
    bp(604.0, 400, 500),
];

const O3_BREAKPOINTS: [Breakpoint; 7] = [
    bp(0.054, 0, 50),
    bp(0.070, 50, 100),
    bp(0.085, 100, 150),
    bp(0.105, 150, 200),
    bp(0.200, 200, 300),
    bp(0.404, 300, 400),
    bp(0.504, 400, 500),
];

const CO_BREAKPOINTS: [Breakpoint; 7] = [
    bp(4.4, 0, 50),
    bp(9.4, 50, 100),
    bp(12.4, 100, 150),
    bp(15.4, 150, 200),
    bp(30.4, 200, 300),
    bp(40.4, 300, 400),
    bp(50.4, 400, 500),
];

const SO2_BREAKPOINTS: [Breakpoint; 7] = [
    bp(35.0, 0, 50),
    bp(75.0, 50, 100),
    bp(185.0, 100, 150),
    bp(304.0, 150, 200),
    bp(604.0, 200, 300),
    bp(804.0, 300, 400),
    bp(1004.0, 400, 500),
];

const NO2_BREAKPOINTS: [Breakpoint; 7] = [
    bp(53.0, 0, 50),
    bp(100.0, 50, 100),
    bp(360.0, 100, 150),
    bp(649.0, 150, 200),
    bp(1249.0, 200, 300),
    bp(1649.0, 300, 400),
    bp(2049.0, 400, 500),
];

impl Pollutant {
    /// Breakpoint table for this pollutant, ordered by ascending bound
    #[must_use]
    pub fn breakpoints(&self) -> &'static [Breakpoint] {
        match self {
            Self::Pm25 => &PM25_BREAKPOINTS,
            Self::Pm10 => &PM10_BREAKPOINTS,
            Self::O3 => &O3_BREAKPOINTS,
            Self::Co => &CO_BREAKPOINTS,
            Self::So2 => &SO2_BREAKPOINTS,
            Self::No2 => &NO2_BREAKPOINTS,
        }
    }

    /// Canonical identifier, e.g. `"PM2.5"`
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::O3 => "O3",
            Self::Co => "CO",
            Self::So2 => "SO2",
            Self::No2 => "NO2",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pollutant {
    type Err = AqiError;

    /// Parse a pollutant identifier (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PM2.5" => Ok(Self::Pm25),
            "PM10" => Ok(Self::Pm10),
            "O3" => Ok(Self::O3),
            "CO" => Ok(Self::Co),
            "SO2" => Ok(Self::So2),
            "NO2" => Ok(Self::No2),
            _ => Err(AqiError::UnknownPollutant(s.to_string())),
        }
    }
}

/// Calculate the AQI for a pollutant concentration
///
/// Scans the pollutant's breakpoint table in ascending order and linearly
/// interpolates within the segment that contains the concentration:
///
/// ```text
/// AQI = round((i_hi - i_lo) * (c - bp_lo) / (bp_hi - bp_lo) + i_lo)
/// ```
///
/// Rounding is half away from zero ([`f64::round`]).
///
/// Concentrations above the highest tabulated bound are extrapolated using
/// the highest bound as `bp_lo`, 1.5× that bound as `bp_hi`, and the last
/// segment's AQI sub-range. The result is not capped, so extreme
/// concentrations produce AQI values above 500.
///
/// # Errors
///
/// * [`AqiError::InvalidConcentration`] - Concentration is negative or not finite
///
/// # Example
///
/// ```rust
/// use aqi_engine::{Pollutant, calculate_aqi_for};
///
/// let aqi = calculate_aqi_for(15.4, Pollutant::Pm25).unwrap();
/// assert_eq!(aqi, 57);
/// ```
pub fn calculate_aqi_for(concentration: f64, pollutant: Pollutant) -> Result<u32> {
    if !concentration.is_finite() || concentration < 0.0 {
        return Err(AqiError::InvalidConcentration(concentration));
    }

    let table = pollutant.breakpoints();
    let mut bp_lo = 0.0;

    for segment in table {
        if concentration <= segment.bp_hi {
            return Ok(interpolate(
                concentration,
                bp_lo,
                segment.bp_hi,
                segment.i_lo,
                segment.i_hi,
            ));
        }
        bp_lo = segment.bp_hi;
    }

    // Above the highest tabulated bound: extrapolate with 1.5x the bound,
    // reusing the last segment's AQI sub-range. Uncapped.
    let last = table[table.len() - 1];
    Ok(interpolate(
        concentration,
        last.bp_hi,
        last.bp_hi * 1.5,
        last.i_lo,
        last.i_hi,
    ))
}

/// Linear interpolation between breakpoints, rounded half away from zero
fn interpolate(concentration: f64, bp_lo: f64, bp_hi: f64, i_lo: u32, i_hi: u32) -> u32 {
    let aqi =
        f64::from(i_hi - i_lo) * (concentration - bp_lo) / (bp_hi - bp_lo) + f64::from(i_lo);
    aqi.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Reference values confirmed against the EPA AQI equation. Tabulated
    // bounds must map exactly to the tabulated AQI bound.
    #[rstest]
    #[case(Pollutant::Pm25, 0.0, 0)]
    #[case(Pollutant::Pm25, 12.0, 50)]
    #[case(Pollutant::Pm25, 15.4, 57)] // standard EPA example
    #[case(Pollutant::Pm25, 35.4, 100)]
    #[case(Pollutant::Pm25, 55.4, 150)]
    #[case(Pollutant::Pm25, 150.4, 200)]
    #[case(Pollutant::Pm25, 250.4, 300)]
    #[case(Pollutant::Pm25, 500.4, 500)]
    #[case(Pollutant::Pm10, 54.0, 50)]
    #[case(Pollutant::Pm10, 154.0, 100)]
    #[case(Pollutant::Pm10, 604.0, 500)]
    #[case(Pollutant::O3, 0.054, 50)]
    #[case(Pollutant::O3, 0.070, 100)]
    #[case(Pollutant::Co, 4.4, 50)]
    #[case(Pollutant::Co, 7.0, 76)]
    #[case(Pollutant::So2, 35.0, 50)]
    #[case(Pollutant::No2, 53.0, 50)]
    #[case(Pollutant::No2, 2049.0, 500)]
    fn aqi_reference_values(
        #[case] pollutant: Pollutant,
        #[case] concentration: f64,
        #[case] expected: u32,
    ) {
        assert_eq!(calculate_aqi_for(concentration, pollutant).unwrap(), expected);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // PM10 at 105.0 interpolates to exactly 75.5
        assert_eq!(calculate_aqi_for(105.0, Pollutant::Pm10).unwrap(), 76);
    }

    #[rstest]
    #[case(600.0, 440)] // between 500.4 and 750.6
    #[case(750.6, 500)] // exactly 1.5x the highest bound
    #[case(1000.0, 600)] // beyond 1.5x, no ceiling
    fn extrapolation_above_highest_bound(#[case] concentration: f64, #[case] expected: u32) {
        assert_eq!(
            calculate_aqi_for(concentration, Pollutant::Pm25).unwrap(),
            expected
        );
    }

    #[test]
    fn monotonic_within_tabulated_range() {
        for pollutant in [
            Pollutant::Pm25,
            Pollutant::Pm10,
            Pollutant::O3,
            Pollutant::Co,
            Pollutant::So2,
            Pollutant::No2,
        ] {
            let highest = pollutant.breakpoints().last().unwrap().bp_hi;
            let mut previous = 0;
            for step in 0..=1000 {
                let concentration = highest * f64::from(step) / 1000.0;
                let aqi = calculate_aqi_for(concentration, pollutant).unwrap();
                assert!(
                    aqi >= previous,
                    "{pollutant} AQI decreased at concentration {concentration}"
                );
                previous = aqi;
            }
        }
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(-0.1)]
    fn invalid_concentrations(#[case] concentration: f64) {
        assert!(matches!(
            calculate_aqi_for(concentration, Pollutant::Pm25),
            Err(AqiError::InvalidConcentration(_))
        ));
    }

    #[rstest]
    #[case("PM2.5", Pollutant::Pm25)]
    #[case("pm2.5", Pollutant::Pm25)]
    #[case("PM10", Pollutant::Pm10)]
    #[case("o3", Pollutant::O3)]
    #[case("CO", Pollutant::Co)]
    #[case("so2", Pollutant::So2)]
    #[case(" NO2 ", Pollutant::No2)]
    fn parse_pollutant(#[case] input: &str, #[case] expected: Pollutant) {
        assert_eq!(input.parse::<Pollutant>().unwrap(), expected);
    }

    #[test]
    fn parse_unknown_pollutant() {
        let result = "PM0.1".parse::<Pollutant>();
        assert_eq!(
            result,
            Err(AqiError::UnknownPollutant("PM0.1".to_string()))
        );
    }

    #[test]
    fn display_round_trips_with_parse() {
        for pollutant in [
            Pollutant::Pm25,
            Pollutant::Pm10,
            Pollutant::O3,
            Pollutant::Co,
            Pollutant::So2,
            Pollutant::No2,
        ] {
            assert_eq!(
                pollutant.to_string().parse::<Pollutant>().unwrap(),
                pollutant
            );
        }
    }
}
