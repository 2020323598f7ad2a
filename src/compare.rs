//! Air quality comparison across locations

use serde::{Deserialize, Serialize};

use crate::category::classify;
use crate::trend::round1;

/// A location's current AQI reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationReading {
    pub name: String,
    pub aqi: u32,
}

impl LocationReading {
    #[must_use]
    pub fn new(name: impl Into<String>, aqi: u32) -> Self {
        Self {
            name: name.into(),
            aqi,
        }
    }
}

/// The best or worst location in a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationSummary {
    pub name: String,
    pub aqi: u32,
}

/// Per-location breakdown entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationComparison {
    pub name: String,
    pub aqi: u32,
    pub category: &'static str,
    pub color: &'static str,
    /// `aqi - average`, rounded to one decimal
    pub difference_from_avg: f64,
}

/// Result of comparing AQI across locations
///
/// All fields are absent and the breakdown empty when fewer than two
/// locations were supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ComparisonResult {
    pub best: Option<LocationSummary>,
    pub worst: Option<LocationSummary>,
    /// Mean AQI, rounded to one decimal
    pub average: Option<f64>,
    pub comparison: Vec<LocationComparison>,
}

/// Compare air quality between locations
///
/// Best is the minimum AQI and worst the maximum; ties go to the first
/// occurrence in input order. Requires at least two locations, otherwise
/// every field is absent.
#[must_use]
pub fn compare_locations(locations: &[LocationReading]) -> ComparisonResult {
    if locations.len() < 2 {
        return ComparisonResult::default();
    }

    let mut best = &locations[0];
    let mut worst = &locations[0];
    for location in &locations[1..] {
        if location.aqi < best.aqi {
            best = location;
        }
        if location.aqi > worst.aqi {
            worst = location;
        }
    }

    let average = locations.iter().map(|l| f64::from(l.aqi)).sum::<f64>() / locations.len() as f64;

    let comparison = locations
        .iter()
        .map(|location| {
            let category = classify(location.aqi);
            LocationComparison {
                name: location.name.clone(),
                aqi: location.aqi,
                category: category.name,
                color: category.color,
                difference_from_avg: round1(f64::from(location.aqi) - average),
            }
        })
        .collect();

    ComparisonResult {
        best: Some(LocationSummary {
            name: best.name.clone(),
            aqi: best.aqi,
        }),
        worst: Some(LocationSummary {
            name: worst.name.clone(),
            aqi: worst.aqi,
        }),
        average: Some(round1(average)),
        comparison,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_at_least_two_locations() {
        assert_eq!(compare_locations(&[]), ComparisonResult::default());

        let single = [LocationReading::new("A", 42)];
        let result = compare_locations(&single);
        assert_eq!(result.best, None);
        assert_eq!(result.worst, None);
        assert_eq!(result.average, None);
        assert!(result.comparison.is_empty());
    }

    #[test]
    fn two_location_reference_case() {
        let locations = [
            LocationReading::new("A", 50),
            LocationReading::new("B", 150),
        ];
        let result = compare_locations(&locations);

        let best = result.best.unwrap();
        assert_eq!((best.name.as_str(), best.aqi), ("A", 50));
        let worst = result.worst.unwrap();
        assert_eq!((worst.name.as_str(), worst.aqi), ("B", 150));
        assert_eq!(result.average, Some(100.0));

        assert_eq!(result.comparison[0].difference_from_avg, -50.0);
        assert_eq!(result.comparison[1].difference_from_avg, 50.0);
        assert_eq!(result.comparison[0].category, "Good");
        assert_eq!(result.comparison[1].category, "Unhealthy for Sensitive Groups");
    }

    #[test]
    fn ties_go_to_first_occurrence() {
        let locations = [
            LocationReading::new("first_low", 30),
            LocationReading::new("second_low", 30),
            LocationReading::new("first_high", 90),
            LocationReading::new("second_high", 90),
        ];
        let result = compare_locations(&locations);
        assert_eq!(result.best.unwrap().name, "first_low");
        assert_eq!(result.worst.unwrap().name, "first_high");
    }

    #[test]
    fn average_and_deviations_round_to_one_decimal() {
        let locations = [
            LocationReading::new("A", 10),
            LocationReading::new("B", 20),
            LocationReading::new("C", 21),
        ];
        let result = compare_locations(&locations);
        assert_eq!(result.average, Some(17.0));
        assert_eq!(result.comparison[0].difference_from_avg, -7.0);
        assert_eq!(result.comparison[1].difference_from_avg, 3.0);
        assert_eq!(result.comparison[2].difference_from_avg, 4.0);
    }

    #[test]
    fn breakdown_preserves_input_order() {
        let locations = [
            LocationReading::new("Z", 300),
            LocationReading::new("A", 10),
            LocationReading::new("M", 120),
        ];
        let result = compare_locations(&locations);
        let names: Vec<&str> = result.comparison.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Z", "A", "M"]);
    }
}
