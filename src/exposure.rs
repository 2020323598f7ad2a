//! Personal exposure scoring from an AQI exposure history
//!
//! Each event contributes `aqi * duration_minutes / 60` AQI-hours; a
//! window's score is the duration-weighted average AQI of the events inside
//! it. Windows of 1, 7, and 30 days are measured back from the reference
//! instant, and the risk tier is derived from the weekly score.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One recorded exposure: an AQI level held for a duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureEvent {
    pub timestamp: DateTime<Utc>,
    pub aqi: u32,
    pub duration_minutes: f64,
}

impl ExposureEvent {
    /// Event with the default duration of 60 minutes
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, aqi: u32) -> Self {
        Self {
            timestamp,
            aqi,
            duration_minutes: 60.0,
        }
    }

    #[must_use]
    pub fn with_duration(timestamp: DateTime<Utc>, aqi: u32, duration_minutes: f64) -> Self {
        Self {
            timestamp,
            aqi,
            duration_minutes,
        }
    }
}

/// Exposure risk tier, derived from the weekly score
///
/// `> 150` severe, `> 100` high, `> 50` moderate, otherwise low. A weekly
/// score of exactly 100 is `Moderate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Severe,
    /// Scoring failed; see [`ExposureResult::error`]
    Unknown,
}

impl RiskLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Severe => "Severe",
            Self::Unknown => "Unknown",
        }
    }

    fn from_weekly_score(score: u32) -> Self {
        if score > 150 {
            Self::Severe
        } else if score > 100 {
            Self::High
        } else if score > 50 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Self::Low => &[
                "You have maintained good air quality exposure.",
                "Continue monitoring AQI regularly.",
            ],
            Self::Moderate => &[
                "Consider reducing outdoor activities when AQI is high.",
                "Use air purifiers when indoors.",
                "Keep track of air quality forecasts.",
            ],
            Self::High => &[
                "Try to spend more time in areas with better air quality.",
                "Use N95 masks when AQI is unhealthy.",
                "Consider using air purifiers indoors.",
                "Reduce outdoor exercise during high pollution periods.",
            ],
            Self::Severe => &[
                "Your exposure levels are concerning.",
                "Limit time outdoors as much as possible.",
                "Use high-quality air purifiers indoors.",
                "Wear N95 masks when outdoors.",
                "Consider consulting with a healthcare provider about air pollution exposure.",
            ],
            Self::Unknown => &["Error calculating exposure score"],
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Duration-weighted exposure scores over rolling windows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureResult {
    pub daily_score: u32,
    pub weekly_score: u32,
    pub monthly_score: u32,
    pub risk_level: RiskLevel,
    pub recommendations: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExposureResult {
    fn no_data() -> Self {
        Self {
            daily_score: 0,
            weekly_score: 0,
            monthly_score: 0,
            risk_level: RiskLevel::Low,
            recommendations: &["No exposure data available"],
            error: None,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            daily_score: 0,
            weekly_score: 0,
            monthly_score: 0,
            risk_level: RiskLevel::Unknown,
            recommendations: RiskLevel::Unknown.recommendations(),
            error: Some(message),
        }
    }
}

/// Score an exposure history against a given reference instant
///
/// Deterministic variant of [`score_exposure`]; tests and replayed
/// analyses pass an explicit `now`. An empty history yields all-zero scores
/// with [`RiskLevel::Low`]. An event with a non-positive or non-finite
/// duration is a computation failure: scores reset to 0 and
/// [`RiskLevel::Unknown`] is reported with a message.
#[must_use]
pub fn score_exposure_at(history: &[ExposureEvent], now: DateTime<Utc>) -> ExposureResult {
    if history.is_empty() {
        return ExposureResult::no_data();
    }

    if let Some(bad) = history
        .iter()
        .find(|e| !e.duration_minutes.is_finite() || e.duration_minutes <= 0.0)
    {
        return ExposureResult::failure(format!(
            "Invalid event duration: {} minutes",
            bad.duration_minutes
        ));
    }

    let daily_score = window_score(history, now, Duration::days(1));
    let weekly_score = window_score(history, now, Duration::days(7));
    let monthly_score = window_score(history, now, Duration::days(30));

    let risk_level = RiskLevel::from_weekly_score(weekly_score);
    ExposureResult {
        daily_score,
        weekly_score,
        monthly_score,
        risk_level,
        recommendations: risk_level.recommendations(),
        error: None,
    }
}

/// Score an exposure history against the current instant
#[must_use]
pub fn score_exposure(history: &[ExposureEvent]) -> ExposureResult {
    score_exposure_at(history, Utc::now())
}

/// Duration-weighted average AQI of the events inside the window, rounded
/// to the nearest integer; 0 for an empty window
fn window_score(history: &[ExposureEvent], now: DateTime<Utc>, window: Duration) -> u32 {
    let cutoff = now - window;
    let mut exposure_aqi_hours = 0.0;
    let mut total_hours = 0.0;
    for event in history.iter().filter(|e| e.timestamp >= cutoff) {
        let hours = event.duration_minutes / 60.0;
        exposure_aqi_hours += f64::from(event.aqi) * hours;
        total_hours += hours;
    }

    if total_hours > 0.0 {
        (exposure_aqi_hours / total_hours).round() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_history() {
        let result = score_exposure_at(&[], noon());
        assert_eq!(result.daily_score, 0);
        assert_eq!(result.weekly_score, 0);
        assert_eq!(result.monthly_score, 0);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.recommendations, ["No exposure data available"].as_slice());
        assert_eq!(result.error, None);
    }

    #[test]
    fn recent_constant_exposure_scores_its_aqi() {
        // Three 60-minute events at AQI 100 in the last hour land in every
        // window, so all three scores equal 100 and the weekly boundary
        // check applies: exactly 100 is Moderate, not High.
        let now = noon();
        let history: Vec<ExposureEvent> = (0..3)
            .map(|i| ExposureEvent::new(now - Duration::minutes(20 * i), 100))
            .collect();

        let result = score_exposure_at(&history, now);
        assert_eq!(result.daily_score, 100);
        assert_eq!(result.weekly_score, 100);
        assert_eq!(result.monthly_score, 100);
        assert_eq!(result.risk_level, RiskLevel::Moderate);
    }

    #[rstest]
    #[case(50, RiskLevel::Low)]
    #[case(51, RiskLevel::Moderate)]
    #[case(100, RiskLevel::Moderate)]
    #[case(101, RiskLevel::High)]
    #[case(150, RiskLevel::High)]
    #[case(151, RiskLevel::Severe)]
    fn risk_tier_boundaries(#[case] aqi: u32, #[case] expected: RiskLevel) {
        let now = noon();
        let history = [ExposureEvent::new(now - Duration::hours(2), aqi)];
        let result = score_exposure_at(&history, now);
        assert_eq!(result.weekly_score, aqi);
        assert_eq!(result.risk_level, expected);
        assert_eq!(result.recommendations, expected.recommendations());
    }

    #[test]
    fn scores_are_duration_weighted() {
        // 2 hours at AQI 100 and 1 hour at AQI 40: (200 + 40) / 3 = 80.
        let now = noon();
        let history = [
            ExposureEvent::with_duration(now - Duration::hours(5), 100, 120.0),
            ExposureEvent::with_duration(now - Duration::hours(2), 40, 60.0),
        ];
        let result = score_exposure_at(&history, now);
        assert_eq!(result.daily_score, 80);
    }

    #[test]
    fn windows_filter_by_age() {
        let now = noon();
        let history = [
            ExposureEvent::new(now - Duration::hours(2), 200), // daily + weekly + monthly
            ExposureEvent::new(now - Duration::days(3), 100),  // weekly + monthly
            ExposureEvent::new(now - Duration::days(20), 40),  // monthly only
            ExposureEvent::new(now - Duration::days(45), 500), // outside every window
        ];
        let result = score_exposure_at(&history, now);
        assert_eq!(result.daily_score, 200);
        assert_eq!(result.weekly_score, 150); // (200 + 100) / 2
        assert_eq!(result.monthly_score, 113); // (200 + 100 + 40) / 3, rounded
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn only_old_events_leave_recent_windows_at_zero() {
        let now = noon();
        let history = [ExposureEvent::new(now - Duration::days(20), 180)];
        let result = score_exposure_at(&history, now);
        assert_eq!(result.daily_score, 0);
        assert_eq!(result.weekly_score, 0);
        assert_eq!(result.monthly_score, 180);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-30.0)]
    #[case(f64::NAN)]
    fn invalid_duration_is_a_failure(#[case] duration: f64) {
        let now = noon();
        let history = [ExposureEvent::with_duration(now, 80, duration)];
        let result = score_exposure_at(&history, now);
        assert_eq!(result.risk_level, RiskLevel::Unknown);
        assert_eq!(result.daily_score, 0);
        assert!(result.error.is_some());
    }

    #[test]
    fn risk_level_display() {
        assert_eq!(RiskLevel::Severe.to_string(), "Severe");
        assert_eq!(
            serde_json::to_string(&RiskLevel::Moderate).unwrap(),
            "\"Moderate\""
        );
    }
}
