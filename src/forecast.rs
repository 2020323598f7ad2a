//! Multi-step hourly AQI forecasting
//!
//! Builds an average diurnal (hour-of-day) profile from the trailing
//! training window of an hourly-resampled series and projects it forward,
//! perturbed by bounded Gaussian noise scaled to the window's volatility.
//!
//! The forecast is stochastic: two calls over the same series differ unless
//! the caller injects a seeded RNG through [`predict_with_rng`].

use std::collections::HashMap;

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::Rng;
use serde::Serialize;

use crate::category::classify;
use crate::trend::AqiSample;

/// Minimum number of historical samples required for a forecast
pub const MIN_SAMPLES: usize = 24;

/// Trailing hourly buckets used as the training window
const TRAINING_WINDOW_HOURS: usize = 72;

/// Noise standard deviation as a fraction of the training window's
const NOISE_FRACTION: f64 = 0.2;

/// One predicted future hour
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub aqi: u32,
    pub category: &'static str,
    pub color: &'static str,
    /// Always `true`; distinguishes forecasts from observations downstream
    pub is_prediction: bool,
}

/// Predict future hourly AQI values using a caller-supplied random source
///
/// Requires at least [`MIN_SAMPLES`] historical samples; shorter series
/// yield an empty vector (insufficient data, not an error). The series is
/// resampled to hourly bucket means with forward fill, restricted to the
/// trailing 72 buckets, and grouped by hour of day (UTC) to form the
/// diurnal profile. Each forecast step takes the profile value for its hour
/// of day plus zero-mean Gaussian noise with standard deviation 0.2× the
/// sample standard deviation of the training window, floored at 0.
///
/// If the training window does not cover a future step's hour of day, the
/// forecast is abandoned and an empty vector returned.
pub fn predict_with_rng<R: Rng + ?Sized>(
    samples: &[AqiSample],
    hours_ahead: u32,
    rng: &mut R,
) -> Vec<ForecastPoint> {
    if samples.len() < MIN_SAMPLES {
        return Vec::new();
    }

    let hourly = resample_hourly(samples);
    let train = if hourly.len() >= TRAINING_WINDOW_HOURS {
        &hourly[hourly.len() - TRAINING_WINDOW_HOURS..]
    } else {
        &hourly[..]
    };

    // Diurnal profile: mean AQI per hour of day over the training window.
    let mut sums = [0.0f64; 24];
    let mut counts = [0u32; 24];
    for &(bucket, value) in train {
        let hour = bucket.rem_euclid(24) as usize;
        sums[hour] += value;
        counts[hour] += 1;
    }

    let noise_std = NOISE_FRACTION * sample_std(train.iter().map(|&(_, v)| v));

    let Some(&(last_bucket, _)) = train.last() else {
        return Vec::new();
    };
    let Some(last_time) = DateTime::from_timestamp(last_bucket * 3600, 0) else {
        return Vec::new();
    };

    let mut predictions = Vec::with_capacity(hours_ahead as usize);
    for step in 1..=i64::from(hours_ahead) {
        let next_time = last_time + Duration::hours(step);
        let hour = next_time.hour() as usize;
        if counts[hour] == 0 {
            // Training window never saw this hour of day.
            return Vec::new();
        }
        let base = sums[hour] / f64::from(counts[hour]);

        let aqi = (base + gaussian(rng) * noise_std).max(0.0).round() as u32;
        let category = classify(aqi);
        predictions.push(ForecastPoint {
            timestamp: next_time,
            aqi,
            category: category.name,
            color: category.color,
            is_prediction: true,
        });
    }

    predictions
}

/// Resample a series to one mean value per hour, forward-filling gaps
///
/// Buckets are keyed by hours since the Unix epoch. Gaps between the first
/// and last observed bucket take the most recent prior bucket's value.
fn resample_hourly(samples: &[AqiSample]) -> Vec<(i64, f64)> {
    let mut sorted = samples.to_vec();
    sorted.sort_by_key(|s| s.timestamp);

    let mut buckets: HashMap<i64, (f64, u32)> = HashMap::new();
    for sample in &sorted {
        let bucket = sample.timestamp.timestamp().div_euclid(3600);
        let entry = buckets.entry(bucket).or_insert((0.0, 0));
        entry.0 += f64::from(sample.aqi);
        entry.1 += 1;
    }

    let first = sorted[0].timestamp.timestamp().div_euclid(3600);
    let last = sorted[sorted.len() - 1].timestamp.timestamp().div_euclid(3600);

    let mut hourly = Vec::with_capacity((last - first + 1) as usize);
    let mut previous = None;
    for bucket in first..=last {
        let value = match buckets.get(&bucket) {
            Some(&(sum, count)) => sum / f64::from(count),
            None => match previous {
                Some(v) => v,
                // No prior value to fill from; leave the bucket absent.
                None => continue,
            },
        };
        previous = Some(value);
        hourly.push((bucket, value));
    }

    hourly
}

/// Sample standard deviation (n - 1 denominator); 0 for fewer than 2 values
fn sample_std(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let n = values.clone().count();
    if n < 2 {
        return 0.0;
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    let variance = values.map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Standard normal draw via the Box-Muller transform
fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = 1.0 - rng.random::<f64>(); // shift into (0, 1] so ln is finite
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
