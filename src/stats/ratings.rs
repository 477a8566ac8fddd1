//! Spread and 0-10 rating functions.
//!
//! The ratings only promise two things: they stay within [0, 10] and
//! move in the documented direction. `RatingScales` tunes the rest.

use crate::core::RatingScales;

pub const MAX_RATING: f64 = 10.0;

/// Arithmetic mean, 0 for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation (divides by `n`, not `n - 1`).
#[must_use]
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Consistency: falls as the coefficient of variation rises.
///
/// `10 * (1 - min(cv / cv_ceiling, 1))`. Zero spread always scores 10;
/// spread around a non-positive average scores 0.
#[must_use]
pub fn consistency_rating(average: f64, std_dev: f64, races: usize, scales: &RatingScales) -> f64 {
    if races == 0 {
        return 0.0;
    }
    if std_dev == 0.0 {
        return MAX_RATING;
    }
    if average <= 0.0 || scales.consistency_cv_ceiling <= 0.0 {
        return 0.0;
    }
    let cv = std_dev / average;
    clamp_rating(MAX_RATING * (1.0 - (cv / scales.consistency_cv_ceiling).min(1.0)))
}

/// Comeback: rises with how often and how far a player bounces back.
///
/// Blends the recovery rate with the recovery size relative to the
/// player's average. No below-average races scores 0.
#[must_use]
pub fn comeback_rating(
    below_average_races: u32,
    successful_recoveries: u32,
    average_recovery_points: f64,
    average: f64,
    scales: &RatingScales,
) -> f64 {
    if below_average_races == 0 {
        return 0.0;
    }
    let rate = f64::from(successful_recoveries) / f64::from(below_average_races);
    let magnitude = if average > 0.0 && scales.comeback_magnitude_ceiling > 0.0 {
        (average_recovery_points / (average * scales.comeback_magnitude_ceiling)).clamp(0.0, 1.0)
    } else if average_recovery_points > 0.0 {
        1.0
    } else {
        0.0
    };
    let weight = scales.comeback_rate_weight.clamp(0.0, 1.0);
    clamp_rating(MAX_RATING * (weight * rate + (1.0 - weight) * magnitude))
}

fn clamp_rating(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_RATING)
    }
}
