//! One-step soil moisture projection from the most recent readings.

use super::calculations::{mean, most_recent, net_change};
use crate::error::{AgriError, Result};
use crate::models::{MoisturePrediction, MoistureTrend};

/// Readings the projection is based on.
pub const PREDICTION_WINDOW: usize = 3;

/// A swing must exceed this many points to count as a trend.
const TREND_DELTA: f64 = 5.0;
const RISING_ADJUSTMENT: f64 = 5.0;
const FALLING_ADJUSTMENT: f64 = 8.0;

pub const MIN_PREDICTED_PCT: f64 = 10.0;
pub const MAX_PREDICTED_PCT: f64 = 95.0;

/// Project the next soil moisture reading.
///
/// `needs_irrigation` compares the unclamped projection with the threshold,
/// so a steep fall can flag irrigation even when the reported value sits at
/// the 10% floor above a very low threshold.
pub fn predict(history: &[f64], threshold_pct: f64) -> Result<MoisturePrediction> {
    if history.len() < PREDICTION_WINDOW {
        return Err(AgriError::InsufficientHistory {
            required: PREDICTION_WINDOW,
            available: history.len(),
        });
    }

    let recent = most_recent(history, PREDICTION_WINDOW);
    if let Some(bad) = recent.iter().find(|v| !v.is_finite()) {
        return Err(AgriError::InvalidData(format!(
            "moisture history contains non-finite reading {}",
            bad
        )));
    }

    let (Some(avg), Some(change)) = (mean(recent), net_change(recent)) else {
        return Err(AgriError::InsufficientHistory {
            required: PREDICTION_WINDOW,
            available: recent.len(),
        });
    };

    let trend = classify_trend(change);
    let predicted = match trend {
        MoistureTrend::Increasing => avg + RISING_ADJUSTMENT,
        MoistureTrend::Decreasing => avg - FALLING_ADJUSTMENT,
        MoistureTrend::Stable => avg,
    };

    tracing::debug!(avg, change, predicted, ?trend, "Moisture projected");

    Ok(MoisturePrediction {
        predicted_moisture_pct: predicted.clamp(MIN_PREDICTED_PCT, MAX_PREDICTED_PCT),
        needs_irrigation: predicted < threshold_pct,
        trend,
    })
}

fn classify_trend(change: f64) -> MoistureTrend {
    if change > TREND_DELTA {
        MoistureTrend::Increasing
    } else if -change > TREND_DELTA {
        MoistureTrend::Decreasing
    } else {
        MoistureTrend::Stable
    }
}
