pub mod engine;
pub mod heat_stress;
pub mod low_humidity;
pub mod soil_moisture;

pub use engine::AlertEngine;

use crate::models::{Alert, SensorSnapshot};
use chrono::{DateTime, Utc};

/// Trait for alert rules.
///
/// Each rule covers one category of reading and emits at most one alert, so
/// severity tiers within a category are mutually exclusive.
pub trait AlertRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return an alert stamped with `now` if it fires
    fn evaluate(&self, snapshot: &SensorSnapshot, now: DateTime<Utc>) -> Option<Alert>;
}

/// Alerts for a snapshot using the default rule set, all stamped with `now`.
pub fn generate_alerts_at(snapshot: &SensorSnapshot, now: DateTime<Utc>) -> Vec<Alert> {
    AlertEngine::new().evaluate(snapshot, now)
}
