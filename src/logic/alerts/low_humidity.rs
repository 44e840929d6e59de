use super::AlertRule;
use crate::logic::calculations::fmt_one_decimal;
use crate::models::{Alert, AlertLevel, SensorSnapshot};
use chrono::{DateTime, Utc};

const LOW_HUMIDITY_PCT: f64 = 30.0;

/// Low humidity rule - dry air accelerates evapotranspiration
pub struct LowHumidityRule;

impl AlertRule for LowHumidityRule {
    fn id(&self) -> &'static str {
        "low_humidity"
    }

    fn name(&self) -> &'static str {
        "Low Humidity"
    }

    fn evaluate(&self, snapshot: &SensorSnapshot, now: DateTime<Utc>) -> Option<Alert> {
        if snapshot.humidity_pct >= LOW_HUMIDITY_PCT {
            return None;
        }

        Some(
            Alert::new(
                "low-humidity",
                AlertLevel::Low,
                "Low Humidity",
                format!("Humidity at {}%", fmt_one_decimal(snapshot.humidity_pct)),
                now,
            )
            .with_action("Consider misting or mulching."),
        )
    }
}
