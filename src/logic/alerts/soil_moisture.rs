use super::AlertRule;
use crate::logic::calculations::fmt_one_decimal;
use crate::models::{Alert, AlertLevel, SensorSnapshot};
use chrono::{DateTime, Utc};

/// Points below the irrigation threshold at which dryness becomes critical.
const CRITICAL_MARGIN_PCT: f64 = 15.0;

/// Soil moisture rule - compares moisture against the operator's threshold
///
/// Severity levels:
/// - Medium: below threshold
/// - High: more than 15 points below threshold
pub struct SoilMoistureRule;

impl AlertRule for SoilMoistureRule {
    fn id(&self) -> &'static str {
        "soil_moisture"
    }

    fn name(&self) -> &'static str {
        "Soil Moisture"
    }

    fn evaluate(&self, snapshot: &SensorSnapshot, now: DateTime<Utc>) -> Option<Alert> {
        let moisture = snapshot.soil_moisture_pct;
        let threshold = snapshot.moisture_threshold_pct;

        if moisture < threshold - CRITICAL_MARGIN_PCT {
            Some(
                Alert::new(
                    "low-moisture",
                    AlertLevel::High,
                    "Low Soil Moisture",
                    format!("Critical moisture: {}%", fmt_one_decimal(moisture)),
                    now,
                )
                .with_action("Immediate irrigation required."),
            )
        } else if moisture < threshold {
            Some(
                Alert::new(
                    "moisture-warning",
                    AlertLevel::Medium,
                    "Below Threshold",
                    format!("Moisture at {}%", fmt_one_decimal(moisture)),
                    now,
                )
                .with_action("Schedule irrigation soon."),
            )
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(moisture: f64, threshold: f64) -> Option<Alert> {
        let snapshot = SensorSnapshot::new(moisture, 25.0, 60.0).with_threshold(threshold);
        SoilMoistureRule.evaluate(&snapshot, Utc::now())
    }

    #[test]
    fn far_below_threshold_is_critical() {
        let alert = at(30.0, 50.0).unwrap();
        assert_eq!(alert.id, "low-moisture");
        assert_eq!(alert.level, AlertLevel::High);
        assert_eq!(alert.alert_type, "Low Soil Moisture");
        assert_eq!(alert.message, "Critical moisture: 30.0%");
        assert_eq!(alert.action, "Immediate irrigation required.");
    }

    #[test]
    fn just_below_threshold_is_warning() {
        let alert = at(44.0, 50.0).unwrap();
        assert_eq!(alert.id, "moisture-warning");
        assert_eq!(alert.level, AlertLevel::Medium);
        assert_eq!(alert.message, "Moisture at 44.0%");
        assert_eq!(alert.action, "Schedule irrigation soon.");
    }

    #[test]
    fn halfway_readings_round_up() {
        assert_eq!(at(30.25, 50.0).unwrap().message, "Critical moisture: 30.3%");
        assert_eq!(at(42.25, 50.0).unwrap().message, "Moisture at 42.3%");
    }

    #[test]
    fn critical_margin_boundary() {
        // Exactly 15 below is only a warning.
        assert_eq!(at(35.0, 50.0).unwrap().id, "moisture-warning");
        assert_eq!(at(34.9, 50.0).unwrap().id, "low-moisture");
        assert!(at(50.0, 50.0).is_none());
    }
}
