use super::AlertRule;
use crate::logic::calculations::fmt_one_decimal;
use crate::models::{Alert, AlertLevel, SensorSnapshot};
use chrono::{DateTime, Utc};

const CRITICAL_TEMP_C: f64 = 38.0;
const ELEVATED_TEMP_C: f64 = 32.0;

/// Heat stress rule - warns when air temperature climbs past crop tolerance
///
/// Severity levels:
/// - Medium: above 32°C
/// - High: above 38°C
pub struct HeatStressRule;

impl AlertRule for HeatStressRule {
    fn id(&self) -> &'static str {
        "heat_stress"
    }

    fn name(&self) -> &'static str {
        "Heat Stress"
    }

    fn evaluate(&self, snapshot: &SensorSnapshot, now: DateTime<Utc>) -> Option<Alert> {
        let temp = snapshot.temperature_c;

        if temp > CRITICAL_TEMP_C {
            Some(
                Alert::new(
                    "heat-stress",
                    AlertLevel::High,
                    "Heat Stress",
                    format!("Critical temperature: {}°C", fmt_one_decimal(temp)),
                    now,
                )
                .with_action("Increase irrigation and provide shade if possible."),
            )
        } else if temp > ELEVATED_TEMP_C {
            Some(
                Alert::new(
                    "heat-warning",
                    AlertLevel::Medium,
                    "High Temperature",
                    format!("Temperature elevated: {}°C", fmt_one_decimal(temp)),
                    now,
                )
                .with_action("Monitor crops closely. Consider extra watering."),
            )
        } else {
            None
        }
    }
}
