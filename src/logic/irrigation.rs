use super::calculations::fmt_one_decimal;
use crate::models::{IrrigationDecision, PumpStatus, SensorSnapshot};

/// Pump decision for the current snapshot.
///
/// Manual mode short-circuits before moisture is looked at.
pub fn decide(snapshot: &SensorSnapshot) -> IrrigationDecision {
    if !snapshot.auto_mode {
        return IrrigationDecision::new(PumpStatus::Manual, "System is in manual control mode.");
    }

    if snapshot.is_below_threshold() {
        return IrrigationDecision::new(
            PumpStatus::On,
            format!(
                "Soil moisture ({}%) is below threshold ({}%).",
                fmt_one_decimal(snapshot.soil_moisture_pct),
                snapshot.moisture_threshold_pct
            ),
        );
    }

    IrrigationDecision::new(
        PumpStatus::Off,
        format!(
            "Soil moisture ({}%) is adequate.",
            fmt_one_decimal(snapshot.soil_moisture_pct)
        ),
    )
}
