use super::alerts::{self, AlertEngine};
use super::{health, irrigation, prediction};
use crate::models::{
    Alert, CropHealth, CropProfileTable, IrrigationDecision, MoisturePrediction, SensorSnapshot,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the engine derives from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub health: CropHealth,
    pub irrigation: IrrigationDecision,
    /// `None` when the moisture history is too short or malformed to project.
    pub prediction: Option<MoisturePrediction>,
    pub alerts: Vec<Alert>,
    pub evaluated_at: DateTime<Utc>,
}

impl Evaluation {
    pub fn high_alert_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|a| a.level == crate::models::AlertLevel::High)
            .count()
    }
}

/// Stateless decision core. Holds only read-only tables, so one instance can
/// be shared across threads.
pub struct DecisionEngine {
    profiles: CropProfileTable,
}

impl DecisionEngine {
    pub fn new(profiles: CropProfileTable) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &CropProfileTable {
        &self.profiles
    }

    /// `(id, name)` of each alert rule, in evaluation order.
    pub fn alert_rules(&self) -> Vec<(&'static str, &'static str)> {
        AlertEngine::new().list_rules()
    }

    pub fn evaluate(&self, snapshot: &SensorSnapshot) -> Evaluation {
        self.evaluate_at(snapshot, Utc::now())
    }

    pub fn evaluate_at(&self, snapshot: &SensorSnapshot, now: DateTime<Utc>) -> Evaluation {
        let profile = self.profiles.get(snapshot.crop);

        let prediction = match prediction::predict(
            &snapshot.moisture_history,
            snapshot.moisture_threshold_pct,
        ) {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::debug!("Skipping moisture prediction: {}", e);
                None
            }
        };

        Evaluation {
            health: health::evaluate(snapshot, profile),
            irrigation: irrigation::decide(snapshot),
            prediction,
            alerts: alerts::generate_alerts_at(snapshot, now),
            evaluated_at: now,
        }
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(CropProfileTable::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CropProfile, CropType, HealthCondition, IdealRange, MoistureTrend, PumpStatus,
    };

    #[test]
    fn hot_dry_field_evaluation() {
        let snapshot = SensorSnapshot::new(30.0, 40.0, 20.0)
            .with_crop(CropType::Wheat)
            .with_threshold(50.0)
            .with_history(vec![40.0, 42.0, 44.0]);
        let eval = DecisionEngine::default().evaluate(&snapshot);

        assert_eq!(eval.irrigation.pump_status, PumpStatus::On);
        assert!(eval.irrigation.reason.contains("30.0%"));
        assert!(eval.irrigation.reason.contains("below threshold (50%)"));

        assert_eq!(eval.health.score, 30);
        assert_eq!(eval.health.condition, HealthCondition::Poor);
        assert!(eval.health.action_required);

        let ids: Vec<&str> = eval.alerts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["heat-stress", "low-moisture", "low-humidity"]);
        assert_eq!(eval.high_alert_count(), 2);
        assert!(eval.alerts.iter().all(|a| a.timestamp == eval.evaluated_at));

        let prediction = eval.prediction.unwrap();
        assert_eq!(prediction.trend, MoistureTrend::Stable);
        assert!(prediction.needs_irrigation);
    }

    #[test]
    fn short_history_only_drops_prediction() {
        let snapshot = SensorSnapshot::new(55.0, 20.0, 50.0).with_history(vec![55.0]);
        let eval = DecisionEngine::default().evaluate(&snapshot);
        assert!(eval.prediction.is_none());
        assert_eq!(eval.health.condition, HealthCondition::Good);
        assert_eq!(eval.irrigation.pump_status, PumpStatus::Off);
        assert!(eval.alerts.is_empty());
    }

    #[test]
    fn uses_overridden_profile() {
        let cool_corn = CropProfile {
            temperature_c: IdealRange::new(10.0, 20.0).unwrap(),
            ..CropProfile::CORN
        };
        let engine =
            DecisionEngine::new(CropProfileTable::builtin().with_override(CropType::Corn, cool_corn));
        let snapshot = SensorSnapshot::new(60.0, 25.0, 60.0)
            .with_crop(CropType::Corn)
            .with_threshold(50.0);

        let eval = engine.evaluate(&snapshot);
        assert_eq!(eval.health.score, 75);
        assert_eq!(
            eval.health.description,
            "Corn health is good based on current conditions."
        );
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DecisionEngine>();

        let engine = DecisionEngine::default();
        let snapshot = SensorSnapshot::new(30.0, 40.0, 20.0).with_threshold(50.0);
        let now = Utc::now();
        let scores: Vec<i32> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| engine.evaluate_at(&snapshot, now).health.score))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(scores.iter().all(|s| *s == 30));
    }

    #[test]
    fn evaluation_serializes_to_json() {
        let snapshot = SensorSnapshot::new(30.0, 40.0, 20.0)
            .with_threshold(50.0)
            .with_history(vec![40.0, 42.0, 44.0]);
        let eval = DecisionEngine::default().evaluate(&snapshot);
        let json = serde_json::to_value(&eval).unwrap();
        assert_eq!(json["irrigation"]["pump_status"], "ON");
        assert_eq!(json["health"]["condition"], "Poor");
        assert_eq!(json["prediction"]["trend"], "stable");
        assert_eq!(json["alerts"][0]["type"], "Heat Stress");
    }
}
