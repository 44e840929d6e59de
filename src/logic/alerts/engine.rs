use super::{
    heat_stress::HeatStressRule, low_humidity::LowHumidityRule,
    soil_moisture::SoilMoistureRule, AlertRule,
};
use crate::models::{Alert, SensorSnapshot};
use chrono::{DateTime, Utc};

pub struct AlertEngine {
    rules: Vec<Box<dyn AlertRule>>,
}

impl AlertEngine {
    /// Rules run in declaration order, which is also the order of the output.
    pub fn new() -> Self {
        let rules: Vec<Box<dyn AlertRule>> = vec![
            Box::new(HeatStressRule),
            Box::new(SoilMoistureRule),
            Box::new(LowHumidityRule),
        ];

        Self { rules }
    }

    pub fn evaluate(&self, snapshot: &SensorSnapshot, now: DateTime<Utc>) -> Vec<Alert> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(snapshot, now))
            .collect()
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertLevel;

    fn ids(alerts: &[Alert]) -> Vec<&str> {
        alerts.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn all_three_categories_fire_in_order() {
        let snapshot = SensorSnapshot::new(30.0, 40.0, 20.0).with_threshold(50.0);
        let now = Utc::now();
        let alerts = AlertEngine::new().evaluate(&snapshot, now);

        assert_eq!(ids(&alerts), vec!["heat-stress", "low-moisture", "low-humidity"]);
        assert!(alerts.iter().all(|a| a.timestamp == now));
        assert_eq!(alerts[0].level, AlertLevel::High);
        assert_eq!(alerts[1].level, AlertLevel::High);
        assert_eq!(alerts[2].level, AlertLevel::Low);
    }

    #[test]
    fn comfortable_snapshot_is_all_clear() {
        let snapshot = SensorSnapshot::new(55.0, 25.0, 60.0).with_threshold(50.0);
        assert!(AlertEngine::new().evaluate(&snapshot, Utc::now()).is_empty());
    }

    #[test]
    fn temperature_escalates_monotonically() {
        let engine = AlertEngine::new();
        let at = |temp: f64| {
            let snapshot = SensorSnapshot::new(55.0, temp, 60.0).with_threshold(50.0);
            engine
                .evaluate(&snapshot, Utc::now())
                .into_iter()
                .find(|a| a.id.starts_with("heat-"))
                .map(|a| a.id)
        };

        assert_eq!(at(30.0), None);
        assert_eq!(at(35.0).as_deref(), Some("heat-warning"));
        assert_eq!(at(40.0).as_deref(), Some("heat-stress"));
    }

    #[test]
    fn list_rules_in_evaluation_order() {
        let ids: Vec<&str> = AlertEngine::new()
            .list_rules()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["heat_stress", "soil_moisture", "low_humidity"]);
    }
}
