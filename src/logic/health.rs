//! Crop health scoring.
//!
//! Health starts at 100 and loses points for each out-of-range reading. The
//! penalties live in an ordered rule table; rules share a dimension
//! (temperature, humidity, soil moisture) and only the first matching rule of
//! each dimension applies. Suggestions come out in table order.

use crate::models::{CropHealth, CropProfile, HealthCondition, SensorSnapshot};

const STARTING_SCORE: i32 = 100;
const ACTION_REQUIRED_BELOW: i32 = 50;
const ALL_CLEAR: &str = "All conditions optimal. Continue monitoring.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Temperature,
    Humidity,
    SoilMoisture,
}

struct PenaltyRule {
    dimension: Dimension,
    penalty: i32,
    suggestion: &'static str,
    applies: fn(&SensorSnapshot, &CropProfile) -> bool,
}

const HEALTH_RULES: [PenaltyRule; 6] = [
    PenaltyRule {
        dimension: Dimension::Temperature,
        penalty: 20,
        suggestion: "Temperature is too low. Consider greenhouse protection.",
        applies: temperature_low,
    },
    PenaltyRule {
        dimension: Dimension::Temperature,
        penalty: 25,
        suggestion: "High temperature stress. Increase irrigation frequency.",
        applies: temperature_high,
    },
    PenaltyRule {
        dimension: Dimension::Humidity,
        penalty: 15,
        suggestion: "Low humidity. Consider misting or mulching.",
        applies: humidity_low,
    },
    PenaltyRule {
        dimension: Dimension::Humidity,
        penalty: 10,
        suggestion: "High humidity may cause fungal issues. Ensure ventilation.",
        applies: humidity_high,
    },
    // Dry soil is checked against the operator threshold, not the crop range,
    // and wins over the waterlogged check.
    PenaltyRule {
        dimension: Dimension::SoilMoisture,
        penalty: 30,
        suggestion: "Soil is dry. Immediate irrigation recommended.",
        applies: soil_dry,
    },
    PenaltyRule {
        dimension: Dimension::SoilMoisture,
        penalty: 15,
        suggestion: "Soil may be waterlogged. Reduce irrigation.",
        applies: soil_waterlogged,
    },
];

fn temperature_low(s: &SensorSnapshot, p: &CropProfile) -> bool {
    s.temperature_c < p.temperature_c.lo()
}

fn temperature_high(s: &SensorSnapshot, p: &CropProfile) -> bool {
    s.temperature_c > p.temperature_c.hi()
}

fn humidity_low(s: &SensorSnapshot, p: &CropProfile) -> bool {
    s.humidity_pct < p.humidity_pct.lo()
}

fn humidity_high(s: &SensorSnapshot, p: &CropProfile) -> bool {
    s.humidity_pct > p.humidity_pct.hi()
}

fn soil_dry(s: &SensorSnapshot, _p: &CropProfile) -> bool {
    s.is_below_threshold()
}

fn soil_waterlogged(s: &SensorSnapshot, p: &CropProfile) -> bool {
    s.soil_moisture_pct > p.soil_moisture_pct.hi()
}

pub fn evaluate(snapshot: &SensorSnapshot, profile: &CropProfile) -> CropHealth {
    let mut score = STARTING_SCORE;
    let mut suggestions = Vec::new();
    let mut penalized: Vec<Dimension> = Vec::with_capacity(3);

    for rule in &HEALTH_RULES {
        if penalized.contains(&rule.dimension) {
            continue;
        }
        if (rule.applies)(snapshot, profile) {
            score -= rule.penalty;
            suggestions.push(rule.suggestion.to_string());
            penalized.push(rule.dimension);
        }
    }

    if suggestions.is_empty() {
        suggestions.push(ALL_CLEAR.to_string());
    }

    let condition = HealthCondition::from_score(score);
    tracing::debug!(crop = %snapshot.crop, score, %condition, "Crop health evaluated");

    CropHealth {
        condition,
        score,
        description: format!(
            "{} health is {} based on current conditions.",
            snapshot.crop.as_str(),
            condition.as_str().to_lowercase()
        ),
        action_required: score < ACTION_REQUIRED_BELOW,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CropType;
    use proptest::prelude::*;

    fn wheat(moisture: f64, temp: f64, humidity: f64) -> SensorSnapshot {
        SensorSnapshot::new(moisture, temp, humidity)
            .with_crop(CropType::Wheat)
            .with_threshold(50.0)
    }

    #[test]
    fn optimal_conditions_score_full() {
        let health = evaluate(&wheat(55.0, 20.0, 50.0), &CropProfile::WHEAT);
        assert_eq!(health.score, 100);
        assert_eq!(health.condition, HealthCondition::Good);
        assert!(!health.action_required);
        assert_eq!(health.suggestions, vec![ALL_CLEAR.to_string()]);
        assert_eq!(
            health.description,
            "Wheat health is good based on current conditions."
        );
    }

    #[test]
    fn hot_dry_air_and_dry_soil_is_poor() {
        let health = evaluate(&wheat(30.0, 40.0, 20.0), &CropProfile::WHEAT);
        assert_eq!(health.score, 30);
        assert_eq!(health.condition, HealthCondition::Poor);
        assert!(health.action_required);
        assert_eq!(
            health.suggestions,
            vec![
                "High temperature stress. Increase irrigation frequency.",
                "Low humidity. Consider misting or mulching.",
                "Soil is dry. Immediate irrigation recommended.",
            ]
        );
        assert_eq!(
            health.description,
            "Wheat health is poor based on current conditions."
        );
    }

    #[test]
    fn cold_and_humid_is_moderate() {
        // 100 - 20 - 10 = 70 is still good; add waterlogging to reach moderate.
        let health = evaluate(&wheat(70.0, 10.0, 80.0), &CropProfile::WHEAT);
        assert_eq!(health.score, 55);
        assert_eq!(health.condition, HealthCondition::Moderate);
        assert!(!health.action_required);
        assert_eq!(health.suggestions.len(), 3);
        assert!(health.suggestions[0].contains("too low"));
        assert!(health.suggestions[1].contains("fungal"));
        assert!(health.suggestions[2].contains("waterlogged"));
    }

    #[test]
    fn all_high_branches_bottom_out_at_fifty() {
        let health = evaluate(&wheat(80.0, 30.0, 70.0), &CropProfile::WHEAT);
        assert_eq!(health.score, 50);
        assert_eq!(health.condition, HealthCondition::Moderate);
        assert!(!health.action_required);
    }

    #[test]
    fn dry_soil_wins_over_waterlogged() {
        // Threshold above the crop's ideal ceiling: soil is both "dry" and "wet".
        let snapshot = wheat(68.0, 20.0, 50.0).with_threshold(70.0);
        let health = evaluate(&snapshot, &CropProfile::WHEAT);
        assert_eq!(health.score, 70);
        assert_eq!(
            health.suggestions,
            vec!["Soil is dry. Immediate irrigation recommended."]
        );
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let health = evaluate(&wheat(65.0, 25.0, 40.0), &CropProfile::WHEAT);
        assert_eq!(health.score, 100);
        let health = evaluate(&wheat(50.0, 15.0, 60.0), &CropProfile::WHEAT);
        assert_eq!(health.score, 100);
    }

    #[test]
    fn profile_changes_outcome() {
        // Comfortable for rice, too hot and humid for wheat.
        let snapshot = SensorSnapshot::new(80.0, 33.0, 85.0)
            .with_crop(CropType::Rice)
            .with_threshold(50.0);
        let rice = evaluate(&snapshot, &CropProfile::RICE);
        assert_eq!(rice.score, 100);
        assert_eq!(
            rice.description,
            "Rice health is good based on current conditions."
        );
        let wheat = evaluate(&snapshot, &CropProfile::WHEAT);
        assert_eq!(wheat.score, 100 - 25 - 10 - 15);
    }

    proptest! {
        #[test]
        fn condition_matches_score_band(
            moisture in 0.0f64..100.0,
            temp in -10.0f64..50.0,
            humidity in 0.0f64..100.0,
            threshold in 0.0f64..100.0,
            crop_idx in 0usize..6,
        ) {
            let crop = CropType::ALL[crop_idx];
            let snapshot = SensorSnapshot::new(moisture, temp, humidity)
                .with_crop(crop)
                .with_threshold(threshold);
            let health = evaluate(&snapshot, &CropProfile::builtin(crop));

            prop_assert!(!health.suggestions.is_empty());
            prop_assert!(health.suggestions.len() <= 3);
            prop_assert!(health.score >= 100 - 25 - 15 - 30);
            prop_assert_eq!(health.condition, HealthCondition::from_score(health.score));
            prop_assert_eq!(health.action_required, health.score < 50);
        }
    }
}
