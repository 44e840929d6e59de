use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthCondition {
    Good,
    Moderate,
    Poor,
}

impl HealthCondition {
    /// Score bands: 70 and above is good, 40 up to 70 is moderate, below 40 is poor.
    pub fn from_score(score: i32) -> Self {
        if score >= 70 {
            HealthCondition::Good
        } else if score >= 40 {
            HealthCondition::Moderate
        } else {
            HealthCondition::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthCondition::Good => "Good",
            HealthCondition::Moderate => "Moderate",
            HealthCondition::Poor => "Poor",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            HealthCondition::Good => Color::Green,
            HealthCondition::Moderate => Color::Yellow,
            HealthCondition::Poor => Color::Red,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            HealthCondition::Good => "✓",
            HealthCondition::Moderate => "⚠",
            HealthCondition::Poor => "✗",
        }
    }
}

impl std::fmt::Display for HealthCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropHealth {
    pub condition: HealthCondition,
    pub score: i32,
    pub description: String,
    pub action_required: bool,
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_band_edges() {
        assert_eq!(HealthCondition::from_score(100), HealthCondition::Good);
        assert_eq!(HealthCondition::from_score(70), HealthCondition::Good);
        assert_eq!(HealthCondition::from_score(69), HealthCondition::Moderate);
        assert_eq!(HealthCondition::from_score(40), HealthCondition::Moderate);
        assert_eq!(HealthCondition::from_score(39), HealthCondition::Poor);
        assert_eq!(HealthCondition::from_score(-20), HealthCondition::Poor);
    }
}
