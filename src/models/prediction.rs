use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoistureTrend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

impl MoistureTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoistureTrend::Increasing => "Increasing",
            MoistureTrend::Decreasing => "Decreasing",
            MoistureTrend::Stable => "Stable",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MoistureTrend::Increasing => "↑",
            MoistureTrend::Decreasing => "↓",
            MoistureTrend::Stable => "→",
        }
    }
}

impl std::fmt::Display for MoistureTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.symbol(), self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoisturePrediction {
    /// Next-step soil moisture, clamped to the sensor's plausible band.
    pub predicted_moisture_pct: f64,
    pub needs_irrigation: bool,
    pub trend: MoistureTrend,
}
