use super::crop::CropType;
use serde::{Deserialize, Serialize};

/// One set of simultaneous sensor readings plus the operator's irrigation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub soil_moisture_pct: f64,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    #[serde(default)]
    pub crop: CropType,
    pub moisture_threshold_pct: f64,
    #[serde(default = "default_auto_mode")]
    pub auto_mode: bool,
    /// Oldest first, most recent last.
    #[serde(default)]
    pub moisture_history: Vec<f64>,
}

fn default_auto_mode() -> bool {
    true
}

impl SensorSnapshot {
    pub fn new(soil_moisture_pct: f64, temperature_c: f64, humidity_pct: f64) -> Self {
        Self {
            soil_moisture_pct,
            temperature_c,
            humidity_pct,
            ..Self::default()
        }
    }

    pub fn with_crop(mut self, crop: CropType) -> Self {
        self.crop = crop;
        self
    }

    pub fn with_threshold(mut self, threshold_pct: f64) -> Self {
        self.moisture_threshold_pct = threshold_pct;
        self
    }

    pub fn with_auto_mode(mut self, auto_mode: bool) -> Self {
        self.auto_mode = auto_mode;
        self
    }

    pub fn with_history(mut self, history: Vec<f64>) -> Self {
        self.moisture_history = history;
        self
    }

    pub fn is_below_threshold(&self) -> bool {
        self.soil_moisture_pct < self.moisture_threshold_pct
    }
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            soil_moisture_pct: 42.0,
            temperature_c: 28.0,
            humidity_pct: 65.0,
            crop: CropType::Wheat,
            moisture_threshold_pct: 50.0,
            auto_mode: true,
            moisture_history: Vec::new(),
        }
    }
}
