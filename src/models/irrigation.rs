use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PumpStatus {
    On,
    Off,
    Manual,
}

impl PumpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PumpStatus::On => "ON",
            PumpStatus::Off => "OFF",
            PumpStatus::Manual => "MANUAL",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            PumpStatus::On => Color::LightBlue,
            PumpStatus::Off => Color::DarkGray,
            PumpStatus::Manual => Color::Yellow,
        }
    }
}

impl std::fmt::Display for PumpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrigationDecision {
    pub pump_status: PumpStatus,
    pub reason: String,
}

impl IrrigationDecision {
    pub fn new(pump_status: PumpStatus, reason: impl Into<String>) -> Self {
        Self {
            pump_status,
            reason: reason.into(),
        }
    }

    pub fn is_pump_on(&self) -> bool {
        self.pump_status == PumpStatus::On
    }
}
