use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Low,
    Medium,
    High,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Low => "Low",
            AlertLevel::Medium => "Medium",
            AlertLevel::High => "High",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            AlertLevel::Low => Color::Cyan,
            AlertLevel::Medium => Color::Yellow,
            AlertLevel::High => Color::Red,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AlertLevel::Low => "ℹ",
            AlertLevel::Medium => "⚠",
            AlertLevel::High => "!",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Stable per alert kind, so consumers can key and de-duplicate on it.
    pub id: String,
    pub level: AlertLevel,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub message: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn new(
        id: impl Into<String>,
        level: AlertLevel,
        alert_type: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            level,
            alert_type: alert_type.into(),
            message: message.into(),
            action: String::new(),
            timestamp,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }
}
