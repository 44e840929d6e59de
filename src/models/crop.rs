use crate::error::{AgriError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    #[default]
    Wheat,
    Rice,
    Corn,
    Tomato,
    Cotton,
    Soybean,
}

impl CropType {
    pub const ALL: [CropType; 6] = [
        CropType::Wheat,
        CropType::Rice,
        CropType::Corn,
        CropType::Tomato,
        CropType::Cotton,
        CropType::Soybean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Wheat => "Wheat",
            CropType::Rice => "Rice",
            CropType::Corn => "Corn",
            CropType::Tomato => "Tomato",
            CropType::Cotton => "Cotton",
            CropType::Soybean => "Soybean",
        }
    }

    /// Lowercase key used in config files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            CropType::Wheat => "wheat",
            CropType::Rice => "rice",
            CropType::Corn => "corn",
            CropType::Tomato => "tomato",
            CropType::Cotton => "cotton",
            CropType::Soybean => "soybean",
        }
    }

    /// Case-insensitive; also accepts common aliases such as "maize", "soy"
    /// and plural forms.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wheat" => Some(CropType::Wheat),
            "rice" => Some(CropType::Rice),
            "corn" | "maize" => Some(CropType::Corn),
            "tomato" | "tomatoes" => Some(CropType::Tomato),
            "cotton" => Some(CropType::Cotton),
            "soybean" | "soybeans" | "soy" => Some(CropType::Soybean),
            _ => None,
        }
    }

    /// Parses a crop name, substituting wheat for anything unrecognized.
    pub fn from_str_lossy(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            tracing::warn!("Unknown crop type '{}', using wheat profile", s);
            CropType::Wheat
        })
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Closed interval `[lo, hi]` with `lo <= hi`.
///
/// Serialized as a two-element array so config files can write `[15, 25]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct IdealRange {
    lo: f64,
    hi: f64,
}

impl IdealRange {
    pub fn new(lo: f64, hi: f64) -> Result<Self> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(AgriError::InvalidProfile(format!(
                "range bounds must be finite, got [{}, {}]",
                lo, hi
            )));
        }
        if lo > hi {
            return Err(AgriError::InvalidProfile(format!(
                "range lower bound {} exceeds upper bound {}",
                lo, hi
            )));
        }
        Ok(Self { lo, hi })
    }

    // Only for the built-in table, whose bounds are known to be ordered.
    const fn fixed(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }
}

impl TryFrom<[f64; 2]> for IdealRange {
    type Error = AgriError;

    fn try_from(value: [f64; 2]) -> Result<Self> {
        IdealRange::new(value[0], value[1])
    }
}

impl From<IdealRange> for [f64; 2] {
    fn from(range: IdealRange) -> Self {
        [range.lo, range.hi]
    }
}

impl std::fmt::Display for IdealRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

/// Ideal growing conditions for a single crop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub temperature_c: IdealRange,
    pub humidity_pct: IdealRange,
    pub soil_moisture_pct: IdealRange,
}

impl CropProfile {
    pub const WHEAT: CropProfile = CropProfile::fixed((15.0, 25.0), (40.0, 60.0), (45.0, 65.0));
    pub const RICE: CropProfile = CropProfile::fixed((20.0, 35.0), (70.0, 90.0), (70.0, 90.0));
    pub const CORN: CropProfile = CropProfile::fixed((18.0, 32.0), (50.0, 75.0), (50.0, 70.0));
    pub const TOMATO: CropProfile = CropProfile::fixed((18.0, 27.0), (60.0, 80.0), (60.0, 80.0));
    pub const COTTON: CropProfile = CropProfile::fixed((21.0, 30.0), (40.0, 60.0), (50.0, 65.0));
    pub const SOYBEAN: CropProfile = CropProfile::fixed((20.0, 30.0), (60.0, 80.0), (50.0, 70.0));

    const fn fixed(temp: (f64, f64), humidity: (f64, f64), moisture: (f64, f64)) -> Self {
        Self {
            temperature_c: IdealRange::fixed(temp.0, temp.1),
            humidity_pct: IdealRange::fixed(humidity.0, humidity.1),
            soil_moisture_pct: IdealRange::fixed(moisture.0, moisture.1),
        }
    }

    pub fn builtin(crop: CropType) -> Self {
        match crop {
            CropType::Wheat => Self::WHEAT,
            CropType::Rice => Self::RICE,
            CropType::Corn => Self::CORN,
            CropType::Tomato => Self::TOMATO,
            CropType::Cotton => Self::COTTON,
            CropType::Soybean => Self::SOYBEAN,
        }
    }
}

/// Crop profiles keyed by crop type.
///
/// Lookups never fail: a crop without an entry resolves to the wheat profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CropProfileTable {
    profiles: BTreeMap<CropType, CropProfile>,
}

impl CropProfileTable {
    pub fn builtin() -> Self {
        let profiles = CropType::ALL
            .iter()
            .map(|crop| (*crop, CropProfile::builtin(*crop)))
            .collect();
        Self { profiles }
    }

    pub fn with_override(mut self, crop: CropType, profile: CropProfile) -> Self {
        self.profiles.insert(crop, profile);
        self
    }

    pub fn get(&self, crop: CropType) -> &CropProfile {
        self.profiles
            .get(&crop)
            .or_else(|| self.profiles.get(&CropType::Wheat))
            .unwrap_or(&CropProfile::WHEAT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CropType, &CropProfile)> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }
}

impl Default for CropProfileTable {
    fn default() -> Self {
        Self::builtin()
    }
}
