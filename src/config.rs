use crate::error::{AgriError, Result};
use crate::models::{CropProfile, CropProfileTable, CropType, SensorSnapshot};
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub farm: FarmConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
    /// Per-crop replacements for the built-in ideal ranges, keyed by crop name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_profiles: Option<BTreeMap<String, CropProfile>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarmConfig {
    pub name: String,
    pub crop: String,
    pub moisture_threshold_pct: f64,
    #[serde(default = "default_auto_mode")]
    pub auto_mode: bool,
}

fn default_auto_mode() -> bool {
    true
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            name: "Home Farm".into(),
            crop: CropType::Wheat.key().into(),
            moisture_threshold_pct: 50.0,
            auto_mode: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulatorConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Fixed RNG seed; omit for a fresh sequence each run.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub initial: InitialReadings,
}

fn default_interval_secs() -> u64 {
    5
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            seed: None,
            initial: InitialReadings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InitialReadings {
    pub soil_moisture_pct: f64,
    pub temperature_c: f64,
    pub humidity_pct: f64,
}

impl Default for InitialReadings {
    fn default() -> Self {
        let snapshot = SensorSnapshot::default();
        Self {
            soil_moisture_pct: snapshot.soil_moisture_pct,
            temperature_c: snapshot.temperature_c,
            humidity_pct: snapshot.humidity_pct,
        }
    }
}

impl Config {
    /// Load from the override path or the first standard location that exists.
    /// An explicit path must exist; otherwise a missing file yields defaults.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(AgriError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            tracing::info!(
                "No config file at {:?}; using built-in defaults. Run `agrisense init` to create one.",
                config_path
            );
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AgriError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse YAML after substituting `${VAR}` placeholders from the environment.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| AgriError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if CropType::from_str(&self.farm.crop).is_none() {
            return Err(AgriError::Config(format!(
                "Unknown crop '{}' in farm section",
                self.farm.crop
            )));
        }

        let threshold = self.farm.moisture_threshold_pct;
        if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
            return Err(AgriError::Config(format!(
                "moisture_threshold_pct must be between 0 and 100, got {}",
                threshold
            )));
        }

        if self.simulator.interval_secs == 0 {
            return Err(AgriError::Config(
                "simulator.interval_secs must be at least 1".into(),
            ));
        }

        self.crop_profile_table().map(|_| ())
    }

    /// Built-in profiles with any configured overrides applied.
    pub fn crop_profile_table(&self) -> Result<CropProfileTable> {
        let mut table = CropProfileTable::builtin();

        if let Some(overrides) = &self.crop_profiles {
            for (name, profile) in overrides {
                let crop = CropType::from_str(name).ok_or_else(|| {
                    AgriError::Config(format!("Unknown crop '{}' in crop_profiles", name))
                })?;
                tracing::debug!("Overriding {} profile from config", crop);
                table = table.with_override(crop, *profile);
            }
        }

        Ok(table)
    }

    pub fn crop(&self) -> CropType {
        CropType::from_str_lossy(&self.farm.crop)
    }

    /// Starting snapshot for a dashboard session, without history.
    pub fn initial_snapshot(&self) -> SensorSnapshot {
        let initial = &self.simulator.initial;
        SensorSnapshot::new(
            initial.soil_moisture_pct,
            initial.temperature_c,
            initial.humidity_pct,
        )
        .with_crop(self.crop())
        .with_threshold(self.farm.moisture_threshold_pct)
        .with_auto_mode(self.farm.auto_mode)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    /// Path of the file `load` would read, if any exists.
    pub fn resolved_path(config_override: Option<&PathBuf>) -> Option<PathBuf> {
        match config_override {
            Some(p) => p.exists().then(|| p.clone()),
            None => Self::find_config_path().ok().filter(|p| p.exists()),
        }
    }

    /// Default path for writing new config files (~/.config/agrisense/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgriError::Config("Cannot determine config directory".into()))?
            .join("agrisense");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the new Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up AgriSense!");
        println!();

        println!("Farm");
        let name: String = Input::new()
            .with_prompt("  Farm name")
            .default("Home Farm".into())
            .interact_text()
            .map_err(|e| AgriError::Config(format!("Input error: {}", e)))?;

        let crop: String = Input::new()
            .with_prompt("  Crop (wheat, rice, corn, tomato, cotton, soybean)")
            .default(CropType::Wheat.key().into())
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                CropType::from_str(input)
                    .map(|_| ())
                    .ok_or_else(|| format!("unknown crop '{}'", input))
            })
            .interact_text()
            .map_err(|e| AgriError::Config(format!("Input error: {}", e)))?;

        let moisture_threshold_pct: f64 = Input::new()
            .with_prompt("  Soil moisture threshold (%)")
            .default(50.0)
            .validate_with(|v: &f64| -> std::result::Result<(), String> {
                if (0.0..=100.0).contains(v) {
                    Ok(())
                } else {
                    Err("threshold must be between 0 and 100".into())
                }
            })
            .interact_text()
            .map_err(|e| AgriError::Config(format!("Input error: {}", e)))?;

        let auto_mode = Confirm::new()
            .with_prompt("  Automatic irrigation?")
            .default(true)
            .interact()
            .map_err(|e| AgriError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Simulator");
        let interval_secs: u64 = Input::new()
            .with_prompt("  Tick interval (seconds)")
            .default(5)
            .interact_text()
            .map_err(|e| AgriError::Config(format!("Input error: {}", e)))?;

        println!();

        let crop = CropType::from_str_lossy(&crop);
        let config = Config {
            farm: FarmConfig {
                name,
                crop: crop.key().into(),
                moisture_threshold_pct,
                auto_mode,
            },
            simulator: SimulatorConfig {
                interval_secs: interval_secs.max(1),
                ..SimulatorConfig::default()
            },
            crop_profiles: None,
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| AgriError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# AgriSense Configuration\n# Generated by `agrisense init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| AgriError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
farm:
  name: North Field
  crop: corn
  moisture_threshold_pct: 40
  auto_mode: false
simulator:
  interval_secs: 2
  seed: 42
  initial:
    soil_moisture_pct: 35
    temperature_c: 30
    humidity_pct: 55
crop_profiles:
  corn:
    temperature_c: [15, 30]
    humidity_pct: [40, 70]
    soil_moisture_pct: [45, 70]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.farm.name, "North Field");
        assert_eq!(config.crop(), CropType::Corn);
        assert_eq!(config.simulator.seed, Some(42));

        let snapshot = config.initial_snapshot();
        assert_eq!(snapshot.crop, CropType::Corn);
        assert_eq!(snapshot.moisture_threshold_pct, 40.0);
        assert!(!snapshot.auto_mode);
        assert_eq!(snapshot.soil_moisture_pct, 35.0);
        assert!(snapshot.moisture_history.is_empty());

        let table = config.crop_profile_table().unwrap();
        assert_eq!(table.get(CropType::Corn).temperature_c.hi(), 30.0);
        assert_eq!(table.get(CropType::Rice), &CropProfile::RICE);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = Config::from_yaml("farm:\n  name: Tiny\n  crop: rice\n  moisture_threshold_pct: 60\n").unwrap();
        assert!(config.farm.auto_mode);
        assert_eq!(config.simulator.interval_secs, 5);
        assert_eq!(config.simulator.initial.soil_moisture_pct, 42.0);
        assert!(config.crop_profiles.is_none());
    }

    #[test]
    fn rejects_unknown_override_crop() {
        let yaml = r#"
farm: { name: X, crop: wheat, moisture_threshold_pct: 50 }
crop_profiles:
  barley:
    temperature_c: [10, 20]
    humidity_pct: [40, 60]
    soil_moisture_pct: [40, 60]
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("barley"));
    }

    #[test]
    fn rejects_inverted_override_range() {
        let yaml = r#"
farm: { name: X, crop: wheat, moisture_threshold_pct: 50 }
crop_profiles:
  wheat:
    temperature_c: [25, 15]
    humidity_pct: [40, 60]
    soil_moisture_pct: [40, 60]
"#;
        assert!(matches!(
            Config::from_yaml(yaml),
            Err(AgriError::Config(_))
        ));
    }

    #[test]
    fn rejects_bad_farm_values() {
        assert!(Config::from_yaml("farm: { name: X, crop: kale, moisture_threshold_pct: 50 }").is_err());
        assert!(Config::from_yaml("farm: { name: X, crop: wheat, moisture_threshold_pct: 150 }").is_err());
        assert!(Config::from_yaml("simulator: { interval_secs: 0 }").is_err());
    }

    #[test]
    fn substitutes_env_vars() {
        std::env::set_var("AGRISENSE_TEST_FARM_NAME", "Env Farm");
        let config = Config::from_yaml(
            "farm: { name: \"${AGRISENSE_TEST_FARM_NAME}\", crop: wheat, moisture_threshold_pct: 50 }",
        )
        .unwrap();
        assert_eq!(config.farm.name, "Env Farm");
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let path = PathBuf::from("/nonexistent/agrisense/config.yaml");
        assert!(Config::load(Some(path)).is_err());
    }

    #[test]
    fn default_round_trips_through_yaml() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.farm.crop, "wheat");
        assert_eq!(config.farm.moisture_threshold_pct, 50.0);
    }
}
