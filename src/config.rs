//! TOML-based twin configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveTime, Utc};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::generator::{HOURLY_BASELINE, UtilizationGenerator};
use crate::pipeline::power::{PowerModel, TierPowerParams};

/// Top-level configuration parsed from TOML.
///
/// All sections have defaults matching the baseline preset. Load from TOML
/// with [`TwinConfig::from_toml_file`] or use [`TwinConfig::baseline`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TwinConfig {
    /// Per-tier power model coefficients.
    #[serde(default)]
    pub power: PowerModel,
    /// Synthetic RU utilization parameters.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Output locations.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Synthetic RU utilization parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Random seed.
    pub seed: u64,
    /// Number of samples to generate (must be > 0).
    pub intervals: usize,
    /// Minutes between samples (must be > 0).
    pub interval_minutes: u32,
    /// Full width of the uniform noise band around the hourly baseline.
    pub noise_amplitude: f64,
    /// First timestamp; midnight UTC of the current day when unset.
    pub start: Option<DateTime<Utc>>,
    /// Utilization per hour of day (24 values in [0, 1]).
    pub hourly_baseline: Vec<f64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            intervals: 24,
            interval_minutes: 60,
            noise_amplitude: 0.7,
            start: None,
            hourly_baseline: HOURLY_BASELINE.to_vec(),
        }
    }
}

impl GeneratorConfig {
    /// Builds a seeded generator from these parameters.
    pub fn build(&self) -> UtilizationGenerator {
        UtilizationGenerator::new(self.hourly_baseline.clone(), self.noise_amplitude, self.seed)
    }

    /// Configured start, or midnight UTC of the current day.
    pub fn start_or_today(&self) -> DateTime<Utc> {
        self.start
            .unwrap_or_else(|| Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc())
    }
}

/// Output locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving CSV tables.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("CSVfileOutputs"),
        }
    }
}

impl TwinConfig {
    /// Returns the baseline configuration.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the low-idle preset: halved idle power on every tier.
    pub fn low_idle() -> Self {
        Self {
            power: PowerModel {
                ru: TierPowerParams::new(100.0, 200.0),
                du: TierPowerParams::with_child_term(100.0, 200.0, 20.0),
                cu: TierPowerParams::new(100.0, 100.0),
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "low_idle"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "low_idle" => Ok(Self::low_idle()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (tier, params) in [
            ("ru", &self.power.ru),
            ("du", &self.power.du),
            ("cu", &self.power.cu),
        ] {
            if !(params.p0.is_finite() && params.p0 >= 0.0) {
                errors.push(ConfigError::new(format!("power.{tier}.p0"), "must be >= 0"));
            }
            if !(params.k1.is_finite() && params.k1 >= 0.0) {
                errors.push(ConfigError::new(format!("power.{tier}.k1"), "must be >= 0"));
            }
            if let Some(k2) = params.k2 {
                if tier != "du" {
                    errors.push(ConfigError::new(
                        format!("power.{tier}.k2"),
                        "only the du tier has a per-child term",
                    ));
                } else if !(k2.is_finite() && k2 >= 0.0) {
                    errors.push(ConfigError::new("power.du.k2", "must be >= 0"));
                }
            }
        }

        let g = &self.generator;
        if g.intervals == 0 {
            errors.push(ConfigError::new("generator.intervals", "must be > 0"));
        }
        if g.interval_minutes == 0 {
            errors.push(ConfigError::new("generator.interval_minutes", "must be > 0"));
        }
        if !(g.noise_amplitude.is_finite() && g.noise_amplitude >= 0.0) {
            errors.push(ConfigError::new("generator.noise_amplitude", "must be >= 0"));
        }
        if g.hourly_baseline.len() != 24 {
            errors.push(ConfigError::new(
                "generator.hourly_baseline",
                format!("must have 24 values, got {}", g.hourly_baseline.len()),
            ));
        }
        if g.hourly_baseline.iter().any(|v| !(0.0..=1.0).contains(v)) {
            errors.push(ConfigError::new(
                "generator.hourly_baseline",
                "values must be in [0.0, 1.0]",
            ));
        }

        if self.output.dir.as_os_str().is_empty() {
            errors.push(ConfigError::new("output.dir", "must not be empty"));
        }

        errors
    }
}
