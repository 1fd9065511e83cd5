//! Configuration system with YAML schema and validation.
//!
//! Mistakes are caught in three layers: serde rejects unknown fields,
//! `validator` enforces per-field ranges, and `validate_semantic`
//! checks cross-field constraints that a schema cannot express.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{DemoError, DemoResult};
use crate::scenarios::{
    BeatsConfig, MaxwellConfig, RingsConfig, SpringConfig, StandingWaveConfig, WienConfig,
};

/// Top-level demonstration suite configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DemoConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Suite metadata.
    #[serde(default)]
    pub suite: SuiteMeta,

    /// Maxwell speed-distribution demonstration.
    #[validate(nested)]
    #[serde(default)]
    pub maxwell: MaxwellConfig,

    /// Spring-mass oscillator demonstration.
    #[validate(nested)]
    #[serde(default)]
    pub spring: SpringConfig,

    /// Wien displacement-law demonstration.
    #[validate(nested)]
    #[serde(default)]
    pub wien: WienConfig,

    /// Beat-frequency demonstration.
    #[validate(nested)]
    #[serde(default)]
    pub beats: BeatsConfig,

    /// Newton's-rings demonstration.
    #[validate(nested)]
    #[serde(default)]
    pub rings: RingsConfig,

    /// Standing-wave demonstration.
    #[validate(nested)]
    #[serde(default)]
    pub standing_wave: StandingWaveConfig,

    /// Plot export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl DemoConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> DemoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> DemoResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        config.validate()?;
        config.validate_semantic()?;

        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> DemoConfigBuilder {
        DemoConfigBuilder::default()
    }

    /// Validate cross-field constraints beyond schema.
    fn validate_semantic(&self) -> DemoResult<()> {
        if self.maxwell.resolutions.is_empty() {
            return Err(DemoError::config(
                "Maxwell comparison needs at least one trapezoid resolution",
            ));
        }
        if self.maxwell.lower > self.maxwell.upper {
            return Err(DemoError::config(format!(
                "Maxwell speed bounds are inverted: lower {} > upper {}",
                self.maxwell.lower, self.maxwell.upper
            )));
        }
        if self.beats.frequency_1 <= 0.0 || self.beats.frequency_2 <= 0.0 {
            return Err(DemoError::config("Beat tone frequencies must be positive"));
        }

        // The observation square must sit inside the lens footprint,
        // corners included.
        let corner = self.rings.extent * std::f64::consts::SQRT_2;
        if corner > self.rings.lens_radius {
            return Err(DemoError::config(format!(
                "Rings observation square (corner radius {corner:.3e} m) extends \
                 beyond the lens radius {} m",
                self.rings.lens_radius
            )));
        }

        Ok(())
    }

    /// Names of the demonstrations this configuration enables, in run
    /// order.
    #[must_use]
    pub fn enabled_topics(&self) -> Vec<&'static str> {
        let flags = [
            (self.beats.enabled, "waves/beat_frequency"),
            (self.maxwell.enabled, "statistical/maxwell_speed"),
            (self.rings.enabled, "optics/newtons_rings"),
            (self.spring.enabled, "mechanics/spring_mass"),
            (self.standing_wave.enabled, "waves/standing_wave"),
            (self.wien.enabled, "thermal/wien_displacement"),
        ];
        flags
            .into_iter()
            .filter_map(|(enabled, topic)| enabled.then_some(topic))
            .collect()
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            suite: SuiteMeta::default(),
            maxwell: MaxwellConfig::default(),
            spring: SpringConfig::default(),
            wien: WienConfig::default(),
            beats: BeatsConfig::default(),
            rings: RingsConfig::default(),
            standing_wave: StandingWaveConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct DemoConfigBuilder {
    maxwell: Option<MaxwellConfig>,
    spring: Option<SpringConfig>,
    wien: Option<WienConfig>,
    beats: Option<BeatsConfig>,
    rings: Option<RingsConfig>,
    standing_wave: Option<StandingWaveConfig>,
    export: Option<ExportConfig>,
}

impl DemoConfigBuilder {
    /// Set the Maxwell section.
    #[must_use]
    pub fn maxwell(mut self, config: MaxwellConfig) -> Self {
        self.maxwell = Some(config);
        self
    }

    /// Set the spring-mass section.
    #[must_use]
    pub fn spring(mut self, config: SpringConfig) -> Self {
        self.spring = Some(config);
        self
    }

    /// Set the Wien section.
    #[must_use]
    pub fn wien(mut self, config: WienConfig) -> Self {
        self.wien = Some(config);
        self
    }

    /// Set the beats section.
    #[must_use]
    pub fn beats(mut self, config: BeatsConfig) -> Self {
        self.beats = Some(config);
        self
    }

    /// Set the Newton's-rings section.
    #[must_use]
    pub fn rings(mut self, config: RingsConfig) -> Self {
        self.rings = Some(config);
        self
    }

    /// Set the standing-wave section.
    #[must_use]
    pub fn standing_wave(mut self, config: StandingWaveConfig) -> Self {
        self.standing_wave = Some(config);
        self
    }

    /// Set the export section.
    #[must_use]
    pub fn export(mut self, config: ExportConfig) -> Self {
        self.export = Some(config);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the assembled configuration fails schema or
    /// semantic validation.
    pub fn build(self) -> DemoResult<DemoConfig> {
        let mut config = DemoConfig::default();

        if let Some(maxwell) = self.maxwell {
            config.maxwell = maxwell;
        }
        if let Some(spring) = self.spring {
            config.spring = spring;
        }
        if let Some(wien) = self.wien {
            config.wien = wien;
        }
        if let Some(beats) = self.beats {
            config.beats = beats;
        }
        if let Some(rings) = self.rings {
            config.rings = rings;
        }
        if let Some(standing_wave) = self.standing_wave {
            config.standing_wave = standing_wave;
        }
        if let Some(export) = self.export {
            config.export = export;
        }

        config.validate()?;
        config.validate_semantic()?;

        Ok(config)
    }
}

/// Suite metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteMeta {
    /// Suite name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Plot export settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Whether exports are written during `run`.
    #[serde(default)]
    pub enabled: bool,
    /// Output directory for exported plot data.
    #[serde(default = "default_export_directory")]
    pub directory: String,
    /// Export file format.
    #[serde(default)]
    pub format: ExportFormat,
}

fn default_export_directory() -> String {
    "plots".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: default_export_directory(),
            format: ExportFormat::default(),
        }
    }
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Comma-separated values, one row per sample.
    #[default]
    Csv,
    /// One JSON document per line, one series per document.
    JsonLines,
}

impl ExportFormat {
    /// File extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::JsonLines => "jsonl",
        }
    }

    /// Parse a format name as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::InvalidArgument`] for unknown format names.
    pub fn parse(name: &str) -> DemoResult<Self> {
        match name {
            "csv" => Ok(Self::Csv),
            "json-lines" | "jsonl" => Ok(Self::JsonLines),
            other => Err(DemoError::invalid_argument(format!(
                "unknown export format '{other}'; expected 'csv' or 'json-lines'"
            ))),
        }
    }
}
