//! Configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use klip_dsp::{
    ClipCurve, ControlValues, EngineSettings, MidSideMode, Recombination, StateCoupling,
};

use crate::error::ConfigError;
use crate::validation::{ValidationError, ValidationResult, parse_name, validate_config};

/// Mode name that leaves blocks untouched.
pub const PASSTHROUGH_MODE: &str = "passthrough";

/// Parse a mode name. [`PASSTHROUGH_MODE`] maps to `None`.
pub fn parse_mode(name: &str) -> ValidationResult<Option<MidSideMode>> {
    if name.trim().eq_ignore_ascii_case(PASSTHROUGH_MODE) {
        return Ok(None);
    }
    parse_name::<MidSideMode, _>("controls.mode", name)
        .map(Some)
        .map_err(|e| match e {
            ValidationError::UnknownName { param, value, .. } => ValidationError::UnknownName {
                param,
                value,
                expected: "expected one of: mid, side, mid_side, passthrough".to_string(),
            },
            other => other,
        })
}

/// Engine tunables as stored on disk.
///
/// Every field has a default, so a config file only needs the keys it
/// changes. Enumerated settings are stored by name and checked by
/// [`validate`](KlipConfig::validate).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Sample rate hint for offline tools (the host rate wins at runtime).
    pub sample_rate: u32,
    /// DC blocker cutoff in Hz.
    pub dc_cutoff_hz: f32,
    /// Curve crossfade increment per sample.
    pub transition_speed: f32,
    /// Silence gate level after DC removal.
    pub silence_threshold: f32,
    /// Low-frequency analysis window in seconds.
    pub energy_window_seconds: f32,
    /// Analysis low-pass cutoff in Hz.
    pub low_frequency_cutoff_hz: f32,
    /// Energy above which gain reduction starts.
    pub energy_threshold: f32,
    /// Deepest gain reduction, 0 to 1.
    pub max_gain_reduction: f32,
    /// Release coefficient of the dynamic gain.
    pub gain_recovery_rate: f32,
    /// Apply the low-frequency dynamic gain to the output.
    pub apply_dynamic_gain: bool,
    /// All-pass center frequency for phase-aligned recombination.
    pub phase_allpass_hz: f32,
    /// Nominal rate the all-pass coefficients are computed for.
    pub phase_allpass_sample_rate: f32,
    /// `independent` or `shared`.
    pub state_coupling: String,
    /// `direct` or `phase_aligned`.
    pub recombination: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default())
    }
}

impl EngineConfig {
    /// Snapshot engine settings into their on-disk form.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self {
            sample_rate: 48000,
            dc_cutoff_hz: settings.dc_cutoff_hz,
            transition_speed: settings.transition_speed,
            silence_threshold: settings.silence_threshold,
            energy_window_seconds: settings.energy_window_seconds,
            low_frequency_cutoff_hz: settings.low_frequency_cutoff_hz,
            energy_threshold: settings.energy_threshold,
            max_gain_reduction: settings.max_gain_reduction,
            gain_recovery_rate: settings.gain_recovery_rate,
            apply_dynamic_gain: settings.apply_dynamic_gain,
            phase_allpass_hz: settings.phase_allpass_hz,
            phase_allpass_sample_rate: settings.phase_allpass_sample_rate,
            state_coupling: settings.state_coupling.name().to_string(),
            recombination: settings.recombination.name().to_string(),
        }
    }

    /// Build engine settings, parsing the enumerated fields.
    ///
    /// Numeric ranges are not checked here; see [`KlipConfig::validate`].
    pub fn to_settings(&self) -> Result<EngineSettings, ConfigError> {
        let state_coupling: StateCoupling =
            parse_name("engine.state_coupling", &self.state_coupling)?;
        let recombination: Recombination =
            parse_name("engine.recombination", &self.recombination)?;

        Ok(EngineSettings {
            dc_cutoff_hz: self.dc_cutoff_hz,
            transition_speed: self.transition_speed,
            silence_threshold: self.silence_threshold,
            energy_window_seconds: self.energy_window_seconds,
            low_frequency_cutoff_hz: self.low_frequency_cutoff_hz,
            energy_threshold: self.energy_threshold,
            max_gain_reduction: self.max_gain_reduction,
            gain_recovery_rate: self.gain_recovery_rate,
            apply_dynamic_gain: self.apply_dynamic_gain,
            phase_allpass_hz: self.phase_allpass_hz,
            phase_allpass_sample_rate: self.phase_allpass_sample_rate,
            state_coupling,
            recombination,
        })
    }
}

/// Control values as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlConfig {
    /// Threshold slider position in (0, 1].
    pub threshold: f32,
    /// Clip curve name (`soft`, `hard`, `linear`, `exponential`, `asymmetric`).
    pub curve: String,
    /// Stereo mode name (`mid`, `side`, `mid_side`, `passthrough`).
    pub mode: String,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self::from_values(&ControlValues::default())
    }
}

impl ControlConfig {
    /// Snapshot control values into their on-disk form.
    pub fn from_values(values: &ControlValues) -> Self {
        Self {
            threshold: values.threshold,
            curve: values.curve.name().to_string(),
            mode: values
                .mode
                .map_or(PASSTHROUGH_MODE, MidSideMode::name)
                .to_string(),
        }
    }

    /// Build control values, parsing curve and mode names.
    pub fn to_values(&self) -> Result<ControlValues, ConfigError> {
        let curve: ClipCurve = parse_name("controls.curve", &self.curve)?;
        let mode = parse_mode(&self.mode)?;
        Ok(ControlValues {
            threshold: self.threshold,
            curve,
            mode,
        })
    }
}

/// A complete klip configuration: engine tunables plus control values.
///
/// # TOML Format
///
/// ```toml
/// name = "Gentle"
/// description = "Soft clip just below full scale"
///
/// [engine]
/// sample_rate = 48000
/// transition_speed = 0.05
/// state_coupling = "independent"
/// recombination = "direct"
///
/// [controls]
/// threshold = 0.9
/// curve = "soft"
/// mode = "mid_side"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KlipConfig {
    /// Display name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Engine tunables.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Control values.
    #[serde(default)]
    pub controls: ControlConfig,
}

fn default_name() -> String {
    "Untitled".to_string()
}

impl KlipConfig {
    /// Create a configuration with default engine and controls.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            engine: EngineConfig::default(),
            controls: ControlConfig::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the control values.
    pub fn with_controls(mut self, values: &ControlValues) -> Self {
        self.controls = ControlConfig::from_values(values);
        self
    }

    /// Set the engine tunables.
    pub fn with_settings(mut self, settings: &EngineSettings) -> Self {
        let sample_rate = self.engine.sample_rate;
        self.engine = EngineConfig::from_settings(settings);
        self.engine.sample_rate = sample_rate;
        self
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value; see [`validate_config`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self)?;
        Ok(())
    }

    /// Engine settings for this configuration.
    pub fn to_settings(&self) -> Result<EngineSettings, ConfigError> {
        self.engine.to_settings()
    }

    /// Control values for this configuration.
    pub fn control_values(&self) -> Result<ControlValues, ConfigError> {
        self.controls.to_values()
    }
}

impl Default for KlipConfig {
    fn default() -> Self {
        Self::new(default_name())
    }
}
