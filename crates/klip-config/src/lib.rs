//! Configuration and preset management for klip.
//!
//! A [`KlipConfig`] carries the engine tunables ([`EngineConfig`]) and one
//! set of control values ([`ControlConfig`]) as TOML. Files are checked with
//! [`KlipConfig::validate`] before anything reaches the DSP, since the audio
//! path does no validation of its own.
//!
//! # Example
//!
//! ```rust,no_run
//! use klip_config::{KlipConfig, default_config_path};
//! use klip_dsp::KlipProcessor;
//!
//! let config = KlipConfig::load(default_config_path()).unwrap();
//! config.validate().unwrap();
//!
//! let mut klip = KlipProcessor::with_settings(48000.0, config.to_settings().unwrap());
//! klip.apply_controls(config.control_values().unwrap());
//! ```

mod config;
mod error;

/// Platform-specific paths for configuration and presets.
pub mod paths;

/// Range and name checks.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use config::{ControlConfig, EngineConfig, KlipConfig, PASSTHROUGH_MODE, parse_mode};
pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use paths::{
    default_config_path, ensure_user_config_dir, find_preset, list_user_presets,
    preset_name_from_path, user_config_dir, user_presets_dir,
};
pub use validation::{
    ValidationError, ValidationResult, validate_config, validate_controls, validate_engine,
};
