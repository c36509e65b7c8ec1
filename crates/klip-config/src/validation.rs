//! Range and name checks for configuration values.
//!
//! The DSP path never validates its inputs, so everything a config file can
//! set is checked here before it reaches an engine. Each check reports the
//! dotted key of the offending value (`engine.transition_speed`,
//! `controls.curve`, ...). [`validate_config`] collects every failure
//! instead of stopping at the first.

use thiserror::Error;

use crate::config::{ControlConfig, EngineConfig, KlipConfig};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Value must be strictly positive.
    #[error("'{param}' must be positive, got {value}")]
    NotPositive {
        /// Dotted key of the value.
        param: String,
        /// The rejected value.
        value: f32,
    },

    /// Value outside a closed or half-open range.
    #[error("'{param}' value {value} out of range {range}")]
    OutOfRange {
        /// Dotted key of the value.
        param: String,
        /// The rejected value.
        value: f32,
        /// Human-readable range, e.g. `(0, 1]`.
        range: &'static str,
    },

    /// Name not recognized for an enumerated setting.
    #[error("unknown value '{value}' for '{param}', {expected}")]
    UnknownName {
        /// Dotted key of the value.
        param: String,
        /// The rejected name.
        value: String,
        /// List of accepted names.
        expected: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Strictly positive and finite.
pub fn check_positive(param: &str, value: f32) -> ValidationResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotPositive {
            param: param.to_string(),
            value,
        })
    }
}

/// In `(0, 1]`.
pub fn check_unit_open(param: &str, value: f32) -> ValidationResult<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            range: "(0, 1]",
        })
    }
}

/// In `[0, 1]`.
pub fn check_unit_closed(param: &str, value: f32) -> ValidationResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            range: "[0, 1]",
        })
    }
}

/// In `[0, 1)`.
fn check_unit_half_open(param: &str, value: f32) -> ValidationResult<()> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            range: "[0, 1)",
        })
    }
}

/// Parse an enumerated setting by name, mapping the parse error into a
/// [`ValidationError::UnknownName`].
pub fn parse_name<T, E>(param: &str, value: &str) -> ValidationResult<T>
where
    T: std::str::FromStr<Err = E>,
    E: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ValidationError::UnknownName {
        param: param.to_string(),
        value: value.to_string(),
        expected: e.to_string(),
    })
}

/// Check every engine tunable, collecting all failures.
pub fn validate_engine(engine: &EngineConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut push = |result: ValidationResult<()>| {
        if let Err(e) = result {
            errors.push(e);
        }
    };

    push(check_positive("engine.sample_rate", engine.sample_rate as f32));
    push(check_positive("engine.dc_cutoff_hz", engine.dc_cutoff_hz));
    push(check_unit_open("engine.transition_speed", engine.transition_speed));
    push(check_unit_half_open("engine.silence_threshold", engine.silence_threshold));
    push(check_unit_open(
        "engine.energy_window_seconds",
        engine.energy_window_seconds,
    ));
    push(check_positive(
        "engine.low_frequency_cutoff_hz",
        engine.low_frequency_cutoff_hz,
    ));
    if engine.low_frequency_cutoff_hz >= engine.sample_rate as f32 / 2.0 {
        push(Err(ValidationError::OutOfRange {
            param: "engine.low_frequency_cutoff_hz".to_string(),
            value: engine.low_frequency_cutoff_hz,
            range: "below Nyquist of sample_rate",
        }));
    }
    push(check_positive("engine.energy_threshold", engine.energy_threshold));
    push(check_unit_closed("engine.max_gain_reduction", engine.max_gain_reduction));
    push(check_unit_open("engine.gain_recovery_rate", engine.gain_recovery_rate));
    push(check_positive(
        "engine.phase_allpass_sample_rate",
        engine.phase_allpass_sample_rate,
    ));
    push(check_positive("engine.phase_allpass_hz", engine.phase_allpass_hz));
    if engine.phase_allpass_hz >= engine.phase_allpass_sample_rate / 2.0 {
        push(Err(ValidationError::OutOfRange {
            param: "engine.phase_allpass_hz".to_string(),
            value: engine.phase_allpass_hz,
            range: "below Nyquist of phase_allpass_sample_rate",
        }));
    }
    push(
        parse_name::<klip_dsp::StateCoupling, _>("engine.state_coupling", &engine.state_coupling)
            .map(|_| ()),
    );
    push(
        parse_name::<klip_dsp::Recombination, _>("engine.recombination", &engine.recombination)
            .map(|_| ()),
    );

    errors
}

/// Check the control values, collecting all failures.
pub fn validate_controls(controls: &ControlConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Err(e) = check_unit_open("controls.threshold", controls.threshold) {
        errors.push(e);
    }
    if let Err(e) = parse_name::<klip_dsp::ClipCurve, _>("controls.curve", &controls.curve) {
        errors.push(e);
    }
    if let Err(e) = crate::config::parse_mode(&controls.mode) {
        errors.push(e);
    }
    errors
}

/// Validate a whole configuration.
///
/// Returns the single error directly, or [`ValidationError::Multiple`] when
/// more than one check fails.
pub fn validate_config(config: &KlipConfig) -> ValidationResult<()> {
    let mut errors = validate_engine(&config.engine);
    errors.extend(validate_controls(&config.controls));

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
