//! Engine tunables.
//!
//! [`EngineSettings`] collects every constant of the conditioning chain in
//! one `Copy` struct. The defaults are the reference values; hosts and the
//! config layer override them before building a processor.

use core::fmt;
use core::str::FromStr;

/// How the mid and side paths share conditioning state in mid+side mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateCoupling {
    /// Mid and side each own a conditioner (DC blocker, crossfade, analysis).
    #[default]
    Independent,
    /// One conditioner serves both paths, interleaving mid and side samples
    /// through the same filter memory.
    Shared,
}

/// How clipped mid/side signals are turned back into left/right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recombination {
    /// `L = m + s`, `R = m - s`
    #[default]
    Direct,
    /// `L = ap(m + s)`, `R = ap(m - s)` through the fixed all-pass pair.
    PhaseAligned,
}

/// Error returned when a setting name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSettingError {
    expected: &'static str,
}

impl fmt::Display for ParseSettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected one of: {}", self.expected)
    }
}

impl StateCoupling {
    /// Lowercase name used in config files.
    pub fn name(self) -> &'static str {
        match self {
            StateCoupling::Independent => "independent",
            StateCoupling::Shared => "shared",
        }
    }
}

impl FromStr for StateCoupling {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [StateCoupling::Independent, StateCoupling::Shared]
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or(ParseSettingError {
                expected: "independent, shared",
            })
    }
}

impl Recombination {
    /// Lowercase name used in config files.
    pub fn name(self) -> &'static str {
        match self {
            Recombination::Direct => "direct",
            Recombination::PhaseAligned => "phase_aligned",
        }
    }
}

impl FromStr for Recombination {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [Recombination::Direct, Recombination::PhaseAligned]
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s))
            .ok_or(ParseSettingError {
                expected: "direct, phase_aligned",
            })
    }
}

/// Tunable constants of the conditioning chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    /// DC blocker cutoff in Hz.
    pub dc_cutoff_hz: f32,
    /// Curve crossfade increment per sample.
    pub transition_speed: f32,
    /// DC-free inputs with magnitude below this are output as exact zero.
    pub silence_threshold: f32,
    /// Low-frequency analysis window in seconds.
    pub energy_window_seconds: f32,
    /// Analysis low-pass cutoff in Hz.
    pub low_frequency_cutoff_hz: f32,
    /// Energy above which gain reduction starts.
    pub energy_threshold: f32,
    /// Deepest gain reduction (0.5 = -6 dB).
    pub max_gain_reduction: f32,
    /// Release coefficient of the dynamic gain.
    pub gain_recovery_rate: f32,
    /// Multiply the clipped output by the dynamic gain.
    pub apply_dynamic_gain: bool,
    /// All-pass center frequency for phase-aligned recombination.
    pub phase_allpass_hz: f32,
    /// Sample rate the all-pass coefficients are computed for.
    pub phase_allpass_sample_rate: f32,
    /// Mid/side state sharing.
    pub state_coupling: StateCoupling,
    /// Mid/side recombination strategy.
    pub recombination: Recombination,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            dc_cutoff_hz: 40.0,
            transition_speed: 0.05,
            silence_threshold: 1e-8,
            energy_window_seconds: 0.05,
            low_frequency_cutoff_hz: 40.0,
            energy_threshold: 0.1,
            max_gain_reduction: 0.5,
            gain_recovery_rate: 0.05,
            apply_dynamic_gain: false,
            phase_allpass_hz: 1000.0,
            phase_allpass_sample_rate: 44100.0,
            state_coupling: StateCoupling::Independent,
            recombination: Recombination::Direct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = EngineSettings::default();
        assert_eq!(s.dc_cutoff_hz, 40.0);
        assert_eq!(s.transition_speed, 0.05);
        assert!(!s.apply_dynamic_gain);
        assert_eq!(s.state_coupling, StateCoupling::Independent);
        assert_eq!(s.recombination, Recombination::Direct);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Shared".parse::<StateCoupling>(), Ok(StateCoupling::Shared));
        assert_eq!(
            "phase_aligned".parse::<Recombination>(),
            Ok(Recombination::PhaseAligned)
        );
        assert!("both".parse::<StateCoupling>().is_err());

        for c in [StateCoupling::Independent, StateCoupling::Shared] {
            assert_eq!(c.name().parse::<StateCoupling>(), Ok(c));
        }
    }
}
