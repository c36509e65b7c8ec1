//! Per-sample signal conditioning chain.
//!
//! ```text
//! input → DcBlocker → silence gate → CurveTransition → [DynamicGain] → output
//! ```
//!
//! The dynamic-gain stage is off by default. When on, the low-frequency
//! monitor is fed the raw input sample, not the DC-free one. When off, the
//! monitor is never fed and [`SignalConditioner::dynamic_gain`] stays at 1.0.

use crate::curve::ClipCurve;
use crate::energy::{DynamicGain, LowFrequencyMonitor, window_capacity};
use crate::settings::EngineSettings;
use crate::transition::CurveTransition;
use klip_core::DcBlocker;

/// Threshold used until the host sets one.
pub const DEFAULT_THRESHOLD: f32 = 1.0;

/// DC removal, curve crossfading and optional low-frequency gain riding for
/// one mono signal path.
///
/// ## Curve changes
///
/// When the requested curve differs from the installed one, a crossfade is
/// started *and* the installed curve is replaced on the same sample. Both
/// crossfade endpoints then evaluate the new curve, so the output jumps to
/// the new curve on the first sample of the change rather than blending.
///
/// ## Example
///
/// ```rust
/// use klip_dsp::{ClipCurve, SignalConditioner};
///
/// let mut conditioner = SignalConditioner::new(48000.0);
/// conditioner.set_threshold(0.5);
///
/// let y = conditioner.process_sample(0.3, ClipCurve::HardClip);
/// assert!(y.abs() <= 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct SignalConditioner {
    dc_blocker: DcBlocker,
    transition: CurveTransition,
    monitor: LowFrequencyMonitor,
    dynamic_gain: DynamicGain,
    threshold: f32,
    sample_rate: f32,
    settings: EngineSettings,
}

impl SignalConditioner {
    /// Create a conditioner with default settings.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_settings(sample_rate, EngineSettings::default())
    }

    /// Create a conditioner with explicit settings.
    pub fn with_settings(sample_rate: f32, settings: EngineSettings) -> Self {
        Self {
            dc_blocker: DcBlocker::with_cutoff(sample_rate, settings.dc_cutoff_hz),
            transition: CurveTransition::default(),
            monitor: LowFrequencyMonitor::with_cutoff(
                sample_rate,
                window_capacity(sample_rate, settings.energy_window_seconds),
                settings.low_frequency_cutoff_hz,
            ),
            dynamic_gain: DynamicGain::with_params(
                settings.energy_threshold,
                settings.max_gain_reduction,
                settings.gain_recovery_rate,
            ),
            threshold: DEFAULT_THRESHOLD,
            sample_rate,
            settings,
        }
    }

    /// Condition one sample with the requested curve.
    #[inline]
    pub fn process_sample(&mut self, input: f32, curve: ClipCurve) -> f32 {
        let x = self.dc_blocker.process(input);

        if x.abs() < self.settings.silence_threshold {
            return 0.0;
        }

        if curve != self.transition.current() {
            self.transition.start(curve, self.settings.transition_speed);
            self.transition.set_current(curve);
        }

        self.transition.advance();
        let shaped = self.transition.mix(x, self.threshold);

        if self.settings.apply_dynamic_gain {
            // Energy is measured on the raw input, ahead of the DC blocker.
            let energy = self.monitor.analyze(input);
            shaped * self.dynamic_gain.update(energy)
        } else {
            shaped
        }
    }

    /// Set the clip threshold. Must be strictly positive.
    pub fn set_threshold(&mut self, threshold: f32) {
        debug_assert!(threshold > 0.0, "clip threshold must be positive");
        self.threshold = threshold;
    }

    /// Current clip threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Recompute the DC blocker coefficient and resize the analysis window.
    ///
    /// Filter memories are kept; the analysis ring is rewound. Allocates when
    /// the window grows.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.dc_blocker.set_sample_rate(sample_rate);
        self.monitor.configure(
            sample_rate,
            window_capacity(sample_rate, self.settings.energy_window_seconds),
        );
    }

    /// Current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Latest smoothed low-frequency gain in [0, 1].
    pub fn dynamic_gain(&self) -> f32 {
        self.dynamic_gain.gain()
    }

    /// The crossfade state.
    pub fn transition(&self) -> &CurveTransition {
        &self.transition
    }

    /// The settings this conditioner was built with.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Clear all filter memory and settle the crossfade on the installed curve.
    pub fn reset(&mut self) {
        self.dc_blocker.reset();
        let current = self.transition.current();
        self.transition.reset(current);
        self.monitor.reset();
        self.dynamic_gain.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed `n` zeros with `curve` requested.
    fn feed_silence(conditioner: &mut SignalConditioner, curve: ClipCurve, n: usize) -> f32 {
        let mut out = 0.0;
        for _ in 0..n {
            out = conditioner.process_sample(0.0, curve);
        }
        out
    }

    #[test]
    fn test_silence_gate() {
        let mut conditioner = SignalConditioner::new(48000.0);
        assert_eq!(conditioner.process_sample(0.0, ClipCurve::SoftClip), 0.0);
        assert_eq!(conditioner.process_sample(1e-9, ClipCurve::SoftClip), 0.0);
    }

    #[test]
    fn test_gate_does_not_register_curve_change() {
        let mut conditioner = SignalConditioner::new(48000.0);
        feed_silence(&mut conditioner, ClipCurve::HardClip, 4);
        assert_eq!(conditioner.transition().current(), ClipCurve::SoftClip);
    }

    #[test]
    fn test_first_sample_passes_dc_blocker_scaled() {
        let mut conditioner = SignalConditioner::new(48000.0);
        conditioner.set_threshold(1.0);
        let alpha = DcBlocker::new(48000.0).alpha();

        let y = conditioner.process_sample(0.4, ClipCurve::HardClip);
        assert!((y - 0.4 * alpha).abs() < 1e-7);
    }

    #[test]
    fn test_hard_clip_scenario() {
        let mut conditioner = SignalConditioner::new(48000.0);
        conditioner.set_threshold(0.5);

        // A step of 0.8 leaves the DC blocker at ~0.8 on the first sample
        let y = conditioner.process_sample(0.8, ClipCurve::HardClip);
        assert!((y - 0.5).abs() < 1e-6, "got {y}");
    }

    #[test]
    fn test_curve_change_snaps_immediately() {
        let mut conditioner = SignalConditioner::new(48000.0);
        conditioner.set_threshold(0.5);

        // Nyquist-rate input passes the DC blocker at ~0.9
        let mut x = 0.9;
        for _ in 0..64 {
            conditioner.process_sample(x, ClipCurve::SoftClip);
            x = -x;
        }

        let y = conditioner.process_sample(x, ClipCurve::HardClip);
        assert!(
            (y.abs() - 0.5).abs() < 1e-6,
            "first sample after switch should be fully hard-clipped, got {y}"
        );
        assert_eq!(conditioner.transition().current(), ClipCurve::HardClip);
        assert_eq!(conditioner.transition().target(), ClipCurve::HardClip);
        assert!(conditioner.transition().is_transitioning());
    }

    #[test]
    fn test_dynamic_gain_inert_by_default() {
        let mut conditioner = SignalConditioner::new(48000.0);
        for i in 0..4800 {
            let x = 0.9 * libm::sinf(2.0 * core::f32::consts::PI * 30.0 * i as f32 / 48000.0);
            conditioner.process_sample(x, ClipCurve::LinearClip);
        }
        assert_eq!(conditioner.dynamic_gain(), 1.0);
    }

    #[test]
    fn test_dynamic_gain_reduces_bass_when_enabled() {
        let settings = EngineSettings {
            apply_dynamic_gain: true,
            energy_window_seconds: 0.005,
            ..EngineSettings::default()
        };
        let mut conditioner = SignalConditioner::with_settings(8000.0, settings);
        conditioner.set_threshold(1.0);

        for i in 0..8000 {
            let x = 0.9 * libm::sinf(2.0 * core::f32::consts::PI * 30.0 * i as f32 / 8000.0);
            let y = conditioner.process_sample(x, ClipCurve::HardClip);
            assert!(y.is_finite());
        }
        assert!(conditioner.dynamic_gain() < 1.0, "got {}", conditioner.dynamic_gain());
        assert!(conditioner.dynamic_gain() >= 0.5);
    }

    #[test]
    fn test_dynamic_gain_measures_bass_below_dc_cutoff() {
        let settings = EngineSettings {
            apply_dynamic_gain: true,
            ..EngineSettings::default()
        };
        let mut conditioner = SignalConditioner::with_settings(48000.0, settings);
        conditioner.set_threshold(1.0);

        // 15 Hz sits below the 40 Hz DC blocker cutoff
        let mut min_gain = 1.0f32;
        for i in 0..48000 {
            let x = 0.2 * libm::sinf(2.0 * core::f32::consts::PI * 15.0 * i as f32 / 48000.0);
            conditioner.process_sample(x, ClipCurve::LinearClip);
            min_gain = min_gain.min(conditioner.dynamic_gain());
        }
        assert!(min_gain < 1.0, "15 Hz content should reduce gain, min was {min_gain}");
        assert!(min_gain >= 0.5);
    }

    #[test]
    fn test_reset_clears_filters_keeps_curve() {
        let mut conditioner = SignalConditioner::new(48000.0);
        conditioner.process_sample(0.7, ClipCurve::ExponentialClip);
        conditioner.reset();

        assert_eq!(conditioner.transition().current(), ClipCurve::ExponentialClip);
        assert_eq!(conditioner.transition().blend(), 0.0);
        let alpha = DcBlocker::new(48000.0).alpha();
        let y = conditioner.process_sample(0.3, ClipCurve::ExponentialClip);
        assert!((y - 0.3 * alpha).abs() < 1e-7);
    }
}
