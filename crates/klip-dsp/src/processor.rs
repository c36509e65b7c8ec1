//! Block-level entry point for hosts.
//!
//! [`KlipProcessor`] is what a host adapter drives: `prepare` at stream
//! start and on rate changes, then one `process_block_with` call per audio
//! block with that block's [`ControlValues`]. The controls are applied once,
//! before the first frame, and hold for the whole block.

use crate::control::{ControlValues, SharedControls, slider_to_threshold};
use crate::settings::EngineSettings;
use crate::stereo::StereoFieldProcessor;
use klip_core::StereoProcessor;

/// Stereo clipping engine with per-block control application.
///
/// ## Example
///
/// ```rust
/// use klip_dsp::{ControlValues, KlipProcessor};
///
/// let mut klip = KlipProcessor::new(48000.0);
///
/// let mut left = vec![0.0f32; 256];
/// let mut right = vec![0.0f32; 256];
/// // threshold slider 0.75 (-6 dB), hard clip, mid+side
/// let controls = ControlValues::from_raw(0.75, 1, 2);
/// klip.process_block_with(&mut left, &mut right, controls);
/// ```
#[derive(Debug, Clone)]
pub struct KlipProcessor {
    field: StereoFieldProcessor,
    controls: ControlValues,
    sample_rate: f32,
}

impl KlipProcessor {
    /// Create a processor with default settings and controls.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_settings(sample_rate, EngineSettings::default())
    }

    /// Create a processor with explicit settings.
    pub fn with_settings(sample_rate: f32, settings: EngineSettings) -> Self {
        let controls = ControlValues::default();
        let mut field = StereoFieldProcessor::with_settings(sample_rate, settings);
        field.set_threshold(slider_to_threshold(controls.threshold));

        Self {
            field,
            controls,
            sample_rate,
        }
    }

    /// Configure every filter and the analysis window for `sample_rate`.
    ///
    /// May allocate; call outside the audio callback.
    pub fn prepare(&mut self, sample_rate: f32) {
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, "klip prepare");

        self.sample_rate = sample_rate;
        self.field.set_sample_rate(sample_rate);
    }

    /// Apply a control snapshot.
    ///
    /// The linear threshold is recomputed only when the slider value changes.
    pub fn apply_controls(&mut self, controls: ControlValues) {
        if controls.threshold.to_bits() != self.controls.threshold.to_bits() {
            let threshold = slider_to_threshold(controls.threshold);
            #[cfg(feature = "tracing")]
            tracing::debug!(slider = controls.threshold, threshold, "threshold changed");
            self.field.set_threshold(threshold);
        }

        #[cfg(feature = "tracing")]
        {
            if controls.curve != self.controls.curve {
                tracing::debug!(from = %self.controls.curve, to = %controls.curve, "curve changed");
            }
            if controls.mode != self.controls.mode {
                tracing::debug!(from = ?self.controls.mode, to = ?controls.mode, "mode changed");
            }
        }

        self.controls = controls;
    }

    /// Apply `controls`, then process one planar block in place.
    ///
    /// A `None` mode leaves the block untouched.
    pub fn process_block_with(
        &mut self,
        left: &mut [f32],
        right: &mut [f32],
        controls: ControlValues,
    ) {
        self.apply_controls(controls);
        self.process_block(left, right);
    }

    /// Apply `controls`, then process one interleaved block in place.
    pub fn process_interleaved_with(&mut self, buffer: &mut [f32], controls: ControlValues) {
        self.apply_controls(controls);
        self.process_interleaved(buffer);
    }

    /// Snapshot `shared` once, then process one planar block in place.
    pub fn process_block_shared(
        &mut self,
        left: &mut [f32],
        right: &mut [f32],
        shared: &SharedControls,
    ) {
        self.process_block_with(left, right, shared.snapshot());
    }

    /// The controls applied to the most recent block.
    pub fn controls(&self) -> ControlValues {
        self.controls
    }

    /// Linear clip threshold currently in effect.
    pub fn threshold(&self) -> f32 {
        self.field.threshold()
    }

    /// Current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// The underlying stereo field processor.
    pub fn field(&self) -> &StereoFieldProcessor {
        &self.field
    }
}

impl StereoProcessor for KlipProcessor {
    /// Process with the most recently applied controls.
    fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        if let Some(mode) = self.controls.mode {
            self.field.process_planar(left, right, mode, self.controls.curve);
        }
    }

    fn process_interleaved(&mut self, buffer: &mut [f32]) {
        if let Some(mode) = self.controls.mode {
            self.field.process_interleaved(buffer, mode, self.controls.curve);
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.prepare(sample_rate);
    }

    fn reset(&mut self) {
        self.field.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ClipCurve;
    use crate::stereo::MidSideMode;

    #[test]
    fn test_default_threshold_is_unity() {
        let klip = KlipProcessor::new(48000.0);
        assert!((klip.threshold() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_conversion() {
        let mut klip = KlipProcessor::new(48000.0);
        klip.apply_controls(ControlValues::from_raw(0.75, 0, 2));
        assert!((klip.threshold() - 0.501_187).abs() < 1e-4);

        klip.apply_controls(ControlValues::from_raw(0.0, 0, 2));
        assert!((klip.threshold() - 0.063_096).abs() < 1e-4);
    }

    #[test]
    fn test_passthrough_mode_leaves_block_untouched() {
        let mut klip = KlipProcessor::new(48000.0);
        let mut left = [0.9f32, -0.7, 0.3, 1.5];
        let mut right = [0.1f32, 0.8, -1.2, 0.0];
        let (orig_l, orig_r) = (left, right);

        klip.process_block_with(&mut left, &mut right, ControlValues::from_raw(0.1, 1, 3));
        assert_eq!(left, orig_l);
        assert_eq!(right, orig_r);

        let mut interleaved = [0.9f32, 0.1, -0.7, 0.8];
        let orig = interleaved;
        klip.process_interleaved_with(&mut interleaved, ControlValues::from_raw(0.1, 1, -1));
        assert_eq!(interleaved, orig);
    }

    #[test]
    fn test_controls_held_for_block() {
        let mut klip = KlipProcessor::new(48000.0);
        let shared = SharedControls::default();
        shared.store_curve_index(1);
        shared.store_mode_index(0);

        let mut left = [0.5f32; 8];
        let mut right = [0.5f32; 8];
        klip.process_block_shared(&mut left, &mut right, &shared);

        assert_eq!(klip.controls().curve, ClipCurve::HardClip);
        assert_eq!(klip.controls().mode, Some(MidSideMode::Mid));
        assert_eq!(left, right);
    }

    #[test]
    fn test_prepare_updates_rate() {
        let mut klip = KlipProcessor::new(44100.0);
        klip.set_sample_rate(96000.0);
        assert_eq!(klip.sample_rate(), 96000.0);
        assert_eq!(klip.field().mid_conditioner().sample_rate(), 96000.0);
    }
}
