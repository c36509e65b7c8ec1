//! Mid/side stereo field processing.
//!
//! Three block modes route a stereo frame through the conditioning chain:
//!
//! | Mode | Clipped signal | Written back |
//! |------|----------------|--------------|
//! | [`MidSideMode::Mid`] | `m = (L+R)/2` | `L = R = clip(m)` |
//! | [`MidSideMode::Side`] | `s = (L-R)/2` | `L = clip(s)`, `R = -clip(s)` |
//! | [`MidSideMode::MidSide`] | both, mid first | `L = m' + s'`, `R = m' - s'` |
//!
//! Mid-only collapses the image to mono; side-only keeps just the stereo
//! difference in antiphase.
//!
//! ## State coupling
//!
//! With [`StateCoupling::Independent`] the mid and side paths each own a
//! [`SignalConditioner`]. With [`StateCoupling::Shared`] a single conditioner
//! serves both, so its DC blocker and crossfade see mid and side samples
//! interleaved.
//!
//! ## Phase-aligned recombination
//!
//! [`StereoFieldProcessor::combine_with_phase_control`] sends `m + s` and
//! `m - s` through a pair of 1 kHz all-pass filters. The coefficients are
//! computed once for a nominal 44.1 kHz regardless of the running rate.
//! The three modes only use it when [`Recombination::PhaseAligned`] is set.

use core::fmt;
use core::str::FromStr;

use crate::conditioner::SignalConditioner;
use crate::curve::ClipCurve;
use crate::settings::{EngineSettings, Recombination, StateCoupling};
use klip_core::{BUTTERWORTH_Q, Biquad, allpass_coefficients, mid_side_decode, mid_side_encode};

/// One stereo sample pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleFrame {
    /// Left channel
    pub left: f32,
    /// Right channel
    pub right: f32,
}

impl SampleFrame {
    /// Create a frame.
    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }
}

impl From<(f32, f32)> for SampleFrame {
    fn from((left, right): (f32, f32)) -> Self {
        Self { left, right }
    }
}

impl From<SampleFrame> for (f32, f32) {
    fn from(frame: SampleFrame) -> Self {
        (frame.left, frame.right)
    }
}

/// Stereo field mode, selected once per block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MidSideMode {
    /// Clip the mid signal and write it to both channels
    Mid,
    /// Clip the side signal, write it to left and its negation to right
    Side,
    /// Clip mid and side separately and recombine
    MidSide,
}

impl MidSideMode {
    /// All modes in host index order.
    pub const ALL: [MidSideMode; 3] = [MidSideMode::Mid, MidSideMode::Side, MidSideMode::MidSide];

    /// Map a host selector index (0, 1, 2) to a mode.
    ///
    /// Any other index yields `None`, which callers treat as passthrough.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(MidSideMode::Mid),
            1 => Some(MidSideMode::Side),
            2 => Some(MidSideMode::MidSide),
            _ => None,
        }
    }

    /// Host selector index of this mode.
    pub fn index(self) -> i32 {
        match self {
            MidSideMode::Mid => 0,
            MidSideMode::Side => 1,
            MidSideMode::MidSide => 2,
        }
    }

    /// Lowercase name used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            MidSideMode::Mid => "mid",
            MidSideMode::Side => "side",
            MidSideMode::MidSide => "mid_side",
        }
    }
}

impl fmt::Display for MidSideMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError;

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of: mid, side, mid_side")
    }
}

impl FromStr for MidSideMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MidSideMode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or(ParseModeError)
    }
}

/// Mid/side router around one or two [`SignalConditioner`]s.
///
/// ## Example
///
/// ```rust
/// use klip_dsp::{ClipCurve, MidSideMode, StereoFieldProcessor};
///
/// let mut field = StereoFieldProcessor::new(48000.0);
/// field.set_threshold(0.5);
///
/// let mut left = [0.2, -0.4, 0.9];
/// let mut right = [0.1, 0.3, -0.9];
/// field.process_planar(&mut left, &mut right, MidSideMode::Mid, ClipCurve::HardClip);
///
/// // Mid mode collapses to mono
/// assert_eq!(left, right);
/// ```
#[derive(Debug, Clone)]
pub struct StereoFieldProcessor {
    mid: SignalConditioner,
    side: SignalConditioner,
    allpass_left: Biquad,
    allpass_right: Biquad,
    coupling: StateCoupling,
    recombination: Recombination,
}

impl StereoFieldProcessor {
    /// Create a processor with default settings.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_settings(sample_rate, EngineSettings::default())
    }

    /// Create a processor with explicit settings.
    pub fn with_settings(sample_rate: f32, settings: EngineSettings) -> Self {
        let coeffs = allpass_coefficients(
            settings.phase_allpass_hz,
            BUTTERWORTH_Q,
            settings.phase_allpass_sample_rate,
        );

        Self {
            mid: SignalConditioner::with_settings(sample_rate, settings),
            side: SignalConditioner::with_settings(sample_rate, settings),
            allpass_left: Biquad::from_coefficients(coeffs),
            allpass_right: Biquad::from_coefficients(coeffs),
            coupling: settings.state_coupling,
            recombination: settings.recombination,
        }
    }

    /// Conditioner used for the side signal.
    #[inline]
    fn side_path(&mut self) -> &mut SignalConditioner {
        match self.coupling {
            StateCoupling::Independent => &mut self.side,
            StateCoupling::Shared => &mut self.mid,
        }
    }

    /// Process one frame in `mode`.
    #[inline]
    pub fn process_frame(
        &mut self,
        left: f32,
        right: f32,
        mode: MidSideMode,
        curve: ClipCurve,
    ) -> (f32, f32) {
        let (mid, side) = mid_side_encode(left, right);

        match mode {
            MidSideMode::Mid => {
                let clipped = self.mid.process_sample(mid, curve);
                (clipped, clipped)
            }
            MidSideMode::Side => {
                let clipped = self.side_path().process_sample(side, curve);
                (clipped, -clipped)
            }
            MidSideMode::MidSide => {
                let mid_clipped = self.mid.process_sample(mid, curve);
                let side_clipped = self.side_path().process_sample(side, curve);
                match self.recombination {
                    Recombination::Direct => mid_side_decode(mid_clipped, side_clipped),
                    Recombination::PhaseAligned => {
                        self.combine_with_phase_control(mid_clipped, side_clipped)
                    }
                }
            }
        }
    }

    /// Process planar channel slices in place, frame by frame in order.
    ///
    /// Only the first `min(left.len(), right.len())` frames are touched.
    pub fn process_planar(
        &mut self,
        left: &mut [f32],
        right: &mut [f32],
        mode: MidSideMode,
        curve: ClipCurve,
    ) {
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            (*l, *r) = self.process_frame(*l, *r, mode, curve);
        }
    }

    /// Process an interleaved `L R L R ...` buffer in place.
    ///
    /// A trailing odd sample is left untouched.
    pub fn process_interleaved(
        &mut self,
        buffer: &mut [f32],
        mode: MidSideMode,
        curve: ClipCurve,
    ) {
        for frame in buffer.chunks_exact_mut(2) {
            (frame[0], frame[1]) = self.process_frame(frame[0], frame[1], mode, curve);
        }
    }

    /// Process a slice of [`SampleFrame`]s in place.
    pub fn process_frames(
        &mut self,
        frames: &mut [SampleFrame],
        mode: MidSideMode,
        curve: ClipCurve,
    ) {
        for frame in frames.iter_mut() {
            (frame.left, frame.right) = self.process_frame(frame.left, frame.right, mode, curve);
        }
    }

    /// Recombine mid/side through the all-pass pair.
    ///
    /// `L = ap_left(mid + side)`, `R = ap_right(mid - side)`. Each filter
    /// keeps its own memory across calls.
    #[inline]
    pub fn combine_with_phase_control(&mut self, mid: f32, side: f32) -> (f32, f32) {
        let (left, right) = mid_side_decode(mid, side);
        (self.allpass_left.process(left), self.allpass_right.process(right))
    }

    /// Set the clip threshold on every conditioner.
    pub fn set_threshold(&mut self, threshold: f32) {
        self.mid.set_threshold(threshold);
        self.side.set_threshold(threshold);
    }

    /// Current clip threshold.
    pub fn threshold(&self) -> f32 {
        self.mid.threshold()
    }

    /// Update the running sample rate.
    ///
    /// The all-pass coefficients stay at their nominal rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.mid.set_sample_rate(sample_rate);
        self.side.set_sample_rate(sample_rate);
    }

    /// Clear all filter memory.
    pub fn reset(&mut self) {
        self.mid.reset();
        self.side.reset();
        self.allpass_left.clear();
        self.allpass_right.clear();
    }

    /// Conditioner for the mid path (also the side path when shared).
    pub fn mid_conditioner(&self) -> &SignalConditioner {
        &self.mid
    }

    /// Conditioner for the side path.
    pub fn side_conditioner(&self) -> &SignalConditioner {
        match self.coupling {
            StateCoupling::Independent => &self.side,
            StateCoupling::Shared => &self.mid,
        }
    }

    /// Mid/side state sharing.
    pub fn coupling(&self) -> StateCoupling {
        self.coupling
    }

    /// Mid/side recombination strategy.
    pub fn recombination(&self) -> Recombination {
        self.recombination
    }
}
