//! DC blocking filter for removing DC offset from audio signals.
//!
//! A first-order RC highpass in its discrete (backward-difference) form:
//!
//! ```text
//! y[n] = alpha * (y[n-1] + x[n] - x[n-1])
//! alpha = RC / (RC + 1/fs),  RC = 1 / (2 * pi * fc)
//! ```
//!
//! The default cutoff is 40 Hz: high enough to settle quickly after an offset
//! step, low enough to leave program material intact.

use core::f32::consts::PI;

/// DC blocking filter using a first-order RC highpass.
///
/// The filter state is never cleared by processing; it persists until
/// [`reset`](Self::reset) is called explicitly.
///
/// ## Example
///
/// ```rust
/// use klip_core::DcBlocker;
///
/// let mut blocker = DcBlocker::new(48000.0);
///
/// // A constant offset decays towards zero
/// let mut out = 0.0;
/// for _ in 0..48000 {
///     out = blocker.process(0.5);
/// }
/// assert!(out.abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct DcBlocker {
    /// RC smoothing factor in (0, 1)
    alpha: f32,
    /// Cutoff frequency in Hz
    cutoff_hz: f32,
    /// Previous input sample x[n-1]
    x_prev: f32,
    /// Previous output sample y[n-1]
    y_prev: f32,
}

impl DcBlocker {
    /// Default cutoff frequency in Hz.
    pub const DEFAULT_CUTOFF_HZ: f32 = 40.0;

    /// Create a new DC blocker for the given sample rate with a 40 Hz cutoff.
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz (must be > 0)
    pub fn new(sample_rate: f32) -> Self {
        Self::with_cutoff(sample_rate, Self::DEFAULT_CUTOFF_HZ)
    }

    /// Create a new DC blocker with a specific cutoff frequency.
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz (must be > 0)
    /// * `cutoff_hz` - -3 dB point of the highpass in Hz (must be > 0)
    pub fn with_cutoff(sample_rate: f32, cutoff_hz: f32) -> Self {
        Self {
            alpha: Self::calculate_alpha(cutoff_hz, sample_rate),
            cutoff_hz,
            x_prev: 0.0,
            y_prev: 0.0,
        }
    }

    /// Process a single sample through the DC blocker.
    ///
    /// Implements: y[n] = alpha * (y[n-1] + x[n] - x[n-1])
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.alpha * (self.y_prev + input - self.x_prev);
        self.x_prev = input;
        self.y_prev = output;
        output
    }

    /// Reset the filter state to zero.
    pub fn reset(&mut self) {
        self.x_prev = 0.0;
        self.y_prev = 0.0;
    }

    /// Update the sample rate, recalculating alpha for the same cutoff.
    ///
    /// Filter memory is left untouched.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.alpha = Self::calculate_alpha(self.cutoff_hz, sample_rate);
    }

    /// Get the current alpha coefficient.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Get the cutoff frequency in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// Formula: alpha = RC / (RC + 1/fs), RC = 1 / (2*pi*fc)
    fn calculate_alpha(cutoff_hz: f32, sample_rate: f32) -> f32 {
        let rc = 1.0 / (cutoff_hz * 2.0 * PI);
        rc / (rc + 1.0 / sample_rate)
    }
}
