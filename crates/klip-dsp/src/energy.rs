//! Low-frequency energy analysis and dynamic gain.
//!
//! [`LowFrequencyMonitor`] keeps the last ~50 ms of raw samples in a ring
//! buffer. Each energy query runs the *whole* ring through one persistent
//! 40 Hz low-pass in storage order (slot 0 first, not oldest first, once the
//! write index has wrapped) and returns the RMS of the filtered values. The recomputation is O(window) per call and the
//! filter memory carries over between calls; both are part of the measured
//! behavior, not an incremental estimate.
//!
//! [`DynamicGain`] turns that energy into a gain in [0.5, 1.0] with a fast
//! attack (reductions apply immediately) and an exponential release.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use klip_core::{BUTTERWORTH_Q, Biquad, lowpass_coefficients};
use libm::sqrtf;

/// Length of the analysis window in seconds.
pub const ENERGY_WINDOW_SECONDS: f32 = 0.05;

/// Cutoff of the analysis low-pass in Hz.
pub const LOW_FREQUENCY_CUTOFF_HZ: f32 = 40.0;

/// Ring capacity for `sample_rate` at the default 50 ms window (at least 1).
pub fn window_capacity(sample_rate: f32, window_seconds: f32) -> usize {
    ((sample_rate * window_seconds) as usize).max(1)
}

/// Ring buffer + low-pass RMS estimator of recent low-frequency energy.
///
/// ## Example
///
/// ```rust
/// use klip_dsp::LowFrequencyMonitor;
///
/// let mut monitor = LowFrequencyMonitor::new(48000.0);
/// assert_eq!(monitor.capacity(), 2400);
/// assert_eq!(monitor.analyze(0.0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct LowFrequencyMonitor {
    ring: Vec<f32>,
    /// Next slot to overwrite
    write_index: usize,
    lowpass: Biquad,
    cutoff_hz: f32,
}

impl LowFrequencyMonitor {
    /// Create a monitor with a 50 ms window and 40 Hz cutoff.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_cutoff(
            sample_rate,
            window_capacity(sample_rate, ENERGY_WINDOW_SECONDS),
            LOW_FREQUENCY_CUTOFF_HZ,
        )
    }

    /// Create a monitor with an explicit capacity and low-pass cutoff.
    pub fn with_cutoff(sample_rate: f32, capacity: usize, cutoff_hz: f32) -> Self {
        let mut monitor = Self {
            ring: Vec::new(),
            write_index: 0,
            lowpass: Biquad::new(),
            cutoff_hz,
        };
        monitor.configure(sample_rate, capacity);
        monitor
    }

    /// Reconfigure for a new sample rate and window size.
    ///
    /// Installs fresh low-pass coefficients (filter memory is kept), resizes
    /// the ring to `capacity` (zero-filling new slots) and rewinds the write
    /// index. Allocates; call from the host's prepare step, never per block.
    pub fn configure(&mut self, sample_rate: f32, capacity: usize) {
        let (b0, b1, b2, a0, a1, a2) = lowpass_coefficients(self.cutoff_hz, BUTTERWORTH_Q, sample_rate);
        self.lowpass.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.ring.resize(capacity.max(1), 0.0);
        self.write_index = 0;
    }

    /// Overwrite the oldest slot with `sample` and advance the index.
    #[inline]
    pub fn push_sample(&mut self, sample: f32) {
        self.ring[self.write_index] = sample;
        self.write_index = (self.write_index + 1) % self.ring.len();
    }

    /// Filter every buffered sample and return the RMS of the result.
    ///
    /// Advances the persistent low-pass by `capacity()` samples.
    pub fn compute_energy(&mut self) -> f32 {
        let mut squared_sum = 0.0f32;
        for &s in &self.ring {
            let filtered = self.lowpass.process(s);
            squared_sum += filtered * filtered;
        }
        sqrtf(squared_sum / self.ring.len() as f32)
    }

    /// Push `sample`, then compute the energy over the updated window.
    pub fn analyze(&mut self, sample: f32) -> f32 {
        self.push_sample(sample);
        self.compute_energy()
    }

    /// Number of samples in the analysis window.
    pub fn capacity(&self) -> usize {
        self.ring.len()
    }

    /// Zero the ring and the filter memory.
    pub fn reset(&mut self) {
        self.ring.iter_mut().for_each(|s| *s = 0.0);
        self.write_index = 0;
        self.lowpass.clear();
    }
}

/// Low-frequency energy level above which gain reduction starts.
pub const LOW_FREQUENCY_ENERGY_THRESHOLD: f32 = 0.1;
/// Deepest reduction applied (50%).
pub const MAX_GAIN_REDUCTION: f32 = 0.5;
/// Release coefficient per update.
pub const GAIN_RECOVERY_RATE: f32 = 0.05;

/// Gain smoother driven by low-frequency energy.
///
/// Owns its smoothed value; each instance starts at unity gain.
#[derive(Debug, Clone)]
pub struct DynamicGain {
    smoothed: f32,
    energy_threshold: f32,
    max_reduction: f32,
    recovery_rate: f32,
}

impl DynamicGain {
    /// Create a smoother with the default constants (0.1 / 50% / 0.05).
    pub fn new() -> Self {
        Self::with_params(
            LOW_FREQUENCY_ENERGY_THRESHOLD,
            MAX_GAIN_REDUCTION,
            GAIN_RECOVERY_RATE,
        )
    }

    /// Create a smoother with explicit constants.
    pub fn with_params(energy_threshold: f32, max_reduction: f32, recovery_rate: f32) -> Self {
        Self {
            smoothed: 1.0,
            energy_threshold,
            max_reduction,
            recovery_rate,
        }
    }

    /// Target gain for a given energy, before smoothing.
    #[inline]
    pub fn target_gain(&self, energy: f32) -> f32 {
        if energy > self.energy_threshold {
            let excess_ratio = (energy - self.energy_threshold) / self.energy_threshold;
            1.0 - excess_ratio.min(1.0) * self.max_reduction
        } else {
            1.0
        }
    }

    /// Feed one energy reading and return the smoothed gain, clamped to [0, 1].
    pub fn update(&mut self, energy: f32) -> f32 {
        let target = self.target_gain(energy);
        if target < self.smoothed {
            self.smoothed = target;
        } else {
            self.smoothed += self.recovery_rate * (target - self.smoothed);
        }
        self.gain()
    }

    /// Current smoothed gain, clamped to [0, 1].
    #[inline]
    pub fn gain(&self) -> f32 {
        self.smoothed.clamp(0.0, 1.0)
    }

    /// Return to unity gain.
    pub fn reset(&mut self) {
        self.smoothed = 1.0;
    }
}

impl Default for DynamicGain {
    fn default() -> Self {
        Self::new()
    }
}
