//! Block-processing trait for stereo processors.
//!
//! [`StereoProcessor`] is the seam between a host adapter (plugin shell,
//! device callback) and the DSP. The host owns the buffers and the sample
//! rate; the processor mutates planar blocks in place.
//!
//! ## Design Decisions
//!
//! - **In-place planar blocks**: hosts hand out one slice per channel and
//!   expect the same slices back, so there is no separate output buffer.
//! - **Object-safe**: `dyn StereoProcessor` works for runtime selection.
//! - **No allocations**: every method may be called from a real-time thread.

/// Core trait for block-based stereo processors.
///
/// # Example
///
/// ```rust
/// use klip_core::StereoProcessor;
///
/// struct Swap;
///
/// impl StereoProcessor for Swap {
///     fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
///         for (l, r) in left.iter_mut().zip(right.iter_mut()) {
///             core::mem::swap(l, r);
///         }
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut l = [1.0, 2.0];
/// let mut r = [3.0, 4.0];
/// Swap.process_block(&mut l, &mut r);
/// assert_eq!(l, [3.0, 4.0]);
/// ```
pub trait StereoProcessor {
    /// Process one block of planar stereo audio in place.
    ///
    /// Both slices must have the same length; extra samples in the longer
    /// slice are left untouched.
    fn process_block(&mut self, left: &mut [f32], right: &mut [f32]);

    /// Process one block of interleaved stereo audio (`L R L R ...`) in place.
    ///
    /// The default implementation processes frame by frame through
    /// [`process_block`](Self::process_block). A trailing odd sample is
    /// left untouched.
    fn process_interleaved(&mut self, buffer: &mut [f32]) {
        for frame in buffer.chunks_exact_mut(2) {
            let mut l = [frame[0]];
            let mut r = [frame[1]];
            self.process_block(&mut l, &mut r);
            frame[0] = l[0];
            frame[1] = r[0];
        }
    }

    /// Update the sample rate.
    ///
    /// Called at stream start and whenever the host changes rate.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state (filter memories, crossfades).
    fn reset(&mut self);

    /// Report processing latency in samples. Default is zero.
    fn latency_samples(&self) -> usize {
        0
    }
}
