//! Crossfading between clip curves.
//!
//! Switching waveshapers abruptly produces a step in the output. A
//! [`CurveTransition`] keeps a `current` and a `target` curve and a blend
//! coefficient that ramps linearly from 0 to 1, evaluating both curves on
//! the same input sample and mixing:
//!
//! ```text
//! y = current(x) * (1 - blend) + target(x) * blend
//! ```
//!
//! At the default speed of 0.05 the crossfade completes in 20 samples, so
//! its duration in seconds scales inversely with the sample rate.

use crate::curve::ClipCurve;
use klip_core::lerp;

/// Default blend increment per sample.
pub const DEFAULT_TRANSITION_SPEED: f32 = 0.05;

/// Crossfade state between two clip curves.
///
/// ## Example
///
/// ```rust
/// use klip_dsp::{ClipCurve, CurveTransition};
///
/// let mut transition = CurveTransition::new(ClipCurve::SoftClip);
/// transition.start(ClipCurve::HardClip, 0.25);
///
/// for _ in 0..4 {
///     transition.advance();
/// }
/// assert!(!transition.is_transitioning());
/// assert_eq!(transition.mix(0.8, 0.5), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct CurveTransition {
    current: ClipCurve,
    target: ClipCurve,
    /// Crossfade position in [0, 1]
    blend: f32,
    /// Blend increment per sample
    speed: f32,
}

impl CurveTransition {
    /// Create a settled transition on `curve`.
    ///
    /// Blend starts at 0, so the output is `curve` alone.
    pub fn new(curve: ClipCurve) -> Self {
        Self {
            current: curve,
            target: curve,
            blend: 0.0,
            speed: DEFAULT_TRANSITION_SPEED,
        }
    }

    /// Begin crossfading toward `target` at `speed` blend units per sample.
    ///
    /// Ignored when `target` equals the installed current curve; otherwise
    /// the blend restarts from 0.
    pub fn start(&mut self, target: ClipCurve, speed: f32) {
        if target != self.current {
            self.target = target;
            self.speed = speed;
            self.blend = 0.0;
        }
    }

    /// Advance the blend by one sample, saturating at 1.0.
    #[inline]
    pub fn advance(&mut self) {
        if self.blend < 1.0 {
            self.blend += self.speed;
            if self.blend > 1.0 {
                self.blend = 1.0;
            }
        }
    }

    /// Evaluate both curves on `input` and crossfade by the current blend.
    #[inline]
    pub fn mix(&self, input: f32, threshold: f32) -> f32 {
        let from = self.current.apply(input, threshold);
        let to = self.target.apply(input, threshold);
        lerp(from, to, self.blend)
    }

    /// Install `curve` as the current endpoint without touching the blend.
    pub fn set_current(&mut self, curve: ClipCurve) {
        self.current = curve;
    }

    /// The curve on the `1 - blend` side.
    pub fn current(&self) -> ClipCurve {
        self.current
    }

    /// The curve on the `blend` side.
    pub fn target(&self) -> ClipCurve {
        self.target
    }

    /// Crossfade position in [0, 1].
    pub fn blend(&self) -> f32 {
        self.blend
    }

    /// Blend increment per sample.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// True while the blend is strictly between 0 and 1.
    pub fn is_transitioning(&self) -> bool {
        self.blend > 0.0 && self.blend < 1.0
    }

    /// Settle on `curve` with no crossfade in progress.
    pub fn reset(&mut self, curve: ClipCurve) {
        *self = Self {
            speed: self.speed,
            ..Self::new(curve)
        };
    }
}

impl Default for CurveTransition {
    fn default() -> Self {
        Self::new(ClipCurve::default())
    }
}
