//! Clip curve library.
//!
//! Stateless waveshapers, one per curve family. Every curve is the identity
//! inside `[-threshold, threshold]` and only bends the signal beyond it, so
//! all of them are continuous at the threshold by construction.
//!
//! | Curve | Beyond threshold | Max excursion |
//! |-------|------------------|---------------|
//! | [`soft_clip`] | cubic, divided by threshold | unbounded (cubic) |
//! | [`hard_clip`] | flat | `t` |
//! | [`linear_clip`] | half slope | unbounded |
//! | [`exponential_clip`] | exponential approach | `t + t/4` |
//! | [`asymmetric_clip`] | log2 above, log3 below | unbounded (log) |
//!
//! The threshold must be strictly positive: the curves divide by it and the
//! behavior for `threshold <= 0` is undefined.

use core::fmt;
use core::str::FromStr;
use libm::{expf, logf};

/// ln(3), the denominator for the negative branch of [`asymmetric_clip`].
const LN_3: f32 = 1.098_612_3;

/// Cubic soft saturation.
///
/// For `|x| > t`: `sign(x) * (1.5|x| - 0.5|x|^3 / t) / t`.
///
/// The curve is not scale-preserving (the threshold divides twice); the
/// numeric shape is the contract.
#[inline]
pub fn soft_clip(input: f32, threshold: f32) -> f32 {
    let magnitude = input.abs();
    if magnitude > threshold {
        let shaped = (1.5 * magnitude - 0.5 * magnitude * magnitude * magnitude / threshold) / threshold;
        if input > 0.0 { shaped } else { -shaped }
    } else {
        input
    }
}

/// Clamp to `[-t, t]`.
#[inline]
pub fn hard_clip(input: f32, threshold: f32) -> f32 {
    if input > threshold {
        threshold
    } else if input < -threshold {
        -threshold
    } else {
        input
    }
}

/// Continue beyond the threshold at half slope.
#[inline]
pub fn linear_clip(input: f32, threshold: f32) -> f32 {
    if input > threshold {
        threshold + 0.5 * (input - threshold)
    } else if input < -threshold {
        -threshold + 0.5 * (input + threshold)
    } else {
        input
    }
}

/// Exponential approach to the asymptote `t + t/4`.
#[inline]
pub fn exponential_clip(input: f32, threshold: f32) -> f32 {
    if input > threshold {
        threshold + (1.0 - expf(-((input - threshold) / threshold) * 3.0)) * (threshold / 4.0)
    } else if input < -threshold {
        -threshold - (1.0 - expf(((input + threshold) / threshold) * 3.0)) * (threshold / 4.0)
    } else {
        input
    }
}

/// Logarithmic compression, base 2 for positive and base 3 for negative
/// excursions. Deliberately non-symmetric.
#[inline]
pub fn asymmetric_clip(input: f32, threshold: f32) -> f32 {
    if input > threshold {
        threshold + logf(1.0 + (input - threshold)) / core::f32::consts::LN_2
    } else if input < -threshold {
        -threshold - logf(1.0 + (-input - threshold)) / LN_3
    } else {
        input
    }
}

/// Clip curve selection.
///
/// Host selectors map 1:1 onto the first five variants via
/// [`from_index`](Self::from_index). `SaturationClip` is reserved: it is
/// never produced from an index and evaluates as passthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipCurve {
    /// Cubic soft saturation
    #[default]
    SoftClip,
    /// Flat clamp at the threshold
    HardClip,
    /// Half-slope continuation
    LinearClip,
    /// Exponential approach to `1.25 * threshold`
    ExponentialClip,
    /// Log2 / log3 asymmetric compression
    AsymmetricClip,
    /// Reserved; passthrough
    SaturationClip,
}

impl ClipCurve {
    /// The selectable curves, in host index order.
    pub const ALL: [ClipCurve; 5] = [
        ClipCurve::SoftClip,
        ClipCurve::HardClip,
        ClipCurve::LinearClip,
        ClipCurve::ExponentialClip,
        ClipCurve::AsymmetricClip,
    ];

    /// Map a host selector index to a curve.
    ///
    /// Out-of-range indices fall back to [`ClipCurve::SoftClip`].
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => ClipCurve::SoftClip,
            1 => ClipCurve::HardClip,
            2 => ClipCurve::LinearClip,
            3 => ClipCurve::ExponentialClip,
            4 => ClipCurve::AsymmetricClip,
            _ => ClipCurve::SoftClip,
        }
    }

    /// Host selector index of this curve.
    pub fn index(self) -> i32 {
        match self {
            ClipCurve::SoftClip => 0,
            ClipCurve::HardClip => 1,
            ClipCurve::LinearClip => 2,
            ClipCurve::ExponentialClip => 3,
            ClipCurve::AsymmetricClip => 4,
            ClipCurve::SaturationClip => 5,
        }
    }

    /// Short lowercase name, as used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ClipCurve::SoftClip => "soft",
            ClipCurve::HardClip => "hard",
            ClipCurve::LinearClip => "linear",
            ClipCurve::ExponentialClip => "exponential",
            ClipCurve::AsymmetricClip => "asymmetric",
            ClipCurve::SaturationClip => "saturation",
        }
    }

    /// Evaluate the curve.
    #[inline]
    pub fn apply(self, input: f32, threshold: f32) -> f32 {
        match self {
            ClipCurve::SoftClip => soft_clip(input, threshold),
            ClipCurve::HardClip => hard_clip(input, threshold),
            ClipCurve::LinearClip => linear_clip(input, threshold),
            ClipCurve::ExponentialClip => exponential_clip(input, threshold),
            ClipCurve::AsymmetricClip => asymmetric_clip(input, threshold),
            ClipCurve::SaturationClip => input,
        }
    }
}

impl fmt::Display for ClipCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a curve name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCurveError;

impl fmt::Display for ParseCurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of: soft, hard, linear, exponential, asymmetric, saturation")
    }
}

impl FromStr for ClipCurve {
    type Err = ParseCurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [
            ClipCurve::SoftClip,
            ClipCurve::HardClip,
            ClipCurve::LinearClip,
            ClipCurve::ExponentialClip,
            ClipCurve::AsymmetricClip,
            ClipCurve::SaturationClip,
        ]
        .into_iter()
        .find(|c| c.name().eq_ignore_ascii_case(s))
        .ok_or(ParseCurveError)
    }
}
