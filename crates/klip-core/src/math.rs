//! Mathematical utility functions for DSP.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Stereo
//!
//! - [`mid_side_encode`] / [`mid_side_decode`] - L/R to M/S and back
//! - [`mono_sum`] - Average of both channels
//!
//! # Utilities
//!
//! - [`lerp`] - Linear interpolation (crossfades)
//! - [`flush_denormal`] - Subnormal protection for recursive filters

use libm::{expf, logf};

/// Convert decibels to linear gain.
///
/// # Arguments
/// * `db` - Value in decibels
///
/// # Returns
/// Linear gain value (e.g., 0 dB → 1.0, -6 dB → 0.5, +6 dB → 2.0)
///
/// # Example
/// ```rust
/// use klip_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// # Arguments
/// * `linear` - Linear gain value (clamped to at least 1e-10)
///
/// # Returns
/// Value in decibels
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Linear interpolation between two values.
///
/// # Arguments
/// * `a` - Start value (at t=0)
/// * `b` - End value (at t=1)
/// * `t` - Interpolation factor (0.0 to 1.0)
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Encode a left/right pair into mid/side.
///
/// `mid = (L + R) / 2`, `side = (L - R) / 2`
#[inline]
pub fn mid_side_encode(left: f32, right: f32) -> (f32, f32) {
    (0.5 * (left + right), 0.5 * (left - right))
}

/// Decode a mid/side pair back into left/right.
///
/// `L = mid + side`, `R = mid - side`; the exact inverse of
/// [`mid_side_encode`].
#[inline]
pub fn mid_side_decode(mid: f32, side: f32) -> (f32, f32) {
    (mid + side, mid - side)
}

/// Sum stereo to mono (average).
#[inline]
pub fn mono_sum(left: f32, right: f32) -> f32 {
    (left + right) * 0.5
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU slowdowns on most architectures. Values
/// below 1e-20 are replaced with zero, leaving margin before the IEEE 754
/// subnormal range begins.
///
/// Reference: IEEE 754-2008, Section 3.4 (Subnormal numbers)
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_linear_roundtrip() {
        let original = 0.5;
        let db = linear_to_db(original);
        let back = db_to_linear(db);
        assert!(
            (original - back).abs() < 1e-5,
            "Roundtrip failed: {} -> {} -> {}",
            original,
            db,
            back
        );
    }

    #[test]
    fn test_db_known_values() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(-6.0206) - 0.5).abs() < 0.001);
        assert!((db_to_linear(-24.0) - 0.063_095_73).abs() < 1e-5);
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        assert_eq!(lerp(0.3, 0.7, 0.0), 0.3);
        assert_eq!(lerp(0.3, 0.7, 1.0), 0.7);
        assert!((lerp(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_mid_side_roundtrip() {
        for &(l, r) in &[(0.5, -0.25), (1.0, 1.0), (-0.8, 0.3), (0.0, 0.9)] {
            let (m, s) = mid_side_encode(l, r);
            let (l2, r2) = mid_side_decode(m, s);
            assert!((l - l2).abs() < 1e-6 && (r - r2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_mid_side_known_values() {
        assert_eq!(mid_side_encode(1.0, 1.0), (1.0, 0.0));
        assert_eq!(mid_side_encode(1.0, -1.0), (0.0, 1.0));
    }

    #[test]
    fn test_mono_sum() {
        assert_eq!(mono_sum(1.0, 1.0), 1.0);
        assert_eq!(mono_sum(1.0, -1.0), 0.0);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1.0), 1.0);
        assert_eq!(flush_denormal(-0.5), -0.5);
        assert_eq!(flush_denormal(1e-10), 1e-10);

        assert_eq!(flush_denormal(1e-21), 0.0);
        assert_eq!(flush_denormal(-1e-21), 0.0);
        assert_eq!(flush_denormal(1e-38), 0.0);
    }
}
