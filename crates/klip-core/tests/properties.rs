//! Property-based tests for klip-core DSP primitives.
//!
//! Tests filter stability and mid/side integrity using proptest for
//! randomized input generation.

use proptest::prelude::*;
use klip_core::{
    BUTTERWORTH_Q, Biquad, DcBlocker, allpass_coefficients, lowpass_coefficients,
    mid_side_decode, mid_side_encode,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// For any valid cutoff (20-20000 Hz) and Q (0.1-10.0), low-pass and
    /// all-pass biquads produce finite output for random finite input.
    #[test]
    fn biquad_stability(
        freq in 20.0f32..20000.0f32,
        q in 0.1f32..10.0f32,
        allpass in any::<bool>(),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let coeffs = if allpass {
            allpass_coefficients(freq, q, 48000.0)
        } else {
            lowpass_coefficients(freq, q, 48000.0)
        };
        let mut biquad = Biquad::from_coefficients(coeffs);

        for &sample in &input {
            let out = biquad.process(sample);
            prop_assert!(
                out.is_finite(),
                "Biquad (allpass={}, freq={}, q={}) produced non-finite output {} for input {}",
                allpass, freq, q, out, sample
            );
        }
    }

    /// A constant DC input decays toward zero at any common sample rate.
    #[test]
    fn dc_blocker_converges(
        offset in -1.0f32..=1.0f32,
        sample_rate in prop::sample::select(vec![22050.0f32, 44100.0, 48000.0, 96000.0]),
    ) {
        let mut blocker = DcBlocker::new(sample_rate);
        let mut out = 0.0;
        for _ in 0..(sample_rate as usize) {
            out = blocker.process(offset);
        }
        prop_assert!(out.abs() < 1e-3, "offset {} left {} after 1s at {} Hz", offset, out, sample_rate);
    }

    /// Mid/side encode followed by decode reproduces the original pair.
    #[test]
    fn mid_side_roundtrip(l in -1.0f32..=1.0f32, r in -1.0f32..=1.0f32) {
        let (m, s) = mid_side_encode(l, r);
        let (l2, r2) = mid_side_decode(m, s);
        prop_assert!((l - l2).abs() < 1e-6);
        prop_assert!((r - r2).abs() < 1e-6);
    }
}

/// A settled sine keeps its RMS through the all-pass.
#[test]
fn allpass_preserves_sine_rms() {
    let sr = 44100.0;
    let mut ap = Biquad::from_coefficients(allpass_coefficients(1000.0, BUTTERWORTH_Q, sr));

    for &freq in &[100.0f32, 1000.0, 5000.0] {
        ap.clear();
        let mut in_sq = 0.0f64;
        let mut out_sq = 0.0f64;
        for i in 0..44100 {
            let x = (2.0 * std::f32::consts::PI * freq * i as f32 / sr).sin();
            let y = ap.process(x);
            if i >= 4410 {
                in_sq += f64::from(x * x);
                out_sq += f64::from(y * y);
            }
        }
        let ratio = (out_sq / in_sq).sqrt();
        assert!((ratio - 1.0).abs() < 0.01, "{} Hz RMS ratio {}", freq, ratio);
    }
}
