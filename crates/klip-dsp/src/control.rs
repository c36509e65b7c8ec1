//! Control plane: the three live values a host feeds the engine.
//!
//! [`SharedControls`] holds them in atomics so a UI or automation thread can
//! write while the audio thread reads, without locks. The audio thread takes
//! one [`ControlValues`] snapshot per block and applies it to every frame of
//! that block.
//!
//! All loads and stores use `Ordering::Relaxed`: each value is independent
//! and a block may observe a mix of old and new values.

use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use crate::curve::ClipCurve;
use crate::stereo::MidSideMode;
use klip_core::db_to_linear;

/// Threshold slider range in dB (`0.0` maps to `-24 dB`, `1.0` to `0 dB`).
pub const THRESHOLD_RANGE_DB: f32 = 24.0;

/// Convert a threshold slider position in (0, 1] to decibels.
#[inline]
pub fn slider_to_db(slider: f32) -> f32 {
    slider * THRESHOLD_RANGE_DB - THRESHOLD_RANGE_DB
}

/// Convert a threshold slider position to a linear clip threshold.
///
/// Always strictly positive: `0.0` yields `db_to_linear(-24) ≈ 0.063`.
#[inline]
pub fn slider_to_threshold(slider: f32) -> f32 {
    db_to_linear(slider_to_db(slider))
}

/// One block's worth of control values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlValues {
    /// Threshold slider position in (0, 1]
    pub threshold: f32,
    /// Clip curve
    pub curve: ClipCurve,
    /// Stereo mode; `None` leaves the block untouched
    pub mode: Option<MidSideMode>,
}

impl ControlValues {
    /// Build from raw host values, applying the selector fallbacks.
    ///
    /// Out-of-range curve indices fall back to [`ClipCurve::SoftClip`];
    /// out-of-range mode indices become passthrough.
    pub fn from_raw(threshold: f32, curve_index: i32, mode_index: i32) -> Self {
        Self {
            threshold,
            curve: ClipCurve::from_index(curve_index),
            mode: MidSideMode::from_index(mode_index),
        }
    }

    /// Linear clip threshold for this snapshot.
    pub fn linear_threshold(&self) -> f32 {
        slider_to_threshold(self.threshold)
    }
}

impl Default for ControlValues {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            curve: ClipCurve::SoftClip,
            mode: Some(MidSideMode::MidSide),
        }
    }
}

/// Lock-free control storage shared between a control thread and the audio
/// thread.
///
/// The threshold is stored as `f32` bits in an `AtomicU32`; the selectors
/// are stored as raw host indices so out-of-range values survive until the
/// snapshot applies the fallbacks. Wrap in `Arc` to share across threads.
///
/// ## Example
///
/// ```rust
/// use klip_dsp::{ClipCurve, MidSideMode, SharedControls};
///
/// let controls = SharedControls::default();
/// controls.store_threshold(0.5);
/// controls.store_curve_index(1);
/// controls.store_mode_index(0);
///
/// let snapshot = controls.snapshot();
/// assert_eq!(snapshot.threshold, 0.5);
/// assert_eq!(snapshot.curve, ClipCurve::HardClip);
/// assert_eq!(snapshot.mode, Some(MidSideMode::Mid));
/// ```
#[derive(Debug)]
pub struct SharedControls {
    threshold: AtomicU32,
    curve: AtomicI32,
    mode: AtomicI32,
}

impl SharedControls {
    /// Create storage initialized from `values`.
    pub fn new(values: ControlValues) -> Self {
        Self {
            threshold: AtomicU32::new(values.threshold.to_bits()),
            curve: AtomicI32::new(values.curve.index()),
            mode: AtomicI32::new(values.mode.map_or(-1, MidSideMode::index)),
        }
    }

    /// Store the threshold slider position.
    pub fn store_threshold(&self, slider: f32) {
        self.threshold.store(slider.to_bits(), Ordering::Relaxed);
    }

    /// Store a raw host curve selector index.
    ///
    /// Out-of-range indices are stored as [`ClipCurve::SoftClip`].
    pub fn store_curve_index(&self, index: i32) {
        self.store_curve(ClipCurve::from_index(index));
    }

    /// Store a raw host mode selector index.
    ///
    /// Out-of-range indices are stored as passthrough.
    pub fn store_mode_index(&self, index: i32) {
        self.store_mode(MidSideMode::from_index(index));
    }

    /// Store a curve, including the reserved [`ClipCurve::SaturationClip`].
    pub fn store_curve(&self, curve: ClipCurve) {
        self.curve.store(curve.index(), Ordering::Relaxed);
    }

    /// Store a mode; `None` is passthrough.
    pub fn store_mode(&self, mode: Option<MidSideMode>) {
        self.mode.store(mode.map_or(-1, MidSideMode::index), Ordering::Relaxed);
    }

    /// Store a full set of values.
    pub fn store(&self, values: ControlValues) {
        self.store_threshold(values.threshold);
        self.store_curve(values.curve);
        self.store_mode(values.mode);
    }

    /// Load all three values once.
    pub fn snapshot(&self) -> ControlValues {
        ControlValues {
            threshold: f32::from_bits(self.threshold.load(Ordering::Relaxed)),
            curve: curve_from_slot(self.curve.load(Ordering::Relaxed)),
            mode: MidSideMode::from_index(self.mode.load(Ordering::Relaxed)),
        }
    }
}

/// Decode a stored curve slot. Slots only ever hold [`ClipCurve::index`]
/// values, so the reserved curve's index is accepted here.
fn curve_from_slot(slot: i32) -> ClipCurve {
    if slot == ClipCurve::SaturationClip.index() {
        ClipCurve::SaturationClip
    } else {
        ClipCurve::from_index(slot)
    }
}

impl Default for SharedControls {
    fn default() -> Self {
        Self::new(ControlValues::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_mapping() {
        assert_eq!(slider_to_db(1.0), 0.0);
        assert_eq!(slider_to_db(0.0), -24.0);
        assert!((slider_to_threshold(1.0) - 1.0).abs() < 1e-6);
        assert!((slider_to_threshold(0.75) - 0.501_187).abs() < 1e-4);
        assert!(slider_to_threshold(0.0) > 0.0);
    }

    #[test]
    fn test_from_raw_fallbacks() {
        let values = ControlValues::from_raw(0.8, 42, 7);
        assert_eq!(values.curve, ClipCurve::SoftClip);
        assert_eq!(values.mode, None);

        let values = ControlValues::from_raw(0.8, 3, 1);
        assert_eq!(values.curve, ClipCurve::ExponentialClip);
        assert_eq!(values.mode, Some(MidSideMode::Side));
    }

    #[test]
    fn test_snapshot_reflects_stores() {
        let controls = SharedControls::default();
        assert_eq!(controls.snapshot(), ControlValues::default());

        controls.store_threshold(0.25);
        controls.store_curve_index(4);
        controls.store_mode_index(9);
        let snapshot = controls.snapshot();
        assert_eq!(snapshot.threshold, 0.25);
        assert_eq!(snapshot.curve, ClipCurve::AsymmetricClip);
        assert_eq!(snapshot.mode, None);

        let values = ControlValues::from_raw(0.6, 2, 2);
        controls.store(values);
        assert_eq!(controls.snapshot(), values);
    }

    #[test]
    fn test_store_round_trips_every_curve_and_mode() {
        let controls = SharedControls::default();
        let curves = ClipCurve::ALL.into_iter().chain([ClipCurve::SaturationClip]);
        let modes = MidSideMode::ALL.into_iter().map(Some).chain([None]);
        for curve in curves {
            for mode in modes.clone() {
                let values = ControlValues {
                    threshold: 0.7,
                    curve,
                    mode,
                };
                controls.store(values);
                assert_eq!(controls.snapshot(), values, "{curve:?} / {mode:?}");
            }
        }
    }

    #[test]
    fn test_raw_index_five_is_not_the_reserved_curve() {
        let controls = SharedControls::default();
        controls.store_curve(ClipCurve::SaturationClip);
        assert_eq!(controls.snapshot().curve, ClipCurve::SaturationClip);

        // Host selectors never reach the reserved curve.
        controls.store_curve_index(ClipCurve::SaturationClip.index());
        assert_eq!(controls.snapshot().curve, ClipCurve::SoftClip);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_cross_thread_store() {
        use std::sync::Arc;

        let controls = Arc::new(SharedControls::default());
        let writer = Arc::clone(&controls);
        std::thread::spawn(move || writer.store_curve_index(1))
            .join()
            .unwrap();
        assert_eq!(controls.snapshot().curve, ClipCurve::HardClip);
    }
}
