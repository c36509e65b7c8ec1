//! Klip DSP - stereo clipping engine
//!
//! Removes DC offset, shapes the signal with a selectable clip curve,
//! crossfades between curves, and routes stereo audio through mid/side
//! modes. Built on the primitives in [`klip_core`].
//!
//! # Signal Flow
//!
//! ```text
//! L/R ─► mid/side encode ─► SignalConditioner ─► recombine ─► L/R
//!                           (DC block, gate, curve crossfade, [dynamic gain])
//! ```
//!
//! # Components
//!
//! - [`ClipCurve`] - Stateless waveshapers (soft, hard, linear, exponential, asymmetric)
//! - [`CurveTransition`] - Linear crossfade between two curves
//! - [`LowFrequencyMonitor`] / [`DynamicGain`] - Bass energy analysis and gain riding
//! - [`SignalConditioner`] - Per-sample chain for one mono path
//! - [`StereoFieldProcessor`] - Mid, side and mid+side block modes
//! - [`SharedControls`] / [`ControlValues`] - Lock-free control hand-off
//! - [`KlipProcessor`] - Block entry point for hosts
//!
//! # Example
//!
//! ```rust
//! use klip_dsp::{KlipProcessor, SharedControls};
//!
//! let controls = SharedControls::default();
//! let mut klip = KlipProcessor::new(44100.0);
//!
//! controls.store_threshold(0.5);
//! controls.store_curve_index(3);
//!
//! let mut left = [0.8f32; 64];
//! let mut right = [-0.8f32; 64];
//! klip.process_block_shared(&mut left, &mut right, &controls);
//! assert!(left.iter().all(|s| s.is_finite()));
//! ```
//!
//! # Features
//!
//! - `std` (default): standard library support
//! - `tracing`: `debug!` events on prepare and control changes

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod conditioner;
pub mod control;
pub mod curve;
pub mod energy;
pub mod processor;
pub mod settings;
pub mod stereo;
pub mod transition;

pub use conditioner::{DEFAULT_THRESHOLD, SignalConditioner};
pub use control::{ControlValues, SharedControls, slider_to_db, slider_to_threshold};
pub use curve::{
    ClipCurve, ParseCurveError, asymmetric_clip, exponential_clip, hard_clip, linear_clip,
    soft_clip,
};
pub use energy::{DynamicGain, LowFrequencyMonitor, window_capacity};
pub use processor::KlipProcessor;
pub use settings::{EngineSettings, ParseSettingError, Recombination, StateCoupling};
pub use stereo::{MidSideMode, ParseModeError, SampleFrame, StereoFieldProcessor};
pub use transition::{CurveTransition, DEFAULT_TRANSITION_SPEED};

pub use klip_core::StereoProcessor;
