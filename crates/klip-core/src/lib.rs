//! Klip Core - DSP primitives for the klip signal conditioner
//!
//! This crate provides the filter and math building blocks used by the
//! clipping engine, designed for real-time audio processing with zero
//! allocation in the audio path.
//!
//! # Core Abstractions
//!
//! - [`StereoProcessor`] - Object-safe trait for block-based stereo processors
//!
//! ## Filters
//!
//! - [`DcBlocker`] - First-order RC highpass for DC offset removal
//! - [`Biquad`] - Second-order IIR filter with RBJ cookbook coefficients
//!
//! ## Utilities
//!
//! - Level conversions: [`db_to_linear`], [`linear_to_db`]
//! - Mid/side: [`mid_side_encode`], [`mid_side_decode`]
//! - Denormal protection: [`flush_denormal`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! klip-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use klip_core::{Biquad, DcBlocker, lowpass_coefficients, BUTTERWORTH_Q};
//!
//! let mut dc = DcBlocker::new(48000.0);
//! let mut lp = Biquad::new();
//! let (b0, b1, b2, a0, a1, a2) = lowpass_coefficients(40.0, BUTTERWORTH_Q, 48000.0);
//! lp.set_coefficients(b0, b1, b2, a0, a1, a2);
//!
//! let y = lp.process(dc.process(0.25));
//! assert!(y.is_finite());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod dc_blocker;
pub mod math;
pub mod processor;

// Re-export main types at crate root
pub use biquad::{BUTTERWORTH_Q, Biquad, allpass_coefficients, lowpass_coefficients};
pub use dc_blocker::DcBlocker;
pub use math::{
    db_to_linear, flush_denormal, lerp, linear_to_db, mid_side_decode, mid_side_encode, mono_sum,
};
pub use processor::StereoProcessor;
