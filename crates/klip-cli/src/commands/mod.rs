//! CLI command implementations.

pub mod common;
pub mod config;
pub mod curves;
pub mod info;
pub mod presets;
pub mod transition;
