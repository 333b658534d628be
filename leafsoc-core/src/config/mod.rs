//! Configuration types
//!
//! Everything here is fixed at build time. The firmware build script
//! generates a [`DashboardConfig`] constant from `leafsoc.toml`; host tests
//! use [`DashboardConfig::DEFAULT`].

pub mod calibration;
pub mod types;

pub use calibration::*;
pub use types::*;
