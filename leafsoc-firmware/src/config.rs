//! Build-time configuration
//!
//! `build.rs` validates `leafsoc.toml` and writes the constants included
//! here.

use leafsoc_core::config::{
    AlertConfig, Calibration, DashboardConfig, EstimatorConfig, InputConfig, PanelConfig,
    StorageConfig,
};
use leafsoc_core::Gids;
use leafsoc_drivers::BitTiming;

include!(concat!(env!("OUT_DIR"), "/config.rs"));
