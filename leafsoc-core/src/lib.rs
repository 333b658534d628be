//! Board-agnostic core logic for the LeafSOC display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Configuration types (calibration, scales, thresholds)
//! - State-of-charge and range estimation
//! - Page state machine and its persistence
//! - Button timing and the control-panel paging gesture
//! - Frame composition (what to show, how to format it)
//! - The dashboard context owned by the main cycle

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod composer;
pub mod config;
pub mod dashboard;
pub mod estimator;
pub mod input;
pub mod pages;
pub mod state;

pub use composer::{compose, DisplayFrame, Primary};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use estimator::{estimate, ChargeEstimate};
pub use pages::{PageController, Transition};
pub use state::PageEvent;

pub use leafsoc_protocol::{Gids, TelemetrySample};
