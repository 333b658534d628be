//! State-of-charge estimation
//!
//! SOC% = (Gids - zero point) / (full point - zero point) * 100, clamped to
//! 0..=100. Range and energy scale linearly with raw Gids.
//!
//! The estimator only reports numbers. Whether a low value turns into an
//! alert on screen is decided by the composer.

use leafsoc_protocol::{Gids, TelemetrySample};

use crate::config::{AlertConfig, Calibration, EstimatorConfig};

/// Values derived from the latest raw Gids
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargeEstimate {
    /// Normalized state of charge, always within 0..=100
    pub soc_percent: f32,
    /// Estimated distance left in km
    pub range_km: f32,
    /// Energy left in the pack in kWh
    pub energy_kwh: f32,
    /// How far the raw count sits below the zero point (0 when above)
    pub gids_below_floor: Gids,
    /// How far the raw count sits above the zero point (0 when below)
    pub gids_to_floor: Gids,
}

impl ChargeEstimate {
    /// SOC rounded to the nearest whole percent
    pub fn soc_whole(&self) -> u8 {
        whole_percent(self.soc_percent)
    }
}

/// Round a 0..=100 percentage to the nearest whole number
///
/// Out-of-range and non-finite inputs are clamped first.
pub fn whole_percent(percent: f32) -> u8 {
    if !percent.is_finite() {
        return 0;
    }
    (percent.clamp(0.0, 100.0) + 0.5) as u8
}

/// Normalized SOC for a raw Gids count
///
/// Returns `None` when the inputs cannot produce a finite result (NaN raw
/// value or a degenerate calibration).
pub fn soc_percent(raw: Gids, calibration: &Calibration) -> Option<f32> {
    if !raw.is_finite() || calibration.validate().is_err() {
        return None;
    }
    let fraction = (raw - calibration.zero_point) / calibration.span();
    Some((fraction * 100.0).clamp(0.0, 100.0))
}

/// Derive the charge estimate from the cached sample
///
/// Unavailable until the first valid Gids frame has been decoded.
pub fn estimate(
    sample: &TelemetrySample,
    calibration: &Calibration,
    scales: &EstimatorConfig,
) -> Option<ChargeEstimate> {
    let raw = sample.gids()?;
    let soc_percent = soc_percent(raw, calibration)?;
    if scales.validate().is_err() {
        return None;
    }

    let usable = raw.non_negative();
    Some(ChargeEstimate {
        soc_percent,
        range_km: usable / Gids::new(scales.gids_per_km),
        energy_kwh: usable * scales.kwh_per_gid,
        gids_below_floor: (calibration.zero_point - raw).non_negative(),
        gids_to_floor: (raw - calibration.zero_point).non_negative(),
    })
}

/// Whether the raw count is in the low-battery band
///
/// The comparison is strict: a count equal to the threshold is not low.
pub fn is_low(raw: Gids, alert: &AlertConfig) -> bool {
    raw.is_finite() && raw < alert.low_gids
}
