//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use leafsoc_protocol::Gids;

use super::calibration::Calibration;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Full point is not above the zero point
    InvertedCalibration,
    /// A value is NaN or infinite
    NonFinite,
    /// A scale factor is zero or negative
    NonPositiveScale,
    /// Long press must be longer than the debounce time
    InvalidPressTiming,
    /// Fan speed gesture needs a maximum above zero
    InvalidFanSpeed,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvertedCalibration => f.write_str("full point must exceed zero point"),
            ConfigError::NonFinite => f.write_str("value must be finite"),
            ConfigError::NonPositiveScale => f.write_str("scale must be positive"),
            ConfigError::InvalidPressTiming => {
                f.write_str("long press must be longer than debounce")
            }
            ConfigError::InvalidFanSpeed => f.write_str("max fan speed must be above zero"),
        }
    }
}

/// Unit conversion constants for the estimator
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EstimatorConfig {
    /// Energy per Gid in kWh
    pub kwh_per_gid: f32,
    /// Gids consumed per km driven
    pub gids_per_km: f32,
}

impl EstimatorConfig {
    pub const DEFAULT: EstimatorConfig = EstimatorConfig {
        kwh_per_gid: 0.08,
        gids_per_km: 1.9,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.kwh_per_gid.is_finite() || !self.gids_per_km.is_finite() {
            return Err(ConfigError::NonFinite);
        }
        if self.kwh_per_gid <= 0.0 || self.gids_per_km <= 0.0 {
            return Err(ConfigError::NonPositiveScale);
        }
        Ok(())
    }
}

/// Low-battery alert
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlertConfig {
    /// Alert while raw Gids are strictly below this value
    ///
    /// The car's own very-low-battery warning comes on at 24 Gids.
    pub low_gids: Gids,
}

impl AlertConfig {
    pub const DEFAULT: AlertConfig = AlertConfig {
        low_gids: Gids::new(25.0),
    };
}

/// Page button timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Presses shorter than this are contact bounce
    pub debounce_ms: u32,
    /// Holding this long resets the display
    pub long_press_ms: u32,
}

impl InputConfig {
    pub const DEFAULT: InputConfig = InputConfig {
        debounce_ms: 50,
        long_press_ms: 2000,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.long_press_ms <= self.debounce_ms {
            return Err(ConfigError::InvalidPressTiming);
        }
        Ok(())
    }
}

/// Climate-control paging gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Fan speed that triggers a reset
    pub max_fan_speed: u8,
}

impl PanelConfig {
    pub const DEFAULT: PanelConfig = PanelConfig { max_fan_speed: 7 };
}

/// Persistent storage layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StorageConfig {
    /// Byte address holding the current page index
    pub page_address: u16,
}

impl StorageConfig {
    pub const DEFAULT: StorageConfig = StorageConfig { page_address: 0 };
}

/// Complete display configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DashboardConfig {
    pub calibration: Calibration,
    pub estimator: EstimatorConfig,
    pub alert: AlertConfig,
    pub input: InputConfig,
    pub panel: PanelConfig,
    pub storage: StorageConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl DashboardConfig {
    pub const DEFAULT: DashboardConfig = DashboardConfig {
        calibration: Calibration::DEFAULT,
        estimator: EstimatorConfig::DEFAULT,
        alert: AlertConfig::DEFAULT,
        input: InputConfig::DEFAULT,
        panel: PanelConfig::DEFAULT,
        storage: StorageConfig::DEFAULT,
    };

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calibration.validate()?;
        self.estimator.validate()?;
        if !self.alert.low_gids.is_finite() {
            return Err(ConfigError::NonFinite);
        }
        self.input.validate()?;
        if self.panel.max_fan_speed == 0 {
            return Err(ConfigError::InvalidFanSpeed);
        }
        Ok(())
    }
}
