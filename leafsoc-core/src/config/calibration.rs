//! Gids calibration
//!
//! Maps the raw Gids count onto a 0-100 % scale:
//! - 0 % sits at the zero point, where the car drops into turtle mode
//!   (6 to 8 Gids)
//! - 100 % sits at the full point, the Gids seen after a full slow charge
//!   (drifts down as the pack ages: 225, 220, 214 ...)

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use leafsoc_protocol::Gids;

use super::types::ConfigError;

/// Turtle-mode floor used as 0 %
pub const DEFAULT_ZERO_POINT: Gids = Gids::new(8.0);

/// Gids after a full charge used as 100 %
pub const DEFAULT_FULL_POINT: Gids = Gids::new(214.0);

/// Zero and full points of the SOC scale
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Calibration {
    /// Gids shown as 0 %
    pub zero_point: Gids,
    /// Gids shown as 100 %
    pub full_point: Gids,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Calibration {
    pub const DEFAULT: Calibration = Calibration {
        zero_point: DEFAULT_ZERO_POINT,
        full_point: DEFAULT_FULL_POINT,
    };

    /// Create a validated calibration
    pub fn new(zero_point: Gids, full_point: Gids) -> Result<Self, ConfigError> {
        let calibration = Self {
            zero_point,
            full_point,
        };
        calibration.validate()?;
        Ok(calibration)
    }

    /// Check that both points are finite and full > zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zero_point.is_finite() || !self.full_point.is_finite() {
            return Err(ConfigError::NonFinite);
        }
        if self.full_point <= self.zero_point {
            return Err(ConfigError::InvertedCalibration);
        }
        Ok(())
    }

    /// Gids between 0 % and 100 %
    pub fn span(&self) -> Gids {
        self.full_point - self.zero_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Calibration::DEFAULT.validate().is_ok());
        assert_eq!(Calibration::DEFAULT.span(), Gids::new(206.0));
    }

    #[test]
    fn test_inverted_rejected() {
        assert_eq!(
            Calibration::new(Gids::new(200.0), Gids::new(8.0)),
            Err(ConfigError::InvertedCalibration)
        );
        assert_eq!(
            Calibration::new(Gids::new(8.0), Gids::new(8.0)),
            Err(ConfigError::InvertedCalibration)
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(
            Calibration::new(Gids::new(f32::NAN), Gids::new(8.0)),
            Err(ConfigError::NonFinite)
        );
    }

    #[test]
    fn test_integer_points() {
        let cal = Calibration::new(Gids::from(8u16), Gids::from(217u16)).unwrap();
        assert_eq!(cal.span().get(), 209.0);
    }
}
