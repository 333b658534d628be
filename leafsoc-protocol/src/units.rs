//! Charge units
//!
//! Every piece of charge arithmetic goes through [`Gids`]. Integer counts
//! from the bus enter through `From<u16>`; there is deliberately no
//! arithmetic between `Gids` and bare integers, so an integer can never be
//! subtracted from a float threshold.

use core::ops::{Add, Div, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Battery charge in Gids (roughly 80 Wh each)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Gids(f32);

impl Gids {
    /// No charge
    pub const ZERO: Gids = Gids(0.0);

    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> f32 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Larger of two values
    pub fn max(self, other: Gids) -> Gids {
        Gids(self.0.max(other.0))
    }

    /// Clamp negative values to zero
    pub fn non_negative(self) -> Gids {
        self.max(Gids::ZERO)
    }

    /// Nearest whole count, saturating at the `u16` range
    ///
    /// Negative and non-finite values map to 0.
    pub fn whole(self) -> u16 {
        if !self.0.is_finite() || self.0 <= 0.0 {
            return 0;
        }
        (self.0 + 0.5) as u16
    }
}

impl From<u16> for Gids {
    fn from(count: u16) -> Self {
        Gids(f32::from(count))
    }
}

impl From<u8> for Gids {
    fn from(count: u8) -> Self {
        Gids(f32::from(count))
    }
}

impl From<f32> for Gids {
    fn from(value: f32) -> Self {
        Gids(value)
    }
}

impl Add for Gids {
    type Output = Gids;

    fn add(self, rhs: Gids) -> Gids {
        Gids(self.0 + rhs.0)
    }
}

impl Sub for Gids {
    type Output = Gids;

    fn sub(self, rhs: Gids) -> Gids {
        Gids(self.0 - rhs.0)
    }
}

/// Ratio of two charge amounts
impl Div for Gids {
    type Output = f32;

    fn div(self, rhs: Gids) -> f32 {
        self.0 / rhs.0
    }
}

/// Convert to another unit with a per-Gid factor (kWh per Gid, etc.)
impl Mul<f32> for Gids {
    type Output = f32;

    fn mul(self, factor: f32) -> f32 {
        self.0 * factor
    }
}
