//! Frame decoding
//!
//! [`decode`] is a pure function from a frame to a [`Reading`]. Applying the
//! reading to the cached sample is done by [`TelemetrySample::apply`], so a
//! rejected frame can never touch previously valid values.
//!
//! [`TelemetrySample::apply`]: crate::TelemetrySample::apply

use embedded_can::Frame;

use crate::signals::{
    signed_upper_11, upper_10, Signal, CURRENT_SCALE_A, NOT_READY_10BIT, SOC_PERCENT_SCALE,
    VOLTAGE_SCALE_V,
};
use crate::units::Gids;

/// Reasons a recognized frame was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Payload shorter than the signal layout requires
    Truncated { signal: Signal, len: u8 },
    /// Battery controller sent the "not available" marker
    NotReady(Signal),
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::Truncated { signal, len } => {
                write!(f, "{:?} frame truncated to {} bytes", signal, len)
            }
            DecodeError::NotReady(signal) => write!(f, "{:?} not ready", signal),
        }
    }
}

/// A decoded value in engineering units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    Gids(Gids),
    SocPercent(f32),
    Battery { current_a: f32, voltage_v: f32 },
}

/// Result of feeding one frame to the sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeOutcome {
    /// The sample was updated with a new value for this signal
    Updated(Signal),
    /// Not a signal the display uses
    Ignored,
    /// Recognized identifier with an unusable payload
    Dropped(DecodeError),
}

/// Decode a frame into a reading
///
/// Returns `Ok(None)` for identifiers the display does not use (including
/// every extended identifier).
pub fn decode<F: Frame>(frame: &F) -> Result<Option<Reading>, DecodeError> {
    let id = match frame.id() {
        embedded_can::Id::Standard(id) => id.as_raw(),
        embedded_can::Id::Extended(_) => return Ok(None),
    };

    let Some(signal) = Signal::from_id(id) else {
        return Ok(None);
    };

    let data = frame.data();
    if data.len() < signal.min_len() {
        return Err(DecodeError::Truncated {
            signal,
            len: data.len() as u8,
        });
    }

    let reading = match signal {
        Signal::Gids => {
            let raw = upper_10(data[0], data[1]);
            if raw == NOT_READY_10BIT {
                return Err(DecodeError::NotReady(signal));
            }
            Reading::Gids(Gids::from(raw))
        }
        Signal::SocPercent => {
            let raw = upper_10(data[0], data[1]);
            if raw == NOT_READY_10BIT {
                return Err(DecodeError::NotReady(signal));
            }
            Reading::SocPercent(f32::from(raw) * SOC_PERCENT_SCALE)
        }
        Signal::BatteryPower => {
            let raw_voltage = upper_10(data[2], data[3]);
            if raw_voltage == NOT_READY_10BIT {
                return Err(DecodeError::NotReady(signal));
            }
            let raw_current = signed_upper_11(data[0], data[1]);
            Reading::Battery {
                current_a: f32::from(raw_current) * CURRENT_SCALE_A,
                voltage_v: f32::from(raw_voltage) * VOLTAGE_SCALE_V,
            }
        }
    };

    Ok(Some(reading))
}
