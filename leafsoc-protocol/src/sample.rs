//! Latest-value telemetry cache
//!
//! One sample exists for the whole session. Each decoded frame overwrites
//! the fields it carries; nothing is buffered.

use embedded_can::Frame;

use crate::decoder::{decode, DecodeOutcome, Reading};
use crate::signals::Signal;
use crate::units::Gids;

/// Pack power figures, all from the same frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerReading {
    pub power_kw: f32,
    pub current_a: f32,
    pub voltage_v: f32,
}

/// Most recent value of every signal
///
/// The `*_valid` flags start false and latch true on the first good decode
/// of their signal. Until then the matching values are meaningless zeros
/// and the accessors return `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetrySample {
    pub raw_gids: Gids,
    pub gids_valid: bool,
    pub soc_percent: f32,
    pub soc_percent_valid: bool,
    pub power_kw: f32,
    pub current_a: f32,
    pub voltage_v: f32,
    pub power_valid: bool,
}

impl Default for TelemetrySample {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySample {
    /// Empty sample, nothing decoded yet
    pub const fn new() -> Self {
        Self {
            raw_gids: Gids::ZERO,
            gids_valid: false,
            soc_percent: 0.0,
            soc_percent_valid: false,
            power_kw: 0.0,
            current_a: 0.0,
            voltage_v: 0.0,
            power_valid: false,
        }
    }

    /// Raw Gids, once any have been received
    pub fn gids(&self) -> Option<Gids> {
        self.gids_valid.then_some(self.raw_gids)
    }

    /// Battery controller SOC percent, once received
    pub fn soc_signal(&self) -> Option<f32> {
        self.soc_percent_valid.then_some(self.soc_percent)
    }

    /// Pack power figures, once received
    pub fn power(&self) -> Option<PowerReading> {
        self.power_valid.then_some(PowerReading {
            power_kw: self.power_kw,
            current_a: self.current_a,
            voltage_v: self.voltage_v,
        })
    }

    /// Store a decoded reading
    pub fn update(&mut self, reading: Reading) -> Signal {
        match reading {
            Reading::Gids(gids) => {
                self.raw_gids = gids;
                self.gids_valid = true;
                Signal::Gids
            }
            Reading::SocPercent(pct) => {
                self.soc_percent = pct;
                self.soc_percent_valid = true;
                Signal::SocPercent
            }
            Reading::Battery {
                current_a,
                voltage_v,
            } => {
                self.current_a = current_a;
                self.voltage_v = voltage_v;
                self.power_kw = voltage_v * current_a / 1000.0;
                self.power_valid = true;
                Signal::BatteryPower
            }
        }
    }

    /// Decode a frame and fold it into the sample
    pub fn apply<F: Frame>(&mut self, frame: &F) -> DecodeOutcome {
        match decode(frame) {
            Ok(Some(reading)) => DecodeOutcome::Updated(self.update(reading)),
            Ok(None) => DecodeOutcome::Ignored,
            Err(e) => DecodeOutcome::Dropped(e),
        }
    }
}
