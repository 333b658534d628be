//! EV-CAN signal identifiers and scaling constants

/// Lithium battery controller: remaining capacity in Gids
pub const ID_GIDS: u16 = 0x5BC;

/// Lithium battery controller: state of charge in 0.1 %
pub const ID_SOC_PERCENT: u16 = 0x55B;

/// Lithium battery controller: pack current and voltage
pub const ID_BATTERY_POWER: u16 = 0x1DB;

/// 10-bit "value not available yet" marker
pub const NOT_READY_10BIT: u16 = 0x3FF;

/// SOC signal resolution (% per bit)
pub const SOC_PERCENT_SCALE: f32 = 0.1;

/// Pack current resolution (A per bit)
pub const CURRENT_SCALE_A: f32 = 0.5;

/// Pack voltage resolution (V per bit)
pub const VOLTAGE_SCALE_V: f32 = 0.5;

/// Signals the display understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    /// Remaining capacity in Gids
    Gids,
    /// State of charge as reported by the battery controller
    SocPercent,
    /// Pack current and voltage (power is derived)
    BatteryPower,
}

impl Signal {
    /// Look up the signal carried by a standard identifier
    pub fn from_id(id: u16) -> Option<Self> {
        match id {
            ID_GIDS => Some(Signal::Gids),
            ID_SOC_PERCENT => Some(Signal::SocPercent),
            ID_BATTERY_POWER => Some(Signal::BatteryPower),
            _ => None,
        }
    }

    /// Standard identifier carrying this signal
    pub const fn id(self) -> u16 {
        match self {
            Signal::Gids => ID_GIDS,
            Signal::SocPercent => ID_SOC_PERCENT,
            Signal::BatteryPower => ID_BATTERY_POWER,
        }
    }

    /// Minimum payload length needed to decode this signal
    pub const fn min_len(self) -> usize {
        match self {
            Signal::Gids | Signal::SocPercent => 2,
            Signal::BatteryPower => 4,
        }
    }
}

/// Upper 10 bits spread across two bytes: `hi << 2 | lo >> 6`
pub(crate) fn upper_10(hi: u8, lo: u8) -> u16 {
    (u16::from(hi) << 2) | (u16::from(lo) >> 6)
}

/// Upper 11 bits spread across two bytes, sign-extended from bit 10
pub(crate) fn signed_upper_11(hi: u8, lo: u8) -> i16 {
    let raw = (u16::from(hi) << 3) | (u16::from(lo) >> 5);
    if raw & 0x0400 != 0 {
        (raw | 0xF800) as i16
    } else {
        raw as i16
    }
}
