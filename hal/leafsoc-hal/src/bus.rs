//! Vehicle bus reception

use leafsoc_protocol::BusFrame;

/// Errors from the bus controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// SPI transfer to the bus controller failed
    Spi,
    /// Frames were lost because receive buffers filled up
    Overrun,
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BusError::Spi => f.write_str("bus controller transfer failed"),
            BusError::Overrun => f.write_str("bus receive overrun"),
        }
    }
}

/// Non-blocking frame source
///
/// Called repeatedly each cycle until it returns `Ok(None)`.
pub trait BusReceiver {
    /// Take the next pending frame, if any
    fn try_receive(&mut self) -> Result<Option<BusFrame>, BusError>;
}
