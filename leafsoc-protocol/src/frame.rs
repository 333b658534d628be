//! Bus frames as delivered by the CAN controller

use embedded_can::{Frame, Id, StandardId};
use heapless::Vec;

/// Classic CAN carries at most 8 data bytes
pub const MAX_DATA_LEN: usize = 8;

/// A received data frame
///
/// Remote frames are never constructed; the display only listens.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusFrame {
    id: Id,
    data: Vec<u8, MAX_DATA_LEN>,
}

impl BusFrame {
    /// Build a frame with a standard (11-bit) identifier
    ///
    /// Returns `None` if the identifier exceeds 11 bits or the payload
    /// exceeds 8 bytes.
    pub fn standard(raw_id: u16, data: &[u8]) -> Option<Self> {
        let id = StandardId::new(raw_id)?;
        <Self as Frame>::new(id, data)
    }

    /// Raw standard identifier, or `None` for extended frames
    pub fn standard_id(&self) -> Option<u16> {
        match self.id {
            Id::Standard(id) => Some(id.as_raw()),
            Id::Extended(_) => None,
        }
    }
}

impl Frame for BusFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let mut payload = Vec::new();
        payload.extend_from_slice(data).ok()?;
        Some(Self {
            id: id.into(),
            data: payload,
        })
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.data.len()
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}
