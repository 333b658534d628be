//! MCP2515 CAN controller
//!
//! Stand-alone CAN controller on SPI. The display only listens to the car,
//! so the controller runs in listen-only mode: it never acknowledges or
//! transmits on the bus.

use embedded_can::{ExtendedId, Frame, Id, StandardId};
use embedded_hal::spi::{Operation, SpiDevice};
use leafsoc_hal::{BusError, BusReceiver};
use leafsoc_protocol::BusFrame;

/// SPI instructions
#[allow(dead_code)]
mod instr {
    pub const RESET: u8 = 0xC0;
    pub const READ: u8 = 0x03;
    pub const WRITE: u8 = 0x02;
    pub const BIT_MODIFY: u8 = 0x05;
    pub const READ_STATUS: u8 = 0xA0;
    /// Read RXB0 starting at SIDH; clears RX0IF
    pub const READ_RXB0: u8 = 0x90;
    /// Read RXB1 starting at SIDH; clears RX1IF
    pub const READ_RXB1: u8 = 0x94;
}

/// Register addresses
#[allow(dead_code)]
mod reg {
    pub const CANSTAT: u8 = 0x0E;
    pub const CANCTRL: u8 = 0x0F;
    pub const CNF3: u8 = 0x28;
    pub const CNF2: u8 = 0x29;
    pub const CNF1: u8 = 0x2A;
    pub const CANINTE: u8 = 0x2B;
    pub const CANINTF: u8 = 0x2C;
    pub const EFLG: u8 = 0x2D;
    pub const RXB0CTRL: u8 = 0x60;
    pub const RXB1CTRL: u8 = 0x70;
}

/// Operating modes (CANCTRL/CANSTAT bits 7:5)
mod mode {
    pub const MASK: u8 = 0xE0;
    pub const LISTEN_ONLY: u8 = 0x60;
    pub const CONFIG: u8 = 0x80;
}

const STATUS_RX0IF: u8 = 0x01;
const STATUS_RX1IF: u8 = 0x02;
const EFLG_RX0OVR: u8 = 0x40;
const EFLG_RX1OVR: u8 = 0x80;
/// Accept every frame, ignore filters
const RXM_ANY: u8 = 0x60;
/// Roll RXB0 over into RXB1 when full
const RXB0_BUKT: u8 = 0x04;

const SIDL_IDE: u8 = 0x08;
const SIDL_SRR: u8 = 0x10;
const DLC_MASK: u8 = 0x0F;

/// SIDH, SIDL, EID8, EID0, DLC, D0..D7
pub const RX_BUFFER_LEN: usize = 13;

/// How many times to poll CANSTAT for a mode change
const MODE_POLLS: usize = 32;

/// CNF1..3 bit timing register values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTiming {
    pub cnf1: u8,
    pub cnf2: u8,
    pub cnf3: u8,
}

impl BitTiming {
    /// 500 kbit/s (EV-CAN) with an 8 MHz crystal
    pub const KBPS500_8MHZ: BitTiming = BitTiming {
        cnf1: 0x00,
        cnf2: 0x90,
        cnf3: 0x02,
    };

    /// 500 kbit/s with a 16 MHz crystal
    pub const KBPS500_16MHZ: BitTiming = BitTiming {
        cnf1: 0x00,
        cnf2: 0xF0,
        cnf3: 0x86,
    };
}

/// MCP2515 driver
pub struct Mcp2515<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Mcp2515<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Reset the controller and start listening at `timing`
    pub fn init(&mut self, timing: BitTiming) -> Result<(), BusError> {
        self.spi.write(&[instr::RESET]).map_err(|_| BusError::Spi)?;
        self.wait_for_mode(mode::CONFIG)?;

        self.write_register(reg::CNF1, timing.cnf1)?;
        self.write_register(reg::CNF2, timing.cnf2)?;
        self.write_register(reg::CNF3, timing.cnf3)?;
        // Polled, no interrupt pin
        self.write_register(reg::CANINTE, 0x00)?;
        self.write_register(reg::RXB0CTRL, RXM_ANY | RXB0_BUKT)?;
        self.write_register(reg::RXB1CTRL, RXM_ANY)?;

        self.bit_modify(reg::CANCTRL, mode::MASK, mode::LISTEN_ONLY)?;
        self.wait_for_mode(mode::LISTEN_ONLY)
    }

    fn wait_for_mode(&mut self, wanted: u8) -> Result<(), BusError> {
        for _ in 0..MODE_POLLS {
            if self.read_register(reg::CANSTAT)? & mode::MASK == wanted {
                return Ok(());
            }
        }
        Err(BusError::Spi)
    }

    fn read_register(&mut self, address: u8) -> Result<u8, BusError> {
        let mut value = [0u8];
        self.spi
            .transaction(&mut [
                Operation::Write(&[instr::READ, address]),
                Operation::Read(&mut value),
            ])
            .map_err(|_| BusError::Spi)?;
        Ok(value[0])
    }

    fn write_register(&mut self, address: u8, value: u8) -> Result<(), BusError> {
        self.spi
            .write(&[instr::WRITE, address, value])
            .map_err(|_| BusError::Spi)
    }

    fn bit_modify(&mut self, address: u8, mask: u8, value: u8) -> Result<(), BusError> {
        self.spi
            .write(&[instr::BIT_MODIFY, address, mask, value])
            .map_err(|_| BusError::Spi)
    }

    fn read_status(&mut self) -> Result<u8, BusError> {
        let mut status = [0u8];
        self.spi
            .transaction(&mut [
                Operation::Write(&[instr::READ_STATUS]),
                Operation::Read(&mut status),
            ])
            .map_err(|_| BusError::Spi)?;
        Ok(status[0])
    }

    fn read_rx_buffer(&mut self, instruction: u8) -> Result<[u8; RX_BUFFER_LEN], BusError> {
        let mut raw = [0u8; RX_BUFFER_LEN];
        self.spi
            .transaction(&mut [Operation::Write(&[instruction]), Operation::Read(&mut raw)])
            .map_err(|_| BusError::Spi)?;
        Ok(raw)
    }
}

impl<SPI: SpiDevice> BusReceiver for Mcp2515<SPI> {
    fn try_receive(&mut self) -> Result<Option<BusFrame>, BusError> {
        loop {
            let status = self.read_status()?;
            let instruction = if status & STATUS_RX0IF != 0 {
                instr::READ_RXB0
            } else if status & STATUS_RX1IF != 0 {
                instr::READ_RXB1
            } else {
                break;
            };

            let raw = self.read_rx_buffer(instruction)?;
            // Remote frames carry no data; skip to the next buffer
            if let Some(frame) = parse_rx_buffer(&raw) {
                return Ok(Some(frame));
            }
        }

        let eflg = self.read_register(reg::EFLG)?;
        if eflg & (EFLG_RX0OVR | EFLG_RX1OVR) != 0 {
            self.bit_modify(reg::EFLG, EFLG_RX0OVR | EFLG_RX1OVR, 0)?;
            return Err(BusError::Overrun);
        }
        Ok(None)
    }
}

/// Decode a receive buffer read with READ RX BUFFER
///
/// Returns `None` for remote frames.
pub fn parse_rx_buffer(raw: &[u8; RX_BUFFER_LEN]) -> Option<BusFrame> {
    let sidh = raw[0];
    let sidl = raw[1];
    let dlc = usize::from(raw[4] & DLC_MASK).min(8);

    let standard = (u16::from(sidh) << 3) | u16::from(sidl >> 5);
    let id: Id = if sidl & SIDL_IDE != 0 {
        if raw[4] & 0x40 != 0 {
            return None;
        }
        let extended = (u32::from(standard) << 18)
            | (u32::from(sidl & 0x03) << 16)
            | (u32::from(raw[2]) << 8)
            | u32::from(raw[3]);
        ExtendedId::new(extended)?.into()
    } else {
        if sidl & SIDL_SRR != 0 {
            return None;
        }
        StandardId::new(standard)?.into()
    };

    BusFrame::new(id, &raw[5..5 + dlc])
}
