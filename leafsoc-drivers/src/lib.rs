//! Hardware driver implementations
//!
//! Concrete implementations of the collaborator traits:
//!
//! - MCP2515 CAN controller as a `BusReceiver` (SPI)
//! - SH1106 128x64 OLED as a `DisplayBackend` (I2C)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod mcp2515;
pub mod sh1106;

pub use mcp2515::{BitTiming, Mcp2515};
pub use sh1106::Sh1106;
