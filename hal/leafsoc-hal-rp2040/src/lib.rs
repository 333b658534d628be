//! RP2040-specific HAL for the LeafSOC display firmware
//!
//! This crate provides RP2040 implementations of the shared `leafsoc-hal`
//! traits:
//!
//! - Page button input (implements `leafsoc_hal::InputPin`)
//! - Flash-backed byte storage in the last flash sector
//!   (implements `leafsoc_hal::ByteStorage`)

#![no_std]

pub mod flash;
pub mod gpio;

pub use flash::{flash_storage, FlashStorage};
pub use gpio::PullUpInput;
