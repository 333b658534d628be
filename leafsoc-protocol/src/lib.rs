//! Nissan LEAF EV-CAN telemetry protocol
//!
//! This crate turns raw bus frames into the battery signals the display
//! needs. It knows nothing about calibration or presentation.
//!
//! # Signals
//!
//! ```text
//! ┌───────┬──────────────────┬─────────────────────────────┬────────┐
//! │ ID    │ SIGNAL           │ BITS                        │ SCALE  │
//! ├───────┼──────────────────┼─────────────────────────────┼────────┤
//! │ 0x5BC │ Gids             │ d0<<2 | d1>>6   (10 bit)    │ 1 Gid  │
//! │ 0x55B │ SOC percent      │ d0<<2 | d1>>6   (10 bit)    │ 0.1 %  │
//! │ 0x1DB │ Battery current  │ d0<<3 | d1>>5   (11 bit, ±) │ 0.5 A  │
//! │ 0x1DB │ Battery voltage  │ d2<<2 | d3>>6   (10 bit)    │ 0.5 V  │
//! └───────┴──────────────────┴─────────────────────────────┴────────┘
//! ```
//!
//! A 10-bit field of all ones (0x3FF) means the battery controller has not
//! produced the value yet.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod decoder;
pub mod frame;
pub mod sample;
pub mod signals;
pub mod units;

pub use decoder::{decode, DecodeError, DecodeOutcome, Reading};
pub use frame::{BusFrame, MAX_DATA_LEN};
pub use sample::{PowerReading, TelemetrySample};
pub use signals::Signal;
pub use units::Gids;
