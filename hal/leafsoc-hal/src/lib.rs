//! LeafSOC Hardware Abstraction Layer
//!
//! This crate defines the narrow interfaces between the display logic and
//! the hardware it runs on. Chip-specific crates implement them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (leafsoc-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  leafsoc-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ leafsoc-hal-  │       │ leafsoc-      │
//! │    rp2040     │       │   drivers     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`storage::ByteStorage`] - Byte-addressed persistent storage
//!   ([`flash::MapStorage`] provides it on NOR flash)
//! - [`gpio::InputPin`] - Digital input (page button)
//! - [`bus::BusReceiver`] - Non-blocking CAN frame reception

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod flash;
pub mod gpio;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use bus::{BusError, BusReceiver};
pub use flash::MapStorage;
pub use gpio::{ActiveLowButton, InputPin};
pub use storage::{ByteStorage, RamStorage, StorageError};
