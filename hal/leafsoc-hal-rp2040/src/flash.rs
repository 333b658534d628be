//! Flash storage for RP2040
//!
//! The last two 4 KB sectors of flash hold a wear-leveled key-value map
//! of byte slots. `memory.x` keeps the program out of them.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use leafsoc_hal::MapStorage;

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const STORAGE_SIZE: usize = 2 * ERASE_SIZE;
pub const STORAGE_START: usize = FLASH_SIZE - STORAGE_SIZE;

/// Flash range for the byte map
pub const STORAGE_RANGE: core::ops::Range<u32> = (STORAGE_START as u32)..(FLASH_SIZE as u32);

/// Byte storage on the reserved sectors
pub type FlashStorage<'d> = MapStorage<Flash<'d, FLASH, Async, FLASH_SIZE>>;

/// Open the byte storage sectors
pub fn flash_storage<'d>(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> FlashStorage<'d> {
    MapStorage::new(Flash::new(flash, dma), STORAGE_RANGE)
}
