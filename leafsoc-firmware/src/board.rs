//! Board wiring for a Raspberry Pi Pico
//!
//! | Function        | Pin   |
//! |-----------------|-------|
//! | MCP2515 SCK     | GP18  |
//! | MCP2515 MOSI    | GP19  |
//! | MCP2515 MISO    | GP16  |
//! | MCP2515 CS      | GP17  |
//! | SH1106 SDA      | GP4   |
//! | SH1106 SCL      | GP5   |
//! | Page button     | GP15 (to ground) |

use embassy_rp::gpio::Output;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, SPI0};
use embassy_rp::spi::{Blocking, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use leafsoc_drivers::{Mcp2515, Sh1106};
use leafsoc_hal::ActiveLowButton;
use leafsoc_hal_rp2040::{FlashStorage, PullUpInput};

/// MCP2515 SPI clock; the part tops out at 10 MHz
pub const CAN_SPI_HZ: u32 = 8_000_000;

/// SH1106 I2C clock
pub const DISPLAY_I2C_HZ: u32 = 400_000;

pub type CanController =
    Mcp2515<ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>>;

pub type Oled = Sh1106<I2c<'static, I2C0, i2c::Async>>;

pub type PageButton = ActiveLowButton<PullUpInput<'static>>;

/// Where the page index lives
pub type PageStore = FlashStorage<'static>;
