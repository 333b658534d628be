//! LeafSOC - Battery State-of-Charge Display Firmware
//!
//! Listens to the Nissan LEAF EV-CAN bus through an MCP2515, turns the
//! battery's Gids count into a calibrated SOC and shows it on an SH1106
//! OLED. A push button pages through secondary information; holding it
//! restarts the display on the first page.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::spi::{self, Spi};
use embassy_time::{Duration, Instant, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use {defmt_rtt as _, panic_probe as _};

use leafsoc_core::Dashboard;
use leafsoc_display::{render_splash, DisplayBackend};
use leafsoc_drivers::{sh1106, Mcp2515, Sh1106};
use leafsoc_hal::ActiveLowButton;
use leafsoc_hal_rp2040::{flash_storage, PullUpInput};

use crate::board::{CanController, Oled, PageButton, PageStore, CAN_SPI_HZ, DISPLAY_I2C_HZ};

mod board;
mod config;
mod cycle;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// How long the boot screen stays up
const SPLASH_TIME: Duration = Duration::from_secs(1);

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("LeafSOC firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Display first so the splash is up while everything else starts
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = DISPLAY_I2C_HZ;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);
    let mut display: Oled = Sh1106::new(i2c, sh1106::DEFAULT_ADDRESS);
    if let Err(e) = display.init().await {
        warn!("Display init failed: {}", e);
    }
    if let Err(e) = render_splash(&mut display, env!("CARGO_PKG_VERSION")) {
        warn!("Splash render failed: {}", e);
    }
    if let Err(e) = display.flush().await {
        warn!("Splash flush failed: {}", e);
    }
    let splash_until = Instant::now() + SPLASH_TIME;

    let mut spi_config = spi::Config::default();
    spi_config.frequency = CAN_SPI_HZ;
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let device = match ExclusiveDevice::new_no_delay(spi, cs) {
        Ok(device) => device,
        Err(e) => match e {},
    };
    let mut can: CanController = Mcp2515::new(device);
    match can.init(config::CAN_TIMING) {
        Ok(()) => info!("MCP2515 listening ({})", config::CAN_TIMING),
        Err(e) => error!("MCP2515 init failed: {}", e),
    }

    let storage: PageStore = flash_storage(p.FLASH, p.DMA_CH0);
    let dashboard = Dashboard::new(config::CONFIG, storage).await;
    match dashboard.pages().last_storage_error() {
        None => info!("Restored page {}", dashboard.current_page()),
        Some(e) => warn!("Saved page unreadable ({}), starting on page 0", e),
    }

    let button: PageButton = ActiveLowButton::new(PullUpInput::new(p.PIN_15));

    Timer::at(splash_until).await;

    cycle::run(
        dashboard,
        can,
        display,
        button,
        Duration::from_millis(config::CYCLE_MS),
    )
    .await
}
