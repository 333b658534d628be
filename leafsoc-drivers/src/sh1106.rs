//! SH1106 OLED display driver
//!
//! Driver for 128x64 SH1106-based OLED displays via I2C. Drawing happens in
//! a local frame buffer through embedded-graphics; `flush` sends it page by
//! page.

use core::convert::Infallible;
use core::future::Future;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal_async::i2c::I2c;
use leafsoc_display::{DisplayBackend, DisplayError, TextSize};

/// SH1106 I2C address (typically 0x3C or 0x3D)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// The controller has 132 columns; the glass starts at column 2
const COLUMN_OFFSET: u8 = 2;

/// SH1106 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Control byte prefixes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SH1106 OLED driver
pub struct Sh1106<I2C> {
    i2c: I2C,
    address: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
    /// Requested inversion
    inverted: bool,
    /// Inversion last sent to the panel
    applied_inversion: Option<bool>,
}

impl<I2C> Sh1106<I2C> {
    /// Create a new SH1106 driver
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [[0; WIDTH]; PAGES],
            inverted: false,
            applied_inversion: None,
        }
    }

    /// Light or clear one pixel; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let bit = 1u8 << (y % 8);
        let cell = &mut self.buffer[y / 8][x];
        if on {
            *cell |= bit;
        } else {
            *cell &= !bit;
        }
    }

    /// Check if a pixel is lit in the frame buffer
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    fn check_origin(x: u16, y: u16) -> Result<Point, DisplayError> {
        if usize::from(x) >= WIDTH || usize::from(y) >= HEIGHT {
            return Err(DisplayError::InvalidCoordinates);
        }
        Ok(Point::new(i32::from(x), i32::from(y)))
    }
}

impl<I2C: I2c> Sh1106<I2C> {
    /// Initialize the display
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14,                  // Enable charge pump
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF, // High contrast
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c).await?;
        }
        self.applied_inversion = Some(false);

        Ok(())
    }

    /// Send a command to the display
    async fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, cmd])
            .await
            .map_err(|_| DisplayError::Communication)
    }

    async fn write_buffer(&mut self) -> Result<(), DisplayError> {
        if self.applied_inversion != Some(self.inverted) {
            let c = if self.inverted {
                cmd::SET_INVERSE
            } else {
                cmd::SET_NORMAL
            };
            self.command(c).await?;
            self.applied_inversion = Some(self.inverted);
        }

        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8).await?;
            self.command(cmd::SET_LOW_COLUMN | COLUMN_OFFSET).await?;
            self.command(cmd::SET_HIGH_COLUMN).await?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c
                .write(self.address, &data)
                .await
                .map_err(|_| DisplayError::Communication)?;
        }

        Ok(())
    }

    /// Set display contrast (0-255)
    pub async fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.command(cmd::SET_CONTRAST).await?;
        self.command(contrast).await
    }
}

impl<I2C> OriginDimensions for Sh1106<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C> DrawTarget for Sh1106<I2C> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0 && coord.y >= 0 {
                self.set_pixel(coord.x as usize, coord.y as usize, color.is_on());
            }
        }
        Ok(())
    }
}

impl<I2C: I2c> DisplayBackend for Sh1106<I2C> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        size: TextSize,
        text: &str,
    ) -> Result<(), DisplayError> {
        let origin = Self::check_origin(x, y)?;
        let style = match size {
            TextSize::Small => MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
            TextSize::Large => MonoTextStyle::new(&FONT_10X20, BinaryColor::On),
        };
        Text::with_baseline(text, origin, style, Baseline::Top)
            .draw(self)
            .map_err(|e| match e {})?;
        Ok(())
    }

    fn draw_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        filled: bool,
    ) -> Result<(), DisplayError> {
        let origin = Self::check_origin(x, y)?;
        let style = if filled {
            PrimitiveStyle::with_fill(BinaryColor::On)
        } else {
            PrimitiveStyle::with_stroke(BinaryColor::On, 1)
        };
        Rectangle::new(origin, Size::new(u32::from(width), u32::from(height)))
            .into_styled(style)
            .draw(self)
            .map_err(|e| match e {})
    }

    fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.inverted = inverted;
        Ok(())
    }

    fn flush(&mut self) -> impl Future<Output = Result<(), DisplayError>> {
        self.write_buffer()
    }

    fn pixel_dimensions(&self) -> (u16, u16) {
        (WIDTH as u16, HEIGHT as u16)
    }
}
