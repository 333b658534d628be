//! Screen layout for a 128x64 panel
//!
//! ```text
//!  +--------------------------+-+
//!  |##########                | |   50%
//!  +--------------------------+-+
//!  secondary row 0
//!  secondary row 1
//!  secondary row 2
//! ```

/// Panel width in pixels
pub const WIDTH: u16 = 128;
/// Panel height in pixels
pub const HEIGHT: u16 = 64;

/// Battery body outline
pub const BATTERY_X: u16 = 0;
pub const BATTERY_Y: u16 = 2;
pub const BATTERY_WIDTH: u16 = 60;
pub const BATTERY_HEIGHT: u16 = 28;

/// Terminal nub on the right of the body
pub const NUB_WIDTH: u16 = 4;
pub const NUB_HEIGHT: u16 = 12;

/// Gap between the outline and the charge fill
pub const FILL_INSET: u16 = 2;

/// Large SOC text
pub const PRIMARY_TEXT_X: u16 = 70;
pub const PRIMARY_TEXT_Y: u16 = 6;

/// Secondary rows
pub const ROW_X: u16 = 0;
pub const FIRST_ROW_Y: u16 = 34;
pub const ROW_HEIGHT: u16 = 10;

/// Width of the charge fill for a percentage
pub fn fill_width(percent: u8) -> u16 {
    let inner = BATTERY_WIDTH - 2 * FILL_INSET;
    inner * u16::from(percent.min(100)) / 100
}

/// Top edge of a secondary row
pub fn row_y(row: usize) -> u16 {
    FIRST_ROW_Y + ROW_HEIGHT * row as u16
}
