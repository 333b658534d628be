//! Display backend trait
//!
//! Defines the interface the renderer draws through.

use core::future::Future;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::Communication => f.write_str("display communication failed"),
            DisplayError::InvalidCoordinates => f.write_str("drawing outside the display"),
        }
    }
}

/// Font size class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// 6 px wide glyphs, 21 characters per line
    Small,
    /// Large glyphs for the SOC indicator
    Large,
}

/// Display backend trait
///
/// Drawing goes into a frame buffer; nothing reaches the panel until
/// [`flush`](DisplayBackend::flush). Coordinates are pixels from the top
/// left corner.
pub trait DisplayBackend {
    /// Clear the frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at (`x`, `y`)
    fn draw_text(&mut self, x: u16, y: u16, size: TextSize, text: &str)
        -> Result<(), DisplayError>;

    /// Draw a rectangle outline, or a solid one if `filled`
    fn draw_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        filled: bool,
    ) -> Result<(), DisplayError>;

    /// Swap lit and dark pixels across the whole panel
    fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError>;

    /// Send the frame buffer to the panel
    fn flush(&mut self) -> impl Future<Output = Result<(), DisplayError>>;

    /// Panel size in pixels (width, height)
    fn pixel_dimensions(&self) -> (u16, u16);
}
