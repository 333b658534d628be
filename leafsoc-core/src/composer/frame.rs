//! Display frame types
//!
//! A frame is everything the renderer needs for one refresh: the large SOC
//! indicator, the secondary text rows and whether the alert is active.

use core::fmt::Write;

use heapless::String;

/// Characters per secondary row (128 px / 6 px font)
pub const LINE_LEN: usize = 21;

/// Rows in the secondary text region
pub const SECONDARY_ROWS: usize = 3;

/// One secondary text row
pub type Line = String<LINE_LEN>;

/// Content of the large indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Primary {
    /// Normalized SOC from Gids, whole percent
    Soc(u8),
    /// SOC reported by the battery controller, shown until Gids arrive
    Provisional(u8),
    /// Nothing received yet
    NoData,
}

impl Primary {
    /// Percentage to fill the battery glyph with
    pub fn percent(&self) -> Option<u8> {
        match *self {
            Primary::Soc(p) | Primary::Provisional(p) => Some(p),
            Primary::NoData => None,
        }
    }

    /// Large indicator text: `50%`, `~50%` or `--`
    pub fn text(&self) -> String<5> {
        let mut s = String::new();
        let _ = match *self {
            Primary::Soc(p) => write!(s, "{}%", p),
            Primary::Provisional(p) => write!(s, "~{}%", p),
            Primary::NoData => s.write_str("--"),
        };
        s
    }
}

/// Low-battery alert details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alert {
    pub raw_gids: u16,
    pub gids_to_floor: u16,
    pub gids_below_floor: u16,
}

/// Everything shown in one refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    pub primary: Primary,
    /// Selected page, unaffected by the alert
    pub page: u8,
    pub rows: [Line; SECONDARY_ROWS],
    pub alert: Option<Alert>,
}

impl DisplayFrame {
    /// Empty frame showing the placeholder indicator
    pub fn new(page: u8) -> Self {
        Self {
            primary: Primary::NoData,
            page,
            rows: core::array::from_fn(|_| String::new()),
            alert: None,
        }
    }

    /// Secondary region is drawn inverted while the alert is active
    pub fn is_inverted(&self) -> bool {
        self.alert.is_some()
    }

    /// Text of a secondary row (empty when out of range)
    pub fn row(&self, index: usize) -> &str {
        self.rows.get(index).map(|s| s.as_str()).unwrap_or("")
    }

    /// Replace a row, truncating to the line length
    pub fn set_row(&mut self, index: usize, text: &str) {
        if let Some(line) = self.rows.get_mut(index) {
            line.clear();
            let _ = line.push_str(truncate(text, LINE_LEN));
        }
    }
}

/// Cut `text` to at most `max` bytes on a char boundary
pub(crate) fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
