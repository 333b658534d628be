//! Frame rendering
//!
//! Draws composed frames onto a [`DisplayBackend`]. Callers flush the
//! backend afterwards.

use leafsoc_core::composer::{DisplayFrame, Primary};

use crate::backend::{DisplayBackend, DisplayError, TextSize};
use crate::layout::*;

/// Product name on the boot screen
pub const PRODUCT_NAME: &str = "LeafSOC";

/// Draw a complete frame
///
/// The whole panel is inverted while the frame carries a low-charge alert.
pub fn render_frame<D: DisplayBackend>(
    display: &mut D,
    frame: &DisplayFrame,
) -> Result<(), DisplayError> {
    display.clear()?;

    draw_battery(display, frame.primary)?;
    display.draw_text(
        PRIMARY_TEXT_X,
        PRIMARY_TEXT_Y,
        TextSize::Large,
        &frame.primary.text(),
    )?;

    for (i, row) in frame.rows.iter().enumerate() {
        if !row.is_empty() {
            display.draw_text(ROW_X, row_y(i), TextSize::Small, row)?;
        }
    }

    display.set_inverted(frame.is_inverted())
}

/// Boot screen with the product name and firmware version
pub fn render_splash<D: DisplayBackend>(display: &mut D, version: &str) -> Result<(), DisplayError> {
    display.clear()?;
    display.set_inverted(false)?;
    display.draw_text(24, 12, TextSize::Large, PRODUCT_NAME)?;
    display.draw_text(24, 40, TextSize::Small, "v")?;
    display.draw_text(30, 40, TextSize::Small, version)
}

fn draw_battery<D: DisplayBackend>(display: &mut D, primary: Primary) -> Result<(), DisplayError> {
    display.draw_rect(BATTERY_X, BATTERY_Y, BATTERY_WIDTH, BATTERY_HEIGHT, false)?;
    display.draw_rect(
        BATTERY_X + BATTERY_WIDTH,
        BATTERY_Y + (BATTERY_HEIGHT - NUB_HEIGHT) / 2,
        NUB_WIDTH,
        NUB_HEIGHT,
        true,
    )?;

    let width = primary.percent().map(fill_width).unwrap_or(0);
    if width > 0 {
        display.draw_rect(
            BATTERY_X + FILL_INSET,
            BATTERY_Y + FILL_INSET,
            width,
            BATTERY_HEIGHT - 2 * FILL_INSET,
            true,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::future::Future;
    use leafsoc_core::composer::{Alert, DisplayFrame};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Text(u16, u16, TextSize, String),
        Rect(u16, u16, u16, u16, bool),
        Inverted(bool),
    }

    #[derive(Default)]
    struct RecordingBackend {
        ops: Vec<Op>,
    }

    impl RecordingBackend {
        fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(_, _, _, s) => Some(s.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn filled_rects(&self) -> Vec<(u16, u16, u16, u16)> {
            self.ops
                .iter()
                .filter_map(|op| match *op {
                    Op::Rect(x, y, w, h, true) => Some((x, y, w, h)),
                    _ => None,
                })
                .collect()
        }

        fn last_inverted(&self) -> Option<bool> {
            self.ops.iter().rev().find_map(|op| match op {
                Op::Inverted(v) => Some(*v),
                _ => None,
            })
        }
    }

    impl DisplayBackend for RecordingBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.ops.push(Op::Clear);
            Ok(())
        }

        fn draw_text(
            &mut self,
            x: u16,
            y: u16,
            size: TextSize,
            text: &str,
        ) -> Result<(), DisplayError> {
            self.ops.push(Op::Text(x, y, size, text.to_string()));
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
            self.ops.push(Op::Rect(x, y, width, height, filled));
            Ok(())
        }

        fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
            self.ops.push(Op::Inverted(inverted));
            Ok(())
        }

        fn flush(&mut self) -> impl Future<Output = Result<(), DisplayError>> {
            core::future::ready(Ok(()))
        }

        fn pixel_dimensions(&self) -> (u16, u16) {
            (WIDTH, HEIGHT)
        }
    }

    fn frame(primary: Primary) -> DisplayFrame {
        let mut frame = DisplayFrame::new(0);
        frame.primary = primary;
        frame.set_row(0, "150 Gids");
        frame.set_row(1, "12.0 kWh 3.5 kW");
        frame
    }

    #[test]
    fn test_render_starts_with_clear() {
        let mut display = RecordingBackend::default();
        render_frame(&mut display, &frame(Primary::Soc(50))).unwrap();
        assert_eq!(display.ops.first(), Some(&Op::Clear));
    }

    #[test]
    fn test_render_text() {
        let mut display = RecordingBackend::default();
        render_frame(&mut display, &frame(Primary::Soc(50))).unwrap();
        assert_eq!(display.texts(), vec!["50%", "150 Gids", "12.0 kWh 3.5 kW"]);
        assert!(display.ops.contains(&Op::Text(
            ROW_X,
            row_y(1),
            TextSize::Small,
            "12.0 kWh 3.5 kW".to_string()
        )));
    }

    #[test]
    fn test_fill_follows_soc() {
        let mut display = RecordingBackend::default();
        render_frame(&mut display, &frame(Primary::Soc(50))).unwrap();
        // Nub plus fill
        let filled = display.filled_rects();
        assert_eq!(filled.len(), 2);
        assert_eq!(filled[1].2, fill_width(50));

        let mut empty = RecordingBackend::default();
        render_frame(&mut empty, &frame(Primary::NoData)).unwrap();
        assert_eq!(empty.filled_rects().len(), 1);
        assert_eq!(empty.texts()[0], "--");
    }

    #[test]
    fn test_inverted_iff_alert() {
        let mut display = RecordingBackend::default();
        render_frame(&mut display, &frame(Primary::Soc(50))).unwrap();
        assert_eq!(display.last_inverted(), Some(false));

        let mut alert_frame = frame(Primary::Soc(5));
        alert_frame.alert = Some(Alert {
            raw_gids: 18,
            gids_to_floor: 10,
            gids_below_floor: 0,
        });
        let mut display = RecordingBackend::default();
        render_frame(&mut display, &alert_frame).unwrap();
        assert_eq!(display.last_inverted(), Some(true));
    }

    #[test]
    fn test_splash() {
        let mut display = RecordingBackend::default();
        render_splash(&mut display, "0.1.0").unwrap();
        assert_eq!(display.texts(), vec![PRODUCT_NAME, "v", "0.1.0"]);
        assert_eq!(display.last_inverted(), Some(false));
    }
}
