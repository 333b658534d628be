//! Display composer
//!
//! Decides what the next frame shows. Pure: the same sample, estimate,
//! page and config always produce the same frame.

pub mod format;
pub mod frame;

pub use format::{alert_line, format_row, FieldSource, PLACEHOLDER};
pub use frame::{Alert, DisplayFrame, Line, Primary, LINE_LEN, SECONDARY_ROWS};

use leafsoc_protocol::TelemetrySample;

use crate::config::DashboardConfig;
use crate::estimator::{is_low, whole_percent, ChargeEstimate};
use crate::pages::page;

/// Build the frame for the current page
pub fn compose(
    sample: &TelemetrySample,
    estimate: Option<&ChargeEstimate>,
    page_index: u8,
    config: &DashboardConfig,
) -> DisplayFrame {
    let mut frame = DisplayFrame::new(page_index);

    frame.primary = match (estimate, sample.soc_signal()) {
        (Some(est), _) => Primary::Soc(est.soc_whole()),
        (None, Some(signal)) => Primary::Provisional(whole_percent(signal)),
        (None, None) => Primary::NoData,
    };

    frame.alert = low_charge_alert(sample, estimate, config);

    let source = FieldSource {
        sample,
        estimate,
        config,
    };
    let rows = page(page_index).rows_for(frame.alert.is_some());

    // The alert owns the first row; the page's alert layout fills the rest
    let skip = match &frame.alert {
        Some(alert) => {
            frame.rows[0] = alert_line(alert);
            1
        }
        None => 0,
    };

    for (slot, fields) in frame.rows.iter_mut().skip(skip).zip(rows.iter()) {
        *slot = format_row(fields, &source);
    }

    frame
}

fn low_charge_alert(
    sample: &TelemetrySample,
    estimate: Option<&ChargeEstimate>,
    config: &DashboardConfig,
) -> Option<Alert> {
    let raw = sample.gids()?;
    let est = estimate?;
    if !is_low(raw, &config.alert) {
        return None;
    }

    Some(Alert {
        raw_gids: raw.whole(),
        gids_to_floor: est.gids_to_floor.whole(),
        gids_below_floor: est.gids_below_floor.whole(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::estimate;
    use crate::pages::PAGE_COUNT;
    use leafsoc_protocol::Gids;

    fn sample_with_gids(raw: f32) -> TelemetrySample {
        let mut sample = TelemetrySample::new();
        sample.raw_gids = Gids::new(raw);
        sample.gids_valid = true;
        sample
    }

    fn compose_for(sample: &TelemetrySample, page: u8) -> DisplayFrame {
        let config = DashboardConfig::DEFAULT;
        let est = estimate(sample, &config.calibration, &config.estimator);
        compose(sample, est.as_ref(), page, &config)
    }

    #[test]
    fn test_no_data_placeholder() {
        let frame = compose_for(&TelemetrySample::new(), 0);
        assert_eq!(frame.primary, Primary::NoData);
        assert_eq!(frame.row(0), "-- Gids");
        assert_eq!(frame.row(1), "-- kWh -- kW");
        assert_eq!(frame.row(2), "");
        assert!(!frame.is_inverted());
    }

    #[test]
    fn test_missing_data_never_shows_zero() {
        let sample = TelemetrySample::new();
        // Constants page shows configuration, not telemetry
        for page_index in 0..PAGE_COUNT - 1 {
            let frame = compose_for(&sample, page_index);
            for row in frame.rows.iter() {
                assert!(!row.contains('0'), "page {} row {:?}", page_index, row);
            }
        }
    }

    #[test]
    fn test_provisional_soc_before_gids() {
        let mut sample = TelemetrySample::new();
        sample.soc_percent = 87.4;
        sample.soc_percent_valid = true;
        let frame = compose_for(&sample, 0);
        assert_eq!(frame.primary, Primary::Provisional(87));
    }

    #[test]
    fn test_gids_override_provisional() {
        let mut sample = sample_with_gids(111.0);
        sample.soc_percent = 87.4;
        sample.soc_percent_valid = true;
        let frame = compose_for(&sample, 0);
        assert_eq!(frame.primary, Primary::Soc(50));
    }

    #[test]
    fn test_page_selects_rows() {
        let mut sample = sample_with_gids(150.0);
        sample.power_kw = -12.0;
        sample.current_a = -32.0;
        sample.voltage_v = 375.0;
        sample.power_valid = true;

        let frame = compose_for(&sample, 2);
        assert_eq!(frame.page, 2);
        assert_eq!(frame.row(0), "-12.0 kW");
        assert_eq!(frame.row(1), "-32.0 A 375 V");
    }

    #[test]
    fn test_alert_boundary_is_exclusive() {
        assert!(compose_for(&sample_with_gids(25.0), 0).alert.is_none());
        assert!(compose_for(&sample_with_gids(24.0), 0).alert.is_some());
    }

    #[test]
    fn test_alert_above_zero_point() {
        let frame = compose_for(&sample_with_gids(20.0), 1);
        assert!(frame.is_inverted());
        assert_eq!(frame.row(0), "20 (12) Gids!");
        // Page 1 keeps its selection; its rows move down
        assert_eq!(frame.page, 1);
        assert_eq!(frame.row(1), "Range 11 km");
        assert_eq!(frame.row(2), "SOC 6%");
    }

    #[test]
    fn test_alert_below_zero_point() {
        let frame = compose_for(&sample_with_gids(5.0), 0);
        assert_eq!(frame.primary, Primary::Soc(0));
        assert_eq!(frame.row(0), "5 (-3) Gids!");
        // Raw Gids already sit in the alert line
        assert_eq!(frame.row(1), "0.4 kWh -- kW");
        assert_eq!(frame.row(2), "");
    }

    #[test]
    fn test_alert_countdown_matches_estimate() {
        let sample = sample_with_gids(20.0);
        let config = DashboardConfig::DEFAULT;
        let mut est = estimate(&sample, &config.calibration, &config.estimator).unwrap();
        est.gids_to_floor = Gids::new(40.0);
        est.gids_below_floor = Gids::new(3.0);

        let frame = compose(&sample, Some(&est), 0, &config);
        let alert = frame.alert.unwrap();
        assert_eq!(alert.raw_gids, 20);
        assert_eq!(alert.gids_to_floor, est.gids_to_floor.whole());
        assert_eq!(alert.gids_below_floor, est.gids_below_floor.whole());
    }

    #[test]
    fn test_no_alert_without_estimate() {
        let sample = sample_with_gids(20.0);
        let frame = compose(&sample, None, 0, &DashboardConfig::DEFAULT);
        assert!(frame.alert.is_none());
        assert_eq!(frame.row(0), "20 Gids");
    }

    #[test]
    fn test_record_page_under_alert_keeps_energy() {
        let frame = compose_for(&sample_with_gids(20.0), 3);
        assert_eq!(frame.row(0), "20 (12) Gids!");
        assert_eq!(frame.row(1), "Range 11 km SOC 6%");
        assert_eq!(frame.row(2), "1.6 kWh Raw --%");
    }

    #[test]
    fn test_constants_page_under_alert_keeps_every_constant() {
        let frame = compose_for(&sample_with_gids(20.0), 4);
        assert_eq!(frame.row(0), "20 (12) Gids!");
        assert_eq!(frame.row(1), "0%=8G 100%=214G");
        assert_eq!(frame.row(2), "1.9 G/km 0.080 kWh/G");
    }

    #[test]
    fn test_rows_fit_the_display() {
        let mut sample = sample_with_gids(1000.0);
        sample.soc_percent = 100.0;
        sample.soc_percent_valid = true;
        sample.power_kw = -204.8;
        sample.current_a = -512.0;
        sample.voltage_v = 400.0;
        sample.power_valid = true;

        for page_index in 0..PAGE_COUNT {
            let frame = compose_for(&sample, page_index);
            for row in frame.rows.iter() {
                assert!(row.len() <= LINE_LEN);
            }
        }
    }
}
