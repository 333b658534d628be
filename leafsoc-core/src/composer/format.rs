//! Field formatting

use core::fmt::{self, Write};

use heapless::String;
use leafsoc_protocol::TelemetrySample;

use super::frame::{truncate, Alert, Line, LINE_LEN};
use crate::config::DashboardConfig;
use crate::estimator::{whole_percent, ChargeEstimate};
use crate::pages::{Field, FieldFormat};

/// Shown in place of a value that has not been received
pub const PLACEHOLDER: &str = "--";

/// Separator between fields on one row
const FIELD_SEPARATOR: &str = " ";

/// Everything a field value can be taken from
#[derive(Clone, Copy)]
pub struct FieldSource<'a> {
    pub sample: &'a TelemetrySample,
    pub estimate: Option<&'a ChargeEstimate>,
    pub config: &'a DashboardConfig,
}

impl FieldSource<'_> {
    /// Current value of a field, `None` while its data is missing
    pub fn value(&self, field: Field) -> Option<f32> {
        let power = self.sample.power();
        match field {
            Field::Gids => self.sample.gids().map(|g| f32::from(g.whole())),
            Field::EnergyKwh => self.estimate.map(|e| e.energy_kwh),
            Field::PowerKw => power.map(|p| p.power_kw),
            Field::CurrentA => power.map(|p| p.current_a),
            Field::VoltageV => power.map(|p| p.voltage_v),
            Field::RangeKm => self.estimate.map(|e| e.range_km),
            Field::SocPercent => self.estimate.map(|e| f32::from(e.soc_whole())),
            Field::SocSignal => self.sample.soc_signal().map(|p| f32::from(whole_percent(p))),
            Field::ZeroPoint => Some(self.config.calibration.zero_point.get()),
            Field::FullPoint => Some(self.config.calibration.full_point.get()),
            Field::GidsPerKm => Some(self.config.estimator.gids_per_km),
            Field::KwhPerGid => Some(self.config.estimator.kwh_per_gid),
        }
    }
}

/// Write one field: prefix, value (or placeholder) and suffix
pub fn write_field<W: Write>(out: &mut W, format: FieldFormat, value: Option<f32>) -> fmt::Result {
    out.write_str(format.prefix)?;
    match value.filter(|v| v.is_finite()) {
        Some(v) if format.precision == 0 => write!(out, "{}", round_half_up(v))?,
        Some(v) => write!(out, "{:.*}", format.precision, without_negative_zero(v, format.precision))?,
        None => out.write_str(PLACEHOLDER)?,
    }
    out.write_str(format.suffix)
}

/// Format a row of fields, truncated to the line length
pub fn format_row(fields: &[Field], source: &FieldSource<'_>) -> Line {
    // Wider scratch buffer so a too-long row is cut cleanly
    let mut scratch: String<{ LINE_LEN * 2 }> = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 && scratch.push_str(FIELD_SEPARATOR).is_err() {
            break;
        }
        if write_field(&mut scratch, field.format(), source.value(*field)).is_err() {
            break;
        }
    }

    let mut line = Line::new();
    let _ = line.push_str(truncate(&scratch, LINE_LEN));
    line
}

/// Alert row: `20 (12) Gids!`, or `5 (-3) Gids!` below the zero point
pub fn alert_line(alert: &Alert) -> Line {
    let mut line = Line::new();
    let _ = if alert.gids_below_floor > 0 {
        write!(line, "{} (-{}) Gids!", alert.raw_gids, alert.gids_below_floor)
    } else {
        write!(line, "{} ({}) Gids!", alert.raw_gids, alert.gids_to_floor)
    };
    line
}

fn round_half_up(v: f32) -> i32 {
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}

/// Values that round to zero are printed without a sign
fn without_negative_zero(v: f32, precision: usize) -> f32 {
    const HALF_UNIT: [f32; 4] = [0.5, 0.05, 0.005, 0.0005];
    let half = HALF_UNIT.get(precision).copied().unwrap_or(0.0);
    let magnitude = if v < 0.0 { -v } else { v };
    if magnitude < half {
        0.0
    } else {
        v
    }
}
