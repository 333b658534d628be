//! Page definitions
//!
//! Each page is an immutable descriptor: a list of rows for the secondary
//! text region, each row a list of fields. The large SOC indicator is not
//! part of any page; it is always shown.

/// A value that can appear on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Raw Gids count
    Gids,
    /// Energy left in the pack
    EnergyKwh,
    /// Pack power (negative while charging or regenerating)
    PowerKw,
    /// Pack current
    CurrentA,
    /// Pack voltage
    VoltageV,
    /// Estimated range
    RangeKm,
    /// Normalized SOC
    SocPercent,
    /// SOC as reported by the battery controller
    SocSignal,
    /// Calibration zero point
    ZeroPoint,
    /// Calibration full point
    FullPoint,
    /// Range scale
    GidsPerKm,
    /// Energy scale
    KwhPerGid,
}

/// How a field is written: `prefix`, value, `suffix`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldFormat {
    pub prefix: &'static str,
    /// Decimal places
    pub precision: usize,
    pub suffix: &'static str,
}

impl Field {
    /// Formatting rule for this field
    pub const fn format(self) -> FieldFormat {
        const fn f(prefix: &'static str, precision: usize, suffix: &'static str) -> FieldFormat {
            FieldFormat {
                prefix,
                precision,
                suffix,
            }
        }

        match self {
            Field::Gids => f("", 0, " Gids"),
            Field::EnergyKwh => f("", 1, " kWh"),
            Field::PowerKw => f("", 1, " kW"),
            Field::CurrentA => f("", 1, " A"),
            Field::VoltageV => f("", 0, " V"),
            Field::RangeKm => f("Range ", 0, " km"),
            Field::SocPercent => f("SOC ", 0, "%"),
            Field::SocSignal => f("Raw ", 0, "%"),
            Field::ZeroPoint => f("0%=", 0, "G"),
            Field::FullPoint => f("100%=", 0, "G"),
            Field::GidsPerKm => f("", 1, " G/km"),
            Field::KwhPerGid => f("", 3, " kWh/G"),
        }
    }
}

/// One page of the secondary region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDef {
    pub name: &'static str,
    pub rows: &'static [&'static [Field]],
    /// Rows shown below the low-charge alert line
    ///
    /// One row shorter than the region. Carries every field of `rows`
    /// except the raw Gids, which the alert line already shows.
    pub alert_rows: &'static [&'static [Field]],
}

impl PageDef {
    /// Rows to show, depending on whether the alert line is up
    pub fn rows_for(&self, alert: bool) -> &'static [&'static [Field]] {
        if alert {
            self.alert_rows
        } else {
            self.rows
        }
    }
}

/// Pages in the order the page button cycles through them
pub const PAGES: [PageDef; 5] = [
    PageDef {
        name: "Energy",
        rows: &[&[Field::Gids], &[Field::EnergyKwh, Field::PowerKw]],
        alert_rows: &[&[Field::EnergyKwh, Field::PowerKw]],
    },
    PageDef {
        name: "Range",
        rows: &[&[Field::RangeKm], &[Field::SocPercent]],
        alert_rows: &[&[Field::RangeKm], &[Field::SocPercent]],
    },
    PageDef {
        name: "Power",
        rows: &[&[Field::PowerKw], &[Field::CurrentA, Field::VoltageV]],
        alert_rows: &[&[Field::PowerKw], &[Field::CurrentA, Field::VoltageV]],
    },
    PageDef {
        name: "Record",
        rows: &[
            &[Field::RangeKm, Field::SocPercent],
            &[Field::Gids, Field::SocSignal],
            &[Field::EnergyKwh],
        ],
        alert_rows: &[
            &[Field::RangeKm, Field::SocPercent],
            &[Field::EnergyKwh, Field::SocSignal],
        ],
    },
    PageDef {
        name: "Constants",
        rows: &[
            &[Field::ZeroPoint, Field::FullPoint],
            &[Field::GidsPerKm],
            &[Field::KwhPerGid],
        ],
        alert_rows: &[
            &[Field::ZeroPoint, Field::FullPoint],
            &[Field::GidsPerKm, Field::KwhPerGid],
        ],
    },
];

/// Number of pages
pub const PAGE_COUNT: u8 = PAGES.len() as u8;

/// Page definition for an index, wrapping out-of-range indices to page 0
pub fn page(index: u8) -> &'static PageDef {
    PAGES.get(usize::from(index)).unwrap_or(&PAGES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::SECONDARY_ROWS;

    #[test]
    fn test_page_lookup() {
        assert_eq!(page(1).name, "Range");
        assert_eq!(page(PAGE_COUNT).name, "Energy");
    }

    #[test]
    fn test_every_page_has_rows() {
        for def in PAGES.iter() {
            assert!(!def.rows.is_empty());
            assert!(def.rows.iter().all(|row| !row.is_empty()));
            assert!(def.rows.len() <= SECONDARY_ROWS);
        }
    }

    #[test]
    fn test_alert_layout_keeps_every_field_but_gids() {
        for def in PAGES.iter() {
            assert!(def.alert_rows.len() < SECONDARY_ROWS, "{}", def.name);
            assert!(def.alert_rows.iter().all(|row| !row.is_empty()));

            let shown = |field: &Field| def.alert_rows.iter().any(|row| row.contains(field));
            for field in def.rows.iter().flat_map(|row| row.iter()) {
                if *field != Field::Gids {
                    assert!(shown(field), "{} hides {:?} under alert", def.name, field);
                }
            }
            assert!(!def.alert_rows.iter().any(|row| row.contains(&Field::Gids)));
        }
    }

    #[test]
    fn test_rows_for() {
        assert_eq!(page(3).rows_for(false).len(), 3);
        assert_eq!(page(3).rows_for(true).len(), 2);
    }
}
