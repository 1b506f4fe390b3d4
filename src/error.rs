use std::path::PathBuf;

use thiserror::Error;

/// Errors from constructing a calendar or validating a civil timestamp against one.
///
/// Calendar arithmetic itself never fails; these only come out of the checked
/// entry points (`Bounds::try_new`, `CalendarBuilder::build`, `Calendar::from_year`
/// and `Calendar::validate`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("invalid year: {year} (must be at least 1)")]
    InvalidYear { year: u16 },

    #[error("epoch start year {min_year} is after epoch end year {max_year}")]
    InvertedYears { min_year: u16, max_year: u16 },

    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth { month: u8 },

    #[error("invalid day: {day} for {year:04}-{month:02} (max {max_day})")]
    InvalidDay {
        year: u16,
        month: u8,
        day: u8,
        max_day: u8,
    },

    #[error("date {year:04}-{month:02}-{day:02} is outside the calendar window")]
    OutsideWindow { year: u16, month: u8, day: u8 },

    #[error("{field} {value} exceeds its maximum of {max}")]
    FieldOutOfRange {
        field: &'static str,
        value: u16,
        max: u16,
    },
}

/// Errors from loading a leap-second table out of compiled tzdata.
#[derive(Error, Debug)]
pub enum LeapSecondError {
    #[error("failed to read leap second data from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse leap second data: {0}")]
    Parse(String),
}
