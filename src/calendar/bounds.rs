use crate::calendar::gregorian::days_in_month;
use crate::error::CalendarError;

/// The epoch window of a calendar: day zero is `min_year-min_month-min_day` and the last
/// representable day is `max_year-12-31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    min_year: u16,
    min_month: u8,
    min_day: u8,
    max_year: u16,
}

impl Bounds {
    /// Proleptic Gregorian from 0001-01-01, the range of Python's `datetime`.
    pub const DEFAULT: Bounds = Bounds::new(1, 1, 1, 9999);
    /// Starting at the Unix epoch, 1970-01-01.
    pub const UNIX: Bounds = Bounds::new(1970, 1, 1, 9999);

    /// # Panics
    ///
    /// If the bounds are inconsistent. In a `const` this is a compile error.
    pub const fn new(min_year: u16, min_month: u8, min_day: u8, max_year: u16) -> Self {
        assert!(
            Self::is_consistent(min_year, min_month, min_day, max_year),
            "inconsistent calendar bounds"
        );
        Bounds {
            min_year,
            min_month,
            min_day,
            max_year,
        }
    }

    pub fn try_new(
        min_year: u16,
        min_month: u8,
        min_day: u8,
        max_year: u16,
    ) -> Result<Self, CalendarError> {
        if min_year == 0 {
            return Err(CalendarError::InvalidYear { year: min_year });
        }
        if min_year > max_year {
            return Err(CalendarError::InvertedYears { min_year, max_year });
        }
        if !(1..=12).contains(&min_month) {
            return Err(CalendarError::InvalidMonth { month: min_month });
        }
        let max_day = days_in_month(min_year, min_month);
        if !(1..=max_day).contains(&min_day) {
            return Err(CalendarError::InvalidDay {
                year: min_year,
                month: min_month,
                day: min_day,
                max_day,
            });
        }
        Ok(Bounds::new(min_year, min_month, min_day, max_year))
    }

    const fn is_consistent(min_year: u16, min_month: u8, min_day: u8, max_year: u16) -> bool {
        min_year >= 1
            && min_year <= max_year
            && min_month >= 1
            && min_month <= 12
            && min_day >= 1
            && min_day <= days_in_month(min_year, min_month)
    }

    /// Same end year, epoch starting on January 1 of `min_year`.
    pub fn starting_at_year(&self, min_year: u16) -> Result<Self, CalendarError> {
        Self::try_new(min_year, 1, 1, self.max_year)
    }

    pub const fn min_year(&self) -> u16 {
        self.min_year
    }

    pub const fn min_month(&self) -> u8 {
        self.min_month
    }

    pub const fn min_day(&self) -> u8 {
        self.min_day
    }

    pub const fn max_year(&self) -> u16 {
        self.max_year
    }

    pub(crate) const fn is_default_epoch(&self) -> bool {
        self.min_year == 1 && self.min_month == 1 && self.min_day == 1
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::DEFAULT
    }
}

/// Typical ranges of the time-of-day fields, so callers can validate and format
/// without hardcoding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    pub min_month: u8,
    pub max_month: u8,
    pub min_day: u8,
    pub min_hour: u8,
    pub max_hour: u8,
    pub min_minute: u8,
    pub max_minute: u8,
    pub min_second: u8,
    pub max_typical_second: u8,
    pub max_possible_second: u8,
    pub min_millisecond: u16,
    pub max_millisecond: u16,
    pub min_microsecond: u16,
    pub max_microsecond: u16,
    pub min_nanosecond: u16,
    pub max_nanosecond: u16,
}

impl Limits {
    pub const GREGORIAN: Limits = Limits {
        min_month: 1,
        max_month: 12,
        min_day: 1,
        min_hour: 0,
        max_hour: 23,
        min_minute: 0,
        max_minute: 59,
        min_second: 0,
        max_typical_second: 59,
        max_possible_second: 60,
        min_millisecond: 0,
        max_millisecond: 999,
        min_microsecond: 0,
        max_microsecond: 999,
        min_nanosecond: 0,
        max_nanosecond: 999,
    };

    pub const fn months_per_year(&self) -> u64 {
        (self.max_month - self.min_month) as u64 + 1
    }

    pub const fn seconds_per_minute(&self) -> u64 {
        (self.max_typical_second - self.min_second) as u64 + 1
    }

    pub const fn seconds_per_hour(&self) -> u64 {
        ((self.max_minute - self.min_minute) as u64 + 1) * self.seconds_per_minute()
    }

    /// Length of a day without leap seconds.
    pub const fn seconds_per_day(&self) -> u64 {
        ((self.max_hour - self.min_hour) as u64 + 1) * self.seconds_per_hour()
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits::GREGORIAN
    }
}
