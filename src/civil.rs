use std::fmt;

/// A civil timestamp: the argument and return shape of every calendar operation.
///
/// Fields are not validated on construction. Field order matches significance, so the
/// derived ordering is chronological for timestamps on the same calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
    pub microsecond: u16,
    pub nanosecond: u16,
}

impl CivilTime {
    /// Midnight at the start of the given date.
    pub const fn date(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        CivilTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond: 0,
            microsecond: 0,
            nanosecond: 0,
        }
    }

    pub const fn with_subsecond(self, millisecond: u16, microsecond: u16, nanosecond: u16) -> Self {
        CivilTime {
            millisecond,
            microsecond,
            nanosecond,
            ..self
        }
    }

    /// Same time of day on another date.
    pub const fn with_date(self, year: u16, month: u8, day: u8) -> Self {
        CivilTime {
            year,
            month,
            day,
            ..self
        }
    }

    pub const fn with_time(self, hour: u8, minute: u8, second: u8) -> Self {
        CivilTime {
            hour,
            minute,
            second,
            ..self
        }
    }

    pub const fn ymd(&self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }
}

impl fmt::Display for CivilTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.millisecond != 0 || self.microsecond != 0 || self.nanosecond != 0 {
            write!(
                f,
                ".{:03}{:03}{:03}",
                self.millisecond, self.microsecond, self.nanosecond
            )?;
        }
        Ok(())
    }
}
