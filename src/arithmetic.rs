//! Carry and borrow arithmetic on civil timestamps.
//!
//! Every result lies inside the calendar's window, from the epoch start to the last day of
//! `max_year`. The year step wraps past `max_year` to `min_year` and before `min_year` to
//! `max_year`, carrying the remainder. The day step treats the window as a ring of days, so
//! stepping past its last day continues at the epoch start and a date landing before the
//! epoch start (including one left there by the year step) continues back from the last day.

use num_integer::Integer;
use tracing::trace;

use crate::calendar::cycle::CycleDate;
use crate::calendar::gregorian::proleptic_day;
use crate::calendar::{Calendar, Calendarized};
use crate::civil::CivilTime;
use crate::offset::{OffsetSource, Sign};

/// An unsigned span of calendar units, added with [`Calendar::add`] or taken away with
/// [`Calendar::subtract`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateDelta {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub seconds: u64,
}

impl DateDelta {
    pub const ZERO: DateDelta = DateDelta::new(0, 0, 0);

    pub const fn new(years: u32, months: u32, days: u32) -> Self {
        DateDelta {
            years,
            months,
            days,
            seconds: 0,
        }
    }

    pub const fn years(years: u32) -> Self {
        Self::new(years, 0, 0)
    }

    pub const fn months(months: u32) -> Self {
        Self::new(0, months, 0)
    }

    pub const fn days(days: u32) -> Self {
        Self::new(0, 0, days)
    }

    pub const fn with_seconds(self, seconds: u64) -> Self {
        DateDelta { seconds, ..self }
    }

    /// The year, month and day of `t` read as a span, as in "add 2 years, 6 months and
    /// 31 days".
    pub const fn from_date(t: &CivilTime) -> Self {
        Self::new(t.year as u32, t.month as u32, t.day as u32)
    }
}

impl Calendar {
    /// Adds years, then months, then days, then seconds, carrying each overflow into the
    /// next larger unit.
    ///
    /// A day of the month that does not exist after the year or month step rolls forward,
    /// so January 31 plus one month is March 2 or 3.
    pub fn add(&self, t: &CivilTime, delta: &DateDelta) -> CivilTime {
        let months_per_year = self.limits().months_per_year() as i64;
        let month = t.month as i64 - self.limits().min_month as i64 + delta.months as i64;
        let (carry, month) = month.div_mod_floor(&months_per_year);
        let year = self.wrap_year(t.year as i64 + delta.years as i64 + carry);
        let month = month as u8 + self.limits().min_month;

        let shifted = self.shift_days(&t.with_date(year, month, t.day), delta.days as i64);
        self.add_seconds(&shifted, delta.seconds)
    }

    /// Takes away seconds, then days, then months, then years, borrowing from the next
    /// larger unit. A day left past the end of its month by the month or year step rolls
    /// forward into the next month.
    pub fn subtract(&self, t: &CivilTime, delta: &DateDelta) -> CivilTime {
        let t = self.subtract_seconds(t, delta.seconds);
        let t = self.shift_days(&t, -(delta.days as i64));

        let months_per_year = self.limits().months_per_year() as i64;
        let month = t.month as i64 - self.limits().min_month as i64 - delta.months as i64;
        let (borrow, month) = month.div_mod_floor(&months_per_year);
        let year = self.wrap_year(t.year as i64 - delta.years as i64 + borrow);
        let month = month as u8 + self.limits().min_month;

        self.add(&t.with_date(year, month, t.day), &DateDelta::ZERO)
    }

    /// Moves the time of day forward, rolling whole days into the date. Sub-second fields are
    /// left alone.
    pub fn add_seconds(&self, t: &CivilTime, seconds: u64) -> CivilTime {
        if seconds == 0 {
            return self.shift_days(t, 0);
        }
        let seconds_per_day = self.limits().seconds_per_day();
        let (days, rest) = seconds.div_rem(&seconds_per_day);
        let (carry, time_of_day) = (self.time_of_day(t) + rest).div_rem(&seconds_per_day);
        let t = self.with_time_of_day(t, time_of_day);
        self.shift_days(&t, (days + carry) as i64)
    }

    pub fn subtract_seconds(&self, t: &CivilTime, seconds: u64) -> CivilTime {
        if seconds == 0 {
            return *t;
        }
        let seconds_per_day = self.limits().seconds_per_day();
        let (days, rest) = seconds.div_rem(&seconds_per_day);
        let time_of_day = self.time_of_day(t) as i64 - rest as i64;
        let (borrow, time_of_day) = time_of_day.div_mod_floor(&(seconds_per_day as i64));
        let t = self.with_time_of_day(t, time_of_day as u64);
        self.shift_days(&t, borrow - days as i64)
    }

    /// Converts a local time to UTC using the offset in effect at that local time.
    pub fn to_utc<S: OffsetSource>(&self, t: &CivilTime, source: &S) -> CivilTime {
        let offset = source.offset_at(t.year, t.month, t.day, t.hour, t.minute, t.second);
        match offset.sign {
            Sign::Positive => self.subtract_seconds(t, offset.seconds()),
            Sign::Negative => self.add_seconds(t, offset.seconds()),
        }
    }

    /// Converts a UTC time to local time using the offset in effect at that UTC time.
    pub fn from_utc<S: OffsetSource>(&self, t: &CivilTime, source: &S) -> CivilTime {
        let offset = source.offset_at(t.year, t.month, t.day, t.hour, t.minute, t.second);
        match offset.sign {
            Sign::Positive => self.add_seconds(t, offset.seconds()),
            Sign::Negative => self.subtract_seconds(t, offset.seconds()),
        }
    }

    fn wrap_year(&self, year: i64) -> u16 {
        let min = self.min_year() as i64;
        let max = self.max_year() as i64;
        if (min..=max).contains(&year) {
            return year as u16;
        }
        let wrapped = min + (year - min).mod_floor(&(max - min + 1));
        trace!(year, wrapped, "year wrapped around calendar window");
        wrapped as u16
    }

    // Moves the date by a signed number of days, normalizing a day past the end of its month
    // and wrapping around the window.
    fn shift_days(&self, t: &CivilTime, days: i64) -> CivilTime {
        let first = proleptic_day(self.min_year(), self.min_month(), self.min_day());
        let end = proleptic_day(self.max_year(), 12, 31) + 1;
        let mut target = proleptic_day(t.year, t.month, 1) + t.day as i64 - 1 + days;
        if target < first || target >= end {
            target = first + (target - first).mod_floor(&(end - first));
            trace!(days, "date wrapped around calendar window");
        }
        let (year, month, day) = CycleDate::from_day(target).to_date();
        t.with_date(year as u16, month, day)
    }

    fn time_of_day(&self, t: &CivilTime) -> u64 {
        let limits = self.limits();
        (t.hour - limits.min_hour) as u64 * limits.seconds_per_hour()
            + (t.minute - limits.min_minute) as u64 * limits.seconds_per_minute()
            + (t.second - limits.min_second) as u64
    }

    fn with_time_of_day(&self, t: &CivilTime, seconds: u64) -> CivilTime {
        let limits = self.limits();
        let (hour, rest) = seconds.div_rem(&limits.seconds_per_hour());
        let (minute, second) = rest.div_rem(&limits.seconds_per_minute());
        t.with_time(
            hour as u8 + limits.min_hour,
            minute as u8 + limits.min_minute,
            second as u8 + limits.min_second,
        )
    }
}
