pub use bounds::{Bounds, Limits};
pub use builder::CalendarBuilder;
pub use gregorian::{Gregorian, UtcFast};
pub use iso::IsoWeek;

use crate::civil::CivilTime;
use crate::error::CalendarError;
use crate::hash::{HashBits, Layout, Width};

mod bounds;
mod builder;
pub(crate) mod cycle;
pub(crate) mod gregorian;
mod iso;

/// Proleptic Gregorian from 0001-01-01, matching Python's `datetime` range.
pub const PYTHON_CALENDAR: Calendar = Calendar::new(Engine::Gregorian(Gregorian::new(Bounds::DEFAULT)));
/// Leap-second aware Gregorian starting at the Unix epoch.
pub const UTC_CALENDAR: Calendar = Calendar::new(Engine::Gregorian(Gregorian::new(Bounds::UNIX)));
/// ISO 8601 week numbering from 0001-01-01.
pub const ISO_CALENDAR: Calendar = Calendar::new(Engine::IsoWeek(IsoWeek::new(Bounds::DEFAULT)));
/// Leap-second free Gregorian starting at the Unix epoch.
pub const UTC_FAST_CALENDAR: Calendar = Calendar::new(Engine::UtcFast(UtcFast::new(Bounds::UNIX)));

/// Calendrical arithmetic over a civil timestamp.
///
/// None of these operations fail. Arguments outside the ranges a calendar declares give
/// numerically defined but meaningless results; use [`Calendar::validate`] to check first.
pub trait Calendarized {
    fn bounds(&self) -> Bounds;

    fn limits(&self) -> Limits {
        Limits::GREGORIAN
    }

    fn has_leap_seconds(&self) -> bool;

    /// Bit layout used by [`Calendarized::hash`] for the given width.
    fn layout(&self, width: Width) -> &'static Layout;

    fn is_leapyear(&self, year: u16) -> bool;

    fn max_days_in_month(&self, year: u16, month: u8) -> u8;

    fn day_of_week(&self, year: u16, month: u8, day: u8) -> u8;

    /// 1-based.
    fn day_of_year(&self, year: u16, month: u8, day: u8) -> u16;

    /// Inverse of [`Calendarized::day_of_year`], returning `(month, day)`.
    fn day_of_month(&self, year: u16, day_of_year: u16) -> (u8, u8);

    fn week_of_year(&self, year: u16, month: u8, day: u8) -> u8;

    /// Days since the start of the epoch window, which is day 0.
    fn days_since_epoch(&self, year: u16, month: u8, day: u8) -> u32;

    /// Inverse of [`Calendarized::days_since_epoch`].
    fn date_from_days(&self, days: u32) -> (u16, u8, u8);

    /// February 29ths between the start of the epoch window and this date.
    fn leapdays_since_epoch(&self, year: u16, month: u8, day: u8) -> u32;

    /// Leap seconds appended between the start of the epoch window and the start of this
    /// date.
    fn leapsecs_since_epoch(&self, year: u16, month: u8, day: u8) -> u32;

    /// Whether the minute 23:59 of this date gains a leap second. `second` may name the
    /// last regular second (59) or the leap second itself (60).
    fn is_leapsec(&self, year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8)
        -> bool;

    fn max_second(&self, year: u16, month: u8, day: u8, hour: u8, minute: u8) -> u8 {
        let limits = self.limits();
        if self.is_leapsec(year, month, day, hour, minute, limits.max_typical_second) {
            limits.max_possible_second
        } else {
            limits.max_typical_second
        }
    }

    /// Weekday of the first of the month and the number of days in it.
    fn monthrange(&self, year: u16, month: u8) -> (u8, u8) {
        (
            self.day_of_week(year, month, 1),
            self.max_days_in_month(year, month),
        )
    }

    /// Nominal seconds since the epoch start. Leap seconds are taken out so every day counts
    /// as exactly one day's worth; add [`Calendarized::leapsecs_since_epoch`] back for
    /// elapsed physical seconds.
    fn seconds_since_epoch(&self, t: &CivilTime) -> u64 {
        let limits = self.limits();
        let days = self.days_since_epoch(t.year, t.month, t.day) as u64;
        let hours = (t.hour as u64).wrapping_sub(limits.min_hour as u64);
        let minutes = (t.minute as u64).wrapping_sub(limits.min_minute as u64);
        let seconds = (t.second as u64).wrapping_sub(limits.min_second as u64);
        let leap_seconds = self.leapsecs_since_epoch(t.year, t.month, t.day) as u64;
        days.wrapping_mul(limits.seconds_per_day())
            .wrapping_add(hours.wrapping_mul(limits.seconds_per_hour()))
            .wrapping_add(minutes.wrapping_mul(limits.seconds_per_minute()))
            .wrapping_add(seconds)
            .wrapping_sub(leap_seconds)
    }

    fn m_seconds_since_epoch(&self, t: &CivilTime) -> u64 {
        self.seconds_since_epoch(t)
            .wrapping_mul(1_000)
            .wrapping_add(t.millisecond as u64)
    }

    /// Wraps modulo 2^64 a little under 585 years after the epoch start. See
    /// [`Calendarized::checked_n_seconds_since_epoch`].
    fn n_seconds_since_epoch(&self, t: &CivilTime) -> u64 {
        self.m_seconds_since_epoch(t)
            .wrapping_mul(1_000_000)
            .wrapping_add(t.microsecond as u64 * 1_000)
            .wrapping_add(t.nanosecond as u64)
    }

    fn checked_n_seconds_since_epoch(&self, t: &CivilTime) -> Option<u64> {
        self.seconds_since_epoch(t)
            .checked_mul(1_000)?
            .checked_add(t.millisecond as u64)?
            .checked_mul(1_000_000)?
            .checked_add(t.microsecond as u64 * 1_000)?
            .checked_add(t.nanosecond as u64)
    }

    fn hash<W: HashBits>(&self, t: &CivilTime) -> W::Packed {
        let day_of_year = self.day_of_year(t.year, t.month, t.day);
        W::narrow(self.layout(W::WIDTH).pack(t, day_of_year))
    }

    fn from_hash<W: HashBits>(&self, value: W::Packed) -> CivilTime {
        self.layout(W::WIDTH)
            .unpack(W::widen(value), |year, day_of_year| {
                self.day_of_month(year, day_of_year)
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarKind {
    Gregorian,
    UtcFast,
    IsoWeek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    Gregorian(Gregorian),
    UtcFast(UtcFast),
    IsoWeek(IsoWeek),
}

impl Engine {
    pub const fn with_bounds(kind: CalendarKind, bounds: Bounds) -> Self {
        match kind {
            CalendarKind::Gregorian => Engine::Gregorian(Gregorian::new(bounds)),
            CalendarKind::UtcFast => Engine::UtcFast(UtcFast::new(bounds)),
            CalendarKind::IsoWeek => Engine::IsoWeek(IsoWeek::new(bounds)),
        }
    }

    pub const fn kind(&self) -> CalendarKind {
        match self {
            Engine::Gregorian(_) => CalendarKind::Gregorian,
            Engine::UtcFast(_) => CalendarKind::UtcFast,
            Engine::IsoWeek(_) => CalendarKind::IsoWeek,
        }
    }

    /// The epoch window owned by the wrapped engine.
    pub const fn window(&self) -> Bounds {
        match self {
            Engine::Gregorian(g) => g.window(),
            Engine::UtcFast(g) => g.window(),
            Engine::IsoWeek(iso) => iso.window(),
        }
    }
}

/// A calendar engine together with its limits. The bounds live in the engine.
///
/// This is what dates and date-times hold on to. Two calendars are equal only if the
/// engine kind, every bound and every limit agree, which is what decides whether two
/// dates can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Calendar {
    limits: Limits,
    engine: Engine,
}

macro_rules! dispatch {
    ($self:ident, $engine:ident => $call:expr) => {
        match &$self.engine {
            Engine::Gregorian($engine) => $call,
            Engine::UtcFast($engine) => $call,
            Engine::IsoWeek($engine) => $call,
        }
    };
}

impl Calendar {
    pub const fn new(engine: Engine) -> Self {
        Calendar {
            limits: Limits::GREGORIAN,
            engine,
        }
    }

    pub fn builder() -> CalendarBuilder {
        CalendarBuilder::new()
    }

    pub const fn kind(&self) -> CalendarKind {
        self.engine.kind()
    }

    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    pub const fn min_year(&self) -> u16 {
        self.engine.window().min_year()
    }

    pub const fn min_month(&self) -> u8 {
        self.engine.window().min_month()
    }

    pub const fn min_day(&self) -> u8 {
        self.engine.window().min_day()
    }

    pub const fn max_year(&self) -> u16 {
        self.engine.window().max_year()
    }

    /// A calendar of the same kind and end year whose epoch starts on January 1 of `year`.
    pub fn from_year(&self, year: u16) -> Result<Calendar, CalendarError> {
        let bounds = self.engine.window().starting_at_year(year)?;
        Ok(Calendar::new(Engine::with_bounds(self.kind(), bounds)))
    }

    pub fn is_valid(&self, t: &CivilTime) -> bool {
        self.validate(t).is_ok()
    }

    /// Checks every field of `t` against this calendar's window and limits.
    pub fn validate(&self, t: &CivilTime) -> Result<(), CalendarError> {
        let limits = self.limits;
        if !(limits.min_month..=limits.max_month).contains(&t.month) {
            return Err(CalendarError::InvalidMonth { month: t.month });
        }
        let max_day = self.max_days_in_month(t.year, t.month);
        if !(limits.min_day..=max_day).contains(&t.day) {
            return Err(CalendarError::InvalidDay {
                year: t.year,
                month: t.month,
                day: t.day,
                max_day,
            });
        }
        let start = (self.min_year(), self.min_month(), self.min_day());
        if t.ymd() < start || t.year > self.max_year() {
            return Err(CalendarError::OutsideWindow {
                year: t.year,
                month: t.month,
                day: t.day,
            });
        }
        let max_second = self.max_second(t.year, t.month, t.day, t.hour, t.minute);
        let fields = [
            ("hour", t.hour as u16, limits.max_hour as u16),
            ("minute", t.minute as u16, limits.max_minute as u16),
            ("second", t.second as u16, max_second as u16),
            ("millisecond", t.millisecond, limits.max_millisecond),
            ("microsecond", t.microsecond, limits.max_microsecond),
            ("nanosecond", t.nanosecond, limits.max_nanosecond),
        ];
        for (field, value, max) in fields {
            if value > max {
                return Err(CalendarError::FieldOutOfRange { field, value, max });
            }
        }
        Ok(())
    }
}

impl Default for Calendar {
    fn default() -> Self {
        PYTHON_CALENDAR
    }
}

impl Calendarized for Calendar {
    fn bounds(&self) -> Bounds {
        self.engine.window()
    }

    fn limits(&self) -> Limits {
        self.limits
    }

    fn has_leap_seconds(&self) -> bool {
        dispatch!(self, e => e.has_leap_seconds())
    }

    fn layout(&self, width: Width) -> &'static Layout {
        dispatch!(self, e => e.layout(width))
    }

    fn is_leapyear(&self, year: u16) -> bool {
        dispatch!(self, e => e.is_leapyear(year))
    }

    fn max_days_in_month(&self, year: u16, month: u8) -> u8 {
        dispatch!(self, e => e.max_days_in_month(year, month))
    }

    fn day_of_week(&self, year: u16, month: u8, day: u8) -> u8 {
        dispatch!(self, e => e.day_of_week(year, month, day))
    }

    fn day_of_year(&self, year: u16, month: u8, day: u8) -> u16 {
        dispatch!(self, e => e.day_of_year(year, month, day))
    }

    fn day_of_month(&self, year: u16, day_of_year: u16) -> (u8, u8) {
        dispatch!(self, e => e.day_of_month(year, day_of_year))
    }

    fn week_of_year(&self, year: u16, month: u8, day: u8) -> u8 {
        dispatch!(self, e => e.week_of_year(year, month, day))
    }

    fn days_since_epoch(&self, year: u16, month: u8, day: u8) -> u32 {
        dispatch!(self, e => e.days_since_epoch(year, month, day))
    }

    fn date_from_days(&self, days: u32) -> (u16, u8, u8) {
        dispatch!(self, e => e.date_from_days(days))
    }

    fn leapdays_since_epoch(&self, year: u16, month: u8, day: u8) -> u32 {
        dispatch!(self, e => e.leapdays_since_epoch(year, month, day))
    }

    fn leapsecs_since_epoch(&self, year: u16, month: u8, day: u8) -> u32 {
        dispatch!(self, e => e.leapsecs_since_epoch(year, month, day))
    }

    fn is_leapsec(
        &self,
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> bool {
        dispatch!(self, e => e.is_leapsec(year, month, day, hour, minute, second))
    }
}
