use crate::calendar::bounds::Bounds;
use crate::calendar::gregorian::Gregorian;
use crate::calendar::Calendarized;
use crate::hash::{Layout, Width};

/// Gregorian dates with ISO 8601 weekday and week numbering.
///
/// Weekdays run from Monday as 1 to Sunday as 7. Week 1 is the week holding the year's
/// first Thursday, so the first days of January can belong to the last week of the previous
/// year and the last days of December to week 1 of the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsoWeek {
    gregorian: Gregorian,
}

macro_rules! delegate {
    ($($name:ident($($arg:ident: $ty:ty),*) -> $ret:ty;)+) => {
        $(
            fn $name(&self, $($arg: $ty),*) -> $ret {
                self.gregorian.$name($($arg),*)
            }
        )+
    };
}

impl IsoWeek {
    pub const fn new(bounds: Bounds) -> Self {
        IsoWeek {
            gregorian: Gregorian::new(bounds),
        }
    }

    pub const fn window(&self) -> Bounds {
        self.gregorian.window()
    }

    /// 53 for years starting on a Thursday, and for leap years starting on a Wednesday.
    pub fn weeks_in_year(&self, year: u16) -> u8 {
        match self.day_of_week(year, 1, 1) {
            4 => 53,
            3 if self.is_leapyear(year) => 53,
            _ => 52,
        }
    }
}

impl Default for IsoWeek {
    fn default() -> Self {
        IsoWeek::new(Bounds::DEFAULT)
    }
}

impl Calendarized for IsoWeek {
    delegate! {
        bounds() -> Bounds;
        has_leap_seconds() -> bool;
        layout(width: Width) -> &'static Layout;
        is_leapyear(year: u16) -> bool;
        max_days_in_month(year: u16, month: u8) -> u8;
        day_of_year(year: u16, month: u8, day: u8) -> u16;
        day_of_month(year: u16, day_of_year: u16) -> (u8, u8);
        days_since_epoch(year: u16, month: u8, day: u8) -> u32;
        date_from_days(days: u32) -> (u16, u8, u8);
        leapdays_since_epoch(year: u16, month: u8, day: u8) -> u32;
        leapsecs_since_epoch(year: u16, month: u8, day: u8) -> u32;
        is_leapsec(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> bool;
    }

    fn day_of_week(&self, year: u16, month: u8, day: u8) -> u8 {
        self.gregorian.day_of_week(year, month, day) + 1
    }

    fn week_of_year(&self, year: u16, month: u8, day: u8) -> u8 {
        let jan1 = self.day_of_week(year, 1, 1) as u16;
        let day_of_year = self.day_of_year(year, month, day);
        // Week 1 includes January 1 when that falls on Monday through Thursday.
        let week = ((day_of_year + jan1).wrapping_sub(2) / 7) as u8;
        let week = week.wrapping_add((jan1 <= 4) as u8);
        if week == 0 {
            self.weeks_in_year(year.saturating_sub(1))
        } else if week > self.weeks_in_year(year) {
            1
        } else {
            week
        }
    }
}
