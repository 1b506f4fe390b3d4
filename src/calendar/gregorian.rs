use crate::calendar::bounds::Bounds;
use crate::calendar::cycle::CycleDate;
use crate::calendar::Calendarized;
use crate::hash::{date_hash32, fast_layout, gregorian_layout, Layout, Width};
use crate::leap_seconds::leap_seconds;

// Index 0 is unused so months index directly.
const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const DAYS_BEFORE_MONTH: [u16; 13] = [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

const FIRST_LEAP_SECOND_YEAR: u16 = 1972;

pub(crate) const fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) const fn days_in_month(year: u16, month: u8) -> u8 {
    if month as usize >= DAYS_IN_MONTH.len() {
        return 0;
    }
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub(crate) const fn day_of_year(year: u16, month: u8, day: u8) -> u16 {
    let before = if (month as usize) < DAYS_BEFORE_MONTH.len() {
        DAYS_BEFORE_MONTH[month as usize]
    } else {
        0
    };
    let leap_day = (month > 2 && is_leap_year(year)) as u16;
    before + leap_day + day as u16
}

/// Days since 0001-01-01, which is day 0 and a Monday.
pub(crate) const fn proleptic_day(year: u16, month: u8, day: u8) -> i64 {
    let y = year as i64 - 1;
    y * 365 + leap_days_through(y) + day_of_year(year, month, day) as i64 - 1
}

// Feb 29s in years 1..=y.
const fn leap_days_through(y: i64) -> i64 {
    y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

const fn proleptic_leap_days(year: u16, month: u8) -> i64 {
    let current = (month > 2 && is_leap_year(year)) as i64;
    leap_days_through(year as i64 - 1) + current
}

/// The proleptic Gregorian calendar over a configurable epoch window.
///
/// `LEAP_SECONDS` switches leap-second accounting at compile time. With it off the engine
/// is the lower-overhead [`UtcFast`] variant, which also packs its 32-bit hash with clock
/// fields instead of the date-only Gregorian layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gregorian<const LEAP_SECONDS: bool = true> {
    bounds: Bounds,
}

/// Gregorian arithmetic without leap seconds.
pub type UtcFast = Gregorian<false>;

impl<const LEAP_SECONDS: bool> Gregorian<LEAP_SECONDS> {
    pub const fn new(bounds: Bounds) -> Self {
        Gregorian { bounds }
    }

    pub const fn window(&self) -> Bounds {
        self.bounds
    }

    fn epoch_day(&self) -> i64 {
        let b = self.bounds;
        proleptic_day(b.min_year(), b.min_month(), b.min_day())
    }
}

impl Default for Gregorian<true> {
    fn default() -> Self {
        Gregorian::new(Bounds::DEFAULT)
    }
}

impl Default for UtcFast {
    fn default() -> Self {
        Gregorian::new(Bounds::UNIX)
    }
}

impl<const LEAP_SECONDS: bool> Calendarized for Gregorian<LEAP_SECONDS> {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn has_leap_seconds(&self) -> bool {
        LEAP_SECONDS
    }

    fn layout(&self, width: Width) -> &'static Layout {
        if LEAP_SECONDS {
            gregorian_layout(width)
        } else {
            fast_layout(width)
        }
    }

    fn is_leapyear(&self, year: u16) -> bool {
        is_leap_year(year)
    }

    fn max_days_in_month(&self, year: u16, month: u8) -> u8 {
        days_in_month(year, month)
    }

    /// Monday is 0. Anchored to 0001-01-01 whatever the epoch window.
    fn day_of_week(&self, year: u16, month: u8, day: u8) -> u8 {
        proleptic_day(year, month, day).rem_euclid(7) as u8
    }

    fn day_of_year(&self, year: u16, month: u8, day: u8) -> u16 {
        day_of_year(year, month, day)
    }

    fn day_of_month(&self, year: u16, day_of_year: u16) -> (u8, u8) {
        let leap = is_leap_year(year);
        let mut month = 1;
        for candidate in 2..=12_u8 {
            let before =
                DAYS_BEFORE_MONTH[candidate as usize] + (candidate > 2 && leap) as u16;
            if before < day_of_year {
                month = candidate;
            } else {
                break;
            }
        }
        let before = DAYS_BEFORE_MONTH[month as usize] + (month > 2 && leap) as u16;
        (month, day_of_year.wrapping_sub(before) as u8)
    }

    /// Week 0 starts on January 1.
    fn week_of_year(&self, year: u16, month: u8, day: u8) -> u8 {
        (day_of_year(year, month, day) / 7) as u8
    }

    fn days_since_epoch(&self, year: u16, month: u8, day: u8) -> u32 {
        (proleptic_day(year, month, day) - self.epoch_day()) as u32
    }

    fn date_from_days(&self, days: u32) -> (u16, u8, u8) {
        let (year, month, day) = CycleDate::from_day(self.epoch_day() + days as i64).to_date();
        (year as u16, month, day)
    }

    fn leapdays_since_epoch(&self, year: u16, month: u8, _day: u8) -> u32 {
        let b = self.bounds;
        let since = proleptic_leap_days(year, month) - proleptic_leap_days(b.min_year(), b.min_month());
        since as u32
    }

    fn leapsecs_since_epoch(&self, year: u16, month: u8, day: u8) -> u32 {
        if !LEAP_SECONDS || year < FIRST_LEAP_SECOND_YEAR {
            return 0;
        }
        let table = leap_seconds();
        let count = table.count_before(date_hash32(year, month, day));
        if self.bounds.is_default_epoch() {
            return count;
        }
        let b = self.bounds;
        let start = date_hash32(b.min_year(), b.min_month(), b.min_day());
        match table.last() {
            // No leap second falls inside a window that opens after the last one.
            Some(last) if start > last => 0,
            _ => count.saturating_sub(table.count_before(start)),
        }
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
        LEAP_SECONDS
            && hour == 23
            && minute == 59
            && (second == 59 || second == 60)
            && ((month == 6 && day == 30) || (month == 12 && day == 31))
            && leap_seconds().contains(date_hash32(year, month, day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::CivilTime;
    use proptest::prelude::*;

    const PYTHON: Gregorian = Gregorian::new(Bounds::DEFAULT);
    const UTC: Gregorian = Gregorian::new(Bounds::UNIX);
    const FAST: UtcFast = Gregorian::new(Bounds::UNIX);

    #[test]
    fn test_is_leapyear() {
        assert!(PYTHON.is_leapyear(2000));
        assert!(!PYTHON.is_leapyear(1900));
        assert!(PYTHON.is_leapyear(2024));
        assert!(!PYTHON.is_leapyear(2023));
        assert!(!PYTHON.is_leapyear(1));
        assert!(PYTHON.is_leapyear(4));
        assert!(PYTHON.is_leapyear(400));
    }

    #[test]
    fn test_is_leapyear_all_years() {
        for year in 1..=9999_u16 {
            let expected = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
            assert_eq!(PYTHON.is_leapyear(year), expected, "year {year}");
        }
    }

    #[test]
    fn test_max_days_in_month() {
        assert_eq!(PYTHON.max_days_in_month(2023, 1), 31);
        assert_eq!(PYTHON.max_days_in_month(2023, 2), 28);
        assert_eq!(PYTHON.max_days_in_month(2024, 2), 29);
        assert_eq!(PYTHON.max_days_in_month(1900, 2), 28);
        assert_eq!(PYTHON.max_days_in_month(2023, 4), 30);
        assert_eq!(PYTHON.max_days_in_month(2023, 12), 31);
        // Out of range months are not an error.
        assert_eq!(PYTHON.max_days_in_month(2023, 13), 0);
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(PYTHON.day_of_week(1, 1, 1), 0); // Monday
        assert_eq!(PYTHON.day_of_week(1970, 1, 1), 3); // Thursday
        assert_eq!(PYTHON.day_of_week(2000, 1, 1), 5); // Saturday
        assert_eq!(PYTHON.day_of_week(2023, 1, 1), 6); // Sunday
        assert_eq!(PYTHON.day_of_week(2024, 2, 29), 3); // Thursday
        // A custom epoch does not move weekdays.
        assert_eq!(UTC.day_of_week(1970, 1, 1), 3);
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(PYTHON.day_of_year(2023, 1, 1), 1);
        assert_eq!(PYTHON.day_of_year(2023, 3, 1), 60);
        assert_eq!(PYTHON.day_of_year(2024, 3, 1), 61);
        assert_eq!(PYTHON.day_of_year(2023, 12, 31), 365);
        assert_eq!(PYTHON.day_of_year(2024, 12, 31), 366);
    }

    #[test]
    fn test_day_of_month() {
        assert_eq!(PYTHON.day_of_month(2023, 1), (1, 1));
        assert_eq!(PYTHON.day_of_month(2023, 31), (1, 31));
        assert_eq!(PYTHON.day_of_month(2023, 32), (2, 1));
        assert_eq!(PYTHON.day_of_month(2024, 60), (2, 29));
        assert_eq!(PYTHON.day_of_month(2023, 60), (3, 1));
        assert_eq!(PYTHON.day_of_month(2024, 366), (12, 31));
    }

    #[test]
    fn test_day_of_year_round_trip_every_day() {
        for year in [1_u16, 4, 100, 400, 1900, 2000, 2023, 2024, 9999] {
            for month in 1..=12 {
                for day in 1..=PYTHON.max_days_in_month(year, month) {
                    let doy = PYTHON.day_of_year(year, month, day);
                    assert_eq!(PYTHON.day_of_month(year, doy), (month, day));
                }
            }
        }
    }

    #[test]
    fn test_week_of_year() {
        assert_eq!(PYTHON.week_of_year(2023, 1, 1), 0);
        assert_eq!(PYTHON.week_of_year(2023, 1, 7), 1);
        assert_eq!(PYTHON.week_of_year(2023, 12, 31), 52);
    }

    #[test]
    fn test_days_since_epoch() {
        assert_eq!(PYTHON.days_since_epoch(1, 1, 1), 0);
        assert_eq!(PYTHON.days_since_epoch(1970, 1, 1), 719_162);
        assert_eq!(UTC.days_since_epoch(1970, 1, 1), 0);
        assert_eq!(UTC.days_since_epoch(2000, 1, 1), 10_957);
        assert_eq!(UTC.days_since_epoch(2024, 2, 29), 19_782);
    }

    #[test]
    fn test_custom_epoch_is_day_zero() {
        for (year, month, day) in [(1582, 10, 15), (2000, 2, 29), (1970, 6, 30), (9999, 12, 31)] {
            let calendar: Gregorian = Gregorian::new(Bounds::new(year, month, day, 9999));
            assert_eq!(calendar.days_since_epoch(year, month, day), 0);
            assert_eq!(calendar.leapdays_since_epoch(year, month, day), 0);
            assert_eq!(calendar.date_from_days(0), (year, month, day));
        }
    }

    #[test]
    fn test_days_since_epoch_counts_every_day() {
        let mut expected = PYTHON.days_since_epoch(1899, 1, 1);
        for year in 1899..=2101 {
            for month in 1..=12 {
                for day in 1..=PYTHON.max_days_in_month(year, month) {
                    assert_eq!(PYTHON.days_since_epoch(year, month, day), expected);
                    assert_eq!(PYTHON.date_from_days(expected), (year, month, day));
                    expected += 1;
                }
            }
        }
    }

    #[test]
    fn test_leapdays_since_epoch() {
        assert_eq!(PYTHON.leapdays_since_epoch(1, 1, 1), 0);
        assert_eq!(PYTHON.leapdays_since_epoch(5, 1, 1), 1);
        assert_eq!(PYTHON.leapdays_since_epoch(2000, 1, 1), 484);
        // Feb 29 itself is not yet counted; only leap days strictly before the date are.
        assert_eq!(PYTHON.leapdays_since_epoch(2000, 2, 29), 484);
        assert_eq!(PYTHON.leapdays_since_epoch(2000, 3, 1), 485);
        assert_eq!(UTC.leapdays_since_epoch(1972, 3, 1), 1);
        assert_eq!(UTC.leapdays_since_epoch(2000, 1, 1), 7);
    }

    #[test]
    fn test_leapsecs_since_epoch() {
        assert_eq!(PYTHON.leapsecs_since_epoch(1971, 12, 31), 0);
        assert_eq!(PYTHON.leapsecs_since_epoch(1972, 6, 30), 0);
        assert_eq!(PYTHON.leapsecs_since_epoch(1972, 7, 1), 1);
        assert_eq!(PYTHON.leapsecs_since_epoch(2017, 1, 1), 27);
        assert_eq!(UTC.leapsecs_since_epoch(2000, 1, 1), 22);
        assert_eq!(FAST.leapsecs_since_epoch(2017, 1, 1), 0);

        let since_1990: Gregorian = Gregorian::new(Bounds::new(1990, 1, 1, 9999));
        assert_eq!(since_1990.leapsecs_since_epoch(2000, 1, 1), 7);

        let after_last: Gregorian = Gregorian::new(Bounds::new(2020, 1, 1, 9999));
        assert_eq!(after_last.leapsecs_since_epoch(2024, 1, 1), 0);
        assert_eq!(after_last.leapsecs_since_epoch(2000, 1, 1), 0);
    }

    #[test]
    fn test_leapsecs_non_decreasing() {
        let mut previous = 0;
        for year in 1960..=2030 {
            for month in 1..=12 {
                for day in 1..=PYTHON.max_days_in_month(year, month) {
                    let count = PYTHON.leapsecs_since_epoch(year, month, day);
                    assert!(count >= previous);
                    previous = count;
                }
            }
        }
        assert_eq!(previous, 27);
    }

    #[test]
    fn test_is_leapsec() {
        assert!(PYTHON.is_leapsec(2016, 12, 31, 23, 59, 60));
        assert!(PYTHON.is_leapsec(2016, 12, 31, 23, 59, 59));
        assert!(PYTHON.is_leapsec(1972, 6, 30, 23, 59, 60));
        assert!(!PYTHON.is_leapsec(2016, 12, 31, 23, 58, 59));
        assert!(!PYTHON.is_leapsec(2017, 12, 31, 23, 59, 60));
        assert!(!PYTHON.is_leapsec(1980, 6, 30, 23, 59, 60));
        assert!(!FAST.is_leapsec(2016, 12, 31, 23, 59, 60));

        assert_eq!(PYTHON.max_second(2016, 12, 31, 23, 59), 60);
        assert_eq!(PYTHON.max_second(2016, 12, 31, 23, 58), 59);
        assert_eq!(PYTHON.max_second(2015, 6, 30, 23, 59), 60);
        assert_eq!(FAST.max_second(2015, 6, 30, 23, 59), 59);
    }

    #[test]
    fn test_seconds_since_epoch() {
        let t = CivilTime::date(2000, 1, 1);
        assert_eq!(FAST.seconds_since_epoch(&t), 946_684_800);
        // Leap-second aware calendars remove the 22 leap seconds inserted before 2000.
        assert_eq!(UTC.seconds_since_epoch(&t), 946_684_778);

        let t = CivilTime::new(1970, 1, 2, 1, 2, 3);
        assert_eq!(UTC.seconds_since_epoch(&t), 86_400 + 3_600 + 120 + 3);
    }

    #[test]
    fn test_sub_second_counts() {
        let t = CivilTime::new(1970, 1, 1, 0, 0, 1).with_subsecond(2, 3, 4);
        assert_eq!(FAST.m_seconds_since_epoch(&t), 1_002);
        assert_eq!(FAST.n_seconds_since_epoch(&t), 1_002_003_004);
        assert_eq!(FAST.checked_n_seconds_since_epoch(&t), Some(1_002_003_004));
    }

    #[test]
    fn test_n_seconds_ceiling() {
        // 2^64 ns is a little under 585 years.
        let within = CivilTime::date(2550, 1, 1);
        assert!(FAST.checked_n_seconds_since_epoch(&within).is_some());
        let beyond = CivilTime::date(2560, 1, 1);
        assert_eq!(FAST.checked_n_seconds_since_epoch(&beyond), None);
        let expected = (FAST.seconds_since_epoch(&beyond) as u128 * 1_000_000_000) as u64;
        assert_eq!(FAST.n_seconds_since_epoch(&beyond), expected);
    }

    #[test]
    fn test_monthrange() {
        assert_eq!(PYTHON.monthrange(2024, 2), (3, 29));
        assert_eq!(PYTHON.monthrange(2023, 1), (6, 31));
    }

    #[test]
    fn test_fast_variant_has_own_32_bit_layout() {
        let t = CivilTime::new(2024, 5, 17, 13, 45, 0);
        let fast = FAST.hash::<crate::hash::Bits32>(&t);
        let full = UTC.hash::<crate::hash::Bits32>(&t);
        assert_ne!(fast, full);
        assert_eq!(FAST.from_hash::<crate::hash::Bits32>(fast), t);
        assert_eq!(
            UTC.from_hash::<crate::hash::Bits32>(full),
            CivilTime::date(2024, 5, 17)
        );
    }

    proptest! {
        #[test]
        fn prop_day_of_year_round_trip(year in 1..=9999_u16, month in 1..=12_u8, day in 1..=31_u8) {
            let day = day.min(PYTHON.max_days_in_month(year, month));
            let doy = PYTHON.day_of_year(year, month, day);
            prop_assert!((1..=366).contains(&doy));
            prop_assert_eq!(PYTHON.day_of_month(year, doy), (month, day));
        }

        #[test]
        fn prop_date_from_days_inverts_days_since_epoch(year in 1970..=9999_u16, month in 1..=12_u8, day in 1..=31_u8) {
            let day = day.min(UTC.max_days_in_month(year, month));
            let days = UTC.days_since_epoch(year, month, day);
            prop_assert_eq!(UTC.date_from_days(days), (year, month, day));
        }

        #[test]
        fn prop_next_day_is_one_more(year in 1..=9998_u16, month in 1..=12_u8, day in 1..=31_u8) {
            let day = day.min(PYTHON.max_days_in_month(year, month));
            let days = PYTHON.days_since_epoch(year, month, day);
            let (ny, nm, nd) = PYTHON.date_from_days(days + 1);
            prop_assert!((ny, nm, nd) > (year, month, day));
            prop_assert_eq!(PYTHON.days_since_epoch(ny, nm, nd), days + 1);
        }
    }
}
