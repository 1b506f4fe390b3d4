// Day numbers are decomposed along the 400-year Gregorian cycle. Each cycle has 97 leap
// years and 303 normal years, 146097 days in total. Within a cycle every 4th year is a
// leap year except the first three centennial years.
//
// The decomposition starts each year on March 1 so that the leap day is the last day of
// its year, the leap year is the last year of its quadrennium and the leap century is the
// last century of the cycle. Every extra day then arrives as an "overflow" of the last
// period, which clamped division absorbs without branching. The zero point is 2000-03-01,
// right after the leap day that closes a cycle.

use num_integer::Integer;

use crate::div_rem::ClampedDivRem;

const CYCLE_DAYS: i64 = 97 * 366 + 303 * 365;
const CENTURY_DAYS: u32 = 24 * 366 + 76 * 365;
#[allow(clippy::identity_op)]
const QUADRENNIUM_DAYS: u16 = 3 * 365 + 1 * 366;
const YEAR_DAYS: u16 = 365;

// Proleptic day number (0001-01-01 = day 0) of 2000-03-01.
const ZERO_POINT_DAY: i64 = 730_179;

// Day offsets of month starts in a March-based year. Index 0 = March.
const MONTH_STARTS: [u16; 12] = [0, 31, 61, 92, 122, 153, 184, 214, 245, 275, 306, 337];

fn month_from_day_offset(day: u16) -> u8 {
    (MONTH_STARTS.partition_point(|&start| start <= day) - 1) as u8
}

/// A proleptic day number split into its position in the Gregorian cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CycleDate {
    // 400-year cycles since 2000-03-01, negative before it.
    cycle: i64,
    // Century within the cycle (0-3).
    century: u8,
    // Quadrennium within the century (0-24).
    quadrennium: u8,
    // Year within the quadrennium (0-3).
    year: u8,
    // Day within the March-based year (0-365).
    day: u16,
}

impl CycleDate {
    /// Decomposes a day number counted from 0001-01-01.
    pub(crate) fn from_day(day: i64) -> Self {
        let (cycle, days_into_cycle) = (day - ZERO_POINT_DAY).div_mod_floor(&CYCLE_DAYS);
        let days_into_cycle = days_into_cycle as u32;

        // The fourth century of a cycle is one day longer than the other three.
        let (century, days_into_century) = days_into_cycle.clamped_div_rem(CENTURY_DAYS, 3_u8);
        let days_into_century = days_into_century as u16;

        // The last quadrennium of a normal century lacks its leap day, so it is one day
        // short rather than one day long and a plain division suffices.
        let (quadrennium, days_into_quadrennium) = days_into_century.div_rem(&QUADRENNIUM_DAYS);

        let (year, day) = days_into_quadrennium.clamped_div_rem(YEAR_DAYS, 3_u8);

        CycleDate {
            cycle,
            century,
            quadrennium: quadrennium as u8,
            year,
            day,
        }
    }

    /// Returns `(year, month, day)` with January as month 1.
    pub(crate) fn to_date(self) -> (i64, u8, u8) {
        let march_year = 2000
            + 400 * self.cycle
            + 100 * i64::from(self.century)
            + 4 * i64::from(self.quadrennium)
            + i64::from(self.year);

        let march_month = month_from_day_offset(self.day);
        let day = (self.day - MONTH_STARTS[usize::from(march_month)]) as u8;

        // January and February close the March-based year.
        let (carry, month) = (march_month + 2).div_rem(&12);
        (march_year + i64::from(carry), month + 1, day + 1)
    }
}
