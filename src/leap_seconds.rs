use std::path::PathBuf;

use lazy_static::lazy_static;
use num_integer::Integer;
use tracing::{debug, warn};
use zoneinfo_compiled::parse;

use crate::calendar::cycle::CycleDate;
use crate::error::LeapSecondError;
use crate::hash::{date_hash32, GREGORIAN_32};

/// Days ending in a positive leap second (23:59:60 UTC), per IERS Bulletin C.
/// No leap second has been announced since the end of 2016.
const LEAP_SECOND_DATES: [(u16, u8, u8); 27] = [
    (1972, 6, 30),
    (1972, 12, 31),
    (1973, 12, 31),
    (1974, 12, 31),
    (1975, 12, 31),
    (1976, 12, 31),
    (1977, 12, 31),
    (1978, 12, 31),
    (1979, 12, 31),
    (1981, 6, 30),
    (1982, 6, 30),
    (1983, 6, 30),
    (1985, 6, 30),
    (1987, 12, 31),
    (1989, 12, 31),
    (1990, 12, 31),
    (1992, 6, 30),
    (1993, 6, 30),
    (1994, 6, 30),
    (1995, 12, 31),
    (1997, 6, 30),
    (1998, 12, 31),
    (2005, 12, 31),
    (2008, 12, 31),
    (2012, 6, 30),
    (2015, 6, 30),
    (2016, 12, 31),
];

// Proleptic day number of 1970-01-01.
const UNIX_EPOCH_DAY: i64 = 719_162;
const SECONDS_PER_DAY: i64 = 86_400;

lazy_static! {
    static ref LEAP_SECONDS: LeapSecondTable = {
        let table = LeapSecondTable::builtin();
        debug!(entries = table.len(), "leap second table initialised");
        table
    };
}

/// The process-wide table consulted by leap-second-aware calendars.
pub fn leap_seconds() -> &'static LeapSecondTable {
    &LEAP_SECONDS
}

fn tzdir() -> PathBuf {
    // Same lookup as the C library: TZDIR if set, the conventional location otherwise.
    std::env::var("TZDIR")
        .unwrap_or_else(|_| "/usr/share/zoneinfo".to_string())
        .into()
}

/// Ascending 32-bit date hashes of the days on which a leap second was appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeapSecondTable {
    hashes: Vec<u32>,
}

impl LeapSecondTable {
    pub fn builtin() -> Self {
        Self::from_dates(LEAP_SECOND_DATES)
    }

    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = (u16, u8, u8)>,
    {
        let mut hashes: Vec<u32> = dates
            .into_iter()
            .map(|(year, month, day)| date_hash32(year, month, day))
            .collect();
        hashes.sort_unstable();
        hashes.dedup();
        LeapSecondTable { hashes }
    }

    /// Builds a table from a compiled "right/" zoneinfo file.
    ///
    /// Leap records in these files are expressed in time that counts the leap seconds
    /// themselves, so the record for the n-th leap second sits at the Unix time of the
    /// following midnight plus the n-1 leap seconds inserted before it.
    pub fn from_tzif(data: Vec<u8>) -> Result<Self, LeapSecondError> {
        let tz = parse(data).map_err(|e| LeapSecondError::Parse(format!("{e:?}")))?;

        let mut dates = Vec::with_capacity(tz.leap_seconds.len());
        let mut previous_total = 0_i64;
        for leap_second in tz.leap_seconds.iter() {
            let total = leap_second.leap_second_count as i64;
            let inserted = total - previous_total;
            if inserted != 1 {
                // Negative leap seconds have never been issued and the calendar has no way
                // of representing a 23:59:58 end of day.
                warn!(
                    timestamp = leap_second.timestamp as i64,
                    inserted, "skipping leap second record that is not a single insertion"
                );
                previous_total = total;
                continue;
            }
            let next_midnight = leap_second.timestamp as i64 - previous_total;
            let day = Integer::div_floor(&next_midnight, &SECONDS_PER_DAY) - 1 + UNIX_EPOCH_DAY;
            let (year, month, day) = CycleDate::from_day(day).to_date();
            dates.push((year as u16, month, day));
            previous_total = total;
        }

        let table = Self::from_dates(dates);
        debug!(entries = table.len(), "parsed leap second table from tzdata");
        Ok(table)
    }

    /// Loads `$TZDIR/right/UTC`, falling back to `/usr/share/zoneinfo` when TZDIR is unset.
    pub fn load_system() -> Result<Self, LeapSecondError> {
        let path = tzdir().join("right").join("UTC");
        let data = std::fs::read(&path).map_err(|source| LeapSecondError::Io { path, source })?;
        Self::from_tzif(data)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn hashes(&self) -> &[u32] {
        &self.hashes
    }

    pub fn last(&self) -> Option<u32> {
        self.hashes.last().copied()
    }

    pub fn contains(&self, hash: u32) -> bool {
        self.hashes.binary_search(&hash).is_ok()
    }

    /// Number of leap-second days strictly before the hashed date.
    pub fn count_before(&self, hash: u32) -> u32 {
        self.hashes.partition_point(|&h| h < hash) as u32
    }

    pub fn dates(&self) -> impl Iterator<Item = (u16, u8, u8)> + '_ {
        self.hashes.iter().map(|&hash| {
            GREGORIAN_32
                .unpack(hash as u64, |_, _| (0, 0))
                .ymd()
        })
    }
}
