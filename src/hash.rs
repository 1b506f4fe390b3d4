//! Bit-packing of civil timestamps into fixed-width integers.
//!
//! A [`Layout`] lists the fields it keeps, most significant first, each with a bit width
//! and a shift from the least significant bit. Encoding masks every field to its width and
//! ORs it in at its shift; decoding masks and shifts each field back out. Fields a layout
//! does not keep decode as zero, and values wider than their slot lose their high bits, so
//! `from_hash(hash(t)) == t` only holds while every field is within [`Layout::max_of`].
//!
//! The width is chosen at the call site through a marker type implementing [`HashBits`],
//! and the layout for that width is chosen by the calendar engine:
//!
//! | Width | Gregorian | Leap-second-free fast variant |
//! |-------|-----------|-------------------------------|
//! | 8     | day(3) hour(5) | same |
//! | 16    | year(2) day_of_year(9) hour(5) | same |
//! | 32    | year(17) month(5) day(5) | year(12) month(4) day(5) hour(5) minute(6) |
//! | 64    | year(17) month(5) day(5) hour(5) minute(6) second(6) millisecond(10) microsecond(10) | same |

use std::fmt::Debug;
use std::hash::Hash;

use num_traits::{Bounded, NumCast, PrimInt, ToPrimitive};

use crate::civil::CivilTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    pub const fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }
}

/// Compile-time selection of a hash width and its packed integer type.
pub trait HashBits: Copy {
    const WIDTH: Width;
    type Packed: PrimInt + Hash + Debug;

    fn narrow(raw: u64) -> Self::Packed {
        <Self::Packed as NumCast>::from(raw).unwrap_or_else(<Self::Packed as Bounded>::max_value)
    }

    fn widen(packed: Self::Packed) -> u64 {
        packed.to_u64().unwrap_or(u64::MAX)
    }
}

macro_rules! hash_bits {
    ($($Name:ident => $Packed:ty, $width:expr;)+) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $Name;

            impl HashBits for $Name {
                const WIDTH: Width = $width;
                type Packed = $Packed;
            }
        )+
    };
}

hash_bits! {
    Bits8 => u8, Width::W8;
    Bits16 => u16, Width::W16;
    Bits32 => u32, Width::W32;
    Bits64 => u64, Width::W64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Month,
    Day,
    DayOfYear,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    field: Field,
    width: u32,
    shift: u32,
}

impl Slot {
    const fn new(field: Field, width: u32, shift: u32) -> Self {
        Slot {
            field,
            width,
            shift,
        }
    }

    const fn mask(&self) -> u64 {
        (1 << self.width) - 1
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Layout {
    width: Width,
    // Most significant first.
    slots: &'static [Slot],
}

pub(crate) static GREGORIAN_8: Layout = Layout {
    width: Width::W8,
    slots: &[Slot::new(Field::Day, 3, 5), Slot::new(Field::Hour, 5, 0)],
};

pub(crate) static GREGORIAN_16: Layout = Layout {
    width: Width::W16,
    slots: &[
        Slot::new(Field::Year, 2, 14),
        Slot::new(Field::DayOfYear, 9, 5),
        Slot::new(Field::Hour, 5, 0),
    ],
};

pub(crate) static GREGORIAN_32: Layout = Layout {
    width: Width::W32,
    slots: &[
        Slot::new(Field::Year, 17, 10),
        Slot::new(Field::Month, 5, 5),
        Slot::new(Field::Day, 5, 0),
    ],
};

pub(crate) static FAST_32: Layout = Layout {
    width: Width::W32,
    slots: &[
        Slot::new(Field::Year, 12, 20),
        Slot::new(Field::Month, 4, 16),
        Slot::new(Field::Day, 5, 11),
        Slot::new(Field::Hour, 5, 6),
        Slot::new(Field::Minute, 6, 0),
    ],
};

pub(crate) static GREGORIAN_64: Layout = Layout {
    width: Width::W64,
    slots: &[
        Slot::new(Field::Year, 17, 47),
        Slot::new(Field::Month, 5, 42),
        Slot::new(Field::Day, 5, 37),
        Slot::new(Field::Hour, 5, 32),
        Slot::new(Field::Minute, 6, 26),
        Slot::new(Field::Second, 6, 20),
        Slot::new(Field::Millisecond, 10, 10),
        Slot::new(Field::Microsecond, 10, 0),
    ],
};

pub(crate) fn gregorian_layout(width: Width) -> &'static Layout {
    match width {
        Width::W8 => &GREGORIAN_8,
        Width::W16 => &GREGORIAN_16,
        Width::W32 => &GREGORIAN_32,
        Width::W64 => &GREGORIAN_64,
    }
}

pub(crate) fn fast_layout(width: Width) -> &'static Layout {
    match width {
        Width::W32 => &FAST_32,
        width => gregorian_layout(width),
    }
}

/// The 32-bit Gregorian hash of a date. Ordering of hashes follows ordering of dates.
pub(crate) fn date_hash32(year: u16, month: u8, day: u8) -> u32 {
    GREGORIAN_32.pack(&CivilTime::date(year, month, day), 0) as u32
}

impl Layout {
    pub fn width(&self) -> Width {
        self.width
    }

    pub fn contains(&self, field: Field) -> bool {
        self.slot(field).is_some()
    }

    /// Largest value of `field` that survives a round trip through this layout. Zero for
    /// fields the layout does not keep.
    pub fn max_of(&self, field: Field) -> u64 {
        self.slot(field).map_or(0, |slot| slot.mask())
    }

    fn slot(&self, field: Field) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.field == field)
    }

    pub(crate) fn pack(&self, t: &CivilTime, day_of_year: u16) -> u64 {
        self.slots.iter().fold(0, |raw, slot| {
            let value = match slot.field {
                Field::Year => t.year as u64,
                Field::Month => t.month as u64,
                Field::Day => t.day as u64,
                Field::DayOfYear => day_of_year as u64,
                Field::Hour => t.hour as u64,
                Field::Minute => t.minute as u64,
                Field::Second => t.second as u64,
                Field::Millisecond => t.millisecond as u64,
                Field::Microsecond => t.microsecond as u64,
            };
            raw | ((value & slot.mask()) << slot.shift)
        })
    }

    /// `day_of_month` maps `(year, day_of_year)` back to `(month, day)` for layouts that
    /// store the day of the year.
    pub(crate) fn unpack<F>(&self, raw: u64, day_of_month: F) -> CivilTime
    where
        F: FnOnce(u16, u16) -> (u8, u8),
    {
        let mut t = CivilTime::default();
        let mut day_of_year = None;
        for slot in self.slots {
            let value = (raw >> slot.shift) & slot.mask();
            match slot.field {
                Field::Year => t.year = value as u16,
                Field::Month => t.month = value as u8,
                Field::Day => t.day = value as u8,
                Field::DayOfYear => day_of_year = Some(value as u16),
                Field::Hour => t.hour = value as u8,
                Field::Minute => t.minute = value as u8,
                Field::Second => t.second = value as u8,
                Field::Millisecond => t.millisecond = value as u16,
                Field::Microsecond => t.microsecond = value as u16,
            }
        }
        if let Some(day_of_year) = day_of_year {
            (t.month, t.day) = day_of_month(t.year, day_of_year);
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_layouts() -> [&'static Layout; 5] {
        [
            &GREGORIAN_8,
            &GREGORIAN_16,
            &GREGORIAN_32,
            &FAST_32,
            &GREGORIAN_64,
        ]
    }

    #[test]
    fn test_slots_fit_and_do_not_overlap() {
        for layout in all_layouts() {
            let mut used = 0_u64;
            for slot in layout.slots {
                let bits = slot.mask() << slot.shift;
                assert_eq!(used & bits, 0, "{:?} overlaps in {:?}", slot, layout.width);
                assert!(slot.shift + slot.width <= layout.width.bits());
                used |= bits;
            }
        }
    }

    #[test]
    fn test_slots_are_most_significant_first() {
        for layout in all_layouts() {
            let shifts: Vec<u32> = layout.slots.iter().map(|slot| slot.shift).collect();
            let mut sorted = shifts.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(shifts, sorted);
        }
    }

    #[test]
    fn test_64_bit_packs_every_field() {
        let t = CivilTime::new(2024, 2, 29, 23, 59, 60).with_subsecond(999, 998, 0);
        let raw = GREGORIAN_64.pack(&t, 0);
        assert_eq!(raw >> 47, 2024);
        assert_eq!((raw >> 42) & 0x1f, 2);
        assert_eq!(raw & 0x3ff, 998);
        assert_eq!(GREGORIAN_64.unpack(raw, |_, _| unreachable!()), t);
    }

    #[test]
    fn test_date_hash32_orders_like_dates() {
        assert!(date_hash32(1972, 6, 30) < date_hash32(1972, 12, 31));
        assert!(date_hash32(1972, 12, 31) < date_hash32(1973, 1, 1));
        assert!(date_hash32(2016, 12, 31) < date_hash32(2017, 1, 1));
        assert_eq!(date_hash32(1, 1, 1), (1 << 10) | (1 << 5) | 1);
    }

    #[test]
    fn test_fast_32_keeps_clock_fields() {
        let t = CivilTime::new(2024, 5, 17, 13, 45, 0);
        let raw = FAST_32.pack(&t, 0);
        assert_eq!(FAST_32.unpack(raw, |_, _| unreachable!()), t);
        // The Gregorian 32-bit layout drops the time of day.
        let raw = GREGORIAN_32.pack(&t, 0);
        assert_eq!(
            GREGORIAN_32.unpack(raw, |_, _| unreachable!()),
            CivilTime::date(2024, 5, 17)
        );
    }

    #[test]
    fn test_oversized_fields_are_truncated() {
        let t = CivilTime::new(5, 1, 9, 31, 0, 0);
        let raw = GREGORIAN_8.pack(&t, 0);
        let back = GREGORIAN_8.unpack(raw, |_, _| unreachable!());
        assert_eq!(back.day, 9 & 0b111);
        assert_eq!(back.hour, 31);
        assert_eq!(back.year, 0);
    }

    #[test]
    fn test_max_of() {
        assert_eq!(GREGORIAN_64.max_of(Field::Year), (1 << 17) - 1);
        assert_eq!(GREGORIAN_16.max_of(Field::Year), 3);
        assert_eq!(GREGORIAN_16.max_of(Field::DayOfYear), 511);
        assert_eq!(GREGORIAN_8.max_of(Field::Minute), 0);
        assert_eq!(FAST_32.max_of(Field::Month), 15);
        assert!(!GREGORIAN_32.contains(Field::Hour));
    }

    #[test]
    fn test_narrow_and_widen() {
        assert_eq!(Bits8::narrow(0xab), 0xab_u8);
        assert_eq!(Bits16::widen(0xbeef), 0xbeef);
        assert_eq!(Bits32::narrow(u64::MAX), u32::MAX);
        assert_eq!(Bits64::WIDTH.bits(), 64);
    }
}
