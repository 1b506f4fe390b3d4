use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Sign {
    /// East of Greenwich, local time ahead of UTC.
    #[default]
    Positive,
    Negative,
}

/// A UTC offset as reported by a time zone resolver.
///
/// Hours are not limited to a day, so the arithmetic layer rolls as many days as the offset
/// spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub hour: u8,
    pub minute: u8,
    pub sign: Sign,
}

impl Offset {
    pub const UTC: Offset = Offset::east(0, 0);

    pub const fn east(hour: u8, minute: u8) -> Self {
        Offset {
            hour,
            minute,
            sign: Sign::Positive,
        }
    }

    pub const fn west(hour: u8, minute: u8) -> Self {
        Offset {
            hour,
            minute,
            sign: Sign::Negative,
        }
    }

    /// Magnitude in seconds, ignoring the sign.
    pub const fn seconds(&self) -> u64 {
        self.hour as u64 * 3_600 + self.minute as u64 * 60
    }

    pub const fn is_utc(&self) -> bool {
        self.hour == 0 && self.minute == 0
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Positive => '+',
            Sign::Negative => '-',
        };
        write!(f, "{}{:02}:{:02}", sign, self.hour, self.minute)
    }
}

/// Resolves the UTC offset in effect at a civil time.
///
/// This is the only way the calendar learns about time zones; the rules behind the answer
/// belong to the implementor.
pub trait OffsetSource {
    fn offset_at(&self, year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8)
        -> Offset;
}

/// A fixed offset applies at every instant.
impl OffsetSource for Offset {
    fn offset_at(&self, _: u16, _: u8, _: u8, _: u8, _: u8, _: u8) -> Offset {
        *self
    }
}

impl<T: OffsetSource + ?Sized> OffsetSource for &T {
    fn offset_at(&self, year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Offset {
        (**self).offset_at(year, month, day, hour, minute, second)
    }
}
