pub use arithmetic::DateDelta;
pub use calendar::{
    Bounds, Calendar, CalendarBuilder, CalendarKind, Calendarized, Engine, Gregorian, IsoWeek,
    Limits, UtcFast, ISO_CALENDAR, PYTHON_CALENDAR, UTC_CALENDAR, UTC_FAST_CALENDAR,
};
pub use civil::CivilTime;
pub use error::{CalendarError, LeapSecondError};
pub use hash::{Bits16, Bits32, Bits64, Bits8, Field, HashBits, Layout, Width};
pub use leap_seconds::{leap_seconds, LeapSecondTable};
pub use offset::{Offset, OffsetSource, Sign};

mod arithmetic;
pub mod calendar;
mod civil;
mod div_rem;
mod error;
pub mod hash;
mod leap_seconds;
mod offset;
