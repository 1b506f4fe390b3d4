use tracing::debug;

use crate::calendar::bounds::Bounds;
use crate::calendar::{Calendar, CalendarKind, Engine};
use crate::error::CalendarError;

const DEFAULT_MAX_YEAR: u16 = 9999;

/// Assembles a [`Calendar`] from a kind and an optional custom epoch window.
///
/// Unset fields fall back to the kind's usual window: 1970-01-01 for [`CalendarKind::UtcFast`]
/// and 0001-01-01 otherwise, both ending in 9999.
#[derive(Debug, Default, Clone)]
pub struct CalendarBuilder {
    kind: Option<CalendarKind>,
    min_year: Option<u16>,
    min_month: Option<u8>,
    min_day: Option<u8>,
    max_year: Option<u16>,
}

impl CalendarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&mut self, kind: CalendarKind) -> &mut Self {
        self.kind = Some(kind);
        self
    }

    pub fn min_year(&mut self, min_year: u16) -> &mut Self {
        self.min_year = Some(min_year);
        self
    }

    pub fn min_month(&mut self, min_month: u8) -> &mut Self {
        self.min_month = Some(min_month);
        self
    }

    pub fn min_day(&mut self, min_day: u8) -> &mut Self {
        self.min_day = Some(min_day);
        self
    }

    pub fn max_year(&mut self, max_year: u16) -> &mut Self {
        self.max_year = Some(max_year);
        self
    }

    pub fn build(&self) -> Result<Calendar, CalendarError> {
        let kind = self.kind.unwrap_or(CalendarKind::Gregorian);
        let default = match kind {
            CalendarKind::UtcFast => Bounds::UNIX,
            CalendarKind::Gregorian | CalendarKind::IsoWeek => Bounds::DEFAULT,
        };
        // A custom start year without a month or day starts on January 1, not on the
        // default epoch's month and day.
        let (min_month, min_day) = match self.min_year {
            Some(_) => (self.min_month.unwrap_or(1), self.min_day.unwrap_or(1)),
            None => (
                self.min_month.unwrap_or(default.min_month()),
                self.min_day.unwrap_or(default.min_day()),
            ),
        };
        let bounds = Bounds::try_new(
            self.min_year.unwrap_or(default.min_year()),
            min_month,
            min_day,
            self.max_year.unwrap_or(DEFAULT_MAX_YEAR),
        )?;
        debug!(
            ?kind,
            min_year = bounds.min_year(),
            min_month = bounds.min_month(),
            min_day = bounds.min_day(),
            max_year = bounds.max_year(),
            "built calendar"
        );
        Ok(Calendar::new(Engine::with_bounds(kind, bounds)))
    }
}
