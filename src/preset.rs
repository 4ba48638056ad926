use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::date::{end_of_day, end_of_month, start_of_day, start_of_month, sub_days};
use crate::{CompleteRange, Error};

/// A one-click range relative to a reference instant.
///
/// Presets never read the clock: the caller passes `now`, which keeps the
/// resolved ranges deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Preset {
    /// Start of today through end of today.
    Today,
    /// Exactly one day back from `now`, time of day preserved.
    Last24Hours,
    /// `days` calendar days back from `now` through `now`.
    LastDays { days: u32, floor_to_start_of_day: bool },
    /// First through last day of the current month.
    ThisMonth,
}

/// Presets offered when the caller configures none.
pub const DEFAULT_PRESETS: [Preset; 4] = [
    Preset::Today,
    Preset::Last24Hours,
    Preset::LastDays {
        days:                  7,
        floor_to_start_of_day: true,
    },
    Preset::ThisMonth,
];

impl Preset {
    pub fn label(&self) -> String {
        match self {
            Self::Today => "Today".to_owned(),
            Self::Last24Hours => "Last 24 Hours".to_owned(),
            Self::LastDays { days, .. } => format!("Last {days} Days"),
            Self::ThisMonth => "This Month".to_owned(),
        }
    }

    /// Resolves the preset against `now`.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the range start is not representable.
    pub fn resolve(&self, now: DateTime) -> Result<CompleteRange, Error> {
        let (start, end) = match *self {
            Self::Today => (start_of_day(now), end_of_day(now)),
            Self::Last24Hours => (sub_days(now, 1)?, now),
            Self::LastDays {
                days,
                floor_to_start_of_day,
            } => {
                let start = sub_days(now, i64::from(days))?;
                let start = if floor_to_start_of_day {
                    start_of_day(start)
                } else {
                    start
                };
                (start, now)
            },
            Self::ThisMonth => (start_of_month(now), end_of_month(now)),
        };
        Ok(CompleteRange::new(start, end)?)
    }
}
