//! Timezone lookups and wall-clock/instant conversion.
//!
//! Zone rules come from the IANA database bundled with `jiff`. Nothing here
//! caches an offset per zone: every offset is computed for the specific
//! instant asked about, so results stay correct across DST transitions.

use std::fmt;

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::consts::{DEFAULT_TIME_ZONE, JANUARY, JULY};

/// A validated IANA timezone identifier together with its resolved rules.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeZoneId {
    name: String,
    tz:   TimeZone,
}

impl TimeZoneId {
    /// Looks up `name` in the timezone database.
    ///
    /// # Errors
    /// Returns `Error::UnknownTimeZone` if the identifier is not known.
    pub fn new(name: &str) -> Result<Self, Error> {
        match TimeZone::get(name) {
            Ok(tz) => Ok(Self {
                name: name.to_owned(),
                tz,
            }),
            Err(source) => {
                warn!("rejecting unknown timezone {name:?}: {source}");
                Err(Error::UnknownTimeZone {
                    name: name.to_owned(),
                    source,
                })
            },
        }
    }

    pub fn utc() -> Self {
        Self {
            name: DEFAULT_TIME_ZONE.to_owned(),
            tz:   TimeZone::UTC,
        }
    }

    /// The host's configured zone, or UTC when the host zone has no IANA name.
    pub fn system() -> Self {
        let tz = TimeZone::system();
        match tz.iana_name() {
            Some(name) => Self {
                name: name.to_owned(),
                tz,
            },
            None => {
                debug!("system timezone has no IANA name, falling back to UTC");
                Self::utc()
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn time_zone(&self) -> &TimeZone {
        &self.tz
    }
}

impl PartialEq for TimeZoneId {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TimeZoneId {}

impl fmt::Display for TimeZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<String> for TimeZoneId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<TimeZoneId> for String {
    fn from(id: TimeZoneId) -> Self {
        id.name
    }
}

impl Default for TimeZoneId {
    fn default() -> Self {
        Self::utc()
    }
}

/// Validity probe for untrusted identifiers. Never fails.
pub fn is_valid_time_zone(id: &str) -> bool {
    TimeZone::get(id).is_ok()
}

/// Resolves a wall-clock value in `tz` to an instant.
///
/// Wall-clock times skipped by a DST gap resolve forward; times repeated by a
/// fold resolve to the earlier instant.
///
/// # Errors
/// Returns `Error::OutOfRange` if the instant is not representable.
pub fn to_instant(wall: DateTime, tz: &TimeZoneId) -> Result<Timestamp, Error> {
    Ok(tz.tz.to_ambiguous_timestamp(wall).compatible()?)
}

/// Renders an instant as wall-clock fields in `tz`.
pub fn to_wall_clock(instant: Timestamp, tz: &TimeZoneId) -> DateTime {
    tz.tz.to_datetime(instant)
}

/// Minutes between the UTC rendering and the `tz` rendering of `instant`.
///
/// Zones east of Greenwich are negative: `Asia/Kolkata` is `-330`,
/// `America/New_York` is `300` in winter and `240` in summer.
pub fn offset_minutes(instant: Timestamp, tz: &TimeZoneId) -> i32 {
    -tz.tz.to_offset(instant).seconds() / 60
}

/// Whether daylight saving time is in effect at `instant` in `tz`.
///
/// The standard offset is the larger of the offsets on January 1 and July 1
/// of the local year, in the [`offset_minutes`] convention. DST is active
/// whenever the current offset is below it. Zones without DST never match.
///
/// # Errors
/// Returns `Error::OutOfRange` if the probe dates are not representable.
pub fn is_dst(instant: Timestamp, tz: &TimeZoneId) -> Result<bool, Error> {
    let year = to_wall_clock(instant, tz).year();
    let january = Date::new(year, JANUARY.cast_signed(), 1)?.to_datetime(Time::midnight());
    let july = Date::new(year, JULY.cast_signed(), 1)?.to_datetime(Time::midnight());

    let january_offset = offset_minutes(to_instant(january, tz)?, tz);
    let july_offset = offset_minutes(to_instant(july, tz)?, tz);
    let standard = january_offset.max(july_offset);

    Ok(offset_minutes(instant, tz) < standard)
}

/// Re-expresses a wall-clock value from `from` in `to` without changing the
/// instant it denotes.
///
/// The value is resolved in `from` as [`to_instant`] does, then rendered in
/// `to`, so 09:00 in `America/New_York` in January becomes 14:00 in `UTC`.
/// A result that falls in a fold of `to` no longer says which of the repeated
/// hours it was; use [`convert_zoned`] to keep the offset.
///
/// # Errors
/// Returns `Error::OutOfRange` if the instant is not representable.
pub fn convert_preserving_instant(
    wall: DateTime,
    from: &TimeZoneId,
    to: &TimeZoneId,
) -> Result<DateTime, Error> {
    let converted = to_wall_clock(to_instant(wall, from)?, to);
    trace!("converted {wall} in {from} to {converted} in {to}");
    Ok(converted)
}

/// Attaches `tz` to a wall-clock value, resolving gaps and folds like
/// [`to_instant`].
///
/// # Errors
/// Returns `Error::OutOfRange` if the instant is not representable.
pub fn to_zoned(wall: DateTime, tz: &TimeZoneId) -> Result<Zoned, Error> {
    Ok(wall.to_zoned(tz.tz.clone())?)
}

/// Renders a zoned value in `to`. The offset travels with the value, so an
/// hour repeated by a fold converts back to the instant it came from.
pub fn convert_zoned(zoned: &Zoned, to: &TimeZoneId) -> Zoned {
    zoned.with_time_zone(to.tz.clone())
}

/// UTC offset formatted as `±HH:MM`, e.g. `-05:00` or `+05:30`.
pub fn offset_string(instant: Timestamp, tz: &TimeZoneId) -> String {
    let offset = offset_minutes(instant, tz);
    let sign = if offset <= 0 { '+' } else { '-' };
    let magnitude = offset.unsigned_abs();
    format!("{sign}{:02}:{:02}", magnitude / 60, magnitude % 60)
}

/// Short zone name at `instant`, e.g. `EST`. Empty when the database has none.
pub fn abbreviation(instant: Timestamp, tz: &TimeZoneId) -> String {
    tz.tz.to_offset_info(instant).abbreviation().to_owned()
}

/// A zone offered to users by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommonTimeZone {
    pub label: &'static str,
    pub id:    &'static str,
}

const fn common(label: &'static str, id: &'static str) -> CommonTimeZone {
    CommonTimeZone { label, id }
}

/// Zones listed in a timezone selector.
pub const COMMON_TIME_ZONES: [CommonTimeZone; 17] = [
    common("UTC", "UTC"),
    common("Eastern Time (US)", "America/New_York"),
    common("Central Time (US)", "America/Chicago"),
    common("Mountain Time (US)", "America/Denver"),
    common("Pacific Time (US)", "America/Los_Angeles"),
    common("Alaska Time", "America/Anchorage"),
    common("Hawaii Time", "Pacific/Honolulu"),
    common("London", "Europe/London"),
    common("Paris", "Europe/Paris"),
    common("Berlin", "Europe/Berlin"),
    common("Moscow", "Europe/Moscow"),
    common("Dubai", "Asia/Dubai"),
    common("Mumbai", "Asia/Kolkata"),
    common("Singapore", "Asia/Singapore"),
    common("Tokyo", "Asia/Tokyo"),
    common("Sydney", "Australia/Sydney"),
    common("Auckland", "Pacific/Auckland"),
];
