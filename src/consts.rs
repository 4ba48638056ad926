/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for July, used as the mid-year probe for DST detection
pub const JULY: u8 = 7;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Columns in a calendar grid, Sunday through Saturday
pub const DAYS_PER_WEEK: usize = 7;

/// Milliseconds in a 24 hour day
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Last hour of a 24 hour clock
pub const MAX_HOUR_24: u8 = 23;
/// First hour of a 12 hour clock
pub const MIN_HOUR_12: u8 = 1;
/// Last hour of a 12 hour clock
pub const MAX_HOUR_12: u8 = 12;
/// Last minute of an hour
pub const MAX_MINUTE: u8 = 59;

/// Range separator (ISO 8601 interval format)
pub const RANGE_SEPARATOR: char = '/';

/// Zone used when no timezone is configured
pub const DEFAULT_TIME_ZONE: &str = "UTC";

/// Column headers for a Sunday-first calendar
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// English month names, index 0 is January
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
