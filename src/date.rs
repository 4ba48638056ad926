//! Calendar-day arithmetic on wall-clock values.
//!
//! Everything here is timezone-naive: a [`DateTime`] is a set of calendar and
//! clock fields with no attached zone, so adding a day always moves exactly
//! one calendar day regardless of DST transitions anywhere.

use std::cmp::Ordering;

use jiff::civil::{self, Date, DateTime, Time};
use jiff::{SignedDuration, Span};

use crate::Error;
use crate::types::{self, Month, Year};

/// Last representable millisecond of a day, 23:59:59.999.
pub const END_OF_DAY: Time = civil::time(23, 59, 59, 999_000_000);

/// Offsets used by Sakamoto's day-of-week method, indexed by month - 1.
const WEEKDAY_MONTH_OFFSETS: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

/// Number of days in `month` of `year`, honoring Gregorian leap years.
pub const fn days_in_month(year: Year, month: Month) -> u8 {
    types::days_in_month(year.get(), month.get())
}

/// Weekday of the first day of the month, 0 = Sunday through 6 = Saturday.
pub const fn first_weekday_of_month(year: Year, month: Month) -> u8 {
    let m = month.get();
    let mut y = year.get();
    if m < 3 {
        y -= 1;
    }
    let index = (y + y / 4 - y / 100 + y / 400 + WEEKDAY_MONTH_OFFSETS[(m - 1) as usize] + 1) % 7;
    // Always < 7, the narrowing is lossless.
    index as u8
}

/// Weekday of `dt`, 0 = Sunday through 6 = Saturday.
pub fn weekday_index(dt: DateTime) -> u8 {
    dt.weekday().to_sunday_zero_offset().cast_unsigned()
}

/// True when both values fall on the same calendar day.
pub fn same_day(a: DateTime, b: DateTime) -> bool {
    a.date() == b.date()
}

/// Inclusive comparison `start <= d <= end`, down to the sub-second.
pub fn in_range(d: DateTime, start: DateTime, end: DateTime) -> bool {
    start <= d && d <= end
}

/// Moves `dt` by `n` calendar days, keeping the time of day.
///
/// # Errors
/// Returns `Error::OutOfRange` if the result leaves the supported calendar.
pub fn add_days(dt: DateTime, n: i64) -> Result<DateTime, Error> {
    let span = Span::new().try_days(n)?;
    Ok(dt.checked_add(span)?)
}

/// Moves `dt` back by `n` calendar days.
///
/// # Errors
/// Returns `Error::OutOfRange` if the result leaves the supported calendar.
pub fn sub_days(dt: DateTime, n: i64) -> Result<DateTime, Error> {
    add_days(dt, n.saturating_neg())
}

/// Moves `dt` by `n` months.
///
/// Month overflow rolls into the year (December + 1 is January of the next
/// year). When the target month is shorter than the source day of month, the
/// day is clamped to the target month's last day: January 31 + 1 month is the
/// last day of February, never a day in March.
///
/// # Errors
/// Returns `Error::OutOfRange` if the result leaves the supported calendar.
pub fn add_months(dt: DateTime, n: i64) -> Result<DateTime, Error> {
    let span = Span::new().try_months(n)?;
    Ok(dt.checked_add(span)?)
}

/// Midnight at the start of the day.
pub fn start_of_day(dt: DateTime) -> DateTime {
    dt.date().to_datetime(Time::midnight())
}

/// 23:59:59.999 of the same day.
pub fn end_of_day(dt: DateTime) -> DateTime {
    dt.date().to_datetime(END_OF_DAY)
}

/// Midnight on the first day of the month.
pub fn start_of_month(dt: DateTime) -> DateTime {
    dt.date().first_of_month().to_datetime(Time::midnight())
}

/// 23:59:59.999 on the last day of the month.
pub fn end_of_month(dt: DateTime) -> DateTime {
    dt.date().last_of_month().to_datetime(END_OF_DAY)
}

pub fn compare(a: DateTime, b: DateTime) -> Ordering {
    a.cmp(&b)
}

pub fn before(a: DateTime, b: DateTime) -> bool {
    compare(a, b) == Ordering::Less
}

pub fn after(a: DateTime, b: DateTime) -> bool {
    compare(a, b) == Ordering::Greater
}

/// Absolute wall-clock distance between two values. Symmetric.
pub fn duration(a: DateTime, b: DateTime) -> SignedDuration {
    a.duration_since(b).abs()
}

/// Absolute distance in milliseconds. Symmetric.
pub fn duration_ms(a: DateTime, b: DateTime) -> i64 {
    // The civil calendar spans well under i64::MAX milliseconds.
    i64::try_from(duration(a, b).as_millis()).unwrap_or(i64::MAX)
}

pub fn is_today(dt: DateTime, today: Date) -> bool {
    dt.date() == today
}

/// ISO 8601 week number, 1-53.
///
/// The week belongs to the year of its Thursday, so the day is shifted to
/// the Thursday of its week before counting.
///
/// # Errors
/// Returns `Error::OutOfRange` at the extreme ends of the calendar.
pub fn week_number(dt: DateTime) -> Result<i16, Error> {
    let weekday = i64::from(dt.weekday().to_monday_one_offset());
    let thursday = dt.date().checked_add(Span::new().try_days(4 - weekday)?)?;
    Ok((thursday.day_of_year() - 1) / 7 + 1)
}

/// Renders the calendar day as `YYYY-MM-DD`.
pub fn format_date(dt: DateTime) -> String {
    dt.date().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{dt, dt_hms, month, year};
    use jiff::civil::date;

    #[test]
    fn test_days_in_month_leap_handling() {
        assert_eq!(days_in_month(year(2024), month(2)), 29);
        assert_eq!(days_in_month(year(2023), month(2)), 28);
        assert_eq!(days_in_month(year(1900), month(2)), 28);
        assert_eq!(days_in_month(year(2000), month(2)), 29);
        assert_eq!(days_in_month(year(2024), month(4)), 30);
        assert_eq!(days_in_month(year(2024), month(12)), 31);
    }

    #[test]
    fn test_first_weekday_known_months() {
        struct TestCase {
            year:     u16,
            month:    u8,
            expected: u8,
        }

        let cases = [
            // 2024-02-01 was a Thursday
            TestCase {
                year:     2024,
                month:    2,
                expected: 4,
            },
            // 2023-10-01 was a Sunday
            TestCase {
                year:     2023,
                month:    10,
                expected: 0,
            },
            // 2000-01-01 was a Saturday
            TestCase {
                year:     2000,
                month:    1,
                expected: 6,
            },
            // 2024-09-01 was a Sunday
            TestCase {
                year:     2024,
                month:    9,
                expected: 0,
            },
        ];

        for case in &cases {
            assert_eq!(
                first_weekday_of_month(year(case.year), month(case.month)),
                case.expected,
                "{}-{:02}",
                case.year,
                case.month
            );
        }
    }

    #[test]
    fn test_first_weekday_agrees_with_calendar() {
        for y in [1_u16, 4, 100, 1582, 1900, 1999, 2000, 2024, 2100, 9999] {
            for m in 1..=12_u8 {
                let first = date(y.cast_signed(), m.cast_signed(), 1).at(0, 0, 0, 0);
                assert_eq!(
                    first_weekday_of_month(year(y), month(m)),
                    weekday_index(first),
                    "{y}-{m:02}"
                );
            }
        }
    }

    #[test]
    fn test_same_day_ignores_time() {
        let morning = dt_hms(2024, 3, 10, 8, 0, 0);
        let night = dt_hms(2024, 3, 10, 23, 59, 59);
        assert!(same_day(morning, night));
        assert!(same_day(morning, morning));
        assert!(!same_day(morning, dt(2024, 3, 11)));
    }

    #[test]
    fn test_in_range_inclusive() {
        let start = dt(2024, 3, 10);
        let end = dt(2024, 3, 20);
        assert!(in_range(start, start, end));
        assert!(in_range(end, start, end));
        assert!(in_range(dt(2024, 3, 15), start, end));
        assert!(!in_range(dt(2024, 3, 21), start, end));
        assert!(!in_range(dt_hms(2024, 3, 20, 0, 0, 1), start, end));
        assert!(in_range(start, start, start));
    }

    #[test]
    fn test_add_days_crosses_boundaries() {
        assert_eq!(add_days(dt(2024, 2, 28), 1).expect("add"), dt(2024, 2, 29));
        assert_eq!(add_days(dt(2023, 2, 28), 1).expect("add"), dt(2023, 3, 1));
        assert_eq!(add_days(dt(2024, 12, 31), 1).expect("add"), dt(2025, 1, 1));
        assert_eq!(sub_days(dt(2024, 1, 1), 1).expect("sub"), dt(2023, 12, 31));
    }

    #[test]
    fn test_add_days_round_trip() {
        let origin = dt_hms(2024, 3, 10, 2, 30, 0);
        for n in [-400, -31, -7, -1, 0, 1, 7, 31, 365, 1000] {
            let moved = add_days(origin, n).expect("forward");
            assert_eq!(add_days(moved, -n).expect("back"), origin, "n = {n}");
        }
    }

    #[test]
    fn test_add_days_keeps_time_of_day() {
        let moved = add_days(dt_hms(2024, 3, 9, 2, 30, 0), 1).expect("add");
        assert_eq!(moved, dt_hms(2024, 3, 10, 2, 30, 0));
    }

    #[test]
    fn test_add_days_out_of_range() {
        let last = dt(9999, 12, 31);
        assert!(matches!(add_days(last, 1), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_add_months_rolls_year() {
        assert_eq!(add_months(dt(2024, 12, 15), 1).expect("add"), dt(2025, 1, 15));
        assert_eq!(add_months(dt(2024, 1, 15), -1).expect("sub"), dt(2023, 12, 15));
        assert_eq!(add_months(dt(2024, 1, 15), 14).expect("add"), dt(2025, 3, 15));
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(dt(2024, 1, 31), 1).expect("leap"), dt(2024, 2, 29));
        assert_eq!(add_months(dt(2023, 1, 31), 1).expect("common"), dt(2023, 2, 28));
        assert_eq!(add_months(dt(2024, 3, 31), 1).expect("april"), dt(2024, 4, 30));
        assert_eq!(add_months(dt(2024, 3, 31), -1).expect("back"), dt(2024, 2, 29));
    }

    #[test]
    fn test_day_and_month_bounds() {
        let value = dt_hms(2024, 2, 14, 13, 45, 10);
        assert_eq!(start_of_day(value), dt(2024, 2, 14));
        assert_eq!(end_of_day(value), date(2024, 2, 14).to_datetime(END_OF_DAY));
        assert_eq!(start_of_month(value), dt(2024, 2, 1));
        assert_eq!(end_of_month(value), date(2024, 2, 29).to_datetime(END_OF_DAY));
        assert_eq!(end_of_day(value).millisecond(), 999);
    }

    #[test]
    fn test_compare_before_after() {
        let a = dt(2024, 1, 1);
        let b = dt(2024, 1, 2);
        assert_eq!(compare(a, b), Ordering::Less);
        assert_eq!(compare(b, a), Ordering::Greater);
        assert_eq!(compare(a, a), Ordering::Equal);
        assert!(before(a, b));
        assert!(after(b, a));
        assert!(!before(a, a));
        assert!(!after(a, a));
    }

    #[test]
    fn test_duration_is_symmetric() {
        let a = dt(2024, 1, 1);
        let b = dt(2024, 1, 10);
        assert_eq!(duration_ms(a, b), 9 * 86_400_000);
        assert_eq!(duration_ms(b, a), 9 * 86_400_000);
        assert_eq!(duration_ms(a, a), 0);
        assert_eq!(duration(a, b), SignedDuration::from_hours(9 * 24));
    }

    #[test]
    fn test_is_today_week_number_format() {
        let value = dt_hms(2024, 3, 10, 9, 0, 0);
        assert!(is_today(value, date(2024, 3, 10)));
        assert!(!is_today(value, date(2024, 3, 11)));

        assert_eq!(week_number(dt(2024, 1, 1)).expect("week"), 1);
        assert_eq!(week_number(dt(2024, 12, 30)).expect("week"), 1);
        assert_eq!(week_number(dt(2020, 12, 31)).expect("week"), 53);
        assert_eq!(week_number(dt(2021, 1, 3)).expect("week"), 53);
        assert_eq!(week_number(dt(2024, 3, 10)).expect("week"), 10);

        assert_eq!(format_date(value), "2024-03-10");
    }
}
