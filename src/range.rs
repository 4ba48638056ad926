use std::{cmp::Ordering, str::FromStr};

use jiff::SignedDuration;
use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::{RANGE_SEPARATOR, date, prelude::*};

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: DateTime, end: DateTime },

    /// An end was given without a start.
    #[error("Invalid date range: end ({0}) is set without a start")]
    EndWithoutStart(DateTime),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

/// Where a selection is in the two-pick protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SelectionPhase {
    /// Nothing picked yet.
    #[display(fmt = "empty")]
    Empty,
    /// Start picked, waiting for the end.
    #[display(fmt = "partial")]
    PartialStart,
    /// Both endpoints picked.
    #[display(fmt = "complete")]
    Complete,
}

/// The caller-owned working selection.
///
/// An end is never set without a start. Picking keeps the endpoints in
/// order, but editing an endpoint's time of day can leave them reversed;
/// validation reports that and [`normalized`](Self::normalized) swaps them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeParts")]
pub struct DateRangeState {
    start: Option<DateTime>,
    end:   Option<DateTime>,
}

#[derive(Deserialize)]
struct RangeParts {
    start: Option<DateTime>,
    end:   Option<DateTime>,
}

impl TryFrom<RangeParts> for DateRangeState {
    type Error = RangeError;

    fn try_from(parts: RangeParts) -> Result<Self, Self::Error> {
        Self::new(parts.start, parts.end)
    }
}

impl DateRangeState {
    /// Creates a selection.
    ///
    /// # Errors
    /// Returns `RangeError::EndWithoutStart` if `end` is set and `start` isn't.
    pub fn new(start: Option<DateTime>, end: Option<DateTime>) -> Result<Self, RangeError> {
        match (start, end) {
            (None, Some(end)) => Err(RangeError::EndWithoutStart(end)),
            _ => Ok(Self { start, end }),
        }
    }

    pub const fn empty() -> Self {
        Self {
            start: None,
            end:   None,
        }
    }

    pub const fn start(&self) -> Option<DateTime> {
        self.start
    }

    pub const fn end(&self) -> Option<DateTime> {
        self.end
    }

    pub const fn phase(&self) -> SelectionPhase {
        match (self.start, self.end) {
            (None, _) => SelectionPhase::Empty,
            (Some(_), None) => SelectionPhase::PartialStart,
            (Some(_), Some(_)) => SelectionPhase::Complete,
        }
    }

    /// Applies a date pick.
    ///
    /// An empty or complete selection restarts with `dt` as the start. A
    /// partial selection completes; if `dt` precedes the start the two are
    /// swapped so the earlier one becomes the start.
    #[must_use]
    pub fn pick(self, dt: DateTime) -> Self {
        match (self.start, self.end) {
            (Some(start), None) if date::before(dt, start) => Self {
                start: Some(dt),
                end:   Some(start),
            },
            (Some(start), None) => Self {
                start: Some(start),
                end:   Some(dt),
            },
            _ => Self {
                start: Some(dt),
                end:   None,
            },
        }
    }

    /// Replaces the start, keeping the end.
    #[must_use]
    pub const fn with_start(self, start: DateTime) -> Self {
        Self {
            start: Some(start),
            end:   self.end,
        }
    }

    /// Replaces the end of a selection that has a start.
    ///
    /// # Errors
    /// Returns `RangeError::EndWithoutStart` on an empty selection.
    pub fn with_end(self, end: DateTime) -> Result<Self, RangeError> {
        Self::new(self.start, Some(end))
    }

    /// Swaps the endpoints if the end precedes the start.
    #[must_use]
    pub fn normalized(self) -> Self {
        match (self.start, self.end) {
            (Some(start), Some(end)) if date::after(start, end) => Self {
                start: Some(end),
                end:   Some(start),
            },
            _ => self,
        }
    }

    /// The ordered range when both endpoints are set.
    pub fn as_complete(&self) -> Option<CompleteRange> {
        let normalized = self.normalized();
        Some(CompleteRange {
            start: normalized.start?,
            end:   normalized.end?,
        })
    }
}

impl From<CompleteRange> for DateRangeState {
    fn from(range: CompleteRange) -> Self {
        Self {
            start: Some(range.start),
            end:   Some(range.end),
        }
    }
}

/// A range with both endpoints set (inclusive).
/// The start must be less than or equal to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct CompleteRange {
    start: DateTime,
    end:   DateTime,
}

impl CompleteRange {
    /// Creates a new range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: DateTime, end: DateTime) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> DateTime {
        self.start
    }

    pub const fn end(&self) -> DateTime {
        self.end
    }

    /// Returns both start and end as a tuple
    pub const fn dates(&self) -> (DateTime, DateTime) {
        (self.start, self.end)
    }

    /// Checks if the range contains a given value, inclusive at both ends
    pub fn contains(&self, dt: DateTime) -> bool {
        date::in_range(dt, self.start, self.end)
    }

    /// Checks if this range shares any instant with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    pub fn duration(&self) -> SignedDuration {
        date::duration(self.start, self.end)
    }
}

impl FromStr for CompleteRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // ISO 8601 interval: use RANGE_SEPARATOR to separate start/end
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;
                let start = parse_endpoint(start_str)?;
                let end = parse_endpoint(end_str)?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

fn parse_endpoint(s: &str) -> Result<DateTime, RangeError> {
    let trimmed = s.trim();
    trimmed
        .parse::<DateTime>()
        .map_err(|err| RangeError::InvalidFormat(format!("{trimmed}: {err}")))
}

impl PartialOrd for CompleteRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CompleteRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare start dates first, then end dates
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl Serialize for CompleteRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CompleteRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{dt, dt_hms};

    #[test]
    fn test_new_state_rejects_end_without_start() {
        assert!(DateRangeState::new(None, None).is_ok());
        assert!(DateRangeState::new(Some(dt(2024, 1, 1)), None).is_ok());
        assert!(DateRangeState::new(Some(dt(2024, 1, 5)), Some(dt(2024, 1, 1))).is_ok());
        assert_eq!(
            DateRangeState::new(None, Some(dt(2024, 1, 1))),
            Err(RangeError::EndWithoutStart(dt(2024, 1, 1)))
        );
    }

    #[test]
    fn test_pick_transitions() {
        let state = DateRangeState::empty();
        assert_eq!(state.phase(), SelectionPhase::Empty);

        let state = state.pick(dt(2024, 6, 10));
        assert_eq!(state.phase(), SelectionPhase::PartialStart);
        assert_eq!(state.start(), Some(dt(2024, 6, 10)));
        assert_eq!(state.end(), None);

        let state = state.pick(dt(2024, 6, 15));
        assert_eq!(state.phase(), SelectionPhase::Complete);
        assert_eq!(state.start(), Some(dt(2024, 6, 10)));
        assert_eq!(state.end(), Some(dt(2024, 6, 15)));

        // Picking again after completion restarts the selection.
        let state = state.pick(dt(2024, 7, 1));
        assert_eq!(state.phase(), SelectionPhase::PartialStart);
        assert_eq!(state.start(), Some(dt(2024, 7, 1)));
        assert_eq!(state.end(), None);
    }

    #[test]
    fn test_pick_reverse_order_swaps() {
        let state = DateRangeState::empty().pick(dt(2024, 6, 15)).pick(dt(2024, 6, 10));
        assert_eq!(state.phase(), SelectionPhase::Complete);
        assert_eq!(state.start(), Some(dt(2024, 6, 10)));
        assert_eq!(state.end(), Some(dt(2024, 6, 15)));
    }

    #[test]
    fn test_pick_same_date_is_zero_length() {
        let day = dt(2024, 6, 15);
        let state = DateRangeState::empty().pick(day).pick(day);
        assert_eq!(state.phase(), SelectionPhase::Complete);
        assert_eq!(state.as_complete().map(|r| r.duration()), Some(SignedDuration::ZERO));
    }

    #[test]
    fn test_normalized_swaps_out_of_order() {
        let state = DateRangeState::new(Some(dt(2024, 3, 20)), Some(dt(2024, 3, 10))).expect("state");
        let normalized = state.normalized();
        assert_eq!(normalized.start(), Some(dt(2024, 3, 10)));
        assert_eq!(normalized.end(), Some(dt(2024, 3, 20)));
        assert_eq!(normalized.normalized(), normalized);

        let complete = state.as_complete().expect("complete");
        assert_eq!(complete.dates(), (dt(2024, 3, 10), dt(2024, 3, 20)));

        assert!(DateRangeState::empty().pick(dt(2024, 1, 1)).as_complete().is_none());
    }

    #[test]
    fn test_with_start_and_end() {
        let state = DateRangeState::empty().pick(dt(2024, 3, 10));
        let state = state.with_end(dt(2024, 3, 12)).expect("end after start");
        assert_eq!(state.end(), Some(dt(2024, 3, 12)));

        let state = state.with_start(dt_hms(2024, 3, 10, 9, 30, 0));
        assert_eq!(state.start(), Some(dt_hms(2024, 3, 10, 9, 30, 0)));

        assert!(DateRangeState::empty().with_end(dt(2024, 3, 12)).is_err());
    }

    #[test]
    fn test_state_serde() {
        let state = DateRangeState::empty().pick(dt(2024, 3, 10)).pick(dt(2024, 3, 12));
        let json = serde_json::to_string(&state).expect("serialize state");
        assert_eq!(json, r#"{"start":"2024-03-10T00:00:00","end":"2024-03-12T00:00:00"}"#);

        let parsed: DateRangeState = serde_json::from_str(&json).expect("deserialize state");
        assert_eq!(parsed, state);

        let invalid = serde_json::from_str::<DateRangeState>(r#"{"start":null,"end":"2024-03-12T00:00:00"}"#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_new_range_cases() {
        struct TestCase {
            start:          DateTime,
            end:            DateTime,
            should_succeed: bool,
            description:    &'static str,
        }

        let cases = [
            TestCase {
                start:          dt(2024, 1, 1),
                end:            dt(2024, 1, 31),
                should_succeed: true,
                description:    "valid range (start < end)",
            },
            TestCase {
                start:          dt(2024, 1, 31),
                end:            dt(2024, 1, 1),
                should_succeed: false,
                description:    "invalid range (start > end)",
            },
            TestCase {
                start:          dt(2024, 1, 1),
                end:            dt(2024, 1, 1),
                should_succeed: true,
                description:    "equal dates (start == end)",
            },
        ];

        for case in &cases {
            let range = CompleteRange::new(case.start, case.end);

            if case.should_succeed {
                assert!(range.is_ok(), "Expected success for: {}", case.description);
            } else {
                assert!(range.is_err(), "Expected failure for: {}", case.description);
            }
        }
    }

    #[test]
    fn test_contains_overlaps_within() {
        let outer = CompleteRange::new(dt(2024, 3, 1), dt(2024, 3, 31)).expect("outer");
        let inner = CompleteRange::new(dt(2024, 3, 10), dt(2024, 3, 20)).expect("inner");
        let later = CompleteRange::new(dt(2024, 4, 1), dt(2024, 4, 30)).expect("later");

        assert!(outer.contains(dt(2024, 3, 1)));
        assert!(outer.contains(dt(2024, 3, 31)));
        assert!(!outer.contains(dt_hms(2024, 3, 31, 0, 0, 1)));

        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
        assert!(!outer.overlaps(&later));

        assert!(inner.is_within(&outer));
        assert!(!outer.is_within(&inner));
    }

    #[test]
    fn test_display_and_from_str() {
        let range = CompleteRange::new(dt(2024, 3, 10), dt_hms(2024, 3, 20, 18, 0, 0)).expect("range");
        assert_eq!(range.to_string(), "2024-03-10T00:00:00/2024-03-20T18:00:00");

        let parsed: CompleteRange = "2024-03-10T00:00:00 / 2024-03-20T18:00:00".parse().expect("parse");
        assert_eq!(parsed, range);

        let date_only: CompleteRange = "2024-03-10/2024-03-20".parse().expect("date-only endpoints");
        assert_eq!(date_only.end(), dt(2024, 3, 20));
    }

    #[test]
    fn test_from_str_errors() {
        assert!(matches!(
            "2024-03-20/2024-03-10".parse::<CompleteRange>(),
            Err(RangeError::InvalidRange { .. })
        ));

        let err = "2024-03-10".parse::<CompleteRange>().expect_err("no separator");
        assert!(err.to_string().contains("No range separator found"));

        let err = "2024-03-10/2024-03-11/2024-03-12"
            .parse::<CompleteRange>()
            .expect_err("too many separators");
        assert!(err.to_string().contains("expected 1, found 2"));

        assert!("2024-13-01/2024-03-11".parse::<CompleteRange>().is_err());
    }

    #[test]
    fn test_ordering() {
        let first = CompleteRange::new(dt(2024, 1, 1), dt(2024, 1, 10)).expect("first");
        let same_start = CompleteRange::new(dt(2024, 1, 1), dt(2024, 1, 20)).expect("same start");
        let second = CompleteRange::new(dt(2024, 2, 1), dt(2024, 2, 2)).expect("second");
        assert!(first < same_start);
        assert!(same_start < second);
    }

    #[test]
    fn test_serde_string_format() {
        let range = CompleteRange::new(dt(2024, 1, 1), dt(2024, 1, 10)).expect("range");
        let json = serde_json::to_string(&range).expect("serialize range");
        assert_eq!(json, r#""2024-01-01T00:00:00/2024-01-10T00:00:00""#);

        let parsed: CompleteRange = serde_json::from_str(&json).expect("deserialize range");
        assert_eq!(parsed, range);
    }
}
