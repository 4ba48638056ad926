//! Constraint checks for single dates and two-endpoint ranges.
//!
//! Violations are reported, never fatal: every check returns a
//! [`ValidationError`] value describing the broken rule and the bound or
//! date involved, and the selection itself is left untouched.

use std::collections::BTreeSet;

use jiff::SignedDuration;
use jiff::civil::{Date, DateTime, Time};
use serde::{Deserialize, Serialize};

use crate::consts::MILLIS_PER_DAY;
use crate::date::{self, after, before, format_date};
use crate::prelude::*;

/// Optional limits on what may be selected. Absent fields are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateRangeConstraints {
    pub min_date:       Option<DateTime>,
    pub max_date:       Option<DateTime>,
    pub blackout_dates: BTreeSet<Date>,
    /// Longest allowed distance between the endpoints, in milliseconds on the wire.
    #[serde(with = "millis")]
    pub max_duration:   Option<SignedDuration>,
}

impl DateRangeConstraints {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn with_min_date(mut self, min_date: DateTime) -> Self {
        self.min_date = Some(min_date);
        self
    }

    pub fn with_max_date(mut self, max_date: DateTime) -> Self {
        self.max_date = Some(max_date);
        self
    }

    pub fn with_blackout_dates<I: IntoIterator<Item = Date>>(mut self, dates: I) -> Self {
        self.blackout_dates.extend(dates);
        self
    }

    pub fn with_max_duration(mut self, max_duration: SignedDuration) -> Self {
        self.max_duration = Some(max_duration);
        self
    }

    /// Day-granularity blackout membership.
    pub fn is_blackout(&self, dt: DateTime) -> bool {
        self.blackout_dates.contains(&dt.date())
    }
}

/// Which part of the selection an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum ErrorField {
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "end")]
    End,
    #[display(fmt = "range")]
    Range,
    #[display(fmt = "duration")]
    Duration,
}

/// The rule a selection broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum Violation {
    #[display(fmt = "minimum date")]
    MinDate,
    #[display(fmt = "maximum date")]
    MaxDate,
    #[display(fmt = "blackout date")]
    Blackout,
    #[display(fmt = "range order")]
    RangeOrder,
    #[display(fmt = "maximum duration")]
    MaxDuration,
}

/// A reported constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display(fmt = "{field}: {message}")]
pub struct ValidationError {
    pub field:     ErrorField,
    pub violation: Violation,
    pub message:   String,
}

impl ValidationError {
    fn new(field: ErrorField, violation: Violation, message: String) -> Self {
        Self {
            field,
            violation,
            message,
        }
    }

    /// Same violation and message, attributed to `field`.
    #[must_use]
    pub fn for_field(self, field: ErrorField) -> Self {
        Self { field, ..self }
    }
}

/// Fails when `dt` is earlier than `min_date`.
pub fn check_min(dt: DateTime, min_date: Option<DateTime>) -> Option<ValidationError> {
    let min_date = min_date?;
    before(dt, min_date).then(|| {
        ValidationError::new(
            ErrorField::Start,
            Violation::MinDate,
            format!("Date cannot be before {}", format_date(min_date)),
        )
    })
}

/// Fails when `dt` is later than `max_date`.
pub fn check_max(dt: DateTime, max_date: Option<DateTime>) -> Option<ValidationError> {
    let max_date = max_date?;
    after(dt, max_date).then(|| {
        ValidationError::new(
            ErrorField::End,
            Violation::MaxDate,
            format!("Date cannot be after {}", format_date(max_date)),
        )
    })
}

/// Fails when the calendar day of `dt` is blacked out.
pub fn check_blackout(dt: DateTime, blackout_dates: &BTreeSet<Date>) -> Option<ValidationError> {
    blackout_dates.contains(&dt.date()).then(|| {
        ValidationError::new(
            ErrorField::Start,
            Violation::Blackout,
            format!("{} is not available for selection", format_date(dt)),
        )
    })
}

/// Fails when the endpoints are further apart than `max_duration`.
///
/// A zero or negative maximum is treated as no maximum.
pub fn check_max_duration(
    start: DateTime,
    end: DateTime,
    max_duration: Option<SignedDuration>,
) -> Option<ValidationError> {
    let max_duration = max_duration.filter(|max| max.is_positive())?;
    (date::duration(start, end) > max_duration).then(|| {
        let max_ms = i64::try_from(max_duration.as_millis()).unwrap_or(i64::MAX);
        ValidationError::new(
            ErrorField::Duration,
            Violation::MaxDuration,
            format!("Range duration cannot exceed {} days", max_ms / MILLIS_PER_DAY),
        )
    })
}

fn check_endpoint(dt: DateTime, constraints: &DateRangeConstraints) -> [Option<ValidationError>; 3] {
    [
        check_min(dt, constraints.min_date),
        check_max(dt, constraints.max_date),
        check_blackout(dt, &constraints.blackout_dates),
    ]
}

/// True when no single-date rule rejects `dt`.
pub fn is_selectable(dt: DateTime, constraints: &DateRangeConstraints) -> bool {
    check_endpoint(dt, constraints).iter().all(Option::is_none)
}

/// Validates a (possibly partial) selection against every constraint.
///
/// Errors are ordered: start endpoint checks, end endpoint checks, range
/// order, then duration. Each endpoint's errors are attributed to that
/// endpoint regardless of the rule's natural field.
pub fn validate_range(
    start: Option<DateTime>,
    end: Option<DateTime>,
    constraints: &DateRangeConstraints,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (endpoint, field) in [(start, ErrorField::Start), (end, ErrorField::End)] {
        if let Some(dt) = endpoint {
            errors.extend(
                check_endpoint(dt, constraints)
                    .into_iter()
                    .flatten()
                    .map(|error| error.for_field(field)),
            );
        }
    }

    if let (Some(start), Some(end)) = (start, end) {
        if after(start, end) {
            errors.push(ValidationError::new(
                ErrorField::Range,
                Violation::RangeOrder,
                "Start date must be before end date".to_owned(),
            ));
        }
        errors.extend(check_max_duration(start, end, constraints.max_duration));
    }

    trace!("validated {start:?}..{end:?}: {} error(s)", errors.len());
    errors
}

/// Blackout days falling inside the inclusive range, in calendar order.
pub fn blackout_dates_in_range(
    start: DateTime,
    end: DateTime,
    constraints: &DateRangeConstraints,
) -> Vec<Date> {
    constraints
        .blackout_dates
        .iter()
        .copied()
        .filter(|day| date::in_range(day.to_datetime(Time::midnight()), start, end))
        .collect()
}

/// `Option<SignedDuration>` as integer milliseconds.
mod millis {
    use jiff::SignedDuration;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<SignedDuration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => {
                let millis = i64::try_from(duration.as_millis()).map_err(serde::ser::Error::custom)?;
                serializer.serialize_some(&millis)
            },
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<SignedDuration>, D::Error> {
        Ok(Option::<i64>::deserialize(deserializer)?.map(SignedDuration::from_millis))
    }
}
