use crate::consts::{MAX_MINUTE, MAX_MONTH, MAX_YEAR};
use crate::prelude::*;
use crate::range::RangeError;

/// Errors raised while building validated calendar and clock values.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(i16),
    #[display(fmt = "Invalid hour {hour} for {format} format (must be {min}-{max})")]
    InvalidHour { hour: u8, format: &'static str, min: u8, max: u8 },
    #[display(fmt = "Invalid minute: {} (must be 0-{})", "_0", MAX_MINUTE)]
    InvalidMinute(u8),
    #[display(fmt = "12h format requires an AM/PM period")]
    MissingPeriod,
    #[display(fmt = "24h format does not take an AM/PM period")]
    UnexpectedPeriod,
    #[display(fmt = "Invalid format: {_0}")]
    InvalidFormat(String),
}

impl std::error::Error for ParseError {}

/// Top level error for the picker engine.
///
/// Constraint violations are not errors: they are reported as
/// [`ValidationError`](crate::ValidationError) values and never abort a
/// computation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Range(#[from] RangeError),

    /// The identifier is not present in the timezone database.
    #[error("Unknown timezone '{name}'")]
    UnknownTimeZone {
        name:   String,
        #[source]
        source: jiff::Error,
    },

    /// Calendar arithmetic left the representable range.
    #[error("Date out of range: {0}")]
    OutOfRange(#[from] jiff::Error),
}
