//! Time-of-day entry in 12 or 24 hour format.

use jiff::Timestamp;
use jiff::civil::{DateTime, Time};
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HOUR_12, MAX_HOUR_24, MAX_MINUTE, MIN_HOUR_12};
use crate::prelude::*;
use crate::tz::{self, TimeZoneId};
use crate::{Error, ParseError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    #[display(fmt = "12h")]
    H12,
    #[default]
    #[serde(rename = "24h")]
    #[display(fmt = "24h")]
    H24,
}

impl TimeFormat {
    /// Inclusive hour bounds for this format.
    pub const fn hour_bounds(self) -> (u8, u8) {
        match self {
            Self::H12 => (MIN_HOUR_12, MAX_HOUR_12),
            Self::H24 => (0, MAX_HOUR_24),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
pub enum Period {
    #[display(fmt = "AM")]
    Am,
    #[display(fmt = "PM")]
    Pm,
}

/// An hour and minute as entered, with a period exactly when the format is 12h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeState {
    format: TimeFormat,
    hour:   u8,
    minute: u8,
    period: Option<Period>,
}

impl TimeState {
    /// Creates a validated time.
    ///
    /// # Errors
    /// Returns a `ParseError` if the hour is outside the format's range, the
    /// minute is over 59, or the period is missing (12h) or present (24h).
    pub fn new(format: TimeFormat, hour: u8, minute: u8, period: Option<Period>) -> Result<Self, ParseError> {
        check_hour(format, hour)?;
        check_minute(minute)?;
        match (format, period) {
            (TimeFormat::H12, None) => return Err(ParseError::MissingPeriod),
            (TimeFormat::H24, Some(_)) => return Err(ParseError::UnexpectedPeriod),
            _ => {},
        }
        Ok(Self {
            format,
            hour,
            minute,
            period,
        })
    }

    /// Midnight: 12:00 AM or 00:00.
    pub const fn default_for(format: TimeFormat) -> Self {
        match format {
            TimeFormat::H12 => Self {
                format,
                hour: MAX_HOUR_12,
                minute: 0,
                period: Some(Period::Am),
            },
            TimeFormat::H24 => Self {
                format,
                hour: 0,
                minute: 0,
                period: None,
            },
        }
    }

    /// Reads the hour and minute of `dt` in the given format.
    pub fn from_wall_clock(dt: DateTime, format: TimeFormat) -> Self {
        let hour24 = dt.hour().cast_unsigned();
        let minute = dt.minute().cast_unsigned();
        match format {
            TimeFormat::H24 => Self {
                format,
                hour: hour24,
                minute,
                period: None,
            },
            TimeFormat::H12 => {
                let period = if hour24 >= 12 { Period::Pm } else { Period::Am };
                let hour = match hour24 % 12 {
                    0 => MAX_HOUR_12,
                    h => h,
                };
                Self {
                    format,
                    hour,
                    minute,
                    period: Some(period),
                }
            },
        }
    }

    pub const fn format(&self) -> TimeFormat {
        self.format
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn period(&self) -> Option<Period> {
        self.period
    }

    /// # Errors
    /// Returns `ParseError::InvalidHour` if `hour` is outside the format's range.
    pub fn with_hour(self, hour: u8) -> Result<Self, ParseError> {
        check_hour(self.format, hour)?;
        Ok(Self { hour, ..self })
    }

    /// # Errors
    /// Returns `ParseError::InvalidMinute` if `minute` is over 59.
    pub fn with_minute(self, minute: u8) -> Result<Self, ParseError> {
        check_minute(minute)?;
        Ok(Self { minute, ..self })
    }

    /// # Errors
    /// Returns `ParseError::UnexpectedPeriod` for a 24h time.
    pub fn with_period(self, period: Period) -> Result<Self, ParseError> {
        match self.format {
            TimeFormat::H12 => Ok(Self {
                period: Some(period),
                ..self
            }),
            TimeFormat::H24 => Err(ParseError::UnexpectedPeriod),
        }
    }

    /// Hour on a 24 hour clock: 12 AM is 0, 12 PM is 12, 1 PM is 13.
    pub const fn to_24_hour(&self) -> u8 {
        match (self.period, self.hour) {
            (Some(Period::Am), MAX_HOUR_12) => 0,
            (Some(Period::Pm), h) if h != MAX_HOUR_12 => h + 12,
            (_, h) => h,
        }
    }

    fn to_time(self) -> Result<Time, Error> {
        Ok(Time::new(self.to_24_hour().cast_signed(), self.minute.cast_signed(), 0, 0)?)
    }

    /// `dt` with this hour and minute; seconds and sub-seconds are zeroed.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the fields do not form a valid time.
    pub fn combine(&self, dt: DateTime) -> Result<DateTime, Error> {
        Ok(dt.date().to_datetime(self.to_time()?))
    }

    /// The instant at which the wall clock in `tz` shows this time on `dt`'s day.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the result is not representable.
    pub fn combine_in_zone(&self, dt: DateTime, tz: &TimeZoneId) -> Result<Timestamp, Error> {
        tz::to_instant(self.combine(dt)?, tz)
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::default_for(TimeFormat::default())
    }
}

fn check_hour(format: TimeFormat, hour: u8) -> Result<(), ParseError> {
    let (min, max) = format.hour_bounds();
    if hour < min || hour > max {
        return Err(ParseError::InvalidHour {
            hour,
            format: match format {
                TimeFormat::H12 => "12h",
                TimeFormat::H24 => "24h",
            },
            min,
            max,
        });
    }
    Ok(())
}

fn check_minute(minute: u8) -> Result<(), ParseError> {
    if minute > MAX_MINUTE {
        return Err(ParseError::InvalidMinute(minute));
    }
    Ok(())
}

/// `21:05` in 24h format, `9:05 PM` in 12h format.
pub fn format_time(dt: DateTime, format: TimeFormat) -> String {
    let time = TimeState::from_wall_clock(dt, format);
    match time.period {
        Some(period) => format!("{}:{:02} {period}", time.hour, time.minute),
        None => format!("{:02}:{:02}", time.hour, time.minute),
    }
}
