//! Timestamp normalization: loosely formatted date/time strings → [`CalTimestamp`].
//!
//! Two lexical forms are accepted and converge once `-` and `:` are stripped:
//!
//! - compact `YYYYMMDDTHHMMSS` (or `YYYYMMDD`)
//! - punctuated ISO-8601 `YYYY-MM-DDTHH:MM:SS` (or `YYYY-MM-DD`)
//!
//! The character at position 8 of the stripped string (normally `T`) is a
//! separator and is never inspected. Anything after position 15 is ignored,
//! so fractional seconds or a trailing `Z` pass through harmlessly.
//!
//! # Example
//! ```
//! use json2ical_core::datetime::{parse_timestamp, Precision};
//!
//! let a = parse_timestamp("2024-01-15T10:00:00", false);
//! let b = parse_timestamp("20240115T100000", false);
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "20240115T100000");
//!
//! let day = parse_timestamp("2024-12-25T09:30:00", true);
//! assert_eq!(day.precision, Precision::Date);
//! assert_eq!(day.to_string(), "20241225");
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::TimestampError;

/// Stripped length of a date-only value (`YYYYMMDD`).
const DATE_LEN: usize = 8;
/// Minimum stripped length of a date-time value (`YYYYMMDDTHHMMSS`).
const DATE_TIME_LEN: usize = 15;

/// Whether a timestamp carries a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Calendar date only; rendered with `VALUE=DATE`.
    Date,
    /// Date plus wall-clock time; rendered with a timezone qualifier.
    #[default]
    DateTime,
}

/// A canonical calendar timestamp, field for field as written in the output.
///
/// Values are not range-checked: `month = 13` survives into the output exactly
/// as supplied. The all-zero value stands in for input that could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CalTimestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub precision: Precision,
}

impl CalTimestamp {
    /// A date-only value at midnight.
    pub fn date(year: u16, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            precision: Precision::Date,
            ..Self::default()
        }
    }

    /// A date-time value.
    pub fn date_time(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            precision: Precision::DateTime,
        }
    }

    /// The zero timestamp (year 0, month 0, day 0) with the given precision.
    pub fn zero(precision: Precision) -> Self {
        Self {
            precision,
            ..Self::default()
        }
    }

    pub fn is_date(&self) -> bool {
        self.precision == Precision::Date
    }

    pub fn is_zero(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }
}

impl fmt::Display for CalTimestamp {
    /// `YYYYMMDD` for dates, `YYYYMMDDTHHMMSS` for date-times. No UTC designator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)?;
        if self.precision == Precision::DateTime {
            write!(f, "T{:02}{:02}{:02}", self.hour, self.minute, self.second)?;
        }
        Ok(())
    }
}

/// How the normalizer reacts to a timestamp it cannot read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPolicy {
    /// Substitute the zero timestamp and keep going.
    #[default]
    Lenient,
    /// Fail the whole load with [`crate::ConvertError::Timestamp`].
    Strict,
}

/// Parse a timestamp, degrading to [`CalTimestamp::zero`] on malformed input.
///
/// When `all_day` is set, or the stripped input is exactly 8 characters, the
/// result is date-only and any time component is dropped. The zero value keeps
/// the precision of the selected mode, so an all-day event stays date-only even
/// when its input was unreadable.
pub fn parse_timestamp(input: &str, all_day: bool) -> CalTimestamp {
    match try_parse_timestamp(input, all_day) {
        Ok(ts) => ts,
        Err(_) => CalTimestamp::zero(select_precision(&strip(input), all_day)),
    }
}

/// Strict variant of [`parse_timestamp`]: the reason for rejection is returned
/// instead of a zero timestamp.
pub fn try_parse_timestamp(input: &str, all_day: bool) -> Result<CalTimestamp, TimestampError> {
    let clean = strip(input);
    let bytes = clean.as_bytes();

    match select_precision(&clean, all_day) {
        Precision::Date => {
            require_len(input, bytes, DATE_LEN)?;
            Ok(CalTimestamp::date(
                digits(input, bytes, 0, 4)?,
                digits(input, bytes, 4, 2)? as u8,
                digits(input, bytes, 6, 2)? as u8,
            ))
        }
        Precision::DateTime => {
            require_len(input, bytes, DATE_TIME_LEN)?;
            Ok(CalTimestamp::date_time(
                digits(input, bytes, 0, 4)?,
                digits(input, bytes, 4, 2)? as u8,
                digits(input, bytes, 6, 2)? as u8,
                digits(input, bytes, 9, 2)? as u8,
                digits(input, bytes, 11, 2)? as u8,
                digits(input, bytes, 13, 2)? as u8,
            ))
        }
    }
}

/// Format an instant as a UTC date-time with the `Z` designator (`DTSTAMP` form).
pub fn format_utc_stamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Remove the ISO-8601 punctuation so both accepted forms line up.
fn strip(input: &str) -> String {
    input.chars().filter(|c| *c != '-' && *c != ':').collect()
}

fn select_precision(clean: &str, all_day: bool) -> Precision {
    if all_day || clean.len() == DATE_LEN {
        Precision::Date
    } else {
        Precision::DateTime
    }
}

fn require_len(input: &str, bytes: &[u8], required: usize) -> Result<(), TimestampError> {
    if bytes.len() < required {
        return Err(TimestampError::TooShort {
            input: input.to_string(),
            len: bytes.len(),
            required,
        });
    }
    Ok(())
}

/// Read `len` ASCII digits starting at `start` as a decimal number.
fn digits(input: &str, bytes: &[u8], start: usize, len: usize) -> Result<u16, TimestampError> {
    let mut value: u16 = 0;
    for (offset, b) in bytes[start..start + len].iter().enumerate() {
        if !b.is_ascii_digit() {
            return Err(TimestampError::NonDigit {
                input: input.to_string(),
                position: start + offset,
            });
        }
        value = value * 10 + u16::from(b - b'0');
    }
    Ok(value)
}
