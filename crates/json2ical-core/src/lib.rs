//! # json2ical-core
//!
//! Converts calendar event records from a JSON document into **iCalendar**
//! (RFC 5545) text.
//!
//! The input is a single event object or an array of them. Each record is
//! validated into a [`CalendarEvent`], its loosely formatted timestamps are
//! normalized, missing UIDs are generated, and the list is serialized into
//! one VCALENDAR with CRLF line endings, escaped text values and folded long
//! lines.
//!
//! ## Quick start
//!
//! ```rust
//! use json2ical_core::convert;
//!
//! let json = r#"{"summary":"Meeting",
//!                "start_datetime":"2024-01-15T10:00:00",
//!                "end_datetime":"2024-01-15T11:00:00",
//!                "timezone":"America/New_York"}"#;
//! let ics = convert(json).unwrap();
//! assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
//! assert!(ics.contains("DTSTART;TZID=America/New_York:20240115T100000\r\n"));
//! assert!(ics.contains("STATUS:CONFIRMED\r\n"));
//! ```
//!
//! ## Modules
//!
//! - [`normalize`] — JSON document → validated `CalendarEvent` list
//! - [`datetime`] — timestamp strings → `CalTimestamp`
//! - [`serializer`] — `CalendarEvent` list → iCalendar text
//! - [`escape`] — TEXT value escaping and parameter quoting
//! - [`uid`] — UID generation behind the `UidSource` trait
//! - [`event`] — the event data model
//! - [`error`] — error types

pub mod datetime;
pub mod error;
pub mod escape;
pub mod event;
pub mod normalize;
pub mod serializer;
pub mod uid;

pub use datetime::{parse_timestamp, try_parse_timestamp, CalTimestamp, Precision, TimestampPolicy};
pub use error::{ConvertError, Result, TimestampError};
pub use event::{CalendarEvent, Organizer};
pub use normalize::{events_from_value, load_file, parse_events, NormalizeOptions};
pub use serializer::{render_calendar, CalendarBuilder, CalendarConfig, MethodMarker};
pub use uid::{ClockRandomUid, SequenceUid, UidSource};

/// Convert JSON text to iCalendar text with default settings.
///
/// Fails only if the document does not validate; see [`normalize`].
pub fn convert(json: &str) -> Result<String> {
    let uids = ClockRandomUid::default();
    convert_with(json, &NormalizeOptions::default(), &CalendarBuilder::new(), &uids)
}

/// Convert JSON text using explicit normalizer options, serializer and UID source.
pub fn convert_with(
    json: &str,
    options: &NormalizeOptions,
    builder: &CalendarBuilder,
    uids: &dyn UidSource,
) -> Result<String> {
    let events = parse_events(json, options, uids)?;
    Ok(builder.render(&events))
}
