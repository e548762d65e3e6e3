//! Input validation: a JSON document → a list of [`CalendarEvent`]s.
//!
//! The document is either one event object or an array of event objects.
//! Validation is strict and fail-fast: a record missing `summary`,
//! `start_datetime` or `end_datetime`, or any known field of the wrong JSON
//! type, fails the whole load and no partial list is returned. Unknown fields
//! are ignored and `null` is treated as absent.
//!
//! Unreadable timestamps follow [`TimestampPolicy`]: by default they degrade
//! to the zero timestamp with a warning.
//!
//! # Recognized fields
//!
//! | field             | type             | default |
//! |-------------------|------------------|---------|
//! | `summary`         | string, required |         |
//! | `start_datetime`  | string, required |         |
//! | `end_datetime`    | string, required |         |
//! | `description`     | string           |         |
//! | `location`        | string           |         |
//! | `timezone`        | string           | `UTC`   |
//! | `uid`             | string           | generated |
//! | `organizer_name`  | string           |         |
//! | `organizer_email` | string           |         |
//! | `attendees`       | array of strings | `[]`    |
//! | `all_day_event`   | bool             | `false` |

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::datetime::{parse_timestamp, try_parse_timestamp, CalTimestamp, TimestampPolicy};
use crate::error::{ConvertError, Result};
use crate::event::{CalendarEvent, Organizer, DEFAULT_TIMEZONE};
use crate::uid::UidSource;

/// Knobs for [`events_from_value`] and friends.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub timestamps: TimestampPolicy,
}

/// Read a JSON file and normalize its events.
pub fn load_file(
    path: impl AsRef<Path>,
    options: &NormalizeOptions,
    uids: &dyn UidSource,
) -> Result<Vec<CalendarEvent>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read input document");
    parse_events(&text, options, uids)
}

/// Parse JSON text and normalize its events.
pub fn parse_events(
    json: &str,
    options: &NormalizeOptions,
    uids: &dyn UidSource,
) -> Result<Vec<CalendarEvent>> {
    let value: Value = serde_json::from_str(json)?;
    events_from_value(&value, options, uids)
}

/// Normalize an already-parsed document. Events without a uid get one from `uids`.
pub fn events_from_value(
    value: &Value,
    options: &NormalizeOptions,
    uids: &dyn UidSource,
) -> Result<Vec<CalendarEvent>> {
    let records: Vec<&Map<String, Value>> = match value {
        Value::Object(map) => vec![map],
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_object().ok_or_else(|| {
                    ConvertError::Structure(format!(
                        "array element {} is {}, expected an event object",
                        i,
                        kind(item)
                    ))
                })
            })
            .collect::<Result<_>>()?,
        other => {
            return Err(ConvertError::Structure(format!(
                "expected an event object or an array of them, found {}",
                kind(other)
            )))
        }
    };

    let mut events = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let mut event = event_from_record(index, record, options)?;
        event.ensure_uid(uids);
        events.push(event);
    }

    debug!(count = events.len(), "normalized event records");
    Ok(events)
}

fn event_from_record(
    index: usize,
    record: &Map<String, Value>,
    options: &NormalizeOptions,
) -> Result<CalendarEvent> {
    let summary = required_str(index, record, "summary")?;
    if summary.is_empty() {
        return Err(ConvertError::MissingField {
            index,
            field: "summary",
        });
    }
    let start_raw = required_str(index, record, "start_datetime")?;
    let end_raw = required_str(index, record, "end_datetime")?;

    let all_day = optional_bool(index, record, "all_day_event")?.unwrap_or(false);
    let start = timestamp(index, "start_datetime", start_raw, all_day, options.timestamps)?;
    let end = timestamp(index, "end_datetime", end_raw, all_day, options.timestamps)?;

    let timezone = optional_str(index, record, "timezone")?
        .filter(|tz| !tz.is_empty())
        .unwrap_or(DEFAULT_TIMEZONE);

    let organizer_name = non_empty(optional_str(index, record, "organizer_name")?);
    let organizer = non_empty(optional_str(index, record, "organizer_email")?).map(|email| {
        Organizer {
            name: organizer_name,
            email,
        }
    });

    Ok(CalendarEvent {
        summary: summary.to_string(),
        description: non_empty(optional_str(index, record, "description")?),
        location: non_empty(optional_str(index, record, "location")?),
        start,
        end,
        timezone: timezone.to_string(),
        uid: optional_str(index, record, "uid")?.unwrap_or_default().to_string(),
        organizer,
        attendees: string_array(index, record, "attendees")?,
        all_day,
    })
}

fn timestamp(
    index: usize,
    field: &'static str,
    raw: &str,
    all_day: bool,
    policy: TimestampPolicy,
) -> Result<CalTimestamp> {
    match try_parse_timestamp(raw, all_day) {
        Ok(ts) => Ok(ts),
        Err(source) => match policy {
            TimestampPolicy::Strict => Err(ConvertError::Timestamp {
                index,
                field,
                source,
            }),
            TimestampPolicy::Lenient => {
                warn!(index, field, error = %source, "unreadable timestamp, substituting zero date");
                Ok(parse_timestamp(raw, all_day))
            }
        },
    }
}

fn optional_str<'a>(
    index: usize,
    record: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ConvertError::InvalidField {
            index,
            field,
            expected: "a string",
        }),
    }
}

fn required_str<'a>(
    index: usize,
    record: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str> {
    optional_str(index, record, field)?.ok_or(ConvertError::MissingField { index, field })
}

fn optional_bool(index: usize, record: &Map<String, Value>, field: &'static str) -> Result<Option<bool>> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ConvertError::InvalidField {
            index,
            field,
            expected: "a boolean",
        }),
    }
}

fn string_array(index: usize, record: &Map<String, Value>, field: &'static str) -> Result<Vec<String>> {
    let invalid = || ConvertError::InvalidField {
        index,
        field,
        expected: "an array of strings",
    };
    match record.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
            .collect(),
        Some(_) => Err(invalid()),
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.is_empty()).map(str::to_string)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
