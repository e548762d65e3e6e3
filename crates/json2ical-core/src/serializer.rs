//! iCalendar serializer — [`CalendarEvent`]s → RFC 5545 text.
//!
//! Output is one VCALENDAR envelope holding one VEVENT block per event, in
//! input order. Every content line ends in CRLF, and lines longer than 75
//! octets are folded (CRLF followed by a single space) on UTF-8 character
//! boundaries.
//!
//! Per-event property order is fixed:
//!
//! ```text
//! BEGIN:VEVENT
//! UID, SUMMARY, [DESCRIPTION], [LOCATION], DTSTART, DTEND, DTSTAMP,
//! [ORGANIZER], ATTENDEE*, STATUS:CONFIRMED
//! END:VEVENT
//! ```
//!
//! # Example
//! ```
//! use chrono::{TimeZone, Utc};
//! use json2ical_core::datetime::CalTimestamp;
//! use json2ical_core::event::CalendarEvent;
//! use json2ical_core::serializer::CalendarBuilder;
//!
//! let event = CalendarEvent::new(
//!     "Standup",
//!     CalTimestamp::date_time(2024, 1, 15, 9, 0, 0),
//!     CalTimestamp::date_time(2024, 1, 15, 9, 15, 0),
//! )
//! .with_uid("standup-1@example.com")
//! .with_timezone("Europe/Berlin");
//!
//! let ics = CalendarBuilder::new()
//!     .stamp_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
//!     .render(&[event]);
//! assert!(ics.contains("DTSTART;TZID=Europe/Berlin:20240115T090000\r\n"));
//! assert!(ics.contains("DTSTAMP:20240101T000000Z\r\n"));
//! ```

use chrono::{DateTime, Utc};

use crate::datetime::{format_utc_stamp, CalTimestamp, Precision};
use crate::escape::{escape_text, quote_param};
use crate::event::CalendarEvent;
use crate::uid::{ClockRandomUid, UidSource};

/// PRODID written when none is configured.
pub const DEFAULT_PRODUCT_ID: &str = "-//JSON to iCal Converter//EN";

/// Longest content line, in octets, before folding kicks in.
const MAX_LINE_OCTETS: usize = 75;

const CRLF: &str = "\r\n";

/// Whether the envelope carries `METHOD:PUBLISH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MethodMarker {
    #[default]
    Present,
    Absent,
}

/// Envelope-level settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConfig {
    pub product_id: String,
    pub method: MethodMarker,
    /// Fold lines longer than 75 octets. Disable only for consumers that
    /// cannot unfold.
    pub fold_lines: bool,
    /// Append `Z` to timed values in the UTC zone. Off by default, which
    /// leaves them floating.
    pub utc_designator: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            method: MethodMarker::Present,
            fold_lines: true,
            utc_designator: false,
        }
    }
}

/// Renders an event list into a complete calendar document.
///
/// Holds no event state; [`CalendarBuilder::render`] is a read-only pass over
/// the slice it is given and may be called any number of times.
pub struct CalendarBuilder {
    config: CalendarConfig,
    uids: Box<dyn UidSource>,
    stamp: Option<DateTime<Utc>>,
}

impl CalendarBuilder {
    pub fn new() -> Self {
        Self::with_config(CalendarConfig::default())
    }

    pub fn with_config(config: CalendarConfig) -> Self {
        Self {
            config,
            uids: Box::new(ClockRandomUid::default()),
            stamp: None,
        }
    }

    /// Source for events whose `uid` is still empty at render time.
    pub fn uid_source(mut self, uids: impl UidSource + 'static) -> Self {
        self.uids = Box::new(uids);
        self
    }

    /// Pin DTSTAMP to a fixed instant instead of the current time.
    pub fn stamp_at(mut self, instant: DateTime<Utc>) -> Self {
        self.stamp = Some(instant);
        self
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Render the full document. An empty slice yields a valid, event-less envelope.
    pub fn render(&self, events: &[CalendarEvent]) -> String {
        let stamp = format_utc_stamp(self.stamp.unwrap_or_else(Utc::now));
        let mut out = ContentWriter::new(self.config.fold_lines);

        out.line("BEGIN:VCALENDAR");
        out.line("VERSION:2.0");
        out.property("PRODID", &[], &self.config.product_id);
        out.line("CALSCALE:GREGORIAN");
        if self.config.method == MethodMarker::Present {
            out.line("METHOD:PUBLISH");
        }

        for event in events {
            self.write_event(event, &stamp, &mut out);
        }

        out.line("END:VCALENDAR");
        out.finish()
    }

    fn write_event(&self, event: &CalendarEvent, stamp: &str, out: &mut ContentWriter) {
        out.line("BEGIN:VEVENT");

        if event.uid.is_empty() {
            out.property("UID", &[], &self.uids.next_uid());
        } else {
            out.property("UID", &[], &event.uid);
        }
        out.property("SUMMARY", &[], &escape_text(&event.summary));

        if let Some(description) = event.description.as_deref().filter(|s| !s.is_empty()) {
            out.property("DESCRIPTION", &[], &escape_text(description));
        }
        if let Some(location) = event.location.as_deref().filter(|s| !s.is_empty()) {
            out.property("LOCATION", &[], &escape_text(location));
        }

        write_timestamp(out, &self.config, "DTSTART", &event.start, event);
        write_timestamp(out, &self.config, "DTEND", &event.end, event);
        out.property("DTSTAMP", &[], stamp);

        if let Some(organizer) = event.organizer.as_ref().filter(|o| !o.email.is_empty()) {
            let mut params = Vec::new();
            if let Some(name) = organizer.name.as_deref().filter(|n| !n.is_empty()) {
                params.push(("CN", quote_param(name)));
            }
            out.property("ORGANIZER", &params, &format!("mailto:{}", organizer.email));
        }

        for attendee in &event.attendees {
            out.property(
                "ATTENDEE",
                &[
                    ("ROLE", "REQ-PARTICIPANT".to_string()),
                    ("PARTSTAT", "NEEDS-ACTION".to_string()),
                    ("RSVP", "TRUE".to_string()),
                ],
                &format!("mailto:{}", attendee),
            );
        }

        out.line("STATUS:CONFIRMED");
        out.line("END:VEVENT");
    }
}

impl Default for CalendarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render with default settings and the current time as DTSTAMP.
pub fn render_calendar(events: &[CalendarEvent]) -> String {
    CalendarBuilder::new().render(events)
}

/// DTSTART/DTEND. All-day events and date-precision values get `VALUE=DATE`
/// and no timezone; timed values get a TZID unless the zone is UTC, in which
/// case the value is floating, or carries `Z` when `utc_designator` is set.
fn write_timestamp(
    out: &mut ContentWriter,
    config: &CalendarConfig,
    name: &str,
    ts: &CalTimestamp,
    event: &CalendarEvent,
) {
    if event.all_day || ts.is_date() {
        let date = CalTimestamp {
            precision: Precision::Date,
            ..*ts
        };
        out.property(name, &[("VALUE", "DATE".to_string())], &date.to_string());
        return;
    }

    match event.tzid() {
        Some(tz) => out.property(name, &[("TZID", quote_param(tz))], &ts.to_string()),
        None if config.utc_designator => out.property(name, &[], &format!("{}Z", ts)),
        None => out.property(name, &[], &ts.to_string()),
    }
}

/// Accumulates CRLF-terminated, optionally folded content lines.
struct ContentWriter {
    buf: String,
    fold: bool,
}

impl ContentWriter {
    fn new(fold: bool) -> Self {
        Self {
            buf: String::with_capacity(1024),
            fold,
        }
    }

    /// `NAME;PARAM=value;...:value`. Parameter values must already be quoted.
    fn property(&mut self, name: &str, params: &[(&str, String)], value: &str) {
        let mut line = String::with_capacity(name.len() + value.len() + 16);
        line.push_str(name);
        for (key, val) in params {
            line.push(';');
            line.push_str(key);
            line.push('=');
            line.push_str(val);
        }
        line.push(':');
        line.push_str(value);
        self.line(&line);
    }

    fn line(&mut self, line: &str) {
        if !self.fold || line.len() <= MAX_LINE_OCTETS {
            self.buf.push_str(line);
            self.buf.push_str(CRLF);
            return;
        }

        // First chunk takes 75 octets; continuations take 74 after the leading space.
        let mut rest = line;
        let mut limit = MAX_LINE_OCTETS;
        while rest.len() > limit {
            let mut cut = limit;
            while !rest.is_char_boundary(cut) {
                cut -= 1;
            }
            self.buf.push_str(&rest[..cut]);
            self.buf.push_str(CRLF);
            self.buf.push(' ');
            rest = &rest[cut..];
            limit = MAX_LINE_OCTETS - 1;
        }
        self.buf.push_str(rest);
        self.buf.push_str(CRLF);
    }

    fn finish(self) -> String {
        self.buf
    }
}
