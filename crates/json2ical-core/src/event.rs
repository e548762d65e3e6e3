//! The validated event record handed from the normalizer to the serializer.

use serde::Serialize;

use crate::datetime::CalTimestamp;
use crate::uid::UidSource;

/// Timezone assumed when the input names none.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Event organizer. Only emitted when `email` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Organizer {
    pub name: Option<String>,
    pub email: String,
}

/// One scheduled item.
///
/// `start <= end` is not checked. When `all_day` is set both timestamps are
/// expected to be date-only and `timezone` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: CalTimestamp,
    pub end: CalTimestamp,
    pub timezone: String,
    pub uid: String,
    pub organizer: Option<Organizer>,
    pub attendees: Vec<String>,
    pub all_day: bool,
}

impl CalendarEvent {
    /// A timed event in UTC with no uid yet.
    pub fn new(summary: impl Into<String>, start: CalTimestamp, end: CalTimestamp) -> Self {
        Self {
            summary: summary.into(),
            description: None,
            location: None,
            start,
            end,
            timezone: DEFAULT_TIMEZONE.to_string(),
            uid: String::new(),
            organizer: None,
            attendees: Vec::new(),
            all_day: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    pub fn with_organizer(mut self, name: Option<String>, email: impl Into<String>) -> Self {
        self.organizer = Some(Organizer {
            name,
            email: email.into(),
        });
        self
    }

    pub fn with_attendee(mut self, email: impl Into<String>) -> Self {
        self.attendees.push(email.into());
        self
    }

    /// Mark the event all-day. Timestamps are not rewritten; build them with
    /// [`CalTimestamp::date`] or parse them with `all_day = true`.
    pub fn all_day(mut self) -> Self {
        self.all_day = true;
        self
    }

    /// Fill in `uid` from `source` if it is empty. An existing uid is never replaced.
    pub fn ensure_uid(&mut self, source: &dyn UidSource) {
        if self.uid.is_empty() {
            self.uid = source.next_uid();
        }
    }

    /// The timezone to put in a TZID parameter, if any.
    ///
    /// `None` for all-day events and for `UTC` (or an empty timezone).
    pub fn tzid(&self) -> Option<&str> {
        if self.all_day || self.timezone.is_empty() || self.timezone == DEFAULT_TIMEZONE {
            None
        } else {
            Some(&self.timezone)
        }
    }
}
