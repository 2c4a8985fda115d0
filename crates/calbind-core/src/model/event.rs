//! Event domain object (VEVENT).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::alarm::Alarm;
use super::extended::ExtendedProperty;

/// A point on the calendar, at whichever precision the source data had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    /// All-day date with no time component.
    Date(NaiveDate),
    /// Instant pinned to UTC.
    Utc(DateTime<Utc>),
    /// Wall-clock time with no zone attached.
    Floating(NaiveDateTime),
}

/// Whether the event blocks time on a free/busy query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transparency {
    #[default]
    Opaque,
    Transparent,
}

impl Transparency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opaque => "OPAQUE",
            Self::Transparent => "TRANSPARENT",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "OPAQUE" => Some(Self::Opaque),
            "TRANSPARENT" => Some(Self::Transparent),
            _ => None,
        }
    }
}

impl std::fmt::Display for Transparency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar event, independent of which wire grammar produced it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event {
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    pub transparency: Option<Transparency>,
    /// Alarms nested under the event (v2) or attached as AALARM/DALARM
    /// properties (v1).
    pub alarms: Vec<Alarm>,
    /// Properties the grammar does not describe, preserved verbatim.
    pub extended: Vec<ExtendedProperty>,
}
