//! Alarm domain object (VALARM and the vCalendar AALARM/DALARM family).

use chrono::{DateTime, Duration, Utc};

use super::extended::ExtendedProperty;

/// Action an alarm performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlarmAction {
    Audio,
    Display,
    Email,
    Procedure,
}

impl AlarmAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "AUDIO",
            Self::Display => "DISPLAY",
            Self::Email => "EMAIL",
            Self::Procedure => "PROCEDURE",
        }
    }

    /// Parses an action token (case-insensitive). Unrecognized tokens yield
    /// `None`; callers decide whether that is a warning.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "AUDIO" => Some(Self::Audio),
            "DISPLAY" => Some(Self::Display),
            "EMAIL" => Some(Self::Email),
            "PROCEDURE" => Some(Self::Procedure),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlarmAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which edge of the parent component a relative trigger is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriggerEdge {
    #[default]
    Start,
    End,
}

impl TriggerEdge {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::End => "END",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "START" => Some(Self::Start),
            "END" => Some(Self::End),
            _ => None,
        }
    }
}

impl std::fmt::Display for TriggerEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When an alarm fires.
///
/// Exactly one of `date_time` and `duration` is set on a well-formed alarm:
/// either an absolute instant or an offset relative to the parent component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trigger {
    /// Absolute firing instant (UTC).
    pub date_time: Option<DateTime<Utc>>,
    /// Signed offset from the anchor edge.
    pub duration: Option<Duration>,
    /// Anchor edge for a relative trigger. `None` means the format default
    /// (start of the parent component).
    pub related: Option<TriggerEdge>,
}

impl Trigger {
    #[must_use]
    pub const fn absolute(date_time: DateTime<Utc>) -> Self {
        Self {
            date_time: Some(date_time),
            duration: None,
            related: None,
        }
    }

    #[must_use]
    pub const fn relative(duration: Duration) -> Self {
        Self {
            date_time: None,
            duration: Some(duration),
            related: None,
        }
    }

    /// Returns whether neither form of the trigger is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.date_time.is_none() && self.duration.is_none()
    }
}

/// Repeat schedule for an alarm: fire `count` more times, `gap` apart.
///
/// Both halves travel together; a repeat count without a gap (or the
/// reverse) is a cross-field violation on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatRule {
    /// Number of additional firings after the first.
    pub count: u32,
    /// Interval between firings.
    pub gap: Duration,
}

/// Payload attached to an alarm (sound to play, file to open).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// Reference to external content.
    Uri(String),
    /// Inline binary content, decoded from its transfer encoding.
    Binary {
        /// Media type from the `FMTTYPE` parameter, when given.
        media_type: Option<String>,
        data: Vec<u8>,
    },
}

/// A calendar alarm, independent of which wire grammar produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alarm {
    /// What the alarm does when it fires. `None` when the wire form carried
    /// no recognizable action.
    pub action: Option<AlarmAction>,
    pub trigger: Trigger,
    pub repeat: Option<RepeatRule>,
    /// Text shown or spoken when the alarm fires.
    pub description: Option<String>,
    /// Subject line for email alarms.
    pub summary: Option<String>,
    pub attach: Option<Attachment>,
    /// Properties the grammar does not describe, preserved verbatim.
    pub extended: Vec<ExtendedProperty>,
}
