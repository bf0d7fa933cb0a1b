//! Calendar event types.
//!
//! Events describe scheduled space sessions: who runs them, when they
//! start and end, and where to join.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::EventId;

/// Fallback colour used when an event has neither an explicit colour nor
/// a known status colour.
pub const DEFAULT_EVENT_COLOR: &str = "hsl(var(--primary))";

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum EventStatus {
    /// Planned and not yet started.
    #[default]
    Scheduled,
    /// Currently running.
    InProgress,
    /// Finished.
    Completed,
    /// Called off.
    Canceled,
}

/// All statuses in display order.
pub const ALL_STATUSES: [EventStatus; 4] = [
    EventStatus::Scheduled,
    EventStatus::InProgress,
    EventStatus::Completed,
    EventStatus::Canceled,
];

impl EventStatus {
    /// Wire value, e.g. `in-progress`.
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Scheduled => "scheduled",
            EventStatus::InProgress => "in-progress",
            EventStatus::Completed => "completed",
            EventStatus::Canceled => "canceled",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Scheduled => "Scheduled",
            EventStatus::InProgress => "In Progress",
            EventStatus::Completed => "Completed",
            EventStatus::Canceled => "Canceled",
        }
    }

    /// Hex colour used for the status badge and time-grid block.
    pub fn color(self) -> &'static str {
        match self {
            EventStatus::Scheduled => "#3B82F6",
            EventStatus::InProgress => "#10B981",
            EventStatus::Completed => "#6B7280",
            EventStatus::Canceled => "#EF4444",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl TryFrom<String> for EventStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for EventStatus {
    type Err = UnknownStatus;

    /// Case-insensitive; accepts `in-progres` as well as `in-progress`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(EventStatus::Scheduled),
            "in-progress" | "in-progres" | "in_progress" => Ok(EventStatus::InProgress),
            "completed" => Ok(EventStatus::Completed),
            "canceled" | "cancelled" => Ok(EventStatus::Canceled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// The person running an event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Instructor {
    pub name: String,
    pub role: String,
    /// Avatar image reference (URL or asset path).
    pub avatar: String,
}

impl Instructor {
    pub fn new(name: impl Into<String>, role: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            avatar: avatar.into(),
        }
    }
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier, preserved across edits.
    pub id: EventId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: EventStatus,

    /// Local wall-clock start.
    pub start: NaiveDateTime,

    /// Local wall-clock end. Expected to be >= `start`, not enforced.
    pub end: NaiveDateTime,

    #[serde(default)]
    pub instructor: Instructor,

    #[serde(default)]
    pub meeting_url: String,

    /// Explicit display colour overriding the status colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Event {
    /// Returns the colour this event is drawn with.
    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or_else(|| self.status.color())
    }

    /// Duration between start and end (negative if end precedes start).
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// Every event field except the identifier; input to event creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: EventStatus,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub instructor: Instructor,
    #[serde(default)]
    pub meeting_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NewEvent {
    /// Attaches an identifier, producing a full event.
    pub fn with_id(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            start: self.start,
            end: self.end,
            instructor: self.instructor,
            meeting_url: self.meeting_url,
            color: self.color,
        }
    }
}

impl From<Event> for NewEvent {
    fn from(event: Event) -> Self {
        Self {
            title: event.title,
            description: event.description,
            status: event.status,
            start: event.start,
            end: event.end,
            instructor: event.instructor,
            meeting_url: event.meeting_url,
            color: event.color,
        }
    }
}
