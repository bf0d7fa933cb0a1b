//! Builder patterns for complex types.

use chrono::NaiveDateTime;

use crate::event::{Event, EventStatus, Instructor, NewEvent};
use crate::ids::EventId;

/// Builder for event drafts with a fluent API.
///
/// The builder produces a [`NewEvent`]; identifiers are assigned by the
/// scheduler on creation. [`EventBuilder::build_with_id`] exists for
/// fixtures that need a full [`Event`] up front.
#[derive(Debug, Clone)]
pub struct EventBuilder {
    title: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    description: String,
    status: EventStatus,
    instructor: Instructor,
    meeting_url: String,
    color: Option<String>,
}

impl EventBuilder {
    /// Creates a new EventBuilder with required fields.
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            description: String::new(),
            status: EventStatus::Scheduled,
            instructor: Instructor::default(),
            meeting_url: String::new(),
            color: None,
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the status (defaults to scheduled).
    pub fn status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the instructor.
    pub fn instructor(mut self, instructor: Instructor) -> Self {
        self.instructor = instructor;
        self
    }

    /// Sets the meeting URL.
    pub fn meeting_url(mut self, url: impl Into<String>) -> Self {
        self.meeting_url = url.into();
        self
    }

    /// Sets an explicit display colour.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Builds the draft.
    pub fn build(self) -> NewEvent {
        NewEvent {
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

    /// Builds a full event with the given id.
    pub fn build_with_id(self, id: impl Into<EventId>) -> Event {
        self.build().with_id(id.into())
    }
}

impl Event {
    /// Creates a builder for a new event.
    pub fn builder(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> EventBuilder {
        EventBuilder::new(title, start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_event_builder_basic() {
        let draft = Event::builder("Kickoff", at(3, 9), at(3, 10)).build();

        assert_eq!(draft.title, "Kickoff");
        assert_eq!(draft.status, EventStatus::Scheduled);
        assert!(draft.color.is_none());
        assert!(draft.meeting_url.is_empty());
    }

    #[test]
    fn test_event_builder_full() {
        let event = EventBuilder::new("Workshop", at(4, 14), at(4, 16))
            .description("Hands-on session")
            .status(EventStatus::InProgress)
            .instructor(Instructor::new("Ada", "Mentor", "/avatars/ada.png"))
            .meeting_url("https://meet.example.com/ws")
            .color("#ff00ff")
            .build_with_id("event-42");

        assert_eq!(event.id.as_str(), "event-42");
        assert_eq!(event.instructor.name, "Ada");
        assert_eq!(event.display_color(), "#ff00ff");
        assert_eq!(event.description, "Hands-on session");
    }
}
