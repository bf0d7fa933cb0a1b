//! Status filtering for event queries.

use std::collections::BTreeSet;

use spacehub_models::{Event, EventStatus, UnknownStatus};

/// Set of selected statuses. An empty set shows every event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFilter {
    statuses: BTreeSet<EventStatus>,
}

impl StatusFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter from status strings, matched case-insensitively.
    pub fn parse<I, S>(values: I) -> Result<Self, UnknownStatus>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let statuses = values
            .into_iter()
            .map(|v| v.as_ref().parse::<EventStatus>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { statuses })
    }

    /// Adds a status to the selection.
    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    /// Flips membership of a status, as a checkbox list would.
    pub fn toggle(&mut self, status: EventStatus) {
        if !self.statuses.remove(&status) {
            self.statuses.insert(status);
        }
    }

    /// Clears the selection (show all).
    pub fn clear(&mut self) {
        self.statuses.clear();
    }

    /// Returns true if no status is selected.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Returns true if the status is selected.
    pub fn contains(&self, status: EventStatus) -> bool {
        self.statuses.contains(&status)
    }

    /// Iterates over the selected statuses.
    pub fn iter(&self) -> impl Iterator<Item = EventStatus> + '_ {
        self.statuses.iter().copied()
    }

    /// Returns true if the event matches this filter.
    pub fn matches(&self, event: &Event) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&event.status)
    }
}

impl FromIterator<EventStatus> for StatusFilter {
    fn from_iter<T: IntoIterator<Item = EventStatus>>(iter: T) -> Self {
        Self {
            statuses: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spacehub_models::EventBuilder;

    fn make_event(status: EventStatus) -> Event {
        let start = NaiveDate::from_ymd_opt(2025, 3, 3)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        EventBuilder::new("Test", start, start)
            .status(status)
            .build_with_id("event-test")
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = StatusFilter::new();
        assert!(filter.matches(&make_event(EventStatus::Scheduled)));
        assert!(filter.matches(&make_event(EventStatus::Canceled)));
    }

    #[test]
    fn test_filter_by_status() {
        let filter = StatusFilter::new().with_status(EventStatus::Completed);

        assert!(filter.matches(&make_event(EventStatus::Completed)));
        assert!(!filter.matches(&make_event(EventStatus::Scheduled)));
    }

    #[test]
    fn test_parse_case_insensitive() {
        let filter = StatusFilter::parse(["SCHEDULED", "In-Progress"]).unwrap();

        assert!(filter.contains(EventStatus::Scheduled));
        assert!(filter.contains(EventStatus::InProgress));
        assert!(!filter.contains(EventStatus::Completed));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let result = StatusFilter::parse(["scheduled", "postponed"]);
        assert_eq!(result.unwrap_err(), UnknownStatus("postponed".into()));
    }

    #[test]
    fn test_toggle() {
        let mut filter = StatusFilter::new();
        filter.toggle(EventStatus::Canceled);
        assert!(filter.contains(EventStatus::Canceled));
        filter.toggle(EventStatus::Canceled);
        assert!(filter.is_empty());
    }
}
