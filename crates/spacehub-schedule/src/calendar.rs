//! Calendar view state and time-grid layout.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use spacehub_models::Event;

const HOURS_PER_DAY: f64 = 24.0;

/// Step direction for cursor and date navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// How many days the calendar shows at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarMode {
    Day,
    #[default]
    Week,
}

impl CalendarMode {
    /// Days moved by one navigation step.
    pub fn step_days(self) -> i64 {
        match self {
            CalendarMode::Day => 1,
            CalendarMode::Week => 7,
        }
    }
}

impl fmt::Display for CalendarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarMode::Day => f.write_str("day"),
            CalendarMode::Week => f.write_str("week"),
        }
    }
}

impl FromStr for CalendarMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(CalendarMode::Day),
            "week" => Ok(CalendarMode::Week),
            other => Err(format!("unknown calendar mode: {}", other)),
        }
    }
}

/// The date window the calendar is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    pub selected_date: NaiveDate,
    pub mode: CalendarMode,
}

impl CalendarView {
    pub fn new(selected_date: NaiveDate, mode: CalendarMode) -> Self {
        Self {
            selected_date,
            mode,
        }
    }

    /// Dates rendered as columns: the selected day, or the Monday-based
    /// week containing it.
    pub fn days_to_show(&self) -> Vec<NaiveDate> {
        match self.mode {
            CalendarMode::Day => vec![self.selected_date],
            CalendarMode::Week => {
                let offset = self.selected_date.weekday().num_days_from_monday() as i64;
                let monday = self.selected_date - Duration::days(offset);
                (0..7).map(|i| monday + Duration::days(i)).collect()
            }
        }
    }

    /// Moves the selected date by one day or one week.
    pub fn navigate(&mut self, direction: Direction) {
        let step = Duration::days(self.mode.step_days());
        self.selected_date = match direction {
            Direction::Previous => self.selected_date - step,
            Direction::Next => self.selected_date + step,
        };
    }
}

/// Vertical placement of an event block on a 24-hour column.
///
/// `top` and `height` are fractions of the column height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPlacement {
    pub top: f64,
    pub height: f64,
    pub color: String,
}

/// Hour of day including the minute fraction (e.g. 9:30 -> 9.5).
pub fn hour_of_day(at: NaiveDateTime) -> f64 {
    at.hour() as f64 + at.minute() as f64 / 60.0
}

/// Computes where an event sits on the time grid.
///
/// Only the hour-of-day of start and end matter; an event ending on a
/// later day at an earlier hour gets a negative height.
pub fn placement(event: &Event) -> EventPlacement {
    let start = hour_of_day(event.start);
    let end = hour_of_day(event.end);
    EventPlacement {
        top: start / HOURS_PER_DAY,
        height: (end - start) / HOURS_PER_DAY,
        color: event.display_color().to_string(),
    }
}

/// Returns true if the event belongs in the given day column.
pub fn starts_on(event: &Event, date: NaiveDate) -> bool {
    event.start.date() == date
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacehub_models::{EventBuilder, EventStatus};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn event(start: NaiveDateTime, end: NaiveDateTime, status: EventStatus) -> Event {
        EventBuilder::new("Session", start, end)
            .status(status)
            .build_with_id("event-1")
    }

    #[test]
    fn test_placement_fractions() {
        let start = date(5).and_hms_opt(6, 0, 0).unwrap();
        let end = date(5).and_hms_opt(9, 0, 0).unwrap();
        let p = placement(&event(start, end, EventStatus::Scheduled));

        assert!((p.top - 0.25).abs() < 1e-9);
        assert!((p.height - 0.125).abs() < 1e-9);
        assert_eq!(p.color, "#3B82F6");
    }

    #[test]
    fn test_placement_minutes() {
        let start = date(5).and_hms_opt(12, 30, 0).unwrap();
        let end = date(5).and_hms_opt(13, 15, 0).unwrap();
        let p = placement(&event(start, end, EventStatus::Completed));

        assert!((p.top - 12.5 / 24.0).abs() < 1e-9);
        assert!((p.height - 0.75 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_placement_ignores_date_of_end() {
        let start = date(5).and_hms_opt(22, 0, 0).unwrap();
        let end = date(6).and_hms_opt(1, 0, 0).unwrap();
        let p = placement(&event(start, end, EventStatus::Scheduled));

        assert!(p.height < 0.0);
    }

    #[test]
    fn test_week_starts_monday() {
        // 2025-03-05 is a Wednesday
        let view = CalendarView::new(date(5), CalendarMode::Week);
        let days = view.days_to_show();

        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(3));
        assert_eq!(days[6], date(9));
    }

    #[test]
    fn test_day_mode_single_column() {
        let view = CalendarView::new(date(5), CalendarMode::Day);
        assert_eq!(view.days_to_show(), vec![date(5)]);
    }

    #[test]
    fn test_navigate_steps_by_mode() {
        let mut view = CalendarView::new(date(10), CalendarMode::Week);
        view.navigate(Direction::Next);
        assert_eq!(view.selected_date, date(17));

        view.mode = CalendarMode::Day;
        view.navigate(Direction::Previous);
        assert_eq!(view.selected_date, date(16));
    }

    #[test]
    fn test_starts_on() {
        let start = date(5).and_hms_opt(23, 0, 0).unwrap();
        let end = date(6).and_hms_opt(1, 0, 0).unwrap();
        let e = event(start, end, EventStatus::Scheduled);

        assert!(starts_on(&e, date(5)));
        assert!(!starts_on(&e, date(6)));
    }
}
