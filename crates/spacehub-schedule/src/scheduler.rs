//! EventScheduler - thread-safe calendar event state with pub/sub.
//!
//! All state lives behind one `RwLock` so that id generation, collection
//! mutation and cursor revalidation happen as a single atomic step.

use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Local, NaiveDate};
use spacehub_models::{Event, EventId, NewEvent};
use tracing::{debug, info};

use crate::calendar::{starts_on, CalendarMode, CalendarView, Direction};
use crate::error::{Result, ScheduleError};
use crate::filter::StatusFilter;

/// Change notification broadcast to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleNotice {
    Created { id: EventId, title: String },
    Updated { id: EventId, title: String },
    Deleted { id: EventId, title: String },
}

impl ScheduleNotice {
    /// Short human-readable message, e.g. "Event created".
    pub fn message(&self) -> &'static str {
        match self {
            ScheduleNotice::Created { .. } => "Event created",
            ScheduleNotice::Updated { .. } => "Event updated",
            ScheduleNotice::Deleted { .. } => "Event deleted",
        }
    }
}

#[derive(Debug)]
struct ScheduleState {
    /// Events in insertion order; sorting happens on read.
    events: Vec<Event>,
    filter: StatusFilter,
    /// Index into the filtered list, `None` when that list is empty.
    cursor: Option<usize>,
    /// Event currently open for editing or deletion.
    editing: Option<EventId>,
    view: CalendarView,
}

impl ScheduleState {
    /// Filtered events sorted ascending by start. The sort is stable, so
    /// ties keep insertion order.
    fn filtered(&self) -> Vec<&Event> {
        let mut result: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| self.filter.matches(e))
            .collect();
        result.sort_by_key(|e| e.start);
        result
    }

    fn revalidate_cursor(&mut self) {
        let len = self.filtered().len();
        self.cursor = if len == 0 {
            None
        } else {
            Some(self.cursor.map_or(0, |c| c.min(len - 1)))
        };
    }

    fn position(&self, id: &EventId) -> Option<usize> {
        self.events.iter().position(|e| e.id == *id)
    }
}

/// Thread-safe calendar event scheduler.
///
/// Holds the event collection together with the view state that depends
/// on it: the status filter, the prev/next cursor over the filtered list,
/// the event open for editing, and the visible date window.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use spacehub_models::EventBuilder;
/// use spacehub_schedule::{Direction, EventScheduler};
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let scheduler = EventScheduler::new();
/// let draft = EventBuilder::new(
///     "Kickoff",
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(10, 0, 0).unwrap(),
/// )
/// .build();
///
/// let event = scheduler.create(draft).unwrap();
/// assert_eq!(scheduler.navigate(Direction::Next).unwrap(), Some(0));
/// assert_eq!(scheduler.current().unwrap().id, event.id);
/// ```
pub struct EventScheduler {
    state: RwLock<ScheduleState>,
    subscribers: RwLock<Vec<Sender<ScheduleNotice>>>,
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventScheduler {
    /// Creates an empty scheduler showing the current week.
    pub fn new() -> Self {
        Self::from_state(ScheduleState {
            events: Vec::new(),
            filter: StatusFilter::new(),
            cursor: None,
            editing: None,
            view: CalendarView::new(Local::now().date_naive(), CalendarMode::default()),
        })
    }

    /// Creates a scheduler seeded with existing events.
    ///
    /// Fails with `DuplicateId` if two events share an id.
    pub fn with_events(events: Vec<Event>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(events.len());
        for event in &events {
            if !seen.insert(&event.id) {
                return Err(ScheduleError::DuplicateId(event.id.to_string()));
            }
        }

        let mut scheduler = Self::new();
        let state = scheduler
            .state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        state.events = events;
        state.revalidate_cursor();
        debug!(count = scheduler.len(), "Scheduler seeded");
        Ok(scheduler)
    }

    fn from_state(state: ScheduleState) -> Self {
        Self {
            state: RwLock::new(state),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Sets the initial calendar mode.
    pub fn with_mode(mut self, mode: CalendarMode) -> Self {
        self.state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .view
            .mode = mode;
        self
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ScheduleState>> {
        self.state.read().map_err(lock_error)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ScheduleState>> {
        self.state.write().map_err(lock_error)
    }

    /// Subscribes to change notifications.
    ///
    /// The receiver is disconnected when the scheduler is dropped.
    pub fn subscribe(&self) -> Receiver<ScheduleNotice> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.write() {
            subs.push(tx);
        }
        rx
    }

    /// Sends a notice to every subscriber, dropping closed ones.
    fn broadcast(&self, notice: ScheduleNotice) {
        if let Ok(mut subs) = self.subscribers.write() {
            subs.retain(|tx| tx.send(notice.clone()).is_ok());
        }
    }

    /// Creates an event with a freshly generated id.
    pub fn create(&self, draft: NewEvent) -> Result<Event> {
        validate_title(&draft.title)?;

        let event = {
            let mut state = self.write()?;
            let mut id = EventId::new();
            while state.position(&id).is_some() {
                id = EventId::new();
            }
            let event = draft.with_id(id);
            state.events.push(event.clone());
            state.revalidate_cursor();
            event
        };

        info!(event_id = %event.id, title = %event.title, "Event created");
        self.broadcast(ScheduleNotice::Created {
            id: event.id.clone(),
            title: event.title.clone(),
        });
        Ok(event)
    }

    /// Replaces the event with the same id, keeping its position.
    ///
    /// Clears the editing reference. Fails with `NotFound` if no event
    /// has that id.
    pub fn update(&self, event: Event) -> Result<()> {
        validate_title(&event.title)?;

        let notice = {
            let mut state = self.write()?;
            let index = state
                .position(&event.id)
                .ok_or_else(|| ScheduleError::NotFound(event.id.to_string()))?;
            let notice = ScheduleNotice::Updated {
                id: event.id.clone(),
                title: event.title.clone(),
            };
            state.events[index] = event;
            state.editing = None;
            state.revalidate_cursor();
            notice
        };

        info!(?notice, "Event updated");
        self.broadcast(notice);
        Ok(())
    }

    /// Removes an event and returns it.
    ///
    /// If it was the event open for editing, that reference is cleared.
    pub fn delete(&self, id: &EventId) -> Result<Event> {
        let removed = {
            let mut state = self.write()?;
            let index = state
                .position(id)
                .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;
            let removed = state.events.remove(index);
            if state.editing.as_ref() == Some(id) {
                state.editing = None;
            }
            state.revalidate_cursor();
            removed
        };

        info!(event_id = %removed.id, title = %removed.title, "Event deleted");
        self.broadcast(ScheduleNotice::Deleted {
            id: removed.id.clone(),
            title: removed.title.clone(),
        });
        Ok(removed)
    }

    /// Gets an event by id.
    pub fn get(&self, id: &EventId) -> Option<Event> {
        let state = self.state.read().ok()?;
        let event = state.position(id).map(|i| state.events[i].clone());
        event
    }

    /// Lists all events sorted ascending by start time.
    pub fn list(&self) -> Vec<Event> {
        self.list_filtered(&StatusFilter::new())
    }

    /// Lists events matching `filter`, sorted ascending by start time.
    ///
    /// Does not touch the stored filter or the cursor.
    pub fn list_filtered(&self, filter: &StatusFilter) -> Vec<Event> {
        let state = match self.state.read() {
            Ok(state) => state,
            Err(_) => return Vec::new(),
        };
        let mut result: Vec<Event> = state
            .events
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        result.sort_by_key(|e| e.start);
        result
    }

    /// Events visible under the stored filter, sorted by start time.
    pub fn visible(&self) -> Vec<Event> {
        match self.state.read() {
            Ok(state) => state.filtered().into_iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Replaces the stored status filter and re-clamps the cursor.
    pub fn set_filter(&self, filter: StatusFilter) -> Result<()> {
        let mut state = self.write()?;
        debug!(statuses = ?filter.iter().collect::<Vec<_>>(), "Status filter changed");
        state.filter = filter;
        state.revalidate_cursor();
        Ok(())
    }

    /// Returns the stored status filter.
    pub fn filter(&self) -> StatusFilter {
        self.state
            .read()
            .map(|s| s.filter.clone())
            .unwrap_or_default()
    }

    /// Moves the cursor through the filtered list, wrapping at both ends.
    ///
    /// Returns the new index, or `None` (and does nothing) when the
    /// filtered list is empty. The calendar jumps to the date of the
    /// newly focused event.
    pub fn navigate(&self, direction: Direction) -> Result<Option<usize>> {
        let mut state = self.write()?;
        let len = state.filtered().len();
        if len == 0 {
            state.cursor = None;
            return Ok(None);
        }

        let current = state.cursor.unwrap_or(0).min(len - 1);
        let next = match direction {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current + len - 1) % len,
        };
        state.cursor = Some(next);

        let date = state.filtered()[next].start.date();
        state.view.selected_date = date;
        debug!(cursor = next, %date, "Cursor moved");
        Ok(Some(next))
    }

    /// Current cursor index into the filtered list.
    pub fn cursor(&self) -> Option<usize> {
        self.state.read().ok().and_then(|s| s.cursor)
    }

    /// Event under the cursor.
    pub fn current(&self) -> Option<Event> {
        let state = self.state.read().ok()?;
        let index = state.cursor?;
        let event = state.filtered().get(index).map(|e| (*e).clone());
        event
    }

    /// Opens an event for editing or deletion.
    pub fn select_for_edit(&self, id: &EventId) -> Result<()> {
        let mut state = self.write()?;
        if state.position(id).is_none() {
            return Err(ScheduleError::NotFound(id.to_string()));
        }
        state.editing = Some(id.clone());
        Ok(())
    }

    /// Closes the edit reference without changes.
    pub fn cancel_edit(&self) -> Result<()> {
        self.write()?.editing = None;
        Ok(())
    }

    /// The event currently open for editing.
    pub fn editing(&self) -> Option<Event> {
        let state = self.state.read().ok()?;
        let id = state.editing.as_ref()?;
        let event = state.position(id).map(|i| state.events[i].clone());
        event
    }

    /// Snapshot of the calendar date window.
    pub fn calendar(&self) -> Result<CalendarView> {
        Ok(self.read()?.view)
    }

    /// Switches between day and week view.
    pub fn set_mode(&self, mode: CalendarMode) -> Result<()> {
        self.write()?.view.mode = mode;
        Ok(())
    }

    /// Jumps the calendar to a date.
    pub fn set_selected_date(&self, date: NaiveDate) -> Result<()> {
        self.write()?.view.selected_date = date;
        Ok(())
    }

    /// Moves the calendar one day or one week.
    pub fn navigate_date(&self, direction: Direction) -> Result<NaiveDate> {
        let mut state = self.write()?;
        state.view.navigate(direction);
        Ok(state.view.selected_date)
    }

    /// Dates of the columns currently displayed.
    pub fn days_to_show(&self) -> Result<Vec<NaiveDate>> {
        Ok(self.read()?.view.days_to_show())
    }

    /// Filtered events whose start date is `date`, sorted by start.
    pub fn events_for_day(&self, date: NaiveDate) -> Vec<Event> {
        match self.state.read() {
            Ok(state) => state
                .filtered()
                .into_iter()
                .filter(|e| starts_on(e, date))
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Returns the number of events.
    pub fn len(&self) -> usize {
        self.state.read().map(|s| s.events.len()).unwrap_or(0)
    }

    /// Returns true if there are no events.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error<T>(e: PoisonError<T>) -> ScheduleError {
    ScheduleError::LockPoisoned(e.to_string())
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(ScheduleError::InvalidInput("title is required".to_string()));
    }
    Ok(())
}
