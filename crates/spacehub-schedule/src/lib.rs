//! Thread-safe calendar event scheduling for SpaceHub.
//!
//! This crate provides the `EventScheduler`, which keeps the event list
//! for a space session together with:
//! - status filtering over a start-time-ordered view
//! - a wrapping prev/next cursor over the filtered events
//! - create/update/delete with generated identifiers
//! - day/week calendar windows and time-grid placement
//! - pub/sub change notices over `mpsc` channels
//!
//! # Example
//!
//! ```no_run
//! use spacehub_schedule::{EventScheduler, StatusFilter};
//!
//! let scheduler = EventScheduler::new();
//! let notices = scheduler.subscribe();
//!
//! let filter = StatusFilter::parse(["scheduled", "in-progress"]).unwrap();
//! scheduler.set_filter(filter).unwrap();
//! for event in scheduler.visible() {
//!     println!("{} {}", event.start, event.title);
//! }
//! # drop(notices);
//! ```

pub mod calendar;
pub mod error;
pub mod filter;
pub mod scheduler;

pub use calendar::{hour_of_day, placement, CalendarMode, CalendarView, Direction, EventPlacement};
pub use error::{Result, ScheduleError};
pub use filter::StatusFilter;
pub use scheduler::{EventScheduler, ScheduleNotice};
