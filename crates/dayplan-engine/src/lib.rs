//! # dayplan-engine
//!
//! Scheduling and state logic for a personal day planner.
//!
//! Event conflict detection and free-slot search are pure functions over
//! caller-owned event lists. Times are zero-padded `HH:mm` strings compared
//! lexicographically; dates are `YYYY-MM-DD` strings compared for equality.
//!
//! ## Modules
//!
//! - [`event`] — `Event` plus `HH:mm` / `YYYY-MM-DD` boundary validation
//! - [`conflict`] — Detect overlapping events on the same date
//! - [`availability`] — First free hourly slot in the workday
//! - [`task`] — To-do items and priorities
//! - [`intent`] — Keyword-rule classification of chat messages
//! - [`store`] — Application state, reducer, selectors
//! - [`briefing`] — Daily summary of events and open tasks
//! - [`assistant`] — Chat message → action + reply
//! - [`error`] — Error types

pub mod assistant;
pub mod availability;
pub mod briefing;
pub mod conflict;
pub mod error;
pub mod event;
pub mod intent;
pub mod store;
pub mod task;

pub use assistant::{respond, AssistantReply};
pub use availability::{
    find_free_slot, find_free_slot_in, free_slots, SlotWindow, DEFAULT_DURATION_MINUTES,
};
pub use conflict::{find_conflicts, has_conflict, has_conflict_excluding_self};
pub use error::PlannerError;
pub use event::{Event, EventCategory};
pub use intent::{parse_intent, Intent};
pub use store::{reduce, Action, AppState};
pub use task::{Priority, Task};
