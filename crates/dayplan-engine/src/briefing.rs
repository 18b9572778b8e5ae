//! Daily briefing: a one-paragraph summary of a day's events and open tasks.

use serde::Serialize;

use crate::event::Event;
use crate::store::{events_on, pending_tasks_on, AppState};
use crate::task::Task;

/// Events and open tasks for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBriefing<'a> {
    pub date: String,
    /// Ordered by start time.
    pub events: Vec<&'a Event>,
    /// Incomplete tasks, in insertion order.
    pub tasks: Vec<&'a Task>,
}

impl<'a> DailyBriefing<'a> {
    pub fn for_date(state: &'a AppState, date: &str) -> Self {
        Self {
            date: date.to_string(),
            events: events_on(state, date),
            tasks: pending_tasks_on(state, date),
        }
    }

    /// The earliest event of the day.
    pub fn first_event(&self) -> Option<&'a Event> {
        self.events.first().copied()
    }

    /// The highest-priority open task; the earliest added wins ties.
    pub fn top_task(&self) -> Option<&'a Task> {
        // max_by_key keeps the last maximum, so scan in reverse.
        self.tasks.iter().rev().max_by_key(|t| t.priority).copied()
    }

    pub fn message(&self) -> String {
        let mut text = format!(
            "Good morning! You have {} meetings and {} tasks today.",
            self.events.len(),
            self.tasks.len()
        );
        if let Some(event) = self.first_event() {
            text.push_str(&format!(
                " Your first meeting is \"{}\" at {}.",
                event.title, event.start_time
            ));
        }
        if let Some(task) = self.top_task() {
            text.push_str(&format!(" Top priority: {}.", task.title));
        }
        text
    }
}
