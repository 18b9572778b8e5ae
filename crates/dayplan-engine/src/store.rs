//! Application state as a plain value, updated only through [`reduce`].
//!
//! [`reduce`] never mutates the state it is given; it returns the next state.
//! Read access goes through the selector functions at the bottom of this
//! module.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::availability::SlotWindow;
use crate::conflict::find_conflicts;
use crate::error::Result;
use crate::event::{Event, EventCategory};
use crate::task::{Priority, Task};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: "09:00".to_string(),
            end: "17:00".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: Theme,
    pub notifications_enabled: bool,
    pub working_hours: WorkingHours,
}

impl Settings {
    /// The free-slot search window described by the working hours.
    pub fn slot_window(&self) -> Result<SlotWindow> {
        SlotWindow::from_working_hours(&self.working_hours.start, &self.working_hours.end)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            notifications_enabled: true,
            working_hours: WorkingHours::default(),
        }
    }
}

/// Partial settings update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub notifications_enabled: Option<bool>,
    pub working_hours: Option<WorkingHours>,
}

/// Partial task update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub completed: Option<bool>,
}

/// Partial event update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub category: Option<EventCategory>,
    pub location: Option<String>,
    pub participants: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppState {
    pub user: Option<User>,
    pub settings: Settings,
    pub tasks: Vec<Task>,
    pub events: Vec<Event>,
}

impl AppState {
    /// Load a saved state. Missing sections take their defaults; unknown
    /// top-level keys are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Every way the state can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    SetUser(Option<User>),
    UpdateSettings(SettingsPatch),
    AddTask(Task),
    UpdateTask { id: String, patch: TaskPatch },
    DeleteTask(String),
    ToggleTask(String),
    AddEvent(Event),
    UpdateEvent { id: String, patch: EventPatch },
    DeleteEvent(String),
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl SettingsPatch {
    fn apply(self, settings: &mut Settings) {
        merge(&mut settings.theme, self.theme);
        merge(&mut settings.notifications_enabled, self.notifications_enabled);
        merge(&mut settings.working_hours, self.working_hours);
    }
}

impl TaskPatch {
    fn apply(self, task: &mut Task) {
        merge(&mut task.title, self.title);
        if self.description.is_some() {
            task.description = self.description;
        }
        merge(&mut task.date, self.date);
        if self.time.is_some() {
            task.time = self.time;
        }
        merge(&mut task.priority, self.priority);
        merge(&mut task.category, self.category);
        merge(&mut task.completed, self.completed);
    }
}

impl EventPatch {
    fn apply(self, event: &mut Event) {
        merge(&mut event.title, self.title);
        merge(&mut event.date, self.date);
        merge(&mut event.start_time, self.start_time);
        merge(&mut event.end_time, self.end_time);
        merge(&mut event.category, self.category);
        if self.location.is_some() {
            event.location = self.location;
        }
        merge(&mut event.participants, self.participants);
    }
}

/// Compute the state that follows `state` after `action`.
///
/// Updates, deletes and toggles that name an unknown id leave the lists
/// unchanged. Adds append to the end.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::SetUser(user) => {
            debug!(signed_in = user.is_some(), "set user");
            next.user = user;
        }
        Action::UpdateSettings(patch) => {
            debug!("update settings");
            patch.apply(&mut next.settings);
        }
        Action::AddTask(task) => {
            debug!(task_id = %task.id, "add task");
            next.tasks.push(task);
        }
        Action::UpdateTask { id, patch } => {
            debug!(task_id = %id, "update task");
            if let Some(task) = next.tasks.iter_mut().find(|t| t.id == id) {
                patch.apply(task);
            }
        }
        Action::DeleteTask(id) => {
            debug!(task_id = %id, "delete task");
            next.tasks.retain(|t| t.id != id);
        }
        Action::ToggleTask(id) => {
            debug!(task_id = %id, "toggle task");
            if let Some(task) = next.tasks.iter_mut().find(|t| t.id == id) {
                task.completed = !task.completed;
            }
        }
        Action::AddEvent(event) => {
            debug!(event_id = %event.id, date = %event.date, "add event");
            next.events.push(event);
        }
        Action::UpdateEvent { id, patch } => {
            debug!(event_id = %id, "update event");
            if let Some(event) = next.events.iter_mut().find(|e| e.id == id) {
                patch.apply(event);
            }
        }
        Action::DeleteEvent(id) => {
            debug!(event_id = %id, "delete event");
            next.events.retain(|e| e.id != id);
        }
    }
    next
}

// ── Selectors ───────────────────────────────────────────────────────────────

/// Events on `date`, ordered by start time (stable for equal starts).
pub fn events_on<'a>(state: &'a AppState, date: &str) -> Vec<&'a Event> {
    let mut events: Vec<&Event> = state.events.iter().filter(|e| e.date == date).collect();
    events.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    events
}

/// Incomplete tasks on `date`, in insertion order.
pub fn pending_tasks_on<'a>(state: &'a AppState, date: &str) -> Vec<&'a Task> {
    state
        .tasks
        .iter()
        .filter(|t| t.date == date && !t.completed)
        .collect()
}

/// The earliest-starting event on `date`.
pub fn next_event_on<'a>(state: &'a AppState, date: &str) -> Option<&'a Event> {
    events_on(state, date).into_iter().next()
}

/// Stored events that overlap `candidate`, skipping the stored copy of the
/// candidate itself.
pub fn conflicts_for<'a>(state: &'a AppState, candidate: &Event) -> Vec<&'a Event> {
    find_conflicts(candidate, &state.events)
        .into_iter()
        .filter(|e| e.id != candidate.id)
        .collect()
}

/// Owner id stamped on new items: the signed-in user, or `anonymous`.
pub fn current_owner(state: &AppState) -> &str {
    state.user.as_ref().map_or("anonymous", |u| u.uid.as_str())
}
