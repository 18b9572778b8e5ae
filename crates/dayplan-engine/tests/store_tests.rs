//! Tests for the reducer and selectors.

use dayplan_engine::store::{
    conflicts_for, current_owner, events_on, next_event_on, pending_tasks_on, EventPatch,
    SettingsPatch, TaskPatch, Theme, User, WorkingHours,
};
use dayplan_engine::{reduce, Action, AppState, Event, EventCategory, Priority, Task};

// ── Helpers ─────────────────────────────────────────────────────────────────

const DAY: &str = "2024-01-01";

fn event(id: &str, date: &str, start: &str, end: &str) -> Event {
    Event::new(id, "u1", format!("Event {id}"), date, start, end, EventCategory::Work)
}

fn task(id: &str, date: &str, priority: Priority) -> Task {
    Task::new(id, "u1", format!("Task {id}"), date, priority)
}

fn apply(state: AppState, actions: Vec<Action>) -> AppState {
    actions.into_iter().fold(state, |s, a| reduce(&s, a))
}

// ── Reducer ─────────────────────────────────────────────────────────────────

#[test]
fn default_state_is_empty_with_default_settings() {
    let state = AppState::default();
    assert!(state.user.is_none());
    assert!(state.tasks.is_empty() && state.events.is_empty());
    assert_eq!(state.settings.theme, Theme::System);
    assert!(state.settings.notifications_enabled);
    assert_eq!(state.settings.working_hours, WorkingHours::default());
}

#[test]
fn reduce_does_not_touch_its_input() {
    let before = AppState::default();
    let after = reduce(&before, Action::AddTask(task("t1", DAY, Priority::Low)));
    assert!(before.tasks.is_empty());
    assert_eq!(after.tasks.len(), 1);
}

#[test]
fn adds_append_in_order() {
    let state = apply(
        AppState::default(),
        vec![
            Action::AddEvent(event("e1", DAY, "10:00", "11:00")),
            Action::AddEvent(event("e2", DAY, "09:00", "10:00")),
        ],
    );
    let ids: Vec<&str> = state.events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2"]);
}

#[test]
fn toggle_twice_restores_completion() {
    let state = apply(AppState::default(), vec![Action::AddTask(task("t1", DAY, Priority::High))]);
    let toggled = reduce(&state, Action::ToggleTask("t1".to_string()));
    assert!(toggled.tasks[0].completed);
    let back = reduce(&toggled, Action::ToggleTask("t1".to_string()));
    assert_eq!(back, state);
}

#[test]
fn update_task_merges_only_given_fields() {
    let state = apply(AppState::default(), vec![Action::AddTask(task("t1", DAY, Priority::Low))]);
    let next = reduce(
        &state,
        Action::UpdateTask {
            id: "t1".to_string(),
            patch: TaskPatch {
                title: Some("Renamed".to_string()),
                priority: Some(Priority::High),
                ..TaskPatch::default()
            },
        },
    );
    let t = &next.tasks[0];
    assert_eq!(t.title, "Renamed");
    assert_eq!(t.priority, Priority::High);
    assert_eq!(t.date, DAY);
    assert!(!t.completed);
}

#[test]
fn update_event_merges_only_given_fields() {
    let state = apply(
        AppState::default(),
        vec![Action::AddEvent(event("e1", DAY, "09:00", "10:00"))],
    );
    let next = reduce(
        &state,
        Action::UpdateEvent {
            id: "e1".to_string(),
            patch: EventPatch {
                end_time: Some("10:30".to_string()),
                location: Some("Room 4".to_string()),
                ..EventPatch::default()
            },
        },
    );
    let e = &next.events[0];
    assert_eq!(e.start_time, "09:00");
    assert_eq!(e.end_time, "10:30");
    assert_eq!(e.location.as_deref(), Some("Room 4"));
}

#[test]
fn unknown_ids_are_no_ops() {
    let state = apply(
        AppState::default(),
        vec![
            Action::AddTask(task("t1", DAY, Priority::Low)),
            Action::AddEvent(event("e1", DAY, "09:00", "10:00")),
        ],
    );
    let next = apply(
        state.clone(),
        vec![
            Action::ToggleTask("missing".to_string()),
            Action::DeleteTask("missing".to_string()),
            Action::DeleteEvent("missing".to_string()),
            Action::UpdateEvent {
                id: "missing".to_string(),
                patch: EventPatch {
                    title: Some("x".to_string()),
                    ..EventPatch::default()
                },
            },
        ],
    );
    assert_eq!(next, state);
}

#[test]
fn deletes_remove_matching_ids() {
    let state = apply(
        AppState::default(),
        vec![
            Action::AddTask(task("t1", DAY, Priority::Low)),
            Action::AddTask(task("t2", DAY, Priority::Low)),
            Action::AddEvent(event("e1", DAY, "09:00", "10:00")),
            Action::DeleteTask("t1".to_string()),
            Action::DeleteEvent("e1".to_string()),
        ],
    );
    assert_eq!(state.tasks.len(), 1);
    assert_eq!(state.tasks[0].id, "t2");
    assert!(state.events.is_empty());
}

#[test]
fn settings_patch_keeps_unset_fields() {
    let next = reduce(
        &AppState::default(),
        Action::UpdateSettings(SettingsPatch {
            theme: Some(Theme::Dark),
            ..SettingsPatch::default()
        }),
    );
    assert_eq!(next.settings.theme, Theme::Dark);
    assert!(next.settings.notifications_enabled);
    assert_eq!(next.settings.working_hours.start, "09:00");
}

#[test]
fn set_user_and_sign_out() {
    let user = User {
        uid: "abc".to_string(),
        name: "Sam".to_string(),
        email: "sam@example.com".to_string(),
    };
    let signed_in = reduce(&AppState::default(), Action::SetUser(Some(user)));
    assert_eq!(current_owner(&signed_in), "abc");
    let signed_out = reduce(&signed_in, Action::SetUser(None));
    assert_eq!(current_owner(&signed_out), "anonymous");
}

// ── Selectors ───────────────────────────────────────────────────────────────

#[test]
fn events_on_sorts_by_start_and_filters_date() {
    let state = apply(
        AppState::default(),
        vec![
            Action::AddEvent(event("late", DAY, "15:00", "16:00")),
            Action::AddEvent(event("other", "2024-01-02", "08:00", "09:00")),
            Action::AddEvent(event("early", DAY, "08:30", "09:00")),
        ],
    );
    let ids: Vec<&str> = events_on(&state, DAY).iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["early", "late"]);
    assert_eq!(next_event_on(&state, DAY).map(|e| e.id.as_str()), Some("early"));
    assert!(next_event_on(&state, "2024-01-03").is_none());
}

#[test]
fn next_event_on_picks_earliest_start_not_first_added() {
    let state = apply(
        AppState::default(),
        vec![
            Action::AddEvent(event("afternoon", DAY, "14:00", "15:00")),
            Action::AddEvent(event("yesterday", "2023-12-31", "07:00", "08:00")),
            Action::AddEvent(event("morning", DAY, "09:30", "10:00")),
            Action::AddEvent(event("noon", DAY, "12:00", "13:00")),
        ],
    );
    assert_eq!(next_event_on(&state, DAY).map(|e| e.id.as_str()), Some("morning"));
    assert_eq!(
        next_event_on(&state, "2023-12-31").map(|e| e.id.as_str()),
        Some("yesterday")
    );
    assert!(next_event_on(&AppState::default(), DAY).is_none());
}

#[test]
fn pending_tasks_skip_completed_and_other_dates() {
    let mut done = task("done", DAY, Priority::High);
    done.completed = true;
    let state = apply(
        AppState::default(),
        vec![
            Action::AddTask(done),
            Action::AddTask(task("open", DAY, Priority::Low)),
            Action::AddTask(task("later", "2024-01-02", Priority::Low)),
        ],
    );
    let ids: Vec<&str> = pending_tasks_on(&state, DAY).iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["open"]);
}

#[test]
fn conflicts_for_skips_the_stored_copy() {
    let state = apply(
        AppState::default(),
        vec![
            Action::AddEvent(event("e1", DAY, "09:00", "10:00")),
            Action::AddEvent(event("e2", DAY, "10:30", "11:30")),
        ],
    );
    let mut moved = state.events[0].clone();
    moved.end_time = "11:00".to_string();

    let ids: Vec<&str> = conflicts_for(&state, &moved).iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e2"]);
}

#[test]
fn state_round_trips_through_app_json() {
    let json = r#"{
        "user": {"uid": "u1", "name": "Sam", "email": "sam@example.com"},
        "settings": {"theme": "dark", "notificationsEnabled": false,
                     "workingHours": {"start": "08:00", "end": "16:00"}},
        "tasks": [{"id": "t1", "userId": "u1", "title": "Write report", "date": "2024-01-01",
                   "priority": "high", "category": "work", "completed": false,
                   "subtasks": [{"id": "s1", "title": "Outline", "completed": true}]}],
        "events": [{"id": "e1", "userId": "u1", "title": "Standup", "date": "2024-01-01",
                    "startTime": "09:00", "endTime": "09:15", "category": "meeting"}]
    }"#;
    let state: AppState = serde_json::from_str(json).unwrap();
    assert_eq!(state.settings.theme, Theme::Dark);
    assert_eq!(state.settings.working_hours.start, "08:00");
    assert_eq!(state.tasks[0].subtasks.len(), 1);

    let again: AppState = serde_json::from_str(&serde_json::to_string(&state).unwrap()).unwrap();
    assert_eq!(again, state);
}

#[test]
fn partial_state_json_fills_defaults() {
    let state = AppState::from_json(r#"{"events": []}"#).unwrap();
    assert_eq!(state, AppState::default());
}

#[test]
fn malformed_state_json_is_an_error() {
    let err = AppState::from_json(r#"{"tasks": 3}"#).unwrap_err();
    assert!(matches!(err, dayplan_engine::PlannerError::Json(_)));
}

#[test]
fn misspelled_state_key_is_an_error() {
    let err = AppState::from_json(r#"{"evnts": []}"#).unwrap_err();
    assert!(err.to_string().contains("unknown field `evnts`"), "{err}");
}

#[test]
fn settings_slot_window_follows_working_hours() {
    let mut settings = AppState::default().settings;
    let window = settings.slot_window().unwrap();
    assert_eq!((window.start_hour, window.end_hour), (9, 17));

    settings.working_hours.start = "09:30".to_string();
    assert!(settings.slot_window().is_err());
}
