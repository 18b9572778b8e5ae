//! The chat assistant: turns a message into a state change and a reply.
//!
//! The assistant never applies its own changes. It hands back an [`Action`]
//! for the caller to run through [`crate::store::reduce`], so the state stays
//! owned by whoever holds it.

use chrono::{Duration, NaiveTime};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::availability::{find_free_slot_in, SlotWindow};
use crate::briefing::DailyBriefing;
use crate::event::Event;
use crate::intent::{parse_intent, Intent};
use crate::store::{conflicts_for, current_owner, Action, AppState};
use crate::task::Task;

/// Length of events the assistant schedules.
pub const EVENT_LENGTH_MINUTES: i64 = 60;

const UNKNOWN_REPLY: &str = "I'm not sure how to help with that yet.";
const LATEST_END: &str = "23:59";

/// What the assistant wants done, and what it says about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantReply {
    pub intent: Intent,
    pub action: Option<Action>,
    pub message: String,
}

/// Parse `text` and answer it against `state`.
///
/// `today` is the `YYYY-MM-DD` date used for new items and the briefing.
/// `next_id` supplies ids for any event or task the reply creates.
pub fn respond(
    state: &AppState,
    text: &str,
    today: &str,
    next_id: impl FnMut() -> String,
) -> AssistantReply {
    let intent = parse_intent(text, today);
    debug!(?intent, "parsed chat message");
    answer(state, intent, today, next_id)
}

/// Answer an already-parsed intent.
pub fn answer(
    state: &AppState,
    intent: Intent,
    today: &str,
    mut next_id: impl FnMut() -> String,
) -> AssistantReply {
    let (action, message) = match &intent {
        Intent::CreateEvent {
            title,
            date,
            time,
            category,
        } => match end_time_after(time) {
            Some(end) => {
                let event = Event::new(
                    next_id(),
                    current_owner(state),
                    title.clone(),
                    date.clone(),
                    time.clone(),
                    end,
                    *category,
                );
                let mut message = format!("I've scheduled \"{}\" for {} at {}.", title, date, time);
                if let Some(warning) = conflict_warning(state, &event) {
                    message.push(' ');
                    message.push_str(&warning);
                }
                info!(event_id = %event.id, date = %event.date, "assistant scheduled event");
                (Some(Action::AddEvent(event)), message)
            }
            None => (None, format!("I couldn't read the time \"{}\".", time)),
        },
        Intent::CreateTask {
            title,
            priority,
            date,
        } => {
            let mut task = Task::new(
                next_id(),
                current_owner(state),
                title.clone(),
                date.clone(),
                *priority,
            );
            task.category = "general".to_string();
            info!(task_id = %task.id, "assistant added task");
            let message = format!("I've added \"{}\" to your tasks.", title);
            (Some(Action::AddTask(task)), message)
        }
        Intent::DailyBriefing => (None, DailyBriefing::for_date(state, today).message()),
        Intent::Unknown => (None, UNKNOWN_REPLY.to_string()),
    };

    AssistantReply {
        intent,
        action,
        message,
    }
}

/// `start` plus the event length, as `HH:mm`. Clamped to `23:59` rather than
/// wrapping past midnight; `None` when the clamped end is not after the start.
fn end_time_after(start: &str) -> Option<String> {
    crate::event::validate_time(start).ok()?;
    let start_time = NaiveTime::parse_from_str(start, "%H:%M").ok()?;
    let (end, wrapped_secs) =
        start_time.overflowing_add_signed(Duration::minutes(EVENT_LENGTH_MINUTES));
    let end = if wrapped_secs != 0 {
        LATEST_END.to_string()
    } else {
        end.format("%H:%M").to_string()
    };
    (end.as_str() > start).then_some(end)
}

fn conflict_warning(state: &AppState, event: &Event) -> Option<String> {
    let clashes = conflicts_for(state, event);
    let first = clashes.first()?;
    let mut warning = format!("Heads up: it overlaps \"{}\".", first.title);

    // A reply is always produced, so unusable working hours fall back to the
    // default window instead of failing.
    let window = state.settings.slot_window().unwrap_or_else(|err| {
        warn!(%err, "ignoring working hours for free-slot hint");
        SlotWindow::default()
    });
    if let Some(slot) = find_free_slot_in(&state.events, &event.date, window) {
        warning.push_str(&format!(" {} is still free.", slot));
    }
    Some(warning)
}
