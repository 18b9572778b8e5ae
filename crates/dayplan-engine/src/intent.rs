//! Keyword-rule intent parsing for the chat assistant.
//!
//! Rules are evaluated in order against the lowercased message and the first
//! rule with a matching keyword decides the intent. There is no grammar: a
//! message mentioning both a meeting and a task is a meeting.

use serde::{Deserialize, Serialize};

use crate::event::EventCategory;
use crate::task::Priority;

/// Title given to events created from chat.
pub const DEFAULT_EVENT_TITLE: &str = "New Meeting";
/// Start time given to events created from chat.
pub const DEFAULT_EVENT_TIME: &str = "10:00";
/// Title given to tasks created from chat.
pub const DEFAULT_TASK_TITLE: &str = "New Task";

/// What the user asked the assistant to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Intent {
    CreateEvent {
        title: String,
        date: String,
        time: String,
        category: EventCategory,
    },
    CreateTask {
        title: String,
        priority: Priority,
        date: String,
    },
    DailyBriefing,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntentKind {
    CreateEvent,
    CreateTask,
    DailyBriefing,
}

struct KeywordRule {
    keywords: &'static [&'static str],
    kind: IntentKind,
}

const RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["meeting", "appointment"],
        kind: IntentKind::CreateEvent,
    },
    KeywordRule {
        keywords: &["task", "remind"],
        kind: IntentKind::CreateTask,
    },
    KeywordRule {
        keywords: &["briefing", "summary", "plan my day"],
        kind: IntentKind::DailyBriefing,
    },
];

/// Classify a chat message.
///
/// `today` is the `YYYY-MM-DD` date stamped on created events and tasks.
pub fn parse_intent(text: &str, today: &str) -> Intent {
    let lower = text.to_lowercase();

    let kind = RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(*k)))
        .map(|rule| rule.kind);

    match kind {
        Some(IntentKind::CreateEvent) => Intent::CreateEvent {
            title: DEFAULT_EVENT_TITLE.to_string(),
            date: today.to_string(),
            time: DEFAULT_EVENT_TIME.to_string(),
            category: EventCategory::Meeting,
        },
        Some(IntentKind::CreateTask) => Intent::CreateTask {
            title: DEFAULT_TASK_TITLE.to_string(),
            priority: Priority::Medium,
            date: today.to_string(),
        },
        Some(IntentKind::DailyBriefing) => Intent::DailyBriefing,
        None => Intent::Unknown,
    }
}
