//! `dayplan` CLI — check event conflicts, find free slots, and talk to the
//! planner assistant from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Does 10:00-11:00 clash with anything on that day?
//! dayplan conflict -i events.json --date 2024-01-01 --start 10:00 --end 11:00
//!
//! # Re-check a stored event after editing it, ignoring its old copy
//! dayplan conflict -i events.json --date 2024-01-01 --start 10:00 --end 11:30 \
//!   --id e1 --exclude-self
//!
//! # First free hour in the workday (stdin → stdout)
//! cat events.json | dayplan free-slot --date 2024-01-01
//!
//! # Every free hour, using working hours from a settings file
//! dayplan free-slot -i events.json --date 2024-01-01 --settings settings.json --all
//!
//! # Classify a chat message
//! dayplan intent "schedule a meeting with the team"
//!
//! # Morning briefing for a saved state
//! dayplan briefing -i state.json --today 2024-01-01
//!
//! # Send a chat message and save the resulting state
//! dayplan chat -i state.json -o state.json "remind me to call the bank"
//! ```

use std::io::{self, Read};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dayplan_engine::availability::find_free_slot_checked;
use dayplan_engine::briefing::DailyBriefing;
use dayplan_engine::conflict::{has_conflict_checked, has_conflict_excluding_self};
use dayplan_engine::event::validate_date;
use dayplan_engine::store::Settings;
use dayplan_engine::{
    find_conflicts, find_free_slot_in, free_slots, parse_intent, reduce, respond, AppState, Event,
    EventCategory, DEFAULT_DURATION_MINUTES,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dayplan",
    version,
    about = "Day planner: event conflicts, free slots and a chat assistant"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a candidate event overlaps any existing event
    Conflict {
        /// Events JSON: an array of events or a saved state (reads stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Date of the candidate (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Candidate start time (HH:mm)
        #[arg(long)]
        start: String,
        /// Candidate end time (HH:mm)
        #[arg(long)]
        end: String,
        /// Candidate id
        #[arg(long, default_value = "candidate")]
        id: String,
        /// Ignore existing events with the same id as the candidate
        #[arg(long)]
        exclude_self: bool,
    },
    /// Find the first free hourly slot on a date
    FreeSlot {
        /// Events JSON: an array of events or a saved state (reads stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Date to search (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Desired duration in minutes (slots are always one hour)
        #[arg(long, default_value_t = DEFAULT_DURATION_MINUTES)]
        duration: u32,
        /// Settings JSON whose working hours set the search window. Unusable
        /// working hours are an error here; the chat assistant instead falls
        /// back to 09:00-17:00 for its hint.
        #[arg(long)]
        settings: Option<String>,
        /// List every free hour instead of the first
        #[arg(long)]
        all: bool,
    },
    /// Classify a chat message and print the intent as JSON
    Intent {
        /// The message text
        text: String,
        /// Date stamped on created items (defaults to the local date)
        #[arg(long)]
        today: Option<String>,
    },
    /// Print the daily briefing for a saved state
    Briefing {
        /// State JSON (reads stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Date to brief (defaults to the local date)
        #[arg(long)]
        today: Option<String>,
    },
    /// Send a chat message to the assistant
    Chat {
        /// The message text
        text: String,
        /// State JSON (starts from an empty state if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Write the resulting state here
        #[arg(short, long)]
        output: Option<String>,
        /// Today's date (defaults to the local date)
        #[arg(long)]
        today: Option<String>,
    },
}

#[derive(Serialize)]
struct ConflictReport<'a> {
    conflict: bool,
    with: Vec<&'a str>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Conflict {
            input,
            date,
            start,
            end,
            id,
            exclude_self,
        } => {
            let (events, _) = read_events(input.as_deref())?;
            let candidate = Event::new(id, "", "candidate", date, start, end, EventCategory::Other);

            // Validates the candidate and every event before any comparison.
            let checked =
                has_conflict_checked(&candidate, &events).context("Invalid event data")?;
            let conflict = if exclude_self {
                has_conflict_excluding_self(&candidate, &events)
            } else {
                checked
            };
            let with: Vec<&str> = find_conflicts(&candidate, &events)
                .into_iter()
                .filter(|e| !exclude_self || e.id != candidate.id)
                .map(|e| e.id.as_str())
                .collect();
            let report = ConflictReport { conflict, with };
            info!(conflict = report.conflict, count = report.with.len(), "conflict check");
            println!("{}", serde_json::to_string(&report)?);
        }
        Commands::FreeSlot {
            input,
            date,
            duration,
            settings,
            all,
        } => {
            let (events, state_settings) = read_events(input.as_deref())?;
            let settings = match settings {
                Some(path) => Some(read_settings(&path)?),
                None => state_settings,
            };
            let window = match &settings {
                Some(s) => Some(s.slot_window().context("Invalid working hours")?),
                None => None,
            };
            debug!(?window, duration, "searching for free slot");

            // Validates the date and every event before any search runs.
            let first = find_free_slot_checked(&events, &date, duration)
                .context("Invalid event data")?;
            let window_or_default = window.unwrap_or_default();

            if all {
                let slots = free_slots(&events, &date, window_or_default);
                if slots.is_empty() {
                    println!("no free slot");
                } else {
                    println!("{}", slots.join("\n"));
                }
            } else {
                let slot = match window {
                    Some(w) => find_free_slot_in(&events, &date, w),
                    None => first,
                };
                println!("{}", slot.as_deref().unwrap_or("no free slot"));
            }
        }
        Commands::Intent { text, today } => {
            let today = resolve_today(today)?;
            let intent = parse_intent(&text, &today);
            println!("{}", serde_json::to_string_pretty(&intent)?);
        }
        Commands::Briefing { input, today } => {
            let today = resolve_today(today)?;
            let state = read_state(input.as_deref(), true)?;
            println!("{}", DailyBriefing::for_date(&state, &today).message());
        }
        Commands::Chat {
            text,
            input,
            output,
            today,
        } => {
            let today = resolve_today(today)?;
            let state = read_state(input.as_deref(), false)?;
            let reply = respond(&state, &text, &today, next_id);
            println!("{}", reply.message);

            if let Some(path) = output {
                let next = match reply.action {
                    Some(action) => reduce(&state, action),
                    None => state,
                };
                let json = serde_json::to_string_pretty(&next)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write file: {}", path))?;
                info!(path = %path, "saved state");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Ids for items created from chat: millisecond timestamp plus a counter.
fn next_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), n)
}

fn resolve_today(today: Option<String>) -> Result<String> {
    let today = today
        .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string());
    validate_date(&today).context("Invalid --today")?;
    Ok(today)
}

/// Events plus, when the input was a saved state, its settings.
fn read_events(path: Option<&str>) -> Result<(Vec<Event>, Option<Settings>)> {
    let json = read_input(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&json).context("Expected a JSON array of events or a saved state")?;
    if value.is_array() {
        let events = serde_json::from_value(value).context("Failed to parse events")?;
        return Ok((events, None));
    }
    let state = AppState::from_json(&json).context("Failed to parse state JSON")?;
    Ok((state.events, Some(state.settings)))
}

fn read_state(path: Option<&str>, stdin_fallback: bool) -> Result<AppState> {
    if path.is_none() && !stdin_fallback {
        return Ok(AppState::default());
    }
    let json = read_input(path)?;
    AppState::from_json(&json).context("Failed to parse state JSON")
}

fn read_settings(path: &str) -> Result<Settings> {
    let json = read_input(Some(path))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse settings: {}", path))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
