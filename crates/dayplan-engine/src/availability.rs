//! Hourly free-slot search within a workday window.
//!
//! The window is scanned one whole hour at a time in ascending order, so the
//! result for a given input is always the same. Each hourly slot is tested
//! with the same overlap rule as [`crate::conflict::has_conflict`], with the
//! slot playing the candidate.

use crate::conflict::intervals_overlap;
use crate::error::{PlannerError, Result};
use crate::event::{validate_date, validate_time, Event};

/// Slot length assumed when the caller does not ask for one.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// A range of whole hours that slots may start in: `start_hour..end_hour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl Default for SlotWindow {
    /// The 09:00 to 17:00 workday.
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

impl SlotWindow {
    /// Build a window from `HH:mm` working hours such as `"09:00"`/`"17:00"`.
    ///
    /// # Errors
    /// Returns `PlannerError::InvalidTime` for malformed times and
    /// `PlannerError::InvalidWorkingHours` when either bound is not on the
    /// hour or the start is not before the end.
    pub fn from_working_hours(start: &str, end: &str) -> Result<Self> {
        let start_hour = whole_hour(start)?;
        // "24:00" is not a valid HH:mm, so an end of midnight is written "00:00".
        let end_hour = match whole_hour(end)? {
            0 => 24,
            h => h,
        };
        if start_hour >= end_hour {
            return Err(PlannerError::InvalidWorkingHours(format!(
                "{start} is not before {end}"
            )));
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    fn hours(self) -> impl Iterator<Item = u8> {
        self.start_hour..self.end_hour.min(24)
    }
}

fn whole_hour(value: &str) -> Result<u8> {
    validate_time(value)?;
    if !value.ends_with(":00") {
        return Err(PlannerError::InvalidWorkingHours(format!(
            "{value} is not on the hour"
        )));
    }
    value[..2]
        .parse()
        .map_err(|_| PlannerError::InvalidTime(value.to_string()))
}

fn slot_bounds(hour: u8) -> (String, String) {
    // Hour 23's slot ends at "24:00", which still sorts after every valid time.
    (format!("{:02}:00", hour), format!("{:02}:00", hour + 1))
}

fn slot_is_free(events_on_date: &[&Event], hour: u8) -> bool {
    let (slot_start, slot_end) = slot_bounds(hour);
    !events_on_date
        .iter()
        .any(|e| intervals_overlap(&e.start_time, &e.end_time, &slot_start, &slot_end))
}

fn events_on<'a>(existing: &'a [Event], date: &str) -> Vec<&'a Event> {
    existing.iter().filter(|e| e.date == date).collect()
}

/// First free hourly slot on `date` within the default 09:00 to 17:00 window.
///
/// Returns the slot start as `HH:00`, or `None` when all eight slots are
/// taken. The duration is accepted for callers that track it but does
/// not change the slot size: slots are always one hour.
pub fn find_free_slot(existing: &[Event], date: &str, _duration_minutes: u32) -> Option<String> {
    find_free_slot_in(existing, date, SlotWindow::default())
}

/// First free hourly slot on `date` within `window`.
pub fn find_free_slot_in(existing: &[Event], date: &str, window: SlotWindow) -> Option<String> {
    let todays = events_on(existing, date);
    window
        .hours()
        .find(|&hour| slot_is_free(&todays, hour))
        .map(|hour| slot_bounds(hour).0)
}

/// Every free hourly slot start on `date` within `window`, ascending.
pub fn free_slots(existing: &[Event], date: &str, window: SlotWindow) -> Vec<String> {
    let todays = events_on(existing, date);
    window
        .hours()
        .filter(|&hour| slot_is_free(&todays, hour))
        .map(|hour| slot_bounds(hour).0)
        .collect()
}

/// Validate the date and every event, then run [`find_free_slot`].
///
/// # Errors
/// Returns the first validation error found, date first.
pub fn find_free_slot_checked(
    existing: &[Event],
    date: &str,
    duration_minutes: u32,
) -> Result<Option<String>> {
    validate_date(date)?;
    for e in existing {
        e.validate()?;
    }
    Ok(find_free_slot(existing, date, duration_minutes))
}
