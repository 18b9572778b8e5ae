//! Detect overlapping events on the same date.
//!
//! Intervals are half-open `[start, end)` over `HH:mm` strings, compared
//! lexicographically. Adjacent events (where one ends exactly when another
//! starts) are NOT conflicts.

use crate::error::Result;
use crate::event::Event;

/// Three-clause overlap test between an existing interval and a candidate.
///
/// True when the existing interval starts inside the candidate, ends inside
/// it, or fully contains it. Equivalent to `start < cand_end && end > cand_start`
/// for well-formed intervals.
pub(crate) fn intervals_overlap(start: &str, end: &str, cand_start: &str, cand_end: &str) -> bool {
    (start >= cand_start && start < cand_end)
        || (end > cand_start && end <= cand_end)
        || (start <= cand_start && end >= cand_end)
}

/// Whether two events fall on the same date and their intervals overlap.
pub fn overlaps(existing: &Event, candidate: &Event) -> bool {
    existing.date == candidate.date
        && intervals_overlap(
            &existing.start_time,
            &existing.end_time,
            &candidate.start_time,
            &candidate.end_time,
        )
}

/// Whether `candidate` overlaps any event in `existing`.
///
/// Every entry is compared, including one that shares the candidate's `id`.
/// Use [`has_conflict_excluding_self`] when re-checking an event that is
/// already in the list.
pub fn has_conflict(candidate: &Event, existing: &[Event]) -> bool {
    existing.iter().any(|e| overlaps(e, candidate))
}

/// Like [`has_conflict`], but skips entries whose `id` equals the candidate's.
pub fn has_conflict_excluding_self(candidate: &Event, existing: &[Event]) -> bool {
    existing
        .iter()
        .filter(|e| e.id != candidate.id)
        .any(|e| overlaps(e, candidate))
}

/// All events in `existing` that overlap `candidate`, in input order.
pub fn find_conflicts<'a>(candidate: &Event, existing: &'a [Event]) -> Vec<&'a Event> {
    existing.iter().filter(|e| overlaps(e, candidate)).collect()
}

/// Validate the candidate and every existing event, then run [`has_conflict`].
///
/// # Errors
/// Returns the first validation error found, candidate first.
pub fn has_conflict_checked(candidate: &Event, existing: &[Event]) -> Result<bool> {
    candidate.validate()?;
    for e in existing {
        e.validate()?;
    }
    Ok(has_conflict(candidate, existing))
}
