//! Calendar events and boundary validation of their date and time fields.
//!
//! Times are fixed-width `HH:mm` strings and dates are `YYYY-MM-DD` strings.
//! The scheduling operations compare them as plain strings, which only orders
//! correctly when every value is zero-padded. [`Event::validate`] checks that
//! before the values reach the engine.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Classification tag carried by an event. The engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Meeting,
    Work,
    Personal,
    #[default]
    Other,
}

/// One scheduled calendar occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    /// Owning user. Not validated or filtered on by the engine.
    #[serde(rename = "userId", alias = "ownerId")]
    pub owner_id: String,
    pub title: String,
    /// `YYYY-MM-DD`, used only as an equality key.
    pub date: String,
    /// `HH:mm`, 24-hour, zero-padded.
    pub start_time: String,
    /// `HH:mm`, 24-hour, zero-padded.
    pub end_time: String,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<String>,
}

impl Event {
    /// Build an event with no location or participants.
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        category: EventCategory,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            title: title.into(),
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            category,
            location: None,
            participants: Vec::new(),
        }
    }

    /// Check the date and both times are well formed and that the event
    /// starts before it ends.
    ///
    /// # Errors
    /// Returns `PlannerError::InvalidDate`, `PlannerError::InvalidTime` or
    /// `PlannerError::InvalidInterval`.
    pub fn validate(&self) -> Result<()> {
        validate_date(&self.date)?;
        validate_time(&self.start_time)?;
        validate_time(&self.end_time)?;
        if self.start_time >= self.end_time {
            return Err(PlannerError::InvalidInterval {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }
        Ok(())
    }
}

/// Validate a zero-padded 24-hour `HH:mm` string.
///
/// `"9:00"`, `"24:00"` and `"09:60"` are all rejected.
pub fn validate_time(value: &str) -> Result<()> {
    let bytes = value.as_bytes();
    let well_shaped = bytes.len() == 5
        && bytes[2] == b':'
        && [0usize, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !well_shaped || NaiveTime::parse_from_str(value, "%H:%M").is_err() {
        return Err(PlannerError::InvalidTime(value.to_string()));
    }
    Ok(())
}

/// Validate a `YYYY-MM-DD` calendar date that actually exists.
pub fn validate_date(value: &str) -> Result<()> {
    let bytes = value.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !well_shaped || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err(PlannerError::InvalidDate(value.to_string()));
    }
    Ok(())
}
