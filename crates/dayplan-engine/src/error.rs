//! Error types for dayplan-engine operations.
//!
//! The scheduling operations themselves never fail; these errors come from
//! validating caller-supplied values at the boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid time '{0}': expected zero-padded HH:mm")]
    InvalidTime(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval { start: String, end: String },

    #[error("Invalid working hours: {0}")]
    InvalidWorkingHours(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
