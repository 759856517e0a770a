//! Input validation for task creation: title checks and due-date specs.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Rejected input. Blocks creation, surfaces through the notifier, and never
/// mutates the collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("Due date cannot be empty")]
    EmptyDueDate,
    #[error("Unrecognized due date '{0}'. Try YYYY-MM-DD, today, tomorrow, +3d, mon")]
    BadDueDate(String),
}

/// Trim the title and reject it when nothing remains.
pub fn require_title(title: &str) -> Result<&str, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed)
}

/// Parse a due-date spec relative to the local wall-clock date.
pub fn parse_due_date(spec: &str) -> Result<NaiveDate, ValidationError> {
    parse_due_date_from(spec, Local::now().date_naive())
}

/// Parse a due-date spec relative to an explicit `today`.
///
/// Accepted forms: `YYYY-MM-DD`, `today`, `tomorrow`, `+Nd` / `+Nw` offsets,
/// and weekday names (the next occurrence, never `today` itself).
pub fn parse_due_date_from(spec: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    static OFFSET_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\+(\d{1,4})([dw])$").expect("valid regex"));

    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDueDate);
    }

    let lower = trimmed.to_ascii_lowercase();
    match lower.as_str() {
        "today" => return Ok(today),
        "tomorrow" => return Ok(today + Duration::days(1)),
        _ => {}
    }

    if let Some(caps) = OFFSET_RE.captures(&lower) {
        let value: i64 = caps[1]
            .parse()
            .map_err(|_| ValidationError::BadDueDate(spec.to_string()))?;
        let days = match &caps[2] {
            "w" => value * 7,
            _ => value,
        };
        return Ok(today + Duration::days(days));
    }

    if let Some(weekday) = parse_weekday(&lower) {
        let mut days_ahead = (i64::from(weekday.num_days_from_monday())
            - i64::from(today.weekday().num_days_from_monday()))
        .rem_euclid(7);
        if days_ahead == 0 {
            days_ahead = 7;
        }
        return Ok(today + Duration::days(days_ahead));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::BadDueDate(spec.to_string()))
}

fn parse_weekday(label: &str) -> Option<Weekday> {
    match label {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}
