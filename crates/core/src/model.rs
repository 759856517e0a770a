use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A titled, dated, completable unit of work.
///
/// Serialized field names match the persisted slot layout:
/// `{"id": 1, "title": "…", "dueDate": "2024-06-10", "isDone": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub due_date: NaiveDate,
    pub is_done: bool,
}

/// One of the mutually exclusive date-based groupings a task can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Today,
    ThisWeek,
    Other,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Today => "today",
            Bucket::ThisWeek => "week",
            Bucket::Other => "other",
        }
    }

    /// Human heading used by list surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Today => "Today",
            Bucket::ThisWeek => "This week",
            Bucket::Other => "Other",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "today" => Ok(Bucket::Today),
            "week" | "thisweek" | "this-week" => Ok(Bucket::ThisWeek),
            "other" => Ok(Bucket::Other),
            other => Err(anyhow!(
                "Unknown bucket '{}': expected today|week|other",
                other
            )),
        }
    }
}

impl ValueEnum for Bucket {
    fn value_variants<'a>() -> &'a [Self] {
        const VARIANTS: [Bucket; 3] = [Bucket::Today, Bucket::ThisWeek, Bucket::Other];
        &VARIANTS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}
