//! Pure date-based partitioning of a task collection.
//!
//! Views are recomputed on every call; nothing here holds state or caches.

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::{Bucket, Task};

/// The three mutually exclusive groupings for a reference date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayViews {
    pub today: Vec<Task>,
    pub this_week: Vec<Task>,
    pub other: Vec<Task>,
}

impl DayViews {
    pub fn bucket(&self, bucket: Bucket) -> &[Task] {
        match bucket {
            Bucket::Today => &self.today,
            Bucket::ThisWeek => &self.this_week,
            Bucket::Other => &self.other,
        }
    }

    pub fn len(&self) -> usize {
        self.today.len() + self.this_week.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Two dates match iff they denote the same calendar day.
pub fn same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// The Sunday-to-Saturday week containing `now`, both ends inclusive.
pub fn week_bounds(now: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = now - Duration::days(i64::from(now.weekday().num_days_from_sunday()));
    (start, start + Duration::days(6))
}

/// Whether `due` falls in the week of `now` without being `now` itself.
/// A task due today is classified under today only, never double-counted here.
pub fn in_week_excluding_today(due: NaiveDate, now: NaiveDate) -> bool {
    let (start, end) = week_bounds(now);
    due >= start && due <= end && !same_day(due, now)
}

/// The single bucket a due date lands in relative to `now`.
pub fn bucket_for(due: NaiveDate, now: NaiveDate) -> Bucket {
    if same_day(due, now) {
        Bucket::Today
    } else if in_week_excluding_today(due, now) {
        Bucket::ThisWeek
    } else {
        Bucket::Other
    }
}

/// Partition `tasks` into the three buckets. Every task lands in exactly one.
pub fn partition(tasks: &[Task], now: NaiveDate) -> DayViews {
    let mut views = DayViews::default();
    for task in tasks {
        match bucket_for(task.due_date, now) {
            Bucket::Today => views.today.push(task.clone()),
            Bucket::ThisWeek => views.this_week.push(task.clone()),
            Bucket::Other => views.other.push(task.clone()),
        }
    }
    views
}

/// Tasks due on the externally selected day; empty when no day is selected.
/// Independent of the partitions and allowed to overlap them.
pub fn on_day(tasks: &[Task], selected: Option<NaiveDate>) -> Vec<Task> {
    let Some(day) = selected else {
        return Vec::new();
    };
    tasks
        .iter()
        .filter(|task| same_day(task.due_date, day))
        .cloned()
        .collect()
}
