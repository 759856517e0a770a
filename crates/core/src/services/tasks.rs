use std::collections::HashSet;

use anyhow::Result;
use chrono::NaiveDate;

use crate::classify::{self, DayViews};
use crate::config::AppConfig;
use crate::model::Task;
use crate::notify::Notifier;
use crate::parser::{self, ValidationError};
use crate::storage::TaskStorage;

/// Canonical owner of the task collection. All mutation goes through it; the
/// full collection is written back to storage after every mutation.
pub struct TaskStore {
    storage: TaskStorage,
    tasks: Vec<Task>,
    next_id: u64,
    notifier: Notifier,
}

impl TaskStore {
    /// Open storage and load the collection. Corrupt or absent persisted data
    /// loads as an empty collection; ids resume above the persisted maximum.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let storage = TaskStorage::open(config)?;
        let mut tasks = storage.load();

        // Hand-edited slots could carry duplicate ids; keep the first of each.
        let mut seen = HashSet::new();
        tasks.retain(|task| seen.insert(task.id));

        let next_id = tasks.iter().map(|task| task.id).max().map_or(1, |id| id + 1);
        Ok(Self {
            storage,
            tasks,
            next_id,
            notifier: Notifier::new(),
        })
    }

    /// Create a task from a title and a due-date spec. Validation failures
    /// emit an error notification and leave the collection untouched. On
    /// success the task is prepended (newest first), persisted, and announced.
    pub fn create(&mut self, title: &str, due_spec: &str) -> Result<Task, ValidationError> {
        let title = match parser::require_title(title) {
            Ok(title) => title,
            Err(err) => return self.reject(err),
        };
        let due_date = match parser::parse_due_date(due_spec) {
            Ok(date) => date,
            Err(err) => return self.reject(err),
        };

        let task = Task {
            id: self.allocate_id(),
            title: title.to_string(),
            due_date,
            is_done: false,
        };
        self.tasks.insert(0, task.clone());
        tracing::debug!(id = task.id, due = %task.due_date, "task created");
        self.notifier.show(format!("Added \"{}\"", task.title));
        // Persist last so a failed save's error notification is what the
        // user ends up seeing.
        self.persist();
        Ok(task)
    }

    /// Flip completion for the task with `id`, in place. Unknown ids are a
    /// silent no-op, not an error; ids are never user-supplied directly.
    pub fn toggle_done(&mut self, id: u64) {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            tracing::debug!(id, "toggle ignored for unknown id");
            return;
        };
        task.is_done = !task.is_done;
        tracing::debug!(id, done = task.is_done, "task toggled");
        self.persist();
    }

    /// Remove the task with `id`, provided the caller's confirmation oracle
    /// said yes. An unconfirmed delete mutates nothing. A confirmed delete of
    /// an unknown id is a no-op but still announces the deletion, since the
    /// confirmation already happened. Returns whether a task was removed.
    pub fn delete(&mut self, id: u64, confirmed: bool) -> bool {
        if !confirmed {
            self.notifier.show("Deletion cancelled");
            return false;
        }

        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() < before;
        self.notifier.show("Task deleted");
        if removed {
            tracing::debug!(id, "task deleted");
            self.persist();
        }
        removed
    }

    /// Read-only snapshot, newest-created-first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The three date partitions relative to `now`. Recomputed per call.
    pub fn partition(&self, now: NaiveDate) -> DayViews {
        classify::partition(&self.tasks, now)
    }

    /// Tasks due on the externally selected day; empty when unset.
    pub fn on_day(&self, selected: Option<NaiveDate>) -> Vec<Task> {
        classify::on_day(&self.tasks, selected)
    }

    /// Current transient status text; `""` once the message expires.
    pub fn notification(&mut self) -> &str {
        self.notifier.current()
    }

    fn reject(&mut self, err: ValidationError) -> Result<Task, ValidationError> {
        self.notifier.show_error(err.to_string());
        Err(err)
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Write the full collection through. A failed write is surfaced but the
    /// in-memory mutation stands; memory is the session's source of truth.
    fn persist(&mut self) {
        if let Err(err) = self.storage.save(&self.tasks) {
            tracing::warn!(%err, "failed to persist tasks; keeping in-memory state");
            self.notifier.show_error("Could not save changes");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_store() -> (TaskStore, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        let store = TaskStore::open(&config).expect("open store");
        (store, dir)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn create_prepends_and_assigns_distinct_ids() {
        let (mut store, _dir) = temp_store();
        let first = store.create("Write report", "2024-06-10").expect("create");
        let second = store.create("Plan trip", "2024-06-14").expect("create");
        let third = store.create("Buy groceries", "2024-06-09").expect("create");

        let ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn create_rejects_empty_title_without_mutating() {
        let (mut store, _dir) = temp_store();
        let err = store.create("   ", "2024-06-10").unwrap_err();
        assert_eq!(err, ValidationError::EmptyTitle);
        assert!(store.tasks().is_empty());
        assert_eq!(store.notification(), "Task title cannot be empty");
    }

    #[test]
    fn create_rejects_bad_due_date_without_mutating() {
        let (mut store, _dir) = temp_store();
        assert_eq!(
            store.create("Write report", "").unwrap_err(),
            ValidationError::EmptyDueDate
        );
        assert_eq!(
            store.create("Write report", "someday").unwrap_err(),
            ValidationError::BadDueDate("someday".into())
        );
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn create_announces_success() {
        let (mut store, _dir) = temp_store();
        store.create("Write report", "2024-06-10").expect("create");
        assert_eq!(store.notification(), "Added \"Write report\"");
    }

    #[test]
    fn toggle_is_idempotent_and_keeps_order() {
        let (mut store, _dir) = temp_store();
        store.create("One", "2024-06-10").expect("create");
        let target = store.create("Two", "2024-06-11").expect("create");
        store.create("Three", "2024-06-12").expect("create");

        let original: Vec<(u64, String)> = store
            .tasks()
            .iter()
            .map(|t| (t.id, t.title.clone()))
            .collect();

        store.toggle_done(target.id);
        let toggled = store
            .tasks()
            .iter()
            .find(|t| t.id == target.id)
            .expect("task present");
        assert!(toggled.is_done);

        store.toggle_done(target.id);
        let restored = store
            .tasks()
            .iter()
            .find(|t| t.id == target.id)
            .expect("task present");
        assert!(!restored.is_done);
        assert_eq!(restored.title, target.title);
        assert_eq!(restored.due_date, target.due_date);

        let after: Vec<(u64, String)> = store
            .tasks()
            .iter()
            .map(|t| (t.id, t.title.clone()))
            .collect();
        assert_eq!(after, original);
    }

    #[test]
    fn toggle_unknown_id_is_a_silent_noop() {
        let (mut store, _dir) = temp_store();
        store.create("One", "2024-06-10").expect("create");
        store.toggle_done(999);
        assert_eq!(store.tasks().len(), 1);
        assert!(!store.tasks()[0].is_done);
    }

    #[test]
    fn unconfirmed_delete_leaves_the_collection_unchanged() {
        let (mut store, _dir) = temp_store();
        let task = store.create("Write report", "2024-06-10").expect("create");

        let removed = store.delete(task.id, false);
        assert!(!removed);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.notification(), "Deletion cancelled");
    }

    #[test]
    fn confirmed_delete_removes_and_announces() {
        let (mut store, _dir) = temp_store();
        let task = store.create("Write report", "2024-06-10").expect("create");

        assert!(store.delete(task.id, true));
        assert!(store.tasks().is_empty());
        assert_eq!(store.notification(), "Task deleted");
    }

    #[test]
    fn confirmed_delete_of_unknown_id_still_announces() {
        let (mut store, _dir) = temp_store();
        store.create("Write report", "2024-06-10").expect("create");

        assert!(!store.delete(999, true));
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.notification(), "Task deleted");
    }

    #[test]
    fn mutations_survive_reopening_the_store() {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");

        let kept;
        {
            let mut store = TaskStore::open(&config).expect("open");
            kept = store.create("Plan trip", "2024-06-14").expect("create");
            let doomed = store.create("Scratch", "2024-06-15").expect("create");
            store.toggle_done(kept.id);
            store.delete(doomed.id, true);
        }

        let mut reopened = TaskStore::open(&config).expect("reopen");
        assert_eq!(reopened.tasks().len(), 1);
        assert_eq!(reopened.tasks()[0].id, kept.id);
        assert!(reopened.tasks()[0].is_done);

        // Fresh ids keep climbing past everything ever persisted.
        let fresh = reopened.create("Next", "2024-06-16").expect("create");
        assert!(fresh.id > kept.id);
    }

    #[test]
    fn partition_and_selected_day_views_come_from_the_store() {
        let (mut store, _dir) = temp_store();
        store.create("Write report", "2024-06-10").expect("create");
        store.create("Plan trip", "2024-06-14").expect("create");
        store.create("Renew passport", "2024-07-01").expect("create");

        let now = date(2024, 6, 10);
        let views = store.partition(now);
        assert_eq!(views.today.len(), 1);
        assert_eq!(views.today[0].title, "Write report");
        assert_eq!(views.this_week.len(), 1);
        assert_eq!(views.this_week[0].title, "Plan trip");
        assert_eq!(views.other.len(), 1);
        assert_eq!(views.other[0].title, "Renew passport");

        let selected = store.on_day(Some(date(2024, 6, 14)));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "Plan trip");
        assert!(store.on_day(None).is_empty());
    }

    #[test]
    fn failed_save_surfaces_an_error_notification() {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        let mut store = TaskStore::open(&config).expect("open store");

        // Pull the slot table out from under the open store so every
        // subsequent save fails.
        let raw = rusqlite::Connection::open(config.db_path()).expect("raw connection");
        raw.execute_batch("DROP TABLE slots;").expect("drop slots");

        let task = store.create("Write report", "2024-06-10").expect("create");
        assert_eq!(store.notification(), "Could not save changes");
        // The in-memory mutation stands; persistence is best-effort.
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, task.id);

        store.delete(task.id, true);
        assert_eq!(store.notification(), "Could not save changes");
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn duplicate_ids_in_a_tampered_slot_are_dropped_on_load() {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");

        {
            let storage = TaskStorage::open(&config).expect("open storage");
            let dupes = vec![
                Task {
                    id: 1,
                    title: "first".into(),
                    due_date: date(2024, 6, 10),
                    is_done: false,
                },
                Task {
                    id: 1,
                    title: "second".into(),
                    due_date: date(2024, 6, 11),
                    is_done: false,
                },
            ];
            storage.save(&dupes).expect("seed slot");
        }

        let store = TaskStore::open(&config).expect("open store");
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "first");
    }
}
