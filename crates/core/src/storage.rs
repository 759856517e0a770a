//! Durable key-value slot for the serialized task collection.
//!
//! The whole collection is the unit of persistence: one row in a `slots`
//! table, keyed by a fixed name, holding the JSON array of tasks. Memory is
//! the source of truth for the running session; writes here are best-effort
//! relative to it.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::config::AppConfig;
use crate::model::Task;

const SLOT_KEY: &str = "tasks";

pub struct TaskStorage {
    conn: Connection,
}

impl TaskStorage {
    pub fn open(config: &AppConfig) -> Result<Self> {
        let conn = Connection::open(config.db_path()).with_context(|| {
            format!("Failed to open database at {}", config.db_path().display())
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to configure SQLite WAL mode")?;

        let storage = Self { conn };
        storage.apply_migrations()?;
        Ok(storage)
    }

    /// Read the task collection from the slot. A missing row, unreadable
    /// storage, or malformed JSON all read as an empty collection; corruption
    /// is treated as "no prior data", never an error.
    pub fn load(&self) -> Vec<Task> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![SLOT_KEY],
                |row| row.get(0),
            )
            .optional()
            .ok()
            .flatten();

        match raw {
            Some(json) => match serde_json::from_str::<Vec<Task>>(&json) {
                Ok(tasks) => tasks,
                Err(err) => {
                    tracing::debug!(%err, "discarding malformed task slot");
                    Vec::new()
                }
            },
            None => Vec::new(),
        }
    }

    /// Serialize the full collection and overwrite the slot.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string(tasks).context("Failed to serialize tasks")?;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO slots (key, value) VALUES (?1, ?2)",
                params![SLOT_KEY, json],
            )
            .context("Failed to write task slot")?;
        Ok(())
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS slots (key TEXT PRIMARY KEY, value TEXT);",
        )?;
        Ok(())
    }

    #[cfg(test)]
    fn overwrite_raw(&self, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO slots (key, value) VALUES (?1, ?2)",
            params![SLOT_KEY, value],
        )?;
        Ok(())
    }
}
