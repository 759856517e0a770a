use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;

static DEFAULT_DB_NAME: &str = "dayplan.sqlite3";
static ENV_DATA_DIR: &str = "DAYPLAN_DATA_DIR";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "dayplan", "dayplan"));

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    db_path: PathBuf,
}

impl AppConfig {
    /// Construct [`AppConfig`] by resolving the data directory using the
    /// provided override, the `DAYPLAN_DATA_DIR` environment variable, and
    /// platform defaults, creating the directory when needed.
    pub fn discover(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir_override)?;
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory at {}", data_dir.display())
            })?;
        }
        Self::from_data_dir(data_dir)
    }

    /// Construct [`AppConfig`] directly from a resolved data directory.
    pub fn from_data_dir(data_dir: PathBuf) -> Result<Self> {
        let db_path = data_dir.join(DEFAULT_DB_NAME);
        Ok(Self { data_dir, db_path })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Ok(env_dir) = env::var(ENV_DATA_DIR) {
        return Ok(PathBuf::from(env_dir));
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok(project.data_dir().to_path_buf());
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(".dayplan"));
    }

    Ok(env::current_dir()?.join(".dayplan"))
}
