//! File-backed task store.
//!
//! Tasks live in a single JSON snapshot (`tasks.json`) in the data
//! directory. Every mutation takes an exclusive lock on a sibling `.lock`
//! file, rewrites the snapshot atomically, and returns the task as written —
//! that response is the canonical row the caller should mirror. Reads go
//! straight to the snapshot; the atomic rename guarantees they never see a
//! half-written file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::lock::{self, StoreLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::query::{self, TaskFilter};
use crate::task::{Task, TaskUpdate};

const SNAPSHOT_FILE: &str = "tasks.json";
const SNAPSHOT_SCHEMA_VERSION: &str = "taskboard.tasks.v1";

fn default_schema_version() -> String {
    SNAPSHOT_SCHEMA_VERSION.to_string()
}

fn default_next_id() -> u64 {
    1
}

/// On-disk shape of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default = "default_schema_version")]
    schema_version: String,
    #[serde(default = "default_next_id")]
    next_id: u64,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            next_id: 1,
            tasks: Vec::new(),
        }
    }
}

/// Task record store over a data directory.
#[derive(Debug, Clone)]
pub struct TaskStore {
    data_dir: PathBuf,
    lock_timeout_ms: u64,
}

impl TaskStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    pub fn with_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.lock_timeout_ms = timeout_ms;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.data_dir.join(format!("{SNAPSHOT_FILE}.lock"))
    }

    /// Create a task with defaulted status/priority and a fresh id.
    ///
    /// `title` is expected to be validated already; the store does not trim.
    pub fn create(&self, title: String) -> Result<Task> {
        self.create_at(title, Utc::now())
    }

    pub(crate) fn create_at(&self, title: String, created_at: DateTime<Utc>) -> Result<Task> {
        let _lock = StoreLock::acquire(self.lock_path(), self.lock_timeout_ms)?;
        let mut snapshot = self.load()?;
        let task = Task::new(snapshot.next_id, title, created_at);
        snapshot.next_id += 1;
        snapshot.tasks.push(task.clone());
        self.save(&snapshot)?;
        debug!(id = task.id, "task created");
        Ok(task)
    }

    /// Fetch one task by id.
    pub fn get(&self, id: u64) -> Result<Task> {
        let snapshot = self.load()?;
        snapshot
            .tasks
            .into_iter()
            .find(|task| task.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// List tasks passing the filter, most recently created first.
    pub fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let snapshot = self.load()?;
        let mut tasks: Vec<Task> = snapshot
            .tasks
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect();
        query::sort_newest_first(&mut tasks);
        Ok(tasks)
    }

    /// Apply a write-set to one task and return the row as persisted.
    ///
    /// An empty write-set is a no-op that still returns the current row, so
    /// a PATCH whose fields were all sanitized away answers with the
    /// unchanged task.
    pub fn update(&self, id: u64, updates: &[TaskUpdate]) -> Result<Task> {
        let _lock = StoreLock::acquire(self.lock_path(), self.lock_timeout_ms)?;
        let mut snapshot = self.load()?;
        let task = snapshot
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(Error::NotFound(id))?;
        for update in updates {
            task.apply(update);
        }
        let updated = task.clone();
        self.save(&snapshot)?;
        debug!(id, count = updates.len(), "task updated");
        Ok(updated)
    }

    /// Remove a task permanently.
    pub fn delete(&self, id: u64) -> Result<()> {
        let _lock = StoreLock::acquire(self.lock_path(), self.lock_timeout_ms)?;
        let mut snapshot = self.load()?;
        let before = snapshot.tasks.len();
        snapshot.tasks.retain(|task| task.id != id);
        if snapshot.tasks.len() == before {
            return Err(Error::NotFound(id));
        }
        self.save(&snapshot)?;
        debug!(id, "task deleted");
        Ok(())
    }

    fn load(&self) -> Result<Snapshot> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(Snapshot::empty());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|err| Error::Store(format!("corrupt snapshot {}: {err}", path.display())))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        lock::write_atomic(self.snapshot_path(), json.as_bytes())
    }
}
