//! Listing filter composition.
//!
//! Builds a pure filter description from the optional `status`, `priority`
//! and `query` parameters. The sentinel `ALL` means "no filter" for the enum
//! parameters; absence of all three selects every task.

use crate::error::{Error, Result};
use crate::task::{Priority, Status, Task};

/// Sentinel accepted by the enum filter parameters.
pub const ALL_SENTINEL: &str = "ALL";

/// A composed listing filter. Identical inputs always yield an identical
/// filter; matching performs no I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub title_contains: Option<String>,
}

impl TaskFilter {
    /// Compose a filter from raw query parameters.
    ///
    /// `ALL` and absence both mean "no filter". A value that is neither a
    /// member of the enumeration nor the sentinel is rejected.
    pub fn from_params(
        status: Option<&str>,
        priority: Option<&str>,
        query: Option<&str>,
    ) -> Result<TaskFilter> {
        let status = match status.map(str::trim) {
            None | Some("") | Some(ALL_SENTINEL) => None,
            Some(value) => Some(Status::parse(value).ok_or_else(|| {
                Error::Validation(format!("invalid status filter '{value}'"))
            })?),
        };
        let priority = match priority.map(str::trim) {
            None | Some("") | Some(ALL_SENTINEL) => None,
            Some(value) => Some(Priority::parse(value).ok_or_else(|| {
                Error::Validation(format!("invalid priority filter '{value}'"))
            })?),
        };
        let title_contains = query
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase);
        Ok(TaskFilter {
            status,
            priority,
            title_contains,
        })
    }

    /// Whether a task passes every active criterion.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(needle) = &self.title_contains {
            if !task.title.to_lowercase().contains(needle) {
                return false;
            }
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.title_contains.is_none()
    }
}

/// Listing order: most recently created first, id as the final tie-break.
pub fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| {
        right
            .created_at
            .cmp(&left.created_at)
            .then_with(|| right.id.cmp(&left.id))
    });
}
