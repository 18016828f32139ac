//! Task records and the validation / transition rules.
//!
//! The status lifecycle is deliberately unrestricted: every status can move
//! to every other status, and DONE is not sticky. Creation only accepts a
//! title; status and priority start from fixed defaults.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Task status lifecycle: PENDING -> IN_PROGRESS -> DONE, in any direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    InProgress,
    Done,
}

impl Status {
    /// All statuses, in column order for the board view.
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Done];

    pub fn parse(value: &str) -> Option<Status> {
        match value.trim() {
            "PENDING" => Some(Status::Pending),
            "IN_PROGRESS" => Some(Status::InProgress),
            "DONE" => Some(Status::Done),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::InProgress => "IN_PROGRESS",
            Status::Done => "DONE",
        }
    }
}

/// Task priority tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn parse(value: &str) -> Option<Priority> {
        match value.trim() {
            "LOW" => Some(Priority::Low),
            "MEDIUM" => Some(Priority::Medium),
            "HIGH" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }

    /// Display rank: HIGH sorts before MEDIUM sorts before LOW.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// A task row as persisted and served over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub status: Status,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a task with system defaults: PENDING, MEDIUM, no due date.
    pub fn new(id: u64, title: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            status: Status::Pending,
            priority: Priority::Medium,
            created_at,
            due_date: None,
        }
    }

    /// Apply a validated update in place. `id` and `created_at` never change.
    pub fn apply(&mut self, update: &TaskUpdate) {
        match update {
            TaskUpdate::Rename(title) => self.title = title.clone(),
            TaskUpdate::SetStatus(status) => self.status = *status,
            TaskUpdate::SetPriority(priority) => self.priority = *priority,
            TaskUpdate::SetDueDate(due_date) => self.due_date = *due_date,
        }
    }
}

/// The validated write-set: one well-defined operation per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskUpdate {
    Rename(String),
    SetStatus(Status),
    SetPriority(Priority),
    /// `None` clears the due date.
    SetDueDate(Option<DateTime<Utc>>),
}

/// Validate a proposed title: non-empty after trimming, returned trimmed.
pub fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("title cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Translate the legacy `completed` boolean alias.
///
/// true -> DONE, false -> PENDING. Never IN_PROGRESS: the alias predates the
/// three-state lifecycle and only ever expressed done-ness.
pub fn status_from_completed(completed: bool) -> Status {
    if completed {
        Status::Done
    } else {
        Status::Pending
    }
}

/// Parse a due date from its wire representation.
///
/// Accepts RFC 3339 as well as the naive forms an HTML datetime-local input
/// produces ("2025-06-01T14:30", with or without seconds) and a bare date.
/// Naive values are taken as UTC.
pub fn parse_due_date(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("due date cannot be empty".to_string()));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(Error::Validation(format!("invalid due date '{trimmed}'")))
}

/// Build the sanitized write-set for a partial `{completed, status, priority}`
/// update.
///
/// Unrecognized values are dropped, not rejected. The explicit `status` is
/// applied after the `completed` alias, so it wins when both are present.
pub fn sanitize_updates(
    completed: Option<bool>,
    status: Option<&str>,
    priority: Option<&str>,
) -> Vec<TaskUpdate> {
    let mut updates = Vec::new();
    if let Some(completed) = completed {
        updates.push(TaskUpdate::SetStatus(status_from_completed(completed)));
    }
    if let Some(status) = status.and_then(Status::parse) {
        updates.push(TaskUpdate::SetStatus(status));
    }
    if let Some(priority) = priority.and_then(Priority::parse) {
        updates.push(TaskUpdate::SetPriority(priority));
    }
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn new_task_uses_defaults() {
        let task = Task::new(1, "Buy milk".to_string(), at(1_000));
        assert_eq!(task.status, Status::Pending);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn title_validation_trims_and_rejects_blank() {
        assert_eq!(validate_title("  Buy milk  ").unwrap(), "Buy milk");
        assert!(validate_title("").is_err());
        assert!(validate_title("   \t ").is_err());
    }

    #[test]
    fn status_parse_is_exact() {
        assert_eq!(Status::parse("DONE"), Some(Status::Done));
        assert_eq!(Status::parse(" IN_PROGRESS "), Some(Status::InProgress));
        assert_eq!(Status::parse("done"), None);
        assert_eq!(Status::parse("ARCHIVED"), None);
    }

    #[test]
    fn completed_alias_never_maps_to_in_progress() {
        assert_eq!(status_from_completed(true), Status::Done);
        assert_eq!(status_from_completed(false), Status::Pending);
    }

    #[test]
    fn apply_status_is_idempotent() {
        let mut task = Task::new(7, "t".to_string(), at(0));
        let update = TaskUpdate::SetStatus(Status::Done);
        task.apply(&update);
        let once = task.clone();
        task.apply(&update);
        assert_eq!(task, once);
    }

    #[test]
    fn done_can_be_reopened() {
        let mut task = Task::new(7, "t".to_string(), at(0));
        task.apply(&TaskUpdate::SetStatus(Status::Done));
        task.apply(&TaskUpdate::SetStatus(Status::Pending));
        assert_eq!(task.status, Status::Pending);
    }

    #[test]
    fn due_date_parses_rfc3339_and_datetime_local() {
        assert!(parse_due_date("2025-06-01T14:30:00Z").is_ok());
        assert!(parse_due_date("2025-06-01T14:30:00+02:00").is_ok());
        assert!(parse_due_date("2025-06-01T14:30").is_ok());
        assert!(parse_due_date("2025-06-01").is_ok());
    }

    #[test]
    fn due_date_rejects_garbage() {
        assert!(parse_due_date("not-a-date").is_err());
        assert!(parse_due_date("").is_err());
        assert!(parse_due_date("2025-13-40").is_err());
    }

    #[test]
    fn sanitize_drops_unrecognized_values() {
        let updates = sanitize_updates(None, Some("ARCHIVED"), Some("URGENT"));
        assert!(updates.is_empty());
    }

    #[test]
    fn sanitize_explicit_status_wins_over_alias() {
        let updates = sanitize_updates(Some(true), Some("IN_PROGRESS"), None);
        assert_eq!(
            updates,
            vec![
                TaskUpdate::SetStatus(Status::Done),
                TaskUpdate::SetStatus(Status::InProgress),
            ]
        );
        let mut task = Task::new(1, "t".to_string(), at(0));
        for update in &updates {
            task.apply(update);
        }
        assert_eq!(task.status, Status::InProgress);
    }

    #[test]
    fn wire_shape_is_camel_case_with_screaming_enums() {
        let task = Task::new(3, "Ship it".to_string(), at(86_400));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["priority"], "MEDIUM");
        assert!(json.get("createdAt").is_some());
        assert!(json["dueDate"].is_null());
    }
}
