//! Board grouping and due-date expiry classification.
//!
//! Everything here is pure and recomputed from the current task collection
//! and an explicit wall-clock instant. Nothing is cached: a task can move
//! from not-expiring to expiring to expired purely by time passing.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::task::{Status, Task};

/// Hours before the due date during which a task counts as expiring soon.
pub const DEFAULT_EXPIRING_WINDOW_HOURS: i64 = 24;

/// Expiry classification for a single task at a single instant.
///
/// The two alert states are mutually exclusive. DONE tasks and tasks without
/// a due date are always `None` — completed work is exempt from deadline
/// alerts even when its due date has passed.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Expiry {
    None,
    ExpiringSoon,
    Expired,
}

impl Expiry {
    pub fn expiring_soon(&self) -> bool {
        matches!(self, Expiry::ExpiringSoon)
    }

    pub fn expired(&self) -> bool {
        matches!(self, Expiry::Expired)
    }
}

/// Classify with the default 24-hour window.
pub fn classify_expiry(task: &Task, now: DateTime<Utc>) -> Expiry {
    classify_expiry_with_window(task, now, DEFAULT_EXPIRING_WINDOW_HOURS)
}

/// Classify against a configurable expiring-soon window.
pub fn classify_expiry_with_window(
    task: &Task,
    now: DateTime<Utc>,
    window_hours: i64,
) -> Expiry {
    if task.status == Status::Done {
        return Expiry::None;
    }
    let Some(due) = task.due_date else {
        return Expiry::None;
    };
    let remaining = due - now;
    if remaining < Duration::zero() {
        Expiry::Expired
    } else if remaining <= Duration::hours(window_hours) {
        Expiry::ExpiringSoon
    } else {
        Expiry::None
    }
}

/// A task plus its derived display state.
#[derive(Debug, Clone, Serialize)]
pub struct BoardCard {
    #[serde(flatten)]
    pub task: Task,
    pub expiring_soon: bool,
    pub expired: bool,
}

/// Tasks created on the same calendar day, priority-ordered.
#[derive(Debug, Clone, Serialize)]
pub struct DayGroup {
    pub day: NaiveDate,
    pub cards: Vec<BoardCard>,
}

/// One status column of the board.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub status: Status,
    pub groups: Vec<DayGroup>,
}

/// The full three-column board view.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    pub columns: Vec<BoardColumn>,
}

/// Derive the board from the current tasks and wall-clock time.
///
/// Per column: day-groups ascend by creation day (oldest first, matching the
/// board's creation-time ordering); within a day, HIGH sorts before MEDIUM
/// sorts before LOW, creation time breaking remaining ties.
pub fn build_board(tasks: &[Task], now: DateTime<Utc>) -> Board {
    let columns = Status::ALL
        .iter()
        .map(|status| build_column(*status, tasks, now))
        .collect();
    Board { columns }
}

fn build_column(status: Status, tasks: &[Task], now: DateTime<Utc>) -> BoardColumn {
    let mut column_tasks: Vec<&Task> = tasks.iter().filter(|t| t.status == status).collect();
    column_tasks.sort_by(|left, right| {
        let left_day = left.created_at.date_naive();
        let right_day = right.created_at.date_naive();
        left_day
            .cmp(&right_day)
            .then_with(|| left.priority.rank().cmp(&right.priority.rank()))
            .then_with(|| left.created_at.cmp(&right.created_at))
    });

    let mut groups: Vec<DayGroup> = Vec::new();
    for task in column_tasks {
        let day = task.created_at.date_naive();
        let expiry = classify_expiry(task, now);
        let card = BoardCard {
            task: task.clone(),
            expiring_soon: expiry.expiring_soon(),
            expired: expiry.expired(),
        };
        match groups.last_mut() {
            Some(group) if group.day == day => group.cards.push(card),
            _ => groups.push(DayGroup {
                day,
                cards: vec![card],
            }),
        }
    }

    BoardColumn { status, groups }
}
