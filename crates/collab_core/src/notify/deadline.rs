//! Upcoming-deadline selection for the reminder area.
//!
//! # Invariants
//! - A task is upcoming iff `0 < end_date - now <= horizon`.
//! - Overdue tasks are dropped, not flagged.
//! - Output is ascending by `end_date`; ties keep input order.

use crate::model::task::Task;
use crate::time_format::{format_duration, format_timestamp};
use serde::Serialize;

/// One reminder line: the task, its formatted deadline and time left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineRow {
    pub task: Task,
    pub end_date: String,
    pub remaining: String,
}

/// Tasks due within `horizon_ms` after `now`, earliest first.
pub fn select_upcoming<'a>(tasks: &'a [Task], now: i64, horizon_ms: i64) -> Vec<&'a Task> {
    let mut upcoming: Vec<&Task> = tasks
        .iter()
        .filter(|task| {
            let remaining = i128::from(task.end_date) - i128::from(now);
            remaining > 0 && remaining <= i128::from(horizon_ms)
        })
        .collect();
    upcoming.sort_by_key(|task| task.end_date);
    upcoming
}

/// Remaining time until the task deadline, as `HHhMMmin`.
pub fn format_remaining(task: &Task, now: i64) -> String {
    format_duration(task.end_date.saturating_sub(now))
}

pub fn deadline_rows(tasks: &[Task], now: i64, horizon_ms: i64) -> Vec<DeadlineRow> {
    select_upcoming(tasks, now, horizon_ms)
        .into_iter()
        .map(|task| DeadlineRow {
            task: task.clone(),
            end_date: format_timestamp(task.end_date),
            remaining: format_remaining(task, now),
        })
        .collect()
}
