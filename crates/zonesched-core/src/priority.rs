//! Task ordering ahead of assignment.
//!
//! The assigner gives the first task first choice and never re-sorts. Callers
//! that want "most urgent first" run their list through [`prioritize_tasks`]
//! before handing it over.

use chrono::{DateTime, Utc};

use crate::task::Task;

/// Urgency score: priority, deadline proximity, short estimates, recurrence.
///
/// Priority is not range-checked here, so every term saturates.
pub fn task_score(task: &Task, now: DateTime<Utc>) -> i32 {
    let mut score = 0;

    if let Some(priority) = task.priority {
        score = priority.saturating_mul(10);
    }

    if let Some(due) = task.due_date {
        let hours_until_due = (due - now).num_minutes() as f64 / 60.0;
        if hours_until_due < 0.0 {
            score = score.saturating_add(100);
        } else if hours_until_due < 24.0 {
            score = score.saturating_add(50);
        } else if hours_until_due < 72.0 {
            score = score.saturating_add(25);
        }
    }

    if task.estimated_minutes.is_some_and(|m| m <= 30) {
        score = score.saturating_add(5);
    }

    if task.is_recurring {
        score = score.saturating_add(3);
    }

    score
}

/// Stable sort by descending [`task_score`]. Equal scores keep input order.
pub fn prioritize_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
    let mut scored: Vec<(i32, &Task)> = tasks.iter().map(|t| (task_score(t, now), t)).collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, t)| t.clone()).collect()
}
