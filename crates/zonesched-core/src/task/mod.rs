//! Task records as supplied by the task-management subsystem.
//!
//! The engine treats tasks as immutable input: it reads category and type for
//! zone admission and forwards ids into placements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task awaiting placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Free-form category, e.g. "work"
    #[serde(default)]
    pub category: String,
    /// Free-form type, e.g. "development"
    #[serde(rename = "type", default)]
    pub task_type: String,
    /// 1-5, higher is more important
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub estimated_minutes: Option<i64>,
    #[serde(default)]
    pub is_recurring: bool,
}

impl Task {
    /// Create a task with the given id, category and type.
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        task_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: None,
            category: category.into(),
            task_type: task_type.into(),
            priority: None,
            due_date: None,
            estimated_minutes: None,
            is_recurring: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_estimate(mut self, minutes: i64) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    pub fn recurring(mut self) -> Self {
        self.is_recurring = true;
        self
    }

    /// Display label: title if present, otherwise id.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}
