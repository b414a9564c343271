//! Boundary records: the JSON shape tasks cross process boundaries in.
//!
//! Field names and formats match the REST backend contract: snake_case
//! keys, `frequency_days` as an integer, optional ISO-8601 dates for
//! `last_completed` and `manual_due_date`.

use super::types::{Area, Task};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    /// Area slug. Unknown slugs are created on import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    pub frequency_days: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_due_date: Option<NaiveDate>,
    #[serde(default)]
    pub seasonal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_months: Option<String>,
}

impl TaskRecord {
    /// Builds the export record for a stored task.
    #[must_use]
    pub fn from_task(task: &Task, area: Option<&Area>) -> Self {
        Self {
            slug: Some(task.slug.clone()),
            title: task.title.clone(),
            area: area.map(|a| a.slug.clone()),
            frequency_days: task.frequency_days,
            last_completed: task.last_completed,
            manual_due_date: task.manual_due_date,
            seasonal: task.seasonal,
            active_months: task.active_months.clone(),
        }
    }
}
