//! Stored domain types for the grange system.
//!
//! Note: due/overdue status is never stored. It is derived fresh on every
//! read by `schedule::evaluate()` from the fields kept here.

use chrono::NaiveDate;
use serde::Serialize;

/// A farm area that maintenance tasks belong to (coop, orchard, well house).
#[derive(Debug, Clone, Serialize)]
pub struct Area {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub created_at: String,
}

/// A recurring maintenance task.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub area_id: Option<i64>,
    /// Recurrence interval in days. Validated (> 0) at the schedule boundary.
    pub frequency_days: i64,
    /// None means never completed; such tasks are due immediately.
    pub last_completed: Option<NaiveDate>,
    /// Operator override. Authoritative when set; cleared on completion.
    pub manual_due_date: Option<NaiveDate>,
    pub seasonal: bool,
    /// Free-text month range, display only. Never gates status.
    pub active_months: Option<String>,
    pub created_at: String,
}

/// One entry in a task's append-only completion log.
#[derive(Debug, Clone, Serialize)]
pub struct Completion {
    pub completed_on: NaiveDate,
    pub note: Option<String>,
    pub recorded_at: String,
}
