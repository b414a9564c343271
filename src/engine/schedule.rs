//! Schedule Engine: Computes a task's due date and status from stored data.
//!
//! This module is the single source of due-date math for the whole tool.
//! Handlers and views never do their own date arithmetic; they call
//! `evaluate()` once per task and render the result.

use super::types::Task;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Tasks within this many days of their due date are flagged as due soon.
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// The derived status of a task relative to an injected "today".
///
/// Never persisted. Computed fresh on each read so it can never go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// More than the due-soon window remains.
    Ok,
    /// Due within the window, including due today (0 days remaining).
    DueSoon,
    /// The due date has passed.
    Overdue,
}

impl TaskStatus {
    /// Returns the display color hint for terminal rendering.
    #[must_use]
    pub fn color_hint(&self) -> &'static str {
        match self {
            TaskStatus::Ok => "green",
            TaskStatus::DueSoon => "yellow",
            TaskStatus::Overdue => "red",
        }
    }

    /// Returns true if this task needs attention (due soon or overdue).
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        matches!(self, TaskStatus::DueSoon | TaskStatus::Overdue)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Ok => write!(f, "OK"),
            TaskStatus::DueSoon => write!(f, "DUE SOON"),
            TaskStatus::Overdue => write!(f, "OVERDUE"),
        }
    }
}

/// Raised when a task's stored recurrence interval is unusable.
///
/// Callers should surface this as "task has invalid schedule" rather than
/// abort a whole view; the bad data came from upstream, not the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid schedule: frequency of {0} days (must be positive)")]
    InvalidFrequency(i64),
    #[error("invalid schedule: frequency of {0} days pushes the due date off the calendar")]
    FrequencyTooLarge(i64),
}

/// The derived schedule of a task: its effective due date and status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub due_date: NaiveDate,
    /// Negative once the due date has passed.
    pub days_remaining: i64,
    pub status: TaskStatus,
}

/// Derives the due date and status of a task as of `today`.
///
/// Pure function: no I/O, no clock reads, no side effects. `today` is
/// injected by the caller (once per command invocation) so results are
/// deterministic and testable.
///
/// Due-date precedence:
/// 1. `manual_due_date`, when set, wins unconditionally.
/// 2. Otherwise `last_completed + frequency_days`.
/// 3. Never-completed tasks are due today.
///
/// # Errors
/// Returns `ScheduleError::InvalidFrequency` when `frequency_days <= 0`,
/// and `ScheduleError::FrequencyTooLarge` when the computed due date would
/// fall outside the representable calendar range. Missing optional fields
/// are valid inputs, never errors.
pub fn evaluate(task: &Task, today: NaiveDate) -> Result<Schedule, ScheduleError> {
    if task.frequency_days <= 0 {
        return Err(ScheduleError::InvalidFrequency(task.frequency_days));
    }

    let due_date = match (task.manual_due_date, task.last_completed) {
        (Some(override_date), _) => override_date,
        // checked: absurd-but-positive frequencies must error, not abort.
        (None, Some(last)) => Duration::try_days(task.frequency_days)
            .and_then(|interval| last.checked_add_signed(interval))
            .ok_or(ScheduleError::FrequencyTooLarge(task.frequency_days))?,
        (None, None) => today,
    };

    let days_remaining = due_date.signed_duration_since(today).num_days();

    let status = if days_remaining < 0 {
        TaskStatus::Overdue
    } else if days_remaining <= DUE_SOON_WINDOW_DAYS {
        TaskStatus::DueSoon
    } else {
        TaskStatus::Ok
    };

    Ok(Schedule {
        due_date,
        days_remaining,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_task(
        frequency_days: i64,
        last_completed: Option<NaiveDate>,
        manual_due_date: Option<NaiveDate>,
    ) -> Task {
        Task {
            id: 1,
            slug: "clean-coop".to_string(),
            title: "Clean the coop".to_string(),
            area_id: None,
            frequency_days,
            last_completed,
            manual_due_date,
            seasonal: false,
            active_months: None,
            created_at: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_due_soon_inside_window() {
        let task = make_task(30, Some(date(2024, 1, 1)), None);
        let schedule = evaluate(&task, date(2024, 1, 25)).unwrap();
        assert_eq!(schedule.due_date, date(2024, 1, 31));
        assert_eq!(schedule.days_remaining, 6);
        assert_eq!(schedule.status, TaskStatus::DueSoon);
    }

    #[test]
    fn test_overdue_past_due_date() {
        let task = make_task(30, Some(date(2024, 1, 1)), None);
        let schedule = evaluate(&task, date(2024, 2, 5)).unwrap();
        assert_eq!(schedule.due_date, date(2024, 1, 31));
        assert_eq!(schedule.days_remaining, -5);
        assert_eq!(schedule.status, TaskStatus::Overdue);
    }

    #[test]
    fn test_manual_override_wins() {
        let task = make_task(7, Some(date(2024, 1, 1)), Some(date(2024, 3, 1)));
        let schedule = evaluate(&task, date(2024, 2, 1)).unwrap();
        assert_eq!(schedule.due_date, date(2024, 3, 1));
        assert_eq!(schedule.status, TaskStatus::Ok);
    }

    #[test]
    fn test_invalid_frequency_rejected() {
        let task = make_task(0, None, None);
        assert_eq!(
            evaluate(&task, date(2024, 1, 1)),
            Err(ScheduleError::InvalidFrequency(0))
        );

        let task = make_task(-3, None, None);
        assert_eq!(
            evaluate(&task, date(2024, 1, 1)),
            Err(ScheduleError::InvalidFrequency(-3))
        );
    }

    #[test]
    fn test_huge_frequency_errs_instead_of_aborting() {
        let task = make_task(900_000_000_000, Some(date(2024, 1, 1)), None);
        assert_eq!(
            evaluate(&task, date(2024, 1, 1)),
            Err(ScheduleError::FrequencyTooLarge(900_000_000_000))
        );

        let task = make_task(i64::MAX, Some(date(2024, 1, 1)), None);
        assert_eq!(
            evaluate(&task, date(2024, 1, 1)),
            Err(ScheduleError::FrequencyTooLarge(i64::MAX))
        );

        // A manual override sidesteps the interval math entirely.
        let task = make_task(i64::MAX, Some(date(2024, 1, 1)), Some(date(2024, 3, 1)));
        let schedule = evaluate(&task, date(2024, 2, 1)).unwrap();
        assert_eq!(schedule.due_date, date(2024, 3, 1));
    }

    #[test]
    fn test_never_completed_is_due_today() {
        let task = make_task(30, None, None);
        let schedule = evaluate(&task, date(2024, 6, 15)).unwrap();
        assert_eq!(schedule.due_date, date(2024, 6, 15));
        assert_eq!(schedule.days_remaining, 0);
        // Boundary: zero days remaining is DueSoon, not Ok.
        assert_eq!(schedule.status, TaskStatus::DueSoon);
    }

    #[test]
    fn test_window_edges() {
        let task = make_task(30, Some(date(2024, 1, 1)), None);
        // Due 2024-01-31. Exactly 7 days out: still due soon.
        let at_edge = evaluate(&task, date(2024, 1, 24)).unwrap();
        assert_eq!(at_edge.days_remaining, 7);
        assert_eq!(at_edge.status, TaskStatus::DueSoon);
        // 8 days out: ok.
        let outside = evaluate(&task, date(2024, 1, 23)).unwrap();
        assert_eq!(outside.days_remaining, 8);
        assert_eq!(outside.status, TaskStatus::Ok);
    }

    #[test]
    fn test_monotonic_as_today_advances() {
        let task = make_task(30, Some(date(2024, 1, 1)), None);
        let mut seen = Vec::new();
        for offset in 0..45 {
            let today = date(2024, 1, 2) + Duration::days(offset);
            seen.push(evaluate(&task, today).unwrap().status);
        }
        // Status only ever moves forward: Ok -> DueSoon -> Overdue.
        let rank = |s: &TaskStatus| match s {
            TaskStatus::Ok => 0,
            TaskStatus::DueSoon => 1,
            TaskStatus::Overdue => 2,
        };
        assert!(seen.windows(2).all(|w| rank(&w[0]) <= rank(&w[1])));
        assert_eq!(seen.first(), Some(&TaskStatus::Ok));
        assert_eq!(seen.last(), Some(&TaskStatus::Overdue));
    }

    #[test]
    fn test_idempotent() {
        let task = make_task(14, Some(date(2024, 5, 1)), None);
        let today = date(2024, 5, 10);
        assert_eq!(evaluate(&task, today), evaluate(&task, today));
    }

    #[test]
    fn test_seasonal_flag_never_gates_status() {
        let mut task = make_task(30, Some(date(2024, 1, 1)), None);
        task.seasonal = true;
        task.active_months = Some("May-Sep".to_string());
        // Off-season in February; still reports overdue.
        let schedule = evaluate(&task, date(2024, 2, 15)).unwrap();
        assert_eq!(schedule.status, TaskStatus::Overdue);
    }

    #[test]
    fn test_needs_attention() {
        assert!(!TaskStatus::Ok.needs_attention());
        assert!(TaskStatus::DueSoon.needs_attention());
        assert!(TaskStatus::Overdue.needs_attention());
    }
}
