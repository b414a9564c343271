//! Board Engine: In-memory view over every task's derived schedule.
//!
//! Loads tasks once and evaluates each against a single injected date, so
//! list/status/due views all agree on what "today" means.

use super::repo::TaskRepo;
use super::schedule::{self, Schedule, ScheduleError, TaskStatus};
use super::types::Task;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

/// A task paired with its derived schedule.
///
/// The schedule is an `Err` when the stored frequency is unusable; views
/// surface those tasks as "invalid schedule" instead of dropping them.
#[derive(Debug, Clone)]
pub struct BoardEntry {
    pub task: Task,
    pub schedule: Result<Schedule, ScheduleError>,
}

pub struct TaskBoard {
    entries: Vec<BoardEntry>,
    today: NaiveDate,
}

impl TaskBoard {
    /// Builds the board from the database, evaluating every task as of `today`.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub fn build(conn: &Connection, today: NaiveDate) -> Result<Self> {
        let repo = TaskRepo::new(conn);
        let entries = repo
            .get_all()?
            .into_iter()
            .map(|task| {
                let schedule = schedule::evaluate(&task, today);
                BoardEntry { task, schedule }
            })
            .collect();

        Ok(Self { entries, today })
    }

    #[must_use]
    pub fn entries(&self) -> &[BoardEntry] {
        &self.entries
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Entries belonging to one area.
    #[must_use]
    pub fn for_area(&self, area_id: i64) -> Vec<&BoardEntry> {
        self.entries
            .iter()
            .filter(|e| e.task.area_id == Some(area_id))
            .collect()
    }

    /// Tasks needing attention (overdue or due soon), most urgent first.
    #[must_use]
    pub fn due(&self) -> Vec<&BoardEntry> {
        let mut due: Vec<_> = self
            .entries
            .iter()
            .filter(|e| {
                e.schedule
                    .as_ref()
                    .is_ok_and(|s| s.status.needs_attention())
            })
            .collect();

        due.sort_by_key(|e| match &e.schedule {
            Ok(s) => (s.due_date, e.task.id),
            Err(_) => unreachable!("due() filters out invalid schedules"),
        });
        due
    }

    /// Calculates status counts for the entire board.
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for entry in &self.entries {
            match &entry.schedule {
                Ok(s) => match s.status {
                    TaskStatus::Ok => counts.ok += 1,
                    TaskStatus::DueSoon => counts.due_soon += 1,
                    TaskStatus::Overdue => counts.overdue += 1,
                },
                Err(_) => counts.invalid += 1,
            }
        }
        counts
    }
}

/// Aggregate counts of tasks by derived status.
#[derive(Debug, Default, Serialize)]
pub struct StatusCounts {
    pub ok: usize,
    pub due_soon: usize,
    pub overdue: usize,
    /// Tasks whose stored frequency failed validation.
    pub invalid: usize,
}

impl StatusCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.ok + self.due_soon + self.overdue + self.invalid
    }
}
