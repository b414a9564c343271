//! Completion Repository: the append-only completion audit log.

use crate::engine::types::Completion;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection};

pub struct CompletionRepo<'a> {
    conn: &'a Connection,
}

impl<'a> CompletionRepo<'a> {
    /// Creates a new completion repository instance.
    #[must_use]
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Records a completion for a task.
    ///
    /// # Errors
    /// Returns an error if the completion cannot be saved.
    pub fn save(&self, task_id: i64, completed_on: NaiveDate, note: Option<&str>) -> Result<()> {
        self.conn.execute(
            "INSERT INTO completions (task_id, completed_on, note) VALUES (?1, ?2, ?3)",
            params![task_id, completed_on, note],
        )?;
        Ok(())
    }

    /// Retrieves the full completion history of a task, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn get_history(&self, task_id: i64) -> Result<Vec<Completion>> {
        let mut stmt = self.conn.prepare(
            "SELECT completed_on, note, recorded_at
             FROM completions WHERE task_id = ?1
             ORDER BY completed_on DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![task_id], row_to_completion)?;

        let mut completions = Vec::new();
        for c in rows {
            completions.push(c?);
        }
        Ok(completions)
    }

    /// Retrieves global completion history joined with task slugs.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn get_global_history(&self, limit: usize) -> Result<Vec<(String, Completion)>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.slug, c.completed_on, c.note, c.recorded_at
             FROM completions c
             JOIN tasks t ON c.task_id = t.id
             ORDER BY c.completed_on DESC, c.id DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], |row| {
            let slug: String = row.get(0)?;
            Ok((
                slug,
                Completion {
                    completed_on: row.get(1)?,
                    note: row.get(2)?,
                    recorded_at: row.get(3)?,
                },
            ))
        })?;

        let mut history = Vec::new();
        for item in rows {
            history.push(item?);
        }
        Ok(history)
    }
}

fn row_to_completion(row: &rusqlite::Row) -> rusqlite::Result<Completion> {
    Ok(Completion {
        completed_on: row.get(0)?,
        note: row.get(1)?,
        recorded_at: row.get(2)?,
    })
}
