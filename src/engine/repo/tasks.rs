//! Task Repository: maintenance-task records and their schedule fields.

use crate::engine::types::Task;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

pub const TASK_SELECT: &str = "SELECT id, slug, title, area_id, frequency_days, \
     last_completed, manual_due_date, seasonal, active_months, created_at FROM tasks";

/// Fields accepted when creating or upserting a task.
#[derive(Debug, Clone)]
pub struct NewTask<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub area_id: Option<i64>,
    pub frequency_days: i64,
    pub manual_due_date: Option<NaiveDate>,
    pub seasonal: bool,
    pub active_months: Option<&'a str>,
}

pub struct TaskRepo<'a> {
    conn: &'a Connection,
}

impl<'a> TaskRepo<'a> {
    /// Creates a new repository instance borrowing the connection.
    #[must_use]
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Adds a new task to the database.
    ///
    /// # Errors
    /// Returns an error if the insertion fails.
    pub fn add(&self, new: &NewTask) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO tasks (slug, title, area_id, frequency_days, manual_due_date, seasonal, active_months)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                new.slug,
                new.title,
                new.area_id,
                new.frequency_days,
                new.manual_due_date,
                new.seasonal,
                new.active_months
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Retrieves all tasks, ordered by slug.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn get_all(&self) -> Result<Vec<Task>> {
        let sql = format!("{TASK_SELECT} ORDER BY slug");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_task)?;
        let mut tasks = Vec::new();
        for task in rows {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    /// Finds a task by its slug (case-insensitive).
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn find_by_slug(&self, slug: &str) -> Result<Option<Task>> {
        let sql = format!("{TASK_SELECT} WHERE LOWER(slug) = LOWER(?1)");
        self.conn
            .query_row(&sql, params![slug], row_to_task)
            .optional()
            .context("Search by slug failed")
    }

    /// Finds a task by its internal ID.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Task>> {
        let sql = format!("{TASK_SELECT} WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], row_to_task)
            .optional()
            .context("Search by ID failed")
    }

    /// Records a completion date on the task itself.
    ///
    /// Also clears any manual due-date override: the override applies to
    /// one cycle only.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub fn mark_completed(&self, id: i64, completed_on: NaiveDate) -> Result<()> {
        self.conn.execute(
            "UPDATE tasks SET last_completed = ?1, manual_due_date = NULL WHERE id = ?2",
            params![completed_on, id],
        )?;
        Ok(())
    }

    /// Sets or clears the manual due-date override.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub fn set_manual_due_date(&self, id: i64, due: Option<NaiveDate>) -> Result<()> {
        self.conn.execute(
            "UPDATE tasks SET manual_due_date = ?1 WHERE id = ?2",
            params![due, id],
        )?;
        Ok(())
    }

    /// Inserts the task, or updates its schedule fields if the slug exists.
    ///
    /// Returns the task's ID and whether a new row was created.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn upsert(&self, new: &NewTask, last_completed: Option<NaiveDate>) -> Result<(i64, bool)> {
        if let Some(existing) = self.find_by_slug(new.slug)? {
            self.conn.execute(
                "UPDATE tasks SET title = ?1, area_id = ?2, frequency_days = ?3,
                     last_completed = ?4, manual_due_date = ?5, seasonal = ?6, active_months = ?7
                 WHERE id = ?8",
                params![
                    new.title,
                    new.area_id,
                    new.frequency_days,
                    last_completed,
                    new.manual_due_date,
                    new.seasonal,
                    new.active_months,
                    existing.id
                ],
            )?;
            return Ok((existing.id, false));
        }

        let id = self.add(new)?;
        if last_completed.is_some() {
            self.conn.execute(
                "UPDATE tasks SET last_completed = ?1 WHERE id = ?2",
                params![last_completed, id],
            )?;
        }
        Ok((id, true))
    }
}

/// Converts a database row to a Task object.
///
/// # Errors
/// Returns a `rusqlite` error if data conversion fails.
pub fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        slug: row.get(1)?,
        title: row.get(2)?,
        area_id: row.get(3)?,
        frequency_days: row.get(4)?,
        last_completed: row.get(5)?,
        manual_due_date: row.get(6)?,
        seasonal: row.get(7)?,
        active_months: row.get(8)?,
        created_at: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::db::Db;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        Db::migrate(&conn).unwrap();
        conn
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_task<'a>(slug: &'a str, title: &'a str, every: i64) -> NewTask<'a> {
        NewTask {
            slug,
            title,
            area_id: None,
            frequency_days: every,
            manual_due_date: None,
            seasonal: false,
            active_months: None,
        }
    }

    #[test]
    fn test_add_and_roundtrip() {
        let conn = test_conn();
        let repo = TaskRepo::new(&conn);
        let id = repo.add(&new_task("clean-coop", "Clean the coop", 30)).unwrap();

        let task = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(task.slug, "clean-coop");
        assert_eq!(task.frequency_days, 30);
        assert_eq!(task.last_completed, None);
        assert_eq!(task.manual_due_date, None);
        assert!(!task.seasonal);
    }

    #[test]
    fn test_mark_completed_clears_override() {
        let conn = test_conn();
        let repo = TaskRepo::new(&conn);
        let id = repo.add(&new_task("fix-fence", "Fix the fence", 90)).unwrap();
        repo.set_manual_due_date(id, Some(date(2024, 3, 1))).unwrap();

        let task = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(task.manual_due_date, Some(date(2024, 3, 1)));

        repo.mark_completed(id, date(2024, 2, 20)).unwrap();
        let task = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(task.last_completed, Some(date(2024, 2, 20)));
        assert_eq!(task.manual_due_date, None);
    }

    #[test]
    fn test_upsert_updates_existing_slug() {
        let conn = test_conn();
        let repo = TaskRepo::new(&conn);
        let (first_id, created) = repo
            .upsert(&new_task("weed-beds", "Weed the beds", 14), None)
            .unwrap();
        assert!(created);

        let (second_id, created) = repo
            .upsert(
                &new_task("weed-beds", "Weed all beds", 21),
                Some(date(2024, 4, 1)),
            )
            .unwrap();
        assert!(!created);
        assert_eq!(first_id, second_id);

        let task = repo.find_by_slug("weed-beds").unwrap().unwrap();
        assert_eq!(task.title, "Weed all beds");
        assert_eq!(task.frequency_days, 21);
        assert_eq!(task.last_completed, Some(date(2024, 4, 1)));
    }
}
