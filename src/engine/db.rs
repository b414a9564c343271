//! SQLite bootstrap: database location and schema migration.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

const DB_DIR: &str = ".grange";
const DB_FILE: &str = "state.db";

pub struct Db;

impl Db {
    /// Initializes the .grange directory and `SQLite` database schema.
    ///
    /// # Errors
    /// Returns error if directory creation, DB opening, or migration fails.
    pub fn init() -> Result<()> {
        Self::init_at(Path::new(DB_DIR))
    }

    /// Initializes the database inside the given directory.
    ///
    /// # Errors
    /// Returns error if directory creation, DB opening, or migration fails.
    pub fn init_at(dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir).context("Failed to create .grange directory")?;
        }

        let conn = Connection::open(dir.join(DB_FILE)).context("Failed to open database")?;

        Self::migrate(&conn)?;

        Ok(())
    }

    /// Connects to an existing database.
    ///
    /// # Errors
    /// Returns error if the database file does not exist or cannot be opened.
    pub fn connect() -> Result<Connection> {
        let db_path = Path::new(DB_DIR).join(DB_FILE);
        if !db_path.exists() {
            anyhow::bail!("Grange not initialized. Run `grange init` first.");
        }
        let conn = Connection::open(db_path).context("Failed to open database")?;
        Ok(conn)
    }

    /// Applies the schema migrations. Public so tests can migrate an
    /// in-memory connection.
    ///
    /// # Errors
    /// Returns error if any table cannot be created.
    pub fn migrate(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS areas (
                id INTEGER PRIMARY KEY,
                slug TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create areas table")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY,
                slug TEXT UNIQUE NOT NULL,
                title TEXT NOT NULL,
                area_id INTEGER REFERENCES areas(id),
                frequency_days INTEGER NOT NULL,
                last_completed TEXT,
                manual_due_date TEXT,
                seasonal INTEGER NOT NULL DEFAULT 0,
                active_months TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create tasks table")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS completions (
                id INTEGER PRIMARY KEY,
                task_id INTEGER NOT NULL REFERENCES tasks(id),
                completed_on TEXT NOT NULL,
                note TEXT,
                recorded_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create completions table")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_in_memory() {
        let conn = Connection::open_in_memory().unwrap();
        Db::migrate(&conn).unwrap();
        // Migration is idempotent.
        Db::migrate(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('areas', 'tasks', 'completions')",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_init_at_creates_db_file() {
        let dir = tempfile::tempdir().unwrap();
        let grange_dir = dir.path().join(DB_DIR);

        Db::init_at(&grange_dir).unwrap();
        assert!(grange_dir.join(DB_FILE).exists());

        // Re-running against an existing directory is fine.
        Db::init_at(&grange_dir).unwrap();
    }
}
