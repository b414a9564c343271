//! Area Repository: farm-area records.

use crate::engine::types::Area;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

const AREA_SELECT: &str = "SELECT id, slug, name, created_at FROM areas";

pub struct AreaRepo<'a> {
    conn: &'a Connection,
}

impl<'a> AreaRepo<'a> {
    /// Creates a new repository instance borrowing the connection.
    #[must_use]
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Adds a new area.
    ///
    /// # Errors
    /// Returns an error if the insertion fails (including slug collision).
    pub fn add(&self, slug: &str, name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO areas (slug, name) VALUES (?1, ?2)",
            params![slug, name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Retrieves all areas, ordered by slug.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn get_all(&self) -> Result<Vec<Area>> {
        let sql = format!("{AREA_SELECT} ORDER BY slug");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_area)?;
        let mut areas = Vec::new();
        for area in rows {
            areas.push(area?);
        }
        Ok(areas)
    }

    /// Finds an area by its slug (case-insensitive).
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn find_by_slug(&self, slug: &str) -> Result<Option<Area>> {
        let sql = format!("{AREA_SELECT} WHERE LOWER(slug) = LOWER(?1)");
        self.conn
            .query_row(&sql, params![slug], row_to_area)
            .optional()
            .context("Area search by slug failed")
    }
}

fn row_to_area(row: &rusqlite::Row) -> rusqlite::Result<Area> {
    Ok(Area {
        id: row.get(0)?,
        slug: row.get(1)?,
        name: row.get(2)?,
        created_at: row.get(3)?,
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

    #[test]
    fn test_add_and_find() {
        let conn = test_conn();
        let repo = AreaRepo::new(&conn);
        let id = repo.add("coop", "Chicken Coop").unwrap();

        let by_slug = repo.find_by_slug("COOP").unwrap().unwrap();
        assert_eq!(by_slug.id, id);
        assert_eq!(by_slug.name, "Chicken Coop");

        assert!(repo.find_by_slug("orchard").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let conn = test_conn();
        let repo = AreaRepo::new(&conn);
        repo.add("coop", "Chicken Coop").unwrap();
        assert!(repo.add("coop", "Other Coop").is_err());
    }
}
