//! Handler for the `export` command.

use anyhow::Result;
use grange::engine::db::Db;
use grange::engine::record::TaskRecord;
use grange::engine::repo::{AreaRepo, TaskRepo};

/// Writes every task as a boundary record to stdout.
///
/// # Errors
/// Returns error if database query or serialization fails.
pub fn handle() -> Result<()> {
    let conn = Db::connect()?;
    let tasks = TaskRepo::new(&conn).get_all()?;
    let areas = AreaRepo::new(&conn).get_all()?;

    let records: Vec<TaskRecord> = tasks
        .iter()
        .map(|task| {
            let area = task
                .area_id
                .and_then(|id| areas.iter().find(|a| a.id == id));
            TaskRecord::from_task(task, area)
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
