//! Handler for the `defer` command.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use colored::Colorize;
use grange::engine::db::Db;
use grange::engine::repo::TaskRepo;
use grange::engine::resolver::TaskResolver;

/// Sets or clears a task's one-cycle manual due date.
///
/// # Errors
/// Returns error if the task cannot be resolved or neither `--until`
/// nor `--clear` was given.
pub fn handle(task_ref: &str, until: Option<NaiveDate>, clear: bool, strict: bool) -> Result<()> {
    let conn = Db::connect()?;

    let resolver = if strict {
        TaskResolver::strict(&conn)
    } else {
        TaskResolver::new(&conn)
    };
    let task = resolver.resolve(task_ref)?;
    let repo = TaskRepo::new(&conn);

    if clear {
        repo.set_manual_due_date(task.id, None)?;
        println!(
            "{} Cleared manual due date on [{}]; back to every {} days",
            "✓".green(),
            task.slug.yellow(),
            task.frequency_days
        );
        return Ok(());
    }

    let Some(due) = until else {
        bail!("Nothing to do: pass --until <date> or --clear");
    };

    repo.set_manual_due_date(task.id, Some(due))?;
    println!(
        "{} [{}] now due {} (override, cleared on next completion)",
        "✓".green(),
        task.slug.yellow(),
        due.to_string().cyan()
    );
    Ok(())
}
