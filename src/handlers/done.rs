//! Handler for the `done` command.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use colored::Colorize;
use grange::engine::db::Db;
use grange::engine::repo::{CompletionRepo, TaskRepo};
use grange::engine::resolver::TaskResolver;
use grange::engine::schedule;

/// Records a completion: appends to the audit log, stamps the task, and
/// clears any one-cycle manual due date.
///
/// # Errors
/// Returns error if the task cannot be resolved or the write fails.
pub fn handle(task_ref: &str, on: Option<NaiveDate>, note: Option<&str>, strict: bool) -> Result<()> {
    let mut conn = Db::connect()?;
    let today = Local::now().date_naive();
    let completed_on = on.unwrap_or(today);

    let resolver = if strict {
        TaskResolver::strict(&conn)
    } else {
        TaskResolver::new(&conn)
    };
    let task = resolver.resolve(task_ref)?;

    let tx = conn.transaction()?;
    {
        let repo = TaskRepo::new(&tx);
        let completions = CompletionRepo::new(&tx);

        completions.save(task.id, completed_on, note)?;
        repo.mark_completed(task.id, completed_on)?;
    }
    tx.commit()?;

    println!(
        "{} Completed [{}] {} on {}",
        "✓".green(),
        task.slug.yellow(),
        task.title,
        completed_on
    );

    // Re-read so the printed next-due reflects the cleared override.
    let repo = TaskRepo::new(&conn);
    if let Some(updated) = repo.find_by_id(task.id)? {
        let sched = schedule::evaluate(&updated, today)?;
        println!("   next due: {}", sched.due_date.to_string().cyan());
    }

    Ok(())
}
