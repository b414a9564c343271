//! Handler for the `add` command.

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use colored::Colorize;
use grange::engine::db::Db;
use grange::engine::repo::tasks::NewTask;
use grange::engine::repo::{AreaRepo, TaskRepo};
use grange::engine::resolver::slugify;
use grange::engine::schedule::{self, ScheduleError};

/// Handles adding a new maintenance task.
///
/// # Errors
/// Returns error if the frequency is invalid, the slug exists, or the
/// named area is unknown.
pub fn handle(
    title: &str,
    every: i64,
    area: Option<&str>,
    due: Option<NaiveDate>,
    seasonal: bool,
    months: Option<&str>,
) -> Result<()> {
    if every <= 0 {
        return Err(ScheduleError::InvalidFrequency(every).into());
    }

    let conn = Db::connect()?;
    let slug = slugify(title);

    let repo = TaskRepo::new(&conn);
    if repo.find_by_slug(&slug)?.is_some() {
        bail!("Task with slug '{slug}' already exists");
    }

    let area_id = match area {
        Some(area_ref) => {
            let Some(found) = AreaRepo::new(&conn).find_by_slug(area_ref)? else {
                bail!("Unknown area '{area_ref}'. Run `grange area add` first.");
            };
            Some(found.id)
        }
        None => None,
    };

    let task_id = repo.add(&NewTask {
        slug: &slug,
        title,
        area_id,
        frequency_days: every,
        manual_due_date: due,
        seasonal,
        active_months: months,
    })?;

    println!("{} Added task [{}] {}", "✓".green(), slug.yellow(), title);

    let today = Local::now().date_naive();
    if let Some(task) = repo.find_by_id(task_id)? {
        let sched = schedule::evaluate(&task, today)?;
        println!(
            "   first due: {} ({})",
            sched.due_date,
            sched.status.to_string().dimmed()
        );
    }

    Ok(())
}
