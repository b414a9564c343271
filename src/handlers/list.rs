//! Handler for the `list` command.

use anyhow::{bail, Result};
use chrono::Local;
use colored::Colorize;
use grange::engine::board::{BoardEntry, TaskBoard};
use grange::engine::db::Db;
use grange::engine::repo::AreaRepo;
use grange::engine::schedule::TaskStatus;

/// Lists all tasks with their derived status.
///
/// # Errors
/// Returns error if database query fails or an unknown area is named.
pub fn handle(area: Option<&str>) -> Result<()> {
    let conn = Db::connect()?;
    let today = Local::now().date_naive();
    let board = TaskBoard::build(&conn, today)?;

    let entries: Vec<&BoardEntry> = match area {
        Some(area_ref) => {
            let Some(found) = AreaRepo::new(&conn).find_by_slug(area_ref)? else {
                bail!("Unknown area '{area_ref}'");
            };
            println!("{} Tasks in [{}]:", "📋".cyan(), found.slug);
            board.for_area(found.id)
        }
        None => {
            println!("{} All Tasks:", "📋".cyan());
            board.entries().iter().collect()
        }
    };

    if entries.is_empty() {
        println!("   (No tasks yet)");
        return Ok(());
    }

    for entry in entries {
        print_entry(entry);
    }
    Ok(())
}

fn print_entry(entry: &BoardEntry) {
    let task = &entry.task;
    match &entry.schedule {
        Ok(sched) => {
            println!(
                "   {} [{}] {} ({}, due {}){}",
                status_icon(sched.status),
                task.slug.blue(),
                task.title,
                sched.status.to_string().dimmed(),
                sched.due_date,
                season_note(task)
            );
        }
        Err(_) => {
            println!(
                "   {} [{}] {} ({})",
                "?".red(),
                task.slug.blue(),
                task.title,
                "task has invalid schedule".red()
            );
        }
    }
}

fn season_note(task: &grange::engine::types::Task) -> String {
    match (task.seasonal, &task.active_months) {
        (true, Some(months)) => format!("  {}", format!("season: {months}").dimmed()),
        (true, None) => format!("  {}", "seasonal".dimmed()),
        _ => String::new(),
    }
}

pub(crate) fn status_icon(status: TaskStatus) -> colored::ColoredString {
    match status {
        TaskStatus::Ok => "✓".green(),
        TaskStatus::DueSoon => "⚠".yellow(),
        TaskStatus::Overdue => "✗".red(),
    }
}
