//! Handler for the `due` command.

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use grange::engine::board::{BoardEntry, TaskBoard};
use grange::engine::db::Db;
use grange::engine::schedule::TaskStatus;

use super::list::status_icon;

/// Shows tasks needing attention (overdue or due soon), most urgent first.
///
/// # Errors
/// Returns error if database query fails.
pub fn handle(json: bool) -> Result<()> {
    let conn = Db::connect()?;
    let today = Local::now().date_naive();
    let board = TaskBoard::build(&conn, today)?;
    let due = board.due();

    if json {
        return print_json(&due);
    }

    print_human(&due);
    Ok(())
}

fn print_json(entries: &[&BoardEntry]) -> Result<()> {
    let output: Vec<_> = entries
        .iter()
        .filter_map(|e| {
            let sched = e.schedule.as_ref().ok()?;
            Some(serde_json::json!({
                "id": e.task.id,
                "slug": e.task.slug,
                "title": e.task.title,
                "status": sched.status,
                "due_date": sched.due_date,
                "days_remaining": sched.days_remaining,
            }))
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_human(entries: &[&BoardEntry]) {
    println!("{} Needs attention:", "🔔".cyan());

    if entries.is_empty() {
        println!("   (Nothing due. The grange is in good shape.)");
        return;
    }

    for entry in entries {
        let Ok(sched) = &entry.schedule else { continue };
        let when = match sched.status {
            TaskStatus::Overdue => format!("{} days overdue", -sched.days_remaining).red(),
            _ if sched.days_remaining == 0 => "due today".yellow(),
            _ => format!("due in {} days", sched.days_remaining).yellow(),
        };
        println!(
            "   {} [{}] {} ({})",
            status_icon(sched.status),
            entry.task.slug.yellow(),
            entry.task.title,
            when
        );
    }
}
