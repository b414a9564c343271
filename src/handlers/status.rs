//! Handler for the `status` command.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use colored::Colorize;
use grange::engine::board::{StatusCounts, TaskBoard};
use grange::engine::db::Db;
use grange::engine::repo::AreaRepo;
use grange::engine::schedule::TaskStatus;
use serde::Serialize;

/// Displays an overview of the whole grange.
///
/// # Errors
/// Returns error if database query fails.
pub fn handle(json: bool) -> Result<()> {
    let conn = Db::connect()?;
    let today = Local::now().date_naive();
    let board = TaskBoard::build(&conn, today)?;

    if json {
        return print_json(&board);
    }

    print_human(&conn, &board)
}

#[derive(Serialize)]
struct StatusReport {
    today: NaiveDate,
    counts: StatusCounts,
    due: Vec<TaskView>,
}

#[derive(Serialize)]
struct TaskView {
    id: i64,
    slug: String,
    title: String,
    status: TaskStatus,
    due_date: NaiveDate,
}

fn print_json(board: &TaskBoard) -> Result<()> {
    let due = board
        .due()
        .into_iter()
        .filter_map(|e| {
            let sched = e.schedule.as_ref().ok()?;
            Some(TaskView {
                id: e.task.id,
                slug: e.task.slug.clone(),
                title: e.task.title.clone(),
                status: sched.status,
                due_date: sched.due_date,
            })
        })
        .collect();

    let report = StatusReport {
        today: board.today(),
        counts: board.status_counts(),
        due,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_human(conn: &rusqlite::Connection, board: &TaskBoard) -> Result<()> {
    let counts = board.status_counts();

    println!("{} Grange Status ({})", "📊".cyan(), board.today());
    println!(
        "   {} ok / {} due soon / {} overdue{}",
        counts.ok.to_string().green(),
        counts.due_soon.to_string().yellow(),
        counts.overdue.to_string().red(),
        if counts.invalid > 0 {
            format!(" / {} invalid schedule", counts.invalid).red().to_string()
        } else {
            String::new()
        }
    );

    let areas = AreaRepo::new(conn).get_all()?;
    if !areas.is_empty() {
        println!("\n   By area:");
        for area in areas {
            let overdue = board
                .for_area(area.id)
                .iter()
                .filter(|e| {
                    e.schedule
                        .as_ref()
                        .is_ok_and(|s| s.status == TaskStatus::Overdue)
                })
                .count();
            let total = board.for_area(area.id).len();
            let marker = if overdue > 0 {
                format!("{overdue} overdue").red().to_string()
            } else {
                "clear".green().to_string()
            };
            println!("     [{}] {total} tasks, {marker}", area.slug.dimmed());
        }
    }

    let due = board.due();
    if !due.is_empty() {
        println!("\n   Next up:");
        for entry in due.iter().take(3) {
            println!("     - [{}] {}", entry.task.slug.dimmed(), entry.task.title);
        }
    }

    Ok(())
}
