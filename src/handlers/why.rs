//! Handler for the `why` command.

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use grange::engine::db::Db;
use grange::engine::repo::CompletionRepo;
use grange::engine::resolver::TaskResolver;
use grange::engine::schedule::{self, Schedule, ScheduleError, DUE_SOON_WINDOW_DAYS};
use grange::engine::types::{Completion, Task};

use super::list::status_icon;

/// Explains how a task's status was derived and shows its completion log.
///
/// # Errors
/// Returns error if task resolution or DB query fails.
pub fn handle(task_ref: &str) -> Result<()> {
    let conn = Db::connect()?;
    let today = Local::now().date_naive();

    let resolver = TaskResolver::new(&conn);
    let task = resolver.resolve(task_ref)?;
    let history = CompletionRepo::new(&conn).get_history(task.id)?;

    match schedule::evaluate(&task, today) {
        Ok(sched) => {
            println!(
                "{} [{}] {}",
                status_icon(sched.status),
                task.slug.cyan().bold(),
                task.title
            );
            println!(
                "   Status:  {} ({})",
                sched.status,
                sched.status.color_hint().dimmed()
            );
            println!("   Due:     {}", sched.due_date);
            println!();
            print_explanation(&task, &sched);
        }
        Err(err) => {
            println!("{} [{}] {}", "?".red(), task.slug.cyan().bold(), task.title);
            println!("   Status:  {}", "task has invalid schedule".red());
            println!();
            match err {
                ScheduleError::InvalidFrequency(n) => println!(
                    "{} Stored frequency is {n} days; it must be a positive integer.",
                    "reason:".red()
                ),
                ScheduleError::FrequencyTooLarge(n) => println!(
                    "{} Stored frequency of {n} days puts the due date off the calendar.",
                    "reason:".red()
                ),
            }
            println!("         Fix the record upstream, then re-import or edit the task.");
        }
    }

    println!();
    print_history(&history);

    Ok(())
}

fn print_explanation(task: &Task, sched: &Schedule) {
    if let Some(due) = task.manual_due_date {
        println!("{} Manual due date set by operator.", "reason:".cyan());
        println!("         Override:   {due}");
        println!("         Schedule:   every {} days (ignored this cycle)", task.frequency_days);
        return;
    }

    if let Some(last) = task.last_completed {
        println!(
            "{} Computed from the last completion.",
            "reason:".cyan()
        );
        println!("         Last done:  {last}");
        println!(
            "         Every:      {} days, so due {}",
            task.frequency_days, sched.due_date
        );
    } else {
        println!(
            "{} Never completed, so it is due immediately.",
            "reason:".yellow()
        );
    }

    match sched.days_remaining {
        d if d < 0 => println!("         Now {} days past due.", -d),
        0 => println!("         Due today."),
        d if d <= DUE_SOON_WINDOW_DAYS => {
            println!("         {d} days remain (inside the {DUE_SOON_WINDOW_DAYS}-day warning window).");
        }
        d => println!("         {d} days remain."),
    }

    if task.seasonal {
        let months = task.active_months.as_deref().unwrap_or("unspecified");
        println!(
            "         {}",
            format!("Seasonal (months: {months}); season never changes the status.").dimmed()
        );
    }
}

fn print_history(history: &[Completion]) {
    println!("{}", "Completion Log:".dimmed().underline());
    if history.is_empty() {
        println!("   (No completions recorded)");
        return;
    }

    for completion in history {
        let note = completion
            .note
            .as_deref()
            .map(|n| format!("  \"{n}\""))
            .unwrap_or_default();
        println!(
            "   {}  {}{}",
            completion.completed_on.to_string().yellow(),
            "DONE".green(),
            note.dimmed()
        );
    }
}
