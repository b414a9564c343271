//! Handler for the `history` command.

use anyhow::Result;
use colored::Colorize;
use grange::engine::db::Db;
use grange::engine::repo::CompletionRepo;

/// Displays the global completion history.
///
/// # Errors
/// Returns error if database query fails.
pub fn handle(limit: usize) -> Result<()> {
    let conn = Db::connect()?;
    let completions = CompletionRepo::new(&conn);

    let history = completions.get_global_history(limit)?;

    println!("{} Completion History (last {})", "📜".cyan(), limit);
    println!();

    if history.is_empty() {
        println!("   (No completions recorded yet)");
        return Ok(());
    }

    for (slug, completion) in history {
        let note = completion
            .note
            .as_deref()
            .map(|n| format!("  \"{n}\""))
            .unwrap_or_default();

        println!(
            "   {}  {}  {}{}",
            completion.completed_on.to_string().dimmed(),
            "DONE".green(),
            slug.bold(),
            note.dimmed()
        );
    }

    Ok(())
}
