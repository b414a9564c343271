//! Handler for the `init` command.

use anyhow::Result;
use colored::Colorize;
use grange::engine::db::Db;

/// Initializes the grange database.
///
/// # Errors
/// Returns error if database initialization fails.
pub fn handle() -> Result<()> {
    Db::init()?;
    println!("{} Initialized .grange/state.db", "✓".green());
    Ok(())
}
