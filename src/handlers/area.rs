//! Handlers for the `area` subcommands.

use anyhow::{bail, Result};
use colored::Colorize;
use grange::engine::db::Db;
use grange::engine::repo::{AreaRepo, TaskRepo};
use grange::engine::resolver::slugify;

/// Adds a new farm area.
///
/// # Errors
/// Returns error if the area already exists or the database write fails.
pub fn handle_add(name: &str) -> Result<()> {
    let conn = Db::connect()?;
    let repo = AreaRepo::new(&conn);
    let slug = slugify(name);

    if repo.find_by_slug(&slug)?.is_some() {
        bail!("Area with slug '{slug}' already exists");
    }

    repo.add(&slug, name)?;
    println!("{} Added area [{}] {}", "✓".green(), slug.yellow(), name);
    Ok(())
}

/// Lists all areas with their task counts.
///
/// # Errors
/// Returns error if database query fails.
pub fn handle_list() -> Result<()> {
    let conn = Db::connect()?;
    let areas = AreaRepo::new(&conn).get_all()?;
    let tasks = TaskRepo::new(&conn).get_all()?;

    println!("{} Areas:", "🗺".cyan());

    if areas.is_empty() {
        println!("   (No areas defined yet)");
        return Ok(());
    }

    for area in areas {
        let count = tasks.iter().filter(|t| t.area_id == Some(area.id)).count();
        println!(
            "   [{}] {} ({})",
            area.slug.blue(),
            area.name,
            format!("{count} tasks").dimmed()
        );
    }
    Ok(())
}
