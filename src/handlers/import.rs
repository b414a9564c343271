//! Handler for the `import` command.

use anyhow::{Context, Result};
use colored::Colorize;
use grange::engine::db::Db;
use grange::engine::record::TaskRecord;
use grange::engine::repo::tasks::NewTask;
use grange::engine::repo::{AreaRepo, TaskRepo};
use grange::engine::resolver::slugify;
use std::path::Path;

/// Imports tasks from a JSON file of boundary records, upserting by slug.
///
/// Records with an invalid schedule are reported and skipped; one bad
/// record never aborts the rest of the import.
///
/// # Errors
/// Returns error if the file cannot be read or parsed, or a write fails.
pub fn handle(file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records: Vec<TaskRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {} as a task record array", file.display()))?;

    let mut conn = Db::connect()?;
    let tx = conn.transaction()?;

    let mut created = 0usize;
    let mut updated = 0usize;
    let mut skipped = 0usize;

    {
        let tasks = TaskRepo::new(&tx);
        let areas = AreaRepo::new(&tx);

        for record in &records {
            let slug = record
                .slug
                .clone()
                .unwrap_or_else(|| slugify(&record.title));

            if record.frequency_days <= 0 {
                println!(
                    "   {} [{}] task has invalid schedule ({} days); skipped",
                    "⚠".yellow(),
                    slug.yellow(),
                    record.frequency_days
                );
                skipped += 1;
                continue;
            }

            let area_id = match record.area.as_deref() {
                Some(area_slug) => match areas.find_by_slug(area_slug)? {
                    Some(area) => Some(area.id),
                    None => Some(areas.add(&slugify(area_slug), area_slug)?),
                },
                None => None,
            };

            let (_, was_created) = tasks.upsert(
                &NewTask {
                    slug: &slug,
                    title: &record.title,
                    area_id,
                    frequency_days: record.frequency_days,
                    manual_due_date: record.manual_due_date,
                    seasonal: record.seasonal,
                    active_months: record.active_months.as_deref(),
                },
                record.last_completed,
            )?;

            if was_created {
                created += 1;
            } else {
                updated += 1;
            }
        }
    }

    tx.commit()?;

    println!(
        "{} Imported {} records: {} created, {} updated, {} skipped",
        "✓".green(),
        records.len(),
        created,
        updated,
        skipped
    );
    Ok(())
}
