//! Task Resolver: Matches human queries to task records.

use super::repo::TaskRepo;
use super::types::Task;
use anyhow::{bail, Result};
use rusqlite::Connection;

pub struct TaskResolver<'a> {
    repo: TaskRepo<'a>,
    strict: bool,
}

impl<'a> TaskResolver<'a> {
    /// Creates a new resolver.
    #[must_use]
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            repo: TaskRepo::new(conn),
            strict: false,
        }
    }

    /// Creates a resolver in strict mode (exact ID or slug only).
    #[must_use]
    pub fn strict(conn: &'a Connection) -> Self {
        Self {
            repo: TaskRepo::new(conn),
            strict: true,
        }
    }

    /// Resolves a user query into a task: ID, then exact slug, then fuzzy.
    ///
    /// # Errors
    /// Returns an error if no match is found.
    pub fn resolve(&self, query: &str) -> Result<Task> {
        if let Ok(id) = query.parse::<i64>() {
            if let Some(task) = self.repo.find_by_id(id)? {
                return Ok(task);
            }
        }

        if let Some(task) = self.repo.find_by_slug(query)? {
            return Ok(task);
        }

        if self.strict {
            bail!("No exact match for '{query}' in strict mode.");
        }
        self.fuzzy_resolve(query)
    }

    fn fuzzy_resolve(&self, query: &str) -> Result<Task> {
        let tasks = self.repo.get_all()?;
        let query_lower = query.to_lowercase();
        let words: Vec<_> = query_lower.split_whitespace().collect();

        let mut matches: Vec<_> = tasks
            .into_iter()
            .map(|t| (calculate_score(&t, &query_lower, &words), t))
            .filter(|(s, _)| *s > 0.3)
            .collect();

        matches.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let (_, task) = matches
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No task matches '{query}'"))?;

        Ok(task)
    }
}

/// Generates a slug from a title string.
#[must_use]
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join("-")
}

/// Calculates a match score between a task and a query.
fn calculate_score(task: &Task, query: &str, query_words: &[&str]) -> f64 {
    let slug_lower = task.slug.to_lowercase();
    let title_lower = task.title.to_lowercase();

    let mut score: f64 = 0.0;

    if slug_lower.contains(query) {
        score += 0.8;
    }
    if title_lower.contains(query) {
        score += 0.7;
    }

    for word in query_words {
        if slug_lower.contains(word) {
            score += 0.3;
        }
        if title_lower.contains(word) {
            score += 0.25;
        }
    }

    if slug_lower.starts_with(query) {
        score += 0.5;
    }

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::db::Db;
    use crate::engine::repo::tasks::NewTask;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        Db::migrate(&conn).unwrap();
        let repo = TaskRepo::new(&conn);
        for (slug, title) in [
            ("clean-coop", "Clean the chicken coop"),
            ("fix-fence", "Fix the north fence"),
            ("prune-orchard", "Prune the orchard"),
        ] {
            repo.add(&NewTask {
                slug,
                title,
                area_id: None,
                frequency_days: 30,
                manual_due_date: None,
                seasonal: false,
                active_months: None,
            })
            .unwrap();
        }
        conn
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Clean the Coop!"), "clean-the-coop");
        assert_eq!(slugify("  Fix -- Fence  "), "fix-fence");
    }

    #[test]
    fn test_resolve_by_id_and_slug() {
        let conn = test_conn();
        let resolver = TaskResolver::new(&conn);
        assert_eq!(resolver.resolve("1").unwrap().slug, "clean-coop");
        assert_eq!(resolver.resolve("FIX-FENCE").unwrap().slug, "fix-fence");
    }

    #[test]
    fn test_fuzzy_matches_title_words() {
        let conn = test_conn();
        let resolver = TaskResolver::new(&conn);
        assert_eq!(resolver.resolve("chicken").unwrap().slug, "clean-coop");
        assert_eq!(resolver.resolve("north fence").unwrap().slug, "fix-fence");
    }

    #[test]
    fn test_strict_rejects_fuzzy() {
        let conn = test_conn();
        let resolver = TaskResolver::strict(&conn);
        assert!(resolver.resolve("chicken").is_err());
        assert_eq!(resolver.resolve("prune-orchard").unwrap().slug, "prune-orchard");
    }

    #[test]
    fn test_score_capped_at_one() {
        let conn = test_conn();
        let task = TaskRepo::new(&conn).find_by_slug("clean-coop").unwrap().unwrap();
        // Query hits slug, title, prefix, and word bonuses; cap still holds.
        let score = calculate_score(&task, "clean", &["clean"]);
        assert!(score > 0.3);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_no_match_errors() {
        let conn = test_conn();
        let resolver = TaskResolver::new(&conn);
        assert!(resolver.resolve("zzzz").is_err());
    }
}
