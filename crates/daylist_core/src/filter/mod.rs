//! Category filter and free-text search over the task list.
//!
//! # Responsibility
//! - Map (tasks, active filter, query) to the displayed subsequence.
//!
//! # Invariants
//! - Output preserves input order (stable filter, no re-sort).
//! - Category and query constraints compose conjunctively.

use crate::model::task::Task;
use std::fmt::{Display, Formatter};

/// Sentinel label meaning "no category constraint".
pub const ALL_FILTER: &str = "All";

/// Active category constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parses a host-provided filter value; empty or `"All"` means no filter.
    pub fn parse(value: &str) -> Self {
        match value {
            "" | ALL_FILTER => Self::All,
            other => Self::Category(other.to_string()),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => task.category == *category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(ALL_FILTER),
            Self::Category(category) => f.write_str(category),
        }
    }
}

/// Returns the tasks visible under `filter` and `query`.
///
/// `query` is trimmed and lower-cased; a non-empty query must be a substring
/// of the task text, category or note.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &CategoryFilter, query: &str) -> Vec<&'a Task> {
    let needle = query.trim().to_lowercase();
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .filter(|task| needle.is_empty() || matches_query(task, &needle))
        .collect()
}

fn matches_query(task: &Task, needle: &str) -> bool {
    [&task.text, &task.category, &task.note]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::{filter_tasks, CategoryFilter};
    use crate::model::task::Task;

    fn task(id: &str, text: &str, category: &str, note: &str) -> Task {
        Task {
            id: id.to_string(),
            text: text.to_string(),
            due_date: None,
            category: category.to_string(),
            note: note.to_string(),
            completed: false,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task("a", "Buy milk", "Home", ""),
            task("b", "Quarterly report", "Work", "ask Dana for MILK numbers"),
            task("c", "Water plants", "Home", ""),
            task("d", "Dentist", "Personal", ""),
        ]
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|task| task.id.clone()).collect()
    }

    #[test]
    fn all_filter_and_blank_query_returns_everything() {
        let tasks = sample();
        let visible = filter_tasks(&tasks, &CategoryFilter::All, "   ");
        assert_eq!(ids(&visible), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn category_filter_is_exact() {
        let tasks = sample();
        let visible = filter_tasks(&tasks, &CategoryFilter::parse("Home"), "");
        assert_eq!(ids(&visible), vec!["a", "c"]);

        let visible = filter_tasks(&tasks, &CategoryFilter::parse("home"), "");
        assert!(visible.is_empty());
    }

    #[test]
    fn query_matches_text_category_and_note_case_insensitively() {
        let tasks = sample();
        let visible = filter_tasks(&tasks, &CategoryFilter::All, "  Milk ");
        assert_eq!(ids(&visible), vec!["a", "b"]);

        let visible = filter_tasks(&tasks, &CategoryFilter::All, "personal");
        assert_eq!(ids(&visible), vec!["d"]);
    }

    #[test]
    fn filter_and_query_compose() {
        let tasks = sample();
        let visible = filter_tasks(&tasks, &CategoryFilter::parse("Work"), "milk");
        assert_eq!(ids(&visible), vec!["b"]);
    }

    #[test]
    fn output_is_an_ordered_subsequence_for_every_combination() {
        let tasks = sample();
        let filters = ["All", "Home", "Work", "Personal", "Nope"];
        let queries = ["", "a", "milk", "e", "zzz"];
        for filter in filters {
            for query in queries {
                let visible = filter_tasks(&tasks, &CategoryFilter::parse(filter), query);
                let mut cursor = tasks.iter();
                for shown in &visible {
                    assert!(cursor.any(|task| task.id == shown.id));
                }
            }
        }
    }

    #[test]
    fn parse_treats_empty_and_sentinel_as_all() {
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("Work").to_string(), "Work");
    }
}
