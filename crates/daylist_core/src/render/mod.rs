//! Pure projection from the filtered list to display records.
//!
//! # Responsibility
//! - Escape user-supplied text for markup hosts.
//! - Format due dates and label the completion toggle by its next transition.
//! - Count pending/completed over the full, unfiltered list.
//!
//! # Invariants
//! - Rendering never mutates tasks.
//! - `counters.pending + counters.completed == all_tasks.len()`.

use crate::model::task::{Task, TaskId};
use chrono::NaiveDate;

/// Label shown when a task has no due date.
pub const NO_DUE_DATE: &str = "No due date";

/// Escapes the five HTML metacharacters.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Due-date label as plain text: `dd/mm/yyyy` for ISO dates, the raw value
/// otherwise. Hosts that print to a terminal use this directly.
pub fn due_date_label(due_date: Option<&str>) -> String {
    match due_date {
        None => NO_DUE_DATE.to_string(),
        Some(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => date.format("%d/%m/%Y").to_string(),
            Err(_) => raw.to_string(),
        },
    }
}

/// [`due_date_label`] escaped for HTML markup.
pub fn format_due_date(due_date: Option<&str>) -> String {
    escape_html(&due_date_label(due_date))
}

/// A button the host renders next to each task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub title: &'static str,
    pub glyph: &'static str,
}

pub const MARK_COMPLETE: Control = Control {
    title: "Mark as complete",
    glyph: "✔",
};
pub const MARK_NOT_DONE: Control = Control {
    title: "Mark as not done",
    glyph: "↺",
};
pub const EDIT_NOTE: Control = Control {
    title: "Edit note",
    glyph: "📝",
};
pub const DELETE_TASK: Control = Control {
    title: "Delete task",
    glyph: "✖",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: TaskId,
    pub text: String,
    pub category: String,
    pub due_date: String,
    /// `None` when the note block should not render.
    pub note: Option<String>,
    pub completed: bool,
    pub toggle: Control,
    pub edit_note: Control,
    pub delete: Control,
}

impl TaskView {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            text: escape_html(&task.text),
            category: escape_html(&task.category),
            due_date: format_due_date(task.due_date.as_deref()),
            note: task.has_note().then(|| escape_html(&task.note)),
            completed: task.completed,
            toggle: if task.completed {
                MARK_NOT_DONE
            } else {
                MARK_COMPLETE
            },
            edit_note: EDIT_NOTE,
            delete: DELETE_TASK,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub pending: usize,
    pub completed: usize,
}

impl Counters {
    pub fn count(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            pending: tasks.len() - completed,
            completed,
        }
    }

    pub fn pending_label(&self) -> String {
        format!("Pending: {}", self.pending)
    }

    pub fn completed_label(&self) -> String {
        format!("Completed: {}", self.completed)
    }
}

/// Full display state handed to the presentation host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub items: Vec<TaskView>,
    pub counters: Counters,
}

/// Renders `visible` and counts over `all_tasks`.
pub fn render_list(all_tasks: &[Task], visible: &[&Task]) -> ListView {
    ListView {
        items: visible.iter().map(|task| TaskView::from_task(task)).collect(),
        counters: Counters::count(all_tasks),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        due_date_label, escape_html, format_due_date, render_list, Counters, MARK_COMPLETE,
        MARK_NOT_DONE,
    };
    use crate::model::task::Task;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            text: "<b>Tom & Jerry's \"show\"</b>".to_string(),
            due_date: Some("2026-03-09".to_string()),
            category: "Home".to_string(),
            note: String::new(),
            completed,
        }
    }

    #[test]
    fn escape_html_neutralizes_all_metacharacters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn format_due_date_handles_absent_iso_and_free_text() {
        assert_eq!(format_due_date(None), "No due date");
        assert_eq!(format_due_date(Some("2026-03-09")), "09/03/2026");
        assert_eq!(format_due_date(Some("next <week>")), "next &lt;week&gt;");
    }

    #[test]
    fn due_date_label_keeps_free_text_unescaped() {
        assert_eq!(due_date_label(None), "No due date");
        assert_eq!(due_date_label(Some("2026-03-09")), "09/03/2026");
        assert_eq!(due_date_label(Some("Tom & <Jerry>")), "Tom & <Jerry>");
    }

    #[test]
    fn toggle_control_names_next_transition() {
        let tasks = vec![task("a", false), task("b", true)];
        let visible: Vec<&Task> = tasks.iter().collect();
        let view = render_list(&tasks, &visible);
        assert_eq!(view.items[0].toggle, MARK_COMPLETE);
        assert_eq!(view.items[1].toggle, MARK_NOT_DONE);
        assert!(!view.items[0].text.contains('<'));
        assert_eq!(view.items[0].note, None);
    }

    #[test]
    fn counters_cover_full_list_not_visible_subset() {
        let tasks = vec![task("a", false), task("b", true), task("c", false)];
        let visible: Vec<&Task> = tasks.iter().take(1).collect();
        let view = render_list(&tasks, &visible);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.counters, Counters { pending: 2, completed: 1 });
        assert_eq!(view.counters.pending_label(), "Pending: 2");
        assert_eq!(view.counters.completed_label(), "Completed: 1");
    }
}
