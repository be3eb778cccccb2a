use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::task::{Priority, Task, TaskStatus};

/// Identifier of the built-in, unremovable "no filter" view.
pub const DEFAULT_VIEW_ID: &str = "default";

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Derive a stable view id from a display name: lowercase, with every run
/// of non-alphanumeric characters collapsed to a single dash.
fn slug(name: &str) -> String {
    SLUG_RE.replace_all(&name.to_lowercase(), "-").into_owned()
}

/// A filter over the task collection. `None` / empty means "any" for that
/// dimension; active dimensions combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub project: Option<Uuid>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub query: String,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.project.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.query.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(project) = self.project {
            if task.project_id != Some(project) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if !self.query.is_empty() {
            let needle = self.query.to_lowercase();
            if !haystack(task).contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Filter a collection, preserving its order.
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}

/// The searchable text of a task: title, description, tags, tools, and the
/// three free-text review fields, space-joined and lowercased.
fn haystack(task: &Task) -> String {
    [
        task.title.as_str(),
        task.description.as_str(),
        &task.tags.join(" "),
        &task.tools_used.join(" "),
        task.proactive_steps.as_str(),
        task.stakeholder_feedback.as_str(),
        task.lessons_learned.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// A named, reusable filter specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedView {
    pub id: String,
    pub name: String,
    pub filter: TaskFilter,
}

/// The saved views of the task sheet. Always contains the default view,
/// which cannot be deleted or replaced; exactly one view is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSet {
    views: Vec<SavedView>,
    active: String,
}

impl Default for ViewSet {
    fn default() -> Self {
        Self {
            views: vec![SavedView {
                id: DEFAULT_VIEW_ID.to_string(),
                name: "Default".to_string(),
                filter: TaskFilter::default(),
            }],
            active: DEFAULT_VIEW_ID.to_string(),
        }
    }
}

impl ViewSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn views(&self) -> &[SavedView] {
        &self.views
    }

    pub fn active_id(&self) -> &str {
        &self.active
    }

    pub fn active(&self) -> &SavedView {
        self.views
            .iter()
            .find(|v| v.id == self.active)
            .unwrap_or(&self.views[0])
    }

    /// Switch the active view. Unknown ids are ignored.
    pub fn activate(&mut self, id: &str) -> bool {
        if self.views.iter().any(|v| v.id == id) {
            self.active = id.to_string();
            true
        } else {
            false
        }
    }

    /// Save a view under `name`, replacing any existing view whose slug
    /// collides, and make it active. An empty name saves nothing.
    pub fn save(&mut self, name: &str, filter: TaskFilter) -> Option<&SavedView> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = slug(name);
        if id == DEFAULT_VIEW_ID {
            // The built-in view is not replaceable.
            return None;
        }
        self.views.retain(|v| v.id != id);
        self.views.push(SavedView {
            id: id.clone(),
            name: name.to_string(),
            filter,
        });
        self.active = id;
        self.views.last()
    }

    /// Delete a saved view. Deleting the default view is rejected; deleting
    /// the active view falls back to the default.
    pub fn delete(&mut self, id: &str) -> bool {
        if id == DEFAULT_VIEW_ID {
            return false;
        }
        let before = self.views.len();
        self.views.retain(|v| v.id != id);
        if self.views.len() == before {
            return false;
        }
        if self.active == id {
            self.active = DEFAULT_VIEW_ID.to_string();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, status: TaskStatus) -> Task {
        let mut t = Task::new(title);
        t.status = status;
        t
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = TaskFilter::default();
        let tasks = vec![task("a", TaskStatus::Backlog), task("b", TaskStatus::Done)];
        assert_eq!(filter.apply(&tasks).len(), 2);
    }

    #[test]
    fn status_filter_is_exact_and_order_preserving() {
        let tasks = vec![
            task("d1", TaskStatus::Done),
            task("open", TaskStatus::InProgress),
            task("d2", TaskStatus::Done),
            task("blocked", TaskStatus::Blocked),
            task("d3", TaskStatus::Done),
        ];
        let filter = TaskFilter {
            status: Some(TaskStatus::Done),
            ..TaskFilter::default()
        };
        let hits = filter.apply(&tasks);
        let titles: Vec<&str> = hits.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["d1", "d2", "d3"]);
    }

    #[test]
    fn query_is_case_insensitive_across_fields() {
        let mut t = task("Configure rules", TaskStatus::InProgress);
        t.tools_used = vec!["Sheets".to_string()];
        let filter = TaskFilter {
            query: "SHEETS".to_string(),
            ..TaskFilter::default()
        };
        assert!(filter.matches(&t));

        let mut lessons = task("Retro", TaskStatus::Done);
        lessons.lessons_learned = "Align stakeholders early".to_string();
        let filter = TaskFilter {
            query: "stakeholders EARLY".to_string(),
            ..TaskFilter::default()
        };
        assert!(filter.matches(&lessons));
        assert!(!filter.matches(&t));
    }

    #[test]
    fn dimensions_combine_with_and() {
        let mut t = task("Wave fill simulation", TaskStatus::Backlog);
        t.priority = Priority::High;
        let both = TaskFilter {
            status: Some(TaskStatus::Backlog),
            priority: Some(Priority::High),
            ..TaskFilter::default()
        };
        assert!(both.matches(&t));
        let mismatch = TaskFilter {
            status: Some(TaskStatus::Backlog),
            priority: Some(Priority::Low),
            ..TaskFilter::default()
        };
        assert!(!mismatch.matches(&t));
    }

    #[test]
    fn project_filter_requires_exact_link() {
        let pid = Uuid::new_v4();
        let mut linked = task("linked", TaskStatus::Backlog);
        linked.project_id = Some(pid);
        let unlinked = task("unlinked", TaskStatus::Backlog);
        let filter = TaskFilter {
            project: Some(pid),
            ..TaskFilter::default()
        };
        assert!(filter.matches(&linked));
        assert!(!filter.matches(&unlinked));
    }

    #[test]
    fn save_view_slugs_name_and_replaces_collision() {
        let mut views = ViewSet::new();
        let saved = views
            .save(
                "High Priority",
                TaskFilter {
                    priority: Some(Priority::High),
                    ..TaskFilter::default()
                },
            )
            .unwrap();
        assert_eq!(saved.id, "high-priority");
        assert_eq!(views.active_id(), "high-priority");
        assert_eq!(views.views().len(), 2);

        // Same slug replaces rather than duplicating.
        views.save(
            "high priority",
            TaskFilter {
                priority: Some(Priority::Urgent),
                ..TaskFilter::default()
            },
        );
        assert_eq!(views.views().len(), 2);
        assert_eq!(views.active().filter.priority, Some(Priority::Urgent));
    }

    #[test]
    fn deleting_default_view_is_rejected() {
        let mut views = ViewSet::new();
        assert!(!views.delete(DEFAULT_VIEW_ID));
        assert_eq!(views.views().len(), 1);
        assert_eq!(views.active_id(), DEFAULT_VIEW_ID);
    }

    #[test]
    fn deleting_active_view_falls_back_to_default() {
        let mut views = ViewSet::new();
        views.save("Blocked only", TaskFilter {
            status: Some(TaskStatus::Blocked),
            ..TaskFilter::default()
        });
        assert_eq!(views.active_id(), "blocked-only");
        assert!(views.delete("blocked-only"));
        assert_eq!(views.active_id(), DEFAULT_VIEW_ID);
        assert!(!views.delete("blocked-only"));
    }

    #[test]
    fn empty_name_saves_nothing() {
        let mut views = ViewSet::new();
        assert!(views.save("   ", TaskFilter::default()).is_none());
        assert_eq!(views.views().len(), 1);
    }
}
