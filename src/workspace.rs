use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::project::Project;
use crate::core::task::Task;
use crate::filter::TaskFilter;
use crate::metrics::DashboardSummary;
use crate::storage::{StorageError, Store};

/// The application state: both collections plus the store backing them.
/// Every mutation goes through a named method here; the in-memory
/// collections stay the source of truth and the store is a best-effort
/// mirror refreshed after each change. A failed mirror is logged, not
/// surfaced; callers that care call [`Workspace::persist`] and observe
/// the outcome directly.
pub struct Workspace<S: Store> {
    store: S,
    projects: Vec<Project>,
    tasks: Vec<Task>,
}

impl<S: Store> Workspace<S> {
    /// Load both collections from the store. Missing or unreadable data
    /// starts the session empty.
    pub fn open(store: S) -> Self {
        let projects = store.load_projects();
        let tasks = store.load_tasks();
        log::info!(
            "Opened workspace with {} projects, {} tasks",
            projects.len(),
            tasks.len()
        );
        Self {
            store,
            projects,
            tasks,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Resolve a task's project link. `None` for unlinked tasks and for
    /// dangling references alike; the caller renders those as unassigned.
    pub fn project_of(&self, task: &Task) -> Option<&Project> {
        task.project_id.and_then(|id| self.project(id))
    }

    /// The tasks visible under a filter. The search bar and the saved-view
    /// mechanism both go through this one path.
    pub fn visible_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        filter.apply(&self.tasks)
    }

    pub fn dashboard(&self, today: NaiveDate) -> DashboardSummary {
        DashboardSummary::build(&self.tasks, &self.projects, today)
    }

    /// Create a task with quick-add defaults, newest first.
    pub fn quick_add_task(&mut self, title: impl Into<String>, project_id: Option<Uuid>) -> Uuid {
        let mut task = Task::new(title);
        task.project_id = project_id;
        let id = task.id;
        self.tasks.insert(0, task);
        self.mirror_tasks();
        id
    }

    /// Replace a task wholesale, keyed by id, refreshing `updated_at`.
    pub fn update_task(&mut self, mut task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                task.touch();
                *slot = task;
                self.mirror_tasks();
                true
            }
            None => false,
        }
    }

    pub fn remove_task(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.mirror_tasks();
        true
    }

    /// Add a project, newest first.
    pub fn add_project(&mut self, project: Project) -> Uuid {
        let id = project.id;
        self.projects.insert(0, project);
        self.mirror_projects();
        id
    }

    pub fn update_project(&mut self, project: Project) -> bool {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => {
                *slot = project;
                self.mirror_projects();
                true
            }
            None => false,
        }
    }

    /// Remove a project. Linked tasks are left untouched; their
    /// `project_id` dangles and resolves to unassigned from then on.
    pub fn remove_project(&mut self, id: Uuid) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return false;
        }
        self.mirror_projects();
        true
    }

    /// Write both collections to the store and report the outcome.
    pub fn persist(&self) -> Result<(), StorageError> {
        self.store.save_projects(&self.projects)?;
        self.store.save_tasks(&self.tasks)?;
        Ok(())
    }

    fn mirror_tasks(&self) {
        if let Err(e) = self.store.save_tasks(&self.tasks) {
            log::error!("Failed to save tasks: {}", e);
        }
    }

    fn mirror_projects(&self) {
        if let Err(e) = self.store.save_projects(&self.projects) {
            log::error!("Failed to save projects: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::task::{Priority, TaskStatus};
    use std::cell::RefCell;

    /// In-memory store double; `fail_saves` exercises the mirror path.
    #[derive(Default)]
    struct MemStore {
        projects: RefCell<Vec<Project>>,
        tasks: RefCell<Vec<Task>>,
        fail_saves: bool,
    }

    impl Store for MemStore {
        fn load_projects(&self) -> Vec<Project> {
            self.projects.borrow().clone()
        }

        fn load_tasks(&self) -> Vec<Task> {
            self.tasks.borrow().clone()
        }

        fn save_projects(&self, projects: &[Project]) -> Result<(), StorageError> {
            if self.fail_saves {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            *self.projects.borrow_mut() = projects.to_vec();
            Ok(())
        }

        fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
            if self.fail_saves {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            *self.tasks.borrow_mut() = tasks.to_vec();
            Ok(())
        }
    }

    #[test]
    fn quick_add_prepends_and_mirrors() {
        let mut ws = Workspace::open(MemStore::default());
        ws.quick_add_task("Second", None);
        let first = ws.quick_add_task("First", None);
        assert_eq!(ws.tasks()[0].id, first);
        assert_eq!(ws.tasks()[0].status, TaskStatus::Backlog);
        assert_eq!(ws.tasks()[0].priority, Priority::Medium);
        assert_eq!(ws.store.tasks.borrow().len(), 2);
    }

    #[test]
    fn update_task_replaces_by_id() {
        let mut ws = Workspace::open(MemStore::default());
        let id = ws.quick_add_task("Draft", None);
        let mut edited = ws.task(id).unwrap().clone();
        edited.title = "Final".to_string();
        edited.status = TaskStatus::Review;
        assert!(ws.update_task(edited));
        let stored = ws.task(id).unwrap();
        assert_eq!(stored.title, "Final");
        assert_eq!(stored.status, TaskStatus::Review);
        assert!(stored.updated_at >= stored.created_at);

        let unknown = Task::new("Never added");
        assert!(!ws.update_task(unknown));
    }

    #[test]
    fn remove_task_filters_by_id() {
        let mut ws = Workspace::open(MemStore::default());
        let id = ws.quick_add_task("Ephemeral", None);
        assert!(ws.remove_task(id));
        assert!(ws.tasks().is_empty());
        assert!(!ws.remove_task(id));
        assert!(ws.store.tasks.borrow().is_empty());
    }

    #[test]
    fn removing_project_never_cascades_to_tasks() {
        let mut ws = Workspace::open(MemStore::default());
        let pid = ws.add_project(Project::new("Doomed"));
        let tid = ws.quick_add_task("Survivor", Some(pid));
        assert!(ws.remove_project(pid));

        let task = ws.task(tid).unwrap().clone();
        assert_eq!(task.project_id, Some(pid)); // left dangling
        assert!(ws.project_of(&task).is_none());
    }

    #[test]
    fn failed_mirror_keeps_memory_authoritative() {
        let store = MemStore {
            fail_saves: true,
            ..MemStore::default()
        };
        let mut ws = Workspace::open(store);
        let id = ws.quick_add_task("Unsaved", None);
        assert!(ws.task(id).is_some());
        assert!(ws.persist().is_err());
    }

    #[test]
    fn visible_tasks_shares_the_filter_path() {
        let mut ws = Workspace::open(MemStore::default());
        let pid = ws.add_project(Project::new("Pilot"));
        ws.quick_add_task("In project", Some(pid));
        ws.quick_add_task("Outside", None);

        let filter = TaskFilter {
            project: Some(pid),
            ..TaskFilter::default()
        };
        let visible = ws.visible_tasks(&filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "In project");
    }

    #[test]
    fn open_loads_existing_collections() {
        let store = MemStore::default();
        store.tasks.borrow_mut().push(Task::new("Persisted"));
        let ws = Workspace::open(store);
        assert_eq!(ws.tasks().len(), 1);
    }
}
