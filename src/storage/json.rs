use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::FlowgridConfig;
use crate::core::project::Project;
use crate::core::task::Task;

use super::{StorageError, Store};

/// File-backed store: one JSON array per collection under the configured
/// data directory (`projects.json` / `tasks.json`).
pub struct JsonStore {
    config: FlowgridConfig,
}

impl JsonStore {
    pub fn new(config: FlowgridConfig) -> Self {
        Self { config }
    }
}

fn load_array<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Discarding unreadable {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn save_array<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StorageError> {
    let body = serde_json::to_string_pretty(records)?;
    std::fs::write(path, body)?;
    Ok(())
}

impl Store for JsonStore {
    fn load_projects(&self) -> Vec<Project> {
        load_array(&self.config.projects_path())
    }

    fn load_tasks(&self) -> Vec<Task> {
        load_array(&self.config.tasks_path())
    }

    fn save_projects(&self, projects: &[Project]) -> Result<(), StorageError> {
        self.config.ensure_dir()?;
        save_array(&self.config.projects_path(), projects)
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        self.config.ensure_dir()?;
        save_array(&self.config.tasks_path(), tasks)
    }
}
