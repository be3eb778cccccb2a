pub mod json;
pub mod table;

use thiserror::Error;

use crate::core::project::Project;
use crate::core::task::Task;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("table store request failed: {0}")]
    Http(Box<ureq::Error>),
}

impl From<ureq::Error> for StorageError {
    fn from(err: ureq::Error) -> Self {
        Self::Http(Box::new(err))
    }
}

/// Persistence adapter for the two collections. The in-memory collections
/// are the source of truth during a session; `save_*` mirrors them after
/// every mutation.
///
/// `load_*` never fails: absence or unreadable data degrades to an empty
/// collection. `save_*` returns an outcome the caller may observe or drop.
pub trait Store {
    fn load_projects(&self) -> Vec<Project>;
    fn load_tasks(&self) -> Vec<Task>;
    fn save_projects(&self, projects: &[Project]) -> Result<(), StorageError>;
    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError>;
}
