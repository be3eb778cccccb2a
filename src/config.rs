use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("flowgrid")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FlowgridConfig {
    pub data_directory: PathBuf,
}

impl Default for FlowgridConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
        }
    }
}

impl FlowgridConfig {
    pub fn projects_path(&self) -> PathBuf {
        self.data_directory.join("projects.json")
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_directory.join("tasks.json")
    }

    /// Ensure the data directory exists.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_directory)
    }
}
