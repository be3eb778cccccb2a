use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planned,
    Active,
    #[serde(rename = "On Hold")]
    OnHold,
    Done,
    Archived,
}

impl ProjectStatus {
    /// Every status in lifecycle order.
    pub const ALL: [ProjectStatus; 5] = [
        Self::Planned,
        Self::Active,
        Self::OnHold,
        Self::Done,
        Self::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Active => "Active",
            Self::OnHold => "On Hold",
            Self::Done => "Done",
            Self::Archived => "Archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Planned" => Some(Self::Planned),
            "Active" => Some(Self::Active),
            "On Hold" => Some(Self::OnHold),
            "Done" => Some(Self::Done),
            "Archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// A top-level unit of work. Tasks link to it via `Task::project_id`;
/// the project itself never owns or cascades to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    /// Display glyph shown next to the name.
    pub icon: String,
    pub status: ProjectStatus,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    /// Markdown body; rendering is the presentation layer's concern.
    pub description: String,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: "📁".to_string(),
            status: ProjectStatus::Planned,
            due_date: None,
            tags: Vec::new(),
            description: String::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }
}
