use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Backlog,
    #[serde(rename = "In Progress")]
    InProgress,
    Blocked,
    Review,
    Done,
}

impl TaskStatus {
    /// Every status in board-column order.
    pub const ALL: [TaskStatus; 5] = [
        Self::Backlog,
        Self::InProgress,
        Self::Blocked,
        Self::Review,
        Self::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::InProgress => "In Progress",
            Self::Blocked => "Blocked",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Backlog" => Some(Self::Backlog),
            "In Progress" => Some(Self::InProgress),
            "Blocked" => Some(Self::Blocked),
            "Review" => Some(Self::Review),
            "Done" => Some(Self::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Every priority, lowest first.
    pub const ALL: [Priority; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            "Urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: Uuid,
    pub label: String,
    pub done: bool,
}

impl ChecklistItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            done: false,
        }
    }
}

/// A single work item, optionally linked to a project by a weak reference.
/// The `project_id` is lookup-only: deleting a project leaves it dangling
/// and every consumer tolerates the unresolved reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub project_id: Option<Uuid>,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub points: u32,
    pub due_date: Option<NaiveDate>,
    pub assignees: Vec<String>,
    pub tags: Vec<String>,
    pub description: String,
    pub checklist: Vec<ChecklistItem>,
    pub done: bool,
    /// Start date of the work, distinct from `created_at`.
    pub date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub escalations: bool,
    pub delay: bool,
    pub proactive_steps: String,
    pub tools_used: Vec<String>,
    pub stakeholder_feedback: String,
    pub lessons_learned: String,
    /// Delivery quality rating, 0 (unrated) to 5.
    pub delivery: u8,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Task {
    /// Quick-add constructor: Backlog, Medium priority, one point,
    /// starting today and due in a week.
    pub fn new(title: impl Into<String>) -> Self {
        let now = chrono::Local::now().naive_local();
        let today = now.date();
        Self {
            id: Uuid::new_v4(),
            project_id: None,
            title: title.into(),
            status: TaskStatus::Backlog,
            priority: Priority::Medium,
            points: 1,
            due_date: Some(today + chrono::Duration::days(7)),
            assignees: vec!["Me".to_string()],
            tags: Vec::new(),
            description: String::new(),
            checklist: Vec::new(),
            done: false,
            date: Some(today),
            completion_date: None,
            escalations: false,
            delay: false,
            proactive_steps: String::new(),
            tools_used: Vec::new(),
            stakeholder_feedback: String::new(),
            lessons_learned: String::new(),
            delivery: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn complete(&mut self) {
        self.status = TaskStatus::Done;
        self.done = true;
        self.completion_date = Some(chrono::Local::now().date_naive());
        self.touch();
    }

    /// Refresh `updated_at`; called on every mutation.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Local::now().naive_local();
    }

    /// Due strictly before `today` and not finished.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        if self.status == TaskStatus::Done {
            return false;
        }
        match self.due_date {
            Some(due) => due < today,
            None => false,
        }
    }

    pub fn add_checklist_item(&mut self, label: impl Into<String>) -> Uuid {
        let item = ChecklistItem::new(label);
        let id = item.id;
        self.checklist.push(item);
        self.touch();
        id
    }

    pub fn set_checklist_done(&mut self, item_id: Uuid, done: bool) -> bool {
        match self.checklist.iter_mut().find(|c| c.id == item_id) {
            Some(item) => {
                item.done = done;
                self.touch();
                true
            }
            None => false,
        }
    }
}
