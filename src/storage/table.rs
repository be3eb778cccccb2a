use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::project::{Project, ProjectStatus};
use crate::core::task::{ChecklistItem, Priority, Task, TaskStatus};

use super::{StorageError, Store};

/// Remote table-store adapter speaking a PostgREST-style API: two tables
/// (`projects`, `tasks`) with snake_case columns, each row keyed by `id`.
/// All requests are synchronous; `load_*` degrades to empty on any failure.
pub struct TableStore {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

/// `projects` table row. `created_at`/`updated_at` are server-assigned and
/// never sent on writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub status: ProjectStatus,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `tasks` table row. Task timestamps are client-authoritative
/// (`updated_at` is refreshed on every mutation), so they are mirrored
/// as UTC rather than left to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: Uuid,
    pub project_id: Option<Uuid>,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub points: u32,
    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub assignees: Vec<String>,
    pub tags: Vec<String>,
    pub description: String,
    pub checklist: Vec<ChecklistItem>,
    pub done: bool,
    pub escalations: bool,
    pub delay: bool,
    pub proactive_steps: String,
    pub tools_used: Vec<String>,
    pub stakeholder_feedback: String,
    pub lessons_learned: String,
    pub delivery: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            icon: p.icon.clone(),
            status: p.status,
            due_date: p.due_date,
            tags: p.tags.clone(),
            description: p.description.clone(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            icon: row.icon,
            status: row.status,
            due_date: row.due_date,
            tags: row.tags,
            description: row.description,
        }
    }
}

impl From<&Task> for TaskRow {
    fn from(t: &Task) -> Self {
        Self {
            id: t.id,
            project_id: t.project_id,
            title: t.title.clone(),
            status: t.status,
            priority: t.priority,
            points: t.points,
            date: t.date,
            due_date: t.due_date,
            completion_date: t.completion_date,
            assignees: t.assignees.clone(),
            tags: t.tags.clone(),
            description: t.description.clone(),
            checklist: t.checklist.clone(),
            done: t.done,
            escalations: t.escalations,
            delay: t.delay,
            proactive_steps: t.proactive_steps.clone(),
            tools_used: t.tools_used.clone(),
            stakeholder_feedback: t.stakeholder_feedback.clone(),
            lessons_learned: t.lessons_learned.clone(),
            delivery: t.delivery,
            created_at: DateTime::from_naive_utc_and_offset(t.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(t.updated_at, Utc),
        }
    }
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            title: row.title,
            status: row.status,
            priority: row.priority,
            points: row.points,
            due_date: row.due_date,
            assignees: row.assignees,
            tags: row.tags,
            description: row.description,
            checklist: row.checklist,
            done: row.done,
            date: row.date,
            completion_date: row.completion_date,
            escalations: row.escalations,
            delay: row.delay,
            proactive_steps: row.proactive_steps,
            tools_used: row.tools_used,
            stakeholder_feedback: row.stakeholder_feedback,
            lessons_learned: row.lessons_learned,
            delivery: row.delivery,
            created_at: row.created_at.naive_utc(),
            updated_at: row.updated_at.naive_utc(),
        }
    }
}

impl TableStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            agent: ureq::agent(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authorized(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
    }

    fn fetch_rows<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, StorageError> {
        let url = format!("{}?select=*", self.table_url(table));
        let response = self.authorized(self.agent.get(&url)).call()?;
        let rows = response.into_json()?;
        Ok(rows)
    }

    /// Mirror a collection into a table: upsert every current row, then
    /// drop rows whose ids are no longer present.
    fn mirror_rows<T: Serialize>(
        &self,
        table: &str,
        rows: &[T],
        ids: &[Uuid],
    ) -> Result<(), StorageError> {
        if !rows.is_empty() {
            self.authorized(self.agent.post(&self.table_url(table)))
                .set("Prefer", "resolution=merge-duplicates")
                .send_json(rows)?;
        }

        let url = if ids.is_empty() {
            format!("{}?id=not.is.null", self.table_url(table))
        } else {
            let list: Vec<String> = ids.iter().map(Uuid::to_string).collect();
            format!("{}?id=not.in.({})", self.table_url(table), list.join(","))
        };
        self.authorized(self.agent.delete(&url)).call()?;
        Ok(())
    }
}

impl Store for TableStore {
    fn load_projects(&self) -> Vec<Project> {
        match self.fetch_rows::<ProjectRow>("projects") {
            Ok(rows) => rows.into_iter().map(Project::from).collect(),
            Err(e) => {
                log::warn!("Project fetch failed, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    fn load_tasks(&self) -> Vec<Task> {
        match self.fetch_rows::<TaskRow>("tasks") {
            Ok(rows) => rows.into_iter().map(Task::from).collect(),
            Err(e) => {
                log::warn!("Task fetch failed, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    fn save_projects(&self, projects: &[Project]) -> Result<(), StorageError> {
        let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
        let ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();
        self.mirror_rows("projects", &rows, &ids)
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
        let ids: Vec<Uuid> = tasks.iter().map(|t| t.id).collect();
        self.mirror_rows("tasks", &rows, &ids)
    }
}
