use std::collections::BTreeSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::task::{Task, TaskStatus};

/// Width of the timeline window in days.
pub const TIMELINE_DAYS: i64 = 14;
/// Number of days shown by the calendar strip.
pub const CALENDAR_DAYS: i64 = 7;

/// Group tasks into board columns, one per status in fixed column order.
/// Every task lands in exactly one column; column order never varies.
pub fn board(tasks: &[Task]) -> Vec<(TaskStatus, Vec<Task>)> {
    TaskStatus::ALL
        .iter()
        .map(|&status| {
            let column = tasks
                .iter()
                .filter(|t| t.status == status)
                .cloned()
                .collect();
            (status, column)
        })
        .collect()
}

/// Bucket tasks by due date over [`CALENDAR_DAYS`] days starting at `start`,
/// using calendar-day equality.
pub fn calendar_week(tasks: &[Task], start: NaiveDate) -> Vec<(NaiveDate, Vec<Task>)> {
    (0..CALENDAR_DAYS)
        .map(|offset| {
            let day = start + chrono::Duration::days(offset);
            let due = tasks
                .iter()
                .filter(|t| t.due_date == Some(day))
                .cloned()
                .collect();
            (day, due)
        })
        .collect()
}

/// One bar of the timeline view. `offset_days` is measured from `today`;
/// bars that started in the past are pinned to the left edge. The renderer
/// caps drawing at [`TIMELINE_DAYS`]; the span itself is not clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineBar {
    pub task_id: Uuid,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub offset_days: i64,
    pub span_days: i64,
}

/// Project each task onto the timeline: start falls back from the start
/// date to the creation day, end from due date to completion date to start.
/// Spans are at least one day; offsets never negative.
pub fn timeline(tasks: &[Task], today: NaiveDate) -> Vec<TimelineBar> {
    tasks
        .iter()
        .map(|task| {
            let start = task.date.unwrap_or_else(|| task.created_at.date());
            let end = task
                .due_date
                .or(task.completion_date)
                .unwrap_or(start);
            TimelineBar {
                task_id: task.id,
                title: task.title.clone(),
                start,
                end,
                offset_days: (start - today).num_days().max(0),
                span_days: (end - start).num_days().max(1),
            }
        })
        .collect()
}

/// The fixed set of task-sheet columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColumnId {
    Title,
    Project,
    Done,
    Date,
    Due,
    Completion,
    Priority,
    Status,
    Escalations,
    Delay,
    Delivery,
    Tools,
    Steps,
    Feedback,
    Lessons,
}

impl ColumnId {
    pub const ALL: [ColumnId; 15] = [
        Self::Title,
        Self::Project,
        Self::Done,
        Self::Date,
        Self::Due,
        Self::Completion,
        Self::Priority,
        Self::Status,
        Self::Escalations,
        Self::Delay,
        Self::Delivery,
        Self::Tools,
        Self::Steps,
        Self::Feedback,
        Self::Lessons,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Project => "project",
            Self::Done => "done",
            Self::Date => "date",
            Self::Due => "due",
            Self::Completion => "completion",
            Self::Priority => "priority",
            Self::Status => "status",
            Self::Escalations => "escalations",
            Self::Delay => "delay",
            Self::Delivery => "delivery",
            Self::Tools => "tools",
            Self::Steps => "steps",
            Self::Feedback => "feedback",
            Self::Lessons => "lessons",
        }
    }

    /// Resolve a column label; unknown labels are rejected rather than
    /// carried as open-ended configuration.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

/// Typed visibility map over the fixed column set. Defaults to all visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    visible: BTreeSet<ColumnId>,
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self {
            visible: ColumnId::ALL.into_iter().collect(),
        }
    }
}

impl ColumnSet {
    pub fn is_visible(&self, column: ColumnId) -> bool {
        self.visible.contains(&column)
    }

    pub fn set(&mut self, column: ColumnId, visible: bool) {
        if visible {
            self.visible.insert(column);
        } else {
            self.visible.remove(&column);
        }
    }

    pub fn show_all(&mut self) {
        self.visible = ColumnId::ALL.into_iter().collect();
    }

    pub fn hide_all(&mut self) {
        self.visible.clear();
    }

    /// Visible columns in fixed declaration order.
    pub fn visible_columns(&self) -> impl Iterator<Item = ColumnId> + '_ {
        self.visible.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(title: &str, status: TaskStatus) -> Task {
        let mut t = Task::new(title);
        t.status = status;
        t.due_date = None;
        t.date = None;
        t
    }

    #[test]
    fn board_covers_every_task_exactly_once() {
        let tasks = vec![
            task("a", TaskStatus::Backlog),
            task("b", TaskStatus::Done),
            task("c", TaskStatus::Backlog),
            task("d", TaskStatus::Review),
        ];
        let columns = board(&tasks);
        let order: Vec<TaskStatus> = columns.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, TaskStatus::ALL.to_vec());
        let total: usize = columns.iter().map(|(_, col)| col.len()).sum();
        assert_eq!(total, tasks.len());
        assert_eq!(columns[0].1.len(), 2); // Backlog keeps insertion order
        assert_eq!(columns[0].1[0].title, "a");
        assert_eq!(columns[0].1[1].title, "c");
    }

    #[test]
    fn calendar_buckets_by_due_day() {
        let start = day(2026, 3, 10);
        let mut due_first = task("first", TaskStatus::Backlog);
        due_first.due_date = Some(start);
        let mut due_last = task("last", TaskStatus::Backlog);
        due_last.due_date = Some(day(2026, 3, 16));
        let mut outside = task("outside", TaskStatus::Backlog);
        outside.due_date = Some(day(2026, 3, 17));

        let week = calendar_week(&[due_first, due_last, outside], start);
        assert_eq!(week.len(), CALENDAR_DAYS as usize);
        assert_eq!(week[0].1.len(), 1);
        assert_eq!(week[6].1.len(), 1);
        assert_eq!(week[1].1.len(), 0);
    }

    #[test]
    fn timeline_clamps_span_and_offset() {
        let today = day(2026, 3, 10);
        // Due date equals start: zero-length span becomes one day.
        let mut point = task("point", TaskStatus::Backlog);
        point.date = Some(today);
        point.due_date = Some(today);
        // Started in the past: pinned to the left edge.
        let mut past = task("past", TaskStatus::InProgress);
        past.date = Some(day(2026, 3, 1));
        past.due_date = Some(day(2026, 3, 12));

        let bars = timeline(&[point, past], today);
        assert_eq!(bars[0].span_days, 1);
        assert_eq!(bars[0].offset_days, 0);
        assert_eq!(bars[1].offset_days, 0);
        assert_eq!(bars[1].span_days, 11);
    }

    #[test]
    fn timeline_falls_back_to_creation_and_completion() {
        let today = day(2026, 3, 10);
        let mut bare = task("bare", TaskStatus::Done);
        bare.completion_date = Some(day(2026, 3, 20));
        let bars = timeline(&[bare.clone()], today);
        assert_eq!(bars[0].start, bare.created_at.date());
        assert_eq!(bars[0].end, day(2026, 3, 20));
    }

    #[test]
    fn column_set_defaults_to_all_visible() {
        let columns = ColumnSet::default();
        for column in ColumnId::ALL {
            assert!(columns.is_visible(column));
        }
        assert_eq!(columns.visible_columns().count(), 15);
    }

    #[test]
    fn column_set_toggle_and_bulk_ops() {
        let mut columns = ColumnSet::default();
        columns.set(ColumnId::Lessons, false);
        assert!(!columns.is_visible(ColumnId::Lessons));
        assert!(columns.is_visible(ColumnId::Title));

        columns.hide_all();
        assert_eq!(columns.visible_columns().count(), 0);
        columns.show_all();
        assert_eq!(columns.visible_columns().count(), 15);
    }

    #[test]
    fn unknown_column_label_is_rejected() {
        assert_eq!(ColumnId::from_str("title"), Some(ColumnId::Title));
        assert_eq!(ColumnId::from_str("velocity"), None);
    }
}
