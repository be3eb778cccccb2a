use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::project::{Project, ProjectStatus};
use crate::core::task::{Priority, Task, TaskStatus};

/// Upcoming-deadline list is truncated to this many entries.
pub const UPCOMING_LIMIT: usize = 5;
/// Notification feed is capped to this many entries.
pub const NOTIFICATION_LIMIT: usize = 8;

const WINDOW_DAYS: i64 = 7;

/// The trailing window ending at `today` inclusive, oldest day first.
fn window(today: NaiveDate) -> Vec<NaiveDate> {
    (0..WINDOW_DAYS)
        .map(|i| today - chrono::Duration::days(WINDOW_DAYS - 1 - i))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectProgress {
    pub tasks_done: usize,
    pub tasks_total: usize,
    /// Rounded percentage, 0 when no tasks are linked.
    pub percent: u8,
}

/// Per-project completion stats. The result has an entry for every project,
/// including those with zero linked tasks; tasks pointing at an unknown
/// project are skipped.
pub fn project_progress(projects: &[Project], tasks: &[Task]) -> HashMap<Uuid, ProjectProgress> {
    let mut by: HashMap<Uuid, ProjectProgress> = projects
        .iter()
        .map(|p| (p.id, ProjectProgress::default()))
        .collect();

    for task in tasks {
        if let Some(pid) = task.project_id {
            if let Some(entry) = by.get_mut(&pid) {
                entry.tasks_total += 1;
                if task.status == TaskStatus::Done {
                    entry.tasks_done += 1;
                }
            }
        }
    }

    for entry in by.values_mut() {
        entry.percent = if entry.tasks_total == 0 {
            0
        } else {
            ((entry.tasks_done as f64 / entry.tasks_total as f64) * 100.0).round() as u8
        };
    }

    by
}

/// One completion count per day of the trailing week, oldest first.
/// Only Done tasks count, matched by calendar-day equality on their
/// completion date.
pub fn completion_series(tasks: &[Task], today: NaiveDate) -> Vec<(NaiveDate, usize)> {
    window(today)
        .into_iter()
        .map(|day| {
            let count = tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Done && t.completion_date == Some(day))
                .count();
            (day, count)
        })
        .collect()
}

pub fn completed_this_week(tasks: &[Task], today: NaiveDate) -> usize {
    completion_series(tasks, today)
        .iter()
        .map(|(_, count)| count)
        .sum()
}

/// Tasks with a due date strictly before `today` that are not Done,
/// in collection order.
pub fn overdue_tasks(tasks: &[Task], today: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| t.is_overdue(today))
        .cloned()
        .collect()
}

/// Mean days between start and completion over all Done tasks that carry
/// both dates, rounded to one decimal. Inverted date pairs contribute 0
/// rather than skewing the mean negative; an empty set yields 0.
pub fn average_completion_days(tasks: &[Task]) -> f64 {
    let mut total_days = 0i64;
    let mut count = 0usize;

    for task in tasks {
        if task.status != TaskStatus::Done {
            continue;
        }
        let (start, end) = match (task.date, task.completion_date) {
            (Some(s), Some(e)) => (s, e),
            _ => continue,
        };
        total_days += (end - start).num_days().max(0);
        count += 1;
    }

    if count == 0 {
        return 0.0;
    }
    ((total_days as f64 / count as f64) * 10.0).round() / 10.0
}

/// Counts per status, in fixed enumeration order (not by frequency).
pub fn status_distribution(tasks: &[Task]) -> Vec<(TaskStatus, usize)> {
    TaskStatus::ALL
        .iter()
        .map(|&status| (status, tasks.iter().filter(|t| t.status == status).count()))
        .collect()
}

/// Counts per priority, in fixed enumeration order.
pub fn priority_distribution(tasks: &[Task]) -> Vec<(Priority, usize)> {
    Priority::ALL
        .iter()
        .map(|&priority| {
            (
                priority,
                tasks.iter().filter(|t| t.priority == priority).count(),
            )
        })
        .collect()
}

/// Tasks due today or later, soonest first, truncated to [`UPCOMING_LIMIT`].
pub fn upcoming_deadlines(tasks: &[Task], today: NaiveDate) -> Vec<Task> {
    let mut upcoming: Vec<Task> = tasks
        .iter()
        .filter(|t| matches!(t.due_date, Some(due) if due >= today))
        .cloned()
        .collect();
    upcoming.sort_by_key(|t| t.due_date);
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}

pub fn active_project_count(projects: &[Project]) -> usize {
    projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Active)
        .count()
}

/// Per-status daily counts over the trailing week, keyed by each task's
/// start date. One series per status in fixed order; each series holds one
/// count per window day, oldest first.
pub fn weekly_status_mix(tasks: &[Task], today: NaiveDate) -> Vec<(TaskStatus, Vec<usize>)> {
    let days = window(today);
    TaskStatus::ALL
        .iter()
        .map(|&status| {
            let counts = days
                .iter()
                .map(|&day| {
                    tasks
                        .iter()
                        .filter(|t| t.status == status && t.date == Some(day))
                        .count()
                })
                .collect();
            (status, counts)
        })
        .collect()
}

/// Alert feed lines for overdue and escalation-flagged tasks, capped at
/// [`NOTIFICATION_LIMIT`].
pub fn notifications(tasks: &[Task], today: NaiveDate) -> Vec<String> {
    let mut feed = Vec::new();
    for task in tasks {
        if task.is_overdue(today) {
            feed.push(format!("Overdue: {}", task.title));
        }
        if task.escalations {
            feed.push(format!("Escalation flagged: {}", task.title));
        }
    }
    feed.truncate(NOTIFICATION_LIMIT);
    feed
}

/// Everything the dashboard shows, computed in one call over the current
/// collections. Pure function of its inputs.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub completed_this_week: usize,
    pub overdue: Vec<Task>,
    pub active_projects: usize,
    pub average_completion_days: f64,
    pub completion_series: Vec<(NaiveDate, usize)>,
    pub status_distribution: Vec<(TaskStatus, usize)>,
    pub priority_distribution: Vec<(Priority, usize)>,
    pub upcoming: Vec<Task>,
    pub status_mix: Vec<(TaskStatus, Vec<usize>)>,
}

impl DashboardSummary {
    pub fn build(tasks: &[Task], projects: &[Project], today: NaiveDate) -> Self {
        Self {
            completed_this_week: completed_this_week(tasks, today),
            overdue: overdue_tasks(tasks, today),
            active_projects: active_project_count(projects),
            average_completion_days: average_completion_days(tasks),
            completion_series: completion_series(tasks, today),
            status_distribution: status_distribution(tasks),
            priority_distribution: priority_distribution(tasks),
            upcoming: upcoming_deadlines(tasks, today),
            status_mix: weekly_status_mix(tasks, today),
        }
    }
}
