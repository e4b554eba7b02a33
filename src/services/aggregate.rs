use std::collections::HashSet;

use jiff::{
    civil::{Date, DateTime},
    tz::TimeZone,
};
use tracing::{debug, warn};

use crate::{
    models::{
        comment::Comment,
        counts::TaskCounts,
        project::{Project, ProjectStatus},
        task::{Priority, Task, TaskStatus},
    },
    services::dates::parse_record_date,
};

/// Count tasks by status. Callers filter by project beforehand.
pub fn compute_task_counts(tasks: &[Task]) -> TaskCounts {
    let mut counts = TaskCounts {
        total: tasks.len(),
        ..TaskCounts::default()
    };

    for task in tasks {
        match &task.status {
            Some(TaskStatus::Todo) => counts.todo += 1,
            Some(TaskStatus::InProgress) => counts.in_progress += 1,
            Some(TaskStatus::Done) => counts.completed += 1,
            Some(TaskStatus::Unknown(raw)) => {
                debug!(task_id = task.id, status = %raw, "unrecognised task status left out of buckets");
            }
            None => {
                debug!(task_id = task.id, "task without status left out of buckets");
            }
        }
    }

    counts
}

/// Completion percentage, rounded half up. 0 for an empty collection.
pub fn compute_progress(counts: &TaskCounts) -> u8 {
    if counts.total == 0 {
        return 0;
    }
    let completed = counts.completed.min(counts.total);
    let percent = (completed * 200 + counts.total) / (counts.total * 2);
    percent as u8
}

pub fn tasks_for_project(tasks: &[Task], project_id: u64) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| t.project_id == project_id)
        .cloned()
        .collect()
}

/// A project next to the counts derived from its tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectProgress<'a> {
    pub project: &'a Project,
    pub counts: TaskCounts,
    pub progress: u8,
}

pub fn project_progress<'a>(projects: &'a [Project], tasks: &[Task]) -> Vec<ProjectProgress<'a>> {
    projects
        .iter()
        .map(|project| {
            let counts = compute_task_counts(&tasks_for_project(tasks, project.id));
            ProjectProgress {
                project,
                counts,
                progress: compute_progress(&counts),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_projects: usize,
    pub active_tasks: usize,
    pub completed_tasks: usize,
    /// Distinct member names across all projects
    pub team_members: usize,
}

pub fn dashboard_stats(progress: &[ProjectProgress<'_>]) -> DashboardStats {
    let members: HashSet<&str> = progress
        .iter()
        .flat_map(|p| p.project.team_members.iter().map(String::as_str))
        .collect();

    DashboardStats {
        total_projects: progress.len(),
        active_tasks: progress.iter().map(|p| p.counts.active()).sum(),
        completed_tasks: progress.iter().map(|p| p.counts.completed).sum(),
        team_members: members.len(),
    }
}

/// Case-insensitive substring match over a name and an optional description.
fn text_matches(term: &str, name: &str, description: Option<&str>) -> bool {
    let term = term.to_lowercase();
    name.to_lowercase().contains(&term)
        || description.is_some_and(|d| d.to_lowercase().contains(&term))
}

/// Criteria of the project list. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(status) = &self.status
            && &project.status != status
        {
            return false;
        }
        match &self.search {
            Some(term) => text_matches(term, &project.name, project.description.as_deref()),
            None => true,
        }
    }
}

/// Criteria of the task list. `None` fields and an empty `assignees` list
/// match everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub project_id: Option<u64>,
    pub search: Option<String>,
    /// Keep tasks whose assignee contains any of these names (case-sensitive)
    pub assignees: Vec<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if !self.assignees.is_empty() {
            let assigned = task
                .assignee
                .as_deref()
                .is_some_and(|a| self.assignees.iter().any(|name| a.contains(name.as_str())));
            if !assigned {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if task.status.as_ref() != Some(status) {
                return false;
            }
        }
        if let Some(priority) = &self.priority {
            if task.priority.as_ref() != Some(priority) {
                return false;
            }
        }
        if let Some(project_id) = self.project_id {
            if task.project_id != project_id {
                return false;
            }
        }
        match &self.search {
            Some(term) => text_matches(term, &task.title, task.description.as_deref()),
            None => true,
        }
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Kanban columns. Tasks with a missing or unrecognised status are in none.
#[derive(Debug, Default, PartialEq)]
pub struct StatusColumns<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

pub fn group_by_status<'a, I>(tasks: I) -> StatusColumns<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut columns = StatusColumns::default();
    for task in tasks {
        match task.status {
            Some(TaskStatus::Todo) => columns.todo.push(task),
            Some(TaskStatus::InProgress) => columns.in_progress.push(task),
            Some(TaskStatus::Done) => columns.done.push(task),
            _ => {}
        }
    }
    columns
}

/// A task is overdue when its due day is before `today` and it is not done.
pub fn is_overdue(task: &Task, today: Date, tz: &TimeZone) -> bool {
    if task.is_done() {
        return false;
    }
    task.due_date
        .as_deref()
        .and_then(|raw| parse_record_date(raw, tz))
        .is_some_and(|due| due.date() < today)
}

/// Comments left on a task, oldest first. Comments with an unparseable
/// timestamp are skipped.
pub fn comments_for_task<'a>(
    comments: &'a [Comment],
    task_id: u64,
    tz: &TimeZone,
) -> Vec<&'a Comment> {
    let mut found: Vec<(DateTime, &'a Comment)> = comments
        .iter()
        .filter(|c| c.task_id == task_id)
        .filter_map(|c| match parse_record_date(&c.timestamp, tz) {
            Some(at) => Some((at, c)),
            None => {
                warn!(comment_id = c.id, timestamp = %c.timestamp, "skipping comment with invalid timestamp");
                None
            }
        })
        .collect();
    found.sort_by_key(|(at, _)| *at);
    found.into_iter().map(|(_, c)| c).collect()
}
