use jiff::civil::{Date, DateTime};

use crate::models::{project::Project, task::Task};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Project,
    ProjectEnd,
    Task,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Project => "project",
            EventKind::ProjectEnd => "project-end",
            EventKind::Task => "task",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventColor {
    Blue,
    DarkBlue,
    Red,
    Yellow,
    Green,
    Gray,
}

/// Record an event was synthesized from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventSource<'a> {
    Project(&'a Project),
    Task(&'a Task),
}

impl EventSource<'_> {
    pub fn description(&self) -> Option<&str> {
        match self {
            EventSource::Project(project) => project.description.as_deref(),
            EventSource::Task(task) => task.description.as_deref(),
        }
    }
}

/// Dated entry of the calendar. Never persisted; rebuilt from records on every read.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarEvent<'a> {
    /// Synthetic id such as `task-12` or `project-end-3`
    pub id: String,
    pub title: String,
    pub date: DateTime,
    pub kind: EventKind,
    pub source: EventSource<'a>,
    pub color: EventColor,
}

/// One cell of a calendar grid.
#[derive(Clone, Debug, PartialEq)]
pub struct DayEvents<'e, 'a> {
    pub day: Date,
    pub events: Vec<&'e CalendarEvent<'a>>,
}
