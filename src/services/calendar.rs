use std::str::FromStr;

use jiff::{Timestamp, ToSpan, civil::Date, tz::TimeZone};
use thiserror::Error;
use tracing::warn;

use crate::{
    models::{
        calendar::{CalendarEvent, DayEvents, EventColor, EventKind, EventSource},
        project::Project,
        task::{Task, TaskStatus},
    },
    services::dates::{local_date, parse_record_date},
};

/// Build the calendar entries for a set of projects and tasks.
///
/// Projects yield a start and an end event, tasks a due-date event. A date
/// that fails to parse only drops that one event; the skip is logged.
pub fn derive_events<'a>(
    projects: &'a [Project],
    tasks: &'a [Task],
    tz: &TimeZone,
) -> Vec<CalendarEvent<'a>> {
    let mut events = vec![];

    for project in projects {
        if let Some(raw) = project.start_date.as_deref() {
            match parse_record_date(raw, tz) {
                Some(date) => events.push(CalendarEvent {
                    id: format!("project-{}", project.id),
                    title: project.name.clone(),
                    date,
                    kind: EventKind::Project,
                    source: EventSource::Project(project),
                    color: EventColor::Blue,
                }),
                None => warn!(project_id = project.id, raw, "skipping invalid project start date"),
            }
        }

        if let Some(raw) = project.end_date.as_deref() {
            match parse_record_date(raw, tz) {
                Some(date) => events.push(CalendarEvent {
                    id: format!("project-end-{}", project.id),
                    title: format!("{} (End)", project.name),
                    date,
                    kind: EventKind::ProjectEnd,
                    source: EventSource::Project(project),
                    color: EventColor::DarkBlue,
                }),
                None => warn!(project_id = project.id, raw, "skipping invalid project end date"),
            }
        }
    }

    for task in tasks {
        let Some(raw) = task.due_date.as_deref() else {
            continue;
        };
        match parse_record_date(raw, tz) {
            Some(date) => events.push(CalendarEvent {
                id: format!("task-{}", task.id),
                title: task.title.clone(),
                date,
                kind: EventKind::Task,
                source: EventSource::Task(task),
                color: task_color(task.status.as_ref()),
            }),
            None => warn!(task_id = task.id, raw, "skipping invalid task due date"),
        }
    }

    events
}

fn task_color(status: Option<&TaskStatus>) -> EventColor {
    match status {
        Some(TaskStatus::Todo) => EventColor::Red,
        Some(TaskStatus::InProgress) => EventColor::Yellow,
        Some(TaskStatus::Done) => EventColor::Green,
        _ => EventColor::Gray,
    }
}

/// Events falling on `day`, whatever their time of day, in input order.
pub fn events_on_date<'e, 'a>(events: &'e [CalendarEvent<'a>], day: Date) -> Vec<&'e CalendarEvent<'a>> {
    events.iter().filter(|e| e.date.date() == day).collect()
}

/// One entry per day of `[start, end]`, including days without events.
pub fn group_events_by_day<'e, 'a>(
    events: &'e [CalendarEvent<'a>],
    start: Date,
    end: Date,
) -> Vec<DayEvents<'e, 'a>> {
    start
        .series(1.day())
        .take_while(|day| *day <= end)
        .map(|day| DayEvents {
            day,
            events: events_on_date(events, day),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

#[derive(Debug, Error)]
#[error("Unknown {kind} '{value}'")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl FromStr for ViewMode {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" => Ok(ViewMode::Month),
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            _ => Err(ParseOptionError {
                kind: "view",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for WeekStart {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            _ => Err(ParseOptionError {
                kind: "week start",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Date {0} is outside the supported calendar range")]
    OutOfRange(Date, #[source] jiff::Error),
}

fn start_of_week(day: Date, week_start: WeekStart) -> Result<Date, NavigationError> {
    let offset = match week_start {
        WeekStart::Sunday => day.weekday().to_sunday_zero_offset(),
        WeekStart::Monday => day.weekday().to_monday_zero_offset(),
    };
    day.checked_sub(i64::from(offset).days())
        .map_err(|e| NavigationError::OutOfRange(day, e))
}

fn end_of_week(day: Date, week_start: WeekStart) -> Result<Date, NavigationError> {
    let start = start_of_week(day, week_start)?;
    start
        .checked_add(6.days())
        .map_err(|e| NavigationError::OutOfRange(day, e))
}

/// First and last day shown for `anchor` in the given view.
///
/// Month views cover whole weeks, so they usually spill into the
/// neighbouring months.
pub fn view_range(
    anchor: Date,
    view: ViewMode,
    week_start: WeekStart,
) -> Result<(Date, Date), NavigationError> {
    match view {
        ViewMode::Month => Ok((
            start_of_week(anchor.first_of_month(), week_start)?,
            end_of_week(anchor.last_of_month(), week_start)?,
        )),
        ViewMode::Week => Ok((
            start_of_week(anchor, week_start)?,
            end_of_week(anchor, week_start)?,
        )),
        ViewMode::Day => Ok((anchor, anchor)),
    }
}

pub fn next_period(current: Date, view: ViewMode) -> Result<Date, NavigationError> {
    shift_period(current, view, 1)
}

pub fn previous_period(current: Date, view: ViewMode) -> Result<Date, NavigationError> {
    shift_period(current, view, -1)
}

/// Move `current` by `steps` months, weeks or days.
pub fn shift_period(current: Date, view: ViewMode, steps: i64) -> Result<Date, NavigationError> {
    let span = match view {
        ViewMode::Month => steps.months(),
        ViewMode::Week => steps.weeks(),
        ViewMode::Day => steps.days(),
    };
    current
        .checked_add(span)
        .map_err(|e| NavigationError::OutOfRange(current, e))
}

pub fn today(now: Timestamp, tz: &TimeZone) -> Date {
    local_date(now, tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn project(id: u64, start: Option<&str>, end: Option<&str>) -> Project {
        Project {
            id,
            name: format!("Project {id}"),
            start_date: start.map(String::from),
            end_date: end.map(String::from),
            ..Project::default()
        }
    }

    fn task(id: u64, due: Option<&str>, status: Option<TaskStatus>) -> Task {
        Task {
            id,
            project_id: 1,
            title: format!("Task {id}"),
            due_date: due.map(String::from),
            status,
            ..Task::default()
        }
    }

    #[test]
    fn test_malformed_end_date_is_skipped() {
        let projects = vec![project(1, Some("2024-03-01"), Some("bad-date"))];

        let events = derive_events(&projects, &[], &TimeZone::UTC);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Project);
        assert_eq!(events[0].id, "project-1");
        assert_eq!(events[0].date.date(), date(2024, 3, 1));
    }

    #[test]
    fn test_project_end_and_task_events() {
        let projects = vec![project(3, None, Some("2024-03-20"))];
        let tasks = vec![
            task(1, Some("2024-03-05"), Some(TaskStatus::Todo)),
            task(2, Some("2024-03-05T17:00:00Z"), Some(TaskStatus::InProgress)),
            task(3, Some("2024-03-06"), Some(TaskStatus::Done)),
            task(4, Some("2024-03-07"), None),
            task(5, None, Some(TaskStatus::Todo)),
        ];

        let events = derive_events(&projects, &tasks, &TimeZone::UTC);

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["project-end-3", "task-1", "task-2", "task-3", "task-4"]);
        assert_eq!(events[0].title, "Project 3 (End)");
        assert_eq!(events[0].color, EventColor::DarkBlue);
        let colors: Vec<EventColor> = events[1..].iter().map(|e| e.color).collect();
        assert_eq!(
            colors,
            vec![EventColor::Red, EventColor::Yellow, EventColor::Green, EventColor::Gray]
        );
        assert!(matches!(events[1].source, EventSource::Task(t) if t.id == 1));
    }

    #[test]
    fn test_events_on_date_ignores_time_of_day() {
        let tasks = vec![
            task(1, Some("2024-03-05T23:59:00"), None),
            task(2, Some("2024-03-06"), None),
            task(3, Some("2024-03-05"), None),
        ];
        let events = derive_events(&[], &tasks, &TimeZone::UTC);

        let ids: Vec<&str> = events_on_date(&events, date(2024, 3, 5))
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["task-1", "task-3"]);
        assert!(events_on_date(&events, date(2025, 1, 1)).is_empty());
    }

    #[test]
    fn test_group_empty_range_days() {
        let grouped = group_events_by_day(&[], date(2024, 3, 1), date(2024, 3, 3));

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].day, date(2024, 3, 1));
        assert_eq!(grouped[2].day, date(2024, 3, 3));
        assert!(grouped.iter().all(|d| d.events.is_empty()));
    }

    #[test]
    fn test_group_places_events_in_their_day() {
        let tasks = vec![task(1, Some("2024-03-02"), None)];
        let events = derive_events(&[], &tasks, &TimeZone::UTC);

        let grouped = group_events_by_day(&events, date(2024, 3, 1), date(2024, 3, 3));

        let sizes: Vec<usize> = grouped.iter().map(|d| d.events.len()).collect();
        assert_eq!(sizes, vec![0, 1, 0]);
    }

    #[test]
    fn test_group_inverted_range_is_empty() {
        assert!(group_events_by_day(&[], date(2024, 3, 3), date(2024, 3, 1)).is_empty());
    }

    #[test]
    fn test_month_view_covers_whole_weeks() {
        // March 2024 starts on a Friday and ends on a Sunday.
        let (start, end) =
            view_range(date(2024, 3, 15), ViewMode::Month, WeekStart::Sunday).unwrap();
        assert_eq!(start, date(2024, 2, 25));
        assert_eq!(end, date(2024, 4, 6));

        let (start, end) =
            view_range(date(2024, 3, 15), ViewMode::Month, WeekStart::Monday).unwrap();
        assert_eq!(start, date(2024, 2, 26));
        assert_eq!(end, date(2024, 3, 31));
    }

    #[test]
    fn test_week_and_day_view() {
        let (start, end) = view_range(date(2024, 3, 13), ViewMode::Week, WeekStart::Sunday).unwrap();
        assert_eq!((start, end), (date(2024, 3, 10), date(2024, 3, 16)));

        let (start, end) = view_range(date(2024, 3, 13), ViewMode::Day, WeekStart::Sunday).unwrap();
        assert_eq!((start, end), (date(2024, 3, 13), date(2024, 3, 13)));
    }

    #[test]
    fn test_navigation() {
        let current = date(2024, 1, 31);
        assert_eq!(next_period(current, ViewMode::Month).unwrap(), date(2024, 2, 29));
        assert_eq!(previous_period(current, ViewMode::Week).unwrap(), date(2024, 1, 24));
        assert_eq!(next_period(current, ViewMode::Day).unwrap(), date(2024, 2, 1));
        assert_eq!(shift_period(current, ViewMode::Month, -2).unwrap(), date(2023, 11, 30));
        assert!(next_period(Date::MAX, ViewMode::Day).is_err());
    }

    #[test]
    fn test_today_in_zone() {
        let now: Timestamp = "2024-03-01T02:00:00Z".parse().unwrap();
        assert_eq!(today(now, &TimeZone::UTC), date(2024, 3, 1));
        let tz = TimeZone::fixed(jiff::tz::offset(-5));
        assert_eq!(today(now, &tz), date(2024, 2, 29));
    }

    #[test]
    fn test_parse_view_options() {
        assert_eq!("Week".parse::<ViewMode>().unwrap(), ViewMode::Week);
        assert_eq!("mon".parse::<WeekStart>().unwrap(), WeekStart::Monday);
        assert!("fortnight".parse::<ViewMode>().is_err());
    }
}
