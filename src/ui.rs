use colored::*;
use jiff::{civil::Date, tz::TimeZone};

use crate::{
    models::{
        attachment::Attachment,
        calendar::{CalendarEvent, DayEvents, EventColor, EventKind},
        comment::Comment,
        setting::Setting,
        task::{Priority, Task, TaskStatus},
        team::TeamMemberSummary,
    },
    services::{
        activities::{ActivityDay, TypeGroup, TypeGroupCounts, day_label, describe},
        aggregate::{DashboardStats, ProjectProgress, StatusColumns},
        calendar::ViewMode,
        dates::parse_record_date,
        files::{FileKind, format_file_size},
        settings::{SettingValue, typed_value},
        team::TeamTotals,
    },
};

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Render a view header with title and count
pub fn render_view_header(title: &str, count: usize, noun: &str) {
    let word = if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    };
    println!("\n  {} ({} {})\n", title.cyan().bold(), count, word);
}

/// Render a section header (e.g., "In Progress", "Today")
pub fn render_section_header(title: &str) {
    println!("\n  ─── {} ───\n", title.bold());
}

/// Print `left` and a dimmed `right` pushed to the terminal's right edge.
fn print_aligned(left: ColoredString, left_visible_len: usize, right: &str) {
    let terminal_width = get_terminal_width();
    let right_len = right.chars().count();

    if !right.is_empty() && left_visible_len + right_len + 4 < terminal_width {
        let padding = terminal_width - left_visible_len - right_len - 2;
        println!("{}{}{}", left, " ".repeat(padding), right.dimmed());
    } else {
        println!("{}", left);
    }
}

/// Fixed-width text progress bar, e.g. `[#####-----]`.
pub fn progress_bar(progress: u8, width: usize) -> String {
    let filled = (usize::from(progress.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn render_dashboard(stats: &DashboardStats, projects: &[ProjectProgress<'_>]) {
    render_section_header("Overview");
    println!("  {:<18}{}", "Total projects", stats.total_projects.to_string().bold());
    println!("  {:<18}{}", "Active tasks", stats.active_tasks.to_string().bold());
    println!("  {:<18}{}", "Completed tasks", stats.completed_tasks.to_string().bold());
    println!("  {:<18}{}", "Team members", stats.team_members.to_string().bold());

    render_view_header("Projects", projects.len(), "project");
    for entry in projects {
        render_project_line(entry);
    }
}

pub fn render_project_line(entry: &ProjectProgress<'_>) {
    let project = entry.project;
    let left = format!(
        "  {:>3}  {} {:>3}%  {}",
        project.id,
        progress_bar(entry.progress, 10),
        entry.progress,
        project.name
    );
    let right = format!(
        "{} · {}/{} done",
        project.status.as_str(),
        entry.counts.completed,
        entry.counts.total
    );
    let visible = left.chars().count();
    print_aligned(left.bold(), visible, &right);
}

/// Get the appropriate status glyph for a task
pub fn get_status_glyph(task: &Task, is_overdue: bool) -> ColoredString {
    match task.status {
        Some(TaskStatus::Done) => "✓".dimmed(),
        Some(TaskStatus::InProgress) => "◐".yellow(),
        _ if is_overdue => "●".red(),
        _ => "○".normal(),
    }
}

fn priority_tag(priority: Option<&Priority>) -> ColoredString {
    match priority {
        Some(Priority::High) => "high".red(),
        Some(Priority::Medium) => "medium".yellow(),
        Some(Priority::Low) => "low".green(),
        Some(Priority::Unknown(raw)) => raw.as_str().normal(),
        None => "".normal(),
    }
}

/// Render a single task line with ID, glyph, title, and right-aligned project
pub fn render_task_line(task: &Task, project_name: Option<&str>, is_overdue: bool) {
    let glyph = get_status_glyph(task, is_overdue);
    let left = format!(
        "  {:>3}  {}  {}  {}",
        task.id,
        glyph,
        task.title,
        priority_tag(task.priority.as_ref())
    );
    let visible = format!(
        "  {:>3}  {}  {}  {}",
        task.id,
        " ",
        task.title,
        task.priority.as_ref().map(Priority::as_str).unwrap_or("")
    )
    .chars()
    .count();

    let mut right = project_name.unwrap_or("Unknown Project").to_string();
    if let Some(due) = task.due_date.as_deref() {
        let label = if is_overdue { "overdue" } else { "due" };
        right = format!("{label} {due}  ·  {right}");
    }

    let styled = if task.is_done() { left.dimmed() } else { left.normal() };
    print_aligned(styled, visible, &right);
}

pub fn render_status_columns<F>(columns: &StatusColumns<'_>, mut line: F)
where
    F: FnMut(&Task),
{
    for (title, tasks) in [
        ("To Do", &columns.todo),
        ("In Progress", &columns.in_progress),
        ("Done", &columns.done),
    ] {
        render_section_header(&format!("{title} ({})", tasks.len()));
        if tasks.is_empty() {
            println!("  {}", "nothing here".dimmed());
        }
        for task in tasks.iter().copied() {
            line(task);
        }
    }
}

pub fn render_team(members: &[&TeamMemberSummary], totals: &TeamTotals) {
    render_section_header("Team");
    println!("  {:<18}{}", "Members", totals.members.to_string().bold());
    println!("  {:<18}{}", "Active projects", totals.active_projects.to_string().bold());
    println!("  {:<18}{}", "Active tasks", totals.active_tasks.to_string().bold());
    println!("  {:<18}{}", "Completed tasks", totals.completed_tasks.to_string().bold());

    render_view_header("Members", members.len(), "member");
    for member in members {
        let projects = member
            .projects
            .iter()
            .map(|p| p.project_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let left = format!(
            "  {:<20} {:>3} tasks  {:>3} active  {:>3} done",
            member.name, member.total_tasks, member.active_tasks, member.completed_tasks
        );
        let visible = left.chars().count();
        print_aligned(left.bold(), visible, &projects);
    }
}

fn colorize_event(event: &CalendarEvent<'_>) -> ColoredString {
    let text = event.title.as_str();
    match event.color {
        EventColor::Blue => text.blue(),
        EventColor::DarkBlue => text.bright_blue().bold(),
        EventColor::Red => text.red(),
        EventColor::Yellow => text.yellow(),
        EventColor::Green => text.green(),
        EventColor::Gray => text.dimmed(),
    }
}

/// Days are printed as a list; the month and week grids of a browser do not
/// fit a terminal line.
pub fn render_calendar(days: &[DayEvents<'_, '_>], view: ViewMode, anchor: Date, today: Date) {
    let title = match view {
        ViewMode::Month => anchor.strftime("%B %Y").to_string(),
        ViewMode::Week => match (days.first(), days.last()) {
            (Some(first), Some(last)) => format!(
                "{} - {}",
                first.day.strftime("%b %-d"),
                last.day.strftime("%b %-d, %Y")
            ),
            _ => anchor.strftime("%b %-d, %Y").to_string(),
        },
        ViewMode::Day => anchor.strftime("%A, %B %-d, %Y").to_string(),
    };
    let total: usize = days.iter().map(|d| d.events.len()).sum();
    render_view_header(&title, total, "event");

    for day in days {
        if day.events.is_empty() && view == ViewMode::Month {
            continue;
        }
        let header = day.day.strftime("%a %b %-d").to_string();
        let header = if day.day == today {
            header.blue().bold()
        } else if view == ViewMode::Month && day.day.month() != anchor.month() {
            header.dimmed()
        } else {
            header.bold()
        };
        println!("  {}", header);

        if day.events.is_empty() {
            println!("      {}", "no events".dimmed());
        }
        for event in &day.events {
            let kind = match event.kind {
                EventKind::Project => "Project",
                EventKind::ProjectEnd => "Project end",
                EventKind::Task => "Task",
            };
            println!(
                "      {}  {}  {}",
                event.date.strftime("%H:%M").to_string().dimmed(),
                colorize_event(event),
                kind.dimmed()
            );
            if view == ViewMode::Day
                && let Some(description) = event.source.description()
            {
                println!("             {}", description.dimmed());
            }
        }
    }
}

pub fn render_activity_filters(counts: &TypeGroupCounts, selected: TypeGroup) {
    let badges = TypeGroup::ALL
        .iter()
        .map(|group| {
            let badge = format!("{} ({})", group.as_str(), counts.get(*group));
            if *group == selected {
                badge.cyan().bold().to_string()
            } else {
                badge.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    println!("  {}", badges);
}

/// Format a raw record date in `tz`, falling back to the raw text.
fn format_record_date(raw: &str, tz: &TimeZone, format: &str) -> String {
    parse_record_date(raw, tz)
        .map(|at| at.strftime(format).to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn render_activity_days(days: &[ActivityDay<'_>], today: Date, tz: &TimeZone) {
    for day in days {
        render_section_header(&day_label(day.day, today));
        for activity in &day.activities {
            let time = format_record_date(&activity.timestamp, tz, "%-I:%M %p");
            println!(
                "  {:>8}  {} {}",
                time.dimmed(),
                activity.user.bold(),
                describe(activity)
            );
        }
    }
}

pub fn render_comments(task: &Task, comments: &[&Comment], tz: &TimeZone) {
    render_view_header(&task.title, comments.len(), "comment");
    for comment in comments {
        let when = format_record_date(&comment.timestamp, tz, "%b %-d, %H:%M");
        println!("  {}  {}", comment.author.bold(), when.dimmed());
        for line in comment.content.lines() {
            println!("      {}", line);
        }
    }
}

pub fn render_attachments(task: &Task, files: &[&Attachment], tz: &TimeZone) {
    render_view_header(&task.title, files.len(), "file");
    for file in files {
        let kind = FileKind::from_mime(file.mime_type.as_deref());
        let left = format!("  {:<12} {}", kind.as_str(), file.name);
        let uploaded = file
            .upload_date
            .as_deref()
            .map(|raw| format_record_date(raw, tz, "%b %-d, %Y"))
            .unwrap_or_default();
        let right = format!("{}  {}", format_file_size(file.size), uploaded);
        let visible = left.chars().count();
        print_aligned(left.normal(), visible, right.trim_end());
    }
}

pub fn render_settings(settings: &[&Setting]) {
    render_view_header("Settings", settings.len(), "setting");
    for setting in settings {
        let value = match typed_value(setting) {
            Ok(SettingValue::Boolean(true)) => "true".green(),
            Ok(SettingValue::Boolean(false)) => "false".red(),
            Ok(SettingValue::Number(n)) => n.to_string().cyan(),
            Ok(SettingValue::Text(text)) => text.normal(),
            Err(e) => format!("{} ({})", setting.value, e).yellow(),
        };
        let name = format!("{:<28}", setting.name);
        println!("  {} {}  {}", name.bold(), value, setting.kind.as_str().dimmed());
        if let Some(description) = setting.description.as_deref().filter(|d| !d.is_empty()) {
            println!("      {}", description.dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[----------]");
        assert_eq!(progress_bar(50, 10), "[#####-----]");
        assert_eq!(progress_bar(33, 10), "[###-------]");
        assert_eq!(progress_bar(100, 4), "[####]");
    }

    #[test]
    fn test_format_record_date_falls_back_to_raw() {
        let tz = TimeZone::UTC;
        assert_eq!(format_record_date("2024-03-01", &tz, "%b %-d"), "Mar 1");
        assert_eq!(format_record_date("soon", &tz, "%b %-d"), "soon");
    }
}
