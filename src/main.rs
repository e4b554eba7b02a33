use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::*;
use jiff::{Timestamp, civil::Date};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use taskpulse::{
    config::Config,
    models::{
        project::ProjectStatus,
        setting::SettingType,
        task::{Priority, Task, TaskStatus},
    },
    services::{
        activities::{
            TypeGroup, counts_by_type_group, filter_by_type, group_by_calendar_day,
            sort_newest_first,
        },
        aggregate::{
            ProjectFilter, TaskFilter, comments_for_task, dashboard_stats, group_by_status,
            is_overdue, project_progress,
        },
        calendar::{
            ViewMode, WeekStart, derive_events, group_events_by_day, shift_period, today,
            view_range,
        },
        files::files_for_task,
        settings::search_settings,
        team::{compute_team_summaries, search_members, team_totals},
    },
    storage::{Storage, json::JsonFileStorage},
    ui,
};

#[derive(Parser)]
#[command(
    name = "taskpulse",
    about = "Project progress, team workload, calendar and activity views for your backend export"
)]
struct Cli {
    /// Snapshot file exported from the backend
    #[arg(long, global = true, env = "TASKPULSE_STORE")]
    store: Option<PathBuf>,

    /// IANA time zone used to place dates on the calendar (defaults to the system zone)
    #[arg(long, global = true, env = "TASKPULSE_TZ")]
    tz: Option<String>,

    /// First day of the week: sunday or monday
    #[arg(long, global = true)]
    week_start: Option<WeekStart>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show overall stats and project progress
    Dashboard,

    /// List projects with their progress
    Projects {
        /// Only projects with this status (active, on-hold, completed)
        #[arg(long)]
        status: Option<String>,

        /// Case-insensitive text to look for in name and description
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List tasks, optionally filtered
    Tasks {
        /// Only tasks with this status (todo, inprogress, done)
        #[arg(long)]
        status: Option<String>,

        /// Only tasks with this priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,

        /// Only tasks of this project id
        #[arg(long)]
        project: Option<u64>,

        /// Case-insensitive text to look for in title and description
        #[arg(short, long)]
        search: Option<String>,

        /// Only tasks whose assignee contains this name; repeat for several people
        #[arg(short, long)]
        assignee: Vec<String>,

        /// Group tasks in status columns
        #[arg(long)]
        board: bool,
    },

    /// Show per-member workload
    Team {
        /// Case-insensitive member name filter
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show projects and tasks on the calendar
    Calendar {
        /// month, week or day
        #[arg(long, default_value = "month")]
        view: ViewMode,

        /// Anchor date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<Date>,

        /// Periods to move from the anchor, negative to go back
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
    },

    /// Show the activity feed grouped by day
    Activity {
        /// all, tasks, comments, projects or files
        #[arg(short, long, default_value = "all")]
        filter: TypeGroup,

        /// Only activity of this project id
        #[arg(long)]
        project: Option<u64>,

        /// Maximum number of entries
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Show the comments of a task
    Comments { task_id: u64 },

    /// Show the files attached to a task
    Files { task_id: u64 },

    /// List application settings
    Settings {
        /// Case-insensitive text to look for in setting names
        #[arg(short, long)]
        search: Option<String>,

        /// Only settings of this type (string, number, boolean)
        #[arg(long = "type")]
        kind: Option<String>,
    },
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red(), message);
    std::process::exit(1);
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("TASKPULSE_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::resolve(cli.store, cli.tz.as_deref(), cli.week_start)
        .unwrap_or_else(|e| fail(e));

    let storage = JsonFileStorage::new(config.store_path.clone());
    let store = storage
        .load()
        .unwrap_or_else(|e| fail(format!("Failed to load snapshot: {}", e)));

    let tz = &config.time_zone;
    let now_day = today(Timestamp::now(), tz);

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => {
            let progress = project_progress(&store.projects, &store.tasks);
            let stats = dashboard_stats(&progress);
            ui::render_dashboard(&stats, &progress);
        }
        Commands::Projects { status, search } => {
            let filter = ProjectFilter {
                status: status.map(ProjectStatus::from),
                search,
            };
            let mut progress = project_progress(&store.projects, &store.tasks);
            progress.retain(|entry| filter.matches(entry.project));
            if progress.is_empty() {
                println!("No projects");
            } else {
                ui::render_view_header("Projects", progress.len(), "project");
                for entry in &progress {
                    ui::render_project_line(entry);
                }
            }
        }
        Commands::Tasks {
            status,
            priority,
            project,
            search,
            assignee,
            board,
        } => {
            let filter = TaskFilter {
                status: status.map(TaskStatus::from),
                priority: priority.map(Priority::from),
                project_id: project,
                search,
                assignees: assignee,
            };
            let tasks = filter.apply(&store.tasks);

            let line = |task: &Task| {
                let project_name = store.get_project(task.project_id).map(|p| p.name.as_str());
                ui::render_task_line(task, project_name, is_overdue(task, now_day, tz));
            };

            if tasks.is_empty() {
                println!("No tasks match");
            } else if board {
                ui::render_view_header("Board", tasks.len(), "task");
                ui::render_status_columns(&group_by_status(tasks.iter().copied()), line);
            } else {
                ui::render_view_header("Tasks", tasks.len(), "task");
                tasks.into_iter().for_each(line);
            }
        }
        Commands::Team { search } => {
            let summaries = compute_team_summaries(&store.projects, &store.tasks);
            let totals = team_totals(&summaries, &store.projects);
            let members = match search.as_deref() {
                Some(term) => search_members(&summaries, term),
                None => summaries.iter().collect(),
            };
            ui::render_team(&members, &totals);
        }
        Commands::Calendar { view, date, offset } => {
            let anchor =
                shift_period(date.unwrap_or(now_day), view, offset).unwrap_or_else(|e| fail(e));
            let (start, end) =
                view_range(anchor, view, config.week_start).unwrap_or_else(|e| fail(e));

            let events = derive_events(&store.projects, &store.tasks, tz);
            let days = group_events_by_day(&events, start, end);
            ui::render_calendar(&days, view, anchor, now_day);
        }
        Commands::Activity {
            filter,
            project,
            limit,
        } => {
            let mut feed: Vec<_> = store
                .activities
                .iter()
                .filter(|a| project.is_none() || a.project_id == project)
                .cloned()
                .collect();
            sort_newest_first(&mut feed, tz);
            feed.truncate(limit);

            ui::render_activity_filters(&counts_by_type_group(&feed), filter);
            let selected = filter_by_type(&feed, filter);
            if selected.is_empty() {
                println!("\n  No {} activity found", filter);
            } else {
                let days = group_by_calendar_day(selected, tz);
                ui::render_activity_days(&days, now_day, tz);
            }
        }
        Commands::Comments { task_id } => {
            let task = store
                .get_task(task_id)
                .unwrap_or_else(|| fail(format!("Task {} not found", task_id)));
            let comments = comments_for_task(&store.comments, task_id, tz);
            ui::render_comments(task, &comments, tz);
        }
        Commands::Files { task_id } => {
            let task = store
                .get_task(task_id)
                .unwrap_or_else(|| fail(format!("Task {} not found", task_id)));
            let files = files_for_task(&store.files, task_id, tz);
            if files.is_empty() {
                println!("No files attached to task {}", task_id);
            } else {
                ui::render_attachments(task, &files, tz);
            }
        }
        Commands::Settings { search, kind } => {
            let kind = kind.map(SettingType::from);
            let settings = search_settings(&store.settings, search.as_deref(), kind.as_ref());
            if settings.is_empty() {
                println!("No settings found");
            } else {
                ui::render_settings(&settings);
            }
        }
    }
}
