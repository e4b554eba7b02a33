use std::{collections::BTreeMap, fmt, str::FromStr};

use jiff::{civil::Date, tz::TimeZone};
use thiserror::Error;
use tracing::warn;

use crate::{
    models::activity::{Activity, ActivityType},
    services::dates::parse_record_date,
};

/// Named buckets of activity types used by the feed filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeGroup {
    #[default]
    All,
    Tasks,
    Comments,
    Projects,
    Files,
}

impl TypeGroup {
    pub const ALL: [TypeGroup; 5] = [
        TypeGroup::All,
        TypeGroup::Tasks,
        TypeGroup::Comments,
        TypeGroup::Projects,
        TypeGroup::Files,
    ];

    pub fn contains(&self, kind: &ActivityType) -> bool {
        match self {
            TypeGroup::All => true,
            TypeGroup::Tasks => matches!(
                kind,
                ActivityType::TaskCreated
                    | ActivityType::TaskCompleted
                    | ActivityType::TaskUpdated
                    | ActivityType::TaskAssigned
            ),
            TypeGroup::Comments => matches!(kind, ActivityType::CommentAdded),
            TypeGroup::Projects => matches!(
                kind,
                ActivityType::ProjectCreated | ActivityType::ProjectUpdated
            ),
            TypeGroup::Files => matches!(kind, ActivityType::FileUploaded),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeGroup::All => "all",
            TypeGroup::Tasks => "tasks",
            TypeGroup::Comments => "comments",
            TypeGroup::Projects => "projects",
            TypeGroup::Files => "files",
        }
    }
}

impl fmt::Display for TypeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown activity filter '{0}'. Expected one of: all, tasks, comments, projects, files")]
pub struct ParseTypeGroupError(String);

impl FromStr for TypeGroup {
    type Err = ParseTypeGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeGroup::ALL
            .into_iter()
            .find(|group| group.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseTypeGroupError(s.to_string()))
    }
}

pub fn filter_by_type(activities: &[Activity], group: TypeGroup) -> Vec<&Activity> {
    activities.iter().filter(|a| group.contains(&a.kind)).collect()
}

/// Activities of a single calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDay<'a> {
    pub day: Date,
    pub activities: Vec<&'a Activity>,
}

/// Bucket activities by their local calendar day, most recent day first.
///
/// Within a day the input order is kept, so callers pass a feed already
/// sorted newest first. Activities with an unparseable timestamp are skipped.
pub fn group_by_calendar_day<'a, I>(activities: I, tz: &TimeZone) -> Vec<ActivityDay<'a>>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut days: BTreeMap<Date, Vec<&'a Activity>> = BTreeMap::new();
    for activity in activities {
        let Some(at) = parse_record_date(&activity.timestamp, tz) else {
            warn!(
                activity_id = activity.id,
                timestamp = %activity.timestamp,
                "skipping activity with invalid timestamp"
            );
            continue;
        };
        days.entry(at.date()).or_default().push(activity);
    }

    days.into_iter()
        .rev()
        .map(|(day, activities)| ActivityDay { day, activities })
        .collect()
}

/// Order a feed newest first. Unparseable timestamps sort last.
pub fn sort_newest_first(activities: &mut [Activity], tz: &TimeZone) {
    activities.sort_by_cached_key(|a| std::cmp::Reverse(parse_record_date(&a.timestamp, tz)));
}

/// Badge counts for the feed filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeGroupCounts {
    pub all: usize,
    pub tasks: usize,
    pub comments: usize,
    pub projects: usize,
    pub files: usize,
}

impl TypeGroupCounts {
    pub fn get(&self, group: TypeGroup) -> usize {
        match group {
            TypeGroup::All => self.all,
            TypeGroup::Tasks => self.tasks,
            TypeGroup::Comments => self.comments,
            TypeGroup::Projects => self.projects,
            TypeGroup::Files => self.files,
        }
    }
}

pub fn counts_by_type_group(activities: &[Activity]) -> TypeGroupCounts {
    let count = |group: TypeGroup| activities.iter().filter(|a| group.contains(&a.kind)).count();

    TypeGroupCounts {
        all: count(TypeGroup::All),
        tasks: count(TypeGroup::Tasks),
        comments: count(TypeGroup::Comments),
        projects: count(TypeGroup::Projects),
        files: count(TypeGroup::Files),
    }
}

/// Sentence describing what the user did, without the user's name.
pub fn describe(activity: &Activity) -> String {
    let task = activity.task_title.as_deref().unwrap_or("untitled task");
    let project = activity.project_name.as_deref().unwrap_or("untitled project");

    match activity.kind {
        ActivityType::TaskCreated => format!("created task \"{task}\""),
        ActivityType::TaskCompleted => format!("completed task \"{task}\""),
        ActivityType::TaskUpdated => format!("updated task \"{task}\""),
        ActivityType::TaskAssigned => format!("was assigned to task \"{task}\""),
        ActivityType::ProjectCreated => format!("created project \"{project}\""),
        ActivityType::ProjectUpdated => format!("updated project \"{project}\""),
        ActivityType::CommentAdded => format!("commented on \"{task}\""),
        ActivityType::FileUploaded => format!("uploaded a file to \"{task}\""),
        ActivityType::Unknown(_) => activity
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "performed an action".to_string()),
    }
}

/// Header of a day group, e.g. "Today", "Yesterday" or "March 1, 2024".
pub fn day_label(day: Date, today: Date) -> String {
    if day == today {
        "Today".to_string()
    } else if today.yesterday().is_ok_and(|yesterday| yesterday == day) {
        "Yesterday".to_string()
    } else {
        day.strftime("%B %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn activity(id: u64, kind: &str, timestamp: &str) -> Activity {
        Activity {
            id,
            kind: ActivityType::from(kind.to_string()),
            user: "Ann".into(),
            timestamp: timestamp.into(),
            description: None,
            task_id: Some(1),
            task_title: Some("Ship it".into()),
            project_id: Some(1),
            project_name: Some("Alpha".into()),
        }
    }

    fn feed() -> Vec<Activity> {
        vec![
            activity(1, "task_completed", "2024-03-02T15:00:00Z"),
            activity(2, "comment_added", "2024-03-02T09:00:00Z"),
            activity(3, "project_created", "2024-03-01T12:00:00Z"),
            activity(4, "file_uploaded", "2024-02-28T08:00:00Z"),
            activity(5, "task_assigned", "2024-02-28T07:00:00Z"),
            activity(6, "meeting_held", "2024-02-27T07:00:00Z"),
        ]
    }

    #[test]
    fn test_filter_by_type() {
        let activities = feed();

        let ids = |group| -> Vec<u64> {
            filter_by_type(&activities, group).iter().map(|a| a.id).collect()
        };

        assert_eq!(ids(TypeGroup::Tasks), vec![1, 5]);
        assert_eq!(ids(TypeGroup::Comments), vec![2]);
        assert_eq!(ids(TypeGroup::Projects), vec![3]);
        assert_eq!(ids(TypeGroup::Files), vec![4]);
        assert_eq!(ids(TypeGroup::All).len(), 6);
    }

    #[test]
    fn test_counts_agree_with_filter() {
        for activities in [feed(), vec![]] {
            let counts = counts_by_type_group(&activities);
            for group in TypeGroup::ALL {
                assert_eq!(
                    counts.get(group),
                    filter_by_type(&activities, group).len(),
                    "group {group}"
                );
            }
        }
    }

    #[test]
    fn test_group_by_day_newest_first_keeps_input_order() {
        let activities = feed();

        let days = group_by_calendar_day(&activities, &TimeZone::UTC);

        let summary: Vec<(Date, Vec<u64>)> = days
            .iter()
            .map(|d| (d.day, d.activities.iter().map(|a| a.id).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (date(2024, 3, 2), vec![1, 2]),
                (date(2024, 3, 1), vec![3]),
                (date(2024, 2, 28), vec![4, 5]),
                (date(2024, 2, 27), vec![6]),
            ]
        );
    }

    #[test]
    fn test_group_by_day_uses_local_zone() {
        let activities = vec![activity(1, "task_created", "2024-03-02T02:00:00Z")];
        let tz = TimeZone::fixed(jiff::tz::offset(-5));

        let days = group_by_calendar_day(&activities, &tz);

        assert_eq!(days[0].day, date(2024, 3, 1));
    }

    #[test]
    fn test_group_by_day_accepts_bare_dates_and_skips_garbage() {
        let activities = vec![
            activity(1, "task_created", "2024-03-01"),
            activity(2, "task_created", "2024-03-01T17:45:00"),
            activity(3, "task_created", "yesterday-ish"),
            activity(4, "task_created", ""),
        ];

        let days = group_by_calendar_day(&activities, &TimeZone::UTC);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day, date(2024, 3, 1));
        let ids: Vec<u64> = days[0].activities.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut activities = vec![
            activity(1, "task_created", "2024-03-01T08:00:00Z"),
            activity(2, "task_created", "garbage"),
            activity(3, "task_created", "2024-03-02"),
            activity(4, "task_created", "2024-03-01T09:00:00Z"),
        ];

        sort_newest_first(&mut activities, &TimeZone::UTC);

        let ids: Vec<u64> = activities.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_group_filtered_feed() {
        let activities = feed();
        let days = group_by_calendar_day(filter_by_type(&activities, TypeGroup::Tasks), &TimeZone::UTC);
        assert_eq!(days.len(), 2);
        assert!(group_by_calendar_day(&[], &TimeZone::UTC).is_empty());
    }

    #[test]
    fn test_describe() {
        let activities = feed();
        assert_eq!(describe(&activities[0]), "completed task \"Ship it\"");
        assert_eq!(describe(&activities[2]), "created project \"Alpha\"");
        assert_eq!(describe(&activities[5]), "performed an action");

        let mut custom = activities[5].clone();
        custom.description = Some("held the weekly sync".into());
        assert_eq!(describe(&custom), "held the weekly sync");
    }

    #[test]
    fn test_day_label() {
        let today = date(2024, 3, 2);
        assert_eq!(day_label(today, today), "Today");
        assert_eq!(day_label(date(2024, 3, 1), today), "Yesterday");
        assert_eq!(day_label(date(2024, 2, 9), today), "February 9, 2024");
    }

    #[test]
    fn test_parse_type_group() {
        assert_eq!("Comments".parse::<TypeGroup>().unwrap(), TypeGroup::Comments);
        assert!("photos".parse::<TypeGroup>().is_err());
    }
}
