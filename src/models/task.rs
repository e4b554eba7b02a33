use serde::{Deserialize, Serialize};

use crate::models::lenient;

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Backend id of the task
    pub id: u64,
    /// Title of the task
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Team member name; free text, not checked against the project's members
    #[serde(default)]
    pub assignee: Option<String>,
    /// Workflow status. Missing statuses stay `None`
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Raw due date as exported by the backend, parsed lazily
    #[serde(default, alias = "due_date_c")]
    pub due_date: Option<String>,
    /// Manually tracked progress (0-100), independent of `status`
    #[serde(default, deserialize_with = "lenient::percent")]
    pub progress: u8,
    /// The project this task belongs to
    pub project_id: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub comment_count: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub attachment_count: u32,
}

impl Task {
    pub fn is_done(&self) -> bool {
        matches!(self.status, Some(TaskStatus::Done))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Unknown(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Done => "done",
            TaskStatus::Unknown(raw) => raw,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "todo" => TaskStatus::Todo,
            "inprogress" => TaskStatus::InProgress,
            "done" => TaskStatus::Done,
            _ => TaskStatus::Unknown(raw),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    Medium,
    High,
    Unknown(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Unknown(raw) => raw,
        }
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Unknown(raw),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}
