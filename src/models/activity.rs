use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    /// Name of the user who performed the action
    pub user: String,
    /// Raw time of the action as exported by the backend, parsed lazily
    #[serde(default)]
    pub timestamp: String,
    /// Free text the backend attaches to types without a dedicated sentence
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub task_id: Option<u64>,
    #[serde(default)]
    pub task_title: Option<String>,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub project_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    TaskCreated,
    TaskCompleted,
    TaskUpdated,
    TaskAssigned,
    ProjectCreated,
    ProjectUpdated,
    CommentAdded,
    FileUploaded,
    Unknown(String),
}

impl ActivityType {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityType::TaskCreated => "task_created",
            ActivityType::TaskCompleted => "task_completed",
            ActivityType::TaskUpdated => "task_updated",
            ActivityType::TaskAssigned => "task_assigned",
            ActivityType::ProjectCreated => "project_created",
            ActivityType::ProjectUpdated => "project_updated",
            ActivityType::CommentAdded => "comment_added",
            ActivityType::FileUploaded => "file_uploaded",
            ActivityType::Unknown(raw) => raw,
        }
    }
}

impl From<String> for ActivityType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "task_created" => ActivityType::TaskCreated,
            "task_completed" => ActivityType::TaskCompleted,
            "task_updated" => ActivityType::TaskUpdated,
            "task_assigned" => ActivityType::TaskAssigned,
            "project_created" => ActivityType::ProjectCreated,
            "project_updated" => ActivityType::ProjectUpdated,
            "comment_added" => ActivityType::CommentAdded,
            "file_uploaded" => ActivityType::FileUploaded,
            _ => ActivityType::Unknown(raw),
        }
    }
}

impl From<ActivityType> for String {
    fn from(kind: ActivityType) -> Self {
        kind.as_str().to_string()
    }
}
