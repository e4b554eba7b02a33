use serde::{Deserialize, Serialize};

use crate::models::lenient;

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Backend id of the project
    pub id: u64,
    /// Name of the project
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Description of the project
    #[serde(default)]
    pub description: Option<String>,
    /// Team member names in the order they were added. Duplicates are allowed
    #[serde(default)]
    pub team_members: Vec<String>,
    /// Lifecycle status of the project
    #[serde(default)]
    pub status: ProjectStatus,
    /// Raw start date as exported by the backend
    #[serde(default, alias = "start_date_c")]
    pub start_date: Option<String>,
    /// Raw end date as exported by the backend
    #[serde(default, alias = "end_date_c")]
    pub end_date: Option<String>,
    /// Raw creation time as exported by the backend
    #[serde(default, alias = "created_at_c")]
    pub created_at: Option<String>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    #[default]
    Active,
    OnHold,
    Completed,
    Unknown(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::OnHold => "on-hold",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Unknown(raw) => raw,
        }
    }
}

impl From<String> for ProjectStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "active" => ProjectStatus::Active,
            "on-hold" => ProjectStatus::OnHold,
            "completed" => ProjectStatus::Completed,
            _ => ProjectStatus::Unknown(raw),
        }
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.as_str().to_string()
    }
}
