use serde::Serialize;

use crate::models::project::ProjectStatus;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAssociation {
    pub project_id: u64,
    pub project_name: String,
    pub project_status: ProjectStatus,
}

/// Workload of a single team member across every project listing them.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberSummary {
    pub name: String,
    pub projects: Vec<ProjectAssociation>,
    pub total_tasks: usize,
    pub active_tasks: usize,
    pub completed_tasks: usize,
}

impl TeamMemberSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            projects: vec![],
            total_tasks: 0,
            active_tasks: 0,
            completed_tasks: 0,
        }
    }
}
