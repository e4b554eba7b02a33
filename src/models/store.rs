use serde::{Deserialize, Serialize};

use crate::models::{
    activity::Activity, attachment::Attachment, comment::Comment, project::Project,
    setting::Setting, task::Task,
};

/// Current schema version
pub const CURRENT_VERSION: u32 = 2;

/// Read-only copy of the backend tables taken at export time.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Store {
    pub version: u32,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub files: Vec<Attachment>,
    #[serde(default)]
    pub settings: Vec<Setting>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            projects: vec![],
            tasks: vec![],
            comments: vec![],
            activities: vec![],
            files: vec![],
            settings: vec![],
        }
    }
}

impl Store {
    pub fn get_project(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn get_task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}
