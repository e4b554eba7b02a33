use std::collections::HashMap;

use tracing::debug;

use crate::models::{
    project::{Project, ProjectStatus},
    task::Task,
    team::{ProjectAssociation, TeamMemberSummary},
};

/// Fold projects and tasks into one workload summary per team member.
///
/// Members are discovered from every project's `team_members` and keep the
/// order in which they first appear. Assignees are matched by exact,
/// case-sensitive name; tasks assigned to anyone else are ignored.
pub fn compute_team_summaries(projects: &[Project], tasks: &[Task]) -> Vec<TeamMemberSummary> {
    let mut summaries: Vec<TeamMemberSummary> = vec![];
    let mut index: HashMap<&str, usize> = HashMap::new();

    for project in projects {
        for member in &project.team_members {
            let position = *index.entry(member.as_str()).or_insert_with(|| {
                summaries.push(TeamMemberSummary::new(member.as_str()));
                summaries.len() - 1
            });
            summaries[position].projects.push(ProjectAssociation {
                project_id: project.id,
                project_name: project.name.clone(),
                project_status: project.status.clone(),
            });
        }
    }

    for task in tasks {
        let Some(assignee) = task.assignee.as_deref() else {
            continue;
        };
        let Some(&position) = index.get(assignee) else {
            debug!(task_id = task.id, assignee, "assignee is not a known team member");
            continue;
        };

        let summary = &mut summaries[position];
        summary.total_tasks += 1;
        if task.is_done() {
            summary.completed_tasks += 1;
        } else {
            summary.active_tasks += 1;
        }
    }

    summaries
}

pub fn search_members<'a>(summaries: &'a [TeamMemberSummary], term: &str) -> Vec<&'a TeamMemberSummary> {
    let term = term.to_lowercase();
    summaries
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&term))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamTotals {
    pub members: usize,
    pub active_projects: usize,
    pub active_tasks: usize,
    pub completed_tasks: usize,
}

pub fn team_totals(summaries: &[TeamMemberSummary], projects: &[Project]) -> TeamTotals {
    TeamTotals {
        members: summaries.len(),
        active_projects: projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Active)
            .count(),
        active_tasks: summaries.iter().map(|s| s.active_tasks).sum(),
        completed_tasks: summaries.iter().map(|s| s.completed_tasks).sum(),
    }
}
