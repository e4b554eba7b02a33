use serde::Serialize;

/// Tasks of a collection bucketed by status.
///
/// `total` also counts tasks whose status is missing or unrecognised, so
/// `todo + in_progress + completed <= total`.
#[derive(Serialize, Default, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskCounts {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TaskCounts {
    /// Tasks that are not completed yet, as shown on the dashboard.
    pub fn active(&self) -> usize {
        self.todo + self.in_progress
    }
}
