use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    /// Task the comment was left on
    pub task_id: u64,
    pub author: String,
    pub content: String,
    /// Raw posting time, parsed lazily
    #[serde(default)]
    pub timestamp: String,
}
