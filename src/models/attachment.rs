use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// File uploaded to a task.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: u64,
    /// File name as uploaded
    #[serde(default, alias = "Name", deserialize_with = "lenient::text")]
    pub name: String,
    /// Size in bytes
    #[serde(default, alias = "size_c", deserialize_with = "lenient::size")]
    pub size: u64,
    /// MIME type reported by the browser, e.g. `application/pdf`
    #[serde(default, rename = "type", alias = "type_c")]
    pub mime_type: Option<String>,
    /// Raw upload time, parsed lazily
    #[serde(default, alias = "uploadDate_c")]
    pub upload_date: Option<String>,
    #[serde(alias = "task_id_c")]
    pub task_id: u64,
    #[serde(default, alias = "fileLocation_c")]
    pub location: Option<String>,
}
