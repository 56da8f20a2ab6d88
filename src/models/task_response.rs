use serde::Serialize;

use crate::models::task_model::Task;

/// Confirmation payload for a successful delete: the message plus a snapshot
/// of the document as it was just before removal.
#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    pub message: String,
    #[serde(rename = "deletedTask")]
    pub deleted_task: Task,
}
