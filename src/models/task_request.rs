use mongodb::bson::{DateTime as BsonDateTime, Document};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::models::task_model::{Task, TaskPriority, TaskStatus};
use crate::validation;

/// Create-task payload. Every field is serde-optional so that a missing
/// field surfaces as a collected validation error alongside any others,
/// rather than aborting deserialization on the first gap.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(
        required(message = "Title is a required field."),
        length(min = 1, message = "Title cannot be empty."),
        custom(
            function = validation::assert_sanitized,
            message = "Invalid characters detected in title."
        )
    )]
    pub title: Option<String>,
    #[validate(custom(
        function = validation::assert_sanitized,
        message = "Invalid characters detected in description."
    ))]
    pub description: Option<String>,
    #[serde(rename = "dueDate")]
    #[validate(
        required(message = "Due Date is a required field."),
        custom(
            function = validation::assert_due_date,
            message = "Due Date must be a valid date."
        )
    )]
    pub due_date: Option<String>,
    #[validate(
        required(message = "Priority is a required field."),
        custom(
            function = validation::assert_priority,
            message = "Priority must be one of [low, medium, high]."
        )
    )]
    pub priority: Option<String>,
    #[validate(
        required(message = "Status is a required field."),
        custom(
            function = validation::assert_status,
            message = "Status must be one of [pending, in progress, completed]."
        )
    )]
    pub status: Option<String>,
    #[validate(custom(
        function = validation::assert_subtasks_sanitized,
        message = "Invalid characters detected in subtask."
    ))]
    pub subtasks: Option<Vec<String>>,
}

impl TryFrom<CreateTaskRequest> for Task {
    type Error = ValidationErrors;

    fn try_from(request: CreateTaskRequest) -> Result<Self, Self::Error> {
        request.validate()?;
        // The schema above guarantees dueDate/priority/status are present
        // and well-formed; the fallbacks are the service-layer defaults.
        let due_date = request
            .due_date
            .as_deref()
            .and_then(validation::parse_due_date)
            .ok_or_else(ValidationErrors::new)?;
        Ok(Task {
            id: None,
            title: request.title.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            due_date,
            priority: request
                .priority
                .as_deref()
                .and_then(TaskPriority::from_str)
                .unwrap_or(TaskPriority::Low),
            status: request
                .status
                .as_deref()
                .and_then(TaskStatus::from_str)
                .unwrap_or(TaskStatus::Pending),
            subtasks: request.subtasks.unwrap_or_default(),
        })
    }
}

/// Partial-update payload. Same rule table as create with every rule made
/// optional; an empty body is valid input at this stage.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(
        length(min = 1, message = "Title cannot be empty."),
        custom(
            function = validation::assert_sanitized,
            message = "Invalid characters detected in title."
        )
    )]
    pub title: Option<String>,
    #[validate(custom(
        function = validation::assert_sanitized,
        message = "Invalid characters detected in description."
    ))]
    pub description: Option<String>,
    #[serde(rename = "dueDate")]
    #[validate(custom(
        function = validation::assert_due_date,
        message = "Due Date must be a valid date."
    ))]
    pub due_date: Option<String>,
    #[validate(custom(
        function = validation::assert_priority,
        message = "Priority must be one of [low, medium, high]."
    ))]
    pub priority: Option<String>,
    #[validate(custom(
        function = validation::assert_status,
        message = "Status must be one of [pending, in progress, completed]."
    ))]
    pub status: Option<String>,
    #[validate(custom(
        function = validation::assert_subtasks_sanitized,
        message = "Invalid characters detected in subtask."
    ))]
    pub subtasks: Option<Vec<String>>,
}

impl UpdateTaskRequest {
    /// Build the `$set` document from the supplied fields only. Fields left
    /// out of the request keep their stored value.
    pub fn into_set_document(self) -> Document {
        let mut fields = Document::new();
        if let Some(title) = self.title {
            fields.insert("title", title);
        }
        if let Some(description) = self.description {
            fields.insert("description", description);
        }
        if let Some(raw_date) = self.due_date {
            if let Some(due_date) = validation::parse_due_date(&raw_date) {
                fields.insert("dueDate", BsonDateTime::from_chrono(due_date));
            }
        }
        if let Some(priority) = self.priority {
            fields.insert("priority", priority);
        }
        if let Some(status) = self.status {
            fields.insert("status", status);
        }
        if let Some(subtasks) = self.subtasks {
            fields.insert("subtasks", subtasks);
        }
        fields
    }
}
