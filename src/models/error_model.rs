use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use validator::ValidationErrors;

/// Error envelope returned for every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub time: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_message: Option<String>,
    pub sub_errors: Vec<String>,
}

#[derive(Debug)]
pub enum ApiErrorType {
    /// One or more field rules failed; carries the full set of violations.
    ValidationError {
        validation_error: ValidationErrors,
        object: String,
    },
    /// Malformed task id (not a 24-hex ObjectId).
    InvalidTaskId,
    TaskNotFound,
    /// Storage round-trip failed; the driver message is surfaced verbatim.
    StorageError { message: String },
    InternalServerError,
}

impl ApiErrorType {
    fn message(&self) -> String {
        match self {
            Self::ValidationError { object, .. } => format!("{} validation failed", object),
            Self::InvalidTaskId => "Invalid task ID".to_string(),
            Self::TaskNotFound => "Task not found".to_string(),
            Self::StorageError { message } => message.clone(),
            Self::InternalServerError => "Unexpected error occurred".to_string(),
        }
    }

    fn sub_errors(&self) -> Vec<String> {
        match self {
            Self::ValidationError {
                validation_error, ..
            } => validation_messages(validation_error),
            _ => Vec::new(),
        }
    }
}

/// Flatten the per-field rule violations into their human-readable messages.
fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => messages.push(message.to_string()),
                None => messages.push(format!("Validation failed on {}: {}", field, error.code)),
            }
        }
    }
    messages
}

impl fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl ResponseError for ApiErrorType {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidTaskId => StatusCode::BAD_REQUEST,
            Self::TaskNotFound => StatusCode::NOT_FOUND,
            Self::StorageError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiError {
            status: self.status_code().as_u16(),
            time: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            message: self.message(),
            debug_message: None,
            sub_errors: self.sub_errors(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    fn sample_validation_errors() -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let mut title_error = ValidationError::new("required");
        title_error.message = Some("Title is a required field.".into());
        errors.add("title", title_error);
        let mut status_error = ValidationError::new("status_invalid");
        status_error.message =
            Some("Status must be one of [pending, in progress, completed].".into());
        errors.add("status", status_error);
        errors
    }

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        let validation = ApiErrorType::ValidationError {
            validation_error: sample_validation_errors(),
            object: "Task".to_string(),
        };
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiErrorType::InvalidTaskId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiErrorType::TaskNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiErrorType::StorageError {
                message: "pool timed out".to_string()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_errors_surface_every_message() {
        let error = ApiErrorType::ValidationError {
            validation_error: sample_validation_errors(),
            object: "Task".to_string(),
        };
        let sub_errors = error.sub_errors();
        assert_eq!(sub_errors.len(), 2);
        assert!(sub_errors.contains(&"Title is a required field.".to_string()));
        assert!(sub_errors
            .contains(&"Status must be one of [pending, in progress, completed].".to_string()));
    }

    #[test]
    fn storage_error_message_is_surfaced_verbatim() {
        let error = ApiErrorType::StorageError {
            message: "server selection timeout".to_string(),
        };
        assert_eq!(error.message(), "server selection timeout");
    }
}
