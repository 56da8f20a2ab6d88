//! Field-level validation rules shared by the create and update request
//! schemas, plus the task-id syntax check used by every by-id route.
//!
//! The sanitization rule is accept-or-reject: input is run through the HTML
//! sanitizer and rejected outright if the sanitizer would change it. User
//! content is never silently rewritten.

use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use validator::ValidationError;

use crate::models::error_model::ApiErrorType;
use crate::models::task_model::{TaskPriority, TaskStatus};

/// Reject any value the HTML sanitizer would alter.
pub fn assert_sanitized(value: &str) -> Result<(), ValidationError> {
    if ammonia::clean(value) != value {
        return Err(ValidationError::new("invalid_characters"));
    }
    Ok(())
}

pub fn assert_subtasks_sanitized(subtasks: &[String]) -> Result<(), ValidationError> {
    for subtask in subtasks {
        assert_sanitized(subtask)?;
    }
    Ok(())
}

pub fn assert_priority(value: &str) -> Result<(), ValidationError> {
    match TaskPriority::from_str(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("priority_invalid")),
    }
}

pub fn assert_status(value: &str) -> Result<(), ValidationError> {
    match TaskStatus::from_str(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("status_invalid")),
    }
}

pub fn assert_due_date(value: &str) -> Result<(), ValidationError> {
    match parse_due_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("due_date_invalid")),
    }
}

/// Accepts RFC3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Syntactic 24-hex check only; existence is a storage concern.
pub fn parse_task_id(raw_id: &str) -> Result<ObjectId, ApiErrorType> {
    ObjectId::parse_str(raw_id).map_err(|_| ApiErrorType::InvalidTaskId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn plain_text_passes_sanitization() {
        assert!(assert_sanitized("Finish quarterly report").is_ok());
        assert!(assert_sanitized("").is_ok());
    }

    #[test]
    fn script_content_is_rejected_not_cleaned() {
        assert!(assert_sanitized("<script>alert('x')</script>").is_err());
        assert!(assert_sanitized("Report <script>steal()</script>").is_err());
    }

    #[test]
    fn sanitization_is_idempotent() {
        let dirty = "Report <script>steal()</script>";
        let once = ammonia::clean(dirty);
        assert_eq!(ammonia::clean(&once), once);
    }

    #[test]
    fn subtask_list_rejects_any_tainted_item() {
        let clean = vec!["buy milk".to_string(), "walk dog".to_string()];
        assert!(assert_subtasks_sanitized(&clean).is_ok());

        let tainted = vec!["buy milk".to_string(), "<script>x</script>".to_string()];
        assert!(assert_subtasks_sanitized(&tainted).is_err());
    }

    #[test]
    fn priority_and_status_enum_membership() {
        assert!(assert_priority("medium").is_ok());
        assert!(assert_priority("urgent").is_err());
        assert!(assert_status("in progress").is_ok());
        assert!(assert_status("done").is_err());
    }

    #[test]
    fn due_date_accepts_calendar_and_rfc3339_forms() {
        let date = parse_due_date("2024-12-31").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 12, 31));

        assert!(parse_due_date("2024-12-31T10:30:00Z").is_some());
        assert!(parse_due_date("not-a-date").is_none());
        assert!(parse_due_date("2024-13-01").is_none());
    }

    #[test]
    fn task_id_requires_24_hex_characters() {
        assert!(parse_task_id("614c2f79a7a6a9e64b9e9331").is_ok());
        assert!(parse_task_id("614c2f79a7a6a9e64b9e933").is_err());
        assert!(parse_task_id("614c2f79a7a6a9e64b9e9331a").is_err());
        assert!(parse_task_id("not-a-hex-id-at-all!!!!!").is_err());
        assert!(parse_task_id("").is_err());
    }
}
