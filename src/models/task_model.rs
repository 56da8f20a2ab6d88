use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize, Serializer};

/// A task document as stored in the `tasks` collection and returned to
/// clients. The id is assigned by MongoDB on insert and rendered back to
/// clients as its 24-hex representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id_as_hex"
    )]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "dueDate", with = "chrono_datetime_as_bson_datetime")]
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(default)]
    pub subtasks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl TaskStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        }
    }
}

// `_id` is skipped when absent, so the None arm never renders in practice.
fn serialize_object_id_as_hex<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(object_id) => serializer.serialize_str(&object_id.to_hex()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_wire_names() {
        assert_eq!(TaskStatus::InProgress.as_str(), "in progress");
        assert_eq!(TaskStatus::from_str("in progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_str("in_progress"), None);
    }

    #[test]
    fn priority_round_trips_lowercase() {
        for value in ["low", "medium", "high"] {
            let priority = TaskPriority::from_str(value).unwrap();
            assert_eq!(priority.as_str(), value);
        }
        assert_eq!(TaskPriority::from_str("urgent"), None);
    }

    #[test]
    fn task_serializes_id_as_hex_string() {
        let id = ObjectId::parse_str("614c2f79a7a6a9e64b9e9331").unwrap();
        let task = Task {
            id: Some(id),
            title: "Write report".to_string(),
            description: String::new(),
            due_date: Utc::now(),
            priority: TaskPriority::High,
            status: TaskStatus::Pending,
            subtasks: vec![],
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["_id"], "614c2f79a7a6a9e64b9e9331");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["priority"], "high");
    }

    #[test]
    fn task_without_id_omits_the_field() {
        let task = Task {
            id: None,
            title: "Untracked".to_string(),
            description: String::new(),
            due_date: Utc::now(),
            priority: TaskPriority::Low,
            status: TaskStatus::Completed,
            subtasks: vec![],
        };
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("_id").is_none());
    }
}
