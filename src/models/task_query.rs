use mongodb::bson::Document;
use mongodb::options::FindOptions;
use serde::Deserialize;

use crate::constants;

/// Query-string parameters for the list endpoint. A pure transform from
/// request parameters to a storage query descriptor; it never touches the
/// database itself.
///
/// `limit`/`skip` arrive as raw strings and fall back to their defaults on
/// anything that does not parse as an integer. Out-of-range values are not
/// clamped.
#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
    pub limit: Option<String>,
    pub skip: Option<String>,
}

impl TaskQuery {
    /// Equality filter over status/priority. A field absent from the request
    /// is omitted entirely, meaning "no filter on that field".
    pub fn filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(status) = &self.status {
            filter.insert("status", status);
        }
        if let Some(priority) = &self.priority {
            filter.insert("priority", priority);
        }
        filter
    }

    /// Single-key sort; no tie-break key, ties fall to the storage layer's
    /// natural order.
    pub fn sort(&self) -> Document {
        let direction: i32 = match self.sort_order.as_deref() {
            Some("desc") => -1,
            _ => 1,
        };
        let mut sort = Document::new();
        sort.insert(
            self.sort_by
                .as_deref()
                .unwrap_or(constants::DEFAULT_SORT_FIELD),
            direction,
        );
        sort
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or(constants::DEFAULT_LIMIT_SIZE)
    }

    pub fn skip(&self) -> u64 {
        self.skip
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or(constants::DEFAULT_SKIP_SIZE)
    }

    pub fn find_options(&self) -> FindOptions {
        FindOptions::builder()
            .sort(self.sort())
            .skip(self.skip())
            .limit(self.limit())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn empty_query_uses_all_defaults() {
        let query = TaskQuery::default();
        assert!(query.filter().is_empty());
        assert_eq!(query.sort(), doc! { "dueDate": 1 });
        assert_eq!(query.limit(), 10);
        assert_eq!(query.skip(), 0);
    }

    #[test]
    fn filter_includes_only_provided_fields() {
        let query = TaskQuery {
            status: Some("pending".to_string()),
            ..Default::default()
        };
        assert_eq!(query.filter(), doc! { "status": "pending" });

        let query = TaskQuery {
            status: Some("completed".to_string()),
            priority: Some("high".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.filter(),
            doc! { "status": "completed", "priority": "high" }
        );
    }

    #[test]
    fn sort_order_desc_flips_direction() {
        let query = TaskQuery {
            sort_by: Some("title".to_string()),
            sort_order: Some("desc".to_string()),
            ..Default::default()
        };
        assert_eq!(query.sort(), doc! { "title": -1 });
    }

    #[test]
    fn sort_order_anything_else_is_ascending() {
        let query = TaskQuery {
            sort_order: Some("ascending".to_string()),
            ..Default::default()
        };
        assert_eq!(query.sort(), doc! { "dueDate": 1 });
    }

    #[test]
    fn non_numeric_pagination_falls_back_to_defaults() {
        let query = TaskQuery {
            limit: Some("abc".to_string()),
            skip: Some("xyz".to_string()),
            ..Default::default()
        };
        assert_eq!(query.limit(), 10);
        assert_eq!(query.skip(), 0);
    }

    #[test]
    fn pagination_window_parses() {
        let query = TaskQuery {
            limit: Some("1".to_string()),
            skip: Some("1".to_string()),
            ..Default::default()
        };
        assert_eq!(query.limit(), 1);
        assert_eq!(query.skip(), 1);
        let options = query.find_options();
        assert_eq!(options.limit, Some(1));
        assert_eq!(options.skip, Some(1));
    }

    #[test]
    fn query_string_field_names_deserialize() {
        let query: TaskQuery =
            serde_json::from_value(serde_json::json!({ "sortBy": "priority", "sortOrder": "desc" }))
                .unwrap();
        assert_eq!(query.sort(), doc! { "priority": -1 });
    }
}
